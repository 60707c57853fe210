macro_rules! object_id {
    ($(#[doc = $doc:literal])* $ident:ident) => {
        $(#[doc = $doc])*
        #[::nutype::nutype(
            sanitize(trim, lowercase),
            validate(regex = OBJECT_ID_REGEX),
            derive(
                Debug,
                Clone,
                PartialEq,
                Eq,
                Hash,
                Deref,
                TryFrom,
                FromStr,
                Display,
                Serialize,
                Deserialize,
            )
        )]
        pub struct $ident(String);
    };
}

pub(crate) use object_id;
