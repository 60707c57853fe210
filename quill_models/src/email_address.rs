use std::str::FromStr;

use lettre::address::AddressError;
use serde::{Deserialize, Serialize};

/// A syntactically valid email address.
///
/// The domain must be a dotted host name ending in an alphabetic top level
/// domain; bare hosts like `localhost` and IP literals are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(pub lettre::Address);

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmailAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let address = s.parse::<lettre::Address>()?;
        if !is_qualified_domain(address.domain()) {
            return Err(AddressError::InvalidDomain);
        }
        Ok(Self(address))
    }
}

fn is_qualified_domain(domain: &str) -> bool {
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    !host.is_empty()
        && !domain.starts_with('[')
        && tld.chars().count() >= 2
        && (tld.chars().all(char::is_alphabetic) || tld.to_ascii_lowercase().starts_with("xn--"))
}

impl TryFrom<&str> for EmailAddress {
    type Error = <Self as FromStr>::Err;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        for (input, valid) in [
            ("owner@example.com", true),
            ("first.last+news@mail.example.org", true),
            ("", false),
            ("owner", false),
            ("owner@", false),
            ("@example.com", false),
            ("owner @example.com", false),
            ("owner@exa mple.com", false),
            ("owner@localhost", false),
            ("owner@[127.0.0.1]", false),
            ("owner@example", false),
            ("owner@127.0.0.1", false),
            ("owner@example.c", false),
            ("owner@mail.example.xn--p1ai", true),
        ] {
            assert_eq!(input.parse::<EmailAddress>().is_ok(), valid, "{input:?}");
        }
    }

    #[test]
    fn serializes_as_plain_string() {
        let address = "owner@example.com".parse::<EmailAddress>().unwrap();
        assert_eq!(
            serde_json::to_value(&address).unwrap(),
            serde_json::json!("owner@example.com")
        );
    }
}
