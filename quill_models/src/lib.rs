use std::{ops::Deref, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

pub mod email;
pub mod email_address;
mod macros;
pub mod post;
pub mod settings;

/// Ghost object ids are 24 lowercase hex digits (a MongoDB style ObjectId).
pub static OBJECT_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[0-9a-f]{24}$").expect("object id regex is valid"));

/// Wrapper for values which must never end up in logs.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sensitive<T>(pub T);

impl<T> std::fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[sensitive]")
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> Deref for Sensitive<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
