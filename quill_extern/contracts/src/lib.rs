//! Clients for the Ghost Admin API.

pub mod email;
pub mod email_preview;
pub mod post;
