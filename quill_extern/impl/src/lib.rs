pub mod email;
pub mod email_preview;
pub mod http;
pub mod post;
mod resources;
