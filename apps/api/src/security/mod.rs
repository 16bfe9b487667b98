pub mod csrf;
pub mod headers;
pub mod sanitizer;

pub use csrf::CsrfGuard;
pub use sanitizer::{sanitize_plain_text, sanitize_rich_text};
