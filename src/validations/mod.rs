mod mapping;

pub use mapping::{validate_shortcode, validate_url, MAX_SHORTCODE_LENGTH};
