pub mod shortcode;
