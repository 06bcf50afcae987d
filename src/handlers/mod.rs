mod mapping;

pub use mapping::{create_handler, delete_handler, get_handler, update_handler};
