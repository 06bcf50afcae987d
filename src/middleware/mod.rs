mod request_logger;

pub use request_logger::{RequestLogger, REQUEST_ID_HEADER};
