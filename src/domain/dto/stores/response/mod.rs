pub mod store_response;

pub use store_response::*;
