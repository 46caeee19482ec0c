pub mod store_request;
pub mod query;

pub use store_request::*;
pub use query::*;
