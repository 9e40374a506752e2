pub mod dispatcher;
pub mod message;
pub mod store;
