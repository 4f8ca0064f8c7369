pub mod batch;
pub mod protocol;
pub mod server;
