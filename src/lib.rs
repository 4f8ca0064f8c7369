pub mod completion;
pub mod service;
