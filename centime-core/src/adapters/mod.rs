//! Adapter implementations of the ports

pub mod demo;
pub mod jsonfile;
pub mod memory;

pub use demo::DemoMessageSource;
pub use jsonfile::JsonFileStore;
pub use memory::InMemoryStore;
