//! Contact List API Library

pub mod config;
pub mod contacts;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod storage;

pub use config::schema::ServiceConfig;
pub use contacts::{Contact, ContactService};
pub use http::HttpServer;
pub use lifecycle::{Shutdown, ShutdownSignal};
pub use storage::{ContactStore, JsonFileStore};
