// wug-api: Async Rust client for the WhatsUp Gold REST API

pub mod auth;
pub mod client;
pub mod devices;
pub mod error;
pub mod monitors;
pub mod transport;
pub mod types;

pub use auth::Session;
pub use client::{CreateResult, WugClient};
pub use error::Error;
pub use monitors::MonitorSearch;
pub use transport::{TlsMode, TransportConfig};
pub use types::Fetched;
