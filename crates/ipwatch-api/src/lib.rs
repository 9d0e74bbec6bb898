// ipwatch-api: Async Rust client for the patent-platform admin monitoring API

pub mod auth;
pub mod error;
pub mod monitoring;
pub mod transport;

pub use auth::{ADMIN_TOKEN_KEY, EnvToken, StaticToken, TokenSource};
pub use error::Error;
pub use monitoring::*;
pub use transport::{TlsMode, TransportConfig};
