// sensibo-api: Async Rust client for the Sensibo climate-control REST API

pub mod client;
pub mod error;
mod pods;
pub mod transport;
pub mod types;

pub use client::{API_BASE_URL, SensiboClient};
pub use error::Error;
pub use transport::TransportConfig;
pub use types::{AcState, ChangeReason, SmartModeSettings, StateValue};
