//! # nosh-client: Remote API Access
//!
//! JSON-over-HTTP access to the Nosh remote API for the pieces of the system
//! that persist anything: fetching a restaurant's menu document and
//! submitting the edited document back, all-or-nothing.
//!
//! ## Modules
//!
//! - [`config`] - TOML + environment configuration ([`config::ClientConfig`])
//! - [`http`] - The [`http::MenuApiClient`] (bearer token, JSON bodies)
//! - [`error`] - [`error::ClientError`] and the parsed API fault shape
//!
//! The order session never talks to the network; placing the finalized
//! order is a concern of the surrounding app, not of this workspace.

pub mod config;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use error::{ApiFault, ClientError, ClientResult};
pub use http::MenuApiClient;
