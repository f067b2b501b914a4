//! Attend Ease - student attendance client core
//!
//! Turns camera QR scans into attendance submissions: debounces scans,
//! guards the stored session, submits one claim at a time and maps the
//! server's answer to a closed [`Outcome`](attendance::Outcome) and a route.

pub mod adapters;
pub mod api;
pub mod attendance;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod navigation;
pub mod profile;
pub mod scan;
pub mod traits;

pub use attendance::{Outcome, ScanDisposition};
pub use client::AttendEaseClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
