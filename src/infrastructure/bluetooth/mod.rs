//! Bluetooth Module
//!
//! Drives the Siri Remote through the magic-packet trigger over GATT.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     TriggerService                       │
//! │  (Main coordinator - owns the notification channel)      │
//! └─────────────────────┬───────────────────────────────────┘
//!                       │
//!         ┌─────────────┼─────────────┐
//!         │             │             │
//!         ▼             ▼             ▼
//! ┌───────────┐  ┌────────────┐  ┌──────────┐
//! │ Discovery │  │ Sequencer  │  │ Decoder  │
//! │           │  │            │  │          │
//! │ - Device  │  │ - Notify   │  │ - Hex    │
//! │   check   │  │   subscribe│  │   dump   │
//! │ - Battery │  │ - Magic    │  │ - Trunc. │
//! │   attrs   │  │   packet   │  │   flag   │
//! └───────────┘  └────────────┘  └──────────┘
//!         │             │
//!         └──────┬──────┘
//!                ▼
//!        GattTransport (WinRT on Windows)
//! ```
//!
//! ## Modules
//!
//! - [`protocol`] - Trigger protocol UUIDs and payloads
//! - [`discovery`] - Device validation and battery attribute lookup
//! - [`sequencer`] - Subscription and magic-packet writes
//! - [`connection`] - WinRT transport (Windows only)
//! - [`service`] - Main service coordinator

#[cfg(windows)]
pub mod connection;
pub mod discovery;
#[cfg(test)]
pub(crate) mod fake;
pub mod protocol;
pub mod sequencer;
pub mod service;

// Re-export main service for convenience
pub use service::{TriggerOutcome, TriggerService};
