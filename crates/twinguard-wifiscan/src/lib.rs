//! # twinguard-wifiscan
//!
//! Observation acquisition for rogue access point detection.
//!
//! This crate turns whatever the local radio stack can tell us into a single
//! intermediate shape, [`NetworkObservation`], regardless of how rich the
//! source is:
//!
//! - **Domain types**: [`NetworkObservation`], [`RadioDetails`], [`AuthKind`],
//!   [`NativeScanRecord`], [`AkmSuite`], [`BssidId`]
//! - **Port**: [`WirelessInterface`] -- trait abstracting a structured
//!   (request-scan / read-results) wireless backend
//! - **Adapters**: [`IwInterface`] (Linux `iw`), [`NetshInterface`]
//!   (Windows `netsh wlan show networks mode=bssid`), and the command-line
//!   SSID parsers in [`adapter::ssid_text`]
//! - **Acquisition**: [`acquire_structured`] and [`acquire_ssids`], which
//!   never fail; problems surface as an empty list plus diagnostics.

pub mod acquire;
pub mod adapter;
pub mod command;
pub mod domain;
pub mod error;
pub mod platform;
pub mod port;

// Re-export key types at the crate root for convenience.
pub use acquire::{acquire_ssids, acquire_structured, Acquisition};
pub use adapter::{platform_interface, IwInterface, NetshInterface};
pub use domain::bssid::BssidId;
pub use domain::native::{approx_channel_from_freq, classify_auth, AkmSuite, NativeScanRecord};
pub use domain::observation::{AuthKind, NetworkObservation, ObservationSource, RadioDetails};
pub use error::{ScanError, ScanResult};
pub use platform::ScanPlatform;
pub use port::WirelessInterface;
