//! Port definitions for observation acquisition.
//!
//! The structured acquisition path talks to the radio stack only through
//! [`WirelessInterface`], so the platform adapters and test doubles can be
//! swapped without touching the pipeline.

mod wireless_port;

pub use wireless_port::WirelessInterface;
