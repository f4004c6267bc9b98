//! Domain types shared by every acquisition path.

pub mod bssid;
pub mod native;
pub mod observation;

pub use bssid::BssidId;
pub use native::{approx_channel_from_freq, classify_auth, AkmSuite, NativeScanRecord};
pub use observation::{AuthKind, NetworkObservation, ObservationSource, RadioDetails};
