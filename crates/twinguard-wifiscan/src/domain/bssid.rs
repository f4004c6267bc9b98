//! BSSID value object.
//!
//! Adapters parse MAC addresses through [`BssidId`] so malformed stanzas are
//! rejected at the edge; downstream the address travels as canonical text
//! because the classifiers consume it as a string column.

use std::fmt;
use std::str::FromStr;

use crate::error::ScanError;

/// A unique BSSID identifier wrapping a 6-byte IEEE 802.11 MAC address.
///
/// Two `BssidId` values are equal when their MAC bytes match, regardless of
/// the case used in the text they were parsed from.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct BssidId(pub [u8; 6]);

impl BssidId {
    /// Parse a `BssidId` from a colon-separated hex string such as
    /// `"aa:bb:cc:dd:ee:ff"`.
    pub fn parse(s: &str) -> Result<Self, ScanError> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 6 {
            return Err(ScanError::MacParseFailed {
                input: s.to_owned(),
            });
        }

        let mut bytes = [0u8; 6];
        for (i, part) in parts.iter().enumerate() {
            if part.is_empty() || part.len() > 2 {
                return Err(ScanError::MacParseFailed {
                    input: s.to_owned(),
                });
            }
            bytes[i] = u8::from_str_radix(part, 16).map_err(|_| ScanError::MacParseFailed {
                input: s.to_owned(),
            })?;
        }
        Ok(Self(bytes))
    }
}

impl FromStr for BssidId {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for BssidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BssidId({self})")
    }
}

impl fmt::Display for BssidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}
