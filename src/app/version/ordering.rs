//! Structural version ordering
//!
//! Driver versions are four dotted numeric components. Milestone selection
//! must compare them numerically per component; a raw string ordering would
//! put "9" above "10" and "99" above "100".

use std::fmt;

/// A parsed 4-component driver version, ordered numerically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DriverVersion([u64; 4]);

impl DriverVersion {
    /// Parses a dotted version string with exactly four numeric components
    ///
    /// Returns `None` for anything else; callers treat unparsable entries
    /// as not eligible for milestone selection.
    pub fn parse(text: &str) -> Option<Self> {
        let mut components = [0u64; 4];
        let mut count = 0;
        for part in text.split('.') {
            if count == 4 {
                return None;
            }
            components[count] = part.parse().ok()?;
            count += 1;
        }
        if count != 4 {
            return None;
        }
        Some(Self(components))
    }

    /// Leading version component, grouping a family of builds
    pub fn milestone(&self) -> u64 {
        self.0[0]
    }
}

impl fmt::Display for DriverVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.0[0], self.0[1], self.0[2], self.0[3])
    }
}
