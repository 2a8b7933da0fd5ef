//! Percentage discount applied by the store

use std::fmt;

/// A price reduction in percent; `Discount::percent(10.0)` multiplies prices by 0.9.
///
/// The value is handed to the store unchanged. Whether the resulting price is
/// acceptable is decided by the non-negative price check constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discount(f64);

impl Discount {
    pub const fn percent(percent: f64) -> Self {
        Self(percent)
    }

    pub fn as_percent(&self) -> f64 {
        self.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

impl Default for Discount {
    fn default() -> Self {
        Self::percent(10.0)
    }
}

impl fmt::Display for Discount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
