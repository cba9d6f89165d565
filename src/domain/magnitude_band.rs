//! Categorical magnitude buckets.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lower bound of [`MagnitudeBand::Light`].
pub const LIGHT_FROM: f64 = 2.5;
/// Lower bound of [`MagnitudeBand::Moderate`].
pub const MODERATE_FROM: f64 = 4.5;
/// Lower bound of [`MagnitudeBand::Strong`].
pub const STRONG_FROM: f64 = 6.0;

/// Band derived from a nullable magnitude with half-open boundaries.
///
/// | magnitude        | band       |
/// |------------------|------------|
/// | null             | `unknown`  |
/// | `< 2.5`          | `micro`    |
/// | `2.5 ≤ m < 4.5`  | `light`    |
/// | `4.5 ≤ m < 6.0`  | `moderate` |
/// | `≥ 6.0`          | `strong`   |
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum MagnitudeBand {
    /// Below 2.5.
    Micro,
    /// From 2.5 up to 4.5.
    Light,
    /// From 4.5 up to 6.0.
    Moderate,
    /// 6.0 and above.
    Strong,
    /// No magnitude reported.
    Unknown,
}

impl MagnitudeBand {
    /// Maps a magnitude to its band.
    ///
    /// NaN never satisfies a `<` comparison and therefore lands in
    /// [`MagnitudeBand::Strong`]; the feed parser never produces NaN.
    #[must_use]
    pub fn from_magnitude(magnitude: Option<f64>) -> Self {
        match magnitude {
            None => Self::Unknown,
            Some(m) if m < LIGHT_FROM => Self::Micro,
            Some(m) if m < MODERATE_FROM => Self::Light,
            Some(m) if m < STRONG_FROM => Self::Moderate,
            Some(_) => Self::Strong,
        }
    }

    /// Wire label (`micro`, `light`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Micro => "micro",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MagnitudeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
