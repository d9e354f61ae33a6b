//! Unit conversion utilities
//!
//! Handles the physical units an SVG document may declare for its size
//! (`mm`, `cm`, `in`, `px` or unitless) and their conversion to millimetres,
//! the engine's coordinate unit.

use crate::error::GeometryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimetres per centimetre
pub const MM_PER_CM: f64 = 10.0;

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Millimetres per CSS pixel (96 px per inch)
pub const PX_TO_MM: f64 = MM_PER_INCH / 96.0;

/// Length unit declared on an SVG `width`/`height` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SvgUnit {
    /// Millimetres
    Mm,
    /// Centimetres
    Cm,
    /// Inches
    In,
    /// Pixels, also used for unitless values
    Px,
}

impl Default for SvgUnit {
    fn default() -> Self {
        Self::Px
    }
}

impl fmt::Display for SvgUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mm => write!(f, "mm"),
            Self::Cm => write!(f, "cm"),
            Self::In => write!(f, "in"),
            Self::Px => write!(f, "px"),
        }
    }
}

impl FromStr for SvgUnit {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" => Ok(Self::Mm),
            "cm" => Ok(Self::Cm),
            "in" => Ok(Self::In),
            "px" | "" => Ok(Self::Px),
            other => Err(GeometryError::InvalidUnit {
                unit: other.to_string(),
            }),
        }
    }
}

impl SvgUnit {
    /// Millimetres per one unit. Pixels use the supplied `px_to_mm` factor.
    pub fn mm_factor(self, px_to_mm: f64) -> f64 {
        match self {
            Self::Mm => 1.0,
            Self::Cm => MM_PER_CM,
            Self::In => MM_PER_INCH,
            Self::Px => px_to_mm,
        }
    }
}

/// A number with its declared unit, e.g. `210mm` or `800`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SvgLength {
    pub value: f64,
    pub unit: SvgUnit,
}

impl SvgLength {
    pub fn new(value: f64, unit: SvgUnit) -> Self {
        Self { value, unit }
    }

    /// Convert to millimetres
    pub fn to_mm(&self, px_to_mm: f64) -> f64 {
        self.value * self.unit.mm_factor(px_to_mm)
    }
}

impl FromStr for SvgLength {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        // The unit is the trailing run of letters, so exponents stay in the number.
        let unit_len = input
            .chars()
            .rev()
            .take_while(|c| c.is_ascii_alphabetic())
            .count();
        let split = input.len() - unit_len;
        let (number, suffix) = input.split_at(split);

        let value = number
            .trim()
            .parse::<f64>()
            .map_err(|_| GeometryError::InvalidLength {
                value: input.to_string(),
            })?;
        let unit = suffix.parse::<SvgUnit>()?;

        Ok(Self { value, unit })
    }
}
