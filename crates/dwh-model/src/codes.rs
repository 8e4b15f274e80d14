//! Canonical code enumerations.
//!
//! Source systems encode marital status, gender, and product line as short
//! codes. Each enumeration here has an explicit `Unknown` member: any code
//! that is null, blank, or unrecognized maps to it, never to an error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A value that may deliberately represent "unknown".
///
/// Cross-source reconciliation uses this to decide whether the primary
/// source's value should give way to the supplementary one.
pub trait KnownValue {
    fn is_unknown(&self) -> bool;
}

impl<T> KnownValue for Option<T> {
    fn is_unknown(&self) -> bool {
        self.is_none()
    }
}

/// Normalizes a raw code for lookup: trimmed, uppercase.
fn normalize_code(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_ascii_uppercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MaritalStatus {
    Married,
    Single,
    Unknown,
}

impl MaritalStatus {
    pub fn from_code(raw: Option<&str>) -> Self {
        match normalize_code(raw).as_deref() {
            Some("M" | "MARRIED") => MaritalStatus::Married,
            Some("S" | "SINGLE") => MaritalStatus::Single,
            _ => MaritalStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MaritalStatus::Married => "Married",
            MaritalStatus::Single => "Single",
            MaritalStatus::Unknown => "Unknown",
        }
    }
}

impl KnownValue for MaritalStatus {
    fn is_unknown(&self) -> bool {
        matches!(self, MaritalStatus::Unknown)
    }
}

impl fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gender, shared by both source systems.
///
/// Both systems accept the single-letter code and the spelled-out word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

impl Gender {
    pub fn from_code(raw: Option<&str>) -> Self {
        match normalize_code(raw).as_deref() {
            Some("M" | "MALE") => Gender::Male,
            Some("F" | "FEMALE") => Gender::Female,
            _ => Gender::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Unknown => "Unknown",
        }
    }
}

impl KnownValue for Gender {
    fn is_unknown(&self) -> bool {
        matches!(self, Gender::Unknown)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProductLine {
    Mountain,
    Road,
    OtherSales,
    Touring,
    Unknown,
}

impl ProductLine {
    pub fn from_code(raw: Option<&str>) -> Self {
        match normalize_code(raw).as_deref() {
            Some("M") => ProductLine::Mountain,
            Some("R") => ProductLine::Road,
            Some("S") => ProductLine::OtherSales,
            Some("T") => ProductLine::Touring,
            _ => ProductLine::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductLine::Mountain => "Mountain",
            ProductLine::Road => "Road",
            ProductLine::OtherSales => "Other Sales",
            ProductLine::Touring => "Touring",
            ProductLine::Unknown => "Unknown",
        }
    }
}

impl KnownValue for ProductLine {
    fn is_unknown(&self) -> bool {
        matches!(self, ProductLine::Unknown)
    }
}

impl fmt::Display for ProductLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
