//! Cloud type classification decoded from cloud scenario bit fields.
//!
//! The cloud scenario code packs several flags into one integer. Bits 1-4
//! hold the cloud type, so the class is `(code >> 1) & 0b1111`. Values 0-8
//! name a class; 9-15 are unused.

use serde::{Deserialize, Serialize};

/// Mask selecting the cloud type after shifting out the flag bit.
const CLOUD_TYPE_MASK: u16 = 0b1111;

/// Cloud type of one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CloudClass {
    Clear,
    Cirrus,
    Altostratus,
    Altocumulus,
    Stratus,
    Stratocumulus,
    Cumulus,
    Nimbostratus,
    DeepConvection,
}

impl CloudClass {
    /// All classes in code order.
    pub const ALL: [CloudClass; 9] = [
        Self::Clear,
        Self::Cirrus,
        Self::Altostratus,
        Self::Altocumulus,
        Self::Stratus,
        Self::Stratocumulus,
        Self::Cumulus,
        Self::Nimbostratus,
        Self::DeepConvection,
    ];

    /// Class for a cloud type code (0-8).
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Decode the class from a full cloud scenario value.
    pub fn from_scenario(scenario: u16) -> Option<Self> {
        Self::from_code(((scenario >> 1) & CLOUD_TYPE_MASK) as u8)
    }

    /// Cloud type code (0-8).
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Conventional abbreviation.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Cirrus => "Ci",
            Self::Altostratus => "As",
            Self::Altocumulus => "Ac",
            Self::Stratus => "St",
            Self::Stratocumulus => "Sc",
            Self::Cumulus => "Cu",
            Self::Nimbostratus => "Ns",
            Self::DeepConvection => "DC",
        }
    }

    /// Parse from an abbreviation (case-insensitive).
    pub fn from_abbreviation(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.abbreviation().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for CloudClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// Decode cloud classes for every sample of a scenario field.
pub fn decode_scenarios(scenarios: &[u16]) -> Vec<Option<CloudClass>> {
    scenarios.iter().map(|&s| CloudClass::from_scenario(s)).collect()
}

/// Decode a scenario field into class codes as floats, NaN where undefined.
///
/// The result can be regridded like any other field; cell means then give
/// an average class code, so callers usually regrid one indicator field
/// per class instead (see [`class_indicator`]).
pub fn class_field(scenarios: &[u16]) -> Vec<f32> {
    scenarios
        .iter()
        .map(|&s| match CloudClass::from_scenario(s) {
            Some(class) => class.code() as f32,
            None => f32::NAN,
        })
        .collect()
}

/// 1.0 where the sample has `class`, 0.0 for other defined classes, NaN
/// where the class is undefined. Regridded, it gives the class fraction.
pub fn class_indicator(scenarios: &[u16], class: CloudClass) -> Vec<f32> {
    scenarios
        .iter()
        .map(|&s| match CloudClass::from_scenario(s) {
            Some(c) if c == class => 1.0,
            Some(_) => 0.0,
            None => f32::NAN,
        })
        .collect()
}
