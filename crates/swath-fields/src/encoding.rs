//! Scale/offset decoding and invalid-value masking of raw field values.
//!
//! Radar products store physical values as scaled integers together with
//! attributes naming a "missing" marker, a fill marker and sometimes a valid
//! range. Decoding turns every marked or out-of-range raw value into NaN
//! and everything else into `(raw - offset) / factor`.

use num_traits::AsPrimitive;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FieldError, FieldResult};

/// Encoding attributes of one raw field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldEncoding {
    /// Raw marker for samples that were not observed.
    #[serde(default)]
    pub missing: Option<f32>,

    /// Raw fill marker.
    #[serde(default)]
    pub fill: Option<f32>,

    /// Divisor applied after removing the offset.
    #[serde(default = "default_factor")]
    pub factor: f32,

    /// Raw offset removed before dividing by the factor.
    #[serde(default)]
    pub offset: f32,

    /// Inclusive range of acceptable raw values.
    #[serde(default)]
    pub valid_range: Option<(f32, f32)>,
}

fn default_factor() -> f32 {
    1.0
}

impl Default for FieldEncoding {
    fn default() -> Self {
        Self {
            missing: None,
            fill: None,
            factor: 1.0,
            offset: 0.0,
            valid_range: None,
        }
    }
}

impl FieldEncoding {
    /// Encoding with the given factor and offset and no masks.
    pub fn scaled(factor: f32, offset: f32) -> Self {
        Self {
            factor,
            offset,
            ..Self::default()
        }
    }

    pub fn with_missing(mut self, missing: f32) -> Self {
        self.missing = Some(missing);
        self
    }

    pub fn with_fill(mut self, fill: f32) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_valid_range(mut self, min: f32, max: f32) -> Self {
        self.valid_range = Some((min, max));
        self
    }

    /// Validate the encoding attributes.
    pub fn validate(&self) -> FieldResult<()> {
        if !self.factor.is_finite() || self.factor == 0.0 {
            return Err(FieldError::invalid_encoding(format!(
                "factor must be finite and non-zero, got {}",
                self.factor
            )));
        }
        if !self.offset.is_finite() {
            return Err(FieldError::invalid_encoding(format!(
                "offset must be finite, got {}",
                self.offset
            )));
        }
        if let Some((min, max)) = self.valid_range {
            if min.is_nan() || max.is_nan() || min > max {
                return Err(FieldError::invalid_encoding(format!(
                    "valid range [{}, {}] is empty",
                    min, max
                )));
            }
        }
        Ok(())
    }

    /// Check if a raw value is masked by this encoding.
    #[inline]
    pub fn is_masked(&self, raw: f32) -> bool {
        if raw.is_nan() || self.missing == Some(raw) || self.fill == Some(raw) {
            return true;
        }
        match self.valid_range {
            Some((min, max)) => raw < min || raw > max,
            None => false,
        }
    }

    /// Decode a single raw value, returning NaN for masked values.
    #[inline]
    pub fn decode_value(&self, raw: f32) -> f32 {
        if self.is_masked(raw) {
            f32::NAN
        } else {
            (raw - self.offset) / self.factor
        }
    }

    /// Decode a raw field into physical values with NaN for invalid samples.
    pub fn decode<T>(&self, raw: &[T]) -> FieldResult<Vec<f32>>
    where
        T: AsPrimitive<f32>,
    {
        self.validate()?;

        let decoded: Vec<f32> = raw.iter().map(|&v| self.decode_value(v.as_())).collect();

        debug!(
            samples = decoded.len(),
            masked = decoded.iter().filter(|v| v.is_nan()).count(),
            "Decoded field"
        );

        Ok(decoded)
    }
}
