use serde::{Deserialize, Serialize};

use crate::error::{Result, TranslatorError};

/// Emphasis applied by one pair of round brackets
pub const ROUND_BRACKET_MULTIPLIER: f64 = 1.1;

/// Emphasis applied by one pair of square brackets
pub const SQUARE_BRACKET_MULTIPLIER: f64 = 1.0 / 1.1;

/// Weight distance encoded by a single `+` or `-`
pub const EMPHASIS_STEP: f64 = 0.1;

/// Configuration for prompt translation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Multiplier for `( ... )` without an explicit weight
    pub round_multiplier: f64,

    /// Multiplier for `[ ... ]`
    pub square_multiplier: f64,

    /// Weight distance from 1.0 represented by one sign character
    pub emphasis_step: f64,

    /// Decimal places kept before a weight is rendered
    pub weight_precision: usize,

    /// Upper bound on the length of one `+`/`-` run
    pub max_sign_run: usize,

    /// Rewrite `<lora:NAME:WEIGHT>` tags into `withLora(NAME,WEIGHT)`
    pub rewrite_lora: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            round_multiplier: ROUND_BRACKET_MULTIPLIER,
            square_multiplier: SQUARE_BRACKET_MULTIPLIER,
            emphasis_step: EMPHASIS_STEP,
            weight_precision: 2,
            max_sign_run: 128,
            rewrite_lora: true,
        }
    }
}

impl TranslatorConfig {
    /// Config that leaves LoRA tags exactly as written
    pub fn without_lora_rewrite() -> Self {
        Self {
            rewrite_lora: false,
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("round_multiplier", self.round_multiplier),
            ("square_multiplier", self.square_multiplier),
            ("emphasis_step", self.emphasis_step),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TranslatorError::invalid_config(format!(
                    "{name} must be a positive finite number, got {value}"
                )));
            }
        }

        // f64 carries at most 17 significant decimal digits
        if self.weight_precision > 17 {
            return Err(TranslatorError::invalid_config(format!(
                "weight_precision ({}) cannot exceed 17",
                self.weight_precision
            )));
        }

        if self.max_sign_run == 0 {
            return Err(TranslatorError::invalid_config(
                "max_sign_run must be > 0",
            ));
        }

        Ok(())
    }
}
