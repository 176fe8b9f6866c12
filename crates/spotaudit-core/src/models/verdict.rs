//! Online verification verdicts.

use serde::{Deserialize, Serialize};

/// Outcome of one online location verification call.
///
/// Produced fresh per call; never cached or persisted. Water and
/// restricted-area findings are advisory warnings, not a veto:
/// `is_valid` reflects only that the coordinate is inside the country
/// box and the lookup succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationVerdict {
    pub is_valid: bool,
    pub is_near_water: bool,
    pub place_name: String,
    pub place_type: String,
    pub warnings: Vec<String>,
    pub details: String,
}

impl LocationVerdict {
    /// Terminal rejection before or during lookup; carries a single
    /// explanatory warning.
    pub fn rejected(warning: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            is_near_water: false,
            place_name: String::new(),
            place_type: String::new(),
            warnings: vec![warning.into()],
            details: details.into(),
        }
    }
}
