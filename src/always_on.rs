use serde::{Deserialize, Serialize};

use crate::errors::MeritError;
use crate::HORIZON;

/// A non-dispatchable producer whose output is dictated by its profile,
/// not by demand. Output is produced whether consumed or not — excess
/// may be absorbed by flex participants (see the calculator's Step B).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlwaysOn {
    pub id: String,
    profile: Vec<f64>,
    pub total_production: f64,
}

impl AlwaysOn {
    /// Creates a new always-on producer. `profile` must cover the full horizon.
    pub fn new(id: impl Into<String>, profile: Vec<f64>, total_production: f64) -> Result<AlwaysOn, MeritError> {
        if profile.len() != HORIZON {
            return Err(MeritError::ProfileLengthMismatch {
                expected: HORIZON,
                actual: profile.len(),
            });
        }

        Ok(AlwaysOn {
            id: id.into(),
            profile,
            total_production,
        })
    }

    /// Output at `frame`.
    pub fn load_at(&self, frame: usize) -> f64 {
        self.profile[frame] * self.total_production
    }
}
