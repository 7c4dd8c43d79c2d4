use serde::{Deserialize, Serialize};

use crate::errors::MeritError;
use crate::HORIZON;

/// A demand source. Demand at frame `f` is `profile[f] * total_demand`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consumer {
    pub id: String,
    profile: Vec<f64>,
    pub total_demand: f64,
}

impl Consumer {
    /// Creates a new consumer. `profile` must cover the full horizon.
    pub fn new(id: impl Into<String>, profile: Vec<f64>, total_demand: f64) -> Result<Consumer, MeritError> {
        if profile.len() != HORIZON {
            return Err(MeritError::ProfileLengthMismatch {
                expected: HORIZON,
                actual: profile.len(),
            });
        }

        Ok(Consumer {
            id: id.into(),
            profile,
            total_demand,
        })
    }

    /// Demand at `frame`.
    pub fn load_at(&self, frame: usize) -> f64 {
        self.profile[frame] * self.total_demand
    }
}
