use serde::{Deserialize, Serialize};

use crate::errors::MeritError;
use crate::HORIZON;

/// Narrow capability interface shared by every participant that can
/// absorb excess production and later discharge it. Implemented by the
/// bare [`Flex`] carrier and by [`crate::storage::Storage`].
pub trait FlexLike {
    /// Maximum amount this participant can supply at `frame`.
    fn available_at(&mut self, frame: usize) -> f64;

    /// Offers up to `amount` of excess energy to this participant at
    /// `frame`. Returns how much was actually accepted.
    fn assign_excess_at(&mut self, frame: usize, amount: f64) -> f64;

    /// Commits a supply load for `frame`.
    fn set_load_at(&mut self, frame: usize, amount: f64) -> Result<(), MeritError>;

    /// Load recorded at `frame`: negative for consumption, positive for supply.
    fn load_at(&self, frame: usize) -> f64;

    /// Identifier, for diagnostics.
    fn id(&self) -> &str;

    /// Whether this participant is backed by a reserve. Used by the
    /// calculator to refuse parallel execution — cross-frame reserve
    /// state breaks the frame-independence parallel batches rely on.
    fn is_storage(&self) -> bool {
        false
    }
}

/// A Flex participant without backing storage. Exists as a shared
/// carrier for identifier, capacity, units and load vector; it accepts
/// no excess and has nothing to discharge — only [`crate::storage::Storage`]
/// (Flex + Reserve) actually stores and releases energy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flex {
    pub id: String,
    pub capacity: f64,
    pub units: f64,
    load: Vec<f64>,
}

impl Flex {
    pub fn new(id: impl Into<String>, capacity: f64, units: f64) -> Flex {
        Flex {
            id: id.into(),
            capacity,
            units,
            load: vec![0.0; HORIZON],
        }
    }

    pub fn total_capacity(&self) -> f64 {
        self.capacity * self.units
    }

    pub(crate) fn load_mut(&mut self) -> &mut [f64] {
        &mut self.load
    }
}

impl FlexLike for Flex {
    fn available_at(&mut self, _frame: usize) -> f64 {
        0.0
    }

    fn assign_excess_at(&mut self, _frame: usize, _amount: f64) -> f64 {
        // A bare Flex has nowhere to put excess energy; it accepts
        // nothing usefully, per spec.
        0.0
    }

    fn set_load_at(&mut self, frame: usize, amount: f64) -> Result<(), MeritError> {
        if frame >= self.load.len() {
            return Err(MeritError::FrameOutOfRange {
                frame,
                horizon: self.load.len(),
            });
        }
        self.load[frame] = amount;
        Ok(())
    }

    fn load_at(&self, frame: usize) -> f64 {
        self.load[frame]
    }

    fn id(&self) -> &str {
        &self.id
    }
}
