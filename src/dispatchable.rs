use serde::{Deserialize, Serialize};

use crate::errors::MeritError;
use crate::HORIZON;

/// A cost-ranked producer schedulable up to `capacity * units`. Its load
/// vector is written by the calculator, in cost-ascending order against
/// the other attached dispatchables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dispatchable {
    pub id: String,
    pub cost: f64,
    pub capacity: f64,
    pub units: f64,
    load: Vec<f64>,
}

impl Dispatchable {
    pub fn new(id: impl Into<String>, cost: f64, capacity: f64, units: f64) -> Dispatchable {
        Dispatchable {
            id: id.into(),
            cost,
            capacity,
            units,
            load: vec![0.0; HORIZON],
        }
    }

    /// `capacity * units`.
    pub fn total_capacity(&self) -> f64 {
        self.capacity * self.units
    }

    /// Load at `frame`. `0.0` for frames not yet assigned.
    pub fn load_at(&self, frame: usize) -> f64 {
        self.load[frame]
    }

    /// Assigns a load for `frame`. `amount` should not exceed
    /// `total_capacity()`, checked only in debug builds — an excess is a
    /// calculator bug, not a recoverable error.
    pub fn set_load_at(&mut self, frame: usize, amount: f64) -> Result<(), MeritError> {
        if frame >= self.load.len() {
            return Err(MeritError::FrameOutOfRange {
                frame,
                horizon: self.load.len(),
            });
        }

        debug_assert!(
            amount >= -1e-9 && amount <= self.total_capacity() + 1e-9,
            "dispatchable {} load {amount} at frame {frame} exceeds total capacity {}",
            self.id,
            self.total_capacity()
        );

        self.load[frame] = amount;
        Ok(())
    }

    /// Mutable access to the raw load vector, used by the parallel
    /// calculator to split loads into disjoint per-batch slices before
    /// spawning tasks.
    pub(crate) fn load_mut(&mut self) -> &mut [f64] {
        &mut self.load
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_capacity_multiplies_capacity_by_units() {
        let d = Dispatchable::new("d1", 1.0, 0.5, 3.0);
        assert_eq!(d.total_capacity(), 1.5);
    }

    #[test]
    fn set_load_at_rejects_out_of_range_frame() {
        let mut d = Dispatchable::new("d1", 1.0, 1.0, 1.0);
        let err = d.set_load_at(HORIZON, 0.5).unwrap_err();
        assert_eq!(
            err,
            MeritError::FrameOutOfRange {
                frame: HORIZON,
                horizon: HORIZON
            }
        );
    }

    #[test]
    fn set_load_at_records_load() {
        let mut d = Dispatchable::new("d1", 1.0, 1.0, 2.0);
        d.set_load_at(5, 1.5).unwrap();
        assert_eq!(d.load_at(5), 1.5);
        assert_eq!(d.load_at(6), 0.0);
    }
}
