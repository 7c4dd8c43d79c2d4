use crate::errors::MeritError;
use crate::flex::FlexLike;
use crate::reserve::Reserve;
use crate::HORIZON;

/// A concrete Flex backed by a [`Reserve`] it exclusively owns.
pub struct Storage {
    pub id: String,
    pub capacity: f64,
    pub units: f64,
    load: Vec<f64>,
    reserve: Reserve,
}

impl Storage {
    pub fn new(id: impl Into<String>, capacity: f64, units: f64, reserve: Reserve) -> Storage {
        Storage {
            id: id.into(),
            capacity,
            units,
            load: vec![0.0; HORIZON],
            reserve,
        }
    }

    pub fn total_capacity(&self) -> f64 {
        self.capacity * self.units
    }

    /// Read-only access to the backing reserve, for inspecting stored
    /// energy after calculation.
    pub fn reserve(&self) -> &Reserve {
        &self.reserve
    }

    pub fn reserve_mut(&mut self) -> &mut Reserve {
        &mut self.reserve
    }
}

impl FlexLike for Storage {
    /// `min(reserve.at(f), capacity * units)`.
    fn available_at(&mut self, frame: usize) -> f64 {
        let stored = self.reserve.at(frame);
        let capacity = self.total_capacity();
        stored.min(capacity)
    }

    /// Clamps `amount` to the input-rate cap `capacity*units + load[f]`
    /// (accounting for any supply already set this frame), stores what
    /// fits in the reserve, and decrements `load[f]` by exactly what was
    /// stored (not by what was clamped).
    fn assign_excess_at(&mut self, frame: usize, amount: f64) -> f64 {
        let input_rate_cap = self.total_capacity() + self.load[frame];
        let clamped = amount.min(input_rate_cap);

        let stored = self.reserve.add(frame, clamped);
        self.load[frame] -= stored;

        stored
    }

    /// Asks the reserve to take `amount` and records what was actually
    /// delivered as a positive load.
    fn set_load_at(&mut self, frame: usize, amount: f64) -> Result<(), MeritError> {
        if frame >= self.load.len() {
            return Err(MeritError::FrameOutOfRange {
                frame,
                horizon: self.load.len(),
            });
        }

        self.load[frame] = self.reserve.take(frame, amount);
        Ok(())
    }

    fn load_at(&self, frame: usize) -> f64 {
        self.load[frame]
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn is_storage(&self) -> bool {
        true
    }
}
