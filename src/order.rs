use crate::always_on::AlwaysOn;
use crate::consumer::Consumer;
use crate::dispatchable::Dispatchable;
use crate::flex::FlexLike;
use crate::HORIZON;

/// Container aggregating a calculation's participants, plus the
/// per-frame price-setters vector.
///
/// `spec.md` describes `Order` as holding non-owning references to its
/// participants; this port has `Order` own them instead (see
/// `SPEC_FULL.md` §3) and names the price setter by index into the
/// (calculator-sorted) dispatchables vector rather than by reference.
pub struct Order {
    pub(crate) consumers: Vec<Consumer>,
    pub(crate) always_ons: Vec<AlwaysOn>,
    pub(crate) dispatchables: Vec<Dispatchable>,
    pub(crate) flexibles: Vec<Box<dyn FlexLike>>,
    pub(crate) price_setters: Vec<Option<usize>>,
}

impl Order {
    pub fn new() -> Order {
        Order {
            consumers: Vec::new(),
            always_ons: Vec::new(),
            dispatchables: Vec::new(),
            flexibles: Vec::new(),
            price_setters: vec![None; HORIZON],
        }
    }

    pub fn attach_consumer(&mut self, consumer: Consumer) {
        self.consumers.push(consumer);
    }

    pub fn attach_always_on(&mut self, always_on: AlwaysOn) {
        self.always_ons.push(always_on);
    }

    pub fn attach_dispatchable(&mut self, dispatchable: Dispatchable) {
        self.dispatchables.push(dispatchable);
    }

    /// Attaches any Flex-capable participant — a bare [`crate::flex::Flex`]
    /// or a [`crate::storage::Storage`].
    pub fn attach_flex(&mut self, flex: Box<dyn FlexLike>) {
        self.flexibles.push(flex);
    }

    /// Total demand across all attached consumers at `frame`.
    pub fn demand_at(&self, frame: usize) -> f64 {
        self.consumers.iter().map(|c| c.load_at(frame)).sum()
    }

    /// The dispatchable that set the price in `frame`, if any was
    /// recorded. Only meaningful after calculation.
    pub fn price_setter_at(&self, frame: usize) -> Option<&Dispatchable> {
        self.price_setters[frame].map(|i| &self.dispatchables[i])
    }

    pub fn consumers(&self) -> &[Consumer] {
        &self.consumers
    }

    pub fn always_ons(&self) -> &[AlwaysOn] {
        &self.always_ons
    }

    pub fn dispatchables(&self) -> &[Dispatchable] {
        &self.dispatchables
    }

    pub fn flexibles(&self) -> &[Box<dyn FlexLike>] {
        &self.flexibles
    }

    /// Whether any attached flex participant is storage-backed. The
    /// parallel calculator refuses to run when this is true.
    pub fn has_storage(&self) -> bool {
        self.flexibles.iter().any(|f| f.is_storage())
    }
}

impl Default for Order {
    /// Delegates to [`Order::new`] rather than deriving `Default`: a
    /// derived impl would give `price_setters` length `0` instead of
    /// `HORIZON`, breaking every frame-indexed access once a calculation
    /// runs.
    fn default() -> Order {
        Order::new()
    }
}
