//! Merit-order dispatch engine.
//!
//! Callers assemble an [`Order`] by attaching [`Consumer`], [`AlwaysOn`],
//! [`Dispatchable`] and Flex-capable participants ([`Flex`], [`Storage`]),
//! run [`calculate`] or [`calculate_parallel`], then read per-frame loads
//! and price setters back off the participants and the order.

pub mod always_on;
pub mod calculator;
pub mod consumer;
pub mod dispatchable;
pub mod errors;
pub mod flex;
pub mod order;
pub mod reserve;
pub mod storage;

/// Number of frames (hours) in a calculation horizon.
pub const HORIZON: usize = 8760;

pub use always_on::AlwaysOn;
pub use calculator::{calculate, calculate_parallel};
pub use consumer::Consumer;
pub use dispatchable::Dispatchable;
pub use errors::MeritError;
pub use flex::{Flex, FlexLike};
pub use order::Order;
pub use reserve::Reserve;
pub use storage::Storage;
