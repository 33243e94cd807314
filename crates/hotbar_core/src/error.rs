//! # Hotbar Error Types
//!
//! Errors raised by container mutations. Skipped weapons during a reload or
//! unload are not errors; they simply do not show up in the report.

use thiserror::Error;

use crate::container::SlotIndex;

/// Errors that can occur while mutating containers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HotbarError {
    /// The general pool had no room for the whole stack.
    #[error("pool full: capacity {capacity}, {leftover} x {shortname} did not fit")]
    PoolFull {
        /// Slot capacity of the pool.
        capacity: usize,
        /// Short name of the stack being inserted.
        shortname: String,
        /// Amount that could not be inserted.
        leftover: u32,
    },

    /// A slot index outside the container.
    #[error("slot {slot} out of range (container has {len} slots)")]
    SlotOutOfRange {
        /// The requested slot.
        slot: SlotIndex,
        /// Number of slots in the container.
        len: usize,
    },

    /// Adding to a magazine or stack would overflow `u32`.
    #[error("ammo arithmetic overflow")]
    ArithmeticOverflow,
}

/// Result type for container operations.
pub type HotbarResult<T> = Result<T, HotbarError>;
