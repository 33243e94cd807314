//! # Hotbar Core
//!
//! Moves ammunition between a player's quick-access belt and their general
//! inventory pool.
//!
//! ## Design Principles
//!
//! 1. **Conservation** - Ammo is relocated, never created or destroyed
//! 2. **Host-owned containers** - Operations borrow the belt and pool for one
//!    command and never keep references past it
//! 3. **Partial success is normal** - Weapons that cannot be served are
//!    skipped, never reported as errors
//! 4. **Single-threaded** - Each command runs to completion on the caller's
//!    thread
//!
//! ## Example
//!
//! ```rust
//! use hotbar_core::{
//!     reload_belt, GeneralPool, ItemStack, Magazine, QuickAccessSet, StandardHost, Weapon,
//! };
//!
//! let mut belt = QuickAccessSet::new();
//! belt.set(0, Weapon::new("W1", Magazine::new("rifle.ammo", 30).with_contents(10)))?;
//!
//! let mut pool = GeneralPool::from_stacks(
//!     24,
//!     [ItemStack::new("rifle.ammo", 5), ItemStack::new("rifle.ammo", 20)],
//! )?;
//!
//! let mut host = StandardHost::new();
//! let report = reload_belt(&mut belt, Some(&mut pool), &mut host);
//! assert_eq!(report.total_ammo_used(), 20);
//! assert_eq!(report.details(), "- W1 (rifle.ammo) +20");
//! # Ok::<(), hotbar_core::HotbarError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod ammo;
pub mod container;
pub mod error;
pub mod host;
pub mod reload;
pub mod unload;

pub use ammo::{ammo_matches, AmmoType};
pub use container::{
    BeltEntry, GeneralPool, ItemStack, Magazine, PlayerInventory, QuickAccessSet, SlotIndex,
    Weapon, BELT_SLOTS, DEFAULT_MAX_STACK, MAIN_SLOTS,
};
pub use error::{HotbarError, HotbarResult};
pub use host::{Host, StandardHost};
pub use reload::{reload, reload_belt, ReloadEntry, ReloadReport};
pub use unload::{unload, unload_belt, UnloadEntry, UnloadReport};
