//! # Unloader
//!
//! Empties every loaded belt weapon back into the general pool. Which
//! weapons qualify is decided here; the transfer itself is the host's
//! [`Host::unload_weapon`], including what happens when the pool is full.

use tracing::debug;

use crate::container::{GeneralPool, PlayerInventory, QuickAccessSet, SlotIndex};
use crate::host::Host;

/// One emptied weapon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnloadEntry {
    /// Belt slot of the weapon.
    pub slot: SlotIndex,
    /// Weapon display name.
    pub weapon_name: String,
    /// Rounds the magazine held before unloading.
    pub removed: u32,
}

impl UnloadEntry {
    /// Formats the itemized line, e.g. `- AK: -30`.
    #[must_use]
    pub fn detail_line(&self) -> String {
        format!("- {}: -{}", self.weapon_name, self.removed)
    }
}

/// Result of unloading a belt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnloadReport {
    /// Emptied weapons in slot order.
    pub entries: Vec<UnloadEntry>,
}

impl UnloadReport {
    /// Returns true if no weapon was emptied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of weapons emptied.
    #[must_use]
    pub fn weapons_unloaded(&self) -> usize {
        self.entries.len()
    }

    /// Total rounds removed from magazines.
    #[must_use]
    pub fn total_ammo_unloaded(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.removed)).sum()
    }

    /// Itemized lines joined by newlines.
    #[must_use]
    pub fn details(&self) -> String {
        self.entries
            .iter()
            .map(UnloadEntry::detail_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Unloads every weapon on the player's belt.
///
/// Returns `None` if the player has no belt.
pub fn unload<H: Host + ?Sized>(inventory: &mut PlayerInventory, host: &mut H) -> Option<UnloadReport> {
    let belt = inventory.belt.as_mut()?;
    Some(unload_belt(belt, inventory.main.as_mut(), host))
}

/// Unloads every weapon on `belt` into `pool`.
pub fn unload_belt<H: Host + ?Sized>(
    belt: &mut QuickAccessSet,
    mut pool: Option<&mut GeneralPool>,
    host: &mut H,
) -> UnloadReport {
    let mut report = UnloadReport::default();

    for (slot, weapon) in belt.weapons_mut() {
        let Some(magazine) = weapon.magazine.as_ref() else {
            continue;
        };
        if magazine.is_empty() || magazine.ammo_type.is_none() {
            continue;
        }

        // Recorded before the transfer; the host owns what happens next.
        let removed = magazine.contents();
        host.unload_weapon(slot, weapon, pool.as_deref_mut());

        debug!(slot, weapon = %weapon.display_name, removed, "unloaded");
        report.entries.push(UnloadEntry {
            slot,
            weapon_name: weapon.display_name.clone(),
            removed,
        });
    }

    host.belt_changed(belt);

    debug!(
        weapons = report.weapons_unloaded(),
        ammo = report.total_ammo_unloaded(),
        "unload finished"
    );
    report
}
