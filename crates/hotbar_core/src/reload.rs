//! # Reloader
//!
//! Tops up every belt weapon from matching ammo in the general pool.
//!
//! ## Algorithm
//!
//! ```text
//! for each belt slot, in order:
//!   skip empty slots, non-weapons, weapons without a magazine
//!   skip full magazines and magazines with no ammo type
//!   available = sum of matching pool stacks
//!   skip if available == 0
//!   to_add = min(capacity - contents, available)
//!   consume to_add first-fit in pool order, clearing emptied stacks
//!   load to_add, sync the weapon, record a line
//! sync the belt once
//! ```
//!
//! Ammo is only moved: the pool loses exactly what the magazines gain.

use tracing::{debug, trace};

use crate::ammo::AmmoType;
use crate::container::{GeneralPool, PlayerInventory, QuickAccessSet, SlotIndex, Weapon};
use crate::host::Host;

/// One topped-up weapon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReloadEntry {
    /// Belt slot of the weapon.
    pub slot: SlotIndex,
    /// Weapon display name.
    pub weapon_name: String,
    /// Ammo type that was loaded.
    pub ammo_type: AmmoType,
    /// Rounds added to the magazine.
    pub added: u32,
}

impl ReloadEntry {
    /// Formats the itemized line, e.g. `- AK (ammo.rifle) +20`.
    #[must_use]
    pub fn detail_line(&self) -> String {
        format!("- {} ({}) +{}", self.weapon_name, self.ammo_type, self.added)
    }
}

/// Result of reloading a belt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReloadReport {
    /// Topped-up weapons in slot order.
    pub entries: Vec<ReloadEntry>,
}

impl ReloadReport {
    /// Returns true if no weapon was topped up.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of weapons topped up.
    #[must_use]
    pub fn weapons_reloaded(&self) -> usize {
        self.entries.len()
    }

    /// Total rounds taken from the pool.
    #[must_use]
    pub fn total_ammo_used(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.added)).sum()
    }

    /// Itemized lines joined by newlines.
    #[must_use]
    pub fn details(&self) -> String {
        self.entries
            .iter()
            .map(ReloadEntry::detail_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Reloads every weapon on the player's belt.
///
/// Returns `None` if the player has no belt.
pub fn reload<H: Host + ?Sized>(inventory: &mut PlayerInventory, host: &mut H) -> Option<ReloadReport> {
    let belt = inventory.belt.as_mut()?;
    Some(reload_belt(belt, inventory.main.as_mut(), host))
}

/// Reloads every weapon on `belt` from `pool`.
///
/// With no pool every weapon is skipped, but the belt update is still sent.
pub fn reload_belt<H: Host + ?Sized>(
    belt: &mut QuickAccessSet,
    mut pool: Option<&mut GeneralPool>,
    host: &mut H,
) -> ReloadReport {
    let mut report = ReloadReport::default();

    for (slot, weapon) in belt.weapons_mut() {
        if let Some(entry) = reload_weapon(slot, weapon, pool.as_deref_mut(), host) {
            report.entries.push(entry);
        }
    }

    host.belt_changed(belt);

    debug!(
        weapons = report.weapons_reloaded(),
        ammo = report.total_ammo_used(),
        "reload finished"
    );
    report
}

fn reload_weapon<H: Host + ?Sized>(
    slot: SlotIndex,
    weapon: &mut Weapon,
    pool: Option<&mut GeneralPool>,
    host: &mut H,
) -> Option<ReloadEntry> {
    let magazine = weapon.magazine.as_mut()?;
    if magazine.is_full() {
        trace!(slot, "magazine full");
        return None;
    }

    let ammo_type = magazine.ammo_type.clone()?;
    let pool = pool?;

    let needed = magazine.missing();
    let available = pool.count_matching(&ammo_type);
    if available == 0 {
        trace!(slot, ammo = %ammo_type, "no matching ammo");
        return None;
    }

    // Anything that does not fit in u32 is more than enough.
    let to_add = u32::try_from(available).unwrap_or(needed).min(needed);
    let taken = pool.consume_matching(&ammo_type, to_add);
    let added = magazine.load(taken);
    debug_assert_eq!(added, to_add);

    debug!(slot, weapon = %weapon.display_name, ammo = %ammo_type, added, "reloaded");
    host.weapon_changed(slot, weapon);

    Some(ReloadEntry {
        slot,
        weapon_name: weapon.display_name.clone(),
        ammo_type,
        added,
    })
}
