//! # Host Seam
//!
//! Side effects that belong to the game host rather than to this crate:
//! state sync after a weapon changes, the batched belt update, and the item
//! transfer that moves a magazine's rounds into the pool.
//!
//! [`StandardHost`] is the bundled implementation. It keeps a record of the
//! notifications it received and drops ammo "on the ground" when the pool
//! has no room, which is what a live server does.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::ammo::AmmoType;
use crate::container::{
    GeneralPool, ItemStack, QuickAccessSet, SlotIndex, Weapon, DEFAULT_MAX_STACK,
};
use crate::error::HotbarError;

/// Host-provided side effects used by reload and unload.
pub trait Host {
    /// A weapon's magazine changed and its state must be synced.
    fn weapon_changed(&mut self, slot: SlotIndex, weapon: &Weapon);

    /// The belt changed. Called once per command, after all weapons.
    fn belt_changed(&mut self, belt: &QuickAccessSet);

    /// Moves every round in `weapon`'s magazine out of the weapon.
    ///
    /// Where the rounds end up (pool, ground) is host policy. `pool` is
    /// `None` when the player has no general pool.
    fn unload_weapon(&mut self, slot: SlotIndex, weapon: &mut Weapon, pool: Option<&mut GeneralPool>);
}

/// The default host.
#[derive(Clone, Debug, Default)]
pub struct StandardHost {
    /// Stack limits by lowercase short name.
    max_stacks: HashMap<String, u32>,
    /// Stacks that did not fit into the pool.
    ground: Vec<ItemStack>,
    /// Slots that received a `weapon_changed` notification, in order.
    weapon_updates: Vec<SlotIndex>,
    /// Number of `belt_changed` notifications.
    belt_updates: usize,
}

impl StandardHost {
    /// Creates a host with default stack limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum stack size for an item.
    pub fn set_max_stack(&mut self, shortname: &str, max_stack: u32) {
        self.max_stacks.insert(shortname.to_lowercase(), max_stack);
    }

    /// Gets the maximum stack size for an item.
    #[must_use]
    pub fn max_stack(&self, shortname: &str) -> u32 {
        self.max_stacks
            .get(&shortname.to_lowercase())
            .copied()
            .unwrap_or(DEFAULT_MAX_STACK)
    }

    /// Stacks dropped on the ground because the pool was full.
    #[must_use]
    pub fn ground(&self) -> &[ItemStack] {
        &self.ground
    }

    /// Total rounds of `ammo` lying on the ground.
    #[must_use]
    pub fn ground_amount(&self, ammo: &AmmoType) -> u64 {
        self.ground
            .iter()
            .filter(|stack| stack.is_ammo_for(ammo))
            .map(|stack| u64::from(stack.amount))
            .sum()
    }

    /// Slots that were synced after a reload, in notification order.
    #[must_use]
    pub fn weapon_updates(&self) -> &[SlotIndex] {
        &self.weapon_updates
    }

    /// Number of batched belt updates sent.
    #[must_use]
    pub const fn belt_updates(&self) -> usize {
        self.belt_updates
    }

    fn drop_on_ground(&mut self, stack: ItemStack) {
        debug!(item = %stack.shortname, amount = stack.amount, "dropped on ground");
        self.ground.push(stack);
    }

    /// Drops whatever part of `amount` did not reach the pool.
    fn drop_undelivered(&mut self, ammo: &AmmoType, amount: u32, before: u64, pool: &GeneralPool) {
        let delivered = pool.count_matching(ammo).saturating_sub(before);
        let missing = u64::from(amount).saturating_sub(delivered);
        if missing > 0 {
            let missing = u32::try_from(missing).unwrap_or(amount);
            self.drop_on_ground(ItemStack::new(ammo.as_str(), missing));
        }
    }
}

impl Host for StandardHost {
    fn weapon_changed(&mut self, slot: SlotIndex, _weapon: &Weapon) {
        self.weapon_updates.push(slot);
    }

    fn belt_changed(&mut self, _belt: &QuickAccessSet) {
        self.belt_updates += 1;
    }

    fn unload_weapon(&mut self, slot: SlotIndex, weapon: &mut Weapon, pool: Option<&mut GeneralPool>) {
        let Some(magazine) = weapon.magazine.as_mut() else {
            return;
        };
        let Some(ammo) = magazine.ammo_type.clone() else {
            warn!(slot, weapon = %weapon.display_name, "magazine has no ammo type, nothing unloaded");
            return;
        };

        let amount = magazine.drain();
        let stack = ItemStack::new(ammo.as_str(), amount);
        let max_stack = self.max_stack(ammo.as_str());

        let Some(pool) = pool else {
            self.drop_on_ground(stack);
            return;
        };

        let before = pool.count_matching(&ammo);
        match pool.insert(stack, max_stack) {
            Ok(()) => {}
            Err(HotbarError::PoolFull {
                shortname, leftover, ..
            }) => self.drop_on_ground(ItemStack::new(shortname, leftover)),
            Err(err) => {
                warn!(slot, error = %err, "unload transfer failed");
                self.drop_undelivered(&ammo, amount, before, pool);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Magazine;

    #[test]
    fn test_unload_into_pool() {
        let mut host = StandardHost::new();
        let mut pool = GeneralPool::with_slots(4);
        let mut weapon = Weapon::new("AK", Magazine::new("ammo.rifle", 30).with_contents(30));

        host.unload_weapon(0, &mut weapon, Some(&mut pool));

        assert_eq!(weapon.magazine.as_ref().map(Magazine::contents), Some(0));
        assert_eq!(pool.count_matching(&AmmoType::new("ammo.rifle")), 30);
        assert!(host.ground().is_empty());
    }

    #[test]
    fn test_unload_overflow_drops() {
        let mut host = StandardHost::new();
        host.set_max_stack("ammo.rifle", 10);
        let mut pool = GeneralPool::with_slots(2);
        let mut weapon = Weapon::new("AK", Magazine::new("ammo.rifle", 30).with_contents(25));

        host.unload_weapon(0, &mut weapon, Some(&mut pool));

        let rifle = AmmoType::new("ammo.rifle");
        assert_eq!(pool.count_matching(&rifle), 20);
        assert_eq!(host.ground_amount(&rifle), 5);
    }

    #[test]
    fn test_failed_transfer_drops_undelivered() {
        let mut host = StandardHost::new();
        let rifle = AmmoType::new("ammo.rifle");
        let mut pool = GeneralPool::from_stacks(4, [ItemStack::new("ammo.rifle", 10)]).unwrap();
        let before = pool.count_matching(&rifle);

        // Only part of a 30-round transfer landed before the failure
        pool.insert(ItemStack::new("ammo.rifle", 12), DEFAULT_MAX_STACK)
            .unwrap();
        host.drop_undelivered(&rifle, 30, before, &pool);

        assert_eq!(host.ground_amount(&rifle), 18);
        assert_eq!(pool.count_matching(&rifle) + host.ground_amount(&rifle), before + 30);

        let mut host = StandardHost::new();
        host.drop_undelivered(&rifle, 30, 0, &GeneralPool::new());
        assert_eq!(host.ground_amount(&rifle), 30);
    }

    #[test]
    fn test_unload_without_pool() {
        let mut host = StandardHost::new();
        let mut weapon = Weapon::new("P2", Magazine::new("ammo.pistol", 10).with_contents(4));

        host.unload_weapon(3, &mut weapon, None);

        assert_eq!(host.ground_amount(&AmmoType::new("ammo.pistol")), 4);
    }

    #[test]
    fn test_max_stack_lookup_ignores_case() {
        let mut host = StandardHost::new();
        host.set_max_stack("Ammo.Rifle", 64);
        assert_eq!(host.max_stack("ammo.rifle"), 64);
        assert_eq!(host.max_stack("ammo.pistol"), DEFAULT_MAX_STACK);
    }
}
