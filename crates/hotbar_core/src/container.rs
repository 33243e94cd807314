//! # Container Model
//!
//! The two containers a player carries: the quick-access belt and the
//! general pool. Both are fixed-size slot arrays allocated up front. Slot
//! indices are stable for the length of one command, so reports and host
//! notifications refer to weapons by [`SlotIndex`] rather than by pointer.

use tracing::trace;

use crate::ammo::{ammo_matches, AmmoType};
use crate::error::{HotbarError, HotbarResult};

/// Index of a slot inside a container.
pub type SlotIndex = usize;

/// Default number of quick-access slots.
pub const BELT_SLOTS: usize = 6;

/// Default number of general pool slots.
pub const MAIN_SLOTS: usize = 24;

/// Stack limit used when the host has no entry for an item.
pub const DEFAULT_MAX_STACK: u32 = 128;

/// A stack of items in a container slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemStack {
    /// Item short name. Ammo stacks use their ammo-type identifier.
    pub shortname: String,
    /// Number of items in this stack.
    pub amount: u32,
}

impl ItemStack {
    /// Creates a new item stack.
    #[must_use]
    pub fn new(shortname: impl Into<String>, amount: u32) -> Self {
        Self {
            shortname: shortname.into(),
            amount,
        }
    }

    /// Returns true if this stack can feed a weapon using `ammo`.
    #[inline]
    #[must_use]
    pub fn is_ammo_for(&self, ammo: &AmmoType) -> bool {
        ammo.matches(&self.shortname)
    }
}

/// A weapon's internal ammo buffer.
///
/// Invariant: `contents <= capacity`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Magazine {
    contents: u32,
    capacity: u32,
    /// Ammunition this magazine accepts, if the weapon declares one.
    pub ammo_type: Option<AmmoType>,
}

impl Magazine {
    /// Creates an empty magazine.
    #[must_use]
    pub fn new(ammo_type: impl Into<AmmoType>, capacity: u32) -> Self {
        Self {
            contents: 0,
            capacity,
            ammo_type: Some(ammo_type.into()),
        }
    }

    /// Creates a magazine that declares no ammo type.
    #[must_use]
    pub const fn untyped(capacity: u32) -> Self {
        Self {
            contents: 0,
            capacity,
            ammo_type: None,
        }
    }

    /// Sets the loaded rounds, clamped to capacity.
    #[must_use]
    pub fn with_contents(mut self, contents: u32) -> Self {
        self.contents = contents.min(self.capacity);
        self
    }

    /// Rounds currently loaded.
    #[inline]
    #[must_use]
    pub const fn contents(&self) -> u32 {
        self.contents
    }

    /// Maximum rounds.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Rounds needed to fill the magazine.
    #[inline]
    #[must_use]
    pub const fn missing(&self) -> u32 {
        self.capacity.saturating_sub(self.contents)
    }

    /// Returns true if no more rounds fit.
    #[inline]
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.contents >= self.capacity
    }

    /// Returns true if no rounds are loaded.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.contents == 0
    }

    /// Loads up to `amount` rounds and returns how many were accepted.
    pub fn load(&mut self, amount: u32) -> u32 {
        let accepted = amount.min(self.missing());
        self.contents += accepted;
        accepted
    }

    /// Empties the magazine and returns the rounds that were in it.
    pub fn drain(&mut self) -> u32 {
        std::mem::take(&mut self.contents)
    }
}

/// A weapon held in a belt slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Weapon {
    /// Name shown to players.
    pub display_name: String,
    /// Primary magazine. Weapons without one are never reloaded or unloaded.
    pub magazine: Option<Magazine>,
}

impl Weapon {
    /// Creates a weapon with a magazine.
    #[must_use]
    pub fn new(display_name: impl Into<String>, magazine: Magazine) -> Self {
        Self {
            display_name: display_name.into(),
            magazine: Some(magazine),
        }
    }

    /// Creates a weapon with no magazine (melee, throwables).
    #[must_use]
    pub fn without_magazine(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            magazine: None,
        }
    }
}

/// Contents of an occupied belt slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BeltEntry {
    /// A held weapon.
    Weapon(Weapon),
    /// Any other item (medical, tools, building parts).
    Item(ItemStack),
}

impl BeltEntry {
    /// Returns the weapon in this slot, if any.
    #[must_use]
    pub const fn as_weapon(&self) -> Option<&Weapon> {
        match self {
            Self::Weapon(weapon) => Some(weapon),
            Self::Item(_) => None,
        }
    }

    /// Returns the weapon in this slot mutably, if any.
    pub fn as_weapon_mut(&mut self) -> Option<&mut Weapon> {
        match self {
            Self::Weapon(weapon) => Some(weapon),
            Self::Item(_) => None,
        }
    }
}

impl From<Weapon> for BeltEntry {
    fn from(weapon: Weapon) -> Self {
        Self::Weapon(weapon)
    }
}

impl From<ItemStack> for BeltEntry {
    fn from(stack: ItemStack) -> Self {
        Self::Item(stack)
    }
}

fn check_slot(slot: SlotIndex, len: usize) -> HotbarResult<()> {
    if slot < len {
        Ok(())
    } else {
        Err(HotbarError::SlotOutOfRange { slot, len })
    }
}

/// The quick-access belt: an ordered, fixed-size set of optional slots.
///
/// Slot order is processing order and reporting order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuickAccessSet {
    slots: Vec<Option<BeltEntry>>,
}

impl QuickAccessSet {
    /// Creates an empty belt with [`BELT_SLOTS`] slots.
    #[must_use]
    pub fn new() -> Self {
        Self::with_slots(BELT_SLOTS)
    }

    /// Creates an empty belt with `count` slots.
    #[must_use]
    pub fn with_slots(count: usize) -> Self {
        Self {
            slots: vec![None; count],
        }
    }

    /// Number of slots, occupied or not.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if every slot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Places an entry in a slot and returns what was there.
    ///
    /// # Errors
    ///
    /// Returns `HotbarError::SlotOutOfRange` if the slot does not exist.
    pub fn set(
        &mut self,
        slot: SlotIndex,
        entry: impl Into<BeltEntry>,
    ) -> HotbarResult<Option<BeltEntry>> {
        check_slot(slot, self.slots.len())?;
        Ok(self.slots[slot].replace(entry.into()))
    }

    /// Empties a slot and returns what was there.
    ///
    /// # Errors
    ///
    /// Returns `HotbarError::SlotOutOfRange` if the slot does not exist.
    pub fn take(&mut self, slot: SlotIndex) -> HotbarResult<Option<BeltEntry>> {
        check_slot(slot, self.slots.len())?;
        Ok(self.slots[slot].take())
    }

    /// Gets the entry in a slot.
    #[must_use]
    pub fn get(&self, slot: SlotIndex) -> Option<&BeltEntry> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Gets the weapon in a slot.
    #[must_use]
    pub fn weapon(&self, slot: SlotIndex) -> Option<&Weapon> {
        self.get(slot).and_then(BeltEntry::as_weapon)
    }

    /// Gets the entry in a slot mutably.
    pub fn get_mut(&mut self, slot: SlotIndex) -> Option<&mut BeltEntry> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    /// Gets the weapon in a slot mutably.
    pub fn weapon_mut(&mut self, slot: SlotIndex) -> Option<&mut Weapon> {
        self.get_mut(slot).and_then(BeltEntry::as_weapon_mut)
    }

    /// Iterates occupied slots in order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, &BeltEntry)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, entry)| entry.as_ref().map(|e| (slot, e)))
    }

    /// Iterates weapons in slot order.
    pub fn weapons(&self) -> impl Iterator<Item = (SlotIndex, &Weapon)> {
        self.iter()
            .filter_map(|(slot, entry)| entry.as_weapon().map(|w| (slot, w)))
    }

    /// Iterates weapons mutably in slot order.
    pub fn weapons_mut(&mut self) -> impl Iterator<Item = (SlotIndex, &mut Weapon)> {
        self.slots.iter_mut().enumerate().filter_map(|(slot, entry)| {
            entry
                .as_mut()
                .and_then(BeltEntry::as_weapon_mut)
                .map(|w| (slot, w))
        })
    }

    /// Total rounds loaded in weapons that take `ammo`.
    #[must_use]
    pub fn loaded_ammo(&self, ammo: &AmmoType) -> u64 {
        self.weapons()
            .filter_map(|(_, weapon)| weapon.magazine.as_ref())
            .filter(|mag| mag.ammo_type.as_ref() == Some(ammo))
            .map(|mag| u64::from(mag.contents()))
            .sum()
    }
}

impl Default for QuickAccessSet {
    fn default() -> Self {
        Self::new()
    }
}

/// The general inventory pool.
///
/// Logically an unordered multiset of stacks, stored as fixed slots.
/// Iteration follows slot order, which is the order reloads consume from.
/// Stacks never sit at zero amount: emptied stacks are cleared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneralPool {
    slots: Vec<Option<ItemStack>>,
}

impl GeneralPool {
    /// Creates an empty pool with [`MAIN_SLOTS`] slots.
    #[must_use]
    pub fn new() -> Self {
        Self::with_slots(MAIN_SLOTS)
    }

    /// Creates an empty pool with `count` slots.
    #[must_use]
    pub fn with_slots(count: usize) -> Self {
        Self {
            slots: vec![None; count],
        }
    }

    /// Creates a pool holding `stacks` in consecutive slots, unmerged.
    ///
    /// Zero-amount stacks are dropped.
    ///
    /// # Errors
    ///
    /// Returns `HotbarError::PoolFull` if there are more stacks than slots.
    pub fn from_stacks(
        count: usize,
        stacks: impl IntoIterator<Item = ItemStack>,
    ) -> HotbarResult<Self> {
        let mut pool = Self::with_slots(count);
        let mut next = 0;
        for stack in stacks.into_iter().filter(|s| s.amount > 0) {
            if next >= count {
                return Err(HotbarError::PoolFull {
                    capacity: count,
                    shortname: stack.shortname,
                    leftover: stack.amount,
                });
            }
            pool.slots[next] = Some(stack);
            next += 1;
        }
        Ok(pool)
    }

    /// Total number of slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn used_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Checks if every slot is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Gets the stack at a slot.
    #[must_use]
    pub fn get(&self, slot: SlotIndex) -> Option<&ItemStack> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Puts a stack into a slot, replacing whatever was there.
    ///
    /// A zero-amount stack clears the slot.
    ///
    /// # Errors
    ///
    /// Returns `HotbarError::SlotOutOfRange` if the slot does not exist.
    pub fn set(&mut self, slot: SlotIndex, stack: ItemStack) -> HotbarResult<Option<ItemStack>> {
        check_slot(slot, self.slots.len())?;
        let stack = (stack.amount > 0).then_some(stack);
        Ok(std::mem::replace(&mut self.slots[slot], stack))
    }

    /// Removes the stack at a slot.
    ///
    /// # Errors
    ///
    /// Returns `HotbarError::SlotOutOfRange` if the slot does not exist.
    pub fn remove(&mut self, slot: SlotIndex) -> HotbarResult<Option<ItemStack>> {
        check_slot(slot, self.slots.len())?;
        Ok(self.slots[slot].take())
    }

    /// Iterates occupied slots in order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, &ItemStack)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, stack)| stack.as_ref().map(|s| (slot, s)))
    }

    /// Sums the amount of every stack that is ammo of type `ammo`.
    #[must_use]
    pub fn count_matching(&self, ammo: &AmmoType) -> u64 {
        self.iter()
            .filter(|(_, stack)| stack.is_ammo_for(ammo))
            .map(|(_, stack)| u64::from(stack.amount))
            .sum()
    }

    /// Takes up to `amount` rounds of `ammo`, first-fit in slot order.
    ///
    /// Each matching stack gives up as much as it holds until the request is
    /// met. Stacks that reach zero are removed. Returns the amount taken,
    /// which is less than `amount` only if the pool ran out.
    pub fn consume_matching(&mut self, ammo: &AmmoType, amount: u32) -> u32 {
        let mut remaining = amount;

        for (slot, entry) in self.slots.iter_mut().enumerate() {
            if remaining == 0 {
                break;
            }

            let Some(stack) = entry.as_mut() else { continue };
            if !stack.is_ammo_for(ammo) {
                continue;
            }

            let take = stack.amount.min(remaining);
            stack.amount -= take;
            remaining -= take;
            trace!(slot, take, left = stack.amount, "consumed from stack");

            if stack.amount == 0 {
                *entry = None;
            }
        }

        amount - remaining
    }

    /// Adds a stack to the pool.
    ///
    /// First tops up existing stacks of the same item below `max_stack`,
    /// then fills empty slots with new stacks of at most `max_stack`.
    ///
    /// # Errors
    ///
    /// Returns `HotbarError::PoolFull` carrying the leftover if the pool ran
    /// out of room. The part that fit stays in the pool.
    pub fn insert(&mut self, stack: ItemStack, max_stack: u32) -> HotbarResult<()> {
        let max_stack = max_stack.max(1);
        let mut remaining = stack.amount;

        // First, top up existing stacks
        for existing in self.slots.iter_mut().flatten() {
            if remaining == 0 {
                break;
            }

            if ammo_matches(&existing.shortname, &stack.shortname) && existing.amount < max_stack {
                let can_add = (max_stack - existing.amount).min(remaining);
                existing.amount += can_add;
                remaining -= can_add;
            }
        }

        // Then, use empty slots
        for empty in self.slots.iter_mut().filter(|s| s.is_none()) {
            if remaining == 0 {
                break;
            }

            let add_count = remaining.min(max_stack);
            *empty = Some(ItemStack::new(stack.shortname.clone(), add_count));
            remaining -= add_count;
        }

        if remaining > 0 {
            return Err(HotbarError::PoolFull {
                capacity: self.slots.len(),
                shortname: stack.shortname,
                leftover: remaining,
            });
        }

        Ok(())
    }
}

impl Default for GeneralPool {
    fn default() -> Self {
        Self::new()
    }
}

/// The containers owned by one player.
///
/// Either container may be missing, in which case the operations skip the
/// work that needs it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerInventory {
    /// Quick-access belt.
    pub belt: Option<QuickAccessSet>,
    /// General pool.
    pub main: Option<GeneralPool>,
}

impl PlayerInventory {
    /// Creates an inventory with both containers present.
    #[must_use]
    pub fn new(belt: QuickAccessSet, main: GeneralPool) -> Self {
        Self {
            belt: Some(belt),
            main: Some(main),
        }
    }
}
