//! Slot eligibility, swap-aware placement and team chemistry.

use crate::{
    error::GameError,
    game::types::{FieldSlot, Position},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

/// Chemistry at which the team-wide battle bonus unlocks.
pub const FULL_CHEMISTRY: u8 = 6;

/// A card sitting in a slot, with its native position cached.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct RosterCard {
    pub card_id: Uuid,
    pub position: Position,
}

/// The six slots, indexed by [`FieldSlot`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Roster {
    slots: [Option<RosterCard>; 6],
}

/// Result of [`place_card`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub roster: Roster,
    /// Card pushed back to the unassigned pool, if any.
    pub displaced: Option<Uuid>,
}

impl Roster {
    pub fn get(&self, slot: FieldSlot) -> Option<RosterCard> {
        self.slots[slot.index()]
    }

    /// Slot currently holding `card_id`.
    pub fn slot_of(&self, card_id: Uuid) -> Option<FieldSlot> {
        FieldSlot::ALL
            .into_iter()
            .find(|s| self.get(*s).is_some_and(|c| c.card_id == card_id))
    }

    pub fn occupied(&self) -> impl Iterator<Item = (FieldSlot, RosterCard)> + '_ {
        FieldSlot::ALL
            .into_iter()
            .filter_map(|s| self.get(s).map(|c| (s, c)))
    }

    pub fn card_ids(&self) -> Vec<Uuid> {
        self.occupied().map(|(_, c)| c.card_id).collect()
    }

    /// Persisted shape: every slot name mapped to a card id or null.
    pub fn to_record(&self) -> BTreeMap<FieldSlot, Option<Uuid>> {
        FieldSlot::ALL
            .into_iter()
            .map(|s| (s, self.get(s).map(|c| c.card_id)))
            .collect()
    }

    fn set(&mut self, slot: FieldSlot, card: Option<RosterCard>) {
        self.slots[slot.index()] = card;
    }
}

pub fn is_card_eligible_for_slot(position: Position, slot: FieldSlot) -> bool {
    position == slot.required_position()
}

/// Put `card` into `slot`, returning the new roster.
///
/// If the card already sits in another slot and the target slot is occupied,
/// the occupant moves into the vacated slot when it is eligible there;
/// otherwise the occupant goes back to the pool.
pub fn place_card(roster: &Roster, card: RosterCard, slot: FieldSlot) -> Result<Placement, GameError> {
    if !is_card_eligible_for_slot(card.position, slot) {
        return Err(GameError::RoleMismatch(format!(
            "{} card {} cannot play {slot}",
            card.position, card.card_id
        )));
    }

    let source = roster.slot_of(card.card_id);
    if source == Some(slot) {
        return Ok(Placement {
            roster: *roster,
            displaced: None,
        });
    }

    let mut next = *roster;
    let occupant = next.get(slot);
    if let Some(src) = source {
        next.set(src, None);
    }
    next.set(slot, Some(card));

    let mut displaced = None;
    if let Some(prev) = occupant {
        match source {
            Some(src) if is_card_eligible_for_slot(prev.position, src) => {
                next.set(src, Some(prev));
            }
            _ => displaced = Some(prev.card_id),
        }
    }

    Ok(Placement {
        roster: next,
        displaced,
    })
}

/// Move `card_id` back to the pool. No-op if it is not rostered.
pub fn unassign_card(roster: &Roster, card_id: Uuid) -> Roster {
    let mut next = *roster;
    if let Some(slot) = next.slot_of(card_id) {
        next.set(slot, None);
    }
    next
}

/// Validate a full slot → card assignment and build the roster.
///
/// `lookup` resolves a card id to its native position, or `None` when the
/// caller does not own such a card. Nothing is returned unless every slot
/// passes.
pub fn build_roster<F>(
    assignment: &BTreeMap<FieldSlot, Option<Uuid>>,
    lookup: F,
) -> Result<Roster, GameError>
where
    F: Fn(Uuid) -> Option<Position>,
{
    let mut seen = HashSet::new();
    let mut roster = Roster::default();

    for (slot, card_id) in assignment {
        let Some(card_id) = *card_id else {
            continue;
        };
        if !seen.insert(card_id) {
            return Err(GameError::DuplicateAssignment(format!(
                "card {card_id} is assigned to more than one slot"
            )));
        }
        let position = lookup(card_id)
            .ok_or_else(|| GameError::NotFound(format!("card {card_id} not found")))?;
        if !is_card_eligible_for_slot(position, *slot) {
            return Err(GameError::RoleMismatch(format!(
                "{position} card {card_id} cannot play {slot}"
            )));
        }
        roster.set(*slot, Some(RosterCard { card_id, position }));
    }

    Ok(roster)
}

/// One point per occupied slot whose card's native role matches the slot.
pub fn compute_chemistry(roster: &Roster) -> u8 {
    roster
        .occupied()
        .filter(|(slot, card)| is_card_eligible_for_slot(card.position, *slot))
        .count() as u8
}
