use crate::game::{card::OwnedCard, inventory::Inventory, roster::Roster};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Everything one user owns. Mutated only through [`super::Store::transact`].
#[derive(Debug, Clone, Default)]
pub struct UserState {
    pub cards: BTreeMap<Uuid, OwnedCard>,
    pub roster: Roster,
    pub team_chemistry_points: u8,
    pub boosts: Inventory,
    pub contracts: Inventory,
    pub impact_cards: Inventory,
}

impl UserState {
    pub fn card(&self, card_id: Uuid) -> Option<&OwnedCard> {
        self.cards.get(&card_id)
    }

    pub fn card_mut(&mut self, card_id: Uuid) -> Option<&mut OwnedCard> {
        self.cards.get_mut(&card_id)
    }
}
