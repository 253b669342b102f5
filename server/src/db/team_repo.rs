use crate::{
    cache::Catalogue,
    db::{card_repo::template_of, models::UserState, Store},
    error::GameError,
    game::{
        battle::{self, ItemEffect},
        card::ContractState,
        roster::{self, RosterCard},
        stats::compute_modified_stats,
        types::{FieldSlot, ModifiedStats, Position},
    },
};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct RosterView {
    pub roster: BTreeMap<FieldSlot, Option<Uuid>>,
    pub team_chemistry_points: u8,
}

impl RosterView {
    fn of(state: &UserState) -> Self {
        RosterView {
            roster: state.roster.to_record(),
            team_chemistry_points: state.team_chemistry_points,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct PlacementView {
    #[serde(flatten)]
    pub roster: RosterView,
    pub displaced: Option<Uuid>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct TeamStatus {
    /// Rounded mean of the rostered cards' modified OVR, `None` with an empty roster.
    pub rating: Option<i32>,
    pub team_chemistry_points: u8,
}

/// One rostered card ready for match simulation.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BattleEntry {
    pub user_card_id: Uuid,
    pub field_position: FieldSlot,
    pub player_name: String,
    pub position: Position,
    pub battle_stats: ModifiedStats,
    pub contract_info: ContractState,
}

fn card_position(state: &UserState, catalogue: &Catalogue, card_id: Uuid) -> Option<Position> {
    let card = state.card(card_id)?;
    template_of(catalogue, card).ok().map(|t| t.position)
}

pub fn roster(store: &Store, user_id: Uuid) -> RosterView {
    store.read(user_id, RosterView::of)
}

/// Replace the whole roster. Either every slot is stored or none is.
pub fn save_roster(
    store: &Store,
    catalogue: &Catalogue,
    user_id: Uuid,
    assignment: &BTreeMap<FieldSlot, Option<Uuid>>,
) -> Result<RosterView, GameError> {
    let view = store.transact(user_id, |state| {
        let next = roster::build_roster(assignment, |id| card_position(state, catalogue, id))?;
        state.team_chemistry_points = roster::compute_chemistry(&next);
        state.roster = next;
        Ok(RosterView::of(state))
    })?;

    log::info!(
        "user {user_id} saved roster, chemistry {}",
        view.team_chemistry_points
    );
    Ok(view)
}

/// Move one owned card into `slot`, swapping with the occupant when possible.
pub fn place_card(
    store: &Store,
    catalogue: &Catalogue,
    user_id: Uuid,
    card_id: Uuid,
    slot: FieldSlot,
) -> Result<PlacementView, GameError> {
    store.transact(user_id, |state| {
        let position = card_position(state, catalogue, card_id)
            .ok_or_else(|| GameError::NotFound(format!("card {card_id} not found or not yours")))?;
        let placed = roster::place_card(&state.roster, RosterCard { card_id, position }, slot)?;
        state.team_chemistry_points = roster::compute_chemistry(&placed.roster);
        state.roster = placed.roster;
        Ok(PlacementView {
            roster: RosterView::of(state),
            displaced: placed.displaced,
        })
    })
}

/// Send a card back to the unassigned pool.
pub fn unassign_card(store: &Store, user_id: Uuid, card_id: Uuid) -> Result<RosterView, GameError> {
    store.transact(user_id, |state| {
        if state.card(card_id).is_none() {
            return Err(GameError::NotFound(format!(
                "card {card_id} not found or not yours"
            )));
        }
        state.roster = roster::unassign_card(&state.roster, card_id);
        state.team_chemistry_points = roster::compute_chemistry(&state.roster);
        Ok(RosterView::of(state))
    })
}

/// Mean modified OVR over the rostered cards, rounded half up.
pub fn team_rating(store: &Store, catalogue: &Catalogue, user_id: Uuid) -> TeamStatus {
    store.read(user_id, |state| {
        let ovrs: Vec<i32> = state
            .roster
            .occupied()
            .filter_map(|(_, entry)| {
                let card = state.card(entry.card_id)?;
                let template = template_of(catalogue, card).ok()?;
                let modified =
                    compute_modified_stats(&template.stats, template.position, &card.skill_boosts());
                Some(modified.current_ovr)
            })
            .collect();

        let rating = (!ovrs.is_empty()).then(|| {
            let sum: i32 = ovrs.iter().sum();
            (f64::from(sum) / ovrs.len() as f64).round() as i32
        });
        TeamStatus {
            rating,
            team_chemistry_points: state.team_chemistry_points,
        }
    })
}

/// Battle stats for every rostered card, with the effects of the selected
/// impact cards applied to each.
pub fn team_battle_stats(
    store: &Store,
    catalogue: &Catalogue,
    user_id: Uuid,
    impact_card_ids: &[i32],
) -> Result<Vec<BattleEntry>, GameError> {
    let effects: Vec<ItemEffect> = impact_card_ids
        .iter()
        .map(|id| {
            catalogue
                .impact_card(*id)
                .map(|t| t.effects)
                .ok_or_else(|| GameError::NotFound(format!("impact card template {id}")))
        })
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .flatten()
        .collect();

    store.read(user_id, |state| {
        if state.roster.occupied().next().is_none() {
            return Err(GameError::NotFound("team roster is empty".into()));
        }
        let chemistry = state.team_chemistry_points;

        let mut out = Vec::new();
        for (slot, entry) in state.roster.occupied() {
            let Some(card) = state.card(entry.card_id) else {
                log::warn!("rostered card {} no longer owned by {user_id}", entry.card_id);
                continue;
            };
            let template = template_of(catalogue, card)?;
            let modified =
                compute_modified_stats(&template.stats, template.position, &card.skill_boosts());
            out.push(BattleEntry {
                user_card_id: card.id,
                field_position: slot,
                player_name: template.player_name,
                position: template.position,
                battle_stats: battle::battle_stats(
                    &modified,
                    template.position,
                    card.contract(),
                    chemistry,
                    &effects,
                ),
                contract_info: card.contract(),
            });
        }
        Ok(out)
    })
}

/// Burn one game off each listed card the user owns. Returns how many cards
/// were updated.
pub fn finish_match(
    store: &Store,
    user_id: Uuid,
    participants: &[Uuid],
) -> Result<usize, GameError> {
    let updated = store.transact(user_id, |state| {
        let mut n = 0;
        for id in participants.iter().collect::<BTreeSet<_>>() {
            if let Some(card) = state.card_mut(*id) {
                battle::consume_game(card);
                n += 1;
            }
        }
        Ok(n)
    })?;

    log::info!("user {user_id}: reduced games_remaining on {updated} cards after match");
    Ok(updated)
}
