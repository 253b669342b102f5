use crate::{
    cache::Catalogue,
    db::{models::UserState, Store},
    error::GameError,
    game::{
        card::{AppliedSkill, CardTemplate, ContractState, OwnedCard},
        progression::{self, BoostOutcome, ContractOutcome},
        starter,
        stats::compute_modified_stats,
        types::{ModifiedStats, Position, SkillRole, StatLine, Tier},
    },
};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

/// Owned card joined with its template and derived stats.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CardView {
    pub user_card_id: Uuid,
    pub card_template_id: i32,
    pub player_name: String,
    pub position: Position,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub current_level: u32,
    pub experience_points: u32,
    pub games_remaining: i32,
    pub renewals_left: i32,
    pub acquired_at: DateTime<Utc>,
    pub base_stats: StatLine,
    pub base_ovr: i32,
    pub applied_skills: Vec<AppliedSkill>,
    pub modified_stats: ModifiedStats,
    pub tier: Tier,
}

impl CardView {
    pub fn new(card: &OwnedCard, template: &CardTemplate) -> Self {
        let modified =
            compute_modified_stats(&template.stats, template.position, &card.skill_boosts());
        CardView {
            user_card_id: card.id,
            card_template_id: template.id,
            player_name: template.player_name.clone(),
            position: template.position,
            description: template.description.clone(),
            image_url: template.image_url.clone(),
            current_level: card.current_level,
            experience_points: card.experience_points,
            games_remaining: card.games_remaining,
            renewals_left: card.renewals_left,
            acquired_at: card.acquired_at,
            base_stats: template.stats,
            base_ovr: template.base_ovr,
            applied_skills: card.applied_skills.clone(),
            tier: Tier::from_ovr(modified.current_ovr),
            modified_stats: modified,
        }
    }
}

/// Applied skill joined with its template.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SkillView {
    pub skill_template_id: i32,
    pub skill_name: String,
    pub skill_description: Option<String>,
    pub applicable_to_role: Option<SkillRole>,
    pub boost_points_added: i32,
}

pub(crate) fn owned_card<'a>(state: &'a UserState, card_id: Uuid) -> Result<&'a OwnedCard, GameError> {
    state
        .card(card_id)
        .ok_or_else(|| GameError::NotFound(format!("card {card_id} not found or not yours")))
}

fn owned_card_mut(state: &mut UserState, card_id: Uuid) -> Result<&mut OwnedCard, GameError> {
    state
        .card_mut(card_id)
        .ok_or_else(|| GameError::NotFound(format!("card {card_id} not found or not yours")))
}

pub(crate) fn template_of(catalogue: &Catalogue, card: &OwnedCard) -> Result<CardTemplate, GameError> {
    catalogue
        .card(card.template_id)
        .ok_or_else(|| GameError::NotFound(format!("card template {}", card.template_id)))
}

/// True while the user owns no cards at all.
pub fn starter_pack_available(store: &Store, user_id: Uuid) -> bool {
    store.read(user_id, |s| s.cards.is_empty())
}

/// Give a new user one full line-up of random cards.
pub fn grant_starter_pack<R: Rng>(
    store: &Store,
    catalogue: &Catalogue,
    user_id: Uuid,
    contract: ContractState,
    rng: &mut R,
) -> Result<Vec<CardView>, GameError> {
    let templates = catalogue.all_cards();
    let views = store.transact(user_id, |state| {
        if !state.cards.is_empty() {
            return Err(GameError::StarterPackClaimed);
        }
        let picked = starter::draw_starter_pack(&templates, rng)?;

        let mut views = Vec::with_capacity(picked.len());
        for template_id in picked {
            let card = OwnedCard::new(
                user_id,
                template_id,
                contract.games_remaining,
                contract.renewals_left,
            );
            let template = template_of(catalogue, &card)?;
            views.push(CardView::new(&card, &template));
            state.cards.insert(card.id, card);
        }
        Ok(views)
    })?;

    log::info!("user {user_id} received a starter pack of {} cards", views.len());
    Ok(views)
}

/// Every card the user owns, best tier first, then by OVR and name.
pub fn my_cards(store: &Store, catalogue: &Catalogue, user_id: Uuid) -> Vec<CardView> {
    let mut out: Vec<CardView> = store.read(user_id, |state| {
        state
            .cards
            .values()
            .filter_map(|card| match template_of(catalogue, card) {
                Ok(t) => Some(CardView::new(card, &t)),
                Err(e) => {
                    log::warn!("skipping card {}: {e}", card.id);
                    None
                }
            })
            .collect()
    });
    out.sort_by(|a, b| {
        b.tier
            .cmp(&a.tier)
            .then(b.modified_stats.current_ovr.cmp(&a.modified_stats.current_ovr))
            .then_with(|| a.player_name.cmp(&b.player_name))
    });
    out
}

/// Skills applied to one card, sorted by name.
pub fn card_skills(
    store: &Store,
    catalogue: &Catalogue,
    user_id: Uuid,
    card_id: Uuid,
) -> Result<Vec<SkillView>, GameError> {
    let applied = store.read(user_id, |state| {
        owned_card(state, card_id).map(|c| c.applied_skills.clone())
    })?;

    let mut out: Vec<SkillView> = applied
        .into_iter()
        .map(|a| {
            let template = catalogue.skill(a.skill_template_id);
            SkillView {
                skill_template_id: a.skill_template_id,
                skill_name: a.skill_name,
                skill_description: template.as_ref().and_then(|t| t.description.clone()),
                applicable_to_role: template.map(|t| t.applicable_to_role),
                boost_points_added: a.boost_points_added,
            }
        })
        .collect();
    out.sort_by(|a, b| a.skill_name.cmp(&b.skill_name));
    Ok(out)
}

pub fn add_skill(
    store: &Store,
    catalogue: &Catalogue,
    user_id: Uuid,
    card_id: Uuid,
    skill_template_id: i32,
) -> Result<AppliedSkill, GameError> {
    let skill = catalogue
        .skill(skill_template_id)
        .ok_or_else(|| GameError::NotFound(format!("skill template {skill_template_id}")))?;

    let added = store.transact(user_id, |state| {
        let card = owned_card_mut(state, card_id)?;
        let position = template_of(catalogue, card)?.position;
        progression::add_skill(card, position, &skill)
    })?;

    log::info!("user {user_id} unlocked {} on card {card_id}", skill.name);
    Ok(added)
}

pub fn apply_boost(
    store: &Store,
    catalogue: &Catalogue,
    user_id: Uuid,
    card_id: Uuid,
    skill_template_id: i32,
    stack_id: Uuid,
) -> Result<BoostOutcome, GameError> {
    let skill = catalogue
        .skill(skill_template_id)
        .ok_or_else(|| GameError::NotFound(format!("skill template {skill_template_id}")))?;

    let outcome = store.transact(user_id, |state| {
        let UserState { cards, boosts, .. } = state;
        let card = cards
            .get_mut(&card_id)
            .ok_or_else(|| GameError::NotFound(format!("card {card_id} not found or not yours")))?;
        let position = template_of(catalogue, card)?.position;

        let boost_template_id = boosts.available(stack_id)?.template_id;
        let boost = catalogue
            .boost(boost_template_id)
            .ok_or_else(|| GameError::NotFound(format!("boost template {boost_template_id}")))?;
        progression::apply_boost(card, position, &skill, &boost, boosts, stack_id)
    })?;

    log::info!(
        "user {user_id} boosted {} on card {card_id} to {} ({} boosts left in stack)",
        skill.name,
        outcome.skill.boost_points_added,
        outcome.remaining_quantity
    );
    Ok(outcome)
}

pub fn apply_contract<R: Rng>(
    store: &Store,
    catalogue: &Catalogue,
    user_id: Uuid,
    card_id: Uuid,
    stack_id: Uuid,
    rng: &mut R,
) -> Result<ContractOutcome, GameError> {
    let outcome = store.transact(user_id, |state| {
        let UserState {
            cards, contracts, ..
        } = state;
        let card = cards
            .get_mut(&card_id)
            .ok_or_else(|| GameError::NotFound(format!("card {card_id} not found or not yours")))?;

        let contract_template_id = contracts.available(stack_id)?.template_id;
        let contract = catalogue.contract(contract_template_id).ok_or_else(|| {
            GameError::NotFound(format!("contract template {contract_template_id}"))
        })?;
        progression::apply_contract(card, &contract, contracts, stack_id, rng)
    })?;

    log::info!(
        "user {user_id} extended card {card_id} by {} games ({} renewals left)",
        outcome.games_added,
        outcome.renewals_left
    );
    Ok(outcome)
}
