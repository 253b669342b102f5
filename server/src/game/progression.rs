//! Consumable application: skill unlocks, boosts and contract renewals.
//!
//! Every operation validates first and mutates last, so a failed call leaves
//! the card and the inventory untouched.

use crate::{
    error::GameError,
    game::{
        card::{AppliedSkill, BoostTemplate, ContractTemplate, OwnedCard, SkillTemplate},
        inventory::Inventory,
        types::Position,
    },
};
use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

/// Skill slots per card.
pub const MAX_SKILLS: usize = 4;

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct BoostOutcome {
    pub skill: AppliedSkill,
    pub remaining_quantity: u32,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct ContractOutcome {
    pub card_id: Uuid,
    pub games_added: i32,
    pub games_remaining: i32,
    pub renewals_left: i32,
    pub remaining_quantity: u32,
}

fn check_role(card: &OwnedCard, position: Position, skill: &SkillTemplate) -> Result<(), GameError> {
    if skill.applicable_to_role.accepts(position) {
        return Ok(());
    }
    Err(GameError::RoleMismatch(format!(
        "skill {} ({}) cannot be applied to {position} card {}",
        skill.name, skill.applicable_to_role, card.id
    )))
}

fn check_capacity(card: &OwnedCard) -> Result<(), GameError> {
    if card.applied_skills.len() >= MAX_SKILLS {
        return Err(GameError::CapacityExceeded { max: MAX_SKILLS });
    }
    Ok(())
}

/// Unlock `skill` on `card` with zero boost points.
pub fn add_skill(
    card: &mut OwnedCard,
    position: Position,
    skill: &SkillTemplate,
) -> Result<AppliedSkill, GameError> {
    check_capacity(card)?;
    if card.skill(skill.id).is_some() {
        return Err(GameError::AlreadyPresent(format!(
            "skill {} is already on card {}",
            skill.name, card.id
        )));
    }
    check_role(card, position, skill)?;

    let applied = AppliedSkill::new(skill);
    card.applied_skills.push(applied.clone());
    Ok(applied)
}

/// Spend one boost from stack `stack_id` on `skill`.
///
/// A skill the card does not have yet is unlocked first, subject to the
/// same capacity limit as [`add_skill`].
pub fn apply_boost(
    card: &mut OwnedCard,
    position: Position,
    skill: &SkillTemplate,
    boost: &BoostTemplate,
    inventory: &mut Inventory,
    stack_id: Uuid,
) -> Result<BoostOutcome, GameError> {
    let stack = inventory.available(stack_id)?;
    if stack.template_id != boost.id {
        return Err(GameError::NotFound(format!(
            "stack {stack_id} does not hold boost {}",
            boost.id
        )));
    }
    if boost.target_skill_template_id != skill.id {
        return Err(GameError::TargetMismatch {
            boost_target: boost.target_skill_template_id,
            requested: skill.id,
        });
    }
    check_role(card, position, skill)?;
    let existing = card
        .applied_skills
        .iter()
        .position(|s| s.skill_template_id == skill.id);
    if existing.is_none() {
        check_capacity(card)?;
    }

    let remaining_quantity = inventory.consume_one(stack_id)?;
    let idx = match existing {
        Some(idx) => idx,
        None => {
            card.applied_skills.push(AppliedSkill::new(skill));
            card.applied_skills.len() - 1
        }
    };
    let applied = &mut card.applied_skills[idx];
    applied.boost_points_added = applied.boost_points_added.saturating_add(boost.points_value);
    applied.updated_at = Utc::now();

    Ok(BoostOutcome {
        skill: applied.clone(),
        remaining_quantity,
    })
}

/// Spend one contract from stack `stack_id` to extend `card`.
pub fn apply_contract<R: Rng>(
    card: &mut OwnedCard,
    contract: &ContractTemplate,
    inventory: &mut Inventory,
    stack_id: Uuid,
    rng: &mut R,
) -> Result<ContractOutcome, GameError> {
    let stack = inventory.available(stack_id)?;
    if stack.template_id != contract.id {
        return Err(GameError::NotFound(format!(
            "stack {stack_id} does not hold contract {}",
            contract.id
        )));
    }
    if card.renewals_left <= 0 {
        return Err(GameError::NoRenewalsLeft(card.id));
    }

    let lo = contract.games_added_min.min(contract.games_added_max);
    let hi = contract.games_added_min.max(contract.games_added_max);
    let games_added = rng.random_range(lo..=hi);

    let remaining_quantity = inventory.consume_one(stack_id)?;
    card.games_remaining = card.games_remaining.saturating_add(games_added);
    card.renewals_left -= 1;

    Ok(ContractOutcome {
        card_id: card.id,
        games_added,
        games_remaining: card.games_remaining,
        renewals_left: card.renewals_left,
        remaining_quantity,
    })
}
