use crate::{
    cache::Catalogue,
    db::Store,
    error::GameError,
    game::{battle::ItemEffect, inventory::ItemStack},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Boost,
    Contract,
    ImpactCard,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct BoostStackView {
    pub user_boost_inventory_id: Uuid,
    pub quantity: u32,
    pub boost_template_id: i32,
    pub boost_name: String,
    pub boost_quality: Option<String>,
    pub boost_points_value: i32,
    pub target_skill_template_id: i32,
    pub target_skill_name: Option<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ContractStackView {
    pub user_contract_inventory_id: Uuid,
    pub quantity: u32,
    pub contract_template_id: i32,
    pub contract_name: String,
    pub contract_quality: Option<String>,
    pub games_added_min: i32,
    pub games_added_max: i32,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ImpactStackView {
    pub user_impact_card_id: Uuid,
    pub quantity: u32,
    pub template_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub effects: Vec<ItemEffect>,
}

/// Non-empty boost stacks with their templates, by quality then name.
pub fn boosts(store: &Store, catalogue: &Catalogue, user_id: Uuid) -> Vec<BoostStackView> {
    let stacks: Vec<ItemStack> = store.read(user_id, |s| s.boosts.stacks().cloned().collect());
    let mut out: Vec<BoostStackView> = stacks
        .into_iter()
        .filter_map(|stack| {
            let t = catalogue.boost(stack.template_id)?;
            Some(BoostStackView {
                user_boost_inventory_id: stack.id,
                quantity: stack.quantity,
                boost_template_id: t.id,
                target_skill_name: catalogue.skill(t.target_skill_template_id).map(|s| s.name),
                boost_name: t.name,
                boost_quality: t.quality,
                boost_points_value: t.points_value,
                target_skill_template_id: t.target_skill_template_id,
            })
        })
        .collect();
    out.sort_by(|a, b| {
        a.boost_quality
            .cmp(&b.boost_quality)
            .then_with(|| a.boost_name.cmp(&b.boost_name))
    });
    out
}

/// Non-empty contract stacks with their templates, by quality then name.
pub fn contracts(store: &Store, catalogue: &Catalogue, user_id: Uuid) -> Vec<ContractStackView> {
    let stacks: Vec<ItemStack> = store.read(user_id, |s| s.contracts.stacks().cloned().collect());
    let mut out: Vec<ContractStackView> = stacks
        .into_iter()
        .filter_map(|stack| {
            let t = catalogue.contract(stack.template_id)?;
            Some(ContractStackView {
                user_contract_inventory_id: stack.id,
                quantity: stack.quantity,
                contract_template_id: t.id,
                contract_name: t.name,
                contract_quality: t.quality,
                games_added_min: t.games_added_min,
                games_added_max: t.games_added_max,
            })
        })
        .collect();
    out.sort_by(|a, b| {
        a.contract_quality
            .cmp(&b.contract_quality)
            .then_with(|| a.contract_name.cmp(&b.contract_name))
    });
    out
}

pub fn impact_cards(store: &Store, catalogue: &Catalogue, user_id: Uuid) -> Vec<ImpactStackView> {
    let stacks: Vec<ItemStack> =
        store.read(user_id, |s| s.impact_cards.stacks().cloned().collect());
    let mut out: Vec<ImpactStackView> = stacks
        .into_iter()
        .filter_map(|stack| {
            let t = catalogue.impact_card(stack.template_id)?;
            Some(ImpactStackView {
                user_impact_card_id: stack.id,
                quantity: stack.quantity,
                template_id: t.id,
                name: t.name,
                description: t.description,
                effects: t.effects,
            })
        })
        .collect();
    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}

/// Add `quantity` items of a template to the user's inventory.
pub fn grant(
    store: &Store,
    catalogue: &Catalogue,
    user_id: Uuid,
    kind: ItemKind,
    template_id: i32,
    quantity: u32,
) -> Result<ItemStack, GameError> {
    let known = match kind {
        ItemKind::Boost => catalogue.boosts.contains_key(&template_id),
        ItemKind::Contract => catalogue.contracts.contains_key(&template_id),
        ItemKind::ImpactCard => catalogue.impact_cards.contains_key(&template_id),
    };
    if !known {
        return Err(GameError::NotFound(format!("{kind:?} template {template_id}")));
    }

    let stack = store.transact(user_id, |state| {
        let inventory = match kind {
            ItemKind::Boost => &mut state.boosts,
            ItemKind::Contract => &mut state.contracts,
            ItemKind::ImpactCard => &mut state.impact_cards,
        };
        Ok(inventory.grant(template_id, quantity.max(1)).clone())
    })?;

    log::debug!("granted {quantity} x {kind:?} {template_id} to user {user_id}");
    Ok(stack)
}
