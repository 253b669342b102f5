//! Consumable stacks (boosts, contracts, impact cards) owned by one user.

use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ItemStack {
    pub id: Uuid,
    pub template_id: i32,
    pub quantity: u32,
}

/// Stacks keyed by stack id, at most one stack per template.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    stacks: BTreeMap<Uuid, ItemStack>,
}

impl Inventory {
    /// Add `quantity` of a template, topping up an existing stack if present.
    pub fn grant(&mut self, template_id: i32, quantity: u32) -> &ItemStack {
        let id = self
            .stacks
            .values()
            .find(|s| s.template_id == template_id)
            .map(|s| s.id)
            .unwrap_or_else(Uuid::new_v4);
        let stack = self.stacks.entry(id).or_insert(ItemStack {
            id,
            template_id,
            quantity: 0,
        });
        stack.quantity = stack.quantity.saturating_add(quantity);
        stack
    }

    /// Stack `id`, failing if absent or empty.
    pub fn available(&self, id: Uuid) -> Result<&ItemStack, GameError> {
        let stack = self
            .stacks
            .get(&id)
            .ok_or_else(|| GameError::NotFound(format!("inventory stack {id}")))?;
        if stack.quantity == 0 {
            return Err(GameError::OutOfStock(id));
        }
        Ok(stack)
    }

    /// Use one item from stack `id`; the stack is removed when it hits zero.
    /// Returns the remaining quantity.
    pub fn consume_one(&mut self, id: Uuid) -> Result<u32, GameError> {
        let remaining = self.available(id)?.quantity - 1;
        if remaining == 0 {
            self.stacks.remove(&id);
        } else if let Some(stack) = self.stacks.get_mut(&id) {
            stack.quantity = remaining;
        }
        Ok(remaining)
    }

    /// Non-empty stacks in id order.
    pub fn stacks(&self) -> impl Iterator<Item = &ItemStack> {
        self.stacks.values().filter(|s| s.quantity > 0)
    }
}
