//! Match-time stat pass layered on top of modified stats.

use crate::game::{
    card::{ContractState, OwnedCard},
    roster::FULL_CHEMISTRY,
    stats::overall_rating,
    types::{ModifiedStats, Position, Stat},
};
use serde::{Deserialize, Serialize};

/// Flat bonus to every attribute when chemistry is full.
pub const CHEMISTRY_BONUS: i32 = 5;

/// Effect carried by an impact card.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemEffect {
    StatBoost {
        stat_name: String,
        #[serde(default)]
        value_percent: Option<f64>,
        #[serde(default)]
        value_flat: Option<i32>,
    },
    #[serde(other)]
    Unsupported,
}

/// Single-match consumable whose effects feed [`battle_stats`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ImpactCardTemplate {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub effects: Vec<ItemEffect>,
}

impl ItemEffect {
    fn apply(&self, stats: &mut ModifiedStats) {
        let ItemEffect::StatBoost {
            stat_name,
            value_percent,
            value_flat,
        } = self
        else {
            return;
        };
        let Ok(stat) = stat_name.parse::<Stat>() else {
            log::debug!("ignoring effect on unknown stat {stat_name}");
            return;
        };

        let v = stats.stats.get_mut(stat);
        if let Some(pct) = value_percent.filter(|p| *p != 0.0) {
            *v = (f64::from(*v) * (1.0 + pct / 100.0)).floor() as i32;
        }
        if let Some(flat) = value_flat.filter(|f| *f != 0) {
            *v = v.saturating_add(flat);
        }
    }
}

/// Final attributes for one card in one match.
///
/// Order: expired-contract halving, full-chemistry bonus, then each effect in
/// list order against the running values. OVR is recomputed last.
pub fn battle_stats(
    modified: &ModifiedStats,
    position: Position,
    contract: ContractState,
    chemistry: u8,
    effects: &[ItemEffect],
) -> ModifiedStats {
    let mut out = *modified;

    if contract.is_expired() {
        out.stats = out.stats.map(|v| v / 2);
    }
    if chemistry >= FULL_CHEMISTRY {
        out.stats = out.stats.map(|v| v.saturating_add(CHEMISTRY_BONUS));
    }
    for effect in effects {
        effect.apply(&mut out);
    }

    out.current_ovr = overall_rating(&out.stats, position);
    out
}

/// Burn one game off the card's contract, never going below zero.
pub fn consume_game(card: &mut OwnedCard) {
    card.games_remaining = card.games_remaining.saturating_sub(1).max(0);
}
