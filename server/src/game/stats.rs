//! Stat engine: base attributes + applied skills → modified stats → OVR.

use crate::game::types::{ModifiedStats, Position, Stat, StatLine, Tier};
use serde::{Deserialize, Serialize};

/// Skill name → attributes it raises. Fixed for the lifetime of the game.
pub const SKILL_EFFECTS: [(&str, &[Stat]); 8] = [
    ("Shot", &[Stat::Shooting, Stat::Attack]),
    ("Pass", &[Stat::Passing]),
    ("Skate", &[Stat::Speed, Stat::Skating]),
    ("Stick Handle", &[Stat::PuckControl]),
    ("Defend", &[Stat::Defense, Stat::DefenseSkill]),
    ("Reaction", &[Stat::Reflexes]),
    ("Recovery", &[Stat::Stamina]),
    ("Hands", &[Stat::PuckControl]),
];

const GOALTENDER_OVR_STATS: [Stat; 5] = [
    Stat::Reflexes,
    Stat::PuckControl,
    Stat::Positioning,
    Stat::Stamina,
    Stat::Speed,
];

const SKATER_OVR_STATS: [Stat; 10] = [
    Stat::Skating,
    Stat::Shooting,
    Stat::Passing,
    Stat::DefenseSkill,
    Stat::Physical,
    Stat::PuckControl,
    Stat::Attack,
    Stat::Defense,
    Stat::Speed,
    Stat::Stamina,
];

/// Minimal view of an applied skill the engine needs.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SkillBoost {
    pub skill_name: String,
    #[serde(default)]
    pub boost_points_added: i32,
}

/// Attributes raised by `skill_name`, or `None` for an unknown skill.
pub fn affected_stats(skill_name: &str) -> Option<&'static [Stat]> {
    SKILL_EFFECTS
        .iter()
        .find(|(name, _)| *name == skill_name)
        .map(|(_, stats)| *stats)
}

/// Attributes averaged into the overall rating for a position.
pub fn ovr_stats(position: Position) -> &'static [Stat] {
    match position {
        Position::Goaltender => &GOALTENDER_OVR_STATS,
        Position::Forward | Position::Defenseman => &SKATER_OVR_STATS,
    }
}

/// Role-weighted average of `stats`, rounded half up. 0 if nothing contributes.
pub fn overall_rating(stats: &StatLine, position: Position) -> i32 {
    let relevant = ovr_stats(position);
    if relevant.is_empty() {
        return 0;
    }
    let sum: i64 = relevant.iter().map(|s| i64::from(stats.get(*s))).sum();
    let avg = sum as f64 / relevant.len() as f64;
    (avg + 0.5).floor() as i32
}

/// Fold every applied skill into the base attributes and recompute OVR.
///
/// Unknown skills and non-positive boosts contribute nothing. Duplicate skill
/// names are not merged; each record adds its own boost.
pub fn compute_modified_stats<'a, I>(base: &StatLine, position: Position, skills: I) -> ModifiedStats
where
    I: IntoIterator<Item = &'a SkillBoost>,
{
    let mut stats = *base;
    for skill in skills {
        if skill.boost_points_added <= 0 {
            continue;
        }
        let Some(targets) = affected_stats(&skill.skill_name) else {
            continue;
        };
        for stat in targets {
            let v = stats.get_mut(*stat);
            *v = v.saturating_add(skill.boost_points_added);
        }
    }

    ModifiedStats {
        current_ovr: overall_rating(&stats, position),
        stats,
    }
}

impl Tier {
    pub fn from_ovr(ovr: i32) -> Self {
        match ovr {
            95.. => Tier::Legendary,
            90..=94 => Tier::Epic,
            75..=89 => Tier::Gold,
            55..=74 => Tier::Silver,
            _ => Tier::Bronze,
        }
    }
}
