use crate::game::{
    stats::SkillBoost,
    types::{Position, SkillRole, StatLine},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable player card shared by every owner.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CardTemplate {
    pub id: i32,
    pub player_name: String,
    pub position: Position,
    #[serde(flatten)]
    pub stats: StatLine,
    #[serde(default)]
    pub base_ovr: i32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SkillTemplate {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub applicable_to_role: SkillRole,
}

/// Consumable that raises exactly one skill.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BoostTemplate {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quality: Option<String>,
    pub points_value: i32,
    pub target_skill_template_id: i32,
}

/// Consumable that extends a card's contract by a random number of games.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ContractTemplate {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quality: Option<String>,
    pub games_added_min: i32,
    pub games_added_max: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppliedSkill {
    pub skill_template_id: i32,
    pub skill_name: String,
    pub boost_points_added: i32,
    pub updated_at: DateTime<Utc>,
}

impl AppliedSkill {
    pub fn new(skill: &SkillTemplate) -> Self {
        AppliedSkill {
            skill_template_id: skill.id,
            skill_name: skill.name.clone(),
            boost_points_added: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn as_boost(&self) -> SkillBoost {
        SkillBoost {
            skill_name: self.skill_name.clone(),
            boost_points_added: self.boost_points_added,
        }
    }
}

/// One user's instance of a card template.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OwnedCard {
    pub id: Uuid,
    pub template_id: i32,
    pub owner_id: Uuid,
    pub current_level: u32,
    pub experience_points: u32,
    pub games_remaining: i32,
    pub renewals_left: i32,
    pub applied_skills: Vec<AppliedSkill>,
    pub acquired_at: DateTime<Utc>,
}

impl OwnedCard {
    pub fn new(owner_id: Uuid, template_id: i32, games_remaining: i32, renewals_left: i32) -> Self {
        OwnedCard {
            id: Uuid::new_v4(),
            template_id,
            owner_id,
            current_level: 1,
            experience_points: 0,
            games_remaining,
            renewals_left,
            applied_skills: Vec::new(),
            acquired_at: Utc::now(),
        }
    }

    pub fn skill(&self, skill_template_id: i32) -> Option<&AppliedSkill> {
        self.applied_skills
            .iter()
            .find(|s| s.skill_template_id == skill_template_id)
    }

    pub fn skill_boosts(&self) -> Vec<SkillBoost> {
        self.applied_skills.iter().map(AppliedSkill::as_boost).collect()
    }

    pub fn contract(&self) -> ContractState {
        ContractState {
            games_remaining: self.games_remaining,
            renewals_left: self.renewals_left,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ContractState {
    pub games_remaining: i32,
    pub renewals_left: i32,
}

impl ContractState {
    pub fn is_expired(&self) -> bool {
        self.games_remaining <= 0
    }
}
