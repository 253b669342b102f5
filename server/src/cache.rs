//! In-memory catalogue of static templates.
//!
//! Card, skill, boost, contract and impact-card templates never change while
//! the server runs, so they are loaded once at start-up (from `CATALOG_PATH`
//! or the built-in default) and served from here.

use crate::game::{
    battle::{ImpactCardTemplate, ItemEffect},
    card::{BoostTemplate, CardTemplate, ContractTemplate, SkillTemplate},
    types::{Position, SkillRole, StatLine},
};
use anyhow::Context;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk shape of the catalogue file.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct CatalogueFile {
    #[serde(default)]
    pub cards: Vec<CardTemplate>,
    #[serde(default)]
    pub skills: Vec<SkillTemplate>,
    #[serde(default)]
    pub boosts: Vec<BoostTemplate>,
    #[serde(default)]
    pub contracts: Vec<ContractTemplate>,
    #[serde(default)]
    pub impact_cards: Vec<ImpactCardTemplate>,
}

/// Template id → template, one map per kind.
#[derive(Debug, Default)]
pub struct Catalogue {
    pub cards: DashMap<i32, CardTemplate>,
    pub skills: DashMap<i32, SkillTemplate>,
    pub boosts: DashMap<i32, BoostTemplate>,
    pub contracts: DashMap<i32, ContractTemplate>,
    pub impact_cards: DashMap<i32, ImpactCardTemplate>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert every template from `file`. Idempotent. Boosts worth no points
    /// are dropped so skill accumulators never shrink.
    pub fn warm(&self, file: CatalogueFile) {
        for t in file.cards {
            self.cards.insert(t.id, t);
        }
        for t in file.skills {
            self.skills.insert(t.id, t);
        }
        for t in file.boosts {
            if t.points_value <= 0 {
                log::warn!(
                    "skipping boost template {} ({}): points_value {} must be positive",
                    t.id,
                    t.name,
                    t.points_value
                );
                continue;
            }
            self.boosts.insert(t.id, t);
        }
        for t in file.contracts {
            self.contracts.insert(t.id, t);
        }
        for t in file.impact_cards {
            self.impact_cards.insert(t.id, t);
        }
    }

    pub fn from_file(file: CatalogueFile) -> Self {
        let c = Self::new();
        c.warm(file);
        c
    }

    pub fn card(&self, id: i32) -> Option<CardTemplate> {
        self.cards.get(&id).map(|e| e.value().clone())
    }

    pub fn skill(&self, id: i32) -> Option<SkillTemplate> {
        self.skills.get(&id).map(|e| e.value().clone())
    }

    pub fn boost(&self, id: i32) -> Option<BoostTemplate> {
        self.boosts.get(&id).map(|e| e.value().clone())
    }

    pub fn contract(&self, id: i32) -> Option<ContractTemplate> {
        self.contracts.get(&id).map(|e| e.value().clone())
    }

    pub fn impact_card(&self, id: i32) -> Option<ImpactCardTemplate> {
        self.impact_cards.get(&id).map(|e| e.value().clone())
    }

    pub fn all_cards(&self) -> Vec<CardTemplate> {
        let mut out: Vec<_> = self.cards.iter().map(|e| e.value().clone()).collect();
        out.sort_by_key(|t| t.id);
        out
    }

    /// Skill templates sorted by name.
    pub fn all_skills(&self) -> Vec<SkillTemplate> {
        let mut out: Vec<_> = self.skills.iter().map(|e| e.value().clone()).collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }
}

/// Read and parse a catalogue JSON file.
pub async fn load_file(path: &Path) -> anyhow::Result<CatalogueFile> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading catalogue {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing catalogue {}", path.display()))
}

/// Build the start-up catalogue, falling back to the default set if the file
/// cannot be used.
pub async fn warm_all(path: Option<&Path>) -> Catalogue {
    let file = match path {
        Some(p) => match load_file(p).await {
            Ok(f) => f,
            Err(e) => {
                log::warn!("catalogue warm-up failed, using defaults: {e:?}");
                default_catalogue()
            }
        },
        None => default_catalogue(),
    };
    let catalogue = Catalogue::from_file(file);
    log::info!(
        "catalogue ready: {} cards, {} skills, {} boosts, {} contracts, {} impact cards",
        catalogue.cards.len(),
        catalogue.skills.len(),
        catalogue.boosts.len(),
        catalogue.contracts.len(),
        catalogue.impact_cards.len()
    );
    catalogue
}

fn skater(id: i32, name: &str, position: Position, ovr: i32, s: [i32; 10]) -> CardTemplate {
    let [
        attack,
        defense,
        speed,
        stamina,
        skating,
        shooting,
        passing,
        defense_skill,
        physical,
        puck_control,
    ] = s;
    CardTemplate {
        id,
        player_name: name.into(),
        position,
        stats: StatLine {
            attack,
            defense,
            speed,
            stamina,
            skating,
            shooting,
            passing,
            defense_skill,
            physical,
            puck_control,
            ..StatLine::default()
        },
        base_ovr: ovr,
        description: None,
        image_url: None,
    }
}

fn goalie(id: i32, name: &str, ovr: i32, s: [i32; 5]) -> CardTemplate {
    let [reflexes, puck_control, positioning, stamina, speed] = s;
    CardTemplate {
        id,
        player_name: name.into(),
        position: Position::Goaltender,
        stats: StatLine {
            reflexes,
            puck_control,
            positioning,
            stamina,
            speed,
            ..StatLine::default()
        },
        base_ovr: ovr,
        description: None,
        image_url: None,
    }
}

fn skill(id: i32, name: &str, role: SkillRole) -> SkillTemplate {
    SkillTemplate {
        id,
        name: name.into(),
        description: None,
        applicable_to_role: role,
    }
}

/// Built-in catalogue: enough templates for starter packs plus one boost per
/// skill and a few consumables.
pub fn default_catalogue() -> CatalogueFile {
    use Position::{Defenseman, Forward};

    let cards = vec![
        skater(1, "Alex Rowan", Forward, 71, [70, 60, 85, 70, 85, 70, 65, 60, 65, 80]),
        skater(2, "Niko Haara", Forward, 75, [80, 58, 82, 74, 84, 81, 78, 57, 70, 86]),
        skater(3, "Sam Dubois", Forward, 66, [68, 55, 74, 66, 72, 70, 64, 54, 62, 75]),
        skater(4, "Jari Lind", Forward, 89, [94, 80, 92, 88, 93, 95, 90, 78, 86, 94]),
        skater(5, "Erik Vale", Defenseman, 72, [58, 84, 70, 78, 72, 60, 68, 86, 82, 62]),
        skater(6, "Mats Kerr", Defenseman, 68, [55, 80, 66, 75, 68, 56, 62, 82, 80, 56]),
        skater(7, "Owen Price", Defenseman, 57, [45, 70, 58, 64, 60, 44, 52, 70, 66, 41]),
        goalie(8, "Viktor Sand", 80, [86, 74, 82, 80, 78]),
        goalie(9, "Lukas Berg", 64, [70, 58, 66, 64, 62]),
    ];

    let skills = vec![
        skill(1, "Shot", SkillRole::Field),
        skill(2, "Pass", SkillRole::Field),
        skill(3, "Skate", SkillRole::All),
        skill(4, "Stick Handle", SkillRole::Field),
        skill(5, "Defend", SkillRole::Field),
        skill(6, "Reaction", SkillRole::Goaltender),
        skill(7, "Recovery", SkillRole::All),
        skill(8, "Hands", SkillRole::Field),
    ];

    let boosts = skills
        .iter()
        .map(|s| BoostTemplate {
            id: s.id,
            name: format!("{} Boost", s.name),
            description: None,
            quality: Some("common".into()),
            points_value: 5,
            target_skill_template_id: s.id,
        })
        .collect();

    let contracts = vec![
        ContractTemplate {
            id: 1,
            name: "Short Contract".into(),
            description: None,
            quality: Some("common".into()),
            games_added_min: 5,
            games_added_max: 10,
        },
        ContractTemplate {
            id: 2,
            name: "Long Contract".into(),
            description: None,
            quality: Some("rare".into()),
            games_added_min: 15,
            games_added_max: 25,
        },
    ];

    let impact_cards = vec![ImpactCardTemplate {
        id: 1,
        name: "Power Play".into(),
        description: Some("+10% shooting, +3 attack".into()),
        effects: vec![
            ItemEffect::StatBoost {
                stat_name: "shooting".into(),
                value_percent: Some(10.0),
                value_flat: None,
            },
            ItemEffect::StatBoost {
                stat_name: "attack".into(),
                value_percent: None,
                value_flat: Some(3),
            },
        ],
    }];

    CatalogueFile {
        cards,
        skills,
        boosts,
        contracts,
        impact_cards,
    }
}
