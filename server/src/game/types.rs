use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};

/// Native position baked into a card template.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Forward,
    Defenseman,
    Goaltender,
}

impl Position {
    /// Role used when matching skills against this card.
    pub fn skill_role(self) -> SkillRole {
        match self {
            Position::Goaltender => SkillRole::Goaltender,
            Position::Forward | Position::Defenseman => SkillRole::Field,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::Forward => "Forward",
            Position::Defenseman => "Defenseman",
            Position::Goaltender => "Goaltender",
        };
        f.write_str(s)
    }
}

/// Which cards a skill template may be unlocked on.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SkillRole {
    Field,
    Goaltender,
    All,
}

impl SkillRole {
    pub fn accepts(self, position: Position) -> bool {
        self == SkillRole::All || self == position.skill_role()
    }
}

impl fmt::Display for SkillRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkillRole::Field => "Field",
            SkillRole::Goaltender => "Goaltender",
            SkillRole::All => "All",
        };
        f.write_str(s)
    }
}

/// The six roster slots, in display order.
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum FieldSlot {
    LW,
    C,
    RW,
    LD,
    RD,
    G,
}

impl FieldSlot {
    pub const ALL: [FieldSlot; 6] = [
        FieldSlot::LW,
        FieldSlot::C,
        FieldSlot::RW,
        FieldSlot::LD,
        FieldSlot::RD,
        FieldSlot::G,
    ];

    pub fn required_position(self) -> Position {
        match self {
            FieldSlot::LW | FieldSlot::C | FieldSlot::RW => Position::Forward,
            FieldSlot::LD | FieldSlot::RD => Position::Defenseman,
            FieldSlot::G => Position::Goaltender,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FieldSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The twelve card attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Attack,
    Defense,
    Speed,
    Stamina,
    Skating,
    Shooting,
    Passing,
    DefenseSkill,
    Physical,
    Reflexes,
    PuckControl,
    Positioning,
}

impl Stat {
    pub const ALL: [Stat; 12] = [
        Stat::Attack,
        Stat::Defense,
        Stat::Speed,
        Stat::Stamina,
        Stat::Skating,
        Stat::Shooting,
        Stat::Passing,
        Stat::DefenseSkill,
        Stat::Physical,
        Stat::Reflexes,
        Stat::PuckControl,
        Stat::Positioning,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stat::Attack => "attack",
            Stat::Defense => "defense",
            Stat::Speed => "speed",
            Stat::Stamina => "stamina",
            Stat::Skating => "skating",
            Stat::Shooting => "shooting",
            Stat::Passing => "passing",
            Stat::DefenseSkill => "defense_skill",
            Stat::Physical => "physical",
            Stat::Reflexes => "reflexes",
            Stat::PuckControl => "puck_control",
            Stat::Positioning => "positioning",
        }
    }
}

impl FromStr for Stat {
    type Err = String;

    /// Accepts both `puck_control` and the stored `base_puck_control` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.strip_prefix("base_").unwrap_or(s);
        Stat::ALL
            .into_iter()
            .find(|stat| stat.name() == key)
            .ok_or_else(|| format!("unknown stat `{s}`"))
    }
}

/// Missing or non-numeric values become 0.
fn lenient_stat<'de, D>(de: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(de)?;
    Ok(v.as_i64()
        .or_else(|| v.as_f64().map(|f| f as i64))
        .map(|n| n.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
        .unwrap_or(0))
}

/// One value per attribute. Serialized with the `base_` keys used by the
/// card catalogue.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatLine {
    #[serde(rename = "base_attack", default, deserialize_with = "lenient_stat")]
    pub attack: i32,
    #[serde(rename = "base_defense", default, deserialize_with = "lenient_stat")]
    pub defense: i32,
    #[serde(rename = "base_speed", default, deserialize_with = "lenient_stat")]
    pub speed: i32,
    #[serde(rename = "base_stamina", default, deserialize_with = "lenient_stat")]
    pub stamina: i32,
    #[serde(rename = "base_skating", default, deserialize_with = "lenient_stat")]
    pub skating: i32,
    #[serde(rename = "base_shooting", default, deserialize_with = "lenient_stat")]
    pub shooting: i32,
    #[serde(rename = "base_passing", default, deserialize_with = "lenient_stat")]
    pub passing: i32,
    #[serde(rename = "base_defense_skill", default, deserialize_with = "lenient_stat")]
    pub defense_skill: i32,
    #[serde(rename = "base_physical", default, deserialize_with = "lenient_stat")]
    pub physical: i32,
    #[serde(rename = "base_reflexes", default, deserialize_with = "lenient_stat")]
    pub reflexes: i32,
    #[serde(rename = "base_puck_control", default, deserialize_with = "lenient_stat")]
    pub puck_control: i32,
    #[serde(rename = "base_positioning", default, deserialize_with = "lenient_stat")]
    pub positioning: i32,
}

impl StatLine {
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::Speed => self.speed,
            Stat::Stamina => self.stamina,
            Stat::Skating => self.skating,
            Stat::Shooting => self.shooting,
            Stat::Passing => self.passing,
            Stat::DefenseSkill => self.defense_skill,
            Stat::Physical => self.physical,
            Stat::Reflexes => self.reflexes,
            Stat::PuckControl => self.puck_control,
            Stat::Positioning => self.positioning,
        }
    }

    pub fn get_mut(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::Attack => &mut self.attack,
            Stat::Defense => &mut self.defense,
            Stat::Speed => &mut self.speed,
            Stat::Stamina => &mut self.stamina,
            Stat::Skating => &mut self.skating,
            Stat::Shooting => &mut self.shooting,
            Stat::Passing => &mut self.passing,
            Stat::DefenseSkill => &mut self.defense_skill,
            Stat::Physical => &mut self.physical,
            Stat::Reflexes => &mut self.reflexes,
            Stat::PuckControl => &mut self.puck_control,
            Stat::Positioning => &mut self.positioning,
        }
    }

    /// Apply `f` to every attribute.
    pub fn map(mut self, f: impl Fn(i32) -> i32) -> Self {
        for stat in Stat::ALL {
            let v = self.get_mut(stat);
            *v = f(*v);
        }
        self
    }
}

/// Attributes after skill boosts, plus the recomputed overall rating.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ModifiedStats {
    #[serde(flatten)]
    pub stats: StatLine,
    pub current_ovr: i32,
}

/// Presentation tier, derived from OVR.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Epic,
    Legendary,
}
