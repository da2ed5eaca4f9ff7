use std::fmt;

use strum::{Display, EnumIter};

/// Unique identifier for a user, human or AI controlled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{}", self.0)
    }
}

/// Unique identifier for a battle aggregate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleId(pub u64);

impl fmt::Display for BattleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

/// The flavor of an encounter. Rewards and ledger bookkeeping differ per type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleType {
    /// Matched fight against an AI opponent; no history ledger entry.
    Arena,
    /// Friendly fight between users; no lasting rewards or penalties.
    Sparring,
    /// Full PvP combat with rewards, penalties, and encounter history.
    Combat,
    /// Scripted event encounter.
    Event,
}

/// The four combat schools every offence/defence stat block spans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatSchool {
    Ninjutsu,
    Genjutsu,
    Taijutsu,
    Bukijutsu,
}

/// General attributes, tracked for post-battle reward computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum General {
    Strength,
    Intelligence,
    Willpower,
    Speed,
}

impl CombatSchool {
    /// The general attribute a school trains when used.
    pub fn general(self) -> General {
        match self {
            CombatSchool::Ninjutsu => General::Intelligence,
            CombatSchool::Genjutsu => General::Willpower,
            CombatSchool::Taijutsu => General::Speed,
            CombatSchool::Bukijutsu => General::Strength,
        }
    }
}

/// Consumable pools a combatant spends and loses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PoolKind {
    Health,
    Chakra,
    Stamina,
}

/// Discrete battle grid coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub longitude: i32,
    pub latitude: i32,
}

impl Position {
    pub const fn new(longitude: i32, latitude: i32) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.longitude, self.latitude)
    }
}

/// Offence or defence values across the four combat schools.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchoolStats {
    pub ninjutsu: i32,
    pub genjutsu: i32,
    pub taijutsu: i32,
    pub bukijutsu: i32,
}

impl SchoolStats {
    pub const fn new(ninjutsu: i32, genjutsu: i32, taijutsu: i32, bukijutsu: i32) -> Self {
        Self {
            ninjutsu,
            genjutsu,
            taijutsu,
            bukijutsu,
        }
    }

    pub fn get(&self, school: CombatSchool) -> i32 {
        match school {
            CombatSchool::Ninjutsu => self.ninjutsu,
            CombatSchool::Genjutsu => self.genjutsu,
            CombatSchool::Taijutsu => self.taijutsu,
            CombatSchool::Bukijutsu => self.bukijutsu,
        }
    }

    pub fn set(&mut self, school: CombatSchool, value: i32) {
        match school {
            CombatSchool::Ninjutsu => self.ninjutsu = value,
            CombatSchool::Genjutsu => self.genjutsu = value,
            CombatSchool::Taijutsu => self.taijutsu = value,
            CombatSchool::Bukijutsu => self.bukijutsu = value,
        }
    }

    /// The highest value across all schools.
    pub fn highest(&self) -> i32 {
        self.ninjutsu
            .max(self.genjutsu)
            .max(self.taijutsu)
            .max(self.bukijutsu)
    }

    /// The school holding the highest value, ties broken in declaration order.
    pub fn highest_school(&self) -> CombatSchool {
        use strum::IntoEnumIterator;
        let mut best = CombatSchool::Ninjutsu;
        for school in CombatSchool::iter() {
            if self.get(school) > self.get(best) {
                best = school;
            }
        }
        best
    }
}

/// General attribute values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Generals {
    pub strength: i32,
    pub intelligence: i32,
    pub willpower: i32,
    pub speed: i32,
}

impl Generals {
    pub const fn new(strength: i32, intelligence: i32, willpower: i32, speed: i32) -> Self {
        Self {
            strength,
            intelligence,
            willpower,
            speed,
        }
    }

    pub fn get(&self, general: General) -> i32 {
        match general {
            General::Strength => self.strength,
            General::Intelligence => self.intelligence,
            General::Willpower => self.willpower,
            General::Speed => self.speed,
        }
    }
}
