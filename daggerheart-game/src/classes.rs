//! Closed class, subclass and domain identities with their SRD tables.
//!
//! Class and subclass data is small and rules-fixed, so it lives here as
//! `const` tables keyed by enum rather than in the JSON dataset. An unknown
//! name is a parse error at the boundary instead of a map miss deep inside
//! generation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::traits::Trait;

/// The nine SRD domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Domain {
    Arcana,
    Blade,
    Bone,
    Codex,
    Grace,
    Midnight,
    Sage,
    Splendor,
    Valor,
}

impl Domain {
    pub const ALL: [Self; 9] = [
        Self::Arcana,
        Self::Blade,
        Self::Bone,
        Self::Codex,
        Self::Grace,
        Self::Midnight,
        Self::Sage,
        Self::Splendor,
        Self::Valor,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Arcana => "Arcana",
            Self::Blade => "Blade",
            Self::Bone => "Bone",
            Self::Codex => "Codex",
            Self::Grace => "Grace",
            Self::Midnight => "Midnight",
            Self::Sage => "Sage",
            Self::Splendor => "Splendor",
            Self::Valor => "Valor",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown domain '{needle}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClassId {
    Bard,
    Druid,
    Guardian,
    Ranger,
    Rogue,
    Seraph,
    Sorcerer,
    Warrior,
    Wizard,
}

/// Starting statistics and identity of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassInfo {
    pub id: ClassId,
    pub hp: i32,
    pub evasion: i32,
    pub domains: [Domain; 2],
    pub primary_trait: Trait,
    pub feature: &'static str,
    pub subclasses: [SubclassId; 2],
}

const BARD: ClassInfo = ClassInfo {
    id: ClassId::Bard,
    hp: 5,
    evasion: 10,
    domains: [Domain::Grace, Domain::Codex],
    primary_trait: Trait::Presence,
    feature: "Make a Scene: Spend 3 Hope to temporarily Distract a target within Close range, giving them a -2 penalty to their Difficulty.",
    subclasses: [SubclassId::Troubadour, SubclassId::Wordsmith],
};

const DRUID: ClassInfo = ClassInfo {
    id: ClassId::Druid,
    hp: 6,
    evasion: 10,
    domains: [Domain::Sage, Domain::Arcana],
    primary_trait: Trait::Instinct,
    feature: "Evolution: Spend 3 Hope to transform into Beastform without marking a Stress; raise one trait by +1 until you drop out of Beastform.",
    subclasses: [SubclassId::WardenOfTheElements, SubclassId::WardenOfRenewal],
};

const GUARDIAN: ClassInfo = ClassInfo {
    id: ClassId::Guardian,
    hp: 7,
    evasion: 9,
    domains: [Domain::Valor, Domain::Blade],
    primary_trait: Trait::Strength,
    feature: "Frontline Tank: Spend 3 Hope to clear 2 Armor Slots.",
    subclasses: [SubclassId::Stalwart, SubclassId::Vengeance],
};

const RANGER: ClassInfo = ClassInfo {
    id: ClassId::Ranger,
    hp: 6,
    evasion: 12,
    domains: [Domain::Bone, Domain::Sage],
    primary_trait: Trait::Agility,
    feature: "Hold Them Off: Spend 3 Hope when you succeed on an attack with a weapon to use that same roll against two additional adversaries within range.",
    subclasses: [SubclassId::Beastbound, SubclassId::Wayfinder],
};

const ROGUE: ClassInfo = ClassInfo {
    id: ClassId::Rogue,
    hp: 6,
    evasion: 12,
    domains: [Domain::Midnight, Domain::Grace],
    primary_trait: Trait::Finesse,
    feature: "Rogue's Dodge: Spend 3 Hope to gain a +2 bonus to your Evasion until the next time an attack succeeds against you.",
    subclasses: [SubclassId::Nightwalker, SubclassId::Syndicate],
};

const SERAPH: ClassInfo = ClassInfo {
    id: ClassId::Seraph,
    hp: 7,
    evasion: 9,
    domains: [Domain::Splendor, Domain::Valor],
    primary_trait: Trait::Strength,
    feature: "Life Support: Spend 3 Hope to clear a Hit Point on an ally within Close range.",
    subclasses: [SubclassId::DivineWielder, SubclassId::WingedSentinel],
};

const SORCERER: ClassInfo = ClassInfo {
    id: ClassId::Sorcerer,
    hp: 6,
    evasion: 10,
    domains: [Domain::Arcana, Domain::Midnight],
    primary_trait: Trait::Instinct,
    feature: "Volatile Magic: Spend 3 Hope to reroll any number of your damage dice on an attack that deals magic damage.",
    subclasses: [SubclassId::ElementalOrigin, SubclassId::PrimalOrigin],
};

const WARRIOR: ClassInfo = ClassInfo {
    id: ClassId::Warrior,
    hp: 6,
    evasion: 11,
    domains: [Domain::Blade, Domain::Bone],
    primary_trait: Trait::Strength,
    feature: "No Mercy: Spend 3 Hope to gain a +1 bonus to your attack rolls until your next rest.",
    subclasses: [SubclassId::CallOfTheBrave, SubclassId::CallOfTheSlayer],
};

const WIZARD: ClassInfo = ClassInfo {
    id: ClassId::Wizard,
    hp: 5,
    evasion: 11,
    domains: [Domain::Codex, Domain::Splendor],
    primary_trait: Trait::Knowledge,
    feature: "Not This Time: Spend 3 Hope to force an adversary within Far range to reroll an attack or damage roll.",
    subclasses: [SubclassId::SchoolOfKnowledge, SubclassId::SchoolOfWar],
};

impl ClassId {
    pub const ALL: [Self; 9] = [
        Self::Bard,
        Self::Druid,
        Self::Guardian,
        Self::Ranger,
        Self::Rogue,
        Self::Seraph,
        Self::Sorcerer,
        Self::Warrior,
        Self::Wizard,
    ];

    #[must_use]
    pub const fn info(self) -> &'static ClassInfo {
        match self {
            Self::Bard => &BARD,
            Self::Druid => &DRUID,
            Self::Guardian => &GUARDIAN,
            Self::Ranger => &RANGER,
            Self::Rogue => &ROGUE,
            Self::Seraph => &SERAPH,
            Self::Sorcerer => &SORCERER,
            Self::Warrior => &WARRIOR,
            Self::Wizard => &WIZARD,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bard => "Bard",
            Self::Druid => "Druid",
            Self::Guardian => "Guardian",
            Self::Ranger => "Ranger",
            Self::Rogue => "Rogue",
            Self::Seraph => "Seraph",
            Self::Sorcerer => "Sorcerer",
            Self::Warrior => "Warrior",
            Self::Wizard => "Wizard",
        }
    }

    #[must_use]
    pub const fn domains(self) -> [Domain; 2] {
        self.info().domains
    }

    #[must_use]
    pub const fn subclasses(self) -> [SubclassId; 2] {
        self.info().subclasses
    }

    #[must_use]
    pub fn has_domain(self, domain: Domain) -> bool {
        self.domains().contains(&domain)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for ClassId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| needle.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SubclassId {
    Troubadour,
    Wordsmith,
    #[serde(rename = "Warden of the Elements")]
    WardenOfTheElements,
    #[serde(rename = "Warden of Renewal")]
    WardenOfRenewal,
    Stalwart,
    Vengeance,
    Beastbound,
    Wayfinder,
    Nightwalker,
    Syndicate,
    #[serde(rename = "Divine Wielder")]
    DivineWielder,
    #[serde(rename = "Winged Sentinel")]
    WingedSentinel,
    #[serde(rename = "Elemental Origin")]
    ElementalOrigin,
    #[serde(rename = "Primal Origin")]
    PrimalOrigin,
    #[serde(rename = "Call of the Brave")]
    CallOfTheBrave,
    #[serde(rename = "Call of the Slayer")]
    CallOfTheSlayer,
    #[serde(rename = "School of Knowledge")]
    SchoolOfKnowledge,
    #[serde(rename = "School of War")]
    SchoolOfWar,
}

/// Spellcast trait and feature names of a subclass.
///
/// Feature effects are narrative; only the names are carried so a sheet can
/// show which upgrades were taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubclassInfo {
    pub id: SubclassId,
    pub class: ClassId,
    pub spellcast_trait: Trait,
    pub foundation: &'static str,
    pub specialization: &'static str,
    pub mastery: &'static str,
}

macro_rules! subclass {
    ($id:ident, $class:ident, $trait:ident, $foundation:expr, $spec:expr, $mastery:expr) => {
        SubclassInfo {
            id: SubclassId::$id,
            class: ClassId::$class,
            spellcast_trait: Trait::$trait,
            foundation: $foundation,
            specialization: $spec,
            mastery: $mastery,
        }
    };
}

static SUBCLASSES: [SubclassInfo; 18] = [
    subclass!(Troubadour, Bard, Presence, "Gifted Performer", "Well-Traveled", "Epic Poetry"),
    subclass!(Wordsmith, Bard, Presence, "Cutting Words", "Silver Tongue", "Master of Rhetoric"),
    subclass!(
        WardenOfTheElements,
        Druid,
        Instinct,
        "Elemental Incarnation",
        "Elemental Aura",
        "Elemental Dominion"
    ),
    subclass!(
        WardenOfRenewal,
        Druid,
        Instinct,
        "Regeneration",
        "Regenerative Reach",
        "Verdant Renewal"
    ),
    subclass!(Stalwart, Guardian, Strength, "Unwavering", "Unrelenting", "Immovable"),
    subclass!(Vengeance, Guardian, Strength, "At Ease", "Act of Reprisal", "Vengeful Spirit"),
    subclass!(Beastbound, Ranger, Agility, "Companion", "Coordinated Attack", "Inseparable"),
    subclass!(Wayfinder, Ranger, Agility, "Forager", "Hunter's Mark", "Master of the Hunt"),
    subclass!(Nightwalker, Rogue, Finesse, "Shadow Step", "Dark Cloud", "One with the Shadows"),
    subclass!(
        Syndicate,
        Rogue,
        Finesse,
        "Black Market Connections",
        "Contacts Everywhere",
        "Pulling Strings"
    ),
    subclass!(
        DivineWielder,
        Seraph,
        Strength,
        "Sparing Touch",
        "Devout",
        "Divine Intervention"
    ),
    subclass!(
        WingedSentinel,
        Seraph,
        Strength,
        "Wings of Light",
        "Ethereal Visage",
        "Ascendant"
    ),
    subclass!(
        ElementalOrigin,
        Sorcerer,
        Instinct,
        "Elementalist",
        "Natural Evasion",
        "Transcendence"
    ),
    subclass!(
        PrimalOrigin,
        Sorcerer,
        Instinct,
        "Manipulate Magic",
        "Enchanted Aid",
        "Arcane Charge"
    ),
    subclass!(
        CallOfTheBrave,
        Warrior,
        Strength,
        "Courage",
        "Rise to the Challenge",
        "Fearless"
    ),
    subclass!(
        CallOfTheSlayer,
        Warrior,
        Strength,
        "Slayer",
        "Weapon Specialist",
        "Unstoppable Carnage"
    ),
    subclass!(
        SchoolOfKnowledge,
        Wizard,
        Knowledge,
        "Prepared",
        "Accomplished",
        "Brilliant"
    ),
    subclass!(
        SchoolOfWar,
        Wizard,
        Knowledge,
        "Battlemage",
        "Conjure Shield",
        "Thrive in Chaos"
    ),
];

impl SubclassId {
    pub const ALL: [Self; 18] = [
        Self::Troubadour,
        Self::Wordsmith,
        Self::WardenOfTheElements,
        Self::WardenOfRenewal,
        Self::Stalwart,
        Self::Vengeance,
        Self::Beastbound,
        Self::Wayfinder,
        Self::Nightwalker,
        Self::Syndicate,
        Self::DivineWielder,
        Self::WingedSentinel,
        Self::ElementalOrigin,
        Self::PrimalOrigin,
        Self::CallOfTheBrave,
        Self::CallOfTheSlayer,
        Self::SchoolOfKnowledge,
        Self::SchoolOfWar,
    ];

    #[must_use]
    pub fn info(self) -> &'static SubclassInfo {
        // Declaration order of the enum matches the table.
        &SUBCLASSES[self as usize]
    }

    #[must_use]
    pub fn class(self) -> ClassId {
        self.info().class
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Troubadour => "Troubadour",
            Self::Wordsmith => "Wordsmith",
            Self::WardenOfTheElements => "Warden of the Elements",
            Self::WardenOfRenewal => "Warden of Renewal",
            Self::Stalwart => "Stalwart",
            Self::Vengeance => "Vengeance",
            Self::Beastbound => "Beastbound",
            Self::Wayfinder => "Wayfinder",
            Self::Nightwalker => "Nightwalker",
            Self::Syndicate => "Syndicate",
            Self::DivineWielder => "Divine Wielder",
            Self::WingedSentinel => "Winged Sentinel",
            Self::ElementalOrigin => "Elemental Origin",
            Self::PrimalOrigin => "Primal Origin",
            Self::CallOfTheBrave => "Call of the Brave",
            Self::CallOfTheSlayer => "Call of the Slayer",
            Self::SchoolOfKnowledge => "School of Knowledge",
            Self::SchoolOfWar => "School of War",
        }
    }
}

impl fmt::Display for SubclassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for SubclassId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|sc| sc.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| needle.to_string())
    }
}
