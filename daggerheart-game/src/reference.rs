//! The reference dataset every generator reads from.
//!
//! Ancestries, communities, the domain card compendium and the Tier 1
//! equipment catalogs are external JSON tables. They are parsed once by a
//! [`ReferenceLoader`], validated, and then shared read-only. Class and
//! subclass tables are closed enums in [`crate::classes`] instead.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::archetype::{Archetype, EquipmentOptions};
use crate::classes::{ClassId, Domain, SubclassId};
use crate::domain_cards::{CardType, DomainCard};
use crate::equipment::{Armor, Weapon, WeaponCatalog};
use crate::heritage::{Ancestry, Community};
use crate::traits::{Trait, TraitScores};

const DEFAULT_ANCESTRIES: &str = include_str!("../assets/data/ancestries.json");
const DEFAULT_COMMUNITIES: &str = include_str!("../assets/data/communities.json");
const DEFAULT_DOMAIN_CARDS: &str = include_str!("../assets/data/domain_cards.json");
const DEFAULT_WEAPONS: &str = include_str!("../assets/data/weapons.json");
const DEFAULT_ARMOR: &str = include_str!("../assets/data/armor.json");

/// Failures while loading or validating the dataset. Any of these is fatal
/// at startup.
#[derive(Debug, Error)]
pub enum ReferenceDataError {
    #[error("reference table '{name}' not found at {}", path.display())]
    Missing { name: &'static str, path: PathBuf },
    #[error("failed to read reference table '{name}': {source}")]
    Io {
        name: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse reference table '{name}': {source}")]
    Parse {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("reference table '{name}' is empty")]
    Empty { name: &'static str },
    #[error("domain card '{card}' names unknown domain '{domain}'")]
    UnknownDomain { card: String, domain: String },
}

/// The five JSON tables that make up a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Ancestries,
    Communities,
    DomainCards,
    Weapons,
    Armor,
}

impl Table {
    pub const ALL: [Self; 5] = [
        Self::Ancestries,
        Self::Communities,
        Self::DomainCards,
        Self::Weapons,
        Self::Armor,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ancestries => "ancestries",
            Self::Communities => "communities",
            Self::DomainCards => "domain_cards",
            Self::Weapons => "weapons",
            Self::Armor => "armor",
        }
    }

    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Ancestries => "ancestries.json",
            Self::Communities => "communities.json",
            Self::DomainCards => "domain_cards.json",
            Self::Weapons => "weapons.json",
            Self::Armor => "armor.json",
        }
    }
}

/// Source of the raw reference tables.
///
/// Implementations only provide the JSON text; parsing and validation are
/// shared through [`ReferenceLoader::load`].
pub trait ReferenceLoader {
    /// Raw JSON for one table.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is missing or cannot be read.
    fn read_table(&self, table: Table) -> Result<Cow<'static, str>, ReferenceDataError>;

    /// Human-readable description of where the tables come from.
    fn source(&self) -> String;

    /// Read, parse and validate every table.
    ///
    /// # Errors
    ///
    /// Returns the first read, parse or validation failure.
    fn load(&self) -> Result<ReferenceData, ReferenceDataError> {
        let ancestries = parse_table(Table::Ancestries, &self.read_table(Table::Ancestries)?)?;
        let communities = parse_table(Table::Communities, &self.read_table(Table::Communities)?)?;
        let raw_cards: Vec<RawDomainCard> =
            parse_table(Table::DomainCards, &self.read_table(Table::DomainCards)?)?;
        let domain_cards = raw_cards
            .into_iter()
            .map(RawDomainCard::resolve)
            .collect::<Result<Vec<_>, _>>()?;
        let weapons = parse_table(Table::Weapons, &self.read_table(Table::Weapons)?)?;
        let armor = parse_table(Table::Armor, &self.read_table(Table::Armor)?)?;
        ReferenceData::new(ancestries, communities, domain_cards, weapons, armor)
    }
}

/// The dataset compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticReferenceLoader;

impl ReferenceLoader for StaticReferenceLoader {
    fn read_table(&self, table: Table) -> Result<Cow<'static, str>, ReferenceDataError> {
        let text = match table {
            Table::Ancestries => DEFAULT_ANCESTRIES,
            Table::Communities => DEFAULT_COMMUNITIES,
            Table::DomainCards => DEFAULT_DOMAIN_CARDS,
            Table::Weapons => DEFAULT_WEAPONS,
            Table::Armor => DEFAULT_ARMOR,
        };
        Ok(Cow::Borrowed(text))
    }

    fn source(&self) -> String {
        "embedded dataset".to_string()
    }
}

/// Tables read from `<root>/<table>.json` on disk.
#[derive(Debug, Clone)]
pub struct DirectoryReferenceLoader {
    root: PathBuf,
}

impl DirectoryReferenceLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ReferenceLoader for DirectoryReferenceLoader {
    fn read_table(&self, table: Table) -> Result<Cow<'static, str>, ReferenceDataError> {
        let path = self.root.join(table.file_name());
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Cow::Owned(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(ReferenceDataError::Missing {
                name: table.name(),
                path,
            }),
            Err(source) => Err(ReferenceDataError::Io {
                name: table.name(),
                source,
            }),
        }
    }

    fn source(&self) -> String {
        self.root.display().to_string()
    }
}

fn parse_table<T: DeserializeOwned>(table: Table, text: &str) -> Result<T, ReferenceDataError> {
    serde_json::from_str(text).map_err(|source| ReferenceDataError::Parse {
        name: table.name(),
        source,
    })
}

/// Card as stored on disk; the domain is checked against the closed set
/// after parsing so a typo names the offending card.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDomainCard {
    name: String,
    domain: String,
    level: u8,
    #[serde(rename = "type")]
    card_type: CardType,
    recall_cost: u8,
    description: String,
}

impl RawDomainCard {
    fn resolve(self) -> Result<DomainCard, ReferenceDataError> {
        let Ok(domain) = self.domain.parse::<Domain>() else {
            return Err(ReferenceDataError::UnknownDomain {
                card: self.name,
                domain: self.domain,
            });
        };
        Ok(DomainCard {
            name: self.name,
            domain,
            level: self.level,
            card_type: self.card_type,
            recall_cost: self.recall_cost,
            description: self.description,
        })
    }
}

/// Immutable lookup tables shared by every generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceData {
    ancestries: Vec<Ancestry>,
    communities: Vec<Community>,
    domain_cards: Vec<DomainCard>,
    weapons: WeaponCatalog,
    armor: Vec<Armor>,
}

impl ReferenceData {
    /// Assemble and validate a dataset.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceDataError::Empty`] when a required table has no
    /// entries.
    pub fn new(
        ancestries: Vec<Ancestry>,
        communities: Vec<Community>,
        domain_cards: Vec<DomainCard>,
        weapons: WeaponCatalog,
        armor: Vec<Armor>,
    ) -> Result<Self, ReferenceDataError> {
        let data = Self {
            ancestries,
            communities,
            domain_cards,
            weapons,
            armor,
        };
        data.validate()?;
        Ok(data)
    }

    /// Parse the dataset compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns an error only if the embedded assets are malformed.
    pub fn embedded() -> Result<Self, ReferenceDataError> {
        StaticReferenceLoader.load()
    }

    /// Reject tables the generators cannot draw from.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceDataError::Empty`] naming the first empty table.
    pub fn validate(&self) -> Result<(), ReferenceDataError> {
        let tables = [
            ("ancestries", self.ancestries.is_empty()),
            ("communities", self.communities.is_empty()),
            ("domain_cards", self.domain_cards.is_empty()),
            ("weapons", self.weapons.primary.is_empty()),
            ("armor", self.armor.is_empty()),
        ];
        match tables.into_iter().find(|(_, empty)| *empty) {
            Some((name, _)) => Err(ReferenceDataError::Empty { name }),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn ancestries(&self) -> &[Ancestry] {
        &self.ancestries
    }

    #[must_use]
    pub fn communities(&self) -> &[Community] {
        &self.communities
    }

    #[must_use]
    pub fn domain_cards(&self) -> &[DomainCard] {
        &self.domain_cards
    }

    #[must_use]
    pub fn primary_weapons(&self) -> &[Weapon] {
        &self.weapons.primary
    }

    #[must_use]
    pub fn secondary_weapons(&self) -> &[Weapon] {
        &self.weapons.secondary
    }

    #[must_use]
    pub fn armors(&self) -> &[Armor] {
        &self.armor
    }

    #[must_use]
    pub fn ancestry(&self, name: &str) -> Option<&Ancestry> {
        self.ancestries.iter().find(|a| a.name == name)
    }

    #[must_use]
    pub fn community(&self, name: &str) -> Option<&Community> {
        self.communities.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn domain_card(&self, name: &str) -> Option<&DomainCard> {
        self.domain_cards.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn primary_weapon(&self, name: &str) -> Option<&Weapon> {
        self.weapons.primary.iter().find(|w| w.name == name)
    }

    #[must_use]
    pub fn secondary_weapon(&self, name: &str) -> Option<&Weapon> {
        self.weapons.secondary.iter().find(|w| w.name == name)
    }

    #[must_use]
    pub fn armor(&self, name: &str) -> Option<&Armor> {
        self.armor.iter().find(|a| a.name == name)
    }

    #[must_use]
    pub fn list_ancestries(&self) -> Vec<&str> {
        self.ancestries.iter().map(|a| a.name.as_str()).collect()
    }

    #[must_use]
    pub fn list_communities(&self) -> Vec<&str> {
        self.communities.iter().map(|c| c.name.as_str()).collect()
    }

    /// Every card a class could hold at `level`, in compendium order.
    #[must_use]
    pub fn domain_cards_for(&self, class: ClassId, level: u8) -> Vec<&DomainCard> {
        self.domain_cards
            .iter()
            .filter(|card| card.available_to(class, level))
            .collect()
    }
}

// Accessors over the closed rules tables, for selection UIs.

#[must_use]
pub const fn list_classes() -> &'static [ClassId] {
    &ClassId::ALL
}

#[must_use]
pub const fn list_subclasses(class: ClassId) -> [SubclassId; 2] {
    class.subclasses()
}

#[must_use]
pub const fn list_archetypes() -> &'static [Archetype] {
    &Archetype::ALL
}

#[must_use]
pub const fn trait_priorities(archetype: Archetype) -> [Trait; 6] {
    archetype.trait_priorities()
}

#[must_use]
pub const fn equipment_options(archetype: Archetype) -> EquipmentOptions {
    archetype.equipment_options()
}

#[must_use]
pub const fn class_primary_trait(class: ClassId) -> Trait {
    class.info().primary_trait
}

/// Suggested allocation for a class: +2 on its primary trait, the rest of
/// the modifier array in canonical trait order.
#[must_use]
pub fn recommend_trait_allocation(class: ClassId) -> TraitScores {
    let primary = class_primary_trait(class);
    let order: Vec<Trait> = std::iter::once(primary)
        .chain(Trait::ALL.into_iter().filter(|t| *t != primary))
        .collect();
    TraitScores::from_priority(&order)
}
