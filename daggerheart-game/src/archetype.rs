//! Player-facing role archetypes and the heuristics tables they drive.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::classes::{ClassId, SubclassId};
use crate::error::CharacterError;
use crate::progression::Advancement;
use crate::traits::Trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Tank,
    Damage,
    Sneaky,
    Support,
    Healer,
    Face,
    Control,
}

/// What a caller asked for: a named archetype or a uniform wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchetypeRequest {
    Named(Archetype),
    /// `Random`, `Any` or an empty label.
    Random,
}

impl ArchetypeRequest {
    /// Parse a raw archetype label; matching ignores case and surrounding
    /// whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`CharacterError::UnknownArchetype`] when the label is neither
    /// one of the seven archetypes nor a wildcard.
    pub fn parse(label: &str) -> Result<Self, CharacterError> {
        let trimmed = label.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("random")
            || trimmed.eq_ignore_ascii_case("any")
        {
            return Ok(Self::Random);
        }
        trimmed
            .parse::<Archetype>()
            .map(Self::Named)
            .map_err(|_| CharacterError::UnknownArchetype(trimmed.to_string()))
    }

    #[must_use]
    pub const fn named(self) -> Option<Archetype> {
        match self {
            Self::Named(archetype) => Some(archetype),
            Self::Random => None,
        }
    }
}

impl From<Archetype> for ArchetypeRequest {
    fn from(archetype: Archetype) -> Self {
        Self::Named(archetype)
    }
}

/// Archetype-specific starting gear suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquipmentOptions {
    pub weapons: &'static [&'static str],
    pub armor: &'static [&'static str],
    pub shield: Option<&'static str>,
}

impl Archetype {
    pub const ALL: [Self; 7] = [
        Self::Tank,
        Self::Damage,
        Self::Sneaky,
        Self::Support,
        Self::Healer,
        Self::Face,
        Self::Control,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tank => "Tank",
            Self::Damage => "Damage",
            Self::Sneaky => "Sneaky",
            Self::Support => "Support",
            Self::Healer => "Healer",
            Self::Face => "Face",
            Self::Control => "Control",
        }
    }

    /// Classes favoured by this archetype; each is weighted 3x a secondary.
    #[must_use]
    pub const fn primary_classes(self) -> &'static [ClassId] {
        match self {
            Self::Tank => &[ClassId::Guardian, ClassId::Warrior],
            Self::Damage => &[ClassId::Warrior, ClassId::Rogue],
            Self::Sneaky => &[ClassId::Rogue, ClassId::Ranger],
            Self::Support => &[ClassId::Seraph, ClassId::Bard, ClassId::Druid],
            Self::Healer => &[ClassId::Seraph, ClassId::Druid],
            Self::Face => &[ClassId::Bard],
            Self::Control => &[ClassId::Wizard, ClassId::Druid],
        }
    }

    #[must_use]
    pub const fn secondary_classes(self) -> &'static [ClassId] {
        match self {
            Self::Tank | Self::Sneaky => &[],
            Self::Damage => &[ClassId::Ranger, ClassId::Sorcerer],
            Self::Support => &[ClassId::Wizard],
            Self::Healer => &[ClassId::Bard],
            Self::Face => &[ClassId::Rogue, ClassId::Seraph],
            Self::Control => &[ClassId::Sorcerer],
        }
    }

    /// The subclass that best fits this archetype for `class`, if one is named.
    #[must_use]
    pub const fn preferred_subclass(self, class: ClassId) -> Option<SubclassId> {
        let subclass = match (self, class) {
            (Self::Tank, ClassId::Guardian) => SubclassId::Stalwart,
            (Self::Tank, ClassId::Warrior) => SubclassId::CallOfTheBrave,
            (Self::Damage, ClassId::Warrior) => SubclassId::CallOfTheSlayer,
            (Self::Damage | Self::Sneaky, ClassId::Rogue) => SubclassId::Nightwalker,
            (Self::Damage | Self::Sneaky, ClassId::Ranger) => SubclassId::Wayfinder,
            (Self::Damage, ClassId::Sorcerer) => SubclassId::ElementalOrigin,
            (Self::Support | Self::Healer | Self::Face, ClassId::Seraph) => {
                SubclassId::DivineWielder
            }
            (Self::Support | Self::Healer, ClassId::Bard) => SubclassId::Troubadour,
            (Self::Support | Self::Healer, ClassId::Druid) => SubclassId::WardenOfRenewal,
            (Self::Support, ClassId::Wizard) => SubclassId::SchoolOfKnowledge,
            (Self::Face, ClassId::Bard) => SubclassId::Wordsmith,
            (Self::Face, ClassId::Rogue) => SubclassId::Syndicate,
            (Self::Control, ClassId::Wizard) => SubclassId::SchoolOfWar,
            (Self::Control, ClassId::Druid) => SubclassId::WardenOfTheElements,
            (Self::Control, ClassId::Sorcerer) => SubclassId::PrimalOrigin,
            _ => return None,
        };
        Some(subclass)
    }

    /// Total ordering of the six traits, most important first.
    #[must_use]
    pub const fn trait_priorities(self) -> [Trait; 6] {
        use Trait::{Agility, Finesse, Instinct, Knowledge, Presence, Strength};
        match self {
            Self::Tank => [Strength, Instinct, Agility, Finesse, Presence, Knowledge],
            Self::Damage => [Strength, Finesse, Agility, Instinct, Presence, Knowledge],
            Self::Sneaky => [Finesse, Agility, Instinct, Presence, Knowledge, Strength],
            Self::Support => [Presence, Knowledge, Instinct, Agility, Finesse, Strength],
            Self::Healer => [Presence, Instinct, Knowledge, Agility, Finesse, Strength],
            Self::Face => [Presence, Finesse, Agility, Knowledge, Instinct, Strength],
            Self::Control => [Knowledge, Instinct, Presence, Finesse, Agility, Strength],
        }
    }

    /// Phrase stems for the two starting experiences.
    #[must_use]
    pub const fn experience_themes(self) -> [&'static str; 2] {
        match self {
            Self::Tank => ["Bulwark", "Defender"],
            Self::Damage => ["Slayer", "Weapon Master"],
            Self::Sneaky => ["Shadow Dweller", "Master of Disguise"],
            Self::Support => ["Inspirational Leader", "Tactical Advisor"],
            Self::Healer => ["Field Medic", "Spiritual Healer"],
            Self::Face => ["Silver Tongue", "Charming Performer"],
            Self::Control => ["Arcane Scholar", "Battlefield Manipulator"],
        }
    }

    /// Lowercase substrings counted in card descriptions to score synergy.
    #[must_use]
    pub const fn card_keywords(self) -> &'static [&'static str] {
        match self {
            Self::Tank => &["damage", "reduce", "shield", "armor", "threshold", "hp"],
            Self::Damage => &["damage", "bonus", "attack", "weapon", "proficiency"],
            Self::Sneaky => &["stealth", "shadow", "hidden", "cloak", "invisibility"],
            Self::Support => &["ally", "hope", "gain", "inspire", "help"],
            Self::Healer => &["heal", "hit point", "restore", "regenerate", "revive"],
            Self::Face => &["charm", "deceive", "social", "persuade", "charisma"],
            Self::Control => &["control", "manipulate", "move", "stun", "restrain"],
        }
    }

    /// Weighted level-up menu; two distinct entries are drawn each level.
    #[must_use]
    pub const fn advancement_menu(self) -> &'static [(Advancement, u32)] {
        use Advancement::{
            ExtraDomainCard, GainExperience, GainHitPoint, GainStress, IncreaseEvasion,
            IncreaseTraits,
        };
        match self {
            Self::Tank => &[
                (GainHitPoint, 3),
                (IncreaseEvasion, 2),
                (ExtraDomainCard, 2),
                (IncreaseTraits, 1),
                (GainStress, 1),
            ],
            Self::Damage => &[
                (IncreaseTraits, 3),
                (ExtraDomainCard, 2),
                (GainHitPoint, 1),
                (GainStress, 1),
            ],
            Self::Sneaky => &[
                (IncreaseTraits, 3),
                (IncreaseEvasion, 3),
                (ExtraDomainCard, 1),
                (GainStress, 1),
            ],
            Self::Support => &[
                (ExtraDomainCard, 3),
                (IncreaseTraits, 2),
                (GainExperience, 2),
                (GainStress, 1),
            ],
            Self::Healer => &[
                (ExtraDomainCard, 3),
                (GainExperience, 2),
                (IncreaseTraits, 1),
                (GainHitPoint, 1),
            ],
            Self::Face => &[
                (IncreaseTraits, 3),
                (GainExperience, 3),
                (ExtraDomainCard, 1),
                (GainStress, 1),
            ],
            Self::Control => &[
                (ExtraDomainCard, 3),
                (GainExperience, 2),
                (IncreaseTraits, 2),
                (GainStress, 1),
            ],
        }
    }

    /// Coarse starting-gear suggestions, named after Tier 1 catalog items.
    #[must_use]
    pub const fn equipment_options(self) -> EquipmentOptions {
        match self {
            Self::Tank => EquipmentOptions {
                weapons: &["Longsword", "Warhammer", "Mace"],
                armor: &["Chainmail Armor", "Full Plate Armor"],
                shield: Some("Tower Shield"),
            },
            Self::Damage => EquipmentOptions {
                weapons: &["Greatsword", "Battleaxe", "Longbow", "Broadsword"],
                armor: &["Leather Armor", "Chainmail Armor"],
                shield: None,
            },
            Self::Sneaky => EquipmentOptions {
                weapons: &["Dagger", "Shortbow", "Rapier"],
                armor: &["Gambeson Armor", "Leather Armor"],
                shield: None,
            },
            Self::Support => EquipmentOptions {
                weapons: &["Shortstaff", "Scepter", "Hallowed Axe"],
                armor: &["Gambeson Armor", "Leather Armor"],
                shield: None,
            },
            Self::Healer => EquipmentOptions {
                weapons: &["Shortstaff", "Mace", "Hand Runes"],
                armor: &["Gambeson Armor", "Leather Armor"],
                shield: None,
            },
            Self::Face => EquipmentOptions {
                weapons: &["Rapier", "Dagger", "Cutlass"],
                armor: &["Gambeson Armor", "Leather Armor"],
                shield: None,
            },
            Self::Control => EquipmentOptions {
                weapons: &["Greatstaff", "Wand", "Dualstaff"],
                armor: &["Gambeson Armor", "Leather Armor"],
                shield: None,
            },
        }
    }

    /// Archetype a class most naturally plays: the first archetype listing it
    /// as primary, else the first listing it as secondary.
    #[must_use]
    pub fn infer_from_class(class: ClassId) -> Self {
        Self::ALL
            .into_iter()
            .find(|a| a.primary_classes().contains(&class))
            .or_else(|| {
                Self::ALL
                    .into_iter()
                    .find(|a| a.secondary_classes().contains(&class))
            })
            .unwrap_or(Self::Damage)
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Archetype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| needle.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcards_parse_as_random() {
        for label in ["", "  ", "Random", "any", "ANY"] {
            assert_eq!(ArchetypeRequest::parse(label).unwrap(), ArchetypeRequest::Random);
        }
    }

    #[test]
    fn labels_normalize_case() {
        assert_eq!(
            ArchetypeRequest::parse("tank").unwrap(),
            ArchetypeRequest::Named(Archetype::Tank)
        );
        assert_eq!(
            ArchetypeRequest::parse(" CONTROL ").unwrap(),
            ArchetypeRequest::Named(Archetype::Control)
        );
    }

    #[test]
    fn unknown_label_is_invalid_argument() {
        let err = ArchetypeRequest::parse("Berserker").unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(matches!(err, CharacterError::UnknownArchetype(label) if label == "Berserker"));
    }

    #[test]
    fn trait_priorities_are_permutations() {
        for archetype in Archetype::ALL {
            let mut order = archetype.trait_priorities().to_vec();
            order.sort();
            assert_eq!(order, Trait::ALL.to_vec(), "{archetype}");
        }
    }

    #[test]
    fn preferred_subclasses_belong_to_their_class() {
        for archetype in Archetype::ALL {
            for class in archetype
                .primary_classes()
                .iter()
                .chain(archetype.secondary_classes())
            {
                let subclass = archetype
                    .preferred_subclass(*class)
                    .expect("every listed class has a preferred subclass");
                assert_eq!(subclass.class(), *class);
            }
        }
    }

    #[test]
    fn every_class_infers_an_archetype() {
        assert_eq!(Archetype::infer_from_class(ClassId::Guardian), Archetype::Tank);
        assert_eq!(Archetype::infer_from_class(ClassId::Rogue), Archetype::Damage);
        assert_eq!(Archetype::infer_from_class(ClassId::Ranger), Archetype::Sneaky);
        assert_eq!(Archetype::infer_from_class(ClassId::Wizard), Archetype::Control);
        assert_eq!(Archetype::infer_from_class(ClassId::Sorcerer), Archetype::Damage);
    }

    #[test]
    fn advancement_menus_offer_at_least_two_actions() {
        for archetype in Archetype::ALL {
            let menu = archetype.advancement_menu();
            assert!(menu.len() >= 2, "{archetype}");
            assert!(menu.iter().all(|(_, weight)| *weight > 0));
        }
    }
}
