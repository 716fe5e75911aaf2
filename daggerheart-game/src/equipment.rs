//! Tier 1 weapons and armor, and the overlay that folds them into a sheet.
//!
//! Equipment never stacks: every application first restores the character's
//! unequipped values and then recomputes all equipment-derived fields from
//! the current selection.

use log::{debug, warn};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::archetype::Archetype;
use crate::character::Character;
use crate::constants::{SLOT_ARMOR, SLOT_PRIMARY, SLOT_SECONDARY};
use crate::reference::ReferenceData;
use crate::traits::Trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Range {
    Melee,
    #[serde(rename = "Very Close")]
    VeryClose,
    Close,
    Far,
    #[serde(rename = "Very Far")]
    VeryFar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    Physical,
    Magic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Burden {
    OneHanded,
    TwoHanded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Weapon {
    pub name: String,
    #[serde(rename = "trait")]
    pub attack_trait: Trait,
    pub range: Range,
    pub damage_die: u8,
    pub damage_bonus: i32,
    pub damage_type: DamageType,
    pub burden: Burden,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,
    #[serde(default)]
    pub evasion_mod: i32,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub trait_mods: BTreeMap<Trait, i32>,
    /// Armor Score added while wielded as a secondary (shields).
    #[serde(default)]
    pub armor_bonus: i32,
    /// Flat bonus added to the primary weapon's damage when paired.
    #[serde(default)]
    pub paired_bonus: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Armor {
    pub name: String,
    /// Minor and major damage thresholds before the level bonus.
    pub base_thresholds: (i32, i32),
    pub base_score: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,
    #[serde(default)]
    pub evasion_mod: i32,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub trait_mods: BTreeMap<Trait, i32>,
}

/// Tier 1 weapon tables keyed by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeaponCatalog {
    pub primary: Vec<Weapon>,
    #[serde(default)]
    pub secondary: Vec<Weapon>,
}

/// Item names for the three equipment slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentSelection {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub armor: Option<String>,
}

impl EquipmentSelection {
    /// The selection currently recorded on a character.
    #[must_use]
    pub fn from_character(character: &Character) -> Self {
        Self {
            primary: character.equipped(SLOT_PRIMARY).map(str::to_string),
            secondary: character.equipped(SLOT_SECONDARY).map(str::to_string),
            armor: character.equipped(SLOT_ARMOR).map(str::to_string),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.primary.is_none() && self.secondary.is_none() && self.armor.is_none()
    }

    /// Apply this selection with [`apply_equipment`].
    pub fn apply(&self, character: &mut Character, reference: &ReferenceData) {
        apply_equipment(
            character,
            reference,
            self.primary.as_deref(),
            self.secondary.as_deref(),
            self.armor.as_deref(),
        );
    }
}

/// Damage expression for a proficiency, die size and flat bonus.
#[must_use]
pub fn damage_roll(proficiency: i32, die: u8, bonus: i32) -> String {
    if bonus == 0 {
        format!("{proficiency}d{die}")
    } else {
        format!("{proficiency}d{die}{bonus:+}")
    }
}

/// Replace a character's equipment with the given selection.
///
/// HP, Evasion and traits go back to their unequipped values, the armor and
/// damage fields are cleared and the equipment map emptied; then each
/// recognized item folds its modifiers back in. Names are matched exactly.
/// An unknown name is still recorded in its slot but has no effect on stats.
pub fn apply_equipment(
    character: &mut Character,
    reference: &ReferenceData,
    primary: Option<&str>,
    secondary: Option<&str>,
    armor: Option<&str>,
) {
    character.reset_equipment();
    let level = i32::from(character.level);

    if let Some(name) = record_slot(character, SLOT_ARMOR, armor) {
        if let Some(item) = reference.armor(name) {
            let (minor, major) = item.base_thresholds;
            character.armor_thresholds = (minor + level, major + level);
            character.armor_score = item.base_score;
            character.evasion += item.evasion_mod;
            character.traits.apply_mods(&item.trait_mods);
        } else {
            warn!("unrecognized armor '{name}' has no effect");
        }
    }

    let mut attack: Option<(u8, i32)> = None;
    if let Some(name) = record_slot(character, SLOT_PRIMARY, primary) {
        if let Some(weapon) = reference.primary_weapon(name) {
            character.evasion += weapon.evasion_mod;
            character.traits.apply_mods(&weapon.trait_mods);
            attack = Some((weapon.damage_die, weapon.damage_bonus));
        } else {
            warn!("unrecognized primary weapon '{name}' has no effect");
        }
    }

    if let Some(name) = record_slot(character, SLOT_SECONDARY, secondary) {
        if let Some(weapon) = reference.secondary_weapon(name) {
            character.armor_score += weapon.armor_bonus;
            character.evasion += weapon.evasion_mod;
            character.traits.apply_mods(&weapon.trait_mods);
            if let Some((_, bonus)) = attack.as_mut() {
                *bonus += weapon.paired_bonus;
            }
        } else {
            warn!("unrecognized secondary weapon '{name}' has no effect");
        }
    }

    if let Some((die, bonus)) = attack {
        character.damage_roll = Some(damage_roll(character.proficiency, die, bonus));
    }
    debug!(
        "equipment applied: evasion {}, armor {:?} score {}, damage {:?}",
        character.evasion, character.armor_thresholds, character.armor_score, character.damage_roll
    );
}

fn record_slot<'a>(character: &mut Character, slot: &str, item: Option<&'a str>) -> Option<&'a str> {
    let name = item.filter(|name| !name.trim().is_empty())?;
    character.equipment.insert(slot.to_string(), name.to_string());
    Some(name)
}

/// Coarse starting gear for an archetype: one weapon and one armor drawn
/// uniformly from its option lists, plus its shield if it has one.
#[must_use]
pub fn choose_equipment<R>(archetype: Archetype, rng: &mut R) -> EquipmentSelection
where
    R: Rng + ?Sized,
{
    let options = archetype.equipment_options();
    EquipmentSelection {
        primary: options.weapons.choose(rng).map(|w| (*w).to_string()),
        secondary: options.shield.map(str::to_string),
        armor: options.armor.choose(rng).map(|a| (*a).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::{ClassId, SubclassId};
    use crate::traits::TraitScores;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn fresh() -> (ReferenceData, Character) {
        let reference = ReferenceData::embedded().unwrap();
        let mut character = Character::new(ClassId::Warrior, SubclassId::CallOfTheBrave);
        let traits = TraitScores::from_priority(&Archetype::Tank.trait_priorities());
        character.set_starting_traits(traits);
        (reference, character)
    }

    #[test]
    fn damage_roll_omits_zero_bonus() {
        assert_eq!(damage_roll(1, 8, 3), "1d8+3");
        assert_eq!(damage_roll(3, 10, 0), "3d10");
        assert_eq!(damage_roll(2, 6, -1), "2d6-1");
    }

    #[test]
    fn longsword_and_chainmail_on_fresh_character() {
        let (reference, mut character) = fresh();
        let base_evasion = character.base_evasion;
        apply_equipment(
            &mut character,
            &reference,
            Some("Longsword"),
            None,
            Some("Chainmail Armor"),
        );
        assert_eq!(character.damage_roll.as_deref(), Some("1d8+3"));
        assert_eq!(character.armor_thresholds, (8, 16));
        assert_eq!(character.armor_score, 4);
        assert_eq!(character.evasion, base_evasion - 1);
        assert_eq!(character.equipped(SLOT_PRIMARY), Some("Longsword"));
    }

    #[test]
    fn paired_secondary_stacks_onto_primary_bonus() {
        let (reference, mut character) = fresh();
        apply_equipment(&mut character, &reference, Some("Dagger"), Some("Shortsword"), None);
        assert_eq!(character.damage_roll.as_deref(), Some("1d8+3"));
    }

    #[test]
    fn shield_raises_armor_score_and_lowers_evasion() {
        let (reference, mut character) = fresh();
        let base_evasion = character.base_evasion;
        apply_equipment(
            &mut character,
            &reference,
            None,
            Some("Tower Shield"),
            Some("Leather Armor"),
        );
        assert_eq!(character.armor_score, 5);
        assert_eq!(character.evasion, base_evasion - 1);
        assert_eq!(character.damage_roll, None, "no primary, no damage roll");
    }

    #[test]
    fn reapplying_replaces_rather_than_stacks() {
        let (reference, mut character) = fresh();
        apply_equipment(
            &mut character,
            &reference,
            Some("Longbow"),
            None,
            Some("Full Plate Armor"),
        );
        apply_equipment(&mut character, &reference, Some("Rapier"), None, Some("Gambeson Armor"));

        let (_, mut once) = fresh();
        apply_equipment(&mut once, &reference, Some("Rapier"), None, Some("Gambeson Armor"));
        assert_eq!(character, once);
    }

    #[test]
    fn empty_selection_restores_base_values() {
        let (reference, mut character) = fresh();
        apply_equipment(
            &mut character,
            &reference,
            Some("Halberd"),
            Some("Round Shield"),
            Some("Full Plate Armor"),
        );
        assert_ne!(character.traits, character.base_traits);

        apply_equipment(&mut character, &reference, None, None, None);
        assert_eq!(character.hp, character.base_hp);
        assert_eq!(character.evasion, character.base_evasion);
        assert_eq!(character.traits, character.base_traits);
        assert!(character.equipment.is_empty());
        assert_eq!(character.armor_thresholds, (0, 0));
        assert_eq!(character.armor_score, 0);
        assert_eq!(character.damage_roll, None);
    }

    #[test]
    fn unknown_items_are_recorded_but_ignored() {
        let (reference, mut character) = fresh();
        let before_evasion = character.evasion;
        apply_equipment(&mut character, &reference, Some("Vorpal Blade"), Some(""), None);
        assert_eq!(character.equipped(SLOT_PRIMARY), Some("Vorpal Blade"));
        assert_eq!(character.equipped(SLOT_SECONDARY), None);
        assert_eq!(character.damage_roll, None);
        assert_eq!(character.evasion, before_evasion);
    }

    #[test]
    fn lookups_are_case_sensitive() {
        let (reference, mut character) = fresh();
        apply_equipment(&mut character, &reference, Some("longsword"), None, None);
        assert_eq!(character.damage_roll, None);
    }

    #[test]
    fn thresholds_track_current_level() {
        let (reference, mut character) = fresh();
        character.level = 4;
        apply_equipment(&mut character, &reference, None, None, Some("Leather Armor"));
        assert_eq!(character.armor_thresholds, (10, 17));
    }

    #[test]
    fn chooser_returns_catalog_items() {
        let reference = ReferenceData::embedded().unwrap();
        for archetype in Archetype::ALL {
            for seed in 0..20 {
                let mut rng = SmallRng::seed_from_u64(seed);
                let selection = choose_equipment(archetype, &mut rng);
                let primary = selection.primary.as_deref().unwrap();
                assert!(reference.primary_weapon(primary).is_some(), "{primary}");
                let armor = selection.armor.as_deref().unwrap();
                assert!(reference.armor(armor).is_some(), "{armor}");
                if let Some(shield) = selection.secondary.as_deref() {
                    assert!(reference.secondary_weapon(shield).is_some());
                }
            }
        }
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(
            choose_equipment(Archetype::Tank, &mut rng).secondary.as_deref(),
            Some("Tower Shield")
        );
    }
}
