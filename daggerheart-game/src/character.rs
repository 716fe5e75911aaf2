//! The character sheet record and its progression history.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;

use crate::archetype::Archetype;
use crate::classes::{ClassId, SubclassId};
use crate::constants::{STARTING_HOPE, STARTING_PROFICIENCY, STARTING_STRESS};
use crate::heritage::Heritage;
use crate::traits::{Trait, TraitScores};

/// A full character sheet.
///
/// `base_hp`, `base_evasion` and `base_traits` hold the unequipped values.
/// Level-up gains move the live and base values together, so the equipment
/// overlay can always rebuild the live values from base plus gear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: Option<String>,
    pub archetype: Option<Archetype>,
    pub level: u8,
    pub char_class: ClassId,
    pub subclass: SubclassId,
    pub heritage: Option<Heritage>,
    pub traits: TraitScores,
    pub base_traits: TraitScores,
    /// The untouched level 1 allocation.
    pub trait_allocation: TraitScores,
    pub experiences: Vec<String>,
    pub hp: i32,
    pub evasion: i32,
    pub proficiency: i32,
    pub stress: i32,
    pub hope: i32,
    pub base_hp: i32,
    pub base_evasion: i32,
    pub equipment: BTreeMap<String, String>,
    pub armor_thresholds: (i32, i32),
    pub armor_score: i32,
    pub damage_roll: Option<String>,
    pub domain_cards: Vec<String>,
    pub advancements_log: BTreeMap<u8, Vec<String>>,
    pub subclass_upgrades: Vec<String>,
}

impl Character {
    /// A level 1 sheet with the class's starting HP and Evasion and every
    /// trait at +0.
    #[must_use]
    pub fn new(char_class: ClassId, subclass: SubclassId) -> Self {
        let info = char_class.info();
        Self {
            name: None,
            archetype: None,
            level: 1,
            char_class,
            subclass,
            heritage: None,
            traits: TraitScores::zeroed(),
            base_traits: TraitScores::zeroed(),
            trait_allocation: TraitScores::zeroed(),
            experiences: Vec::new(),
            hp: info.hp,
            evasion: info.evasion,
            proficiency: STARTING_PROFICIENCY,
            stress: STARTING_STRESS,
            hope: STARTING_HOPE,
            base_hp: info.hp,
            base_evasion: info.evasion,
            equipment: BTreeMap::new(),
            armor_thresholds: (0, 0),
            armor_score: 0,
            damage_roll: None,
            domain_cards: Vec::new(),
            advancements_log: BTreeMap::new(),
            subclass_upgrades: Vec::new(),
        }
    }

    /// Install the level 1 allocation as live, base and recorded traits.
    pub fn set_starting_traits(&mut self, traits: TraitScores) {
        self.traits = traits.clone();
        self.base_traits = traits.clone();
        self.trait_allocation = traits;
    }

    /// The stored archetype, or the one the class most naturally plays.
    #[must_use]
    pub fn effective_archetype(&self) -> Archetype {
        self.archetype
            .unwrap_or_else(|| Archetype::infer_from_class(self.char_class))
    }

    /// Traits in the order of the level 1 assignment: highest starting
    /// modifier first, ties in the archetype's priority order.
    #[must_use]
    pub fn trait_order(&self) -> [Trait; 6] {
        let mut order = self.effective_archetype().trait_priorities();
        order.sort_by_key(|t| Reverse(self.trait_allocation.get(*t)));
        order
    }

    #[must_use]
    pub fn has_card(&self, name: &str) -> bool {
        self.domain_cards.iter().any(|card| card == name)
    }

    /// Append a card unless it is already held. Returns whether it was added.
    pub fn add_domain_card(&mut self, name: &str) -> bool {
        if self.has_card(name) {
            return false;
        }
        self.domain_cards.push(name.to_string());
        true
    }

    pub fn log_advancement(&mut self, level: u8, entry: impl Into<String>) {
        self.advancements_log
            .entry(level)
            .or_default()
            .push(entry.into());
    }

    #[must_use]
    pub fn equipped(&self, slot: &str) -> Option<&str> {
        self.equipment.get(slot).map(String::as_str)
    }

    #[must_use]
    pub fn has_upgrade(&self, upgrade: &str) -> bool {
        self.subclass_upgrades.iter().any(|u| u == upgrade)
    }

    pub(crate) fn gain_hp(&mut self, amount: i32) {
        self.hp += amount;
        self.base_hp += amount;
    }

    pub(crate) fn gain_evasion(&mut self, amount: i32) {
        self.evasion += amount;
        self.base_evasion += amount;
    }

    pub(crate) fn raise_trait(&mut self, trait_name: Trait, amount: i32) {
        self.traits.adjust(trait_name, amount);
        self.base_traits.adjust(trait_name, amount);
    }

    /// Drop every equipment effect, restoring the unequipped values.
    pub(crate) fn reset_equipment(&mut self) {
        self.hp = self.base_hp;
        self.evasion = self.base_evasion;
        self.traits = self.base_traits.clone();
        self.armor_thresholds = (0, 0);
        self.armor_score = 0;
        self.damage_roll = None;
        self.equipment.clear();
    }

    /// Multi-line sheet summary.
    #[must_use]
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            writeln!(f, "Name: {name}")?;
        }
        match self.archetype {
            Some(archetype) => writeln!(f, "Archetype: {archetype}")?,
            None => writeln!(f, "Archetype: -")?,
        }
        writeln!(f, "Class/Subclass: {} - {}", self.char_class, self.subclass)?;
        if let Some(heritage) = &self.heritage {
            writeln!(
                f,
                "Heritage: {} / {}",
                heritage.ancestry.name, heritage.community.name
            )?;
        }
        writeln!(f, "Level: {} (Proficiency {})", self.level, self.proficiency)?;
        writeln!(
            f,
            "HP: {}, Evasion: {}, Stress: {}, Hope: {}",
            self.hp, self.evasion, self.stress, self.hope
        )?;
        let traits: Vec<String> = self
            .traits
            .iter()
            .map(|(t, v)| format!("{t} {v:+}"))
            .collect();
        writeln!(f, "Traits: {}", traits.join(", "))?;
        if !self.experiences.is_empty() {
            writeln!(f, "Experiences: {}", self.experiences.join(", "))?;
        }
        if !self.equipment.is_empty() {
            let items: Vec<String> = self
                .equipment
                .iter()
                .map(|(slot, item)| format!("{slot}: {item}"))
                .collect();
            writeln!(f, "Equipment: {}", items.join(", "))?;
        }
        if self.armor_score > 0 || self.armor_thresholds != (0, 0) {
            let (minor, major) = self.armor_thresholds;
            writeln!(
                f,
                "Armor: thresholds {minor}/{major}, score {}",
                self.armor_score
            )?;
        }
        if let Some(roll) = &self.damage_roll {
            writeln!(f, "Damage: {roll}")?;
        }
        if !self.domain_cards.is_empty() {
            writeln!(f, "Domain Cards: {}", self.domain_cards.join(", "))?;
        }
        for (level, entries) in &self.advancements_log {
            writeln!(f, "Level {level} Advancements: {}", entries.join("; "))?;
        }
        if !self.subclass_upgrades.is_empty() {
            writeln!(f, "Subclass Upgrades: {}", self.subclass_upgrades.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sheet_uses_class_table() {
        let c = Character::new(ClassId::Guardian, SubclassId::Stalwart);
        assert_eq!(c.level, 1);
        assert_eq!((c.hp, c.base_hp), (7, 7));
        assert_eq!((c.evasion, c.base_evasion), (9, 9));
        assert_eq!((c.proficiency, c.stress, c.hope), (1, 6, 2));
        assert!(c.equipment.is_empty());
        assert_eq!(c.damage_roll, None);
    }

    #[test]
    fn domain_cards_never_duplicate() {
        let mut c = Character::new(ClassId::Bard, SubclassId::Troubadour);
        assert!(c.add_domain_card("Enrapture"));
        assert!(!c.add_domain_card("Enrapture"));
        assert_eq!(c.domain_cards, vec!["Enrapture".to_string()]);
    }

    #[test]
    fn gains_move_live_and_base_together() {
        let mut c = Character::new(ClassId::Rogue, SubclassId::Nightwalker);
        c.gain_hp(1);
        c.gain_evasion(1);
        c.raise_trait(Trait::Finesse, 1);
        assert_eq!(c.hp, c.base_hp);
        assert_eq!(c.evasion, 13);
        assert_eq!(c.traits, c.base_traits);
        assert_eq!(c.traits.get(Trait::Finesse), 1);
    }

    #[test]
    fn effective_archetype_falls_back_to_class() {
        let mut c = Character::new(ClassId::Wizard, SubclassId::SchoolOfWar);
        assert_eq!(c.effective_archetype(), Archetype::Control);
        c.archetype = Some(Archetype::Support);
        assert_eq!(c.effective_archetype(), Archetype::Support);
    }

    #[test]
    fn describe_lists_history_in_level_order() {
        let mut c = Character::new(ClassId::Seraph, SubclassId::DivineWielder);
        c.archetype = Some(Archetype::Healer);
        c.log_advancement(3, "Gained an extra Stress slot");
        c.log_advancement(2, "Increased Proficiency by +1 (tier achievement)");
        let sheet = c.describe();
        assert!(sheet.starts_with("Archetype: Healer\n"));
        assert!(sheet.contains("Class/Subclass: Seraph - Divine Wielder"));
        let two = sheet.find("Level 2 Advancements").unwrap();
        let three = sheet.find("Level 3 Advancements").unwrap();
        assert!(two < three);
    }

    #[test]
    fn json_uses_display_names_and_numeric_levels() {
        let mut c = Character::new(ClassId::Warrior, SubclassId::CallOfTheBrave);
        c.log_advancement(2, "Damage thresholds increased (+1 HP)");
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["char_class"], "Warrior");
        assert_eq!(json["subclass"], "Call of the Brave");
        assert_eq!(json["advancements_log"]["2"][0], "Damage thresholds increased (+1 HP)");
        assert_eq!(json["armor_thresholds"], serde_json::json!([0, 0]));
        let back: Character = serde_json::from_value(json).unwrap();
        assert_eq!(back, c);
    }
}
