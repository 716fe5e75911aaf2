//! Step-by-step character building from explicit, validated choices.
//!
//! The builder shares the sheet and the per-level steps with the
//! archetype-driven generator but takes every decision from its caller and
//! never draws randomness.

use log::debug;

use crate::character::Character;
use crate::classes::{ClassId, SubclassId};
use crate::constants::ADVANCEMENTS_PER_LEVEL;
use crate::domain_cards::{DomainCard, eligible_cards};
use crate::error::CharacterError;
use crate::heritage::Heritage;
use crate::progression::{
    Advancement, apply_advancement, apply_subclass_upgrade, apply_tier_achievement,
    check_next_level, increase_damage_thresholds,
};
use crate::reference::ReferenceData;
use crate::traits::{Trait, TraitScores};

const DEFAULT_ADVANCEMENTS: [Advancement; ADVANCEMENTS_PER_LEVEL] =
    [Advancement::IncreaseTraits, Advancement::IncreaseTraits];

#[derive(Debug, Clone)]
pub struct CharacterBuilder<'r> {
    reference: &'r ReferenceData,
    character: Character,
}

impl<'r> CharacterBuilder<'r> {
    /// Start a level 1 sheet for a named class and subclass.
    ///
    /// # Errors
    ///
    /// Returns [`CharacterError::UnknownClass`],
    /// [`CharacterError::UnknownSubclass`] or
    /// [`CharacterError::SubclassMismatch`].
    pub fn new(reference: &'r ReferenceData, class: &str, subclass: &str) -> Result<Self, CharacterError> {
        let class: ClassId = class.parse().map_err(CharacterError::UnknownClass)?;
        let subclass: SubclassId = subclass.parse().map_err(CharacterError::UnknownSubclass)?;
        if subclass.class() != class {
            return Err(CharacterError::SubclassMismatch {
                class: class.to_string(),
                subclass: subclass.to_string(),
            });
        }
        Ok(Self {
            reference,
            character: Character::new(class, subclass),
        })
    }

    /// # Errors
    ///
    /// Returns [`CharacterError::UnknownAncestry`] or
    /// [`CharacterError::UnknownCommunity`].
    pub fn assign_heritage(&mut self, ancestry: &str, community: &str) -> Result<(), CharacterError> {
        self.character.heritage = Some(Heritage::lookup(self.reference, ancestry, community)?);
        Ok(())
    }

    /// Set the starting allocation.
    ///
    /// # Errors
    ///
    /// Returns [`CharacterError::InvalidTraitAllocation`] unless all six
    /// traits are given and the values are the modifiers +2, +1, +1, 0, 0, -1
    /// in some order.
    pub fn assign_traits(&mut self, allocation: TraitScores) -> Result<(), CharacterError> {
        let missing: Vec<&str> = Trait::ALL
            .into_iter()
            .filter(|t| !allocation.iter().any(|(given, _)| given == *t))
            .map(Trait::name)
            .collect();
        if !missing.is_empty() {
            return Err(CharacterError::InvalidTraitAllocation(format!(
                "missing {}",
                missing.join(", ")
            )));
        }
        if !allocation.is_starting_allocation() {
            let values: Vec<String> = allocation
                .sorted_values()
                .iter()
                .map(|v| format!("{v:+}"))
                .collect();
            return Err(CharacterError::InvalidTraitAllocation(format!(
                "modifiers must be +2, +1, +1, +0, +0, -1 (got {})",
                values.join(", ")
            )));
        }
        self.character.set_starting_traits(allocation);
        Ok(())
    }

    pub fn assign_default_experiences(&mut self) {
        let class = self.character.char_class;
        self.character.experiences = vec![format!("Wanderer {class}"), format!("Adventurer {class}")];
    }

    /// Cards the character could take at `level`, in compendium order.
    #[must_use]
    pub fn domain_card_options(&self, level: u8) -> Vec<&'r DomainCard> {
        eligible_cards(self.reference, &self.character, level).collect()
    }

    /// Take named cards from the options at `level`.
    ///
    /// # Errors
    ///
    /// Returns [`CharacterError::InvalidDomainCard`] for a name that is not
    /// among the options or is repeated. No card is taken on error.
    pub fn choose_domain_cards(&mut self, level: u8, names: &[&str]) -> Result<(), CharacterError> {
        self.validate_cards(level, names)?;
        for name in names {
            self.character.add_domain_card(name);
        }
        if !names.is_empty() {
            self.character
                .log_advancement(level, format!("Chose domain card(s): {}", names.join(", ")));
        }
        Ok(())
    }

    fn validate_cards(&self, level: u8, names: &[&str]) -> Result<(), CharacterError> {
        let options = self.domain_card_options(level);
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) || !options.iter().any(|card| card.name == *name) {
                return Err(CharacterError::InvalidDomainCard((*name).to_string()));
            }
        }
        Ok(())
    }

    #[must_use]
    pub const fn available_advancements(&self) -> &'static [Advancement] {
        &Advancement::MANUAL
    }

    /// Advance exactly one level.
    ///
    /// `choices` defaults to increasing traits twice. `cards` defaults to the
    /// first eligible card in compendium order; an empty slice takes none.
    ///
    /// # Errors
    ///
    /// Returns [`CharacterError::LevelOutOfRange`] past level 10,
    /// [`CharacterError::AdvancementCount`] unless exactly two choices are
    /// given, [`CharacterError::InvalidAdvancement`] for a choice outside
    /// [`Self::available_advancements`], and [`CharacterError::InvalidDomainCard`] for a card that is not
    /// eligible at the new level. The sheet is untouched on error.
    pub fn level_up(
        &mut self,
        choices: Option<&[Advancement]>,
        cards: Option<&[&str]>,
    ) -> Result<(), CharacterError> {
        let level = self.character.level.saturating_add(1);
        check_next_level(&self.character, level)?;
        let choices = choices.unwrap_or(&DEFAULT_ADVANCEMENTS);
        if choices.len() != ADVANCEMENTS_PER_LEVEL {
            return Err(CharacterError::AdvancementCount {
                expected: ADVANCEMENTS_PER_LEVEL,
                got: choices.len(),
            });
        }
        if let Some(offmenu) = choices.iter().find(|c| !Advancement::MANUAL.contains(*c)) {
            return Err(CharacterError::InvalidAdvancement(offmenu.label().to_string()));
        }
        if let Some(cards) = cards {
            self.validate_cards(level, cards)?;
        }

        let reference = self.reference;
        let character = &mut self.character;
        character.level = level;
        debug!("building {} to level {level} with {choices:?}", character.char_class);

        apply_tier_achievement(character, level);
        apply_subclass_upgrade(character, level);
        // Cards come only from `cards` here, never from an advancement.
        for advancement in choices {
            apply_advancement(character, *advancement, level, |_| None);
        }
        increase_damage_thresholds(character, level);

        let acquired: Vec<String> = match cards {
            Some(chosen) => chosen.iter().map(|name| (*name).to_string()).collect(),
            None => eligible_cards(reference, character, level)
                .next()
                .map(|card| card.name.clone())
                .into_iter()
                .collect(),
        };
        for card in acquired {
            if character.add_domain_card(&card) {
                character.log_advancement(level, format!("Acquired domain card: {card}"));
            }
        }
        Ok(())
    }

    #[must_use]
    pub const fn character(&self) -> &Character {
        &self.character
    }

    #[must_use]
    pub fn build(self) -> Character {
        self.character
    }
}
