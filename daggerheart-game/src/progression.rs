//! The per-level progression state machine.
//!
//! Each level from 2 to the target runs the same four steps in order: tier
//! achievement, subclass upgrade plus two advancements, damage threshold
//! bump, domain card acquisition. Every step appends to the advancement log
//! under the level being entered.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::archetype::Archetype;
use crate::character::Character;
use crate::constants::{
    ADVANCEMENTS_PER_LEVEL, LOG_CARDS_EXHAUSTED, LOG_EVASION, LOG_HP_SLOT, LOG_PROFICIENCY_TIER,
    LOG_STRESS_SLOT, LOG_THRESHOLDS, LOG_TRAITS_CLEARED, MASTERY_LEVEL, MAX_LEVEL, MIN_LEVEL,
    SPECIALIZATION_LEVEL, TIER_ACHIEVEMENT_LEVELS, TRAIT_CLEAR_LEVELS, TRAITS_PER_INCREASE,
    UPGRADE_MASTERY, UPGRADE_SPECIALIZATION,
};
use crate::domain_cards::pick_domain_card;
use crate::equipment::EquipmentSelection;
use crate::error::CharacterError;
use crate::reference::ReferenceData;
use crate::rng::RngBundle;
use crate::selection::choose_weighted;

/// One level-up benefit. Two distinct ones are taken per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Advancement {
    IncreaseTraits,
    GainHitPoint,
    GainStress,
    GainExperience,
    IncreaseEvasion,
    ExtraDomainCard,
}

impl Advancement {
    pub const ALL: [Self; 6] = [
        Self::IncreaseTraits,
        Self::GainHitPoint,
        Self::GainStress,
        Self::GainExperience,
        Self::IncreaseEvasion,
        Self::ExtraDomainCard,
    ];

    /// The menu offered by the manual builder; domain cards are chosen
    /// separately there.
    pub const MANUAL: [Self; 5] = [
        Self::IncreaseTraits,
        Self::GainHitPoint,
        Self::GainStress,
        Self::IncreaseEvasion,
        Self::GainExperience,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::IncreaseTraits => "Increase 2 traits",
            Self::GainHitPoint => "Gain 1 HP",
            Self::GainStress => "Gain 1 Stress",
            Self::GainExperience => "New Experience",
            Self::IncreaseEvasion => "Increase Evasion",
            Self::ExtraDomainCard => "Extra domain card",
        }
    }
}

impl fmt::Display for Advancement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Draw `ADVANCEMENTS_PER_LEVEL` distinct entries from a weighted menu,
/// without replacement.
pub fn draw_advancements<R>(
    menu: &[(Advancement, u32)],
    rng: &mut R,
) -> SmallVec<[Advancement; ADVANCEMENTS_PER_LEVEL]>
where
    R: Rng + ?Sized,
{
    let mut pool: SmallVec<[(Advancement, u32); 8]> = menu.iter().copied().collect();
    let mut picks = SmallVec::new();
    while picks.len() < ADVANCEMENTS_PER_LEVEL && !pool.is_empty() {
        let idx = choose_weighted(&pool, rng)
            .map_or_else(|| rng.gen_range(0..pool.len()), |(idx, _)| idx);
        picks.push(pool.remove(idx).0);
    }
    picks
}

/// Tier achievement at levels 2, 5 and 8: +1 Proficiency and a new
/// Experience; 5 and 8 also note that marked traits clear. Returns whether
/// the level was a tier level.
pub fn apply_tier_achievement(character: &mut Character, level: u8) -> bool {
    if !TIER_ACHIEVEMENT_LEVELS.contains(&level) {
        return false;
    }
    character.proficiency += 1;
    character.log_advancement(level, LOG_PROFICIENCY_TIER);
    let experience = format!("Tier {level} Experience");
    character.log_advancement(level, format!("Gained new experience: {experience}"));
    character.experiences.push(experience);
    if TRAIT_CLEAR_LEVELS.contains(&level) {
        character.log_advancement(level, LOG_TRAITS_CLEARED);
    }
    true
}

/// Grant Specialization from level 5, then Mastery from level 8, each once.
/// At most one upgrade is granted per call.
pub fn apply_subclass_upgrade(character: &mut Character, level: u8) -> Option<&'static str> {
    let upgrade = if level >= SPECIALIZATION_LEVEL && !character.has_upgrade(UPGRADE_SPECIALIZATION)
    {
        UPGRADE_SPECIALIZATION
    } else if level >= MASTERY_LEVEL && !character.has_upgrade(UPGRADE_MASTERY) {
        UPGRADE_MASTERY
    } else {
        return None;
    };
    character.subclass_upgrades.push(upgrade.to_string());
    let subclass = character.subclass;
    let entry = if upgrade == UPGRADE_MASTERY {
        format!("Gained subclass mastery ({subclass}: {})", subclass.info().mastery)
    } else {
        format!(
            "Gained subclass specialization ({subclass}: {})",
            subclass.info().specialization
        )
    };
    character.log_advancement(level, entry);
    Some(upgrade)
}

/// Carry out one advancement and log it.
///
/// `pick_card` supplies the card for [`Advancement::ExtraDomainCard`];
/// `None` from it is logged as exhaustion.
pub fn apply_advancement<F>(character: &mut Character, advancement: Advancement, level: u8, pick_card: F)
where
    F: FnOnce(&Character) -> Option<String>,
{
    match advancement {
        Advancement::IncreaseTraits => {
            let order = character.trait_order();
            let raised = character.base_traits.lowest(TRAITS_PER_INCREASE, &order);
            for trait_name in &raised {
                character.raise_trait(*trait_name, 1);
            }
            let names: Vec<&str> = raised.iter().map(|t| t.name()).collect();
            character.log_advancement(level, format!("Increased {} by +1", names.join(" and ")));
        }
        Advancement::GainHitPoint => {
            character.gain_hp(1);
            character.log_advancement(level, LOG_HP_SLOT);
        }
        Advancement::GainStress => {
            character.stress += 1;
            character.log_advancement(level, LOG_STRESS_SLOT);
        }
        Advancement::GainExperience => {
            let experience = match character.archetype {
                Some(archetype) => format!("Level {level} {archetype} Experience"),
                None => format!("Level {level} Experience"),
            };
            character.log_advancement(level, format!("Added experience: {experience}"));
            character.experiences.push(experience);
        }
        Advancement::IncreaseEvasion => {
            character.gain_evasion(1);
            character.log_advancement(level, LOG_EVASION);
        }
        Advancement::ExtraDomainCard => match pick_card(character) {
            Some(card) if character.add_domain_card(&card) => {
                character.log_advancement(level, format!("Gained extra domain card: {card}"));
            }
            _ => character.log_advancement(level, LOG_CARDS_EXHAUSTED),
        },
    }
}

/// Damage thresholds rise by one each level, kept as +1 HP on this sheet.
pub fn increase_damage_thresholds(character: &mut Character, level: u8) {
    character.gain_hp(1);
    character.log_advancement(level, LOG_THRESHOLDS);
}

pub(crate) fn check_next_level(character: &Character, level: u8) -> Result<(), CharacterError> {
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        return Err(CharacterError::LevelOutOfRange {
            level: i64::from(level),
            min: MIN_LEVEL,
            max: MAX_LEVEL,
        });
    }
    if character.level.checked_add(1) != Some(level) {
        return Err(CharacterError::LevelSequence {
            current: character.level,
            requested: level,
        });
    }
    Ok(())
}

/// Advance a character from its current level to `level`, which must be
/// exactly one higher.
///
/// # Errors
///
/// Returns [`CharacterError::LevelOutOfRange`] above level 10 and
/// [`CharacterError::LevelSequence`] when `level` skips or repeats a level.
/// The character is untouched on error.
pub fn level_up(
    character: &mut Character,
    reference: &ReferenceData,
    archetype: Archetype,
    level: u8,
    rngs: &RngBundle,
) -> Result<(), CharacterError> {
    check_next_level(character, level)?;
    character.level = level;
    debug!("levelling {} {} to {level}", character.char_class, character.subclass);

    apply_tier_achievement(character, level);
    apply_subclass_upgrade(character, level);

    let picks = draw_advancements(archetype.advancement_menu(), &mut *rngs.advancement());
    for advancement in picks {
        debug!("level {level} advancement: {advancement}");
        apply_advancement(character, advancement, level, |current| {
            pick_domain_card(reference, current, archetype, level, &mut *rngs.domain_cards())
                .map(|card| card.name.clone())
        });
    }

    increase_damage_thresholds(character, level);

    let card = pick_domain_card(reference, character, archetype, level, &mut *rngs.domain_cards())
        .map(|card| card.name.clone());
    if let Some(card) = card {
        character.add_domain_card(&card);
        character.log_advancement(level, format!("Acquired domain card: {card}"));
    }
    Ok(())
}

/// Continue progression up to `target`, then reapply the current equipment
/// so level-dependent armor thresholds stay in step.
///
/// # Errors
///
/// Returns [`CharacterError::LevelOutOfRange`] if `target` is outside
/// 1..=10 and [`CharacterError::LevelSequence`] unless `target` is above the
/// current level. Nothing is changed on error.
pub fn advance_to(
    character: &mut Character,
    target: u8,
    reference: &ReferenceData,
    rngs: &RngBundle,
) -> Result<(), CharacterError> {
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&target) {
        return Err(CharacterError::LevelOutOfRange {
            level: i64::from(target),
            min: MIN_LEVEL,
            max: MAX_LEVEL,
        });
    }
    if target <= character.level {
        return Err(CharacterError::LevelSequence {
            current: character.level,
            requested: target,
        });
    }
    let archetype = character.effective_archetype();
    for level in character.level + 1..=target {
        level_up(character, reference, archetype, level, rngs)?;
    }
    let selection = EquipmentSelection::from_character(character);
    if !selection.is_empty() {
        selection.apply(character, reference);
    }
    Ok(())
}
