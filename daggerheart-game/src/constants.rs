//! Centralized rules constants for Daggerheart character generation.
//!
//! These values are fixed by the SRD character-creation and levelling rules.
//! Keeping them together means a rules change is a reviewed code change
//! rather than a data tweak.

// Level bounds -------------------------------------------------------------
pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 10;

/// Levels that grant a tier achievement (+1 Proficiency, new Experience).
pub const TIER_ACHIEVEMENT_LEVELS: [u8; 3] = [2, 5, 8];
/// Tier achievements that also clear marked traits.
pub const TRAIT_CLEAR_LEVELS: [u8; 2] = [5, 8];
pub const SPECIALIZATION_LEVEL: u8 = 5;
pub const MASTERY_LEVEL: u8 = 8;

// Starting sheet -----------------------------------------------------------
pub const STARTING_TRAIT_MODIFIERS: [i32; 6] = [2, 1, 1, 0, 0, -1];
pub const STARTING_PROFICIENCY: i32 = 1;
pub const STARTING_STRESS: i32 = 6;
pub const STARTING_HOPE: i32 = 2;
pub const STARTING_DOMAIN_CARDS: usize = 2;
pub const STARTING_CARD_LEVEL: u8 = 1;

// Level-up -----------------------------------------------------------------
pub const ADVANCEMENTS_PER_LEVEL: usize = 2;
pub const TRAITS_PER_INCREASE: usize = 2;

// Subclass upgrades --------------------------------------------------------
pub const UPGRADE_SPECIALIZATION: &str = "Specialization";
pub const UPGRADE_MASTERY: &str = "Mastery";

// Equipment slots ----------------------------------------------------------
pub const SLOT_PRIMARY: &str = "primary";
pub const SLOT_SECONDARY: &str = "secondary";
pub const SLOT_ARMOR: &str = "armor";

// Log text -----------------------------------------------------------------
pub(crate) const LOG_PROFICIENCY_TIER: &str = "Increased Proficiency by +1 (tier achievement)";
pub(crate) const LOG_TRAITS_CLEARED: &str = "Cleared all marked traits (tier achievement)";
pub(crate) const LOG_THRESHOLDS: &str = "Damage thresholds increased (+1 HP)";
pub(crate) const LOG_HP_SLOT: &str = "Gained an extra Hit Point slot";
pub(crate) const LOG_STRESS_SLOT: &str = "Gained an extra Stress slot";
pub(crate) const LOG_EVASION: &str = "Increased Evasion by +1";
pub(crate) const LOG_CARDS_EXHAUSTED: &str = "No further domain cards available";
