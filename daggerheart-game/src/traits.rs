//! The six character traits and the modifier map carried on a sheet.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::constants::STARTING_TRAIT_MODIFIERS;

/// One of the six action-roll traits.
///
/// Declaration order is the canonical SRD order and doubles as the iteration
/// order of [`TraitScores`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Trait {
    Agility,
    Strength,
    Finesse,
    Instinct,
    Presence,
    Knowledge,
}

impl Trait {
    pub const ALL: [Self; 6] = [
        Self::Agility,
        Self::Strength,
        Self::Finesse,
        Self::Instinct,
        Self::Presence,
        Self::Knowledge,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Agility => "Agility",
            Self::Strength => "Strength",
            Self::Finesse => "Finesse",
            Self::Instinct => "Instinct",
            Self::Presence => "Presence",
            Self::Knowledge => "Knowledge",
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Trait {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown trait '{needle}'"))
    }
}

/// Trait name to modifier, iterated in canonical trait order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitScores(BTreeMap<Trait, i32>);

impl TraitScores {
    /// Every trait at +0.
    #[must_use]
    pub fn zeroed() -> Self {
        Self(Trait::ALL.into_iter().map(|t| (t, 0)).collect())
    }

    /// Pair an ordering of traits with the starting modifier array.
    ///
    /// The first trait receives +2, the last −1. Traits missing from `order`
    /// stay at +0.
    #[must_use]
    pub fn from_priority(order: &[Trait]) -> Self {
        let mut scores = Self::zeroed();
        for (trait_name, modifier) in order.iter().zip(STARTING_TRAIT_MODIFIERS) {
            scores.0.insert(*trait_name, modifier);
        }
        scores
    }

    #[must_use]
    pub fn get(&self, trait_name: Trait) -> i32 {
        self.0.get(&trait_name).copied().unwrap_or_default()
    }

    pub fn set(&mut self, trait_name: Trait, value: i32) {
        self.0.insert(trait_name, value);
    }

    /// Add `delta` to a trait, returning the new value.
    pub fn adjust(&mut self, trait_name: Trait, delta: i32) -> i32 {
        let entry = self.0.entry(trait_name).or_insert(0);
        *entry += delta;
        *entry
    }

    /// Apply a set of per-trait modifiers, as carried by weapons and armor.
    pub fn apply_mods(&mut self, mods: &BTreeMap<Trait, i32>) {
        for (trait_name, delta) in mods {
            self.adjust(*trait_name, *delta);
        }
    }

    /// The `n` distinct lowest traits. Ties go to the trait listed first in
    /// `order`; traits absent from it rank after those present.
    #[must_use]
    pub fn lowest(&self, n: usize, order: &[Trait]) -> Vec<Trait> {
        let rank = |t: Trait| order.iter().position(|o| *o == t).unwrap_or(order.len());
        let mut ranked: Vec<(Trait, i32)> = self.iter().collect();
        ranked.sort_by_key(|(t, value)| (*value, rank(*t)));
        ranked.into_iter().take(n).map(|(t, _)| t).collect()
    }

    /// Modifier values sorted from highest to lowest.
    #[must_use]
    pub fn sorted_values(&self) -> Vec<i32> {
        let mut values: Vec<i32> = self.0.values().copied().collect();
        values.sort_unstable_by(|a, b| b.cmp(a));
        values
    }

    /// True when all six traits are present and the values are a
    /// permutation of the starting modifier array.
    #[must_use]
    pub fn is_starting_allocation(&self) -> bool {
        self.0.len() == Trait::ALL.len() && self.sorted_values() == STARTING_TRAIT_MODIFIERS
    }

    pub fn iter(&self) -> impl Iterator<Item = (Trait, i32)> + '_ {
        self.0.iter().map(|(t, v)| (*t, *v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<Trait, i32>> for TraitScores {
    fn from(map: BTreeMap<Trait, i32>) -> Self {
        Self(map)
    }
}

impl FromIterator<(Trait, i32)> for TraitScores {
    fn from_iter<I: IntoIterator<Item = (Trait, i32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_order_receives_modifier_array() {
        let scores = TraitScores::from_priority(&[
            Trait::Strength,
            Trait::Instinct,
            Trait::Agility,
            Trait::Finesse,
            Trait::Presence,
            Trait::Knowledge,
        ]);
        assert_eq!(scores.get(Trait::Strength), 2);
        assert_eq!(scores.get(Trait::Instinct), 1);
        assert_eq!(scores.get(Trait::Agility), 1);
        assert_eq!(scores.get(Trait::Knowledge), -1);
        assert!(scores.is_starting_allocation());
    }

    #[test]
    fn lowest_breaks_ties_by_the_given_order() {
        let mut scores = TraitScores::zeroed();
        scores.set(Trait::Knowledge, -1);
        assert_eq!(scores.lowest(2, &Trait::ALL), vec![Trait::Knowledge, Trait::Agility]);
        let order = [Trait::Presence, Trait::Knowledge, Trait::Strength];
        assert_eq!(scores.lowest(2, &order), vec![Trait::Knowledge, Trait::Presence]);
        assert_eq!(scores.lowest(3, &[]), vec![Trait::Knowledge, Trait::Agility, Trait::Strength]);
    }

    #[test]
    fn adjusted_scores_leave_starting_allocation() {
        let mut scores = TraitScores::from_priority(&Trait::ALL);
        assert!(scores.is_starting_allocation());
        scores.adjust(Trait::Knowledge, 1);
        assert!(!scores.is_starting_allocation());
        assert_eq!(scores.sorted_values(), vec![2, 1, 1, 0, 0, 0]);
    }

    #[test]
    fn trait_names_parse_case_insensitively() {
        assert_eq!("presence".parse::<Trait>(), Ok(Trait::Presence));
        assert_eq!(" KNOWLEDGE ".parse::<Trait>(), Ok(Trait::Knowledge));
        assert!("Charisma".parse::<Trait>().is_err());
    }

    #[test]
    fn scores_serialize_as_name_map() {
        let scores = TraitScores::from_priority(&Trait::ALL);
        let json = serde_json::to_value(&scores).unwrap();
        assert_eq!(json["Agility"], 2);
        assert_eq!(json["Knowledge"], -1);
    }
}
