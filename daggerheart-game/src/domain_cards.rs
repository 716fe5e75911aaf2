//! Domain card records and the keyword-synergy picker.

use log::{debug, trace};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::archetype::Archetype;
use crate::character::Character;
use crate::classes::{ClassId, Domain};
use crate::reference::ReferenceData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Ability,
    Spell,
    Grimoire,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainCard {
    pub name: String,
    pub domain: Domain,
    pub level: u8,
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub recall_cost: u8,
    pub description: String,
}

impl DomainCard {
    /// Number of keyword occurrences in the lowercased description.
    #[must_use]
    pub fn synergy_score(&self, keywords: &[&str]) -> usize {
        let text = self.description.to_lowercase();
        keywords.iter().map(|kw| text.matches(kw).count()).sum()
    }

    /// Whether `class` may take this card at `level`.
    #[must_use]
    pub fn available_to(&self, class: ClassId, level: u8) -> bool {
        class.has_domain(self.domain) && self.level <= level
    }
}

/// Cards from the character's class domains at or below `level` that the
/// character does not already hold, in compendium order.
pub fn eligible_cards<'r>(
    reference: &'r ReferenceData,
    character: &Character,
    level: u8,
) -> impl Iterator<Item = &'r DomainCard> {
    reference
        .domain_cards()
        .iter()
        .filter(move |card| card.available_to(character.char_class, level))
        .filter(move |card| !character.has_card(&card.name))
}

/// Pick the eligible card whose description best matches the archetype's
/// keywords; equal scores are broken uniformly at random.
///
/// Returns `None` once the character's domains hold nothing further at this
/// level. The pick is greedy and does not look ahead.
pub fn pick_domain_card<'a, R>(
    reference: &'a ReferenceData,
    character: &Character,
    archetype: Archetype,
    level: u8,
    rng: &mut R,
) -> Option<&'a DomainCard>
where
    R: Rng + ?Sized,
{
    let keywords = archetype.card_keywords();
    let scored: Vec<(usize, &DomainCard)> = eligible_cards(reference, character, level)
        .map(|card| (card.synergy_score(keywords), card))
        .collect();

    let best_score = scored.iter().map(|(score, _)| *score).max()?;
    let best: Vec<&DomainCard> = scored
        .iter()
        .filter(|(score, _)| *score == best_score)
        .map(|(_, card)| *card)
        .collect();
    trace!(
        "{} eligible cards at level {level}, {} tied at score {best_score}",
        scored.len(),
        best.len()
    );

    let chosen = best.choose(rng).copied()?;
    debug!(
        "picked domain card {} ({}, level {}) for {archetype}",
        chosen.name, chosen.domain, chosen.level
    );
    Some(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::SubclassId;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn card(name: &str, domain: Domain, level: u8, description: &str) -> DomainCard {
        DomainCard {
            name: name.to_string(),
            domain,
            level,
            card_type: CardType::Ability,
            recall_cost: 1,
            description: description.to_string(),
        }
    }

    #[test]
    fn synergy_counts_every_occurrence() {
        let c = card(
            "Test",
            Domain::Valor,
            1,
            "Reduce the damage. Damage thresholds and Armor improve.",
        );
        let score = c.synergy_score(Archetype::Tank.card_keywords());
        // damage x2, reduce, threshold, armor
        assert_eq!(score, 5);
        assert_eq!(c.synergy_score(&[]), 0);
    }

    #[test]
    fn picker_prefers_highest_score_and_skips_owned_cards() {
        let reference = ReferenceData::embedded().unwrap();
        let mut character = Character::new(ClassId::Guardian, SubclassId::Stalwart);
        let mut rng = SmallRng::seed_from_u64(7);
        let first = pick_domain_card(&reference, &character, Archetype::Tank, 1, &mut rng)
            .expect("guardian has level one cards");
        assert!(first.level <= 1);
        assert!(ClassId::Guardian.has_domain(first.domain));

        character.add_domain_card(&first.name);
        let second = pick_domain_card(&reference, &character, Archetype::Tank, 1, &mut rng)
            .expect("guardian has more than one level one card");
        assert_ne!(first.name, second.name);
    }

    #[test]
    fn picker_reports_exhaustion_with_none() {
        let reference = ReferenceData::embedded().unwrap();
        let mut character = Character::new(ClassId::Wizard, SubclassId::SchoolOfWar);
        let mut rng = SmallRng::seed_from_u64(3);
        let pool: Vec<String> = eligible_cards(&reference, &character, 1)
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(pool.len(), 6, "two domains with three level one cards each");
        for name in &pool {
            character.add_domain_card(name);
        }
        assert!(pick_domain_card(&reference, &character, Archetype::Control, 1, &mut rng).is_none());
    }
}
