use std::collections::HashSet;

use daggerheart_game::{
    Archetype, Character, CharacterForge, CharacterRequest, RngBundle, StaticReferenceLoader,
};

const SEEDS: std::ops::Range<u64> = 0..12;

fn forge() -> CharacterForge<StaticReferenceLoader> {
    CharacterForge::embedded().unwrap()
}

fn sweep(mut check: impl FnMut(u8, Archetype, &Character)) {
    let forge = forge();
    for archetype in Archetype::ALL {
        for level in 1..=10_u8 {
            for seed in SEEDS {
                let rngs = RngBundle::from_user_seed(seed);
                let request = CharacterRequest::new(i64::from(level), archetype.name());
                let character = forge.create_character(&request, &rngs).unwrap();
                check(level, archetype, &character);
            }
        }
    }
}

/// Card names mentioned in one level's log, in log order.
fn cards_logged(entries: &[String]) -> Vec<&str> {
    entries
        .iter()
        .filter_map(|entry| {
            entry
                .strip_prefix("Acquired domain card: ")
                .or_else(|| entry.strip_prefix("Gained extra domain card: "))
        })
        .collect()
}

#[test]
fn starting_allocation_keeps_the_modifier_multiset() {
    sweep(|level, _, c| {
        assert_eq!(c.level, level);
        assert_eq!(c.trait_allocation.sorted_values(), vec![2, 1, 1, 0, 0, -1]);
        if level == 1 {
            assert_eq!(c.traits.sorted_values(), vec![2, 1, 1, 0, 0, -1]);
        }
    });
}

#[test]
fn domain_cards_are_unique_and_eligible_when_taken() {
    let reference = forge().reference().clone();
    sweep(|_, _, c| {
        let unique: HashSet<&String> = c.domain_cards.iter().collect();
        assert_eq!(unique.len(), c.domain_cards.len(), "{:?}", c.domain_cards);

        let mut taken_at: Vec<(u8, &str)> = c.domain_cards[..2]
            .iter()
            .map(|name| (1, name.as_str()))
            .collect();
        for (level, entries) in &c.advancements_log {
            taken_at.extend(cards_logged(entries).into_iter().map(|name| (*level, name)));
        }
        assert_eq!(taken_at.len(), c.domain_cards.len());
        for (level, name) in taken_at {
            let card = reference.domain_card(name).unwrap();
            assert!(card.level <= level, "{name} (level {}) taken at {level}", card.level);
            assert!(c.char_class.has_domain(card.domain));
        }
    });
}

#[test]
fn subclass_upgrades_follow_level_gates() {
    sweep(|level, _, c| {
        let spec = c.has_upgrade("Specialization");
        let mastery = c.has_upgrade("Mastery");
        assert_eq!(spec, level >= 5);
        assert_eq!(mastery, level >= 8);
        let unique: HashSet<&String> = c.subclass_upgrades.iter().collect();
        assert_eq!(unique.len(), c.subclass_upgrades.len());
    });
}

#[test]
fn every_level_from_two_is_logged() {
    sweep(|level, _, c| {
        let logged: Vec<u8> = c.advancements_log.keys().copied().collect();
        assert_eq!(logged, (2..=level).collect::<Vec<_>>());
        for entries in c.advancements_log.values() {
            assert!(entries.iter().any(|e| e == "Damage thresholds increased (+1 HP)"));
        }
    });
}

#[test]
fn proficiency_and_stats_never_fall_while_levelling() {
    sweep(|level, _, c| {
        let tiers = [2, 5, 8].iter().filter(|t| **t <= level).count();
        assert_eq!(c.proficiency, 1 + i32::try_from(tiers).unwrap());
        let info = c.char_class.info();
        // At least one threshold bump per level.
        assert!(c.hp >= info.hp + i32::from(level) - 1);
        assert!(c.evasion >= info.evasion);
        assert!(c.stress >= 6);
        assert_eq!(c.hope, 2);
    });
}

#[test]
fn same_seed_same_character() {
    let forge = forge();
    for archetype in ["Random", "Healer", "Sneaky"] {
        let request = CharacterRequest::new(7, archetype);
        let a = forge
            .create_character(&request, &RngBundle::from_user_seed(0xD1CE))
            .unwrap();
        let b = forge
            .create_character(&request, &RngBundle::from_user_seed(0xD1CE))
            .unwrap();
        assert_eq!(a, b);
    }
}
