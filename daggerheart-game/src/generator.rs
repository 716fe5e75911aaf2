//! Archetype-driven character creation.

use log::{debug, info};

use crate::archetype::{Archetype, ArchetypeRequest};
use crate::character::Character;
use crate::classes::{ClassId, SubclassId};
use crate::constants::{MAX_LEVEL, MIN_LEVEL, STARTING_CARD_LEVEL, STARTING_DOMAIN_CARDS};
use crate::domain_cards::pick_domain_card;
use crate::error::CharacterError;
use crate::heritage::select_heritage;
use crate::progression::level_up;
use crate::reference::ReferenceData;
use crate::rng::RngBundle;
use crate::selection::{assign_traits, generate_experiences, resolve_class_and_subclass};

/// Raw generation request, as an adapter receives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRequest {
    pub level: i64,
    /// One of the seven archetypes, or `Random`, `Any` or empty.
    pub archetype: String,
    pub class_name: Option<String>,
    pub subclass_name: Option<String>,
    pub name: Option<String>,
}

impl CharacterRequest {
    pub fn new(level: i64, archetype: impl Into<String>) -> Self {
        Self {
            level,
            archetype: archetype.into(),
            class_name: None,
            subclass_name: None,
            name: None,
        }
    }

    #[must_use]
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub fn with_subclass(mut self, subclass_name: impl Into<String>) -> Self {
        self.subclass_name = Some(subclass_name.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A request with every label resolved, ready to build from.
#[derive(Debug, Clone, Copy)]
struct ValidatedRequest {
    level: u8,
    archetype: ArchetypeRequest,
    class: Option<ClassId>,
    subclass: Option<SubclassId>,
}

fn validate(request: &CharacterRequest) -> Result<ValidatedRequest, CharacterError> {
    let level = u8::try_from(request.level)
        .ok()
        .filter(|level| (MIN_LEVEL..=MAX_LEVEL).contains(level))
        .ok_or(CharacterError::LevelOutOfRange {
            level: request.level,
            min: MIN_LEVEL,
            max: MAX_LEVEL,
        })?;
    let archetype = ArchetypeRequest::parse(&request.archetype)?;
    let class = request
        .class_name
        .as_deref()
        .map(|name| name.parse::<ClassId>().map_err(CharacterError::UnknownClass))
        .transpose()?;
    let subclass = request
        .subclass_name
        .as_deref()
        .map(|name| name.parse::<SubclassId>().map_err(CharacterError::UnknownSubclass))
        .transpose()?;
    if let (Some(class), Some(subclass)) = (class, subclass)
        && subclass.class() != class
    {
        return Err(CharacterError::SubclassMismatch {
            class: class.to_string(),
            subclass: subclass.to_string(),
        });
    }
    Ok(ValidatedRequest {
        level,
        archetype,
        class,
        subclass,
    })
}

/// Generate a complete character at the requested level.
///
/// The request is validated in full before anything is built, so an error
/// never leaves a partial character behind.
///
/// # Errors
///
/// Returns a [`CharacterError`] for a level outside 1..=10, an unknown
/// archetype, class or subclass label, or a subclass that does not belong to
/// the requested class.
pub fn create_character(
    reference: &ReferenceData,
    request: &CharacterRequest,
    rngs: &RngBundle,
) -> Result<Character, CharacterError> {
    let validated = validate(request)?;
    let (class, subclass) = resolve_class_and_subclass(
        validated.archetype,
        validated.class,
        validated.subclass,
        &mut *rngs.class_selection(),
    )?;
    let archetype = validated
        .archetype
        .named()
        .unwrap_or_else(|| Archetype::infer_from_class(class));
    let heritage = select_heritage(reference, &mut *rngs.heritage())?;

    let mut character = Character::new(class, subclass);
    character.name.clone_from(&request.name);
    character.archetype = Some(archetype);
    character.heritage = Some(heritage);
    character.set_starting_traits(assign_traits(archetype, class, Some(subclass)));
    character.experiences = generate_experiences(archetype, class).into();

    for _ in 0..STARTING_DOMAIN_CARDS {
        let card = pick_domain_card(
            reference,
            &character,
            archetype,
            STARTING_CARD_LEVEL,
            &mut *rngs.domain_cards(),
        )
        .map(|card| card.name.clone());
        match card {
            Some(card) => {
                character.add_domain_card(&card);
            }
            None => break,
        }
    }
    debug!("base {class} / {subclass} ready for {archetype}");

    for level in (MIN_LEVEL + 1)..=validated.level {
        level_up(&mut character, reference, archetype, level, rngs)?;
    }
    info!(
        "generated level {} {class} / {subclass} ({archetype}) from seed {}",
        character.level,
        rngs.seed()
    );
    Ok(character)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Trait;

    fn reference() -> ReferenceData {
        ReferenceData::embedded().unwrap()
    }

    #[test]
    fn level_one_tank_matches_class_table() {
        let reference = reference();
        for seed in 0..40 {
            let rngs = RngBundle::from_user_seed(seed);
            let c = create_character(&reference, &CharacterRequest::new(1, "tank"), &rngs).unwrap();
            let info = c.char_class.info();
            assert!(matches!(c.char_class, ClassId::Guardian | ClassId::Warrior));
            assert_eq!((c.hp, c.evasion), (info.hp, info.evasion));
            assert_eq!(c.domain_cards.len(), 2);
            assert!(c.advancements_log.is_empty());
            assert_eq!(c.archetype, Some(Archetype::Tank));
            assert!(c.traits.is_starting_allocation());
        }
    }

    #[test]
    fn invalid_requests_are_rejected_up_front() {
        let reference = reference();
        let rngs = RngBundle::from_user_seed(3);
        let cases = [
            CharacterRequest::new(0, "Tank"),
            CharacterRequest::new(11, "Tank"),
            CharacterRequest::new(-4, "Tank"),
            CharacterRequest::new(3, "Bruiser"),
            CharacterRequest::new(3, "Tank").with_class("Paladin"),
            CharacterRequest::new(3, "Tank").with_subclass("Oathsworn"),
            CharacterRequest::new(3, "Tank")
                .with_class("Wizard")
                .with_subclass("Stalwart"),
        ];
        for request in cases {
            let err = create_character(&reference, &request, &rngs).unwrap_err();
            assert!(err.is_invalid_argument(), "{request:?}");
        }
        // Nothing was drawn for a rejected request.
        assert_eq!(rngs.class_selection().draws(), 0);
        assert_eq!(rngs.heritage().draws(), 0);
    }

    #[test]
    fn wildcard_infers_archetype_from_class() {
        let reference = reference();
        let rngs = RngBundle::from_user_seed(8);
        let request = CharacterRequest::new(2, "").with_class("Wizard");
        let c = create_character(&reference, &request, &rngs).unwrap();
        assert_eq!(c.archetype, Some(Archetype::Control));
        assert_eq!(c.experiences[0], "Arcane Scholar Wizard");
    }

    #[test]
    fn explicit_subclass_names_its_class() {
        let reference = reference();
        let rngs = RngBundle::from_user_seed(12);
        let request = CharacterRequest::new(1, "Damage").with_subclass("school of war");
        let c = create_character(&reference, &request, &rngs).unwrap();
        assert_eq!(c.char_class, ClassId::Wizard);
        assert_eq!(c.subclass, SubclassId::SchoolOfWar);
        assert_eq!(c.traits.get(Trait::Knowledge), 2);
    }

    #[test]
    fn name_is_carried_through() {
        let reference = reference();
        let rngs = RngBundle::from_user_seed(21);
        let request = CharacterRequest::new(1, "Face").with_name("Marlowe");
        let c = create_character(&reference, &request, &rngs).unwrap();
        assert_eq!(c.name.as_deref(), Some("Marlowe"));
    }
}
