//! Daggerheart Character Engine
//!
//! Platform-agnostic character generation and progression for the
//! Daggerheart SRD. Archetype-driven generation, the per-level progression
//! state machine, the equipment overlay and a manual builder, all over a
//! read-only reference dataset. No I/O happens during generation.

pub mod archetype;
pub mod builder;
pub mod character;
pub mod classes;
pub mod constants;
pub mod domain_cards;
pub mod equipment;
pub mod error;
pub mod generator;
pub mod heritage;
pub mod progression;
pub mod reference;
pub mod rng;
pub mod selection;
pub mod traits;

// Re-export commonly used types
pub use archetype::{Archetype, ArchetypeRequest, EquipmentOptions};
pub use builder::CharacterBuilder;
pub use character::Character;
pub use classes::{ClassId, ClassInfo, Domain, SubclassId, SubclassInfo};
pub use domain_cards::{CardType, DomainCard, eligible_cards, pick_domain_card};
pub use equipment::{
    Armor, Burden, DamageType, EquipmentSelection, Range, Weapon, WeaponCatalog, apply_equipment,
    choose_equipment, damage_roll,
};
pub use error::CharacterError;
pub use generator::{CharacterRequest, create_character};
pub use heritage::{Ancestry, Community, Heritage, select_heritage};
pub use progression::{Advancement, advance_to, draw_advancements, level_up};
pub use reference::{
    DirectoryReferenceLoader, ReferenceData, ReferenceDataError, ReferenceLoader,
    StaticReferenceLoader, Table, class_primary_trait, equipment_options, list_archetypes,
    list_classes, list_subclasses, recommend_trait_allocation, trait_priorities,
};
pub use rng::{CountingRng, RngBundle};
pub use selection::{
    assign_traits, choose_class_and_subclass, choose_subclass, generate_experiences,
    resolve_class_and_subclass,
};
pub use traits::{Trait, TraitScores};

use log::info;

/// Entry point holding a loaded dataset.
///
/// The dataset is read and validated once, when the forge is built; every
/// generation call afterwards borrows it read-only.
#[derive(Debug)]
pub struct CharacterForge<L>
where
    L: ReferenceLoader,
{
    loader: L,
    reference: ReferenceData,
}

impl<L> CharacterForge<L>
where
    L: ReferenceLoader,
{
    /// Load the dataset through `loader`.
    ///
    /// # Errors
    ///
    /// Returns a [`ReferenceDataError`] if any table is missing, malformed
    /// or fails validation.
    pub fn new(loader: L) -> Result<Self, ReferenceDataError> {
        let reference = loader.load()?;
        info!(
            "loaded {} ancestries, {} communities, {} domain cards, {} weapons, {} armor from {}",
            reference.ancestries().len(),
            reference.communities().len(),
            reference.domain_cards().len(),
            reference.primary_weapons().len() + reference.secondary_weapons().len(),
            reference.armors().len(),
            loader.source()
        );
        Ok(Self { loader, reference })
    }

    #[must_use]
    pub const fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    #[must_use]
    pub const fn loader(&self) -> &L {
        &self.loader
    }

    /// Generate a character; see [`generator::create_character`].
    ///
    /// # Errors
    ///
    /// Returns a [`CharacterError`] if the request is invalid.
    pub fn create_character(
        &self,
        request: &CharacterRequest,
        rngs: &RngBundle,
    ) -> Result<Character, CharacterError> {
        create_character(&self.reference, request, rngs)
    }

    /// Replace a character's equipment; see [`equipment::apply_equipment`].
    pub fn apply_equipment(
        &self,
        character: &mut Character,
        primary: Option<&str>,
        secondary: Option<&str>,
        armor: Option<&str>,
    ) {
        apply_equipment(character, &self.reference, primary, secondary, armor);
    }

    /// Continue a character's progression; see [`progression::advance_to`].
    ///
    /// # Errors
    ///
    /// Returns a [`CharacterError`] if `target` is out of range or not above
    /// the current level.
    pub fn advance_to(
        &self,
        character: &mut Character,
        target: u8,
        rngs: &RngBundle,
    ) -> Result<(), CharacterError> {
        advance_to(character, target, &self.reference, rngs)
    }

    /// Start a manual build.
    ///
    /// # Errors
    ///
    /// Returns a [`CharacterError`] for an unknown or mismatched class and
    /// subclass.
    pub fn builder(&self, class: &str, subclass: &str) -> Result<CharacterBuilder<'_>, CharacterError> {
        CharacterBuilder::new(&self.reference, class, subclass)
    }
}

impl CharacterForge<StaticReferenceLoader> {
    /// A forge over the embedded dataset.
    ///
    /// # Errors
    ///
    /// Returns a [`ReferenceDataError`] only if the embedded tables are
    /// broken.
    pub fn embedded() -> Result<Self, ReferenceDataError> {
        Self::new(StaticReferenceLoader)
    }
}
