//! Archetype-driven heuristics for class, subclass, traits and experiences.

use log::{debug, trace};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::archetype::{Archetype, ArchetypeRequest};
use crate::classes::{ClassId, SubclassId};
use crate::error::CharacterError;
use crate::traits::{Trait, TraitScores};

const PRIMARY_CLASS_WEIGHT: u32 = 3;
const SECONDARY_CLASS_WEIGHT: u32 = 1;

/// Pick a class and subclass for an archetype request.
///
/// A named archetype weights each of its primary classes three times as
/// heavily as each secondary class, then takes the archetype's preferred
/// subclass for that class, falling back to a uniform pick. A wildcard picks
/// both uniformly.
pub fn choose_class_and_subclass<R>(request: ArchetypeRequest, rng: &mut R) -> (ClassId, SubclassId)
where
    R: Rng + ?Sized,
{
    let class = match request {
        ArchetypeRequest::Named(archetype) => weighted_class(archetype, rng),
        ArchetypeRequest::Random => None,
    }
    .or_else(|| ClassId::ALL.choose(rng).copied())
    .unwrap_or(ClassId::Warrior);
    let subclass = choose_subclass(request.named(), class, rng);
    debug!("selected {class} / {subclass} for {request:?}");
    (class, subclass)
}

fn weighted_class<R>(archetype: Archetype, rng: &mut R) -> Option<ClassId>
where
    R: Rng + ?Sized,
{
    let pool: Vec<(ClassId, u32)> = archetype
        .primary_classes()
        .iter()
        .map(|c| (*c, PRIMARY_CLASS_WEIGHT))
        .chain(
            archetype
                .secondary_classes()
                .iter()
                .map(|c| (*c, SECONDARY_CLASS_WEIGHT)),
        )
        .collect();
    let (idx, roll) = choose_weighted(&pool, rng)?;
    let class = pool.get(idx).map(|(class, _)| *class)?;
    trace!("class roll {roll} picked {class} for {archetype}");
    Some(class)
}

/// Index of one entry drawn with probability proportional to its weight,
/// with the roll that chose it. `None` when every weight is zero.
pub(crate) fn choose_weighted<T, R>(weights: &[(T, u32)], rng: &mut R) -> Option<(usize, u32)>
where
    R: Rng + ?Sized,
{
    let total: u32 = weights.iter().map(|(_, weight)| *weight).sum();
    if total == 0 {
        return None;
    }
    let roll = rng.gen_range(0..total);
    let mut current = 0;
    for (idx, (_, weight)) in weights.iter().enumerate() {
        current += *weight;
        if roll < current {
            return Some((idx, roll));
        }
    }
    Some((weights.len() - 1, roll))
}

/// The archetype's preferred subclass for `class`, else a uniform pick.
pub fn choose_subclass<R>(archetype: Option<Archetype>, class: ClassId, rng: &mut R) -> SubclassId
where
    R: Rng + ?Sized,
{
    if let Some(preferred) = archetype.and_then(|a| a.preferred_subclass(class)) {
        return preferred;
    }
    let options = class.subclasses();
    options.choose(rng).copied().unwrap_or(options[0])
}

/// Settle class and subclass from optional explicit choices.
///
/// Both given: used as is, provided the subclass belongs to the class.
/// Class only: subclass as in [`choose_subclass`]. Subclass only: its own
/// class. Neither: [`choose_class_and_subclass`].
///
/// # Errors
///
/// Returns [`CharacterError::SubclassMismatch`] when both are given and
/// disagree.
pub fn resolve_class_and_subclass<R>(
    request: ArchetypeRequest,
    class: Option<ClassId>,
    subclass: Option<SubclassId>,
    rng: &mut R,
) -> Result<(ClassId, SubclassId), CharacterError>
where
    R: Rng + ?Sized,
{
    match (class, subclass) {
        (Some(class), Some(subclass)) if subclass.class() == class => Ok((class, subclass)),
        (Some(class), Some(subclass)) => Err(CharacterError::SubclassMismatch {
            class: class.to_string(),
            subclass: subclass.to_string(),
        }),
        (Some(class), None) => Ok((class, choose_subclass(request.named(), class, rng))),
        (None, Some(subclass)) => Ok((subclass.class(), subclass)),
        (None, None) => Ok(choose_class_and_subclass(request, rng)),
    }
}

/// Distribute the starting modifier array over the archetype's trait
/// priority order, with the subclass spellcast trait (or, lacking a
/// subclass, the class's primary trait) moved to the front.
#[must_use]
pub fn assign_traits(archetype: Archetype, class: ClassId, subclass: Option<SubclassId>) -> TraitScores {
    let primary = subclass.map_or(class.info().primary_trait, |sc| sc.info().spellcast_trait);
    let mut order: Vec<Trait> = archetype.trait_priorities().to_vec();
    if let Some(pos) = order.iter().position(|t| *t == primary) {
        let lead = order.remove(pos);
        order.insert(0, lead);
    }
    TraitScores::from_priority(&order)
}

/// Two archetype-themed experiences, each suffixed with the class name.
#[must_use]
pub fn generate_experiences(archetype: Archetype, class: ClassId) -> [String; 2] {
    archetype
        .experience_themes()
        .map(|theme| format!("{theme} {class}"))
}
