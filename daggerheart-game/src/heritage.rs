//! Ancestries, communities and the heritage they combine into.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::CharacterError;
use crate::reference::{ReferenceData, ReferenceDataError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ancestry {
    pub name: String,
    pub features: [String; 2],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Community {
    pub name: String,
    pub feature: String,
}

/// One ancestry plus one community, chosen independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heritage {
    pub ancestry: Ancestry,
    pub community: Community,
}

impl Heritage {
    /// Look up a named ancestry and community in the dataset.
    ///
    /// # Errors
    ///
    /// Returns [`CharacterError::UnknownAncestry`] or
    /// [`CharacterError::UnknownCommunity`] when either name is not in the
    /// reference tables. Names match exactly.
    pub fn lookup(
        reference: &ReferenceData,
        ancestry: &str,
        community: &str,
    ) -> Result<Self, CharacterError> {
        let ancestry = reference
            .ancestry(ancestry)
            .ok_or_else(|| CharacterError::UnknownAncestry(ancestry.to_string()))?;
        let community = reference
            .community(community)
            .ok_or_else(|| CharacterError::UnknownCommunity(community.to_string()))?;
        Ok(Self {
            ancestry: ancestry.clone(),
            community: community.clone(),
        })
    }
}

/// Pick an ancestry and a community uniformly and independently.
///
/// # Errors
///
/// Returns [`ReferenceDataError::Empty`] if either table has no entries,
/// which a validated dataset rules out.
pub fn select_heritage<R>(reference: &ReferenceData, rng: &mut R) -> Result<Heritage, ReferenceDataError>
where
    R: Rng + ?Sized,
{
    let ancestry = reference
        .ancestries()
        .choose(rng)
        .ok_or(ReferenceDataError::Empty { name: "ancestries" })?;
    let community = reference
        .communities()
        .choose(rng)
        .ok_or(ReferenceDataError::Empty { name: "communities" })?;
    Ok(Heritage {
        ancestry: ancestry.clone(),
        community: community.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn reference() -> ReferenceData {
        ReferenceData::embedded().expect("embedded dataset parses")
    }

    #[test]
    fn selection_draws_from_both_tables() {
        let reference = reference();
        let mut rng = SmallRng::seed_from_u64(42);
        let heritage = select_heritage(&reference, &mut rng).unwrap();
        assert!(reference.ancestry(&heritage.ancestry.name).is_some());
        assert!(reference.community(&heritage.community.name).is_some());
        assert_eq!(heritage.ancestry.features.len(), 2);
    }

    #[test]
    fn selection_covers_every_community_over_many_seeds() {
        let reference = reference();
        let mut seen = std::collections::BTreeSet::new();
        for seed in 0..500 {
            let mut rng = SmallRng::seed_from_u64(seed);
            seen.insert(select_heritage(&reference, &mut rng).unwrap().community.name);
        }
        assert_eq!(seen.len(), reference.communities().len());
    }

    #[test]
    fn lookup_rejects_unknown_names() {
        let reference = reference();
        assert!(Heritage::lookup(&reference, "Human", "Highborne").is_ok());
        assert!(matches!(
            Heritage::lookup(&reference, "Vampire", "Highborne"),
            Err(CharacterError::UnknownAncestry(name)) if name == "Vampire"
        ));
        assert!(matches!(
            Heritage::lookup(&reference, "Human", "Moonborne"),
            Err(CharacterError::UnknownCommunity(_))
        ));
    }
}
