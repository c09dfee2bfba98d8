use crate::quiz::catalog::Catalog;
use crate::quiz::error::CatalogError;
use crate::quiz::{Gender, PersonalityKey, PersonalityType, Scores};

/// Picks the result profile for a finished run.
///
/// A missing profile is reported as a catalog error instead of falling back
/// to some other entry, which would hide a broken catalog.
pub fn resolve<'a>(
    catalog: &'a Catalog,
    gender: Gender,
    scores: Scores,
) -> Result<&'a PersonalityType, CatalogError> {
    let key = PersonalityKey::new(scores.dominant(), gender);
    let id = key.id();
    log::debug!(
        "resolving {} from teto={} egen={}",
        id,
        scores.teto,
        scores.egen
    );
    catalog
        .personality(&id)
        .ok_or(CatalogError::MissingPersonality(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_teto_resolves_to_teto_profile() {
        let catalog = Catalog::builtin().unwrap();
        let result = resolve(&catalog, Gender::Female, Scores::new(20, 10)).unwrap();
        assert_eq!(result.id, "teto_female");
    }

    #[test]
    fn higher_egen_resolves_to_egen_profile() {
        let catalog = Catalog::builtin().unwrap();
        let result = resolve(&catalog, Gender::Male, Scores::new(9, 21)).unwrap();
        assert_eq!(result.id, "egen_male");
    }

    #[test]
    fn tie_goes_to_egen() {
        let catalog = Catalog::builtin().unwrap();
        let result = resolve(&catalog, Gender::Male, Scores::new(5, 5)).unwrap();
        assert_eq!(result.id, "egen_male");
    }

    #[test]
    fn missing_profile_is_a_catalog_error() {
        let builtin = Catalog::builtin().unwrap();
        let personalities = builtin
            .personality_types()
            .filter(|p| p.id != "egen_female")
            .cloned()
            .collect();
        let catalog = Catalog::unchecked(builtin.questions().to_vec(), personalities);

        let err = resolve(&catalog, Gender::Female, Scores::new(3, 27)).unwrap_err();
        assert_eq!(err, CatalogError::MissingPersonality("egen_female".into()));

        let present = resolve(&catalog, Gender::Female, Scores::new(27, 3)).unwrap();
        assert_eq!(present.id, "teto_female");
    }

    #[test]
    fn same_input_gives_same_profile() {
        let catalog = Catalog::builtin().unwrap();
        for _ in 0..10 {
            let result = resolve(&catalog, Gender::Female, Scores::new(14, 16)).unwrap();
            assert_eq!(result.id, "egen_female");
        }
    }
}
