//! Constant terms of the Lehrplan ontology schema.
//!
//! These identifiers are fixed by the published ontology and must match
//! exactly for querying to work.

use oxrdf::NamedNodeRef;

/// Namespace of the Lehrplan ontology.
pub const LP_NS: &str = "https://w3id.org/lehrplan/ontology#";

/// Root class of all curriculum documents.
pub const LEHRPLAN: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("https://w3id.org/lehrplan/ontology#Lehrplan");
/// Parent → child relation of the curriculum tree ("hat Teil").
pub const HAT_TEIL: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("https://w3id.org/lehrplan/ontology#hatTeil");
/// Links a curriculum to its subject.
pub const HAT_SCHULFACH: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("https://w3id.org/lehrplan/ontology#hatSchulfach");
/// Links a curriculum to its school type.
pub const HAT_SCHULART: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("https://w3id.org/lehrplan/ontology#hatSchulart");
/// Links a curriculum to its federal state.
pub const HAT_BUNDESLAND: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("https://w3id.org/lehrplan/ontology#hatBundesland");
/// Links a curriculum to a grade level.
pub const HAT_JAHRGANGSSTUFE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("https://w3id.org/lehrplan/ontology#hatJahrgangsstufe");

pub const RDFS_LABEL: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#label");
pub const RDFS_SUB_CLASS_OF: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#subClassOf");

/// Grade-level individuals carry sequential numeric ids starting here.
pub const JAHRGANGSSTUFE_BASE_ID: u32 = 100;

/// The IRI of the grade-level individual for a numeric grade.
pub fn jahrgangsstufe_iri(grade: u8) -> String {
    format!("{LP_NS}JGS_{}", JAHRGANGSSTUFE_BASE_ID + u32::from(grade))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_iris_follow_the_numbering_scheme() {
        assert_eq!(
            jahrgangsstufe_iri(1),
            "https://w3id.org/lehrplan/ontology#JGS_101"
        );
        assert_eq!(
            jahrgangsstufe_iri(13),
            "https://w3id.org/lehrplan/ontology#JGS_113"
        );
    }
}
