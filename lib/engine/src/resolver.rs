//! Resolution of human-readable entity labels to ontology URIs.

use crate::queries;
use lehrplan_client::SparqlBackend;
use lehrplan_model::{term_value, ServiceError};
use oxrdf::NamedNodeRef;
use tracing::debug;

/// Resolves a label to an entity URI within one state's graph scope.
///
/// The two instances differ only in the predicate linking a curriculum to
/// the entity. Resolution is always state-scoped; labels are not unique
/// across states.
pub struct EntityResolver {
    kind: &'static str,
    link: NamedNodeRef<'static>,
}

pub const SCHULFACH_RESOLVER: EntityResolver = EntityResolver {
    kind: "Schulfach",
    link: crate::vocab::HAT_SCHULFACH,
};

pub const SCHULART_RESOLVER: EntityResolver = EntityResolver {
    kind: "Schulart",
    link: crate::vocab::HAT_SCHULART,
};

impl EntityResolver {
    /// Resolves `label` case-insensitively, taking the first row of the
    /// explicitly ordered result.
    pub async fn resolve<B: SparqlBackend>(
        &self,
        backend: &B,
        graphs: &[String],
        label: &str,
        bundesland_iri: &str,
    ) -> Result<String, ServiceError> {
        let query = queries::resolve_entity(graphs, self.link, label, bundesland_iri)?;
        let results = backend.execute(&query).await?.into_solutions()?;
        let entity = results
            .solutions()
            .first()
            .and_then(|solution| solution.get("entity"))
            .ok_or_else(|| ServiceError::EntityNotFound {
                kind: self.kind,
                label: label.to_owned(),
            })?;
        let uri = term_value(entity).to_owned();
        debug!(kind = self.kind, label, uri, "resolved entity");
        Ok(uri)
    }
}
