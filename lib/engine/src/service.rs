//! The caller-facing query operations.

use crate::format::{format_response, format_result_set};
use crate::queries::{self, LehrplanFilter};
use crate::resolver::{SCHULART_RESOLVER, SCHULFACH_RESOLVER};
use crate::tree::possible_leaves;
use crate::vocab;
use lehrplan_client::SparqlBackend;
use lehrplan_model::{resolve_bundesland, GraphRegistry, ResolvedBundesland, ServiceError};
use std::sync::Arc;
use tracing::debug;

/// Traversal depth used when the caller does not give one.
pub const DEFAULT_TREE_DEPTH: u8 = 2;
const MAX_TREE_DEPTH: u8 = 10;
const MAX_JAHRGANGSSTUFE: u8 = 13;

/// Rendered instead of the generic sentinel when a node has no children.
pub const NO_CHILDREN: &str = "No children found (leaf node).";

/// Answers query operations against one endpoint and one frozen graph
/// registry.
///
/// Each operation runs to completion as one logical request: resolution
/// sub-queries are awaited strictly before the final query, since the final
/// query interpolates the resolved URIs. There is no retry and no caching of
/// resolved URIs across requests.
pub struct LehrplanService<B> {
    backend: B,
    registry: Arc<GraphRegistry>,
}

impl<B: SparqlBackend> LehrplanService<B> {
    pub fn new(backend: B, registry: Arc<GraphRegistry>) -> Self {
        Self { backend, registry }
    }

    pub fn registry(&self) -> &GraphRegistry {
        &self.registry
    }

    /// Graphs to query for a resolved state: infrastructure plus the state
    /// graph when one is configured. A code-less URI gets no state graph.
    fn scope(&self, resolved: &ResolvedBundesland) -> Vec<String> {
        match &resolved.code {
            Some(code) => self.registry.scope_for(code),
            None => self.registry.infrastructure().to_vec(),
        }
    }

    /// Executes caller-supplied query text as-is against the endpoint.
    pub async fn raw_query(&self, query: &str) -> Result<String, ServiceError> {
        let response = self.backend.execute(query).await?;
        Ok(format_response(&response))
    }

    /// Lists every state curricula are recorded for.
    pub async fn list_bundeslaender(&self) -> Result<String, ServiceError> {
        let query = queries::list_bundeslaender(&self.registry.all_graphs());
        let results = self.backend.execute(&query).await?.into_solutions()?;
        Ok(format_result_set(&results))
    }

    /// Lists the subjects of one state.
    pub async fn list_schulfaecher(&self, bundesland: &str) -> Result<String, ServiceError> {
        let resolved = resolve_bundesland(bundesland)?;
        let query = queries::list_schulfaecher(&self.scope(&resolved), &resolved.uri)?;
        let results = self.backend.execute(&query).await?.into_solutions()?;
        Ok(format_result_set(&results))
    }

    /// Lists the school types of one state.
    pub async fn list_schularten(&self, bundesland: &str) -> Result<String, ServiceError> {
        let resolved = resolve_bundesland(bundesland)?;
        let query = queries::list_schularten(&self.scope(&resolved), &resolved.uri)?;
        let results = self.backend.execute(&query).await?.into_solutions()?;
        Ok(format_result_set(&results))
    }

    /// Finds curricula by state, subject, school type and grade level.
    ///
    /// Subject and school-type labels are resolved within the state's scope
    /// first, so they require a Bundesland.
    pub async fn find_lehrplaene(
        &self,
        bundesland: Option<&str>,
        schulfach: Option<&str>,
        schulart: Option<&str>,
        jahrgangsstufe: Option<u8>,
    ) -> Result<String, ServiceError> {
        if let Some(grade) = jahrgangsstufe {
            if !(1..=MAX_JAHRGANGSSTUFE).contains(&grade) {
                return Err(ServiceError::validation(format!(
                    "jahrgangsstufe must be between 1 and {MAX_JAHRGANGSSTUFE}, got {grade}"
                )));
            }
        }
        if bundesland.is_none() && (schulfach.is_some() || schulart.is_some()) {
            return Err(ServiceError::validation(
                "bundesland is required when filtering by schulfach or schulart",
            ));
        }

        let resolved = bundesland.map(resolve_bundesland).transpose()?;
        let graphs = match &resolved {
            Some(r) => self.scope(r),
            None => self.registry.all_graphs(),
        };

        let mut filter = LehrplanFilter {
            bundesland: resolved.as_ref().map(|r| r.uri.clone()),
            jahrgangsstufe: jahrgangsstufe.map(vocab::jahrgangsstufe_iri),
            ..LehrplanFilter::default()
        };
        if let (Some(label), Some(r)) = (schulfach, &resolved) {
            filter.schulfach = Some(
                SCHULFACH_RESOLVER
                    .resolve(&self.backend, &graphs, label, &r.uri)
                    .await?,
            );
        }
        if let (Some(label), Some(r)) = (schulart, &resolved) {
            filter.schulart = Some(
                SCHULART_RESOLVER
                    .resolve(&self.backend, &graphs, label, &r.uri)
                    .await?,
            );
        }

        let query = queries::find_lehrplaene(&graphs, &filter)?;
        let results = self.backend.execute(&query).await?.into_solutions()?;
        debug!(rows = results.len(), "find_lehrplaene finished");
        Ok(format_result_set(&results))
    }

    /// Returns the edge table of the curriculum tree under `root_uri`, down
    /// to `depth` levels, annotated with possible leaves.
    pub async fn lehrplan_tree(
        &self,
        root_uri: &str,
        depth: Option<u8>,
    ) -> Result<String, ServiceError> {
        let depth = depth.unwrap_or(DEFAULT_TREE_DEPTH);
        if !(1..=MAX_TREE_DEPTH).contains(&depth) {
            return Err(ServiceError::validation(format!(
                "depth must be between 1 and {MAX_TREE_DEPTH}, got {depth}"
            )));
        }

        let query = queries::tree_edges(&self.registry.all_graphs(), root_uri, depth)?;
        let results = self.backend.execute(&query).await?.into_solutions()?;

        let mut text = format_result_set(&results);
        let leaves = possible_leaves(&results);
        if !leaves.is_empty() {
            text.push_str("\n\nPossible leaf nodes (no children within the requested depth):\n");
            for leaf in &leaves {
                text.push_str(leaf);
                text.push('\n');
            }
            text.push_str("Deeper levels may exist. Use get_children on a node to continue.");
        }
        Ok(text)
    }

    /// Returns the direct children of one node, or the leaf-node text.
    pub async fn children(&self, node_uri: &str) -> Result<String, ServiceError> {
        let query = queries::children(&self.registry.all_graphs(), node_uri)?;
        let results = self.backend.execute(&query).await?.into_solutions()?;
        if results.is_empty() {
            return Ok(NO_CHILDREN.to_owned());
        }
        Ok(format_result_set(&results))
    }

    /// Full-text search over curriculum content, optionally scoped to one
    /// state and one subject. A subject requires a Bundesland, because the
    /// subject label is resolved within the state's scope.
    pub async fn search(
        &self,
        suchtext: &str,
        bundesland: Option<&str>,
        schulfach: Option<&str>,
    ) -> Result<String, ServiceError> {
        if schulfach.is_some() && bundesland.is_none() {
            return Err(ServiceError::validation(
                "bundesland is required when searching within a schulfach",
            ));
        }
        let Some(expression) = queries::text_match_expression(suchtext) else {
            return Err(ServiceError::validation(
                "search text must contain at least one word",
            ));
        };

        let resolved = bundesland.map(resolve_bundesland).transpose()?;
        let graphs = match &resolved {
            Some(r) => self.scope(r),
            None => self.registry.all_graphs(),
        };

        let query = if let (Some(label), Some(r)) = (schulfach, &resolved) {
            let schulfach_uri = SCHULFACH_RESOLVER
                .resolve(&self.backend, &graphs, label, &r.uri)
                .await?;
            queries::search_in_schulfach(&graphs, &expression, &schulfach_uri)?
        } else {
            queries::search(&graphs, &expression)
        };
        let results = self.backend.execute(&query).await?.into_solutions()?;
        Ok(format_result_set(&results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lehrplan_model::{QueryResponse, GRAPH_ONTOLOGIE, GRAPH_SCHULARTEN, GRAPH_SCHULFAECHER};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    const EMPTY_ROWS: &str =
        r#"{"head": {"vars": ["child", "label"]}, "results": {"bindings": []}}"#;

    /// Scripted backend: pops one canned JSON body per executed query and
    /// records the query text.
    #[derive(Clone)]
    struct StubBackend {
        responses: Arc<Mutex<VecDeque<String>>>,
        queries: Arc<Mutex<Vec<String>>>,
    }

    impl StubBackend {
        fn new(bodies: &[&str]) -> Self {
            Self {
                responses: Arc::new(Mutex::new(
                    bodies.iter().map(|b| (*b).to_owned()).collect(),
                )),
                queries: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SparqlBackend for StubBackend {
        async fn execute(&self, query: &str) -> Result<QueryResponse, ServiceError> {
            self.queries.lock().unwrap().push(query.to_owned());
            let body = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("no scripted response left");
            QueryResponse::from_json(body.as_bytes())
        }
    }

    fn registry() -> Arc<GraphRegistry> {
        Arc::new(
            GraphRegistry::from_vars([
                (GRAPH_ONTOLOGIE.to_owned(), "urn:graph:ontologie".to_owned()),
                (
                    GRAPH_SCHULFAECHER.to_owned(),
                    "urn:graph:schulfaecher".to_owned(),
                ),
                (
                    GRAPH_SCHULARTEN.to_owned(),
                    "urn:graph:schularten".to_owned(),
                ),
                ("GRAPH_STATE_SN".to_owned(), "urn:graph:sachsen".to_owned()),
                ("GRAPH_STATE_BY".to_owned(), "urn:graph:bayern".to_owned()),
            ])
            .unwrap(),
        )
    }

    fn service(bodies: &[&str]) -> (LehrplanService<StubBackend>, StubBackend) {
        let backend = StubBackend::new(bodies);
        (
            LehrplanService::new(backend.clone(), registry()),
            backend,
        )
    }

    fn entity_row(uri: &str) -> String {
        format!(
            r#"{{"head": {{"vars": ["entity"]}}, "results": {{"bindings": [
                {{"entity": {{"type": "uri", "value": "{uri}"}}}}
            ]}}}}"#
        )
    }

    #[tokio::test]
    async fn find_lehrplaene_scopes_and_filters_for_sachsen() {
        let (service, backend) = service(&[
            &entity_row("https://w3id.org/lehrplan/data#Biologie"),
            &entity_row("https://w3id.org/lehrplan/data#Gymnasium"),
            r#"{"head": {"vars": ["lehrplan", "label"]}, "results": {"bindings": [
                {"lehrplan": {"type": "uri", "value": "urn:lp:bio-gym"},
                 "label": {"type": "literal", "value": "Biologie Gymnasium"}}
            ]}}"#,
        ]);

        let text = service
            .find_lehrplaene(Some("SN"), Some("Biologie"), Some("Gymnasium"), None)
            .await
            .unwrap();
        assert_eq!(
            text,
            "lehrplan | label\n---\nurn:lp:bio-gym | Biologie Gymnasium"
        );

        let queries = backend.queries();
        assert_eq!(queries.len(), 3);
        for query in &queries {
            assert!(query.contains("FROM <urn:graph:sachsen>"));
            assert!(!query.contains("FROM <urn:graph:bayern>"));
        }

        let final_query = &queries[2];
        assert_eq!(final_query.matches("hatBundesland>").count(), 1);
        assert_eq!(final_query.matches("hatSchulfach>").count(), 1);
        assert_eq!(final_query.matches("hatSchulart>").count(), 1);
        assert!(!final_query.contains("hatJahrgangsstufe"));
        assert!(final_query.contains(
            "?typ <http://www.w3.org/2000/01/rdf-schema#subClassOf>* <https://w3id.org/lehrplan/ontology#Lehrplan> ."
        ));
        assert!(final_query
            .contains("<https://w3id.org/lehrplan/bundesland#SN>"));
        assert!(final_query.ends_with("LIMIT 50"));
    }

    #[tokio::test]
    async fn subject_filter_without_bundesland_is_rejected_before_querying() {
        let (service, backend) = service(&[]);
        let err = service
            .find_lehrplaene(None, Some("Biologie"), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(backend.queries().is_empty());
    }

    #[tokio::test]
    async fn grade_out_of_range_is_rejected_before_querying() {
        let (service, backend) = service(&[]);
        let err = service
            .find_lehrplaene(Some("SN"), None, None, Some(14))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(backend.queries().is_empty());
    }

    #[tokio::test]
    async fn depth_out_of_range_is_rejected_before_querying() {
        let (service, backend) = service(&[]);
        for depth in [0, 11] {
            let err = service
                .lehrplan_tree("urn:lp:root", Some(depth))
                .await
                .unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)));
        }
        assert!(backend.queries().is_empty());
    }

    #[tokio::test]
    async fn unknown_bundesland_names_the_input() {
        let (service, _) = service(&[]);
        let err = service.list_schulfaecher("Atlantis").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown Bundesland 'Atlantis'. Use a two-letter code (e.g. 'SN'), a German state name (e.g. 'Sachsen') or a Bundesland URI."
        );
    }

    #[tokio::test]
    async fn unresolved_label_points_at_the_listing_tool() {
        let (service, _) = service(&[EMPTY_ROWS]);
        let err = service
            .find_lehrplaene(Some("SN"), Some("Alchemie"), None, None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Schulfach 'Alchemie' not found"));
        assert!(err.to_string().contains("listing tool"));
    }

    #[tokio::test]
    async fn childless_node_renders_the_leaf_text() {
        let (service, _) = service(&[EMPTY_ROWS]);
        let text = service.children("urn:lp:leaf").await.unwrap();
        assert_eq!(text, "No children found (leaf node).");
    }

    #[tokio::test]
    async fn tree_annotates_possible_leaves() {
        let (service, backend) = service(&[r#"{
            "head": {"vars": ["parent", "parentLabel", "child", "childLabel"]},
            "results": {"bindings": [
                {"parent": {"type": "uri", "value": "urn:lp:root"},
                 "child": {"type": "uri", "value": "urn:lp:a"}},
                {"parent": {"type": "uri", "value": "urn:lp:a"},
                 "child": {"type": "uri", "value": "urn:lp:b"}}
            ]}
        }"#]);

        let text = service.lehrplan_tree("urn:lp:root", None).await.unwrap();
        assert!(text.starts_with("parent | parentLabel | child | childLabel"));
        assert!(text.contains("Possible leaf nodes"));
        assert!(text.contains("urn:lp:b"));
        assert!(!text.contains("urn:lp:a\n"));
        assert!(text.ends_with("Use get_children on a node to continue."));

        // Default depth unrolls two UNION branches.
        let query = &backend.queries()[0];
        assert_eq!(query.matches("UNION").count(), 1);
    }

    #[tokio::test]
    async fn search_requires_bundesland_for_subject_scope() {
        let (service, backend) = service(&[]);
        let err = service
            .search("Evolution", None, Some("Biologie"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(backend.queries().is_empty());
    }

    #[tokio::test]
    async fn search_builds_the_and_expression() {
        let (service, backend) = service(&[
            r#"{"head": {"vars": ["treffer", "label", "parent"]}, "results": {"bindings": []}}"#,
        ]);
        let text = service
            .search("Fisch Evolution", Some("Sachsen"), None)
            .await
            .unwrap();
        assert_eq!(text, "No results.");

        let query = &backend.queries()[0];
        assert!(query.contains(r#"bif:contains "'Fisch*' AND 'Evolution*'""#));
        assert!(query.contains("FROM <urn:graph:sachsen>"));
    }

    #[tokio::test]
    async fn raw_query_passes_text_through_unchanged() {
        let (service, backend) = service(&[r#"{"head": {}, "boolean": true}"#]);
        let text = service
            .raw_query("ASK { ?s ?p ?o }")
            .await
            .unwrap();
        assert_eq!(text, "true");
        assert_eq!(backend.queries(), vec!["ASK { ?s ?p ?o }".to_owned()]);
    }
}
