//! Query construction and graph resolution for the Lehrplan service.
//!
//! The entry point is [`LehrplanService`], which turns human-friendly
//! identifiers into graph-scoped SPARQL queries, executes them through a
//! [`lehrplan_client::SparqlBackend`] and renders the results as tabular
//! text.

mod escape;
mod format;
pub mod queries;
mod resolver;
mod service;
mod tree;
pub mod vocab;

pub use escape::{bracketed_iri, quoted_literal};
pub use format::{format_response, format_result_set, NO_RESULTS};
pub use resolver::{EntityResolver, SCHULART_RESOLVER, SCHULFACH_RESOLVER};
pub use service::{LehrplanService, DEFAULT_TREE_DEPTH, NO_CHILDREN};
pub use tree::possible_leaves;
