//! Shape analysis of traversal results.

use lehrplan_model::{term_value, QueryResultSet};
use std::collections::{BTreeSet, HashSet};

/// URIs that appear as a child but never as a parent within `edges`.
///
/// This is an advisory heuristic, not ground truth: a node may have children
/// beyond the traversal's depth bound and still show up here because the
/// bound cut the query off. Callers surface it as an annotation and point at
/// the direct-children operation for continuation.
pub fn possible_leaves(edges: &QueryResultSet) -> BTreeSet<String> {
    let mut parents = HashSet::new();
    let mut children = BTreeSet::new();
    for solution in edges.solutions() {
        if let Some(parent) = solution.get("parent") {
            parents.insert(term_value(parent).to_owned());
        }
        if let Some(child) = solution.get("child") {
            children.insert(term_value(child).to_owned());
        }
    }
    children.retain(|child| !parents.contains(child));
    children
}
