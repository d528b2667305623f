mod bundesland;
mod error;
mod graphs;
mod results;

pub use bundesland::*;
pub use error::*;
pub use graphs::*;
pub use results::*;

// Re-export the oxrdf and sparesults types this crate's API surfaces.
pub use oxrdf::{Literal, NamedNode, NamedNodeRef, Term, Variable};
pub use sparesults::QuerySolution;
