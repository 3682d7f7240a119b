//! Bottom-up match/not-found bookkeeping for nested routes.
//!
//! Each mounted route owns a node keyed by its template. Reports travel from
//! the reporting node up to the root, re-running [`reduce`] at every level.

mod data;
mod tree;

pub use data::{DEFAULT_ROOT_ROUTE, SubrouteData, any_not_found, is_not_found, reduce};
pub use tree::{SubrouteScope, SubrouteTree};
