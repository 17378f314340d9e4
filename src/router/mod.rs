//! Route table loading and path matching.
//!
//! Routes are declared in a YAML file (or built in code as a
//! `Vec<RouteDef>`) and compiled into regexes once at [`Router`]
//! construction. Matching a request yields a [`RouteMatch`] carrying the
//! route definition and the extracted path parameters.

mod load;
#[allow(clippy::module_inception)]
mod router;

pub use load::load_routes;
pub use router::{RouteDef, RouteMatch, Router};
