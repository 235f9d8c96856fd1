//! Navigation catalog wiring.
//!
//! `NavigationNode` mirrors one entry of the configured section tree;
//! `NavigationRegistry` validates a tree once and answers role-scoped menu and
//! route queries against it.

pub mod model;
pub mod registry;

pub use model::NavigationNode;
pub use registry::NavigationRegistry;
