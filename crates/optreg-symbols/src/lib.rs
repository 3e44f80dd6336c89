pub mod graph;
pub mod node;
pub mod types;

/// Maximum base-chain depth followed before a walk is abandoned.
///
/// Host toolchains can hand over cyclic or absurdly deep inheritance
/// metadata; every chain walk in this crate is capped at this depth.
pub const MAX_BASE_DEPTH: usize = 64;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        MAX_BASE_DEPTH,
        graph::{GraphError, SymbolGraph},
        node::*,
        types::{Location, TypePath, TypeRef},
    };
}
