//! ## Crate layout
//! - `build`: discovery, deduplication, model building, and code emission.
//! - `symbols`: the host-supplied symbol graph the generator walks.
//!
//! The `prelude` module mirrors the surface a host build script touches:
//! graph construction on the way in, generated files and diagnostics on
//! the way out.

pub use optreg_build as build;
pub use optreg_symbols as symbols;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use optreg_build::{GenOutput, Generator, generate};

///
/// Host Prelude
///

pub mod prelude {
    pub use crate::build::{
        GenOutput, Generator,
        diagnostic::{DiagCode, Diagnostic, Diagnostics, Severity},
        emit::GeneratedFile,
        generate,
        options::{AccessorStyle, AltKeyMode, Exposure, GenOptions},
    };
    pub use crate::symbols::{
        graph::SymbolGraph,
        node::{
            CollectionMarker, Ctor, CtorArg, LookupMarker, Marker, Member, MethodSig, Module,
            OptionMarker, Param, Property, TypeDecl, TypeKind,
        },
        types::{Location, TypePath, TypeRef},
    };
}
