use crate::scan::CollectionDecl;
use optreg_symbols::{graph::SymbolGraph, types::TypePath};

/// Simple name of the known generic registry base. The surrounding
/// framework nests `Registry<Key, Element>` abstractions; the second type
/// argument (or the only one, for the single-parameter shorthand) is the
/// public type lookup accessors expose.
const REGISTRY_BASE: &str = "Registry";

/// Infer the public return type for a collection's accessors.
///
/// The marker's explicit default return wins outright. Otherwise the
/// collection declaration's own inheritance chain is walked looking for
/// the generic registry base; if the chain is exhausted, accessors fall
/// back to the base type's simple name.
pub(crate) fn resolve_return_type(graph: &SymbolGraph, coll: &CollectionDecl<'_>) -> TypePath {
    if let Some(ret) = &coll.marker.default_return {
        return ret.clone();
    }

    for decl in graph.base_chain(coll.decl) {
        if let Some(base) = &decl.base {
            if base.path.short() == REGISTRY_BASE {
                match base.args.as_slice() {
                    [] => {}
                    [only] => return only.path.clone(),
                    [_, element, ..] => return element.path.clone(),
                }
            }
        }
    }

    TypePath::from(coll.marker.base_type.short())
}
