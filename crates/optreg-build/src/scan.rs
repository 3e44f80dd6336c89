use optreg_symbols::{
    graph::SymbolGraph,
    node::{CollectionMarker, Marker, OptionMarker, TypeDecl},
    types::TypePath,
};
use std::collections::BTreeMap;

///
/// OptionCandidate
///
/// A discovered type carrying an option marker. The same fully-qualified
/// name may be discovered several times across reference paths; the
/// deduplication resolver collapses those later.
///

#[derive(Clone, Copy, Debug)]
pub struct OptionCandidate<'g> {
    pub decl: &'g TypeDecl,
    pub marker: &'g OptionMarker,
    pub module: &'g str,
}

impl OptionCandidate<'_> {
    #[must_use]
    pub fn fq_name(&self) -> &TypePath {
        &self.decl.path
    }
}

///
/// CollectionDecl
///

#[derive(Clone, Copy, Debug)]
pub struct CollectionDecl<'g> {
    pub decl: &'g TypeDecl,
    pub marker: &'g CollectionMarker,
}

///
/// DiscoveryIndex
///
/// The two-pass discovery output: option candidates grouped by the exact
/// collection type they name, plus the collection declarations of the
/// current module. Built once per pass and read-only afterwards — no
/// per-collection re-scanning.
///
/// Option markers are honored across the current module and every
/// directly or transitively referenced module, nested types included.
/// Collection markers are honored only in the current module: a registry
/// is declared where it is consumed, never inherited from a dependency.
/// A graph without marker-bearing types yields an empty index, so the
/// generator runs harmlessly in modules that never use the markers.
///

#[derive(Debug)]
pub struct DiscoveryIndex<'g> {
    options: BTreeMap<TypePath, Vec<OptionCandidate<'g>>>,
    collections: Vec<CollectionDecl<'g>>,
}

impl<'g> DiscoveryIndex<'g> {
    #[must_use]
    pub fn build(graph: &'g SymbolGraph) -> Self {
        // Pass 1: option markers, whole scope.
        let mut options: BTreeMap<TypePath, Vec<OptionCandidate<'g>>> = BTreeMap::new();
        for module in graph.modules_in_scope() {
            for decl in module.iter_types() {
                for marker in &decl.markers {
                    if let Marker::Option(option) = marker {
                        options.entry(option.collection.clone()).or_default().push(
                            OptionCandidate {
                                decl,
                                marker: option,
                                module: module.name.as_str(),
                            },
                        );
                    }
                }
            }
        }

        // Pass 2: collection markers, current module only.
        let collections = graph
            .current_module()
            .iter_types()
            .filter_map(|decl| {
                decl.collection_marker()
                    .map(|marker| CollectionDecl { decl, marker })
            })
            .collect();

        Self {
            options,
            collections,
        }
    }

    #[must_use]
    pub fn collections(&self) -> &[CollectionDecl<'g>] {
        &self.collections
    }

    /// Candidates declared for exactly this collection type. Lookups match
    /// on the collection symbol, never the base type, so collections
    /// sharing a base in different domains stay separate.
    #[must_use]
    pub fn candidates_for(&self, collection: &TypePath) -> &[OptionCandidate<'g>] {
        self.options
            .get(collection)
            .map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty() && self.collections.is_empty()
    }
}
