//! Build-time registry generation over a host-supplied symbol graph.
//!
//! The pipeline runs once per graph: discover marker-bearing types,
//! collapse duplicate discoveries, resolve each collection into an
//! immutable model, then emit one registry source unit per collection
//! (plus a shared null-object unit per trait base). Collections fail
//! independently; a bad declaration never blocks its siblings.

pub mod diagnostic;
pub mod emit;
pub mod model;
pub mod options;
pub mod scan;

mod dedupe;
mod keys;
mod ret;

use crate::{
    diagnostic::{DiagCode, Diagnostic, Diagnostics},
    emit::{EmitError, GeneratedFile, RegistryEmitter},
    model::CollectionModel,
    options::GenOptions,
    scan::DiscoveryIndex,
};
use optreg_symbols::graph::SymbolGraph;
use std::collections::BTreeSet;

///
/// GenOutput
///
/// Everything one generation pass produced: the source units to hand to
/// the host toolchain and the full diagnostic stream. Files are only
/// present for collections that resolved and emitted cleanly.
///

#[derive(Debug)]
pub struct GenOutput {
    pub files: Vec<GeneratedFile>,
    pub diagnostics: Diagnostics,
}

impl GenOutput {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

///
/// Generator
///
/// One generation pass over a symbol graph.
///

pub struct Generator<'g> {
    graph: &'g SymbolGraph,
    options: GenOptions,
}

impl<'g> Generator<'g> {
    #[must_use]
    pub fn new(graph: &'g SymbolGraph) -> Self {
        Self {
            graph,
            options: GenOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: GenOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn run(self) -> GenOutput {
        let index = DiscoveryIndex::build(self.graph);

        let mut files = Vec::new();
        let mut diagnostics = Diagnostics::new();
        // Collections sharing a trait base share one null-object unit.
        let mut null_units: BTreeSet<String> = BTreeSet::new();

        for coll in index.collections() {
            let mut diags = Diagnostics::new();
            let candidates = dedupe::resolve_candidates(
                self.graph,
                index.candidates_for(&coll.decl.path).to_vec(),
                &mut diags,
            );

            if let Some(model) = CollectionModel::build(self.graph, coll, &candidates, &mut diags)
            {
                match self.emit_collection(&model) {
                    Ok(emitted) => {
                        for file in emitted {
                            if file.name.ends_with(".null.rs")
                                && !null_units.insert(file.name.clone())
                            {
                                continue;
                            }
                            files.push(file);
                        }
                    }
                    Err(err) => diags.add(emission_failure(&model.collection_name, &err)),
                }
            }

            diagnostics.merge(diags);
        }

        GenOutput { files, diagnostics }
    }

    // All-or-nothing per collection: a registry whose null-object unit
    // failed to emit is withheld rather than shipped half-broken.
    fn emit_collection(&self, model: &CollectionModel) -> Result<Vec<GeneratedFile>, EmitError> {
        let mut emitted = Vec::new();
        if let Some(null_unit) = emit::emit_null_object(self.graph, model)? {
            emitted.push(null_unit);
        }
        emitted.push(RegistryEmitter::new(model, &self.options).emit()?);
        Ok(emitted)
    }
}

/// Run one generation pass with the given options.
#[must_use]
pub fn generate(graph: &SymbolGraph, options: GenOptions) -> GenOutput {
    Generator::new(graph).with_options(options).run()
}

fn emission_failure(collection: &str, err: &EmitError) -> Diagnostic {
    Diagnostic::error(
        DiagCode::EmissionFailure,
        format!("collection `{collection}` failed to emit: {err}"),
        None,
    )
}
