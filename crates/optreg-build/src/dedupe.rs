use crate::{
    diagnostic::{DiagCode, Diagnostic, Diagnostics},
    scan::OptionCandidate,
};
use optreg_symbols::graph::SymbolGraph;

/// Collapse candidates that report the same fully-qualified name down to
/// one declaration per logical type.
///
/// When two declarations are related by inheritance the more-derived one
/// wins, which keeps registries stable under diamond-shaped module
/// references. Candidates are pre-sorted lexicographically by
/// (fully-qualified name, module), so the unrelated-tie case resolves to
/// the same winner regardless of scan order; a tie between declarations
/// that are not even structurally identical additionally raises a Warning
/// so it is never silent.
pub(crate) fn resolve_candidates<'g>(
    graph: &SymbolGraph,
    mut candidates: Vec<OptionCandidate<'g>>,
    diags: &mut Diagnostics,
) -> Vec<OptionCandidate<'g>> {
    candidates.sort_by(|a, b| {
        a.fq_name()
            .cmp(b.fq_name())
            .then_with(|| a.module.cmp(b.module))
    });

    let mut kept: Vec<OptionCandidate<'g>> = Vec::new();
    for candidate in candidates {
        let Some(existing) = kept
            .iter_mut()
            .find(|k| k.fq_name() == candidate.fq_name())
        else {
            kept.push(candidate);
            continue;
        };

        if graph.derives_from(candidate.decl, &existing.decl.path)
            && candidate.decl != existing.decl
        {
            *existing = candidate;
        } else if existing.decl != candidate.decl
            && !graph.derives_from(existing.decl, &candidate.decl.path)
        {
            diags.add(Diagnostic::warning(
                DiagCode::AmbiguousCandidate,
                format!(
                    "option type `{}` is declared in both `{}` and `{}` with unrelated declarations; keeping `{}`",
                    candidate.fq_name(),
                    existing.module,
                    candidate.module,
                    existing.module,
                ),
                Some(candidate.decl.location.clone()),
            ));
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::DiscoveryIndex;
    use optreg_symbols::{
        node::{Marker, Module, OptionMarker, TypeDecl, TypeKind},
        types::{TypePath, TypeRef},
    };

    fn option(path: &str) -> TypeDecl {
        TypeDecl::new(path, TypeKind::Class)
            .with_marker(Marker::Option(OptionMarker::keyed("demo::Shapes", 1)))
    }

    fn collect<'g>(
        graph: &'g SymbolGraph,
        diags: &mut Diagnostics,
    ) -> Vec<OptionCandidate<'g>> {
        let index = DiscoveryIndex::build(graph);
        let candidates = index
            .candidates_for(&TypePath::from("demo::Shapes"))
            .to_vec();
        resolve_candidates(graph, candidates, diags)
    }

    #[test]
    fn identical_reexported_declaration_collapses_silently() {
        // Diamond: the same declaration visible directly and through a
        // referenced module.
        let graph = SymbolGraph::new(
            "app",
            vec![
                Module::new("app")
                    .with_ref("dep")
                    .with_type(option("demo::Circle")),
                Module::new("dep").with_type(option("demo::Circle")),
            ],
        )
        .expect("valid graph");

        let mut diags = Diagnostics::new();
        let kept = collect(&graph, &mut diags);
        assert_eq!(kept.len(), 1, "one logical type, one survivor");
        assert!(diags.is_empty(), "identical declarations are not ambiguous");
    }

    #[test]
    fn more_derived_declaration_wins() {
        // `dep` carries the plain declaration; `app` carries one that
        // derives from it (same fully-qualified name, shadowing override).
        let graph = SymbolGraph::new(
            "app",
            vec![
                Module::new("app")
                    .with_ref("dep")
                    .with_type(option("demo::Circle").with_base(TypeRef::named("demo::Circle"))),
                Module::new("dep").with_type(option("demo::Circle")),
            ],
        )
        .expect("valid graph");

        let mut diags = Diagnostics::new();
        let kept = collect(&graph, &mut diags);
        assert_eq!(kept.len(), 1);
        assert!(
            kept[0].decl.base.is_some(),
            "the derived declaration must survive"
        );
    }

    #[test]
    fn unrelated_tie_is_deterministic_and_warned() {
        let variant_a = option("demo::Circle").with_generics("<T>");
        let variant_b = option("demo::Circle");

        let graph = SymbolGraph::new(
            "app",
            vec![
                Module::new("app")
                    .with_ref("zz_dep")
                    .with_type(variant_a.clone()),
                Module::new("zz_dep").with_type(variant_b.clone()),
            ],
        )
        .expect("valid graph");

        let mut diags = Diagnostics::new();
        let kept = collect(&graph, &mut diags);
        assert_eq!(kept.len(), 1);
        // "app" sorts before "zz_dep", so its declaration wins the tie.
        assert_eq!(kept[0].module, "app");
        assert_eq!(diags.len(), 1, "unrelated tie must warn");
        assert!(!diags.has_errors(), "tie is a warning, not an error");
    }
}
