use crate::scan::OptionCandidate;
use optreg_symbols::node::{CtorArg, TypeDecl};

/// Statically resolve the primary key for one option candidate.
///
/// Resolution order: an explicit key on the option marker, then the
/// literal integer first argument of a public constructor's base call
/// (hosts normalize the inline base-call and constructor-body forms into
/// the same recorded argument list, and sometimes hand literals over as
/// raw expression text). `None` means the key is only knowable at run
/// time; the emitted static initializer then instantiates the value and
/// reads its identity property instead.
pub(crate) fn extract_primary_key(candidate: &OptionCandidate<'_>) -> Option<i64> {
    if let Some(key) = candidate.marker.key {
        return Some(key);
    }
    first_base_literal(candidate.decl)
}

fn first_base_literal(decl: &TypeDecl) -> Option<i64> {
    decl.ctors
        .iter()
        .filter(|c| c.is_public)
        .find_map(|ctor| match ctor.base_args.first() {
            Some(CtorArg::Int(value)) => Some(*value),
            Some(CtorArg::Expr(raw)) => raw.trim().parse().ok(),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use optreg_symbols::node::{Ctor, Marker, OptionMarker, TypeDecl, TypeKind};

    fn candidate_for(decl: &TypeDecl) -> OptionCandidate<'_> {
        let marker = decl.option_marker().expect("option marker");
        OptionCandidate {
            decl,
            marker,
            module: "app",
        }
    }

    #[test]
    fn marker_key_wins_over_ctor_literal() {
        let decl = TypeDecl::new("demo::Circle", TypeKind::Class)
            .with_marker(Marker::Option(OptionMarker::keyed("demo::Shapes", 7)))
            .with_ctor(Ctor::public(Vec::new()).with_base_args(vec![CtorArg::Int(1)]));
        assert_eq!(extract_primary_key(&candidate_for(&decl)), Some(7));
    }

    #[test]
    fn literal_base_argument_is_extracted() {
        let decl = TypeDecl::new("demo::Circle", TypeKind::Class)
            .with_marker(Marker::Option(OptionMarker::new("demo::Shapes")))
            .with_ctor(Ctor::public(Vec::new()).with_base_args(vec![CtorArg::Int(42)]));
        assert_eq!(extract_primary_key(&candidate_for(&decl)), Some(42));
    }

    #[test]
    fn raw_expression_literal_is_parsed() {
        let decl = TypeDecl::new("demo::Circle", TypeKind::Class)
            .with_marker(Marker::Option(OptionMarker::new("demo::Shapes")))
            .with_ctor(
                Ctor::public(Vec::new()).with_base_args(vec![CtorArg::Expr(" 12 ".into())]),
            );
        assert_eq!(extract_primary_key(&candidate_for(&decl)), Some(12));
    }

    #[test]
    fn computed_key_stays_unresolved() {
        let decl = TypeDecl::new("demo::Circle", TypeKind::Class)
            .with_marker(Marker::Option(OptionMarker::new("demo::Shapes")))
            .with_ctor(Ctor::public(Vec::new()).with_base_args(vec![CtorArg::Expr(
                "BASE_OFFSET + 1".into(),
            )]));
        assert_eq!(extract_primary_key(&candidate_for(&decl)), None);
    }

    #[test]
    fn private_ctor_base_args_are_ignored() {
        let mut ctor = Ctor::public(Vec::new()).with_base_args(vec![CtorArg::Int(9)]);
        ctor.is_public = false;
        let decl = TypeDecl::new("demo::Circle", TypeKind::Class)
            .with_marker(Marker::Option(OptionMarker::new("demo::Shapes")))
            .with_ctor(ctor);
        assert_eq!(extract_primary_key(&candidate_for(&decl)), None);
    }
}
