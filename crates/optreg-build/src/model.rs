use crate::{
    diagnostic::{DiagCode, Diagnostic, Diagnostics},
    keys, ret,
    scan::{CollectionDecl, OptionCandidate},
};
use optreg_symbols::{
    graph::SymbolGraph,
    node::{TypeDecl, TypeKind},
    types::{TypePath, TypeRef},
};

///
/// Sentinel
///
/// How the generated registry answers a lookup miss.
///

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sentinel {
    /// No safe empty object exists; accessors expose `Option` and misses
    /// return `None`. Callers must handle the absent case themselves.
    Absent,
    /// The base type is a concrete class: the sentinel is its minimal
    /// accessible constructor invoked with type-appropriate defaults.
    NullCtor(Vec<TypeRef>),
    /// The base type is a trait contract: the sentinel is the synthesized
    /// null-object implementation.
    NullTrait,
}

///
/// ValueModel
///

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueModel {
    pub short_name: String,
    pub full_name: TypePath,
    pub display_key: String,
    /// Populated when statically extractable; otherwise the emitted
    /// initializer reads the runtime identity property instead.
    pub primary_key: Option<i64>,
    pub constructible: bool,
}

///
/// LookupSpec
///
/// One alternate-key accessor, derived from a property-level lookup
/// marker on the base type.
///

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupSpec {
    pub property_name: String,
    pub property_ty: TypeRef,
    pub method_name: String,
    pub allow_multiple: bool,
    pub return_type: Option<TypePath>,
}

///
/// CollectionModel
///
/// The resolved, generation-ready description of one registry. Built once
/// per collection declaration, immutable afterwards, consumed only by the
/// emitters.
///

#[derive(Clone, Debug)]
pub struct CollectionModel {
    pub namespace: Option<String>,
    pub collection_name: String,
    pub base_type: TypePath,
    pub base_kind: TypeKind,
    pub return_type: TypePath,
    /// Identity property read at static-initialization time for values
    /// whose primary key could not be extracted statically.
    pub identity_property: String,
    pub values: Vec<ValueModel>,
    pub lookups: Vec<LookupSpec>,
    pub sentinel: Sentinel,
    /// Whether a null-object source unit accompanies the registry.
    pub emit_null_object: bool,
}

impl CollectionModel {
    /// Resolve and validate one collection. Returns `None` after pushing
    /// diagnostics when the collection cannot produce output; sibling
    /// collections are unaffected either way.
    pub fn build(
        graph: &SymbolGraph,
        coll: &CollectionDecl<'_>,
        candidates: &[OptionCandidate<'_>],
        diags: &mut Diagnostics,
    ) -> Option<Self> {
        let Some(base) = graph.find_type(&coll.marker.base_type) else {
            diags.add(Diagnostic::error(
                DiagCode::UnresolvedBase,
                format!(
                    "collection `{}` names base type `{}`, which is not present in the symbol graph",
                    coll.marker.name, coll.marker.base_type,
                ),
                Some(coll.decl.location.clone()),
            ));
            return None;
        };

        if !validate_base(graph, base, diags) {
            return None;
        }

        let values = candidates
            .iter()
            .map(|candidate| ValueModel {
                short_name: candidate.decl.path.short().to_string(),
                full_name: candidate.decl.path.clone(),
                display_key: candidate.decl.path.short().to_string(),
                primary_key: keys::extract_primary_key(candidate),
                constructible: candidate.decl.is_constructible(),
            })
            .collect();

        let return_type = ret::resolve_return_type(graph, coll);
        let sentinel = sentinel_for(base, &return_type);

        Some(Self {
            namespace: coll.decl.path.namespace().map(str::to_string),
            collection_name: coll.marker.name.clone(),
            base_type: base.path.clone(),
            base_kind: base.kind,
            return_type,
            identity_property: identity_property(graph, base),
            values,
            lookups: collect_lookups(graph, base),
            sentinel,
            emit_null_object: base.kind == TypeKind::Trait,
        })
    }
}

// The base chain may carry abstract methods (extension points the null
// object implements), but never abstract properties: those would force the
// null object into re-declaring storage, defeating a stateless sentinel.
fn validate_base(graph: &SymbolGraph, base: &TypeDecl, diags: &mut Diagnostics) -> bool {
    let mut valid = true;
    for decl in graph.base_chain(base) {
        for property in decl.abstract_properties() {
            diags.add(Diagnostic::error(
                DiagCode::AbstractProperty,
                format!(
                    "abstract property `{}` on `{}` is not a valid registry extension point; only abstract methods are",
                    property.name, decl.path,
                ),
                Some(decl.location.clone()),
            ));
            valid = false;
        }
    }
    valid
}

// Alternate-key lookups anywhere along the base chain; the declaration
// closest to the base wins when method names collide.
fn collect_lookups(graph: &SymbolGraph, base: &TypeDecl) -> Vec<LookupSpec> {
    let mut lookups: Vec<LookupSpec> = Vec::new();
    for decl in graph.base_chain(base) {
        for property in decl.properties() {
            if let Some(marker) = property.lookup_marker() {
                if lookups.iter().any(|l| l.method_name == marker.method_name) {
                    continue;
                }
                lookups.push(LookupSpec {
                    property_name: property.name.clone(),
                    property_ty: property.ty.clone(),
                    method_name: marker.method_name.clone(),
                    allow_multiple: marker.allow_multiple,
                    return_type: marker.return_type.clone(),
                });
            }
        }
    }
    lookups
}

// First concrete integer property along the chain is the runtime identity;
// `id` is the framework convention when nothing is declared.
fn identity_property(graph: &SymbolGraph, base: &TypeDecl) -> String {
    graph
        .base_chain(base)
        .flat_map(TypeDecl::properties)
        .find(|p| !p.is_abstract && p.ty.is_integer())
        .map_or_else(|| "id".to_string(), |p| p.name.clone())
}

// Whether the resolved accessor return type still refers to the base type.
// Return-type resolution falls back to the base's simple name when the
// inheritance chain carries no registry abstraction, so a bare simple-name
// match counts too.
fn returns_base(base: &TypeDecl, return_type: &TypePath) -> bool {
    return_type == &base.path
        || (return_type.namespace().is_none() && return_type.as_str() == base.path.short())
}

// Sentinel instances are coerced to the accessor return type; when a marker
// override or registry-chain resolution diverges from the base type, no
// such coercion exists and misses degrade to `Option`.
fn sentinel_for(base: &TypeDecl, return_type: &TypePath) -> Sentinel {
    if !returns_base(base, return_type) {
        return Sentinel::Absent;
    }
    match base.kind {
        // A generic contract still gets a (generic) null-object unit, but
        // the registry cannot pick type arguments for a sentinel instance.
        TypeKind::Trait if base.is_generic() => Sentinel::Absent,
        TypeKind::Trait => Sentinel::NullTrait,
        TypeKind::Class => {
            if base.is_abstract || base.is_generic() {
                Sentinel::Absent
            } else if let Some(ctor) = base.minimal_public_ctor() {
                Sentinel::NullCtor(ctor.params.iter().map(|p| p.ty.clone()).collect())
            } else if base.ctors.is_empty() {
                Sentinel::NullCtor(Vec::new())
            } else {
                Sentinel::Absent
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use optreg_symbols::node::{
        CollectionMarker, Ctor, LookupMarker, Marker, Member, MethodSig, Module, OptionMarker,
        Param, Property, TypeDecl,
    };

    fn shape_trait() -> TypeDecl {
        TypeDecl::new("demo::Shape", TypeKind::Trait)
            .with_member(Member::Property(Property::new("id", TypeRef::named("i64"))))
            .with_member(Member::Property(
                Property::new("name", TypeRef::named("String"))
                    .with_marker(Marker::Lookup(LookupMarker::new("ByName"))),
            ))
            .with_member(Member::Method({
                let mut sig = MethodSig::new("area").returning("f64");
                sig.is_abstract = true;
                sig
            }))
    }

    fn shapes_collection() -> TypeDecl {
        TypeDecl::new("demo::Shapes", TypeKind::Class).with_marker(Marker::Collection(
            CollectionMarker::new("demo::Shape", "Shapes"),
        ))
    }

    fn circle() -> TypeDecl {
        TypeDecl::new("demo::Circle", TypeKind::Class)
            .with_marker(Marker::Option(OptionMarker::keyed("demo::Shapes", 1)))
    }

    fn build_model(types: Vec<TypeDecl>) -> (Option<CollectionModel>, Diagnostics) {
        let mut module = Module::new("app");
        for decl in types {
            module = module.with_type(decl);
        }
        let graph = SymbolGraph::new("app", vec![module]).expect("valid graph");
        let index = crate::scan::DiscoveryIndex::build(&graph);
        let coll = index.collections()[0];
        let candidates = index.candidates_for(&coll.decl.path).to_vec();
        let mut diags = Diagnostics::new();
        let model = CollectionModel::build(&graph, &coll, &candidates, &mut diags);
        (model, diags)
    }

    #[test]
    fn model_resolves_values_lookups_and_identity() {
        let (model, diags) =
            build_model(vec![shape_trait(), shapes_collection(), circle()]);
        let model = model.expect("model builds");
        assert!(diags.is_empty());

        assert_eq!(model.collection_name, "Shapes");
        assert_eq!(model.namespace.as_deref(), Some("demo"));
        assert_eq!(model.values.len(), 1);
        assert_eq!(model.values[0].primary_key, Some(1));
        assert_eq!(model.identity_property, "id");
        assert_eq!(model.lookups.len(), 1);
        assert_eq!(model.lookups[0].method_name, "ByName");
        assert_eq!(model.sentinel, Sentinel::NullTrait);
        assert!(model.emit_null_object);
    }

    #[test]
    fn unresolved_base_reports_and_skips() {
        let (model, diags) = build_model(vec![shapes_collection(), circle()]);
        assert!(model.is_none());
        assert_eq!(diags.len(), 1);
        assert!(diags.has_errors());
        assert_eq!(
            diags.iter().next().map(|d| d.code),
            Some(DiagCode::UnresolvedBase)
        );
    }

    #[test]
    fn abstract_property_is_one_error_per_offender() {
        let mut display = Property::new("display_name", TypeRef::named("String"));
        display.is_abstract = true;
        let mut icon = Property::new("icon", TypeRef::named("String"));
        icon.is_abstract = true;

        let base = TypeDecl::new("demo::Shape", TypeKind::Trait)
            .with_member(Member::Property(display))
            .with_member(Member::Property(icon));

        let (model, diags) = build_model(vec![base, shapes_collection(), circle()]);
        assert!(model.is_none(), "no registry over an invalid base");
        assert_eq!(diags.len(), 2, "exactly one error per abstract property");
        assert!(diags.has_errors());
        assert!(diags.iter().all(|d| d.code == DiagCode::AbstractProperty));
    }

    #[test]
    fn empty_candidate_list_still_builds_a_model() {
        let (model, diags) = build_model(vec![shape_trait(), shapes_collection()]);
        let model = model.expect("registry with no values still generates");
        assert!(diags.is_empty());
        assert!(model.values.is_empty());
    }

    #[test]
    fn concrete_class_base_gets_ctor_sentinel() {
        let base = TypeDecl::new("demo::Shape", TypeKind::Class).with_ctor(Ctor::public(vec![
            Param {
                name: "id".into(),
                ty: TypeRef::named("i64"),
            },
            Param {
                name: "name".into(),
                ty: TypeRef::named("String"),
            },
        ]));
        let (model, _) = build_model(vec![base, shapes_collection(), circle()]);
        let model = model.expect("model builds");
        assert_eq!(
            model.sentinel,
            Sentinel::NullCtor(vec![TypeRef::named("i64"), TypeRef::named("String")])
        );
        assert!(!model.emit_null_object);
    }

    #[test]
    fn diverging_return_type_degrades_to_absent_sentinel() {
        // a marker override points accessors at a type the sentinel can
        // never coerce to, so misses must expose `Option` instead
        let mut marker = CollectionMarker::new("demo::Shape", "Shapes");
        marker.default_return = Some(TypePath::from("demo::IShape"));
        let shapes = TypeDecl::new("demo::Shapes", TypeKind::Class)
            .with_marker(Marker::Collection(marker));

        let (model, diags) = build_model(vec![shape_trait(), shapes, circle()]);
        let model = model.expect("model builds");
        assert!(diags.is_empty());
        assert_eq!(model.return_type.as_str(), "demo::IShape");
        assert_eq!(model.sentinel, Sentinel::Absent);
        assert!(model.emit_null_object, "null unit still accompanies the trait");
    }

    #[test]
    fn base_typed_return_keeps_the_trait_sentinel() {
        // registry-chain resolution that lands back on the base type keeps
        // the null-object sentinel intact
        let shapes = shapes_collection().with_base(TypeRef::generic(
            "framework::Registry",
            vec![TypeRef::named("i64"), TypeRef::named("demo::Shape")],
        ));

        let (model, _) = build_model(vec![shape_trait(), shapes, circle()]);
        let model = model.expect("model builds");
        assert_eq!(model.return_type.as_str(), "demo::Shape");
        assert_eq!(model.sentinel, Sentinel::NullTrait);
    }

    #[test]
    fn generic_trait_base_degrades_to_absent_sentinel() {
        let base = TypeDecl::new("demo::Shape", TypeKind::Trait).with_generics("<T: Clone>");
        let (model, diags) = build_model(vec![base, shapes_collection(), circle()]);
        let model = model.expect("generic base is a degradation, not an error");
        assert!(diags.is_empty());
        assert_eq!(model.sentinel, Sentinel::Absent);
        assert!(model.emit_null_object, "generic null object is still emitted");
    }
}
