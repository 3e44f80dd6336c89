use crate::{
    node::{CollectionMarker, Ctor, Marker, Member, MethodSig, OptionMarker, Property},
    types::{Location, TypePath, TypeRef},
};
use serde::{Deserialize, Serialize};

///
/// TypeKind
///
/// How the declaration can be consumed by generated code. A `Class` is
/// concrete and constructible; a `Trait` is a pure contract whose abstract
/// methods a null object can implement.
///

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeKind {
    Class,
    Trait,
}

///
/// TypeDecl
///
/// One type declaration in the symbol graph: identity, inheritance link,
/// members, constructors, and the markers attached at declaration time.
/// Immutable once the host hands the graph over.
///

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub path: TypePath,
    pub kind: TypeKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<TypeRef>,

    /// Declared type-parameter list, verbatim (e.g. `<T: Clone>`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generics: Option<String>,

    #[serde(default)]
    pub is_abstract: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<Member>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ctors: Vec<Ctor>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<Marker>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<TypeDecl>,

    #[serde(default)]
    pub location: Location,
}

impl TypeDecl {
    #[must_use]
    pub fn new(path: impl Into<TypePath>, kind: TypeKind) -> Self {
        Self {
            path: path.into(),
            kind,
            base: None,
            generics: None,
            is_abstract: false,
            members: Vec::new(),
            ctors: Vec::new(),
            markers: Vec::new(),
            nested: Vec::new(),
            location: Location::default(),
        }
    }

    #[must_use]
    pub fn with_base(mut self, base: impl Into<TypeRef>) -> Self {
        self.base = Some(base.into());
        self
    }

    #[must_use]
    pub fn with_generics(mut self, generics: impl Into<String>) -> Self {
        self.generics = Some(generics.into());
        self
    }

    #[must_use]
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    #[must_use]
    pub fn with_ctor(mut self, ctor: Ctor) -> Self {
        self.ctors.push(ctor);
        self
    }

    #[must_use]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    #[must_use]
    pub fn with_nested(mut self, nested: Self) -> Self {
        self.nested.push(nested);
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    #[must_use]
    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    #[must_use]
    pub fn is_generic(&self) -> bool {
        self.generics.is_some()
    }

    #[must_use]
    pub fn collection_marker(&self) -> Option<&CollectionMarker> {
        self.markers.iter().find_map(|m| match m {
            Marker::Collection(marker) => Some(marker),
            _ => None,
        })
    }

    #[must_use]
    pub fn option_marker(&self) -> Option<&OptionMarker> {
        self.markers.iter().find_map(|m| match m {
            Marker::Option(marker) => Some(marker),
            _ => None,
        })
    }

    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.members.iter().filter_map(|m| match m {
            Member::Property(prop) => Some(prop),
            Member::Method(_) => None,
        })
    }

    pub fn abstract_properties(&self) -> impl Iterator<Item = &Property> {
        self.properties().filter(|p| p.is_abstract)
    }

    pub fn abstract_methods(&self) -> impl Iterator<Item = &MethodSig> {
        self.members.iter().filter_map(|m| match m {
            Member::Method(sig) if sig.is_abstract => Some(sig),
            _ => None,
        })
    }

    /// The accessible constructor with the fewest parameters, if any.
    #[must_use]
    pub fn minimal_public_ctor(&self) -> Option<&Ctor> {
        self.ctors
            .iter()
            .filter(|c| c.is_public)
            .min_by_key(|c| c.params.len())
    }

    /// Whether generated code can obtain an instance via a zero-argument
    /// `new()` call. A declaration without listed constructors is treated
    /// as carrying an implicit public default constructor.
    #[must_use]
    pub fn is_constructible(&self) -> bool {
        if self.kind != TypeKind::Class || self.is_abstract {
            return false;
        }
        self.ctors.is_empty()
            || self
                .ctors
                .iter()
                .any(|c| c.is_public && c.params.is_empty())
    }
}
