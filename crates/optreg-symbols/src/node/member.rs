use crate::{
    node::{LookupMarker, Marker},
    types::TypeRef,
};
use serde::{Deserialize, Serialize};

///
/// Member
///

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Member {
    Property(Property),
    Method(MethodSig),
}

///
/// Property
///
/// A named, typed member with getter semantics. Abstract properties are
/// rejected during model building; only concrete properties may carry
/// lookup markers.
///

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub ty: TypeRef,

    #[serde(default)]
    pub is_abstract: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<Marker>,
}

impl Property {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            is_abstract: false,
            markers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    #[must_use]
    pub fn lookup_marker(&self) -> Option<&LookupMarker> {
        self.markers.iter().find_map(|m| match m {
            Marker::Lookup(lookup) => Some(lookup),
            _ => None,
        })
    }
}

///
/// MethodSig
///

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSig {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ret: Option<TypeRef>,

    #[serde(default)]
    pub is_abstract: bool,
}

impl MethodSig {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            ret: None,
            is_abstract: false,
        }
    }

    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        self.params.push(Param {
            name: name.into(),
            ty: ty.into(),
        });
        self
    }

    #[must_use]
    pub fn returning(mut self, ty: impl Into<TypeRef>) -> Self {
        self.ret = Some(ty.into());
        self
    }

    /// Normalized signature string used as the dedup key when the same
    /// abstract method surfaces more than once along an inheritance chain.
    #[must_use]
    pub fn signature_key(&self) -> String {
        let params: Vec<String> = self.params.iter().map(|p| p.ty.to_string()).collect();
        format!("{}({})", self.name, params.join(","))
    }
}

///
/// Param
///

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: TypeRef,
}
