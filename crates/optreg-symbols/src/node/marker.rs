use crate::types::TypePath;
use serde::{Deserialize, Serialize};

///
/// Marker
///
/// Declarative annotation attached to a type or member at declaration time.
/// Markers are immutable once the host materializes the graph; the
/// generator only ever reads them.
///

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marker {
    Collection(CollectionMarker),
    Lookup(LookupMarker),
    Option(OptionMarker),
}

///
/// CollectionMarker
///
/// Declares a named, strongly-typed registry keyed on `base_type`.
/// Applied to the type that will become the generated registry surface.
///

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionMarker {
    pub base_type: TypePath,
    pub name: String,

    /// Overrides return-type resolution entirely when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_return: Option<TypePath>,
}

impl CollectionMarker {
    #[must_use]
    pub fn new(base_type: impl Into<TypePath>, name: impl Into<String>) -> Self {
        Self {
            base_type: base_type.into(),
            name: name.into(),
            default_return: None,
        }
    }
}

///
/// OptionMarker
///
/// Declares that the carrying type belongs to the registry declared on
/// `collection`, optionally under an explicit primary key.
///

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionMarker {
    pub collection: TypePath,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<i64>,
}

impl OptionMarker {
    #[must_use]
    pub fn new(collection: impl Into<TypePath>) -> Self {
        Self {
            collection: collection.into(),
            key: None,
        }
    }

    #[must_use]
    pub fn keyed(collection: impl Into<TypePath>, key: i64) -> Self {
        Self {
            collection: collection.into(),
            key: Some(key),
        }
    }
}

///
/// LookupMarker
///
/// Property-level marker declaring an alternate-key lookup accessor on the
/// generated registry.
///

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupMarker {
    pub method_name: String,

    #[serde(default)]
    pub allow_multiple: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypePath>,
}

impl LookupMarker {
    #[must_use]
    pub fn new(method_name: impl Into<String>) -> Self {
        Self {
            method_name: method_name.into(),
            allow_multiple: false,
            return_type: None,
        }
    }
}
