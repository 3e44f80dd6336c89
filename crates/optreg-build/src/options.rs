use serde::{Deserialize, Serialize};

///
/// AccessorStyle
///
/// Shape of the per-value accessors on the generated registry. `Property`
/// emits lazily-initialized statics, which pins exposure to the shared
/// singleton instance regardless of [`Exposure`]; `Method` emits functions
/// and honors the exposure flag.
///

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessorStyle {
    #[default]
    Method,
    Property,
}

///
/// Exposure
///

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Exposure {
    /// Per-value accessors hand out the shared instance from the primary map.
    #[default]
    Singleton,
    /// Per-value accessors construct a fresh instance per call.
    Factory,
}

///
/// AltKeyMode
///
/// How alternate-key lookups reach values. `Materialized` freezes one full
/// map per lookup; `IndexedView` freezes only a key-to-primary-key index
/// and resolves through the primary map. Semantics are identical.
///

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AltKeyMode {
    #[default]
    Materialized,
    IndexedView,
}

///
/// GenOptions
///

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenOptions {
    #[serde(default)]
    pub accessor_style: AccessorStyle,

    #[serde(default)]
    pub exposure: Exposure,

    #[serde(default)]
    pub alt_key_mode: AltKeyMode,
}
