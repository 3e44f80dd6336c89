mod null_object;
mod registry;

pub(crate) use null_object::emit_null_object;
pub use registry::RegistryEmitter;

use optreg_symbols::types::{TypePath, TypeRef};
use proc_macro2::{Ident, TokenStream};
use quote::quote;
use thiserror::Error as ThisError;

///
/// GeneratedFile
///
/// One emitted source unit, rendered token stream and all. Handed back to
/// the host toolchain verbatim.
///

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFile {
    pub name: String,
    pub contents: String,
}

///
/// EmitError
///
/// Internal failures while assembling output. Converted by the driver to
/// an emission-family diagnostic, scoped to the collection that failed.
///

#[derive(Debug, ThisError)]
pub enum EmitError {
    #[error("invalid generics `{text}`: {reason}")]
    InvalidGenerics { text: String, reason: String },

    #[error("`{name}` is not a valid identifier: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("invalid type path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("emitter stage {from:?} cannot advance to {to:?}")]
    StageOrder { from: Stage, to: Stage },
}

///
/// Stage
///
/// Registry emission walks a fixed pipeline; each stage is pure given the
/// collection model and never mutates a prior stage's output.
///

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    NotStarted,
    ValuesConverted,
    StaticFieldsEmitted,
    StaticConstructorEmitted,
    AccessorsEmitted,
    Done,
}

impl Stage {
    pub(crate) const fn successor(self) -> Option<Self> {
        match self {
            Self::NotStarted => Some(Self::ValuesConverted),
            Self::ValuesConverted => Some(Self::StaticFieldsEmitted),
            Self::StaticFieldsEmitted => Some(Self::StaticConstructorEmitted),
            Self::StaticConstructorEmitted => Some(Self::AccessorsEmitted),
            Self::AccessorsEmitted => Some(Self::Done),
            Self::Done => None,
        }
    }
}

// Host-supplied names (marker names, lookup methods, properties) flow
// through case conversion into generated idents; parse fallibly so a
// malformed name surfaces as an emission diagnostic instead of aborting
// the whole pass.
pub(crate) fn ident_tokens(name: &str) -> Result<Ident, EmitError> {
    syn::parse_str(name).map_err(|e| EmitError::InvalidName {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

// Parse a host-supplied path into tokens, surfacing bad metadata as an
// emission failure instead of a panic.
pub(crate) fn path_tokens(path: &TypePath) -> Result<syn::Path, EmitError> {
    syn::parse_str(path.as_str()).map_err(|e| EmitError::InvalidPath {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn type_tokens(ty: &TypeRef) -> Result<syn::Type, EmitError> {
    syn::parse_str(&ty.to_string()).map_err(|e| EmitError::InvalidPath {
        path: ty.to_string(),
        reason: e.to_string(),
    })
}

/// Type-appropriate default: empty text, zero numbers, false booleans, an
/// absent marker for optional references, zero-value for the rest.
pub(crate) fn default_value(ty: &TypeRef) -> TokenStream {
    if ty.is_integer() {
        return quote!(0);
    }
    match ty.path.short() {
        "f32" | "f64" => quote!(0.0),
        "bool" => quote!(false),
        "String" => quote!(::std::string::String::new()),
        "str" => quote!(""),
        "Option" => quote!(::core::option::Option::None),
        "Vec" => quote!(::std::vec::Vec::new()),
        _ => quote!(::core::default::Default::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_pipeline_is_linear_and_terminal() {
        let mut stage = Stage::NotStarted;
        let mut hops = 0;
        while let Some(next) = stage.successor() {
            stage = next;
            hops += 1;
        }
        assert_eq!(stage, Stage::Done);
        assert_eq!(hops, 5);
    }

    #[test]
    fn default_values_cover_the_scalar_taxonomy() {
        assert_eq!(default_value(&TypeRef::named("u16")).to_string(), "0");
        assert_eq!(default_value(&TypeRef::named("bool")).to_string(), "false");
        assert!(
            default_value(&TypeRef::named("String"))
                .to_string()
                .contains("String :: new")
        );
        assert!(
            default_value(&TypeRef::generic("Option", vec![TypeRef::named("i64")]))
                .to_string()
                .contains("None")
        );
        assert!(
            default_value(&TypeRef::named("demo::Custom"))
                .to_string()
                .contains("Default :: default")
        );
    }

    #[test]
    fn bad_path_metadata_is_an_emit_error() {
        let err = path_tokens(&TypePath::from("not a path")).expect_err("must fail");
        assert!(matches!(err, EmitError::InvalidPath { .. }));
    }

    #[test]
    fn bad_names_are_emit_errors_not_panics() {
        assert!(ident_tokens("by_name").is_ok());
        for bad in ["123 bad name", "", "123Start", "has-dash"] {
            let err = ident_tokens(bad).expect_err("must fail");
            assert!(matches!(err, EmitError::InvalidName { .. }));
        }
    }
}
