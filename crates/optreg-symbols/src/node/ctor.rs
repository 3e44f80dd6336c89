use crate::node::Param;
use serde::{Deserialize, Serialize};

///
/// Ctor
///
/// A constructor on a type declaration. `base_args` records the arguments
/// of the declaration's base-constructor call; hosts normalize both the
/// inline base-call form and the explicit constructor-body form into the
/// same argument list, so the key extractor never sees the syntactic
/// difference.
///

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ctor {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub base_args: Vec<CtorArg>,

    #[serde(default)]
    pub is_public: bool,
}

impl Ctor {
    /// A public constructor with the given parameters and no base call.
    #[must_use]
    pub const fn public(params: Vec<Param>) -> Self {
        Self {
            params,
            base_args: Vec::new(),
            is_public: true,
        }
    }

    #[must_use]
    pub fn with_base_args(mut self, base_args: Vec<CtorArg>) -> Self {
        self.base_args = base_args;
        self
    }
}

///
/// CtorArg
///
/// A recorded base-constructor argument. Literals are preserved as typed
/// values; anything the host could not classify arrives as raw expression
/// text.
///

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CtorArg {
    Bool(bool),
    Expr(String),
    Int(i64),
    Str(String),
}
