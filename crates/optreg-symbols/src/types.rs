use serde::{Deserialize, Serialize};
use std::fmt;

///
/// TypePath
///
/// Fully-qualified, `::`-separated path of a type declaration. The path is
/// the identity used for indexing, deduplication, and base-chain equality.
///

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypePath(String);

impl TypePath {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Final path segment, the simple name of the type.
    #[must_use]
    pub fn short(&self) -> &str {
        self.0.rsplit("::").next().unwrap_or(&self.0)
    }

    /// Everything before the final segment, if the path is qualified.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.0.rsplit_once("::").map(|(ns, _)| ns)
    }
}

impl fmt::Display for TypePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypePath {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl From<String> for TypePath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

///
/// TypeRef
///
/// A reference to a type as it appears in a signature or base-type clause:
/// a path plus its generic arguments. Just enough structure for the
/// generator to recognize wrapper shapes, text types, and zero-values.
///

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    pub path: TypePath,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<TypeRef>,
}

impl TypeRef {
    #[must_use]
    pub fn named(path: impl Into<TypePath>) -> Self {
        Self {
            path: path.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn generic(path: impl Into<TypePath>, args: Vec<Self>) -> Self {
        Self {
            path: path.into(),
            args,
        }
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self.path.short(), "String" | "str")
    }

    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(
            self.path.short(),
            "i8" | "i16"
                | "i32"
                | "i64"
                | "i128"
                | "isize"
                | "u8"
                | "u16"
                | "u32"
                | "u64"
                | "u128"
                | "usize"
        )
    }

    /// True for the single-argument success-wrapper shape (`Result<T, E>`).
    #[must_use]
    pub fn is_result_wrapper(&self) -> bool {
        self.path.short() == "Result" && !self.args.is_empty()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        if !self.args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{arg}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl From<&str> for TypeRef {
    fn from(path: &str) -> Self {
        Self::named(path)
    }
}

///
/// Location
///
/// Source position a declaration came from, carried onto diagnostics so
/// the host toolchain can report against real files.
///

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub module: String,
    pub file: String,
    pub line: u32,
}

impl Location {
    #[must_use]
    pub fn new(module: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            module: module.into(),
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.module, self.file, self.line)
    }
}
