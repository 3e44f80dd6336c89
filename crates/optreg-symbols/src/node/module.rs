use crate::node::TypeDecl;
use serde::{Deserialize, Serialize};

///
/// Module
///
/// One compilation unit in the symbol graph: its name, the modules it
/// directly references, and its top-level type declarations (nested types
/// hang off their parents).
///

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub refs: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TypeDecl>,
}

impl Module {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            refs: Vec::new(),
            types: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_ref(mut self, name: impl Into<String>) -> Self {
        self.refs.push(name.into());
        self
    }

    #[must_use]
    pub fn with_type(mut self, decl: TypeDecl) -> Self {
        self.types.push(decl);
        self
    }

    /// Depth-first iteration over every type in the module, nested
    /// declarations included. Iterative; never recurses.
    #[must_use]
    pub fn iter_types(&self) -> TypeIter<'_> {
        let mut stack: Vec<&TypeDecl> = self.types.iter().collect();
        stack.reverse();
        TypeIter { stack }
    }
}

///
/// TypeIter
///

pub struct TypeIter<'a> {
    stack: Vec<&'a TypeDecl>,
}

impl<'a> Iterator for TypeIter<'a> {
    type Item = &'a TypeDecl;

    fn next(&mut self) -> Option<Self::Item> {
        let decl = self.stack.pop()?;
        for nested in decl.nested.iter().rev() {
            self.stack.push(nested);
        }
        Some(decl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{LookupMarker, Marker, Member, OptionMarker, Property, TypeKind};
    use crate::types::TypeRef;

    #[test]
    fn module_round_trips_through_serde() {
        let module = Module::new("app").with_ref("dep").with_type(
            TypeDecl::new("demo::Circle", TypeKind::Class)
                .with_marker(Marker::Option(OptionMarker::keyed("demo::Shapes", 1)))
                .with_member(Member::Property(
                    Property::new("name", TypeRef::named("String"))
                        .with_marker(Marker::Lookup(LookupMarker::new("ByName"))),
                )),
        );

        let json = serde_json::to_string(&module).expect("serializes");
        let back: Module = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, module);
    }

    #[test]
    fn sparse_snapshots_fill_defaults() {
        // hosts omit empty collections and false flags entirely
        let module: Module =
            serde_json::from_str(r#"{ "name": "dep" }"#).expect("defaults fill");
        assert!(module.refs.is_empty());
        assert!(module.types.is_empty());

        let decl: TypeDecl =
            serde_json::from_str(r#"{ "path": "demo::Plain", "kind": "Class" }"#)
                .expect("defaults fill");
        assert!(!decl.is_abstract);
        assert!(decl.members.is_empty() && decl.ctors.is_empty());
    }

    #[test]
    fn iter_types_visits_nested_declarations_in_order() {
        let module = Module::new("demo")
            .with_type(
                TypeDecl::new("demo::Outer", TypeKind::Class)
                    .with_nested(TypeDecl::new("demo::Outer::Inner", TypeKind::Class))
                    .with_nested(TypeDecl::new("demo::Outer::Second", TypeKind::Class)),
            )
            .with_type(TypeDecl::new("demo::Last", TypeKind::Trait));

        let names: Vec<&str> = module.iter_types().map(|t| t.path.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "demo::Outer",
                "demo::Outer::Inner",
                "demo::Outer::Second",
                "demo::Last",
            ]
        );
    }
}
