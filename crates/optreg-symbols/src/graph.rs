use crate::{
    MAX_BASE_DEPTH,
    node::{Module, TypeDecl},
    types::TypePath,
};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error as ThisError;

///
/// GraphError
///

#[derive(Debug, ThisError)]
pub enum GraphError {
    #[error("duplicate module `{0}` in graph")]
    DuplicateModule(String),

    #[error("current module `{0}` not present in graph")]
    UnknownCurrent(String),

    #[error("module `{0}` references unknown module `{1}`")]
    UnknownReference(String, String),
}

// Index trail to a (possibly nested) declaration inside a module.
#[derive(Clone, Debug)]
struct TypeLoc {
    module: usize,
    trail: Vec<usize>,
}

///
/// SymbolGraph
///
/// Immutable snapshot of all type declarations visible to one generation
/// pass: the current module plus everything it references directly or
/// transitively. Constructed once per pass; all queries are read-only.
///
/// When the same fully-qualified path is declared in more than one module,
/// `find_type` resolves to the declaration closest to the current module
/// in scope order. The scanner still sees every duplicate; only point
/// lookups collapse.
///

#[derive(Debug)]
pub struct SymbolGraph {
    modules: Vec<Module>,
    /// Module indices in scope order, current module first.
    scope: Vec<usize>,
    index: BTreeMap<TypePath, TypeLoc>,
}

impl SymbolGraph {
    pub fn new(current: &str, modules: Vec<Module>) -> Result<Self, GraphError> {
        let mut by_name: BTreeMap<&str, usize> = BTreeMap::new();
        for (idx, module) in modules.iter().enumerate() {
            if by_name.insert(&module.name, idx).is_some() {
                return Err(GraphError::DuplicateModule(module.name.clone()));
            }
        }

        let Some(&start) = by_name.get(current) else {
            return Err(GraphError::UnknownCurrent(current.to_string()));
        };

        // Breadth-first closure over direct references, in declaration
        // order, so scope order is stable for a given graph.
        let mut scope = vec![start];
        let mut seen: BTreeSet<usize> = BTreeSet::from([start]);
        let mut cursor = 0;
        while cursor < scope.len() {
            let idx = scope[cursor];
            cursor += 1;
            for reference in &modules[idx].refs {
                let Some(&ref_idx) = by_name.get(reference.as_str()) else {
                    return Err(GraphError::UnknownReference(
                        modules[idx].name.clone(),
                        reference.clone(),
                    ));
                };
                if seen.insert(ref_idx) {
                    scope.push(ref_idx);
                }
            }
        }

        let mut index = BTreeMap::new();
        for &module_idx in &scope {
            let mut stack: Vec<(Vec<usize>, &TypeDecl)> = modules[module_idx]
                .types
                .iter()
                .enumerate()
                .map(|(i, t)| (vec![i], t))
                .collect();
            while let Some((trail, decl)) = stack.pop() {
                index.entry(decl.path.clone()).or_insert(TypeLoc {
                    module: module_idx,
                    trail: trail.clone(),
                });
                for (i, nested) in decl.nested.iter().enumerate() {
                    let mut child = trail.clone();
                    child.push(i);
                    stack.push((child, nested));
                }
            }
        }

        Ok(Self {
            modules,
            scope,
            index,
        })
    }

    #[must_use]
    pub fn current_module(&self) -> &Module {
        &self.modules[self.scope[0]]
    }

    /// Every module visible to this pass, current first.
    pub fn modules_in_scope(&self) -> impl Iterator<Item = &Module> {
        self.scope.iter().map(|&idx| &self.modules[idx])
    }

    #[must_use]
    pub fn find_type(&self, path: &TypePath) -> Option<&TypeDecl> {
        let loc = self.index.get(path)?;
        let mut trail = loc.trail.iter();
        let mut decl = &self.modules[loc.module].types[*trail.next()?];
        for &idx in trail {
            decl = &decl.nested[idx];
        }
        Some(decl)
    }

    /// Iterate `start` and then its resolvable ancestors, parent pointer
    /// by parent pointer, capped at [`MAX_BASE_DEPTH`].
    #[must_use]
    pub fn base_chain<'g>(&'g self, start: &'g TypeDecl) -> BaseChain<'g> {
        BaseChain {
            graph: self,
            next: Some(start),
            depth: 0,
        }
    }

    /// Whether `decl` has `ancestor` strictly above it in its base chain.
    #[must_use]
    pub fn derives_from(&self, decl: &TypeDecl, ancestor: &TypePath) -> bool {
        let mut current = decl.base.as_ref();
        for _ in 0..MAX_BASE_DEPTH {
            let Some(base) = current else { return false };
            if &base.path == ancestor {
                return true;
            }
            current = self.find_type(&base.path).and_then(|d| d.base.as_ref());
        }
        false
    }
}

///
/// BaseChain
///

pub struct BaseChain<'g> {
    graph: &'g SymbolGraph,
    next: Option<&'g TypeDecl>,
    depth: usize,
}

impl<'g> Iterator for BaseChain<'g> {
    type Item = &'g TypeDecl;

    fn next(&mut self) -> Option<Self::Item> {
        if self.depth > MAX_BASE_DEPTH {
            return None;
        }
        let decl = self.next.take()?;
        self.depth += 1;
        self.next = decl
            .base
            .as_ref()
            .and_then(|base| self.graph.find_type(&base.path));
        Some(decl)
    }
}
