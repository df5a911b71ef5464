use std::collections::HashMap;

use la_arena::{Arena, Idx};
use serde::{Serialize, Serializer, ser::SerializeMap};
use tracing::trace;

use crate::{
    ast::SourceRange,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::MemoryItem},
};

/// Handle to a scope inside a [`ProgramMemory`].
pub type ScopeId = Idx<Scope>;

/// One lexical scope: its own bindings and a lookup-only link to its parent.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    bindings: HashMap<String, MemoryItem>,
    order:    Vec<String>,
    parent:   Option<ScopeId>,
}

impl Scope {
    /// The enclosing scope, `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// Bindings of this scope only, in declaration order.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &MemoryItem)> {
        self.order
            .iter()
            .filter_map(|name| self.bindings.get(name).map(|item| (name.as_str(), item)))
    }
}

/// Scoped mapping from names to runtime values.
///
/// Scopes live in an arena and refer to their parent by index, so a child
/// never owns its parent and the parent never sees the child's bindings.
/// Scopes stay allocated until the memory is dropped, which keeps scopes
/// captured by function values valid for the whole pass.
///
/// ## Example
/// ```
/// use partscript::{
///     ast::SourceRange,
///     interpreter::{
///         memory::ProgramMemory,
///         value::core::{MemoryItem, Metadata, Value},
///     },
/// };
///
/// let range = SourceRange::new(0, 1);
/// let mut memory = ProgramMemory::new();
/// let root = memory.root();
/// memory.define(root, "a", MemoryItem::new(Value::Number(3.0), Metadata::default()), range)
///       .unwrap();
///
/// let child = memory.child_scope(root);
/// assert_eq!(memory.lookup(child, "a", range).unwrap().value, Value::Number(3.0));
/// ```
#[derive(Debug, Clone)]
pub struct ProgramMemory {
    scopes: Arena<Scope>,
    root:   ScopeId,
}

impl Default for ProgramMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramMemory {
    /// Creates a memory holding an empty root scope.
    #[must_use]
    pub fn new() -> Self {
        let mut scopes = Arena::new();
        let root = scopes.alloc(Scope::default());
        Self { scopes, root }
    }

    /// Creates a memory whose root scope is seeded with `bindings`.
    ///
    /// Later duplicates replace earlier ones; seeding is a host operation and
    /// does not go through [`define`](Self::define).
    #[must_use]
    pub fn with_bindings<I>(bindings: I) -> Self
        where I: IntoIterator<Item = (String, MemoryItem)>
    {
        let mut memory = Self::new();
        let root = &mut memory.scopes[memory.root];
        for (name, item) in bindings {
            if root.bindings.insert(name.clone(), item).is_none() {
                root.order.push(name);
            }
        }
        memory
    }

    /// The root scope.
    #[must_use]
    pub const fn root(&self) -> ScopeId {
        self.root
    }

    /// Borrows a scope.
    #[must_use]
    pub fn scope(&self, scope: ScopeId) -> &Scope {
        &self.scopes[scope]
    }

    /// Allocates a new, empty scope whose parent is `parent`.
    pub fn child_scope(&mut self, parent: ScopeId) -> ScopeId {
        let child = self.scopes.alloc(Scope { parent: Some(parent),
                                              ..Scope::default() });
        trace!(?parent, ?child, "entered scope");
        child
    }

    /// Binds `name` in `scope`.
    ///
    /// # Parameters
    /// - `scope`: The scope to bind in. Ancestors are never modified.
    /// - `name`: The name to bind.
    /// - `item`: The value and its metadata.
    /// - `range`: Reported if the binding is a duplicate.
    ///
    /// # Errors
    /// `DuplicateBinding` if `name` is already bound in `scope` itself.
    /// Shadowing a binding of an ancestor is allowed.
    pub fn define(&mut self,
                  scope: ScopeId,
                  name: &str,
                  item: MemoryItem,
                  range: SourceRange)
                  -> EvalResult<()> {
        self.ensure_unbound(scope, name, range)?;
        let scope = &mut self.scopes[scope];
        scope.bindings.insert(name.to_string(), item);
        scope.order.push(name.to_string());
        Ok(())
    }

    /// Checks that `name` can still be bound in `scope`.
    ///
    /// # Errors
    /// `DuplicateBinding` carrying `range` if `scope` itself already binds
    /// `name`.
    pub fn ensure_unbound(&self, scope: ScopeId, name: &str, range: SourceRange) -> EvalResult<()> {
        if self.scopes[scope].bindings.contains_key(name) {
            return Err(RuntimeError::DuplicateBinding { name: name.to_string(),
                                                        range });
        }
        Ok(())
    }

    /// Resolves `name` from `scope` outwards and returns the first match.
    #[must_use]
    pub fn get(&self, scope: ScopeId, name: &str) -> Option<&MemoryItem> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id];
            if let Some(item) = scope.bindings.get(name) {
                return Some(item);
            }
            current = scope.parent;
        }
        None
    }

    /// Like [`get`](Self::get), but fails for unbound names.
    ///
    /// # Errors
    /// `UndefinedVariable` carrying `range` if no scope binds `name`.
    pub fn lookup(&self, scope: ScopeId, name: &str, range: SourceRange) -> EvalResult<&MemoryItem> {
        self.get(scope, name)
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                             range })
    }

    /// Root bindings in declaration order.
    pub fn root_bindings(&self) -> impl Iterator<Item = (&str, &MemoryItem)> {
        self.scopes[self.root].bindings()
    }

    /// An independent copy for a what-if pass.
    ///
    /// Values are shared, but they are immutable, so nothing the copy does
    /// can be observed through `self`.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }
}

/// Serializes the root scope as a JSON object in declaration order.
impl Serialize for ProgramMemory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let root = &self.scopes[self.root];
        let mut map = serializer.serialize_map(Some(root.order.len()))?;
        for (name, item) in root.bindings() {
            map.serialize_entry(name, item)?;
        }
        map.end()
    }
}
