use crate::context::ContextError;
use crate::ir::Definition;
use crate::ir::Fragment;
use crate::ir::Root;
use crate::schema::Schema;
use indexmap::IndexMap;
use std::sync::Arc;

type Result<T> = std::result::Result<T, ContextError>;

/// An immutable, name-keyed collection of IR definitions resolved against
/// one [`Schema`].
///
/// Every "mutating" operation returns a new context. Definitions are held in
/// [`Arc`]s so that derived contexts share the nodes they did not change.
/// Names form a single namespace across fragments and roots.
#[derive(Clone, Debug)]
pub struct CompilerContext {
    documents: IndexMap<String, Arc<Definition>>,
    schema: Arc<Schema>,
}
impl CompilerContext {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            documents: IndexMap::new(),
            schema,
        }
    }

    pub fn add(&self, definition: Definition) -> Result<Self> {
        let mut documents = self.documents.clone();
        Self::insert_new(&mut documents, Arc::new(definition))?;
        Ok(Self {
            documents,
            schema: Arc::clone(&self.schema),
        })
    }

    pub fn add_all(
        &self,
        definitions: impl IntoIterator<Item = Definition>,
    ) -> Result<Self> {
        let mut documents = self.documents.clone();
        for definition in definitions {
            Self::insert_new(&mut documents, Arc::new(definition))?;
        }
        Ok(Self {
            documents,
            schema: Arc::clone(&self.schema),
        })
    }

    /// All definitions, in insertion order.
    pub fn documents(&self) -> impl Iterator<Item = &Arc<Definition>> {
        self.documents.values()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Definition>> {
        self.documents.get(name)
    }

    pub fn get_fragment(&self, name: &str) -> Result<&Fragment> {
        match self.documents.get(name).map(Arc::as_ref) {
            Some(Definition::Fragment(fragment)) => Ok(fragment),
            Some(other) => Err(ContextError::WrongDefinitionKind {
                actual_kind: other.kind_name(),
                expected_kind: "Fragment",
                name: name.to_string(),
            }),
            None => Err(ContextError::UndefinedDefinition {
                name: name.to_string(),
            }),
        }
    }

    pub fn get_root(&self, name: &str) -> Result<&Root> {
        match self.documents.get(name).map(Arc::as_ref) {
            Some(Definition::Root(root)) => Ok(root),
            Some(other) => Err(ContextError::WrongDefinitionKind {
                actual_kind: other.kind_name(),
                expected_kind: "Root",
                name: name.to_string(),
            }),
            None => Err(ContextError::UndefinedDefinition {
                name: name.to_string(),
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    pub fn remove(&self, name: &str) -> Self {
        let mut documents = self.documents.clone();
        documents.shift_remove(name);
        Self {
            documents,
            schema: Arc::clone(&self.schema),
        }
    }

    /// Swap in a new version of an existing definition.
    pub fn replace(&self, definition: Definition) -> Result<Self> {
        if !self.documents.contains_key(definition.name()) {
            return Err(ContextError::UndefinedDefinition {
                name: definition.name().to_string(),
            });
        }
        Ok(self.update(definition))
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Rebuild the context by passing every definition through `f`.
    ///
    /// Returning `None` drops the definition. A returned definition equal to
    /// the original keeps sharing the original node. `f` may not rename a
    /// definition onto the name of another one.
    pub fn try_map<E, F>(&self, mut f: F) -> std::result::Result<Self, E>
    where
        E: From<ContextError>,
        F: FnMut(&Arc<Definition>) -> std::result::Result<Option<Definition>, E>,
    {
        let mut documents = IndexMap::with_capacity(self.documents.len());
        for original in self.documents.values() {
            let Some(transformed) = f(original)? else {
                continue;
            };
            let node =
                if transformed == **original {
                    Arc::clone(original)
                } else {
                    Arc::new(transformed)
                };
            Self::insert_new(&mut documents, node)?;
        }
        Ok(Self {
            documents,
            schema: Arc::clone(&self.schema),
        })
    }

    /// Add `definition`, overwriting any definition of the same name.
    pub fn update(&self, definition: Definition) -> Self {
        let mut documents = self.documents.clone();
        documents.insert(definition.name().to_string(), Arc::new(definition));
        Self {
            documents,
            schema: Arc::clone(&self.schema),
        }
    }

    fn insert_new(
        documents: &mut IndexMap<String, Arc<Definition>>,
        definition: Arc<Definition>,
    ) -> Result<()> {
        if let Some(existing) = documents.get(definition.name()) {
            return Err(ContextError::DuplicateDefinition {
                location1: existing.location().to_owned(),
                location2: definition.location().to_owned(),
                name: definition.name().to_string(),
            });
        }
        documents.insert(definition.name().to_string(), definition);
        Ok(())
    }
}
