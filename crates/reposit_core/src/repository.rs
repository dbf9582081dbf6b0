//! Typed repository facade.

use crate::engine::LifecycleEngine;
use crate::entity::{describe, EntityModel};
use crate::error::{CoreError, CoreResult};
use crate::marker::{Marker, MethodSpec, MethodTable, ReturnShape};
use crate::project::{project, Input, Output, Shape};
use reposit_store::{EntityId, StoreAdapter};
use std::marker::PhantomData;
use std::sync::Arc;

/// A typed repository over entities of type `T`.
///
/// `Repository<T, S>` dispatches declared methods to the lifecycle engine
/// and projects results back into the caller's container shape. Methods are
/// declared once, when the repository is built; marker exclusivity is
/// validated at that point and never again at call time.
///
/// After a call returns, only the returned instances are authoritative -
/// argument instances are not updated in place.
///
/// # Example
///
/// ```rust,ignore
/// use reposit_core::{Input, Marker, MethodSpec, Repository};
///
/// let repo: Repository<Car, _> = Repository::builder(store)
///     .declare("park", MethodSpec::new(Marker::Insert))
///     .declare("repaint", MethodSpec::new(Marker::Update))
///     .build()?;
///
/// let parked = repo.call("park", Input::Single(car))?;
/// ```
pub struct Repository<T: EntityModel, S: StoreAdapter> {
    /// Executes lifecycle semantics against the store.
    engine: LifecycleEngine<S>,
    /// Declared methods, validated at build time.
    methods: MethodTable,
    /// Type marker.
    _marker: PhantomData<T>,
}

impl<T: EntityModel, S: StoreAdapter> Repository<T, S> {
    /// Starts declaring a repository over the given store.
    #[must_use]
    pub fn builder(store: Arc<S>) -> RepositoryBuilder<T, S> {
        RepositoryBuilder {
            store,
            declarations: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Creates a repository with the conventional method declarations
    /// (`insert`, `update`, `delete`, `save`, `find`).
    #[must_use]
    pub fn with_defaults(store: Arc<S>) -> Self {
        Self {
            engine: LifecycleEngine::new(store),
            methods: MethodTable::with_defaults(),
            _marker: PhantomData,
        }
    }

    /// Returns the backing store.
    pub fn store(&self) -> &S {
        self.engine.store()
    }

    /// Returns the declared method table.
    pub fn methods(&self) -> &MethodTable {
        &self.methods
    }

    /// Invokes a declared method.
    ///
    /// The output container shape matches the input container shape (or is
    /// [`Output::Unit`] for unit-declared methods). For `Find`-marked
    /// methods, each input entity's identifier is looked up; absent records
    /// are omitted from a `Many` output and yield [`Output::Unit`] for a
    /// `Single` input.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownMethod`] for undeclared methods, plus
    /// the engine's failure taxonomy for the dispatched operation.
    pub fn call(&self, method: &str, input: Input<T>) -> CoreResult<Output<T>> {
        let spec = self
            .methods
            .spec(method)
            .ok_or_else(|| CoreError::unknown_method(method))?;

        let shape = input.shape();
        let entities = input.into_entities();

        match spec.marker {
            Marker::Find => self.find_current(shape, spec.returns, &entities),
            lifecycle => {
                let ids = Self::ids_of(&entities)?;
                let records = self.engine.execute(lifecycle, &entities)?;
                project(shape, spec.returns, &ids, records)
            }
        }
    }

    /// Inserts one entity, returning the stored state.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EntityExists`] if a record already exists for
    /// the identifier (strict stores).
    pub fn insert(&self, entity: T) -> CoreResult<T> {
        self.write_one(Marker::Insert, entity)
    }

    /// Updates one entity, returning the stored state with all
    /// store-assigned values.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::OptimisticLock`] if no record matches the
    /// entity's identifier and version.
    pub fn update(&self, entity: T) -> CoreResult<T> {
        self.write_one(Marker::Update, entity)
    }

    /// Inserts or updates one entity, returning the stored state.
    pub fn save(&self, entity: T) -> CoreResult<T> {
        self.write_one(Marker::Save, entity)
    }

    /// Deletes one entity.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::OptimisticLock`] if no record matches the
    /// entity's identifier and version.
    pub fn delete(&self, entity: T) -> CoreResult<()> {
        self.engine
            .execute(Marker::Delete, std::slice::from_ref(&entity))?;
        Ok(())
    }

    /// Retrieves the entity stored for `id`.
    pub fn find(&self, id: EntityId) -> CoreResult<Option<T>> {
        self.engine.find(id)
    }

    /// Inserts a sequence of entities, returning the stored states in
    /// input order.
    pub fn insert_all(&self, entities: Vec<T>) -> CoreResult<Vec<T>> {
        self.write_many(Marker::Insert, entities)
    }

    /// Updates a sequence of entities. The returned sequence has one
    /// updated entity per input entity, ordered to match input position by
    /// identifier.
    pub fn update_all(&self, entities: Vec<T>) -> CoreResult<Vec<T>> {
        self.write_many(Marker::Update, entities)
    }

    /// Inserts or updates a sequence of entities, in input order.
    pub fn save_all(&self, entities: Vec<T>) -> CoreResult<Vec<T>> {
        self.write_many(Marker::Save, entities)
    }

    /// Deletes a sequence of entities.
    pub fn delete_all(&self, entities: Vec<T>) -> CoreResult<()> {
        self.engine.execute(Marker::Delete, &entities)?;
        Ok(())
    }

    /// Updates a fixed-size array of entities, preserving the array shape.
    pub fn update_array<const N: usize>(&self, entities: [T; N]) -> CoreResult<[T; N]> {
        let updated = self.write_many(Marker::Update, entities.into_iter().collect())?;
        updated
            .try_into()
            .map_err(|_| CoreError::projection("array cardinality changed during update"))
    }

    fn write_one(&self, marker: Marker, entity: T) -> CoreResult<T> {
        let id = describe(&entity)?.id;
        let records = self
            .engine
            .execute(marker, std::slice::from_ref(&entity))?;

        match project(Shape::Single, ReturnShape::Matching, &[id], records)? {
            Output::Single(entity) => Ok(entity),
            _ => Err(CoreError::projection(
                "single write must project a single entity",
            )),
        }
    }

    fn write_many(&self, marker: Marker, entities: Vec<T>) -> CoreResult<Vec<T>> {
        let ids = Self::ids_of(&entities)?;
        let records = self.engine.execute(marker, &entities)?;

        match project(Shape::Many, ReturnShape::Matching, &ids, records)? {
            Output::Many(entities) => Ok(entities),
            _ => Err(CoreError::projection(
                "bulk write must project a sequence",
            )),
        }
    }

    fn find_current(
        &self,
        shape: Shape,
        returns: ReturnShape,
        entities: &[T],
    ) -> CoreResult<Output<T>> {
        if returns == ReturnShape::Unit {
            return Ok(Output::Unit);
        }

        let mut found = Vec::with_capacity(entities.len());
        for entity in entities {
            let key = describe(entity)?;
            if let Some(current) = self.engine.find(key.id)? {
                found.push(current);
            }
        }

        match shape {
            Shape::Single => Ok(found
                .pop()
                .map_or(Output::Unit, Output::Single)),
            Shape::Many => Ok(Output::Many(found)),
        }
    }

    fn ids_of(entities: &[T]) -> CoreResult<Vec<EntityId>> {
        let mut ids = Vec::with_capacity(entities.len());
        for entity in entities {
            ids.push(describe(entity)?.id);
        }
        Ok(ids)
    }
}

impl<T: EntityModel, S: StoreAdapter> std::fmt::Debug for Repository<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("methods", &self.methods.len())
            .finish_non_exhaustive()
    }
}

/// Collects method declarations for a [`Repository`].
///
/// Declarations are validated when [`RepositoryBuilder::build`] runs -
/// the registration point. A method declared twice fails the build with
/// [`CoreError::MarkerConflict`]; no repository is produced.
pub struct RepositoryBuilder<T: EntityModel, S: StoreAdapter> {
    store: Arc<S>,
    declarations: Vec<(String, MethodSpec)>,
    _marker: PhantomData<T>,
}

impl<T: EntityModel, S: StoreAdapter> RepositoryBuilder<T, S> {
    /// Declares a method with the given spec.
    #[must_use]
    pub fn declare(mut self, method: impl Into<String>, spec: MethodSpec) -> Self {
        self.declarations.push((method.into(), spec));
        self
    }

    /// Validates all declarations and builds the repository.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MarkerConflict`] if any method carries more
    /// than one marker.
    pub fn build(self) -> CoreResult<Repository<T, S>> {
        let mut methods = MethodTable::new();
        for (method, spec) in self.declarations {
            methods.declare(method, spec)?;
        }

        Ok(Repository {
            engine: LifecycleEngine::new(self.store),
            methods,
            _marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reposit_store::{InMemoryStore, Version};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Book {
        id: Option<EntityId>,
        version: Option<Version>,
        title: String,
    }

    impl Book {
        fn new(title: &str) -> Self {
            Self {
                id: Some(EntityId::new()),
                version: Some(Version::FIRST),
                title: title.into(),
            }
        }
    }

    impl EntityModel for Book {
        fn entity_id(&self) -> Option<EntityId> {
            self.id
        }

        fn version(&self) -> Option<Version> {
            self.version
        }

        fn set_version(&mut self, version: Option<Version>) {
            self.version = version;
        }
    }

    fn repo() -> Repository<Book, InMemoryStore> {
        Repository::with_defaults(Arc::new(InMemoryStore::new()))
    }

    #[test]
    fn conflicting_declarations_fail_at_build_time() {
        let store = Arc::new(InMemoryStore::new());
        let result = Repository::<Book, _>::builder(store)
            .declare("shelve", MethodSpec::new(Marker::Update))
            .declare("shelve", MethodSpec::new(Marker::Find))
            .build();

        assert!(
            matches!(result, Err(CoreError::MarkerConflict { method }) if method == "shelve")
        );
    }

    #[test]
    fn declared_method_dispatches() {
        let store = Arc::new(InMemoryStore::new());
        let repo = Repository::<Book, _>::builder(store)
            .declare("shelve", MethodSpec::new(Marker::Insert))
            .declare("reshelve", MethodSpec::new(Marker::Update))
            .build()
            .unwrap();

        let book = Book::new("Dune");
        let shelved = repo
            .call("shelve", Input::Single(book))
            .unwrap()
            .into_single()
            .unwrap();
        assert_eq!(shelved.version, Some(Version::FIRST));

        let mut changed = shelved;
        changed.title = "Dune Messiah".into();
        let updated = repo
            .call("reshelve", Input::Single(changed))
            .unwrap()
            .into_single()
            .unwrap();
        assert_eq!(updated.version, Some(Version::new(2)));
        assert_eq!(updated.title, "Dune Messiah");
    }

    #[test]
    fn unknown_method_is_rejected() {
        let repo = repo();
        let result = repo.call("renumber", Input::Single(Book::new("x")));
        assert!(matches!(result, Err(CoreError::UnknownMethod { .. })));
    }

    #[test]
    fn unit_declared_method_discards_output() {
        let store = Arc::new(InMemoryStore::new());
        let repo = Repository::<Book, _>::builder(store)
            .declare("shelve", MethodSpec::new(Marker::Insert))
            .declare("discard", MethodSpec::unit(Marker::Delete))
            .build()
            .unwrap();

        let book = repo
            .call("shelve", Input::Single(Book::new("Dune")))
            .unwrap()
            .into_single()
            .unwrap();

        let output = repo.call("discard", Input::Single(book.clone())).unwrap();
        assert_eq!(output, Output::Unit);
        assert!(repo.find(book.id.unwrap()).unwrap().is_none());
    }

    #[test]
    fn single_shape_is_preserved() {
        let repo = repo();
        let book = repo.insert(Book::new("Dune")).unwrap();
        let updated = repo.update(book).unwrap();
        assert_eq!(updated.version, Some(Version::new(2)));
    }

    #[test]
    fn sequence_shape_is_preserved() {
        let repo = repo();
        let books = repo
            .insert_all(vec![Book::new("a"), Book::new("b"), Book::new("c")])
            .unwrap();
        assert_eq!(books.len(), 3);

        let updated = repo.update_all(books.clone()).unwrap();
        assert_eq!(updated.len(), 3);
        for (before, after) in books.iter().zip(&updated) {
            assert_eq!(before.id, after.id);
            assert_eq!(after.version, Some(Version::new(2)));
        }
    }

    #[test]
    fn array_shape_is_preserved() {
        let repo = repo();
        let books = repo
            .insert_all(vec![Book::new("a"), Book::new("b"), Book::new("c")])
            .unwrap();
        let array: [Book; 3] = books.try_into().unwrap();

        let updated: [Book; 3] = repo.update_array(array).unwrap();
        assert_eq!(updated.len(), 3);
        assert!(updated.iter().all(|b| b.version == Some(Version::new(2))));
    }

    #[test]
    fn find_declared_method_returns_current_state() {
        let repo = repo();
        let book = repo.insert(Book::new("Dune")).unwrap();

        let mut stale = book.clone();
        stale.title = "unsaved title".into();

        let found = repo
            .call("find", Input::Single(stale))
            .unwrap()
            .into_single()
            .unwrap();
        assert_eq!(found, book);
    }

    #[test]
    fn argument_instances_are_not_updated_in_place() {
        let repo = repo();
        let book = repo.insert(Book::new("Dune")).unwrap();
        let argument = book.clone();

        let returned = repo.update(argument.clone()).unwrap();

        // Only the returned instance carries the advanced version.
        assert_eq!(argument.version, Some(Version::FIRST));
        assert_eq!(returned.version, Some(Version::new(2)));
    }
}
