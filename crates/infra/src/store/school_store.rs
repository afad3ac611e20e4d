use std::collections::HashMap;
use std::sync::RwLock;

use uniformdesk_core::{Entity, SchoolId};
use uniformdesk_inventory::{IssuanceRecord, Resupply};
use uniformdesk_students::{Repair, Student};

use super::StoreError;

/// Entities that belong to exactly one school.
pub trait SchoolScoped: Entity {
    fn school_id(&self) -> &SchoolId;
}

impl SchoolScoped for Student {
    fn school_id(&self) -> &SchoolId {
        Student::school_id(self)
    }
}

impl SchoolScoped for IssuanceRecord {
    fn school_id(&self) -> &SchoolId {
        &self.school_id
    }
}

impl SchoolScoped for Repair {
    fn school_id(&self) -> &SchoolId {
        &self.school_id
    }
}

impl SchoolScoped for Resupply {
    fn school_id(&self) -> &SchoolId {
        &self.school_id
    }
}

/// In-memory id → entity map with school-filtered listing.
///
/// Shared building block for the student registry and the record logs.
#[derive(Debug)]
pub struct InMemorySchoolStore<V: SchoolScoped> {
    inner: RwLock<HashMap<V::Id, V>>,
}

impl<V: SchoolScoped> InMemorySchoolStore<V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<V: SchoolScoped> Default for InMemorySchoolStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> InMemorySchoolStore<V>
where
    V: SchoolScoped + Clone,
{
    pub fn get(&self, id: &V::Id) -> Result<Option<V>, StoreError> {
        let map = self.inner.read()?;
        Ok(map.get(id).cloned())
    }

    /// Insert a new entity unless its id is taken. Constant time; for
    /// append-only logs with no natural key.
    pub fn insert(&self, value: V) -> Result<(), StoreError> {
        let mut map = self.inner.write()?;
        if map.contains_key(value.id()) {
            return Err(StoreError::Conflict(format!("duplicate id {:?}", value.id())));
        }
        map.insert(value.id().clone(), value);
        Ok(())
    }

    /// Insert a new entity unless its id is taken or `clashes` matches an
    /// existing entity of the same school. The check and insert share one
    /// write lock.
    pub fn insert_unique(
        &self,
        value: V,
        clashes: impl Fn(&V, &V) -> bool,
    ) -> Result<(), StoreError> {
        let mut map = self.inner.write()?;
        if map.contains_key(value.id()) {
            return Err(StoreError::Conflict(format!("duplicate id {:?}", value.id())));
        }
        if let Some(existing) = map
            .values()
            .find(|v| v.school_id() == value.school_id() && clashes(*v, &value))
        {
            return Err(StoreError::Conflict(format!(
                "clashes with existing record {:?}",
                existing.id()
            )));
        }
        map.insert(value.id().clone(), value);
        Ok(())
    }

    /// Mutate one entity in place under the write lock.
    pub fn update<R>(&self, id: &V::Id, f: impl FnOnce(&mut V) -> R) -> Result<R, StoreError> {
        let mut map = self.inner.write()?;
        let value = map.get_mut(id).ok_or(StoreError::NotFound)?;
        Ok(f(value))
    }

    pub fn list(&self, school_id: &SchoolId) -> Result<Vec<V>, StoreError> {
        self.filter(|v| v.school_id() == school_id)
    }

    pub fn filter(&self, keep: impl Fn(&V) -> bool) -> Result<Vec<V>, StoreError> {
        let map = self.inner.read()?;
        Ok(map.values().filter(|v| keep(*v)).cloned().collect())
    }
}
