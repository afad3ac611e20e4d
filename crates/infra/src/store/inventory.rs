use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use chrono::Utc;

use uniformdesk_core::{DomainError, InventoryItemId, SchoolId};
use uniformdesk_inventory::{InventoryItem, NewInventoryItem, StockKey};

use super::StoreError;

/// Process-lifetime mapping from `(school, item type, size)` to stock rows.
///
/// `adjust_quantity` is the only mutation of an existing row. Implementations
/// must serialize it per item: the read of the current quantity, the
/// negativity check, and the write happen as one step, so two concurrent
/// decrements can never both pass the check against the same on-hand count.
pub trait InventoryStore: Send + Sync {
    fn find_item(&self, key: &StockKey) -> Result<Option<InventoryItem>, StoreError>;
    fn get_item(&self, id: InventoryItemId) -> Result<Option<InventoryItem>, StoreError>;
    fn list_items(&self, school_id: &SchoolId) -> Result<Vec<InventoryItem>, StoreError>;
    /// Every school's stock (distributor view).
    fn list_all(&self) -> Result<Vec<InventoryItem>, StoreError>;
    /// Fails with `Conflict` when the stock key already exists.
    fn insert_item(&self, input: NewInventoryItem) -> Result<InventoryItem, StoreError>;
    /// Fails with `NotFound` for an unknown id and `InsufficientStock` when
    /// the result would be negative; the row is unchanged on failure.
    fn adjust_quantity(&self, id: InventoryItemId, delta: i64)
    -> Result<InventoryItem, StoreError>;
}

impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    fn find_item(&self, key: &StockKey) -> Result<Option<InventoryItem>, StoreError> {
        (**self).find_item(key)
    }

    fn get_item(&self, id: InventoryItemId) -> Result<Option<InventoryItem>, StoreError> {
        (**self).get_item(id)
    }

    fn list_items(&self, school_id: &SchoolId) -> Result<Vec<InventoryItem>, StoreError> {
        (**self).list_items(school_id)
    }

    fn list_all(&self) -> Result<Vec<InventoryItem>, StoreError> {
        (**self).list_all()
    }

    fn insert_item(&self, input: NewInventoryItem) -> Result<InventoryItem, StoreError> {
        (**self).insert_item(input)
    }

    fn adjust_quantity(
        &self,
        id: InventoryItemId,
        delta: i64,
    ) -> Result<InventoryItem, StoreError> {
        (**self).adjust_quantity(id, delta)
    }
}

type Slot = Arc<Mutex<InventoryItem>>;

#[derive(Debug, Default)]
struct Index {
    items: HashMap<InventoryItemId, Slot>,
    by_key: HashMap<StockKey, InventoryItemId>,
}

/// In-memory inventory with one mutex per row.
///
/// The index lock is only held long enough to find a row's slot; quantity
/// changes then lock just that row, so different items never contend.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    index: RwLock<Index>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, id: InventoryItemId) -> Result<Option<Slot>, StoreError> {
        let index = self.index.read()?;
        Ok(index.items.get(&id).cloned())
    }

    fn snapshot(slot: &Slot) -> Result<InventoryItem, StoreError> {
        Ok(slot.lock()?.clone())
    }

    fn collect(&self, keep: impl Fn(&StockKey) -> bool) -> Result<Vec<InventoryItem>, StoreError> {
        let slots: Vec<Slot> = {
            let index = self.index.read()?;
            index
                .by_key
                .iter()
                .filter(|(key, _)| keep(*key))
                .filter_map(|(_, id)| index.items.get(id).cloned())
                .collect()
        };
        slots.iter().map(Self::snapshot).collect()
    }
}

impl InventoryStore for InMemoryInventoryStore {
    fn find_item(&self, key: &StockKey) -> Result<Option<InventoryItem>, StoreError> {
        let slot = {
            let index = self.index.read()?;
            index
                .by_key
                .get(key)
                .and_then(|id| index.items.get(id))
                .cloned()
        };
        slot.as_ref().map(Self::snapshot).transpose()
    }

    fn get_item(&self, id: InventoryItemId) -> Result<Option<InventoryItem>, StoreError> {
        self.slot(id)?.as_ref().map(Self::snapshot).transpose()
    }

    fn list_items(&self, school_id: &SchoolId) -> Result<Vec<InventoryItem>, StoreError> {
        self.collect(|key| &key.school_id == school_id)
    }

    fn list_all(&self) -> Result<Vec<InventoryItem>, StoreError> {
        self.collect(|_| true)
    }

    fn insert_item(&self, input: NewInventoryItem) -> Result<InventoryItem, StoreError> {
        let item = InventoryItem::create(InventoryItemId::new(), input, Utc::now())?;

        let mut index = self.index.write()?;
        if index.by_key.contains_key(item.key()) {
            return Err(StoreError::Conflict(format!(
                "inventory item {} already exists",
                item.key()
            )));
        }
        index.by_key.insert(item.key().clone(), item.id_typed());
        index
            .items
            .insert(item.id_typed(), Arc::new(Mutex::new(item.clone())));

        tracing::debug!(item_id = %item.id_typed(), key = %item.key(), "inventory item created");
        Ok(item)
    }

    fn adjust_quantity(
        &self,
        id: InventoryItemId,
        delta: i64,
    ) -> Result<InventoryItem, StoreError> {
        let slot = self.slot(id)?.ok_or(StoreError::NotFound)?;

        let mut item = slot.lock()?;
        let on_hand = item.quantity();
        item.apply_delta(delta, Utc::now()).map_err(|e| match e {
            DomainError::InvariantViolation(_) => StoreError::InsufficientStock { on_hand },
            other => other.into(),
        })?;
        Ok(item.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;

    fn school(code: &str) -> SchoolId {
        code.parse().unwrap()
    }

    fn new_item(school_id: &str, item_type: &str, size: &str, quantity: u32) -> NewInventoryItem {
        NewInventoryItem {
            school_id: school(school_id),
            item_type: item_type.to_string(),
            size: size.to_string(),
            quantity,
            low_stock_threshold: 5,
        }
    }

    fn key(school_id: &str, item_type: &str, size: &str) -> StockKey {
        StockKey::new(school(school_id), item_type, size).unwrap()
    }

    #[test]
    fn find_item_matches_full_tuple() {
        let store = InMemoryInventoryStore::new();
        let shirt = store.insert_item(new_item("SCH001", "Shirt", "M", 10)).unwrap();

        let found = store.find_item(&key("SCH001", "Shirt", "M")).unwrap().unwrap();
        assert_eq!(found.id_typed(), shirt.id_typed());
        assert!(store.find_item(&key("SCH001", "Shirt", "L")).unwrap().is_none());
        assert!(store.find_item(&key("SCH002", "Shirt", "M")).unwrap().is_none());
    }

    #[test]
    fn duplicate_tuple_is_a_conflict() {
        let store = InMemoryInventoryStore::new();
        store.insert_item(new_item("SCH001", "Shirt", "M", 10)).unwrap();

        let err = store.insert_item(new_item("SCH001", " Shirt ", "M", 3)).unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.list_all().unwrap().len(), 1);
    }

    #[test]
    fn invalid_input_is_rejected_before_insert() {
        let store = InMemoryInventoryStore::new();
        let mut input = new_item("SCH001", "", "M", 10);
        input.low_stock_threshold = 1;

        let err = store.insert_item(input).unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)));
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn list_items_is_scoped_to_school() {
        let store = InMemoryInventoryStore::new();
        store.insert_item(new_item("SCH001", "Shirt", "M", 10)).unwrap();
        store.insert_item(new_item("SCH001", "Trousers", "32", 4)).unwrap();
        store.insert_item(new_item("SCH002", "Shirt", "M", 7)).unwrap();

        assert_eq!(store.list_items(&school("SCH001")).unwrap().len(), 2);
        assert_eq!(store.list_items(&school("SCH002")).unwrap().len(), 1);
        assert!(store.list_items(&school("SCH003")).unwrap().is_empty());
        assert_eq!(store.list_all().unwrap().len(), 3);
    }

    #[test]
    fn adjust_quantity_unknown_id_is_not_found() {
        let store = InMemoryInventoryStore::new();
        let err = store.adjust_quantity(InventoryItemId::new(), -1).unwrap_err();
        assert_eq!(err, StoreError::NotFound);
    }

    #[test]
    fn adjust_quantity_refuses_negative_and_keeps_row() {
        let store = InMemoryInventoryStore::new();
        let item = store.insert_item(new_item("SCH001", "Shirt", "M", 4)).unwrap();

        let err = store.adjust_quantity(item.id_typed(), -5).unwrap_err();
        assert_eq!(err, StoreError::InsufficientStock { on_hand: 4 });
        assert_eq!(store.get_item(item.id_typed()).unwrap().unwrap().quantity(), 4);

        let after = store.adjust_quantity(item.id_typed(), 6).unwrap();
        assert_eq!(after.quantity(), 10);
    }

    #[test]
    fn concurrent_decrements_never_oversell() {
        let store = InMemoryInventoryStore::new();
        let item = store.insert_item(new_item("SCH001", "Shirt", "M", 10)).unwrap();
        let id = item.id_typed();
        let barrier = Barrier::new(8);

        let outcomes: Vec<bool> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        store.adjust_quantity(id, -3).is_ok()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        // 10 units cover three 3-unit decrements and no more.
        assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 3);
        assert_eq!(store.get_item(id).unwrap().unwrap().quantity(), 1);
    }
}
