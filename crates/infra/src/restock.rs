//! Stock setup and replenishment (resupply deliveries, bulk reorders).

use uniformdesk_core::{InventoryItemId, SchoolId};
use uniformdesk_inventory::{InventoryItem, NewInventoryItem, StockFilter, matches_search};

use crate::store::{InventoryStore, StoreError};

#[derive(Debug, Clone)]
pub struct RestockService<I> {
    inventory: I,
}

impl<I: InventoryStore> RestockService<I> {
    pub fn new(inventory: I) -> Self {
        Self { inventory }
    }

    pub fn add_item(&self, input: NewInventoryItem) -> Result<InventoryItem, StoreError> {
        let item = self.inventory.insert_item(input)?;
        tracing::info!(item_id = %item.id_typed(), key = %item.key(), quantity = item.quantity(), "stock line added");
        Ok(item)
    }

    pub fn get(&self, id: InventoryItemId) -> Result<Option<InventoryItem>, StoreError> {
        self.inventory.get_item(id)
    }

    /// Add delivered units to a stock line.
    pub fn restock(&self, id: InventoryItemId, quantity: u32) -> Result<InventoryItem, StoreError> {
        if quantity == 0 {
            return Err(StoreError::Invalid("quantity must be at least 1".to_string()));
        }
        let item = self.inventory.adjust_quantity(id, i64::from(quantity))?;
        tracing::info!(item_id = %id, added = quantity, on_hand = item.quantity(), "stock line restocked");
        Ok(item)
    }

    /// Restock every line at or below its threshold by twice the threshold.
    ///
    /// Returns the restocked lines. A line that fails to restock is logged and
    /// skipped; the rest still go through.
    pub fn reorder_low_stock(&self, school_id: &SchoolId) -> Result<Vec<InventoryItem>, StoreError> {
        let low: Vec<InventoryItem> = self
            .inventory
            .list_items(school_id)?
            .into_iter()
            .filter(|item| item.stock_level().needs_reorder())
            .collect();

        let mut restocked = Vec::with_capacity(low.len());
        for item in low {
            match self.restock(item.id_typed(), item.reorder_quantity()) {
                Ok(updated) => restocked.push(updated),
                Err(e) => tracing::warn!(item_id = %item.id_typed(), error = %e, "reorder skipped"),
            }
        }
        sort_for_listing(&mut restocked);
        Ok(restocked)
    }

    /// One school's stock, filtered and sorted by item type then size.
    pub fn list(
        &self,
        school_id: &SchoolId,
        filter: StockFilter,
        search: &str,
    ) -> Result<Vec<InventoryItem>, StoreError> {
        let mut items: Vec<InventoryItem> = self
            .inventory
            .list_items(school_id)?
            .into_iter()
            .filter(|item| filter.matches(item) && matches_search(item, search))
            .collect();
        sort_for_listing(&mut items);
        Ok(items)
    }

    /// Every school's stock, sorted by school, item type, size.
    pub fn list_all(&self) -> Result<Vec<InventoryItem>, StoreError> {
        let mut items = self.inventory.list_all()?;
        sort_for_listing(&mut items);
        Ok(items)
    }
}

fn sort_for_listing(items: &mut [InventoryItem]) {
    items.sort_by(|a, b| a.key().cmp(b.key()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryInventoryStore;

    fn school() -> SchoolId {
        "SCH001".parse().unwrap()
    }

    fn line(item_type: &str, size: &str, quantity: u32, threshold: u32) -> NewInventoryItem {
        NewInventoryItem {
            school_id: school(),
            item_type: item_type.to_string(),
            size: size.to_string(),
            quantity,
            low_stock_threshold: threshold,
        }
    }

    #[test]
    fn restock_adds_exact_quantity() {
        let service = RestockService::new(InMemoryInventoryStore::new());
        let item = service.add_item(line("Shirt", "M", 4, 5)).unwrap();

        let after = service.restock(item.id_typed(), 12).unwrap();
        assert_eq!(after.quantity(), 16);
        assert!(service.restock(item.id_typed(), 0).is_err());
        assert_eq!(service.restock(InventoryItemId::new(), 1).unwrap_err(), StoreError::NotFound);
    }

    #[test]
    fn reorder_only_touches_low_and_empty_lines() {
        let service = RestockService::new(InMemoryInventoryStore::new());
        service.add_item(line("Shirt", "M", 3, 5)).unwrap();
        service.add_item(line("Shirt", "L", 0, 4)).unwrap();
        let good = service.add_item(line("Trousers", "32", 20, 5)).unwrap();

        let restocked = service.reorder_low_stock(&school()).unwrap();
        let summary: Vec<(&str, u32)> = restocked.iter().map(|i| (i.size(), i.quantity())).collect();
        assert_eq!(summary, vec![("L", 8), ("M", 13)]);

        assert_eq!(service.get(good.id_typed()).unwrap().unwrap().quantity(), 20);
    }

    #[test]
    fn list_applies_filter_search_and_order() {
        let service = RestockService::new(InMemoryInventoryStore::new());
        service.add_item(line("Sweater", "L", 2, 5)).unwrap();
        service.add_item(line("Shirt", "S", 0, 5)).unwrap();
        service.add_item(line("Shirt", "M", 9, 5)).unwrap();

        let all = service.list(&school(), StockFilter::All, "").unwrap();
        let order: Vec<(&str, &str)> = all.iter().map(|i| (i.item_type(), i.size())).collect();
        assert_eq!(order, vec![("Shirt", "M"), ("Shirt", "S"), ("Sweater", "L")]);

        let low = service.list(&school(), StockFilter::LowStock, "").unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].item_type(), "Sweater");

        let shirts_in_stock = service.list(&school(), StockFilter::InStock, "shirt").unwrap();
        assert_eq!(shirts_in_stock.len(), 1);
        assert_eq!(shirts_in_stock[0].size(), "M");
    }
}
