//! Favorites: a persisted set of products the user has starred.

use serde::{Deserialize, Serialize};
use vitrina_store::Store;

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;

/// Storage key the favorites set is persisted under.
pub const FAVORITES_STORAGE_KEY: &str = "favorites_items";

/// An ordered set of favorited products, keyed by product id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FavoriteSet {
    items: Vec<Product>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|p| &p.id == product_id)
    }

    /// Adds `product` unless it is already favorited.
    pub fn add(&mut self, product: Product) {
        if !self.contains(&product.id) {
            self.items.push(product);
        }
    }

    /// Removes the product. No-op when it is not favorited.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.items.retain(|p| &p.id != product_id);
    }

    /// Adds the product if absent, removes it if present. Returns
    /// whether the product is favorited afterwards.
    pub fn toggle(&mut self, product: Product) -> bool {
        if self.contains(&product.id) {
            self.remove(&product.id);
            false
        } else {
            self.add(product);
            true
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Refreshes stored products from `fresh` catalog data, matching
    /// by id. Favorites whose id does not appear in `fresh` are kept
    /// as-is. Returns whether anything actually changed.
    pub fn sync(&mut self, fresh: &[Product]) -> bool {
        let mut changed = false;
        for item in &mut self.items {
            if let Some(update) = fresh.iter().find(|p| p.id == item.id) {
                if item != update {
                    *item = update.clone();
                    changed = true;
                }
            }
        }
        changed
    }
}

/// A favorite set bound to a durable store, written through on every
/// mutation. Follows the same open/replay pattern as the cart ledger:
/// an unreadable payload is logged and treated as empty.
#[derive(Debug, Clone)]
pub struct FavoritesLedger {
    store: Store,
    favorites: FavoriteSet,
}

impl FavoritesLedger {
    pub fn open(store: Store) -> Self {
        let mut favorites = FavoriteSet::new();
        match store.get::<Vec<Product>>(FAVORITES_STORAGE_KEY) {
            Ok(Some(items)) => {
                for item in items {
                    favorites.add(item);
                }
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(
                    key = FAVORITES_STORAGE_KEY,
                    %err,
                    "discarding unreadable favorites state"
                );
            }
        }
        Self { store, favorites }
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    pub fn add(&mut self, product: Product) -> Result<(), CommerceError> {
        self.favorites.add(product);
        self.persist()
    }

    pub fn remove(&mut self, product_id: &ProductId) -> Result<(), CommerceError> {
        self.favorites.remove(product_id);
        self.persist()
    }

    pub fn toggle(&mut self, product: Product) -> Result<bool, CommerceError> {
        let now_favorited = self.favorites.toggle(product);
        self.persist()?;
        Ok(now_favorited)
    }

    pub fn clear(&mut self) -> Result<(), CommerceError> {
        self.favorites.clear();
        self.persist()
    }

    /// Refreshes favorites from catalog data and persists only when
    /// the refresh changed something.
    pub fn sync(&mut self, fresh: &[Product]) -> Result<bool, CommerceError> {
        let changed = self.favorites.sync(fresh);
        if changed {
            self.persist()?;
        }
        Ok(changed)
    }

    fn persist(&self) -> Result<(), CommerceError> {
        self.store.set(FAVORITES_STORAGE_KEY, &self.favorites.items())?;
        Ok(())
    }
}
