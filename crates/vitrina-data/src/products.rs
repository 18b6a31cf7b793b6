//! Product catalog repository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use vitrina_commerce::catalog::Product;
use vitrina_commerce::ProductId;

use crate::error::DataError;

/// Catalog reads for everyone, writes for the admin surface.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, newest first.
    async fn list(&self) -> Result<Vec<Product>, DataError>;

    async fn get(&self, id: &ProductId) -> Result<Product, DataError>;

    async fn insert(&self, product: Product) -> Result<(), DataError>;

    /// Replaces the stored product with the same id.
    async fn update(&self, product: Product) -> Result<(), DataError>;

    async fn delete(&self, id: &ProductId) -> Result<(), DataError>;
}

/// In-memory catalog.
#[derive(Default)]
pub struct MemoryProductRepository {
    products: RwLock<HashMap<ProductId, Product>>,
}

impl MemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository pre-loaded with `products`.
    pub async fn seeded(products: Vec<Product>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.products.write().await;
            for product in products {
                map.insert(product.id.clone(), product);
            }
        }
        repo
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn list(&self) -> Result<Vec<Product>, DataError> {
        let products = self.products.read().await;
        let mut all: Vec<Product> = products.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.name.cmp(&b.name)));
        Ok(all)
    }

    async fn get(&self, id: &ProductId) -> Result<Product, DataError> {
        let products = self.products.read().await;
        products.get(id).cloned().ok_or(DataError::NotFound)
    }

    async fn insert(&self, product: Product) -> Result<(), DataError> {
        let mut products = self.products.write().await;
        if products.contains_key(&product.id) {
            return Err(DataError::UniqueViolation);
        }
        products.insert(product.id.clone(), product);
        Ok(())
    }

    async fn update(&self, product: Product) -> Result<(), DataError> {
        let mut products = self.products.write().await;
        if !products.contains_key(&product.id) {
            return Err(DataError::NotFound);
        }
        products.insert(product.id.clone(), product);
        Ok(())
    }

    async fn delete(&self, id: &ProductId) -> Result<(), DataError> {
        let mut products = self.products.write().await;
        products.remove(id).map(|_| ()).ok_or(DataError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrina_commerce::Money;

    fn product(name: &str, price_minor: i64) -> Product {
        Product::new(name, Money::rub(price_minor))
    }

    #[tokio::test]
    async fn test_insert_get_roundtrip() {
        let repo = MemoryProductRepository::new();
        let p = product("Keyboard", 4990);
        let id = p.id.clone();
        repo.insert(p).await.unwrap();
        assert_eq!(repo.get(&id).await.unwrap().name, "Keyboard");
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = MemoryProductRepository::new();
        assert_eq!(
            repo.get(&ProductId::from("missing")).await,
            Err(DataError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_insert_duplicate_id_is_rejected() {
        let repo = MemoryProductRepository::new();
        let p = product("Keyboard", 4990);
        repo.insert(p.clone()).await.unwrap();
        assert_eq!(repo.insert(p).await, Err(DataError::UniqueViolation));
    }

    #[tokio::test]
    async fn test_update_replaces_stored_product() {
        let repo = MemoryProductRepository::new();
        let mut p = product("Keyboard", 4990);
        repo.insert(p.clone()).await.unwrap();
        p.price = Money::rub(3990);
        repo.update(p.clone()).await.unwrap();
        assert_eq!(repo.get(&p.id).await.unwrap().price, Money::rub(3990));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = MemoryProductRepository::new();
        assert_eq!(
            repo.update(product("Ghost", 1)).await,
            Err(DataError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let repo = MemoryProductRepository::new();
        let p = product("Keyboard", 4990);
        let id = p.id.clone();
        repo.insert(p).await.unwrap();
        repo.delete(&id).await.unwrap();
        assert_eq!(repo.get(&id).await, Err(DataError::NotFound));
    }
}
