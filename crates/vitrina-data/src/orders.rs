//! Order repository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use vitrina_commerce::checkout::{Order, OrderStatus};
use vitrina_commerce::{OrderId, UserId};

use crate::error::DataError;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Stores a placed order and returns its id.
    async fn insert(&self, order: Order) -> Result<OrderId, DataError>;

    /// Orders belonging to `user_id`, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, DataError>;

    async fn get(&self, id: &OrderId) -> Result<Order, DataError>;

    async fn set_status(&self, id: &OrderId, status: OrderStatus) -> Result<(), DataError>;
}

#[derive(Default)]
pub struct MemoryOrderRepository {
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl MemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for MemoryOrderRepository {
    async fn insert(&self, order: Order) -> Result<OrderId, DataError> {
        let id = order.id.clone();
        let mut orders = self.orders.write().await;
        if orders.contains_key(&id) {
            return Err(DataError::UniqueViolation);
        }
        tracing::info!(order_id = %id, total = order.total.amount_minor, "order placed");
        orders.insert(id.clone(), order);
        Ok(id)
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, DataError> {
        let orders = self.orders.read().await;
        let mut own: Vec<Order> = orders
            .values()
            .filter(|o| o.user_id.as_ref() == Some(user_id))
            .cloned()
            .collect();
        own.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(own)
    }

    async fn get(&self, id: &OrderId) -> Result<Order, DataError> {
        let orders = self.orders.read().await;
        orders.get(id).cloned().ok_or(DataError::NotFound)
    }

    async fn set_status(&self, id: &OrderId, status: OrderStatus) -> Result<(), DataError> {
        let mut orders = self.orders.write().await;
        let order = orders.get_mut(id).ok_or(DataError::NotFound)?;
        order
            .set_status(status)
            .map_err(|err| DataError::InvalidTransition(err.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrina_commerce::cart::{Cart, CartSummary};
    use vitrina_commerce::catalog::Product;
    use vitrina_commerce::checkout::{CheckoutForm, PaymentMethod};
    use vitrina_commerce::Money;

    fn order_for(user: Option<UserId>) -> Order {
        let mut cart = Cart::new();
        cart.add(Product::new("Laptop", Money::rub(89_990)));
        let summary = CartSummary::compute(&cart, None).unwrap();
        let form = CheckoutForm::new(
            "user@example.com",
            "+7 900 123-45-67",
            "Moscow, Tverskaya 1",
            PaymentMethod::Card,
        );
        Order::from_cart(&cart, &summary, &form, user).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = MemoryOrderRepository::new();
        let order = order_for(None);
        let id = repo.insert(order).await.unwrap();
        assert_eq!(repo.get(&id).await.unwrap().id, id);
    }

    #[tokio::test]
    async fn test_list_for_user_filters_by_owner() {
        let repo = MemoryOrderRepository::new();
        let anna = UserId::from("anna");
        repo.insert(order_for(Some(anna.clone()))).await.unwrap();
        repo.insert(order_for(Some(UserId::from("boris"))))
            .await
            .unwrap();
        repo.insert(order_for(None)).await.unwrap();

        let own = repo.list_for_user(&anna).await.unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].user_id, Some(anna));
    }

    #[tokio::test]
    async fn test_set_status_persists() {
        let repo = MemoryOrderRepository::new();
        let id = repo.insert(order_for(None)).await.unwrap();
        repo.set_status(&id, OrderStatus::Confirmed).await.unwrap();
        assert_eq!(repo.get(&id).await.unwrap().status, OrderStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_set_status_out_of_terminal_state_is_invalid_transition() {
        let repo = MemoryOrderRepository::new();
        let id = repo.insert(order_for(None)).await.unwrap();
        repo.set_status(&id, OrderStatus::Delivered).await.unwrap();

        let result = repo.set_status(&id, OrderStatus::Cancelled).await;
        assert!(matches!(result, Err(DataError::InvalidTransition(_))));
        assert_eq!(
            result.unwrap_err().user_message(),
            "This change is no longer possible"
        );
        assert_eq!(repo.get(&id).await.unwrap().status, OrderStatus::Delivered);
    }

    #[tokio::test]
    async fn test_set_status_on_missing_order_is_not_found() {
        let repo = MemoryOrderRepository::new();
        assert_eq!(
            repo.set_status(&OrderId::from("missing"), OrderStatus::Confirmed)
                .await,
            Err(DataError::NotFound)
        );
    }
}
