use vitrina_store::Store;

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::catalog::Product;

use super::cart::{Cart, CartLine};

/// Storage key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "cart_items";

/// A cart bound to a durable store.
///
/// Every mutation is written through to the store under
/// [`CART_STORAGE_KEY`], so a ledger re-opened against the same store
/// picks up where the previous one left off. A corrupt or unreadable
/// payload is treated as an empty cart rather than an error.
#[derive(Debug, Clone)]
pub struct CartLedger {
    store: Store,
    cart: Cart,
}

impl CartLedger {
    /// Opens the ledger, replaying any persisted lines.
    ///
    /// Replay goes through the regular cart operations, so persisted
    /// lines with non-positive quantities are dropped instead of being
    /// resurrected as-is.
    pub fn open(store: Store) -> Self {
        let mut cart = Cart::new();
        match store.get::<Vec<CartLine>>(CART_STORAGE_KEY) {
            Ok(Some(lines)) => {
                for line in lines {
                    let id = line.product.id.clone();
                    cart.add(line.product);
                    cart.set_quantity(&id, line.quantity);
                }
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(key = CART_STORAGE_KEY, %err, "discarding unreadable cart state");
            }
        }
        Self { store, cart }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn add(&mut self, product: Product) -> Result<(), CommerceError> {
        self.cart.add(product);
        self.persist()
    }

    pub fn remove(&mut self, product_id: &ProductId) -> Result<(), CommerceError> {
        self.cart.remove(product_id);
        self.persist()
    }

    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        self.cart.set_quantity(product_id, quantity);
        self.persist()
    }

    pub fn clear(&mut self) -> Result<(), CommerceError> {
        self.cart.clear();
        self.persist()
    }

    fn persist(&self) -> Result<(), CommerceError> {
        self.store.set(CART_STORAGE_KEY, &self.cart.lines())?;
        Ok(())
    }
}
