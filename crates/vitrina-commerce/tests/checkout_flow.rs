//! End-to-end cart checkout flows: persisted cart, discount codes,
//! pricing, and order placement.

use vitrina_commerce::prelude::*;
use vitrina_store::Store;

fn product(name: &str, price_minor: i64) -> Product {
    Product::new(name, Money::rub(price_minor))
}

#[test]
fn small_order_pays_flat_shipping() {
    let mut ledger = CartLedger::open(Store::in_memory());
    let a = product("Webcam", 1000);
    let a_id = a.id.clone();
    ledger.add(a).unwrap();
    ledger.set_quantity(&a_id, 2).unwrap();
    ledger.add(product("Cable", 500)).unwrap();

    let summary = CartSummary::compute(ledger.cart(), None).unwrap();
    assert_eq!(summary.subtotal, Money::rub(2500));
    assert_eq!(summary.shipping, Money::rub(300));
    assert_eq!(summary.total, Money::rub(2800));
    assert_eq!(summary.item_count, 3);
}

#[test]
fn welcome_code_takes_ten_percent_off() {
    let mut ledger = CartLedger::open(Store::in_memory());
    let a = product("Webcam", 1000);
    let a_id = a.id.clone();
    ledger.add(a).unwrap();
    ledger.set_quantity(&a_id, 2).unwrap();
    ledger.add(product("Cable", 500)).unwrap();

    let book = DiscountBook::with_default_codes();
    let subtotal = ledger.cart().subtotal().unwrap();
    let discount = book.validate("WELCOME10", subtotal);
    assert!(discount.is_some());

    let summary = CartSummary::compute(ledger.cart(), discount).unwrap();
    assert_eq!(summary.discount, Money::rub(250));
    assert_eq!(summary.shipping, Money::rub(300));
    assert_eq!(summary.total, Money::rub(2550));
    assert_eq!(summary.discount_code.as_deref(), Some("WELCOME10"));
}

#[test]
fn large_order_ships_free_and_keeps_discount() {
    let mut ledger = CartLedger::open(Store::in_memory());
    ledger.add(product("Monitor", 6000)).unwrap();

    let book = DiscountBook::with_default_codes();
    let subtotal = ledger.cart().subtotal().unwrap();
    let discount = book.validate("WELCOME10", subtotal);

    let summary = CartSummary::compute(ledger.cart(), discount).unwrap();
    assert_eq!(summary.discount, Money::rub(600));
    assert_eq!(summary.shipping, Money::rub(0));
    assert_eq!(summary.total, Money::rub(5400));
}

#[test]
fn cart_survives_reopen_and_places_an_order() {
    let store = Store::in_memory();
    {
        let mut ledger = CartLedger::open(store.clone());
        ledger.add(product("Laptop", 89_990)).unwrap();
    }

    // Same store, fresh ledger: the line is still there.
    let ledger = CartLedger::open(store);
    assert_eq!(ledger.cart().total_items(), 1);

    let summary = CartSummary::compute(ledger.cart(), None).unwrap();
    let form = CheckoutForm::new(
        "anna@example.com",
        "+7 900 123-45-67",
        "Moscow, Tverskaya 1",
        PaymentMethod::Card,
    );
    let order = Order::from_cart(ledger.cart(), &summary, &form, None).unwrap();
    assert_eq!(order.total, Money::rub(89_990));
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.lines.len(), 1);
}

#[test]
fn rejected_code_leaves_totals_unchanged() {
    let mut ledger = CartLedger::open(Store::in_memory());
    ledger.add(product("Cable", 500)).unwrap();

    let book = DiscountBook::with_default_codes();
    let subtotal = ledger.cart().subtotal().unwrap();
    // WELCOME10 needs a 1000 minimum.
    assert!(book.validate("WELCOME10", subtotal).is_none());

    let summary = CartSummary::compute(ledger.cart(), None).unwrap();
    assert_eq!(summary.discount, Money::rub(0));
    assert_eq!(summary.total, Money::rub(800));
}
