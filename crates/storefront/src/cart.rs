//! Shopping cart aggregate.
//!
//! [`CartStore`] is the single source of truth for cart contents. It is
//! constructed once at application start and handed by reference to every
//! surface that reads or mutates the cart. All mutations are synchronous and
//! total: unknown ids are ignored rather than reported.
//!
//! Counts and totals are computed from the line sequence on every call and
//! never stored alongside it.
//!
//! # Zero-quantity policy
//!
//! Driving a line's quantity to zero or below removes the line. Decrementing
//! a line that holds a single unit therefore removes it from the cart.

use std::num::NonZeroU32;

use bazaar_core::{Price, ProductId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::add_breadcrumb;

/// A single cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier, unique within the cart.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Product image URL.
    pub image: String,
    /// Unit price.
    pub price: Price,
    quantity: NonZeroU32,
}

impl CartItem {
    /// Create a line holding a single unit.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, image: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            image: image.into(),
            price,
            quantity: NonZeroU32::MIN,
        }
    }

    /// Set the number of units on this line.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: NonZeroU32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Number of units on this line. Always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity())
    }
}

/// Where a navigation intent originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    /// "Proceed to checkout" on the cart page.
    CartCheckout,
}

impl Provenance {
    /// Tag carried in the navigation state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CartCheckout => "cart-checkout",
        }
    }
}

/// Route path of a product detail page, e.g. `/product/42`.
#[must_use]
pub fn product_path(id: ProductId) -> String {
    format!("/product/{id}")
}

/// Request to navigate to a product detail page.
///
/// Consumed by the routing layer; the cart only produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationIntent {
    pub product_id: ProductId,
    pub source: Provenance,
}

impl NavigationIntent {
    /// Route path of the target product page.
    #[must_use]
    pub fn path(&self) -> String {
        product_path(self.product_id)
    }
}

/// The cart aggregate: an insertion-ordered sequence of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartStore {
    items: Vec<CartItem>,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn cart_items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn cart_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity())).sum()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Add a line, or top up the existing line for the same product.
    ///
    /// A top-up keeps the existing line's position, name, image and price.
    pub fn add_item(&mut self, item: CartItem) {
        let id = item.id;
        if let Some(existing) = self.items.iter_mut().find(|line| line.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(item.quantity.get());
            debug!(product_id = %item.id, quantity = existing.quantity(), "Cart line topped up");
        } else {
            debug!(product_id = %item.id, quantity = item.quantity(), "Cart line added");
            self.items.push(item);
        }
        add_breadcrumb("cart", "Item added", Some(&[("product_id", id.to_string().as_str())]));
    }

    /// Set the quantity of a line. Zero or negative removes the line.
    ///
    /// Unknown ids are ignored.
    pub fn update_quantity(&mut self, id: ProductId, new_quantity: i64) {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            debug!(product_id = %id, "Quantity update for product not in cart ignored");
            return;
        };

        let clamped = u32::try_from(new_quantity.max(0)).unwrap_or(u32::MAX);
        match NonZeroU32::new(clamped) {
            Some(quantity) => {
                if let Some(item) = self.items.get_mut(index) {
                    item.quantity = quantity;
                }
                debug!(product_id = %id, quantity = clamped, "Cart quantity updated");
            }
            None => {
                self.items.remove(index);
                debug!(product_id = %id, "Cart line removed at zero quantity");
            }
        }
        add_breadcrumb(
            "cart",
            "Quantity updated",
            Some(&[("product_id", id.to_string().as_str()), ("quantity", clamped.to_string().as_str())]),
        );
    }

    /// Add one unit to a line.
    pub fn increment(&mut self, id: ProductId) {
        if let Some(current) = self.get(id).map(CartItem::quantity) {
            self.update_quantity(id, i64::from(current) + 1);
        }
    }

    /// Take one unit off a line, removing it when it reaches zero.
    pub fn decrement(&mut self, id: ProductId) {
        if let Some(current) = self.get(id).map(CartItem::quantity) {
            self.update_quantity(id, i64::from(current) - 1);
        }
    }

    /// Remove a line. Removing an absent id is a no-op.
    pub fn remove_item(&mut self, id: ProductId) {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() != before {
            debug!(product_id = %id, "Cart line removed");
            add_breadcrumb("cart", "Item removed", Some(&[("product_id", id.to_string().as_str())]));
        }
    }

    /// Hand off to checkout.
    ///
    /// Targets the first line in insertion order. Returns `None` for an empty
    /// cart.
    #[must_use]
    pub fn proceed_to_checkout(&self) -> Option<NavigationIntent> {
        let first = self.items.first()?;
        debug!(product_id = %first.id, "Proceeding to checkout");
        add_breadcrumb(
            "cart",
            "Proceeded to checkout",
            Some(&[("product_id", first.id.to_string().as_str())]),
        );
        Some(NavigationIntent {
            product_id: first.id,
            source: Provenance::CartCheckout,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(id: i64, price: u32, quantity: u32) -> CartItem {
        CartItem::new(
            ProductId::new(id),
            format!("Product {id}"),
            format!("https://cdn.example.com/{id}.png"),
            Price::from_units(price),
        )
        .with_quantity(NonZeroU32::new(quantity).unwrap())
    }

    fn cart_with(items: impl IntoIterator<Item = CartItem>) -> CartStore {
        let mut cart = CartStore::new();
        for line in items {
            cart.add_item(line);
        }
        cart
    }

    #[test]
    fn test_update_then_remove_scenario() {
        let mut cart = cart_with([item(1, 100, 2), item(2, 50, 1)]);

        cart.update_quantity(ProductId::new(1), 3);
        cart.remove_item(ProductId::new(2));

        assert_eq!(cart.cart_items(), &[item(1, 100, 3)]);
        assert_eq!(cart.cart_count(), 3);
        assert_eq!(cart.subtotal(), Price::from_units(300));
    }

    #[test]
    fn test_zero_quantity_removes_line() {
        let mut cart = cart_with([item(1, 10, 2), item(2, 20, 1)]);

        cart.update_quantity(ProductId::new(1), 0);
        assert!(cart.get(ProductId::new(1)).is_none());

        cart.update_quantity(ProductId::new(2), -5);
        assert!(cart.is_empty());
        assert_eq!(cart.cart_count(), 0);
    }

    #[test]
    fn test_decrement_from_one_removes() {
        let mut cart = cart_with([item(1, 10, 1)]);
        cart.decrement(ProductId::new(1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut cart = cart_with([item(1, 10, 1)]);
        cart.increment(ProductId::new(1));
        cart.increment(ProductId::new(1));
        cart.decrement(ProductId::new(1));
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity(), 2);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut cart = cart_with([item(1, 10, 2)]);
        let before = cart.clone();

        cart.update_quantity(ProductId::new(99), 5);
        cart.remove_item(ProductId::new(99));
        cart.increment(ProductId::new(99));
        cart.decrement(ProductId::new(99));

        assert_eq!(cart, before);
    }

    #[test]
    fn test_add_existing_tops_up_in_place() {
        let mut cart = cart_with([item(1, 10, 1), item(2, 20, 1)]);
        cart.add_item(item(1, 999, 2));

        let ids: Vec<i64> = cart.cart_items().iter().map(|i| i.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 2]);
        let first = cart.get(ProductId::new(1)).unwrap();
        assert_eq!(first.quantity(), 3);
        assert_eq!(first.price, Price::from_units(10));
    }

    #[test]
    fn test_line_total() {
        assert_eq!(item(1, 250, 4).line_total(), Price::from_units(1000));
    }

    #[test]
    fn test_checkout_targets_first_line() {
        let cart = cart_with([item(7, 10, 1), item(3, 20, 5)]);
        let intent = cart.proceed_to_checkout().unwrap();
        assert_eq!(intent.product_id, ProductId::new(7));
        assert_eq!(intent.source, Provenance::CartCheckout);
        assert_eq!(intent.path(), "/product/7");
    }

    #[test]
    fn test_huge_totals_saturate_instead_of_panicking() {
        let price: Price = serde_json::from_str("\"10000000000000000000000\"").unwrap();
        let mut cart = cart_with([CartItem::new(ProductId::new(1), "Vault", "", price)]);
        cart.add_item(item(2, 10, 1));

        cart.update_quantity(ProductId::new(1), 100_000_000);

        let line = cart.get(ProductId::new(1)).unwrap();
        assert_eq!(line.quantity(), 100_000_000);
        assert!(line.line_total() > price);
        assert_eq!(cart.subtotal(), line.line_total());
        assert_eq!(cart.cart_count(), 100_000_001);
    }

    #[test]
    fn test_product_path() {
        assert_eq!(product_path(ProductId::new(42)), "/product/42");
    }

    #[test]
    fn test_checkout_empty_cart_is_noop() {
        assert!(CartStore::new().proceed_to_checkout().is_none());
    }

    #[test]
    fn test_provenance_serializes_as_tag() {
        let json = serde_json::to_string(&Provenance::CartCheckout).unwrap();
        assert_eq!(json, "\"cart-checkout\"");
        assert_eq!(Provenance::CartCheckout.as_str(), "cart-checkout");
    }

    #[derive(Debug, Clone)]
    enum Op {
        Update(i64, i64),
        Remove(i64),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..6_i64, -3..10_i64).prop_map(|(id, q)| Op::Update(id, q)),
            (0..6_i64).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn prop_count_matches_quantities(ops in prop::collection::vec(op(), 0..40)) {
            let mut cart = cart_with((0..5).map(|id| item(id, 10, 1)));
            for op in ops {
                match op {
                    Op::Update(id, q) => cart.update_quantity(ProductId::new(id), q),
                    Op::Remove(id) => cart.remove_item(ProductId::new(id)),
                }
                let sum: u64 = cart.cart_items().iter().map(|i| u64::from(i.quantity())).sum();
                prop_assert_eq!(cart.cart_count(), sum);
                prop_assert!(cart.cart_items().iter().all(|i| i.quantity() >= 1));
                prop_assert_eq!(cart.cart_count() == 0, cart.is_empty());
            }
        }

        #[test]
        fn prop_remove_is_idempotent(id in 0..6_i64) {
            let mut once = cart_with((0..5).map(|i| item(i, 10, 2)));
            let mut twice = once.clone();
            once.remove_item(ProductId::new(id));
            twice.remove_item(ProductId::new(id));
            twice.remove_item(ProductId::new(id));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_non_positive_quantity_removes(id in 0..5_i64, q in -100..=0_i64) {
            let mut cart = cart_with((0..5).map(|i| item(i, 10, 3)));
            cart.update_quantity(ProductId::new(id), q);
            prop_assert!(cart.get(ProductId::new(id)).is_none());
        }
    }
}
