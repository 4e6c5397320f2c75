//! Cart page view model.

use bazaar_core::{CurrencyCode, ProductId};

use crate::cart::{CartItem, CartStore, product_path};

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    /// Link to the product page.
    pub href: String,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartLineView {
    fn new(item: &CartItem, currency: CurrencyCode) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            image: item.image.clone(),
            quantity: item.quantity(),
            price: item.price.display(currency),
            line_price: item.line_total().display(currency),
            href: product_path(item.id),
        }
    }
}

impl CartView {
    /// Snapshot `cart` for rendering.
    #[must_use]
    pub fn new(cart: &CartStore, currency: CurrencyCode) -> Self {
        Self {
            items: cart
                .cart_items()
                .iter()
                .map(|item| CartLineView::new(item, currency))
                .collect(),
            subtotal: cart.subtotal().display(currency),
            item_count: cart.cart_count(),
        }
    }

    /// Whether to render the empty-cart state.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    /// Page heading.
    #[must_use]
    pub fn heading(&self) -> String {
        if self.is_empty() {
            "Your Cart is Empty".to_string()
        } else {
            format!("Your Shopping Cart ({} items)", self.item_count)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::num::NonZeroU32;

    use bazaar_core::Price;

    use super::*;

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::new(&CartStore::new(), CurrencyCode::INR);
        assert!(view.is_empty());
        assert_eq!(view.heading(), "Your Cart is Empty");
        assert_eq!(view.subtotal, "₹0.00");
    }

    #[test]
    fn test_cart_view_formats_lines() {
        let mut cart = CartStore::new();
        cart.add_item(
            CartItem::new(ProductId::new(1), "Runner", "https://cdn.example.com/1.png", Price::from_units(1299))
                .with_quantity(NonZeroU32::new(2).unwrap()),
        );
        cart.add_item(CartItem::new(
            ProductId::new(2),
            "Cap",
            "https://cdn.example.com/2.png",
            Price::from_units(50),
        ));

        let view = CartView::new(&cart, CurrencyCode::INR);
        assert_eq!(view.heading(), "Your Shopping Cart (3 items)");
        assert_eq!(view.items[0].price, "₹1,299.00");
        assert_eq!(view.items[0].line_price, "₹2,598.00");
        assert_eq!(view.items[0].href, "/product/1");
        assert_eq!(view.subtotal, "₹2,648.00");
    }

    #[test]
    fn test_cart_view_renders_saturated_totals() {
        let price: Price = serde_json::from_str("\"10000000000000000000000\"").unwrap();
        let mut cart = CartStore::new();
        cart.add_item(CartItem::new(ProductId::new(9), "Vault", "", price));
        cart.update_quantity(ProductId::new(9), i64::from(u32::MAX));

        let view = CartView::new(&cart, CurrencyCode::USD);
        assert_eq!(view.item_count, u64::from(u32::MAX));
        assert_eq!(view.items[0].line_price, view.subtotal);
        assert!(view.subtotal.starts_with("$79,228,162,514,264,337,593,543,950,335"));
    }
}
