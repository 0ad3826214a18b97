//! Display data derived from a cart snapshot.

use rocketshoes_core::{CartItem, CurrencyCode, Price};

/// One cart line ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub id: i32,
    pub title: String,
    pub image: String,
    pub amount: u32,
    pub price: Price,
    pub subtotal: Price,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: Price,
    /// Number of distinct products (the header badge count).
    pub cart_size: usize,
    /// Sum of all amounts.
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub const fn empty(currency_code: CurrencyCode) -> Self {
        Self {
            lines: Vec::new(),
            total: Price::zero(currency_code),
            cart_size: 0,
            item_count: 0,
        }
    }

    /// Build the view for a snapshot, pricing everything in `currency_code`.
    ///
    /// Returns `None` if a subtotal or the total overflows.
    #[must_use]
    pub fn from_items(items: &[CartItem], currency_code: CurrencyCode) -> Option<Self> {
        let mut view = Self::empty(currency_code);

        for item in items {
            let price = item.product.price_in(currency_code);
            let subtotal = price.checked_mul(item.amount)?;
            view.total = view.total.checked_add(&subtotal)?;
            view.item_count += u64::from(item.amount);
            view.lines.push(CartLineView {
                id: item.id().as_i32(),
                title: item.product.title.clone(),
                image: item.product.image.clone(),
                amount: item.amount,
                price,
                subtotal,
            });
        }

        view.cart_size = view.lines.len();
        Some(view)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rocketshoes_core::{Product, ProductId};
    use rust_decimal::Decimal;

    use super::*;

    fn item(id: i32, cents: i64, amount: u32) -> CartItem {
        CartItem::new(
            Product {
                id: ProductId::new(id),
                title: format!("Tênis {id}"),
                price: Decimal::new(cents, 2),
                image: format!("tenis{id}.jpg"),
            },
            amount,
        )
    }

    #[test]
    fn test_empty_view() {
        let view = CartView::from_items(&[], CurrencyCode::BRL).unwrap();
        assert_eq!(view, CartView::empty(CurrencyCode::BRL));
        assert_eq!(view.total.display(), "R$ 0.00");
    }

    #[test]
    fn test_totals() {
        let items = vec![item(1, 17990, 2), item(2, 13990, 1)];
        let view = CartView::from_items(&items, CurrencyCode::BRL).unwrap();

        assert_eq!(view.cart_size, 2);
        assert_eq!(view.item_count, 3);
        assert_eq!(view.lines[0].subtotal.display(), "R$ 359.80");
        assert_eq!(view.lines[1].subtotal.display(), "R$ 139.90");
        assert_eq!(view.total.display(), "R$ 499.70");
    }
}
