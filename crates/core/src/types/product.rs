//! Catalog products, cart items and stock levels.
//!
//! Field names match the storefront REST API and the persisted cart layout:
//! a cart item serializes as the product's fields plus `amount`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::{CurrencyCode, Price};

/// A catalog product as returned by `GET /products/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Unit price in the store currency. Accepted as a JSON number or string.
    pub price: Decimal,
    /// Product image URL.
    pub image: String,
}

impl Product {
    /// Unit price tagged with the given currency.
    #[must_use]
    pub const fn price_in(&self, currency_code: CurrencyCode) -> Price {
        Price::new(self.price, currency_code)
    }
}

/// A product held in the cart together with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    /// Quantity held, always at least 1.
    pub amount: u32,
}

impl CartItem {
    /// Create a cart item.
    #[must_use]
    pub const fn new(product: Product, amount: u32) -> Self {
        Self { product, amount }
    }

    /// The product identifier.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }
}

/// Available quantity for a product as returned by `GET /stock/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockInfo {
    pub id: ProductId,
    pub amount: u32,
}

impl StockInfo {
    /// Whether holding `requested` units stays within stock.
    #[must_use]
    pub const fn allows(&self, requested: u32) -> bool {
        requested <= self.amount
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sneaker() -> Product {
        Product {
            id: ProductId::new(1),
            title: "Tênis de Caminhada Leve Confortável".to_string(),
            price: Decimal::new(1799, 1),
            image: "https://cdn.example.com/modulo-redux/tenis1.jpg".to_string(),
        }
    }

    #[test]
    fn test_product_accepts_numeric_price() {
        let json = r#"{"id":1,"title":"Tênis","price":179.9,"image":"a.jpg"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, Decimal::new(1799, 1));
    }

    #[test]
    fn test_cart_item_serializes_flat() {
        let item = CartItem::new(sneaker(), 2);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["amount"], 2);
        assert!(value.get("product").is_none());
    }

    #[test]
    fn test_cart_item_round_trip() {
        let items = vec![CartItem::new(sneaker(), 3)];
        let json = serde_json::to_string(&items).unwrap();
        let parsed: Vec<CartItem> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, items);
    }

    #[test]
    fn test_stock_allows() {
        let stock = StockInfo {
            id: ProductId::new(1),
            amount: 2,
        };
        assert!(stock.allows(2));
        assert!(!stock.allows(3));
    }
}
