//! Pure cart transitions.
//!
//! Each function takes the current snapshot plus already-fetched stock and
//! returns the next snapshot (or the reason there is none). Nothing here
//! performs I/O; [`CartStore`](super::CartStore) wraps these with lookups and
//! persistence.

use rocketshoes_core::{CartItem, Product, ProductId, StockInfo};

use crate::error::{CartError, OperationError};

/// What adding one unit of a product will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddPlan {
    /// Product already in the cart; its amount becomes `amount`.
    Increment { amount: u32 },
    /// Product not in the cart; fetch its details and append with amount 1.
    Append,
}

/// Amount currently held for `product_id` (0 when absent).
#[must_use]
pub fn held_amount(cart: &[CartItem], product_id: ProductId) -> u32 {
    cart.iter()
        .find(|item| item.id() == product_id)
        .map_or(0, |item| item.amount)
}

/// Decide how to add one unit of `product_id`.
///
/// # Errors
///
/// Returns `CartError::InsufficientStock` when holding one more unit would
/// exceed `stock`.
pub fn plan_add(
    cart: &[CartItem],
    product_id: ProductId,
    stock: &StockInfo,
) -> Result<AddPlan, CartError> {
    let held = held_amount(cart, product_id);

    let Some(amount) = held.checked_add(1).filter(|&next| stock.allows(next)) else {
        return Err(CartError::InsufficientStock {
            product_id,
            requested: i64::from(held) + 1,
            available: stock.amount,
        });
    };

    if cart.iter().any(|item| item.id() == product_id) {
        Ok(AddPlan::Increment { amount })
    } else {
        Ok(AddPlan::Append)
    }
}

/// Snapshot with every entry for `product_id` set to `amount`.
#[must_use]
pub fn apply_increment(cart: &[CartItem], product_id: ProductId, amount: u32) -> Vec<CartItem> {
    cart.iter()
        .map(|item| {
            if item.id() == product_id {
                CartItem::new(item.product.clone(), amount)
            } else {
                item.clone()
            }
        })
        .collect()
}

/// Snapshot with `product` appended at amount 1.
///
/// # Errors
///
/// Returns `CartError::AddFailed` when the catalog answered with a product
/// other than `product_id`.
pub fn apply_append(
    cart: &[CartItem],
    product_id: ProductId,
    product: Product,
) -> Result<Vec<CartItem>, CartError> {
    if product.id != product_id {
        return Err(CartError::AddFailed {
            product_id,
            source: OperationError::ProductMismatch {
                requested: product_id,
                received: product.id,
            },
        });
    }

    let mut next = Vec::with_capacity(cart.len() + 1);
    next.extend_from_slice(cart);
    next.push(CartItem::new(product, 1));
    Ok(next)
}

/// Snapshot without any entry for `product_id`.
///
/// # Errors
///
/// Returns `CartError::RemoveFailed` when the product is not in the cart.
pub fn remove(cart: &[CartItem], product_id: ProductId) -> Result<Vec<CartItem>, CartError> {
    if !cart.iter().any(|item| item.id() == product_id) {
        return Err(CartError::RemoveFailed {
            product_id,
            source: OperationError::NotInCart(product_id),
        });
    }

    Ok(cart
        .iter()
        .filter(|item| item.id() != product_id)
        .cloned()
        .collect())
}

/// Outcome of an amount change that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountChange {
    /// The new snapshot to persist.
    Set(Vec<CartItem>),
    /// Non-positive amount: leave the cart alone and report nothing.
    Ignored,
}

/// Set the amount held for `product_id` to `amount`.
///
/// Checks run in this order: stock limit, non-positive amount, presence.
///
/// # Errors
///
/// - `CartError::InsufficientStock` when `amount` exceeds `stock`
/// - `CartError::UpdateFailed` when the product is not in the cart
pub fn set_amount(
    cart: &[CartItem],
    product_id: ProductId,
    amount: i64,
    stock: &StockInfo,
) -> Result<AmountChange, CartError> {
    let insufficient = || CartError::InsufficientStock {
        product_id,
        requested: amount,
        available: stock.amount,
    };

    let exceeds =
        u32::try_from(amount).map_or(amount > 0, |requested| !stock.allows(requested));
    if exceeds {
        return Err(insufficient());
    }

    if amount <= 0 {
        return Ok(AmountChange::Ignored);
    }

    if !cart.iter().any(|item| item.id() == product_id) {
        return Err(CartError::UpdateFailed {
            product_id,
            source: OperationError::NotInCart(product_id),
        });
    }

    let amount = u32::try_from(amount).map_err(|_| insufficient())?;
    Ok(AmountChange::Set(apply_increment(cart, product_id, amount)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: i32) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Tênis {id}"),
            price: Decimal::new(13990, 2),
            image: format!("https://cdn.example.com/tenis{id}.jpg"),
        }
    }

    fn item(id: i32, amount: u32) -> CartItem {
        CartItem::new(product(id), amount)
    }

    fn stock(id: i32, amount: u32) -> StockInfo {
        StockInfo {
            id: ProductId::new(id),
            amount,
        }
    }

    fn amounts(cart: &[CartItem]) -> Vec<(i32, u32)> {
        cart.iter().map(|i| (i.id().as_i32(), i.amount)).collect()
    }

    #[test]
    fn test_plan_add_absent_product_appends() {
        let plan = plan_add(&[], ProductId::new(1), &stock(1, 5)).unwrap();
        assert_eq!(plan, AddPlan::Append);

        let next = apply_append(&[], ProductId::new(1), product(1)).unwrap();
        assert_eq!(amounts(&next), vec![(1, 1)]);
    }

    #[test]
    fn test_plan_add_present_product_increments() {
        let cart = vec![item(1, 2), item(2, 1)];
        let plan = plan_add(&cart, ProductId::new(1), &stock(1, 5)).unwrap();
        assert_eq!(plan, AddPlan::Increment { amount: 3 });

        let next = apply_increment(&cart, ProductId::new(1), 3);
        assert_eq!(amounts(&next), vec![(1, 3), (2, 1)]);
    }

    #[test]
    fn test_plan_add_at_stock_limit_fails() {
        let cart = vec![item(1, 1)];
        let err = plan_add(&cart, ProductId::new(1), &stock(1, 1)).unwrap_err();
        assert!(matches!(
            err,
            CartError::InsufficientStock {
                requested: 2,
                available: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_plan_add_with_zero_stock_fails() {
        let err = plan_add(&[], ProductId::new(1), &stock(1, 0)).unwrap_err();
        assert!(err.is_insufficient_stock());
    }

    #[test]
    fn test_plan_add_never_exceeds_stock() {
        let mut cart = Vec::new();
        let limit = stock(1, 4);
        for _ in 0..10 {
            match plan_add(&cart, ProductId::new(1), &limit) {
                Ok(AddPlan::Append) => {
                    cart = apply_append(&cart, ProductId::new(1), product(1)).unwrap();
                }
                Ok(AddPlan::Increment { amount }) => {
                    cart = apply_increment(&cart, ProductId::new(1), amount);
                }
                Err(err) => assert!(err.is_insufficient_stock()),
            }
        }
        assert_eq!(amounts(&cart), vec![(1, 4)]);
    }

    #[test]
    fn test_append_preserves_order() {
        let cart = vec![item(3, 1), item(1, 2)];
        let next = apply_append(&cart, ProductId::new(2), product(2)).unwrap();
        assert_eq!(amounts(&next), vec![(3, 1), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_append_rejects_mismatched_product() {
        let cart = vec![item(2, 1)];
        let err = apply_append(&cart, ProductId::new(1), product(2)).unwrap_err();
        assert!(matches!(
            err,
            CartError::AddFailed {
                source: OperationError::ProductMismatch { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_set_amount_beyond_u32_is_insufficient() {
        let cart = vec![item(1, 2)];
        let err =
            set_amount(&cart, ProductId::new(1), i64::MAX, &stock(1, u32::MAX)).unwrap_err();
        assert!(err.is_insufficient_stock());
    }

    #[test]
    fn test_remove_present_product() {
        let cart = vec![item(1, 1), item(2, 3)];
        let next = remove(&cart, ProductId::new(1)).unwrap();
        assert_eq!(amounts(&next), vec![(2, 3)]);
    }

    #[test]
    fn test_remove_absent_product_fails() {
        let cart = vec![item(1, 2)];
        let err = remove(&cart, ProductId::new(2)).unwrap_err();
        assert!(matches!(
            err,
            CartError::RemoveFailed {
                source: OperationError::NotInCart(_),
                ..
            }
        ));
    }

    #[test]
    fn test_set_amount_within_stock() {
        let cart = vec![item(1, 2)];
        let change = set_amount(&cart, ProductId::new(1), 5, &stock(1, 10)).unwrap();
        assert_eq!(change, AmountChange::Set(vec![item(1, 5)]));
    }

    #[test]
    fn test_set_amount_above_stock_fails() {
        let cart = vec![item(1, 2)];
        let err = set_amount(&cart, ProductId::new(1), 11, &stock(1, 10)).unwrap_err();
        assert!(matches!(
            err,
            CartError::InsufficientStock {
                requested: 11,
                available: 10,
                ..
            }
        ));
    }

    #[test]
    fn test_set_amount_non_positive_is_ignored() {
        let cart = vec![item(1, 2)];
        for amount in [0, -1, i64::MIN] {
            let change = set_amount(&cart, ProductId::new(1), amount, &stock(1, 10)).unwrap();
            assert_eq!(change, AmountChange::Ignored);
        }
    }

    #[test]
    fn test_set_amount_absent_product_fails() {
        let cart = vec![item(1, 2)];
        let err = set_amount(&cart, ProductId::new(2), 1, &stock(2, 10)).unwrap_err();
        assert!(matches!(
            err,
            CartError::UpdateFailed {
                source: OperationError::NotInCart(_),
                ..
            }
        ));
    }

    #[test]
    fn test_set_amount_keeps_position() {
        let cart = vec![item(1, 1), item(2, 1), item(3, 1)];
        let AmountChange::Set(next) =
            set_amount(&cart, ProductId::new(2), 4, &stock(2, 4)).unwrap()
        else {
            panic!("expected a new snapshot");
        };
        assert_eq!(amounts(&next), vec![(1, 1), (2, 4), (3, 1)]);
    }
}
