use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{CartItem, Product, ProductId};

/// Highest quantity a single cart line may hold.
pub const MAX_QUANTITY: u32 = 1_000_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("Invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: ProductId, quantity: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChangeKind {
    Added,
    Incremented,
    QuantitySet,
    Removed,
    Unchanged,
}

/// Notification returned by every mutating cart call. `quantity` is the
/// item's quantity after the call, 0 when the product is not in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartChange {
    pub kind: ChangeKind,
    pub product_id: ProductId,
    pub quantity: u32,
}

impl CartChange {
    fn new(kind: ChangeKind, product_id: ProductId, quantity: u32) -> Self {
        Self {
            kind,
            product_id,
            quantity,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self.kind, ChangeKind::Unchanged)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub line_total: Decimal,
}

/// Serializable snapshot of the cart, used for JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub items: Vec<SummaryLine>,
    pub total: Decimal,
}

/// Ordered cart lines, at most one per product id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`, appending a new line if it is not held yet.
    /// A line already at [`MAX_QUANTITY`] is left as is.
    pub fn add_item(&mut self, product: &Product) -> CartChange {
        if let Some(item) = self.find_mut(product.id) {
            if item.quantity >= MAX_QUANTITY {
                warn!("Product {} already at maximum quantity", product.id);
                return CartChange::new(ChangeKind::Unchanged, product.id, item.quantity);
            }
            item.quantity += 1;
            let quantity = item.quantity;
            debug!("Incremented product {} to {}", product.id, quantity);
            return CartChange::new(ChangeKind::Incremented, product.id, quantity);
        }

        self.items.push(CartItem::new(product.clone()));
        info!("Added product {} ('{}') to cart", product.id, product.name);
        CartChange::new(ChangeKind::Added, product.id, 1)
    }

    /// Drop the line for `product_id`. Missing ids are a no-op.
    pub fn remove_item(&mut self, product_id: ProductId) -> CartChange {
        let before = self.items.len();
        self.items.retain(|item| item.product.id != product_id);

        if self.items.len() == before {
            debug!("Remove ignored, product {} not in cart", product_id);
            CartChange::new(ChangeKind::Unchanged, product_id, 0)
        } else {
            info!("Removed product {} from cart", product_id);
            CartChange::new(ChangeKind::Removed, product_id, 0)
        }
    }

    /// Set the quantity of an existing line to exactly `quantity`.
    /// Zero removes the line, negative input or anything above
    /// [`MAX_QUANTITY`] is rejected and leaves the cart untouched, missing ids
    /// are a no-op.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<CartChange, CartError> {
        if quantity < 0 {
            warn!(
                "Rejected quantity {} for product {}",
                quantity, product_id
            );
            return Err(CartError::InvalidQuantity {
                product_id,
                quantity,
            });
        }

        let new_quantity = u32::try_from(quantity)
            .ok()
            .filter(|q| *q <= MAX_QUANTITY)
            .ok_or(CartError::InvalidQuantity {
                product_id,
                quantity,
            })?;

        if new_quantity == 0 {
            return Ok(self.remove_item(product_id));
        }

        match self.find_mut(product_id) {
            Some(item) => {
                item.quantity = new_quantity;
                debug!("Set product {} quantity to {}", product_id, new_quantity);
                Ok(CartChange::new(
                    ChangeKind::QuantitySet,
                    product_id,
                    new_quantity,
                ))
            }
            None => {
                debug!("Update ignored, product {} not in cart", product_id);
                Ok(CartChange::new(ChangeKind::Unchanged, product_id, 0))
            }
        }
    }

    /// Sum of all line totals.
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn item_quantity(&self, product_id: ProductId) -> u32 {
        self.find(product_id).map(|item| item.quantity).unwrap_or(0)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.find(product_id).is_some()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            items: self
                .items
                .iter()
                .map(|item| SummaryLine {
                    id: item.product.id,
                    name: item.product.name.clone(),
                    unit_price: item.product.price,
                    quantity: item.quantity,
                    line_total: item.line_total(),
                })
                .collect(),
            total: self.total(),
        }
    }

    fn find(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product.id == product_id)
    }

    fn find_mut(&mut self, product_id: ProductId) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|item| item.product.id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Catalog;

    fn bootstrapped() -> (Catalog, Cart) {
        let catalog = Catalog::default_catalog();
        let mut cart = Cart::new();
        for product in catalog.iter() {
            cart.add_item(product);
        }
        (catalog, cart)
    }

    fn expected_total(cart: &Cart) -> Decimal {
        cart.items()
            .iter()
            .map(|item| item.product.price * Decimal::from(item.quantity))
            .sum()
    }

    #[test]
    fn test_bootstrap_total() {
        let (_, cart) = bootstrapped();
        assert_eq!(cart.len(), 3);
        assert_eq!(cart.total(), Decimal::new(8997, 2));
    }

    #[test]
    fn test_repeated_add_increments_by_one() {
        let (catalog, mut cart) = bootstrapped();
        let product = catalog.find(ProductId(2)).unwrap();

        for expected in 2..=5 {
            let change = cart.add_item(product);
            assert_eq!(change.kind, ChangeKind::Incremented);
            assert_eq!(cart.item_quantity(ProductId(2)), expected);
        }

        assert_eq!(cart.len(), 3);
        assert_eq!(cart.total(), expected_total(&cart));
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let catalog = Catalog::default_catalog();
        let mut cart = Cart::new();
        cart.add_item(catalog.find(ProductId(3)).unwrap());
        cart.add_item(catalog.find(ProductId(1)).unwrap());
        cart.add_item(catalog.find(ProductId(3)).unwrap());

        let ids: Vec<ProductId> = cart.items().iter().map(CartItem::product_id).collect();
        assert_eq!(ids, vec![ProductId(3), ProductId(1)]);
    }

    #[test]
    fn test_update_quantity_sets_exact_value() {
        let (_, mut cart) = bootstrapped();
        let change = cart.update_quantity(ProductId(1), 3).unwrap();

        assert_eq!(change.kind, ChangeKind::QuantitySet);
        assert_eq!(change.quantity, 3);
        assert_eq!(cart.total(), Decimal::new(14995, 2));
    }

    #[test]
    fn test_remove_after_update() {
        let (_, mut cart) = bootstrapped();
        cart.update_quantity(ProductId(1), 3).unwrap();
        let change = cart.remove_item(ProductId(2));

        assert_eq!(change.kind, ChangeKind::Removed);
        assert_eq!(cart.item_quantity(ProductId(2)), 0);
        assert_eq!(cart.total(), Decimal::new(12996, 2));
    }

    #[test]
    fn test_update_to_zero_matches_remove() {
        let (_, mut via_update) = bootstrapped();
        let (_, mut via_remove) = bootstrapped();

        let change = via_update.update_quantity(ProductId(3), 0).unwrap();
        via_remove.remove_item(ProductId(3));

        assert_eq!(change.kind, ChangeKind::Removed);
        assert_eq!(via_update, via_remove);
        assert!(!via_update.contains(ProductId(3)));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let (_, mut cart) = bootstrapped();
        let before = cart.clone();

        let change = cart.remove_item(ProductId(42));

        assert!(change.is_unchanged());
        assert_eq!(cart, before);
        assert_eq!(cart.total(), before.total());
    }

    #[test]
    fn test_update_missing_is_noop() {
        let (_, mut cart) = bootstrapped();
        let before = cart.clone();

        let change = cart.update_quantity(ProductId(42), 5).unwrap();

        assert!(change.is_unchanged());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let (_, mut cart) = bootstrapped();
        let before = cart.clone();

        let result = cart.update_quantity(ProductId(1), -1);

        assert_eq!(
            result,
            Err(CartError::InvalidQuantity {
                product_id: ProductId(1),
                quantity: -1
            })
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_oversized_quantity_rejected() {
        let (_, mut cart) = bootstrapped();
        let result = cart.update_quantity(ProductId(1), i64::from(u32::MAX) + 1);
        assert!(matches!(result, Err(CartError::InvalidQuantity { .. })));
        assert_eq!(cart.item_quantity(ProductId(1)), 1);
    }

    #[test]
    fn test_summary_matches_cart() {
        let (_, mut cart) = bootstrapped();
        cart.update_quantity(ProductId(3), 2).unwrap();

        let summary = cart.summary();
        assert_eq!(summary.items.len(), 3);
        assert_eq!(summary.items[2].line_total, Decimal::new(7998, 2));
        assert_eq!(summary.total, cart.total());

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["items"][0]["id"], 1);
        assert_eq!(json["items"][0]["quantity"], 1);
    }

    #[test]
    fn test_quantity_above_cap_rejected() {
        let (_, mut cart) = bootstrapped();

        assert!(cart.update_quantity(ProductId(1), i64::from(MAX_QUANTITY)).is_ok());
        assert_eq!(
            cart.update_quantity(ProductId(1), i64::from(u32::MAX)),
            Err(CartError::InvalidQuantity {
                product_id: ProductId(1),
                quantity: i64::from(u32::MAX)
            })
        );
        assert_eq!(cart.item_quantity(ProductId(1)), MAX_QUANTITY);
    }

    #[test]
    fn test_add_stops_at_cap() {
        let (catalog, mut cart) = bootstrapped();
        cart.update_quantity(ProductId(1), i64::from(MAX_QUANTITY)).unwrap();

        let change = cart.add_item(catalog.find(ProductId(1)).unwrap());

        assert!(change.is_unchanged());
        assert_eq!(change.quantity, MAX_QUANTITY);
        assert_eq!(cart.item_quantity(ProductId(1)), MAX_QUANTITY);
    }

    #[test]
    fn test_largest_lines_total_without_overflow() {
        let mut requests = Vec::new();
        for id in 1..=50 {
            requests.push(crate::models::NewProduct::new(
                id,
                format!("Item {}", id),
                Decimal::from(crate::models::MAX_PRICE),
            ));
        }
        let catalog = Catalog::new(requests).unwrap();
        let mut cart = Cart::new();
        for product in catalog.iter() {
            cart.add_item(product);
            cart.update_quantity(product.id, i64::from(MAX_QUANTITY)).unwrap();
        }

        let line = Decimal::from(crate::models::MAX_PRICE) * Decimal::from(MAX_QUANTITY);
        assert_eq!(cart.total(), line * Decimal::from(50));
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.item_quantity(ProductId(1)), 0);
    }
}
