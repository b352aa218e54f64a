pub mod html;
pub mod table;

pub use html::*;
pub use table::*;

use rust_decimal::Decimal;
use std::collections::BTreeSet;

use crate::models::{CartItem, ProductId};

/// Rendering side of the widget. The session pushes a full re-render through
/// this trait after every handled action.
pub trait CartView {
    /// Replace the whole displayed item list.
    fn render(&mut self, items: &[CartItem]);

    /// Replace the grand total region.
    fn display_total(&mut self, total: Decimal);

    /// Flip the view-local favorite flag of a product, returning the new state.
    fn toggle_favorite(&mut self, product_id: ProductId) -> bool;
}

/// View-local favorite flags, never part of the cart model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites(BTreeSet<ProductId>);

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.0.contains(&product_id)
    }

    /// Returns the new state.
    pub fn toggle(&mut self, product_id: ProductId) -> bool {
        if self.0.remove(&product_id) {
            false
        } else {
            self.0.insert(product_id);
            true
        }
    }

    /// Drop flags of products that are no longer rendered.
    pub fn retain_rendered(&mut self, items: &[CartItem]) {
        self.0
            .retain(|id| items.iter().any(|item| item.product.id == *id));
    }
}
