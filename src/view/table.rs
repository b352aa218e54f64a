use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{CartItem, ProductId};
use crate::utils::formatting::{format_cart_table, format_total_line};
use crate::view::{CartView, Favorites};

/// Terminal rendition of the cart used by the CLI.
#[derive(Debug)]
pub struct TableRenderer {
    currency: String,
    table: String,
    total_line: String,
    favorites: Favorites,
}

impl TableRenderer {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            table: String::new(),
            total_line: String::new(),
            favorites: Favorites::new(),
        }
    }

    pub fn output(&self) -> String {
        if self.table.is_empty() {
            format!("Your cart is empty.\n{}", self.total_line)
        } else {
            format!("{}\n{}", self.table, self.total_line)
        }
    }

    pub fn is_favorite(&self, product_id: ProductId) -> bool {
        self.favorites.contains(product_id)
    }
}

impl CartView for TableRenderer {
    fn render(&mut self, items: &[CartItem]) {
        self.favorites.retain_rendered(items);
        self.table = format_cart_table(items, &self.favorites, &self.currency);
        debug!("Rendered {} cart items as table", items.len());
    }

    fn display_total(&mut self, total: Decimal) {
        self.total_line = format_total_line(total, &self.currency);
    }

    fn toggle_favorite(&mut self, product_id: ProductId) -> bool {
        self.favorites.toggle(product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Catalog;

    #[test]
    fn test_output_contains_items_and_total() {
        let catalog = Catalog::default_catalog();
        let items: Vec<CartItem> = catalog.iter().cloned().map(CartItem::new).collect();

        let mut renderer = TableRenderer::new("€");
        renderer.render(&items);
        renderer.display_total(Decimal::new(8997, 2));

        let output = renderer.output();
        assert!(output.contains("Article 3"));
        assert!(output.contains("89.97 €"));
    }

    #[test]
    fn test_empty_output() {
        let mut renderer = TableRenderer::new("€");
        renderer.render(&[]);
        renderer.display_total(Decimal::ZERO);
        assert!(renderer.output().starts_with("Your cart is empty."));
    }
}
