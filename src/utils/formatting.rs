use console::style;
use rust_decimal::{Decimal, RoundingStrategy};
use tabled::{Table, Tabled, settings::{Style, Alignment}};

use crate::models::{CartItem, Catalog};
use crate::view::Favorites;

#[derive(Tabled)]
struct CartTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Product")]
    name: String,
    #[tabled(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Unit price")]
    unit_price: String,
    #[tabled(rename = "Line total")]
    line_total: String,
    #[tabled(rename = "♥")]
    favorite: String,
}

#[derive(Tabled)]
struct CatalogTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Product")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
}

/// Two decimals, half away from zero, followed by the currency suffix:
/// `89.97 €`.
pub fn format_price(amount: Decimal, currency: &str) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    format!("{} {}", rounded, currency)
}

pub fn format_cart_table(
    items: &[CartItem],
    favorites: &Favorites,
    currency: &str,
) -> String {
    if items.is_empty() {
        return String::new();
    }

    let rows: Vec<CartTableRow> = items
        .iter()
        .map(|item| CartTableRow {
            id: item.product.id.to_string(),
            name: truncate_name(&item.product.name),
            quantity: item.quantity.to_string(),
            unit_price: format_price(item.product.price, currency),
            line_total: format_price(item.line_total(), currency),
            favorite: if favorites.contains(item.product.id) {
                "❤️".to_string()
            } else {
                String::new()
            },
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left());

    table.to_string()
}

pub fn format_catalog_table(catalog: &Catalog, currency: &str) -> String {
    let rows: Vec<CatalogTableRow> = catalog
        .iter()
        .map(|product| CatalogTableRow {
            id: product.id.to_string(),
            name: truncate_name(&product.name),
            price: format_price(product.price, currency),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left());

    table.to_string()
}

pub fn format_total_line(total: Decimal, currency: &str) -> String {
    format!(
        "{}: {}",
        style("Total").bold(),
        style(format_price(total, currency)).green().bold()
    )
}

fn truncate_name(name: &str) -> String {
    if name.chars().count() > 30 {
        let head: String = name.chars().take(27).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}
