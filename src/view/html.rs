use rust_decimal::Decimal;
use std::fmt::Write;
use tracing::debug;

use crate::models::{CartItem, ProductId};
use crate::utils::{formatting::format_price, Config};
use crate::view::{CartView, Favorites};

/// Element id of the total price region.
pub const TOTAL_PRICE_ID: &str = "total-price";

#[derive(Debug, Clone)]
pub struct HtmlOptions {
    pub currency: String,
    pub remove_label: String,
    pub image_src: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            currency: "€".to_string(),
            remove_label: "Supprimer".to_string(),
            image_src: "./image/imge1.webp".to_string(),
        }
    }
}

impl From<&Config> for HtmlOptions {
    fn from(config: &Config) -> Self {
        Self {
            currency: config.currency.clone(),
            remove_label: config.remove_label.clone(),
            image_src: config.image_src.clone(),
        }
    }
}

/// Renders the cart as the card grid markup of the page widget.
///
/// Every control sits inside a `.cart-item` container tagged with
/// `data-id`, so a single delegated handler on the grid can resolve the
/// clicked control and its product (see [`crate::services::UiEvent`]).
#[derive(Debug, Default)]
pub struct HtmlRenderer {
    options: HtmlOptions,
    items_markup: String,
    total_text: String,
    favorites: Favorites,
    render_count: usize,
}

impl HtmlRenderer {
    pub fn new(options: HtmlOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Markup of the item grid's content.
    pub fn items_markup(&self) -> &str {
        &self.items_markup
    }

    /// Text of the total region, e.g. `89.97 €`.
    pub fn total_text(&self) -> &str {
        &self.total_text
    }

    pub fn render_count(&self) -> usize {
        self.render_count
    }

    pub fn is_favorite(&self, product_id: ProductId) -> bool {
        self.favorites.contains(product_id)
    }

    /// Grid and total region wrapped together, ready to embed in a page.
    pub fn document(&self) -> String {
        format!(
            "<div class=\"row g-4\">\n{}</div>\n<p class=\"fs-4\">Total: <span id=\"{}\">{}</span></p>\n",
            self.items_markup,
            TOTAL_PRICE_ID,
            escape_html(&self.total_text)
        )
    }

    fn render_item(&self, out: &mut String, item: &CartItem) {
        let liked = self.is_favorite(item.product.id);
        let (favorite_class, favorite_color) = if liked {
            ("btn favorite liked", "red")
        } else {
            ("btn favorite", "grey")
        };

        // writing into a String never fails
        let _ = write!(
            out,
            r#"<div class="col-md-4">
  <div class="card mb-3 cart-item shadow border-0" data-id="{id}">
    <img src="{image}" class="card-img-top img-fluid" alt="">
    <div class="card-body text-center">
      <h5>{name}</h5>
      <div class="align-items-center pt-3 mb-3">
        <button class="btn btn-warning minus me-2">-</button>
        <span class="quantity me-2">{quantity}</span>
        <button class="btn btn-info plus me-2">+</button>
        <span class="item-price me-4 fw-bold">{line_total}</span>
      </div>
      <button class="btn btn-danger remove me-2">{remove}</button>
      <button class="{favorite_class}" style="color: {favorite_color}">❤️</button>
    </div>
  </div>
</div>
"#,
            id = item.product.id,
            image = escape_html(&self.options.image_src),
            name = escape_html(&item.product.name),
            quantity = item.quantity,
            line_total = escape_html(&format_price(item.line_total(), &self.options.currency)),
            remove = escape_html(&self.options.remove_label),
            favorite_class = favorite_class,
            favorite_color = favorite_color,
        );
    }
}

impl CartView for HtmlRenderer {
    fn render(&mut self, items: &[CartItem]) {
        self.favorites.retain_rendered(items);

        let mut out = String::new();
        for item in items {
            self.render_item(&mut out, item);
        }
        self.items_markup = out;
        self.render_count += 1;
        debug!("Rendered {} cart items as HTML", items.len());
    }

    fn display_total(&mut self, total: Decimal) {
        self.total_text = format_price(total, &self.options.currency);
    }

    fn toggle_favorite(&mut self, product_id: ProductId) -> bool {
        self.favorites.toggle(product_id)
    }
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
