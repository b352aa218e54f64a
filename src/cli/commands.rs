use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::{theme::ColorfulTheme, Select};
use tracing::{info, warn};

use crate::{
    cli::args::{Commands, OutputFormat},
    models::{Catalog, ProductId},
    services::{ActionOutcome, CartSession, ChangeKind, UiEvent},
    utils::{formatting::format_catalog_table, Config},
    view::{CartView, HtmlOptions, HtmlRenderer, TableRenderer},
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static HEART: Emoji<'_, '_> = Emoji("❤️ ", "");
static CART: Emoji<'_, '_> = Emoji("🛒 ", "");

/// Controls offered by the interactive prompt, with the CSS class the
/// rendered widget gives them.
const CONTROLS: [(&str, &str); 4] = [
    ("Increase quantity", "plus"),
    ("Decrease quantity", "minus"),
    ("Remove item", "remove"),
    ("Toggle favorite", "favorite"),
];

pub struct CliApp {
    config: Config,
    catalog: Catalog,
}

impl CliApp {
    pub fn new(config: Config) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_path(path)
                .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
            None => Catalog::default_catalog(),
        };
        info!("Catalog ready with {} products", catalog.len());

        Ok(Self { config, catalog })
    }

    pub fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Show { format } => self.handle_show(format),
            Commands::Catalog => self.handle_catalog(),
            Commands::Interactive => self.handle_interactive(),
        }
    }

    fn bootstrapped<V: CartView>(&self, view: V) -> CartSession<V> {
        let mut session = CartSession::new(view);
        session.bootstrap(&self.catalog);
        session
    }

    fn handle_show(&self, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Table => {
                let session = self.bootstrapped(TableRenderer::new(self.config.currency.clone()));
                println!("{} {}", CART, style("Cart").bold().cyan());
                println!("{}", session.view().output());
            }
            OutputFormat::Html => {
                let session = self.bootstrapped(HtmlRenderer::new(HtmlOptions::from(&self.config)));
                print!("{}", session.view().document());
            }
            OutputFormat::Json => {
                let session = self.bootstrapped(TableRenderer::new(self.config.currency.clone()));
                let json = serde_json::to_string_pretty(&session.cart().summary())
                    .context("Failed to serialize cart")?;
                println!("{}", json);
            }
        }
        Ok(())
    }

    fn handle_catalog(&self) -> Result<()> {
        println!("{}", style("Catalog").bold().cyan());
        println!("{}", format_catalog_table(&self.catalog, &self.config.currency));
        Ok(())
    }

    fn handle_interactive(&self) -> Result<()> {
        let theme = ColorfulTheme::default();
        let mut session = self.bootstrapped(TableRenderer::new(self.config.currency.clone()));
        println!("{}", session.view().output());

        loop {
            if session.cart().is_empty() {
                println!("{} Cart is empty, nothing left to edit", CART);
                break;
            }

            let mut labels: Vec<&str> = CONTROLS.iter().map(|(label, _)| *label).collect();
            labels.push("Quit");

            let choice = Select::with_theme(&theme)
                .with_prompt("Action")
                .items(&labels)
                .default(0)
                .interact()?;

            let Some((_, control)) = CONTROLS.get(choice) else {
                break;
            };

            let products: Vec<(ProductId, String)> = session
                .cart()
                .items()
                .iter()
                .map(|item| (item.product.id, format!("{} (x{})", item.product.name, item.quantity)))
                .collect();
            let names: Vec<&str> = products.iter().map(|(_, name)| name.as_str()).collect();

            let picked = Select::with_theme(&theme)
                .with_prompt("Product")
                .items(&names)
                .default(0)
                .interact()?;
            let Some((product_id, _)) = products.get(picked) else {
                continue;
            };

            let event = UiEvent::new(*control, product_id.to_string());
            match session.handle_event(&event) {
                Ok(ActionOutcome::Cart(change)) => match change.kind {
                    ChangeKind::Removed => {
                        println!("{} Product {} removed", CHECKMARK, change.product_id)
                    }
                    ChangeKind::Unchanged => {
                        println!("{} Nothing changed", CROSS)
                    }
                    _ => println!(
                        "{} Product {} now x{}",
                        CHECKMARK, change.product_id, change.quantity
                    ),
                },
                Ok(ActionOutcome::Favorite { product_id, liked }) => {
                    let state = if liked { "liked" } else { "unliked" };
                    println!("{} Product {} {}", HEART, product_id, state);
                }
                Err(e) => {
                    warn!("Action failed: {}", e);
                    println!("{} {}", CROSS, style(e).red());
                }
            }

            println!("{}", session.view().output());
        }

        info!("Interactive session finished, total {}", session.cart().total());
        Ok(())
    }
}
