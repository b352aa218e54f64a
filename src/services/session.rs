use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    models::{Catalog, Product, ProductId},
    services::cart_service::{Cart, CartChange, CartError, ChangeKind},
    view::CartView,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Unknown control: '{control}'")]
    UnknownControl { control: String },

    #[error("Invalid event target: '{target}'")]
    InvalidTarget { target: String },

    #[error("Cart error: {0}")]
    CartError(#[from] CartError),
}

/// A click caught by the grid-level handler: the CSS class of the control
/// and the `data-id` of its enclosing `.cart-item`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiEvent {
    pub control: String,
    pub target_id: String,
}

impl UiEvent {
    pub fn new(control: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            control: control.into(),
            target_id: target_id.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    Increment(ProductId),
    Decrement(ProductId),
    Remove(ProductId),
    ToggleFavorite(ProductId),
}

impl CartAction {
    pub fn from_event(event: &UiEvent) -> Result<Self, SessionError> {
        let product_id = event
            .target_id
            .parse::<ProductId>()
            .map_err(|_| SessionError::InvalidTarget {
                target: event.target_id.clone(),
            })?;

        match event.control.trim() {
            "plus" => Ok(CartAction::Increment(product_id)),
            "minus" => Ok(CartAction::Decrement(product_id)),
            "remove" => Ok(CartAction::Remove(product_id)),
            "favorite" => Ok(CartAction::ToggleFavorite(product_id)),
            other => Err(SessionError::UnknownControl {
                control: other.to_string(),
            }),
        }
    }

    pub fn product_id(&self) -> ProductId {
        match self {
            CartAction::Increment(id)
            | CartAction::Decrement(id)
            | CartAction::Remove(id)
            | CartAction::ToggleFavorite(id) => *id,
        }
    }
}

/// Outcome of one dispatched action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Cart(CartChange),
    Favorite { product_id: ProductId, liked: bool },
}

/// Owns the cart of one page session together with the view it drives.
pub struct CartSession<V: CartView> {
    cart: Cart,
    view: V,
}

impl<V: CartView> CartSession<V> {
    pub fn new(view: V) -> Self {
        let mut session = Self {
            cart: Cart::new(),
            view,
        };
        session.refresh();
        session
    }

    /// Add every catalog product once, in catalog order, then render.
    pub fn bootstrap(&mut self, catalog: &Catalog) {
        for product in catalog.iter() {
            self.cart.add_item(product);
        }
        info!(
            "Cart bootstrapped with {} products, total {}",
            self.cart.len(),
            self.cart.total()
        );
        self.refresh();
    }

    pub fn add_product(&mut self, product: &Product) -> CartChange {
        let change = self.cart.add_item(product);
        self.refresh();
        change
    }

    pub fn remove_product(&mut self, product_id: ProductId) -> CartChange {
        let change = self.cart.remove_item(product_id);
        self.refresh();
        change
    }

    /// Forwards to [`Cart::update_quantity`]. The view is refreshed even when
    /// the quantity is rejected.
    pub fn set_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<CartChange, SessionError> {
        let result = self.cart.update_quantity(product_id, quantity);
        self.refresh();
        Ok(result?)
    }

    pub fn dispatch(&mut self, action: CartAction) -> Result<ActionOutcome, SessionError> {
        debug!("Dispatching {:?}", action);

        let outcome = match action {
            CartAction::Increment(id) => {
                let next = i64::from(self.cart.item_quantity(id)) + 1;
                self.cart.update_quantity(id, next).map(ActionOutcome::Cart)
            }
            CartAction::Decrement(id) => match self.cart.item_quantity(id) {
                0 => Ok(ActionOutcome::Cart(CartChange {
                    kind: ChangeKind::Unchanged,
                    product_id: id,
                    quantity: 0,
                })),
                current => self
                    .cart
                    .update_quantity(id, i64::from(current) - 1)
                    .map(ActionOutcome::Cart),
            },
            CartAction::Remove(id) => Ok(ActionOutcome::Cart(self.cart.remove_item(id))),
            CartAction::ToggleFavorite(id) => {
                // only rendered cards carry a favorite flag
                let liked = self.cart.contains(id) && self.view.toggle_favorite(id);
                Ok(ActionOutcome::Favorite {
                    product_id: id,
                    liked,
                })
            }
        };

        self.refresh();
        Ok(outcome?)
    }

    /// Single entry point for every control of the rendered grid.
    pub fn handle_event(&mut self, event: &UiEvent) -> Result<ActionOutcome, SessionError> {
        let action = CartAction::from_event(event)?;
        self.dispatch(action)
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    fn refresh(&mut self) {
        self.view.render(self.cart.items());
        self.view.display_total(self.cart.total());
    }
}
