pub mod cart_service;
pub mod session;

pub use cart_service::*;
pub use session::*;
