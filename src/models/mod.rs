pub mod product;
pub mod cart_item;
pub mod catalog;

pub use product::*;
pub use cart_item::*;
pub use catalog::*;
