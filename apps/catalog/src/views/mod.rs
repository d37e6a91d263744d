//! Text renderings of catalog state. Every view returns a `String` so the
//! shell decides where it goes.

pub mod filters;
pub mod pagination;
pub mod product_card;
pub mod product_form;
pub mod product_list;
