pub mod common;
pub mod validation;

pub mod client;
pub mod order;
pub mod product;
