//! # lapak-service
//!
//! Business services over the storage traits: the order aggregator
//! (validate, price, snapshot, persist atomically, re-read) and catalog
//! maintenance. Collaborators arrive through constructors as trait objects;
//! there is no global state.

pub mod invoice;
pub mod order;
pub mod product;

pub use order::OrderService;
pub use product::ProductService;
