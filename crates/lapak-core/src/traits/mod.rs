mod storage;

pub use storage::{ICatalogStorage, IOrderStorage};
