pub mod entities;
pub mod pagination;
pub mod requests;
pub mod responses;

pub use entities::{
    Address, Category, DeletePolicy, NewOrder, NewProduct, Order, OrderLine, Product,
    ProductPhoto, ProductSnapshot, SnapshotLine, Store, User,
};
pub use pagination::{Page, PageRequest};
pub use requests::{NewUser, OrderLineRequest, OrderPatch, OrderRequest, ProductRequest};
pub use responses::{OrderDetail, OrderLineDetail, ProductDetail, SnapshotProductView};
