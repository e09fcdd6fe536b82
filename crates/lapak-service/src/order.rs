//! Order aggregator: turns a buyer's request into a fully priced, atomically
//! persisted order, then answers with the committed state.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info};

use lapak_core::config::ServiceConfig;
use lapak_core::models::{
    NewOrder, OrderDetail, OrderPatch, OrderRequest, Page, PageRequest, SnapshotLine,
};
use lapak_core::price;
use lapak_core::traits::{ICatalogStorage, IOrderStorage};
use lapak_core::{LapakError, LapakResult};

use crate::invoice;

pub struct OrderService {
    orders: Arc<dyn IOrderStorage>,
    catalog: Arc<dyn ICatalogStorage>,
    config: ServiceConfig,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn IOrderStorage>,
        catalog: Arc<dyn ICatalogStorage>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            orders,
            catalog,
            config,
        }
    }

    /// Create an order for `buyer_id`.
    ///
    /// The shipping address must exist and belong to the buyer. Every
    /// requested product is resolved against the live catalog and copied
    /// into a snapshot; a single missing product aborts the whole creation
    /// before anything is written. An empty line list is accepted and yields
    /// a zero-line order with total 0.
    pub fn create(&self, request: &OrderRequest, buyer_id: i64) -> LapakResult<OrderDetail> {
        let address = self
            .catalog
            .find_address(request.shipping_address_id)
            .and_then(|found| {
                found.ok_or(LapakError::AddressNotFound {
                    id: request.shipping_address_id,
                })
            })?;
        if address.user_id != buyer_id {
            return Err(LapakError::Forbidden {
                resource: "address",
            });
        }

        let invoice_code = invoice::generate(&self.config.invoice_prefix);

        let mut total = Decimal::ZERO;
        let mut lines = Vec::with_capacity(request.lines.len());
        for item in &request.lines {
            let detail = self
                .catalog
                .find_product(item.product_id)
                .and_then(|found| {
                    found.ok_or(LapakError::ProductNotFound {
                        id: item.product_id,
                    })
                })?;

            let unit_price = price::parse_price(&detail.product.consumer_price)?;
            let line_total = price::line_total(unit_price, item.quantity);
            total += line_total;

            lines.push(SnapshotLine {
                product_id: detail.product.id,
                name: detail.product.name.clone(),
                slug: detail.product.slug.clone(),
                reseller_price: detail.product.reseller_price.clone(),
                consumer_price: detail.product.consumer_price.clone(),
                description: detail.product.description.clone(),
                snapshot_store_id: detail.store.id,
                category_id: detail.category.id,
                store_id: detail.store.id,
                quantity: item.quantity,
                line_total,
            });
        }

        let order = NewOrder {
            invoice_code,
            payment_method: request.payment_method.clone(),
            address_id: address.id,
            total,
        };

        let order_id = self.orders.insert_order_graph(&order, &lines)?;
        info!(order_id, lines = lines.len(), %total, "order created");

        // Answer from a full read so the response reflects exactly what
        // committed, not the in-memory aggregation.
        self.get_by_id(order_id, buyer_id)
    }

    /// Fetch one order, enforcing derived ownership through the address.
    pub fn get_by_id(&self, id: i64, requester_id: i64) -> LapakResult<OrderDetail> {
        let order = self
            .orders
            .find_order(id)?
            .ok_or(LapakError::OrderNotFound { id })?;
        if order.owner_id() != requester_id {
            return Err(LapakError::Forbidden { resource: "order" });
        }
        Ok(order)
    }

    /// Paginated listing. The keyword is accepted for interface parity but
    /// does not filter orders.
    pub fn get_all(
        &self,
        limit: i64,
        page: i64,
        keyword: Option<String>,
    ) -> LapakResult<Page<OrderDetail>> {
        let limit = if limit > 0 {
            limit
        } else {
            self.config.default_page_limit
        };
        let request = PageRequest::new(limit, page, keyword);
        debug!(limit = request.limit, page = request.page, "listing orders");
        self.orders.list_orders(&request)
    }

    /// Update an order. Only the payment method is applied; the request's
    /// status field has no backing column and is ignored.
    pub fn update(
        &self,
        id: i64,
        requester_id: i64,
        patch: &OrderPatch,
    ) -> LapakResult<OrderDetail> {
        let existing = self.get_by_id(id, requester_id)?;

        let payment_method = patch
            .payment_method
            .as_deref()
            .unwrap_or(&existing.payment_method);
        self.orders.update_payment(id, payment_method)?;

        self.get_by_id(id, requester_id)
    }

    /// Delete an order, returning its last hydrated state.
    pub fn delete(&self, id: i64, requester_id: i64) -> LapakResult<OrderDetail> {
        let existing = self.get_by_id(id, requester_id)?;
        self.orders.delete_order(id)?;
        info!(order_id = id, "order deleted");
        Ok(existing)
    }
}
