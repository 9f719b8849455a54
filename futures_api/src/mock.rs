use crate::{
    ExchangeClient,
    error::ExchangeError,
    types::{AccountInfo, NewOrder, OrderResult, OrderStatus, OrderType, SymbolInfo},
    utils::now_millis,
};

/// Fill price reported for simulated market orders.
pub const MOCK_AVG_PRICE: &str = "100";

/// Answers locally with exchange-shaped responses. Used for dry runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockClient;

impl MockClient {
    pub fn new() -> Self {
        Self
    }

    pub fn fill(order: &NewOrder) -> OrderResult {
        let quantity = order.quantity.to_string();
        let (status, executed_qty, avg_price) = match order.order_type {
            OrderType::Market => (OrderStatus::Filled, quantity.clone(), MOCK_AVG_PRICE),
            OrderType::Limit => (OrderStatus::New, "0".to_owned(), "0"),
        };
        let price = order.price.map_or_else(|| "0".to_owned(), |p| p.to_string());

        OrderResult {
            order_id: now_millis(),
            symbol: order.symbol.clone(),
            side: order.side,
            order_type: order.order_type,
            status,
            orig_qty: quantity.into(),
            executed_qty: Some(executed_qty.into()),
            price: Some(price.into()),
            avg_price: Some(avg_price.into()),
            client_order_id: None,
            time_in_force: order.time_in_force.map(|tif| tif.to_string().into()),
            update_time: None,
        }
    }
}

impl ExchangeClient for MockClient {
    async fn submit_order(&self, order: &NewOrder) -> Result<OrderResult, ExchangeError> {
        tracing::debug!("Simulating {} order for {}", order.order_type, order.symbol);
        Ok(Self::fill(order))
    }

    async fn get_account_info(&self) -> Result<AccountInfo, ExchangeError> {
        Ok(AccountInfo::default())
    }

    async fn get_symbol_info(&self, _symbol: &str) -> Result<Option<SymbolInfo>, ExchangeError> {
        Ok(None)
    }
}
