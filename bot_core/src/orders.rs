use std::fmt::Write;

use futures_api::{ExchangeClient, ExchangeError, NewOrder, OrderResult, OrderType, Side};

use crate::OrderRequest;

const RULE_WIDTH: usize = 50;

/// Places exactly one order per call on the wrapped client.
pub struct OrderManager<C> {
    client: C,
}

impl<C: ExchangeClient> OrderManager<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub async fn place(&self, request: &OrderRequest) -> Result<OrderResult, ExchangeError> {
        match (request.order_type(), request.price()) {
            (OrderType::Limit, Some(price)) => {
                self.place_limit_order(request.symbol(), request.side(), request.quantity(), price)
                    .await
            }
            // validation guarantees a price on LIMIT, and MARKET never forwards one
            _ => {
                self.place_market_order(request.symbol(), request.side(), request.quantity())
                    .await
            }
        }
    }

    pub async fn place_market_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: f64,
    ) -> Result<OrderResult, ExchangeError> {
        tracing::info!("Placing MARKET order: {side} {quantity} {symbol}");
        let order = NewOrder::market(symbol, side, quantity);
        self.submit(&order).await
    }

    pub async fn place_limit_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: f64,
        price: f64,
    ) -> Result<OrderResult, ExchangeError> {
        tracing::info!("Placing LIMIT order: {side} {quantity} {symbol} @ {price}");
        let order = NewOrder::limit(symbol, side, quantity, price);
        self.submit(&order).await
    }

    async fn submit(&self, order: &NewOrder) -> Result<OrderResult, ExchangeError> {
        match self.client.submit_order(order).await {
            Ok(result) => {
                tracing::info!("{} order placed successfully: {}", order.order_type, result.order_id);
                Ok(result)
            }
            Err(e @ ExchangeError::Api { .. }) => {
                tracing::error!("Binance API error: {e}");
                Err(e)
            }
            Err(e) => {
                tracing::error!("Error placing {} order: {e}", order.order_type);
                Err(e)
            }
        }
    }
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn is_nonzero(value: &str) -> bool {
    value.parse::<f64>().map_or(true, |v| v != 0.)
}

/// Human readable execution summary. Pure: the same order always renders the same text.
pub fn format_order_response(order: &OrderResult) -> String {
    let mut lines = vec![
        format!("\n{}", rule()),
        "ORDER EXECUTED SUCCESSFULLY".to_owned(),
        rule(),
        format!("Order ID: {}", order.order_id),
        format!("Symbol: {}", order.symbol),
        format!("Side: {}", order.side),
        format!("Type: {}", order.order_type),
        format!("Status: {}", order.status),
        format!("Quantity: {}", order.orig_qty),
    ];
    if let Some(executed_qty) = &order.executed_qty {
        lines.push(format!("Executed Qty: {executed_qty}"));
    }
    match (&order.avg_price, &order.price) {
        (Some(avg_price), _) if is_nonzero(avg_price) => {
            lines.push(format!("Average Price: {avg_price}"))
        }
        (_, Some(price)) => lines.push(format!("Limit Price: {price}")),
        _ => {}
    }
    lines.push(format!("{}\n", rule()));
    lines.join("\n")
}

/// The block echoed before anything is sent.
pub fn format_request_summary(request: &OrderRequest) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", rule());
    let _ = writeln!(out, "ORDER REQUEST SUMMARY");
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "Symbol: {}", request.symbol());
    let _ = writeln!(out, "Side: {}", request.side());
    let _ = writeln!(out, "Type: {}", request.order_type());
    let _ = writeln!(out, "Quantity: {}", request.quantity());
    if let Some(price) = request.price() {
        let _ = writeln!(out, "Price: {price}");
    }
    let _ = writeln!(out, "{}\n", rule());
    out
}
