use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type ProductId = u32;

/// A melon offered in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub melon_type: String,
    /// Display name shown in listings and the cart.
    pub common_name: String,
    /// Unit price, never negative.
    pub price: Decimal,
    pub image_url: String,
    pub flesh_color: String,
    pub rind_color: String,
    pub seedless: bool,
}

impl Product {
    pub fn price_str(&self) -> String {
        format_price(self.price)
    }
}

/// Formats a money amount as dollars with two decimals, e.g. `$2.50`.
pub fn format_price(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

/// One row of the cart view: a distinct melon and how many of it were added.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub id: ProductId,
    pub common_name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub subtotal: Decimal,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub order_total: Decimal,
}

impl CartSummary {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }
}

/// Per-browser session data.
///
/// `cart` keeps one entry per "add" action, in the order they happened.
/// `flashes` holds notices waiting to be shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub cart: Vec<ProductId>,
    #[serde(default)]
    pub flashes: Vec<String>,
}

impl SessionState {
    pub fn flash(&mut self, message: impl Into<String>) {
        self.flashes.push(message.into());
    }

    pub fn take_flashes(&mut self) -> Vec<String> {
        std::mem::take(&mut self.flashes)
    }
}
