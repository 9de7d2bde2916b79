use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use super::{label, price};
use crate::model::{Money, OrderState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub label: String,
    pub price: Money,
}

/// Priced lines of an order in insertion order, plus the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub lines: Vec<ReceiptLine>,
    pub total: Money,
}

impl Receipt {
    pub fn for_order(state: &OrderState) -> Self {
        let lines: Vec<ReceiptLine> = state
            .items
            .iter()
            .map(|item| ReceiptLine {
                label: label(item),
                price: price(item),
            })
            .collect();
        let total = lines.iter().map(|line| line.price).sum();
        Self { lines, total }
    }
}

impl Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{:<60} {:>8}", line.label, line.price.to_string())?;
        }
        write!(f, "{:<60} {:>8}", "Total", self.total.to_string())
    }
}
