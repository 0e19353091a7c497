use std::fs;
use std::path::Path;

use anyhow::Context;
use fixtura_core::{compute_totals, LineInput};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::commands::CommandResult;

/// Request document for a one-off totals preview, in the platform's wire
/// casing. Rates given on the command line win over the file's.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreviewRequest {
    items: Vec<PreviewItem>,
    #[serde(default)]
    tax_rate: Option<Decimal>,
    #[serde(default)]
    global_discount: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreviewItem {
    unit_price: Decimal,
    quantity: u32,
    #[serde(default)]
    discount: Decimal,
}

pub fn run(file: &Path, tax_rate: Option<Decimal>, global_discount: Option<Decimal>) -> CommandResult {
    let request = match load_request(file) {
        Ok(request) => request,
        Err(error) => {
            return CommandResult::failure("preview", "input_parse", format!("{error:#}"), 2)
        }
    };

    let lines: Vec<LineInput> = request
        .items
        .iter()
        .map(|item| LineInput {
            unit_price: item.unit_price,
            quantity: item.quantity,
            discount_pct: item.discount,
        })
        .collect();

    let tax_rate = tax_rate.or(request.tax_rate).unwrap_or(Decimal::ZERO);
    let global_discount = global_discount.or(request.global_discount).unwrap_or(Decimal::ZERO);

    let totals = compute_totals(&lines, tax_rate, global_discount);
    let data = match serde_json::to_value(totals) {
        Ok(data) => data,
        Err(error) => return CommandResult::failure("preview", "serialization", error.to_string(), 3),
    };

    CommandResult::with_data(
        "preview",
        format!("{} lines priced at {tax_rate}% tax, {global_discount}% global discount", lines.len()),
        Some(data),
    )
}

fn load_request(path: &Path) -> anyhow::Result<PreviewRequest> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("could not read `{}`", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("could not parse `{}`", path.display()))
}
