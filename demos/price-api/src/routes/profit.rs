use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};

use mabi_market::{compute_profit, mutant_recipe, PriceResponse};

use crate::state::AppState;

/// GET /api/items/profit
///
/// Server-side crafting profit view for the fixed Mutant recipe: looks up
/// every material and the output through the price service, then reports
/// material cost, profit against the output's lowest sale price, and the
/// per-item price data that went into the numbers.
pub async fn get_profit(State(state): State<Arc<AppState>>) -> Json<Value> {
    let recipe = mutant_recipe();

    let mut prices = HashMap::new();
    let mut items = Vec::new();
    for name in recipe.item_names() {
        let lookup = state.service.lookup(name).await;
        prices.insert(name.to_string(), lookup.summary.clone());
        items.push(serde_json::to_value(PriceResponse::from(lookup)).unwrap_or(Value::Null));
    }

    let profit = compute_profit(&recipe, &prices);

    Json(json!({
        "recipe": {
            "output": recipe.output,
            "materials": recipe.materials.iter()
                .map(|m| json!({ "itemName": m.item_name, "quantity": m.quantity }))
                .collect::<Vec<_>>(),
        },
        "profit": profit,
        "items": items,
    }))
}
