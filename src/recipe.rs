//! Crafting recipes and profit calculation.
//!
//! A recipe maps material items (with required quantities) to one output
//! item. Profit compares the cost of buying all materials at their average
//! market price against selling one output at its lowest listed price.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::PriceSummary;

#[derive(Debug, Clone)]
pub struct Material {
    pub item_name: String,
    pub quantity: u32,
}

#[derive(Debug, Clone)]
pub struct Recipe {
    pub output: String,
    pub materials: Vec<Material>,
}

impl Recipe {
    /// All item names the recipe touches, materials first, output last.
    pub fn item_names(&self) -> Vec<&str> {
        self.materials
            .iter()
            .map(|m| m.item_name.as_str())
            .chain(std::iter::once(self.output.as_str()))
            .collect()
    }
}

/// The Mutant crafting recipe: 10 rabbit feet, 5 plant mucus, 3 sasquatch
/// hearts per Mutant.
pub fn mutant_recipe() -> Recipe {
    Recipe {
        output: "Mutant".to_string(),
        materials: vec![
            Material {
                item_name: "Mutant Rabbit's Foot".to_string(),
                quantity: 10,
            },
            Material {
                item_name: "Mutant Plant Mucus".to_string(),
                quantity: 5,
            },
            Material {
                item_name: "Sasquatch Heart".to_string(),
                quantity: 3,
            },
        ],
    }
}

/// Derived profit figures for one recipe. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeProfit {
    pub total_material_cost: f64,
    pub profit: f64,
    pub profit_percentage: f64,
    pub all_prices_available: bool,
}

/// Compute crafting profit for `recipe` given whatever price summaries are
/// known.
///
/// `all_prices_available` depends on the materials only; a missing or
/// zero-priced output still yields a known material cost. An output price
/// of exactly 0 is treated as "unknown", not "free".
pub fn compute_profit(recipe: &Recipe, prices: &HashMap<String, PriceSummary>) -> RecipeProfit {
    let material_prices: Vec<Option<&PriceSummary>> = recipe
        .materials
        .iter()
        .map(|m| prices.get(&m.item_name))
        .collect();

    if material_prices.iter().any(|p| p.is_none()) {
        return RecipeProfit {
            total_material_cost: 0.0,
            profit: 0.0,
            profit_percentage: 0.0,
            all_prices_available: false,
        };
    }

    let total_material_cost: f64 = recipe
        .materials
        .iter()
        .zip(&material_prices)
        .filter_map(|(m, p)| p.map(|s| s.avg_price as f64 * f64::from(m.quantity)))
        .sum();

    let output_price = prices
        .get(&recipe.output)
        .map(|s| s.lowest_price)
        .filter(|&p| p > 0.0);

    match output_price {
        Some(sale_price) => {
            let profit = sale_price - total_material_cost;
            let profit_percentage = if total_material_cost > 0.0 {
                100.0 * profit / total_material_cost
            } else {
                0.0
            };
            RecipeProfit {
                total_material_cost,
                profit,
                profit_percentage,
                all_prices_available: true,
            }
        }
        None => RecipeProfit {
            total_material_cost,
            profit: 0.0,
            profit_percentage: 0.0,
            all_prices_available: true,
        },
    }
}
