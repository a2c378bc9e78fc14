//! Auction-market price data for Mabinogi items.
//!
//! Wraps a remote auction-listing store behind a resilient query layer
//! (timeout, bounded retry with exponential backoff, classified errors),
//! aggregates listings into quantity-weighted price summaries, and
//! degrades gracefully through an in-memory cache and a static fallback
//! table when the store is unreachable. Also computes crafting profit for
//! the Mutant recipe.
//!
//! # Quick start
//!
//! ```no_run
//! use mabi_market::{MarketConfig, PriceService, RestSource};
//!
//! # async fn run() -> mabi_market::Result<()> {
//! let cfg = MarketConfig::from_env()?;
//! let service = PriceService::builder()
//!     .source(Box::new(RestSource::new(&cfg)?))
//!     .build();
//!
//! let lookup = service.lookup("Silk").await;
//! println!("{} avg {} ({})", lookup.summary.item_name,
//!          lookup.summary.avg_price, lookup.source.label());
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod fallback;
pub mod models;
pub mod pricing;
pub mod recipe;
pub mod retry;
pub mod service;
pub mod source;

pub use cache::ResponseCache;
pub use config::MarketConfig;
pub use error::{MarketError, QueryError, Result};
pub use fallback::FallbackProvider;
pub use models::{DataSource, FallbackReason, PriceBucket, PriceRow, PriceSummary};
pub use pricing::{summarize, weighted_average, WeightedAverage};
pub use recipe::{compute_profit, mutant_recipe, Material, Recipe, RecipeProfit};
pub use retry::RetryPolicy;
pub use service::{PriceLookup, PriceResponse, PriceService, PriceServiceBuilder};
pub use source::{PriceSource, RestSource};
