//! # GridFlow
//!
//! Umbrella crate for the GridFlow workspace: next-day electricity demand
//! forecasting and the grid operations metrics derived from it.
//!
//! - [`grid_math`]: rounding and ratio policies shared by the metric groups
//! - [`grid_forecast`]: series, lag features, the random forest and the metrics engine
//! - [`grid_server`]: the `gridflow` trainer and HTTP service
//!
//! ## Example
//!
//! ```
//! use gridflow_workspace::forecast::derived::{DerivedMetricsEngine, MetricsRequest};
//!
//! let engine = DerivedMetricsEngine::default();
//! let metrics = engine.derive(&MetricsRequest::new(1000.0, "Random Forest Regressor"));
//! assert_eq!(metrics.inventory.transformers, 50.0);
//! assert_eq!(metrics.financial.total_budget, 55_000_000.0);
//! ```

pub use grid_forecast as forecast;
pub use grid_math as math;
pub use grid_server as server;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crates_are_reachable() {
        assert_eq!(math::round_to_cents(1.005_1), 1.01);
        assert_eq!(forecast::LAG_WIDTH, 3);
        assert_eq!(server::ServerConfig::default().server.port, 8000);
    }
}
