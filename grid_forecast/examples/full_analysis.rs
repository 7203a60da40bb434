use grid_forecast::derived::WeatherSample;
use grid_forecast::features::lag_rows_from_series;
use grid_forecast::{DemandModel, DemandSeries, ForecastContext, MetricGroup, MetricPolicy};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("GridFlow: Full Analysis Example");
    println!("===============================\n");

    let values: Vec<f64> = (0..120)
        .map(|d| 17_800.0 + ((d * 37) % 23) as f64 * 30.0)
        .collect();
    let series = DemandSeries::from_values("Maharashtra", "2023-03-01".parse()?, &values)?;

    let model = DemandModel::train(&lag_rows_from_series(&series))?;
    let context = ForecastContext::new(series, model, MetricPolicy::default());

    for temp_c in [28.0, 34.0, 38.5] {
        let metrics = context.analyze(Some(WeatherSample::new(temp_c)?))?;

        println!("Ambient temperature {:.1}°C", temp_c);
        println!(
            "  Forecast: {} {} (peak {} {})",
            metrics.forecast.standard_mw,
            metrics.forecast.unit,
            metrics.forecast.peak_mw,
            metrics.forecast.unit
        );
        println!(
            "  Inventory: {} transformers, {} km cable, {} insulators",
            metrics.inventory.transformers,
            metrics.inventory.heavy_cables_km,
            metrics.inventory.insulators
        );
        println!("  Budget: {:.2}", metrics.financial.total_budget);

        match &metrics.reliability {
            MetricGroup::Available(r) => println!("  Reliability: {}% ({})", r.accuracy_pct, r.status),
            MetricGroup::Unavailable { reason } => println!("  Reliability unavailable: {}", reason),
        }
        if let Some(w) = metrics.weather.available() {
            println!("  Weather adjusted: {} MW ({})", w.adjusted_mw, w.status);
        }

        println!(
            "  CO2: {:.0} kg, {} trees ({})",
            metrics.sustainability.co2_kg,
            metrics.sustainability.trees_equivalent,
            metrics.sustainability.recommendation
        );

        if metrics.status.is_normal() {
            println!("  All systems normal\n");
        } else {
            for alert in &metrics.status.alerts {
                println!("  ALERT: {}", alert);
            }
            println!();
        }
    }

    Ok(())
}
