use approx::assert_relative_eq;
use grid_forecast::derived::sustainability::{self, EmissionsRecommendation, SustainabilityPolicy};
use grid_forecast::derived::weather::{self, WeatherPolicy, WeatherSample, WeatherStatus};
use grid_forecast::derived::{
    inventory, DerivedMetricsEngine, InventoryRates, MetricsRequest, ReliabilityStatus,
};
use grid_forecast::error::ForecastError;
use rstest::rstest;

#[rstest]
#[case(0.0)]
#[case(1.0)]
#[case(37.0)]
#[case(1000.0)]
#[case(18_543.0)]
fn test_inventory_doubles_with_forecast(#[case] f: f64) {
    let rates = InventoryRates::default();
    let single = inventory::estimate(f, &rates);
    let double = inventory::estimate(2.0 * f, &rates);

    assert_eq!(double.transformers, 2.0 * single.transformers);
    assert_eq!(double.heavy_cables_km, 2.0 * single.heavy_cables_km);
    assert_eq!(double.insulators, 2.0 * single.insulators);
}

#[test]
fn test_weather_multiplier_flat_until_thirty() {
    let policy = WeatherPolicy::default();
    for t in [-10.0, 0.0, 15.5, 29.99, 30.0] {
        assert_eq!(weather::multiplier(t, &policy), 1.0);
    }
}

#[test]
fn test_weather_multiplier_monotonic() {
    let policy = WeatherPolicy::default();
    let temps: Vec<f64> = (-200..=600).map(|t| t as f64 * 0.1).collect();

    for pair in temps.windows(2) {
        assert!(weather::multiplier(pair[1], &policy) >= weather::multiplier(pair[0], &policy));
    }

    // uncapped
    assert_relative_eq!(weather::multiplier(60.0, &policy), 1.9, epsilon = 1e-12);
}

#[test]
fn test_weather_example() {
    let adj = weather::adjust(1000.0, WeatherSample::new(34.0).unwrap(), &WeatherPolicy::default());

    assert_relative_eq!(adj.multiplier, 1.12, epsilon = 1e-12);
    assert_eq!(adj.adjusted_mw, 1120.0);
    assert_eq!(adj.status, WeatherStatus::Normal);
}

#[rstest]
#[case(349_999.99, EmissionsRecommendation::StableEmissions)]
#[case(350_000.0, EmissionsRecommendation::StableEmissions)]
#[case(350_000.01, EmissionsRecommendation::HighEmissions)]
fn test_emissions_boundary(#[case] co2_kg: f64, #[case] expected: EmissionsRecommendation) {
    assert_eq!(
        sustainability::recommend(co2_kg, &SustainabilityPolicy::default()),
        expected
    );
}

#[test]
fn test_sustainability_example() {
    let est = sustainability::estimate(1000.0, &SustainabilityPolicy::default());

    assert_eq!(est.co2_kg, 820_000.0);
    assert_eq!(est.trees_equivalent, 39_048);
    assert_eq!(est.energy_mix.thermal_coal_pct, 70.0);
    assert_eq!(est.energy_mix.renewables_pct, 22.0);
    assert_eq!(est.energy_mix.other_pct, 8.0);
}

#[test]
fn test_full_derivation() {
    let engine = DerivedMetricsEngine::default();
    let request = MetricsRequest::new(1000.0, "Random Forest Regressor")
        .with_recent_actuals(vec![95.0, 100.0])
        .with_weather(WeatherSample::new(34.0).unwrap());

    let metrics = engine.derive(&request);

    assert_eq!(metrics.forecast.standard_mw, 1000.0);
    assert_eq!(metrics.forecast.peak_mw, 1200.0);
    assert_eq!(metrics.forecast.unit, "MW");
    assert_eq!(metrics.inventory.transformers, 50.0);
    assert_eq!(metrics.inventory.heavy_cables_km, 1200.0);
    assert_eq!(metrics.inventory.insulators, 15000.0);
    assert_eq!(metrics.financial.total_budget, 55_000_000.0);

    let reliability = metrics.reliability.available().unwrap();
    assert_eq!(reliability.accuracy_pct, 95.0);
    assert_eq!(reliability.status, ReliabilityStatus::Stable);

    assert_eq!(metrics.weather.available().unwrap().adjusted_mw, 1120.0);
    assert_eq!(metrics.status.health_score, Some(95.0));
    // 820 t of CO2 is above the high-emissions line
    assert_eq!(metrics.status.alerts.len(), 1);
}

#[test]
fn test_zero_latest_actual_degrades_only_reliability() {
    let engine = DerivedMetricsEngine::default();
    let request = MetricsRequest::new(400.0, "Random Forest Regressor")
        .with_recent_actuals(vec![95.0, 0.0])
        .with_weather(WeatherSample::new(36.0).unwrap());

    let metrics = engine.derive(&request);

    assert!(!metrics.reliability.is_available());
    assert!(metrics
        .reliability
        .reason()
        .unwrap()
        .contains("Division undefined"));

    assert_eq!(metrics.inventory.transformers, 20.0);
    assert_eq!(metrics.financial.peak_scenario_mw, 480.0);
    let weather = metrics.weather.available().unwrap();
    assert_eq!(weather.status, WeatherStatus::HeatwaveWarning);
    assert_eq!(metrics.sustainability.co2_kg, 328_000.0);
    assert_eq!(
        metrics.sustainability.recommendation,
        EmissionsRecommendation::StableEmissions
    );

    assert_eq!(metrics.status.health_score, None);
    assert!(metrics
        .status
        .alerts
        .iter()
        .any(|a| a.starts_with("reliability unavailable")));
    assert!(metrics
        .status
        .alerts
        .iter()
        .any(|a| a.starts_with("Heatwave Warning")));
}

#[test]
fn test_reliability_error_surfaces_directly() {
    let engine = DerivedMetricsEngine::default();
    assert!(matches!(
        engine.reliability(&[95.0, 0.0]),
        Err(ForecastError::DivisionUndefined(_))
    ));
}

#[test]
fn test_envelope_serializes() {
    let engine = DerivedMetricsEngine::default();
    let metrics = engine.derive(&MetricsRequest::new(10.0, "test").with_recent_actuals(vec![10.0, 10.0]));
    let json = serde_json::to_value(&metrics).unwrap();

    assert_eq!(json["reliability"]["state"], "available");
    assert_eq!(json["reliability"]["status"], "Stable");
    assert_eq!(json["weather"]["state"], "unavailable");
    assert_eq!(json["sustainability"]["recommendation"], "Stable Emissions.");
}
