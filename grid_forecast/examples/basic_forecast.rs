use chrono::{Datelike, NaiveDate};
use grid_forecast::models::{ForestParams, RandomForest};
use grid_forecast::{train_from_series, DemandSeries, TimePoint};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("GridFlow: Basic Forecasting Example");
    println!("===================================\n");

    // Create sample data
    let series = create_sample_series()?;
    println!(
        "Sample data created: {} daily readings for {}\n",
        series.len(),
        series.region()
    );

    // Train with a hold-out of the last 20% of lag rows
    println!("Training model...");
    let forest = RandomForest::new(ForestParams {
        n_estimators: 50,
        ..ForestParams::default()
    })?;
    let (model, report) = train_from_series(&series, &forest, 0.2)?;

    println!(
        "Trained on {} lag rows ({} held out)",
        report.lag_rows, report.holdout_rows
    );
    println!("\nIn-sample {}", report.in_sample);
    if let Some(holdout) = &report.holdout {
        println!("Hold-out {}", holdout);
    }

    // Forecast tomorrow from the three most recent readings
    let last3 = series.last_n(3)?;
    let forecast = model.predict(&last3)?;
    println!("Last three readings: {:?}", last3);
    println!(
        "Forecast for the next day: {:.2} MW ({})",
        forecast,
        model.algorithm()
    );

    Ok(())
}

/// One year of daily demand with a summer peak and a weekday pattern
fn create_sample_series() -> Result<DemandSeries, Box<dyn std::error::Error>> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).ok_or("invalid start date")?;

    let points = start
        .iter_days()
        .take(365)
        .map(|date| {
            let day_of_year = date.ordinal() as f64;
            let seasonal = (day_of_year / 365.0 * std::f64::consts::TAU - 1.8).sin() * 1_500.0;
            let weekday = if date.weekday().num_days_from_monday() >= 5 {
                -600.0
            } else {
                0.0
            };
            let noise = (day_of_year * 1.7).sin() * 120.0;
            TimePoint::new(date, 18_000.0 + seasonal + weekday + noise)
        })
        .collect();

    Ok(DemandSeries::new("Maharashtra", points)?)
}
