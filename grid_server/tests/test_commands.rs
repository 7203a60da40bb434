use chrono::{Duration, NaiveDate};
use grid_forecast::DemandModel;
use grid_server::cli::TrainArgs;
use grid_server::commands::{build_context, run_train};
use grid_server::ServerConfig;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_series(path: &Path, days: usize) {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let mut csv = String::from("date,demand_mw\n");
    for d in 0..days {
        let date = start + Duration::days(d as i64);
        csv.push_str(&format!("{},{}\n", date, 18_000 + (d % 7) * 120));
    }
    fs::write(path, csv).unwrap();
}

#[test]
fn test_train_then_build_context() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("demand.csv");
    let model = dir.path().join("models").join("gridflow_model.json");
    write_series(&data, 40);

    run_train(&TrainArgs {
        data: data.clone(),
        model: model.clone(),
        region: "Maharashtra".to_owned(),
        trees: 8,
        seed: 3,
        holdout: 0.2,
    })
    .unwrap();
    assert!(DemandModel::load(&model).unwrap().is_ready());

    let mut config = ServerConfig::default();
    config.data.series_path = data;
    config.data.model_path = model;

    let context = build_context(&config).unwrap();
    assert!(context.is_ready());
    assert_eq!(context.series().len(), 40);
}

#[test]
fn test_missing_model_starts_not_ready() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("demand.csv");
    write_series(&data, 10);

    let mut config = ServerConfig::default();
    config.data.series_path = data;
    config.data.model_path = dir.path().join("absent.json");

    let context = build_context(&config).unwrap();
    assert!(!context.is_ready());
}

#[test]
fn test_corrupt_model_is_fatal() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("demand.csv");
    let model = dir.path().join("model.json");
    write_series(&data, 10);
    fs::write(&model, "{}").unwrap();

    let mut config = ServerConfig::default();
    config.data.series_path = data;
    config.data.model_path = model;

    assert!(build_context(&config).is_err());
}
