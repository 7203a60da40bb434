use grid_forecast::error::ForecastError;
use grid_math::MathError;
use std::io;

#[test]
fn test_error_conversion() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let forecast_error = ForecastError::from(io_error);
    assert!(matches!(forecast_error, ForecastError::IoError(_)));

    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert!(matches!(
        ForecastError::from(json_error),
        ForecastError::SerializationError(_)
    ));
}

#[test]
fn test_math_errors_map_onto_forecast_errors() {
    let err = ForecastError::from(MathError::DivisionUndefined("latest value is zero".to_string()));
    assert!(matches!(err, ForecastError::DivisionUndefined(_)));

    let err = ForecastError::from(MathError::InsufficientData("need 2 values".to_string()));
    assert!(matches!(err, ForecastError::DataInsufficient(_)));

    let err = ForecastError::from(MathError::InvalidInput("NaN".to_string()));
    assert!(matches!(err, ForecastError::ValidationError(_)));
}

#[test]
fn test_error_display() {
    let error = ForecastError::InvalidParameter("Number of estimators must be positive".to_string());
    assert!(error.to_string().contains("Number of estimators must be positive"));

    let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
    let error_string = ForecastError::from(io_error).to_string();
    assert!(error_string.contains("IO error"));
    assert!(error_string.contains("permission denied"));

    let error = ForecastError::ModelUninitialized("no model has been trained or loaded".to_string());
    assert_eq!(
        error.to_string(),
        "Model not initialized: no model has been trained or loaded"
    );
}

#[test]
fn test_question_mark_converts_math_errors() {
    fn ratio() -> grid_forecast::Result<f64> {
        Ok(grid_math::relative_deviation(0.0, 95.0)?)
    }

    match ratio() {
        Err(ForecastError::DivisionUndefined(msg)) => assert!(!msg.is_empty()),
        other => panic!("Expected DivisionUndefined, got {:?}", other),
    }
}
