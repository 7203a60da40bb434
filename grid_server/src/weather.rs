//! Simulated ambient temperature for requests that do not supply one

use crate::config::WeatherSettings;
use anyhow::{ensure, Context, Result};
use grid_forecast::derived::WeatherSample;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;

/// Draws temperatures from a clamped normal distribution
#[derive(Debug)]
pub struct WeatherSimulator {
    rng: Mutex<StdRng>,
    normal: Normal<f64>,
    min_c: f64,
    max_c: f64,
}

impl WeatherSimulator {
    pub fn new(settings: &WeatherSettings) -> Result<Self> {
        ensure!(
            settings.mean_c.is_finite() && settings.min_c <= settings.max_c,
            "Invalid weather settings: mean {} within [{}, {}]",
            settings.mean_c,
            settings.min_c,
            settings.max_c
        );
        let normal = Normal::new(settings.mean_c, settings.std_dev_c)
            .context("Invalid weather distribution")?;
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            rng: Mutex::new(rng),
            normal,
            min_c: settings.min_c,
            max_c: settings.max_c,
        })
    }

    /// One reading, rounded to a tenth of a degree
    pub fn sample(&self) -> WeatherSample {
        let raw: f64 = self.rng.lock().sample(self.normal);
        let ambient_temp_c = grid_math::round_to(raw.clamp(self.min_c, self.max_c), 1);
        WeatherSample { ambient_temp_c }
    }
}
