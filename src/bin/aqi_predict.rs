// AQI prediction form, command-line edition
//
// Runs the heuristic predictor on one reading and prints the dial and pollutant meters.
// Usage: cargo run --features cli --bin aqi_predict -- --so2 12 --o3 70 --seed 42

use anyhow::Result;
use aqi_vision::{
    meters, AqiPredictor, Gauge, PollutantReading, Prediction, PredictorConfig, ReadingInput,
};
use clap::Parser;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    name = "aqi_predict",
    about = "Simulated AQI prediction from pollutant and weather readings",
    version
)]
struct Cli {
    /// SO₂ (ppb, 0-50)
    #[arg(long, default_value_t = ReadingInput::So2.default_value())]
    so2: f64,

    /// CO (ppm, 0-10)
    #[arg(long, default_value_t = ReadingInput::Co.default_value())]
    co: f64,

    /// NO (ppb, 0-50)
    #[arg(long, default_value_t = ReadingInput::No.default_value())]
    no: f64,

    /// NO₂ (ppb, 0-50)
    #[arg(long, default_value_t = ReadingInput::No2.default_value())]
    no2: f64,

    /// O₃ (ppb, 0-100)
    #[arg(long, default_value_t = ReadingInput::O3.default_value())]
    o3: f64,

    /// Temperature (°C, -10-40)
    #[arg(long, default_value_t = ReadingInput::Temperature.default_value(), allow_negative_numbers = true)]
    temperature: f64,

    /// Relative humidity (%, 0-100)
    #[arg(long, default_value_t = ReadingInput::Humidity.default_value())]
    humidity: f64,

    /// Wind speed (m/s, 0-20)
    #[arg(long, default_value_t = ReadingInput::WindSpeed.default_value())]
    wind_speed: f64,

    /// Master seed; overrides the config file and AQI_SEED
    #[arg(long)]
    seed: Option<u64>,

    /// Predictor config (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of seeded predictions to run in parallel
    #[arg(long, default_value_t = NonZeroUsize::MIN)]
    runs: NonZeroUsize,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn reading(&self) -> PollutantReading {
        PollutantReading {
            so2: self.so2,
            co: self.co,
            no: self.no,
            no2: self.no2,
            o3: self.o3,
            temperature: self.temperature,
            humidity: self.humidity,
            wind_speed: self.wind_speed,
        }
    }

    /// Reading clamped to the slider bounds, warning for every input that moved
    fn clamped_reading(&self) -> PollutantReading {
        let raw = self.reading();
        for input in raw.out_of_range_inputs() {
            let range = input.range();
            tracing::warn!(
                "{} = {} outside [{}, {}] {}, clamping",
                input.label(),
                raw.get(input),
                range.min,
                range.max,
                input.unit()
            );
        }
        raw.clamped_to_inputs()
    }

    /// Config file (or defaults), then environment, then `--seed`
    fn predictor_config(&self) -> Result<PredictorConfig> {
        let mut config = match &self.config {
            Some(path) => PredictorConfig::load(path)?,
            None => PredictorConfig::default(),
        }
        .with_env_overrides()?;
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

#[derive(Debug, Serialize)]
struct Report {
    reading: PollutantReading,
    predictions: Vec<Prediction>,
    gauge: Gauge,
    meters: Vec<aqi_vision::PollutantMeter>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aqi_vision=info,aqi_predict=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let report = build_report(&cli, cli.predictor_config()?)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn build_report(cli: &Cli, config: PredictorConfig) -> Result<Report> {
    // Slider bounds apply before the predictor sees the reading
    let reading = cli.clamped_reading();

    let predictor = AqiPredictor::new(config);
    let runs = cli.runs.get();
    let predictions = if runs > 1 {
        let seed = predictor.config().seed.unwrap_or_else(rand::random);
        predictor.predict_batch(&vec![reading; runs], seed)?
    } else {
        let mut noise = predictor.noise_source();
        vec![predictor.predict_classified(&reading, noise.as_mut())?]
    };

    let first = predictions[0];
    Ok(Report {
        reading,
        predictions,
        gauge: Gauge::from_value(first.value)?,
        meters: meters(&reading),
    })
}

fn print_report(report: &Report) {
    println!("Predicted AQI: {}", report.gauge.display_value);
    println!("  Band:     {} ({})", report.gauge.label, report.gauge.color);
    println!("  Needle:   {:.1}°", report.gauge.rotation_deg);

    if report.predictions.len() > 1 {
        let n = report.predictions.len() as f64;
        let mean = report.predictions.iter().map(|p| p.value).sum::<f64>() / n;
        let min = report.predictions.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
        let max = report.predictions.iter().map(|p| p.value).fold(f64::NEG_INFINITY, f64::max);
        println!("  Runs:     {} (mean {:.1}, min {:.1}, max {:.1})", report.predictions.len(), mean, min, max);
    }

    println!();
    println!("Pollutant Levels");
    for meter in &report.meters {
        println!(
            "  {:<4} {:>7.2} {:<3} {:>5.1}% {:?}",
            meter.label, meter.value, meter.unit, meter.percent, meter.level
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_config(seed: u64) -> PredictorConfig {
        PredictorConfig {
            seed: Some(seed),
            ..PredictorConfig::default()
        }
    }

    #[test]
    fn test_defaults_match_form() {
        let cli = Cli::try_parse_from(["aqi_predict"]).unwrap();
        assert_eq!(cli.reading(), PollutantReading::default());
        assert_eq!(cli.runs.get(), 1);
        assert!(!cli.json);
    }

    #[test]
    fn test_out_of_range_flags_are_clamped() {
        let cli = Cli::try_parse_from(["aqi_predict", "--so2", "80", "--temperature", "-25"])
            .unwrap();
        let reading = cli.clamped_reading();
        assert_eq!(reading.so2, 50.0);
        assert_eq!(reading.temperature, -10.0);
        assert_eq!(reading.co, PollutantReading::default().co);

        let report = build_report(&cli, seeded_config(3)).unwrap();
        assert_eq!(report.reading.so2, 50.0);
    }

    #[test]
    fn test_zero_runs_rejected() {
        assert!(Cli::try_parse_from(["aqi_predict", "--runs", "0"]).is_err());
        assert!(Cli::try_parse_from(["aqi_predict", "--runs", "-1"]).is_err());
    }

    #[test]
    fn test_runs_produce_one_prediction_each() {
        let cli = Cli::try_parse_from(["aqi_predict", "--runs", "3", "--seed", "1"]).unwrap();
        let report = build_report(&cli, seeded_config(1)).unwrap();
        assert_eq!(report.predictions.len(), 3);
        assert_eq!(report.gauge.display_value, report.predictions[0].display_value);

        let again = build_report(&cli, seeded_config(1)).unwrap();
        assert_eq!(report.predictions, again.predictions);
    }

    #[test]
    fn test_json_report() {
        let cli = Cli::try_parse_from(["aqi_predict", "--json"]).unwrap();
        assert!(cli.json);

        let report = build_report(&cli, seeded_config(42)).unwrap();
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["predictions"].as_array().unwrap().len(), 1);
        assert!(json["gauge"]["display_value"].is_u64());
        assert_eq!(json["meters"].as_array().unwrap().len(), 4);
    }
}
