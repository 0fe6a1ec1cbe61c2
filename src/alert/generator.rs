//! Alert generator
//!
//! Samples alerts from an `AlertConfig` and writes them through the shared
//! row writer.

use std::path::Path;

use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::AlertConfig;
use crate::error::{RangeError, Result};
use crate::format::RowWriter;

use super::{ip_range, random_date, random_ips};

/// Column names written as the first row
pub const HEADER: [&str; 5] = ["target", "source", "classification", "analyzer", "date"];

/// One generated alert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Address that was attacked
    pub target: String,
    /// Address the attack came from
    pub source: String,
    pub classification: String,
    pub analyzer: String,
    /// `DD/MM/YYYYTHH:MM`
    pub date: String,
}

impl Alert {
    pub fn to_fields(&self) -> [&str; 5] {
        [
            self.target.as_str(),
            self.source.as_str(),
            self.classification.as_str(),
            self.analyzer.as_str(),
            self.date.as_str(),
        ]
    }
}

/// Seeded RNG when a seed is given, entropy otherwise
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Sampling pools resolved from an `AlertConfig`
#[derive(Debug, Clone)]
pub struct AlertGenerator {
    targets: Vec<String>,
    sources: Vec<String>,
    classifications: Vec<String>,
    analyzers: Vec<String>,
    date_begin: NaiveDateTime,
    date_end: NaiveDateTime,
    alert_count: usize,
}

impl AlertGenerator {
    /// Validate `config` and build the target and source pools
    ///
    /// The source pool is drawn from `rng` once, here.
    pub fn new<R: Rng>(config: &AlertConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let targets = ip_range(&config.target_start, &config.target_end)?;
        let sources = random_ips(rng, config.source_count);

        tracing::debug!(
            targets = targets.len(),
            sources = sources.len(),
            alerts = config.alert_count,
            "alert generator ready"
        );

        Ok(Self {
            targets,
            sources,
            classifications: config.classifications.clone(),
            analyzers: config.analyzers.clone(),
            date_begin: config.date_begin,
            date_end: config.date_end,
            alert_count: config.alert_count,
        })
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Draw one alert
    pub fn next_alert<R: Rng>(&self, rng: &mut R) -> Result<Alert> {
        Ok(Alert {
            target: pick(rng, &self.targets, "target")?,
            source: pick(rng, &self.sources, "source")?,
            classification: pick(rng, &self.classifications, "classification")?,
            analyzer: pick(rng, &self.analyzers, "analyzer")?,
            date: random_date(rng, self.date_begin, self.date_end)?,
        })
    }

    /// Draw the configured number of alerts
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<Vec<Alert>> {
        (0..self.alert_count).map(|_| self.next_alert(rng)).collect()
    }

    /// Write the header and the configured number of alerts to `path`
    ///
    /// Returns the number of alert rows written.
    pub fn write_csv<R: Rng>(&self, path: &Path, rng: &mut R) -> Result<u64> {
        let mut writer = RowWriter::create(path)?;
        writer.write_header(&HEADER)?;

        for _ in 0..self.alert_count {
            let alert = self.next_alert(rng)?;
            writer.write_row(&alert.to_fields())?;
        }

        let rows = writer.finish_sync()?;
        tracing::info!(path = %path.display(), rows, "wrote alerts");
        Ok(rows)
    }
}

fn pick<R: Rng>(rng: &mut R, pool: &[String], what: &str) -> Result<String> {
    pool.choose(rng)
        .cloned()
        .ok_or_else(|| RangeError::Config(format!("{} pool is empty", what)))
}
