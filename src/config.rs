//! Configuration for georange
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{RangeError, Result};

/// Main configuration for a georange instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Range Table Configuration
    // -------------------------------------------------------------------------
    /// GeoIP-style CSV file backing the range table
    pub db_path: PathBuf,

    // -------------------------------------------------------------------------
    // Alert Generator Configuration
    // -------------------------------------------------------------------------
    pub alert: AlertConfig,
}

/// Settings for the alert CSV generator
#[derive(Debug, Clone)]
pub struct AlertConfig {
    /// Output CSV path
    pub output_path: PathBuf,

    /// Number of alert rows to write
    pub alert_count: usize,

    /// Number of random source addresses to sample from
    pub source_count: usize,

    /// First address of the targeted network
    pub target_start: String,

    /// Last address of the targeted network (inclusive)
    pub target_end: String,

    pub classifications: Vec<String>,

    pub analyzers: Vec<String>,

    /// Alert dates are drawn uniformly from [date_begin, date_end]
    pub date_begin: NaiveDateTime,
    pub date_end: NaiveDateTime,

    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("constant calendar date")
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("alert.csv"),
            alert_count: 5000,
            source_count: 5,
            target_start: "10.10.10.1".to_string(),
            target_end: "10.10.10.20".to_string(),
            classifications: ["SSH Failed", "Bruteforce", "DDoS", "Eth. Sniffing", "Buffer overflow"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            analyzers: ["Prelude-LML", "Suricata", "OSSEC", "Samhain", "Snort"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            date_begin: midnight(2000, 1, 1),
            date_end: midnight(2014, 12, 31),
            seed: None,
        }
    }
}

impl AlertConfig {
    /// Reject settings the generator cannot sample from
    pub fn validate(&self) -> Result<()> {
        if self.source_count == 0 {
            return Err(RangeError::Config("source_count must be at least 1".to_string()));
        }
        if self.classifications.is_empty() {
            return Err(RangeError::Config("classification list is empty".to_string()));
        }
        if self.analyzers.is_empty() {
            return Err(RangeError::Config("analyzer list is empty".to_string()));
        }
        if self.date_end < self.date_begin {
            return Err(RangeError::Config(format!(
                "date_end {} is before date_begin {}",
                self.date_end, self.date_begin
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./data.csv"),
            alert: AlertConfig::default(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the range table CSV path
    pub fn db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.db_path = path.into();
        self
    }

    /// Set the alert CSV output path
    pub fn alert_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.alert.output_path = path.into();
        self
    }

    /// Set the number of alerts to generate
    pub fn alert_count(mut self, count: usize) -> Self {
        self.config.alert.alert_count = count;
        self
    }

    /// Set the number of random source addresses
    pub fn source_count(mut self, count: usize) -> Self {
        self.config.alert.source_count = count;
        self
    }

    /// Set the targeted network bounds (inclusive)
    pub fn target_range(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.config.alert.target_start = start.into();
        self.config.alert.target_end = end.into();
        self
    }

    pub fn classifications(mut self, values: Vec<String>) -> Self {
        self.config.alert.classifications = values;
        self
    }

    pub fn analyzers(mut self, values: Vec<String>) -> Self {
        self.config.alert.analyzers = values;
        self
    }

    /// Set the alert date window
    pub fn date_window(mut self, begin: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.config.alert.date_begin = begin;
        self.config.alert.date_end = end;
        self
    }

    /// Fix the RNG seed for reproducible output
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.config.alert.seed = seed;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
