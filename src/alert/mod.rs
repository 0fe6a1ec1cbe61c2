//! Alert Generator Module
//!
//! Produces synthetic IDS alerts as quoted CSV, for feeding dashboards and
//! diagrams with realistic-looking data.
//!
//! ## Output Format
//! ```text
//! "target","source","classification","analyzer","date"
//! "10.10.10.7","83.12.201.4","DDoS","Suricata","17/03/2009T04:51"
//! ```
//! - target: picked from a contiguous targeted network
//! - source: picked from a small pool of random addresses
//! - classification / analyzer: picked from fixed lists
//! - date: uniform over a window, `DD/MM/YYYYTHH:MM`

mod generator;
mod sampling;

pub use generator::{rng_from_seed, Alert, AlertGenerator, HEADER};
pub use sampling::{ip_range, random_date, random_ips, DATE_FORMAT};
