//! Sampling helpers for alert generation

use std::net::Ipv4Addr;

use chrono::{Duration, NaiveDateTime};
use rand::Rng;

use crate::error::{RangeError, Result};

/// strftime pattern for alert dates
pub const DATE_FORMAT: &str = "%d/%m/%YT%H:%M";

fn parse_quad(ip: &str) -> Result<u32> {
    ip.parse::<Ipv4Addr>()
        .map(u32::from)
        .map_err(|_| RangeError::InvalidRange(format!("not a dotted quad: {:?}", ip)))
}

/// Every address from `start` to `end`, inclusive
///
/// Fails fast when `end` comes before `start`.
pub fn ip_range(start: &str, end: &str) -> Result<Vec<String>> {
    let first = parse_quad(start)?;
    let last = parse_quad(end)?;

    if last < first {
        return Err(RangeError::InvalidRange(format!(
            "end address {} is before start address {}",
            end, start
        )));
    }

    Ok((first..=last)
        .map(|n| Ipv4Addr::from(n).to_string())
        .collect())
}

/// `count` random dotted quads, each octet uniform in 0..=255
pub fn random_ips<R: Rng>(rng: &mut R, count: usize) -> Vec<String> {
    (0..count)
        .map(|_| Ipv4Addr::from(rng.gen::<[u8; 4]>()).to_string())
        .collect()
}

/// A uniformly drawn whole second in `[start, end]`, formatted as
/// `DD/MM/YYYYTHH:MM`
pub fn random_date<R: Rng>(
    rng: &mut R,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<String> {
    let span = (end - start).num_seconds();
    if span < 0 {
        return Err(RangeError::InvalidRange(format!(
            "end date {} is before start date {}",
            end, start
        )));
    }

    let offset = rng.gen_range(0..=span);
    Ok((start + Duration::seconds(offset)).format(DATE_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_ip_range_inclusive() {
        let ips = ip_range("192.168.1.0", "192.168.1.5").unwrap();
        assert_eq!(ips.len(), 6);
        assert_eq!(ips.first().unwrap(), "192.168.1.0");
        assert_eq!(ips.last().unwrap(), "192.168.1.5");
    }

    #[test]
    fn test_ip_range_carries_octets() {
        let ips = ip_range("10.0.0.254", "10.0.1.1").unwrap();
        assert_eq!(ips, vec!["10.0.0.254", "10.0.0.255", "10.0.1.0", "10.0.1.1"]);
    }

    #[test]
    fn test_ip_range_single_address() {
        assert_eq!(ip_range("1.2.3.4", "1.2.3.4").unwrap(), vec!["1.2.3.4"]);
    }

    #[test]
    fn test_ip_range_rejects_inverted_bounds() {
        let err = ip_range("10.10.10.20", "10.10.10.1").unwrap_err();
        assert!(matches!(err, RangeError::InvalidRange(_)));
    }

    #[test]
    fn test_ip_range_rejects_non_quad() {
        assert!(ip_range("10.10.10", "10.10.10.1").is_err());
        assert!(ip_range("10.10.10.1", "10.10.10.256").is_err());
    }

    #[test]
    fn test_random_ips_are_parseable() {
        let mut rng = StdRng::seed_from_u64(7);
        let ips = random_ips(&mut rng, 50);
        assert_eq!(ips.len(), 50);
        for ip in ips {
            assert!(ip.parse::<Ipv4Addr>().is_ok(), "bad ip {}", ip);
        }
    }

    #[test]
    fn test_random_date_within_window() {
        let mut rng = StdRng::seed_from_u64(42);
        let start = at(2000, 1, 1, 0, 0);
        let end = at(2014, 12, 31, 0, 0);

        for _ in 0..200 {
            let text = random_date(&mut rng, start, end).unwrap();
            let parsed = NaiveDateTime::parse_from_str(&text, DATE_FORMAT).unwrap();
            assert!(parsed >= start && parsed <= end, "{} outside window", text);
        }
    }

    #[test]
    fn test_random_date_zero_width_window() {
        let mut rng = StdRng::seed_from_u64(1);
        let moment = at(2010, 6, 15, 13, 45);
        assert_eq!(random_date(&mut rng, moment, moment).unwrap(), "15/06/2010T13:45");
    }

    #[test]
    fn test_random_date_rejects_inverted_window() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = random_date(&mut rng, at(2014, 1, 1, 0, 0), at(2000, 1, 1, 0, 0)).unwrap_err();
        assert!(matches!(err, RangeError::InvalidRange(_)));
    }
}
