//! Reduction of the provider's 3-hour samples to one summary per calendar day.
//!
//! Days are keyed by the calendar of the timezone passed in, which for the
//! service is the machine's local timezone rather than the city's own.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeZone};
use uuid::Uuid;

use crate::model::{DailyForecast, ForecastItem};

struct DayAccumulator {
    sum: f64,
    count: usize,
    condition: String,
}

/// Group `items` by calendar day in `tz` and average each day's temperature.
///
/// The condition of a day is that of the first sample seen for it in input
/// order. Output is sorted ascending by date, one entry per day present.
pub fn aggregate<Tz: TimeZone>(items: &[ForecastItem], tz: &Tz) -> Vec<DailyForecast> {
    let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();

    for item in items {
        let Some(date) = local_date(item.dt, tz) else {
            tracing::warn!(dt = item.dt, "Skipping forecast sample with out-of-range timestamp");
            continue;
        };

        days.entry(date)
            .and_modify(|acc| {
                acc.sum += item.main.temp;
                acc.count += 1;
            })
            .or_insert_with(|| DayAccumulator {
                sum: item.main.temp,
                count: 1,
                condition: item.condition().to_string(),
            });
    }

    days.into_iter()
        .map(|(date, acc)| DailyForecast {
            id: Uuid::new_v4(),
            date,
            average_temp: acc.sum / acc.count as f64,
            condition: acc.condition,
        })
        .collect()
}

fn local_date<Tz: TimeZone>(ts: i64, tz: &Tz) -> Option<NaiveDate> {
    DateTime::from_timestamp(ts, 0).map(|utc| utc.with_timezone(tz).date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, ForecastMain};
    use chrono::{FixedOffset, Utc};

    fn sample(dt: i64, temp: f64, description: &str) -> ForecastItem {
        ForecastItem {
            dt,
            main: ForecastMain { temp },
            weather: vec![Condition { description: Some(description.to_string()) }],
        }
    }

    fn ts(y: i32, m: u32, d: u32, h: u32) -> i64 {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap().timestamp()
    }

    #[test]
    fn two_days_of_four_samples() {
        let mut items = Vec::new();
        for (i, temp) in [10.0, 12.0, 14.0, 16.0].into_iter().enumerate() {
            items.push(sample(ts(2025, 3, 1, 9 + 3 * i as u32), temp, "clear sky"));
        }
        for (i, temp) in [18.0, 20.0, 22.0, 24.0].into_iter().enumerate() {
            items.push(sample(ts(2025, 3, 2, 9 + 3 * i as u32), temp, "light rain"));
        }

        let days = aggregate(&items, &Utc);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(days[0].average_temp, 13.0);
        assert_eq!(days[0].condition, "clear sky");
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2025, 3, 2).unwrap());
        assert_eq!(days[1].average_temp, 21.0);
        assert_eq!(days[1].condition, "light rain");
    }

    #[test]
    fn empty_series_yields_no_days() {
        assert!(aggregate(&[], &Utc).is_empty());
    }

    #[test]
    fn single_sample_day_averages_to_itself() {
        let days = aggregate(&[sample(ts(2025, 3, 1, 12), 7.5, "mist")], &Utc);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].average_temp, 7.5);
    }

    #[test]
    fn unordered_input_is_sorted_and_condition_follows_input_order() {
        let items = vec![
            sample(ts(2025, 3, 3, 12), 5.0, "snow"),
            sample(ts(2025, 3, 1, 21), 1.0, "fog"),
            sample(ts(2025, 3, 1, 3), 3.0, "clear sky"),
            sample(ts(2025, 3, 3, 0), 7.0, "rain"),
        ];

        let days = aggregate(&items, &Utc);
        let dates: Vec<_> = days.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, ["2025-03-01", "2025-03-03"]);
        assert_eq!(days[0].condition, "fog");
        assert_eq!(days[0].average_temp, 2.0);
        assert_eq!(days[1].condition, "snow");
        assert_eq!(days[1].average_temp, 6.0);
    }

    #[test]
    fn day_boundary_follows_the_given_timezone() {
        // 02:00 UTC on the 2nd is still the 1st five hours west of UTC.
        let items = vec![
            sample(ts(2025, 3, 1, 22), 10.0, "clear sky"),
            sample(ts(2025, 3, 2, 2), 20.0, "clear sky"),
        ];

        assert_eq!(aggregate(&items, &Utc).len(), 2);

        let toronto = FixedOffset::west_opt(5 * 3600).unwrap();
        let days = aggregate(&items, &toronto);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(days[0].average_temp, 15.0);
    }

    #[test]
    fn missing_condition_defaults_to_unknown() {
        let item = ForecastItem {
            dt: ts(2025, 3, 1, 12),
            main: ForecastMain { temp: 4.0 },
            weather: vec![],
        };
        let days = aggregate(&[item], &Utc);
        assert_eq!(days[0].condition, "Unknown");
    }

    #[test]
    fn five_day_series_has_unique_ascending_dates() {
        let start = ts(2025, 3, 1, 0);
        let items: Vec<_> = (0..40)
            .map(|i| sample(start + i * 3 * 3600, i as f64, "few clouds"))
            .collect();

        let days = aggregate(&items, &Utc);
        assert_eq!(days.len(), 5);
        assert!(days.windows(2).all(|w| w[0].date < w[1].date));
        // day 0 holds samples 0..8
        assert_eq!(days[0].average_temp, 3.5);
    }
}
