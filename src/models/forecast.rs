use crate::models::random_source::{RandomSource, RandomSourceError};
use chrono::{Days, NaiveDate};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

pub const FORECAST_DAYS: u64 = 50;
pub const MIN_TEMPERATURE_CELSIUS: i32 = -20;
pub const MAX_TEMPERATURE_CELSIUS: i32 = 35;

// Approximation of 5/9. Consumers rely on the exact output, keep it.
const CELSIUS_PER_FAHRENHEIT_DEGREE: f64 = 0.5556;

/// Forecast labels, ordered from coldest to hottest.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Summary {
    Freezing,
    Bracing,
    Chilly,
    Cool,
    Mild,
    Warm,
    Balmy,
    Hot,
    Sweltering,
    Scorching,
}

impl Summary {
    pub const ALL: [Summary; 10] = [
        Summary::Freezing,
        Summary::Bracing,
        Summary::Chilly,
        Summary::Cool,
        Summary::Mild,
        Summary::Warm,
        Summary::Balmy,
        Summary::Hot,
        Summary::Sweltering,
        Summary::Scorching,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Summary::Freezing => "Freezing",
            Summary::Bracing => "Bracing",
            Summary::Chilly => "Chilly",
            Summary::Cool => "Cool",
            Summary::Mild => "Mild",
            Summary::Warm => "Warm",
            Summary::Balmy => "Balmy",
            Summary::Hot => "Hot",
            Summary::Sweltering => "Sweltering",
            Summary::Scorching => "Scorching",
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One day of synthetic weather.
///
/// The Fahrenheit temperature is not stored, see [`ForecastRecord::temperature_fahrenheit`].
/// It is still part of the serialized form, and ignored when deserializing.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRecord {
    pub date: NaiveDate,
    pub temperature_celsius: i32,
    pub summary: Summary,
}

impl ForecastRecord {
    pub fn temperature_fahrenheit(&self) -> i32 {
        fahrenheit_from_celsius(self.temperature_celsius)
    }
}

impl Serialize for ForecastRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut record = serializer.serialize_struct("ForecastRecord", 4)?;
        record.serialize_field("date", &self.date)?;
        record.serialize_field("temperatureCelsius", &self.temperature_celsius)?;
        record.serialize_field("summary", &self.summary)?;
        record.serialize_field("temperatureFahrenheit", &self.temperature_fahrenheit())?;
        record.end()
    }
}

/// `32 + c / 0.5556`, truncated toward zero after the division.
///
/// This is not the exact `c * 9 / 5 + 32`: 5 °C gives 40, not 41.
pub fn fahrenheit_from_celsius(celsius: i32) -> i32 {
    32 + (celsius as f64 / CELSIUS_PER_FAHRENHEIT_DEGREE) as i32
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ForecastError {
    #[error(transparent)]
    RandomSource(#[from] RandomSourceError),
    #[error("no calendar date {offset} days after {today}")]
    DateOutOfRange { today: NaiveDate, offset: u64 },
}

/// Forecasts for the [`FORECAST_DAYS`] days following `today`, in date order.
///
/// Each record draws its temperature and then its summary from `source`,
/// independently of all other records. A failing source aborts generation.
pub fn generate<R>(today: NaiveDate, source: &mut R) -> Result<Vec<ForecastRecord>, ForecastError>
where
    R: RandomSource,
{
    (1..=FORECAST_DAYS)
        .map(|offset| -> Result<ForecastRecord, ForecastError> {
            let date = today
                .checked_add_days(Days::new(offset))
                .ok_or(ForecastError::DateOutOfRange { today, offset })?;
            let temperature_celsius =
                source.int_in_range(MIN_TEMPERATURE_CELSIUS..=MAX_TEMPERATURE_CELSIUS)?;
            let summary = *source.pick(&Summary::ALL)?;
            Ok(ForecastRecord {
                date,
                temperature_celsius,
                summary,
            })
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Hands out a fixed number of draws and then runs dry.
    struct LimitedSource {
        remaining: usize,
    }

    impl RandomSource for LimitedSource {
        fn int_in_range(
            &mut self,
            range: std::ops::RangeInclusive<i32>,
        ) -> Result<i32, RandomSourceError> {
            if self.remaining == 0 {
                return Err(RandomSourceError::Exhausted);
            }
            self.remaining -= 1;
            Ok(*range.start())
        }

        fn pick<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, RandomSourceError> {
            if self.remaining == 0 {
                return Err(RandomSourceError::Exhausted);
            }
            self.remaining -= 1;
            items.last().ok_or(RandomSourceError::Empty)
        }
    }

    fn new_year() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_fahrenheit_from_celsius() {
        assert_eq!(fahrenheit_from_celsius(0), 32);
        assert_eq!(fahrenheit_from_celsius(35), 94);
        assert_eq!(fahrenheit_from_celsius(-20), -3);
        assert_eq!(fahrenheit_from_celsius(1), 33);
        assert_eq!(fahrenheit_from_celsius(-1), 31);
        assert_eq!(fahrenheit_from_celsius(5), 40);
        assert_eq!(fahrenheit_from_celsius(10), 49);
        assert_eq!(fahrenheit_from_celsius(-10), 15);
    }

    #[test]
    fn test_fahrenheit_truncates_toward_zero() {
        for celsius in MIN_TEMPERATURE_CELSIUS..=MAX_TEMPERATURE_CELSIUS {
            let exact = celsius as f64 / 0.5556;
            assert_eq!(
                fahrenheit_from_celsius(celsius),
                32 + exact.trunc() as i32,
                "celsius {}",
                celsius
            );
        }
    }

    #[test]
    fn test_generate_produces_consecutive_days() {
        let mut rng = StdRng::seed_from_u64(1);
        let forecast = generate(new_year(), &mut rng).unwrap();
        assert_eq!(forecast.len(), FORECAST_DAYS as usize);
        assert_eq!(
            forecast[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
        assert_eq!(
            forecast[49].date,
            NaiveDate::from_ymd_opt(2024, 2, 20).unwrap()
        );
        for (i, record) in forecast.iter().enumerate() {
            assert_eq!(
                record.date,
                new_year() + Days::new(i as u64 + 1),
                "record {}",
                i
            );
        }
    }

    #[test]
    fn test_generate_respects_ranges() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            for record in generate(new_year(), &mut rng).unwrap() {
                assert!(
                    (MIN_TEMPERATURE_CELSIUS..=MAX_TEMPERATURE_CELSIUS)
                        .contains(&record.temperature_celsius)
                );
                assert!(Summary::ALL.contains(&record.summary));
                assert_eq!(
                    record.temperature_fahrenheit(),
                    fahrenheit_from_celsius(record.temperature_celsius)
                );
            }
        }
    }

    #[test]
    fn test_generate_is_reproducible_with_seed() {
        let first = generate(new_year(), &mut StdRng::seed_from_u64(1234)).unwrap();
        let second = generate(new_year(), &mut StdRng::seed_from_u64(1234)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_temperatures_are_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut counts = [0usize; (MAX_TEMPERATURE_CELSIUS - MIN_TEMPERATURE_CELSIUS + 1) as usize];
        let runs = 2000;
        for _ in 0..runs {
            for record in generate(new_year(), &mut rng).unwrap() {
                counts[(record.temperature_celsius - MIN_TEMPERATURE_CELSIUS) as usize] += 1;
            }
        }
        let expected = (runs * FORECAST_DAYS as usize) as f64 / counts.len() as f64;
        for (i, count) in counts.iter().enumerate() {
            let deviation = (*count as f64 - expected).abs() / expected;
            assert!(
                deviation < 0.25,
                "{} °C drawn {} times, expected about {}",
                i as i32 + MIN_TEMPERATURE_CELSIUS,
                count,
                expected
            );
        }
    }

    #[test]
    fn test_summaries_are_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut counts = [0usize; 10];
        let runs = 2000;
        for _ in 0..runs {
            for record in generate(new_year(), &mut rng).unwrap() {
                let index = Summary::ALL
                    .iter()
                    .position(|summary| *summary == record.summary)
                    .unwrap();
                counts[index] += 1;
            }
        }
        let expected = (runs * FORECAST_DAYS as usize) as f64 / counts.len() as f64;
        for (summary, count) in Summary::ALL.iter().zip(counts) {
            let deviation = (count as f64 - expected).abs() / expected;
            assert!(
                deviation < 0.1,
                "{} picked {} times, expected about {}",
                summary,
                count,
                expected
            );
        }
    }

    #[test]
    fn test_exhausted_source_propagates() {
        // Enough for three full records and the temperature of a fourth.
        let mut source = LimitedSource { remaining: 7 };
        assert_eq!(
            generate(new_year(), &mut source),
            Err(ForecastError::RandomSource(RandomSourceError::Exhausted))
        );
        assert_eq!(source.remaining, 0);
    }

    #[test]
    fn test_generate_uses_source_draws() {
        let mut source = LimitedSource { remaining: 100 };
        let forecast = generate(new_year(), &mut source).unwrap();
        assert!(forecast.iter().all(|record| {
            record.temperature_celsius == MIN_TEMPERATURE_CELSIUS
                && record.summary == Summary::Scorching
        }));
    }

    #[test]
    fn test_generate_near_end_of_calendar() {
        let today = NaiveDate::MAX - Days::new(10);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            generate(today, &mut rng),
            Err(ForecastError::DateOutOfRange { today, offset: 11 })
        );
    }

    #[test]
    fn test_serialized_record() {
        let record = ForecastRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            temperature_celsius: -20,
            summary: Summary::Freezing,
        };
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"date":"2024-01-02","temperatureCelsius":-20,"summary":"Freezing","temperatureFahrenheit":-3}"#
        );
    }

    #[test]
    fn test_deserialize_recomputes_fahrenheit() {
        let record: ForecastRecord = serde_json::from_str(
            r#"{"date":"2024-01-02","temperatureCelsius":35,"summary":"Scorching","temperatureFahrenheit":0}"#,
        )
        .unwrap();
        assert_eq!(record.temperature_fahrenheit(), 94);
        assert_eq!(record.summary, Summary::Scorching);
    }

    #[test]
    fn test_summary_labels() {
        let labels: Vec<String> = Summary::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(
            labels,
            vec![
                "Freezing",
                "Bracing",
                "Chilly",
                "Cool",
                "Mild",
                "Warm",
                "Balmy",
                "Hot",
                "Sweltering",
                "Scorching"
            ]
        );
    }
}
