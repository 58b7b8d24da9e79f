use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use crate::{
    error::{Error, Result},
    solar::{NoaaCalculator, SunEventSource, SunEvents},
};

/// Sun events of one calendar day. Events are either all present or all absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DaySunRecord {
    pub date: NaiveDate,
    pub sunrise: Option<NaiveTime>,
    pub noon: Option<NaiveTime>,
    pub sunset: Option<NaiveTime>,
    pub is_polar_event: bool,
}

impl DaySunRecord {
    fn regular(date: NaiveDate, sunrise: NaiveTime, noon: NaiveTime, sunset: NaiveTime) -> Self {
        Self {
            date,
            sunrise: Some(sunrise),
            noon: Some(noon),
            sunset: Some(sunset),
            is_polar_event: false,
        }
    }

    fn absent(date: NaiveDate, is_polar_event: bool) -> Self {
        Self {
            date,
            sunrise: None,
            noon: None,
            sunset: None,
            is_polar_event,
        }
    }

    pub fn has_events(&self) -> bool {
        self.sunrise.is_some() && self.noon.is_some() && self.sunset.is_some()
    }
}

/// One record per day of a calendar year, in date order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SunSeries {
    pub year: i32,
    pub records: Vec<DaySunRecord>,
}

impl SunSeries {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DaySunRecord> {
        self.records.iter()
    }

    /// Days with all three events.
    pub fn valid_days(&self) -> usize {
        self.records.iter().filter(|r| r.has_events()).count()
    }

    pub fn polar_days(&self) -> usize {
        self.records.iter().filter(|r| r.is_polar_event).count()
    }

    pub fn sunrise_hours(&self) -> Vec<Option<f64>> {
        self.records.iter().map(|r| r.sunrise.map(decimal_hours)).collect()
    }

    pub fn noon_hours(&self) -> Vec<Option<f64>> {
        self.records.iter().map(|r| r.noon.map(decimal_hours)).collect()
    }

    pub fn sunset_hours(&self) -> Vec<Option<f64>> {
        self.records.iter().map(|r| r.sunset.map(decimal_hours)).collect()
    }
}

impl<'a> IntoIterator for &'a SunSeries {
    type Item = &'a DaySunRecord;
    type IntoIter = std::slice::Iter<'a, DaySunRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

pub fn validate_coordinates(latitude: f64, longitude: f64) -> bool {
    (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude)
}

/// Time of day as fractional hours, e.g. 06:30 -> 6.5.
pub fn decimal_hours(time: NaiveTime) -> f64 {
    time.hour() as f64 + time.minute() as f64 / 60.0 + time.second() as f64 / 3600.0
}

/// Fractional hours as `HH:MM`, truncating seconds.
pub fn format_time(hours: f64) -> String {
    let h = hours.trunc() as i64;
    let m = ((hours - h as f64) * 60.0).trunc() as i64;
    format!("{h:02}:{m:02}")
}

/// Computes a [`SunSeries`] by asking a [`SunEventSource`] about each day.
#[derive(Debug, Clone, Default)]
pub struct SunSeriesBuilder<S = NoaaCalculator> {
    source: S,
}

impl SunSeriesBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: SunEventSource> SunSeriesBuilder<S> {
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Build the series for every day of `year`.
    ///
    /// Coordinates and timezone are validated before any day is computed. A day
    /// that cannot be computed is recorded without events; it never aborts the
    /// year.
    pub fn build(&self, year: i32, latitude: f64, longitude: f64, timezone: &str) -> Result<SunSeries> {
        if !validate_coordinates(latitude, longitude) {
            return Err(Error::InvalidLocation {
                latitude,
                longitude,
            });
        }

        let tz: Tz = timezone
            .parse()
            .map_err(|_| Error::InvalidTimezone(timezone.to_string()))?;

        let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(Error::InvalidYear(year))?;

        let span = info_span!("build_series", year, latitude, longitude, %tz);
        let _enter = span.enter();

        let records: Vec<DaySunRecord> = first
            .iter_days()
            .take_while(|date| date.year() == year)
            .map(|date| match self.source.sun_events(date, latitude, longitude, tz) {
                Ok(SunEvents::Regular(times)) => {
                    DaySunRecord::regular(date, times.sunrise, times.noon, times.sunset)
                }
                Ok(SunEvents::Polar(kind)) => {
                    debug!("No sunrise or sunset on {date}: {kind:?}");
                    DaySunRecord::absent(date, true)
                }
                Err(e) => {
                    warn!("Cannot calculate sun times for {date}: {e:#}");
                    DaySunRecord::absent(date, false)
                }
            })
            .collect();

        let series = SunSeries { year, records };

        info!(
            "Calculated sun times for {} days ({} with valid data, {} polar)",
            series.len(),
            series.valid_days(),
            series.polar_days()
        );

        Ok(series)
    }
}

/// [`SunSeriesBuilder::build`] with the default calculator.
pub fn build_series(year: i32, latitude: f64, longitude: f64, timezone: &str) -> Result<SunSeries> {
    SunSeriesBuilder::new().build(year, latitude, longitude, timezone)
}
