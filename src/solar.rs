//! Daily sun events for a location.
//!
//! [`SunEventSource`] is the seam the series builder calls once per day.
//! [`NoaaCalculator`] is the default implementation, using the NOAA general
//! solar position approximation (fractional-year equation of time and
//! declination), accurate to about a minute at mid latitudes.

use std::f64::consts::PI;

use anyhow::{Context, Result, bail};
use chrono::{Datelike, NaiveDate, NaiveTime, TimeDelta, TimeZone};
use chrono_tz::Tz;

/// Zenith angle of the sun's centre at sunrise/sunset, including refraction
/// and the solar disc radius.
pub const SUNRISE_ZENITH_DEGREES: f64 = 90.833;

const MINUTES_PER_DEGREE: f64 = 4.0;
const NOON_MINUTES: f64 = 720.0;

/// Local times of one day's sun events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunTimes {
    pub sunrise: NaiveTime,
    pub noon: NaiveTime,
    pub sunset: NaiveTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolarKind {
    /// The sun stays above the horizon all day.
    MidnightSun,
    /// The sun stays below the horizon all day.
    PolarNight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SunEvents {
    Regular(SunTimes),
    Polar(PolarKind),
}

/// Per-day sun event computation.
pub trait SunEventSource: Send + Sync {
    /// Events of `date` at the given location, as local times in `tz`.
    fn sun_events(&self, date: NaiveDate, latitude: f64, longitude: f64, tz: Tz)
    -> Result<SunEvents>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoaaCalculator;

/// Fractional year at local noon, in radians.
pub fn fractional_year(date: NaiveDate) -> f64 {
    let days = if date.leap_year() { 366.0 } else { 365.0 };
    2.0 * PI / days * (date.ordinal0() as f64)
}

/// Equation of time in minutes.
pub fn equation_of_time(gamma: f64) -> f64 {
    229.18
        * (0.000075 + 0.001868 * gamma.cos()
            - 0.032077 * gamma.sin()
            - 0.014615 * (2.0 * gamma).cos()
            - 0.040849 * (2.0 * gamma).sin())
}

/// Solar declination in radians.
pub fn solar_declination(gamma: f64) -> f64 {
    0.006918 - 0.399912 * gamma.cos() + 0.070257 * gamma.sin() - 0.006758 * (2.0 * gamma).cos()
        + 0.000907 * (2.0 * gamma).sin()
        - 0.002697 * (3.0 * gamma).cos()
        + 0.00148 * (3.0 * gamma).sin()
}

/// Cosine of the sunrise hour angle. Outside [-1, 1] the sun never crosses the horizon.
pub fn cos_sunrise_hour_angle(latitude: f64, declination: f64) -> f64 {
    let lat = latitude.to_radians();
    SUNRISE_ZENITH_DEGREES.to_radians().cos() / (lat.cos() * declination.cos())
        - lat.tan() * declination.tan()
}

/// Convert minutes after UTC midnight of `date` to local wall-clock time.
fn local_time(date: NaiveDate, utc_minutes: f64, tz: Tz) -> Result<NaiveTime> {
    if !utc_minutes.is_finite() {
        bail!("Non-finite event time for {date}");
    }

    let seconds = (utc_minutes * 60.0).round() as i64;
    let offset = TimeDelta::try_seconds(seconds).context("Event offset out of range")?;
    let utc = date
        .and_time(NaiveTime::MIN)
        .checked_add_signed(offset)
        .context("Event time out of range")?;

    Ok(tz.from_utc_datetime(&utc).time())
}

impl SunEventSource for NoaaCalculator {
    fn sun_events(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
        tz: Tz,
    ) -> Result<SunEvents> {
        let gamma = fractional_year(date);
        let eot = equation_of_time(gamma);
        let declination = solar_declination(gamma);
        let cos_ha = cos_sunrise_hour_angle(latitude, declination);

        if cos_ha.is_nan() {
            bail!("Hour angle undefined at latitude {latitude} on {date}");
        }
        if cos_ha < -1.0 {
            return Ok(SunEvents::Polar(PolarKind::MidnightSun));
        }
        if cos_ha > 1.0 {
            return Ok(SunEvents::Polar(PolarKind::PolarNight));
        }

        let ha = cos_ha.acos().to_degrees();
        let noon = NOON_MINUTES - MINUTES_PER_DEGREE * longitude - eot;

        Ok(SunEvents::Regular(SunTimes {
            sunrise: local_time(date, noon - MINUTES_PER_DEGREE * ha, tz)?,
            noon: local_time(date, noon, tz)?,
            sunset: local_time(date, noon + MINUTES_PER_DEGREE * ha, tz)?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_declination_extremes() {
        let june = solar_declination(fractional_year(date(2025, 6, 21))).to_degrees();
        let december = solar_declination(fractional_year(date(2025, 12, 21))).to_degrees();

        assert!((june - 23.44).abs() < 0.3, "june={june}");
        assert!((december + 23.44).abs() < 0.3, "december={december}");
    }

    #[test]
    fn test_equation_of_time_known_values() {
        // about -14 minutes mid February, +16 minutes early November
        let feb = equation_of_time(fractional_year(date(2025, 2, 11)));
        let nov = equation_of_time(fractional_year(date(2025, 11, 3)));

        assert!((feb + 14.2).abs() < 0.5, "feb={feb}");
        assert!((nov - 16.4).abs() < 0.5, "nov={nov}");
    }

    #[test]
    fn test_beirut_new_year() -> Result<()> {
        let events = NoaaCalculator.sun_events(date(2025, 1, 1), 33.8886, 35.4955, Tz::Asia__Beirut)?;

        let SunEvents::Regular(times) = events else {
            panic!("expected regular day, got {events:?}");
        };

        assert!(times.sunrise > hm(6, 30) && times.sunrise < hm(7, 0), "{times:?}");
        assert!(times.noon > hm(11, 30) && times.noon < hm(12, 0), "{times:?}");
        assert!(times.sunset > hm(16, 30) && times.sunset < hm(17, 0), "{times:?}");

        Ok(())
    }

    #[test]
    fn test_daylight_saving_shifts_local_time() -> Result<()> {
        let SunEvents::Regular(times) =
            NoaaCalculator.sun_events(date(2025, 7, 1), 51.5074, -0.1278, Tz::Europe__London)?
        else {
            panic!("expected regular day");
        };

        // BST: solar noon around 13:04 local
        assert!(times.noon > hm(12, 55) && times.noon < hm(13, 10), "{times:?}");

        Ok(())
    }

    #[test]
    fn test_polar_day_and_night() -> Result<()> {
        let tromso = (69.6492, 18.9553);

        assert_eq!(
            NoaaCalculator.sun_events(date(2025, 6, 21), tromso.0, tromso.1, Tz::Europe__Oslo)?,
            SunEvents::Polar(PolarKind::MidnightSun)
        );
        assert_eq!(
            NoaaCalculator.sun_events(date(2025, 12, 21), tromso.0, tromso.1, Tz::Europe__Oslo)?,
            SunEvents::Polar(PolarKind::PolarNight)
        );
        assert!(matches!(
            NoaaCalculator.sun_events(date(2025, 3, 21), tromso.0, tromso.1, Tz::Europe__Oslo)?,
            SunEvents::Regular(_)
        ));

        Ok(())
    }
}
