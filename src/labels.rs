//! Renderer-ready strings for one language.

use chrono::Datelike;
use serde::Serialize;

use crate::{
    language::Language,
    locale::{LabelSet, LocalizationTable},
    series::SunSeries,
    text::{format_numeral_string, shape_arabic},
};

/// Hours labelled on the time-of-day axis, 00:00 through 24:00.
pub const HOUR_TICKS: std::ops::RangeInclusive<u32> = 0..=24;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    /// Day index into the series for month ticks, hour for time ticks.
    pub position: u32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayStringSet {
    pub language: Language,
    pub title: String,
    pub location_name: String,
    pub x_axis_label: String,
    pub y_axis_label: String,
    pub legend_sunrise: String,
    pub legend_noon: String,
    pub legend_sunset: String,
    /// One tick on the first day of every month present in the series.
    pub month_ticks: Vec<Tick>,
    pub hour_ticks: Vec<Tick>,
}

/// Turns [`LabelSet`] entries and series dates into display strings.
#[derive(Debug, Clone, Copy)]
pub struct ChartLabelPipeline<'a> {
    table: &'a LocalizationTable,
}

impl<'a> ChartLabelPipeline<'a> {
    pub fn new(table: &'a LocalizationTable) -> Self {
        Self { table }
    }

    pub fn build(
        &self,
        language: Language,
        location_name: &str,
        year: i32,
        series: &SunSeries,
    ) -> DisplayStringSet {
        let labels = self.table.labels(language);

        DisplayStringSet {
            language,
            title: title(language, labels, location_name, year),
            location_name: match language {
                Language::Arabic => shape_arabic(location_name),
                Language::English | Language::Japanese => location_name.to_string(),
            },
            x_axis_label: localize(language, labels.x_axis_label),
            y_axis_label: localize(language, labels.y_axis_label),
            legend_sunrise: localize(language, labels.legend_sunrise),
            legend_noon: localize(language, labels.legend_noon),
            legend_sunset: localize(language, labels.legend_sunset),
            month_ticks: month_ticks(language, labels, series),
            hour_ticks: HOUR_TICKS
                .map(|hour| Tick {
                    position: hour,
                    label: localize(language, &format!("{hour:02}:00")),
                })
                .collect(),
        }
    }
}

/// Build display strings with the built-in [`LocalizationTable`].
pub fn build_display_strings(
    language: Language,
    location_name: &str,
    year: i32,
    series: &SunSeries,
) -> DisplayStringSet {
    ChartLabelPipeline::new(&LocalizationTable::default()).build(language, location_name, year, series)
}

/// Numeral conversion, then shaping for Arabic.
fn localize(language: Language, text: &str) -> String {
    let text = format_numeral_string(text, language);

    match language {
        Language::Arabic => shape_arabic(&text),
        Language::English | Language::Japanese => text,
    }
}

/// The location is inserted verbatim; only the template and year get numeral
/// conversion. Arabic titles are shaped as a whole so the location reads in
/// its place within the right-to-left line.
fn title(language: Language, labels: &LabelSet, location_name: &str, year: i32) -> String {
    let template = format_numeral_string(labels.title, language);
    let year = format_numeral_string(&year.to_string(), language);
    let title = LabelSet::format_title(&template, location_name, &year);

    match language {
        Language::Arabic => shape_arabic(&title),
        Language::English | Language::Japanese => title,
    }
}

fn month_ticks(language: Language, labels: &LabelSet, series: &SunSeries) -> Vec<Tick> {
    series
        .iter()
        .enumerate()
        .filter(|(_, record)| record.date.day() == 1)
        .filter_map(|(idx, record)| {
            let name = labels.month_name(record.date.month())?;

            Some(Tick {
                position: u32::try_from(idx).ok()?,
                label: localize(language, name),
            })
        })
        .collect()
}
