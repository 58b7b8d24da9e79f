//! Everything the renderer needs for one chart.
//!
//! The series is computed once and borrowed by every language's bundle; the
//! per-language work runs on the rayon pool.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Datelike;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info_span};

use crate::{
    error::Result,
    fonts::{FontFamily, FontResolver},
    labels::{ChartLabelPipeline, DisplayStringSet, HOUR_TICKS},
    language::Language,
    locale::LocalizationTable,
    series::SunSeries,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartStyle {
    pub sunrise_color: &'static str,
    pub noon_color: &'static str,
    pub sunset_color: &'static str,
    pub grid_color: &'static str,
    pub background_color: &'static str,
    /// Width and height in inches.
    pub figure_size: (f64, f64),
    pub dpi: u32,
    pub line_width: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            sunrise_color: "#FFA500",
            noon_color: "#FFD700",
            sunset_color: "#DC143C",
            grid_color: "#D3D3D3",
            background_color: "#FFFFFF",
            figure_size: (14.0, 8.0),
            dpi: 100,
            line_width: 2.5,
        }
    }
}

/// Axis layout: time of day runs downwards from 00:00 to 24:00.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartAxes {
    /// (top, bottom) of the y axis in hours.
    pub y_range: (f64, f64),
    pub y_inverted: bool,
    pub hour_gridlines: Vec<u32>,
    /// Series indices of the 1st and 15th of every month.
    pub day_gridlines: Vec<u32>,
}

impl ChartAxes {
    pub fn for_series(series: &SunSeries) -> Self {
        Self {
            y_range: (0.0, 24.0),
            y_inverted: true,
            hour_gridlines: HOUR_TICKS.collect(),
            day_gridlines: day_gridlines(series),
        }
    }
}

pub fn day_gridlines(series: &SunSeries) -> Vec<u32> {
    series
        .iter()
        .enumerate()
        .filter(|(_, record)| matches!(record.date.day(), 1 | 15))
        .filter_map(|(idx, _)| u32::try_from(idx).ok())
        .collect()
}

/// The location name as known in each output language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationNames {
    pub default: String,
    pub arabic: Option<String>,
    pub japanese: Option<String>,
}

impl LocationNames {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            arabic: None,
            japanese: None,
        }
    }

    pub fn for_language(&self, language: Language) -> &str {
        let localized = match language {
            Language::English => None,
            Language::Arabic => self.arabic.as_deref(),
            Language::Japanese => self.japanese.as_deref(),
        };

        localized.unwrap_or(&self.default)
    }
}

/// Series, display strings and font family for one language.
#[derive(Debug, Clone, Serialize)]
pub struct ChartBundle<'a> {
    pub language: Language,
    pub font_family: FontFamily,
    pub strings: DisplayStringSet,
    pub axes: ChartAxes,
    pub style: ChartStyle,
    pub series: &'a SunSeries,
}

impl ChartBundle<'_> {
    /// Write the bundle as pretty JSON into `dir`, returning the file path.
    pub fn write_json(&self, dir: &Path, names: &LocationNames) -> Result<PathBuf> {
        let path = dir.join(format!(
            "{}.json",
            output_stem(names.for_language(self.language), self.series.year, self.language)
        ));

        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)?;

        Ok(path)
    }
}

pub fn build_bundle<'a>(
    language: Language,
    location_name: &str,
    series: &'a SunSeries,
    table: &LocalizationTable,
    fonts: &FontResolver,
) -> ChartBundle<'a> {
    let span = info_span!("build_bundle", %language);
    let _enter = span.enter();

    let strings = ChartLabelPipeline::new(table).build(language, location_name, series.year, series);
    let font_family = fonts.family(language).clone();

    debug!("Built {} labels with font {}", language, font_family);

    ChartBundle {
        language,
        font_family,
        strings,
        axes: ChartAxes::for_series(series),
        style: ChartStyle::default(),
        series,
    }
}

/// Build one bundle per language in parallel, returned in `languages` order.
pub fn build_bundles<'a>(
    languages: &[Language],
    names: &LocationNames,
    series: &'a SunSeries,
    table: &LocalizationTable,
    fonts: &FontResolver,
) -> Vec<ChartBundle<'a>> {
    languages
        .par_iter()
        .map(|&language| build_bundle(language, names.for_language(language), series, table, fonts))
        .collect()
}

/// Replace characters unsafe in file names and join words with `_`.
pub fn sanitize_filename(name: &str) -> String {
    const INVALID: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*', ','];

    let replaced: String = name
        .chars()
        .map(|c| if INVALID.contains(&c) { '_' } else { c })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join("_")
}

/// `sunrise_sunset_<location>_<year>` plus a language suffix for non-English charts.
pub fn output_stem(location_name: &str, year: i32, language: Language) -> String {
    let base = format!("sunrise_sunset_{}_{}", sanitize_filename(location_name), year);

    match language.file_suffix() {
        Some(suffix) => format!("{base}_{suffix}"),
        None => base,
    }
}
