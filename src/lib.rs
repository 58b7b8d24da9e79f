pub mod chart;
pub mod error;
pub mod fonts;
pub mod labels;
pub mod language;
pub mod locale;
pub mod series;
pub mod solar;
pub mod text;

pub use chart::{ChartAxes, ChartBundle, ChartStyle, LocationNames, build_bundle, build_bundles};
pub use error::{Error, Result};
pub use fonts::{FontFamily, FontInventory, FontResolver, resolve_font};
pub use labels::{ChartLabelPipeline, DisplayStringSet, Tick, build_display_strings};
pub use language::Language;
pub use locale::{LabelSet, LocalizationTable};
pub use series::{DaySunRecord, SunSeries, SunSeriesBuilder, build_series};
pub use solar::{NoaaCalculator, SunEventSource, SunEvents};
pub use text::{format_numeral_string, shape_arabic};
