use std::{fs, path::PathBuf};

use chrono::{Datelike, Local};
use clap::Parser;
use indicatif::ProgressStyle;
use miette::{IntoDiagnostic, Result, WrapErr, miette};
use sunchart::{
    FontInventory, FontResolver, Language, LocalizationTable, LocationNames, build_bundles,
    build_series, fonts::BUNDLED_FONTS_DIR,
};
use tracing::{info, info_span};
use tracing_indicatif::{IndicatifLayer, span_ext::IndicatifSpanExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Latitude in degrees, north positive
    #[arg(short = 'a', long, allow_hyphen_values = true)]
    latitude: f64,

    /// Longitude in degrees, east positive
    #[arg(short = 'o', long, allow_hyphen_values = true)]
    longitude: f64,

    /// IANA timezone of the location, e.g. 'Asia/Beirut'
    #[arg(short, long, default_value = "UTC")]
    timezone: String,

    /// Location name shown in the chart title
    #[arg(short, long)]
    name: String,

    /// Arabic spelling of the location name (defaults to --name)
    #[arg(long)]
    name_ar: Option<String>,

    /// Japanese spelling of the location name (defaults to --name)
    #[arg(long)]
    name_ja: Option<String>,

    /// Calendar year (defaults to the current year)
    #[arg(short, long)]
    year: Option<i32>,

    /// Output languages. Can be repeated; defaults to all of them.
    #[arg(short, long)]
    language: Vec<Language>,

    /// Directory with bundled .ttf/.otf fonts
    #[arg(long, default_value = BUNDLED_FONTS_DIR)]
    fonts_dir: PathBuf,

    /// Only use bundled fonts.
    #[arg(long, default_value_t = false)]
    no_system_fonts: bool,

    /// Output directory
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    let indicatif_layer = IndicatifLayer::new();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sunchart=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .init();

    let cli = Cli::parse();

    let year = cli.year.unwrap_or_else(|| Local::now().year());
    let languages = if cli.language.is_empty() {
        Language::ALL.to_vec()
    } else {
        cli.language.clone()
    };

    info!(
        "Location: {} ({:.4}, {:.4}), timezone {}",
        cli.name, cli.latitude, cli.longitude, cli.timezone
    );

    let series = build_series(year, cli.latitude, cli.longitude, &cli.timezone)
        .into_diagnostic()
        .wrap_err("Failed to calculate sun times")?;

    if series.valid_days() == 0 {
        return Err(miette!(
            "Could not calculate sun times for {}: the sun does not rise and set there in {}",
            cli.name,
            year
        ));
    }

    let inventory = FontInventory::discover(&cli.fonts_dir, !cli.no_system_fonts);
    let fonts = FontResolver::new(&inventory);
    let table = LocalizationTable::new();

    let names = LocationNames {
        default: cli.name.clone(),
        arabic: cli.name_ar.clone(),
        japanese: cli.name_ja.clone(),
    };

    let bundles = build_bundles(&languages, &names, &series, &table, &fonts);

    if !cli.out_dir.exists() {
        fs::create_dir_all(&cli.out_dir)
            .into_diagnostic()
            .wrap_err_with(|| miette!("Failed to create out-dir: {:?}", cli.out_dir))?;
    }

    let outputs_span = info_span!("write_chart_bundles");
    outputs_span.pb_set_style(
        &ProgressStyle::with_template("{msg} [{wide_bar:.cyan/blue}] {pos}/{len}")
            .into_diagnostic()?,
    );
    outputs_span.pb_set_length(bundles.len() as u64);
    outputs_span.pb_set_message("Writing charts");

    let outputs_span_enter = outputs_span.enter();

    for bundle in &bundles {
        outputs_span.pb_inc(1);
        outputs_span.pb_set_message(&format!("Writing {} chart", bundle.language));

        let path = bundle
            .write_json(&cli.out_dir, &names)
            .into_diagnostic()
            .wrap_err_with(|| miette!("Failed to write {} chart", bundle.language))?;

        info!("Wrote {:?} (font: {})", path, bundle.font_family);
    }

    drop(outputs_span_enter);
    drop(outputs_span);

    info!("Done.");

    Ok(())
}
