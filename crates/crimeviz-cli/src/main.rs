//! Crimeviz - Command Line Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

use crimeviz_charts::{
    CategoryTrendsChart, ChartRenderer, HourlyPolarChart, MonthHeatmapChart, YearlyHeatMapChart,
};
use crimeviz_common::{init_logging, LoggingConfig};
use crimeviz_config::{Config, ConfigLoader};
use crimeviz_data::{
    dense_hourly_counts, dense_monthly_counts, heat_frames, load_incidents,
    monthly_category_series, top_categories, Incident,
};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Log level, overriding the configured level
    #[arg(short, long)]
    log_level: Option<String>,
}

/// Merge the configured logging section with the CLI-level override
fn logging_settings(
    cli_level: Option<&str>,
    config: &crimeviz_config::LoggingConfig,
) -> LoggingConfig {
    LoggingConfig {
        level: cli_level.unwrap_or(&config.level).to_string(),
        pretty_format: config.colored,
        file_path: config.file.clone(),
        ..Default::default()
    }
}

/// Title-case a category label for chart headings
fn title_case(category: &str) -> String {
    category
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

async fn run_trends(config: &Config, incidents: &[Incident], out_dir: &Path) -> Result<()> {
    let categories = top_categories(incidents, config.trends.top_n);
    info!(categories = ?categories, "Selected top categories for trends chart");

    let series = monthly_category_series(incidents, &categories);

    let (mut chart, mut chart_config) = CategoryTrendsChart::with_config(
        &config.trends.title,
        Some("Date"),
        Some("Number of Incidents"),
    );
    chart_config.width = config.trends.width;
    chart_config.height = config.trends.height;
    chart.set_series(series);
    chart.set_highlight(config.trends.highlight_category.clone());

    let path = out_dir.join(&config.trends.file_name);
    chart
        .render_to_file(&chart_config, &path)
        .await
        .with_context(|| format!("rendering {}", chart.name()))?;
    Ok(())
}

async fn run_heat_map(config: &Config, incidents: &[Incident], out_dir: &Path) -> Result<()> {
    let settings = &config.heat_map;
    let frames = heat_frames(
        incidents,
        settings.category.as_deref(),
        settings.start_year,
        settings.end_year,
    );
    let mapped: usize = frames.frames.iter().map(Vec::len).sum();
    info!(
        frames = frames.frames.len(),
        records = mapped,
        "Built heat map frames"
    );

    let (mut chart, chart_config) = YearlyHeatMapChart::with_config(
        "Crime Heat Map Over Time",
        frames,
        (settings.center_latitude, settings.center_longitude),
        settings.zoom,
    );
    chart.radius = settings.radius;
    chart.max_opacity = settings.max_opacity;
    chart.auto_play = settings.auto_play;

    let path = out_dir.join(&settings.file_name);
    chart
        .render_to_file(&chart_config, &path)
        .await
        .with_context(|| format!("rendering {}", chart.name()))?;
    Ok(())
}

async fn run_month_heatmap(config: &Config, incidents: &[Incident], out_dir: &Path) -> Result<()> {
    let settings = &config.month_heatmap;
    let cells = dense_monthly_counts(
        incidents,
        &settings.category,
        settings.start_year,
        settings.end_year,
    );

    let title = format!("{} Heatmap", title_case(&settings.category));
    let (mut chart, mut chart_config) =
        MonthHeatmapChart::with_config(&title, settings.start_year, settings.end_year);
    chart_config.width = settings.width;
    chart_config.height = settings.height;
    chart.set_cells(cells);

    let path = out_dir.join(&settings.file_name);
    chart
        .render_to_file(&chart_config, &path)
        .await
        .with_context(|| format!("rendering {}", chart.name()))?;
    Ok(())
}

async fn run_polar(config: &Config, incidents: &[Incident], out_dir: &Path) -> Result<()> {
    let settings = &config.polar;
    let years = dense_hourly_counts(
        incidents,
        &settings.category,
        settings.start_year,
        settings.end_year,
    )?;

    let title = format!("{} by Time of Day", title_case(&settings.category));
    let (mut chart, chart_config) = HourlyPolarChart::with_config(&title, settings.max_radius);
    chart.set_years(years);

    let path = out_dir.join(&settings.file_name);
    chart
        .render_to_file(&chart_config, &path)
        .await
        .with_context(|| format!("rendering {}", chart.name()))?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration first so its logging section can take effect
    let config = match args.config {
        Some(path) => ConfigLoader::load_from_file(&path)?,
        None => ConfigLoader::load()?,
    };

    init_logging(logging_settings(args.log_level.as_deref(), &config.logging))
        .map_err(|err| anyhow::anyhow!("failed to initialize logging: {err}"))?;

    info!("Starting crimeviz chart pipelines");
    info!("Configuration loaded successfully");

    let out_dir = PathBuf::from(&config.output.dir);
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output directory '{}'", out_dir.display()))?;

    // The dataset is loaded once and shared by all four pipelines
    let incidents = load_incidents(&config.data.csv_path)?;
    info!(
        records = incidents.len(),
        path = %config.data.csv_path,
        "Loaded incident dataset"
    );

    run_trends(&config, &incidents, &out_dir).await?;
    run_heat_map(&config, &incidents, &out_dir).await?;
    run_month_heatmap(&config, &incidents, &out_dir).await?;
    run_polar(&config, &incidents, &out_dir).await?;

    info!("All chart pipelines completed");
    Ok(())
}
