use beaconscore::{AnalysisConfig, AnalysisResult, BoardAnalyzer, Breakdown, TemplateLibrary};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Beacon Patrol board scorer (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for each pipeline stage.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct AnalysisConfigJson {
    anchor_threshold: f32,
    dedup_radius: f32,
    exclusion_radius: f32,
    min_side: u32,
    max_side: u32,
    min_blue_fraction: f32,
    sample_step: usize,
    min_overlap: f32,
    object_threshold: f32,
    annotate: bool,
    parallel: bool,
}

impl Default for AnalysisConfigJson {
    fn default() -> Self {
        let cfg = AnalysisConfig::default();
        Self {
            anchor_threshold: cfg.anchors.threshold,
            dedup_radius: cfg.anchors.dedup_radius,
            exclusion_radius: cfg.anchors.exclusion_radius,
            min_side: cfg.validation.min_side,
            max_side: cfg.validation.max_side,
            min_blue_fraction: cfg.validation.min_blue_fraction,
            sample_step: cfg.validation.sample_step,
            min_overlap: cfg.adjacency.min_overlap,
            object_threshold: cfg.classify.threshold,
            annotate: cfg.annotate,
            parallel: cfg.parallel,
        }
    }
}

impl From<&AnalysisConfigJson> for AnalysisConfig {
    fn from(value: &AnalysisConfigJson) -> Self {
        let mut cfg = AnalysisConfig::default();
        cfg.anchors.threshold = value.anchor_threshold;
        cfg.anchors.dedup_radius = value.dedup_radius;
        cfg.anchors.exclusion_radius = value.exclusion_radius;
        cfg.validation.min_side = value.min_side;
        cfg.validation.max_side = value.max_side;
        cfg.validation.min_blue_fraction = value.min_blue_fraction;
        cfg.validation.sample_step = value.sample_step;
        cfg.adjacency.min_overlap = value.min_overlap;
        cfg.classify.threshold = value.object_threshold;
        cfg.annotate = value.annotate;
        cfg.parallel = value.parallel;
        cfg
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    image_path: String,
    assets_dir: String,
    output_path: Option<String>,
    annotated_path: Option<String>,
    analysis: AnalysisConfigJson,
}

#[derive(Debug, Serialize)]
struct RankRecord {
    name: &'static str,
    description: &'static str,
}

#[derive(Debug, Serialize)]
struct BreakdownRecord {
    buoys: u32,
    lighthouses: u32,
    empty: u32,
}

impl From<Breakdown> for BreakdownRecord {
    fn from(value: Breakdown) -> Self {
        Self {
            buoys: value.buoys,
            lighthouses: value.lighthouses,
            empty: value.empty,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    is_valid: bool,
    errors: Vec<String>,
    failed_at: Option<&'static str>,
    score: Option<u32>,
    rank: Option<RankRecord>,
    breakdown: Option<BreakdownRecord>,
    correct_count: usize,
    incorrect_count: usize,
    total_cells: usize,
    scorable_cells: usize,
}

impl From<&AnalysisResult> for Output {
    fn from(value: &AnalysisResult) -> Self {
        Self {
            is_valid: value.is_valid,
            errors: value.errors.clone(),
            failed_at: value.failed_at.map(|stage| stage.as_str()),
            score: value.score,
            rank: value
                .rank_text()
                .map(|(name, description)| RankRecord { name, description }),
            breakdown: value.breakdown.map(BreakdownRecord::from),
            correct_count: value.correct_count,
            incorrect_count: value.incorrect_count,
            total_cells: value.total_cells,
            scorable_cells: value.scorable_cells,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("beaconscore=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() || config.assets_dir.is_empty() {
        return Err("image_path and assets_dir must be set in the config".into());
    }
    if config.analysis.sample_step == 0 {
        return Err("sample_step must be at least 1".into());
    }

    let library = TemplateLibrary::load(&config.assets_dir)?;
    tracing::info!(
        assets = %config.assets_dir,
        objects = library.objects().len(),
        "templates_loaded"
    );
    let mut analysis = AnalysisConfig::from(&config.analysis);
    analysis.annotate |= config.annotated_path.is_some();

    let analyzer = BoardAnalyzer::new(&library, analysis);
    let result = analyzer.analyze_path(Path::new(&config.image_path));
    match result.failed_at {
        Some(stage) => tracing::info!(
            image = %config.image_path,
            stage = stage.as_str(),
            "board_rejected"
        ),
        None => tracing::info!(image = %config.image_path, score = ?result.score, "board_scored"),
    }

    if let (Some(path), Some(annotated)) = (&config.annotated_path, &result.annotated_image) {
        annotated.save(path)?;
    }

    let json = serde_json::to_string_pretty(&Output::from(&result))?;
    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
