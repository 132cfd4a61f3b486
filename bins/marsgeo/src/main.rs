//! marsgeo - GCJ-02 conversion and geo-fence editing from the terminal.

mod preview;
mod replay;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use marsgeo_cli::output::{format_count, format_gcj02, format_meters, format_wgs84, Status};
use marsgeo_core::config::{Config, MapOptions};
use marsgeo_core::display::LocalTimeFormatter;
use marsgeo_core::error::exit_codes;
use marsgeo_fence::position::Position;
use marsgeo_fence::MarkerKind;
use marsgeo_geo::{to_gcj02, to_gcj02_json, to_wgs84, to_wgs84_json, Gcj02Point, Wgs84Point};
use marsgeo_telemetry::{Event, TelemetryConfig, Timer};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "marsgeo")]
#[command(about = "GCJ-02 conversion and geo-fence editing sessions")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to .marsgeo.toml when present)
    #[arg(short, long, global = true, env = "MARSGEO_CONFIG")]
    config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Datum {
    Wgs84,
    Gcj02,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one coordinate to the other datum
    Convert {
        /// Longitude in degrees
        #[arg(allow_hyphen_values = true)]
        lng: f64,
        /// Latitude in degrees
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        /// Datum of the input
        #[arg(long, value_enum, default_value = "wgs84")]
        from: Datum,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert a JSON array of {lng, lat} points
    Batch {
        /// Path to the JSON file
        path: PathBuf,
        /// Datum of the input
        #[arg(long, value_enum, default_value = "wgs84")]
        from: Datum,
    },

    /// Normalise geo-fence form values the way the editor does on load
    Fence {
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        latitude: String,
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        longitude: String,
        #[arg(long, default_value = "")]
        radius: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a scripted editing session and print the final state
    Replay {
        /// Path to the JSON script
        path: PathBuf,
    },

    /// Show how the position map would display a "lat,lng[,heading]" string
    Position {
        /// Position text
        #[arg(allow_hyphen_values = true)]
        text: String,
        /// Marker style, as in the page's data-marker attribute ("arrow" or anything else)
        #[arg(long, default_value = "pin")]
        marker: String,
        /// Show the zoom control
        #[arg(long)]
        zoom_control: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the tile URL for x/y/z
    Tile { x: i64, y: i64, z: u8 },

    /// Format timestamps the way the page shows them
    Time {
        /// Start timestamp (RFC 3339)
        start: String,
        /// Optional end timestamp for a range
        end: Option<String>,
    },

    /// Show the effective configuration
    Config,
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            match serde_json::to_string(&e.to_report()) {
                Ok(report) if cli.log_json => eprintln!("{report}"),
                _ => Status::error(&e.to_string()),
            }
            std::process::exit(exit_codes::CONFIG_ERROR);
        }
    };

    let mut telemetry = TelemetryConfig::with_level(if cli.verbose {
        "debug".to_string()
    } else {
        config.schema.telemetry.log_level.clone()
    });
    telemetry.json = cli.log_json;
    if let Err(e) = marsgeo_telemetry::init_with_config(telemetry) {
        Status::warning(&format!("Logging disabled: {}", e));
    }
    tracing::debug!(path = ?config.path, "Configuration loaded");

    let result = match cli.command {
        Commands::Convert { lng, lat, from, json } => run_convert(lng, lat, from, json),
        Commands::Batch { path, from } => run_batch(&path, from),
        Commands::Fence { latitude, longitude, radius, json } => {
            run_fence(&latitude, &longitude, &radius, json, &config)
        }
        Commands::Replay { path } => run_replay(&path, &config),
        Commands::Position { text, marker, zoom_control, json } => {
            run_position(&text, &marker, zoom_control, json, &config)
        }
        Commands::Tile { x, y, z } => run_tile(x, y, z, &config),
        Commands::Time { start, end } => run_time(&start, end.as_deref(), &config),
        Commands::Config => run_config(&config),
    };

    let code = match result {
        Ok(code) => code,
        Err(e) => {
            Status::error(&format!("{:#}", e));
            exit_codes::FAILURE
        }
    };
    std::process::exit(code);
}

fn run_convert(lng: f64, lat: f64, from: Datum, json: bool) -> Result<i32> {
    let (input, output, value) = match from {
        Datum::Wgs84 => {
            let p = Wgs84Point::new(lng, lat);
            let q = to_gcj02(p);
            (format_wgs84(&p), format_gcj02(&q), serde_json::json!({"gcj02": q}))
        }
        Datum::Gcj02 => {
            let p = Gcj02Point::new(lng, lat);
            let q = to_wgs84(p);
            (format_gcj02(&p), format_wgs84(&q), serde_json::json!({"wgs84": q}))
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        Status::field("input", &input);
        Status::field("output", &output);
    }
    Ok(exit_codes::SUCCESS)
}

fn run_batch(path: &Path, from: Datum) -> Result<i32> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let timer = Timer::start("batch_convert");
    let output = match from {
        Datum::Wgs84 => to_gcj02_json(&content),
        Datum::Gcj02 => to_wgs84_json(&content),
    }
    .with_context(|| format!("Invalid points in {}", path.display()))?;
    let elapsed = timer.stop();

    println!("{}", output);
    tracing::info!(bytes = output.len(), elapsed_ms = elapsed.as_millis(), "Batch converted");
    Ok(exit_codes::SUCCESS)
}

fn run_fence(latitude: &str, longitude: &str, radius: &str, json: bool, config: &Config) -> Result<i32> {
    let script = replay::Script {
        fields: replay::InitialFields {
            latitude: latitude.to_string(),
            longitude: longitude.to_string(),
            radius: radius.to_string(),
        },
        steps: Vec::new(),
    };
    let outcome = replay::run(&script, &config.schema.fence);

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(exit_codes::SUCCESS);
    }

    let fell_back = outcome.latitude != latitude || outcome.longitude != longitude;
    if fell_back {
        Status::warning("Center unusable, fallback applied");
    }
    print_outcome(&outcome);
    Ok(if fell_back { exit_codes::VALIDATION_ERROR } else { exit_codes::SUCCESS })
}

fn run_replay(path: &Path, config: &Config) -> Result<i32> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let script: replay::Script = serde_json::from_str(&content)
        .with_context(|| format!("Invalid script {}", path.display()))?;

    let outcome = replay::run(&script, &config.schema.fence);
    for event in &outcome.notifications {
        Event::new(event.name.clone(), event.payload.clone()).log();
    }

    Status::success(&format!(
        "Replayed {}, {} sent",
        format_count(script.steps.len(), "step", "steps"),
        format_count(outcome.notifications.len(), "notification", "notifications"),
    ));
    print_outcome(&outcome);
    Ok(exit_codes::SUCCESS)
}

fn print_outcome(outcome: &replay::Outcome) {
    Status::header("Fields");
    Status::field("latitude", &outcome.latitude);
    Status::field("longitude", &outcome.longitude);
    Status::field("radius", &outcome.radius);

    Status::header("Map");
    Status::field("center", &format_wgs84(&outcome.fence.center));
    if let Some(shown) = outcome.overlay.circle_center {
        Status::field("shown at", &format_gcj02(&shown));
    }
    Status::field("radius", &format_meters(outcome.overlay.circle_radius_m));
    Status::field("zoom", &outcome.overlay.zoom.to_string());
}

fn run_position(text: &str, marker: &str, zoom_control: bool, json: bool, config: &Config) -> Result<i32> {
    let kind = MarkerKind::from_attr(Some(marker));
    let position = match Position::parse(text) {
        Ok(position) => position,
        Err(e) => {
            Status::error(&e.to_string());
            return Ok(exit_codes::VALIDATION_ERROR);
        }
    };
    let preview = preview::mount(text, kind, &config.schema.position_view, zoom_control)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&preview)?);
        return Ok(exit_codes::SUCCESS);
    }

    Status::field("position", &format_wgs84(&position.point));
    if let Some(shown) = preview.overlay.view_center {
        Status::field("shown at", &format_gcj02(&shown));
    }
    match position.heading.degrees() {
        Some(deg) => Status::field("heading", &format!("{deg}°")),
        None => Status::field("heading", "none"),
    }
    Status::field("zoom", &preview.overlay.zoom.to_string());
    if let Some(render) = &preview.overlay.rendered_marker {
        Status::field("marker", &serde_json::to_string(render)?);
    }
    Ok(exit_codes::SUCCESS)
}

fn run_tile(x: i64, y: i64, z: u8, config: &Config) -> Result<i32> {
    println!("{}", config.schema.tiles.url_for(x, y, z));
    Ok(exit_codes::SUCCESS)
}

fn run_time(start: &str, end: Option<&str>, config: &Config) -> Result<i32> {
    let formatter = LocalTimeFormatter::new(&config.schema.display.locale);
    match end {
        Some(end) => println!("{}", formatter.time_range(start, end)),
        None => println!("{}", formatter.time(start)),
    }
    Ok(exit_codes::SUCCESS)
}

fn run_config(config: &Config) -> Result<i32> {
    let schema = &config.schema;
    match &config.path {
        Some(path) => Status::field("file", path),
        None => Status::info("No configuration file found, using defaults"),
    }

    Status::header("Fence editor");
    Status::field(
        "fallback",
        &format_wgs84(&Wgs84Point::new(schema.fence.fallback_longitude, schema.fence.fallback_latitude)),
    );
    Status::field("zoom", &schema.fence.zoom.to_string());
    Status::field("radius", &format_meters(schema.fence.default_radius_m));
    Status::field("bootstrap", &format!("{} ms", schema.fence.bootstrap_delay().as_millis()));
    Status::field("options", &serde_json::to_string(&MapOptions::interactive())?);

    Status::header("Position view");
    Status::field("zoom", &schema.position_view.zoom.to_string());
    Status::field("options", &serde_json::to_string(&MapOptions::static_preview(false))?);

    Status::header("Tiles");
    Status::field("template", &schema.tiles.url_template);
    Status::field("subdomains", &schema.tiles.subdomains);
    Status::field("attribution", &schema.tiles.attribution);

    Status::header("Display");
    Status::field("locale", &schema.display.locale);
    Status::field("log level", &schema.telemetry.log_level);
    Ok(exit_codes::SUCCESS)
}
