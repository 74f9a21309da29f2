use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use foundation::math::Geodetic;
use layers::graticule::{GridBounds, degrees_to_dms, select_spacing};
use layers::lines::GridAxis;
use layers::{Graticule, GraticuleConfig, RenderOutcome};
use runtime::Clock;
use scene::GlobeCamera;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "graticule", about = "Lat/lon grid layout for a globe view")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out the grid for a nadir camera and print it as JSON.
    Grid(GridArgs),
    /// Format an angle as degrees/minutes/seconds.
    Dms {
        #[arg(allow_negative_numbers = true)]
        degrees: f64,
        /// Use N/S instead of E/W.
        #[arg(long)]
        lat: bool,
    },
    /// Pick the grid spacing for a span and a target line count.
    Spacing {
        span_deg: f64,
        #[arg(default_value_t = 25.0)]
        target_count: f64,
    },
}

#[derive(clap::Args, Debug)]
struct GridArgs {
    /// Latitude under the camera (degrees).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    lat: f64,
    /// Longitude under the camera (degrees).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    lon: f64,
    /// Camera altitude above the ellipsoid (meters).
    #[arg(long, default_value_t = 2_000_000.0)]
    altitude: f64,
    #[arg(long, default_value_t = 1280.0)]
    width: f64,
    #[arg(long, default_value_t = 720.0)]
    height: f64,
    /// Vertical field of view (degrees).
    #[arg(long, default_value_t = 60.0)]
    fov_deg: f64,
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 1)]
    frames: u32,
    /// Eastward camera pan per frame (degrees).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pan_deg: f64,
    /// JSON graticule config; missing fields take defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Include tessellated line paths in the output.
    #[arg(long)]
    paths: bool,
}

#[derive(Serialize)]
struct GridReport {
    frames: Vec<RenderOutcome>,
    extent_deg: Option<[f64; 4]>,
    bounds: Option<GridBounds>,
    lines: Vec<LineReport>,
    labels: Vec<LabelReport>,
}

#[derive(Serialize)]
struct LineReport {
    axis: GridAxis,
    value_deg: f64,
    highlighted: bool,
    points: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    path_deg: Option<Vec<[f64; 2]>>,
}

#[derive(Serialize)]
struct LabelReport {
    text: String,
    is_lat: bool,
    lat_deg: f64,
    lon_deg: f64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let cli = Cli::parse();
    match cli.command {
        Command::Grid(args) => cmd_grid(args),
        Command::Dms { degrees, lat } => {
            println!("{}", degrees_to_dms(degrees, lat));
            Ok(())
        }
        Command::Spacing {
            span_deg,
            target_count,
        } => {
            let spacing = select_spacing(span_deg.to_radians(), target_count);
            println!("{}", spacing.to_degrees());
            Ok(())
        }
    }
}

fn cmd_grid(args: GridArgs) -> Result<(), String> {
    let config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
            GraticuleConfig::from_json_str(&raw).map_err(|e| format!("{path:?}: {e}"))?
        }
        None => GraticuleConfig::default(),
    };
    if !(args.fov_deg > 0.0 && args.fov_deg < 180.0) {
        return Err(format!("--fov-deg must be in (0, 180), got {}", args.fov_deg));
    }
    if args.altitude <= 0.0 {
        return Err(format!("--altitude must be positive, got {}", args.altitude));
    }

    let mut graticule = Graticule::new(1, config).map_err(|e| e.to_string())?;
    let mut clock = Clock::default();
    let camera_at = |frame: u32| {
        let lon = args.lon + args.pan_deg * f64::from(frame);
        GlobeCamera::looking_down_at(
            Geodetic::from_degrees(args.lat, lon, 0.0),
            args.altitude,
            [args.width, args.height],
        )
        .with_fov_y(args.fov_deg.to_radians())
    };

    let mut frames = vec![graticule.on(&mut clock, &camera_at(0))];
    for frame in 1..args.frames.max(1) {
        let tick = clock.advance();
        if let Some(outcome) = graticule.on_tick(&tick, &camera_at(frame)) {
            frames.push(outcome);
        }
    }
    info!(
        frames = frames.len(),
        rebuilds = frames.iter().filter(|o| **o == RenderOutcome::Rebuilt).count(),
        "simulation finished"
    );

    let report = GridReport {
        frames,
        extent_deg: graticule.current_extent().map(|r| {
            [
                r.west.to_degrees(),
                r.south.to_degrees(),
                r.east.to_degrees(),
                r.north.to_degrees(),
            ]
        }),
        bounds: graticule.bounds(),
        lines: graticule
            .lines()
            .iter()
            .map(|line| LineReport {
                axis: line.axis,
                value_deg: line.value_rad.to_degrees(),
                highlighted: line.highlighted,
                points: line.path.len(),
                path_deg: args
                    .paths
                    .then(|| line.path.iter().map(|p| [p.lat_deg(), p.lon_deg()]).collect()),
            })
            .collect(),
        labels: graticule
            .labels()
            .iter()
            .map(|label| LabelReport {
                text: label.text.clone(),
                is_lat: label.is_lat,
                lat_deg: label.geodetic().lat_deg(),
                lon_deg: label.geodetic().lon_deg(),
            })
            .collect(),
    };

    graticule.off(&mut clock);

    let payload = serde_json::to_string_pretty(&report).map_err(|e| format!("json: {e}"))?;
    println!("{payload}");
    Ok(())
}
