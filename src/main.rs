use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mercator_tiles::{batch, Bounds, CheckedMercator, Result, TileIndex, TileRange};
use serde_json::{json, Value};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Coordinate conversions for global Spherical Mercator tile pyramids",
    long_about = None,
    propagate_version = true,
    disable_help_subcommand = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolution in meters per pixel at a zoom level
    Resolution { zoom: i32 },

    /// Zoom level closest to a resolution in meters per pixel
    Zoom { resolution: f64 },

    /// Convert a WGS84 lat/lon point
    #[command(allow_negative_numbers = true)]
    FromLatLon {
        lat: f64,
        lon: f64,
        /// Also compute pixels and tile at this zoom level
        #[arg(short, long)]
        zoom: Option<i32>,
    },

    /// Convert a Spherical Mercator point in meters
    #[command(allow_negative_numbers = true)]
    FromMeters {
        x: f64,
        y: f64,
        /// Also compute pixels and tile at this zoom level
        #[arg(short, long)]
        zoom: Option<i32>,
    },

    /// Convert pixel coordinates at a zoom level
    #[command(allow_negative_numbers = true)]
    FromPixels { x: f64, y: f64, zoom: i32 },

    /// Bounds of a TMS tile in meters, lat/lon and pixels
    Bounds {
        zoom: i32,
        x: i64,
        y: i64,
        /// Project the pixel bounds into this zoom level instead
        #[arg(long)]
        target_zoom: Option<i32>,
    },

    /// Tiles covering a lat/lon bounding box
    #[command(allow_negative_numbers = true)]
    Range {
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
        zoom: i32,
    },

    /// Convert a CSV file of points (latitude,longitude[,name])
    Batch {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(short, long)]
        zoom: i32,
    },
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .parse_default_env()
        .format_timestamp(None)
        .init();

    match run(cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let mercator = CheckedMercator::new();

    let value = match cli.command {
        Commands::Resolution { zoom } => {
            json!({ "zoom": zoom, "resolution": mercator.resolution(zoom)? })
        }
        Commands::Zoom { resolution } => {
            json!({ "resolution": resolution, "zoom": mercator.zoom(resolution)? })
        }
        Commands::FromLatLon { lat, lon, zoom } => {
            let meters = mercator.lat_lon_to_meters(lat, lon)?;
            let mut value = json!({
                "lat_lon": { "lat": lat, "lon": lon },
                "meters": meters,
            });
            if let Some(zoom) = zoom {
                add_pixels_and_tile(&mercator, &mut value, meters.x, meters.y, zoom)?;
            }
            value
        }
        Commands::FromMeters { x, y, zoom } => {
            let lat_lon = mercator.meters_to_lat_lon(x, y)?;
            let mut value = json!({
                "meters": { "x": x, "y": y },
                "lat_lon": lat_lon,
            });
            if let Some(zoom) = zoom {
                add_pixels_and_tile(&mercator, &mut value, x, y, zoom)?;
            }
            value
        }
        Commands::FromPixels { x, y, zoom } => {
            let meters = mercator.pixels_to_meters(x, y, zoom)?;
            let (tx, ty) = mercator.pixels_to_tile(x, y)?;
            json!({
                "pixels": { "x": x, "y": y },
                "zoom": zoom,
                "meters": meters,
                "lat_lon": mercator.pixels_to_lat_lon(x, y, zoom)?,
                "tile": TileIndex::new(tx, ty, zoom),
            })
        }
        Commands::Bounds { zoom, x, y, target_zoom } => {
            let target_zoom = target_zoom.unwrap_or(zoom);
            json!({
                "tile": TileIndex::new(x, y, zoom),
                "meters": mercator.tile_bounds(x, y, zoom)?,
                "lat_lon": mercator.tile_lat_lon_bounds(x, y, zoom)?,
                "pixels": mercator.tile_pixel_bounds_at(x, y, zoom, target_zoom)?,
                "pixel_zoom": target_zoom,
            })
        }
        Commands::Range { min_lon, min_lat, max_lon, max_lat, zoom } => {
            let min = mercator.lat_lon_to_meters(min_lat, min_lon)?;
            let max = mercator.lat_lon_to_meters(max_lat, max_lon)?;
            let bounds = Bounds::new(min.x, min.y, max.x, max.y);
            let range = TileRange::covering(&mercator, bounds, zoom)?;
            json!({ "range": range, "count": range.count() })
        }
        Commands::Batch { input, output, zoom } => {
            let stats = batch::convert_csv_file(&mercator, &input, &output, zoom)?;
            serde_json::to_value(stats)?
        }
    };

    Ok(serde_json::to_string_pretty(&value)?)
}

fn add_pixels_and_tile(
    mercator: &CheckedMercator,
    value: &mut Value,
    mx: f64,
    my: f64,
    zoom: i32,
) -> Result<()> {
    let pixels = mercator.meters_to_pixels(mx, my, zoom)?;
    let tile = mercator.meters_to_tile(mx, my, zoom)?;
    value["zoom"] = json!(zoom);
    value["pixels"] = serde_json::to_value(pixels)?;
    value["tile"] = serde_json::to_value(tile)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_command(args: Vec<&str>) -> Result<Value> {
        let cli = Cli::try_parse_from(args)
            .map_err(|e| mercator_tiles::Error::InvalidInput(e.to_string()))?;
        let output = run(cli)?;
        Ok(serde_json::from_str(&output)?)
    }

    #[test]
    fn test_help() {
        let err = Cli::try_parse_from(vec!["mercator-tiles"]).unwrap_err().to_string();
        assert!(err.contains("Usage: mercator-tiles"));
    }

    #[test]
    fn test_resolution() {
        let value = run_command(vec!["mercator-tiles", "resolution", "0"]).unwrap();
        assert!((value["resolution"].as_f64().unwrap() - 156543.03392804062).abs() < 1e-6);
    }

    #[test]
    fn test_zoom() {
        let value = run_command(vec!["mercator-tiles", "zoom", "2.388657133911758"]).unwrap();
        assert_eq!(value["zoom"], 16);
    }

    #[test]
    fn test_from_lat_lon_with_negative_numbers() {
        let value =
            run_command(vec!["mercator-tiles", "from-lat-lon", "-33.8688", "-151.2093", "-z", "5"])
                .unwrap();
        assert!(value["meters"]["x"].as_f64().unwrap() < 0.0);
        assert!(value["meters"]["y"].as_f64().unwrap() < 0.0);
        assert_eq!(value["tile"]["zoom"], 5);
        assert_eq!(value["tile"]["x"], 2);
    }

    #[test]
    fn test_from_lat_lon_rejects_pole() {
        let result = run_command(vec!["mercator-tiles", "from-lat-lon", "90", "0"]);
        assert!(matches!(result, Err(mercator_tiles::Error::InvalidLatitude(_))));
    }

    #[test]
    fn test_from_pixels() {
        let value = run_command(vec!["mercator-tiles", "from-pixels", "256", "256", "1"]).unwrap();
        assert_eq!(value["tile"]["x"], 1);
        assert!(value["meters"]["x"].as_f64().unwrap().abs() < 1e-6);
    }

    #[test]
    fn test_bounds() {
        let value = run_command(vec!["mercator-tiles", "bounds", "0", "0", "0"]).unwrap();
        assert!((value["meters"]["max_x"].as_f64().unwrap() - 20037508.342789244).abs() < 1e-3);

        let value =
            run_command(vec!["mercator-tiles", "bounds", "1", "1", "1", "--target-zoom", "2"])
                .unwrap();
        assert!((value["pixels"]["min_x"].as_f64().unwrap() - 512.0).abs() < 1e-6);
    }

    #[test]
    fn test_range() {
        let value =
            run_command(vec!["mercator-tiles", "range", "-180", "-85", "180", "85", "2"]).unwrap();
        assert_eq!(value["count"], 16);
    }

    #[test]
    fn test_batch() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(&input, "latitude,longitude\n1.0,2.0\n").unwrap();

        let value = run_command(vec![
            "mercator-tiles",
            "batch",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "-z",
            "6",
        ])
        .unwrap();
        assert_eq!(value["successful"], 1);
        assert!(output.exists());
    }
}
