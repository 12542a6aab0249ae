//! Batch conversion of point lists
//!
//! Points are read from CSV (`latitude,longitude[,name]`), converted in
//! parallel with rayon and written back as CSV with one result row per input
//! row. Invalid points do not abort the batch; their row carries the error
//! in the `status` column.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::projection::CheckedMercator;
use crate::types::{Bounds, LatLon, Meters, Pixels, TileIndex};

/// One input row
#[derive(Debug, Clone, Deserialize)]
pub struct PointRecord {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub name: Option<String>,
}

impl PointRecord {
    pub fn point(&self) -> LatLon {
        LatLon::new(self.latitude, self.longitude)
    }
}

/// Every representation of one point at a zoom level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointConversion {
    pub point: LatLon,
    pub meters: Meters,
    pub pixels: Pixels,
    pub tile: TileIndex,
    /// Lat/lon bounds of `tile`
    pub tile_bounds: Bounds,
}

/// Flat output row
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    latitude: Option<f64>,
    longitude: Option<f64>,
    name: &'a str,
    meters_x: Option<f64>,
    meters_y: Option<f64>,
    pixel_x: Option<f64>,
    pixel_y: Option<f64>,
    tile_x: Option<i64>,
    tile_y: Option<i64>,
    zoom: i32,
    status: String,
}

/// Summary of a finished batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

/// Converts a single point
pub fn convert_point(mercator: &CheckedMercator, point: LatLon, zoom: i32) -> Result<PointConversion> {
    let meters = mercator.lat_lon_to_meters(point.lat, point.lon)?;
    let pixels = mercator.meters_to_pixels(meters.x, meters.y, zoom)?;
    let tile = mercator.meters_to_tile(meters.x, meters.y, zoom)?;
    let tile_bounds = mercator.tile_lat_lon_bounds(tile.x, tile.y, zoom)?;

    Ok(PointConversion { point, meters, pixels, tile, tile_bounds })
}

/// Converts many points in parallel, preserving input order
pub fn convert_points(
    mercator: &CheckedMercator,
    points: &[LatLon],
    zoom: i32,
) -> Vec<Result<PointConversion>> {
    log::debug!("converting {} points at zoom {}", points.len(), zoom);

    points
        .par_iter()
        .map(|&point| convert_point(mercator, point, zoom))
        .collect()
}

/// Reads point records from CSV with a header row
///
/// Returns one entry per data row. A row that fails to parse keeps its
/// place as an error; only I/O failures abort the read.
pub fn read_points<R: Read>(reader: R) -> Result<Vec<Result<PointRecord>>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut records: Vec<Result<PointRecord>> = Vec::new();
    for result in csv_reader.deserialize::<PointRecord>() {
        match result {
            Ok(record) => records.push(Ok(record)),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                log::warn!("unreadable row: {}", e);
                records.push(Err(e.into()));
            }
        }
    }

    Ok(records)
}

/// Converts every readable record in parallel, preserving record order
pub fn convert_records(
    mercator: &CheckedMercator,
    records: &[Result<PointRecord>],
    zoom: i32,
) -> Vec<Result<PointConversion>> {
    log::debug!("converting {} records at zoom {}", records.len(), zoom);

    records
        .par_iter()
        .map(|record| match record {
            Ok(record) => convert_point(mercator, record.point(), zoom),
            Err(e) => Err(Error::InvalidInput(format!("unreadable row ({})", e))),
        })
        .collect()
}

/// Writes one CSV row per record; `results` must be in record order
pub fn write_conversions<W: Write>(
    writer: W,
    records: &[Result<PointRecord>],
    results: &[Result<PointConversion>],
    zoom: i32,
) -> Result<BatchStats> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut stats = BatchStats { total: records.len(), successful: 0, failed: 0 };

    for (record, result) in records.iter().zip(results) {
        let record = record.as_ref().ok();
        let name = record.and_then(|r| r.name.as_deref()).unwrap_or("");
        let latitude = record.map(|r| r.latitude);
        let longitude = record.map(|r| r.longitude);

        let row = match result {
            Ok(conversion) => {
                stats.successful += 1;
                CsvRow {
                    latitude,
                    longitude,
                    name,
                    meters_x: Some(conversion.meters.x),
                    meters_y: Some(conversion.meters.y),
                    pixel_x: Some(conversion.pixels.x),
                    pixel_y: Some(conversion.pixels.y),
                    tile_x: Some(conversion.tile.x),
                    tile_y: Some(conversion.tile.y),
                    zoom,
                    status: "OK".to_string(),
                }
            }
            Err(e) => {
                stats.failed += 1;
                CsvRow {
                    latitude,
                    longitude,
                    name,
                    meters_x: None,
                    meters_y: None,
                    pixel_x: None,
                    pixel_y: None,
                    tile_x: None,
                    tile_y: None,
                    zoom,
                    status: e.to_string(),
                }
            }
        };
        csv_writer.serialize(row)?;
    }

    csv_writer.flush()?;
    Ok(stats)
}

/// Reads points from `reader`, converts them and writes the result CSV
pub fn convert_csv<R: Read, W: Write>(
    mercator: &CheckedMercator,
    reader: R,
    writer: W,
    zoom: i32,
) -> Result<BatchStats> {
    let records = read_points(reader)?;
    let results = convert_records(mercator, &records, zoom);
    write_conversions(writer, &records, &results, zoom)
}

/// File-based variant of [`convert_csv`]
pub fn convert_csv_file<P: AsRef<Path>, Q: AsRef<Path>>(
    mercator: &CheckedMercator,
    input: P,
    output: Q,
    zoom: i32,
) -> Result<BatchStats> {
    let reader = File::open(input)?;
    let writer = File::create(output)?;
    let stats = convert_csv(mercator, reader, writer, zoom)?;

    log::info!(
        "converted {} points ({} failed)",
        stats.successful,
        stats.failed
    );
    Ok(stats)
}
