use crate::{dms::{to_decimal, DecimalDegrees, Dms, Reference}, error::{Error, Result}, folder::list_jpegs, metadata::*};

use std::{fmt, io::{self, Write}, path::Path};
use geoutils::Location;
use log::{info, warn};

const LATITUDE: &str = "GPSLatitude";
const LATITUDE_REF: &str = "GPSLatitudeRef";
const LONGITUDE: &str = "GPSLongitude";
const LONGITUDE_REF: &str = "GPSLongitudeRef";

/// What the GPS block of a picture contains.
#[derive(Debug, Clone, PartialEq)]
pub enum GpsReport {
    Located(Location),
    Incomplete,
    Missing,
}

impl fmt::Display for GpsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpsReport::Located(location) => write!(
                f,
                "GPS Coordinates: {}, {}",
                DecimalDegrees(location.latitude()),
                DecimalDegrees(location.longitude())
            ),
            GpsReport::Incomplete => write!(f, "Incomplete GPS data."),
            GpsReport::Missing => write!(f, "No GPS data found."),
        }
    }
}

/// Counts of the outcomes of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub located: usize,
    pub incomplete: usize,
    pub without_gps: usize,
    pub failed: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.located + self.incomplete + self.without_gps + self.failed
    }

    fn record(&mut self, outcome: &Result<GpsReport>) {
        match outcome {
            Ok(GpsReport::Located(_)) => self.located += 1,
            Ok(GpsReport::Incomplete) => self.incomplete += 1,
            Ok(GpsReport::Missing) => self.without_gps += 1,
            Err(_) => self.failed += 1,
        }
    }
}

fn coordinate(gps: &MetadataDictionary, value_key: &str, ref_key: &str) -> Result<f64> {
    let dms = Dms::try_from(&gps[value_key])?;
    let reference = Reference::from(&gps[ref_key]);

    if let Reference::Other(c) = reference {
        warn!("Unknown {} {:?}, keeping the coordinate positive.", ref_key, c);
    }

    Ok(to_decimal(&dms, reference)?.0)
}

/// Extracts the position from the metadata of a picture.
pub fn gps_report(metadata: &MetadataDictionary) -> Result<GpsReport> {
    let gps = match metadata.get(GPS_INFO) {
        Some(value) => value
            .as_nested()
            .ok_or_else(|| Error::MalformedCoordinate(format!("{} is not a tag group", GPS_INFO)))?,
        None => return Ok(GpsReport::Missing),
    };

    if ![LATITUDE, LATITUDE_REF, LONGITUDE, LONGITUDE_REF].iter().all(|key| gps.contains_key(*key)) {
        return Ok(GpsReport::Incomplete);
    }

    let latitude = coordinate(gps, LATITUDE, LATITUDE_REF)?;
    let longitude = coordinate(gps, LONGITUDE, LONGITUDE_REF)?;

    Ok(GpsReport::Located(Location::new(latitude, longitude)))
}

/// Processes the picture `name` of `folder`, writing its lines to `out`.
///
/// The outer error is a failure of `out`; the inner one is the failure of
/// this picture, already reported on `out`.
pub fn process_image<W: Write>(folder: &Path, name: &str, out: &mut W) -> io::Result<Result<GpsReport>> {
    let outcome = match read_metadata(&folder.join(name)) {
        Ok(metadata) => {
            writeln!(out, "Photo: {}", name)?;

            gps_report(&metadata)
        },
        Err(e) => Err(e),
    };

    match &outcome {
        Ok(report) => writeln!(out, "{}", report)?,
        Err(e) => {
            warn!("Failed to process {:?}: {:?}", name, e);

            writeln!(out, "Error processing {}: {}", name, e)?;
        },
    }

    Ok(outcome)
}

/// Processes every JPEG picture of `folder`, in name order.
pub fn run<W: Write>(folder: &Path, out: &mut W) -> Result<Summary> {
    let mut summary = Summary::default();

    for name in list_jpegs(folder)? {
        let outcome = process_image(folder, &name, out)?;

        summary.record(&outcome);
    }

    info!(
        "{} pictures: {} located, {} without GPS data, {} incomplete, {} failed.",
        summary.total(), summary.located, summary.without_gps, summary.incomplete, summary.failed
    );

    Ok(summary)
}
