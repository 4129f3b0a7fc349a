//! Coordinate conversion from the National Grid.
//!
//! Eastings and Northings in the dataset are British National Grid
//! (OSGB36, EPSG:27700). Conversion goes through `proj4rs`, so any target
//! expressible as a PROJ.4 string works; a few common ones are available
//! by EPSG code.

use std::fmt;
use std::sync::Arc;

use proj4rs::proj::Proj;
use proj4rs::transform::transform;

use crate::codepoint::types::error::{CodePointError, Result};
use crate::codepoint::types::models::LonLat;

/// EPSG:27700, with the OSGB36 to WGS84 Helmert parameters.
pub const BRITISH_NATIONAL_GRID: &str = "+proj=tmerc +lat_0=49 +lon_0=-2 +k=0.9996012717 \
     +x_0=400000 +y_0=-100000 +ellps=airy \
     +towgs84=446.448,-125.157,542.06,0.15,0.247,0.842,-20.489 +units=m +no_defs";

/// EPSG:4326.
pub const WGS84: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// EPSG:4258.
pub const ETRS89: &str = "+proj=longlat +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +no_defs";

/// EPSG:3857.
pub const WEB_MERCATOR: &str = "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 \
     +x_0=0 +y_0=0 +k=1 +units=m +no_defs";

/// A coordinate reference system usable as a conversion target.
#[derive(Clone)]
pub struct Projection {
    definition: Arc<str>,
    proj: Arc<Proj>,
    latlong: bool,
}

impl fmt::Debug for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Projection").field(&self.definition).finish()
    }
}

impl PartialEq for Projection {
    fn eq(&self, other: &Self) -> bool {
        self.definition == other.definition
    }
}

impl Projection {
    /// Builds a projection from a PROJ.4 definition string.
    ///
    /// # Errors
    /// `Projection` if `proj4rs` rejects the definition.
    pub fn from_proj_string(definition: &str) -> Result<Self> {
        let proj = Proj::from_proj_string(definition)
            .map_err(|e| CodePointError::Projection(format!("{:?} in {:?}", e, definition)))?;
        let latlong = definition
            .split_whitespace()
            .any(|param| {
                matches!(
                    param,
                    "+proj=longlat" | "+proj=latlong" | "+proj=lonlat" | "+proj=latlon"
                )
            });
        Ok(Self {
            definition: Arc::from(definition),
            proj: Arc::new(proj),
            latlong,
        })
    }

    /// Builds one of the built-in projections by EPSG code.
    ///
    /// Supported: 4326 (WGS84), 4258 (ETRS89), 27700 (British National
    /// Grid), 3857 (Web Mercator).
    pub fn from_epsg(code: u32) -> Result<Self> {
        let definition = match code {
            4326 => WGS84,
            4258 => ETRS89,
            27700 => BRITISH_NATIONAL_GRID,
            3857 => WEB_MERCATOR,
            other => {
                return Err(CodePointError::Projection(format!(
                    "no built-in definition for EPSG:{}",
                    other
                )))
            }
        };
        Self::from_proj_string(definition)
    }

    /// WGS84 longitude/latitude, the default target.
    pub fn wgs84() -> Self {
        Self::from_proj_string(WGS84).expect("Invalid WGS84 definition")
    }

    /// British National Grid, the fixed source of every conversion.
    pub fn british_national_grid() -> Result<Self> {
        Self::from_proj_string(BRITISH_NATIONAL_GRID)
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    /// Whether coordinates in this system are longitude/latitude.
    pub fn is_latlong(&self) -> bool {
        self.latlong
    }
}

/// Converts National Grid Eastings/Northings into a target system.
#[derive(Debug, Clone)]
pub struct GridTransform {
    source: Projection,
    target: Projection,
}

impl GridTransform {
    pub fn new(target: Projection) -> Result<Self> {
        Ok(Self {
            source: Projection::british_national_grid()?,
            target,
        })
    }

    pub fn target(&self) -> &Projection {
        &self.target
    }

    /// Converts one grid reference. Geographic results are in degrees.
    pub fn convert(&self, eastings: f64, northings: f64) -> Result<LonLat> {
        let mut point = (eastings, northings, 0.0);
        transform(&self.source.proj, &self.target.proj, &mut point)
            .map_err(|e| {
                CodePointError::Projection(format!("{:?} at ({}, {})", e, eastings, northings))
            })?;

        let (x, y) = if self.target.latlong {
            (point.0.to_degrees(), point.1.to_degrees())
        } else {
            (point.0, point.1)
        };
        Ok(LonLat {
            longitude: x,
            latitude: y,
        })
    }
}
