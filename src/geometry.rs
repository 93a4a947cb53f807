//! Bounding-box normalization for static rendering.

use crate::error::{Result, TrackError};
use crate::track::GeoPoint;

/// Fraction of each axis range added as padding on both sides.
const PADDING: f64 = 0.05;

/// Padded bounding box of a route plus the linear projection it implies.
///
/// Render-only state: built from route points right before drawing and
/// discarded with the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderGeometry {
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
}

impl RenderGeometry {
    /// Compute the padded bounding box of `route_points`.
    ///
    /// Fails with [`TrackError::RenderPrecondition`] if the input is empty or
    /// if all points share one latitude or longitude (a zero-range axis would
    /// make the projection divide by zero).
    pub fn normalize(route_points: &[GeoPoint]) -> Result<Self> {
        let Some(first) = route_points.first() else {
            return Err(TrackError::RenderPrecondition(
                "cannot normalize an empty route",
            ));
        };

        let mut min_lat = first.lat;
        let mut max_lat = first.lat;
        let mut min_lon = first.lon;
        let mut max_lon = first.lon;
        for p in &route_points[1..] {
            min_lat = min_lat.min(p.lat);
            max_lat = max_lat.max(p.lat);
            min_lon = min_lon.min(p.lon);
            max_lon = max_lon.max(p.lon);
        }

        let lat_range = max_lat - min_lat;
        let lon_range = max_lon - min_lon;
        if lat_range == 0.0 {
            return Err(TrackError::RenderPrecondition(
                "all points share one latitude; bounding box has zero height",
            ));
        }
        if lon_range == 0.0 {
            return Err(TrackError::RenderPrecondition(
                "all points share one longitude; bounding box has zero width",
            ));
        }

        Ok(Self {
            min_lat: min_lat - lat_range * PADDING,
            max_lat: max_lat + lat_range * PADDING,
            min_lon: min_lon - lon_range * PADDING,
            max_lon: max_lon + lon_range * PADDING,
        })
    }

    /// Project a point into the unit square, `(x, y)` with `x` tracking
    /// longitude and `y` latitude. Points inside the padded box land in
    /// `[0, 1]` on both axes.
    pub fn project(&self, point: GeoPoint) -> (f64, f64) {
        let x = (point.lon - self.min_lon) / (self.max_lon - self.min_lon);
        let y = (point.lat - self.min_lat) / (self.max_lat - self.min_lat);
        (x, y)
    }
}
