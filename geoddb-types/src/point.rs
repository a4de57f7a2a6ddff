use geo::Point;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees.
///
/// No range validation is done on construction. Values outside
/// `[-90, 90] x [-180, 180]` are carried as-is; callers that care can use
/// [`Coordinate::is_in_range`].
///
/// # Examples
///
/// ```
/// use geoddb_types::point::Coordinate;
/// use geo::Point;
///
/// let nyc = Coordinate::new(40.7128, -74.0060);
/// let point: Point = nyc.into();
/// assert_eq!(point.x(), -74.0060);
/// assert_eq!(point.y(), 40.7128);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, positive north
    pub lat: f64,
    /// Longitude in degrees, positive east
    pub lon: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Whether latitude is within `[-90, 90]` and longitude within `[-180, 180]`.
    pub fn is_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(coord: Coordinate) -> Self {
        Point::new(coord.lon, coord.lat)
    }
}

impl From<Point<f64>> for Coordinate {
    fn from(point: Point<f64>) -> Self {
        Self {
            lat: point.y(),
            lon: point.x(),
        }
    }
}

impl From<(f64, f64)> for Coordinate {
    /// Interprets the tuple as `(lat, lon)`.
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}
