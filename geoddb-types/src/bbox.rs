use crate::point::Coordinate;
use geo::Rect;
use serde::{Deserialize, Serialize};

/// The rectangular cell a geohash denotes.
///
/// Stored as a `geo::Rect` with x = longitude and y = latitude. Both
/// intervals are closed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// The underlying geometric rectangle
    pub rect: Rect,
}

impl BoundingBox {
    /// Create a bounding box from a latitude interval and a longitude interval.
    ///
    /// # Examples
    ///
    /// ```
    /// use geoddb_types::bbox::BoundingBox;
    ///
    /// let cell = BoundingBox::from_ranges((42.583, 42.627), (-5.625, -5.581));
    /// assert_eq!(cell.lat_range(), (42.583, 42.627));
    /// ```
    pub fn from_ranges(lat: (f64, f64), lon: (f64, f64)) -> Self {
        Self {
            rect: Rect::new(
                geo::coord! { x: lon.0, y: lat.0 },
                geo::coord! { x: lon.1, y: lat.1 },
            ),
        }
    }

    /// Create a bounding box from a `geo::Rect`.
    pub fn from_rect(rect: Rect) -> Self {
        Self { rect }
    }

    pub fn min_lat(&self) -> f64 {
        self.rect.min().y
    }

    pub fn max_lat(&self) -> f64 {
        self.rect.max().y
    }

    pub fn min_lon(&self) -> f64 {
        self.rect.min().x
    }

    pub fn max_lon(&self) -> f64 {
        self.rect.max().x
    }

    /// Latitude interval as `(min, max)`.
    pub fn lat_range(&self) -> (f64, f64) {
        (self.min_lat(), self.max_lat())
    }

    /// Longitude interval as `(min, max)`.
    pub fn lon_range(&self) -> (f64, f64) {
        (self.min_lon(), self.max_lon())
    }

    /// Midpoint of both intervals.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lat() + self.max_lat()) / 2.0,
            (self.min_lon() + self.max_lon()) / 2.0,
        )
    }

    /// Half the latitude span.
    pub fn lat_error(&self) -> f64 {
        ((self.max_lat() - self.min_lat()) / 2.0).abs()
    }

    /// Half the longitude span.
    pub fn lon_error(&self) -> f64 {
        ((self.max_lon() - self.min_lon()) / 2.0).abs()
    }

    /// Check if a coordinate lies inside the box, edges included.
    pub fn contains(&self, coord: &Coordinate) -> bool {
        coord.lat >= self.min_lat()
            && coord.lat <= self.max_lat()
            && coord.lon >= self.min_lon()
            && coord.lon <= self.max_lon()
    }

    /// Check if this bounding box intersects with another.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        !(self.max_lon() < other.min_lon()
            || self.min_lon() > other.max_lon()
            || self.max_lat() < other.min_lat()
            || self.min_lat() > other.max_lat())
    }
}
