use super::codec::{bounds, encode};
use crate::error::Result;
use geoddb_types::BoundingBox;
use serde::{Deserialize, Serialize};

/// Compass direction of an adjacent cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All directions, clockwise from north.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Unit step as `(dlat, dlon)`.
    pub fn offsets(self) -> (f64, f64) {
        match self {
            Direction::North => (1.0, 0.0),
            Direction::NorthEast => (1.0, 1.0),
            Direction::East => (0.0, 1.0),
            Direction::SouthEast => (-1.0, 1.0),
            Direction::South => (-1.0, 0.0),
            Direction::SouthWest => (-1.0, -1.0),
            Direction::West => (0.0, -1.0),
            Direction::NorthWest => (1.0, -1.0),
        }
    }
}

/// The eight cells surrounding a geohash, at the same precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbors {
    pub n: String,
    pub ne: String,
    pub e: String,
    pub se: String,
    pub s: String,
    pub sw: String,
    pub w: String,
    pub nw: String,
}

impl Neighbors {
    pub fn get(&self, direction: Direction) -> &str {
        match direction {
            Direction::North => &self.n,
            Direction::NorthEast => &self.ne,
            Direction::East => &self.e,
            Direction::SouthEast => &self.se,
            Direction::South => &self.s,
            Direction::SouthWest => &self.sw,
            Direction::West => &self.w,
            Direction::NorthWest => &self.nw,
        }
    }

    /// Neighbor hashes in N, NE, E, SE, S, SW, W, NW order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        Direction::ALL.into_iter().map(move |d| self.get(d))
    }

    pub fn into_array(self) -> [String; 8] {
        [
            self.n, self.ne, self.e, self.se, self.s, self.sw, self.w, self.nw,
        ]
    }
}

/// Hash of the cell adjacent to `hash` in `direction`.
///
/// The neighbor is found by stepping one full cell width/height from the
/// cell center and re-encoding at the same precision. There is no wrap at
/// the antimeridian and no clamp at the poles: past the edge of the grid
/// the step saturates and yields the outermost cell of that row or column,
/// which can be `hash` itself.
pub fn neighbor(hash: &str, direction: Direction) -> Result<String> {
    let cell = bounds(hash)?;
    Ok(step(&cell, hash.chars().count(), direction))
}

/// All eight neighbors of `hash`. See [`neighbor`] for edge behavior.
///
/// ```rust
/// use geoddb::geohash::{Direction, neighbors};
///
/// let around = neighbors("ezs42")?;
/// assert_eq!(around.get(Direction::North), around.n);
/// assert!(around.iter().all(|h| h.len() == 5));
/// # Ok::<(), geoddb::GeoError>(())
/// ```
pub fn neighbors(hash: &str) -> Result<Neighbors> {
    let cell = bounds(hash)?;
    let precision = hash.chars().count();
    let at = |direction| step(&cell, precision, direction);

    Ok(Neighbors {
        n: at(Direction::North),
        ne: at(Direction::NorthEast),
        e: at(Direction::East),
        se: at(Direction::SouthEast),
        s: at(Direction::South),
        sw: at(Direction::SouthWest),
        w: at(Direction::West),
        nw: at(Direction::NorthWest),
    })
}

fn step(cell: &BoundingBox, precision: usize, direction: Direction) -> String {
    let center = cell.center();
    let (dlat, dlon) = direction.offsets();

    encode(
        center.lat + dlat * cell.lat_error() * 2.0,
        center.lon + dlon * cell.lon_error() * 2.0,
        precision,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeoError;

    #[test]
    fn test_reference_neighbors() {
        let around = neighbors("ezs42").unwrap();
        assert_eq!(around.n, "ezs48");
        assert_eq!(around.ne, "ezs49");
        assert_eq!(around.e, "ezs43");
        assert_eq!(around.se, "ezs41");
        assert_eq!(around.s, "ezs40");
        assert_eq!(around.sw, "ezefp");
        assert_eq!(around.w, "ezefr");
        assert_eq!(around.nw, "ezefx");
    }

    #[test]
    fn test_single_neighbor_matches_set() {
        for hash in ["dr5ru7", "z", "0", "pbpbp"] {
            let around = neighbors(hash).unwrap();
            for direction in Direction::ALL {
                assert_eq!(neighbor(hash, direction).unwrap(), around.get(direction));
            }
        }
    }

    #[test]
    fn test_iteration_order() {
        let around = neighbors("u4pruyd").unwrap();
        let listed: Vec<&str> = around.iter().collect();
        let expected = [
            around.n.as_str(),
            around.ne.as_str(),
            around.e.as_str(),
            around.se.as_str(),
            around.s.as_str(),
            around.sw.as_str(),
            around.w.as_str(),
            around.nw.as_str(),
        ];
        assert_eq!(listed, expected);
        assert_eq!(around.clone().into_array().map(|h| h.len()), [7; 8]);
    }

    #[test]
    fn test_opposite_steps_return_home() {
        let hash = "9q8yyk";
        let north = neighbor(hash, Direction::North).unwrap();
        assert_eq!(neighbor(&north, Direction::South).unwrap(), hash);
        let east = neighbor(hash, Direction::East).unwrap();
        assert_eq!(neighbor(&east, Direction::West).unwrap(), hash);
    }

    #[test]
    fn test_edge_cells_do_not_wrap() {
        // "z" is the north-east corner cell of the world at precision 1.
        let around = neighbors("z").unwrap();
        assert_eq!(around.n, "z");
        assert_eq!(around.e, "z");
        assert_eq!(around.ne, "z");
        assert_eq!(around.s, "x");
        assert_eq!(around.w, "y");
        assert_eq!(around.sw, "w");

        // "0" is the south-west corner.
        let around = neighbors("0").unwrap();
        assert_eq!(around.s, "0");
        assert_eq!(around.w, "0");
        assert_eq!(around.sw, "0");
    }

    #[test]
    fn test_invalid_hash_is_rejected() {
        assert!(matches!(
            neighbors("ezsa2"),
            Err(GeoError::InvalidHashCharacter { character: 'a', .. })
        ));
    }
}
