use crate::error::{GeoError, Result};
use geoddb_types::{BoundingBox, Coordinate};

/// The geohash base-32 alphabet (no `a`, `i`, `l`, `o`).
pub const ALPHABET: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Bits carried by one alphabet symbol.
pub const BITS_PER_CHAR: usize = 5;

/// Longest precision accepted by index configuration.
///
/// Past this length the bisection runs out of `f64` mantissa and further
/// characters stop narrowing the cell.
pub const MAX_PRECISION: usize = 20;

const INVALID: u8 = u8::MAX;

/// Inverse of [`ALPHABET`], indexed by ASCII code.
const DECODE_TABLE: [u8; 128] = {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Returns the 5-bit value of an alphabet symbol, or `None` for any other character.
pub fn symbol_index(character: char) -> Option<u8> {
    if !character.is_ascii() {
        return None;
    }
    match DECODE_TABLE[character as usize] {
        INVALID => None,
        value => Some(value),
    }
}

#[derive(Debug, Clone, Copy)]
struct Span {
    lo: f64,
    hi: f64,
}

impl Span {
    fn mid(self) -> f64 {
        (self.lo + self.hi) / 2.0
    }

    /// Keep the upper half when `upper` is set, the lower half otherwise.
    fn halve(self, upper: bool) -> Self {
        let mid = self.mid();
        if upper {
            Span { lo: mid, hi: self.hi }
        } else {
            Span { lo: self.lo, hi: mid }
        }
    }
}

/// Bisection state: even bit indices refine longitude, odd ones latitude.
#[derive(Debug, Clone, Copy)]
struct Cell {
    lat: Span,
    lon: Span,
}

impl Cell {
    const WORLD: Cell = Cell {
        lat: Span { lo: -90.0, hi: 90.0 },
        lon: Span {
            lo: -180.0,
            hi: 180.0,
        },
    };

    fn refines_lon(bit_index: usize) -> bool {
        bit_index % 2 == 0
    }

    fn split(self, bit_index: usize) -> f64 {
        if Self::refines_lon(bit_index) {
            self.lon.mid()
        } else {
            self.lat.mid()
        }
    }

    fn bisect(self, bit_index: usize, bit: bool) -> Self {
        if Self::refines_lon(bit_index) {
            Cell {
                lon: self.lon.halve(bit),
                ..self
            }
        } else {
            Cell {
                lat: self.lat.halve(bit),
                ..self
            }
        }
    }

    fn into_bbox(self) -> BoundingBox {
        BoundingBox::from_ranges((self.lat.lo, self.lat.hi), (self.lon.lo, self.lon.hi))
    }
}

/// Encode a point as a geohash of `precision` characters.
///
/// Out-of-range or non-finite coordinates are not rejected; they saturate
/// the bisection and produce the hash of an edge cell. A precision of zero
/// yields an empty string.
///
/// ```rust
/// assert_eq!(geoddb::geohash::encode(42.6, -5.6, 5), "ezs42");
/// ```
pub fn encode(lat: f64, lon: f64, precision: usize) -> String {
    let mut hash = String::with_capacity(precision);
    let mut cell = Cell::WORLD;

    for char_index in 0..precision {
        let mut symbol = 0usize;
        for offset in 0..BITS_PER_CHAR {
            let bit_index = char_index * BITS_PER_CHAR + offset;
            let value = if Cell::refines_lon(bit_index) { lon } else { lat };
            let bit = value >= cell.split(bit_index);
            cell = cell.bisect(bit_index, bit);
            symbol = (symbol << 1) | usize::from(bit);
        }
        hash.push(char::from(ALPHABET[symbol]));
    }

    hash
}

/// Bounding box of the cell a geohash denotes.
///
/// # Errors
///
/// Returns [`GeoError::InvalidHashCharacter`] for the first character that
/// is not in [`ALPHABET`]. Matching is case-sensitive.
pub fn bounds(hash: &str) -> Result<BoundingBox> {
    let cell = hash
        .chars()
        .enumerate()
        .try_fold(Cell::WORLD, |cell, (position, character)| {
            let symbol = symbol_index(character).ok_or(GeoError::InvalidHashCharacter {
                character,
                position,
            })?;

            Ok::<_, GeoError>((0..BITS_PER_CHAR).fold(cell, |cell, offset| {
                let bit = (symbol >> (BITS_PER_CHAR - 1 - offset)) & 1 == 1;
                cell.bisect(position * BITS_PER_CHAR + offset, bit)
            }))
        })?;

    Ok(cell.into_bbox())
}

/// Center of the cell a geohash denotes.
///
/// This is the cell midpoint, not the point that was originally encoded.
pub fn decode(hash: &str) -> Result<Coordinate> {
    Ok(bounds(hash)?.center())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_hash() {
        assert_eq!(encode(42.6, -5.6, 5), "ezs42");
        assert_eq!(encode(42.6, -5.6, 1), "e");
    }

    #[test]
    fn test_first_symbol_quadrants() {
        // The first bit splits on the prime meridian, the second on the equator.
        assert_eq!(encode(-89.9, -179.9, 1), "0");
        assert_eq!(encode(-50.0, -100.0, 1), "1");
        assert_eq!(encode(89.9, 179.9, 1), "z");
        assert_eq!(encode(0.0, 0.0, 1), "s");
    }

    #[test]
    fn test_zero_precision_is_empty() {
        assert_eq!(encode(12.0, 34.0, 0), "");
        let world = bounds("").unwrap();
        assert_eq!(world.lat_range(), (-90.0, 90.0));
        assert_eq!(world.lon_range(), (-180.0, 180.0));
    }

    #[test]
    fn test_bounds_of_reference_hash() {
        let cell = bounds("ezs42").unwrap();
        let (min_lat, max_lat) = cell.lat_range();
        let (min_lon, max_lon) = cell.lon_range();

        assert!((min_lat - 42.583_007_812_5).abs() < 1e-12);
        assert!((max_lat - 42.626_953_125).abs() < 1e-12);
        assert!((min_lon - -5.625).abs() < 1e-12);
        assert!((max_lon - -5.581_054_687_5).abs() < 1e-12);
    }

    #[test]
    fn test_decode_is_cell_center() {
        let center = decode("ezs42").unwrap();
        let cell = bounds("ezs42").unwrap();
        assert!((center.lat - 42.6).abs() <= cell.lat_error());
        assert!((center.lon - -5.6).abs() <= cell.lon_error());
        assert_eq!(center, cell.center());
    }

    #[test]
    fn test_rejects_characters_outside_alphabet() {
        for bad in ['a', 'i', 'l', 'o', 'A', 'E', '-', ' ', 'é'] {
            let hash = format!("ez{bad}42");
            match bounds(&hash) {
                Err(GeoError::InvalidHashCharacter {
                    character,
                    position,
                }) => {
                    assert_eq!(character, bad);
                    assert_eq!(position, 2);
                }
                other => panic!("expected invalid character error for {hash:?}, got {other:?}"),
            }
            assert!(decode(&hash).is_err());
        }
    }

    #[test]
    fn test_symbol_table_is_inverse() {
        for (i, &symbol) in ALPHABET.iter().enumerate() {
            assert_eq!(symbol_index(char::from(symbol)), Some(i as u8));
        }
        assert_eq!(symbol_index('a'), None);
        assert_eq!(symbol_index('\u{7f}'), None);
    }

    #[test]
    fn test_boundary_values_go_high() {
        // Exactly on a split: the comparison is >=, so the upper half wins.
        let hash = encode(0.0, 0.0, 2);
        let cell = bounds(&hash).unwrap();
        assert_eq!(cell.min_lat(), 0.0);
        assert_eq!(cell.min_lon(), 0.0);
    }

    #[test]
    fn test_out_of_range_saturates() {
        assert_eq!(encode(95.0, 200.0, 3), "zzz");
        assert_eq!(encode(-95.0, -200.0, 3), "000");
    }
}
