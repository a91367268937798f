//! 100 km square letter tables
//!
//! Column letters advance eastward from an origin letter that rotates with a
//! six-zone period; row letters cycle A..V every 2 000 km of northing. Both
//! alphabets skip I and O.

use crate::{MgrsError, Result};

/// Number of distinct 100 km letter sets before the pattern repeats
pub const NUM_100K_SETS: u8 = 6;

/// Side of one grid square in metres
pub const SQUARE_SIZE_M: f64 = 100_000.0;

/// Northing span covered by one pass through the row alphabet
pub const ROW_CYCLE_M: f64 = 2_000_000.0;

const SET_ORIGIN_COLUMN_LETTERS: &[u8; 6] = b"AJSAJS";
const SET_ORIGIN_ROW_LETTERS: &[u8; 6] = b"AFAFAF";

/// Latitude band letters, south to north (80°S..84°N)
pub const BAND_LETTERS: &[u8; 20] = b"CDEFGHJKLMNPQRSTUVWX";

/// Letter set (1..=6) used by a UTM zone
pub fn set_for_zone(zone: u8) -> u8 {
    match zone % NUM_100K_SETS {
        0 => NUM_100K_SETS,
        set => set,
    }
}

/// Easting of the west edge of the square named by `column`.
///
/// Scans forward from the set's origin letter; the origin itself is the
/// 100 000 m column.
pub fn column_easting(column: char, set: u8) -> Result<f64> {
    let target = ascii_letter(column)?;
    let mut current = SET_ORIGIN_COLUMN_LETTERS[origin_index(set)];
    let mut easting = SQUARE_SIZE_M;
    let mut wrapped = false;

    while current != target {
        current += 1;
        if current == b'I' {
            current += 1;
        }
        if current == b'O' {
            current += 1;
        }
        if current > b'Z' {
            if wrapped {
                return Err(MgrsError::LetterWrap(column));
            }
            current = b'A';
            wrapped = true;
        }
        easting += SQUARE_SIZE_M;
    }

    Ok(easting)
}

/// Northing of the south edge of the square named by `row`, modulo the
/// 2 000 km row cycle.
pub fn row_northing(row: char, set: u8) -> Result<f64> {
    let target = ascii_letter(row)?;
    if target > b'V' {
        return Err(MgrsError::RowOutOfRange(row));
    }

    let mut current = SET_ORIGIN_ROW_LETTERS[origin_index(set)];
    let mut northing = 0.0;
    let mut wrapped = false;

    while current != target {
        current += 1;
        if current == b'I' {
            current += 1;
        }
        if current == b'O' {
            current += 1;
        }
        if current > b'V' {
            if wrapped {
                return Err(MgrsError::LetterWrap(row));
            }
            current = b'A';
            wrapped = true;
        }
        northing += SQUARE_SIZE_M;
    }

    Ok(northing)
}

/// Lowest northing a latitude band can contain
pub fn min_northing(band: char) -> Result<f64> {
    let metres = match band {
        'C' => 1_100_000.0,
        'D' => 2_000_000.0,
        'E' => 2_800_000.0,
        'F' => 3_700_000.0,
        'G' => 4_600_000.0,
        'H' => 5_500_000.0,
        'J' => 6_400_000.0,
        'K' => 7_300_000.0,
        'L' => 8_200_000.0,
        'M' => 9_100_000.0,
        'N' => 0.0,
        'P' => 800_000.0,
        'Q' => 1_700_000.0,
        'R' => 2_600_000.0,
        'S' => 3_500_000.0,
        'T' => 4_400_000.0,
        'U' => 5_300_000.0,
        'V' => 6_200_000.0,
        'W' => 7_000_000.0,
        'X' => 7_900_000.0,
        other => return Err(MgrsError::UnknownBand(other)),
    };
    Ok(metres)
}

/// Resolve the row letter's 2 000 km ambiguity against the band floor
pub fn resolve_northing(raw_northing: f64, band: char) -> Result<f64> {
    let floor = min_northing(band)?;
    let mut northing = raw_northing;
    while northing < floor {
        northing += ROW_CYCLE_M;
    }
    Ok(northing)
}

fn origin_index(set: u8) -> usize {
    (set.clamp(1, NUM_100K_SETS) - 1) as usize
}

fn ascii_letter(c: char) -> Result<u8> {
    if c.is_ascii_uppercase() {
        Ok(c as u8)
    } else {
        Err(MgrsError::Malformed(format!("expected a grid letter, found {c:?}")))
    }
}
