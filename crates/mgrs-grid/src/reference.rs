//! Grid reference parsing
//!
//! Accepts `{zone}{band}{column}{row}[digits]`, e.g. `43UCR` or
//! `33UXP0412`, after stripping everything that is not an ASCII letter or
//! digit and upper-casing the rest.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::letters::{self, SQUARE_SIZE_M};
use crate::utm::UtmCoordinate;
use crate::{BoundingBox, GridPoint, LatLon, MgrsError, Result};

/// Maximum number of sub-square digits (5 + 5, one metre)
pub const MAX_DIGITS: usize = 10;

/// Upper-case the input and keep only ASCII letters and digits
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// A parsed MGRS grid reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridReference {
    zone: u8,
    band: char,
    column: char,
    row: char,
    digits: String,
}

impl GridReference {
    pub fn parse(text: &str) -> Result<Self> {
        let value = normalize(text);
        if value.is_empty() {
            return Err(MgrsError::Empty);
        }

        let zone_len = value.chars().take_while(|c| c.is_ascii_digit()).count();
        if zone_len == 0 || zone_len > 2 {
            return Err(MgrsError::Malformed(value));
        }
        let zone: u8 = value[..zone_len]
            .parse()
            .map_err(|_| MgrsError::Malformed(value.clone()))?;
        if !(1..=60).contains(&zone) {
            return Err(MgrsError::InvalidZone(zone));
        }

        let mut rest = value[zone_len..].chars();
        let band = rest.next().ok_or_else(|| MgrsError::Malformed(value.clone()))?;
        if !letters::BAND_LETTERS.contains(&(band as u8)) {
            return Err(MgrsError::UnknownBand(band));
        }

        let column = rest.next().ok_or_else(|| MgrsError::Malformed(value.clone()))?;
        let row = rest.next().ok_or_else(|| MgrsError::Malformed(value.clone()))?;
        for letter in [column, row] {
            if !letter.is_ascii_uppercase() {
                return Err(MgrsError::Malformed(value.clone()));
            }
            if letter == 'I' || letter == 'O' {
                return Err(MgrsError::ExcludedLetter(letter));
            }
        }

        let digits: String = rest.collect();
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(MgrsError::Malformed(value.clone()));
        }
        if digits.len() % 2 != 0 {
            return Err(MgrsError::OddPrecision(digits.len()));
        }
        if digits.len() > MAX_DIGITS {
            return Err(MgrsError::PrecisionTooFine(digits.len()));
        }

        Ok(Self { zone, band, column, row, digits })
    }

    pub fn zone(&self) -> u8 {
        self.zone
    }

    pub fn band(&self) -> char {
        self.band
    }

    /// Two-letter 100 km square designator, e.g. `CR`
    pub fn square(&self) -> String {
        format!("{}{}", self.column, self.row)
    }

    /// Zone, band and square without sub-square digits, e.g. `43UCR`
    pub fn square_id(&self) -> String {
        format!("{}{}{}{}", self.zone, self.band, self.column, self.row)
    }

    /// Canonical text including any sub-square digits
    pub fn canonical(&self) -> String {
        format!("{}{}", self.square_id(), self.digits)
    }

    pub fn has_digits(&self) -> bool {
        !self.digits.is_empty()
    }

    /// Side of the cell this reference resolves to, in metres
    pub fn accuracy_m(&self) -> f64 {
        let half = self.digits.len() / 2;
        SQUARE_SIZE_M / 10f64.powi(half as i32)
    }

    /// UTM coordinate of the south-west corner of the referenced cell
    pub fn origin(&self) -> Result<UtmCoordinate> {
        let set = letters::set_for_zone(self.zone);
        let east100k = letters::column_easting(self.column, set)?;
        let raw_north = letters::row_northing(self.row, set)?;
        let north100k = letters::resolve_northing(raw_north, self.band)?;

        let (sub_east, sub_north) = if self.has_digits() {
            let half = self.digits.len() / 2;
            let accuracy = self.accuracy_m();
            let (e, n) = self.digits.split_at(half);
            let e: u32 = e.parse().map_err(|_| MgrsError::Malformed(self.canonical()))?;
            let n: u32 = n.parse().map_err(|_| MgrsError::Malformed(self.canonical()))?;
            (e as f64 * accuracy, n as f64 * accuracy)
        } else {
            (0.0, 0.0)
        };

        Ok(UtmCoordinate {
            zone: self.zone,
            band: self.band,
            easting: east100k + sub_east,
            northing: north100k + sub_north,
        })
    }

    /// South-west corner of the cell
    pub fn south_west(&self) -> Result<GridPoint> {
        let ll = self.origin()?.to_lat_lon()?;
        Ok(GridPoint::new(ll, self.accuracy_m()))
    }

    /// Centre of the cell
    pub fn center(&self) -> Result<GridPoint> {
        let half = self.accuracy_m() / 2.0;
        let ll: LatLon = self.origin()?.offset(half, half).to_lat_lon()?;
        Ok(GridPoint::new(ll, self.accuracy_m()))
    }

    /// Geodetic box between the south-west and north-east corners
    pub fn bounds(&self) -> Result<BoundingBox> {
        self.origin()?.bounds(self.accuracy_m())
    }
}

impl FromStr for GridReference {
    type Err = MgrsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for GridReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}
