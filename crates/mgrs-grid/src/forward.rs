//! Forward projection used only to check decoder round trips

use crate::letters::BAND_LETTERS;
use crate::utm::{central_meridian, ECC_SQUARED, EASTING_OFFSET_M, NORTHING_OFFSET_M, SCALE_FACTOR, SEMI_MAJOR_AXIS_M};

const COLUMN_LETTERS: [&[u8; 8]; 3] = [b"ABCDEFGH", b"JKLMNPQR", b"STUVWXYZ"];
const ROW_LETTERS: &[u8; 20] = b"ABCDEFGHJKLMNPQRSTUV";

pub struct Forward {
    pub zone: u8,
    pub band: char,
    pub easting: f64,
    pub northing: f64,
}

pub fn lat_lon_to_utm(lat: f64, lon: f64) -> Forward {
    let zone = (((lon + 180.0) / 6.0).floor() as i32 + 1).clamp(1, 60) as u8;
    let a = SEMI_MAJOR_AXIS_M;
    let e2 = ECC_SQUARED;
    let ep2 = e2 / (1.0 - e2);
    let phi = lat.to_radians();

    let n = a / (1.0 - e2 * phi.sin().powi(2)).sqrt();
    let t = phi.tan().powi(2);
    let c = ep2 * phi.cos().powi(2);
    let big_a = phi.cos() * (lon - central_meridian(zone)).to_radians();
    let m = a
        * ((1.0 - e2 / 4.0 - 3.0 * e2 * e2 / 64.0 - 5.0 * e2.powi(3) / 256.0) * phi
            - (3.0 * e2 / 8.0 + 3.0 * e2 * e2 / 32.0 + 45.0 * e2.powi(3) / 1024.0) * (2.0 * phi).sin()
            + (15.0 * e2 * e2 / 256.0 + 45.0 * e2.powi(3) / 1024.0) * (4.0 * phi).sin()
            - (35.0 * e2.powi(3) / 3072.0) * (6.0 * phi).sin());

    let easting = SCALE_FACTOR
        * n
        * (big_a
            + (1.0 - t + c) * big_a.powi(3) / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * big_a.powi(5) / 120.0)
        + EASTING_OFFSET_M;
    let mut northing = SCALE_FACTOR
        * (m + n
            * phi.tan()
            * (big_a * big_a / 2.0
                + (5.0 - t + 9.0 * c + 4.0 * c * c) * big_a.powi(4) / 24.0
                + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * big_a.powi(6) / 720.0));
    if lat < 0.0 {
        northing += NORTHING_OFFSET_M;
    }

    let band_index = (((lat + 80.0) / 8.0).floor() as i32).clamp(0, 19) as usize;
    Forward {
        zone,
        band: BAND_LETTERS[band_index] as char,
        easting,
        northing,
    }
}

impl Forward {
    /// 100 km square id computed from the standard lettering scheme
    pub fn square_id(&self) -> String {
        let set = crate::letters::set_for_zone(self.zone) as usize;
        let column_index = (self.easting / 100_000.0).floor() as usize;
        let column = COLUMN_LETTERS[(set - 1) % 3][column_index - 1] as char;
        let row_offset = if set % 2 == 0 { 5 } else { 0 };
        let row_index = ((self.northing / 100_000.0).floor() as usize + row_offset) % 20;
        let row = ROW_LETTERS[row_index] as char;
        format!("{}{}{}{}", self.zone, self.band, column, row)
    }
}
