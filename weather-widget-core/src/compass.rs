use std::fmt;

/// One of the 16 points of the compass rose, clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompassPoint {
    N,
    Nne,
    Ne,
    Ene,
    E,
    Ese,
    Se,
    Sse,
    S,
    Ssw,
    Sw,
    Wsw,
    W,
    Wnw,
    Nw,
    Nnw,
}

const SECTOR_WIDTH: f64 = 22.5;
const HALF_SECTOR: f64 = SECTOR_WIDTH / 2.0;

impl CompassPoint {
    pub const fn all() -> &'static [CompassPoint; 16] {
        use CompassPoint::*;
        &[N, Nne, Ne, Ene, E, Ese, Se, Sse, S, Ssw, Sw, Wsw, W, Wnw, Nw, Nnw]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::Nne => "NNE",
            CompassPoint::Ne => "NE",
            CompassPoint::Ene => "ENE",
            CompassPoint::E => "E",
            CompassPoint::Ese => "ESE",
            CompassPoint::Se => "SE",
            CompassPoint::Sse => "SSE",
            CompassPoint::S => "S",
            CompassPoint::Ssw => "SSW",
            CompassPoint::Sw => "SW",
            CompassPoint::Wsw => "WSW",
            CompassPoint::W => "W",
            CompassPoint::Wnw => "WNW",
            CompassPoint::Nw => "NW",
            CompassPoint::Nnw => "NNW",
        }
    }

    /// Map a wind direction in degrees to its compass point.
    ///
    /// Sectors are 22.5° wide and closed on their upper edge, so `11.25` is
    /// still `N` while `11.26` is `NNE`. North covers `[0, 11.25]` and
    /// `(348.75, 360]`.
    ///
    /// Callers must pass `0 <= deg < 360`. Values outside that range are
    /// wrapped, and `NaN` maps to `N`.
    pub fn from_degrees(deg: f64) -> Self {
        let deg = if deg == 360.0 { deg } else { deg.rem_euclid(360.0) };
        if deg <= HALF_SECTOR || deg > 360.0 - HALF_SECTOR {
            return CompassPoint::N;
        }

        // (11.25, 33.75] -> 1, (33.75, 56.25] -> 2, ...
        let idx = ((deg - HALF_SECTOR) / SECTOR_WIDTH).ceil() as usize;
        Self::all()[idx.min(15)]
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shorthand for [`CompassPoint::from_degrees`] returning the label.
pub fn degrees_to_compass(deg: f64) -> &'static str {
    CompassPoint::from_degrees(deg).as_str()
}
