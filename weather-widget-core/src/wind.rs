use crate::{compass::CompassPoint, config::UnitSystem};

/// Format wind as `"<speed> <unit> <compass>"`, e.g. `"8.5 km/h W"`.
///
/// The speed is printed as the provider sent it, without rounding.
pub fn format_wind(speed: f64, direction_deg: f64, units: UnitSystem) -> String {
    format!("{} {} {}", speed, units.speed_unit(), CompassPoint::from_degrees(direction_deg))
}
