use std::fmt::Write as _;

/// Hundredths of an arc-second per degree.
const CENTISECONDS_PER_DEG: f64 = 360_000.0;

/// Format an angle in degrees as degrees/minutes/seconds with a hemisphere
/// letter, e.g. `45°30'W` or `12°3'7.20"N`.
///
/// Seconds are rounded to hundredths and carried into minutes and degrees.
/// The minutes segment is omitted when minutes and seconds are both zero, and
/// the seconds segment when seconds are zero. Zero counts as N/E.
pub fn degrees_to_dms(deg: f64, is_lat: bool) -> String {
    let hemisphere = match (is_lat, deg >= 0.0) {
        (true, true) => 'N',
        (true, false) => 'S',
        (false, true) => 'E',
        (false, false) => 'W',
    };

    let total = (deg.abs() * CENTISECONDS_PER_DEG).round() as u64;
    let degrees = total / 360_000;
    let minutes = (total % 360_000) / 6_000;
    let centiseconds = total % 6_000;

    let mut out = format!("{degrees}°");
    if minutes != 0 || centiseconds != 0 {
        let _ = write!(out, "{minutes}'");
    }
    if centiseconds != 0 {
        let _ = write!(out, "{}.{:02}\"", centiseconds / 100, centiseconds % 100);
    }
    out.push(hemisphere);
    out
}

#[cfg(test)]
mod tests {
    use super::degrees_to_dms;
    use pretty_assertions::assert_eq;

    #[test]
    fn zero_latitude_is_north() {
        assert_eq!(degrees_to_dms(0.0, true), "0°N");
    }

    #[test]
    fn negative_longitude_is_west_with_minutes() {
        assert_eq!(degrees_to_dms(-45.5, false), "45°30'W");
    }

    #[test]
    fn whole_degrees_omit_minutes_and_seconds() {
        assert_eq!(degrees_to_dms(180.0, false), "180°E");
        assert_eq!(degrees_to_dms(-10.0, true), "10°S");
    }

    #[test]
    fn seconds_are_shown_with_two_decimals() {
        assert_eq!(degrees_to_dms(12.0525, true), "12°3'9.00\"N");
        assert_eq!(degrees_to_dms(0.0005, false), "0°0'1.80\"E");
    }

    #[test]
    fn rounding_carries_into_degrees() {
        assert_eq!(degrees_to_dms(29.999_999_9, true), "30°N");
    }
}
