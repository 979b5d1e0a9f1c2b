use crate::model::Airport;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres between two points given in degrees.
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Whole kilometres between two airports, truncated.
pub fn distance_between(departure: &Airport, arrival: &Airport) -> i32 {
    haversine(
        departure.latitude,
        departure.longitude,
        arrival.latitude,
        arrival.longitude,
    ) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airport(code: &str, latitude: f64, longitude: f64) -> Airport {
        Airport {
            airport_id: 1,
            airport_code: code.to_string(),
            latitude,
            longitude,
            landing_price: None,
            airport_country: None,
        }
    }

    #[test]
    fn paris_to_new_york() {
        let cdg = airport("CDG", 49.0097, 2.5479);
        let jfk = airport("JFK", 40.6413, -73.7781);

        let d = distance_between(&cdg, &jfk);
        assert!((5830..=5840).contains(&d), "got {d}");
        assert_eq!(d, distance_between(&jfk, &cdg));
    }

    #[test]
    fn same_point_is_zero() {
        assert_eq!(haversine(10.0, 20.0, 10.0, 20.0), 0.0);
    }

    #[test]
    fn antipodes_are_half_the_circumference() {
        let d = haversine(0.0, 0.0, 0.0, 180.0);
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }
}
