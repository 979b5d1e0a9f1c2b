//! Per-flight building blocks: plane choice, duration, schedule, load and code.

use chrono::{Duration, NaiveDateTime, Timelike};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};
use crate::model::Plane;

const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Below this nobody bothers to fly the plane.
pub const MIN_PASSENGERS: i32 = 3;

/// Picks one of the planes able to cover `distance` km.
pub fn select_plane<'a, R: Rng + ?Sized>(
    rng: &mut R,
    candidates: &'a [Plane],
    distance: i32,
) -> Result<&'a Plane> {
    candidates
        .choose(rng)
        .ok_or(Error::NoPlaneInRange { distance })
}

pub fn flight_time_minutes(distance: i32, plane: &Plane) -> Result<i32> {
    let speed = plane
        .cruising_speed_kph
        .filter(|s| *s > 0)
        .ok_or_else(|| Error::MissingCruisingSpeed {
            model: plane.model.clone(),
        })?;

    let hours = distance as f64 / speed as f64;
    Ok((hours * 60.0) as i32)
}

/// `base` moved by `minutes`, or [`Error::DateOutOfRange`] past chrono's calendar.
pub fn shift_minutes(base: NaiveDateTime, minutes: i64) -> Result<NaiveDateTime> {
    Duration::try_minutes(minutes)
        .and_then(|delta| base.checked_add_signed(delta))
        .ok_or(Error::DateOutOfRange { base, minutes })
}

pub fn arrival_time(departure: NaiveDateTime, flight_minutes: i32) -> Result<NaiveDateTime> {
    shift_minutes(departure, flight_minutes as i64)
}

/// A departure within `horizon_days` of `now`, on a five minute boundary.
pub fn random_departure_time<R: Rng + ?Sized>(
    rng: &mut R,
    now: NaiveDateTime,
    horizon_days: u32,
) -> Result<NaiveDateTime> {
    let now = now.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(now);
    if horizon_days == 0 {
        return Ok(now);
    }

    let offset = rng.gen_range(0..horizon_days as i64 * 24 * 60);
    let departure = shift_minutes(now, offset)?;
    shift_minutes(departure, -((departure.minute() % 5) as i64))
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Occupancy {
    Full,
    AlmostFull,
    HalfFull,
    LowFull,
}

const OCCUPANCY: [(Occupancy, f64); 4] = [
    (Occupancy::Full, 0.75),
    (Occupancy::AlmostFull, 0.15),
    (Occupancy::HalfFull, 0.05),
    (Occupancy::LowFull, 0.05),
];

/// Number of passengers on board:
/// - 75% of the time the plane is full
/// - 15% of the time it is 80-90% full
/// - 5% of the time it is 40-50% full
/// - 5% of the time it is 10-30% full
///
/// Never less than [`MIN_PASSENGERS`].
pub fn passenger_count<R: Rng + ?Sized>(rng: &mut R, capacity: i32) -> i32 {
    let roll: f64 = rng.gen();
    let mut cumulative = 0.0;
    let scenario = OCCUPANCY
        .iter()
        .find(|(_, weight)| {
            cumulative += weight;
            roll < cumulative
        })
        .map_or(Occupancy::LowFull, |(occupancy, _)| *occupancy);

    let between = |rng: &mut R, low: f64, high: f64| {
        let low = (low * capacity as f64) as i32;
        let high = (high * capacity as f64) as i32;
        rng.gen_range(low..=high.max(low))
    };

    let count = match scenario {
        Occupancy::Full => capacity,
        Occupancy::AlmostFull => between(rng, 0.80, 0.90),
        Occupancy::HalfFull => between(rng, 0.40, 0.50),
        Occupancy::LowFull => between(rng, 0.10, 0.30),
    };
    count.max(MIN_PASSENGERS)
}

fn random_block<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())] as char)
        .collect()
}

/// `AF-X7K2QZ` when the operating company has an IATA code, `X7K2QZ-P0L9MB` otherwise.
pub fn flight_code<R: Rng + ?Sized>(rng: &mut R, company_iata: Option<&str>) -> String {
    match company_iata.map(str::trim).filter(|c| !c.is_empty()) {
        Some(iata) => format!("{}-{}", iata.to_uppercase(), random_block(rng, 6)),
        None => format!("{}-{}", random_block(rng, 6), random_block(rng, 6)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn plane(range_km: i32, speed: Option<i32>) -> Plane {
        Plane {
            plane_id: range_km,
            model: "A320".to_string(),
            manufacturer: "Airbus".to_string(),
            range_km,
            passenger_capacity: 180,
            cruising_speed_kph: speed,
            weight_kg: Some(42_600),
            tank_capacity_gallon: Some(6_400),
            company_id: Some(1),
        }
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn flight_time_truncates_minutes() {
        assert_eq!(flight_time_minutes(1000, &plane(6000, Some(800))).unwrap(), 75);
        assert_eq!(flight_time_minutes(1001, &plane(6000, Some(800))).unwrap(), 75);
    }

    #[test]
    fn flight_time_needs_a_speed() {
        assert!(matches!(
            flight_time_minutes(1000, &plane(6000, None)),
            Err(Error::MissingCruisingSpeed { .. })
        ));
        assert!(flight_time_minutes(1000, &plane(6000, Some(0))).is_err());
    }

    #[test]
    fn no_candidate_plane_is_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            select_plane(&mut rng, &[], 9000),
            Err(Error::NoPlaneInRange { distance: 9000 })
        ));

        let planes = [plane(6000, Some(800)), plane(12000, Some(900))];
        let chosen = select_plane(&mut rng, &planes, 5000).unwrap();
        assert!(planes.contains(chosen));
    }

    #[test]
    fn passenger_count_stays_within_capacity() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut full = 0;
        for _ in 0..2000 {
            let n = passenger_count(&mut rng, 180);
            assert!((18..=180).contains(&n), "got {n}");
            if n == 180 {
                full += 1;
            }
        }
        // 75% expected
        assert!((1350..=1650).contains(&full), "full flights: {full}");
    }

    #[test]
    fn tiny_planes_still_carry_three() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            assert!(passenger_count(&mut rng, 4) >= MIN_PASSENGERS);
        }
    }

    #[test]
    fn departure_is_within_horizon_on_five_minutes() {
        let mut rng = StdRng::seed_from_u64(11);
        let now = noon() + Duration::seconds(42);
        for _ in 0..100 {
            let d = random_departure_time(&mut rng, now, 30).unwrap();
            assert!(d >= noon() - Duration::minutes(5));
            assert!(d < noon() + Duration::days(30));
            assert_eq!(d.minute() % 5, 0);
            assert_eq!(d.second(), 0);
        }
        assert_eq!(random_departure_time(&mut rng, now, 0).unwrap(), noon());
    }

    #[test]
    fn huge_horizon_is_an_error_not_a_panic() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut out_of_range = 0;
        for _ in 0..20 {
            match random_departure_time(&mut rng, noon(), u32::MAX) {
                Ok(d) => assert!(d >= noon() - Duration::minutes(5)),
                Err(Error::DateOutOfRange { .. }) => out_of_range += 1,
                Err(e) => panic!("unexpected error {e}"),
            }
        }
        // chrono stops about 262 000 years out, the horizon is millions
        assert!(out_of_range > 10, "got {out_of_range}");
    }

    #[test]
    fn arrival_adds_flight_minutes() {
        assert_eq!(arrival_time(noon(), 135).unwrap(), noon() + Duration::minutes(135));
        assert!(arrival_time(NaiveDateTime::MAX, 1).is_err());
    }

    #[test]
    fn codes_follow_company_prefix() {
        let mut rng = StdRng::seed_from_u64(5);

        let code = flight_code(&mut rng, Some("af"));
        assert!(code.starts_with("AF-"));
        assert_eq!(code.len(), 9);

        let code = flight_code(&mut rng, None);
        assert_eq!(code.len(), 13);
        assert_eq!(code.as_bytes()[6], b'-');
        assert!(code
            .chars()
            .filter(|c| *c != '-')
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }
}
