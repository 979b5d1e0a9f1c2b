use rand::seq::SliceRandom;
use rand::Rng;

use crate::reference::{AirlineFleet, Airlines, Fleets, Planes};

/// Gives every airline between `min_planes` and `max_planes` distinct plane models,
/// capped at the number of models available.
pub fn generate_airline_plane_data<R: Rng + ?Sized>(
    rng: &mut R,
    airlines: &Airlines,
    planes: &Planes,
    min_planes: usize,
    max_planes: usize,
) -> Fleets {
    let models: Vec<&String> = planes.keys().collect();
    let max_planes = max_planes.max(min_planes);

    airlines
        .iter()
        .map(|(name, details)| {
            let wanted = rng.gen_range(min_planes..=max_planes).min(models.len());
            let selected = models
                .choose_multiple(rng, wanted)
                .map(|m| (*m).clone())
                .collect();

            (
                name.clone(),
                AirlineFleet {
                    country: details.country.clone(),
                    iata_code: details.iata_code.clone(),
                    planes: selected,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{AirlineCompany, PlaneSpec};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn airlines() -> Airlines {
        [("Air France", "FR", "AF"), ("Lufthansa", "DE", "LH")]
            .into_iter()
            .map(|(name, country, iata)| {
                (
                    name.to_string(),
                    AirlineCompany {
                        country: country.to_string(),
                        iata_code: iata.to_string(),
                    },
                )
            })
            .collect()
    }

    fn planes(n: usize) -> Planes {
        (0..n)
            .map(|i| {
                (
                    format!("P{i}"),
                    PlaneSpec {
                        model: format!("Model {i}"),
                        manufacturer: "Airbus".to_string(),
                        range_km: 5000,
                        capacity: 150,
                        cruising_speed_kph: Some(800),
                        weight_kg: Some(40_000),
                        tank_capacity_gallon: Some(6_000),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn fleet_sizes_within_bounds_without_duplicates() {
        let mut rng = StdRng::seed_from_u64(12);
        let fleets = generate_airline_plane_data(&mut rng, &airlines(), &planes(80), 10, 50);

        assert_eq!(fleets.len(), 2);
        for (name, fleet) in &fleets {
            assert!((10..=50).contains(&fleet.planes.len()), "{name}");
            let unique: HashSet<_> = fleet.planes.iter().collect();
            assert_eq!(unique.len(), fleet.planes.len());
        }
        assert_eq!(fleets["Lufthansa"].iata_code, "LH");
    }

    #[test]
    fn capped_by_available_models() {
        let mut rng = StdRng::seed_from_u64(3);
        let fleets = generate_airline_plane_data(&mut rng, &airlines(), &planes(4), 10, 50);
        assert!(fleets.values().all(|f| f.planes.len() == 4));
    }
}
