//! Seeds airports, companies and planes from the reference data, one row at a time.

use serde::Serialize;
use tracing::{info, warn};

use crate::model::{NewAirport, NewCompany, NewPlane};
use crate::reference::ReferenceData;
use crate::store::AirlineStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableReport {
    pub inserted: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub airports: TableReport,
    pub companies: TableReport,
    pub planes: TableReport,
}

pub async fn load_airports<S: AirlineStore>(store: &S, data: &ReferenceData) -> TableReport {
    let mut report = TableReport::default();

    for (code, entry) in &data.airports {
        let airport = NewAirport {
            airport_code: code.clone(),
            latitude: entry.latitude(),
            longitude: entry.longitude(),
            landing_price: entry.landing_price(),
            airport_country: entry.country().map(str::to_string),
        };
        match store.insert_airport(&airport).await {
            Ok(_) => report.inserted += 1,
            Err(e) => {
                warn!(airport = %code, error = %e, "Failed to insert airport");
                report.skipped += 1;
            }
        }
    }

    info!(inserted = report.inserted, skipped = report.skipped, "Loaded airports");
    report
}

pub async fn load_companies<S: AirlineStore>(store: &S, data: &ReferenceData) -> TableReport {
    let mut report = TableReport::default();

    for (name, company) in &data.airlines {
        let company = NewCompany {
            name: name.clone(),
            country: company.country.clone(),
            iata_code: company.iata_code.clone(),
        };
        match store.insert_company(&company).await {
            Ok(_) => report.inserted += 1,
            Err(e) => {
                warn!(company = %name, error = %e, "Failed to insert company");
                report.skipped += 1;
            }
        }
    }

    info!(inserted = report.inserted, skipped = report.skipped, "Loaded companies");
    report
}

/// Inserts the fleet of every airline found in the `company` table.
///
/// A company that already owns planes is left as is, so reruns add nothing.
pub async fn load_planes<S: AirlineStore>(store: &S, data: &ReferenceData) -> TableReport {
    let mut report = TableReport::default();

    for (airline, fleet) in &data.fleets {
        let company = match store.company_by_name(airline).await {
            Ok(Some(company)) => company,
            Ok(None) => {
                warn!(company = %airline, "Unknown company, skipping its fleet");
                report.skipped += fleet.planes.len();
                continue;
            }
            Err(e) => {
                warn!(company = %airline, error = %e, "Failed to look up company");
                report.skipped += fleet.planes.len();
                continue;
            }
        };

        match store.company_plane_count(company.company_id).await {
            Ok(0) => {}
            Ok(owned) => {
                info!(company = %airline, owned, "Fleet already loaded, skipping");
                report.skipped += fleet.planes.len();
                continue;
            }
            Err(e) => {
                warn!(company = %airline, error = %e, "Failed to count company planes");
                report.skipped += fleet.planes.len();
                continue;
            }
        }

        for key in &fleet.planes {
            let Some(spec) = data.planes.get(key) else {
                warn!(company = %airline, plane = %key, "Unknown plane model");
                report.skipped += 1;
                continue;
            };

            let plane = NewPlane {
                model: spec.model.clone(),
                manufacturer: spec.manufacturer.clone(),
                range_km: spec.range_km,
                passenger_capacity: spec.capacity,
                cruising_speed_kph: spec.cruising_speed_kph,
                weight_kg: spec.weight_kg,
                tank_capacity_gallon: spec.tank_capacity_gallon,
                company_id: company.company_id,
            };
            match store.insert_plane(&plane).await {
                Ok(_) => report.inserted += 1,
                Err(e) => {
                    warn!(company = %airline, plane = %key, error = %e, "Failed to insert plane");
                    report.skipped += 1;
                }
            }
        }
    }

    info!(inserted = report.inserted, skipped = report.skipped, "Loaded planes");
    report
}

/// Airports, then companies, then planes (which need the company ids).
pub async fn load_reference_data<S: AirlineStore>(store: &S, data: &ReferenceData) -> LoadReport {
    LoadReport {
        airports: load_airports(store, data).await,
        companies: load_companies(store, data).await,
        planes: load_planes(store, data).await,
    }
}
