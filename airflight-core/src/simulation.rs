//! Flight simulation: route, plane, schedule, passengers, tickets and fuel.

use chrono::{NaiveDateTime, Utc};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::flight::{
    arrival_time, flight_code, flight_time_minutes, passenger_count, random_departure_time,
    select_plane,
};
use crate::geo::distance_between;
use crate::model::{Airport, Company, Flight, FlightRecord, Plane};
use crate::passengers::generate_passengers;
use crate::pricing::{company_ledger, compute_ticket_price, plane_fuel_cost};
use crate::store::AirlineStore;

/// A simulated flight, ready to be written.
#[derive(Debug, Clone, Serialize)]
pub struct FlightPlan {
    pub departure: Airport,
    pub arrival: Airport,
    pub plane: Plane,
    pub company: Option<Company>,
    pub record: FlightRecord,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub planned: usize,
    pub recorded: usize,
    pub failed: usize,
}

pub async fn pick_two_airports<S: AirlineStore>(store: &S) -> Result<(Airport, Airport)> {
    let mut airports = store.random_airports(2).await?;
    if airports.len() < 2 {
        return Err(Error::NotEnoughAirports {
            found: airports.len(),
        });
    }
    let arrival = airports.swap_remove(1);
    let departure = airports.swap_remove(0);
    Ok((departure, arrival))
}

/// Builds everything about a flight between two airports.
pub async fn plan_flight<S: AirlineStore, R: Rng + ?Sized>(
    store: &S,
    rng: &mut R,
    settings: &Settings,
    barrel_price: f64,
    now: NaiveDateTime,
    departure: Airport,
    arrival: Airport,
) -> Result<FlightPlan> {
    let distance = distance_between(&departure, &arrival);

    let candidates = store.planes_in_range(distance).await?;
    let plane = select_plane(rng, &candidates, distance)?.clone();

    let company = match plane.company_id {
        Some(id) => store.company(id).await?,
        None => None,
    };
    let code = flight_code(rng, company.as_ref().and_then(|c| c.iata_code.as_deref()));

    let minutes = flight_time_minutes(distance, &plane)?;
    let nb_passenger = passenger_count(rng, plane.passenger_capacity);
    let time_departure =
        random_departure_time(rng, now, settings.simulation.departure_horizon_days)?;
    let time_arrival = arrival_time(time_departure, minutes)?;

    let mut passengers = generate_passengers(rng, nb_passenger as usize);
    compute_ticket_price(
        rng,
        &settings.pricing,
        nb_passenger,
        plane.passenger_capacity,
        distance,
        time_departure,
        &mut passengers,
    )?;

    let consumption =
        plane_fuel_cost(&plane, barrel_price, distance, nb_passenger, &settings.fuel)?;

    let incomes = match &company {
        Some(c) => company_ledger(
            c.company_id,
            time_departure,
            &passengers,
            &consumption,
            arrival.landing_price,
        ),
        None => Vec::new(),
    };

    debug!(
        flight_code = %code,
        from = %departure.airport_code,
        to = %arrival.airport_code,
        from_country = departure.airport_country.as_deref().unwrap_or("?"),
        to_country = arrival.airport_country.as_deref().unwrap_or("?"),
        distance,
        plane = %plane.model,
        speed = ?plane.cruising_speed_kph,
        minutes,
        passengers = nb_passenger,
        capacity = plane.passenger_capacity,
        %time_departure,
        %time_arrival,
        "Planned flight"
    );

    let record = FlightRecord {
        flight_code: code,
        airport_departure: departure.airport_id,
        airport_arrival: arrival.airport_id,
        time_departure,
        time_arrival,
        distance,
        flight_time_minutes: minutes,
        nb_passenger,
        plane_id: plane.plane_id,
        passengers,
        consumption,
        incomes,
    };

    Ok(FlightPlan {
        departure,
        arrival,
        plane,
        company,
        record,
    })
}

async fn simulate_one<S: AirlineStore, R: Rng + ?Sized>(
    store: &S,
    rng: &mut R,
    settings: &Settings,
    barrel_price: f64,
    persist: bool,
    summary: &mut RunSummary,
) -> Result<()> {
    let (departure, arrival) = pick_two_airports(store).await?;
    let now = Utc::now().naive_utc();
    let plan = plan_flight(store, rng, settings, barrel_price, now, departure, arrival).await?;
    summary.planned += 1;

    log_plan(&plan);
    if persist {
        store.record_flight(&plan.record).await?;
        summary.recorded += 1;
    }
    Ok(())
}

fn log_plan(plan: &FlightPlan) {
    let r = &plan.record;
    info!(
        flight_code = %r.flight_code,
        from = %plan.departure.airport_code,
        to = %plan.arrival.airport_code,
        distance = r.distance,
        plane = %plan.plane.model,
        passengers = r.nb_passenger,
        fuel_gallons = r.consumption.total_fuel_volume_gallons,
        fuel_dollar = r.consumption.total_fuel_price_dollar,
        "Simulated flight"
    );
}

/// Simulates `count` flights between random airports, one at a time.
///
/// A failing flight is logged and skipped; the run goes on.
#[instrument(skip(store, rng, settings))]
pub async fn simulate_flights<S: AirlineStore, R: Rng + ?Sized>(
    store: &S,
    rng: &mut R,
    settings: &Settings,
    barrel_price: f64,
    count: usize,
    persist: bool,
) -> RunSummary {
    let mut summary = RunSummary::default();

    for i in 0..count {
        if let Err(e) =
            simulate_one(store, rng, settings, barrel_price, persist, &mut summary).await
        {
            warn!(flight = i + 1, error = %e, "Error in the simulator");
            summary.failed += 1;
        }
    }

    info!(
        planned = summary.planned,
        recorded = summary.recorded,
        failed = summary.failed,
        "Simulation finished"
    );
    summary
}

/// Inserts `count` pending flights: route and distance only.
#[instrument(skip(store))]
pub async fn schedule_flights<S: AirlineStore>(store: &S, count: usize) -> Result<Vec<i32>> {
    let mut ids = Vec::with_capacity(count);

    for _ in 0..count {
        let (departure, arrival) = pick_two_airports(store).await?;
        let distance = distance_between(&departure, &arrival);
        let id = store
            .insert_pending_flight(departure.airport_id, arrival.airport_id, distance)
            .await?;
        info!(
            flight_id = id,
            from = %departure.airport_code,
            to = %arrival.airport_code,
            distance,
            "Scheduled flight"
        );
        ids.push(id);
    }

    Ok(ids)
}

async fn complete_one<S: AirlineStore, R: Rng + ?Sized>(
    store: &S,
    rng: &mut R,
    settings: &Settings,
    barrel_price: f64,
    flight: &Flight,
    persist: bool,
    summary: &mut RunSummary,
) -> Result<()> {
    let departure = store
        .airport(flight.airport_departure)
        .await?
        .ok_or(Error::UnknownAirport(flight.airport_departure))?;
    let arrival = store
        .airport(flight.airport_arrival)
        .await?
        .ok_or(Error::UnknownAirport(flight.airport_arrival))?;

    let now = Utc::now().naive_utc();
    let plan = plan_flight(store, rng, settings, barrel_price, now, departure, arrival).await?;
    summary.planned += 1;

    log_plan(&plan);
    if persist {
        store.complete_flight(flight.flight_id, &plan.record).await?;
        summary.recorded += 1;
    }
    Ok(())
}

/// Flies up to `limit` pending flights on their stored routes.
#[instrument(skip(store, rng, settings))]
pub async fn complete_pending_flights<S: AirlineStore, R: Rng + ?Sized>(
    store: &S,
    rng: &mut R,
    settings: &Settings,
    barrel_price: f64,
    limit: u32,
    persist: bool,
) -> Result<RunSummary> {
    let pending = store.pending_flights(limit).await?;
    info!("Found {} pending flights", pending.len());

    let mut summary = RunSummary::default();
    for flight in &pending {
        if let Err(e) =
            complete_one(store, rng, settings, barrel_price, flight, persist, &mut summary).await
        {
            warn!(flight_id = flight.flight_id, error = %e, "Error completing flight");
            summary.failed += 1;
        }
    }

    Ok(summary)
}
