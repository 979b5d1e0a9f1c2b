//! Ticket prices, fuel burn and the company ledger of a flight.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use rand::Rng;

use crate::config::{FuelSettings, PricingSettings};
use crate::error::{Error, Result};
use crate::flight::shift_minutes;
use crate::model::{IncomeTopic, NewConsumption, NewIncome, NewPassenger, Plane};

pub const GALLONS_PER_BARREL: f64 = 42.0;

/// Price factor for a booking made `days_before` departure.
pub fn booking_multiplier(days_before: i64) -> f64 {
    match days_before {
        d if d <= 7 => 1.6,
        d if d <= 30 => 1.25,
        d if d <= 90 => 1.0,
        _ => 0.85,
    }
}

/// Fills `ticket_price_dollar` and `purchase_date` of every passenger.
///
/// Passengers of the same group book together: they share a purchase date and
/// therefore the booking multiplier, each ticket still getting its own jitter.
pub fn compute_ticket_price<R: Rng + ?Sized>(
    rng: &mut R,
    settings: &PricingSettings,
    passenger_count: i32,
    capacity: i32,
    distance_km: i32,
    departure: NaiveDateTime,
    passengers: &mut [NewPassenger],
) -> Result<()> {
    let base = settings.base_fare_dollar + settings.per_km_dollar * distance_km as f64;
    let load_factor = if capacity > 0 {
        (passenger_count as f64 / capacity as f64).min(1.0)
    } else {
        1.0
    };
    let demand = 0.8 + 0.4 * load_factor;
    let max_days = settings.max_booking_days.max(1) as i64;

    let mut bookings: HashMap<usize, (NaiveDateTime, f64)> = HashMap::new();
    for passenger in passengers.iter_mut() {
        let (purchase_date, booking) = match bookings.get(&passenger.group).copied() {
            Some(booking) => booking,
            None => {
                let days = rng.gen_range(1..=max_days);
                let minutes: i64 = rng.gen_range(0..24 * 60);
                let booking = (
                    shift_minutes(departure, -(days * 24 * 60 + minutes))?,
                    booking_multiplier(days),
                );
                bookings.insert(passenger.group, booking);
                booking
            }
        };

        let jitter = rng.gen_range(0.9..=1.1);
        let price = (base * demand * booking * jitter).round() as i32;

        passenger.ticket_price_dollar = Some(price.max(settings.min_fare_dollar));
        passenger.purchase_date = Some(purchase_date);
    }
    Ok(())
}

/// Fuel needed to fly `distance_km` with `passenger_count` people and their luggage on
/// board, and what it costs at `barrel_price_dollar`.
pub fn compute_fuel_cost(
    plane_weight_kg: i32,
    barrel_price_dollar: f64,
    distance_km: i32,
    passenger_count: i32,
    settings: &FuelSettings,
) -> NewConsumption {
    let payload =
        passenger_count as f64 * (settings.passenger_weight_kg + settings.luggage_weight_kg) as f64;
    let mass_tonnes = (plane_weight_kg as f64 + payload) / 1000.0;
    let fuel_kg = mass_tonnes * distance_km as f64 * settings.burn_kg_per_tonne_km;
    let gallons = fuel_kg / settings.kg_per_gallon;

    NewConsumption {
        barrel_price_dollar,
        total_fuel_price_dollar: (gallons * barrel_price_dollar / GALLONS_PER_BARREL).round()
            as i32,
        total_fuel_volume_gallons: gallons.round() as i32,
    }
}

/// [`compute_fuel_cost`] for a concrete plane, refusing flights its tank cannot hold.
pub fn plane_fuel_cost(
    plane: &Plane,
    barrel_price_dollar: f64,
    distance_km: i32,
    passenger_count: i32,
    settings: &FuelSettings,
) -> Result<NewConsumption> {
    let weight = plane.weight_kg.ok_or_else(|| Error::MissingPlaneWeight {
        model: plane.model.clone(),
    })?;
    let consumption =
        compute_fuel_cost(weight, barrel_price_dollar, distance_km, passenger_count, settings);

    match plane.tank_capacity_gallon {
        Some(capacity) if consumption.total_fuel_volume_gallons > capacity => {
            Err(Error::TankTooSmall {
                model: plane.model.clone(),
                needed: consumption.total_fuel_volume_gallons,
                capacity,
            })
        }
        _ => Ok(consumption),
    }
}

/// Ticket revenue, fuel bill and landing fee booked for the operating company.
pub fn company_ledger(
    company_id: i32,
    date: NaiveDateTime,
    passengers: &[NewPassenger],
    consumption: &NewConsumption,
    landing_price: Option<f64>,
) -> Vec<NewIncome> {
    let tickets: i32 = passengers.iter().filter_map(|p| p.ticket_price_dollar).sum();

    let mut ledger = vec![
        NewIncome {
            income: tickets,
            transaction_date: date,
            topic: IncomeTopic::Tickets,
            company_id,
        },
        NewIncome {
            income: -consumption.total_fuel_price_dollar,
            transaction_date: date,
            topic: IncomeTopic::Fuel,
            company_id,
        },
    ];
    if let Some(price) = landing_price {
        ledger.push(NewIncome {
            income: -(price.round() as i32),
            transaction_date: date,
            topic: IncomeTopic::Landing,
            company_id,
        });
    }
    ledger
}
