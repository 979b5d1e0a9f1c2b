use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, info, instrument};

use super::AirlineStore;
use crate::error::{Error, Result};
use crate::model::{
    Airport, Company, Flight, FlightRecord, NewAirport, NewCompany, NewPlane, Plane,
};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        info!("Connected to database");
        Ok(Self { pool })
    }

    /// Creates missing tables.
    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        info!("Closing database connections...");
        self.pool.close().await;
    }
}

async fn insert_flight_details(
    tx: &mut Transaction<'_, Postgres>,
    flight_id: i32,
    record: &FlightRecord,
) -> Result<()> {
    for passenger in &record.passengers {
        sqlx::query(
            r#"
            INSERT INTO passenger
                (name, surname, phone_number, mail, gender, ticket_price_dollar, purchase_date, flight_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&passenger.name)
        .bind(&passenger.surname)
        .bind(&passenger.phone_number)
        .bind(&passenger.mail)
        .bind(passenger.gender.as_str())
        .bind(passenger.ticket_price_dollar)
        .bind(passenger.purchase_date)
        .bind(flight_id)
        .execute(&mut **tx)
        .await?;
    }

    sqlx::query(
        r#"
        INSERT INTO consumption
            (barrel_price_dollar, total_fuel_price_dollar, total_fuel_volume_gallons, flight_id)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(record.consumption.barrel_price_dollar)
    .bind(record.consumption.total_fuel_price_dollar)
    .bind(record.consumption.total_fuel_volume_gallons)
    .bind(flight_id)
    .execute(&mut **tx)
    .await?;

    for income in &record.incomes {
        sqlx::query(
            r#"
            INSERT INTO company_income (income, transaction_date, topic, company_id)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(income.income)
        .bind(income.transaction_date)
        .bind(income.topic.as_str())
        .bind(income.company_id)
        .execute(&mut **tx)
        .await?;
    }

    debug!(
        flight_id,
        passengers = record.passengers.len(),
        incomes = record.incomes.len(),
        "Inserted flight details"
    );
    Ok(())
}

impl AirlineStore for PgStore {
    #[instrument(skip(self))]
    async fn insert_airport(&self, airport: &NewAirport) -> Result<i32> {
        let id = sqlx::query_scalar(
            r#"
            INSERT INTO airport (airport_code, latitude, longitude, landing_price, airport_country)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING airport_id
            "#,
        )
        .bind(&airport.airport_code)
        .bind(airport.latitude)
        .bind(airport.longitude)
        .bind(airport.landing_price)
        .bind(&airport.airport_country)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn insert_company(&self, company: &NewCompany) -> Result<i32> {
        let id = sqlx::query_scalar(
            r#"
            INSERT INTO company (name, country, iata_code)
            VALUES ($1, $2, $3)
            RETURNING company_id
            "#,
        )
        .bind(&company.name)
        .bind(&company.country)
        .bind(&company.iata_code)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn company_by_name(&self, name: &str) -> Result<Option<Company>> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            SELECT company_id, name, country, iata_code
            FROM company
            WHERE name = $1
            ORDER BY company_id
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(company)
    }

    #[instrument(skip(self))]
    async fn company(&self, company_id: i32) -> Result<Option<Company>> {
        let company = sqlx::query_as::<_, Company>(
            "SELECT company_id, name, country, iata_code FROM company WHERE company_id = $1",
        )
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(company)
    }

    #[instrument(skip(self))]
    async fn insert_plane(&self, plane: &NewPlane) -> Result<i32> {
        let id = sqlx::query_scalar(
            r#"
            INSERT INTO plane
                (model, manufacturer, range_km, passenger_capacity, cruising_speed_kph,
                 weight_kg, tank_capacity_gallon, company_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING plane_id
            "#,
        )
        .bind(&plane.model)
        .bind(&plane.manufacturer)
        .bind(plane.range_km)
        .bind(plane.passenger_capacity)
        .bind(plane.cruising_speed_kph)
        .bind(plane.weight_kg)
        .bind(plane.tank_capacity_gallon)
        .bind(plane.company_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn company_plane_count(&self, company_id: i32) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM plane WHERE company_id = $1")
            .bind(company_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn random_airports(&self, limit: u32) -> Result<Vec<Airport>> {
        let airports = sqlx::query_as::<_, Airport>(
            r#"
            SELECT airport_id, airport_code, latitude, longitude, landing_price, airport_country
            FROM airport
            ORDER BY RANDOM()
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;
        Ok(airports)
    }

    #[instrument(skip(self))]
    async fn airport(&self, airport_id: i32) -> Result<Option<Airport>> {
        let airport = sqlx::query_as::<_, Airport>(
            r#"
            SELECT airport_id, airport_code, latitude, longitude, landing_price, airport_country
            FROM airport
            WHERE airport_id = $1
            "#,
        )
        .bind(airport_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(airport)
    }

    #[instrument(skip(self))]
    async fn planes_in_range(&self, distance: i32) -> Result<Vec<Plane>> {
        let planes = sqlx::query_as::<_, Plane>(
            r#"
            SELECT plane_id, model, manufacturer, range_km, passenger_capacity,
                   cruising_speed_kph, weight_kg, tank_capacity_gallon, company_id
            FROM plane
            WHERE range_km >= $1
            "#,
        )
        .bind(distance)
        .fetch_all(&self.pool)
        .await?;
        Ok(planes)
    }

    #[instrument(skip(self, record), fields(flight_code = %record.flight_code))]
    async fn record_flight(&self, record: &FlightRecord) -> Result<i32> {
        let mut tx = self.pool.begin().await?;

        let flight_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO flight
                (flight_code, flight_status, airport_departure, airport_arrival, time_departure,
                 time_arrival, distance, flight_time_minutes, nb_passenger, plane_id)
            VALUES ($1, TRUE, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING flight_id
            "#,
        )
        .bind(&record.flight_code)
        .bind(record.airport_departure)
        .bind(record.airport_arrival)
        .bind(record.time_departure)
        .bind(record.time_arrival)
        .bind(record.distance)
        .bind(record.flight_time_minutes)
        .bind(record.nb_passenger)
        .bind(record.plane_id)
        .fetch_one(&mut *tx)
        .await?;

        insert_flight_details(&mut tx, flight_id, record).await?;
        tx.commit().await?;

        info!(flight_id, "Saved flight to database");
        Ok(flight_id)
    }

    #[instrument(skip(self))]
    async fn insert_pending_flight(
        &self,
        airport_departure: i32,
        airport_arrival: i32,
        distance: i32,
    ) -> Result<i32> {
        let id = sqlx::query_scalar(
            r#"
            INSERT INTO flight (flight_status, airport_departure, airport_arrival, distance)
            VALUES (FALSE, $1, $2, $3)
            RETURNING flight_id
            "#,
        )
        .bind(airport_departure)
        .bind(airport_arrival)
        .bind(distance)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn pending_flights(&self, limit: u32) -> Result<Vec<Flight>> {
        let flights = sqlx::query_as::<_, Flight>(
            r#"
            SELECT flight_id, flight_code, flight_status, airport_departure, airport_arrival,
                   time_departure, time_arrival, distance, flight_time_minutes, nb_passenger,
                   plane_id
            FROM flight
            WHERE flight_status = FALSE
            ORDER BY flight_id
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;
        Ok(flights)
    }

    #[instrument(skip(self, record), fields(flight_code = %record.flight_code))]
    async fn complete_flight(&self, flight_id: i32, record: &FlightRecord) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE flight
            SET flight_code = $2,
                flight_status = TRUE,
                time_departure = $3,
                time_arrival = $4,
                flight_time_minutes = $5,
                nb_passenger = $6,
                plane_id = $7
            WHERE flight_id = $1 AND flight_status = FALSE
            "#,
        )
        .bind(flight_id)
        .bind(&record.flight_code)
        .bind(record.time_departure)
        .bind(record.time_arrival)
        .bind(record.flight_time_minutes)
        .bind(record.nb_passenger)
        .bind(record.plane_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(Error::FlightNotPending(flight_id));
        }

        insert_flight_details(&mut tx, flight_id, record).await?;
        tx.commit().await?;

        info!(flight_id, "Completed pending flight");
        Ok(())
    }
}
