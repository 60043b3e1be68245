//! PostgreSQL store on a shared `sqlx` pool.

use crate::config::DatabaseConfig;
use crate::error::StoreError;
use crate::model::{
    Appointment, Doctor, NewAppointment, NewDoctor, NewPatient, Patient, PatientUpdate,
    TodayAppointment,
};
use crate::sql::{self, contains_pattern};
use crate::store::ClinicStore;
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, Postgres};
use sqlx::{ConnectOptions, PgPool, QueryBuilder};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count(&self, statement: &str) -> Result<i64, StoreError> {
        tracing::debug!(sql = %statement, "count");
        let n: i64 = sqlx::query_scalar(statement).fetch_one(&self.pool).await?;
        Ok(n)
    }
}

/// Build the pool without opening a connection, so the server can start while the database is
/// down. Connections are opened on first checkout.
pub fn connect_lazy(config: &DatabaseConfig) -> PgPool {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_lazy_with(config.connect_options())
}

/// Check out one connection and log whether the database answered. Never fails the caller.
pub async fn check_connection(pool: &PgPool) -> bool {
    match pool.acquire().await {
        Ok(_) => {
            tracing::info!("connected to database");
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "database connection failed");
            false
        }
    }
}

/// Create the configured database if it does not exist, via the `postgres` maintenance database.
pub async fn ensure_database_exists(config: &DatabaseConfig) -> Result<(), StoreError> {
    if config.name.is_empty() || config.name == "postgres" {
        return Ok(());
    }
    let mut conn = config.admin_connect_options().connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&config.name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        tracing::info!(database = %config.name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&config.name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[async_trait]
impl ClinicStore for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query(sql::PING).execute(&self.pool).await?;
        Ok(())
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, StoreError> {
        let rows = sqlx::query_as::<_, Patient>(sql::LIST_PATIENTS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn search_patients(&self, fragment: &str) -> Result<Vec<Patient>, StoreError> {
        let pattern = contains_pattern(fragment);
        tracing::debug!(pattern = %pattern, "search patients");
        let rows = sqlx::query_as::<_, Patient>(sql::SEARCH_PATIENTS)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_patient(&self, id: i32) -> Result<Option<Patient>, StoreError> {
        let row = sqlx::query_as::<_, Patient>(sql::GET_PATIENT)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create_patient(&self, patient: &NewPatient) -> Result<Patient, StoreError> {
        let row = sqlx::query_as::<_, Patient>(sql::INSERT_PATIENT)
            .bind(&patient.first_name)
            .bind(&patient.last_name)
            .bind(patient.age)
            .bind(&patient.phone)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_patient(
        &self,
        id: i32,
        update: &PatientUpdate,
    ) -> Result<Option<Patient>, StoreError> {
        let row = sqlx::query_as::<_, Patient>(sql::UPDATE_PATIENT)
            .bind(update.first_name.as_deref())
            .bind(update.last_name.as_deref())
            .bind(update.age)
            .bind(update.phone.as_deref())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_patient(&self, id: i32) -> Result<Option<Patient>, StoreError> {
        let row = sqlx::query_as::<_, Patient>(sql::DELETE_PATIENT)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>, StoreError> {
        let rows = sqlx::query_as::<_, Doctor>(sql::LIST_DOCTORS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_doctor(&self, doctor: &NewDoctor) -> Result<Doctor, StoreError> {
        let row = sqlx::query_as::<_, Doctor>(sql::INSERT_DOCTOR)
            .bind(&doctor.first_name)
            .bind(&doctor.last_name)
            .bind(&doctor.specialty)
            .bind(doctor.phone.as_deref())
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create_appointment(
        &self,
        appointment: &NewAppointment,
    ) -> Result<Appointment, StoreError> {
        let row = sqlx::query_as::<_, Appointment>(sql::INSERT_APPOINTMENT)
            .bind(appointment.patient_id)
            .bind(appointment.doctor_id)
            .bind(appointment.appointment_date)
            .bind(&appointment.status)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn todays_appointments(&self) -> Result<Vec<TodayAppointment>, StoreError> {
        let rows = sqlx::query_as::<_, TodayAppointment>(sql::TODAYS_APPOINTMENTS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn count_patients(&self) -> Result<i64, StoreError> {
        self.count(sql::COUNT_PATIENTS).await
    }

    async fn count_todays_appointments(&self) -> Result<i64, StoreError> {
        self.count(sql::COUNT_TODAYS_APPOINTMENTS).await
    }

    async fn count_doctors(&self) -> Result<i64, StoreError> {
        self.count(sql::COUNT_DOCTORS).await
    }

    async fn setup(&self) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(sql::SETUP_LOCK).execute(&mut *tx).await?;
        for ddl in sql::CREATE_TABLES {
            sqlx::query(ddl).execute(&mut *tx).await?;
        }

        let patients: i64 = sqlx::query_scalar(sql::COUNT_PATIENTS)
            .fetch_one(&mut *tx)
            .await?;
        if patients == 0 {
            let mut insert = QueryBuilder::<Postgres>::new(
                "INSERT INTO Patients (first_name, last_name, age, phone) ",
            );
            insert.push_values(sql::DEMO_PATIENTS, |mut row, (first, last, age, phone)| {
                row.push_bind(first).push_bind(last).push_bind(age).push_bind(phone);
            });
            insert.build().execute(&mut *tx).await?;
            tracing::info!(rows = sql::DEMO_PATIENTS.len(), "seeded demo patients");
        }

        let doctors: i64 = sqlx::query_scalar(sql::COUNT_DOCTORS)
            .fetch_one(&mut *tx)
            .await?;
        if doctors == 0 {
            let mut insert = QueryBuilder::<Postgres>::new(
                "INSERT INTO Doctors (first_name, last_name, specialty, phone) ",
            );
            insert.push_values(sql::DEMO_DOCTORS, |mut row, (first, last, specialty, phone)| {
                row.push_bind(first)
                    .push_bind(last)
                    .push_bind(specialty)
                    .push_bind(phone);
            });
            insert.build().execute(&mut *tx).await?;
            tracing::info!(rows = sql::DEMO_DOCTORS.len(), "seeded demo doctors");
        }

        tx.commit().await?;
        Ok(())
    }
}
