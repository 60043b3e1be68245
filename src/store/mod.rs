//! The data store behind the handlers. Handlers only see [`ClinicStore`]; the binary wires in
//! [`PgStore`], tests wire in [`MemoryStore`].

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{connect_lazy, ensure_database_exists, check_connection, PgStore};

use crate::error::StoreError;
use crate::model::{
    Appointment, Doctor, NewAppointment, NewDoctor, NewPatient, Patient, PatientUpdate,
    TodayAppointment,
};
use async_trait::async_trait;

#[async_trait]
pub trait ClinicStore: Send + Sync {
    /// Round-trip to the store without touching any table.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Newest first.
    async fn list_patients(&self) -> Result<Vec<Patient>, StoreError>;

    /// Case-insensitive substring match on first or last name.
    async fn search_patients(&self, fragment: &str) -> Result<Vec<Patient>, StoreError>;

    async fn get_patient(&self, id: i32) -> Result<Option<Patient>, StoreError>;

    async fn create_patient(&self, patient: &NewPatient) -> Result<Patient, StoreError>;

    /// Overwrites all four editable columns. `None` when no row has `id`.
    async fn update_patient(
        &self,
        id: i32,
        update: &PatientUpdate,
    ) -> Result<Option<Patient>, StoreError>;

    /// Returns the removed row, or `None` when no row has `id`.
    async fn delete_patient(&self, id: i32) -> Result<Option<Patient>, StoreError>;

    async fn list_doctors(&self) -> Result<Vec<Doctor>, StoreError>;

    async fn create_doctor(&self, doctor: &NewDoctor) -> Result<Doctor, StoreError>;

    /// Patient and doctor must exist; the store rejects dangling references.
    async fn create_appointment(
        &self,
        appointment: &NewAppointment,
    ) -> Result<Appointment, StoreError>;

    async fn todays_appointments(&self) -> Result<Vec<TodayAppointment>, StoreError>;

    async fn count_patients(&self) -> Result<i64, StoreError>;

    async fn count_todays_appointments(&self) -> Result<i64, StoreError>;

    async fn count_doctors(&self) -> Result<i64, StoreError>;

    /// Create missing tables, then seed demo patients and doctors into whichever of the two
    /// tables is empty. Repeated calls change nothing.
    async fn setup(&self) -> Result<(), StoreError>;
}
