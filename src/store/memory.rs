//! In-process store with the same observable behavior as the PostgreSQL tables, for tests and
//! local runs without a database.

use crate::error::StoreError;
use crate::model::{
    Appointment, Doctor, NewAppointment, NewDoctor, NewPatient, Patient, PatientUpdate,
    TodayAppointment,
};
use crate::sql::{DEMO_DOCTORS, DEMO_PATIENTS};
use crate::store::ClinicStore;
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct Tables {
    patients: Vec<Patient>,
    doctors: Vec<Doctor>,
    appointments: Vec<Appointment>,
    next_patient_id: i32,
    next_doctor_id: i32,
    next_appointment_id: i32,
}

impl Tables {
    fn insert_patient(&mut self, p: &NewPatient) -> Patient {
        self.next_patient_id += 1;
        let row = Patient {
            patient_id: self.next_patient_id,
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            age: p.age,
            phone: p.phone.clone(),
            created_at: Some(Local::now().naive_local()),
        };
        self.patients.push(row.clone());
        row
    }

    fn insert_doctor(&mut self, d: &NewDoctor) -> Doctor {
        self.next_doctor_id += 1;
        let row = Doctor {
            doctor_id: self.next_doctor_id,
            first_name: d.first_name.clone(),
            last_name: d.last_name.clone(),
            specialty: Some(d.specialty.clone()),
            phone: d.phone.clone(),
            created_at: Some(Local::now().naive_local()),
        };
        self.doctors.push(row.clone());
        row
    }

    fn appointments_on(&self, day: NaiveDate) -> impl Iterator<Item = &Appointment> {
        self.appointments
            .iter()
            .filter(move |a| a.appointment_date == day)
    }
}

pub struct MemoryStore {
    tables: Mutex<Tables>,
    unreachable: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            unreachable: false,
        }
    }

    /// A store whose every call fails, as if the database were down.
    pub fn unreachable() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            unreachable: true,
        }
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        if self.unreachable {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(self.tables.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn not_null(column: &str) -> StoreError {
    StoreError::Constraint(format!(
        "null value in column \"{}\" of relation \"patients\" violates not-null constraint",
        column
    ))
}

#[async_trait]
impl ClinicStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.tables().map(|_| ())
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, StoreError> {
        let t = self.tables()?;
        let mut rows = t.patients.clone();
        rows.sort_by(|a, b| b.patient_id.cmp(&a.patient_id));
        Ok(rows)
    }

    async fn search_patients(&self, fragment: &str) -> Result<Vec<Patient>, StoreError> {
        let needle = fragment.to_lowercase();
        let t = self.tables()?;
        Ok(t.patients
            .iter()
            .filter(|p| {
                p.first_name.to_lowercase().contains(&needle)
                    || p.last_name.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn get_patient(&self, id: i32) -> Result<Option<Patient>, StoreError> {
        let t = self.tables()?;
        Ok(t.patients.iter().find(|p| p.patient_id == id).cloned())
    }

    async fn create_patient(&self, patient: &NewPatient) -> Result<Patient, StoreError> {
        Ok(self.tables()?.insert_patient(patient))
    }

    async fn update_patient(
        &self,
        id: i32,
        update: &PatientUpdate,
    ) -> Result<Option<Patient>, StoreError> {
        let mut t = self.tables()?;
        let Some(row) = t.patients.iter_mut().find(|p| p.patient_id == id) else {
            return Ok(None);
        };
        let first_name = update.first_name.clone().ok_or_else(|| not_null("first_name"))?;
        let last_name = update.last_name.clone().ok_or_else(|| not_null("last_name"))?;
        let age = update.age.ok_or_else(|| not_null("age"))?;
        let phone = update.phone.clone().ok_or_else(|| not_null("phone"))?;
        row.first_name = first_name;
        row.last_name = last_name;
        row.age = age;
        row.phone = phone;
        Ok(Some(row.clone()))
    }

    async fn delete_patient(&self, id: i32) -> Result<Option<Patient>, StoreError> {
        let mut t = self.tables()?;
        let Some(pos) = t.patients.iter().position(|p| p.patient_id == id) else {
            return Ok(None);
        };
        if t.appointments.iter().any(|a| a.patient_id == Some(id)) {
            return Err(StoreError::Constraint(format!(
                "patient {} is still referenced from table \"appointments\"",
                id
            )));
        }
        Ok(Some(t.patients.remove(pos)))
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>, StoreError> {
        Ok(self.tables()?.doctors.clone())
    }

    async fn create_doctor(&self, doctor: &NewDoctor) -> Result<Doctor, StoreError> {
        Ok(self.tables()?.insert_doctor(doctor))
    }

    async fn create_appointment(
        &self,
        appointment: &NewAppointment,
    ) -> Result<Appointment, StoreError> {
        let mut t = self.tables()?;
        if !t.patients.iter().any(|p| p.patient_id == appointment.patient_id) {
            return Err(StoreError::Constraint(format!(
                "patient {} does not exist",
                appointment.patient_id
            )));
        }
        if !t.doctors.iter().any(|d| d.doctor_id == appointment.doctor_id) {
            return Err(StoreError::Constraint(format!(
                "doctor {} does not exist",
                appointment.doctor_id
            )));
        }
        t.next_appointment_id += 1;
        let row = Appointment {
            appointment_id: t.next_appointment_id,
            patient_id: Some(appointment.patient_id),
            doctor_id: Some(appointment.doctor_id),
            appointment_date: appointment.appointment_date,
            status: Some(appointment.status.clone()),
            created_at: Some(Local::now().naive_local()),
        };
        t.appointments.push(row.clone());
        Ok(row)
    }

    async fn todays_appointments(&self) -> Result<Vec<TodayAppointment>, StoreError> {
        let t = self.tables()?;
        let mut rows: Vec<TodayAppointment> = t
            .appointments_on(today())
            .filter_map(|a| {
                let p = t.patients.iter().find(|p| Some(p.patient_id) == a.patient_id)?;
                let d = t.doctors.iter().find(|d| Some(d.doctor_id) == a.doctor_id)?;
                Some(TodayAppointment {
                    appointment_id: a.appointment_id,
                    patient_first: p.first_name.clone(),
                    patient_last: p.last_name.clone(),
                    doctor_first: d.first_name.clone(),
                    doctor_last: d.last_name.clone(),
                    appointment_date: a.appointment_date,
                })
            })
            .collect();
        rows.sort_by(|a, b| {
            b.appointment_date
                .cmp(&a.appointment_date)
                .then(b.appointment_id.cmp(&a.appointment_id))
        });
        Ok(rows)
    }

    async fn count_patients(&self) -> Result<i64, StoreError> {
        Ok(self.tables()?.patients.len() as i64)
    }

    async fn count_todays_appointments(&self) -> Result<i64, StoreError> {
        Ok(self.tables()?.appointments_on(today()).count() as i64)
    }

    async fn count_doctors(&self) -> Result<i64, StoreError> {
        Ok(self.tables()?.doctors.len() as i64)
    }

    async fn setup(&self) -> Result<(), StoreError> {
        let mut t = self.tables()?;
        if t.patients.is_empty() {
            for (first_name, last_name, age, phone) in DEMO_PATIENTS {
                t.insert_patient(&NewPatient {
                    first_name: first_name.into(),
                    last_name: last_name.into(),
                    age,
                    phone: phone.into(),
                });
            }
        }
        if t.doctors.is_empty() {
            for (first_name, last_name, specialty, phone) in DEMO_DOCTORS {
                t.insert_doctor(&NewDoctor {
                    first_name: first_name.into(),
                    last_name: last_name.into(),
                    specialty: specialty.into(),
                    phone: Some(phone.into()),
                });
            }
        }
        Ok(())
    }
}
