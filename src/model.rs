//! Row types returned by the store and validated inputs passed to it.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Specialty stored for a doctor created without one.
pub const DEFAULT_SPECIALTY: &str = "General Practice";

/// Status stored for an appointment created without one.
pub const DEFAULT_APPOINTMENT_STATUS: &str = "scheduled";

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Patient {
    pub patient_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub phone: String,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Doctor {
    pub doctor_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub specialty: Option<String>,
    pub phone: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Appointment {
    pub appointment_id: i32,
    pub patient_id: Option<i32>,
    pub doctor_id: Option<i32>,
    pub appointment_date: NaiveDate,
    pub status: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

/// One row of the day's schedule: appointment joined with patient and doctor names.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct TodayAppointment {
    pub appointment_id: i32,
    pub patient_first: String,
    pub patient_last: String,
    pub doctor_first: String,
    pub doctor_last: String,
    pub appointment_date: NaiveDate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicStats {
    pub total_patients: i64,
    pub appointments_today: i64,
    pub available_doctors: i64,
}

/// An integer field that clients send either as a JSON number or as a numeric string.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IntOrText {
    Int(i64),
    Text(String),
}

/// Raw body of `POST /patients` and `PUT /patients/:id`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PatientPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<IntOrText>,
    pub phone: Option<String>,
}

/// Raw body of `POST /doctors`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DoctorPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub specialty: Option<String>,
    pub phone: Option<String>,
}

/// Raw body of `POST /appointments`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AppointmentPayload {
    pub patient_id: Option<IntOrText>,
    pub doctor_id: Option<IntOrText>,
    pub appointment_date: Option<String>,
    pub status: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub phone: String,
}

/// Replacement values for a patient. Absent fields are written as NULL, so the store's
/// NOT NULL constraints decide whether the update is accepted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatientUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i32>,
    pub phone: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewDoctor {
    pub first_name: String,
    pub last_name: String,
    pub specialty: String,
    pub phone: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAppointment {
    pub patient_id: i32,
    pub doctor_id: i32,
    pub appointment_date: NaiveDate,
    pub status: String,
}
