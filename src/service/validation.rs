//! Request validation and explicit coercion of loosely typed fields.

use crate::error::AppError;
use crate::model::{
    AppointmentPayload, DoctorPayload, IntOrText, NewAppointment, NewDoctor, NewPatient,
    PatientPayload, PatientUpdate, DEFAULT_APPOINTMENT_STATUS, DEFAULT_SPECIALTY,
};
use chrono::NaiveDate;

pub struct RequestValidator;

impl RequestValidator {
    /// All four fields must be present and non-empty; age must be an integer.
    pub fn new_patient(body: PatientPayload) -> Result<NewPatient, AppError> {
        let (Some(first_name), Some(last_name), Some(age), Some(phone)) = (
            present(body.first_name),
            present(body.last_name),
            body.age.filter(|a| !is_blank(a)),
            present(body.phone),
        ) else {
            return Err(AppError::BadRequest(
                "first_name, last_name, age and phone are required".into(),
            ));
        };
        Ok(NewPatient {
            first_name,
            last_name,
            age: coerce_int("age", &age)?,
            phone,
        })
    }

    /// No field is required here: absent values go to the store as NULL.
    /// Only the age coercion is checked.
    pub fn patient_update(body: PatientPayload) -> Result<PatientUpdate, AppError> {
        let age = match &body.age {
            Some(a) => Some(coerce_int("age", a)?),
            None => None,
        };
        Ok(PatientUpdate {
            first_name: body.first_name,
            last_name: body.last_name,
            age,
            phone: body.phone,
        })
    }

    pub fn new_doctor(body: DoctorPayload) -> Result<NewDoctor, AppError> {
        let (Some(first_name), Some(last_name)) = (present(body.first_name), present(body.last_name))
        else {
            return Err(AppError::BadRequest("first_name and last_name are required".into()));
        };
        Ok(NewDoctor {
            first_name,
            last_name,
            specialty: present(body.specialty).unwrap_or_else(|| DEFAULT_SPECIALTY.to_string()),
            phone: body.phone,
        })
    }

    pub fn new_appointment(body: AppointmentPayload) -> Result<NewAppointment, AppError> {
        let (Some(patient_id), Some(doctor_id), Some(date)) = (
            body.patient_id.filter(|v| !is_blank(v)),
            body.doctor_id.filter(|v| !is_blank(v)),
            present(body.appointment_date),
        ) else {
            return Err(AppError::BadRequest(
                "patient_id, doctor_id and appointment_date are required".into(),
            ));
        };
        let appointment_date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
            AppError::BadRequest("appointment_date must be a date in YYYY-MM-DD format".into())
        })?;
        Ok(NewAppointment {
            patient_id: coerce_int("patient_id", &patient_id)?,
            doctor_id: coerce_int("doctor_id", &doctor_id)?,
            appointment_date,
            status: present(body.status).unwrap_or_else(|| DEFAULT_APPOINTMENT_STATUS.to_string()),
        })
    }
}

/// Parse a row identifier taken from the request path.
pub fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::BadRequest("invalid id".into()))
}

fn present(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

fn is_blank(v: &IntOrText) -> bool {
    matches!(v, IntOrText::Text(s) if s.trim().is_empty())
}

fn coerce_int(field: &str, v: &IntOrText) -> Result<i32, AppError> {
    let parsed = match v {
        IntOrText::Int(n) => i32::try_from(*n).ok(),
        IntOrText::Text(s) => s.trim().parse::<i32>().ok(),
    };
    parsed.ok_or_else(|| AppError::BadRequest(format!("{} must be an integer", field)))
}
