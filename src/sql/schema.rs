//! Table creation and demo seed data. Every statement is safe to re-run.

pub const CREATE_PATIENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS Patients (
        patient_id SERIAL PRIMARY KEY,
        first_name VARCHAR(100) NOT NULL,
        last_name VARCHAR(100) NOT NULL,
        age INTEGER NOT NULL,
        phone VARCHAR(20) NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
"#;

pub const CREATE_DOCTORS: &str = r#"
    CREATE TABLE IF NOT EXISTS Doctors (
        doctor_id SERIAL PRIMARY KEY,
        first_name VARCHAR(100) NOT NULL,
        last_name VARCHAR(100) NOT NULL,
        specialty VARCHAR(100),
        phone VARCHAR(20),
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
"#;

pub const CREATE_APPOINTMENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS Appointments (
        appointment_id SERIAL PRIMARY KEY,
        patient_id INTEGER REFERENCES Patients(patient_id),
        doctor_id INTEGER REFERENCES Doctors(doctor_id),
        appointment_date DATE NOT NULL,
        status VARCHAR(20) DEFAULT 'scheduled',
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// Creation order follows the foreign keys.
pub const CREATE_TABLES: [&str; 3] = [CREATE_PATIENTS, CREATE_DOCTORS, CREATE_APPOINTMENTS];

/// Serializes concurrent setup runs so the emptiness check and the seed insert cannot interleave.
pub const SETUP_LOCK: &str = "SELECT pg_advisory_xact_lock(727001)";

/// (first_name, last_name, age, phone)
pub const DEMO_PATIENTS: [(&str, &str, i32, &str); 3] = [
    ("Mohammed", "Ahmed", 25, "0599123456"),
    ("Fatima", "Khaled", 30, "0599876543"),
    ("Ali", "Mahmoud", 45, "0599112233"),
];

/// (first_name, last_name, specialty, phone)
pub const DEMO_DOCTORS: [(&str, &str, &str, &str); 3] = [
    ("Ahmed", "Saeed", "General Medicine", "0599001122"),
    ("Sara", "Omar", "Internal Medicine", "0599334455"),
    ("Youssef", "Ali", "Surgery", "0599445566"),
];
