//! Parameterized statements, one per store operation.

pub const LIST_PATIENTS: &str = "SELECT * FROM Patients ORDER BY patient_id DESC";

pub const SEARCH_PATIENTS: &str =
    "SELECT * FROM Patients WHERE first_name ILIKE $1 OR last_name ILIKE $1";

pub const GET_PATIENT: &str = "SELECT * FROM Patients WHERE patient_id = $1";

pub const INSERT_PATIENT: &str =
    "INSERT INTO Patients (first_name, last_name, age, phone) VALUES ($1, $2, $3, $4) RETURNING *";

pub const UPDATE_PATIENT: &str = "UPDATE Patients SET first_name = $1, last_name = $2, age = $3, phone = $4 \
     WHERE patient_id = $5 RETURNING *";

pub const DELETE_PATIENT: &str = "DELETE FROM Patients WHERE patient_id = $1 RETURNING *";

pub const LIST_DOCTORS: &str = "SELECT * FROM Doctors";

pub const INSERT_DOCTOR: &str =
    "INSERT INTO Doctors (first_name, last_name, specialty, phone) VALUES ($1, $2, $3, $4) RETURNING *";

pub const INSERT_APPOINTMENT: &str = "INSERT INTO Appointments (patient_id, doctor_id, appointment_date, status) \
     VALUES ($1, $2, $3, $4) RETURNING *";

pub const TODAYS_APPOINTMENTS: &str = r#"
    SELECT a.appointment_id,
           p.first_name AS patient_first,
           p.last_name AS patient_last,
           d.first_name AS doctor_first,
           d.last_name AS doctor_last,
           a.appointment_date
    FROM Appointments a
    JOIN Patients p ON a.patient_id = p.patient_id
    JOIN Doctors d ON a.doctor_id = d.doctor_id
    WHERE DATE(a.appointment_date) = CURRENT_DATE
    ORDER BY a.appointment_date DESC, a.appointment_id DESC
"#;

pub const COUNT_PATIENTS: &str = "SELECT COUNT(*) FROM Patients";

pub const COUNT_TODAYS_APPOINTMENTS: &str =
    "SELECT COUNT(*) FROM Appointments WHERE DATE(appointment_date) = CURRENT_DATE";

pub const COUNT_DOCTORS: &str = "SELECT COUNT(*) FROM Doctors";

pub const PING: &str = "SELECT 1";
