use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub appointment_date: String,
    pub appointment_time: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    // Denormalized display names, present on list endpoints
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub doctor_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppointmentInput {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub appointment_date: String,
    pub appointment_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_appointment() {
        let json = r#"{"id": 3, "patient_id": 12, "doctor_id": 4,
                       "appointment_date": "2026-09-02", "appointment_time": "10:30",
                       "status": "Scheduled", "patient_name": "Kofi Mensah"}"#;
        let appt: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appt.patient_id, 12);
        assert_eq!(appt.status.as_deref(), Some("Scheduled"));
        assert!(appt.notes.is_none());
        assert!(appt.doctor_name.is_none());
    }
}
