use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub record_id: i64,
    pub patient_id: i64,
    #[serde(default)]
    pub doctor_id: Option<i64>,
    pub diagnosis: String,
    #[serde(default)]
    pub prescription: Vec<PrescriptionItem>,
    #[serde(default)]
    pub vital_signs: Option<VitalSigns>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub date_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescriptionItem {
    pub inventory_item_id: i64,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalSigns {
    #[serde(default)]
    pub blood_pressure: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub pulse: Option<i32>,
}

/// Payload for creating or updating a record (doctor-authored).
#[derive(Debug, Clone, Serialize)]
pub struct MedicalRecordInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<i64>,
    pub diagnosis: String,
    pub prescription: Vec<PrescriptionItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vital_signs: Option<VitalSigns>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
