//! Patient roster endpoints.

// Allow dead code: the full backend surface is kept even where the CLI
// does not reach it yet
#![allow(dead_code)]

use anyhow::Result;

use crate::models::{Appointment, Patient, PatientInput};

use super::ApiClient;

impl ApiClient {
    pub async fn list_patients(&self) -> Result<Vec<Patient>> {
        self.get("/patients/").await
    }

    pub async fn get_patient(&self, id: i64) -> Result<Patient> {
        self.get(&format!("/patients/{}", id)).await
    }

    pub async fn create_patient(&self, input: &PatientInput) -> Result<Patient> {
        self.post("/patients/", input).await
    }

    pub async fn update_patient(&self, id: i64, input: &PatientInput) -> Result<Patient> {
        self.put(&format!("/patients/{}", id), input).await
    }

    /// Admin only.
    pub async fn delete_patient(&self, id: i64) -> Result<()> {
        self.delete(&format!("/patients/{}", id)).await
    }

    pub async fn patient_appointments(&self, id: i64) -> Result<Vec<Appointment>> {
        self.get(&format!("/patients/{}/appointments", id)).await
    }
}
