//! Doctor roster endpoints.

// Allow dead code: the full backend surface is kept even where the CLI
// does not reach it yet
#![allow(dead_code)]

use anyhow::Result;

use crate::models::{Appointment, Doctor, DoctorInput};

use super::ApiClient;

impl ApiClient {
    pub async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        self.get("/doctors/").await
    }

    pub async fn get_doctor(&self, id: i64) -> Result<Doctor> {
        self.get(&format!("/doctors/{}", id)).await
    }

    pub async fn create_doctor(&self, input: &DoctorInput) -> Result<Doctor> {
        self.post("/doctors/", input).await
    }

    pub async fn update_doctor(&self, id: i64, input: &DoctorInput) -> Result<Doctor> {
        self.put(&format!("/doctors/{}", id), input).await
    }

    pub async fn delete_doctor(&self, id: i64) -> Result<()> {
        self.delete(&format!("/doctors/{}", id)).await
    }

    pub async fn doctor_appointments(&self, id: i64) -> Result<Vec<Appointment>> {
        self.get(&format!("/doctors/{}/appointments", id)).await
    }
}
