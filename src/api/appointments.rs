//! Appointment scheduling endpoints.

// Allow dead code: the full backend surface is kept even where the CLI
// does not reach it yet
#![allow(dead_code)]

use anyhow::Result;

use crate::models::{Appointment, AppointmentInput};

use super::ApiClient;

impl ApiClient {
    pub async fn list_appointments(&self) -> Result<Vec<Appointment>> {
        self.get("/appointments/").await
    }

    pub async fn get_appointment(&self, id: i64) -> Result<Appointment> {
        self.get(&format!("/appointments/{}", id)).await
    }

    pub async fn create_appointment(&self, input: &AppointmentInput) -> Result<Appointment> {
        self.post("/appointments/", input).await
    }

    pub async fn update_appointment(&self, id: i64, input: &AppointmentInput) -> Result<Appointment> {
        self.put(&format!("/appointments/{}", id), input).await
    }

    pub async fn delete_appointment(&self, id: i64) -> Result<()> {
        self.delete(&format!("/appointments/{}", id)).await
    }
}
