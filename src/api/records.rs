//! Medical record endpoints. Records are doctor-authored; deletion is
//! rarely exposed but kept for parity with the backend surface.

// Allow dead code: the full backend surface is kept even where the CLI
// does not reach it yet
#![allow(dead_code)]

use anyhow::Result;

use crate::models::{MedicalRecord, MedicalRecordInput};

use super::ApiClient;

impl ApiClient {
    pub async fn patient_records(&self, patient_id: i64) -> Result<Vec<MedicalRecord>> {
        self.get(&format!("/records/patient/{}", patient_id)).await
    }

    pub async fn get_record(&self, record_id: i64) -> Result<MedicalRecord> {
        self.get(&format!("/records/{}", record_id)).await
    }

    pub async fn create_record(&self, input: &MedicalRecordInput) -> Result<MedicalRecord> {
        self.post("/records/", input).await
    }

    pub async fn update_record(
        &self,
        record_id: i64,
        input: &MedicalRecordInput,
    ) -> Result<MedicalRecord> {
        self.put(&format!("/records/{}", record_id), input).await
    }

    pub async fn delete_record(&self, record_id: i64) -> Result<()> {
        self.delete(&format!("/records/{}", record_id)).await
    }

    /// Rendered PDF of one record.
    pub async fn export_record_pdf(&self, record_id: i64) -> Result<Vec<u8>> {
        self.get_bytes(&format!("/records/{}/pdf", record_id), &[] as &[(&str, &str)])
            .await
    }
}
