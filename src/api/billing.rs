//! Billing and insurance endpoints.

// Allow dead code: the full backend surface is kept even where the CLI
// does not reach it yet
#![allow(dead_code)]

use anyhow::Result;

use crate::models::{Bill, BillDetails, BillInput, InsuranceProvider, InsuranceProviderInput};

use super::ApiClient;

impl ApiClient {
    /// List bills, optionally filtered (e.g. `status=Unpaid`, `patient_id=7`).
    pub async fn list_bills(&self, filters: &[(&str, String)]) -> Result<Vec<Bill>> {
        if filters.is_empty() {
            self.get("/billing/").await
        } else {
            self.get_with_query("/billing/", filters).await
        }
    }

    pub async fn get_bill(&self, id: i64) -> Result<Bill> {
        self.get(&format!("/billing/{}", id)).await
    }

    pub async fn create_bill(&self, input: &BillInput) -> Result<Bill> {
        self.post("/billing/", input).await
    }

    pub async fn update_bill(&self, id: i64, input: &BillInput) -> Result<Bill> {
        self.put(&format!("/billing/{}", id), input).await
    }

    pub async fn delete_bill(&self, id: i64) -> Result<()> {
        self.delete(&format!("/billing/{}", id)).await
    }

    /// Bill plus its appointment and insurance context.
    pub async fn bill_details(&self, id: i64) -> Result<BillDetails> {
        self.get(&format!("/billing/{}/details", id)).await
    }

    pub async fn appointment_bills(&self, appointment_id: i64) -> Result<Vec<Bill>> {
        self.get(&format!("/billing/appointment/{}", appointment_id))
            .await
    }

    // ===== Insurance =====

    pub async fn list_insurance_providers(&self) -> Result<Vec<InsuranceProvider>> {
        self.get("/insurance/").await
    }

    pub async fn get_insurance_provider(&self, id: i64) -> Result<InsuranceProvider> {
        self.get(&format!("/insurance/{}", id)).await
    }

    pub async fn create_insurance_provider(
        &self,
        input: &InsuranceProviderInput,
    ) -> Result<InsuranceProvider> {
        self.post("/insurance/", input).await
    }

    pub async fn insurance_bills(&self, insurance_id: i64) -> Result<Vec<Bill>> {
        self.get(&format!("/insurance/{}/bills", insurance_id)).await
    }
}
