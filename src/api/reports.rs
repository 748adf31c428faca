//! Reporting endpoints.
//!
//! Report payloads are rendered as-is, so rows stay as `serde_json::Value`
//! rather than committing to a schema the backend varies per report.

// Allow dead code: the full backend surface is kept even where the CLI
// does not reach it yet
#![allow(dead_code)]

use anyhow::Result;
use serde_json::Value;

use crate::models::{ReportFilters, ReportKind};

use super::client::parse_maybe_wrapped;
use super::ApiClient;

impl ApiClient {
    /// Tabular report rows for one report family. Some deployments wrap
    /// the rows in a `data` envelope, some return a bare array.
    pub async fn report(&self, kind: ReportKind, filters: &ReportFilters) -> Result<Vec<Value>> {
        let path = format!("/reports/{}", kind.as_path());
        let raw = self.get_bytes(&path, filters).await?;
        parse_maybe_wrapped(&String::from_utf8_lossy(&raw))
    }

    pub async fn patient_summary(&self) -> Result<Value> {
        self.get("/reports/patients/summary").await
    }

    pub async fn doctor_performance(&self) -> Result<Value> {
        self.get("/reports/doctors/performance").await
    }

    pub async fn patient_stats(&self, filters: &ReportFilters) -> Result<Value> {
        self.get_with_query("/reports/patients", filters).await
    }

    /// Exported report document (PDF), raw bytes for saving to disk.
    pub async fn download_report(
        &self,
        kind: ReportKind,
        filters: &ReportFilters,
    ) -> Result<Vec<u8>> {
        self.get_bytes(&format!("/reports/export/{}", kind.as_path()), filters)
            .await
    }
}
