#![allow(dead_code)]

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub specialty: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Availability window as "HH:MM - HH:MM".
    pub available: Option<String>,
}

impl Doctor {
    /// Split the availability window into (from, to), if present and well-formed.
    pub fn availability(&self) -> Option<(&str, &str)> {
        let window = self.available.as_deref()?;
        let (from, to) = window.split_once(" - ")?;
        Some((from, to))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DoctorInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<String>,
}
