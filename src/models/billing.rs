use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    pub id: i64,
    pub patient_id: i64,
    #[serde(default)]
    pub appointment_id: Option<i64>,
    pub amount: f64,
    pub status: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    // Denormalized display fields, present on list endpoints
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub appointment_title: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BillInput {
    pub patient_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<i64>,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

/// Detailed bill from `/billing/{id}/details`: the bill plus its
/// appointment and insurance context.
#[derive(Debug, Clone, Deserialize)]
pub struct BillDetails {
    #[serde(flatten)]
    pub bill: Bill,
    #[serde(default)]
    pub appointment: Option<serde_json::Value>,
    #[serde(default)]
    pub insurance: Option<InsuranceProvider>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsuranceProvider {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub coverage_details: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsuranceProviderInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_details: Option<String>,
}
