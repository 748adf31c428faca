use serde::Serialize;

/// Report families the backend can generate and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Appointments,
    Financial,
    Inventory,
    Revenue,
}

impl ReportKind {
    /// Path segment used by both the report and export endpoints.
    pub fn as_path(&self) -> &'static str {
        match self {
            ReportKind::Appointments => "appointments",
            ReportKind::Financial => "financial",
            ReportKind::Inventory => "inventory",
            ReportKind::Revenue => "revenue",
        }
    }
}

impl std::str::FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "appointments" => Ok(ReportKind::Appointments),
            "financial" => Ok(ReportKind::Financial),
            "inventory" => Ok(ReportKind::Inventory),
            "revenue" => Ok(ReportKind::Revenue),
            other => Err(format!("unknown report type: {}", other)),
        }
    }
}

/// Optional date-range filter applied to report queries.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
}
