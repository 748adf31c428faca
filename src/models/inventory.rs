use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    pub item_name: String,
    pub category: Option<String>,
    pub quantity: i64,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub reorder_level: Option<i64>,
    #[serde(default)]
    pub unit_price: Option<f64>,
}

impl InventoryItem {
    /// Whether this item counts as medication stock (pharmacy views).
    pub fn is_medication(&self) -> bool {
        self.category
            .as_deref()
            .map(|c| {
                let lower = c.to_lowercase();
                lower.contains("medic") || lower.contains("drug") || lower.contains("pharma")
            })
            .unwrap_or(false)
    }

    pub fn is_low_stock(&self) -> bool {
        match self.reorder_level {
            Some(level) => self.quantity <= level,
            None => false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InventoryItemInput {
    pub item_name: String,
    pub category: String,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reorder_level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
}

/// Summary from `/inventory/stats/summary`.
#[derive(Debug, Clone, Deserialize)]
pub struct InventoryStats {
    #[serde(default)]
    pub total_items: i64,
    #[serde(default)]
    pub low_stock_count: i64,
    #[serde(default)]
    pub total_value: Option<f64>,
    #[serde(default)]
    pub categories: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(category: Option<&str>, quantity: i64, reorder_level: Option<i64>) -> InventoryItem {
        InventoryItem {
            id: 1,
            item_name: "Paracetamol 500mg".into(),
            category: category.map(String::from),
            quantity,
            supplier: None,
            reorder_level,
            unit_price: None,
        }
    }

    #[test]
    fn test_medication_category_matching() {
        assert!(item(Some("Medication"), 10, None).is_medication());
        assert!(item(Some("medicine"), 10, None).is_medication());
        assert!(item(Some("Pharmaceuticals"), 10, None).is_medication());
        assert!(item(Some("Drugs"), 10, None).is_medication());
        assert!(!item(Some("Surgical Supplies"), 10, None).is_medication());
        assert!(!item(None, 10, None).is_medication());
    }

    #[test]
    fn test_low_stock_threshold() {
        assert!(item(None, 5, Some(10)).is_low_stock());
        assert!(item(None, 10, Some(10)).is_low_stock());
        assert!(!item(None, 11, Some(10)).is_low_stock());
        assert!(!item(None, 0, None).is_low_stock());
    }
}
