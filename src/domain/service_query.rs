use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

/// A subscription product whose price is tracked in a fixed spreadsheet row.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ServiceQuery {
    pub name: String,
    #[serde(default)]
    pub plan: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub row: u32,
}

impl ServiceQuery {
    pub fn new(name: &str, plan: &str, row: u32) -> Self {
        ServiceQuery {
            name: name.to_string(),
            plan: plan.to_string(),
            row,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceUpdate {
    pub name: String,
    pub price: f64,
    pub row: u32,
}

/// Cell address such as `G4`, or `Prices!G4` when a sheet is named.
pub fn cell_range(sheet_name: Option<&str>, column: &str, row: u32) -> String {
    match sheet_name {
        Some(sheet) if !sheet.is_empty() => format!("{}!{}{}", sheet, column, row),
        _ => format!("{}{}", column, row),
    }
}
