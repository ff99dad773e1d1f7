use super::parser::{empty_string_as_none, lenient_amount, null_as_empty, parse_invoice_date};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Supply label used when an invoice does not name one.
pub const UNSPECIFIED_SUPPLY: &str = "Sin especificar";

/// Utility or service contract as found in the contracts JSON export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    #[serde(
        rename = "contrato",
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub reference: Option<String>,
    #[serde(rename = "tipo", default, deserialize_with = "null_as_empty")]
    pub kind: String,
    #[serde(rename = "centro")]
    pub center: String,
    #[serde(rename = "fecha_firma", default, deserialize_with = "empty_string_as_none")]
    pub signed_on: Option<String>,
    #[serde(
        rename = "fecha_vencimiento",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub expires_on: Option<String>,
    #[serde(rename = "facturas", default)]
    pub invoices: Vec<Invoice>,
}

impl Contract {
    /// Name shown for the contract: its reference, else its type.
    pub fn display_name(&self) -> &str {
        self.reference.as_deref().unwrap_or(&self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(rename = "fecha", default, deserialize_with = "null_as_empty")]
    pub date: String,
    #[serde(rename = "total", default, deserialize_with = "lenient_amount")]
    pub total: f64,
    #[serde(rename = "consumo total", default, deserialize_with = "lenient_amount")]
    pub consumption: f64,
    #[serde(rename = "concepto", default, deserialize_with = "empty_string_as_none")]
    pub concept: Option<String>,
    #[serde(rename = "suministro", default, deserialize_with = "empty_string_as_none")]
    pub supply: Option<String>,
}

impl Invoice {
    pub fn issued_on(&self) -> Option<NaiveDate> {
        parse_invoice_date(&self.date)
    }

    /// `yyyy-mm` bucket the invoice is aggregated under.
    pub fn month_key(&self) -> Option<String> {
        self.issued_on()
            .map(|date| date.format("%Y-%m").to_string())
    }

    pub fn supply_label(&self) -> &str {
        self.supply.as_deref().unwrap_or(UNSPECIFIED_SUPPLY)
    }
}
