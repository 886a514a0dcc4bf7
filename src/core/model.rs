//! Domain models for companies, invoices, and industries
//!
//! Full rows and the narrow list projections are separate types so a list
//! endpoint can never accidentally leak columns the contract does not expose.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A company row.
///
/// `code` is the primary identifier, derived from `name` at creation time
/// and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Company {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

/// Narrow projection of a company for list views: `code` and `name` only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct CompanySummary {
    pub code: String,
    pub name: String,
}

/// A company augmented with its invoice ids and industry names.
///
/// Only the detail view carries the joined collections; create and update
/// echo the bare row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyDetail {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub invoices: Vec<i32>,
    pub industries: Vec<String>,
}

/// An invoice row.
///
/// `add_date` is set once at insertion. `paid_date` is derived from `paid`
/// transitions on update and is never set directly by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Invoice {
    pub id: i32,
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
}

/// Narrow projection of an invoice for list views: `id` and `comp_code` only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct InvoiceSummary {
    pub id: i32,
    pub comp_code: String,
}

/// An invoice joined with its owning company for the detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDetail {
    pub id: i32,
    pub amt: f64,
    pub paid: bool,
    pub add_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
    pub company: Company,
}

/// An industry tag.
///
/// Industries have no HTTP surface of their own; rows arrive via migrations
/// or direct store inserts and are attached to companies at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Industry {
    pub code: String,
    pub industry: String,
}

impl InvoiceDetail {
    /// Shape the detail view from an invoice row and its owning company
    pub fn from_parts(invoice: Invoice, company: Company) -> Self {
        Self {
            id: invoice.id,
            amt: invoice.amt,
            paid: invoice.paid,
            add_date: invoice.add_date,
            paid_date: invoice.paid_date,
            company,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_detail_drops_comp_code() {
        let company = Company {
            code: "acme".to_string(),
            name: "Acme".to_string(),
            description: None,
        };
        let invoice = Invoice {
            id: 1,
            comp_code: "acme".to_string(),
            amt: 100.0,
            paid: false,
            add_date: Utc::now(),
            paid_date: None,
        };

        let detail = InvoiceDetail::from_parts(invoice, company.clone());
        assert_eq!(detail.company, company);

        // The detail view nests the company instead of repeating comp_code
        let json = serde_json::to_value(&detail).unwrap();
        assert!(json.get("comp_code").is_none());
        assert_eq!(json["company"]["code"], "acme");
    }

    #[test]
    fn test_company_summary_serializes_narrow() {
        let summary = CompanySummary {
            code: "acme".to_string(),
            name: "Acme".to_string(),
        };
        let json = serde_json::to_value(&summary).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["code", "name"]);
    }

    #[test]
    fn test_company_description_round_trips_null() {
        let company = Company {
            code: "acme".to_string(),
            name: "Acme".to_string(),
            description: None,
        };
        let json = serde_json::to_value(&company).unwrap();
        assert!(json["description"].is_null());

        let back: Company = serde_json::from_value(json).unwrap();
        assert_eq!(back, company);
    }
}
