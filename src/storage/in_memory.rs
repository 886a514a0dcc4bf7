//! In-memory implementation of BizStore for testing and development
//!
//! Mirrors the relational semantics the PostgreSQL backend gets for free:
//! serial invoice ids, `add_date` defaulting, referential integrity on
//! `comp_code` and industry codes, and cascading deletes. HTTP-level tests
//! run against this backend and observe the same behavior as production.

use crate::core::error::StoreError;
use crate::core::model::{Company, CompanySummary, Industry, Invoice, InvoiceSummary};
use crate::core::store::BizStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
struct MemTables {
    companies: BTreeMap<String, Company>,
    invoices: BTreeMap<i32, Invoice>,
    industries: BTreeMap<String, Industry>,
    /// Association pairs (comp_code, industry_code)
    company_industries: BTreeSet<(String, String)>,
    next_invoice_id: i32,
}

/// In-memory biztime store
///
/// Uses RwLock for thread-safe access. Cloning shares the underlying tables.
#[derive(Clone)]
pub struct InMemoryStore {
    tables: Arc<RwLock<MemTables>>,
}

impl InMemoryStore {
    /// Create a new empty in-memory store
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(MemTables {
                next_invoice_id: 1,
                ..MemTables::default()
            })),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, MemTables>, StoreError> {
        self.tables.read().map_err(|e| StoreError::Query {
            message: format!("failed to acquire read lock: {}", e),
        })
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, MemTables>, StoreError> {
        self.tables.write().map_err(|e| StoreError::Query {
            message: format!("failed to acquire write lock: {}", e),
        })
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BizStore for InMemoryStore {
    async fn list_companies(&self) -> Result<Vec<CompanySummary>, StoreError> {
        let tables = self.read()?;

        Ok(tables
            .companies
            .values()
            .map(|c| CompanySummary {
                code: c.code.clone(),
                name: c.name.clone(),
            })
            .collect())
    }

    async fn get_company(&self, code: &str) -> Result<Option<Company>, StoreError> {
        let tables = self.read()?;

        Ok(tables.companies.get(code).cloned())
    }

    async fn invoice_ids_for_company(&self, code: &str) -> Result<Vec<i32>, StoreError> {
        let tables = self.read()?;

        Ok(tables
            .invoices
            .values()
            .filter(|inv| inv.comp_code == code)
            .map(|inv| inv.id)
            .collect())
    }

    async fn industries_for_company(&self, code: &str) -> Result<Vec<String>, StoreError> {
        let tables = self.read()?;

        Ok(tables
            .company_industries
            .iter()
            .filter(|(comp_code, _)| comp_code == code)
            .filter_map(|(_, industry_code)| tables.industries.get(industry_code))
            .map(|ind| ind.industry.clone())
            .collect())
    }

    async fn insert_company(&self, company: Company) -> Result<Company, StoreError> {
        let mut tables = self.write()?;

        if tables.companies.contains_key(&company.code) {
            return Err(StoreError::Integrity {
                message: format!("company code '{}' already exists", company.code),
            });
        }
        if tables.companies.values().any(|c| c.name == company.name) {
            return Err(StoreError::Integrity {
                message: format!("company name '{}' already exists", company.name),
            });
        }

        tables.companies.insert(company.code.clone(), company.clone());

        Ok(company)
    }

    async fn attach_industry(
        &self,
        comp_code: &str,
        industry_code: &str,
    ) -> Result<(), StoreError> {
        let mut tables = self.write()?;

        if !tables.companies.contains_key(comp_code) {
            return Err(StoreError::Integrity {
                message: format!("comp_code '{}' references a missing company", comp_code),
            });
        }
        if !tables.industries.contains_key(industry_code) {
            return Err(StoreError::Integrity {
                message: format!(
                    "industry_code '{}' references a missing industry",
                    industry_code
                ),
            });
        }

        let pair = (comp_code.to_string(), industry_code.to_string());
        if !tables.company_industries.insert(pair) {
            return Err(StoreError::Integrity {
                message: format!(
                    "company '{}' is already linked to industry '{}'",
                    comp_code, industry_code
                ),
            });
        }

        Ok(())
    }

    async fn update_company(
        &self,
        code: &str,
        name: String,
        description: Option<String>,
    ) -> Result<Option<Company>, StoreError> {
        let mut tables = self.write()?;

        let Some(company) = tables.companies.get_mut(code) else {
            return Ok(None);
        };

        company.name = name;
        company.description = description;

        Ok(Some(company.clone()))
    }

    async fn delete_company(&self, code: &str) -> Result<bool, StoreError> {
        let mut tables = self.write()?;

        if tables.companies.remove(code).is_none() {
            return Ok(false);
        }

        // Cascade, as the schema's ON DELETE CASCADE would
        tables.invoices.retain(|_, inv| inv.comp_code != code);
        tables
            .company_industries
            .retain(|(comp_code, _)| comp_code != code);

        Ok(true)
    }

    async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, StoreError> {
        let tables = self.read()?;

        Ok(tables
            .invoices
            .values()
            .map(|inv| InvoiceSummary {
                id: inv.id,
                comp_code: inv.comp_code.clone(),
            })
            .collect())
    }

    async fn get_invoice_with_company(
        &self,
        id: i32,
    ) -> Result<Option<(Invoice, Company)>, StoreError> {
        let tables = self.read()?;

        let Some(invoice) = tables.invoices.get(&id) else {
            return Ok(None);
        };

        // Inner join: an invoice whose company vanished is simply not found
        let Some(company) = tables.companies.get(&invoice.comp_code) else {
            return Ok(None);
        };

        Ok(Some((invoice.clone(), company.clone())))
    }

    async fn insert_invoice(&self, comp_code: &str, amt: f64) -> Result<Invoice, StoreError> {
        let mut tables = self.write()?;

        if !tables.companies.contains_key(comp_code) {
            return Err(StoreError::Integrity {
                message: format!("comp_code '{}' references a missing company", comp_code),
            });
        }

        let id = tables.next_invoice_id;
        tables.next_invoice_id += 1;

        let invoice = Invoice {
            id,
            comp_code: comp_code.to_string(),
            amt,
            paid: false,
            add_date: Utc::now(),
            paid_date: None,
        };
        tables.invoices.insert(id, invoice.clone());

        Ok(invoice)
    }

    async fn update_invoice(
        &self,
        id: i32,
        amt: f64,
        paid: bool,
        paid_date: Option<DateTime<Utc>>,
    ) -> Result<Option<Invoice>, StoreError> {
        let mut tables = self.write()?;

        let Some(invoice) = tables.invoices.get_mut(&id) else {
            return Ok(None);
        };

        invoice.amt = amt;
        invoice.paid = paid;
        invoice.paid_date = paid_date;

        Ok(Some(invoice.clone()))
    }

    async fn delete_invoice(&self, id: i32) -> Result<bool, StoreError> {
        let mut tables = self.write()?;

        Ok(tables.invoices.remove(&id).is_some())
    }

    async fn insert_industry(&self, industry: Industry) -> Result<Industry, StoreError> {
        let mut tables = self.write()?;

        if tables.industries.contains_key(&industry.code) {
            return Err(StoreError::Integrity {
                message: format!("industry code '{}' already exists", industry.code),
            });
        }
        if tables
            .industries
            .values()
            .any(|i| i.industry == industry.industry)
        {
            return Err(StoreError::Integrity {
                message: format!("industry name '{}' already exists", industry.industry),
            });
        }

        tables
            .industries
            .insert(industry.code.clone(), industry.clone());

        Ok(industry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> Company {
        Company {
            code: "acme".to_string(),
            name: "Acme".to_string(),
            description: Some("Anvils and more".to_string()),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_company() {
        let store = InMemoryStore::new();

        let created = store.insert_company(acme()).await.unwrap();
        assert_eq!(created.code, "acme");

        let fetched = store.get_company("acme").await.unwrap();
        assert_eq!(fetched, Some(acme()));

        let missing = store.get_company("nope").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_insert_duplicate_company_is_integrity_error() {
        let store = InMemoryStore::new();
        store.insert_company(acme()).await.unwrap();

        let err = store.insert_company(acme()).await.unwrap_err();
        assert!(matches!(err, StoreError::Integrity { .. }));
    }

    #[tokio::test]
    async fn test_list_companies_is_narrow() {
        let store = InMemoryStore::new();
        store.insert_company(acme()).await.unwrap();

        let companies = store.list_companies().await.unwrap();
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].code, "acme");
        assert_eq!(companies[0].name, "Acme");
    }

    #[tokio::test]
    async fn test_update_company_overwrites_description() {
        let store = InMemoryStore::new();
        store.insert_company(acme()).await.unwrap();

        let updated = store
            .update_company("acme", "Acme Corp".to_string(), None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Acme Corp");
        assert_eq!(updated.description, None);

        let missing = store
            .update_company("nope", "x".to_string(), None)
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_invoice_ids_are_serial() {
        let store = InMemoryStore::new();
        store.insert_company(acme()).await.unwrap();

        let first = store.insert_invoice("acme", 100.0).await.unwrap();
        let second = store.insert_invoice("acme", 200.0).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(!first.paid);
        assert!(first.paid_date.is_none());
    }

    #[tokio::test]
    async fn test_insert_invoice_for_missing_company_fails() {
        let store = InMemoryStore::new();

        let err = store.insert_invoice("ghost", 100.0).await.unwrap_err();
        assert!(matches!(err, StoreError::Integrity { .. }));
    }

    #[tokio::test]
    async fn test_update_invoice_writes_paid_date_through() {
        let store = InMemoryStore::new();
        store.insert_company(acme()).await.unwrap();
        let invoice = store.insert_invoice("acme", 100.0).await.unwrap();

        let stamp = Utc::now();
        let updated = store
            .update_invoice(invoice.id, 300.0, true, Some(stamp))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.amt, 300.0);
        assert!(updated.paid);
        assert_eq!(updated.paid_date, Some(stamp));

        let cleared = store
            .update_invoice(invoice.id, 300.0, false, None)
            .await
            .unwrap()
            .unwrap();
        assert!(!cleared.paid);
        assert!(cleared.paid_date.is_none());
    }

    #[tokio::test]
    async fn test_delete_company_cascades() {
        let store = InMemoryStore::new();
        store.insert_company(acme()).await.unwrap();
        store
            .insert_industry(Industry {
                code: "mfg".to_string(),
                industry: "Manufacturing".to_string(),
            })
            .await
            .unwrap();
        store.attach_industry("acme", "mfg").await.unwrap();
        let invoice = store.insert_invoice("acme", 100.0).await.unwrap();

        assert!(store.delete_company("acme").await.unwrap());

        assert!(store.get_company("acme").await.unwrap().is_none());
        assert!(
            store
                .get_invoice_with_company(invoice.id)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            store
                .industries_for_company("acme")
                .await
                .unwrap()
                .is_empty()
        );

        // Deleting again reports no row matched
        assert!(!store.delete_company("acme").await.unwrap());
    }

    #[tokio::test]
    async fn test_attach_industry_requires_both_sides() {
        let store = InMemoryStore::new();
        store.insert_company(acme()).await.unwrap();

        let err = store.attach_industry("acme", "ghost").await.unwrap_err();
        assert!(matches!(err, StoreError::Integrity { .. }));

        let err = store.attach_industry("ghost", "mfg").await.unwrap_err();
        assert!(matches!(err, StoreError::Integrity { .. }));
    }

    #[tokio::test]
    async fn test_industries_for_company_returns_names() {
        let store = InMemoryStore::new();
        store.insert_company(acme()).await.unwrap();
        store
            .insert_industry(Industry {
                code: "mfg".to_string(),
                industry: "Manufacturing".to_string(),
            })
            .await
            .unwrap();
        store.attach_industry("acme", "mfg").await.unwrap();

        let industries = store.industries_for_company("acme").await.unwrap();
        assert_eq!(industries, vec!["Manufacturing".to_string()]);
    }

    #[tokio::test]
    async fn test_get_invoice_with_company_joins() {
        let store = InMemoryStore::new();
        store.insert_company(acme()).await.unwrap();
        let invoice = store.insert_invoice("acme", 100.0).await.unwrap();

        let (inv, company) = store
            .get_invoice_with_company(invoice.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(inv.id, invoice.id);
        assert_eq!(company.code, "acme");

        assert!(store.get_invoice_with_company(999).await.unwrap().is_none());
    }
}
