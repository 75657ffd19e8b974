//! View-model controller: owns the record snapshot, the creation form, the
//! search box and the busy flag, and talks to the record service.
//!
//! Failures are logged through `tracing` and kept as a user-facing notice;
//! the snapshot and form are otherwise left as they were.

use crate::core::form::TaxPayerForm;
use crate::domain::model::{TaxPayerId, TaxPayerRecord};
use crate::domain::ports::RecordService;
use crate::utils::error::{DeskError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Search box was empty; nothing was sent.
    Skipped,
    Found(TaxPayerRecord),
    NotFound,
}

/// Sets the busy flag for its lifetime. Dropping it (including when the
/// owning future is dropped mid-request) clears the flag.
struct BusyGuard<'a> {
    flag: &'a mut bool,
}

impl<'a> BusyGuard<'a> {
    fn engage(flag: &'a mut bool, operation: &'static str) -> Result<Self> {
        if *flag {
            tracing::warn!("⏳ {} ignored: another operation is in flight", operation);
            return Err(DeskError::Busy { operation });
        }
        *flag = true;
        Ok(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}

pub struct TaxPayerController<S: RecordService> {
    service: S,
    records: Vec<TaxPayerRecord>,
    busy: bool,
    search_input: String,
    form: TaxPayerForm,
    notice: Option<String>,
}

impl<S: RecordService> TaxPayerController<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            records: Vec::new(),
            busy: false,
            search_input: String::new(),
            form: TaxPayerForm::new(),
            notice: None,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Current snapshot, in the order the service returned it.
    pub fn records(&self) -> &[TaxPayerRecord] {
        &self.records
    }

    /// True only while a request is awaiting the service. Operations take
    /// `&mut self`, so callers holding the controller always see `false`
    /// between calls; the flag exists for front ends that render while an
    /// operation future is still pending.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn form(&self) -> &TaxPayerForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TaxPayerForm {
        &mut self.form
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn set_search_input(&mut self, input: impl Into<String>) {
        self.search_input = input.into();
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub async fn load_all(&mut self) -> Result<&[TaxPayerRecord]> {
        let _busy = BusyGuard::engage(&mut self.busy, "load")?;

        match self.service.get_all_tax_payers().await {
            Ok(records) => {
                tracing::info!("📋 Loaded {} taxpayers", records.len());
                self.records = records;
                self.notice = None;
            }
            Err(e) => {
                tracing::error!("❌ Error fetching taxpayers: {}", e);
                self.notice = Some(e.user_friendly_message());
                return Err(e);
            }
        }
        Ok(&self.records)
    }

    /// Validate the form, create the record, then reload the full collection.
    pub async fn submit(&mut self) -> Result<()> {
        let candidate = match self.form.validate() {
            Ok(candidate) => candidate,
            Err(e) => {
                tracing::debug!("Form rejected before submission: {}", e);
                self.notice = Some(e.user_friendly_message());
                return Err(e);
            }
        };

        {
            let _busy = BusyGuard::engage(&mut self.busy, "create")?;
            if let Err(e) = self.service.create_tax_payer(&candidate).await {
                tracing::error!("❌ Error creating taxpayer {}: {}", candidate.tid, e);
                self.notice = Some(e.user_friendly_message());
                return Err(e);
            }
        }
        tracing::info!("✅ Created taxpayer {}", candidate.tid);
        self.form.reset();

        // The record is committed; a failed reload only leaves the old snapshot and a notice.
        if let Err(e) = self.load_all().await {
            tracing::warn!("Taxpayer {} was created but the list is stale: {}", candidate.tid, e);
        }
        Ok(())
    }

    /// Look up the identifier currently in the search box.
    pub async fn search(&mut self) -> Result<SearchOutcome> {
        if self.search_input.trim().is_empty() {
            tracing::debug!("Search skipped: empty input");
            return Ok(SearchOutcome::Skipped);
        }

        let tid = match self.search_input.parse::<TaxPayerId>() {
            Ok(tid) => tid,
            Err(e) => {
                tracing::debug!("Search rejected: {}", e);
                self.notice = Some(e.user_friendly_message());
                return Err(e);
            }
        };

        let _busy = BusyGuard::engage(&mut self.busy, "search")?;

        match self.service.search_tax_payer(&tid).await {
            Ok(results) => {
                self.notice = None;
                match results.into_iter().next() {
                    Some(found) => {
                        tracing::info!("🔍 Found taxpayer {}", found.tid);
                        self.records = vec![found.clone()];
                        Ok(SearchOutcome::Found(found))
                    }
                    None => {
                        tracing::info!("🔍 No taxpayer with TID {}", tid);
                        self.records.clear();
                        Ok(SearchOutcome::NotFound)
                    }
                }
            }
            Err(e) => {
                tracing::error!("❌ Error searching taxpayer {}: {}", tid, e);
                self.notice = Some(e.user_friendly_message());
                Err(e)
            }
        }
    }
}
