#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use taxpayer_desk::{DeskError, RecordService, Result, TaxPayerId, TaxPayerRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetAll,
    Create(TaxPayerRecord),
    Search(TaxPayerId),
}

#[derive(Default)]
struct State {
    records: Vec<TaxPayerRecord>,
    calls: Vec<Call>,
    fail_get_all: bool,
    fail_create: bool,
    fail_search: bool,
}

/// In-memory record service that remembers every call made to it.
#[derive(Clone, Default)]
pub struct RecordingService {
    state: Arc<Mutex<State>>,
}

impl RecordingService {
    pub fn with_records(records: Vec<TaxPayerRecord>) -> Self {
        let service = Self::default();
        service.state.lock().unwrap().records = records;
        service
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn fail_get_all(&self, fail: bool) {
        self.state.lock().unwrap().fail_get_all = fail;
    }

    pub fn fail_create(&self, fail: bool) {
        self.state.lock().unwrap().fail_create = fail;
    }

    pub fn fail_search(&self, fail: bool) {
        self.state.lock().unwrap().fail_search = fail;
    }
}

fn unavailable(operation: &'static str) -> DeskError {
    DeskError::Service {
        operation,
        status: 503,
        body: "unavailable".to_string(),
    }
}

#[async_trait]
impl RecordService for RecordingService {
    async fn get_all_tax_payers(&self) -> Result<Vec<TaxPayerRecord>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::GetAll);
        if state.fail_get_all {
            return Err(unavailable("list taxpayers"));
        }
        Ok(state.records.clone())
    }

    async fn create_tax_payer(&self, record: &TaxPayerRecord) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Create(record.clone()));
        if state.fail_create {
            return Err(unavailable("create a taxpayer"));
        }
        state.records.push(record.clone());
        Ok(())
    }

    async fn search_tax_payer(&self, tid: &TaxPayerId) -> Result<Vec<TaxPayerRecord>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Search(tid.clone()));
        if state.fail_search {
            return Err(unavailable("search taxpayers"));
        }
        Ok(state
            .records
            .iter()
            .filter(|r| &r.tid == tid)
            .take(1)
            .cloned()
            .collect())
    }
}

pub fn record(tid: u64, first: &str, last: &str, address: &str) -> TaxPayerRecord {
    TaxPayerRecord::new(TaxPayerId::from(tid), first, last, address)
}

pub fn sample_records(n: u64) -> Vec<TaxPayerRecord> {
    (1..=n)
        .map(|i| record(i, &format!("First{i}"), &format!("Last{i}"), &format!("{i} Main St")))
        .collect()
}
