use metrics_exporter_prometheus::PrometheusHandle;
use site_audit::audit::runs::{AuditId, AuditRecord, AuditRepository, RepositoryError};
use site_audit::audit::AuditResult;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

const SAMPLE_AUDIT: &str = include_str!("../fixtures/sample_audit.json");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAuditRepository {
    records: Arc<Mutex<HashMap<AuditId, AuditRecord>>>,
}

impl InMemoryAuditRepository {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<AuditId, AuditRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl AuditRepository for InMemoryAuditRepository {
    fn insert(&self, record: AuditRecord) -> Result<AuditRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.audit_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.audit_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AuditId) -> Result<Option<AuditRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<AuditRecord>, RepositoryError> {
        let guard = self.lock()?;
        let mut records: Vec<AuditRecord> = guard.values().cloned().collect();
        records.sort_by(|a, b| {
            b.audited_at
                .cmp(&a.audited_at)
                .then_with(|| b.audit_id.cmp(&a.audit_id))
        });
        records.truncate(limit);
        Ok(records)
    }
}

/// Bundled WordPress audit used when the CLI is run without `--input`.
pub(crate) fn sample_audit() -> Result<AuditResult, serde_json::Error> {
    serde_json::from_str(SAMPLE_AUDIT)
}
