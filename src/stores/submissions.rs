use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::models::SubmissionReceipt;
use crate::services::storage::{write_json, LocalStore, StorageError, StorageKey};
use crate::stores::{load_or_default, lock};

/// Confirmations for submitted applications, keyed by grant id
pub struct SubmissionLog {
    store: Arc<dyn LocalStore>,
    receipts: Mutex<BTreeMap<String, SubmissionReceipt>>,
}

impl SubmissionLog {
    pub fn load(store: Arc<dyn LocalStore>) -> Self {
        let receipts: BTreeMap<String, SubmissionReceipt> =
            load_or_default(store.as_ref(), StorageKey::SUBMISSIONS);
        Self {
            store,
            receipts: Mutex::new(receipts),
        }
    }

    pub fn get(&self, grant_id: &str) -> Option<SubmissionReceipt> {
        lock(&self.receipts).get(grant_id).cloned()
    }

    /// Latest submission per grant wins
    pub fn record(&self, receipt: SubmissionReceipt) -> Result<(), StorageError> {
        let mut receipts = lock(&self.receipts);
        receipts.insert(receipt.grant_id.clone(), receipt);
        write_json(self.store.as_ref(), StorageKey::SUBMISSIONS, &*receipts)
    }
}
