use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::core::drafts::{apply_suggestion, generate_draft};
use crate::models::{Draft, Grant, SuggestionKind};
use crate::services::storage::{write_json, LocalStore, StorageError, StorageKey};
use crate::stores::{load_or_default, lock};

/// Persisted application drafts, one per grant
pub struct DraftStore {
    store: Arc<dyn LocalStore>,
    drafts: Mutex<BTreeMap<String, Draft>>,
}

impl DraftStore {
    pub fn load(store: Arc<dyn LocalStore>) -> Self {
        let drafts: BTreeMap<String, Draft> = load_or_default(store.as_ref(), StorageKey::DRAFTS);
        Self {
            store,
            drafts: Mutex::new(drafts),
        }
    }

    fn persist(&self, drafts: &BTreeMap<String, Draft>) -> Result<(), StorageError> {
        write_json(self.store.as_ref(), StorageKey::DRAFTS, drafts)
    }

    pub fn get(&self, grant_id: &str) -> Option<Draft> {
        lock(&self.drafts).get(grant_id).cloned()
    }

    /// Insert or overwrite the draft for a grant; content is kept verbatim
    pub fn save(&self, grant_id: &str, content: String) -> Result<Draft, StorageError> {
        let draft = Draft {
            id: Draft::id_for(grant_id),
            grant_id: grant_id.to_string(),
            content,
            updated_at: Utc::now(),
        };

        let mut drafts = lock(&self.drafts);
        drafts.insert(grant_id.to_string(), draft.clone());
        self.persist(&drafts)?;
        Ok(draft)
    }

    /// Existing draft for the grant, or a freshly generated and saved one
    pub fn get_or_generate(&self, grant: &Grant) -> Result<Draft, StorageError> {
        if let Some(existing) = self.get(&grant.id) {
            return Ok(existing);
        }

        tracing::debug!("Generating draft for {}", grant.id);
        self.save(&grant.id, generate_draft(grant))
    }

    /// Rewrite the saved draft with a canned suggestion
    ///
    /// Returns `None` when there is no draft for the grant.
    pub fn apply_suggestion(
        &self,
        grant_id: &str,
        kind: SuggestionKind,
    ) -> Result<Option<Draft>, StorageError> {
        let Some(existing) = self.get(grant_id) else {
            return Ok(None);
        };

        let rewritten = apply_suggestion(&existing.content, kind);
        self.save(grant_id, rewritten).map(Some)
    }

    /// Returns whether a draft was removed
    pub fn delete(&self, grant_id: &str) -> Result<bool, StorageError> {
        let mut drafts = lock(&self.drafts);
        let removed = drafts.remove(grant_id).is_some();
        if removed {
            self.persist(&drafts)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::StaticCatalog;
    use crate::services::storage::MemoryStore;

    #[test]
    fn test_content_round_trips_verbatim() {
        let backend: Arc<dyn LocalStore> = Arc::new(MemoryStore::new());
        let store = DraftStore::load(backend.clone());
        let content = "  Dear CRADLE Fund,\r\n\t• \"quoted\" — 50% ✓\n\n".to_string();

        let saved = store.save("cradle-cip", content.clone()).unwrap();
        assert_eq!(saved.id, "draft-cradle-cip");

        let reloaded = DraftStore::load(backend);
        assert_eq!(reloaded.get("cradle-cip").unwrap().content, content);
    }

    #[test]
    fn test_get_or_generate_keeps_existing() {
        let store = DraftStore::load(Arc::new(MemoryStore::new()));
        let grant = StaticCatalog::mock_grants().remove(0);

        let generated = store.get_or_generate(&grant).unwrap();
        assert!(generated.content.contains(&grant.title));

        store.save(&grant.id, "my own words".to_string()).unwrap();
        assert_eq!(store.get_or_generate(&grant).unwrap().content, "my own words");
    }

    #[test]
    fn test_suggestion_is_saved() {
        let store = DraftStore::load(Arc::new(MemoryStore::new()));
        store.save("sme-corp-export", "We are exporters".to_string()).unwrap();

        let draft = store
            .apply_suggestion("sme-corp-export", SuggestionKind::Formal)
            .unwrap()
            .unwrap();
        assert_eq!(draft.content, "we remain exporters");
        assert_eq!(store.get("sme-corp-export").unwrap().content, "we remain exporters");

        assert!(store
            .apply_suggestion("missing", SuggestionKind::Clarity)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_delete() {
        let store = DraftStore::load(Arc::new(MemoryStore::new()));
        store.save("cradle-cip", "x".to_string()).unwrap();

        assert!(store.delete("cradle-cip").unwrap());
        assert!(!store.delete("cradle-cip").unwrap());
        assert!(store.get("cradle-cip").is_none());
    }
}
