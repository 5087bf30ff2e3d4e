use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::models::{OnboardingStep, Profile, ProfileUpdate};
use crate::services::storage::{write_json, LocalStore, StorageError, StorageKey};
use crate::stores::{load_or_default, lock};

/// Errors that can occur when updating the profile
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Profile is missing answers for: {}", titles(.0))]
    Incomplete(Vec<OnboardingStep>),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

fn titles(steps: &[OnboardingStep]) -> String {
    steps
        .iter()
        .map(OnboardingStep::title)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Persisted SME profile
pub struct ProfileStore {
    store: Arc<dyn LocalStore>,
    profile: Mutex<Profile>,
}

impl ProfileStore {
    pub fn load(store: Arc<dyn LocalStore>) -> Self {
        let profile: Profile = load_or_default(store.as_ref(), StorageKey::PROFILE);
        Self {
            store,
            profile: Mutex::new(profile),
        }
    }

    pub fn get(&self) -> Profile {
        lock(&self.profile).clone()
    }

    fn mutate(&self, f: impl FnOnce(&mut Profile)) -> Result<Profile, StorageError> {
        let mut current = lock(&self.profile);
        f(&mut current);
        write_json(self.store.as_ref(), StorageKey::PROFILE, &*current)?;
        Ok(current.clone())
    }

    fn replace(&self, profile: Profile) -> Result<Profile, StorageError> {
        self.mutate(|current| *current = profile)
    }

    /// Merge a partial update, e.g. one questionnaire step
    pub fn update(&self, update: ProfileUpdate) -> Result<Profile, StorageError> {
        self.mutate(|profile| profile.apply(update))
    }

    /// Validate every step and store the profile as complete
    pub fn complete(&self, mut profile: Profile) -> Result<Profile, ProfileError> {
        let missing: Vec<OnboardingStep> = OnboardingStep::ALL
            .into_iter()
            .filter(|step| !step.is_satisfied(&profile))
            .collect();
        if !missing.is_empty() {
            return Err(ProfileError::Incomplete(missing));
        }

        profile.is_complete = true;
        let profile = self.replace(profile)?;
        tracing::info!(
            "Profile completed: industry={}, location={}, needs={}",
            profile.industry,
            profile.location,
            profile.needs.len()
        );
        Ok(profile)
    }

    pub fn reset(&self) -> Result<Profile, StorageError> {
        self.replace(Profile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FundingNeed, TeamSize};
    use crate::services::storage::MemoryStore;

    fn complete_profile() -> Profile {
        Profile {
            industry: "technology".to_string(),
            location: "Kuala Lumpur".to_string(),
            team_size_bracket: TeamSize::Small,
            needs: vec![FundingNeed::Digitalisation],
            years: 3,
            is_complete: false,
        }
    }

    #[test]
    fn test_complete_persists() {
        let backend: Arc<dyn LocalStore> = Arc::new(MemoryStore::new());
        let store = ProfileStore::load(backend.clone());

        let saved = store.complete(complete_profile()).unwrap();
        assert!(saved.is_complete);

        let reloaded = ProfileStore::load(backend);
        assert_eq!(reloaded.get(), saved);
    }

    #[test]
    fn test_complete_rejects_missing_steps() {
        let store = ProfileStore::load(Arc::new(MemoryStore::new()));
        let mut profile = complete_profile();
        profile.location = String::new();
        profile.needs.clear();

        let err = store.complete(profile).unwrap_err();
        assert!(matches!(
            &err,
            ProfileError::Incomplete(steps)
                if steps == &vec![OnboardingStep::Location, OnboardingStep::Needs]
        ));
        assert_eq!(err.to_string(), "Profile is missing answers for: Location, Needs");
        assert_eq!(store.get(), Profile::default());
    }

    #[test]
    fn test_update_and_reset() {
        let store = ProfileStore::load(Arc::new(MemoryStore::new()));
        store
            .update(ProfileUpdate {
                location: Some("Sabah".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(store.get().location, "Sabah");

        store.reset().unwrap();
        assert_eq!(store.get(), Profile::default());
    }
}
