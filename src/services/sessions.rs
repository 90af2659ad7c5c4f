use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use moka::ops::compute::{CompResult, Op};

use crate::core::{apply_edit, EditOutcome, Evaluation, Matcher};
use crate::error::{MatchingError, ValidationError};
use crate::models::PreferenceProfile;

/// Errors that can occur with session operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(Uuid),

    #[error(transparent)]
    Matching(#[from] MatchingError),
}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        SessionError::Matching(err.into())
    }
}

/// A caller's working profile, stored by value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub profile: PreferenceProfile,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Outcome of a preference edit on a session
#[derive(Debug, Clone)]
pub struct SessionEdit {
    pub session: Session,
    pub rejection: Option<ValidationError>,
}

/// In-memory session store
///
/// Profiles are kept in a bounded moka cache with a time-to-live. Every
/// stored profile is complete: creation and replacement validate, and edits
/// go through the commit-on-completeness editor.
pub struct SessionStore {
    sessions: moka::future::Cache<Uuid, Session>,
    matcher: Matcher,
}

impl SessionStore {
    pub fn new(max_sessions: u64, ttl_secs: u64, matcher: Matcher) -> Self {
        let sessions = moka::future::CacheBuilder::new(max_sessions)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { sessions, matcher }
    }

    /// Open a session on a complete profile
    pub async fn create(&self, profile: PreferenceProfile) -> Result<Session, SessionError> {
        self.check_profile(&profile)?;

        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            profile,
            created_at: now,
            updated_at: now,
        };
        self.sessions.insert(session.id, session.clone()).await;

        tracing::debug!("Created session {} (n={})", session.id, session.profile.size());
        Ok(session)
    }

    pub async fn get(&self, id: Uuid) -> Result<Session, SessionError> {
        self.sessions.get(&id).await.ok_or(SessionError::NotFound(id))
    }

    /// Swap in a whole new profile, e.g. from a preset or a random draw
    pub async fn replace_profile(
        &self,
        id: Uuid,
        profile: PreferenceProfile,
    ) -> Result<Session, SessionError> {
        self.check_profile(&profile)?;
        self.modify(id, |_| Some(profile)).await
    }

    /// Apply one list edit; incomplete lists leave the session unchanged
    pub async fn update_preferences(
        &self,
        id: Uuid,
        participant: &str,
        preferences: &[String],
    ) -> Result<SessionEdit, SessionError> {
        let mut rejection = None;
        let session = self
            .modify(id, |session| {
                let EditOutcome { profile, rejection: reason } =
                    apply_edit(&session.profile, participant, preferences);
                let committed = reason.is_none();
                rejection = reason;
                committed.then_some(profile)
            })
            .await?;

        Ok(SessionEdit { session, rejection })
    }

    /// Evaluate the session's current profile
    pub async fn evaluate(&self, id: Uuid) -> Result<Evaluation, SessionError> {
        let session = self.get(id).await?;
        Ok(self.matcher.evaluate(&session.profile)?)
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), SessionError> {
        self.sessions
            .remove(&id)
            .await
            .map(|_| ())
            .ok_or(SessionError::NotFound(id))
    }

    pub fn entry_count(&self) -> u64 {
        self.sessions.entry_count()
    }

    /// Swap a session's profile in place. `edit` returns the new profile or
    /// `None` to keep the current one. The read and the write happen under
    /// the entry's lock, so a concurrent `remove` is never undone.
    async fn modify<F>(&self, id: Uuid, edit: F) -> Result<Session, SessionError>
    where
        F: FnOnce(&Session) -> Option<PreferenceProfile>,
    {
        let result = self
            .sessions
            .entry(id)
            .and_compute_with(|current| {
                let op = match current {
                    Some(entry) => match edit(entry.value()) {
                        Some(profile) => {
                            let mut session = entry.into_value();
                            session.profile = profile;
                            session.updated_at = Utc::now();
                            Op::Put(session)
                        }
                        None => Op::Nop,
                    },
                    None => Op::Nop,
                };
                std::future::ready(op)
            })
            .await;

        match result {
            CompResult::Inserted(entry)
            | CompResult::ReplacedWith(entry)
            | CompResult::Unchanged(entry) => Ok(entry.into_value()),
            _ => Err(SessionError::NotFound(id)),
        }
    }

    fn check_profile(&self, profile: &PreferenceProfile) -> Result<(), SessionError> {
        self.matcher.check_size(profile)?;
        profile.validate()?;
        Ok(())
    }
}
