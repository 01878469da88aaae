//! Per-session visit counting
//!
//! [`track_visit`] is the whole counting rule: a session's `visits` counter
//! goes up by one the first time it is seen on a later calendar day than its
//! `last_visit`. [`VisitsService`] wraps it with a [`SessionStore`] and makes
//! the load/track/save sequence exclusive per session id.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use chrono::{Local, NaiveDateTime};
use tokio::sync::OwnedMutexGuard;

use crate::{
    error::{AppError, AppResult},
    models::visit::{
        format_timestamp, parse_timestamp, parse_visits, SessionState, VisitRecord, LAST_VISIT_KEY,
        VISITS_KEY,
    },
    services::sessions::SessionStore,
};

/// Apply one page view to a session's visit state.
///
/// Missing keys default to `visits = 1` and `last_visit = now`. When `now`
/// falls on a later calendar day than `last_visit` the counter is
/// incremented and `last_visit` becomes `now`; otherwise the stored
/// `last_visit` string is written back untouched.
pub fn track_visit(mut session: SessionState, now: NaiveDateTime) -> AppResult<SessionState> {
    let visits = match session.get(VISITS_KEY) {
        Some(raw) => parse_visits(raw)?,
        None => 1,
    };

    let last_visit_raw = session
        .get(LAST_VISIT_KEY)
        .map(str::to_string)
        .unwrap_or_else(|| format_timestamp(now));
    let last_visit = parse_timestamp(&last_visit_raw)?;

    let day_gap = (now.date() - last_visit.date()).num_days();

    let visits = if day_gap > 0 {
        session.set(LAST_VISIT_KEY, format_timestamp(now));
        visits.checked_add(1).ok_or_else(|| {
            AppError::MalformedSessionState(format!("{} value {} cannot grow", VISITS_KEY, visits))
        })?
    } else {
        session.set(LAST_VISIT_KEY, last_visit_raw);
        visits
    };

    session.set(VISITS_KEY, visits.to_string());
    Ok(session)
}

/// Registry of per-session async mutexes
#[derive(Clone, Default)]
pub struct SessionLocks {
    inner: Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>,
}

/// Above this many entries, unused locks are dropped on the next acquire
const LOCK_PRUNE_THRESHOLD: usize = 1024;

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `session_id`
    pub async fn acquire(&self, session_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            if locks.len() >= LOCK_PRUNE_THRESHOLD {
                locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            }
            locks.entry(session_id.to_string()).or_default().clone()
        };
        lock.lock_owned().await
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[derive(Clone)]
pub struct VisitsService {
    store: Arc<dyn SessionStore>,
    locks: SessionLocks,
}

impl VisitsService {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            locks: SessionLocks::new(),
        }
    }

    pub fn locks(&self) -> &SessionLocks {
        &self.locks
    }

    /// Count a page view of `session_id` at the local wall-clock time
    pub async fn record_visit(&self, session_id: &str) -> AppResult<VisitRecord> {
        self.record_visit_at(session_id, Local::now().naive_local()).await
    }

    /// Count a page view of `session_id` at `now`.
    ///
    /// A session whose visit keys cannot be parsed is reset to a first
    /// visit at `now`; other keys of the session are kept. A session the
    /// store cannot decode at all starts over empty.
    pub async fn record_visit_at(&self, session_id: &str, now: NaiveDateTime) -> AppResult<VisitRecord> {
        let _guard = self.locks.acquire(session_id).await;

        let session = match self.store.load(session_id).await {
            Ok(session) => session,
            Err(AppError::MalformedSessionState(reason)) => {
                tracing::warn!("Discarding stored state of session {}: {}", session_id, reason);
                SessionState::new()
            }
            Err(e) => return Err(e),
        };
        let session = match track_visit(session.clone(), now) {
            Ok(updated) => updated,
            Err(AppError::MalformedSessionState(reason)) => {
                tracing::warn!("Resetting visit state of session {}: {}", session_id, reason);
                let mut reset = session;
                reset.remove(VISITS_KEY);
                reset.remove(LAST_VISIT_KEY);
                track_visit(reset, now)?
            }
            Err(e) => return Err(e),
        };

        self.store.save(session_id, &session).await?;

        let record = VisitRecord::from_session(&session)?;
        tracing::debug!(
            "Session {} at {} visit(s), last {}",
            session_id,
            record.visits,
            record.last_visit
        );
        Ok(record)
    }
}
