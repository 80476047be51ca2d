//! Per-visitor state, keyed by the `mealpick_session` cookie.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use mealpick_types::{context::SerializedContext, form::FormRecord};
use uuid::Uuid;

use crate::flow::{self, Effect, Event, InterfaceState, TransitionError};

/// The one value a session remembers between requests: the context of the
/// most recent submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    context: Option<SerializedContext>,
}

impl SessionState {
    pub fn get(&self) -> Option<&SerializedContext> {
        self.context.as_ref()
    }

    /// Replace the stored context. Last write wins.
    pub fn set(&mut self, context: SerializedContext) {
        self.context = Some(context);
    }
}

#[derive(Debug)]
pub struct Session {
    pub memory: SessionState,
    pub interface: InterfaceState,
    /// Widget values of the last submission, used to refill the form.
    pub form: FormRecord,
    /// Markdown of the answer on display, if any.
    pub answer: Option<String>,
    last_seen: Instant,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            memory: SessionState::default(),
            interface: InterfaceState::default(),
            form: FormRecord::default(),
            answer: None,
            last_seen: Instant::now(),
        }
    }
}

impl Session {
    /// Run `event` through the state machine and commit the new state.
    pub fn dispatch(&mut self, event: Event) -> Result<Effect, TransitionError> {
        let (next, effect) = flow::transition(self.interface, event, &mut self.memory)?;
        tracing::trace!(from = ?self.interface, to = ?next, "session transition");
        self.interface = next;
        Ok(effect)
    }

    pub fn can_regenerate(&self) -> bool {
        self.memory.get().is_some()
    }
}

/// In-memory session table.
///
/// Entries idle for longer than `idle_ttl` are dropped whenever a new
/// session is opened. A session with a request in flight is never dropped.
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<Uuid, Session>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            idle_ttl,
        }
    }

    /// Find the session for `cookie`, or open a new one. The flag is `true`
    /// when a new session was opened and the cookie has to be (re)issued.
    pub fn resolve(&self, cookie: Option<Uuid>) -> (Uuid, bool) {
        if let Some(id) = cookie {
            if let Some(mut session) = self.sessions.get_mut(&id) {
                session.last_seen = Instant::now();
                return (id, false);
            }
        }

        self.prune_idle();

        let id = Uuid::new_v4();
        self.sessions.insert(id, Session::default());
        tracing::debug!(session = %id, "opened session");
        (id, true)
    }

    /// Run `f` against session `id`, recreating it if it was pruned meanwhile.
    ///
    /// The entry stays locked while `f` runs, so `f` must not block.
    pub fn with_session<R>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut session = self.sessions.entry(id).or_default();
        session.last_seen = Instant::now();
        f(&mut session)
    }

    pub fn prune_idle(&self) {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| {
            session.interface == InterfaceState::Requesting
                || session.last_seen.elapsed() < self.idle_ttl
        });
        let pruned = before.saturating_sub(self.sessions.len());
        if pruned > 0 {
            tracing::debug!(pruned, "dropped idle sessions");
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn unknown_cookie_opens_a_new_session() {
        let store = SessionStore::new(Duration::from_secs(60));

        let (id, created) = store.resolve(Some(Uuid::new_v4()));
        let (again, created_again) = store.resolve(Some(id));

        assert!(created);
        assert!(!created_again);
        assert_eq!(id, again);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn sessions_do_not_share_memory() {
        let store = SessionStore::new(Duration::from_secs(60));
        let (a, _) = store.resolve(None);
        let (b, _) = store.resolve(None);

        store
            .with_session(a, |s| s.dispatch(Event::Submit(FormRecord::default().to_context())))
            .unwrap();

        assert!(store.with_session(a, |s| s.can_regenerate()));
        assert!(!store.with_session(b, |s| s.can_regenerate()));
    }

    #[test]
    fn failed_dispatch_keeps_interface_state() {
        let mut session = Session::default();

        let err = session.dispatch(Event::Regenerate).unwrap_err();

        assert_eq!(err, TransitionError::NothingToRegenerate);
        assert_eq!(session.interface, InterfaceState::Idle);
    }

    #[test]
    fn pruning_spares_in_flight_sessions() {
        let store = SessionStore::new(Duration::ZERO);
        let (busy, _) = store.resolve(None);
        let (_idle, _) = store.resolve(None);
        store
            .with_session(busy, |s| s.dispatch(Event::Submit(FormRecord::default().to_context())))
            .unwrap();

        store.prune_idle();

        assert_eq!(store.len(), 1);
        assert!(store.with_session(busy, |s| s.interface == InterfaceState::Requesting));
    }
}
