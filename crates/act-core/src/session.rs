//! Per-user act sessions.
//!
//! A [`SessionStore`] maps a user id to its [`SessionContext`]. Every
//! operation holds the user's entry for its whole duration, so updates to one
//! session never interleave. Do not call back into the store from the
//! closure given to [`SessionStore::confirm_with`]: the entry is locked.

use std::fmt;

use dashmap::DashMap;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::SessionError;
use crate::models::act::ActRecord;
use crate::parser::{ActParser, ParsedAct};

/// User identity as seen by the transport.
pub type UserId = i64;

/// Where a user is in the submit / confirm cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingInput,
    AwaitingConfirmation,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionState::Idle => "idle",
            SessionState::AwaitingInput => "awaiting input",
            SessionState::AwaitingConfirmation => "awaiting confirmation",
        })
    }
}

/// State of one user's session: at most one pending act.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContext {
    pub state: SessionState,
    pub current_act: Option<ActRecord>,
}

impl SessionContext {
    /// Drop the pending act and return to idle.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.current_act = None;
    }
}

/// Concurrent store of user sessions.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<UserId, SessionContext>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new act for `user`, discarding any pending one.
    pub fn begin(&self, user: UserId) -> SessionState {
        let mut ctx = self.sessions.entry(user).or_default();
        ctx.current_act = None;
        ctx.state = SessionState::AwaitingInput;
        debug!("session {}: awaiting input", user);
        ctx.state
    }

    /// Parse `text` as the user's act and hold it for confirmation.
    ///
    /// Accepted while awaiting input or confirmation; a new submission
    /// replaces the pending act. A parse failure leaves the session as it
    /// was.
    pub fn submit<P>(&self, user: UserId, text: &str, parser: &P) -> Result<ParsedAct, SessionError>
    where
        P: ActParser + ?Sized,
    {
        let mut ctx = self.sessions.get_mut(&user).ok_or(SessionError::InvalidState {
            actual: SessionState::Idle,
        })?;
        if ctx.state == SessionState::Idle {
            return Err(SessionError::InvalidState { actual: ctx.state });
        }

        let parsed = parser.parse(text)?;
        ctx.current_act = Some(parsed.act.clone());
        ctx.state = SessionState::AwaitingConfirmation;
        debug!("session {}: act pending confirmation", user);
        Ok(parsed)
    }

    /// Confirm the pending act by running `render` on it.
    ///
    /// On success the session is reset to idle. On failure the act stays
    /// pending so the user can retry.
    pub fn confirm_with<T, E, F>(&self, user: UserId, render: F) -> Result<T, E>
    where
        F: FnOnce(&ActRecord) -> Result<T, E>,
        E: From<SessionError>,
    {
        let mut ctx = self
            .sessions
            .get_mut(&user)
            .ok_or(SessionError::NoPendingAct)?;

        let result = match (ctx.state, ctx.current_act.as_ref()) {
            (_, None) => return Err(SessionError::NoPendingAct.into()),
            (SessionState::AwaitingConfirmation, Some(act)) => render(act),
            (actual, Some(_)) => return Err(SessionError::InvalidState { actual }.into()),
        };

        if result.is_ok() {
            ctx.reset();
            info!("session {}: act confirmed", user);
        } else {
            debug!("session {}: confirmation failed, act kept", user);
        }
        result
    }

    /// Go back to input, keeping the pending act until a new one is submitted.
    pub fn request_edit(&self, user: UserId) -> Result<(), SessionError> {
        let mut ctx = self.sessions.get_mut(&user).ok_or(SessionError::InvalidState {
            actual: SessionState::Idle,
        })?;
        match ctx.state {
            SessionState::AwaitingConfirmation => {
                ctx.state = SessionState::AwaitingInput;
                debug!("session {}: editing", user);
                Ok(())
            }
            actual => Err(SessionError::InvalidState { actual }),
        }
    }

    /// Forget everything about `user`.
    pub fn reset(&self, user: UserId) {
        if self.sessions.remove(&user).is_some() {
            debug!("session {}: reset", user);
        }
    }

    /// Current state; unknown users are idle.
    pub fn state(&self, user: UserId) -> SessionState {
        self.sessions
            .get(&user)
            .map(|ctx| ctx.state)
            .unwrap_or_default()
    }

    /// Copy of the act awaiting confirmation, if any.
    pub fn pending_act(&self, user: UserId) -> Option<ActRecord> {
        self.sessions
            .get(&user)
            .and_then(|ctx| ctx.current_act.clone())
    }

    /// Number of users with a session.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
