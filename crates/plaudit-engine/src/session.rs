// SPDX-FileCopyrightText: 2026 Plaudit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-identity dialog session table.
//!
//! At most one active session per identity. A session suspends its task on
//! an mpsc receiver until a reply is offered or the prompt deadline fires;
//! no thread blocks during the wait. Deactivation removes the table entry
//! before any further await, so a late reply can never resume a finished
//! flow.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::time::{timeout_at, Duration, Instant};
use tracing::{debug, warn};
use uuid::Uuid;

use plaudit_core::types::UserId;

type SessionMap = HashMap<UserId, (Uuid, mpsc::Sender<String>)>;

/// Registry of open dialog sessions, keyed by identity.
#[derive(Clone, Default)]
pub struct SessionTable {
    inner: Arc<Mutex<SessionMap>>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(map: &Mutex<SessionMap>) -> MutexGuard<'_, SessionMap> {
        // The critical sections never panic, but recover from poisoning
        // anyway rather than propagating it into unrelated flows.
        map.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Open a session for `user`.
    ///
    /// Returns `None` if the identity already has an active session: a
    /// second concurrent dialog for the same user is rejected outright
    /// rather than racing the first one's preference writes.
    pub fn open(&self, user: UserId) -> Option<DialogSession> {
        let (tx, rx) = mpsc::channel(8);
        let id = Uuid::new_v4();

        {
            let mut map = Self::lock(&self.inner);
            if map.contains_key(&user) {
                warn!(user = %user, "rejecting concurrent dialog session");
                return None;
            }
            map.insert(user.clone(), (id, tx));
        }

        debug!(user = %user, session = %id, "dialog session opened");
        Some(DialogSession {
            id,
            user,
            rx,
            table: Arc::clone(&self.inner),
        })
    }

    /// Offer an inbound reply to `user`'s open session, if any.
    ///
    /// Returns `true` when the text was consumed by a session. Unconsumed
    /// text should fall through to command matching in the host.
    pub fn offer(&self, user: &UserId, text: &str) -> bool {
        let sender = {
            let map = Self::lock(&self.inner);
            map.get(user).map(|(_, tx)| tx.clone())
        };
        let Some(sender) = sender else {
            return false;
        };

        match sender.try_send(text.to_string()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                // The session is alive but flooded; swallow the reply like
                // any other unrecognized input.
                warn!(user = %user, "dialog session reply buffer full, dropping reply");
                true
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }

    /// Whether `user` currently has an open session.
    pub fn is_active(&self, user: &UserId) -> bool {
        Self::lock(&self.inner).contains_key(user)
    }
}

/// One open dialog session, owned by the task driving the flow.
pub struct DialogSession {
    id: Uuid,
    user: UserId,
    rx: mpsc::Receiver<String>,
    table: Arc<Mutex<SessionMap>>,
}

impl DialogSession {
    /// Suspend until a reply arrives that `parse` recognizes, or until
    /// `window` elapses.
    ///
    /// Unrecognized replies are ignored and do not reset the deadline. On
    /// timeout the session is deactivated *before* returning, so the caller
    /// can emit the timeout notice knowing no late reply will be matched.
    pub async fn next_reply<T, F>(&mut self, window: Duration, parse: F) -> Option<T>
    where
        F: Fn(&str) -> Option<T>,
    {
        let deadline = Instant::now() + window;
        loop {
            match timeout_at(deadline, self.rx.recv()).await {
                Ok(Some(text)) => {
                    if let Some(reply) = parse(&text) {
                        return Some(reply);
                    }
                    debug!(user = %self.user, "ignoring unrecognized dialog reply");
                }
                Ok(None) | Err(_) => {
                    self.deactivate();
                    return None;
                }
            }
        }
    }

    fn deactivate(&self) {
        let mut map = SessionTable::lock(&self.table);
        // Only remove our own entry; the identity may have opened a fresh
        // session after this one was already deactivated once.
        if map.get(&self.user).is_some_and(|(id, _)| *id == self.id) {
            map.remove(&self.user);
            debug!(user = %self.user, session = %self.id, "dialog session closed");
        }
    }
}

impl Drop for DialogSession {
    fn drop(&mut self) {
        self.deactivate();
    }
}
