// SPDX-FileCopyrightText: 2026 Plaudit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The mirroring service: wires the decision engine, dialog flows, and
//! notification composer to the three external collaborators.
//!
//! Each inbound grant or command is handled as one independent async task;
//! there is no ordering guarantee across identities. Per-identity writes are
//! serialized by the one-session-per-identity rule of the session table.

use std::sync::Arc;

use tokio::time::Duration;
use tracing::{debug, error, info, warn};

use plaudit_config::PlauditConfig;
use plaudit_core::types::{
    BonusReceipt, BonusRequest, ChannelKind, MirrorFailure, PointEvent, Preference,
    PreferencePatch, UserId,
};
use plaudit_core::{Connector, PlauditError, PreferenceStore, RewardDispatcher};

use crate::command::{parse_command, Command};
use crate::decision::{decide, Action, SuppressReason};
use crate::dialog::{parse_reply, transition, DialogOrigin, DialogState, Next};
use crate::notify;
use crate::prompts;
use crate::session::SessionTable;

/// Engine settings derived from the loaded configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Bot display name interpolated into prompts.
    pub bot_name: String,
    /// How long each dialog prompt waits for an accepted reply.
    pub reply_window: Duration,
    /// Probability in [0, 1] for each onboarding tip roll.
    pub tip_probability: f64,
}

impl EngineConfig {
    pub fn from_config(config: &PlauditConfig) -> Self {
        Self {
            bot_name: config.agent.name.clone(),
            reply_window: Duration::from_secs(config.dialog.timeout_secs),
            tip_probability: config.tips.probability,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_config(&PlauditConfig::default())
    }
}

/// Event-driven mirroring core.
///
/// Owns the dialog session table; everything else is reached through the
/// collaborator traits.
pub struct MirrorService {
    store: Arc<dyn PreferenceStore>,
    dispatcher: Arc<dyn RewardDispatcher>,
    connector: Arc<dyn Connector>,
    sessions: SessionTable,
    config: EngineConfig,
}

impl MirrorService {
    pub fn new(
        store: Arc<dyn PreferenceStore>,
        dispatcher: Arc<dyn RewardDispatcher>,
        connector: Arc<dyn Connector>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            dispatcher,
            connector,
            sessions: SessionTable::new(),
            config,
        }
    }

    /// Handle one inbound point-grant event end to end.
    ///
    /// Suspends while a dialog awaits the sender's reply; hosts should
    /// spawn one task per event.
    pub async fn handle_grant(&self, event: PointEvent) -> Result<(), PlauditError> {
        let preference = self.store.get(&event.sender.id).await?;

        match decide(&event, preference.as_ref()) {
            Action::Suppress(SuppressReason::Decremented) => {
                debug!(sender = %event.sender.id, "points were taken away, skipping mirror");
            }
            Action::Suppress(SuppressReason::OptedOut) => {
                debug!(sender = %event.sender.id, "sender opted out of mirroring");
            }
            Action::Suppress(SuppressReason::MissingContact) => {
                self.report_missing_contact(&event).await?;
            }
            Action::RunOnboarding { amount } => {
                self.drive_grant_dialog(&event, amount, DialogState::AwaitModeChoice)
                    .await?;
            }
            Action::SendImmediately { amount } => {
                self.perform_send(&event, amount).await?;
            }
            Action::ConfirmThenSend { amount } => {
                self.drive_grant_dialog(&event, amount, DialogState::AwaitConfirm)
                    .await?;
            }
        }
        Ok(())
    }

    /// Handle a possible configuration command.
    ///
    /// Returns `Ok(false)` when the text matches no command so the host can
    /// route it elsewhere.
    pub async fn handle_command(
        &self,
        user: &UserId,
        room: &str,
        kind: ChannelKind,
        text: &str,
    ) -> Result<bool, PlauditError> {
        let Some(command) = parse_command(text) else {
            return Ok(false);
        };

        if kind != ChannelKind::Direct {
            self.connector
                .broadcast(room, &prompts::dm_only(&self.config.bot_name))
                .await?;
            return Ok(true);
        }

        let Some(preference) = self.store.get(user).await? else {
            self.connector
                .direct(user, &prompts::account_not_found())
                .await?;
            return Ok(true);
        };

        match command {
            Command::Configure => self.run_mode_command(user).await?,
            Command::SetAmount => {
                self.run_amount_command(user, preference.resolved_amount())
                    .await?;
            }
            Command::ToggleDm => {
                let next = preference.dm_notify.toggled();
                self.store.update(user, PreferencePatch::dm(next)).await?;
                info!(user = %user, dm = %next, "dm preference toggled");
                self.connector
                    .direct(
                        user,
                        &prompts::dm_toggled(&self.config.bot_name, next.effective()),
                    )
                    .await?;
            }
        }
        Ok(true)
    }

    /// Route a free-text DM into the user's open dialog session, if any.
    ///
    /// Returns `true` when the text was consumed as a dialog reply.
    pub fn offer_reply(&self, user: &UserId, text: &str) -> bool {
        self.sessions.offer(user, text)
    }

    async fn report_missing_contact(&self, event: &PointEvent) -> Result<(), PlauditError> {
        let message = format!(
            "@{} is trying to send to @{} but one of the contact addresses is missing. \
             Sender: [{}], Recipient: [{}]",
            event.sender.handle,
            event.recipient.handle,
            event.sender.contact().unwrap_or(""),
            event.recipient.contact().unwrap_or(""),
        );
        error!(room = %event.room, "{message}");
        self.connector
            .mirror_failed(MirrorFailure {
                sender: event.sender.id.clone(),
                recipient: event.recipient.id.clone(),
                room: event.room.clone(),
                message,
            })
            .await
    }

    /// Drive a live-grant dialog from `start` until it dispatches,
    /// terminates with an acknowledgment, or times out.
    async fn drive_grant_dialog(
        &self,
        event: &PointEvent,
        amount: u32,
        start: DialogState,
    ) -> Result<(), PlauditError> {
        let sender = &event.sender.id;
        let Some(mut session) = self.sessions.open(sender.clone()) else {
            warn!(user = %sender, "dialog already in progress, dropping grant flow");
            return Ok(());
        };

        let bot = &self.config.bot_name;
        let initial = match start {
            DialogState::AwaitModeChoice => prompts::mode_choice(bot),
            DialogState::AwaitConfirm => {
                prompts::confirm_send(bot, &event.recipient.handle, amount)
            }
            DialogState::AwaitAmount => prompts::amount_choice(bot, amount),
        };
        self.connector.direct(sender, &initial).await?;

        let mut state = start;
        loop {
            let reply = session
                .next_reply(self.config.reply_window, move |t| parse_reply(state, t))
                .await;
            let Some(reply) = reply else {
                // The session has already deactivated its matchers.
                self.connector
                    .direct(sender, &prompts::timeout_notice())
                    .await?;
                return Ok(());
            };

            let step = transition(state, reply, DialogOrigin::LiveGrant);
            if let Some(patch) = step.patch {
                self.store.update(sender, patch).await?;
            }
            match step.next {
                Next::Enter(next_state) => {
                    state = next_state;
                    let prompt = match next_state {
                        DialogState::AwaitModeChoice => prompts::mode_choice(bot),
                        DialogState::AwaitConfirm => {
                            prompts::confirm_after_onboarding(&event.recipient.handle, amount)
                        }
                        DialogState::AwaitAmount => prompts::amount_choice(bot, amount),
                    };
                    self.connector.direct(sender, &prompt).await?;
                }
                Next::Dispatch => {
                    drop(session);
                    return self.perform_send(event, amount).await;
                }
                Next::Done(done) => {
                    drop(session);
                    return self.connector.direct(sender, &prompts::ack(bot, done)).await;
                }
            }
        }
    }

    async fn run_mode_command(&self, user: &UserId) -> Result<(), PlauditError> {
        let Some(mut session) = self.sessions.open(user.clone()) else {
            warn!(user = %user, "dialog already in progress, ignoring configuration command");
            return Ok(());
        };

        let bot = &self.config.bot_name;
        self.connector.direct(user, &prompts::mode_choice(bot)).await?;

        let reply = session
            .next_reply(self.config.reply_window, |t| {
                parse_reply(DialogState::AwaitModeChoice, t)
            })
            .await;
        let Some(reply) = reply else {
            self.connector.direct(user, &prompts::timeout_notice()).await?;
            return Ok(());
        };

        let step = transition(DialogState::AwaitModeChoice, reply, DialogOrigin::Command);
        if let Some(patch) = step.patch {
            self.store.update(user, patch).await?;
        }
        drop(session);
        if let Next::Done(done) = step.next {
            self.connector.direct(user, &prompts::ack(bot, done)).await?;
        }
        Ok(())
    }

    async fn run_amount_command(&self, user: &UserId, current: u32) -> Result<(), PlauditError> {
        let Some(mut session) = self.sessions.open(user.clone()) else {
            warn!(user = %user, "dialog already in progress, ignoring amount command");
            return Ok(());
        };

        let bot = &self.config.bot_name;
        self.connector
            .direct(user, &prompts::amount_choice(bot, current))
            .await?;

        let reply = session
            .next_reply(self.config.reply_window, |t| {
                parse_reply(DialogState::AwaitAmount, t)
            })
            .await;
        let Some(reply) = reply else {
            self.connector.direct(user, &prompts::timeout_notice()).await?;
            return Ok(());
        };

        let step = transition(DialogState::AwaitAmount, reply, DialogOrigin::Command);
        if let Some(patch) = step.patch {
            self.store.update(user, patch).await?;
        }
        drop(session);
        if let Next::Done(done) = step.next {
            self.connector.direct(user, &prompts::ack(bot, done)).await?;
        }
        Ok(())
    }

    /// Dispatch the bonus and deliver the resulting notifications.
    ///
    /// One awaited call, never retried: a transport error is folded into a
    /// rejection so every failure takes the room-visible path.
    async fn perform_send(&self, event: &PointEvent, amount: u32) -> Result<(), PlauditError> {
        let (Some(sender_contact), Some(recipient_contact)) =
            (event.sender.contact(), event.recipient.contact())
        else {
            return Err(PlauditError::Internal(
                "send attempted without contact addresses".into(),
            ));
        };

        let request = BonusRequest {
            sender_contact: sender_contact.to_string(),
            recipient_contact: recipient_contact.to_string(),
            amount,
            reason: event.reason.clone(),
        };

        info!(
            sender = %event.sender.id,
            recipient = %event.recipient.id,
            amount,
            "dispatching mirrored bonus"
        );
        let receipt = match self.dispatcher.send(&request).await {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!(error = %e, "bonus dispatch failed in transport");
                BonusReceipt::Rejected {
                    message: e.to_string(),
                }
            }
        };

        match receipt {
            BonusReceipt::Issued {
                amount_display,
                balance_display,
            } => {
                // Re-read the preference: the dialog that led here may have
                // just written the mode or amount.
                let preference = self
                    .store
                    .get(&event.sender.id)
                    .await?
                    .unwrap_or_else(|| Preference::new(event.sender.id.clone()));
                let note = {
                    let mut rng = rand::thread_rng();
                    notify::compose_success(
                        event,
                        &preference,
                        amount,
                        &amount_display,
                        &balance_display,
                        &self.config.bot_name,
                        self.config.tip_probability,
                        &mut rng,
                    )
                };
                self.connector.broadcast(&event.room, &note.room).await?;
                if let Some(dm) = note.dm {
                    self.connector.direct(&event.sender.id, &dm).await?;
                }
            }
            BonusReceipt::Rejected { message } => {
                error!(sender = %event.sender.id, message = %message, "bonus was rejected");
                self.connector
                    .broadcast(&event.room, &notify::compose_failure(&message))
                    .await?;
            }
        }
        Ok(())
    }
}
