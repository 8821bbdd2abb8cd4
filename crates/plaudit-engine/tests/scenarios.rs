// SPDX-FileCopyrightText: 2026 Plaudit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end scenarios driving `MirrorService` against the mock
//! collaborators: onboarding, confirmation, suppression, timeouts, and the
//! configuration commands.

use std::sync::Arc;

use plaudit_core::types::{
    ChannelKind, DmPreference, MirrorMode, Participant, PointDirection, PointEvent,
    Preference, UserId,
};
use plaudit_core::PlauditError;
use plaudit_engine::{EngineConfig, MirrorService};
use plaudit_test_utils::{MemoryPreferenceStore, MockConnector, MockDispatcher};
use tokio::task::JoinHandle;
use tokio::time::Duration;

struct Harness {
    store: Arc<MemoryPreferenceStore>,
    dispatcher: Arc<MockDispatcher>,
    connector: Arc<MockConnector>,
    service: Arc<MirrorService>,
}

impl Harness {
    fn new() -> Self {
        let store = Arc::new(MemoryPreferenceStore::new());
        let dispatcher = Arc::new(MockDispatcher::new());
        let connector = Arc::new(MockConnector::new());
        let config = EngineConfig {
            bot_name: "plaudit".to_string(),
            reply_window: Duration::from_secs(120),
            // Tips are randomized; keep scenario assertions deterministic.
            tip_probability: 0.0,
        };
        let service = Arc::new(MirrorService::new(
            store.clone(),
            dispatcher.clone(),
            connector.clone(),
            config,
        ));
        Self {
            store,
            dispatcher,
            connector,
            service,
        }
    }

    fn spawn_grant(&self, event: PointEvent) -> JoinHandle<()> {
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            service.handle_grant(event).await.expect("grant handling");
        })
    }
}

fn participant(id: &str, email: Option<&str>) -> Participant {
    Participant {
        id: UserId(id.into()),
        handle: id.into(),
        email: email.map(String::from),
    }
}

fn alice() -> UserId {
    UserId("alice".into())
}

fn grant() -> PointEvent {
    PointEvent {
        sender: participant("alice", Some("alice@example.com")),
        recipient: participant("bob", Some("bob@example.com")),
        direction: PointDirection::Increment,
        room: "general".into(),
        reason: "for fixing the build".into(),
    }
}

fn stored(mode: MirrorMode, amount: Option<u32>) -> Preference {
    Preference {
        identity: alice(),
        mirror_mode: mode,
        mirror_amount: amount,
        dm_notify: DmPreference::Unset,
    }
}

/// Scenario A: no stored preference, reply "Always" to onboarding.
#[tokio::test]
async fn onboarding_always_persists_and_sends_once() {
    let h = Harness::new();
    let task = h.spawn_grant(grant());

    h.connector.wait_for_directs(1).await;
    let directs = h.connector.directs().await;
    assert!(directs[0].1.contains("[ `Always` | `Prompt` | `Never` ]"));

    assert!(h.service.offer_reply(&alice(), "Always"));
    task.await.expect("task should finish");

    let record = h.store.record(&alice()).await.expect("record persisted");
    assert_eq!(record.mirror_mode, MirrorMode::Always);

    assert_eq!(h.dispatcher.call_count().await, 1);
    assert_eq!(h.dispatcher.requests().await[0].amount, 1);

    let broadcasts = h.connector.broadcasts().await;
    assert_eq!(broadcasts.len(), 1);
    assert_eq!(broadcasts[0].0, "general");
    assert!(broadcasts[0].1.contains("to @bob"));
}

/// Onboarding "prompt" branch nests a confirmation for the pending grant.
#[tokio::test]
async fn onboarding_prompt_then_yes_sends() {
    let h = Harness::new();
    let task = h.spawn_grant(grant());

    h.connector.wait_for_directs(1).await;
    assert!(h.service.offer_reply(&alice(), "prompt"));

    h.connector.wait_for_directs(2).await;
    let directs = h.connector.directs().await;
    assert!(directs[1].1.contains("do you want to send @bob"));

    assert!(h.service.offer_reply(&alice(), "yes"));
    task.await.expect("task should finish");

    let record = h.store.record(&alice()).await.expect("record persisted");
    assert_eq!(record.mirror_mode, MirrorMode::Prompt);
    assert_eq!(h.dispatcher.call_count().await, 1);
}

/// Scenario B: stored Prompt with amount 3, decline the confirmation.
#[tokio::test]
async fn prompt_mode_declined_sends_nothing() {
    let h = Harness::new();
    h.store.insert(stored(MirrorMode::Prompt, Some(3))).await;

    let task = h.spawn_grant(grant());

    h.connector.wait_for_directs(1).await;
    let directs = h.connector.directs().await;
    assert!(directs[0].1.contains("send them 3 bonus point(s)"));
    assert!(directs[0].1.contains("[ `Yes` | `No` ]"));

    assert!(h.service.offer_reply(&alice(), "no"));
    task.await.expect("task should finish");

    assert_eq!(h.dispatcher.call_count().await, 0);
    let directs = h.connector.directs().await;
    assert!(directs[1].1.contains("Ah, alright. Next time!"));

    // Preference untouched by the declined confirmation.
    let record = h.store.record(&alice()).await.expect("record exists");
    assert_eq!(record, stored(MirrorMode::Prompt, Some(3)));
}

/// Stored Prompt answered "yes" dispatches the stored amount.
#[tokio::test]
async fn prompt_mode_confirmed_sends_stored_amount() {
    let h = Harness::new();
    h.store.insert(stored(MirrorMode::Prompt, Some(3))).await;

    let task = h.spawn_grant(grant());
    h.connector.wait_for_directs(1).await;
    assert!(h.service.offer_reply(&alice(), "Yes"));
    task.await.expect("task should finish");

    assert_eq!(h.dispatcher.call_count().await, 1);
    assert_eq!(h.dispatcher.requests().await[0].amount, 3);
}

/// Mode `Never` suppresses silently: no dispatch, no messages.
#[tokio::test]
async fn never_mode_never_dispatches() {
    let h = Harness::new();
    h.store.insert(stored(MirrorMode::Never, Some(3))).await;

    h.service.handle_grant(grant()).await.expect("grant handling");

    assert_eq!(h.dispatcher.call_count().await, 0);
    assert!(h.connector.directs().await.is_empty());
    assert!(h.connector.broadcasts().await.is_empty());
}

/// Decrements never dispatch nor onboard, regardless of preference.
#[tokio::test]
async fn decrement_never_dispatches_nor_onboards() {
    let h = Harness::new();
    let mut event = grant();
    event.direction = PointDirection::Decrement;

    h.service.handle_grant(event).await.expect("grant handling");

    assert_eq!(h.dispatcher.call_count().await, 0);
    assert!(h.connector.directs().await.is_empty());
    assert!(h.store.is_empty().await);
}

/// Mode `Always` dispatches without any dialog.
#[tokio::test]
async fn always_mode_sends_immediately() {
    let h = Harness::new();
    h.store.insert(stored(MirrorMode::Always, Some(2))).await;

    h.service.handle_grant(grant()).await.expect("grant handling");

    assert_eq!(h.dispatcher.call_count().await, 1);
    assert_eq!(h.dispatcher.requests().await[0].amount, 2);
    let broadcasts = h.connector.broadcasts().await;
    assert_eq!(broadcasts.len(), 1);
}

/// Scenario C: missing recipient contact emits one operator signal and
/// nothing else.
#[tokio::test]
async fn missing_contact_signals_operator_and_suppresses() {
    let h = Harness::new();
    let mut event = grant();
    event.recipient.email = None;

    h.service.handle_grant(event).await.expect("grant handling");

    assert_eq!(h.dispatcher.call_count().await, 0);
    let failures = h.connector.failures().await;
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].sender, alice());
    assert_eq!(failures[0].recipient, UserId("bob".into()));
    assert_eq!(failures[0].room, "general");
    assert!(failures[0].message.contains("@alice"));
    assert!(failures[0].message.contains("@bob"));
}

/// Scenario D: no reply before the window elapses yields exactly one
/// timeout notice and no preference mutation.
#[tokio::test(start_paused = true)]
async fn onboarding_timeout_discards_session() {
    let h = Harness::new();
    let task = h.spawn_grant(grant());

    h.connector.wait_for_directs(1).await;
    // No reply: the paused clock advances straight to the deadline.
    task.await.expect("task should finish");

    let directs = h.connector.directs().await;
    assert_eq!(directs.len(), 2);
    assert!(directs[1].1.contains("didn't receive your response in time"));

    assert!(h.store.is_empty().await);
    assert_eq!(h.dispatcher.call_count().await, 0);

    // The session is gone: a late reply is not consumed.
    assert!(!h.service.offer_reply(&alice(), "always"));
}

/// A second live flow for the same identity is rejected while the first
/// dialog is open.
#[tokio::test]
async fn concurrent_session_for_identity_is_dropped() {
    let h = Harness::new();
    let task = h.spawn_grant(grant());
    h.connector.wait_for_directs(1).await;

    // Second grant while the onboarding dialog is open: no second prompt.
    h.service.handle_grant(grant()).await.expect("grant handling");
    assert_eq!(h.connector.directs().await.len(), 1);

    assert!(h.service.offer_reply(&alice(), "never"));
    task.await.expect("task should finish");
    assert_eq!(h.dispatcher.call_count().await, 0);
}

/// A rejected dispatch surfaces in the room and leaves the preference
/// untouched.
#[tokio::test]
async fn rejected_dispatch_reports_to_room() {
    let h = Harness::new();
    h.store.insert(stored(MirrorMode::Always, None)).await;
    h.dispatcher.reject_next("insufficient giving balance").await;

    h.service.handle_grant(grant()).await.expect("grant handling");

    assert_eq!(h.dispatcher.call_count().await, 1);
    let broadcasts = h.connector.broadcasts().await;
    assert_eq!(broadcasts.len(), 1);
    assert!(broadcasts[0]
        .1
        .contains("Sorry, there was an issue sending your bonus: insufficient giving balance"));

    let record = h.store.record(&alice()).await.expect("record exists");
    assert_eq!(record.mirror_mode, MirrorMode::Always);
}

/// A transport-level dispatch error takes the same room-visible path as a
/// structured rejection.
#[tokio::test]
async fn transport_error_is_folded_into_failure_notice() {
    let h = Harness::new();
    h.store.insert(stored(MirrorMode::Always, None)).await;
    h.dispatcher
        .push_result(Err(PlauditError::Dispatch {
            message: "rewards api unreachable".into(),
            source: None,
        }))
        .await;

    h.service.handle_grant(grant()).await.expect("grant handling");

    let broadcasts = h.connector.broadcasts().await;
    assert_eq!(broadcasts.len(), 1);
    assert!(broadcasts[0].1.contains("rewards api unreachable"));
}

/// Setting the mode twice through the configuration command is idempotent.
#[tokio::test]
async fn mode_setting_is_idempotent() {
    let h = Harness::new();
    h.store.insert_blank(alice()).await;

    for round in 1..=2 {
        let service = Arc::clone(&h.service);
        let task = tokio::spawn(async move {
            service
                .handle_command(&alice(), "dm", ChannelKind::Direct, "change my bonus settings")
                .await
                .expect("command handling")
        });
        // Each round sends one prompt and one acknowledgment.
        h.connector.wait_for_directs(round * 2 - 1).await;
        assert!(h.service.offer_reply(&alice(), "always"));
        assert!(task.await.expect("task should finish"));
    }

    let record = h.store.record(&alice()).await.expect("record exists");
    assert_eq!(record.mirror_mode, MirrorMode::Always);
    // Commands never dispatch.
    assert_eq!(h.dispatcher.call_count().await, 0);
}

/// The amount command prompts with the current value and persists the reply.
#[tokio::test]
async fn amount_command_round_trips() {
    let h = Harness::new();
    h.store.insert(stored(MirrorMode::Always, None)).await;

    let service = Arc::clone(&h.service);
    let task = tokio::spawn(async move {
        service
            .handle_command(&alice(), "dm", ChannelKind::Direct, "change my bonus points setting")
            .await
            .expect("command handling")
    });

    h.connector.wait_for_directs(1).await;
    let directs = h.connector.directs().await;
    assert!(directs[0].1.contains("*1* point(s)"));

    assert!(h.service.offer_reply(&alice(), "5"));
    assert!(task.await.expect("task should finish"));

    let record = h.store.record(&alice()).await.expect("record exists");
    assert_eq!(record.mirror_amount, Some(5));

    let directs = h.connector.directs().await;
    assert!(directs[1].1.contains("*5*"));
}

/// Scenario E: toggling the DM preference from unset lands on disabled.
#[tokio::test]
async fn dm_toggle_from_unset_disables() {
    let h = Harness::new();
    h.store.insert_blank(alice()).await;

    let handled = h
        .service
        .handle_command(&alice(), "dm", ChannelKind::Direct, "toggle dm about bonus")
        .await
        .expect("command handling");
    assert!(handled);

    let record = h.store.record(&alice()).await.expect("record exists");
    assert_eq!(record.dm_notify, DmPreference::Disabled);

    let directs = h.connector.directs().await;
    assert_eq!(directs.len(), 1);
    assert!(directs[0].1.contains("won't DM you any more"));

    // Toggling again re-enables.
    h.service
        .handle_command(&alice(), "dm", ChannelKind::Direct, "toggle dm about bonus")
        .await
        .expect("command handling");
    let record = h.store.record(&alice()).await.expect("record exists");
    assert_eq!(record.dm_notify, DmPreference::Enabled);
}

/// Commands outside a DM get an instructional reply and mutate nothing.
#[tokio::test]
async fn command_outside_dm_is_rejected() {
    let h = Harness::new();
    h.store.insert_blank(alice()).await;

    let handled = h
        .service
        .handle_command(&alice(), "general", ChannelKind::Room, "toggle dm about bonus")
        .await
        .expect("command handling");
    assert!(handled);

    let broadcasts = h.connector.broadcasts().await;
    assert_eq!(broadcasts.len(), 1);
    assert!(broadcasts[0].1.contains("in a DM"));

    let record = h.store.record(&alice()).await.expect("record exists");
    assert_eq!(record.dm_notify, DmPreference::Unset);
}

/// Commands from an unknown identity get an account-not-found reply.
#[tokio::test]
async fn command_from_unknown_identity_is_rejected() {
    let h = Harness::new();

    let handled = h
        .service
        .handle_command(&alice(), "dm", ChannelKind::Direct, "change my bonus settings")
        .await
        .expect("command handling");
    assert!(handled);

    let directs = h.connector.directs().await;
    assert_eq!(directs.len(), 1);
    assert!(directs[0].1.contains("could not find your account"));
    assert!(h.store.is_empty().await);
}

/// Text that matches no command pattern is left for the host to route.
#[tokio::test]
async fn non_command_text_is_not_handled() {
    let h = Harness::new();
    let handled = h
        .service
        .handle_command(&alice(), "dm", ChannelKind::Direct, "what's the weather")
        .await
        .expect("command handling");
    assert!(!handled);
    assert!(h.connector.directs().await.is_empty());
}
