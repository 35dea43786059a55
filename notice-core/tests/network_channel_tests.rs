// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for network::channel

use std::time::Duration;

use notice_core::network::*;
use notice_core::AuthGate;
use serde_json::json;

const STREAM_URL: &str = "wss://api.example.com/notifications/stream";
const DELAY: Duration = Duration::from_millis(3_000);

fn channel(transport: MockTransport) -> ChannelTransport<MockTransport, ManualScheduler> {
    ChannelTransport::new(transport, ManualScheduler::new(), TransportConfig::new(STREAM_URL))
}

fn authed_channel(transport: MockTransport) -> ChannelTransport<MockTransport, ManualScheduler> {
    let mut channel = channel(transport);
    channel.update_gate(AuthGate::authenticated());
    channel
}

fn failing_transport() -> MockTransport {
    let mut transport = MockTransport::new();
    transport.fail_every_open(Some(NetworkError::ConnectionFailed("refused".into())));
    transport
}

fn tick(channel: &mut ChannelTransport<MockTransport, ManualScheduler>) -> bool {
    channel.scheduler_mut().advance(DELAY);
    channel.fire_due_timers()
}

#[test]
fn test_start_transitions_idle_to_connecting() {
    let mut channel = authed_channel(MockTransport::new());
    assert_eq!(channel.state(), ConnectionState::Idle);

    assert!(channel.start());

    assert_eq!(channel.state(), ConnectionState::Connecting);
    assert_eq!(channel.transport().open_count(), 1);
    assert_eq!(
        channel.transport().last_config().map(|c| c.stream_url.as_str()),
        Some(STREAM_URL)
    );
}

#[test]
fn test_handshake_frame_opens_channel() {
    let mut channel = authed_channel(MockTransport::new());
    channel.start();
    channel.transport_mut().queue_event(EVENT_CONNECTED, json!(null));

    let frame = channel.poll_frame().unwrap();
    assert_eq!(decode_frame(&frame).unwrap(), ChannelEvent::Connected);
    assert!(channel.confirm_handshake());

    assert!(channel.is_open());
    assert_eq!(channel.retry_count(), 0);
}

#[test]
fn test_confirm_handshake_outside_connecting_is_ignored() {
    let mut channel = authed_channel(MockTransport::new());
    assert!(!channel.confirm_handshake());
    assert_eq!(channel.state(), ConnectionState::Idle);
}

#[test]
fn test_start_while_loading_never_opens() {
    let mut channel = channel(MockTransport::new());
    channel.update_gate(AuthGate {
        is_authenticated: true,
        loading: true,
    });

    assert!(!channel.start());

    assert_eq!(channel.state(), ConnectionState::Idle);
    assert_eq!(channel.transport().open_count(), 0);
}

#[test]
fn test_start_while_unauthenticated_never_opens() {
    let mut channel = channel(MockTransport::new());
    channel.update_gate(AuthGate::unauthenticated());

    assert!(!channel.start());
    assert_eq!(channel.transport().open_count(), 0);
}

#[test]
fn test_start_is_noop_when_connecting_or_open() {
    let mut channel = authed_channel(MockTransport::new());
    channel.start();
    assert!(!channel.start());

    channel.confirm_handshake();
    assert!(!channel.start());

    assert_eq!(channel.transport().open_count(), 1);
}

#[test]
fn test_reconnect_bound_stops_scheduling_after_five() {
    let mut channel = authed_channel(failing_transport());

    channel.start();
    assert_eq!(channel.state(), ConnectionState::Closed);
    assert!(channel.has_pending_reconnect());

    for attempt in 1..=5 {
        assert!(tick(&mut channel), "retry {} should fire", attempt);
    }

    assert_eq!(channel.retry_count(), 5);
    assert_eq!(channel.scheduler().scheduled_total(), 5);
    assert_eq!(channel.scheduler().pending(), 0);
    assert!(!channel.has_pending_reconnect());
    assert!(channel.has_given_up());

    // Nothing else fires, however long we wait.
    assert!(!tick(&mut channel));
    assert_eq!(channel.transport().open_count(), 6);
}

#[test]
fn test_reconnect_waits_for_fixed_delay() {
    let mut channel = authed_channel(MockTransport::new());
    channel.transport_mut().inject_open_error(NetworkError::Timeout);

    channel.start();
    assert_eq!(channel.scheduler().next_deadline(), Some(DELAY));

    channel.scheduler_mut().advance(Duration::from_millis(2_999));
    assert!(!channel.fire_due_timers());

    channel.scheduler_mut().advance(Duration::from_millis(1));
    assert!(channel.fire_due_timers());
    assert_eq!(channel.state(), ConnectionState::Connecting);
}

#[test]
fn test_handshake_resets_retry_budget() {
    let mut channel = authed_channel(MockTransport::new());
    channel.transport_mut().inject_open_error(NetworkError::Timeout);
    channel.transport_mut().inject_open_error(NetworkError::Timeout);

    channel.start();
    tick(&mut channel);
    tick(&mut channel);
    assert_eq!(channel.retry_count(), 2);
    assert_eq!(channel.state(), ConnectionState::Connecting);

    channel.confirm_handshake();
    assert_eq!(channel.retry_count(), 0);
}

#[test]
fn test_receive_error_closes_and_schedules_reconnect() {
    let mut channel = authed_channel(MockTransport::new());
    channel.start();
    channel.confirm_handshake();

    channel
        .transport_mut()
        .inject_receive_error(NetworkError::ConnectionClosed);
    assert!(channel.poll_frame().is_none());

    assert_eq!(channel.state(), ConnectionState::Closed);
    assert_eq!(channel.retry_count(), 1);
    assert!(channel.has_pending_reconnect());

    assert!(tick(&mut channel));
    assert_eq!(channel.transport().open_count(), 2);
}

#[test]
fn test_no_reconnect_after_sign_out() {
    let mut channel = authed_channel(MockTransport::new());
    channel.start();
    channel.confirm_handshake();

    channel.update_gate(AuthGate::unauthenticated());
    channel
        .transport_mut()
        .inject_receive_error(NetworkError::ConnectionClosed);
    channel.poll_frame();

    assert_eq!(channel.state(), ConnectionState::Closed);
    assert!(!channel.has_pending_reconnect());
    assert_eq!(channel.scheduler().scheduled_total(), 0);
}

#[test]
fn test_pending_timer_skipped_if_auth_resolving() {
    let mut channel = authed_channel(MockTransport::new());
    channel.transport_mut().inject_open_error(NetworkError::Timeout);
    channel.start();

    channel.update_gate(AuthGate::resolving());
    assert!(!tick(&mut channel));

    assert_eq!(channel.transport().open_count(), 1);
    assert_eq!(channel.state(), ConnectionState::Closed);
}

#[test]
fn test_stop_cancels_pending_reconnect() {
    let mut channel = authed_channel(failing_transport());
    channel.start();
    assert_eq!(channel.scheduler().pending(), 1);

    channel.stop();

    assert_eq!(channel.state(), ConnectionState::Idle);
    assert_eq!(channel.scheduler().pending(), 0);
    assert_eq!(channel.scheduler().cancelled_total(), 1);
    assert!(!tick(&mut channel));
    assert_eq!(channel.transport().open_count(), 1);
}

#[test]
fn test_stop_is_idempotent() {
    let mut channel = authed_channel(MockTransport::new());
    channel.start();

    channel.stop();
    channel.stop();

    assert_eq!(channel.state(), ConnectionState::Idle);
    assert_eq!(channel.transport().close_count(), 1);
    assert!(!channel.transport().is_open());
}

#[test]
fn test_external_start_after_giving_up_resets_budget() {
    let mut channel = authed_channel(failing_transport());
    channel.start();
    for _ in 0..5 {
        tick(&mut channel);
    }
    assert!(channel.has_given_up());

    channel.transport_mut().fail_every_open(None);
    assert!(channel.start());

    assert_eq!(channel.state(), ConnectionState::Connecting);
    assert_eq!(channel.retry_count(), 0);
}

#[test]
fn test_external_start_supersedes_pending_timer() {
    let mut channel = authed_channel(MockTransport::new());
    channel.transport_mut().inject_open_error(NetworkError::Timeout);
    channel.start();
    assert!(channel.has_pending_reconnect());

    assert!(channel.start());

    assert!(!channel.has_pending_reconnect());
    assert_eq!(channel.scheduler().pending(), 0);
    assert_eq!(channel.state(), ConnectionState::Connecting);
}

#[test]
fn test_poll_frame_when_idle_returns_none() {
    let mut channel = authed_channel(MockTransport::new());
    assert!(channel.poll_frame().is_none());
    assert_eq!(channel.state(), ConnectionState::Idle);
}

#[test]
fn test_gate_refresh_leaves_pending_reconnect_alone() {
    let mut channel = authed_channel(failing_transport());
    channel.start();

    for _ in 0..10 {
        channel.update_gate(AuthGate::authenticated());
        assert!(!channel.fire_due_timers());
    }

    assert_eq!(channel.transport().open_count(), 1);
    assert_eq!(channel.retry_count(), 1);
    assert_eq!(channel.scheduler().pending(), 1);

    assert!(tick(&mut channel));
    assert_eq!(channel.transport().open_count(), 2);
}
