// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Auth Workflow Integration Tests
//!
//! Channel lifecycle across sign-in, session refresh, outages and sign-out.

use std::time::Duration;

use serde_json::json;

use crate::common::fixtures::*;
use notice_core::network::{ConnectionState, NetworkError, EVENT_INITIAL};
use notice_core::AuthGate;

fn wait_reconnect_delay(session: &mut MockSession) {
    session
        .channel_mut()
        .scheduler_mut()
        .advance(Duration::from_millis(3_000));
}

/// Test: Full sign-in to sign-out cycle
#[test]
fn test_sign_in_refresh_sign_out() {
    let (mut session, _api) = mock_session();

    // Provider still resolving on first render
    session.set_auth(AuthGate::resolving());
    session.poll();
    assert_eq!(session.channel().transport().open_count(), 0);

    // Resolved as signed in
    session.set_auth(AuthGate::authenticated());
    push(&mut session, EVENT_INITIAL, json!([record_json(1, false)]));
    session.poll();
    assert!(session.is_healthy());

    // Session refresh: provider goes back to loading; channel is kept
    session.set_auth(AuthGate::resolving());
    session.poll();
    assert!(session.is_healthy());
    assert_eq!(session.channel().transport().open_count(), 1);

    session.set_auth(AuthGate::authenticated());
    session.poll();
    assert_eq!(session.channel().transport().open_count(), 1);

    // Sign out
    session.set_auth(AuthGate::unauthenticated());
    assert_eq!(session.connection_state(), ConnectionState::Idle);
    assert_eq!(session.channel().transport().close_count(), 1);
}

/// Test: Outage exhausts retries, a new sign-in recovers
#[test]
fn test_outage_then_recovery_via_auth_change() {
    let (mut session, _api) = mock_session();
    session.set_auth(AuthGate::authenticated());
    session.poll();
    assert!(session.is_healthy());

    // Server goes away
    session
        .channel_mut()
        .transport_mut()
        .fail_every_open(Some(NetworkError::ConnectionFailed("refused".into())));
    session
        .channel_mut()
        .transport_mut()
        .inject_receive_error(NetworkError::ConnectionClosed);

    for _ in 0..8 {
        session.poll();
        wait_reconnect_delay(&mut session);
    }
    assert!(session.channel().has_given_up());
    assert_eq!(session.channel().transport().open_count(), 6);

    // Server back; nothing happens on its own
    session.channel_mut().transport_mut().fail_every_open(None);
    wait_reconnect_delay(&mut session);
    session.poll();
    assert!(!session.is_healthy());

    // Auth flips, which restarts the channel with a fresh budget
    session.set_auth(AuthGate::unauthenticated());
    session.set_auth(AuthGate::authenticated());
    session.poll();
    assert!(session.is_healthy());
    assert_eq!(session.channel().retry_count(), 0);
}

/// Test: Dropping the session stops the channel
#[test]
fn test_drop_tears_down_channel() {
    let (mut session, _api) = mock_session();
    session.set_auth(AuthGate::authenticated());
    session.poll();

    session.teardown();
    assert_eq!(session.connection_state(), ConnectionState::Idle);
    assert_eq!(session.channel().scheduler().pending(), 0);

    drop(session);
}
