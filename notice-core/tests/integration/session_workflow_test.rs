// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Session Workflow Integration Tests
//!
//! Snapshot load, pushes, optimistic mutations and their late confirmations.

use serde_json::json;

use crate::common::fixtures::*;
use notice_core::api::ApiCall;
use notice_core::network::{EVENT_DELETED, EVENT_INITIAL, EVENT_NOTIFICATION, EVENT_READ};
use notice_core::AuthGate;

fn ids(session: &MockSession) -> Vec<i64> {
    session.notifications().iter().map(|r| r.id).collect()
}

/// Test: Optimistic updates reconcile with late server confirmations
#[test]
fn test_optimistic_updates_reconcile_with_stream() {
    let (mut session, api) = mock_session();
    session.set_auth(AuthGate::authenticated());

    // Snapshot with one unread and one read record
    push(
        &mut session,
        EVENT_INITIAL,
        json!([record_json(1, false), record_json(2, true)]),
    );
    session.poll();
    assert!(session.is_healthy());
    assert_eq!(session.unread_count(), 1);

    // New notification arrives
    push(&mut session, EVENT_NOTIFICATION, record_json(3, false));
    session.poll();
    assert_eq!(session.unread_count(), 2);
    assert_eq!(session.notifications().len(), 3);

    // User marks it read; the count drops before the server answers
    session.request_mark_read(3);
    assert_eq!(session.unread_count(), 1);
    assert_eq!(api.call_count(), 0);

    // Server call goes out, then the confirmation arrives on the stream
    session.poll();
    assert_eq!(api.calls(), vec![ApiCall::MarkRead(3)]);
    push(&mut session, EVENT_READ, json!(3));
    session.poll();
    assert_eq!(session.unread_count(), 1);

    // User deletes the last unread record
    session.request_delete(1);
    assert_eq!(session.notifications().len(), 2);
    assert_eq!(session.unread_count(), 0);

    // Duplicate delivery of an existing record changes nothing
    push(&mut session, EVENT_NOTIFICATION, record_json(2, true));
    session.poll();
    assert_eq!(session.notifications().len(), 2);
    assert_eq!(ids(&session), vec![3, 2]);
    assert_eq!(api.calls(), vec![ApiCall::MarkRead(3), ApiCall::Delete(1)]);
}

/// Test: A late confirmation for a deleted record is harmless
#[test]
fn test_late_delete_confirmation_is_noop() {
    let (mut session, _api) = mock_session();
    session.set_auth(AuthGate::authenticated());
    push(&mut session, EVENT_INITIAL, json!([record_json(1, false), record_json(2, false)]));
    session.poll();

    session.request_delete(2);
    session.poll();

    push(&mut session, EVENT_DELETED, json!(2));
    push(&mut session, EVENT_READ, json!(2));
    let result = session.poll();

    assert_eq!(result.events_applied, 2);
    assert_eq!(ids(&session), vec![1]);
    assert_eq!(session.unread_count(), 1);
}

/// Test: A deleted id redelivered by the server stays deleted
#[test]
fn test_deleted_notification_not_resurrected() {
    let (mut session, _api) = mock_session();
    session.set_auth(AuthGate::authenticated());
    push(&mut session, EVENT_NOTIFICATION, record_json(4, false));
    session.poll();

    session.request_delete(4);
    push(&mut session, EVENT_NOTIFICATION, record_json(4, false));
    session.poll();

    assert!(session.get(4).is_none());
    assert_eq!(session.unread_count(), 0);
}

/// Test: Server-side reads from another device arrive as confirmations
#[test]
fn test_read_from_other_device() {
    let (mut session, api) = mock_session();
    session.set_auth(AuthGate::authenticated());
    push(&mut session, EVENT_INITIAL, json!([record_json(1, false), record_json(2, false)]));
    session.poll();

    push(&mut session, EVENT_READ, json!(2));
    push(&mut session, EVENT_DELETED, json!(1));
    session.poll();

    assert_eq!(ids(&session), vec![2]);
    assert_eq!(session.unread_count(), 0);
    assert_eq!(api.call_count(), 0);
}
