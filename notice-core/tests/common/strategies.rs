// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Proptest Strategies
//!
//! Reusable strategies for store property tests.

use proptest::prelude::*;

use notice_core::notification::NotificationId;

/// One store operation.
#[derive(Debug, Clone)]
pub enum StoreOp {
    Insert(NotificationId, bool),
    MarkRead(NotificationId),
    Remove(NotificationId),
    Snapshot(Vec<(NotificationId, bool)>),
}

/// Small id space so operations collide often.
pub fn id_strategy() -> impl Strategy<Value = NotificationId> {
    0i64..20
}

pub fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        4 => (id_strategy(), any::<bool>()).prop_map(|(id, read)| StoreOp::Insert(id, read)),
        3 => id_strategy().prop_map(StoreOp::MarkRead),
        2 => id_strategy().prop_map(StoreOp::Remove),
        1 => prop::collection::vec((id_strategy(), any::<bool>()), 0..8).prop_map(StoreOp::Snapshot),
    ]
}

pub fn store_ops_strategy() -> impl Strategy<Value = Vec<StoreOp>> {
    prop::collection::vec(store_op_strategy(), 0..64)
}
