// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration Tests for Notice Core
//!
//! These tests drive a full notification session from sign-in through push
//! delivery, optimistic mutations and sign-out.
//!
//! Run with: cargo test --test integration

#[path = "../common/mod.rs"]
mod common;

mod auth_workflow_test;
mod session_workflow_test;
