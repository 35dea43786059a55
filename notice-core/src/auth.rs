// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Authentication Gate
//!
//! Snapshot of the host's session provider. The crate never checks auth
//! itself; it only reacts to the gate it is given.

/// Auth state as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthGate {
    /// A user session exists.
    pub is_authenticated: bool,
    /// The provider is still resolving the session.
    pub loading: bool,
}

impl AuthGate {
    /// Gate for a resolved, signed-in session.
    pub fn authenticated() -> Self {
        AuthGate {
            is_authenticated: true,
            loading: false,
        }
    }

    /// Gate for a resolved, signed-out session.
    pub fn unauthenticated() -> Self {
        AuthGate {
            is_authenticated: false,
            loading: false,
        }
    }

    /// Gate while the provider is resolving.
    pub fn resolving() -> Self {
        AuthGate {
            is_authenticated: false,
            loading: true,
        }
    }

    /// Returns true if the push channel may be opened.
    pub fn allows_connect(&self) -> bool {
        self.is_authenticated && !self.loading
    }

    /// Reduces the gate to a lifecycle phase.
    pub fn phase(&self) -> AuthPhase {
        if self.loading {
            AuthPhase::Resolving
        } else if self.is_authenticated {
            AuthPhase::Authenticated
        } else {
            AuthPhase::Unauthenticated
        }
    }
}

/// Lifecycle phase derived from an [`AuthGate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthPhase {
    /// Provider has not decided yet.
    #[default]
    Resolving,
    /// Signed out.
    Unauthenticated,
    /// Signed in.
    Authenticated,
}
