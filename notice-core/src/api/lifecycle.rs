// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Lifecycle Controller
//!
//! Maps auth gate changes onto channel start/stop.

use tracing::debug;

use crate::auth::{AuthGate, AuthPhase};
use crate::network::{ChannelTransport, PushTransport, Scheduler};

/// Drives the push channel from the host's auth state.
///
/// Only phase transitions act on the channel; feeding the same gate again
/// leaves a pending reconnect and the retry budget alone.
///
/// - `Resolving`: hold; the channel is neither started nor stopped
/// - `Unauthenticated`: stop
/// - `Authenticated`: start
#[derive(Debug, Default)]
pub struct LifecycleController {
    phase: AuthPhase,
}

impl LifecycleController {
    /// Creates a controller in the `Resolving` phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    /// Applies a new auth gate to the channel.
    pub fn observe<T: PushTransport, S: Scheduler>(
        &mut self,
        gate: AuthGate,
        channel: &mut ChannelTransport<T, S>,
    ) -> AuthPhase {
        channel.update_gate(gate);
        let phase = gate.phase();
        if phase == self.phase {
            return phase;
        }

        debug!(from = ?self.phase, to = ?phase, "auth phase changed");
        match phase {
            AuthPhase::Resolving => {}
            AuthPhase::Unauthenticated => channel.stop(),
            AuthPhase::Authenticated => {
                channel.start();
            }
        }

        self.phase = phase;
        phase
    }

    /// Stops the channel regardless of phase.
    pub fn teardown<T: PushTransport, S: Scheduler>(&mut self, channel: &mut ChannelTransport<T, S>) {
        channel.stop();
    }
}
