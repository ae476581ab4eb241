//! Threshold monitors for watched channels.
//!
//! Each watched channel gets a [`ChannelMonitor`] carrying its own
//! [`TriggerPolicy`]:
//!
//! | Policy  | Fires                                      | Used for          |
//! |---------|--------------------------------------------|-------------------|
//! | `Edge`  | once per threshold crossing, repeats ignored | command channel |
//! | `Level` | on every frame above the threshold         | shutdown channel  |
//!
//! ## Edge lifecycle
//!
//! 1. A frame value equal to `last_value` is dropped (debounce).
//! 2. A differing value updates `last_value`.  If its side of the
//!    threshold differs from `is_active`, [`ChannelMonitor::evaluate`]
//!    yields `Activate` or `Deactivate`.
//! 3. The caller applies the action to the output and calls
//!    [`ChannelMonitor::commit`] once the write is confirmed.  An
//!    unconfirmed action leaves `is_active` untouched so the next differing
//!    frame proposes it again.

use crate::dmx::{Channel, Frame};
use crate::error::DecodeError;

/// Fixed cut value: strictly above activates, at or below deactivates.
pub const THRESHOLD: u8 = 128;

/// How a monitor turns channel values into actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerPolicy {
    /// Fire on threshold crossings only, ignoring repeated values.
    Edge,
    /// Fire on every frame whose value is above the threshold.
    Level,
}

/// Outcome of evaluating one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Activate,
    Deactivate,
    None,
}

impl Action {
    pub fn is_none(self) -> bool {
        self == Self::None
    }
}

/// Last observed value and last commanded output state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActuationState {
    pub last_value: u8,
    pub is_active: bool,
}

/// A single watched channel.
#[derive(Debug, Clone)]
pub struct ChannelMonitor {
    channel: Channel,
    policy: TriggerPolicy,
    threshold: u8,
    state: ActuationState,
}

impl ChannelMonitor {
    pub fn new(channel: Channel, policy: TriggerPolicy) -> Self {
        Self {
            channel,
            policy,
            threshold: THRESHOLD,
            state: ActuationState::default(),
        }
    }

    /// Edge-triggered monitor, as used for the actuator channel.
    pub fn edge(channel: Channel) -> Self {
        Self::new(channel, TriggerPolicy::Edge)
    }

    /// Level-triggered monitor, as used for the shutdown channel.
    pub fn level(channel: Channel) -> Self {
        Self::new(channel, TriggerPolicy::Level)
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn state(&self) -> ActuationState {
        self.state
    }

    /// Decode this monitor's channel from `frame` and evaluate it.
    ///
    /// A decode failure leaves the state untouched.
    pub fn evaluate(&mut self, frame: &Frame) -> Result<Action, DecodeError> {
        let value = frame.value(self.channel)?;
        Ok(self.evaluate_value(value))
    }

    /// Evaluate an already decoded value.
    pub fn evaluate_value(&mut self, value: u8) -> Action {
        let above = value > self.threshold;
        match self.policy {
            TriggerPolicy::Level => {
                self.state.last_value = value;
                self.state.is_active = above;
                if above { Action::Activate } else { Action::None }
            }
            TriggerPolicy::Edge => {
                if value == self.state.last_value {
                    return Action::None;
                }
                self.state.last_value = value;
                match (above, self.state.is_active) {
                    (true, false) => Action::Activate,
                    (false, true) => Action::Deactivate,
                    _ => Action::None,
                }
            }
        }
    }

    /// Record that `action` reached the output.
    pub fn commit(&mut self, action: Action) {
        match action {
            Action::Activate => self.state.is_active = true,
            Action::Deactivate => self.state.is_active = false,
            Action::None => {}
        }
    }

    /// Evaluate and immediately commit, for callers without an output.
    pub fn step(&mut self, value: u8) -> Action {
        let action = self.evaluate_value(value);
        self.commit(action);
        action
    }
}
