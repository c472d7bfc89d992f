//! Physical keys and the input events a front end feeds into the world.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Keyboard key identifiers.
///
/// Names in `advent.yaml` are the lowercase variant names (`w`, `space`,
/// `num1`, `escape`).
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,
    Up, Down, Left, Right,
    Space, Enter, Escape, Tab, Backspace,
    Shift, Ctrl, Alt,
}

/// One input event from the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// The window was closed or the session was otherwise asked to end.
    Quit,
}

/// A non-blocking source of input events.
pub trait EventSource {
    /// Return the next pending event, or `None` when nothing is queued.
    fn poll(&mut self) -> Option<InputEvent>;
}

/// A scripted event source: one batch of events per tick.
///
/// `poll` hands out the current batch and then reports `None` once, which
/// ends the tick's drain and moves on to the next batch.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEvents {
    batches: VecDeque<Vec<InputEvent>>,
    current: VecDeque<InputEvent>,
}

impl ScriptedEvents {
    pub fn new(batches: impl IntoIterator<Item = Vec<InputEvent>>) -> Self {
        let mut batches: VecDeque<_> = batches.into_iter().collect();
        let current = batches.pop_front().unwrap_or_default().into();
        Self { batches, current }
    }

    /// Whether every scripted event has been handed out.
    pub fn is_exhausted(&self) -> bool {
        self.batches.is_empty() && self.current.is_empty()
    }
}

impl EventSource for ScriptedEvents {
    fn poll(&mut self) -> Option<InputEvent> {
        match self.current.pop_front() {
            Some(event) => Some(event),
            None => {
                self.current = self.batches.pop_front().unwrap_or_default().into();
                None
            }
        }
    }
}
