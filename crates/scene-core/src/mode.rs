//! Narrative mode and the store that broadcasts it.
//!
//! The store is an explicit context object: the scroll binder writes to it,
//! the scene reads it once per frame. It is single-threaded by construction
//! (`Rc` + `Cell`/`RefCell`), matching the one UI thread it lives on.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Chaos,
    Drift,
    Warning,
    Order,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Chaos, Mode::Drift, Mode::Warning, Mode::Order];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Chaos => "chaos",
            Mode::Drift => "drift",
            Mode::Warning => "warning",
            Mode::Order => "order",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown mode `{0}` (expected chaos, drift, warning or order)")]
pub struct ParseModeError(pub String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chaos" => Ok(Mode::Chaos),
            "drift" => Ok(Mode::Drift),
            "warning" => Ok(Mode::Warning),
            "order" => Ok(Mode::Order),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// Handle returned by [`ModeStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener = Rc<RefCell<dyn FnMut(Mode)>>;

pub struct ModeStore {
    mode: Cell<Mode>,
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(Subscription, Listener)>>,
    notifying: Cell<bool>,
    pending: RefCell<VecDeque<Mode>>,
}

impl Default for ModeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeStore {
    pub fn new() -> Self {
        Self {
            mode: Cell::new(Mode::Chaos),
            next_id: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
            notifying: Cell::new(false),
            pending: RefCell::new(VecDeque::new()),
        }
    }

    #[inline]
    pub fn get_mode(&self) -> Mode {
        self.mode.get()
    }

    /// Store `mode` and notify every subscriber, in registration order,
    /// before returning. Redundant sets still notify.
    ///
    /// A `set_mode` issued from inside a listener is queued and delivered to
    /// every subscriber once the current pass finishes, so all subscribers
    /// see the same sequence of modes and the last one matches `get_mode`.
    pub fn set_mode(&self, mode: Mode) {
        if self.notifying.get() {
            log::debug!("[mode] {} queued behind {}", mode, self.mode.get());
            self.pending.borrow_mut().push_back(mode);
            return;
        }

        self.notifying.set(true);
        let mut next = Some(mode);
        while let Some(mode) = next {
            self.notify(mode);
            next = self.pending.borrow_mut().pop_front();
        }
        self.notifying.set(false);
    }

    fn notify(&self, mode: Mode) {
        let prev = self.mode.replace(mode);
        if prev != mode {
            log::info!("[mode] {} -> {}", prev, mode);
        } else {
            log::debug!("[mode] {} (unchanged)", mode);
        }

        // snapshot so listeners may subscribe or unsubscribe mid-pass
        let snapshot: Vec<(Subscription, Listener)> = self.listeners.borrow().clone();
        for (sub, listener) in snapshot {
            if !self.is_subscribed(sub) {
                continue;
            }
            if let Ok(mut f) = listener.try_borrow_mut() {
                f(mode);
            }
        }
    }

    pub fn subscribe(&self, listener: impl FnMut(Mode) + 'static) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let sub = Subscription(id);
        let listener: Listener = Rc::new(RefCell::new(listener));
        self.listeners.borrow_mut().push((sub, listener));
        sub
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&self, sub: Subscription) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(s, _)| *s != sub);
        listeners.len() != before
    }

    pub fn is_subscribed(&self, sub: Subscription) -> bool {
        self.listeners.borrow().iter().any(|(s, _)| *s == sub)
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names_round_trip_through_from_str() {
        for m in Mode::ALL {
            assert_eq!(m.to_string().parse::<Mode>(), Ok(m));
        }
        assert_eq!(" Order ".parse::<Mode>(), Ok(Mode::Order));
        assert!("calm".parse::<Mode>().is_err());
    }

    #[test]
    fn store_starts_in_chaos() {
        assert_eq!(ModeStore::new().get_mode(), Mode::Chaos);
    }
}
