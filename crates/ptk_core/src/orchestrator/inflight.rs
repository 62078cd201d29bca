//! Per-operation in-flight guard.
//!
//! Replaces a mutable "already running" boolean with a set keyed by
//! operation kind and an RAII guard, so release happens on every exit
//! path.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

/// The four engine operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Render,
    Split,
    Rotate,
    PageImages,
}

impl OpKind {
    /// Engine operation name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Render => "render",
            Self::Split => "split",
            Self::Rotate => "rotate",
            Self::PageImages => "page-images",
        }
    }
}

/// Tracks which operation kinds have a run in flight.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    active: Arc<Mutex<HashSet<OpKind>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `kind` as in flight.
    ///
    /// Returns `None` if a run of that kind is already active. The
    /// returned guard releases the slot when dropped, on every exit
    /// path.
    pub fn try_begin(&self, kind: OpKind) -> Option<InFlightGuard> {
        let mut active = self.active.lock();
        if !active.insert(kind) {
            return None;
        }
        Some(InFlightGuard {
            kind,
            active: Arc::clone(&self.active),
        })
    }

    /// Whether a run of `kind` is currently in flight.
    pub fn is_active(&self, kind: OpKind) -> bool {
        self.active.lock().contains(&kind)
    }
}

/// Releases the in-flight slot for its operation kind on drop.
#[must_use = "dropping the guard releases the in-flight slot"]
pub struct InFlightGuard {
    kind: OpKind,
    active: Arc<Mutex<HashSet<OpKind>>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.active.lock().remove(&self.kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_of_same_kind_is_rejected() {
        let in_flight = InFlight::new();

        let guard = in_flight.try_begin(OpKind::PageImages);
        assert!(guard.is_some());
        assert!(in_flight.try_begin(OpKind::PageImages).is_none());

        // Other kinds are unaffected
        assert!(in_flight.try_begin(OpKind::Render).is_some());
    }

    #[test]
    fn drop_releases_the_slot() {
        let in_flight = InFlight::new();

        {
            let _guard = in_flight.try_begin(OpKind::PageImages).unwrap();
            assert!(in_flight.is_active(OpKind::PageImages));
        }

        assert!(!in_flight.is_active(OpKind::PageImages));
        assert!(in_flight.try_begin(OpKind::PageImages).is_some());
    }
}
