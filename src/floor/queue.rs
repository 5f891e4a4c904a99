//! Two-slot target queue: one active destination and at most one pending.

use crate::config::Millimeters;

/// Why a request was not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DropReason {
    /// Request equals the active destination.
    SameAsActive,
    /// A pending destination is already held.
    PendingOccupied,
    /// Floor id not in the table.
    UnknownFloor,
    /// Homing has not completed.
    NotCalibrated,
}

/// What happened to a floor request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RequestOutcome {
    /// Became the active destination.
    Activated,
    /// Stored as the pending destination.
    Queued,
    /// Silently ignored.
    Dropped(DropReason),
}

impl RequestOutcome {
    /// Whether the request was stored in either slot.
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, RequestOutcome::Activated | RequestOutcome::Queued)
    }
}

/// Active and pending destination slots.
///
/// `pending` is only ever set while `active` is occupied and differs from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetQueue {
    active: Option<Millimeters>,
    pending: Option<Millimeters>,
}

impl TargetQueue {
    /// Empty queue.
    pub const fn new() -> Self {
        Self {
            active: None,
            pending: None,
        }
    }

    /// Offer a destination.
    pub fn push(&mut self, target: Millimeters) -> RequestOutcome {
        match self.active {
            None => {
                self.active = Some(target);
                RequestOutcome::Activated
            }
            Some(active) if active == target => RequestOutcome::Dropped(DropReason::SameAsActive),
            Some(_) if self.pending.is_some() => {
                RequestOutcome::Dropped(DropReason::PendingOccupied)
            }
            Some(_) => {
                self.pending = Some(target);
                RequestOutcome::Queued
            }
        }
    }

    /// Finish the active destination and promote the pending one.
    ///
    /// Returns the new active destination, if any.
    pub fn complete(&mut self) -> Option<Millimeters> {
        self.active = self.pending.take();
        self.active
    }

    /// Drop both slots.
    pub fn clear(&mut self) {
        self.active = None;
        self.pending = None;
    }

    /// Current destination.
    #[inline]
    pub fn active(&self) -> Option<Millimeters> {
        self.active
    }

    /// Queued next destination.
    #[inline]
    pub fn pending(&self) -> Option<Millimeters> {
        self.pending
    }

    /// No destination held.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    /// Number of held destinations (0-2).
    #[inline]
    pub fn len(&self) -> usize {
        self.active.is_some() as usize + self.pending.is_some() as usize
    }

    /// Whether no destination is held.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
