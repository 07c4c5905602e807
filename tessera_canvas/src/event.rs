// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport events.

use tessera_events::{BusEvent, Cancelable};

use crate::Vector2;

/// Tag selecting which listener list a [`MapEvent`] is dispatched to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The viewport is about to move.
    Move,
    /// The viewport is about to be resized.
    Resize,
    /// The magnification is about to change.
    Zoom,
    /// The interpolation flag is about to change.
    Smooth,
    /// A pointer sample was recorded.
    Pointer,
}

/// An event raised by a [`Viewport`](crate::Viewport).
///
/// Every variant except [`MapEvent::Pointer`] describes a pending state change
/// and can be canceled by a listener; the viewport discards the change if the
/// event comes back canceled.
#[derive(Clone, Debug, PartialEq)]
pub enum MapEvent {
    /// Candidate world position of the screen's top-left corner.
    Move {
        /// Requested position.
        position: Vector2,
        /// Set by a listener to veto the move.
        canceled: bool,
    },
    /// Candidate screen size in pixels.
    Resize {
        /// Requested size.
        size: Vector2,
        /// Set by a listener to veto the resize.
        canceled: bool,
    },
    /// Candidate magnification, as an integer percentage, already clamped.
    Zoom {
        /// Requested magnification percentage.
        magnification: u32,
        /// Set by a listener to veto the zoom.
        canceled: bool,
    },
    /// Candidate interpolation flag.
    Smooth {
        /// Requested flag.
        smooth: bool,
        /// Set by a listener to veto the change.
        canceled: bool,
    },
    /// Current pointer position in screen space. Informational only.
    Pointer {
        /// Pointer position.
        position: Vector2,
    },
}

impl MapEvent {
    /// A move event that has not been canceled.
    #[must_use]
    pub fn moved(position: Vector2) -> Self {
        Self::Move {
            position,
            canceled: false,
        }
    }

    /// A resize event that has not been canceled.
    #[must_use]
    pub fn resized(size: Vector2) -> Self {
        Self::Resize {
            size,
            canceled: false,
        }
    }

    /// A zoom event that has not been canceled.
    #[must_use]
    pub fn zoomed(magnification: u32) -> Self {
        Self::Zoom {
            magnification,
            canceled: false,
        }
    }

    /// A smoothing event that has not been canceled.
    #[must_use]
    pub fn smoothing(smooth: bool) -> Self {
        Self::Smooth {
            smooth,
            canceled: false,
        }
    }

    /// A pointer event.
    #[must_use]
    pub fn pointer(position: Vector2) -> Self {
        Self::Pointer { position }
    }

    /// Returns `true` if listeners may cancel this event.
    #[must_use]
    pub fn is_cancelable(&self) -> bool {
        !matches!(self, Self::Pointer { .. })
    }
}

impl BusEvent for MapEvent {
    type Kind = EventKind;

    fn kind(&self) -> EventKind {
        match self {
            Self::Move { .. } => EventKind::Move,
            Self::Resize { .. } => EventKind::Resize,
            Self::Zoom { .. } => EventKind::Zoom,
            Self::Smooth { .. } => EventKind::Smooth,
            Self::Pointer { .. } => EventKind::Pointer,
        }
    }
}

impl Cancelable for MapEvent {
    /// Cancels the pending change. Has no effect on pointer events.
    fn cancel(&mut self) {
        match self {
            Self::Move { canceled, .. }
            | Self::Resize { canceled, .. }
            | Self::Zoom { canceled, .. }
            | Self::Smooth { canceled, .. } => *canceled = true,
            Self::Pointer { .. } => {}
        }
    }

    fn is_canceled(&self) -> bool {
        match self {
            Self::Move { canceled, .. }
            | Self::Resize { canceled, .. }
            | Self::Zoom { canceled, .. }
            | Self::Smooth { canceled, .. } => *canceled,
            Self::Pointer { .. } => false,
        }
    }
}
