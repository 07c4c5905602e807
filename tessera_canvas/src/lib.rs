// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tessera Canvas: an infinite-canvas pan/zoom viewport.
//!
//! A world too large to hold as one bitmap is split into square sections of
//! [`SECTION_SIZE`] world units. Sections are inserted into a sparse
//! [`SectionStore`] as their content becomes available, and a [`Viewport`]
//! redraws only the sections that intersect the visible world rectangle.
//!
//! ## Coordinates
//!
//! - World space: the plane sections live on. A section's key is its
//!   top-left world coordinate, a multiple of [`SECTION_SIZE`] on both axes.
//! - Screen space: surface pixels, origin at the top-left.
//!
//! The viewport maps between the two with a translation and a uniform scale:
//! `screen = (world - position) * magnification`. Magnification is stored as
//! an integer percentage (`100` is one world unit per pixel).
//!
//! ## Events
//!
//! Moves, resizes, zooms, and smoothing changes each raise a cancelable
//! [`MapEvent`] before they commit. Listeners are registered per
//! [`EventKind`] with a [`Priority`] and run in ascending priority order, so
//! a [`Priority::Monitor`] listener sees the outcome of all others. A listener
//! that cancels the event discards the pending change. Pointer samples raise
//! an informational event that cannot be canceled.
//!
//! Listeners receive the viewport and may call back into it.
//!
//! ## Input
//!
//! [`Viewport::drag_by`] and [`Viewport::pinch`] are the two input
//! primitives. [`GestureState`] derives them from pointer, touch, and wheel
//! samples, honoring excluded screen regions.
//!
//! ## Example
//!
//! ```
//! use kurbo::Size;
//! use peniko::Color;
//! use tessera_canvas::{
//!     EventKind, MapEvent, MapOptions, Priority, Section, SectionKey, Vector2, Viewport,
//! };
//! use tessera_events::Cancelable;
//! use tessera_imaging::RecordingSurface;
//!
//! let surface = RecordingSurface::new(Size::new(800.0, 600.0));
//! let mut viewport = Viewport::new(surface, MapOptions::default()).unwrap();
//! viewport
//!     .sections_mut()
//!     .set(SectionKey::ORIGIN, Section::solid(Color::from_rgba8(0, 128, 255, 255)));
//!
//! // Refuse to pan into negative world coordinates.
//! viewport.on(EventKind::Move, Priority::Monitor, |event, _| {
//!     if let MapEvent::Move { position, .. } = *event {
//!         if position.x < 0.0 || position.y < 0.0 {
//!             event.cancel();
//!         }
//!     }
//! });
//!
//! assert!(!viewport.set_position(Vector2::new(-10.0, 0.0)));
//! assert!(viewport.zoom_in_centered());
//! assert_eq!(viewport.magnification_percent(), 200);
//! assert_eq!(viewport.position(), Vector2::new(200.0, 150.0));
//! assert_eq!(viewport.last_render().drawn.as_slice(), &[SectionKey::ORIGIN]);
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit structured logs through the `tracing` crate.

mod error;
mod event;
mod input;
mod options;
mod render;
mod section;
mod vector;
mod viewport;

pub use tessera_events::{ListenerId, Priority};

pub use error::MapError;
pub use event::{EventKind, MapEvent};
pub use input::GestureState;
pub use options::MapOptions;
pub use render::{RenderReport, VisibleSections, render};
pub use section::{ParseSectionKeyError, SECTION_SIZE, Section, SectionKey, SectionStore};
pub use vector::Vector2;
pub use viewport::Viewport;
