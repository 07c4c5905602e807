// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Translation of pointer, touch, and wheel input into pans and zooms.
//!
//! The viewport needs two primitives: a drag delta in screen pixels
//! ([`Viewport::drag_by`]) and a pinch factor about a screen point
//! ([`Viewport::pinch`]). [`GestureState`] derives both from raw samples and
//! ignores input that starts inside an excluded region.

use tessera_imaging::Surface;

use crate::{Vector2, Viewport};

impl<S: Surface> Viewport<S> {
    /// Pans by a screen-space drag of `delta` pixels.
    ///
    /// Content follows the pointer: the world position moves by
    /// `-delta / magnification`.
    pub fn drag_by(&mut self, delta: Vector2) -> bool {
        let target = self.position() - delta / self.magnification();
        self.set_position(target)
    }

    /// Zooms by `factor` about the screen point `center`.
    ///
    /// Non-positive factors are ignored.
    pub fn pinch(&mut self, factor: f64, center: Vector2) -> bool {
        if factor <= 0.0 {
            return false;
        }
        self.zoom(factor, center)
    }
}

/// Tracks multi-sample gestures across input events.
///
/// The last single-pointer sample is kept by the viewport itself as its
/// pointer position; this state only remembers the two-finger distance.
#[derive(Clone, Debug, Default)]
pub struct GestureState {
    pinch_distance: Option<f64>,
}

impl GestureState {
    /// Creates an idle gesture state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Two-finger distance recorded by the last touch sample, if any.
    #[must_use]
    pub fn pinch_distance(&self) -> Option<f64> {
        self.pinch_distance
    }

    /// Handles a mouse or pen move to `position`.
    ///
    /// Moves inside an excluded region are ignored. With a button `pressed`
    /// the view pans by the distance travelled since the last sample. The
    /// sample is then recorded as the pointer position.
    ///
    /// Returns `false` if the sample was ignored.
    pub fn pointer_moved<S: Surface>(
        &mut self,
        viewport: &mut Viewport<S>,
        position: Vector2,
        pressed: bool,
    ) -> bool {
        if viewport.is_excluded(position) {
            return false;
        }
        if pressed {
            viewport.drag_by(position - viewport.pointer_position());
        }
        viewport.set_pointer_position(position);
        true
    }

    /// Handles the start of a touch with `touches` active.
    ///
    /// One touch becomes the reference point for panning; two or more record
    /// the distance between the first two for pinching.
    pub fn touch_started<S: Surface>(&mut self, viewport: &mut Viewport<S>, touches: &[Vector2]) {
        match touches {
            [] => {}
            [only] => {
                self.pinch_distance = None;
                viewport.set_pointer_position(*only);
            }
            [first, second, ..] => self.pinch_distance = Some(first.distance(*second)),
        }
    }

    /// Handles a touch move with `touches` active.
    ///
    /// The first touch pans. With a second touch, the view also zooms by the
    /// change in finger distance about their midpoint. A lone touch inside an
    /// excluded region is ignored.
    ///
    /// Returns `false` if the sample was ignored.
    pub fn touch_moved<S: Surface>(
        &mut self,
        viewport: &mut Viewport<S>,
        touches: &[Vector2],
    ) -> bool {
        let [first, rest @ ..] = touches else {
            return false;
        };
        if rest.is_empty() && viewport.is_excluded(*first) {
            return false;
        }
        viewport.drag_by(*first - viewport.pointer_position());
        viewport.set_pointer_position(*first);

        if let [second, ..] = rest {
            let distance = first.distance(*second);
            match self.pinch_distance {
                Some(previous) if previous > 0.0 => {
                    viewport.pinch(distance / previous, first.midpoint(*second));
                }
                _ => {}
            }
            self.pinch_distance = Some(distance);
        }
        true
    }

    /// Handles the end of a touch with `touches` still active.
    ///
    /// Fewer than two touches end the pinch. A remaining touch becomes the new
    /// panning reference so the view does not jump.
    pub fn touch_ended<S: Surface>(&mut self, viewport: &mut Viewport<S>, touches: &[Vector2]) {
        if touches.len() < 2 {
            self.pinch_distance = None;
        }
        if let [only] = touches {
            viewport.set_pointer_position(*only);
        }
    }

    /// Handles a wheel step at `position`.
    ///
    /// A positive `delta_y` (scrolling down) zooms out, anything else zooms
    /// in. Steps inside an excluded region are ignored.
    ///
    /// Returns `true` if the magnification changed.
    pub fn wheel<S: Surface>(
        &mut self,
        viewport: &mut Viewport<S>,
        delta_y: f64,
        position: Vector2,
    ) -> bool {
        if viewport.is_excluded(position) {
            return false;
        }
        if delta_y > 0.0 {
            viewport.zoom_out(position)
        } else {
            viewport.zoom_in(position)
        }
    }
}
