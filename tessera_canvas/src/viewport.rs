// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Point, Rect};
use tessera_events::{BusEvent, Cancelable, EventBus, ListenerId, Priority};
use tessera_imaging::{Surface, pixel_extent};

use crate::render::{self, RenderReport};
use crate::{EventKind, MapError, MapEvent, MapOptions, SectionStore, Vector2};

/// Pan/zoom view over a sparse, sectioned world.
///
/// `Viewport` owns the world position shown at the top-left of the screen,
/// the magnification, the drawing surface (whose size is the screen size),
/// the section store, and the event bus.
///
/// Every state change follows the same sequence: build a [`MapEvent`],
/// dispatch it to the listeners in ascending [`Priority`] order, drop the
/// change if a listener canceled it, otherwise commit and re-render. Listeners
/// receive the viewport itself and may call back into it; nested changes
/// complete before the outer one commits.
///
/// Magnification is kept as an integer percentage; [`Viewport::magnification`]
/// returns the matching scale factor (`percent / 100`).
pub struct Viewport<S> {
    surface: S,
    sections: SectionStore,
    bus: EventBus<MapEvent, Self>,
    position: Vector2,
    percent: u32,
    smooth: bool,
    min: u32,
    max: u32,
    excluded: Vec<Rect>,
    pointer_position: Vector2,
    frames_rendered: u64,
    last_render: RenderReport,
}

impl<S: fmt::Debug> fmt::Debug for Viewport<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewport")
            .field("surface", &self.surface)
            .field("sections", &self.sections.len())
            .field("bus", &self.bus)
            .field("position", &self.position)
            .field("percent", &self.percent)
            .field("smooth", &self.smooth)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("excluded", &self.excluded)
            .field("pointer_position", &self.pointer_position)
            .field("frames_rendered", &self.frames_rendered)
            .field("last_render", &self.last_render)
            .finish()
    }
}

impl<S: Surface> Viewport<S> {
    /// Creates a viewport drawing into `surface`.
    ///
    /// The initial position is the world origin and the initial magnification
    /// is 100%, clamped into the configured bounds. The surface is sized to
    /// `options.initial_size` (or keeps its size) and rendered once.
    ///
    /// Fails if the magnification bounds are invalid or the surface cannot
    /// take the initial size.
    pub fn new(surface: S, options: MapOptions) -> Result<Self, MapError> {
        options.validate()?;
        let size = options
            .initial_size
            .unwrap_or_else(|| surface.size().into());
        let mut viewport = Self {
            surface,
            sections: SectionStore::new(),
            bus: EventBus::new(),
            position: Vector2::ZERO,
            percent: 100_u32.clamp(options.min_magnification, options.max_magnification),
            smooth: options.smooth,
            min: options.min_magnification,
            max: options.max_magnification,
            excluded: options.excluded,
            pointer_position: Vector2::ZERO,
            frames_rendered: 0,
            last_render: RenderReport::default(),
        };
        viewport.set_size(size)?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            width = size.x,
            height = size.y,
            magnification = viewport.percent,
            min = viewport.min,
            max = viewport.max,
            smooth = viewport.smooth,
            "viewport created"
        );
        Ok(viewport)
    }

    /// Repaints the surface from the section store and returns what was drawn.
    pub fn render(&mut self) -> &RenderReport {
        let size = self.size();
        let scale = self.magnification();
        self.last_render = render::render(
            &mut self.surface,
            &self.sections,
            self.position,
            size,
            scale,
            self.smooth,
        );
        self.frames_rendered += 1;
        &self.last_render
    }

    /// Moves the world point shown at the screen's top-left to `position`.
    ///
    /// Returns `false` if a listener canceled the move.
    pub fn set_position(&mut self, position: Vector2) -> bool {
        if self.dispatch(MapEvent::moved(position)).is_canceled() {
            #[cfg(feature = "tracing")]
            tracing::debug!(x = position.x, y = position.y, "move canceled");
            return false;
        }
        self.position = position;
        self.render();
        true
    }

    /// Resizes the screen, in pixels.
    ///
    /// The size is rounded to whole pixels before the resize event is raised,
    /// so listeners see the size that will be committed.
    ///
    /// Returns `Ok(false)` if a listener canceled the resize, and an error if
    /// the size is negative, not finite, too large, or rejected by the surface.
    pub fn set_size(&mut self, size: Vector2) -> Result<bool, MapError> {
        let (width, height) = pixel_extent(size.x, size.y)?;
        let size = Vector2::new(f64::from(width), f64::from(height));
        if self.dispatch(MapEvent::resized(size)).is_canceled() {
            #[cfg(feature = "tracing")]
            tracing::debug!(width = size.x, height = size.y, "resize canceled");
            return Ok(false);
        }
        self.surface.resize(size.into())?;

        #[cfg(feature = "tracing")]
        tracing::debug!(width = size.x, height = size.y, "surface resized");
        self.render();
        Ok(true)
    }

    /// Turns interpolation of scaled sections on or off.
    ///
    /// Returns `false` if a listener canceled the change.
    pub fn set_smooth(&mut self, smooth: bool) -> bool {
        if self.dispatch(MapEvent::smoothing(smooth)).is_canceled() {
            #[cfg(feature = "tracing")]
            tracing::debug!(smooth, "smoothing change canceled");
            return false;
        }
        self.smooth = smooth;
        self.render();
        true
    }

    /// Sets the magnification, in percent, keeping the world point under the
    /// screen point `anchor` in place.
    ///
    /// The request is rounded to the nearest integer. A request equal to the
    /// current magnification does nothing: no event is raised and nothing is
    /// rendered. Any other request is clamped into the bounds and raises a
    /// zoom event, even when the clamped value is the current one.
    /// Non-finite requests are ignored.
    ///
    /// The anchor-preserving reposition goes through
    /// [`Viewport::set_position`] and can be canceled on its own; the new
    /// magnification is committed regardless.
    ///
    /// Returns `false` if the request was ignored or a listener canceled it.
    pub fn set_magnification(&mut self, magnification: f64, anchor: Vector2) -> bool {
        if !magnification.is_finite() {
            return false;
        }
        let requested = magnification.round();
        if requested == f64::from(self.percent) {
            return false;
        }
        let clamped = requested.clamp(f64::from(self.min), f64::from(self.max));
        #[expect(clippy::cast_possible_truncation, reason = "clamped into u32 bounds")]
        let percent = clamped as u32;
        if self.dispatch(MapEvent::zoomed(percent)).is_canceled() {
            #[cfg(feature = "tracing")]
            tracing::debug!(magnification = percent, "zoom canceled");
            return false;
        }

        let old_scale = self.magnification();
        let new_scale = f64::from(percent) / 100.0;
        let anchor = anchor / old_scale;
        let amount = new_scale / old_scale;
        let position = anchor - anchor / amount + self.position;
        self.set_position(position);

        self.percent = percent;
        self.render();
        true
    }

    /// Multiplies the magnification by `factor` about `anchor`.
    pub fn zoom(&mut self, factor: f64, anchor: Vector2) -> bool {
        self.set_magnification(f64::from(self.percent) * factor, anchor)
    }

    /// Doubles the magnification about `anchor`.
    pub fn zoom_in(&mut self, anchor: Vector2) -> bool {
        self.zoom(2.0, anchor)
    }

    /// Halves the magnification about `anchor`.
    pub fn zoom_out(&mut self, anchor: Vector2) -> bool {
        self.zoom(0.5, anchor)
    }

    /// [`Viewport::set_magnification`] about the screen center.
    pub fn set_magnification_centered(&mut self, magnification: f64) -> bool {
        self.set_magnification(magnification, self.screen_center())
    }

    /// [`Viewport::zoom`] about the screen center.
    pub fn zoom_centered(&mut self, factor: f64) -> bool {
        self.zoom(factor, self.screen_center())
    }

    /// [`Viewport::zoom_in`] about the screen center.
    pub fn zoom_in_centered(&mut self) -> bool {
        self.zoom_in(self.screen_center())
    }

    /// [`Viewport::zoom_out`] about the screen center.
    pub fn zoom_out_centered(&mut self) -> bool {
        self.zoom_out(self.screen_center())
    }

    /// Records a pointer sample in screen space.
    ///
    /// Pointer listeners run before the position is stored, so
    /// [`Viewport::pointer_position`] still returns the previous sample
    /// during dispatch.
    pub fn set_pointer_position(&mut self, position: Vector2) {
        self.dispatch(MapEvent::pointer(position));
        self.pointer_position = position;
    }

    /// Moves the view so that the world point `target` is at the screen
    /// center.
    pub fn center_on(&mut self, target: Vector2) -> bool {
        let half_extent = self.size() / (2.0 * self.magnification());
        self.set_position(target - half_extent)
    }

    /// Converts a screen point to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, point: Vector2) -> Vector2 {
        self.position + point / self.magnification()
    }

    /// Converts a world point to screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, point: Vector2) -> Vector2 {
        (point - self.position) * self.magnification()
    }

    /// World rectangle currently covered by the screen.
    #[must_use]
    pub fn visible_world_rect(&self) -> Rect {
        let far = self.screen_to_world(self.size());
        Rect::new(self.position.x, self.position.y, far.x, far.y)
    }

    /// Center of the screen, in screen coordinates.
    #[must_use]
    pub fn screen_center(&self) -> Vector2 {
        self.size() / 2.0
    }

    /// Scale factor between world units and screen pixels.
    #[must_use]
    pub fn magnification(&self) -> f64 {
        f64::from(self.percent) / 100.0
    }

    /// Magnification as an integer percentage.
    #[must_use]
    pub fn magnification_percent(&self) -> u32 {
        self.percent
    }

    /// Smallest allowed magnification, in percent.
    #[must_use]
    pub fn min_magnification(&self) -> u32 {
        self.min
    }

    /// Largest allowed magnification, in percent.
    #[must_use]
    pub fn max_magnification(&self) -> u32 {
        self.max
    }

    /// World point shown at the screen's top-left.
    #[must_use]
    pub fn position(&self) -> Vector2 {
        self.position
    }

    /// Last recorded pointer position, in screen space.
    #[must_use]
    pub fn pointer_position(&self) -> Vector2 {
        self.pointer_position
    }

    /// Whether scaled sections are interpolated.
    #[must_use]
    pub fn smooth(&self) -> bool {
        self.smooth
    }

    /// Screen size in pixels.
    #[must_use]
    pub fn size(&self) -> Vector2 {
        self.surface.size().into()
    }

    /// Adds a screen-space region where pointer input is ignored.
    pub fn add_excluded(&mut self, region: Rect) {
        self.excluded.push(region);
    }

    /// Regions where pointer input is ignored.
    #[must_use]
    pub fn excluded(&self) -> &[Rect] {
        &self.excluded
    }

    /// Returns `true` if the screen point falls inside an excluded region.
    #[must_use]
    pub fn is_excluded(&self, point: Vector2) -> bool {
        self.excluded
            .iter()
            .any(|region| region.contains(Point::from(point)))
    }

    /// Registers a listener for events of `kind`.
    ///
    /// Listeners run in ascending priority order; [`Priority::Monitor`]
    /// listeners run last. Listeners may cancel the event; edits to its payload
    /// are not applied.
    pub fn on<F>(&mut self, kind: EventKind, priority: Priority, listener: F) -> ListenerId
    where
        F: Fn(&mut MapEvent, &mut Self) + 'static,
    {
        self.bus.register(kind, priority, listener)
    }

    /// Registers a listener for every event kind.
    ///
    /// These listeners run before the kind-specific ones.
    pub fn on_any<F>(&mut self, priority: Priority, listener: F) -> ListenerId
    where
        F: Fn(&mut MapEvent, &mut Self) + 'static,
    {
        self.bus.register_all(priority, listener)
    }

    /// Removes a listener. Returns `false` if the id is unknown.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.bus.unregister(id)
    }

    /// The section store.
    #[must_use]
    pub fn sections(&self) -> &SectionStore {
        &self.sections
    }

    /// The section store, for inserting or painting sections.
    ///
    /// Changes become visible on the next render.
    pub fn sections_mut(&mut self) -> &mut SectionStore {
        &mut self.sections
    }

    /// The drawing surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The drawing surface.
    ///
    /// Resizing it directly bypasses resize events; use
    /// [`Viewport::set_size`] instead.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Number of completed render passes.
    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Result of the most recent render pass.
    #[must_use]
    pub fn last_render(&self) -> &RenderReport {
        &self.last_render
    }

    fn dispatch(&mut self, mut event: MapEvent) -> MapEvent {
        self.bus.snapshot(event.kind()).dispatch(&mut event, self);
        event
    }
}
