// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport-culled section rendering.

use kurbo::{Affine, Rect};
use peniko::ImageQuality;
use smallvec::SmallVec;
use tessera_imaging::Surface;

use crate::Vector2;
use crate::section::{SectionKey, SectionStore};

/// Iterator over the grid keys covering a visible world rectangle.
///
/// Starts at the section containing the rectangle's top-left corner and steps
/// by [`SECTION_SIZE`](crate::SECTION_SIZE) on both axes, row by row, up to
/// and including the section containing the far edge.
#[derive(Clone, Debug)]
pub struct VisibleSections {
    first: SectionKey,
    last: SectionKey,
    next: Option<SectionKey>,
}

impl VisibleSections {
    /// Keys covering `[position, position + size / scale]` in world space.
    ///
    /// A non-positive or non-finite `scale` yields only the section under
    /// `position`.
    #[must_use]
    pub fn new(position: Vector2, size: Vector2, scale: f64) -> Self {
        let first = SectionKey::containing(position);
        let far = if scale > 0.0 && scale.is_finite() {
            position + size / scale
        } else {
            position
        };
        let last = SectionKey::containing(far);
        let next = (first.x() <= last.x() && first.y() <= last.y()).then_some(first);
        Self { first, last, next }
    }

    /// Keys covering the world rectangle `rect`, inclusive of its far edge.
    #[must_use]
    pub fn in_rect(rect: Rect) -> Self {
        Self::new(
            Vector2::new(rect.min_x(), rect.min_y()),
            Vector2::new(rect.width(), rect.height()),
            1.0,
        )
    }
}

impl Iterator for VisibleSections {
    type Item = SectionKey;

    fn next(&mut self) -> Option<SectionKey> {
        let current = self.next?;
        self.next = if current.x() < self.last.x() {
            current.offset(1, 0)
        } else if current.y() < self.last.y() {
            current
                .offset(0, 1)
                .and_then(|below| SectionKey::from_origin(self.first.x(), below.y()))
        } else {
            None
        };
        Some(current)
    }
}

/// Outcome of one render pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Every grid key looked up, in visiting order.
    pub queried: SmallVec<[SectionKey; 16]>,
    /// Keys whose section was present and drawn, in drawing order.
    pub drawn: SmallVec<[SectionKey; 16]>,
}

/// Repaints `surface` with the sections of `store` visible from `position`.
///
/// The visible screen rectangle `(0, 0, size)` is cleared first. Each present
/// section is then drawn scaled by `scale` at
/// `(origin - position) * scale`; absent sections are skipped. With `smooth`
/// off, sections are sampled nearest-neighbor.
///
/// The frame is presented once every section is queued. Rendering twice
/// with unchanged inputs produces the same surface.
pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    store: &SectionStore,
    position: Vector2,
    size: Vector2,
    scale: f64,
    smooth: bool,
) -> RenderReport {
    surface.clear(Rect::new(0.0, 0.0, size.x, size.y));
    let quality = if smooth {
        ImageQuality::Medium
    } else {
        ImageQuality::Low
    };

    let mut report = RenderReport::default();
    for key in VisibleSections::new(position, size, scale) {
        report.queried.push(key);
        let Some(section) = store.get(key) else {
            continue;
        };
        let offset = (key.origin() - position) * scale;
        let transform = Affine::translate((offset.x, offset.y)) * Affine::scale(scale);
        surface.draw_image(section.pixmap(), transform, quality);
        report.drawn.push(key);
    }
    surface.present();

    #[cfg(feature = "tracing")]
    tracing::trace!(
        queried = report.queried.len(),
        drawn = report.drawn.len(),
        scale,
        "rendered viewport"
    );
    report
}
