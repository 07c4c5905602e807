// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Affine, Rect, Size};
use peniko::ImageQuality;

use crate::error::pixel_extent;
use crate::{Pixmap, SurfaceError};

/// A drawing target that pixmaps are blitted onto.
///
/// Surfaces are addressed in screen pixels with the origin at the top-left.
/// The transforms handed to [`Surface::draw_image`] are axis-aligned
/// (translation plus uniform scale); implementations may rely on that.
pub trait Surface {
    /// Current size in pixels.
    fn size(&self) -> Size;

    /// Resizes the surface. Contents are unspecified afterwards.
    ///
    /// Fails when the size is negative, not finite, or cannot be backed by
    /// the implementation.
    fn resize(&mut self, size: Size) -> Result<(), SurfaceError>;

    /// Clears `rect` to transparent.
    fn clear(&mut self, rect: Rect);

    /// Draws `image` mapped through `transform` from image pixel space into
    /// surface space.
    ///
    /// `quality` selects the filtering mode: [`ImageQuality::Low`] is nearest
    /// neighbor, anything higher is linear interpolation.
    fn draw_image(&mut self, image: &Pixmap, transform: Affine, quality: ImageQuality);

    /// Ends a frame. Surfaces that queue draw calls make them visible here.
    fn present(&mut self) {}
}

/// A call recorded by [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    /// [`Surface::resize`] with the accepted size.
    Resize(Size),
    /// [`Surface::clear`].
    Clear(Rect),
    /// [`Surface::draw_image`].
    DrawImage {
        /// Size of the drawn image in its own pixels.
        image_size: Size,
        /// Transform from image space to surface space.
        transform: Affine,
        /// Sampling quality.
        quality: ImageQuality,
        /// Bounding box of the image in surface space.
        dest: Rect,
    },
    /// [`Surface::present`].
    Present,
}

/// Surface that records calls instead of producing pixels.
///
/// Intended for tests that assert on what a render pass asked for.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    size: Size,
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    /// Creates a recording surface with the given size.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ops: Vec::new(),
        }
    }

    /// All recorded calls, in order.
    #[must_use]
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Forgets the recorded calls.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Destination rectangles of the recorded image draws, in order.
    pub fn draw_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.ops.iter().filter_map(|op| match op {
            SurfaceOp::DrawImage { dest, .. } => Some(*dest),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) -> Result<(), SurfaceError> {
        let (width, height) = pixel_extent(size.width, size.height)?;
        self.size = Size::new(f64::from(width), f64::from(height));
        self.ops.push(SurfaceOp::Resize(self.size));
        Ok(())
    }

    fn clear(&mut self, rect: Rect) {
        self.ops.push(SurfaceOp::Clear(rect));
    }

    fn draw_image(&mut self, image: &Pixmap, transform: Affine, quality: ImageQuality) {
        let image_size = image.size();
        let dest = transform.transform_rect_bbox(image_size.to_rect());
        self.ops.push(SurfaceOp::DrawImage {
            image_size,
            transform,
            quality,
            dest,
        });
    }

    fn present(&mut self) {
        self.ops.push(SurfaceOp::Present);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn records_calls_in_order() {
        let mut surface = RecordingSurface::new(Size::new(100.0, 50.0));
        surface.clear(Rect::new(0.0, 0.0, 100.0, 50.0));
        surface.draw_image(
            &Pixmap::transparent(10, 10),
            Affine::translate((5.0, 5.0)) * Affine::scale(2.0),
            ImageQuality::Low,
        );
        surface.present();

        assert_eq!(surface.ops().len(), 3);
        assert_eq!(surface.ops()[2], SurfaceOp::Present);
        assert_eq!(surface.ops()[0], SurfaceOp::Clear(Rect::new(0.0, 0.0, 100.0, 50.0)));
        let rects: Vec<Rect> = surface.draw_rects().collect();
        assert_eq!(rects, vec![Rect::new(5.0, 5.0, 25.0, 25.0)]);
    }

    #[test]
    fn resize_rounds_and_rejects_invalid() {
        let mut surface = RecordingSurface::default();
        surface.resize(Size::new(10.4, 20.6)).unwrap();
        assert_eq!(surface.size(), Size::new(10.0, 21.0));
        assert!(surface.resize(Size::new(-1.0, 5.0)).is_err());
        assert_eq!(surface.size(), Size::new(10.0, 21.0));

        surface.clear_ops();
        assert!(surface.ops().is_empty());
    }
}
