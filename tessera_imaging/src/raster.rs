// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CPU surface rendered with `vello_cpu`.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Affine, Rect, Size};
use peniko::{BlendMode, Color, Compose, ImageQuality, Mix};
use vello_cpu::RenderContext;
use vello_cpu::kurbo::Shape as _;

use crate::cpu;
use crate::error::{buffer_len, pixel_extent};
use crate::pixmap::Rgba8;
use crate::{Pixmap, Surface, SurfaceError};

const CLIP_TOLERANCE: f64 = 0.1;

/// A surface backed by a `vello_cpu` [`RenderContext`].
///
/// Draw calls are queued on the context and composited source-over when the
/// frame is presented. Pixel reads see the last presented frame.
pub struct RasterSurface {
    ctx: RenderContext,
    width: u16,
    height: u16,
    frame: Vec<u8>,
}

impl core::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl RasterSurface {
    /// Creates a transparent surface of `width x height` pixels.
    pub fn new(width: u16, height: u16) -> Result<Self, SurfaceError> {
        let len = buffer_len(width, height)?;
        Ok(Self {
            ctx: context(width, height),
            width,
            height,
            frame: vec![0; len],
        })
    }

    /// Returns the presented pixel at `(x, y)`, or `None` outside the
    /// surface.
    #[must_use]
    pub fn pixel(&self, x: u16, y: u16) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (usize::from(y) * usize::from(self.width) + usize::from(x)) * 4;
        let bytes = self.frame.get(i..i + 4)?;
        Some([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    /// The presented frame as straight-alpha RGBA8, row-major.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.frame
    }

    /// Copies the presented frame into a [`Pixmap`].
    pub fn to_pixmap(&self) -> Result<Pixmap, SurfaceError> {
        Pixmap::from_rgba8(self.width, self.height, self.frame.clone())
    }

    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// A zero-sized surface keeps a 1x1 context that is never read back.
fn context(width: u16, height: u16) -> RenderContext {
    let mut ctx = RenderContext::new(width.max(1), height.max(1));
    ctx.reset();
    ctx
}

impl Surface for RasterSurface {
    fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    fn resize(&mut self, size: Size) -> Result<(), SurfaceError> {
        let (width, height) = pixel_extent(size.width, size.height)?;
        let len = buffer_len(width, height)?;
        self.ctx = context(width, height);
        self.width = width;
        self.height = height;
        self.frame.clear();
        self.frame.resize(len, 0);
        Ok(())
    }

    fn clear(&mut self, rect: Rect) {
        let bounds = self.bounds();
        let rect = rect.intersect(bounds);
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        if rect == bounds {
            self.ctx.reset();
            return;
        }
        let clip = cpu::rect(rect).to_path(CLIP_TOLERANCE);
        self.ctx.set_transform(cpu::affine(Affine::IDENTITY));
        self.ctx.push_layer(
            Some(&clip),
            Some(BlendMode::new(Mix::Normal, Compose::Clear)),
            None,
            None,
            None,
        );
        self.ctx.set_paint(Color::BLACK);
        self.ctx.fill_rect(&cpu::rect(rect));
        self.ctx.pop_layer();
    }

    fn draw_image(&mut self, image: &Pixmap, transform: Affine, quality: ImageQuality) {
        image.draw_into(&mut self.ctx, transform, quality);
    }

    fn present(&mut self) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        self.frame = cpu::rasterize(&mut self.ctx, self.width, self.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn green() -> Color {
        Color::from_rgba8(0, 255, 0, 255)
    }

    #[test]
    fn draw_solid_scaled_and_translated() {
        let mut surface = RasterSurface::new(8, 8).unwrap();
        let tile = Pixmap::solid(2, 2, green());
        surface.draw_image(
            &tile,
            Affine::translate((4.0, 4.0)) * Affine::scale(1.5),
            ImageQuality::Low,
        );
        surface.present();

        // Tile covers [4, 7) on both axes.
        assert_eq!(surface.pixel(4, 4), Some([0, 255, 0, 255]));
        assert_eq!(surface.pixel(6, 6), Some([0, 255, 0, 255]));
        assert_eq!(surface.pixel(3, 4), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(7, 7), Some([0, 0, 0, 0]));
    }

    #[test]
    fn draws_are_invisible_until_presented() {
        let mut surface = RasterSurface::new(2, 2).unwrap();
        surface.draw_image(&Pixmap::solid(2, 2, green()), Affine::IDENTITY, ImageQuality::Low);
        assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 0]));
        surface.present();
        assert_eq!(surface.pixel(0, 0), Some([0, 255, 0, 255]));
    }

    #[test]
    fn nearest_keeps_hard_edges_and_linear_blends() {
        let pixels = vec![0, 0, 0, 255, 255, 255, 255, 255];
        let image = Pixmap::from_rgba8(2, 1, pixels).unwrap();

        let mut nearest = RasterSurface::new(8, 1).unwrap();
        nearest.draw_image(&image, Affine::scale(4.0), ImageQuality::Low);
        nearest.present();
        assert_eq!(nearest.pixel(3, 0), Some([0, 0, 0, 255]));
        assert_eq!(nearest.pixel(4, 0), Some([255, 255, 255, 255]));

        let mut linear = RasterSurface::new(8, 1).unwrap();
        linear.draw_image(&image, Affine::scale(4.0), ImageQuality::Medium);
        linear.present();
        let left = linear.pixel(3, 0).unwrap();
        let right = linear.pixel(4, 0).unwrap();
        assert!(left[0] > 0 && left[0] < 255, "left = {left:?}");
        assert!(right[0] > left[0], "ramp rises: {left:?} -> {right:?}");
    }

    #[test]
    fn clear_and_resize() {
        let mut surface = RasterSurface::new(4, 4).unwrap();
        surface.draw_image(
            &Pixmap::solid(4, 4, Color::from_rgba8(9, 9, 9, 255)),
            Affine::IDENTITY,
            ImageQuality::Low,
        );
        surface.clear(Rect::new(0.0, 0.0, 2.0, 4.0));
        surface.present();
        assert_eq!(surface.pixel(1, 1), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(2, 1), Some([9, 9, 9, 255]));

        surface.clear(Rect::new(-5.0, -5.0, 50.0, 50.0));
        surface.present();
        assert_eq!(surface.pixel(2, 1), Some([0, 0, 0, 0]));

        surface.resize(Size::new(3.0, 2.0)).unwrap();
        assert_eq!(surface.size(), Size::new(3.0, 2.0));
        assert_eq!(surface.data().len(), 3 * 2 * 4);
        assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn offscreen_draw_leaves_frame_empty() {
        let mut surface = RasterSurface::new(4, 4).unwrap();
        surface.draw_image(
            &Pixmap::solid(4, 4, Color::from_rgba8(1, 2, 3, 255)),
            Affine::translate((10.0, 10.0)),
            ImageQuality::Low,
        );
        surface.present();
        assert!(surface.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn zero_sized_surface_presents_nothing() {
        let mut surface = RasterSurface::new(0, 0).unwrap();
        surface.draw_image(&Pixmap::solid(1, 1, green()), Affine::IDENTITY, ImageQuality::Low);
        surface.present();
        assert!(surface.data().is_empty());
        assert_eq!(surface.pixel(0, 0), None);
    }
}
