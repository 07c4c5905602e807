// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `ceil`
use kurbo::{Affine, Rect, Size};
use peniko::{Blob, Color, ImageAlphaType, ImageData, ImageFormat, ImageQuality, ImageSampler};
use vello_cpu::{Image as CpuImage, ImageSource, RenderContext};

use crate::SurfaceError;
use crate::cpu;
use crate::error::buffer_len;

/// A straight-alpha RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Converts a [`Color`] to a straight-alpha RGBA8 pixel.
#[must_use]
pub fn rgba8(color: Color) -> Rgba8 {
    color.to_rgba8().to_u8_array()
}

#[derive(Clone, PartialEq)]
enum Storage {
    Solid(Rgba8),
    Image(ImageData),
}

/// An RGBA8 image with a fixed size.
///
/// A pixmap filled with one color keeps only that color and is drawn as a
/// solid paint. Anything else is held as straight-alpha [`ImageData`], which
/// is what the renderer samples from.
#[derive(Clone, PartialEq)]
pub struct Pixmap {
    width: u16,
    height: u16,
    storage: Storage,
}

impl core::fmt::Debug for Pixmap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut s = f.debug_struct("Pixmap");
        s.field("width", &self.width).field("height", &self.height);
        match &self.storage {
            Storage::Solid(color) => s.field("solid", color),
            Storage::Image(image) => s.field("bytes", &image.data.len()),
        };
        s.finish()
    }
}

impl Pixmap {
    /// Creates a pixmap uniformly filled with `color`.
    #[must_use]
    pub fn solid(width: u16, height: u16, color: Color) -> Self {
        Self {
            width,
            height,
            storage: Storage::Solid(rgba8(color)),
        }
    }

    /// Creates a fully transparent pixmap.
    #[must_use]
    pub fn transparent(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            storage: Storage::Solid([0; 4]),
        }
    }

    /// Wraps an existing straight-alpha RGBA8 buffer, row-major, top row first.
    pub fn from_rgba8(width: u16, height: u16, pixels: Vec<u8>) -> Result<Self, SurfaceError> {
        let expected = buffer_len(width, height)?;
        if pixels.len() != expected {
            return Err(SurfaceError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self::from_pixels(width, height, pixels))
    }

    fn from_pixels(width: u16, height: u16, pixels: Vec<u8>) -> Self {
        let image = ImageData {
            data: Blob::from(pixels),
            format: ImageFormat::Rgba8,
            alpha_type: ImageAlphaType::Alpha,
            width: width.into(),
            height: height.into(),
        };
        Self {
            width,
            height,
            storage: Storage::Image(image),
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Size in pixels.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Returns the fill color if the pixmap is still in its solid form.
    #[must_use]
    pub fn solid_color(&self) -> Option<Rgba8> {
        match self.storage {
            Storage::Solid(color) => Some(color),
            Storage::Image(_) => None,
        }
    }

    /// The backing image, unless the pixmap is solid.
    #[must_use]
    pub fn image_data(&self) -> Option<&ImageData> {
        match &self.storage {
            Storage::Solid(_) => None,
            Storage::Image(image) => Some(image),
        }
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the pixmap.
    #[must_use]
    pub fn pixel(&self, x: u16, y: u16) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        match &self.storage {
            Storage::Solid(color) => Some(*color),
            Storage::Image(image) => {
                let i = (usize::from(y) * usize::from(self.width) + usize::from(x)) * 4;
                let bytes = image.data.data().get(i..i + 4)?;
                Some([bytes[0], bytes[1], bytes[2], bytes[3]])
            }
        }
    }

    /// Copies the pixels out as a straight-alpha RGBA8 buffer.
    #[must_use]
    pub fn to_rgba8(&self) -> Vec<u8> {
        match &self.storage {
            Storage::Solid(color) => color.repeat(self.pixel_count()),
            Storage::Image(image) => image.data.data().to_vec(),
        }
    }

    /// Paints `rect` (in pixel coordinates) with `color`, source-over.
    ///
    /// The rectangle is snapped to the pixels whose centers it contains and
    /// clipped to the pixmap. Returns the number of covered pixels.
    ///
    /// An opaque fill of the whole pixmap keeps it solid. Partial or
    /// translucent fills are rendered with `vello_cpu` into a new image.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) -> usize {
        let Some((x0, y0, x1, y1)) = self.covered_span(rect) else {
            return 0;
        };
        let covered = usize::from(x1 - x0) * usize::from(y1 - y0);
        let src = rgba8(color);
        if src[3] == 0 {
            return covered;
        }
        if src[3] == u8::MAX && covered == self.pixel_count() {
            self.storage = Storage::Solid(src);
            return covered;
        }
        if self.solid_color() == Some(src) && src[3] == u8::MAX {
            return covered;
        }

        let mut ctx = RenderContext::new(self.width, self.height);
        self.draw_into(&mut ctx, Affine::IDENTITY, ImageQuality::Low);
        ctx.set_paint(color);
        ctx.set_transform(cpu::affine(Affine::IDENTITY));
        let span = Rect::new(x0.into(), y0.into(), x1.into(), y1.into());
        ctx.fill_rect(&cpu::rect(span));
        let pixels = cpu::rasterize(&mut ctx, self.width, self.height);
        *self = Self::from_pixels(self.width, self.height, pixels);
        covered
    }

    /// Queues this pixmap on `ctx`, mapped from pixel space through
    /// `transform`.
    pub(crate) fn draw_into(&self, ctx: &mut RenderContext, transform: Affine, quality: ImageQuality) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        match &self.storage {
            Storage::Solid([_, _, _, 0]) => return,
            Storage::Solid([r, g, b, a]) => ctx.set_paint(Color::from_rgba8(*r, *g, *b, *a)),
            Storage::Image(image) => ctx.set_paint(CpuImage {
                image: ImageSource::from_peniko_image_data(image),
                sampler: ImageSampler::new().with_quality(quality),
            }),
        }
        ctx.set_transform(cpu::affine(transform));
        ctx.fill_rect(&cpu::rect(self.size().to_rect()));
    }

    fn pixel_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Pixel span `[x0, x1) x [y0, y1)` whose centers fall inside `rect`.
    fn covered_span(&self, rect: Rect) -> Option<(u16, u16, u16, u16)> {
        let (w, h) = (f64::from(self.width), f64::from(self.height));
        let x0 = (rect.min_x() - 0.5).ceil().clamp(0.0, w);
        let y0 = (rect.min_y() - 0.5).ceil().clamp(0.0, h);
        let x1 = (rect.max_x() - 0.5).ceil().clamp(0.0, w);
        let y1 = (rect.max_y() - 0.5).ceil().clamp(0.0, h);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation, reason = "clamped to the pixmap size")]
        let span = (x0 as u16, y0 as u16, x1 as u16, y1 as u16);
        Some(span)
    }
}
