// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tessera Imaging: raster pixmaps and the drawing surfaces they are blitted to.
//!
//! # Position in the stack
//!
//! - **Viewport / render loop** (`tessera_canvas`): decides *what* to draw
//!   and where, in screen space.
//! - **Surfaces (this crate)**: the [`Surface`] trait accepts clear and image
//!   draw calls; concrete surfaces decide how pixels are produced.
//!
//! # Core concepts
//!
//! - [`Pixmap`]: an RGBA8 image. A pixmap created from a single color stays
//!   in a compact solid form until a localized paint renders it into
//!   [`peniko::ImageData`], so large, uniformly filled rasters cost almost
//!   nothing.
//! - [`Surface`]: the drawing target. Images are drawn with an axis-aligned
//!   [`Affine`] (translate + uniform scale) and an [`ImageQuality`] that
//!   selects nearest or linear sampling.
//! - [`RecordingSurface`]: records every call as a [`SurfaceOp`] for tests
//!   and debugging; it produces no pixels.
//! - [`RasterSurface`]: a CPU surface on top of [`vello_cpu`]. Draws are
//!   queued and rasterized when the frame is presented.
//!
//! # Example
//!
//! ```
//! use kurbo::{Affine, Size};
//! use peniko::{Color, ImageQuality};
//! use tessera_imaging::{Pixmap, RasterSurface, Surface};
//!
//! let mut surface = RasterSurface::new(4, 4).unwrap();
//! let tile = Pixmap::solid(2, 2, Color::from_rgba8(255, 0, 0, 255));
//!
//! // Draw the 2x2 tile scaled up to 4x4.
//! surface.draw_image(&tile, Affine::scale(2.0), ImageQuality::Low);
//! surface.present();
//! assert_eq!(surface.pixel(3, 3), Some([255, 0, 0, 255]));
//! assert_eq!(surface.size(), Size::new(4.0, 4.0));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod cpu;
mod error;
mod pixmap;
mod raster;
mod surface;

pub use kurbo::Affine;
pub use peniko::ImageQuality;

pub use error::{SurfaceError, pixel_extent};
pub use pixmap::{Pixmap, Rgba8, rgba8};
pub use raster::RasterSurface;
pub use surface::{RecordingSurface, Surface, SurfaceOp};
