// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions into `vello_cpu` geometry and pixmap readback.

use alloc::vec::Vec;

use kurbo::{Affine, Rect};
use vello_cpu::kurbo::{Affine as CpuAffine, Rect as CpuRect};
use vello_cpu::{Pixmap as CpuPixmap, RenderContext};

pub(crate) fn affine(xf: Affine) -> CpuAffine {
    CpuAffine::new(xf.as_coeffs())
}

pub(crate) fn rect(r: Rect) -> CpuRect {
    CpuRect::new(r.x0, r.y0, r.x1, r.y1)
}

/// Renders everything queued on `ctx` and reads it back as straight-alpha
/// RGBA8, row-major.
///
/// `width` and `height` must match the size `ctx` was created with.
pub(crate) fn rasterize(ctx: &mut RenderContext, width: u16, height: u16) -> Vec<u8> {
    let mut pixmap = CpuPixmap::new(width, height);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    let unpremul = pixmap.take_unpremultiplied();
    let mut bytes = Vec::with_capacity(unpremul.len() * 4);
    for p in unpremul {
        bytes.extend_from_slice(&[p.r, p.g, p.b, p.a]);
    }
    bytes
}
