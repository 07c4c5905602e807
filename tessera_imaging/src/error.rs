// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round`
use thiserror::Error;

/// Errors raised while sizing surfaces or building pixmaps.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SurfaceError {
    /// The requested dimensions are negative or not finite.
    #[error("invalid surface size {width}x{height}")]
    InvalidSize {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },
    /// The pixel buffer for the requested dimensions cannot be allocated.
    #[error("surface of {width}x{height} pixels is too large")]
    TooLarge {
        /// Width in pixels.
        width: u64,
        /// Height in pixels.
        height: u64,
    },
    /// A pixel buffer does not match the declared dimensions.
    #[error("pixel buffer has {actual} bytes, expected {expected}")]
    BufferSize {
        /// Bytes required by the dimensions.
        expected: usize,
        /// Bytes provided.
        actual: usize,
    },
}

/// Number of bytes of an RGBA8 buffer of `width * height` pixels.
pub(crate) fn buffer_len(width: u16, height: u16) -> Result<usize, SurfaceError> {
    usize::from(width)
        .checked_mul(usize::from(height))
        .and_then(|n| n.checked_mul(4))
        .ok_or(SurfaceError::TooLarge {
            width: width.into(),
            height: height.into(),
        })
}

/// Rounds a floating-point extent to whole pixels.
///
/// Negative or non-finite extents are invalid. Extents beyond `u16::MAX` are
/// rejected; that is the largest target the CPU renderer accepts.
pub fn pixel_extent(width: f64, height: f64) -> Result<(u16, u16), SurfaceError> {
    if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
        return Err(SurfaceError::InvalidSize { width, height });
    }
    let (w, h) = (width.round(), height.round());
    #[expect(clippy::cast_possible_truncation, reason = "finite and non-negative; saturates")]
    let (w, h) = (w as u64, h as u64);
    let too_large = SurfaceError::TooLarge {
        width: w,
        height: h,
    };
    let width = u16::try_from(w).map_err(|_| too_large.clone())?;
    let height = u16::try_from(h).map_err(|_| too_large)?;
    Ok((width, height))
}
