// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use tessera_imaging::SurfaceError;
use thiserror::Error;

/// Errors raised when building or resizing a [`Viewport`](crate::Viewport).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MapError {
    /// The magnification bounds are empty or include zero.
    #[error("invalid magnification bounds {min}%..={max}%")]
    InvalidMagnificationBounds {
        /// Requested minimum percentage.
        min: u32,
        /// Requested maximum percentage.
        max: u32,
    },
    /// The drawing surface rejected the requested size.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}
