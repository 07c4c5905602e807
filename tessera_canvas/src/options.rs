// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;

use crate::{MapError, Vector2};

/// Construction options for a [`Viewport`](crate::Viewport).
///
/// Magnifications are integer percentages: `100` draws one world unit per
/// screen pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct MapOptions {
    /// Screen-space regions where pointer input is ignored.
    pub excluded: Vec<Rect>,
    /// Interpolate when drawing scaled sections.
    pub smooth: bool,
    /// Smallest allowed magnification, in percent. Must be at least 1.
    pub min_magnification: u32,
    /// Largest allowed magnification, in percent.
    pub max_magnification: u32,
    /// Screen size to apply on construction. Defaults to the surface size.
    pub initial_size: Option<Vector2>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            excluded: Vec::new(),
            smooth: true,
            min_magnification: 1,
            max_magnification: 800,
            initial_size: None,
        }
    }
}

impl MapOptions {
    /// Replaces the excluded input regions.
    #[must_use]
    pub fn with_excluded(mut self, excluded: impl IntoIterator<Item = Rect>) -> Self {
        self.excluded = excluded.into_iter().collect();
        self
    }

    /// Sets the initial interpolation flag.
    #[must_use]
    pub fn with_smooth(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }

    /// Sets the magnification bounds, in percent.
    #[must_use]
    pub fn with_magnification_bounds(mut self, min: u32, max: u32) -> Self {
        self.min_magnification = min;
        self.max_magnification = max;
        self
    }

    /// Sets the screen size applied on construction.
    #[must_use]
    pub fn with_initial_size(mut self, size: Vector2) -> Self {
        self.initial_size = Some(size);
        self
    }

    /// Checks the magnification bounds.
    pub fn validate(&self) -> Result<(), MapError> {
        let (min, max) = (self.min_magnification, self.max_magnification);
        if min == 0 || min > max {
            return Err(MapError::InvalidMagnificationBounds { min, max });
        }
        Ok(())
    }
}
