// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sparse storage of fixed-size raster sections.

use core::fmt;
use core::str::FromStr;

use hashbrown::HashMap;
use kurbo::Rect;
use peniko::Color;
use tessera_imaging::{Pixmap, SurfaceError};
use thiserror::Error;

use crate::Vector2;

const SECTION_PIXELS: u16 = 4096;

/// Edge length of a section, in world units and in pixels.
pub const SECTION_SIZE: i64 = SECTION_PIXELS as i64;

/// Grid-aligned world origin of a section.
///
/// Both coordinates are multiples of [`SECTION_SIZE`]. Keys are formed by
/// floor alignment, so negative coordinates map to the section on their
/// lower side: `-1` belongs to the section at `-4096`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionKey {
    x: i64,
    y: i64,
}

impl SectionKey {
    /// The section at the world origin.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Key of the section containing the world point `point`.
    ///
    /// Coordinates beyond the `i64` range saturate; NaN maps to zero.
    #[must_use]
    pub fn containing(point: Vector2) -> Self {
        #[expect(clippy::cast_possible_truncation, reason = "float to int casts saturate")]
        let (x, y) = (point.x.floor() as i64, point.y.floor() as i64);
        Self::aligned(x, y)
    }

    /// Key of the section containing the integer world coordinate `(x, y)`.
    #[must_use]
    pub fn aligned(x: i64, y: i64) -> Self {
        Self {
            x: align(x),
            y: align(y),
        }
    }

    /// Key for a section whose origin is `(x, y)`, or `None` if either
    /// coordinate is not a multiple of [`SECTION_SIZE`].
    #[must_use]
    pub fn from_origin(x: i64, y: i64) -> Option<Self> {
        (x.rem_euclid(SECTION_SIZE) == 0 && y.rem_euclid(SECTION_SIZE) == 0)
            .then_some(Self { x, y })
    }

    /// World x coordinate of the section's left edge.
    #[must_use]
    pub fn x(self) -> i64 {
        self.x
    }

    /// World y coordinate of the section's top edge.
    #[must_use]
    pub fn y(self) -> i64 {
        self.y
    }

    /// World origin as a vector.
    #[must_use]
    pub fn origin(self) -> Vector2 {
        Vector2::new(self.x as f64, self.y as f64)
    }

    /// World rectangle covered by the section.
    #[must_use]
    pub fn bounds(self) -> Rect {
        let o = self.origin();
        let size = f64::from(SECTION_PIXELS);
        Rect::new(o.x, o.y, o.x + size, o.y + size)
    }

    /// Key of the neighbouring section `dx` columns and `dy` rows away.
    ///
    /// Returns `None` on overflow.
    #[must_use]
    pub fn offset(self, dx: i64, dy: i64) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx.checked_mul(SECTION_SIZE)?)?,
            y: self.y.checked_add(dy.checked_mul(SECTION_SIZE)?)?,
        })
    }
}

fn align(v: i64) -> i64 {
    v - v.rem_euclid(SECTION_SIZE)
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Error returned when parsing a [`SectionKey`] from its `"x,y"` form.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseSectionKeyError {
    /// The text is not two comma-separated integers.
    #[error("malformed section key {0:?}, expected \"<x>,<y>\"")]
    Malformed(String),
    /// The coordinates are not multiples of the section size.
    #[error("section key {x},{y} is not aligned to the 4096 unit grid")]
    Unaligned {
        /// Parsed x coordinate.
        x: i64,
        /// Parsed y coordinate.
        y: i64,
    },
}

impl FromStr for SectionKey {
    type Err = ParseSectionKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseSectionKeyError::Malformed(s.to_owned());
        let (x, y) = s.split_once(',').ok_or_else(malformed)?;
        let x: i64 = x.trim().parse().map_err(|_| malformed())?;
        let y: i64 = y.trim().parse().map_err(|_| malformed())?;
        Self::from_origin(x, y).ok_or(ParseSectionKeyError::Unaligned { x, y })
    }
}

/// A `SECTION_SIZE x SECTION_SIZE` raster.
///
/// The size is fixed at construction. Content is changed by replacing the
/// section in its store, or by painting into it with [`Section::paint_rect`].
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pixmap: Pixmap,
}

impl Section {
    /// A section filled with `color`.
    #[must_use]
    pub fn solid(color: Color) -> Self {
        Self {
            pixmap: Pixmap::solid(SECTION_PIXELS, SECTION_PIXELS, color),
        }
    }

    /// A fully transparent section.
    #[must_use]
    pub fn transparent() -> Self {
        Self {
            pixmap: Pixmap::transparent(SECTION_PIXELS, SECTION_PIXELS),
        }
    }

    /// Wraps decoded straight-alpha RGBA8 pixels, row-major.
    ///
    /// Fails unless `pixels` holds exactly `SECTION_SIZE * SECTION_SIZE * 4`
    /// bytes.
    pub fn from_rgba8(pixels: Vec<u8>) -> Result<Self, SurfaceError> {
        Ok(Self {
            pixmap: Pixmap::from_rgba8(SECTION_PIXELS, SECTION_PIXELS, pixels)?,
        })
    }

    /// Paints `rect`, given in section-local pixels, with `color`.
    ///
    /// The rectangle is clipped to the section. Returns the number of pixels
    /// covered.
    pub fn paint_rect(&mut self, rect: Rect, color: Color) -> usize {
        self.pixmap.fill_rect(rect, color)
    }

    /// The section's pixels.
    #[must_use]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

/// Sparse map from [`SectionKey`] to [`Section`].
///
/// The store holds exactly the sections that were inserted. Nothing is
/// evicted.
#[derive(Clone, Debug, Default)]
pub struct SectionStore {
    sections: HashMap<SectionKey, Section>,
}

impl SectionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the section at `key`.
    #[must_use]
    pub fn get(&self, key: SectionKey) -> Option<&Section> {
        self.sections.get(&key)
    }

    /// Returns the section at `key` for in-place painting.
    pub fn get_mut(&mut self, key: SectionKey) -> Option<&mut Section> {
        self.sections.get_mut(&key)
    }

    /// Inserts or replaces the section at `key`, returning the previous one.
    pub fn set(&mut self, key: SectionKey, section: Section) -> Option<Section> {
        self.sections.insert(key, section)
    }

    /// Removes the section at `key`.
    pub fn remove(&mut self, key: SectionKey) -> Option<Section> {
        self.sections.remove(&key)
    }

    /// Returns `true` if a section is stored at `key`.
    #[must_use]
    pub fn contains(&self, key: SectionKey) -> bool {
        self.sections.contains_key(&key)
    }

    /// Returns the section containing the world point `point`.
    #[must_use]
    pub fn section_at(&self, point: Vector2) -> Option<&Section> {
        self.get(SectionKey::containing(point))
    }

    /// Number of stored sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if no section is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Keys of all stored sections, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = SectionKey> + '_ {
        self.sections.keys().copied()
    }

    /// All stored sections, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (SectionKey, &Section)> + '_ {
        self.sections.iter().map(|(k, s)| (*k, s))
    }

    /// Populates every section overlapping the world rectangle
    /// `[0, width) x [0, height)` with `color` clipped to that rectangle.
    ///
    /// Existing sections in that range are replaced. Returns the number of
    /// sections written.
    pub fn fill_world(&mut self, width: u32, height: u32, color: Color) -> usize {
        let extent = Rect::new(0.0, 0.0, f64::from(width), f64::from(height));
        let mut written = 0;
        for y in (0..i64::from(height)).step_by(usize::from(SECTION_PIXELS)) {
            for x in (0..i64::from(width)).step_by(usize::from(SECTION_PIXELS)) {
                let key = SectionKey { x, y };
                let bounds = key.bounds();
                let mut section = Section::transparent();
                section.paint_rect(
                    extent.intersect(bounds) - bounds.origin().to_vec2(),
                    color,
                );
                self.set(key, section);
                written += 1;
            }
        }
        written
    }

    /// Paints the world rectangle `rect` with `color` into every stored
    /// section it overlaps. Absent sections are left absent.
    ///
    /// Returns the number of pixels covered.
    pub fn paint(&mut self, rect: Rect, color: Color) -> usize {
        let mut covered = 0;
        for (key, section) in &mut self.sections {
            let bounds = key.bounds();
            let clip = rect.intersect(bounds);
            if clip.width() <= 0.0 || clip.height() <= 0.0 {
                continue;
            }
            covered += section.paint_rect(clip - bounds.origin().to_vec2(), color);
        }
        covered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn green() -> Color {
        Color::from_rgba8(0, 200, 0, 255)
    }

    #[test]
    fn keys_floor_align() {
        assert_eq!(SectionKey::containing(Vector2::new(0.0, 0.0)), SectionKey::ORIGIN);
        assert_eq!(
            SectionKey::containing(Vector2::new(4095.9, 4096.0)),
            SectionKey::aligned(0, 4096)
        );
        let negative = SectionKey::containing(Vector2::new(-0.5, -4097.0));
        assert_eq!((negative.x(), negative.y()), (-4096, -8192));
        assert_eq!(negative.origin(), Vector2::new(-4096.0, -8192.0));
        assert_eq!(
            negative.bounds(),
            Rect::new(-4096.0, -8192.0, 0.0, -4096.0)
        );
    }

    #[test]
    fn from_origin_rejects_unaligned() {
        assert!(SectionKey::from_origin(8192, -4096).is_some());
        assert!(SectionKey::from_origin(100, 0).is_none());
        assert_eq!(
            SectionKey::ORIGIN.offset(2, -1),
            SectionKey::from_origin(8192, -4096)
        );
        assert_eq!(SectionKey::aligned(i64::MAX, 0).offset(1, 0), None);
    }

    #[test]
    fn text_form_round_trips() {
        let key = SectionKey::aligned(-5000, 12_000);
        assert_eq!(key.to_string(), "-8192,8192");
        assert_eq!("-8192,8192".parse::<SectionKey>(), Ok(key));
        assert_eq!(" 0 , 4096 ".parse::<SectionKey>(), Ok(SectionKey::aligned(0, 4096)));
        assert_eq!(
            "12,0".parse::<SectionKey>(),
            Err(ParseSectionKeyError::Unaligned { x: 12, y: 0 })
        );
        assert!(matches!(
            "4096".parse::<SectionKey>(),
            Err(ParseSectionKeyError::Malformed(_))
        ));
        assert!(matches!(
            "a,b".parse::<SectionKey>(),
            Err(ParseSectionKeyError::Malformed(_))
        ));
    }

    #[test]
    fn set_replaces_and_returns_previous() {
        let mut store = SectionStore::new();
        assert!(store.is_empty());
        assert!(store.set(SectionKey::ORIGIN, Section::transparent()).is_none());
        let old = store.set(SectionKey::ORIGIN, Section::solid(green()));
        assert_eq!(old, Some(Section::transparent()));
        assert_eq!(store.len(), 1);
        assert!(store.contains(SectionKey::ORIGIN));
        assert_eq!(
            store.section_at(Vector2::new(10.0, 4000.0)).unwrap().pixmap().solid_color(),
            Some([0, 200, 0, 255])
        );
        assert!(store.section_at(Vector2::new(-1.0, 0.0)).is_none());
        assert!(store.remove(SectionKey::ORIGIN).is_some());
        assert!(store.is_empty());
    }

    #[test]
    fn from_rgba8_requires_full_section() {
        assert!(matches!(
            Section::from_rgba8(vec![0; 16]),
            Err(SurfaceError::BufferSize { actual: 16, .. })
        ));
    }

    #[test]
    fn fill_world_clips_last_row_and_column() {
        let mut store = SectionStore::new();
        assert_eq!(store.fill_world(5000, 4096, green()), 2);

        let full = store.get(SectionKey::ORIGIN).unwrap();
        assert_eq!(full.pixmap().solid_color(), Some([0, 200, 0, 255]));

        let partial = store.get(SectionKey::aligned(4096, 0)).unwrap();
        assert_eq!(partial.pixmap().pixel(903, 10), Some([0, 200, 0, 255]));
        assert_eq!(partial.pixmap().pixel(904, 10), Some([0, 0, 0, 0]));
        assert!(!store.contains(SectionKey::aligned(0, 4096)));
    }

    #[test]
    fn paint_spans_existing_sections_only() {
        let mut store = SectionStore::new();
        store.set(SectionKey::ORIGIN, Section::transparent());
        store.set(SectionKey::aligned(4096, 0), Section::transparent());

        // 4 px wide, straddling the vertical boundary, also reaching into the
        // absent row below.
        let covered = store.paint(Rect::new(4094.0, 4094.0, 4098.0, 4098.0), green());
        assert_eq!(covered, 2 * 2 + 2 * 2);

        let left = store.get(SectionKey::ORIGIN).unwrap().pixmap();
        assert_eq!(left.pixel(4095, 4095), Some([0, 200, 0, 255]));
        assert_eq!(left.pixel(4093, 4095), Some([0, 0, 0, 0]));
        let right = store.get(SectionKey::aligned(4096, 0)).unwrap().pixmap();
        assert_eq!(right.pixel(1, 4095), Some([0, 200, 0, 255]));
        assert_eq!(right.pixel(2, 4095), Some([0, 0, 0, 0]));
        assert_eq!(store.len(), 2);
    }
}
