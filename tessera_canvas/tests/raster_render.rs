// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering real pixels through the CPU surface.

use kurbo::Rect;
use peniko::Color;
use tessera_canvas::{MapOptions, Section, SectionKey, Vector2, Viewport};
use tessera_imaging::RasterSurface;

const SEA: [u8; 4] = [20, 60, 160, 255];
const LAND: [u8; 4] = [40, 160, 60, 255];

fn sea() -> Color {
    Color::from_rgba8(SEA[0], SEA[1], SEA[2], SEA[3])
}

fn land() -> Color {
    Color::from_rgba8(LAND[0], LAND[1], LAND[2], LAND[3])
}

fn viewport(width: u16, height: u16) -> Viewport<RasterSurface> {
    let surface = RasterSurface::new(width, height).unwrap();
    Viewport::new(surface, MapOptions::default().with_smooth(false)).unwrap()
}

#[test]
fn section_boundary_lands_on_the_right_pixels() {
    let mut viewport = viewport(64, 32);
    viewport.sections_mut().set(SectionKey::ORIGIN, Section::solid(sea()));
    viewport
        .sections_mut()
        .set(SectionKey::aligned(4096, 0), Section::solid(land()));

    // Section boundary x = 4096 sits 16 world units into the screen.
    viewport.set_position(Vector2::new(4080.0, 100.0));

    let surface = viewport.surface();
    assert_eq!(surface.pixel(15, 10), Some(SEA));
    assert_eq!(surface.pixel(16, 10), Some(LAND));
    assert_eq!(surface.pixel(63, 31), Some(LAND));

    // At 200% the boundary moves to 32 screen pixels from the left anchor.
    viewport.zoom_in(Vector2::ZERO);
    let surface = viewport.surface();
    assert_eq!(surface.pixel(31, 0), Some(SEA));
    assert_eq!(surface.pixel(32, 0), Some(LAND));
}

#[test]
fn missing_sections_leave_cleared_pixels() {
    let mut viewport = viewport(16, 16);
    viewport.sections_mut().set(SectionKey::ORIGIN, Section::solid(sea()));
    viewport.render();
    assert_eq!(viewport.surface().pixel(0, 0), Some(SEA));

    // Pan into the empty section on the left: the previous frame is cleared.
    viewport.set_position(Vector2::new(-100.0, 0.0));
    assert_eq!(viewport.surface().pixel(0, 0), Some([0, 0, 0, 0]));
}

#[test]
fn localized_paint_shows_after_render() {
    let mut viewport = viewport(32, 32);
    viewport.sections_mut().set(SectionKey::ORIGIN, Section::solid(sea()));
    viewport.render();

    let covered = viewport
        .sections_mut()
        .paint(Rect::new(8.0, 8.0, 12.0, 12.0), land());
    assert_eq!(covered, 16);
    // Not visible until the next render.
    assert_eq!(viewport.surface().pixel(9, 9), Some(SEA));

    viewport.render();
    assert_eq!(viewport.surface().pixel(9, 9), Some(LAND));
    assert_eq!(viewport.surface().pixel(12, 12), Some(SEA));
}

#[test]
fn resize_reallocates_and_redraws() {
    let mut viewport = viewport(8, 8);
    viewport.sections_mut().set(SectionKey::ORIGIN, Section::solid(sea()));
    assert_eq!(viewport.set_size(Vector2::new(19.6, 10.4)), Ok(true));
    assert_eq!(viewport.size(), Vector2::new(20.0, 10.0));

    let surface = viewport.surface();
    assert_eq!(surface.data().len(), 20 * 10 * 4);
    assert_eq!(surface.pixel(19, 9), Some(SEA));
}
