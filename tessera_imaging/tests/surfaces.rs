// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording and raster surfaces agree on where an image lands.

use kurbo::{Affine, Point, Rect, Size};
use peniko::{Color, ImageQuality};
use tessera_imaging::{Pixmap, RasterSurface, RecordingSurface, Surface, SurfaceOp};

fn paint(surface: &mut dyn Surface, tile: &Pixmap, transform: Affine) {
    let size = surface.size();
    surface.clear(size.to_rect());
    surface.draw_image(tile, transform, ImageQuality::Low);
    surface.present();
}

#[test]
fn recorded_dest_matches_rasterized_coverage() {
    let mut tile = Pixmap::transparent(4, 4);
    tile.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::from_rgba8(10, 20, 30, 255));
    let transform = Affine::translate((3.0, 2.0)) * Affine::scale(2.5);

    let mut recording = RecordingSurface::new(Size::new(32.0, 32.0));
    let mut raster = RasterSurface::new(32, 32).unwrap();
    paint(&mut recording, &tile, transform);
    paint(&mut raster, &tile, transform);

    let dest = recording.draw_rects().next().unwrap();
    assert_eq!(dest, Rect::new(3.0, 2.0, 13.0, 12.0));
    for y in 0..32 {
        for x in 0..32 {
            let inside = dest.contains(Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5));
            let painted = raster.pixel(x, y).unwrap()[3] != 0;
            assert_eq!(inside, painted, "pixel ({x}, {y})");
        }
    }
}

#[test]
fn later_draws_composite_over_earlier_ones() {
    let mut surface = RasterSurface::new(4, 1).unwrap();
    let base = Pixmap::solid(4, 1, Color::from_rgba8(0, 0, 255, 255));
    let overlay = Pixmap::solid(2, 1, Color::from_rgba8(255, 0, 0, 255));

    surface.draw_image(&base, Affine::IDENTITY, ImageQuality::Medium);
    surface.draw_image(&overlay, Affine::translate((2.0, 0.0)), ImageQuality::Medium);
    surface.present();

    assert_eq!(surface.pixel(1, 0), Some([0, 0, 255, 255]));
    assert_eq!(surface.pixel(2, 0), Some([255, 0, 0, 255]));
    assert_eq!(surface.pixel(3, 0), Some([255, 0, 0, 255]));

    let copy = surface.to_pixmap().unwrap();
    assert_eq!(copy.to_rgba8(), surface.data());
}

#[test]
fn resize_is_recorded_and_validated() {
    let mut surface = RecordingSurface::default();
    surface.resize(Size::new(640.0, 480.0)).unwrap();
    assert!(surface.resize(Size::new(f64::INFINITY, 1.0)).is_err());
    assert_eq!(surface.ops(), &[SurfaceOp::Resize(Size::new(640.0, 480.0))]);
}

#[test]
fn oversized_surfaces_are_rejected() {
    let mut surface = RasterSurface::new(2, 2).unwrap();
    assert!(surface.resize(Size::new(70_000.0, 10.0)).is_err());
    assert_eq!(surface.size(), Size::new(2.0, 2.0));
}

#[test]
fn painted_pixmap_is_sampled_as_an_image() {
    let mut tile = Pixmap::solid(2, 2, Color::from_rgba8(0, 0, 255, 255));
    tile.fill_rect(Rect::new(1.0, 0.0, 2.0, 2.0), Color::from_rgba8(255, 0, 0, 255));
    assert!(tile.image_data().is_some());

    let mut surface = RasterSurface::new(4, 4).unwrap();
    surface.draw_image(&tile, Affine::scale(2.0), ImageQuality::Low);
    surface.present();

    assert_eq!(surface.pixel(1, 3), Some([0, 0, 255, 255]));
    assert_eq!(surface.pixel(2, 0), Some([255, 0, 0, 255]));
}
