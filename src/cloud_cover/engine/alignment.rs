//! Center alignment of a source raster and a mask raster.

use crate::cloud_cover::raster::types::Raster;

/// Integer pixel coordinate or offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub const fn translate(self, offset: Point) -> Point {
        Point::new(self.x + offset.x, self.y + offset.y)
    }
}

/// Rectangle with an inclusive `min` and exclusive `max` corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rectangle {
    pub min: Point,
    pub max: Point,
}

impl Rectangle {
    /// Rectangle anchored at the origin.
    pub const fn from_size(width: usize, height: usize) -> Self {
        Self {
            min: Point::new(0, 0),
            max: Point::new(width, height),
        }
    }

    pub const fn width(&self) -> usize {
        self.max.x - self.min.x
    }

    pub const fn height(&self) -> usize {
        self.max.y - self.min.y
    }

    pub const fn area(&self) -> usize {
        self.width() * self.height()
    }

    pub const fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Iteration geometry shared by every pixel of one traversal.
///
/// `overlap` lives in its own coordinate space; adding `source_offset` or
/// `mask_offset` to an overlap coordinate yields the matching coordinate in
/// that raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alignment {
    pub overlap: Rectangle,
    pub mask_offset: Point,
    pub source_offset: Point,
}

impl Alignment {
    pub fn resolve(source: &dyn Raster, mask: &dyn Raster) -> Self {
        let (source_w, source_h) = (source.width(), source.height());
        let (mask_w, mask_h) = (mask.width(), mask.height());

        Self {
            overlap: Rectangle::from_size(source_w.min(mask_w), source_h.min(mask_h)),
            mask_offset: Point::new(
                center_offset(mask_w, source_w),
                center_offset(mask_h, source_h),
            ),
            source_offset: Point::new(
                center_offset(source_w, mask_w),
                center_offset(source_h, mask_h),
            ),
        }
    }

    pub fn source_point(&self, p: Point) -> Point {
        p.translate(self.source_offset)
    }

    pub fn mask_point(&self, p: Point) -> Point {
        p.translate(self.mask_offset)
    }
}

/// Offset of an axis of length `this` against one of length `other`.
/// Only the strictly longer axis is shifted.
fn center_offset(this: usize, other: usize) -> usize {
    if this <= other { 0 } else { (this - other) / 2 }
}
