use geo::{Coord, Rect};
use std::fmt::Display;

use crate::crs::Crs;

/// Geographic bounding box in the `crs` it was computed in.
#[derive(Shrinkwrap, Clone, Debug, PartialEq)]
pub struct GeoBounds {
    crs: Crs,
    #[shrinkwrap(main_field)]
    rect: Rect,
}

impl GeoBounds {
    pub fn new(crs: Crs, rect: Rect) -> Self {
        Self { crs, rect }
    }

    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn left(&self) -> f64 {
        self.rect.min().x
    }

    pub fn bottom(&self) -> f64 {
        self.rect.min().y
    }

    pub fn right(&self) -> f64 {
        self.rect.max().x
    }

    pub fn top(&self) -> f64 {
        self.rect.max().y
    }

    /// (width, height) in crs units.
    pub fn shape(&self) -> Coord {
        self.rect.max() - self.rect.min()
    }
}

impl Display for GeoBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left(),
            self.bottom(),
            self.right(),
            self.top()
        )
    }
}
