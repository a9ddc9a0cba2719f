// Finder pattern geometry
//------------------------------------------------------------------------------

/// Width of a finder pattern in modules.
pub const FINDER_SIZE: usize = 7;
/// Separator plus format-info strip left clear next to a finder pattern.
pub const FINDER_CLEAR_MARGIN: usize = 2;
/// Modules excluded from generic rendering on the sides facing the symbol interior.
pub const FINDER_EXCLUSION: usize = FINDER_SIZE + FINDER_CLEAR_MARGIN;
/// Modules excluded on the side touching the far edge: pattern plus separator.
pub const FINDER_FAR_EXCLUSION: usize = FINDER_SIZE + 1;
/// Smallest symbol width, version 1.
pub const MIN_MODULE_COUNT: usize = 21;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FinderRegion {
    TopLeft,
    TopRight,
    BottomLeft,
}

impl FinderRegion {
    pub const ALL: [FinderRegion; 3] =
        [FinderRegion::TopLeft, FinderRegion::TopRight, FinderRegion::BottomLeft];

    /// `(row, col)` of the pattern's top-left module. Counts narrower than a
    /// pattern collapse onto the top-left corner.
    pub fn origin(&self, module_count: usize) -> (usize, usize) {
        let far = module_count.saturating_sub(FINDER_SIZE);
        match self {
            Self::TopLeft => (0, 0),
            Self::TopRight => (0, far),
            Self::BottomLeft => (far, 0),
        }
    }

    pub fn contains(&self, r: usize, c: usize, module_count: usize) -> bool {
        let far = module_count.saturating_sub(FINDER_FAR_EXCLUSION);
        match self {
            Self::TopLeft => r < FINDER_EXCLUSION && c < FINDER_EXCLUSION,
            Self::TopRight => r < FINDER_EXCLUSION && c >= far,
            Self::BottomLeft => r >= far && c < FINDER_EXCLUSION,
        }
    }
}

/// True when the module belongs to one of the three finder blocks. There is no
/// bottom-right block.
pub fn is_finder_region(r: usize, c: usize, module_count: usize) -> bool {
    FinderRegion::ALL.iter().any(|f| f.contains(r, c, module_count))
}


// Shapes
//------------------------------------------------------------------------------

/// A filled primitive in pixel space. Coordinates are `f64` so fractional
/// module sizes carry through unchanged.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Shape {
    Rect { x: f64, y: f64, w: f64, h: f64 },
    Disc { cx: f64, cy: f64, r: f64 },
    RoundRect { x: f64, y: f64, w: f64, h: f64, r: f64 },
}

impl Shape {
    pub fn rect(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::Rect { x, y, w, h }
    }

    pub fn disc(cx: f64, cy: f64, r: f64) -> Self {
        Self::Disc { cx, cy, r }
    }

    /// Corner radius is clamped to half the shorter side.
    pub fn round_rect(x: f64, y: f64, w: f64, h: f64, r: f64) -> Self {
        Self::RoundRect { x, y, w, h, r: r.clamp(0.0, w.min(h) / 2.0) }
    }

    /// `(x0, y0, x1, y1)` bounding box.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        match *self {
            Self::Rect { x, y, w, h } | Self::RoundRect { x, y, w, h, .. } => (x, y, x + w, y + h),
            Self::Disc { cx, cy, r } => (cx - r, cy - r, cx + r, cy + r),
        }
    }

    /// Point test with half-open edges, so adjoining shapes never share a pixel.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        match *self {
            Self::Rect { x, y, w, h } => px >= x && px < x + w && py >= y && py < y + h,
            Self::Disc { cx, cy, r } => {
                let (dx, dy) = (px - cx, py - cy);
                dx * dx + dy * dy < r * r
            }
            Self::RoundRect { x, y, w, h, r } => {
                if !(px >= x && px < x + w && py >= y && py < y + h) {
                    return false;
                }
                // Distance to the nearest corner arc center, zero along the straight edges
                let dx = (x + r - px).max(px - (x + w - r)).max(0.0);
                let dy = (y + r - py).max(py - (y + h - r)).max(0.0);
                dx * dx + dy * dy <= r * r
            }
        }
    }
}

/// Receiver of filled geometry. Implemented by the raster painter and the SVG
/// writer so both outputs share one description of the symbol.
pub trait ShapeSink {
    fn fill(&mut self, shape: &Shape);

    /// Fills `outer` minus `inner` (even-odd).
    fn fill_frame(&mut self, outer: &Shape, inner: &Shape);
}
