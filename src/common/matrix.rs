use super::{QRError, QRResult, MIN_MODULE_COUNT};

/// Square grid of modules produced by a QR encoder, `true` being dark.
/// Stored row-major; immutable once validated.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ModuleMatrix {
    grid: Box<[bool]>,
    w: usize,
}

impl ModuleMatrix {
    pub fn from_rows(rows: Vec<Vec<bool>>) -> QRResult<Self> {
        let w = rows.len();
        Self::check_width(w)?;
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != w) {
            return Err(QRError::NonSquareMatrix { row, len: r.len(), width: w });
        }
        let grid = rows.into_iter().flatten().collect();
        Ok(Self { grid, w })
    }

    pub fn from_flat(w: usize, modules: Vec<bool>) -> QRResult<Self> {
        Self::check_width(w)?;
        if modules.len() != w * w {
            return Err(QRError::ModuleCountMismatch { len: modules.len(), width: w });
        }
        Ok(Self { grid: modules.into_boxed_slice(), w })
    }

    fn check_width(w: usize) -> QRResult<()> {
        match w {
            0 => Err(QRError::EmptyMatrix),
            w if w < MIN_MODULE_COUNT => Err(QRError::MatrixTooSmall(w)),
            _ => Ok(()),
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn get(&self, r: usize, c: usize) -> bool {
        debug_assert!(r < self.w && c < self.w, "Module out of bounds: {r} {c}");
        self.grid[r * self.w + c]
    }

    /// Coordinates of every dark module in row-major order.
    pub fn dark_modules(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let w = self.w;
        self.grid.iter().enumerate().filter(|&(_, &m)| m).map(move |(i, _)| (i / w, i % w))
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&&m| m).count()
    }

    /// Pixel edge of one module on a square surface of `surface_sz` pixels.
    pub fn module_size(&self, surface_sz: u32) -> f64 {
        surface_sz as f64 / self.w as f64
    }

    pub fn to_debug_str(&self) -> String {
        let mut res = String::with_capacity(self.w * (self.w + 1) + 1);
        res.push('\n');
        for r in 0..self.w {
            for c in 0..self.w {
                res.push(if self.get(r, c) { '█' } else { '.' });
            }
            res.push('\n');
        }
        res
    }
}

impl TryFrom<Vec<Vec<bool>>> for ModuleMatrix {
    type Error = QRError;

    fn try_from(rows: Vec<Vec<bool>>) -> QRResult<Self> {
        Self::from_rows(rows)
    }
}
