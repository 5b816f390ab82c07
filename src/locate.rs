use crate::{is_border_pixel, Error, Image, Rect, Result};

use tracing::{debug, warn};

/// Inclusive extents of border pixels, as found by scanning.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> BoundingBox {
        BoundingBox { min_x, min_y, max_x, max_y }
    }

    /// The half-open crop rectangle, `max + 1` on both axes.
    pub fn rect(&self) -> Rect {
        Rect::new(self.min_x, self.min_y, self.max_x + 1, self.max_y + 1)
    }

    pub fn width(&self) -> u32 {
        (self.max_x - self.min_x + 1) as u32
    }

    pub fn height(&self) -> u32 {
        (self.max_y - self.min_y + 1) as u32
    }

    fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }
}

pub trait Locator {
    fn locate(&self, image: &dyn Image) -> Result<BoundingBox>;
}

/// Selects which of the two locators is used.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Tightest box around every border pixel.
    Coarse,
    /// Innermost box whose edges are unbroken border lines.
    #[default]
    Refined,
}

impl Strategy {
    pub fn locator(self) -> &'static dyn Locator {
        match self {
            Strategy::Coarse => &CoarseLocator,
            Strategy::Refined => &RefinedLocator,
        }
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub struct CoarseLocator;

impl Locator for CoarseLocator {
    fn locate(&self, image: &dyn Image) -> Result<BoundingBox> {
        let bounds = image.bounds();
        if bounds.is_empty() {
            return Err(Error::ZeroSizedImage);
        }

        debug!(?bounds, "scanning image for border pixels");

        let mut min_x = bounds.max_x;
        let mut min_y = bounds.max_y;
        let mut max_x = bounds.min_x;
        let mut max_y = bounds.min_y;
        let mut found: u64 = 0;

        for y in bounds.min_y..bounds.max_y {
            for x in bounds.min_x..bounds.max_x {
                if is_border_pixel(image.get(x, y)) {
                    min_x = min_x.min(x);
                    max_x = max_x.max(x);
                    min_y = min_y.min(y);
                    max_y = max_y.max(y);
                    found += 1;
                }
            }
        }

        if found == 0 {
            return Err(Error::NoBorderFound(bounds));
        }

        let bbox = BoundingBox::new(min_x, min_y, max_x, max_y);
        debug!(found, ?bbox, "coarse box");
        Ok(bbox)
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub struct RefinedLocator;

impl Locator for RefinedLocator {
    fn locate(&self, image: &dyn Image) -> Result<BoundingBox> {
        let coarse = CoarseLocator.locate(image)?;
        let scanned = trim_edges(image, coarse);

        if is_frame_of(image, &scanned, &coarse) {
            debug!(bbox = ?scanned, "refined box");
            return Ok(scanned);
        }

        match largest_frame(image, &coarse) {
            Some(frame) => {
                debug!(bbox = ?frame, "refined box from closed frame search");
                Ok(frame)
            }
            None => {
                warn!(bbox = ?scanned, "no closed border frame found, keeping edge-scanned box");
                Ok(scanned)
            }
        }
    }
}

/// Moves each edge inward to the first full border line, rows first. Every
/// scan uses the bounds already updated by the previous ones; an edge without
/// a full line stays where it is.
fn trim_edges(image: &dyn Image, coarse: BoundingBox) -> BoundingBox {
    let mut b = coarse;

    let (x0, x1) = (b.min_x, b.max_x);
    match (b.min_y..=b.max_y).find(|&y| is_border_row(image, y, x0, x1)) {
        Some(y) => b.min_y = y,
        None => debug!("no full border row from the top"),
    }
    match (b.min_y..=b.max_y).rev().find(|&y| is_border_row(image, y, x0, x1)) {
        Some(y) => b.max_y = y,
        None => debug!("no full border row from the bottom"),
    }

    let (y0, y1) = (b.min_y, b.max_y);
    match (b.min_x..=b.max_x).find(|&x| is_border_column(image, x, y0, y1)) {
        Some(x) => b.min_x = x,
        None => debug!("no full border column from the left"),
    }
    match (b.min_x..=b.max_x).rev().find(|&x| is_border_column(image, x, y0, y1)) {
        Some(x) => b.max_x = x,
        None => debug!("no full border column from the right"),
    }

    b
}

/// Border run lengths starting at each pixel of a box, to the right and downwards.
struct RunTable {
    origin_x: i32,
    origin_y: i32,
    width: usize,
    right: Vec<u32>,
    down: Vec<u32>,
}

impl RunTable {
    fn new(image: &dyn Image, within: &BoundingBox) -> RunTable {
        let width = within.width() as usize;
        let height = within.height() as usize;
        let mut right = vec![0u32; width * height];
        let mut down = vec![0u32; width * height];

        for row in (0..height).rev() {
            for col in (0..width).rev() {
                let x = within.min_x + col as i32;
                let y = within.min_y + row as i32;
                if !is_border_pixel(image.get(x, y)) {
                    continue;
                }

                let i = row * width + col;
                right[i] = 1 + if col + 1 < width { right[i + 1] } else { 0 };
                down[i] = 1 + if row + 1 < height { down[i + width] } else { 0 };
            }
        }

        RunTable {
            origin_x: within.min_x,
            origin_y: within.min_y,
            width,
            right,
            down,
        }
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y - self.origin_y) as usize * self.width + (x - self.origin_x) as usize
    }

    fn right(&self, x: i32, y: i32) -> u32 {
        self.right[self.index(x, y)]
    }

    fn down(&self, x: i32, y: i32) -> u32 {
        self.down[self.index(x, y)]
    }
}

/// Searches `within` for the largest box of at least 2×2 whose four edges are
/// full border lines. Corners are the outermost pixels of a horizontal run
/// that continue downwards, so pixels touching the ends of a frame's top row
/// do not hide it.
fn largest_frame(image: &dyn Image, within: &BoundingBox) -> Option<BoundingBox> {
    let runs = RunTable::new(image, within);
    let mut best: Option<BoundingBox> = None;

    for top in within.min_y..within.max_y {
        let mut x = within.min_x;
        while x <= within.max_x {
            let len = runs.right(x, top) as i32;
            if len == 0 {
                x += 1;
                continue;
            }

            let end = x + len - 1;
            let start = x;
            x = end + 1;

            let left = match (start..=end).find(|&c| runs.down(c, top) > 1) {
                Some(c) => c,
                None => continue,
            };
            let right = match (left + 1..=end).rev().find(|&c| runs.down(c, top) > 1) {
                Some(c) => c,
                None => continue,
            };

            let depth = runs.down(left, top).min(runs.down(right, top)) as i32;
            let span = (right - left + 1) as u32;

            for bottom in (top + 1..top + depth).rev() {
                let candidate = BoundingBox::new(left, top, right, bottom);
                if best.map_or(false, |b| b.area() >= candidate.area()) {
                    break;
                }
                if runs.right(left, bottom) >= span {
                    best = Some(candidate);
                    break;
                }
            }
        }
    }

    best
}

/// A closed box, not collapsed to a single line unless the coarse box is one.
fn is_frame_of(image: &dyn Image, scanned: &BoundingBox, coarse: &BoundingBox) -> bool {
    let collapsed = (scanned.height() == 1 && coarse.height() > 1)
        || (scanned.width() == 1 && coarse.width() > 1);

    !collapsed && is_closed(image, scanned)
}

fn is_closed(image: &dyn Image, b: &BoundingBox) -> bool {
    is_border_row(image, b.min_y, b.min_x, b.max_x)
        && is_border_row(image, b.max_y, b.min_x, b.max_x)
        && is_border_column(image, b.min_x, b.min_y, b.max_y)
        && is_border_column(image, b.max_x, b.min_y, b.max_y)
}

fn is_border_row(image: &dyn Image, y: i32, x0: i32, x1: i32) -> bool {
    (x0..=x1).all(|x| is_border_pixel(image.get(x, y)))
}

fn is_border_column(image: &dyn Image, x: i32, y0: i32, y1: i32) -> bool {
    (y0..=y1).all(|y| is_border_pixel(image.get(x, y)))
}
