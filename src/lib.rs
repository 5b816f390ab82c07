//! Finds the rectangle framed by opaque black pixels in a raster image and
//! crops the image to it.
//!
//! Two strategies are available. [`Strategy::Coarse`] returns the tightest box
//! around every black pixel in the image. [`Strategy::Refined`] (the default)
//! trims that box edge by edge until each edge is an unbroken black line, so
//! stray black pixels outside a solid frame are ignored.
//!
//! ```rust,no_run
//! use bordercrop::{BorderCrop, Strategy};
//!
//! let image = bordercrop::load("image.png".as_ref())?;
//! let (rect, cropped) = BorderCrop::new(Strategy::Refined).crop(&image)?;
//! println!("cropped to {:?}", rect);
//! bordercrop::save(&cropped, "output.png".as_ref())?;
//! # Ok::<(), bordercrop::Error>(())
//! ```

mod classify;
mod config;
mod error;
#[cfg(feature = "image")]
mod image;
mod locate;
#[cfg(feature = "cli")]
pub mod logging;
#[cfg(feature = "image")]
mod pipeline;

pub use classify::is_border_pixel;
pub use config::Config;
pub use error::{exit_codes, Error, Result};
pub use locate::{BoundingBox, CoarseLocator, Locator, RefinedLocator, Strategy};
#[cfg(feature = "image")]
pub use pipeline::{load, save};

use tracing::{debug, dispatcher, info, trace, Dispatch, Level};

/// A color sample with 16-bit channels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub a: u16,
}

impl Rgba {
    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Rgba {
        Rgba { r, g, b, a }
    }

    pub const fn opaque(r: u16, g: u16, b: u16) -> Rgba {
        Rgba { r, g, b, a: u16::MAX }
    }
}

/// Half-open rectangle `[min_x, max_x) × [min_y, max_y)`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Rect {
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Rect {
        Rect { min_x, min_y, max_x, max_y }
    }

    pub fn width(&self) -> u32 {
        (self.max_x - self.min_x).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.max_y - self.min_y).max(0) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }

    /// The overlap of both rectangles; empty rectangles collapse to `Rect::default()`.
    pub fn intersect(&self, other: Rect) -> Rect {
        let r = Rect {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        };

        if r.is_empty() {
            Rect::default()
        } else {
            r
        }
    }
}

/// Read access to a rectangular grid of pixels.
///
/// `get` is only called with coordinates inside `bounds()`.
pub trait Image {
    fn bounds(&self) -> Rect;
    fn get(&self, x: i32, y: i32) -> Rgba;
}

/// Images that can extract a sub-region of themselves.
pub trait SubImage: Image {
    type Output;

    /// Extracts `rect`, which the caller keeps inside `bounds()`.
    fn sub_image(&self, rect: Rect) -> Self::Output;
}

/// Locates the border with one [`Strategy`] and crops to it.
///
/// All log output goes to the injected [`Dispatch`]; without one nothing is
/// recorded.
#[derive(Debug, Clone)]
pub struct BorderCrop {
    strategy: Strategy,
    log: Dispatch,
}

impl Default for BorderCrop {
    fn default() -> Self {
        BorderCrop::new(Strategy::default())
    }
}

impl BorderCrop {
    pub fn new(strategy: Strategy) -> BorderCrop {
        BorderCrop {
            strategy,
            log: Dispatch::none(),
        }
    }

    /// Sends every log line of this cropper to `log`.
    pub fn with_log(mut self, log: Dispatch) -> Self {
        self.log = log;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn locate(&self, image: &dyn Image) -> Result<BoundingBox> {
        dispatcher::with_default(&self.log, || self.strategy.locator().locate(image))
    }

    /// Crops `image` to the located box. The returned rectangle is in the
    /// coordinates of `image`.
    pub fn crop<I: SubImage>(&self, image: &I) -> Result<(Rect, I::Output)> {
        dispatcher::with_default(&self.log, || {
            let bbox = self.strategy.locator().locate(image)?;
            let rect = bbox.rect();

            info!(
                "cropping area top-left=({},{}) bottom-right=({},{})",
                rect.min_x, rect.min_y, rect.max_x, rect.max_y
            );
            trace_coordinates(rect);

            debug!(width = rect.width(), height = rect.height(), "extracting sub-image");
            Ok((rect, image.sub_image(rect)))
        })
    }
}

fn trace_coordinates(rect: Rect) {
    if !tracing::enabled!(Level::TRACE) {
        return;
    }

    for y in rect.min_y..rect.max_y {
        for x in rect.min_x..rect.max_x {
            trace!("coordinate inside of the border: x={} y={}", x, y);
        }
    }
}
