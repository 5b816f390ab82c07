use bordercrop::{BorderCrop, BoundingBox, Error, Image, Rect, Rgba, Strategy};

use proptest::prelude::*;
use proptest::strategy::Strategy as PropStrategy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const WHITE: Rgba = Rgba::opaque(u16::MAX, u16::MAX, u16::MAX);
const BLACK: Rgba = Rgba::opaque(0, 0, 0);

#[derive(Debug, Clone)]
struct TestImage {
    w: i32,
    h: i32,
    pixels: Vec<Rgba>,
}

impl TestImage {
    fn new_from_fn<G>(w: i32, h: i32, generate: G) -> TestImage
        where G: Fn(i32, i32) -> Rgba {
        let mut pixels = Vec::with_capacity((w * h) as usize);

        for y in 0..h {
            for x in 0..w {
                pixels.push(generate(x, y));
            }
        }

        TestImage { w, h, pixels }
    }

    fn set(&mut self, x: i32, y: i32, color: Rgba) {
        self.pixels[(y * self.w + x) as usize] = color
    }
}

impl Image for TestImage {
    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.w, self.h)
    }

    fn get(&self, x: i32, y: i32) -> Rgba {
        self.pixels[(y * self.w + x) as usize]
    }
}

fn on_frame(frame: BoundingBox, x: i32, y: i32) -> bool {
    let in_x = x >= frame.min_x && x <= frame.max_x;
    let in_y = y >= frame.min_y && y <= frame.max_y;

    (in_y && (x == frame.min_x || x == frame.max_x)) || (in_x && (y == frame.min_y || y == frame.max_y))
}

fn framed(w: i32, h: i32, frame: BoundingBox) -> TestImage {
    TestImage::new_from_fn(w, h, |x, y| if on_frame(frame, x, y) { BLACK } else { WHITE })
}

/// Image size and a frame with at least 3 free columns and rows on the top
/// left and 2 on the bottom right.
fn frame_geometry() -> impl PropStrategy<Value = (i32, i32, BoundingBox)> {
    (10i32..48, 10i32..48)
        .prop_flat_map(|(w, h)| (Just(w), Just(h), 3..w - 5, 3..h - 5))
        .prop_flat_map(|(w, h, x0, y0)| (Just(w), Just(h), Just(x0), Just(y0), x0 + 1..w - 2, y0 + 1..h - 2))
        .prop_map(|(w, h, x0, y0, x1, y1)| (w, h, BoundingBox::new(x0, y0, x1, y1)))
}

/// A pixel at least one white pixel away from the frame, on one of its four sides.
fn stray_position(w: i32, h: i32, frame: BoundingBox, side: u8, a: u16, b: u16) -> (i32, i32) {
    let pick = |lo: i32, hi: i32, v: u16| lo + (v as i32) % (hi - lo);

    match side % 4 {
        0 => (pick(0, frame.min_x - 1, a), pick(0, h, b)),
        1 => (pick(0, w, a), pick(0, frame.min_y - 1, b)),
        2 => (pick(frame.max_x + 2, w, a), pick(0, h, b)),
        _ => (pick(0, w, a), pick(frame.max_y + 2, h, b)),
    }
}

proptest! {
    #[test]
    fn frame_is_found_by_both_strategies((w, h, frame) in frame_geometry()) {
        let image = framed(w, h, frame);

        prop_assert_eq!(BorderCrop::new(Strategy::Coarse).locate(&image).unwrap(), frame);
        prop_assert_eq!(BorderCrop::new(Strategy::Refined).locate(&image).unwrap(), frame);
    }

    #[test]
    fn stray_pixel_widens_coarse_box_but_not_refined_box(
        (w, h, frame) in frame_geometry(),
        side in any::<u8>(),
        a in any::<u16>(),
        b in any::<u16>(),
    ) {
        let (sx, sy) = stray_position(w, h, frame, side, a, b);
        let mut image = framed(w, h, frame);
        image.set(sx, sy, BLACK);

        let coarse = BorderCrop::new(Strategy::Coarse).locate(&image).unwrap();
        prop_assert!(coarse.rect().contains(sx, sy));
        prop_assert!(coarse.min_x <= frame.min_x && coarse.max_x >= frame.max_x);
        prop_assert!(coarse.min_y <= frame.min_y && coarse.max_y >= frame.max_y);

        let refined = BorderCrop::new(Strategy::Refined).locate(&image).unwrap();
        prop_assert_eq!(refined, frame);
    }

    #[test]
    fn located_box_is_within_the_image_boundaries(
        w in 1i32..24,
        h in 1i32..24,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let image = TestImage::new_from_fn(w, h, |_, _| WHITE);
        let image = (0..w * h).fold(image, |mut image, i| {
            if rng.gen_bool(0.1) {
                image.set(i % w, i / w, BLACK);
            }
            image
        });
        let any_black = image.pixels.iter().any(|&p| p == BLACK);

        for strategy in [Strategy::Coarse, Strategy::Refined] {
            match BorderCrop::new(strategy).locate(&image) {
                Ok(bbox) => {
                    let rect = bbox.rect();
                    prop_assert!(any_black);
                    prop_assert!(bbox.min_x <= bbox.max_x && bbox.min_y <= bbox.max_y);
                    prop_assert_eq!(rect.intersect(image.bounds()), rect);
                }
                Err(Error::NoBorderFound(_)) => prop_assert!(!any_black),
                Err(e) => prop_assert!(false, "unexpected error {}", e),
            }
        }
    }
}

#[test]
fn noisy_scan_with_frame_and_speckles() {
    let (w, h) = (120, 90);
    let frame = BoundingBox::new(10, 8, 109, 81);
    let mut rng = StdRng::seed_from_u64(7);

    let mut image = framed(w, h, frame);
    for y in frame.min_y + 2..frame.max_y - 1 {
        for x in frame.min_x + 2..frame.max_x - 1 {
            let level: u16 = rng.gen_range(0..=u16::MAX);
            image.set(x, y, Rgba::opaque(level, level, level));
        }
    }
    for _ in 0..12 {
        let x = rng.gen_range(0..frame.min_x - 1);
        let y = rng.gen_range(0..frame.min_y - 1);
        image.set(x, y, BLACK);
    }

    let coarse = BorderCrop::new(Strategy::Coarse).locate(&image).unwrap();
    assert!(coarse.min_x < frame.min_x);
    assert!(coarse.min_y < frame.min_y);

    assert_eq!(BorderCrop::new(Strategy::Refined).locate(&image).unwrap(), frame);
}

#[test]
fn striped_image_is_refined_in_linear_time() {
    let (w, h) = (800, 800);
    let image = TestImage::new_from_fn(w, h, |_, y| if y % 2 == 0 { BLACK } else { WHITE });

    let started = std::time::Instant::now();
    let refined = BorderCrop::new(Strategy::Refined).locate(&image).unwrap();
    let elapsed = started.elapsed();

    assert_eq!(refined, BoundingBox::new(0, 0, w - 1, h - 2));
    assert!(elapsed < std::time::Duration::from_secs(5), "refining took {:?}", elapsed);
}
