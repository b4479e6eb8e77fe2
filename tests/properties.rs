// Behavioural properties of the resampler and effect catalogue.

use mood_booth::{
    EffectDescriptor, EffectKind, EffectRegistry, PixelBuffer, SamplingStep, resample,
};

const CLEAR: [u8; 4] = [0, 0, 0, 0];

/// Every pixel gets a distinct color so displacement is visible.
fn gradient(w: u32, h: u32) -> PixelBuffer {
    let mut fb = PixelBuffer::new(w, h);
    for y in 0..h {
        for x in 0..w {
            fb.set_pixel(x, y, [(x * 7) as u8, (y * 13) as u8, (x + y) as u8, 255]);
        }
    }
    fb
}

fn step(n: u8) -> SamplingStep {
    SamplingStep::new(n).unwrap()
}

#[test]
fn none_is_byte_identical() {
    for (w, h) in [(1, 1), (5, 3), (32, 17)] {
        let src = gradient(w, h);
        let out = resample(&src, &EffectDescriptor::identity(), SamplingStep::DENSE, 0.0);
        assert_eq!(out.as_bytes(), src.as_bytes(), "{w}x{h}");
    }
}

#[test]
fn zero_strength_radial_effects_reproduce_input() {
    let src = gradient(24, 18);
    for kind in [EffectKind::Bulge, EffectKind::Pinch, EffectKind::Twist, EffectKind::Heart] {
        let d = kind.descriptor().with_strength(0.0);
        let out = resample(&src, &d, SamplingStep::DENSE, 0.0);
        assert_eq!(out, src, "{kind}");
    }
}

#[test]
fn zero_strength_fisheye_stays_within_a_pixel() {
    // polar round trip through atan2/cos/sin can land just below an integer
    let d = EffectKind::Fisheye.descriptor().with_strength(0.0);
    for y in 0..18 {
        for x in 0..24 {
            let (sx, sy) = d.map(x as f64, y as f64, 24, 18, 0.0);
            assert!((sx.floor() - x as f64).abs() <= 1.0, "({x},{y}) -> {sx}");
            assert!((sy.floor() - y as f64).abs() <= 1.0, "({x},{y}) -> {sy}");
        }
    }
}

#[test]
fn pinch_equals_negated_bulge() {
    let src = gradient(40, 30);
    for s in [0.1, 0.3, 0.75] {
        let pinch = EffectKind::Pinch.descriptor().with_strength(s);
        let bulge = EffectKind::Bulge.descriptor().with_strength(-s);
        assert_eq!(
            resample(&src, &pinch, SamplingStep::DENSE, 0.0),
            resample(&src, &bulge, SamplingStep::DENSE, 0.0),
        );
    }
}

#[test]
fn resampling_is_deterministic() {
    let src = gradient(33, 21);
    for kind in EffectKind::ALL {
        let d = kind.descriptor();
        let a = resample(&src, &d, SamplingStep::DENSE, 0.0);
        let b = resample(&src, &d, SamplingStep::DENSE, 0.0);
        assert_eq!(a, b, "{kind}");
    }
}

#[test]
fn source_is_never_mutated() {
    let src = gradient(16, 16);
    let before = src.clone();
    for kind in EffectKind::ALL {
        let _ = resample(&src, &kind.descriptor(), step(2), 250.0);
    }
    assert_eq!(src, before);
}

#[test]
fn step_two_blocks_replicate_their_sample() {
    // identity at step 2: each 2x2 block is one sample, disjoint from its neighbours
    let src = gradient(10, 8);
    let out = resample(&src, &EffectDescriptor::identity(), step(2), 0.0);
    for y in 0..8 {
        for x in 0..10 {
            let origin = src.get_pixel(x - x % 2, y - y % 2);
            assert_eq!(out.get_pixel(x, y), origin, "({x},{y})");
        }
    }
}

#[test]
fn strided_output_is_either_a_block_sample_or_transparent() {
    // For every pixel: either it is transparent, or it equals the warped sample
    // of the grid point owning its cell. Only the first 2x2 of a cell is written.
    for n in [2u8, 3] {
        let s = step(n);
        let (w, h) = (31, 23); // not divisible by either stride
        let src = gradient(w, h);
        let d = EffectKind::Fisheye.descriptor();
        let out = resample(&src, &d, s, 0.0);
        let stride = s.get();
        for y in 0..h {
            for x in 0..w {
                let (gx, gy) = (x - x % stride, y - y % stride);
                let (fx, fy) = d.map(gx as f64, gy as f64, w, h, 0.0);
                let (sx, sy) = (fx.floor(), fy.floor());
                let in_block = x - gx < 2 && y - gy < 2;
                let expected = if in_block
                    && sx >= 0.0
                    && sy >= 0.0
                    && sx < w as f64
                    && sy < h as f64
                {
                    src.get_pixel(sx as u32, sy as u32).unwrap()
                } else {
                    CLEAR
                };
                assert_eq!(out.get_pixel(x, y), Some(expected), "step {n} ({x},{y})");
            }
        }
    }
}

#[test]
fn uniform_field_survives_twist() {
    let red = [255, 0, 0, 255];
    let src = PixelBuffer::solid(4, 4, red);
    let d = EffectKind::Twist.descriptor().with_strength(0.04);
    let out = resample(&src, &d, SamplingStep::DENSE, 0.0);
    // Nothing but red may appear. The two top-left corner samples rotate just
    // past the top edge and are the only pixels allowed to stay transparent.
    for y in 0..4 {
        for x in 0..4 {
            let p = out.get_pixel(x, y).unwrap();
            assert!(p == red || p == CLEAR, "({x},{y}) = {p:?}");
        }
    }
    let written = out.as_bytes().chunks_exact(4).filter(|p| *p == red).count();
    assert!(written >= 14, "only {written} red pixels");
    for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
        assert_eq!(out.get_pixel(x, y), Some(red));
    }
}

#[test]
fn center_pixel_is_a_fixed_point_of_bulge() {
    let white = [255, 255, 255, 255];
    let mut src = PixelBuffer::solid(100, 100, [0, 0, 0, 255]);
    src.set_pixel(50, 50, white);
    let d = EffectKind::Bulge.descriptor().with_strength(0.3);
    let out = resample(&src, &d, SamplingStep::DENSE, 0.0);
    assert_eq!(out.get_pixel(50, 50), Some(white));
}

#[test]
fn fisheye_corner_reads_nothing_out_of_range() {
    let src = PixelBuffer::solid(10, 10, [0, 200, 0, 255]);
    let d = EffectKind::Fisheye.descriptor().with_strength(1.2);
    let out = resample(&src, &d, SamplingStep::DENSE, 0.0);
    let (sx, sy) = d.map(0.0, 0.0, 10, 10, 0.0);
    let inside = (0.0..10.0).contains(&sx.floor()) && (0.0..10.0).contains(&sy.floor());
    let corner = out.get_pixel(0, 0).unwrap();
    if inside {
        assert_eq!(corner, [0, 200, 0, 255]);
    } else {
        assert_eq!(corner[3], 0);
    }
}

#[test]
fn outward_fisheye_leaves_transparent_fringe() {
    // negative strength pulls edge pixels from outside the frame
    let src = PixelBuffer::solid(40, 40, [9, 9, 9, 255]);
    let d = EffectKind::Fisheye.descriptor().with_strength(-0.5);
    let out = resample(&src, &d, SamplingStep::DENSE, 0.0);
    assert_eq!(out.get_pixel(0, 20), Some(CLEAR));
    assert_eq!(out.get_pixel(20, 0), Some(CLEAR));
    // ...but the middle is intact
    assert_eq!(out.get_pixel(20, 20), Some([9, 9, 9, 255]));
}

#[test]
fn wave_moves_with_time() {
    let src = gradient(48, 48);
    let d = EffectRegistry.resolve("wave").unwrap();
    let t0 = resample(&src, &d, SamplingStep::DENSE, 0.0);
    let t1 = resample(&src, &d, SamplingStep::DENSE, 800.0);
    assert_ne!(t0, t1);
}
