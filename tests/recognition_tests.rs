//! End-to-end recognition tests
//!
//! Codes are rendered with the crate's own bar renderer, degraded with
//! seeded noise, shading, blur and shear, and recognized again. A separate
//! check runs pure-noise rasters to make sure nothing is ever decoded from
//! them.

use image::{GrayImage, Luma};
use itf_barcode::tools::render_bars;
use itf_barcode::{Bar, BarSequence, Code, Recognizer, RecognizerConfig, Thickness, recognize_batch};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn code(digits: &str) -> Code {
    digits.parse().expect("digits")
}

/// Bars printed by the legacy generator, with thin and thick swapped
fn inverted_bars(code: &Code) -> BarSequence {
    code.bars()
        .iter()
        .map(|bar| {
            let thickness = if bar.is_thick() {
                Thickness::Thin
            } else {
                Thickness::Thick
            };
            Bar::new(thickness, bar.color())
        })
        .collect()
}

fn add_noise(image: &mut GrayImage, amplitude: i32, rng: &mut ChaCha8Rng) {
    for pixel in image.pixels_mut() {
        let v = pixel[0] as i32 + rng.random_range(-amplitude..=amplitude);
        pixel[0] = v.clamp(0, 255) as u8;
    }
}

/// Uneven illumination: darken linearly from left to right
fn add_shading(image: &mut GrayImage, max_darkening: f32) {
    let width = image.width() as f32;
    for (x, _, pixel) in image.enumerate_pixels_mut() {
        let factor = 1.0 - max_darkening * x as f32 / width;
        pixel[0] = (pixel[0] as f32 * factor) as u8;
    }
}

/// Shift every row right by `slope * y` pixels, approximating a slight rotation
fn shear(image: &GrayImage, slope: f32) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut out = GrayImage::from_pixel(width, height, Luma([255]));
    for y in 0..height {
        let shift = (slope * y as f32).round() as i64;
        for x in 0..width {
            let src = x as i64 - shift;
            if (0..width as i64).contains(&src) {
                out.put_pixel(x, y, *image.get_pixel(src as u32, y));
            }
        }
    }
    out
}

#[test]
fn test_noise_free_round_trip_in_one_iteration() {
    for (i, digits) in ["00", "12", "5050", "24681357", "0123456789", "99887766554433"]
        .iter()
        .enumerate()
    {
        let expected = code(digits);
        let image = render_bars(&expected.bars(), 2, 32);
        let recognizer = Recognizer::new(&image).expect("raster");
        let mut rng = ChaCha8Rng::seed_from_u64(i as u64);
        assert_eq!(recognizer.recognize_with_rng(1, 1, &mut rng), expected, "{digits}");
    }
}

#[test]
fn test_checksummed_code_round_trip() {
    let mut expected = code("20100917");
    expected.add_mod10_check_sum();
    assert_eq!(expected.size() % 2, 0);

    let image = render_bars(&expected.bars(), 3, 40);
    let recognizer = Recognizer::new(&image).expect("raster");
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let found = recognizer.recognize_with_rng(4, 64, &mut rng);
    assert_eq!(found, expected);
    assert_eq!(found.mod10_check_sum(), 0);
}

#[test]
fn test_legacy_inverted_print() {
    let expected = code("73501246");
    let image = render_bars(&inverted_bars(&expected), 2, 32);
    let recognizer = Recognizer::new(&image).expect("raster");
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    assert_eq!(recognizer.recognize_with_rng(4, 64, &mut rng), expected);
}

#[test]
fn test_noisy_shaded_scan() {
    let expected = code("4006381333");
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut image = render_bars(&expected.bars(), 3, 48);
    add_shading(&mut image, 0.3);
    add_noise(&mut image, 60, &mut rng);

    let recognizer = Recognizer::new(&image).expect("raster");
    assert_eq!(recognizer.recognize_with_rng(16, 256, &mut rng), expected);
}

#[test]
fn test_blurred_sheared_scan() {
    let expected = code("31337420");
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let image = render_bars(&expected.bars(), 4, 40);
    let image = image::imageops::blur(&image, 1.0);
    let mut image = shear(&image, 0.05);
    add_noise(&mut image, 30, &mut rng);

    let recognizer = Recognizer::new(&image).expect("raster");
    assert_eq!(recognizer.recognize_with_rng(16, 256, &mut rng), expected);
}

fn noise_raster(width: u32, height: u32, rng: &mut ChaCha8Rng) -> GrayImage {
    let mut image = GrayImage::new(width, height);
    for pixel in image.pixels_mut() {
        pixel[0] = rng.random();
    }
    image
}

#[test]
fn test_noise_never_decodes() {
    for seed in 0..120u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let width = rng.random_range(20..400);
        let height = rng.random_range(12..60);
        let image = noise_raster(width, height, &mut rng);
        let recognizer = Recognizer::new(&image).expect("raster");
        let found = recognizer.recognize_with_rng(4, 16, &mut rng);
        assert!(found.is_empty(), "seed {seed} {width}x{height} decoded {found}");
    }
}

#[test]
fn test_noise_on_short_rasters_rarely_decodes() {
    let mut false_positives = 0;
    for seed in 1000..1100u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let width = rng.random_range(20..400);
        let height = rng.random_range(5..=8);
        let image = noise_raster(width, height, &mut rng);
        let recognizer = Recognizer::new(&image).expect("raster");
        if !recognizer.recognize_with_rng(4, 16, &mut rng).is_empty() {
            false_positives += 1;
        }
    }
    assert!(false_positives <= 5, "{false_positives} of 100 short noise rasters decoded");
}

#[test]
fn test_batch_matches_sequential_seeds() {
    let codes: Vec<Code> = ["1029", "384756", "55"].iter().map(|d| code(d)).collect();
    let images: Vec<GrayImage> = codes
        .iter()
        .map(|c| render_bars(&c.bars(), 2, 24))
        .collect();

    let config = RecognizerConfig::new(2, 32);
    let results = recognize_batch(&images, &config, 500);
    for (i, (result, image)) in results.iter().zip(&images).enumerate() {
        let mut rng = ChaCha8Rng::seed_from_u64(500 + i as u64);
        let sequential = Recognizer::new(image)
            .expect("raster")
            .recognize_with_rng(config.min_iterations, config.max_iterations, &mut rng);
        assert_eq!(result.as_ref().expect("batch result"), &sequential);
        assert_eq!(&sequential, &codes[i]);
    }
}
