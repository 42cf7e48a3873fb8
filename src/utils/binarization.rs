//! One-dimensional binarization primitives
//!
//! All binary outputs use `0` for the low cluster (dark pixels, thin bars)
//! and `1` for the high cluster (light pixels, thick bars).

/// Upper bound on k-means refinement rounds
const MAX_KMEANS_ROUNDS: usize = 256;

/// Count occurrences of every value in `0..=max_value`
///
/// The histogram grows if a value exceeds `max_value`.
pub fn build_histogram<T: Copy + Into<usize>>(values: &[T], max_value: usize) -> Vec<u32> {
    let top = values
        .iter()
        .map(|&v| v.into())
        .max()
        .unwrap_or(0)
        .max(max_value);
    let mut histogram = vec![0u32; top + 1];
    for &value in values {
        histogram[value.into()] += 1;
    }
    histogram
}

/// Smallest value whose cumulative count reaches `n`
///
/// Returns the largest bucket index if the histogram holds fewer than `n`
/// values.
pub fn nth_element(histogram: &[u32], n: usize) -> usize {
    let mut sum = 0usize;
    for (value, &count) in histogram.iter().enumerate() {
        sum += count as usize;
        if sum >= n {
            return value;
        }
    }
    histogram.len().saturating_sub(1)
}

/// Two-cluster k-means binarization with initial centers `a <= b`
///
/// Each round assigns every value to the nearer center (ties go to `b`) and
/// moves each center to the mean of its members. An empty cluster keeps its
/// center. Refinement stops once both centers move by less than one.
pub fn kmeans_binarize<T: Copy + Into<usize>>(values: &[T], a: f64, b: f64) -> Vec<u8> {
    debug_assert!(a <= b);
    let (mut a, mut b) = (a, b);

    for _ in 0..MAX_KMEANS_ROUNDS {
        let (mut a_sum, mut a_count, mut b_sum, mut b_count) = (0.0f64, 0usize, 0.0f64, 0usize);
        for &value in values {
            let v = value.into() as f64;
            if b - v <= v - a {
                b_sum += v;
                b_count += 1;
            } else {
                a_sum += v;
                a_count += 1;
            }
        }
        let a_new = if a_count != 0 { a_sum / a_count as f64 } else { a };
        let b_new = if b_count != 0 { b_sum / b_count as f64 } else { b };

        let settled = (a - a_new).abs() < 1.0 && (b - b_new).abs() < 1.0;
        a = a_new;
        b = b_new;
        if settled {
            break;
        }
    }

    values
        .iter()
        .map(|&value| {
            let v = value.into() as f64;
            u8::from(b - v <= v - a)
        })
        .collect()
}

/// K-means binarization seeded around an order statistic
///
/// The initial centers sit one unit either side of the `floor(len * k)`-th
/// smallest value. `k = 0.5` suits intensities, `k = 0.6` suits ITF bar widths
/// where three of every five bars are thin.
pub fn kth_binarize<T: Copy + Into<usize>>(values: &[T], k: f32, max_value: usize) -> Vec<u8> {
    debug_assert!((0.0..=1.0).contains(&k));

    let histogram = build_histogram(values, max_value);
    let kth = nth_element(&histogram, (values.len() as f32 * k) as usize) as f64;
    kmeans_binarize(values, kth - 1.0, kth + 1.0)
}

/// K-means binarization of 8-bit intensities seeded at the median
pub fn intensity_binarize(line: &[u8]) -> Vec<u8> {
    kth_binarize(line, 0.5, u8::MAX as usize)
}

/// Intensity below or at which `percent`% of the samples fall
pub fn quantile_threshold(line: &[u8], percent: u32) -> u8 {
    let histogram = build_histogram(line, u8::MAX as usize);
    let target = line.len() * percent as usize / 100;
    nth_element(&histogram, target) as u8
}

/// Global threshold: values at or below `threshold` become 0, others 1
pub fn threshold_binarize(line: &[u8], threshold: u8) -> Vec<u8> {
    line.iter().map(|&v| u8::from(v > threshold)).collect()
}

/// Majority filter over a binary line with odd window `window`
///
/// Positions closer than `window / 2` to either end are left as they are.
/// Runs in a single sweep with a sliding count of ones.
pub fn median_filter(binary: &mut [u8], window: usize) {
    assert!(window % 2 == 1, "median filter window must be odd");

    let len = binary.len();
    if len < window {
        return;
    }

    let half = window / 2;
    let source = binary.to_vec();
    let mut ones: usize = source[..window].iter().map(|&v| v as usize).sum();

    for i in half..len - half {
        binary[i] = u8::from(ones > half);
        if i + half + 1 < len {
            ones += source[i + half + 1] as usize;
            ones -= source[i - half] as usize;
        }
    }
}
