use log::debug;

use crate::color::LinearRgb;
use crate::error::QuantizeError;

/// One distinct input color with its occurrence weight and clustering state.
///
/// Created once per distinct color at ingestion; the `segment` and `level`
/// fields are rewritten in place by the assignment stage, `seed_dist` only by
/// the seeder (monotonically non-increasing over the whole run).
#[derive(Debug, Clone)]
pub(crate) struct ColorPoint {
    pub color: LinearRgb,
    /// Number of pixels that had this exact color.
    pub count: u64,
    /// Index of the centroid this point is currently assigned to.
    pub segment: u32,
    /// Brightness level of the current assignment, in [1, levels].
    pub level: u32,
    /// Squared distance to the nearest centroid seen so far during seeding.
    pub seed_dist: f64,
}

/// Collapse raw pixels into one weighted [`ColorPoint`] per distinct color.
///
/// Tallies through a dense 256³ counter owned by this call, then emits points
/// in ascending (r, g, b) order so the point order is deterministic. Each
/// point starts unassigned-at-full-brightness: segment 0, level = `levels`,
/// seeding distance at the maximum representable value.
pub(crate) fn build_points(
    pixels: &[rgb::RGB<u8>],
    levels: u32,
) -> Result<Vec<ColorPoint>, QuantizeError> {
    let mut counts = vec![0u64; 1 << 24];
    for p in pixels {
        counts[(p.r as usize) << 16 | (p.g as usize) << 8 | p.b as usize] += 1;
    }

    let distinct = counts.iter().filter(|&&c| c > 0).count();
    if distinct == 0 {
        return Err(QuantizeError::EmptyHistogram);
    }
    debug!(
        "histogram: {distinct} distinct colors from {} samples",
        pixels.len()
    );

    let mut points = Vec::with_capacity(distinct);
    for (key, &count) in counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let c = rgb::RGB {
            r: (key >> 16) as u8,
            g: (key >> 8) as u8,
            b: key as u8,
        };
        points.push(ColorPoint {
            color: LinearRgb::from_rgb8(c),
            count,
            segment: 0,
            level: levels,
            seed_dist: f64::MAX,
        });
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(
            build_points(&[], 4),
            Err(QuantizeError::EmptyHistogram)
        ));
    }

    #[test]
    fn duplicate_colors_accumulate() {
        let pixels = vec![
            rgb::RGB {
                r: 128,
                g: 64,
                b: 32
            };
            100
        ];
        let points = build_points(&pixels, 4).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].count, 100);
    }

    #[test]
    fn points_emerge_in_channel_order() {
        let pixels = vec![
            rgb::RGB { r: 200, g: 0, b: 0 },
            rgb::RGB { r: 0, g: 0, b: 5 },
            rgb::RGB { r: 0, g: 3, b: 0 },
        ];
        let points = build_points(&pixels, 1).unwrap();
        assert_eq!(points.len(), 3);
        let as_rgb8: Vec<_> = points.iter().map(|p| p.color.to_rgb8()).collect();
        assert_eq!(as_rgb8[0], rgb::RGB { r: 0, g: 0, b: 5 });
        assert_eq!(as_rgb8[1], rgb::RGB { r: 0, g: 3, b: 0 });
        assert_eq!(as_rgb8[2], rgb::RGB { r: 200, g: 0, b: 0 });
    }

    #[test]
    fn points_start_at_full_brightness() {
        let pixels = [rgb::RGB { r: 1, g: 2, b: 3 }];
        let points = build_points(&pixels, 7).unwrap();
        assert_eq!(points[0].segment, 0);
        assert_eq!(points[0].level, 7);
        assert_eq!(points[0].seed_dist, f64::MAX);
    }
}
