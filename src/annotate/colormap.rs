/// Continuous viridis colormap
///
/// Anchor values sampled from the standard viridis scale, interpolated
/// linearly in RGB. Good enough for marker and colorbar coloring; nothing
/// here needs perceptual-space interpolation.

/// Viridis anchors at t = 0, 1/8, ..., 1
const VIRIDIS_ANCHORS: [[u8; 3]; 9] = [
    [68, 1, 84],
    [72, 40, 120],
    [62, 74, 137],
    [49, 104, 142],
    [38, 130, 142],
    [31, 158, 137],
    [53, 183, 121],
    [109, 205, 89],
    [253, 231, 37],
];

/// Map a normalized value in [0, 1] to a viridis RGB color.
///
/// Out-of-range input is clamped.
pub fn viridis(t: f64) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let segments = (VIRIDIS_ANCHORS.len() - 1) as f64;
    let position = t * segments;
    let index = (position.floor() as usize).min(VIRIDIS_ANCHORS.len() - 2);
    let fraction = position - index as f64;

    let lo = VIRIDIS_ANCHORS[index];
    let hi = VIRIDIS_ANCHORS[index + 1];

    [
        lerp(lo[0], hi[0], fraction),
        lerp(lo[1], hi[1], fraction),
        lerp(lo[2], hi[2], fraction),
    ]
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(viridis(0.0), [68, 1, 84]);
        assert_eq!(viridis(1.0), [253, 231, 37]);
    }

    #[test]
    fn test_midpoint_hits_anchor() {
        assert_eq!(viridis(0.5), [38, 130, 142]);
    }

    #[test]
    fn test_out_of_range_clamps() {
        assert_eq!(viridis(-3.0), viridis(0.0));
        assert_eq!(viridis(42.0), viridis(1.0));
    }

    #[test]
    fn test_interpolation_between_anchors() {
        // Halfway between the first two anchors
        let c = viridis(0.0625);
        assert_eq!(c, [70, 21, 102]);
    }
}
