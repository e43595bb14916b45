//! Zhang-Suen thinning
//!
//! Reduces ink regions of a binary matrix to one-pixel-wide skeletons.
//!
//! # Algorithm
//!
//! The matrix is inverted so ink becomes foreground (1). Each outer pass
//! runs two sub-iterations over the interior pixels. For a foreground
//! pixel P1 with neighbors
//!
//! ```text
//!   P9 P2 P3
//!   P8 P1 P4
//!   P7 P6 P5
//! ```
//!
//! let `B` be the number of foreground neighbors and `A` the number of
//! 0 -> 1 transitions walking P2, P3, ..., P9, P2. P1 is marked when
//! `2 <= B <= 6`, `A == 1` and the sub-iteration's corner condition holds:
//!
//! - first: `P2 * P4 * P6 == 0` and `P4 * P6 * P8 == 0`
//! - second: `P2 * P4 * P8 == 0` and `P2 * P6 * P8 == 0`
//!
//! Marked pixels are removed only after the whole scan. Passes repeat
//! until one deletes nothing, then the result is inverted back.
//!
//! # Reference
//!
//! T. Y. Zhang and C. Y. Suen, "A fast parallel algorithm for thinning
//! digital patterns", Communications of the ACM 27(3), 1984.

use crate::MorphResult;
use crate::error::check_binary;
use ridgeprint_core::{PixelMatrix, PixelMatrixMut};
use tracing::{debug, trace, warn};

/// One of the two scans of a thinning pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubIteration {
    /// Removes south-east boundary and north-west corner pixels
    First,
    /// Removes north-west boundary and south-east corner pixels
    Second,
}

impl SubIteration {
    fn corner_condition(self, n: &[u32; 8]) -> bool {
        let [p2, _, p4, _, p6, _, p8, _] = *n;
        match self {
            SubIteration::First => p2 * p4 * p6 == 0 && p4 * p6 * p8 == 0,
            SubIteration::Second => p2 * p4 * p8 == 0 && p2 * p6 * p8 == 0,
        }
    }
}

/// Count 0 -> 1 transitions in the circular sequence P2..P9, P2.
pub fn transitions(n: &[u32; 8]) -> u32 {
    (0..8).filter(|&i| n[i] == 0 && n[(i + 1) % 8] == 1).count() as u32
}

/// Count foreground neighbors among P2..P9.
pub fn neighbor_count(n: &[u32; 8]) -> u32 {
    n.iter().sum()
}

/// Whether a foreground pixel with neighbors `n` (P2..P9) is removed in
/// `sub`.
pub fn is_thinning_candidate(n: &[u32; 8], sub: SubIteration) -> bool {
    let b = neighbor_count(n);
    (2..=6).contains(&b) && transitions(n) == 1 && sub.corner_condition(n)
}

/// Neighbors of an interior pixel, clockwise from north.
fn neighbors(fg: &PixelMatrixMut, x: u32, y: u32) -> [u32; 8] {
    [
        fg.get_pixel_unchecked(x, y - 1),
        fg.get_pixel_unchecked(x + 1, y - 1),
        fg.get_pixel_unchecked(x + 1, y),
        fg.get_pixel_unchecked(x + 1, y + 1),
        fg.get_pixel_unchecked(x, y + 1),
        fg.get_pixel_unchecked(x - 1, y + 1),
        fg.get_pixel_unchecked(x - 1, y),
        fg.get_pixel_unchecked(x - 1, y - 1),
    ]
}

/// Foreground pixels that `sub` would delete.
fn marked_pixels(fg: &PixelMatrixMut, sub: SubIteration) -> Vec<(u32, u32)> {
    let w = fg.width();
    let h = fg.height();

    let mut marked = Vec::new();
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            if fg.get_pixel_unchecked(x, y) == 1 && is_thinning_candidate(&neighbors(fg, x, y), sub)
            {
                marked.push((x, y));
            }
        }
    }
    marked
}

/// Run one sub-iteration and return the number of deleted pixels.
fn run_sub_iteration(fg: &mut PixelMatrixMut, sub: SubIteration) -> usize {
    let marked = marked_pixels(fg, sub);
    for &(x, y) in &marked {
        fg.set_pixel_unchecked(x, y, 0);
    }
    marked.len()
}

/// Whether a further pass would delete nothing.
///
/// A first scan that marks nothing leaves the matrix as the second scan
/// sees it, so checking both on the current state is enough.
fn is_fixed_point(fg: &PixelMatrixMut) -> bool {
    marked_pixels(fg, SubIteration::First).is_empty()
        && marked_pixels(fg, SubIteration::Second).is_empty()
}

/// Thin the ink of a binary matrix with the Zhang-Suen algorithm
///
/// # Arguments
///
/// * `pix` - 1 bpp matrix, 0 = ink, 1 = background
/// * `max_iters` - Maximum number of outer passes (0 = until convergence)
///
/// Matrices narrower or shorter than 3 pixels have no interior and are
/// returned unchanged.
pub fn thin_zhang_suen(pix: &PixelMatrix, max_iters: u32) -> MorphResult<PixelMatrix> {
    check_binary(pix)?;
    if pix.width() < 3 || pix.height() < 3 {
        return Ok(pix.clone());
    }

    let mut fg = pix.invert_binary()?.to_mut();
    let mut passes = 0u32;
    loop {
        if max_iters > 0 && passes == max_iters {
            if is_fixed_point(&fg) {
                debug!(passes, "thinning converged at iteration cap");
            } else {
                warn!(
                    max_iters,
                    width = pix.width(),
                    height = pix.height(),
                    "thinning stopped at iteration cap before convergence"
                );
            }
            break;
        }
        passes += 1;

        let first = run_sub_iteration(&mut fg, SubIteration::First);
        let second = run_sub_iteration(&mut fg, SubIteration::Second);
        trace!(pass = passes, first, second, "zhang-suen pass");

        if first + second == 0 {
            debug!(passes, "thinning converged");
            break;
        }
    }

    let thinned: PixelMatrix = fg.into();
    Ok(thinned.invert_binary()?)
}

/// Skeletonize a binary matrix, iterating until convergence.
pub fn skeletonize(pix: &PixelMatrix) -> MorphResult<PixelMatrix> {
    thin_zhang_suen(pix, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MorphError;
    use ridgeprint_core::PixelDepth;
    use ridgeprint_test::{binary_from_ascii, binary_to_ascii};

    #[test]
    fn test_transitions_and_count() {
        assert_eq!(transitions(&[0, 1, 0, 1, 0, 1, 0, 1]), 4);
        assert_eq!(neighbor_count(&[0, 1, 0, 1, 0, 1, 0, 1]), 4);
        // Wraps from P9 back to P2
        assert_eq!(transitions(&[1, 1, 1, 0, 0, 0, 0, 0]), 1);
        assert_eq!(transitions(&[1; 8]), 0);
        assert_eq!(transitions(&[0; 8]), 0);
    }

    #[test]
    fn test_candidate_rules() {
        // End of a horizontal line: only P8 set, B = 1
        assert!(!is_thinning_candidate(
            &[0, 0, 0, 0, 0, 0, 1, 0],
            SubIteration::First
        ));
        // Middle of a line: P4 and P8 set, A = 2
        assert!(!is_thinning_candidate(
            &[0, 0, 1, 0, 0, 0, 1, 0],
            SubIteration::First
        ));
        // North-west corner of a block: P4, P5, P6 set
        let corner = [0, 0, 1, 1, 1, 0, 0, 0];
        assert!(is_thinning_candidate(&corner, SubIteration::First));
        assert!(is_thinning_candidate(&corner, SubIteration::Second));
        // South edge of a block: P8, P9, P2, P3, P4 set
        let south_edge = [1, 1, 1, 0, 0, 0, 1, 1];
        assert!(!is_thinning_candidate(&south_edge, SubIteration::Second));
        assert!(is_thinning_candidate(&south_edge, SubIteration::First));
    }

    #[test]
    fn test_block_thins_to_center_pixel() {
        let pix = binary_from_ascii(&[
            ".....", //
            ".###.",
            ".###.",
            ".###.",
            ".....",
        ]);
        let skel = skeletonize(&pix).unwrap();
        assert_eq!(
            binary_to_ascii(&skel),
            vec![".....", ".....", "..#..", ".....", "....."]
        );
        // The first pass already reaches the remnant
        assert_eq!(thin_zhang_suen(&pix, 1).unwrap(), skel);
    }

    #[test]
    fn test_fixed_point_after_one_pass() {
        let pix = binary_from_ascii(&[
            ".....", //
            ".###.",
            ".###.",
            ".###.",
            ".....",
        ]);
        let mut fg = pix.invert_binary().unwrap().to_mut();
        assert!(!is_fixed_point(&fg));
        assert_eq!(run_sub_iteration(&mut fg, SubIteration::First), 6);
        assert_eq!(run_sub_iteration(&mut fg, SubIteration::Second), 2);
        // A one-pass cap on this block ends at convergence, not short of it
        assert!(is_fixed_point(&fg));
    }

    #[test]
    fn test_square_is_not_fixed_after_one_pass() {
        let pix = binary_from_ascii(&[
            ".........",
            ".#######.",
            ".#######.",
            ".#######.",
            ".#######.",
            ".#######.",
            ".#######.",
            ".#######.",
            ".........",
        ]);
        let mut fg = pix.invert_binary().unwrap().to_mut();
        assert_eq!(run_sub_iteration(&mut fg, SubIteration::First), 14);
        assert_eq!(run_sub_iteration(&mut fg, SubIteration::Second), 11);
        assert!(!is_fixed_point(&fg));
    }

    #[test]
    fn test_horizontal_bar() {
        let pix = binary_from_ascii(&[
            ".........",
            ".........",
            ".#######.",
            ".#######.",
            ".#######.",
            ".........",
            ".........",
        ]);
        let skel = skeletonize(&pix).unwrap();
        assert_eq!(
            binary_to_ascii(&skel),
            vec![
                ".........",
                ".........",
                ".........",
                "..####...",
                ".........",
                ".........",
                ".........",
            ]
        );
    }

    #[test]
    fn test_vertical_bar() {
        let mut rows = vec!["......."];
        rows.extend(std::iter::repeat_n("..###..", 7));
        rows.push(".......");
        let skel = skeletonize(&binary_from_ascii(&rows)).unwrap();

        let mut expected = vec!["......."; 2];
        expected.extend(std::iter::repeat_n("...#...", 4));
        expected.extend(std::iter::repeat_n(".......", 3));
        assert_eq!(binary_to_ascii(&skel), expected);
    }

    #[test]
    fn test_l_shape() {
        let pix = binary_from_ascii(&[
            "........",
            ".##.....",
            ".##.....",
            ".##.....",
            ".######.",
            ".######.",
            "........",
        ]);
        let skel = skeletonize(&pix).unwrap();
        assert_eq!(
            binary_to_ascii(&skel),
            vec![
                "........",
                "........",
                ".#......",
                ".#......",
                ".#####..",
                "........",
                "........",
            ]
        );
    }

    #[test]
    fn test_idempotent_and_shrinking() {
        let pix = binary_from_ascii(&[
            "..........",
            ".####.....",
            ".#####....",
            "..######..",
            "....#####.",
            ".....####.",
            "..........",
        ]);
        let skel = skeletonize(&pix).unwrap();
        assert!(skel.count_value(0) <= pix.count_value(0));
        assert!(skel.count_value(0) > 0);
        assert_eq!(skeletonize(&skel).unwrap(), skel);
    }

    #[test]
    fn test_single_pixel_and_line_survive() {
        let dot = binary_from_ascii(&["...", ".#.", "..."]);
        assert_eq!(skeletonize(&dot).unwrap(), dot);

        let line = binary_from_ascii(&[".......", ".#####.", "......."]);
        assert_eq!(skeletonize(&line).unwrap(), line);
    }

    #[test]
    fn test_small_input_is_noop() {
        let pix = PixelMatrix::from_data(2, 2, PixelDepth::Bit1, vec![0, 0, 0, 1]).unwrap();
        assert_eq!(skeletonize(&pix).unwrap(), pix);
        let row = binary_from_ascii(&["#####"]);
        assert_eq!(skeletonize(&row).unwrap(), row);
    }

    #[test]
    fn test_rejects_non_binary() {
        let pix = PixelMatrix::new(5, 5, PixelDepth::Bit8).unwrap();
        assert!(matches!(
            skeletonize(&pix),
            Err(MorphError::UnsupportedDepth { actual: 8, .. })
        ));
    }
}
