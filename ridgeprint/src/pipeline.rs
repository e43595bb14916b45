//! Stage definitions and pipeline composition
//!
//! The stages run in a fixed order and each one accepts exactly one pixel
//! depth. [`apply_stage`] checks that depth before dispatching, so a stage
//! requested out of order is reported as
//! [`PipelineError::PreconditionViolation`] instead of failing deep inside
//! the stage.

use crate::{PipelineError, PipelineResult};
use ridgeprint_color::{DEFAULT_THRESHOLD, ThresholdOptions};
use ridgeprint_core::{PixelDepth, PixelMatrix};
use ridgeprint_morph::BorderHandling;
use std::fmt;
use tracing::debug;

/// A pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// RGB -> intensity by unweighted channel mean
    Grayscale,
    /// Histogram equalization of the intensity matrix
    Equalize,
    /// Fixed-threshold binarization
    Binarize,
    /// Gap filling then speck removal
    Despeckle,
    /// Zhang-Suen thinning
    Skeletonize,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 5] = [
        Stage::Grayscale,
        Stage::Equalize,
        Stage::Binarize,
        Stage::Despeckle,
        Stage::Skeletonize,
    ];

    /// Position in [`Stage::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// The stage whose output this stage consumes.
    pub fn previous(self) -> Option<Stage> {
        self.index().checked_sub(1).map(|i| Stage::ALL[i])
    }

    /// Depth this stage accepts.
    pub fn input_depth(self) -> PixelDepth {
        match self {
            Stage::Grayscale => PixelDepth::Bit32,
            Stage::Equalize | Stage::Binarize => PixelDepth::Bit8,
            Stage::Despeckle | Stage::Skeletonize => PixelDepth::Bit1,
        }
    }

    /// Depth this stage produces.
    pub fn output_depth(self) -> PixelDepth {
        match self {
            Stage::Grayscale | Stage::Equalize => PixelDepth::Bit8,
            Stage::Binarize | Stage::Despeckle | Stage::Skeletonize => PixelDepth::Bit1,
        }
    }

    /// Lowercase stage name.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Grayscale => "grayscale",
            Stage::Equalize => "equalize",
            Stage::Binarize => "binarize",
            Stage::Despeckle => "despeckle",
            Stage::Skeletonize => "skeletonize",
        }
    }

    /// File stem for this stage's intermediate image.
    pub fn file_stem(self) -> &'static str {
        match self {
            Stage::Grayscale => "1-grayscale",
            Stage::Equalize => "2-equalized",
            Stage::Binarize => "3-binary",
            Stage::Despeckle => "4-despeckled",
            Stage::Skeletonize => "5-skeleton",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Options for a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Binarization threshold; intensities below it become ink
    pub threshold: u8,
    /// Border treatment of the despeckle filters
    pub border: BorderHandling,
    /// Cap on thinning passes (0 = until convergence)
    pub max_thin_iters: u32,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            border: BorderHandling::default(),
            max_thin_iters: 0,
        }
    }
}

impl PipelineOptions {
    /// Set the binarization threshold.
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the despeckle border treatment.
    pub fn with_border(mut self, border: BorderHandling) -> Self {
        self.border = border;
        self
    }

    /// Set the thinning pass cap.
    pub fn with_max_thin_iters(mut self, max_thin_iters: u32) -> Self {
        self.max_thin_iters = max_thin_iters;
        self
    }

    fn threshold_options(&self) -> ThresholdOptions {
        ThresholdOptions::new(self.threshold)
    }
}

/// Run a single stage on `pix`.
///
/// # Errors
///
/// - [`PipelineError::InvalidInput`] if `pix` has zero area or the stage
///   itself rejects it
/// - [`PipelineError::PreconditionViolation`] if `pix` does not have the
///   depth produced by the preceding stage
pub fn apply_stage(
    stage: Stage,
    pix: &PixelMatrix,
    options: &PipelineOptions,
) -> PipelineResult<PixelMatrix> {
    pix.ensure_non_empty()
        .map_err(|e| PipelineError::invalid_input(stage, e))?;

    if pix.depth() != stage.input_depth() {
        let reason = match stage.previous() {
            Some(prev) => format!(
                "expected the {} output of the {} stage, got {}",
                stage.input_depth().name(),
                prev,
                pix.depth().name()
            ),
            None => format!(
                "expected a {} source, got {}",
                stage.input_depth().name(),
                pix.depth().name()
            ),
        };
        return Err(PipelineError::PreconditionViolation {
            requested: stage,
            reason,
        });
    }

    debug!(
        %stage,
        width = pix.width(),
        height = pix.height(),
        "stage start"
    );

    let out = match stage {
        Stage::Grayscale => pix
            .convert_rgb_to_gray()
            .map_err(|e| PipelineError::invalid_input(stage, e))?,
        Stage::Equalize => ridgeprint_filter::equalize_histogram(pix)
            .map_err(|e| PipelineError::invalid_input(stage, e))?,
        Stage::Binarize => ridgeprint_color::binarize(pix, &options.threshold_options())
            .map_err(|e| PipelineError::invalid_input(stage, e))?,
        Stage::Despeckle => ridgeprint_morph::despeckle(pix, options.border)
            .map_err(|e| PipelineError::invalid_input(stage, e))?,
        Stage::Skeletonize => ridgeprint_morph::thin_zhang_suen(pix, options.max_thin_iters)
            .map_err(|e| PipelineError::invalid_input(stage, e))?,
    };

    debug!(%stage, depth = out.depth().bits(), "stage finished");
    Ok(out)
}

/// Every intermediate matrix of a pipeline run, in stage order
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    stages: Vec<(Stage, PixelMatrix)>,
}

impl PipelineOutput {
    /// Output of `stage`, if it ran.
    pub fn get(&self, stage: Stage) -> Option<&PixelMatrix> {
        self.stages
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, pix)| pix)
    }

    /// The last stage that ran and its output.
    pub fn last(&self) -> Option<(Stage, &PixelMatrix)> {
        self.stages.last().map(|(s, pix)| (*s, pix))
    }

    /// Output of the last stage that ran.
    ///
    /// This is the skeleton only for a run through [`Stage::Skeletonize`].
    pub fn final_matrix(&self) -> &PixelMatrix {
        // run_through always records at least the grayscale stage
        &self.stages[self.stages.len() - 1].1
    }

    /// Iterate over `(stage, matrix)` pairs in execution order.
    pub fn iter(&self) -> impl Iterator<Item = (Stage, &PixelMatrix)> {
        self.stages.iter().map(|(s, pix)| (*s, pix))
    }

    /// Number of stages that ran.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether no stage ran.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Take the final matrix, dropping the intermediates.
    pub fn into_final(mut self) -> Option<PixelMatrix> {
        self.stages.pop().map(|(_, pix)| pix)
    }
}

/// Run the stages from grayscale reduction up to and including `last`.
pub fn run_through(
    source: &PixelMatrix,
    last: Stage,
    options: &PipelineOptions,
) -> PipelineResult<PipelineOutput> {
    let mut stages: Vec<(Stage, PixelMatrix)> = Vec::with_capacity(last.index() + 1);
    for stage in Stage::ALL.into_iter().take(last.index() + 1) {
        let input = stages.last().map_or(source, |(_, pix)| pix);
        let out = apply_stage(stage, input, options)?;
        stages.push((stage, out));
    }
    Ok(PipelineOutput { stages })
}

/// Run the full pipeline on an RGB source.
pub fn run_pipeline(
    source: &PixelMatrix,
    options: &PipelineOptions,
) -> PipelineResult<PipelineOutput> {
    run_through(source, Stage::Skeletonize, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StageError;
    use ridgeprint_core::color::compose_rgb;
    use ridgeprint_test::{binary_from_ascii, binary_to_ascii};

    fn gray_to_rgb(rows: &[&[u8]]) -> PixelMatrix {
        let width = rows[0].len() as u32;
        PixelMatrix::from_fn(width, rows.len() as u32, PixelDepth::Bit32, |x, y| {
            let v = rows[y as usize][x as usize];
            compose_rgb(v, v, v)
        })
        .unwrap()
    }

    #[test]
    fn test_stage_order_and_depths() {
        for pair in Stage::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].output_depth(), pair[1].input_depth());
            assert_eq!(pair[1].previous(), Some(pair[0]));
        }
        assert_eq!(Stage::Grayscale.previous(), None);
        assert_eq!(Stage::Skeletonize.to_string(), "skeletonize");
        assert_eq!(Stage::Binarize.file_stem(), "3-binary");
    }

    #[test]
    fn test_default_options() {
        let opts = PipelineOptions::default();
        assert_eq!(opts.threshold, 50);
        assert_eq!(opts.border, BorderHandling::Clear);
        assert_eq!(opts.max_thin_iters, 0);
        let opts = opts.with_threshold(90).with_border(BorderHandling::Replicate);
        assert_eq!(opts.threshold, 90);
        assert_eq!(opts.border, BorderHandling::Replicate);
    }

    #[test]
    fn test_block_through_pipeline() {
        // Dark 3x3 block on a 5x5 light field: 9/25 of the pixels are dark,
        // equalizing to floor(9 * 255 / 25) = 91, so threshold 100 marks them
        let dark = 30u8;
        let light = 220u8;
        let mut rows = vec![[light; 5]; 5];
        for row in rows.iter_mut().take(4).skip(1) {
            row[1..4].fill(dark);
        }
        let rows: Vec<&[u8]> = rows.iter().map(|r| &r[..]).collect();
        let src = gray_to_rgb(&rows);

        let opts = PipelineOptions::default()
            .with_threshold(100)
            .with_border(BorderHandling::Replicate);
        let out = run_pipeline(&src, &opts).unwrap();
        assert_eq!(out.len(), 5);

        let eq = out.get(Stage::Equalize).unwrap();
        assert_eq!(eq.get_pixel(2, 2), Some(91));
        assert_eq!(eq.get_pixel(0, 0), Some(255));

        assert_eq!(
            binary_to_ascii(out.final_matrix()),
            vec![".....", ".....", "..#..", ".....", "....."]
        );
    }

    #[test]
    fn test_run_through_stops() {
        let src = gray_to_rgb(&[&[10, 200, 10], &[200, 10, 200]]);
        let out = run_through(&src, Stage::Equalize, &PipelineOptions::default()).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.get(Stage::Binarize).is_none());
        assert_eq!(out.last().map(|(s, _)| s), Some(Stage::Equalize));
        let stages: Vec<Stage> = out.iter().map(|(s, _)| s).collect();
        assert_eq!(stages, vec![Stage::Grayscale, Stage::Equalize]);
        assert_eq!(out.final_matrix().depth(), PixelDepth::Bit8);
        assert_eq!(Some(out.final_matrix()), out.get(Stage::Equalize));
    }

    #[test]
    fn test_out_of_order_is_precondition_violation() {
        let gray = PixelMatrix::new(4, 4, PixelDepth::Bit8).unwrap();
        let err = apply_stage(Stage::Skeletonize, &gray, &PipelineOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::PreconditionViolation {
                requested: Stage::Skeletonize,
                ..
            }
        ));
        assert_eq!(err.stage(), Stage::Skeletonize);
    }

    #[test]
    fn test_default_despeckle_then_skeleton() {
        // Hole at (4, 2), speck at (10, 3), stray ink at (1, 6)
        let bin = binary_from_ascii(&[
            "............",
            ".#######....",
            ".###.###....",
            ".#######..#.",
            "....######..",
            "....######..",
            ".#..######..",
            "............",
            "............",
        ]);
        let opts = PipelineOptions::default();
        let clean = apply_stage(Stage::Despeckle, &bin, &opts).unwrap();
        assert_eq!(
            binary_to_ascii(&clean),
            vec![
                "############",
                "########...#",
                "########...#",
                "########...#",
                "#...######.#",
                "#...######.#",
                "#...######.#",
                "#..........#",
                "############",
            ]
        );

        let skel = apply_stage(Stage::Skeletonize, &clean, &opts).unwrap();
        assert_eq!(
            binary_to_ascii(&skel),
            vec![
                "############",
                "#....#.....#",
                "#....#.....#",
                "#....#.....#",
                "#....#.....#",
                "#.....#....#",
                "#..........#",
                "#..........#",
                "############",
            ]
        );
    }

    #[test]
    fn test_core_error_module_is_reachable() {
        let err = PixelMatrix::from_data(2, 2, PixelDepth::Bit1, vec![0]).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::DataLength {
                expected: 4,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_empty_source_is_invalid_input() {
        let empty = PixelMatrix::new(0, 0, PixelDepth::Bit32).unwrap();
        let err = run_pipeline(&empty, &PipelineOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::InvalidInput {
                stage: Stage::Grayscale,
                source: StageError::Core(_),
            }
        ));
    }
}
