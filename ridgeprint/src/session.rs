//! Step-by-step stage sequencing
//!
//! A [`Session`] holds the loaded source image, the options and the most
//! recent stage output, so an interactive front end can run one stage at a
//! time. Stages are still pure functions; the session only decides which
//! matrix each one receives.

use crate::pipeline::{PipelineOptions, Stage, apply_stage, run_through};
use crate::{PipelineError, PipelineResult};
use ridgeprint_core::PixelMatrix;
use tracing::debug;

/// Interactive pipeline state
#[derive(Debug, Clone, Default)]
pub struct Session {
    options: PipelineOptions,
    source: Option<PixelMatrix>,
    current: Option<(Stage, PixelMatrix)>,
}

impl Session {
    /// Create an empty session.
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            options,
            source: None,
            current: None,
        }
    }

    /// Load a new RGB source, discarding any previous results.
    pub fn load(&mut self, source: PixelMatrix) {
        debug!(
            width = source.width(),
            height = source.height(),
            "session source loaded"
        );
        self.source = Some(source);
        self.current = None;
    }

    /// The loaded source image.
    pub fn source(&self) -> Option<&PixelMatrix> {
        self.source.as_ref()
    }

    /// The last stage applied and its output.
    pub fn current(&self) -> Option<(Stage, &PixelMatrix)> {
        self.current.as_ref().map(|(s, pix)| (*s, pix))
    }

    /// Current options.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Change the binarization threshold used by later stages.
    ///
    /// Results already computed are kept.
    pub fn set_threshold(&mut self, threshold: u8) {
        self.options.threshold = threshold;
    }

    fn loaded_source(&self, requested: Stage) -> PipelineResult<&PixelMatrix> {
        self.source
            .as_ref()
            .ok_or_else(|| PipelineError::PreconditionViolation {
                requested,
                reason: "no source image loaded".to_string(),
            })
    }

    /// Apply one stage to the current matrix.
    ///
    /// [`Stage::Grayscale`] always starts again from the source. Any other
    /// stage needs the current matrix to have the depth it accepts; a stage
    /// may be repeated when its input and output depths agree.
    ///
    /// On failure the current matrix is left unchanged.
    pub fn apply(&mut self, stage: Stage) -> PipelineResult<&PixelMatrix> {
        let source = self.loaded_source(stage)?;
        let input = match (stage, &self.current) {
            (Stage::Grayscale, _) => source,
            (_, Some((_, pix))) => pix,
            (_, None) => {
                return Err(PipelineError::PreconditionViolation {
                    requested: stage,
                    reason: "run the grayscale stage first".to_string(),
                });
            }
        };

        let out = apply_stage(stage, input, &self.options)?;
        Ok(&self.current.insert((stage, out)).1)
    }

    /// Run every stage from the source, keeping only the final skeleton.
    pub fn run_all(&mut self) -> PipelineResult<&PixelMatrix> {
        self.restart_through(Stage::Skeletonize)
    }

    /// Run from the source through `last`.
    pub fn restart_through(&mut self, last: Stage) -> PipelineResult<&PixelMatrix> {
        let source = self.loaded_source(last)?;
        let output = run_through(source, last, &self.options)?;
        let out = output
            .into_final()
            .ok_or_else(|| PipelineError::PreconditionViolation {
                requested: last,
                reason: "no stage ran".to_string(),
            })?;
        Ok(&self.current.insert((last, out)).1)
    }
}
