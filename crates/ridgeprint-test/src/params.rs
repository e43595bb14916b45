//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use ridgeprint_core::{ImageFormat, PixelMatrix};
use std::fs;
use std::path::Path;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Generate golden files
    Generate,
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Display mode - run without comparison
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    /// Parse mode from a string; anything unrecognized means compare
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the state of a regression test: the test name, current index,
/// mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "skeleton")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode (generate, compare, or display)
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode comes from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if values match within `delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Compare two matrices for exact equality (size, depth, and pixels)
    pub fn compare_matrix(&mut self, expected: &PixelMatrix, actual: &PixelMatrix) -> bool {
        self.index += 1;

        if !expected.sizes_equal(actual) {
            let msg = format!(
                "Failure in {}_reg: matrix comparison for index {} - {}x{} d={} vs {}x{} d={}",
                self.test_name,
                self.index,
                expected.width(),
                expected.height(),
                expected.depth().bits(),
                actual.width(),
                actual.height(),
                actual.depth().bits()
            );
            self.fail(msg);
            return false;
        }

        if let Some(i) = expected
            .data()
            .iter()
            .zip(actual.data())
            .position(|(a, b)| a != b)
        {
            let w = expected.width() as usize;
            let msg = format!(
                "Failure in {}_reg: matrix comparison for index {} - pixel mismatch at ({}, {})",
                self.test_name,
                self.index,
                i % w,
                i / w
            );
            self.fail(msg);
            return false;
        }

        true
    }

    /// Write a matrix as PNG and check it against its golden file
    ///
    /// In generate mode the output becomes the golden file. In compare mode
    /// the decoded pixels are compared and a missing golden file is a
    /// failure.
    pub fn write_matrix_and_check(&mut self, pix: &PixelMatrix) -> TestResult<()> {
        self.index += 1;

        let ext = ImageFormat::Png.extension();
        let local_path = format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            ext
        );
        ridgeprint_io::write_image(pix, &local_path, ImageFormat::Png).map_err(|e| {
            TestError::ImageWrite {
                path: local_path.clone(),
                message: e.to_string(),
            }
        })?;

        let golden_path = format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.test_name,
            self.index,
            ext
        );

        match self.mode {
            RegTestMode::Generate => {
                fs::copy(&local_path, &golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden_path).exists() {
                    let msg = format!(
                        "Failure in {}_reg: golden file not found: {}",
                        self.test_name, golden_path
                    );
                    self.fail(msg);
                    return Ok(());
                }
                if !Self::same_image_files(&local_path, &golden_path) {
                    let msg = format!(
                        "Failure in {}_reg, index {}: comparing {} with {}",
                        self.test_name, self.index, local_path, golden_path
                    );
                    self.fail(msg);
                }
            }
            RegTestMode::Display => {}
        }

        Ok(())
    }

    /// Compare two image files pixel-by-pixel
    fn same_image_files(path1: &str, path2: &str) -> bool {
        match (
            ridgeprint_io::read_image(path1),
            ridgeprint_io::read_image(path2),
        ) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
