pub mod preprocessing;
pub mod reader;

use image::{DynamicImage, GrayImage};
use tracing::debug;

use crate::error::{DecodeError, SymbolKind};
use crate::models::DecodedSymbol;
use preprocessing::Rotation;
use reader::{RxingReader, StderrQuiet, SymbolReader};

/// Multi-strategy decode pipeline.
///
/// Attempts run in fixed priority order and the pipeline short-circuits on
/// the first attempt that detects at least one symbol:
///
/// 1. the color-normalized buffer as decoded
/// 2. the enhanced buffer
/// 3. a 2x cubic upscale, enhanced
/// 4. clockwise rotations 90/180/270, each enhanced, first hit wins
///
/// Worst case is 6 detection attempts per image. Each invocation owns its
/// buffers; the pipeline holds no mutable state, so one instance can serve
/// concurrent callers.
pub struct DecodePipeline<R = RxingReader> {
    pub reader: R,
    /// Bilateral filter window diameter.
    pub smoothing_window: u32,
    pub smoothing_sigma_color: f32,
    pub smoothing_sigma_spatial: f32,
    /// Adaptive equalization grid (tiles x tiles) and contrast clip limit.
    pub adaptive_tiles: u32,
    pub adaptive_clip_limit: f32,
    /// Linear upscale factor for the third attempt.
    pub upscale_factor: u32,
}

impl DecodePipeline<RxingReader> {
    pub fn new() -> Self {
        Self::with_reader(RxingReader::new())
    }
}

impl Default for DecodePipeline<RxingReader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: SymbolReader> DecodePipeline<R> {
    /// Pipeline with the production enhancement parameters.
    pub fn with_reader(reader: R) -> Self {
        Self {
            reader,
            smoothing_window: 9,
            smoothing_sigma_color: 75.0,
            smoothing_sigma_spatial: 75.0,
            adaptive_tiles: 8,
            adaptive_clip_limit: 2.0,
            upscale_factor: 2,
        }
    }

    /// Run the full fallback sequence over one image.
    pub fn decode(&self, image: &DynamicImage) -> Result<Vec<DecodedSymbol>, DecodeError> {
        self.reader.ensure_ready()?;

        let normalized = preprocessing::flatten_onto_white(image);
        let gray = preprocessing::to_grayscale(&normalized);

        let found = self.attempt("original", &gray)?;
        if !found.is_empty() {
            return Ok(found);
        }

        let found = self.attempt("enhanced", &self.enhance(&gray))?;
        if !found.is_empty() {
            return Ok(found);
        }

        let upscaled = preprocessing::upscale(&gray, self.upscale_factor);
        let found = self.attempt("upscaled", &self.enhance(&upscaled))?;
        if !found.is_empty() {
            return Ok(found);
        }

        for rotation in Rotation::ALL {
            let rotated = preprocessing::rotate_cw(&gray, rotation);
            let found = self.attempt(rotation.label(), &self.enhance(&rotated))?;
            if !found.is_empty() {
                return Ok(found);
            }
        }

        Err(DecodeError::NoSymbolFound(SymbolKind::Barcode))
    }

    /// Enhancement transform: edge-aware smoothing, global then local
    /// contrast normalization, morphological close/open cleanup.
    pub fn enhance(&self, gray: &GrayImage) -> GrayImage {
        let smoothed = preprocessing::smooth_preserving_edges(
            gray,
            self.smoothing_window,
            self.smoothing_sigma_color,
            self.smoothing_sigma_spatial,
        );
        let equalized = preprocessing::equalize(&smoothed);
        let localized = preprocessing::adaptive_equalize(
            &equalized,
            self.adaptive_tiles,
            self.adaptive_clip_limit,
        );
        preprocessing::morphological_cleanup(&localized)
    }

    fn attempt(&self, stage: &str, gray: &GrayImage) -> Result<Vec<DecodedSymbol>, DecodeError> {
        let found = {
            let _quiet = StderrQuiet::engage();
            self.reader.read(gray)?
        };
        debug!(stage, count = found.len(), "detection attempt");
        Ok(found)
    }
}
