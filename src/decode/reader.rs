use gag::Gag;
use image::GrayImage;
use rxing::{BarcodeFormat, Exceptions};

use crate::error::DecodeError;
use crate::models::DecodedSymbol;

/// Scoped redirection of the process stderr stream.
///
/// Symbol readers can emit diagnostic noise straight to the low-level
/// stream during detection; this guard silences it for the enclosing scope
/// and restores the stream when dropped, on every exit path. Redirection is
/// best effort: if the stream cannot be gagged (already redirected),
/// detection proceeds unsilenced.
pub struct StderrQuiet {
    _gag: Option<Gag>,
}

impl StderrQuiet {
    pub fn engage() -> Self {
        Self {
            _gag: Gag::stderr().ok(),
        }
    }
}

/// Detection backend seam.
///
/// The pipeline drives any reader through this trait: production code uses
/// [`RxingReader`], tests inject scripted fakes to exercise stage policy.
pub trait SymbolReader: Send + Sync {
    /// Verify the backend is usable. Called once per decode, before any
    /// attempt runs; failures surface as
    /// [`DecodeError::EnvironmentUnavailable`] without any stage running.
    fn ensure_ready(&self) -> Result<(), DecodeError>;

    /// One detection pass over a luminance buffer. An empty vec means
    /// nothing was found; `Err` means the backend faulted mid-attempt.
    fn read(&self, image: &GrayImage) -> Result<Vec<DecodedSymbol>, DecodeError>;
}

/// Multi-format reader backed by rxing. Detects 1D symbologies, QR, and
/// PDF417 in a single pass and reports them in enumeration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct RxingReader;

impl RxingReader {
    pub fn new() -> Self {
        Self
    }
}

impl SymbolReader for RxingReader {
    fn ensure_ready(&self) -> Result<(), DecodeError> {
        // Pure-Rust backend, always linked. Readers that bind a native
        // library report a missing or broken installation here.
        Ok(())
    }

    fn read(&self, image: &GrayImage) -> Result<Vec<DecodedSymbol>, DecodeError> {
        let (width, height) = image.dimensions();
        match rxing::helpers::detect_multiple_in_luma(image.as_raw().clone(), width, height) {
            Ok(found) => Ok(found
                .iter()
                .map(|result| {
                    DecodedSymbol::new(
                        symbology_name(result.getBarcodeFormat()),
                        result.getText().to_string(),
                    )
                })
                .collect()),
            Err(Exceptions::NotFoundException(_)) => Ok(Vec::new()),
            Err(fault) => Err(DecodeError::DecodeFailure(fault.to_string())),
        }
    }
}

/// Conventional short names for the symbologies the reader reports.
fn symbology_name(format: &BarcodeFormat) -> String {
    match format {
        BarcodeFormat::PDF_417 => "PDF417",
        BarcodeFormat::QR_CODE => "QRCODE",
        BarcodeFormat::CODE_128 => "CODE128",
        BarcodeFormat::CODE_39 => "CODE39",
        BarcodeFormat::CODE_93 => "CODE93",
        BarcodeFormat::EAN_13 => "EAN13",
        BarcodeFormat::EAN_8 => "EAN8",
        BarcodeFormat::UPC_A => "UPCA",
        BarcodeFormat::UPC_E => "UPCE",
        BarcodeFormat::ITF => "ITF",
        BarcodeFormat::CODABAR => "CODABAR",
        BarcodeFormat::DATA_MATRIX => "DATAMATRIX",
        BarcodeFormat::AZTEC => "AZTEC",
        other => return format!("{other:?}"),
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_formats_use_short_names() {
        assert_eq!(symbology_name(&BarcodeFormat::PDF_417), "PDF417");
        assert_eq!(symbology_name(&BarcodeFormat::CODE_128), "CODE128");
        assert_eq!(symbology_name(&BarcodeFormat::QR_CODE), "QRCODE");
    }

    #[test]
    fn empty_buffer_reads_as_no_symbols() {
        let reader = RxingReader::new();
        let blank = GrayImage::from_pixel(64, 64, image::Luma([255]));
        let found = reader.read(&blank).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn stderr_guard_restores_on_drop() {
        {
            let _quiet = StderrQuiet::engage();
            eprintln!("swallowed");
        }
        // Writing after the guard drops must not panic.
        eprintln!("visible again");
    }
}
