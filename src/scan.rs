use image::DynamicImage;
use tracing::debug;

use crate::aamva;
use crate::decode::DecodePipeline;
use crate::decode::reader::SymbolReader;
use crate::error::{DecodeError, SymbolKind};
use crate::models::{BarcodeScan, DecodedSymbol, PDF417, PayloadFormat, Pdf417Entry, Pdf417Scan};

/// Decode every readable symbol in `image_bytes` with the default pipeline.
///
/// The bytes must be a loadable raster image; size and extension validation
/// happens upstream.
pub fn decode_barcode(image_bytes: &[u8]) -> Result<BarcodeScan, DecodeError> {
    decode_barcode_with(&DecodePipeline::new(), image_bytes)
}

/// As [`decode_barcode`], with a caller-supplied pipeline.
pub fn decode_barcode_with<R: SymbolReader>(
    pipeline: &DecodePipeline<R>,
    image_bytes: &[u8],
) -> Result<BarcodeScan, DecodeError> {
    let image = load_image(image_bytes)?;
    let symbols = pipeline.decode(&image)?;
    Ok(BarcodeScan::new(symbols))
}

/// Decode PDF417 symbols from `image_bytes` and parse AAMVA payloads.
///
/// Non-PDF417 detections are discarded. Each PDF417 payload is classified
/// and parsed independently; no cross-symbol correlation happens.
pub fn decode_pdf417(image_bytes: &[u8]) -> Result<Pdf417Scan, DecodeError> {
    decode_pdf417_with(&DecodePipeline::new(), image_bytes)
}

/// As [`decode_pdf417`], with a caller-supplied pipeline.
pub fn decode_pdf417_with<R: SymbolReader>(
    pipeline: &DecodePipeline<R>,
    image_bytes: &[u8],
) -> Result<Pdf417Scan, DecodeError> {
    let image = load_image(image_bytes)?;
    let symbols = match pipeline.decode(&image) {
        Ok(symbols) => symbols,
        Err(DecodeError::NoSymbolFound(_)) => {
            return Err(DecodeError::NoSymbolFound(SymbolKind::Pdf417));
        }
        Err(other) => return Err(other),
    };

    let total = symbols.len();
    let entries: Vec<Pdf417Entry> = symbols
        .into_iter()
        .filter(DecodedSymbol::is_pdf417)
        .map(classify_and_parse)
        .collect();
    debug!(total, pdf417 = entries.len(), "classified decoded symbols");

    if entries.is_empty() {
        return Err(DecodeError::NoSymbolFound(SymbolKind::Pdf417));
    }
    Ok(Pdf417Scan::new(entries))
}

fn classify_and_parse(symbol: DecodedSymbol) -> Pdf417Entry {
    let format = PayloadFormat::classify(&symbol.data);
    let parsed = match format {
        PayloadFormat::Aamva => Some(aamva::parse(&symbol.data)),
        PayloadFormat::Raw => None,
    };
    Pdf417Entry {
        data: symbol.data,
        symbology: PDF417.to_string(),
        format,
        parsed,
    }
}

fn load_image(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    image::load_from_memory(bytes)
        .map_err(|e| DecodeError::DecodeFailure(format!("failed to load image: {e}")))
}
