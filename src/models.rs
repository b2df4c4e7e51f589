use serde::Serialize;

use crate::aamva::ParsedAamva;

/// Symbology name reported for PDF417 detections.
pub const PDF417: &str = "PDF417";

/// Quality marker attached to every detection; the reader reports presence,
/// not a numeric score.
pub const QUALITY_DETECTED: &str = "detected";

/// One successfully detected symbol: symbology, payload text, quality marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedSymbol {
    #[serde(rename = "type")]
    pub symbology: String,
    pub data: String,
    pub quality: String,
}

impl DecodedSymbol {
    pub fn new(symbology: String, data: String) -> Self {
        Self {
            symbology,
            data,
            quality: QUALITY_DETECTED.to_string(),
        }
    }

    pub fn is_pdf417(&self) -> bool {
        self.symbology == PDF417
    }
}

/// Result of a generic barcode scan, shaped for direct JSON serialization
/// by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarcodeScan {
    pub success: bool,
    pub barcodes: Vec<DecodedSymbol>,
}

impl BarcodeScan {
    pub fn new(barcodes: Vec<DecodedSymbol>) -> Self {
        Self {
            success: true,
            barcodes,
        }
    }
}

/// Classification of a PDF417 payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PayloadFormat {
    #[serde(rename = "AAMVA")]
    Aamva,
    #[serde(rename = "raw")]
    Raw,
}

impl PayloadFormat {
    /// AAMVA if the payload opens with the `@` compliance character or
    /// contains `DL` anywhere. The substring check is a heuristic kept from
    /// the service contract and can false-positive on unrelated payloads.
    pub fn classify(payload: &str) -> Self {
        if payload.starts_with('@') || payload.contains("DL") {
            PayloadFormat::Aamva
        } else {
            PayloadFormat::Raw
        }
    }
}

/// One decoded PDF417 payload, classified and (for AAMVA) parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pdf417Entry {
    pub data: String,
    #[serde(rename = "type")]
    pub symbology: String,
    pub format: PayloadFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed: Option<ParsedAamva>,
}

/// Result of a PDF417 scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pdf417Scan {
    pub success: bool,
    pub pdf417_data: Vec<Pdf417Entry>,
}

impl Pdf417Scan {
    pub fn new(pdf417_data: Vec<Pdf417Entry>) -> Self {
        Self {
            success: true,
            pdf417_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aamva_header_classifies_as_aamva() {
        assert_eq!(
            PayloadFormat::classify("@ANSI 636000080002DL00410270ZV03190008"),
            PayloadFormat::Aamva
        );
    }

    #[test]
    fn numeric_payload_classifies_as_raw() {
        assert_eq!(PayloadFormat::classify("12345"), PayloadFormat::Raw);
    }

    #[test]
    fn dl_substring_false_positive_is_preserved() {
        // "HANDLE" contains "DL"; the heuristic deliberately stays as-is.
        assert_eq!(PayloadFormat::classify("HANDLE"), PayloadFormat::Aamva);
    }

    #[test]
    fn symbol_carries_detected_quality() {
        let symbol = DecodedSymbol::new("CODE128".into(), "hello".into());
        assert_eq!(symbol.quality, QUALITY_DETECTED);
        assert!(!symbol.is_pdf417());
    }
}
