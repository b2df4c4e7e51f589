//! Decode machine-readable symbols from photographs of ID documents and
//! checks, and normalize AAMVA driver-license payloads into structured
//! fields.
//!
//! Two independent, composable pipelines:
//!
//! * [`decode`] — raw image bytes through color normalization and an ordered
//!   sequence of detection attempts (original, enhanced, upscaled, rotated),
//!   short-circuiting on the first attempt that finds a symbol.
//! * [`aamva`] — decoded PDF417 payload text through a fixed-field tokenizer
//!   into category buckets and a normalized user view.
//!
//! [`scan::decode_barcode`] and [`scan::decode_pdf417`] tie the two together
//! for the surrounding service. Everything is synchronous and stateless
//! apart from the static field-code registry.

pub mod aamva;
pub mod decode;
pub mod error;
pub mod models;
pub mod scan;

pub use aamva::{AamvaRecord, ParsedAamva, StructuredView, UserView};
pub use decode::DecodePipeline;
pub use decode::reader::{RxingReader, StderrQuiet, SymbolReader};
pub use error::{DecodeError, SymbolKind};
pub use models::{BarcodeScan, DecodedSymbol, PayloadFormat, Pdf417Entry, Pdf417Scan};
pub use scan::{decode_barcode, decode_barcode_with, decode_pdf417, decode_pdf417_with};
