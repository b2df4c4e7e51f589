use clap::Parser;
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "idscan")]
#[command(about = "Decode barcodes and AAMVA driver-license data from images")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Decode PDF417 symbols and parse AAMVA payloads instead of a generic
    /// barcode scan
    #[arg(long)]
    pdf417: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let bytes = std::fs::read(&args.image_path)?;

    // The service contract reports failures as {"error": "..."} rather than
    // a non-zero exit, so both arms print JSON.
    let output = if args.pdf417 {
        match idscan::decode_pdf417(&bytes) {
            Ok(scan) => serde_json::to_value(&scan)?,
            Err(err) => json!({ "error": err.to_string() }),
        }
    } else {
        match idscan::decode_barcode(&bytes) {
            Ok(scan) => serde_json::to_value(&scan)?,
            Err(err) => json!({ "error": err.to_string() }),
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
