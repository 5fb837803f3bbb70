//! Score an email body from the command line.
//!
//! ```text
//! phishnet <detector.yaml> [text ...]
//! ```
//!
//! With no text arguments the body is read from stdin.

use std::error::Error;
use std::io::Read;

use phishnet::{Detector, DetectorConfig};

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let config_path = args
        .next()
        .ok_or("usage: phishnet <detector.yaml> [text ...]")?;

    let config = DetectorConfig::from_file(&config_path)?;
    let detector = Detector::from_config(&config)?;

    let words: Vec<String> = args.collect();
    let text = if words.is_empty() {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        words.join(" ")
    };

    let result = detector.predict(&text)?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
