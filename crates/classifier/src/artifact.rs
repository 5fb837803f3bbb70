use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::ClassifierError;

/// Reads a JSON model artifact from disk.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ClassifierError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
