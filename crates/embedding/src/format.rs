//! Artifact readers for [`EmbeddingModel`].
//!
//! Two on-disk layouts are accepted, picked by file extension:
//!
//! - `.json`: `{ "vector_size": 100, "vectors": { "token": [..], .. } }`
//! - `.txt` / `.vec`: word2vec text format. A `<count> <dim>` header line,
//!   then one `<token> <dim floats>` line per entry.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::error::EmbeddingError;
use crate::model::EmbeddingModel;

#[derive(Deserialize)]
struct JsonEmbeddings {
    vector_size: usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl EmbeddingModel {
    /// Loads an embedding artifact, choosing the reader from the extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EmbeddingError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let model = match ext.as_deref() {
            Some("json") => Self::from_json_reader(BufReader::new(File::open(path)?))?,
            Some("txt") | Some("vec") => {
                Self::from_word2vec_text(BufReader::new(File::open(path)?))?
            }
            _ => return Err(EmbeddingError::UnsupportedFormat(path.to_path_buf())),
        };

        tracing::debug!(
            path = %path.display(),
            dim = model.dim(),
            vocab = model.vocab_size(),
            "embedding model loaded"
        );
        Ok(model)
    }

    /// Parses the JSON layout.
    pub fn from_json_reader(reader: impl Read) -> Result<Self, EmbeddingError> {
        let raw: JsonEmbeddings = serde_json::from_reader(reader)?;
        Self::from_entries(raw.vector_size, raw.vectors)
    }

    /// Parses the word2vec text layout.
    pub fn from_word2vec_text(reader: impl BufRead) -> Result<Self, EmbeddingError> {
        let mut lines = reader.lines().enumerate();

        let (declared, dim) = loop {
            let Some((idx, line)) = lines.next() else {
                return Err(EmbeddingError::Parse {
                    line: 1,
                    reason: "missing header".into(),
                });
            };
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            break parse_header(&line, idx + 1)?;
        };

        let mut model = EmbeddingModel::empty(dim)?;
        let mut vector = Vec::with_capacity(dim);
        for (idx, line) in lines {
            let line = line?;
            let mut fields = line.split_whitespace();
            let Some(token) = fields.next() else {
                continue;
            };

            vector.clear();
            for field in fields {
                let value = field.parse::<f32>().map_err(|e| EmbeddingError::Parse {
                    line: idx + 1,
                    reason: format!("{field:?}: {e}"),
                })?;
                vector.push(value);
            }
            model.insert(token.to_string(), &vector)?;
        }

        if model.vocab_size() != declared {
            return Err(EmbeddingError::VocabCountMismatch {
                declared,
                actual: model.vocab_size(),
            });
        }
        Ok(model)
    }
}

fn parse_header(line: &str, line_no: usize) -> Result<(usize, usize), EmbeddingError> {
    let bad = |reason: &str| EmbeddingError::Parse {
        line: line_no,
        reason: reason.to_string(),
    };

    let mut fields = line.split_whitespace();
    let count = fields
        .next()
        .and_then(|f| f.parse::<usize>().ok())
        .ok_or_else(|| bad("header must start with the vector count"))?;
    let dim = fields
        .next()
        .and_then(|f| f.parse::<usize>().ok())
        .ok_or_else(|| bad("header must give the vector dimension"))?;
    if fields.next().is_some() {
        return Err(bad("header has trailing fields"));
    }
    Ok((count, dim))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    const TEXT_MODEL: &str = "3 2\nverify 0.5 -1.0\naccount 1.5 2\nnow 0 0.25\n";

    #[test]
    fn parses_word2vec_text() {
        let model = EmbeddingModel::from_word2vec_text(Cursor::new(TEXT_MODEL)).expect("model");
        assert_eq!(model.dim(), 2);
        assert_eq!(model.vocab_size(), 3);
        assert_eq!(model.get("account"), Some(&[1.5f32, 2.0][..]));
    }

    #[test]
    fn text_tolerates_blank_lines_and_trailing_spaces() {
        let input = "\n2 2\nverify 0.5 -1.0   \n\naccount 1.5 2\n";
        let model = EmbeddingModel::from_word2vec_text(Cursor::new(input)).expect("model");
        assert_eq!(model.vocab_size(), 2);
    }

    #[test]
    fn text_rejects_bad_float_with_line_number() {
        let input = "1 2\nverify 0.5 nope\n";
        let err = EmbeddingModel::from_word2vec_text(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, EmbeddingError::Parse { line: 2, .. }));
    }

    #[test]
    fn text_rejects_count_mismatch() {
        let input = "5 2\nverify 0.5 1\n";
        let err = EmbeddingModel::from_word2vec_text(Cursor::new(input)).unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::VocabCountMismatch {
                declared: 5,
                actual: 1
            }
        ));
    }

    #[test]
    fn text_rejects_short_row() {
        let input = "1 3\nverify 0.5 1\n";
        let err = EmbeddingModel::from_word2vec_text(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, EmbeddingError::DimensionMismatch { .. }));
    }

    #[test]
    fn text_rejects_missing_header() {
        let err = EmbeddingModel::from_word2vec_text(Cursor::new("")).unwrap_err();
        assert!(matches!(err, EmbeddingError::Parse { line: 1, .. }));

        let err = EmbeddingModel::from_word2vec_text(Cursor::new("verify 0.5 1\n")).unwrap_err();
        assert!(matches!(err, EmbeddingError::Parse { .. }));
    }

    #[test]
    fn parses_json() {
        let json = r#"{"vector_size": 2, "vectors": {"verify": [0.5, -1.0], "now": [0, 0.25]}}"#;
        let model = EmbeddingModel::from_json_reader(Cursor::new(json)).expect("model");
        assert_eq!(model.dim(), 2);
        assert_eq!(model.get("now"), Some(&[0.0f32, 0.25][..]));
    }

    #[test]
    fn json_rejects_wrong_length() {
        let json = r#"{"vector_size": 3, "vectors": {"verify": [0.5, -1.0]}}"#;
        let err = EmbeddingModel::from_json_reader(Cursor::new(json)).unwrap_err();
        assert!(matches!(err, EmbeddingError::DimensionMismatch { .. }));
    }

    #[test]
    fn load_dispatches_on_extension() {
        let mut file = tempfile::Builder::new()
            .suffix(".vec")
            .tempfile()
            .expect("tempfile");
        file.write_all(TEXT_MODEL.as_bytes()).expect("write");
        let model = EmbeddingModel::load(file.path()).expect("load");
        assert_eq!(model.vocab_size(), 3);
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let file = tempfile::Builder::new()
            .suffix(".pkl")
            .tempfile()
            .expect("tempfile");
        let err = EmbeddingModel::load(file.path()).unwrap_err();
        assert!(matches!(err, EmbeddingError::UnsupportedFormat(_)));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = EmbeddingModel::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, EmbeddingError::Io(_)));
    }
}
