use fxhash::FxHashMap;

use crate::error::EmbeddingError;

/// Read-only token → vector table.
///
/// Vectors are stored back to back in one `f32` buffer; the map only holds
/// row offsets. Built once at startup and shared across request handlers.
#[derive(Debug, Clone)]
pub struct EmbeddingModel {
    dim: usize,
    rows: FxHashMap<String, usize>,
    data: Vec<f32>,
}

impl EmbeddingModel {
    /// Builds a model from `(token, vector)` pairs.
    ///
    /// Every vector must have exactly `dim` values and tokens must be unique.
    pub fn from_entries<I, S>(dim: usize, entries: I) -> Result<Self, EmbeddingError>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        if dim == 0 {
            return Err(EmbeddingError::ZeroDimension);
        }

        let entries = entries.into_iter();
        let (lower, _) = entries.size_hint();
        let mut model = Self {
            dim,
            rows: FxHashMap::with_capacity_and_hasher(lower, Default::default()),
            data: Vec::with_capacity(lower.saturating_mul(dim)),
        };
        for (token, vector) in entries {
            model.insert(token.into(), &vector)?;
        }
        Ok(model)
    }

    pub(crate) fn empty(dim: usize) -> Result<Self, EmbeddingError> {
        Self::from_entries(dim, std::iter::empty::<(String, Vec<f32>)>())
    }

    pub(crate) fn insert(&mut self, token: String, vector: &[f32]) -> Result<(), EmbeddingError> {
        if vector.len() != self.dim {
            return Err(EmbeddingError::DimensionMismatch {
                token,
                expected: self.dim,
                actual: vector.len(),
            });
        }
        if self.rows.contains_key(&token) {
            return Err(EmbeddingError::DuplicateToken(token));
        }
        self.rows.insert(token, self.data.len() / self.dim);
        self.data.extend_from_slice(vector);
        Ok(())
    }

    /// Embedding dimension; every feature vector has this length.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of tokens in the vocabulary.
    pub fn vocab_size(&self) -> usize {
        self.rows.len()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.rows.contains_key(token)
    }

    /// Vector for `token`, or `None` when it is out of vocabulary.
    pub fn get(&self, token: &str) -> Option<&[f32]> {
        self.rows.get(token).map(|&row| {
            let start = row * self.dim;
            &self.data[start..start + self.dim]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_inserted_rows() {
        let model = EmbeddingModel::from_entries(
            2,
            vec![("alpha", vec![1.0, 2.0]), ("beta", vec![3.0, 4.0])],
        )
        .expect("model");

        assert_eq!(model.dim(), 2);
        assert_eq!(model.vocab_size(), 2);
        assert_eq!(model.get("alpha"), Some(&[1.0f32, 2.0][..]));
        assert_eq!(model.get("beta"), Some(&[3.0f32, 4.0][..]));
        assert_eq!(model.get("gamma"), None);
        assert!(model.contains("beta"));
    }

    #[test]
    fn zero_dimension_rejected() {
        let res = EmbeddingModel::from_entries(0, Vec::<(String, Vec<f32>)>::new());
        assert!(matches!(res, Err(EmbeddingError::ZeroDimension)));
    }

    #[test]
    fn short_vector_rejected() {
        let res = EmbeddingModel::from_entries(3, vec![("alpha", vec![1.0, 2.0])]);
        assert!(matches!(
            res,
            Err(EmbeddingError::DimensionMismatch {
                expected: 3,
                actual: 2,
                ..
            })
        ));
    }

    #[test]
    fn duplicate_token_rejected() {
        let res = EmbeddingModel::from_entries(
            1,
            vec![("alpha", vec![1.0]), ("alpha", vec![2.0])],
        );
        assert!(matches!(res, Err(EmbeddingError::DuplicateToken(t)) if t == "alpha"));
    }

    #[test]
    fn empty_vocabulary_is_allowed() {
        let model = EmbeddingModel::empty(4).expect("model");
        assert_eq!(model.vocab_size(), 0);
        assert_eq!(model.dim(), 4);
    }
}
