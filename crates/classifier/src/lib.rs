//! Phishnet classifiers.
//!
//! Pre-trained models that map a feature vector to the probability that an
//! email is phishing, plus the scaler one of them expects in front of it.
//!
//! - [`StandardScaler`]: per-dimension `(x - mean) / scale`
//! - [`LogisticRegression`]: trained on scaled features
//! - [`RandomForest`]: trained on raw features
//!
//! Both classifiers implement [`BinaryClassifier`]; [`Verdict`] turns a
//! probability into the reported `(label, confidence)` pair.
//!
//! All artifacts are JSON exports of the fitted models. They are validated
//! once at load time, after which every type here is immutable.

pub mod error;

mod artifact;
mod forest;
mod label;
mod logistic;
mod model;
mod scaler;

pub use crate::error::ClassifierError;
pub use crate::forest::{RandomForest, TreeArrays};
pub use crate::label::{
    round_confidence, Label, Verdict, CONFIDENCE_DECIMALS, DECISION_THRESHOLD,
};
pub use crate::logistic::LogisticRegression;
pub use crate::model::BinaryClassifier;
pub use crate::scaler::StandardScaler;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn classifiers_are_object_safe() {
        let lr = LogisticRegression::new(vec![1.0, 0.0], 0.0).expect("lr");
        let rf = RandomForest::from_arrays(
            2,
            &[TreeArrays {
                children_left: vec![-1],
                children_right: vec![-1],
                feature: vec![-2],
                threshold: vec![-2.0],
                value: vec![[1.0, 3.0]],
            }],
        )
        .expect("rf");

        let models: Vec<Box<dyn BinaryClassifier>> = vec![Box::new(lr), Box::new(rf)];
        let probs: Vec<f64> = models
            .iter()
            .map(|m| m.positive_probability(&[0.0, 0.0]).expect("proba"))
            .collect();
        assert_eq!(probs, vec![0.5, 0.75]);
        assert_eq!(models[0].name(), "logistic regression");
        assert_eq!(models[1].name(), "random forest");
    }

    #[test]
    fn load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(br#"{"coef": [1.0], "intercept": 0.0}"#)
            .expect("write");
        let lr = LogisticRegression::load(file.path()).expect("load");
        assert_eq!(lr.n_features(), 1);

        let err = StandardScaler::load(file.path()).unwrap_err();
        assert!(matches!(err, ClassifierError::Json(_)));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = RandomForest::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ClassifierError::Io(_)));
    }
}
