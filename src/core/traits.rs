//! Trait abstractions at the model seam.
//!
//! The harness treats classifiers as black-box estimators behind
//! [`BinaryClassifier`]; boosted-tree and MLP implementations live outside
//! this crate and only need to honor the fit/predict/predict_proba contract.

use crate::core::error::{Result, SleepStageError};
use crate::core::types::{Label, Score};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Contract for binary classifiers evaluated by the harness.
///
/// `fit` is called once per fold; `predict` returns hard 0/1 labels and
/// `predict_proba` per-row `[p(class 0), p(class 1)]` pairs. Errors from any
/// of the three propagate uncaught; the harness does not mask model-level
/// failures.
pub trait BinaryClassifier {
    /// Fit the model on a feature matrix and binary label vector.
    fn fit(&mut self, features: ArrayView2<'_, Score>, labels: ArrayView1<'_, Label>)
        -> Result<()>;

    /// Predict hard 0/1 labels for each row.
    fn predict(&self, features: ArrayView2<'_, Score>) -> Result<Array1<Label>>;

    /// Predict class probabilities, one `[p0, p1]` row per input row.
    fn predict_proba(&self, features: ArrayView2<'_, Score>) -> Result<Array2<Score>>;

    /// Positive-class probabilities, the second column of `predict_proba`.
    fn predict_positive_proba(&self, features: ArrayView2<'_, Score>) -> Result<Array1<Score>> {
        let proba = self.predict_proba(features)?;
        if proba.ncols() != 2 {
            return Err(SleepStageError::prediction(format!(
                "predict_proba returned {} columns, expected 2",
                proba.ncols()
            )));
        }
        Ok(proba.column(1).to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed-probability stand-in used to exercise the trait surface.
    struct Fixed(Score);

    impl BinaryClassifier for Fixed {
        fn fit(
            &mut self,
            _features: ArrayView2<'_, Score>,
            _labels: ArrayView1<'_, Label>,
        ) -> Result<()> {
            Ok(())
        }

        fn predict(&self, features: ArrayView2<'_, Score>) -> Result<Array1<Label>> {
            let hard = if self.0 >= 0.5 { 1.0 } else { 0.0 };
            Ok(Array1::from_elem(features.nrows(), hard))
        }

        fn predict_proba(&self, features: ArrayView2<'_, Score>) -> Result<Array2<Score>> {
            let mut proba = Array2::zeros((features.nrows(), 2));
            proba.column_mut(0).fill(1.0 - self.0);
            proba.column_mut(1).fill(self.0);
            Ok(proba)
        }
    }

    #[test]
    fn test_positive_proba_is_second_column() {
        let model = Fixed(0.7);
        let features = Array2::zeros((4, 3));
        let positive = model.predict_positive_proba(features.view()).unwrap();
        assert_eq!(positive.len(), 4);
        for &p in positive.iter() {
            assert!((p - 0.7).abs() < 1e-6);
        }
    }
}
