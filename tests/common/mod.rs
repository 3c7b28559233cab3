//! Common test utilities for the sleep-stage harness integration tests.

use eeg_sleepstage::*;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rand::prelude::*;

/// Classifier that predicts the positive class with a fixed probability.
pub struct ConstantClassifier {
    pub probability: Score,
}

impl ConstantClassifier {
    pub fn coin_flip() -> Self {
        ConstantClassifier { probability: 0.5 }
    }
}

impl BinaryClassifier for ConstantClassifier {
    fn fit(&mut self, _: ArrayView2<'_, Score>, _: ArrayView1<'_, Label>) -> Result<()> {
        Ok(())
    }

    fn predict(&self, features: ArrayView2<'_, Score>) -> Result<Array1<Label>> {
        let hard = if self.probability >= 0.5 { 1.0 } else { 0.0 };
        Ok(Array1::from_elem(features.nrows(), hard))
    }

    fn predict_proba(&self, features: ArrayView2<'_, Score>) -> Result<Array2<Score>> {
        let mut proba = Array2::zeros((features.nrows(), 2));
        proba.column_mut(0).fill(1.0 - self.probability);
        proba.column_mut(1).fill(self.probability);
        Ok(proba)
    }
}

/// Classifier that thresholds on the mean of the first feature column,
/// learned during fit. Separates any dataset where the first column
/// correlates with the label.
pub struct MeanThresholdClassifier {
    threshold: Option<Score>,
}

impl MeanThresholdClassifier {
    pub fn new() -> Self {
        MeanThresholdClassifier { threshold: None }
    }

    fn score_row(&self, value: Score) -> Score {
        let threshold = self.threshold.unwrap_or(0.0);
        if value > threshold {
            0.9
        } else {
            0.1
        }
    }
}

impl BinaryClassifier for MeanThresholdClassifier {
    fn fit(&mut self, features: ArrayView2<'_, Score>, _: ArrayView1<'_, Label>) -> Result<()> {
        let column = features.column(0);
        let mean = column.sum() / column.len() as Score;
        self.threshold = Some(mean);
        Ok(())
    }

    fn predict(&self, features: ArrayView2<'_, Score>) -> Result<Array1<Label>> {
        Ok(features
            .column(0)
            .mapv(|value| if self.score_row(value) >= 0.5 { 1.0 } else { 0.0 }))
    }

    fn predict_proba(&self, features: ArrayView2<'_, Score>) -> Result<Array2<Score>> {
        let positive = features.column(0).mapv(|value| self.score_row(value));
        let mut proba = Array2::zeros((features.nrows(), 2));
        for (row, &p) in positive.iter().enumerate() {
            proba[[row, 0]] = 1.0 - p;
            proba[[row, 1]] = p;
        }
        Ok(proba)
    }
}

/// The six anterior power-band column names.
pub fn anterior_columns() -> Vec<String> {
    ANTERIOR_FEATURES.iter().map(|s| s.to_string()).collect()
}

/// Build a feature table with `epochs_per_subject` rows for each of
/// `num_subjects` subjects, alternating labels so every subject carries
/// both classes. The first feature column tracks the label so a threshold
/// model can separate the classes; the rest are seeded noise.
pub fn build_subject_table(num_subjects: usize, epochs_per_subject: usize) -> FeatureTable {
    let rows = num_subjects * epochs_per_subject;
    let columns = anterior_columns();
    let mut rng = StdRng::seed_from_u64(7);

    let mut epoch_ids = Vec::with_capacity(rows);
    let mut stages = Vec::with_capacity(rows);
    let mut features = Array2::zeros((rows, columns.len()));

    for subject in 0..num_subjects {
        for epoch in 0..epochs_per_subject {
            let row = subject * epochs_per_subject + epoch;
            epoch_ids.push(format!("A12-{:03}-{}", subject, epoch));
            let positive = epoch % 2 == 0;
            stages.push(if positive { "2" } else { "W" }.to_string());
            features[[row, 0]] = if positive {
                rng.gen_range(1.0..2.0)
            } else {
                rng.gen_range(-2.0..-1.0)
            };
            for col in 1..columns.len() {
                features[[row, col]] = rng.gen_range(-1.0..1.0);
            }
        }
    }

    FeatureTable::new(epoch_ids, stages, columns, features).unwrap()
}
