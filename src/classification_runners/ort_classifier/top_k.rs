//! Turning a raw output vector into scored classes.

use std::cmp::Ordering;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::common::Classification;

/// Affine mapping from a quantized integer back to the real value it encodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantParams {
    pub scale: f32,
    pub zero_point: i64,
}

impl Default for QuantParams {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl QuantParams {
    pub const IDENTITY: QuantParams = QuantParams { scale: 1.0, zero_point: 0 };

    pub fn new(scale: f32, zero_point: i64) -> Self {
        Self { scale, zero_point }
    }

    pub fn dequantize(&self, raw: f32) -> f32 {
        self.scale * (raw - self.zero_point as f32)
    }
}

pub fn dequantize(raw: &mut [f32], q: QuantParams) {
    raw.iter_mut().for_each(|x| *x = q.dequantize(*x));
}

fn rank(score: f32) -> f32 {
    if score.is_nan() { f32::NEG_INFINITY } else { score }
}

/// Returns the `k` highest scoring classes, best first.
///
/// The scores are only partitioned around the k-th entry; the top set is
/// then ordered, so the first entry is always a global maximum.
/// NaN scores rank below every number.
pub fn top_k(scores: &[f32], k: usize) -> Result<Vec<Classification>> {
    if k == 0 {
        anyhow::bail!("top_k must be at least 1");
    }
    if k > scores.len() {
        anyhow::bail!("top_k = {} exceeds the {} available classes", k, scores.len());
    }

    let descending = |&a: &usize, &b: &usize| rank(scores[b]).partial_cmp(&rank(scores[a])).unwrap_or(Ordering::Equal);
    let mut order: Vec<usize> = (0..scores.len()).collect();
    if k < order.len() {
        order.select_nth_unstable_by(k - 1, descending);
        order.truncate(k);
    }
    order.sort_by(descending);

    Ok(order
        .into_iter()
        .map(|i| Classification::new(i, scores[i]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_1_is_global_max() {
        let scores = [0.1, 0.7, 0.05, 0.9, 0.2];
        let top = top_k(&scores, 1).unwrap();
        assert_eq!(top, vec![Classification::new(3, 0.9)]);
    }

    #[test]
    fn top_1_first_scenario() {
        let top = top_k(&[0.9, 0.05, 0.03, 0.02], 1).unwrap();
        assert_eq!(top[0].class_id, 0);
        assert_eq!(top[0].score, 0.9);
    }

    #[test]
    fn top_k_is_the_top_set() {
        let scores = [5., 1., 9., 3., 7., 2.];
        let mut ids: Vec<usize> = top_k(&scores, 3).unwrap().iter().map(|c| c.class_id).collect();
        ids.sort();
        assert_eq!(ids, vec![0, 2, 4]);
    }

    #[test]
    fn top_set_is_best_first() {
        let ids: Vec<usize> = top_k(&[5., 1., 9., 3., 7., 2.], 3).unwrap().iter().map(|c| c.class_id).collect();
        assert_eq!(ids, vec![2, 4, 0]);
    }

    #[test]
    fn scores_are_read_back_from_vector() {
        let scores = [0.3, 0.8, 0.1, 0.6];
        for c in top_k(&scores, 2).unwrap() {
            assert_eq!(c.score, scores[c.class_id]);
        }
    }

    #[test]
    fn ties_stay_in_top_set() {
        let top = top_k(&[0.5, 0.5, 0.1], 1).unwrap();
        assert!(top[0].class_id == 0 || top[0].class_id == 1);
        assert_eq!(top[0].score, 0.5);
    }

    #[test]
    fn whole_vector() {
        assert_eq!(top_k(&[1., 2.], 2).unwrap().len(), 2);
    }

    #[test]
    fn nan_never_wins() {
        let top = top_k(&[f32::NAN, 0.2, 0.1], 1).unwrap();
        assert_eq!(top[0].class_id, 1);
    }

    #[test]
    fn rejects_bad_k() {
        assert!(top_k(&[1., 2.], 0).is_err());
        assert!(top_k(&[1., 2.], 3).is_err());
        assert!(top_k(&[], 1).is_err());
    }

    #[test]
    fn dequantize_affine() {
        let q = QuantParams::new(0.5, 10);
        assert_eq!(q.dequantize(30.), 10.0);
        assert_eq!(q.dequantize(10.), 0.0);
        assert_eq!(q.dequantize(0.), -5.0);

        let mut raw = vec![12., 255., 0.];
        dequantize(&mut raw, QuantParams::IDENTITY);
        assert_eq!(raw, vec![12., 255., 0.]);
    }

    #[test]
    fn dequantize_preserves_argmax_for_positive_scale() {
        let mut raw = vec![3., 200., 17., 199.];
        dequantize(&mut raw, QuantParams::new(0.00390625, 128));
        assert_eq!(top_k(&raw, 1).unwrap()[0].class_id, 1);
    }
}
