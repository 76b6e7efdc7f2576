//! Proxy training labels.
//!
//! Until real user feedback exists, "liked" is derived from observable
//! quality signals: a venue counts as liked when its rating and review
//! volume both clear fixed thresholds. When the rating signal is entirely
//! absent from the input, a seeded Bernoulli fallback keeps fitting from
//! hard-failing on malformed data; that path is a degraded mode, not a
//! modeling recommendation.

use vr_common::VenueRecord;
use vr_math::NormalSampler;

/// Minimum rating (0-10 scale) for a proxy-positive label.
pub const PROXY_RATING_THRESHOLD: f64 = 4.2;

/// Minimum review count for a proxy-positive label.
pub const PROXY_REVIEW_THRESHOLD: u64 = 100;

/// Positive rate of the degraded random-label fallback.
pub const FALLBACK_POSITIVE_RATE: f64 = 0.3;

/// Derive binary labels for `records`.
///
/// Deterministic for any input where at least one record carries a rating:
/// label 1 iff rating >= 4.2 AND review_count >= 100, with missing fields
/// treated as 0. If no record carries a rating at all, falls back to seeded
/// Bernoulli(0.3) draws and logs a degraded-quality warning.
pub fn proxy_labels(records: &[VenueRecord], seed: u64) -> Vec<u8> {
    let rating_signal_present = records.iter().any(|r| r.rating.is_some());

    let labels: Vec<u8> = if rating_signal_present {
        records
            .iter()
            .map(|r| {
                let rating_ok = r.rating.unwrap_or(0.0) >= PROXY_RATING_THRESHOLD;
                let reviews_ok = r.review_count.unwrap_or(0) >= PROXY_REVIEW_THRESHOLD;
                u8::from(rating_ok && reviews_ok)
            })
            .collect()
    } else {
        tracing::warn!(
            target: "labels.proxy",
            n_records = records.len(),
            "rating signal absent from input; falling back to random labels"
        );
        let mut sampler = NormalSampler::seeded(seed);
        records
            .iter()
            .map(|_| u8::from(sampler.bernoulli(FALLBACK_POSITIVE_RATE)))
            .collect()
    };

    let positives: usize = labels.iter().map(|l| *l as usize).sum();
    tracing::debug!(
        target: "labels.proxy",
        positives,
        total = labels.len(),
        rate = if labels.is_empty() { 0.0 } else { positives as f64 / labels.len() as f64 },
        "proxy labels derived"
    );

    labels
}
