//! Seeded synthetic venue generator for tests and benchmarks.
//!
//! Produces four quality tiers so fitted models have real structure to
//! recover: premium places (high rating, many reviews), hidden gems (high
//! rating, few reviews), average places, and below-average places.

use vr_common::VenueRecord;
use vr_math::NormalSampler;

const CATEGORIES: [&str; 5] = ["restaurant", "cafe", "grocery", "scenic", "indoor"];

/// Generate `n` venues across the four quality tiers, deterministically
/// from `seed`. Tier shares follow 20/15/45/20 percent.
pub fn generate_venues(n: usize, seed: u64) -> Vec<VenueRecord> {
    let mut sampler = NormalSampler::seeded(seed);
    let mut venues = Vec::with_capacity(n);

    let premium = n * 20 / 100;
    let gems = n * 15 / 100;
    let average = n * 45 / 100;

    for i in 0..premium {
        let mut r = VenueRecord::bare(&format!("hq_{i}"));
        r.category = Some(pick(&mut sampler, &CATEGORIES[..2]));
        r.distance_meters = Some(uniform_in(&mut sampler, 100.0, 1500.0));
        r.rating = Some(uniform_in(&mut sampler, 8.5, 9.8));
        r.review_count = Some(uniform_int(&mut sampler, 200, 1000));
        r.open_now = Some(sampler.bernoulli(0.7));
        r.veg_friendly = Some(sampler.bernoulli(0.4));
        r.has_address = Some(true);
        r.has_phone = Some(true);
        r.has_website = Some(sampler.bernoulli(0.8));
        r.has_hours = Some(true);
        venues.push(r);
    }

    for i in 0..gems {
        let mut r = VenueRecord::bare(&format!("gem_{i}"));
        r.category = Some(pick(&mut sampler, &CATEGORIES));
        r.distance_meters = Some(uniform_in(&mut sampler, 500.0, 2500.0));
        r.rating = Some(uniform_in(&mut sampler, 8.0, 9.5));
        r.review_count = Some(uniform_int(&mut sampler, 20, 80));
        r.open_now = Some(sampler.bernoulli(0.5));
        r.veg_friendly = Some(sampler.bernoulli(0.3));
        r.has_address = Some(true);
        r.has_phone = Some(sampler.bernoulli(0.5));
        r.has_website = Some(sampler.bernoulli(0.4));
        r.has_hours = Some(sampler.bernoulli(0.5));
        venues.push(r);
    }

    for i in 0..average {
        let mut r = VenueRecord::bare(&format!("avg_{i}"));
        r.category = Some(pick(&mut sampler, &CATEGORIES));
        r.distance_meters = Some(uniform_in(&mut sampler, 300.0, 2800.0));
        r.rating = Some(uniform_in(&mut sampler, 6.0, 8.0));
        r.review_count = Some(uniform_int(&mut sampler, 30, 200));
        r.open_now = Some(sampler.bernoulli(0.5));
        r.veg_friendly = Some(sampler.bernoulli(0.2));
        r.has_address = Some(true);
        r.has_phone = Some(sampler.bernoulli(0.6));
        r.has_website = Some(sampler.bernoulli(0.3));
        r.has_hours = Some(sampler.bernoulli(0.5));
        venues.push(r);
    }

    let low = n.saturating_sub(venues.len());
    for i in 0..low {
        let mut r = VenueRecord::bare(&format!("low_{i}"));
        r.category = Some(pick(&mut sampler, &CATEGORIES));
        r.distance_meters = Some(uniform_in(&mut sampler, 1000.0, 3000.0));
        r.rating = Some(uniform_in(&mut sampler, 4.0, 6.5));
        r.review_count = Some(uniform_int(&mut sampler, 5, 50));
        r.open_now = Some(sampler.bernoulli(0.4));
        r.veg_friendly = Some(sampler.bernoulli(0.1));
        r.has_address = Some(sampler.bernoulli(0.5));
        r.has_phone = Some(sampler.bernoulli(0.3));
        r.has_website = Some(false);
        r.has_hours = Some(sampler.bernoulli(0.3));
        venues.push(r);
    }

    venues
}

fn uniform_in(sampler: &mut NormalSampler, lo: f64, hi: f64) -> f64 {
    lo + (hi - lo) * sampler.uniform()
}

fn uniform_int(sampler: &mut NormalSampler, lo: u64, hi: u64) -> u64 {
    lo + ((hi - lo) as f64 * sampler.uniform()) as u64
}

fn pick(sampler: &mut NormalSampler, options: &[&str]) -> String {
    let idx = ((options.len() as f64 * sampler.uniform()) as usize).min(options.len() - 1);
    options[idx].to_string()
}
