//! Similarity primitives and composite site scores.
//!
//! The caps inside the composite scores are fixed so that results stay comparable
//! between runs and with previously saved comparisons.

use crate::dataset::SiteDataset;
use std::collections::BTreeSet;

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// `|a ∩ b| / |a ∪ b|` as a percentage. Two empty sets score 0.
pub fn jaccard<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union.max(1) as f64 * 100.0
}

/// Maps the relative gap between two counts onto 0..=100.
pub fn closeness(x: usize, y: usize) -> f64 {
    let gap = x.abs_diff(y) as f64;
    100.0 - gap / x.max(y).max(1) as f64 * 100.0
}

/// Jaccard over keyword sets, except that two empty sets are identical.
pub fn keyword_similarity(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => 100.0,
        (true, false) | (false, true) => 0.0,
        (false, false) => round_to(jaccard(a, b), 2),
    }
}

/// `(a - b) / b` as a percentage, 100 when only `b` is zero.
pub fn percentage_difference(a: usize, b: usize) -> f64 {
    match (a, b) {
        (0, 0) => 0.0,
        (_, 0) => 100.0,
        _ => round_to((a as f64 - b as f64) / b as f64 * 100.0, 2),
    }
}

fn average(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len().max(1) as f64
}

pub fn structure_similarity(a: &SiteDataset, b: &SiteDataset) -> f64 {
    round_to(
        average(&[
            jaccard(&a.page_titles, &b.page_titles),
            jaccard(&a.navigation_structure, &b.navigation_structure),
            closeness(a.page_count(), b.page_count()),
        ]),
        1,
    )
}

pub fn content_similarity(a: &SiteDataset, b: &SiteDataset) -> f64 {
    round_to(
        average(&[
            keyword_similarity(&a.unique_keywords, &b.unique_keywords),
            closeness(a.total_images, b.total_images),
            closeness(a.total_forms, b.total_forms),
        ]),
        1,
    )
}

pub fn technical_similarity(a: &SiteDataset, b: &SiteDataset) -> f64 {
    round_to(
        average(&[
            jaccard(&a.technologies_detected, &b.technologies_detected),
            closeness(a.meta_tags.len(), b.meta_tags.len()),
        ]),
        1,
    )
}

/// Weighted blend of the four dimension scores.
pub fn overall_similarity(keyword: f64, structure: f64, content: f64, technical: f64) -> f64 {
    round_to(
        keyword * 0.30 + structure * 0.25 + content * 0.25 + technical * 0.20,
        1,
    )
}

pub fn content_richness(site: &SiteDataset) -> f64 {
    let score = (site.total_word_count as f64 / 1000.0).min(10.0)
        + (site.total_images as f64 * 0.5).min(5.0)
        + (site.total_forms as f64 * 2.0).min(10.0)
        + (site.total_tables as f64 * 3.0).min(6.0)
        + (site.total_lists as f64).min(4.0)
        + (site.unique_keywords.len() as f64 * 0.2).min(5.0);
    round_to(score, 2)
}

pub fn interactivity(site: &SiteDataset) -> f64 {
    let score = (site.total_forms as f64 * 5.0).min(25.0)
        + (site.all_links.len() as f64 * 0.1).min(10.0)
        + (site.page_count() as f64 * 2.0).min(20.0);
    round_to(score, 2)
}

pub fn seo_score(site: &SiteDataset) -> f64 {
    let score = (site.meta_tags.len() as f64 * 2.0).min(20.0)
        + (site.unique_keywords.len() as f64 * 0.5).min(15.0)
        + (site.total_word_count as f64 / 500.0).min(10.0)
        + (site.all_links.len() as f64 * 0.2).min(10.0);
    round_to(score, 2)
}

pub fn images_with_alt(site: &SiteDataset) -> usize {
    site.all_images
        .iter()
        .filter(|img| !img.alt.trim().is_empty())
        .count()
}

pub fn alt_text_percentage(site: &SiteDataset) -> f64 {
    round_to(
        images_with_alt(site) as f64 / site.all_images.len().max(1) as f64 * 100.0,
        2,
    )
}

pub fn total_elements(site: &SiteDataset) -> usize {
    site.total_images + site.total_forms + site.total_tables
}

pub fn pages_per_element(site: &SiteDataset) -> f64 {
    round_to(
        site.page_count() as f64 / total_elements(site).max(1) as f64,
        2,
    )
}
