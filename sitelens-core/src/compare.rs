//! Side-by-side comparison of two aggregated sites.
//!
//! Everything here is a pure function of the two datasets: the same inputs always
//! produce the same [`ComparisonResult`].

use crate::dataset::{ErrorEntry, SiteDataset};
use crate::similarity::{
    alt_text_percentage, content_richness, content_similarity, images_with_alt, interactivity,
    keyword_similarity, overall_similarity, pages_per_element, percentage_difference, round_to,
    seo_score, structure_similarity, technical_similarity, total_elements,
};
use serde::{Deserialize, Serialize};
use sitelens_scanner::content::SocialLink;
use sitelens_scanner::urls::is_same_domain;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// Members of two sets, split by where they occur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDiff<T> {
    pub first: Vec<T>,
    pub second: Vec<T>,
    pub unique_to_first: Vec<T>,
    pub unique_to_second: Vec<T>,
    pub common: Vec<T>,
}

impl<T: Ord + Clone> SetDiff<T> {
    pub fn new(first: &BTreeSet<T>, second: &BTreeSet<T>) -> Self {
        Self {
            first: first.iter().cloned().collect(),
            second: second.iter().cloned().collect(),
            unique_to_first: first.difference(second).cloned().collect(),
            unique_to_second: second.difference(first).cloned().collect(),
            common: first.intersection(second).cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountDelta {
    pub first: usize,
    pub second: usize,
    pub difference: i64,
}

impl CountDelta {
    pub fn new(first: usize, second: usize) -> Self {
        Self {
            first,
            second,
            difference: first as i64 - second as i64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    First,
    Second,
    Tie,
}

impl Winner {
    /// Higher score wins.
    pub fn by_score(first: f64, second: f64) -> Self {
        match first.partial_cmp(&second) {
            Some(Ordering::Greater) => Winner::First,
            Some(Ordering::Less) => Winner::Second,
            _ => Winner::Tie,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::First => write!(f, "Website 1"),
            Winner::Second => write!(f, "Website 2"),
            Winner::Tie => write!(f, "Tie"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreComparison {
    pub first: f64,
    pub second: f64,
    pub difference: f64,
    pub winner: Winner,
}

impl ScoreComparison {
    pub fn new(first: f64, second: f64) -> Self {
        Self {
            first,
            second,
            difference: round_to(first - second, 2),
            winner: Winner::by_score(first, second),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimilarityLevel {
    #[serde(rename = "Very High")]
    VeryHigh,
    High,
    Medium,
    Low,
    #[serde(rename = "Very Low")]
    VeryLow,
}

impl SimilarityLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            SimilarityLevel::VeryHigh
        } else if score >= 60.0 {
            SimilarityLevel::High
        } else if score >= 40.0 {
            SimilarityLevel::Medium
        } else if score >= 20.0 {
            SimilarityLevel::Low
        } else {
            SimilarityLevel::VeryLow
        }
    }
}

impl fmt::Display for SimilarityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SimilarityLevel::VeryHigh => "Very High",
            SimilarityLevel::High => "High",
            SimilarityLevel::Medium => "Medium",
            SimilarityLevel::Low => "Low",
            SimilarityLevel::VeryLow => "Very Low",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub first_domain: String,
    pub second_domain: String,
    pub first_pages: usize,
    pub second_pages: usize,
    pub first_total_words: usize,
    pub second_total_words: usize,
    pub first_total_links: usize,
    pub second_total_links: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralDiff {
    pub pages_count: CountDelta,
    pub navigation_structure: SetDiff<String>,
    pub page_titles: SetDiff<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCountDelta {
    #[serde(flatten)]
    pub counts: CountDelta,
    pub percentage_difference: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordDiff {
    #[serde(flatten)]
    pub sets: SetDiff<String>,
    pub similarity_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentElements {
    pub images: CountDelta,
    pub forms: CountDelta,
    pub tables: CountDelta,
    pub lists: CountDelta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDiff {
    pub word_count: WordCountDelta,
    pub keywords: KeywordDiff,
    pub content_elements: ContentElements,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalDiff {
    pub technologies: SetDiff<String>,
    pub meta_tags: CountDelta,
    pub social_links: SetDiff<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormsAnalysis {
    pub first_forms: usize,
    pub second_forms: usize,
    pub first_methods: BTreeSet<String>,
    pub second_methods: BTreeSet<String>,
    pub first_input_types: BTreeSet<String>,
    pub second_input_types: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkBreakdown {
    pub total: usize,
    pub internal: usize,
    pub external: usize,
}

impl LinkBreakdown {
    fn of(site: &SiteDataset) -> Self {
        let internal = site
            .all_links
            .iter()
            .filter(|link| is_same_domain(&site.domain, link))
            .count();
        Self {
            total: site.all_links.len(),
            internal,
            external: site.all_links.len() - internal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinksAnalysis {
    pub first: LinkBreakdown,
    pub second: LinkBreakdown,
    pub internal_difference: i64,
    pub external_difference: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorsAnalysis {
    pub first_errors: usize,
    pub second_errors: usize,
    pub first_error_details: Vec<ErrorEntry>,
    pub second_error_details: Vec<ErrorEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionalityDiff {
    pub forms_analysis: FormsAnalysis,
    pub links_analysis: LinksAnalysis,
    pub errors: ErrorsAnalysis,
    pub interactions: SetDiff<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessibilityComparison {
    pub alt_texts: CountDelta,
    pub alt_text_percentage: ScoreComparison,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceComparison {
    pub total_elements: CountDelta,
    pub pages_per_element: ScoreComparison,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedAnalysis {
    pub content_richness: ScoreComparison,
    pub interactivity_level: ScoreComparison,
    pub seo_indicators: ScoreComparison,
    pub accessibility_features: AccessibilityComparison,
    pub performance_indicators: PerformanceComparison,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityScores {
    pub keyword: f64,
    pub structure: f64,
    pub content: f64,
    pub technical: f64,
    pub overall: f64,
    pub level: SimilarityLevel,
}

impl SimilarityScores {
    pub fn between(a: &SiteDataset, b: &SiteDataset) -> Self {
        let keyword = keyword_similarity(&a.unique_keywords, &b.unique_keywords);
        let structure = structure_similarity(a, b);
        let content = content_similarity(a, b);
        let technical = technical_similarity(a, b);
        let overall = overall_similarity(keyword, structure, content, technical);

        Self {
            keyword,
            structure,
            content,
            technical,
            overall,
            level: SimilarityLevel::from_score(overall),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub overview: Overview,
    pub structure_differences: StructuralDiff,
    pub content_differences: ContentDiff,
    pub technical_differences: TechnicalDiff,
    pub functionality_differences: FunctionalityDiff,
    pub detailed_analysis: DetailedAnalysis,
    pub similarity: SimilarityScores,
}

pub fn compare(a: &SiteDataset, b: &SiteDataset) -> ComparisonResult {
    ComparisonResult {
        overview: Overview {
            first_domain: a.domain.clone(),
            second_domain: b.domain.clone(),
            first_pages: a.page_count(),
            second_pages: b.page_count(),
            first_total_words: a.total_word_count,
            second_total_words: b.total_word_count,
            first_total_links: a.all_links.len(),
            second_total_links: b.all_links.len(),
        },
        structure_differences: StructuralDiff {
            pages_count: CountDelta::new(a.page_count(), b.page_count()),
            navigation_structure: SetDiff::new(&a.navigation_structure, &b.navigation_structure),
            page_titles: SetDiff::new(&a.page_titles, &b.page_titles),
        },
        content_differences: ContentDiff {
            word_count: WordCountDelta {
                counts: CountDelta::new(a.total_word_count, b.total_word_count),
                percentage_difference: percentage_difference(
                    a.total_word_count,
                    b.total_word_count,
                ),
            },
            keywords: KeywordDiff {
                sets: SetDiff::new(&a.unique_keywords, &b.unique_keywords),
                similarity_percentage: keyword_similarity(&a.unique_keywords, &b.unique_keywords),
            },
            content_elements: ContentElements {
                images: CountDelta::new(a.total_images, b.total_images),
                forms: CountDelta::new(a.total_forms, b.total_forms),
                tables: CountDelta::new(a.total_tables, b.total_tables),
                lists: CountDelta::new(a.total_lists, b.total_lists),
            },
        },
        technical_differences: TechnicalDiff {
            technologies: SetDiff::new(&a.technologies_detected, &b.technologies_detected),
            meta_tags: CountDelta::new(a.meta_tags.len(), b.meta_tags.len()),
            social_links: SetDiff::new(&social_set(a), &social_set(b)),
        },
        functionality_differences: functionality(a, b),
        detailed_analysis: DetailedAnalysis {
            content_richness: ScoreComparison::new(content_richness(a), content_richness(b)),
            interactivity_level: ScoreComparison::new(interactivity(a), interactivity(b)),
            seo_indicators: ScoreComparison::new(seo_score(a), seo_score(b)),
            accessibility_features: AccessibilityComparison {
                alt_texts: CountDelta::new(images_with_alt(a), images_with_alt(b)),
                alt_text_percentage: ScoreComparison::new(
                    alt_text_percentage(a),
                    alt_text_percentage(b),
                ),
            },
            performance_indicators: PerformanceComparison {
                total_elements: CountDelta::new(total_elements(a), total_elements(b)),
                pages_per_element: ScoreComparison::new(
                    pages_per_element(a),
                    pages_per_element(b),
                ),
            },
        },
        similarity: SimilarityScores::between(a, b),
    }
}

/// Social links keyed by URL; the same profile linked from many pages counts once.
fn social_set(site: &SiteDataset) -> BTreeSet<SocialLink> {
    let mut seen = BTreeSet::new();
    site.social_links
        .iter()
        .filter(|link| seen.insert(link.url.clone()))
        .cloned()
        .collect()
}

fn functionality(a: &SiteDataset, b: &SiteDataset) -> FunctionalityDiff {
    let methods = |site: &SiteDataset| -> BTreeSet<String> {
        site.all_forms.iter().map(|f| f.method.to_lowercase()).collect()
    };
    let input_types = |site: &SiteDataset| -> BTreeSet<String> {
        site.all_forms
            .iter()
            .flat_map(|f| f.inputs.iter().map(|i| i.input_type.clone()))
            .collect()
    };

    let first_links = LinkBreakdown::of(a);
    let second_links = LinkBreakdown::of(b);

    FunctionalityDiff {
        forms_analysis: FormsAnalysis {
            first_forms: a.total_forms,
            second_forms: b.total_forms,
            first_methods: methods(a),
            second_methods: methods(b),
            first_input_types: input_types(a),
            second_input_types: input_types(b),
        },
        links_analysis: LinksAnalysis {
            internal_difference: first_links.internal as i64 - second_links.internal as i64,
            external_difference: first_links.external as i64 - second_links.external as i64,
            first: first_links,
            second: second_links,
        },
        errors: ErrorsAnalysis {
            first_errors: a.errors.len(),
            second_errors: b.errors.len(),
            first_error_details: a.errors.clone(),
            second_error_details: b.errors.clone(),
        },
        interactions: SetDiff::new(&a.interaction_texts(), &b.interaction_texts()),
    }
}
