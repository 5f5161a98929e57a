// Tests for side-by-side site comparison

use sitelens_core::{SimilarityLevel, SiteDataset, Winner, compare};
use sitelens_scanner::content::{FormInfo, FormInput, ImageInfo, MetaTag};
use sitelens_scanner::{ElementSignature, PageData, VisitRecord};

fn site(base: &str, title: &str, words: usize, keywords: &[&str]) -> SiteDataset {
    let mut data = PageData {
        title: title.to_string(),
        word_count: words,
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        links: vec![format!("{}about", base), "https://elsewhere.test/".to_string()],
        meta_tags: vec![MetaTag {
            name: "viewport".to_string(),
            content: "width=device-width".to_string(),
            ..Default::default()
        }],
        ..Default::default()
    };
    data.structure.has_navigation = true;
    SiteDataset::aggregate(base, &[VisitRecord::loaded(base, 0, data)])
}

#[test]
fn test_identical_sites_are_fully_similar() {
    let a = site("http://a.test/", "Home", 300, &["rust", "crawler"]);
    let result = compare(&a, &a.clone());

    assert_eq!(result.similarity.keyword, 100.0);
    assert_eq!(result.similarity.structure, 100.0);
    assert_eq!(result.similarity.content, 100.0);
    assert_eq!(result.similarity.technical, 100.0);
    assert_eq!(result.similarity.overall, 100.0);
    assert_eq!(result.similarity.level, SimilarityLevel::VeryHigh);
    assert_eq!(result.detailed_analysis.content_richness.winner, Winner::Tie);
}

#[test]
fn test_identical_sites_without_landmarks_or_meta() {
    let data = PageData {
        title: "Home".to_string(),
        keywords: vec!["rust".to_string()],
        ..Default::default()
    };
    let records = [VisitRecord::loaded("http://a.test/", 0, data)];
    let a = SiteDataset::aggregate("http://a.test/", &records);
    let result = compare(&a, &a.clone());

    // empty landmark and technology sets have a Jaccard of 0, even against themselves
    assert_eq!(result.similarity.keyword, 100.0);
    assert_eq!(result.similarity.structure, 66.7);
    assert_eq!(result.similarity.content, 100.0);
    assert_eq!(result.similarity.technical, 50.0);
    assert_eq!(result.similarity.overall, 81.7);
    assert_eq!(result.similarity.level, SimilarityLevel::VeryHigh);
}

#[test]
fn test_comparison_is_deterministic() {
    let a = site("http://a.test/", "Home", 300, &["rust"]);
    let b = site("http://b.test/", "Start", 100, &["go"]);
    assert_eq!(compare(&a, &b), compare(&a, &b));
}

#[test]
fn test_overview_and_word_difference() {
    let a = site("http://a.test/", "Home", 300, &["rust"]);
    let b = site("http://b.test/", "Start", 200, &["rust", "async"]);
    let result = compare(&a, &b);

    assert_eq!(result.overview.first_domain, "a.test");
    assert_eq!(result.overview.second_domain, "b.test");
    assert_eq!(result.overview.first_total_words, 300);

    let words = &result.content_differences.word_count;
    assert_eq!(words.counts.difference, 100);
    assert_eq!(words.percentage_difference, 50.0);

    let keywords = &result.content_differences.keywords;
    assert_eq!(keywords.sets.common, vec!["rust".to_string()]);
    assert_eq!(keywords.sets.unique_to_second, vec!["async".to_string()]);
    assert!(keywords.sets.unique_to_first.is_empty());
    assert_eq!(keywords.similarity_percentage, 50.0);
}

#[test]
fn test_technology_and_title_diffs() {
    let a = site("http://a.test/", "Home", 10, &[]);
    let mut b = site("http://b.test/", "Home", 10, &[]);
    b.technologies_detected.insert("WordPress".to_string());

    let result = compare(&a, &b);
    let techs = &result.technical_differences.technologies;
    assert_eq!(techs.common, vec!["Responsive Design".to_string()]);
    assert_eq!(techs.unique_to_second, vec!["WordPress".to_string()]);
    assert_eq!(result.structure_differences.page_titles.common.len(), 1);
    assert_eq!(result.similarity.keyword, 100.0);
}

#[test]
fn test_technology_unique_to_first() {
    let mut a = site("http://a.test/", "Home", 10, &[]);
    a.technologies_detected.insert("WordPress".to_string());
    let mut b = site("http://b.test/", "Home", 10, &[]);
    b.technologies_detected = ["WordPress".to_string()].into_iter().collect();

    let techs = compare(&a, &b).technical_differences.technologies;
    assert_eq!(techs.unique_to_first, vec!["Responsive Design".to_string()]);
    assert_eq!(techs.common, vec!["WordPress".to_string()]);
    assert!(techs.unique_to_second.is_empty());
}

#[test]
fn test_link_breakdown_uses_site_domain() {
    let a = site("http://a.test/", "Home", 10, &[]);
    let b = site("http://b.test/", "Home", 10, &[]);
    let links = compare(&a, &b).functionality_differences.links_analysis;

    assert_eq!(links.first.total, 2);
    assert_eq!(links.first.internal, 1);
    assert_eq!(links.first.external, 1);
    assert_eq!(links.internal_difference, 0);
}

#[test]
fn test_forms_and_detailed_winners() {
    let a = site("http://a.test/", "Home", 10, &[]);
    let mut b = site("http://b.test/", "Home", 10, &[]);
    b.total_forms = 2;
    b.all_forms = vec![FormInfo {
        action: "/login".to_string(),
        method: "POST".to_string(),
        inputs: vec![FormInput {
            input_type: "password".to_string(),
            name: "pw".to_string(),
            ..Default::default()
        }],
    }];
    b.all_images = vec![ImageInfo {
        alt: "Logo".to_string(),
        ..Default::default()
    }];

    let result = compare(&a, &b);
    let forms = &result.functionality_differences.forms_analysis;
    assert!(forms.second_methods.contains("post"));
    assert!(forms.second_input_types.contains("password"));
    assert!(forms.first_methods.is_empty());

    let detailed = &result.detailed_analysis;
    assert_eq!(detailed.content_richness.winner, Winner::Second);
    assert_eq!(detailed.interactivity_level.winner, Winner::Second);
    assert_eq!(detailed.interactivity_level.difference, -10.0);
    assert_eq!(
        detailed.accessibility_features.alt_text_percentage.winner,
        Winner::Second
    );
    assert_eq!(detailed.accessibility_features.alt_texts.second, 1);
}

#[test]
fn test_interaction_and_error_diffs() {
    let button = |text: &str| ElementSignature::new("button", text, "submit");
    let a = SiteDataset::aggregate(
        "http://a.test/",
        &[
            VisitRecord::not_found("http://a.test/", 0, button("Menu"), "missing"),
            VisitRecord::mutated("http://a.test/", 0, button("Search"), PageData::default()),
        ],
    );
    let b = SiteDataset::aggregate(
        "http://b.test/",
        &[VisitRecord::mutated(
            "http://b.test/",
            0,
            button("Search"),
            PageData::default(),
        )],
    );

    let functionality = compare(&a, &b).functionality_differences;
    assert_eq!(functionality.interactions.common, vec!["Search".to_string()]);
    assert_eq!(functionality.interactions.unique_to_first, vec!["Menu".to_string()]);
    assert_eq!(functionality.errors.first_errors, 1);
    assert_eq!(functionality.errors.second_errors, 0);
}

#[test]
fn test_disjoint_sites_score_low() {
    let a = SiteDataset {
        unique_keywords: ["alpha".to_string()].into(),
        page_titles: ["A".to_string()].into(),
        total_images: 10,
        ..Default::default()
    };
    let b = SiteDataset {
        unique_keywords: ["beta".to_string()].into(),
        page_titles: ["B".to_string()].into(),
        total_forms: 4,
        ..Default::default()
    };

    let similarity = compare(&a, &b).similarity;
    assert_eq!(similarity.keyword, 0.0);
    assert_eq!(similarity.level, SimilarityLevel::VeryLow);
}

#[test]
fn test_result_serializes_level_label() {
    let a = site("http://a.test/", "Home", 10, &["x"]);
    let json = serde_json::to_value(compare(&a, &a)).unwrap();
    assert_eq!(json["similarity"]["level"], "Very High");
    assert_eq!(json["detailed_analysis"]["seo_indicators"]["winner"], "tie");
    assert!(json["content_differences"]["word_count"]["percentage_difference"].is_number());
    assert!(json["content_differences"]["word_count"]["difference"].is_number());
}
