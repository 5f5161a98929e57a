//! Rule-based technology detection over page metadata.
//!
//! Every rule looks at one meta tag in isolation and may contribute a tag. Rules only
//! ever add to the result, so the order they run in does not matter.

use sitelens_scanner::content::MetaTag;
use std::collections::BTreeSet;

pub type TechnologyRule = fn(&MetaTag) -> Option<&'static str>;

const PLATFORMS: [(&str, &str); 3] = [
    ("wordpress", "WordPress"),
    ("drupal", "Drupal"),
    ("joomla", "Joomla"),
];

pub const RULES: [TechnologyRule; 4] = [generator, viewport, open_graph, twitter_cards];

fn generator(meta: &MetaTag) -> Option<&'static str> {
    if !meta.name.to_lowercase().contains("generator") {
        return None;
    }
    let content = meta.content.to_lowercase();
    PLATFORMS
        .iter()
        .find(|(needle, _)| content.contains(needle))
        .map(|(_, platform)| *platform)
}

fn viewport(meta: &MetaTag) -> Option<&'static str> {
    meta.name
        .to_lowercase()
        .contains("viewport")
        .then_some("Responsive Design")
}

fn open_graph(meta: &MetaTag) -> Option<&'static str> {
    meta.property
        .to_lowercase()
        .contains("og:")
        .then_some("Open Graph")
}

fn twitter_cards(meta: &MetaTag) -> Option<&'static str> {
    let property = meta.property.to_lowercase();
    let name = meta.name.to_lowercase();
    (property.contains("twitter:") || name.contains("twitter:")).then_some("Twitter Cards")
}

/// Adds every technology the rules recognize in `meta_tags` to `detected`.
pub fn detect_into<'a>(
    meta_tags: impl IntoIterator<Item = &'a MetaTag>,
    detected: &mut BTreeSet<String>,
) {
    for meta in meta_tags {
        for rule in RULES {
            if let Some(tech) = rule(meta) {
                detected.insert(tech.to_string());
            }
        }
    }
}

pub fn detect(meta_tags: &[MetaTag]) -> BTreeSet<String> {
    let mut detected = BTreeSet::new();
    detect_into(meta_tags, &mut detected);
    detected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(name: &str, content: &str, property: &str) -> MetaTag {
        MetaTag {
            name: name.to_string(),
            content: content.to_string(),
            property: property.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_generator_platforms() {
        let tags = detect(&[meta("generator", "WordPress 6.4", "")]);
        assert_eq!(tags, BTreeSet::from(["WordPress".to_string()]));

        let tags = detect(&[meta("Generator", "Drupal 10", "")]);
        assert!(tags.contains("Drupal"));

        assert!(detect(&[meta("generator", "Hugo 0.120", "")]).is_empty());
        assert!(detect(&[meta("description", "built with joomla", "")]).is_empty());
    }

    #[test]
    fn test_social_card_rules() {
        let tags = detect(&[
            meta("", "Acme", "og:title"),
            meta("twitter:card", "summary", ""),
        ]);
        assert!(tags.contains("Open Graph"));
        assert!(tags.contains("Twitter Cards"));
    }

    #[test]
    fn test_rules_are_additive_and_order_insensitive() {
        let tags = vec![
            meta("viewport", "width=device-width", ""),
            meta("generator", "Joomla!", ""),
            meta("", "x", "og:image"),
            meta("", "x", "twitter:site"),
        ];
        let forward = detect(&tags);
        let mut reversed_input = tags.clone();
        reversed_input.reverse();
        let reversed = detect(&reversed_input);

        assert_eq!(forward, reversed);
        assert_eq!(forward.len(), 4);

        let mut existing = BTreeSet::from(["Custom".to_string()]);
        detect_into(&tags, &mut existing);
        assert!(existing.contains("Custom"));
        assert_eq!(existing.len(), 5);
    }
}
