use crate::content::{
    FormInfo, FormInput, ImageInfo, ListInfo, MetaTag, PageData, PageStructure, SocialLink,
    TableInfo, NO_TITLE,
};
use crate::error::Result;
use crate::html::{attr, element_text, selector};
use scraper::{ElementRef, Html, Node};
use std::collections::HashMap;

const MAX_HEADINGS: usize = 10;
const MAX_PARAGRAPHS: usize = 5;
const MAX_LINKS: usize = 20;
const MAX_KEYWORDS: usize = 15;
const MAX_IMAGES: usize = 10;
const MAX_LISTS: usize = 5;
const MAX_LIST_ITEMS: usize = 10;

const SOCIAL_PLATFORMS: [&str; 5] = ["facebook", "twitter", "instagram", "linkedin", "youtube"];

const NON_VISIBLE: [&str; 4] = ["script", "style", "noscript", "template"];

// Only words longer than three characters are ever considered, so shorter stop words are omitted.
const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "almost", "alone", "along", "already",
    "also", "although", "always", "among", "amongst", "another", "anyhow", "anyone",
    "anything", "anyway", "anywhere", "around", "back", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below",
    "beside", "besides", "between", "beyond", "both", "bottom", "cannot", "could", "describe",
    "detail", "done", "down", "due", "during", "each", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "former", "formerly", "forty", "found", "four", "from", "front", "full", "further", "give",
    "have", "hence", "here", "hereafter", "hereby", "herein", "hereupon", "hers", "herself",
    "himself", "however", "hundred", "indeed", "interest", "into", "itself", "keep", "last",
    "latter", "latterly", "least", "less", "made", "many", "meanwhile", "might", "mine",
    "more", "moreover", "most", "mostly", "move", "much", "must", "myself", "name", "namely",
    "neither", "never", "nevertheless", "next", "nine", "nobody", "none", "noone", "nothing",
    "nowhere", "often", "once", "only", "onto", "other", "others", "otherwise", "ours",
    "ourselves", "over", "part", "perhaps", "please", "rather", "same", "seem", "seemed",
    "seeming", "seems", "serious", "several", "should", "show", "side", "since", "sincere",
    "sixty", "some", "somehow", "someone", "something", "sometime", "sometimes", "somewhere",
    "still", "such", "system", "take", "than", "that", "their", "them", "themselves", "then",
    "thence", "there", "thereafter", "thereby", "therefore", "therein", "thereupon", "these",
    "they", "thick", "thin", "third", "this", "those", "though", "three", "through",
    "throughout", "thru", "thus", "together", "too", "toward", "towards", "twelve", "twenty",
    "under", "until", "upon", "very", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
    "wherever", "whether", "which", "while", "whither", "whoever", "whole", "whom", "whose",
    "will", "with", "within", "without", "would", "your", "yours", "yourself", "yourselves",
];

/// Turns raw page content into a [`PageData`] record.
pub trait ContentAnalyzer: Send + Sync {
    fn analyze(&self, content: &str) -> Result<PageData>;
}

/// Markup analyzer built on `scraper`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlAnalyzer;

impl HtmlAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl ContentAnalyzer for HtmlAnalyzer {
    fn analyze(&self, content: &str) -> Result<PageData> {
        let document = Html::parse_document(content);

        let title = document
            .select(&selector("title")?)
            .next()
            .map(element_text)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| NO_TITLE.to_string());

        let meta_tags: Vec<MetaTag> = document
            .select(&selector("meta")?)
            .map(|meta| MetaTag {
                name: attr(meta, "name").unwrap_or_default().to_string(),
                content: attr(meta, "content").unwrap_or_default().to_string(),
                property: attr(meta, "property").unwrap_or_default().to_string(),
                charset: attr(meta, "charset").unwrap_or_default().to_string(),
            })
            .collect();

        let meta_description = meta_tags
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case("description"))
            .map(|m| m.content.clone())
            .unwrap_or_default();

        let headings = texts(&document, "h1, h2, h3", MAX_HEADINGS)?;
        let paragraphs = texts(&document, "p", MAX_PARAGRAPHS)?;

        let hrefs: Vec<String> = document
            .select(&selector("a[href]")?)
            .filter_map(|a| attr(a, "href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .map(str::to_string)
            .collect();

        let social_links = hrefs
            .iter()
            .filter_map(|href| {
                let lower = href.to_lowercase();
                SOCIAL_PLATFORMS
                    .iter()
                    .find(|platform| lower.contains(*platform))
                    .map(|platform| SocialLink {
                        platform: platform.to_string(),
                        url: href.clone(),
                    })
            })
            .collect();

        let links = hrefs.into_iter().take(MAX_LINKS).collect();

        let input_selector = selector("input")?;
        let forms = document
            .select(&selector("form")?)
            .map(|form| FormInfo {
                action: attr(form, "action").unwrap_or_default().to_string(),
                method: attr(form, "method").unwrap_or("get").to_lowercase(),
                inputs: form
                    .select(&input_selector)
                    .map(|input| FormInput {
                        input_type: attr(input, "type").unwrap_or("text").to_string(),
                        name: attr(input, "name").unwrap_or_default().to_string(),
                        placeholder: attr(input, "placeholder").unwrap_or_default().to_string(),
                        required: attr(input, "required").is_some(),
                    })
                    .collect(),
            })
            .collect();

        let images = document
            .select(&selector("img")?)
            .take(MAX_IMAGES)
            .map(|img| ImageInfo {
                src: attr(img, "src").unwrap_or_default().to_string(),
                alt: attr(img, "alt").unwrap_or_default().to_string(),
                width: attr(img, "width").unwrap_or_default().to_string(),
                height: attr(img, "height").unwrap_or_default().to_string(),
                title: attr(img, "title").unwrap_or_default().to_string(),
            })
            .collect();

        let row_selector = selector("tr")?;
        let header_selector = selector("th")?;
        let tables = document
            .select(&selector("table")?)
            .map(|table| TableInfo {
                rows: table.select(&row_selector).count(),
                headers: table.select(&header_selector).map(element_text).collect(),
            })
            .collect();

        let item_selector = selector("li")?;
        let lists = document
            .select(&selector("ul, ol")?)
            .take(MAX_LISTS)
            .map(|list| ListInfo {
                kind: list.value().name().to_string(),
                items: list
                    .select(&item_selector)
                    .take(MAX_LIST_ITEMS)
                    .map(element_text)
                    .collect(),
            })
            .collect();

        let text = visible_text(&document);
        let word_count = text.split_whitespace().count();
        let keywords = extract_keywords(&text, MAX_KEYWORDS);

        let structure = PageStructure {
            has_navigation: exists(&document, "nav")?,
            has_header: exists(&document, "header")?,
            has_footer: exists(&document, "footer")?,
            has_main: exists(&document, "main")?,
            has_aside: exists(&document, "aside")?,
        };

        Ok(PageData {
            title,
            meta_description,
            meta_tags,
            headings,
            paragraphs,
            links,
            forms,
            images,
            tables,
            lists,
            social_links,
            word_count,
            keywords,
            structure,
        })
    }
}

fn texts(document: &Html, css: &str, limit: usize) -> Result<Vec<String>> {
    Ok(document
        .select(&selector(css)?)
        .map(element_text)
        .filter(|t| !t.is_empty())
        .take(limit)
        .collect())
}

fn exists(document: &Html, css: &str) -> Result<bool> {
    Ok(document.select(&selector(css)?).next().is_some())
}

/// All text outside script-like elements, one space between text nodes.
fn visible_text(document: &Html) -> String {
    let mut out = String::new();
    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|el| NON_VISIBLE.contains(&el.value().name()));
        if hidden {
            continue;
        }
        let text = text.trim();
        if !text.is_empty() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(text);
        }
    }
    out
}

/// Most frequent non-stop words longer than three characters. Ties rank alphabetically.
pub fn extract_keywords(text: &str, limit: usize) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' || c.is_whitespace() { c } else { ' ' })
        .collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in cleaned.split_whitespace() {
        if word.chars().count() > 3 && !STOP_WORDS.contains(&word) {
            *counts.entry(word).or_default() += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(word, _)| word.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!doctype html>
<html>
<head>
  <title> Acme Widgets </title>
  <meta charset="utf-8">
  <meta name="description" content="Widgets for everyone">
  <meta name="viewport" content="width=device-width">
  <meta property="og:title" content="Acme">
  <style>.hidden { display: none }</style>
  <script>var widgets = "widgets widgets widgets";</script>
</head>
<body>
  <header><nav><a href="/">Home</a><a href="/about">About</a></nav></header>
  <main>
    <h1>Widgets</h1>
    <h2>Premium widgets</h2>
    <p>Widgets are great. Widgets are shiny.</p>
    <p>   </p>
    <img src="/a.png" alt="A widget">
    <img src="/b.png">
    <form action="/subscribe" method="POST">
      <input type="email" name="email" placeholder="you@example.com" required>
      <input name="nick">
      <button>Subscribe</button>
    </form>
    <table><tr><th>Name</th><th>Price</th></tr><tr><td>W</td><td>1</td></tr></table>
    <ul><li>One</li><li>Two</li></ul>
  </main>
  <footer><a href="https://twitter.com/acme">Twitter</a></footer>
</body>
</html>"#;

    #[test]
    fn test_analyze_full_page() {
        let data = HtmlAnalyzer::new().analyze(PAGE).unwrap();

        assert_eq!(data.title, "Acme Widgets");
        assert_eq!(data.meta_description, "Widgets for everyone");
        assert_eq!(data.meta_tags.len(), 4);
        assert_eq!(data.headings, vec!["Widgets", "Premium widgets"]);
        assert_eq!(data.paragraphs.len(), 1);
        assert_eq!(
            data.links,
            vec!["/", "/about", "https://twitter.com/acme"]
        );
        assert_eq!(data.images.len(), 2);
        assert_eq!(data.images[0].alt, "A widget");

        assert_eq!(data.forms.len(), 1);
        let form = &data.forms[0];
        assert_eq!(form.method, "post");
        assert_eq!(form.inputs.len(), 2);
        assert_eq!(form.inputs[0].input_type, "email");
        assert!(form.inputs[0].required);
        assert_eq!(form.inputs[1].input_type, "text");

        assert_eq!(data.tables[0].rows, 2);
        assert_eq!(data.tables[0].headers, vec!["Name", "Price"]);
        assert_eq!(data.lists[0].kind, "ul");
        assert_eq!(data.lists[0].items, vec!["One", "Two"]);

        assert_eq!(data.social_links.len(), 1);
        assert_eq!(data.social_links[0].platform, "twitter");

        assert!(data.structure.has_navigation);
        assert!(data.structure.has_header);
        assert!(data.structure.has_main);
        assert!(data.structure.has_footer);
        assert!(!data.structure.has_aside);
    }

    #[test]
    fn test_script_text_is_not_counted() {
        let data = HtmlAnalyzer::new().analyze(PAGE).unwrap();
        // "widgets" appears in the script three times; only visible occurrences count
        assert_eq!(data.keywords.first().map(String::as_str), Some("widgets"));
        assert!(!data.keywords.iter().any(|k| k == "var"));
        assert!(data.word_count > 10);
    }

    #[test]
    fn test_missing_title() {
        let data = HtmlAnalyzer::new()
            .analyze("<html><body><p>hi</p></body></html>")
            .unwrap();
        assert_eq!(data.title, NO_TITLE);
    }

    #[test]
    fn test_limits_are_applied() {
        let mut html = String::from("<html><body>");
        for i in 0..30 {
            html.push_str(&format!("<h2>Heading {i}</h2><p>Para {i}</p><a href=\"/p{i}\">x</a>"));
            html.push_str(&format!("<img src=\"/{i}.png\"><ul><li>{i}</li></ul>"));
        }
        html.push_str("</body></html>");

        let data = HtmlAnalyzer::new().analyze(&html).unwrap();
        assert_eq!(data.headings.len(), MAX_HEADINGS);
        assert_eq!(data.paragraphs.len(), MAX_PARAGRAPHS);
        assert_eq!(data.links.len(), MAX_LINKS);
        assert_eq!(data.images.len(), MAX_IMAGES);
        assert_eq!(data.lists.len(), MAX_LISTS);
    }

    #[test]
    fn test_keyword_ranking() {
        let keywords = extract_keywords(
            "Rust, rust! RUST crates crates tokio. This that with about",
            10,
        );
        assert_eq!(keywords, vec!["rust", "crates", "tokio"]);
    }

    #[test]
    fn test_keyword_ties_are_alphabetical() {
        let keywords = extract_keywords("zeta alpha mango", 2);
        assert_eq!(keywords, vec!["alpha", "mango"]);
    }
}
