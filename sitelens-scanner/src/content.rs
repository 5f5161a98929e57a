//! Typed analysis record produced by a [`ContentAnalyzer`](crate::analyzer::ContentAnalyzer).

use serde::{Deserialize, Serialize};

pub const NO_TITLE: &str = "No title";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTag {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub property: String,
    #[serde(default)]
    pub charset: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    #[serde(rename = "type")]
    pub input_type: String,
    pub name: String,
    pub placeholder: String,
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInfo {
    pub action: String,
    pub method: String,
    pub inputs: Vec<FormInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub src: String,
    pub alt: String,
    pub width: String,
    pub height: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    pub rows: usize,
    pub headers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListInfo {
    /// `ul` or `ol`
    #[serde(rename = "type")]
    pub kind: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageStructure {
    pub has_navigation: bool,
    pub has_header: bool,
    pub has_footer: bool,
    pub has_main: bool,
    pub has_aside: bool,
}

impl PageStructure {
    /// Names of the structural landmarks present on the page.
    pub fn tags(&self) -> Vec<&'static str> {
        [
            (self.has_navigation, "navigation"),
            (self.has_header, "header"),
            (self.has_footer, "footer"),
            (self.has_main, "main"),
            (self.has_aside, "aside"),
        ]
        .into_iter()
        .filter_map(|(present, tag)| present.then_some(tag))
        .collect()
    }
}

/// Structured content of one page state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageData {
    pub title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub meta_tags: Vec<MetaTag>,
    #[serde(default)]
    pub headings: Vec<String>,
    #[serde(default)]
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub forms: Vec<FormInfo>,
    #[serde(default)]
    pub images: Vec<ImageInfo>,
    #[serde(default)]
    pub tables: Vec<TableInfo>,
    #[serde(default)]
    pub lists: Vec<ListInfo>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
    #[serde(default)]
    pub word_count: usize,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub structure: PageStructure,
}

impl PageData {
    /// Cleans a record received from an analyzer so downstream folds can rely on
    /// trimmed, non-empty strings.
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        if self.title.is_empty() {
            self.title = NO_TITLE.to_string();
        }
        self.meta_description = self.meta_description.trim().to_string();
        clean(&mut self.headings);
        clean(&mut self.paragraphs);
        clean(&mut self.links);
        clean(&mut self.keywords);
        for table in &mut self.tables {
            clean(&mut table.headers);
        }
        for list in &mut self.lists {
            clean(&mut list.items);
        }
        self.social_links.retain(|link| !link.url.trim().is_empty());
        self
    }
}

fn clean(values: &mut Vec<String>) {
    for value in values.iter_mut() {
        let trimmed = value.trim();
        if trimmed.len() != value.len() {
            *value = trimmed.to_string();
        }
    }
    values.retain(|v| !v.is_empty());
}
