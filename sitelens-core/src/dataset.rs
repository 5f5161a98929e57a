use crate::tech;
use serde::{Deserialize, Serialize};
use sitelens_scanner::content::{FormInfo, ImageInfo, ListInfo, MetaTag, SocialLink, TableInfo};
use sitelens_scanner::urls::domain_of;
use sitelens_scanner::{ActionKind, CrawlLog, ElementSignature, PageData, VisitRecord};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSummary {
    pub url: String,
    pub title: String,
    pub word_count: usize,
    pub links_count: usize,
    pub images_count: usize,
    pub forms_count: usize,
    pub headings: Vec<String>,
    pub keywords: Vec<String>,
}

impl PageSummary {
    fn new(url: &str, data: &PageData) -> Self {
        Self {
            url: url.to_string(),
            title: data.title.clone(),
            word_count: data.word_count,
            links_count: data.links.len(),
            images_count: data.images.len(),
            forms_count: data.forms.len(),
            headings: data.headings.clone(),
            keywords: data.keywords.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub url: String,
    pub action: ActionKind,
    pub error: String,
}

/// Aggregated view of one crawled site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteDataset {
    pub base_url: String,
    pub domain: String,
    pub pages: Vec<PageSummary>,
    pub all_links: BTreeSet<String>,
    pub unique_keywords: BTreeSet<String>,
    pub page_titles: BTreeSet<String>,
    pub navigation_structure: BTreeSet<String>,
    pub technologies_detected: BTreeSet<String>,
    pub all_forms: Vec<FormInfo>,
    pub all_images: Vec<ImageInfo>,
    pub all_tables: Vec<TableInfo>,
    pub all_lists: Vec<ListInfo>,
    pub social_links: Vec<SocialLink>,
    pub meta_tags: Vec<MetaTag>,
    pub total_word_count: usize,
    pub total_images: usize,
    pub total_forms: usize,
    pub total_tables: usize,
    pub total_lists: usize,
    pub interactions: Vec<ElementSignature>,
    pub errors: Vec<ErrorEntry>,
}

impl SiteDataset {
    /// Folds a session's records, in log order, into one dataset.
    ///
    /// Set-valued fields take every record that carries page data. Counters,
    /// page-level lists and page summaries only take `load` and
    /// `interaction-navigated` records, so an in-place mutation never counts a page twice.
    pub fn aggregate(base_url: &str, records: &[VisitRecord]) -> Self {
        let mut dataset = SiteDataset {
            base_url: base_url.to_string(),
            domain: domain_of(base_url),
            ..Default::default()
        };

        for record in records {
            if let Some(element) = &record.element {
                dataset.interactions.push(element.clone());
            }
            if let Some(data) = &record.data {
                dataset.absorb_sets(data);
                if record.action.is_page() {
                    dataset.absorb_page(&record.url, data);
                }
            }
            if let Some(error) = &record.error {
                dataset.errors.push(ErrorEntry {
                    url: record.url.clone(),
                    action: record.action,
                    error: error.clone(),
                });
            }
        }

        dataset
    }

    pub fn from_log(log: &CrawlLog) -> Self {
        Self::aggregate(&log.seed, &log.records)
    }

    fn absorb_sets(&mut self, data: &PageData) {
        insert_all(&mut self.page_titles, [&data.title]);
        insert_all(&mut self.all_links, &data.links);
        insert_all(&mut self.unique_keywords, &data.keywords);
        insert_all(&mut self.navigation_structure, data.structure.tags());
        tech::detect_into(&data.meta_tags, &mut self.technologies_detected);
    }

    fn absorb_page(&mut self, url: &str, data: &PageData) {
        self.total_word_count += data.word_count;
        self.total_images += data.images.len();
        self.total_forms += data.forms.len();
        self.total_tables += data.tables.len();
        self.total_lists += data.lists.len();

        self.all_forms.extend(data.forms.iter().cloned());
        self.all_images.extend(data.images.iter().cloned());
        self.all_tables.extend(data.tables.iter().cloned());
        self.all_lists.extend(data.lists.iter().cloned());
        self.social_links.extend(data.social_links.iter().cloned());
        self.meta_tags.extend(data.meta_tags.iter().cloned());

        self.pages.push(PageSummary::new(url, data));
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Texts of every element an interaction was attempted on.
    pub fn interaction_texts(&self) -> BTreeSet<String> {
        self.interactions.iter().map(|e| e.text.clone()).collect()
    }
}

fn insert_all<I, S>(set: &mut BTreeSet<String>, values: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for value in values {
        let value = value.as_ref().trim();
        if !value.is_empty() {
            set.insert(value.to_string());
        }
    }
}
