// Crawl and comparison artifacts

use crate::crawl::{CrawlOutcome, SiteComparison};
use crate::error::Result;
use serde::Serialize;
use sitelens_scanner::CrawlLog;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

const BANNER: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

pub const CRAWL_LOG_FILE: &str = "logs.json";
pub const CRAWL_SUMMARY_FILE: &str = "crawl_summary.txt";
pub const COMPARISON_FILE: &str = "comparison_data.json";
pub const FIRST_LOG_FILE: &str = "website1_logs.json";
pub const SECOND_LOG_FILE: &str = "website2_logs.json";
pub const COMPARISON_SUMMARY_FILE: &str = "comparison_summary.txt";

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Pretty-prints `value` to `path`.
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    save_report(&content, path)?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Writes `logs.json` and the text summary; returns the files written.
pub fn write_crawl_artifacts(outcome: &CrawlOutcome, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let log_path = dir.join(CRAWL_LOG_FILE);
    save_json(&outcome.log, &log_path)?;

    let summary_path = dir.join(CRAWL_SUMMARY_FILE);
    save_report(&generate_crawl_summary(outcome), &summary_path)?;

    Ok(vec![log_path, summary_path])
}

/// Writes the comparison data, both raw logs and the text summary.
pub fn write_comparison_artifacts(result: &SiteComparison, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let data_path = dir.join(COMPARISON_FILE);
    save_json(result, &data_path)?;

    let first_path = dir.join(FIRST_LOG_FILE);
    save_json(&result.website1_logs, &first_path)?;

    let second_path = dir.join(SECOND_LOG_FILE);
    save_json(&result.website2_logs, &second_path)?;

    let summary_path = dir.join(COMPARISON_SUMMARY_FILE);
    save_report(&generate_comparison_summary(result), &summary_path)?;

    Ok(vec![data_path, first_path, second_path, summary_path])
}

fn section(report: &mut String, title: &str) {
    report.push_str(BANNER);
    report.push('\n');
    report.push_str(title);
    report.push('\n');
    report.push_str(BANNER);
    report.push_str("\n\n");
}

fn session_lines(report: &mut String, log: &CrawlLog) {
    report.push_str(&format!("Session ID:   {}\n", log.session_id));
    report.push_str(&format!("Seed:         {}\n", log.seed));
    report.push_str(&format!(
        "Started:      {}\n",
        log.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    let duration = log.finished_at - log.started_at;
    report.push_str(&format!(
        "Duration:     {:.1} seconds\n",
        duration.num_milliseconds() as f64 / 1000.0
    ));
    if log.cancelled {
        report.push_str("Status:       Cancelled\n");
    }
}

pub fn generate_crawl_summary(outcome: &CrawlOutcome) -> String {
    let log = &outcome.log;
    let dataset = &outcome.dataset;
    let mut report = String::new();

    section(&mut report, "                           SITELENS CRAWL SUMMARY");
    session_lines(&mut report, log);
    report.push('\n');

    section(&mut report, "ACTIVITY");
    report.push_str(&format!("Total actions:        {}\n", log.records.len()));
    report.push_str(&format!("Successful actions:   {}\n", log.successful_actions()));
    report.push_str(&format!("Pages visited:        {}\n", log.pages_loaded));
    report.push_str(&format!("Interactions:         {}\n", log.interaction_count()));
    report.push_str(&format!("Unique URLs:          {}\n", dataset.all_links.len()));
    report.push_str(&format!("Targets left queued:  {}\n", log.discarded_targets));
    report.push('\n');

    section(&mut report, "CONTENT");
    report.push_str(&format!("Pages analyzed:       {}\n", dataset.page_count()));
    report.push_str(&format!("Total words:          {}\n", dataset.total_word_count));
    report.push_str(&format!("Images:               {}\n", dataset.total_images));
    report.push_str(&format!("Forms:                {}\n", dataset.total_forms));
    report.push_str(&format!("Tables:               {}\n", dataset.total_tables));
    report.push_str(&format!("Lists:                {}\n", dataset.total_lists));
    if !dataset.technologies_detected.is_empty() {
        let techs: Vec<&str> = dataset
            .technologies_detected
            .iter()
            .map(String::as_str)
            .collect();
        report.push_str(&format!("Technologies:         {}\n", techs.join(", ")));
    }
    report.push('\n');

    if !dataset.errors.is_empty() {
        section(&mut report, "ERRORS");
        for entry in &dataset.errors {
            report.push_str(&format!(
                "  [{}] {}\n      {}\n",
                entry.action.as_str(),
                entry.url,
                entry.error
            ));
        }
        report.push('\n');
    }

    footer(&mut report);
    report
}

pub fn generate_comparison_summary(result: &SiteComparison) -> String {
    let overview = &result.comparison.overview;
    let detailed = &result.comparison.detailed_analysis;
    let similarity = &result.comparison.similarity;
    let mut report = String::new();

    section(&mut report, "                        SITELENS COMPARISON SUMMARY");
    report.push_str(&format!("Website 1:    {}\n", result.website1.base_url));
    report.push_str(&format!("Website 2:    {}\n", result.website2.base_url));
    report.push('\n');

    section(&mut report, "OVERVIEW");
    report.push_str(&format!("{:<14}{:>12}{:>12}\n", "", "Website 1", "Website 2"));
    report.push_str(&format!(
        "{:<14}{:>12}{:>12}\n",
        "Pages", overview.first_pages, overview.second_pages
    ));
    report.push_str(&format!(
        "{:<14}{:>12}{:>12}\n",
        "Words", overview.first_total_words, overview.second_total_words
    ));
    report.push_str(&format!(
        "{:<14}{:>12}{:>12}\n",
        "Links", overview.first_total_links, overview.second_total_links
    ));
    report.push('\n');

    section(&mut report, "SIMILARITY");
    report.push_str(&format!("Keywords:     {:.1}%\n", similarity.keyword));
    report.push_str(&format!("Structure:    {:.1}%\n", similarity.structure));
    report.push_str(&format!("Content:      {:.1}%\n", similarity.content));
    report.push_str(&format!("Technical:    {:.1}%\n", similarity.technical));
    report.push_str(&format!(
        "Overall:      {:.1}% ({})\n",
        similarity.overall, similarity.level
    ));
    report.push('\n');

    section(&mut report, "KEY DIFFERENCES");
    let words = &result.comparison.content_differences.word_count;
    report.push_str(&format!(
        "Word difference:  {} ({:+.2}%)\n",
        words.counts.difference, words.percentage_difference
    ));
    report.push_str(&format!(
        "Page difference:  {}\n",
        result.comparison.structure_differences.pages_count.difference
    ));
    report.push('\n');

    section(&mut report, "WINNERS");
    report.push_str(&format!(
        "Content richness:  {}\n",
        detailed.content_richness.winner
    ));
    report.push_str(&format!(
        "Interactivity:     {}\n",
        detailed.interactivity_level.winner
    ));
    report.push_str(&format!(
        "SEO:               {}\n",
        detailed.seo_indicators.winner
    ));
    report.push_str(&format!(
        "Accessibility:     {}\n",
        detailed.accessibility_features.alt_text_percentage.winner
    ));
    report.push('\n');

    footer(&mut report);
    report
}

fn footer(report: &mut String) {
    report.push_str(BANNER);
    report.push('\n');
    report.push_str(&format!(
        "Generated by Sitelens v{} at {}\n",
        env!("CARGO_PKG_VERSION"),
        chrono::Utc::now().to_rfc3339()
    ));
}
