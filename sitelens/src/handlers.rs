use crate::commands::{DEFAULT_OUTPUT_DIR, DEFAULT_TIMEOUT_SECS};
use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use sitelens_core::crawl::{
    CompareOptions, CrawlOptions, CrawlOutcome, SiteComparison, execute_comparison, execute_crawl,
};
use sitelens_core::report::{write_comparison_artifacts, write_crawl_artifacts};
use sitelens_core::{SimilarityLevel, Winner};
use sitelens_scanner::CrawlConfig;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::warn;
use url::Url;

/// Parse a user-supplied seed, adding https:// if it has no scheme
pub fn parse_url_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let candidate = if line.contains("://") {
        line.to_string()
    } else {
        format!("https://{}", line)
    };

    match Url::parse(&candidate) {
        Ok(url) if url.has_host() => Some(candidate),
        _ => None,
    }
}

/// Budgets from the command line, falling back to the mode's defaults.
pub fn crawl_config_from(args: &ArgMatches, defaults: CrawlConfig) -> CrawlConfig {
    CrawlConfig {
        max_depth: args
            .get_one::<usize>("max-depth")
            .copied()
            .unwrap_or(defaults.max_depth),
        max_pages: args
            .get_one::<usize>("max-pages")
            .copied()
            .unwrap_or(defaults.max_pages),
        delay: args
            .get_one::<u64>("delay")
            .map(|ms| Duration::from_millis(*ms))
            .unwrap_or(defaults.delay),
    }
}

/// Output directory with `~` expanded
pub fn output_dir(args: &ArgMatches) -> PathBuf {
    let raw = args
        .get_one::<String>("output")
        .map(String::as_str)
        .unwrap_or(DEFAULT_OUTPUT_DIR);
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

fn timeout_secs(args: &ArgMatches) -> u64 {
    args.get_one::<u64>("timeout")
        .copied()
        .unwrap_or(DEFAULT_TIMEOUT_SECS)
}

fn seed_arg(args: &ArgMatches, name: &str) -> Result<String> {
    let raw = args
        .get_one::<String>(name)
        .with_context(|| format!("--{} is required", name))?;
    parse_url_line(raw).with_context(|| format!("Invalid URL '{}'", raw))
}

/// Raised on Ctrl+C; the crawl stops at its next target and keeps what it has.
fn cancel_on_ctrl_c() -> Arc<AtomicBool> {
    let flag = Arc::new(AtomicBool::new(false));
    let raised = flag.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for ctrl+c: {}", e);
            return;
        }
        eprintln!("\n{} Interrupted, finishing current page...", "⚠".yellow().bold());
        raised.store(true, Ordering::SeqCst);
    });
    flag
}

pub fn print_banner() {
    println!("{}", "═".repeat(60).bright_blue().bold());
    println!(
        "{}  {}",
        "  SITELENS".bright_white().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).bright_black()
    );
    println!("{}", "═".repeat(60).bright_blue().bold());
    println!();
}

fn print_config(config: &CrawlConfig, timeout: u64, output: &Path) {
    println!("{} Max depth: {}", "→".blue(), config.max_depth.to_string().cyan());
    println!("{} Max pages: {}", "→".blue(), config.max_pages.to_string().cyan());
    println!(
        "{} Delay: {} ms",
        "→".blue(),
        config.delay.as_millis().to_string().cyan()
    );
    println!("{} Timeout: {} s", "→".blue(), timeout.to_string().cyan());
    println!(
        "{} Output: {}",
        "→".blue(),
        output.display().to_string().bright_white()
    );
    println!();
}

fn print_files(written: &[PathBuf]) {
    println!("{}", "Files saved:".bright_white().bold());
    for path in written {
        println!("  {} {}", "✓".green(), path.display().to_string().bright_white());
    }
}

fn print_crawl_summary(outcome: &CrawlOutcome) {
    let log = &outcome.log;
    let status = if log.cancelled {
        "✓ Crawl interrupted".yellow().bold()
    } else {
        "✓ Crawl complete!".green().bold()
    };
    println!("\n{}\n", status);
    println!("  Total actions:       {}", log.records.len().to_string().cyan());
    println!(
        "  Successful actions:  {}",
        log.successful_actions().to_string().green()
    );
    println!("  Pages visited:       {}", log.pages_loaded.to_string().cyan());
    println!(
        "  Interactions:        {}",
        log.interaction_count().to_string().cyan()
    );
    println!(
        "  Unique URLs:         {}",
        outcome.dataset.all_links.len().to_string().cyan()
    );
    let errors = outcome.dataset.errors.len();
    if errors > 0 {
        println!("  Errors:              {}", errors.to_string().red());
    }
    println!();
}

fn winner_label(winner: Winner) -> colored::ColoredString {
    match winner {
        Winner::Tie => winner.to_string().yellow(),
        _ => winner.to_string().green().bold(),
    }
}

fn level_label(level: SimilarityLevel) -> colored::ColoredString {
    match level {
        SimilarityLevel::VeryHigh | SimilarityLevel::High => level.to_string().green().bold(),
        SimilarityLevel::Medium => level.to_string().yellow().bold(),
        SimilarityLevel::Low | SimilarityLevel::VeryLow => level.to_string().red().bold(),
    }
}

fn print_comparison_summary(result: &SiteComparison) {
    let overview = &result.comparison.overview;
    let detailed = &result.comparison.detailed_analysis;
    let similarity = &result.comparison.similarity;

    println!("\n{}\n", "✓ Comparison complete!".green().bold());
    for (label, site, pages, words, links) in [
        (
            "Website 1",
            &result.website1.base_url,
            overview.first_pages,
            overview.first_total_words,
            overview.first_total_links,
        ),
        (
            "Website 2",
            &result.website2.base_url,
            overview.second_pages,
            overview.second_total_words,
            overview.second_total_links,
        ),
    ] {
        println!("  {} {}", format!("{}:", label).bright_white().bold(), site);
        println!(
            "    {} pages, {} words, {} links",
            pages.to_string().cyan(),
            words.to_string().cyan(),
            links.to_string().cyan()
        );
    }

    println!("\n  {}", "Key differences".bright_white().bold());
    println!(
        "    Word difference: {}",
        result
            .comparison
            .content_differences
            .word_count
            .counts
            .difference
    );
    println!(
        "    Page difference: {}",
        result.comparison.structure_differences.pages_count.difference
    );

    println!("\n  {}", "Winners".bright_white().bold());
    println!(
        "    Content richness: {}",
        winner_label(detailed.content_richness.winner)
    );
    println!(
        "    Interactivity:    {}",
        winner_label(detailed.interactivity_level.winner)
    );
    println!(
        "    SEO:              {}",
        winner_label(detailed.seo_indicators.winner)
    );

    println!(
        "\n  Overall similarity: {}% ({})\n",
        similarity.overall.to_string().cyan().bold(),
        level_label(similarity.level)
    );
}

pub async fn handle_crawl(args: &ArgMatches, quiet: bool) -> Result<()> {
    let url = seed_arg(args, "url")?;
    let config = crawl_config_from(args, CrawlConfig::default());
    let timeout = timeout_secs(args);
    let output = output_dir(args);

    if !quiet {
        println!("{} Exploring {}", "🔍".bold(), url.bright_white().bold());
        print_config(&config, timeout, &output);
    }

    let options = CrawlOptions {
        url,
        config,
        timeout_secs: timeout,
        show_progress_bars: !quiet,
    };
    let outcome = execute_crawl(options, Some(cancel_on_ctrl_c()))
        .await
        .context("Crawl failed")?;

    let written = write_crawl_artifacts(&outcome, &output)
        .with_context(|| format!("Failed to write results to {}", output.display()))?;

    print_crawl_summary(&outcome);
    print_files(&written);
    Ok(())
}

pub async fn handle_compare(args: &ArgMatches, quiet: bool) -> Result<()> {
    let first_url = seed_arg(args, "first")?;
    let second_url = seed_arg(args, "second")?;
    let config = crawl_config_from(args, CrawlConfig::for_comparison());
    let timeout = timeout_secs(args);
    let output = output_dir(args);

    if !quiet {
        println!(
            "{} Comparing {} with {}",
            "🔍".bold(),
            first_url.bright_white().bold(),
            second_url.bright_white().bold()
        );
        print_config(&config, timeout, &output);
    }

    let options = CompareOptions {
        first_url,
        second_url,
        config,
        timeout_secs: timeout,
        show_progress_bars: !quiet,
    };
    let result = execute_comparison(options, Some(cancel_on_ctrl_c()))
        .await
        .context("Comparison failed")?;

    let written = write_comparison_artifacts(&result, &output)
        .with_context(|| format!("Failed to write results to {}", output.display()))?;

    print_comparison_summary(&result);
    print_files(&written);
    Ok(())
}
