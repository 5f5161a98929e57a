pub mod commands;
pub mod handlers;

pub use handlers::{crawl_config_from, output_dir, parse_url_line};

// Re-export crawl functionality from sitelens-core
pub use sitelens_core::crawl::{CompareOptions, CrawlOptions, execute_comparison, execute_crawl};

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
