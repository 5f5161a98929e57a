use crate::CLAP_STYLING;
use clap::{arg, command};

pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Budget and output flags shared by `crawl` and `compare`. Budgets carry no clap
/// defaults so each mode can apply its own.
fn crawl_arguments(cmd: clap::Command) -> clap::Command {
    cmd.arg(
        arg!(-d --"max-depth" <DEPTH>)
            .required(false)
            .help("Deepest link level to follow (seed is depth 0)")
            .value_parser(clap::value_parser!(usize)),
    )
    .arg(
        arg!(-p --"max-pages" <PAGES>)
            .required(false)
            .help("Stop after this many pages have loaded")
            .value_parser(clap::value_parser!(usize)),
    )
    .arg(
        arg!(--"delay" <MILLIS>)
            .required(false)
            .help("Pause after every page load and interaction, in milliseconds")
            .value_parser(clap::value_parser!(u64)),
    )
    .arg(
        arg!(--"timeout" <SECONDS>)
            .required(false)
            .help("Request timeout in seconds")
            .value_parser(clap::value_parser!(u64).range(1..))
            .default_value("10"),
    )
    .arg(
        arg!(-o --"output" <DIR>)
            .required(false)
            .help("Directory to write logs and summaries to")
            .default_value(DEFAULT_OUTPUT_DIR),
    )
}

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("sitelens")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sitelens")
        .about("Explore a website by following links and clicking its controls, or compare two")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Suppress banner, progress and non-essential output")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(-v --"verbose" "Enable debug logging")
                .required(false)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(crawl_arguments(
            command!("crawl")
                .about("Explore a single site and record every load and interaction")
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(true)
                        .help("The URL to start from (https:// is assumed when missing)"),
                ),
        ))
        .subcommand(crawl_arguments(
            command!("compare")
                .about("Explore two sites with the same budgets and compare them")
                .arg(
                    arg!(--"first" <URL>)
                        .required(true)
                        .help("The first site to compare"),
                )
                .arg(
                    arg!(--"second" <URL>)
                        .required(true)
                        .help("The second site to compare"),
                ),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_is_consistent() {
        command_argument_builder().debug_assert();
    }

    #[test]
    fn test_crawl_requires_url() {
        let result = command_argument_builder().try_get_matches_from(["sitelens", "crawl"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let matches = command_argument_builder()
            .try_get_matches_from(["sitelens", "crawl", "-u", "example.com", "-q", "-v"])
            .unwrap();
        assert!(matches.get_flag("quiet"));
        assert!(matches.get_flag("verbose"));
    }

    #[test]
    fn test_compare_defaults() {
        let matches = command_argument_builder()
            .try_get_matches_from([
                "sitelens", "compare", "--first", "a.test", "--second", "b.test",
            ])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "compare");
        assert_eq!(sub.get_one::<String>("output").unwrap(), DEFAULT_OUTPUT_DIR);
        assert_eq!(
            *sub.get_one::<u64>("timeout").unwrap(),
            DEFAULT_TIMEOUT_SECS
        );
        assert!(sub.get_one::<usize>("max-pages").is_none());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let result = command_argument_builder().try_get_matches_from([
            "sitelens",
            "crawl",
            "-u",
            "example.com",
            "--timeout",
            "0",
        ]);
        assert!(result.is_err());

        let matches = command_argument_builder()
            .try_get_matches_from(["sitelens", "crawl", "-u", "example.com", "--timeout", "1"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(*sub.get_one::<u64>("timeout").unwrap(), 1);
    }
}
