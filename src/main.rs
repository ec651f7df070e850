mod cli;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use codewiki::Config;
use codewiki::extract::Extractor;
use codewiki::search::{SearchEngine, print_results};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands, GenerateArgs, SearchArgs};

fn main() {
    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Commands::Generate(GenerateArgs { verbose: true })));

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(env.as_deref(), verbose))
        .with_target(false)
        .init();
}

/// `RUST_LOG` if set, else `codewiki=warn`; `--verbose` raises codewiki to debug either way.
fn log_filter(env: Option<&str>, verbose: bool) -> EnvFilter {
    let mut filter = env
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("codewiki=warn"));

    if verbose {
        if let Ok(directive) = "codewiki=debug".parse() {
            filter = filter.add_directive(directive);
        }
    }

    filter
}

fn run(cli: Cli) -> Result<()> {
    let root = Config::project_root(cli.root);
    let config = Config::load(&root)
        .with_context(|| format!("Failed to load configuration for {}", root.display()))?;

    match cli.command {
        Commands::Generate(_) => handle_generate(&root, config),
        Commands::Search(args) => handle_search(&root, config, args),
    }
}

fn handle_generate(root: &Path, config: Config) -> Result<()> {
    let extractor = Extractor::new(root, config).context("Failed to prepare extractor")?;
    let summary = extractor
        .generate()
        .with_context(|| format!("Failed to generate index for {}", root.display()))?;

    let stats = summary.statistics;
    println!("✅ Index generated: {}", summary.index_path.display());
    println!("   Functions: {}", stats.total_functions);
    println!("   Classes: {}", stats.total_classes);
    println!("   API endpoints: {}", stats.total_apis);
    println!("📄 {}", summary.function_reference_path.display());
    println!("📄 {}", summary.api_reference_path.display());
    Ok(())
}

fn handle_search(root: &Path, config: Config, args: SearchArgs) -> Result<()> {
    let options = args.options();
    let engine = SearchEngine::open(root, config)?;

    println!("🔍 Searching: {}", args.query);
    let results = engine.search(&args.query, &options)?;
    print_results(&results, options.show_context);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directives(filter: EnvFilter) -> String {
        filter.to_string().to_lowercase()
    }

    #[test]
    fn test_default_filter() {
        let filter = directives(log_filter(None, false));
        assert!(filter.contains("codewiki=warn"));
        assert!(!filter.contains("debug"));
    }

    #[test]
    fn test_verbose_overrides_env() {
        let filter = directives(log_filter(Some("codewiki=error,hyper=info"), true));
        assert!(filter.contains("codewiki=debug"));
        assert!(filter.contains("hyper=info"));
    }

    #[test]
    fn test_env_kept_without_verbose() {
        let filter = directives(log_filter(Some("codewiki=trace"), false));
        assert!(filter.contains("codewiki=trace"));
        assert!(!filter.contains("debug"));
    }

    #[test]
    fn test_invalid_env_falls_back() {
        let filter = directives(log_filter(Some("codewiki=[[["), true));
        assert!(filter.contains("codewiki=debug"));
    }
}
