use std::path::PathBuf;

use clap::builder::TypedValueParser as _;
use clap::{Args, Parser, Subcommand};
use codewiki::search::{DEFAULT_LIMIT, FileType, SearchOptions};

#[derive(Debug, Parser)]
#[command(
    name = "codewiki",
    version,
    about = "Index functions, classes and routes of a project and search them",
    long_about = "codewiki - project symbol index\n\nUsage:\n  codewiki generate              Rebuild wiki/index.json and the references\n  codewiki search \"query\"        Search the index, then the sources"
)]
pub struct Cli {
    /// Project root (defaults to $CODEWIKI_ROOT, then the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan the project and rewrite the index and the Markdown references.
    Generate(GenerateArgs),
    /// Search indexed symbols, topping up with matching source lines.
    Search(SearchArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Log every discovered symbol.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Text (or pattern with --regex) to look for.
    pub query: String,
    /// Only return results from this file type.
    #[arg(short = 't', long = "type", value_enum)]
    pub file_type: Option<FileType>,
    /// Treat the query as a regular expression.
    #[arg(long)]
    pub regex: bool,
    /// Maximum number of results.
    #[arg(
        short = 'n',
        long,
        default_value_t = DEFAULT_LIMIT,
        value_parser = clap::value_parser!(u64).range(1..).map(|n| n as usize)
    )]
    pub limit: usize,
    /// Hide the matching source line.
    #[arg(long)]
    pub no_context: bool,
}

impl SearchArgs {
    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            file_type: self.file_type,
            use_regex: self.regex,
            limit: self.limit,
            show_context: !self.no_context,
        }
    }
}
