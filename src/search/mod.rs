//! Query the persisted index, topping results up with a live full-text search.

mod display;
mod fulltext;
mod matcher;

pub use display::{CONTEXT_PREVIEW_CHARS, print_results, render_results};
pub use fulltext::FullTextSearch;
pub use matcher::QueryMatcher;

use std::path::PathBuf;

use clap::ValueEnum;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::index::{Index, IndexStore, SymbolCategory, SymbolRecord};

pub const DEFAULT_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FileType {
    Md,
    Ts,
    Py,
    Js,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Md => "md",
            FileType::Ts => "ts",
            FileType::Py => "py",
            FileType::Js => "js",
        }
    }

    /// Extensions searched by the full-text fallback for this type.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            FileType::Md => &["md"],
            FileType::Ts => &["ts", "tsx"],
            FileType::Py => &["py"],
            FileType::Js => &["js", "jsx"],
        }
    }

    pub fn all_extensions() -> &'static [&'static str] {
        &["md", "ts", "tsx", "py", "js", "jsx"]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCategory {
    Function,
    Class,
    Api,
    FileContent,
}

impl From<SymbolCategory> for ResultCategory {
    fn from(category: SymbolCategory) -> Self {
        match category {
            SymbolCategory::Function => ResultCategory::Function,
            SymbolCategory::Class => ResultCategory::Class,
            SymbolCategory::Api => ResultCategory::Api,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub category: ResultCategory,
    pub name: String,
    pub file: String,
    pub line: usize,
    pub file_type: Option<String>,
    pub description: Option<String>,
    pub context: Option<String>,
}

impl SearchResult {
    fn from_record(category: SymbolCategory, record: &SymbolRecord, show_context: bool) -> Self {
        Self {
            category: category.into(),
            name: record.name.clone(),
            file: record.file.clone(),
            line: record.line,
            file_type: Some(record.file_type.clone()).filter(|t| !t.is_empty()),
            description: Some(record.description.clone()).filter(|d| !d.is_empty()),
            context: show_context.then(|| record.context.clone()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub file_type: Option<FileType>,
    pub use_regex: bool,
    pub limit: usize,
    pub show_context: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            file_type: None,
            use_regex: false,
            limit: DEFAULT_LIMIT,
            show_context: true,
        }
    }
}

pub struct SearchEngine {
    root: PathBuf,
    config: Config,
    index: Index,
}

impl SearchEngine {
    /// Load the index under `root`. A missing index behaves as an empty one.
    pub fn open(root: impl Into<PathBuf>, config: Config) -> Result<Self> {
        let root = root.into();
        let index = IndexStore::new(config.index_path(&root)).load()?;
        Ok(Self::with_index(root, config, index))
    }

    pub fn with_index(root: impl Into<PathBuf>, config: Config, index: Index) -> Self {
        Self {
            root: root.into(),
            config,
            index,
        }
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Index matches first, then full-text matches, at most `limit` in total.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Result<Vec<SearchResult>> {
        if query.is_empty() {
            return Err(Error::InvalidQuery("query cannot be empty".to_string()));
        }
        if options.limit == 0 {
            return Err(Error::InvalidQuery("limit must be at least 1".to_string()));
        }

        let matcher = QueryMatcher::new(query, options.use_regex)?;

        let mut results = self.search_index(&matcher, options);
        tracing::debug!("{} index matches for {:?}", results.len(), query);

        if results.len() < options.limit {
            let remaining = options.limit - results.len();
            let fallback = self.search_files(query, &matcher, options, remaining);
            tracing::debug!("{} full-text matches for {:?}", fallback.len(), query);
            results.extend(fallback);
        }

        results.truncate(options.limit);
        Ok(results)
    }

    fn search_index(&self, matcher: &QueryMatcher, options: &SearchOptions) -> Vec<SearchResult> {
        let wanted_type = options.file_type.map(|t| t.as_str());

        self.index
            .collections()
            .into_iter()
            .flat_map(|(category, records)| {
                records.iter().map(move |record| (category, record))
            })
            .filter(|(_, record)| {
                matcher.is_match(&record.name) || matcher.is_match(&record.description)
            })
            .filter(|(_, record)| match wanted_type {
                Some(wanted) => record.file_type == wanted,
                None => true,
            })
            .map(|(category, record)| {
                SearchResult::from_record(category, record, options.show_context)
            })
            .collect()
    }

    fn search_files(
        &self,
        query: &str,
        matcher: &QueryMatcher,
        options: &SearchOptions,
        quota: usize,
    ) -> Vec<SearchResult> {
        let mut dirs = self.config.source_paths(&self.root);
        dirs.push(self.config.wiki_path(&self.root));

        let extensions: Vec<String> = options
            .file_type
            .map(|t| t.extensions())
            .unwrap_or_else(FileType::all_extensions)
            .iter()
            .map(|e| e.to_string())
            .collect();

        FullTextSearch {
            root: &self.root,
            dirs: &dirs,
            extensions: &extensions,
        }
        .search(query, matcher, options.show_context, quota)
    }
}
