//! Symbol extraction: walks the configured source directories, applies the
//! line matchers and writes the index plus the Markdown references.

mod doc_comment;
mod patterns;
mod routes;

pub use doc_comment::{MAX_LOOKBACK, extract_doc_comment};
pub use patterns::{MatcherSet, RegexMatcher, SymbolMatcher};
pub use routes::{ExpressRouteScanner, RouteScanner, RouteScanners};

use std::path::PathBuf;

use chrono::Utc;

use crate::config::{API_REFERENCE_FILE_NAME, Config, FUNCTION_REFERENCE_FILE_NAME};
use crate::error::Result;
use crate::fs_ops::{FileSystemOps, SourceFile};
use crate::index::{Index, IndexStore, Statistics, SymbolCategory, SymbolRecord};
use crate::report::{render_api_reference, render_function_reference};

/// Files written by [`Extractor::generate`].
#[derive(Debug, Clone)]
pub struct GenerateSummary {
    pub index_path: PathBuf,
    pub function_reference_path: PathBuf,
    pub api_reference_path: PathBuf,
    pub statistics: Statistics,
}

pub struct Extractor {
    root: PathBuf,
    config: Config,
    functions: MatcherSet,
    classes: MatcherSet,
    routes: RouteScanners,
}

impl Extractor {
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Result<Self> {
        let routes = RouteScanners::from_config(&config.routes)?;
        Ok(Self {
            root: root.into(),
            config,
            functions: MatcherSet::functions()?,
            classes: MatcherSet::classes()?,
            routes,
        })
    }

    pub fn with_route_scanners(mut self, routes: RouteScanners) -> Self {
        self.routes = routes;
        self
    }

    pub fn scan_functions(&self) -> Vec<SymbolRecord> {
        self.scan_with(
            SymbolCategory::Function,
            &self.config.function_extensions,
            &self.functions,
        )
    }

    pub fn scan_classes(&self) -> Vec<SymbolRecord> {
        self.scan_with(SymbolCategory::Class, &self.config.class_extensions, &self.classes)
    }

    pub fn scan_apis(&self) -> Vec<SymbolRecord> {
        let mut apis = Vec::new();

        for scanner in self.routes.iter() {
            let extensions: Vec<String> =
                scanner.extensions().iter().map(|e| e.to_string()).collect();

            for file in self.read_sources(&extensions) {
                for route in scanner.scan(&file) {
                    tracing::debug!(
                        "found route {} {} @ {}:{}",
                        route.method,
                        route.path,
                        route.file,
                        route.line
                    );
                    apis.push(route.into());
                }
            }
        }

        apis
    }

    /// Scan everything and assemble a fresh index stamped with the current time.
    pub fn build_index(&self) -> Index {
        let functions = self.scan_functions();
        let classes = self.scan_classes();
        let apis = self.scan_apis();

        Index::new(Utc::now(), functions, classes, apis)
    }

    /// Rebuild the index and both references, replacing any previous output.
    pub fn generate(&self) -> Result<GenerateSummary> {
        tracing::info!("scanning project at {}", self.root.display());
        let index = self.build_index();

        let store = IndexStore::new(self.config.index_path(&self.root));
        store.save(&index)?;
        tracing::info!("wrote index to {}", store.path().display());

        let wiki = self.config.wiki_path(&self.root);
        let function_reference_path = wiki.join(FUNCTION_REFERENCE_FILE_NAME);
        FileSystemOps::write_atomic(
            &function_reference_path,
            render_function_reference(&index).as_bytes(),
        )?;

        let api_reference_path = wiki.join(API_REFERENCE_FILE_NAME);
        FileSystemOps::write_atomic(&api_reference_path, render_api_reference(&index).as_bytes())?;

        Ok(GenerateSummary {
            index_path: store.path().to_path_buf(),
            function_reference_path,
            api_reference_path,
            statistics: index.statistics,
        })
    }

    fn scan_with(
        &self,
        category: SymbolCategory,
        extensions: &[String],
        matchers: &MatcherSet,
    ) -> Vec<SymbolRecord> {
        let mut symbols = Vec::new();
        for file in self.read_sources(extensions) {
            symbols.extend(extract_symbols(&file, matchers, category));
        }
        symbols
    }

    /// Readable source files; a file that cannot be read is logged and skipped.
    fn read_sources(&self, extensions: &[String]) -> impl Iterator<Item = SourceFile> + '_ {
        let dirs = self.config.source_paths(&self.root);
        FileSystemOps::list_files(&dirs, extensions)
            .into_iter()
            .filter_map(move |path| match SourceFile::read(&self.root, &path) {
                Ok(file) => Some(file),
                Err(err) => {
                    tracing::warn!("skipping {}: {}", path.display(), err);
                    None
                }
            })
    }
}

/// Apply `matchers` to every line of `file`; one record per matching line.
pub fn extract_symbols(
    file: &SourceFile,
    matchers: &MatcherSet,
    category: SymbolCategory,
) -> Vec<SymbolRecord> {
    let lines = file.lines();
    let mut symbols = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let Some((matcher, name)) = matchers.first_match(line) else {
            continue;
        };

        tracing::debug!(
            "found {} {} @ {}:{} ({})",
            category.as_str(),
            name,
            file.relative,
            idx + 1,
            matcher
        );

        symbols.push(SymbolRecord {
            name: name.to_string(),
            file: file.relative.clone(),
            line: idx + 1,
            file_type: file.file_type.clone(),
            description: extract_doc_comment(&lines, idx),
            context: line.trim().to_string(),
            method: None,
            route: None,
        });
    }

    symbols
}
