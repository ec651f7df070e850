use regex::Regex;

use super::doc_comment::extract_doc_comment;
use crate::config::RouteConfig;
use crate::error::Result;
use crate::fs_ops::SourceFile;
use crate::index::ApiRoute;

/// Strategy for discovering HTTP routes in one source file.
///
/// The extractor owns traversal and persistence; a scanner only sees files
/// whose extension it asks for.
pub trait RouteScanner: Send + Sync {
    fn name(&self) -> &'static str;
    fn extensions(&self) -> &'static [&'static str];
    fn scan(&self, file: &SourceFile) -> Vec<ApiRoute>;
}

/// Ordered set of enabled route scanners. Empty by default.
pub struct RouteScanners {
    scanners: Vec<Box<dyn RouteScanner>>,
}

impl RouteScanners {
    pub fn empty() -> Self {
        Self {
            scanners: Vec::new(),
        }
    }

    pub fn from_config(config: &RouteConfig) -> Result<Self> {
        let mut scanners = Self::empty();
        if config.express {
            scanners.register(ExpressRouteScanner::new()?);
        }
        Ok(scanners)
    }

    pub fn register<S: RouteScanner + 'static>(&mut self, scanner: S) {
        let name = scanner.name();
        if let Some(pos) = self.scanners.iter().position(|s| s.name() == name) {
            tracing::warn!("overwriting route scanner {name}");
            self.scanners[pos] = Box::new(scanner);
        } else {
            self.scanners.push(Box::new(scanner));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn RouteScanner> {
        self.scanners.iter().map(|s| s.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.scanners.is_empty()
    }
}

impl Default for RouteScanners {
    fn default() -> Self {
        Self::empty()
    }
}

/// Express-style routes: `app.get('/path', ...)`, `router.post("/path", ...)`.
pub struct ExpressRouteScanner {
    pattern: Regex,
}

impl ExpressRouteScanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(concat!(
                r"\b(?:app|router)\.(get|post|put|patch|delete|options|head|all)",
                r#"\s*\(\s*['"`]([^'"`]+)['"`]"#,
            ))?,
        })
    }
}

impl RouteScanner for ExpressRouteScanner {
    fn name(&self) -> &'static str {
        "express"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["ts", "js"]
    }

    fn scan(&self, file: &SourceFile) -> Vec<ApiRoute> {
        let lines = file.lines();
        let mut routes = Vec::new();

        for (idx, line) in lines.iter().enumerate() {
            let Some(caps) = self.pattern.captures(line) else {
                continue;
            };

            routes.push(ApiRoute {
                method: caps[1].to_ascii_uppercase(),
                path: caps[2].to_string(),
                description: extract_doc_comment(&lines, idx),
                file: file.relative.clone(),
                line: idx + 1,
                file_type: file.file_type.clone(),
                context: line.trim().to_string(),
            });
        }

        routes
    }
}
