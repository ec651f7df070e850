//! Index data model shared by the extractor and the search engine.

mod store;

pub use store::IndexStore;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub const INDEX_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolCategory {
    Function,
    Class,
    Api,
}

impl SymbolCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolCategory::Function => "function",
            SymbolCategory::Class => "class",
            SymbolCategory::Api => "api",
        }
    }
}

/// One declaration found by the extractor.
///
/// The category is implied by the index collection the record lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRecord {
    pub name: String,
    pub file: String,
    pub line: usize,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
}

/// A route reported by a [`RouteScanner`](crate::extract::RouteScanner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRoute {
    pub method: String,
    pub path: String,
    pub description: String,
    pub file: String,
    pub line: usize,
    pub file_type: String,
    pub context: String,
}

impl From<ApiRoute> for SymbolRecord {
    fn from(route: ApiRoute) -> Self {
        Self {
            name: format!("{} {}", route.method, route.path),
            file: route.file,
            line: route.line,
            file_type: route.file_type,
            description: route.description,
            context: route.context,
            method: Some(route.method),
            route: Some(route.path),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_functions: usize,
    pub total_classes: usize,
    pub total_apis: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub generated_at: DateTime<Utc>,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub functions: Vec<SymbolRecord>,
    #[serde(default)]
    pub classes: Vec<SymbolRecord>,
    #[serde(default)]
    pub apis: Vec<SymbolRecord>,
    #[serde(default)]
    pub statistics: Statistics,
}

fn default_version() -> String {
    INDEX_VERSION.to_string()
}

/// RFC 3339, or an ISO-8601 local timestamp without offset read as UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(at) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(at.with_timezone(&Utc));
    }

    raw.parse::<NaiveDateTime>()
        .map(|naive| naive.and_utc())
        .map_err(|err| serde::de::Error::custom(format!("invalid timestamp {raw:?}: {err}")))
}

impl Index {
    pub fn new(
        generated_at: DateTime<Utc>,
        functions: Vec<SymbolRecord>,
        classes: Vec<SymbolRecord>,
        apis: Vec<SymbolRecord>,
    ) -> Self {
        let statistics = Statistics {
            total_functions: functions.len(),
            total_classes: classes.len(),
            total_apis: apis.len(),
        };

        Self {
            generated_at,
            version: default_version(),
            functions,
            classes,
            apis,
            statistics,
        }
    }

    /// Collections in search order.
    pub fn collections(&self) -> [(SymbolCategory, &[SymbolRecord]); 3] {
        [
            (SymbolCategory::Function, self.functions.as_slice()),
            (SymbolCategory::Class, self.classes.as_slice()),
            (SymbolCategory::Api, self.apis.as_slice()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.classes.is_empty() && self.apis.is_empty()
    }
}
