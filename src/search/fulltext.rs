use std::path::{Path, PathBuf};

use super::matcher::QueryMatcher;
use super::{ResultCategory, SearchResult};
use crate::fs_ops::{FileSystemOps, SourceFile};

/// Line-by-line search over live files, used when the index alone cannot
/// fill the requested number of results.
pub struct FullTextSearch<'a> {
    pub root: &'a Path,
    pub dirs: &'a [PathBuf],
    pub extensions: &'a [String],
}

impl FullTextSearch<'_> {
    /// Collect at most `quota` matching lines, in walk order.
    pub fn search(
        &self,
        query: &str,
        matcher: &QueryMatcher,
        show_context: bool,
        quota: usize,
    ) -> Vec<SearchResult> {
        let mut results = Vec::new();
        if quota == 0 {
            return results;
        }

        for path in FileSystemOps::list_files(self.dirs, self.extensions) {
            let file = match SourceFile::read(self.root, &path) {
                Ok(file) => file,
                Err(err) => {
                    tracing::warn!("skipping {}: {}", path.display(), err);
                    continue;
                }
            };

            let remaining = quota - results.len();
            search_in_file(&file, query, matcher, show_context, remaining, &mut results);
            if results.len() >= quota {
                break;
            }
        }

        results
    }
}

fn search_in_file(
    file: &SourceFile,
    query: &str,
    matcher: &QueryMatcher,
    show_context: bool,
    remaining: usize,
    results: &mut Vec<SearchResult>,
) {
    let mut found = 0;

    for (idx, line) in file.content.lines().enumerate() {
        if found >= remaining {
            break;
        }
        if !matcher.is_match(line) {
            continue;
        }

        results.push(SearchResult {
            category: ResultCategory::FileContent,
            name: query.to_string(),
            file: file.relative.clone(),
            line: idx + 1,
            file_type: Some(file.file_type.clone()),
            description: None,
            context: show_context.then(|| line.trim().to_string()),
        });
        found += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("src")).unwrap();
        fs::create_dir_all(tmp.path().join("wiki")).unwrap();
        fs::write(
            tmp.path().join("src/a.ts"),
            "const timeout = 30;\n// TIMEOUT handling\nlet other = 1;\n",
        )
        .unwrap();
        fs::write(tmp.path().join("src/b.py"), "TIMEOUT = 10\n").unwrap();
        fs::write(tmp.path().join("wiki/notes.md"), "Timeout notes\n").unwrap();
        tmp
    }

    fn exts(list: &[&str]) -> Vec<String> {
        list.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_finds_lines_across_dirs() {
        let tmp = project();
        let dirs = vec![tmp.path().join("src"), tmp.path().join("wiki")];
        let extensions = exts(&["md", "ts", "py"]);
        let search = FullTextSearch {
            root: tmp.path(),
            dirs: &dirs,
            extensions: &extensions,
        };
        let matcher = QueryMatcher::new("timeout", false).unwrap();

        let results = search.search("timeout", &matcher, true, 10);
        let found: Vec<(&str, usize)> =
            results.iter().map(|r| (r.file.as_str(), r.line)).collect();
        assert_eq!(
            found,
            vec![("src/a.ts", 1), ("src/a.ts", 2), ("src/b.py", 1), ("wiki/notes.md", 1)]
        );
        assert!(results.iter().all(|r| r.category == ResultCategory::FileContent));
        assert!(results.iter().all(|r| r.name == "timeout"));
        assert_eq!(results[1].context.as_deref(), Some("// TIMEOUT handling"));
    }

    #[test]
    fn test_stops_at_quota() {
        let tmp = project();
        let dirs = vec![tmp.path().join("src"), tmp.path().join("wiki")];
        let extensions = exts(&["md", "ts", "py"]);
        let search = FullTextSearch {
            root: tmp.path(),
            dirs: &dirs,
            extensions: &extensions,
        };
        let matcher = QueryMatcher::new("timeout", false).unwrap();

        let results = search.search("timeout", &matcher, false, 3);
        assert_eq!(results.len(), 3);
        assert_eq!(results[2].file, "src/b.py");
        assert!(results.iter().all(|r| r.context.is_none()));

        assert!(search.search("timeout", &matcher, true, 0).is_empty());
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let tmp = project();
        fs::write(tmp.path().join("src/0-binary.ts"), [0xff, 0xfe, 0x74]).unwrap();
        let dirs = vec![tmp.path().join("src")];
        let extensions = exts(&["ts"]);
        let search = FullTextSearch {
            root: tmp.path(),
            dirs: &dirs,
            extensions: &extensions,
        };
        let matcher = QueryMatcher::new("timeout", false).unwrap();

        let results = search.search("timeout", &matcher, true, 10);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.file == "src/a.ts"));
    }
}
