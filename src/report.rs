//! Markdown references rendered from an [`Index`].
//!
//! Output depends only on the index passed in, so regenerating from the same
//! index produces byte-identical files.

use std::collections::BTreeMap;

use crate::index::{Index, SymbolRecord};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

fn push_header(out: &mut String, title: &str, index: &Index, total_label: &str, total: usize) {
    out.push_str(&format!("# {title}\n\n"));
    out.push_str(&format!(
        "> Generated at: {}\n\n",
        index.generated_at.format(TIMESTAMP_FORMAT)
    ));
    out.push_str(&format!("**{total_label}**: {total}\n\n"));
    out.push_str("---\n\n");
}

pub fn render_function_reference(index: &Index) -> String {
    let mut out = String::new();
    push_header(
        &mut out,
        "Function Reference",
        index,
        "Total functions",
        index.functions.len(),
    );

    let mut by_file: BTreeMap<&str, Vec<&SymbolRecord>> = BTreeMap::new();
    for func in &index.functions {
        by_file.entry(func.file.as_str()).or_default().push(func);
    }

    for (file, functions) in by_file {
        out.push_str(&format!("## 📁 {file}\n\n"));

        for func in functions {
            out.push_str(&format!("### `{}`\n\n", func.name));
            out.push_str(&format!("**Location**: {}:{}\n\n", func.file, func.line));

            if !func.description.is_empty() {
                out.push_str(&format!("**Description**: {}\n\n", func.description));
            }

            out.push_str(&format!("```typescript\n{}\n```\n\n", func.context));
            out.push_str("---\n\n");
        }
    }

    out
}

pub fn render_api_reference(index: &Index) -> String {
    let mut out = String::new();
    push_header(
        &mut out,
        "API Reference",
        index,
        "Total API endpoints",
        index.apis.len(),
    );

    if index.apis.is_empty() {
        out.push_str("⚠️ No API endpoints defined yet\n");
        return out;
    }

    for api in &index.apis {
        let heading = match (&api.method, &api.route) {
            (Some(method), Some(route)) => format!("{method} {route}"),
            _ => api.name.clone(),
        };
        out.push_str(&format!("## `{heading}`\n\n"));
        out.push_str(&format!("**Location**: {}:{}\n\n", api.file, api.line));
        if !api.description.is_empty() {
            out.push_str(&format!("**Description**: {}\n\n", api.description));
        }
        out.push_str("---\n\n");
    }

    out
}
