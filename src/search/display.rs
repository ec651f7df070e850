use super::{ResultCategory, SearchResult};

pub const CONTEXT_PREVIEW_CHARS: usize = 100;

impl ResultCategory {
    pub fn marker(&self) -> &'static str {
        match self {
            ResultCategory::Function => "🔧",
            ResultCategory::Class => "📦",
            ResultCategory::Api => "🌐",
            ResultCategory::FileContent => "📄",
        }
    }
}

/// Render results for the terminal. Context lines are shown only when
/// `show_context` is set and the result carries one.
pub fn render_results(results: &[SearchResult], show_context: bool) -> String {
    if results.is_empty() {
        return "❌ No matching results\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!("✅ Found {} results:\n\n", results.len()));

    for (idx, result) in results.iter().enumerate() {
        out.push_str(&format!(
            "{} [{}] {}\n",
            result.category.marker(),
            idx + 1,
            result.name
        ));
        out.push_str(&format!("   📁 {}:{}\n", result.file, result.line));

        if show_context {
            if let Some(context) = result.context.as_deref().filter(|c| !c.is_empty()) {
                out.push_str(&format!("   💬 {}\n", preview(context)));
            }
        }

        if let Some(description) = result.description.as_deref().filter(|d| !d.is_empty()) {
            out.push_str(&format!("   ℹ️  {description}\n"));
        }

        out.push('\n');
    }

    out
}

pub fn print_results(results: &[SearchResult], show_context: bool) {
    print!("{}", render_results(results, show_context));
}

fn preview(context: &str) -> String {
    let head: String = context.chars().take(CONTEXT_PREVIEW_CHARS).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(category: ResultCategory, name: &str, context: Option<&str>) -> SearchResult {
        SearchResult {
            category,
            name: name.to_string(),
            file: "src/orders.ts".to_string(),
            line: 12,
            file_type: Some("ts".to_string()),
            description: None,
            context: context.map(str::to_string),
        }
    }

    #[test]
    fn test_empty_results() {
        assert_eq!(render_results(&[], true), "❌ No matching results\n");
    }

    #[test]
    fn test_result_lines() {
        let mut first = result(
            ResultCategory::Function,
            "shipOrder",
            Some("export function shipOrder() {"),
        );
        first.description = Some("Ships one order".to_string());
        let second = result(ResultCategory::FileContent, "order", None);

        let out = render_results(&[first, second], true);
        assert!(out.starts_with("✅ Found 2 results:"));
        assert!(out.contains("🔧 [1] shipOrder"));
        assert!(out.contains("📁 src/orders.ts:12"));
        assert!(out.contains("💬 export function shipOrder() {..."));
        assert!(out.contains("ℹ️  Ships one order"));
        assert!(out.contains("📄 [2] order"));
    }

    #[test]
    fn test_context_truncated_by_chars() {
        let long = "é".repeat(150);
        let out = render_results(&[result(ResultCategory::Class, "Big", Some(&long))], true);
        let expected = format!("💬 {}...", "é".repeat(CONTEXT_PREVIEW_CHARS));
        assert!(out.contains(&expected));
        assert!(!out.contains(&"é".repeat(CONTEXT_PREVIEW_CHARS + 1)));
    }

    #[test]
    fn test_context_hidden() {
        let route = result(ResultCategory::Api, "GET /orders", Some("app.get('/orders')"));
        let out = render_results(&[route], false);
        assert!(out.contains("🌐 [1] GET /orders"));
        assert!(!out.contains("💬"));
    }
}
