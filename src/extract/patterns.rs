use regex::Regex;

use crate::error::Result;

/// One declaration style, recognised on a single line.
pub trait SymbolMatcher: Send + Sync {
    fn name(&self) -> &'static str;
    /// Returns the declared identifier when the line holds this declaration.
    fn capture<'a>(&self, line: &'a str) -> Option<&'a str>;
}

/// Matcher backed by a regex whose first capture group is the identifier.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    name: &'static str,
    pattern: Regex,
}

impl RegexMatcher {
    pub fn new(name: &'static str, pattern: &str) -> Result<Self> {
        Ok(Self {
            name,
            pattern: Regex::new(pattern)?,
        })
    }
}

impl SymbolMatcher for RegexMatcher {
    fn name(&self) -> &'static str {
        self.name
    }

    fn capture<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Ordered matchers for one symbol kind. The first matcher that fires on a
/// line decides the identifier for that line.
pub struct MatcherSet {
    matchers: Vec<Box<dyn SymbolMatcher>>,
}

impl MatcherSet {
    pub fn new() -> Self {
        Self {
            matchers: Vec::new(),
        }
    }

    pub fn with<M: SymbolMatcher + 'static>(mut self, matcher: M) -> Self {
        self.matchers.push(Box::new(matcher));
        self
    }

    pub fn functions() -> Result<Self> {
        Ok(Self::new()
            .with(RegexMatcher::new(
                "exported-function",
                r"export\s+(?:async\s+)?function\s+(\w+)",
            )?)
            .with(RegexMatcher::new(
                "const-function",
                r"(?:export\s+)?const\s+(\w+)\s*=\s*(?:async\s+)?\(",
            )?)
            .with(RegexMatcher::new(
                "class-method",
                r"(?:public|private|protected)\s+(?:async\s+)?(\w+)\s*\(",
            )?))
    }

    pub fn classes() -> Result<Self> {
        Ok(Self::new().with(RegexMatcher::new(
            "class",
            r"(?:export\s+)?\bclass\s+(\w+)",
        )?))
    }

    pub fn first_match<'a>(&self, line: &'a str) -> Option<(&'static str, &'a str)> {
        self.matchers
            .iter()
            .find_map(|matcher| matcher.capture(line).map(|name| (matcher.name(), name)))
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl Default for MatcherSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function_name(line: &str) -> Option<String> {
        MatcherSet::functions()
            .unwrap()
            .first_match(line)
            .map(|(_, name)| name.to_string())
    }

    #[test]
    fn test_exported_functions() {
        assert_eq!(
            function_name("export function calculateHandlingTime(order: Order) {").as_deref(),
            Some("calculateHandlingTime")
        );
        assert_eq!(
            function_name("export async function loadOrders() {").as_deref(),
            Some("loadOrders")
        );
    }

    #[test]
    fn test_const_bound_functions() {
        assert_eq!(function_name("const add = (a, b) => a + b;").as_deref(), Some("add"));
        assert_eq!(
            function_name("export const fetchAll = async () => {").as_deref(),
            Some("fetchAll")
        );
        // Kept permissive: any parenthesised initializer counts.
        assert_eq!(function_name("const total = (a + b) * 2;").as_deref(), Some("total"));
        assert_eq!(function_name("const LIMIT = 20;"), None);
    }

    #[test]
    fn test_class_methods() {
        assert_eq!(
            function_name("  public async refresh(force: boolean) {").as_deref(),
            Some("refresh")
        );
        assert_eq!(function_name("  private compute(x) {").as_deref(), Some("compute"));
        assert_eq!(function_name("  protected readonly items: Item[];"), None);
    }

    #[test]
    fn test_first_matcher_wins() {
        let set = MatcherSet::functions().unwrap();
        let (matcher, name) = set
            .first_match("export function run() { const go = () => 1 }")
            .unwrap();
        assert_eq!(matcher, "exported-function");
        assert_eq!(name, "run");
    }

    #[test]
    fn test_reserved_identifiers_accepted_verbatim() {
        assert_eq!(
            function_name("  private if(x) {").as_deref(),
            Some("if")
        );
    }

    #[test]
    fn test_class_pattern() {
        let set = MatcherSet::classes().unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.first_match("export class OrderQueue extends Base {").map(|(_, n)| n),
            Some("OrderQueue")
        );
        assert_eq!(set.first_match("class Helper {").map(|(_, n)| n), Some("Helper"));
        assert_eq!(set.first_match("const subclass = 1;"), None);
        assert_eq!(set.first_match("const className = 'x';"), None);
    }
}
