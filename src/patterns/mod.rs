//! React idiom detection and Flutter skeleton synthesis.
//!
//! This module turns parsed JSX/TSX source into a catalog of recognized
//! structural idioms, then emits Dart skeleton snippets and a migration
//! guide from that catalog.
//!
//! ## Architecture
//!
//! ```text
//! patterns/
//! ├── mod.rs       - entry point, language dispatch, config, renderer
//! ├── catalog.rs   - pattern sum type, occurrences, catalog, skeleton set
//! ├── detect.rs    - single pre-order traversal and detection predicates
//! ├── synth.rs     - catalog -> Dart skeleton blocks
//! └── guide.rs     - catalog -> migration guide text
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use react_port_lite::patterns::{analyze_default, SourceLang};
//!
//! let result = analyze_default("const E = withAuth(App);", SourceLang::Tsx);
//! println!("{}", result.guide);
//! ```
//!
//! The three core operations (`detect`, `synthesize`, `describe`) are pure
//! functions over immutable inputs: no I/O, no shared state between calls,
//! and none of them panics for any well-formed tree.

pub mod catalog;
pub mod detect;
pub mod guide;
pub mod synth;

use once_cell::sync::Lazy;
use serde::Serialize;
use tree_sitter::{Language, Node, Parser};

pub use catalog::{
    CodeSkeletonSet, Pattern, PatternCatalog, PatternKind, PatternOccurrence, SourceLoc,
};
pub use detect::detect;
pub use guide::describe;
pub use synth::synthesize;

// ============ Source Languages ============

/// Source flavors this crate accepts from the tree producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLang {
    /// JavaScript with JSX.
    Jsx,
    /// TypeScript with TSX (plain TypeScript parses under this grammar too).
    Tsx,
}

impl SourceLang {
    /// Detect language from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" | "jsx" => Some(Self::Jsx),
            "ts" | "mts" | "cts" | "tsx" => Some(Self::Tsx),
            _ => None,
        }
    }

    /// Get the tree-sitter language for this flavor.
    fn tree_sitter_language(&self) -> Language {
        match self {
            Self::Jsx => tree_sitter_javascript::LANGUAGE.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

// ============ Detector Config ============

/// Naming conventions the detector matches against.
///
/// Everything is source-level convention, not semantics: the detector never
/// resolves imports or types, it matches shapes and names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorConfig {
    /// Prefix marking behavior-wrapping calls (`with` -> `withAuth`).
    pub hoc_prefix: String,
    /// Bare or member-access callee name marking memoization (`memo`).
    pub memo_alias: String,
    /// Bare or member-access callee name marking ref forwarding.
    pub forward_ref_alias: String,
    /// Exact attribute names treated as callback props.
    pub render_prop_names: Vec<String>,
    /// Attribute-name prefix treated as a callback prop (`renderRow`).
    pub render_prop_prefix: String,
    /// Suffix for names generated from stripped wrapper names
    /// (`withAuth` -> `AuthMixin`).
    pub generated_suffix: String,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            hoc_prefix: "with".to_string(),
            memo_alias: "memo".to_string(),
            forward_ref_alias: "forwardRef".to_string(),
            render_prop_names: vec!["render".to_string()],
            render_prop_prefix: "render".to_string(),
            generated_suffix: "Mixin".to_string(),
        }
    }
}

static DEFAULT_CONFIG: Lazy<DetectorConfig> = Lazy::new(DetectorConfig::default);

impl DetectorConfig {
    /// Shared default configuration.
    pub fn shared() -> &'static DetectorConfig {
        &DEFAULT_CONFIG
    }
}

// ============ Source Renderer ============

/// Injected capability for rendering an expression node back to source
/// text, used to recover collection names for `.map()` receivers.
///
/// Implementations must be synchronous and side-effect-free; returning
/// `None` makes detection fall back to a placeholder name instead of
/// failing.
pub trait SourceRenderer {
    fn render(&self, node: Node<'_>) -> Option<String>;
}

/// Default renderer: slices the node's byte range out of the original
/// source.
pub struct SpanRenderer<'a> {
    source: &'a [u8],
}

impl<'a> SpanRenderer<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        SpanRenderer { source }
    }
}

impl SourceRenderer for SpanRenderer<'_> {
    fn render(&self, node: Node<'_>) -> Option<String> {
        let slice = self.source.get(node.start_byte()..node.end_byte())?;
        let text = std::str::from_utf8(slice).ok()?.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

// ============ Result Type ============

/// Everything one detect -> synthesize -> describe run produces for a
/// single source unit. Consumed once by the downstream generator and
/// report writer; nothing is cached across runs.
#[derive(Debug, Serialize)]
pub struct AnalysisResult {
    pub catalog: PatternCatalog,
    pub skeletons: CodeSkeletonSet,
    pub guide: String,
}

// ============ Main Entry Point ============

/// Parse `content` and run the full pipeline over it.
///
/// Parsing failures do not raise: the result carries an empty catalog with
/// a diagnostic note, an empty skeleton set, and a title-only guide, so a
/// batch caller can keep processing its remaining source units.
pub fn analyze(content: &str, lang: SourceLang, config: &DetectorConfig) -> AnalysisResult {
    let source = content.as_bytes();
    let catalog = match parse_tree(content, lang) {
        Some(tree) => {
            let renderer = SpanRenderer::new(source);
            detect(tree.root_node(), source, config, &renderer)
        }
        None => {
            let mut catalog = PatternCatalog::new();
            catalog.note("failed to parse source unit, returning an empty catalog");
            catalog
        }
    };

    let skeletons = synthesize(&catalog);
    let guide = describe(&catalog);

    AnalysisResult {
        catalog,
        skeletons,
        guide,
    }
}

/// `analyze` with the shared default config.
pub fn analyze_default(content: &str, lang: SourceLang) -> AnalysisResult {
    analyze(content, lang, DetectorConfig::shared())
}

fn parse_tree(content: &str, lang: SourceLang) -> Option<tree_sitter::Tree> {
    let mut parser = Parser::new();
    parser.set_language(&lang.tree_sitter_language()).ok()?;
    parser.parse(content, None)
}

// ============ Tests ============

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_detection() {
        assert_eq!(SourceLang::from_extension("jsx"), Some(SourceLang::Jsx));
        assert_eq!(SourceLang::from_extension("TSX"), Some(SourceLang::Tsx));
        assert_eq!(SourceLang::from_extension("ts"), Some(SourceLang::Tsx));
        assert_eq!(SourceLang::from_extension("py"), None);
    }

    #[test]
    fn test_analyze_end_to_end() {
        let code = r#"
const Enhanced = withAuth(Dashboard);
const rows = items.map(item => <Row key={item.id} />);
"#;
        let result = analyze_default(code, SourceLang::Tsx);
        assert_eq!(result.catalog.len(), 2);
        assert!(!result.skeletons.is_empty());
        assert!(result.guide.contains("AuthMixin"));
    }

    #[test]
    fn test_analyze_result_serializes() {
        let result = analyze_default("const E = memo(Avatar);", SourceLang::Jsx);
        let json = serde_json::to_string(&result).expect("result serializes");
        assert!(json.contains("MemoizationMarker"));
        assert!(json.contains("Avatar"));
    }

    #[test]
    fn test_custom_config_prefix_and_suffix() {
        let config = DetectorConfig {
            hoc_prefix: "use".to_string(),
            generated_suffix: "Behavior".to_string(),
            ..DetectorConfig::default()
        };
        let result = analyze("const E = useAuth(App);", SourceLang::Tsx, &config);
        let occs = result.catalog.occurrences(PatternKind::WrappedComponent);
        assert_eq!(occs.len(), 1);
        assert_eq!(
            occs[0].pattern,
            Pattern::WrappedComponent {
                wrapper_name: "useAuth".to_string(),
                component_name: "App".to_string(),
                generated_name: "AuthBehavior".to_string(),
            }
        );
    }
}
