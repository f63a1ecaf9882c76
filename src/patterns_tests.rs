//! Scenario tests for the full detect -> synthesize -> describe pipeline.
//!
//! These run real JSX/TSX fixtures through `analyze` and check the catalog,
//! the generated Dart blocks, and the guide together.

use crate::patterns::guide::GUIDE_TITLE;
use crate::patterns::{
    analyze_default, detect, DetectorConfig, Pattern, PatternKind, SourceLang, SpanRenderer,
};

#[test]
fn test_scenario_behavior_wrapping_call() {
    let result = analyze_default("const Enhanced = withAuth(Dashboard);", SourceLang::Tsx);

    let occs = result.catalog.occurrences(PatternKind::WrappedComponent);
    assert_eq!(occs.len(), 1);
    assert_eq!(
        occs[0].pattern,
        Pattern::WrappedComponent {
            wrapper_name: "withAuth".to_string(),
            component_name: "Dashboard".to_string(),
            generated_name: "AuthMixin".to_string(),
        }
    );

    let blocks = result.skeletons.get(PatternKind::WrappedComponent).expect("skeleton present");
    assert!(blocks[0].contains("mixin AuthMixin"));
    assert!(result.guide.contains("withAuth(Dashboard) -> mixin AuthMixin"));
}

#[test]
fn test_scenario_memoized_component() {
    let result = analyze_default("export default memo(Avatar);", SourceLang::Jsx);

    let occs = result.catalog.occurrences(PatternKind::MemoizationMarker);
    assert_eq!(occs.len(), 1);
    assert_eq!(
        occs[0].pattern,
        Pattern::MemoizationMarker { component_name: "Avatar".to_string() }
    );
    let blocks = result.skeletons.get(PatternKind::MemoizationMarker).expect("skeleton present");
    assert!(blocks[0].contains("class Avatar"));
    assert!(blocks[0].contains("const Avatar({super.key})"));
}

#[test]
fn test_scenario_iteration_rendering() {
    let result = analyze_default(
        "const rows = items.map(item => <Item key={item.id} />);",
        SourceLang::Tsx,
    );

    let occs = result.catalog.occurrences(PatternKind::IterationRendering);
    assert_eq!(occs.len(), 1);
    assert_eq!(
        occs[0].pattern,
        Pattern::IterationRendering { collection_name: "items".to_string() }
    );

    let blocks = result.skeletons.get(PatternKind::IterationRendering).expect("skeleton present");
    assert!(blocks[0].contains("itemCount: items.length"));
    assert!(blocks[0].contains("itemBuilder"));
}

#[test]
fn test_scenario_hoc_chain_outer_to_inner() {
    let result = analyze_default(
        "export default withAuth(withRouter(withTheme(Component)));",
        SourceLang::Tsx,
    );

    let occs = result.catalog.occurrences(PatternKind::WrappedComponent);
    assert_eq!(occs.len(), 3);
    let wrappers: Vec<&str> = occs
        .iter()
        .map(|occ| match &occ.pattern {
            Pattern::WrappedComponent { wrapper_name, .. } => wrapper_name.as_str(),
            other => panic!("unexpected pattern {:?}", other),
        })
        .collect();
    assert_eq!(wrappers, vec!["withAuth", "withRouter", "withTheme"]);

    // Only the innermost call wraps a bare identifier.
    let components: Vec<&str> = occs
        .iter()
        .map(|occ| match &occ.pattern {
            Pattern::WrappedComponent { component_name, .. } => component_name.as_str(),
            other => panic!("unexpected pattern {:?}", other),
        })
        .collect();
    assert_eq!(components, vec!["<expression>", "<expression>", "Component"]);
}

#[test]
fn test_scenario_no_matches() {
    let code = r#"
interface Props {
    title: string;
}

export function plain(props: Props): string {
    return props.title.toUpperCase();
}
"#;
    let result = analyze_default(code, SourceLang::Tsx);

    assert!(result.catalog.is_empty());
    assert!(result.skeletons.is_empty());
    assert_eq!(result.guide, format!("{}\n", GUIDE_TITLE));
}

#[test]
fn test_component_file_with_mixed_idioms() {
    let code = r#"
import React, { memo, forwardRef } from 'react';

const Row = memo(function Row({ item }) {
  return <li>{item.label}</li>;
});

const Input = forwardRef((props, ref) => <input ref={ref} {...props} />);

function ItemList({ items, loading }) {
  return (
    <>
      <Header render={() => <Title text="Items" />} />
      {loading ? <Spinner /> : null}
      <ul>{items.map(item => <Row key={item.id} item={item} />)}</ul>
    </>
  );
}

export default withTracking(ItemList);
"#;
    let result = analyze_default(code, SourceLang::Jsx);
    let catalog = &result.catalog;

    assert_eq!(catalog.count(PatternKind::WrappedComponent), 1);
    assert_eq!(catalog.count(PatternKind::MemoizationMarker), 1);
    assert_eq!(catalog.count(PatternKind::RefForwarding), 1);
    assert_eq!(catalog.count(PatternKind::DeferredRenderCallback), 1);
    assert_eq!(catalog.count(PatternKind::IterationRendering), 1);
    assert_eq!(catalog.count(PatternKind::MultiRootGrouping), 1);
    assert_eq!(catalog.count(PatternKind::ConditionalBranch), 1);

    // Guide sections follow canonical order regardless of detection order.
    let positions: Vec<usize> = [
        "## Higher-order components",
        "## Render props",
        "## Memoized components",
        "## Ref forwarding",
        "## List rendering",
        "## Fragments",
        "## Conditional rendering",
    ]
    .iter()
    .map(|heading| result.guide.find(heading).expect("section present"))
    .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_pipeline_is_deterministic() {
    let code = r#"
const Enhanced = withAuth(Dashboard);
const rows = items.map(item => <Row key={item.id} />);
const Memo = React.memo(() => <div />);
"#;
    let first = analyze_default(code, SourceLang::Tsx);
    let second = analyze_default(code, SourceLang::Tsx);

    assert_eq!(first.catalog, second.catalog);
    assert_eq!(first.skeletons, second.skeletons);
    assert_eq!(first.guide, second.guide);
}

#[test]
fn test_detect_with_custom_renderer_is_pure() {
    struct UpperRenderer<'a> {
        inner: SpanRenderer<'a>,
    }

    impl crate::patterns::SourceRenderer for UpperRenderer<'_> {
        fn render(&self, node: tree_sitter::Node<'_>) -> Option<String> {
            self.inner.render(node).map(|text| text.to_uppercase())
        }
    }

    let code = "const rows = items.map(item => item);";
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&tree_sitter_javascript::LANGUAGE.into())
        .expect("load js grammar");
    let tree = parser.parse(code, None).expect("parse fixture");

    let renderer = UpperRenderer { inner: SpanRenderer::new(code.as_bytes()) };
    let catalog = detect(
        tree.root_node(),
        code.as_bytes(),
        DetectorConfig::shared(),
        &renderer,
    );

    let occs = catalog.occurrences(PatternKind::IterationRendering);
    assert_eq!(
        occs[0].pattern,
        Pattern::IterationRendering { collection_name: "ITEMS".to_string() }
    );
}

#[test]
fn test_detect_never_panics_on_degenerate_inputs() {
    for code in [
        "",
        "   \n\n  ",
        "}{)(",
        "<",
        "const x = <A",
        "{() => {}}",
        "withAuth(",
    ] {
        let result = analyze_default(code, SourceLang::Tsx);
        let _ = result.guide.len();
    }
}
