//! Single-pass pattern detection over a parsed JSX/TSX tree.
//!
//! `detect` walks the tree once, pre-order, and classifies nodes into the
//! seven idiom categories. Call expressions are checked against the four
//! call-shaped rules in priority order (wrapped component, memo marker,
//! forwardRef, `.map` iteration) with first match wins, so a single call
//! node never lands in more than one of those buckets. Traversal always
//! continues into a matched node's children, so nested occurrences (HOC
//! chains, maps inside render props) are still recorded independently.
//!
//! Nothing in here panics or returns an error: nodes that match no rule are
//! skipped, and a renderer failure degrades to a placeholder collection name
//! plus a diagnostic note on the catalog.

use tree_sitter::Node;

use crate::patterns::catalog::{Pattern, PatternCatalog, SourceLoc};
use crate::patterns::{DetectorConfig, SourceRenderer};

// ============ Fixed Fallback Names ============

/// Stands in for `component_name` when a wrapping call's direct argument is
/// not a bare identifier. Chains like `withAuth(withRouter(X))` inspect only
/// one level, so every outer occurrence carries this placeholder.
pub const EXPRESSION_PLACEHOLDER: &str = "<expression>";

/// Collection name used when the injected renderer cannot recover source
/// text for the `.map` receiver.
pub const FALLBACK_COLLECTION_NAME: &str = "collection";

/// Callback prop name reported when the function value arrives as element
/// children rather than through a named attribute.
pub const FALLBACK_CALLBACK_PROP: &str = "children";

/// Component name synthesized when `memo` wraps an inline function instead
/// of a named component.
pub const DEFAULT_MEMO_NAME: &str = "MemoizedComponent";

// ============ Entry Point ============

/// Detect every recognized idiom under `root`.
///
/// Visits each node exactly once in pre-order; per-category occurrence order
/// is therefore traversal order. Total over any well-formed tree, including
/// trees containing error nodes.
pub fn detect(
    root: Node,
    source: &[u8],
    config: &DetectorConfig,
    renderer: &dyn SourceRenderer,
) -> PatternCatalog {
    let mut catalog = PatternCatalog::new();
    walk(root, source, config, renderer, &mut catalog);
    catalog
}

fn walk(
    node: Node,
    source: &[u8],
    config: &DetectorConfig,
    renderer: &dyn SourceRenderer,
    catalog: &mut PatternCatalog,
) {
    match node.kind() {
        "call_expression" => classify_call(node, source, config, renderer, catalog),
        "jsx_element" | "jsx_self_closing_element" => {
            if is_fragment(node) {
                detect_fragment(node, catalog);
            } else {
                detect_deferred_callback(node, source, config, catalog);
            }
        }
        "ternary_expression" => detect_conditional(node, source, catalog),
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(child, source, config, renderer, catalog);
    }
}

// ============ Call-Expression Rules ============

/// Priority dispatch for call nodes. Checked top to bottom, first match
/// wins; a call that matches none of the four shapes produces nothing.
fn classify_call(
    node: Node,
    source: &[u8],
    config: &DetectorConfig,
    renderer: &dyn SourceRenderer,
    catalog: &mut PatternCatalog,
) {
    let Some(callee) = node.child_by_field_name("function") else {
        return;
    };
    let loc = SourceLoc::of(node);

    if let Some(pattern) = match_wrapped_component(node, callee, source, config) {
        catalog.record(pattern, loc);
        return;
    }
    if let Some(pattern) = match_memo_marker(node, callee, source, config) {
        catalog.record(pattern, loc);
        return;
    }
    if callee_matches_alias(callee, source, &config.forward_ref_alias) {
        catalog.record(Pattern::RefForwarding, loc);
        return;
    }
    match_iteration(node, callee, source, renderer, catalog);
}

fn match_wrapped_component(
    call: Node,
    callee: Node,
    source: &[u8],
    config: &DetectorConfig,
) -> Option<Pattern> {
    if callee.kind() != "identifier" {
        return None;
    }
    let wrapper_name = node_text(callee, source);
    let stem = wrapper_name.strip_prefix(config.hoc_prefix.as_str())?;
    // `withAuth` is a wrapper, `without` is just a word: the convention
    // requires an uppercase letter right after the prefix.
    if !stem.chars().next().is_some_and(char::is_uppercase) {
        return None;
    }
    let args = call.child_by_field_name("arguments")?;
    let first = first_named_argument(args)?;

    let component_name = if first.kind() == "identifier" {
        node_text(first, source).to_string()
    } else {
        EXPRESSION_PLACEHOLDER.to_string()
    };

    Some(Pattern::WrappedComponent {
        wrapper_name: wrapper_name.to_string(),
        component_name,
        generated_name: format!("{}{}", stem, config.generated_suffix),
    })
}

fn match_memo_marker(
    call: Node,
    callee: Node,
    source: &[u8],
    config: &DetectorConfig,
) -> Option<Pattern> {
    if !callee_matches_alias(callee, source, &config.memo_alias) {
        return None;
    }
    let component_name = call
        .child_by_field_name("arguments")
        .and_then(first_named_argument)
        .filter(|arg| arg.kind() == "identifier")
        .map(|arg| node_text(arg, source).to_string())
        .unwrap_or_else(|| DEFAULT_MEMO_NAME.to_string());

    Some(Pattern::MemoizationMarker { component_name })
}

fn match_iteration(
    call: Node,
    callee: Node,
    source: &[u8],
    renderer: &dyn SourceRenderer,
    catalog: &mut PatternCatalog,
) {
    if callee.kind() != "member_expression" {
        return;
    }
    if member_property_name(callee, source) != Some("map") {
        return;
    }
    let Some(receiver) = callee.child_by_field_name("object") else {
        return;
    };

    let collection_name = match renderer.render(receiver) {
        Some(text) if !text.trim().is_empty() => text.trim().to_string(),
        _ => {
            let loc = SourceLoc::of(receiver);
            catalog.note(format!(
                "line {}: could not render the .map() receiver, using \"{}\"",
                loc.line, FALLBACK_COLLECTION_NAME
            ));
            FALLBACK_COLLECTION_NAME.to_string()
        }
    };

    catalog.record(
        Pattern::IterationRendering { collection_name },
        SourceLoc::of(call),
    );
}

/// True when the callee is the bare identifier `alias` or a member access
/// whose property is `alias` (covers both `memo(...)` and `React.memo(...)`).
fn callee_matches_alias(callee: Node, source: &[u8], alias: &str) -> bool {
    match callee.kind() {
        "identifier" => node_text(callee, source) == alias,
        "member_expression" => member_property_name(callee, source) == Some(alias),
        _ => false,
    }
}

fn member_property_name<'a>(member: Node, source: &'a [u8]) -> Option<&'a str> {
    let property = member.child_by_field_name("property")?;
    if property.kind() != "property_identifier" {
        return None;
    }
    Some(node_text(property, source))
}

fn first_named_argument(args: Node) -> Option<Node> {
    let mut cursor = args.walk();
    let first = args
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");
    first
}

// ============ Element Rules ============

/// Render-prop detection on a JSX element: (a) the first attribute in
/// declaration order whose value is a function expression and whose name
/// matches the configured callback-prop convention; else (b) the first
/// element child that is an embedded function expression, reported under
/// the fixed `children` prop name.
fn detect_deferred_callback(
    node: Node,
    source: &[u8],
    config: &DetectorConfig,
    catalog: &mut PatternCatalog,
) {
    let Some(callback_prop_name) = attribute_callback_prop(node, source, config)
        .or_else(|| children_callback_prop(node))
    else {
        return;
    };
    let host_name = element_tag_name(node, source).unwrap_or("Element").to_string();

    catalog.record(
        Pattern::DeferredRenderCallback {
            host_name,
            callback_prop_name,
        },
        SourceLoc::of(node),
    );
}

/// Rule (a): first attribute in declaration order with a matching name and
/// a function-valued expression.
fn attribute_callback_prop(
    node: Node,
    source: &[u8],
    config: &DetectorConfig,
) -> Option<String> {
    let holder = if node.kind() == "jsx_self_closing_element" {
        node
    } else {
        opening_element(node)?
    };

    let mut cursor = holder.walk();
    for attr in holder.named_children(&mut cursor) {
        if attr.kind() != "jsx_attribute" {
            continue;
        }
        let Some(name) = attribute_name(attr, source) else {
            continue;
        };
        if !is_callback_prop_name(name, config) {
            continue;
        }
        if attribute_function_value(attr).is_some() {
            return Some(name.to_string());
        }
    }
    None
}

/// Rule (b): first element child that is an embedded function expression,
/// reported under the fixed fallback prop name.
fn children_callback_prop(node: Node) -> Option<String> {
    if node.kind() != "jsx_element" {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "jsx_expression" && embedded_function(child).is_some() {
            return Some(FALLBACK_CALLBACK_PROP.to_string());
        }
    }
    None
}

/// A name matches when listed exactly or when it begins with the configured
/// prefix; a name equal to the prefix itself counts as beginning with it.
fn is_callback_prop_name(name: &str, config: &DetectorConfig) -> bool {
    config.render_prop_names.iter().any(|known| known == name)
        || name.starts_with(config.render_prop_prefix.as_str())
}

fn attribute_name<'a>(attr: Node, source: &'a [u8]) -> Option<&'a str> {
    let mut cursor = attr.walk();
    let name = attr
        .named_children(&mut cursor)
        .find(|child| matches!(child.kind(), "property_identifier" | "identifier"));
    name.map(|name| node_text(name, source))
}

fn attribute_function_value(attr: Node) -> Option<Node> {
    let mut cursor = attr.walk();
    let expr = attr
        .named_children(&mut cursor)
        .find(|child| child.kind() == "jsx_expression")?;
    embedded_function(expr)
}

/// Unwraps a `{...}` slot (through parentheses) down to a function-valued
/// expression, if that is what it holds.
fn embedded_function(expr: Node) -> Option<Node> {
    let mut inner = expr.named_child(0)?;
    while inner.kind() == "parenthesized_expression" {
        inner = inner.named_child(0)?;
    }
    if matches!(
        inner.kind(),
        "arrow_function" | "function_expression" | "function" | "generator_function"
    ) {
        Some(inner)
    } else {
        None
    }
}

fn element_tag_name<'a>(node: Node, source: &'a [u8]) -> Option<&'a str> {
    let name_node = match node.kind() {
        "jsx_self_closing_element" => node.child_by_field_name("name"),
        "jsx_element" => opening_element(node).and_then(|open| open.child_by_field_name("name")),
        _ => None,
    }?;
    Some(node_text(name_node, source))
}

fn opening_element(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    let open = node
        .named_children(&mut cursor)
        .find(|child| child.kind() == "jsx_opening_element");
    open
}

// ============ Fragment Rule ============

/// The JS and TSX grammars parse `<>...</>` as a `jsx_element` whose
/// opening element has no name node; there is no dedicated fragment kind.
fn is_fragment(node: Node) -> bool {
    node.kind() == "jsx_element"
        && opening_element(node).is_some_and(|open| open.child_by_field_name("name").is_none())
}

/// Every fragment is recorded; the count covers only element and nested
/// fragment children, never text or embedded expressions (the open and
/// close tags are named children too, and their kinds keep them out).
fn detect_fragment(node: Node, catalog: &mut PatternCatalog) {
    let mut cursor = node.walk();
    let child_count = node
        .named_children(&mut cursor)
        .filter(|child| matches!(child.kind(), "jsx_element" | "jsx_self_closing_element"))
        .count();

    catalog.record(
        Pattern::MultiRootGrouping { child_count },
        SourceLoc::of(node),
    );
}

// ============ Conditional Rule ============

/// Ternaries only count when they sit in a JSX expression slot, possibly
/// behind parentheses. A bare `null`/`undefined` alternate renders nothing
/// in React, so it is reported as having no alternate.
fn detect_conditional(node: Node, source: &[u8], catalog: &mut PatternCatalog) {
    if !in_jsx_expression_slot(node) {
        return;
    }
    let has_alternate = node
        .child_by_field_name("alternative")
        .is_some_and(|alt| !is_empty_branch(alt, source));

    catalog.record(
        Pattern::ConditionalBranch { has_alternate },
        SourceLoc::of(node),
    );
}

fn in_jsx_expression_slot(node: Node) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        match parent.kind() {
            "jsx_expression" => return true,
            "parenthesized_expression" => current = parent.parent(),
            _ => return false,
        }
    }
    false
}

fn is_empty_branch(node: Node, source: &[u8]) -> bool {
    match node.kind() {
        "null" | "undefined" => true,
        "identifier" => node_text(node, source) == "undefined",
        _ => false,
    }
}

// ============ Utilities ============

fn node_text<'a>(node: Node, source: &'a [u8]) -> &'a str {
    let slice = source.get(node.start_byte()..node.end_byte()).unwrap_or(&[]);
    std::str::from_utf8(slice).unwrap_or("")
}

// ============ Tests ============
