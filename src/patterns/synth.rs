//! Flutter skeleton synthesis.
//!
//! `synthesize` maps a catalog to Dart snippet blocks, one fixed shape per
//! category. Output is a pure function of catalog content: equal catalogs
//! (locations excluded) produce byte-identical blocks. Every snippet is
//! structurally valid Dart but intentionally incomplete, with an explicit
//! `TODO: complete` marker where the ported body belongs.

use crate::patterns::catalog::{CodeSkeletonSet, Pattern, PatternCatalog, PatternKind};

/// Marker every emitted snippet carries where hand-porting must continue.
pub const COMPLETION_MARKER: &str = "TODO: complete";

/// Map a catalog to Dart skeleton blocks grouped by category.
///
/// Categories absent from the catalog are absent from the output set.
/// `RefForwarding` emits exactly one shared snippet no matter how often it
/// occurred; `MultiRootGrouping` and `ConditionalBranch` emit advisory
/// comment text only.
pub fn synthesize(catalog: &PatternCatalog) -> CodeSkeletonSet {
    let mut set = CodeSkeletonSet::new();

    for kind in catalog.kinds() {
        match kind {
            PatternKind::WrappedComponent => {
                for occ in catalog.occurrences(kind) {
                    if let Pattern::WrappedComponent {
                        wrapper_name,
                        component_name,
                        generated_name,
                    } = &occ.pattern
                    {
                        set.push(kind, wrapped_component_block(wrapper_name, component_name, generated_name));
                    }
                }
            }
            PatternKind::MemoizationMarker => {
                for occ in catalog.occurrences(kind) {
                    if let Pattern::MemoizationMarker { component_name } = &occ.pattern {
                        set.push(kind, memo_block(component_name));
                    }
                }
            }
            PatternKind::RefForwarding => {
                set.push(kind, ref_forwarding_block());
            }
            PatternKind::DeferredRenderCallback => {
                for occ in catalog.occurrences(kind) {
                    if let Pattern::DeferredRenderCallback {
                        host_name,
                        callback_prop_name,
                    } = &occ.pattern
                    {
                        set.push(kind, builder_callback_block(host_name, callback_prop_name));
                    }
                }
            }
            PatternKind::IterationRendering => {
                for occ in catalog.occurrences(kind) {
                    if let Pattern::IterationRendering { collection_name } = &occ.pattern {
                        set.push(kind, builder_loop_block(collection_name));
                    }
                }
            }
            PatternKind::MultiRootGrouping => {
                set.push(kind, fragment_advisory().to_string());
            }
            PatternKind::ConditionalBranch => {
                set.push(kind, conditional_advisory().to_string());
            }
        }
    }

    set
}

// ============ Per-Category Shapes ============

fn wrapped_component_block(wrapper: &str, component: &str, generated: &str) -> String {
    format!(
        "\
// {wrapper}({component}): port the injected behavior as a reusable mixin.
mixin {generated} on StatelessWidget {{
  // {COMPLETION_MARKER} the behavior {wrapper} added around {component}
}}
"
    )
}

fn memo_block(component: &str) -> String {
    format!(
        "\
// {component} was memoized: a const constructor lets Flutter reuse the element.
class {component} extends StatelessWidget {{
  const {component}({{super.key}});

  @override
  Widget build(BuildContext context) {{
    // {COMPLETION_MARKER} the build method for {component}
    return const SizedBox.shrink();
  }}
}}
"
    )
}

fn ref_forwarding_block() -> String {
    format!(
        "\
// Forwarded refs: reach child state through a GlobalKey instead.
final childKey = GlobalKey<State<StatefulWidget>>();
// {COMPLETION_MARKER} the key's state type and attach it to the ported child
"
    )
}

fn builder_callback_block(host: &str, prop: &str) -> String {
    format!(
        "\
// <{host} {prop}={{...}}>: pass the deferred render as a builder callback.
{host}(
  builder: (context) {{
    // {COMPLETION_MARKER} the body of the `{prop}` callback
    return const SizedBox.shrink();
  }},
)
"
    )
}

fn builder_loop_block(collection: &str) -> String {
    format!(
        "\
// {collection}.map(...): render the collection with an indexed builder.
ListView.builder(
  itemCount: {collection}.length,
  itemBuilder: (context, index) {{
    final item = {collection}[index];
    // {COMPLETION_MARKER} the item widget
    return const SizedBox.shrink();
  }},
)
"
    )
}

fn fragment_advisory() -> &'static str {
    "// Fragments need no Flutter counterpart: return the siblings as a children: [...] list.\n"
}

fn conditional_advisory() -> &'static str {
    "// Conditional JSX maps to Dart conditional expressions or collection-if inside children: [...].\n"
}

// ============ Tests ============
