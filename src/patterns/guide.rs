//! Migration guide generation.
//!
//! `describe` assembles one markdown document from a catalog: a title line,
//! then one section per non-empty category in canonical order (the catalog's
//! key order), each with a one-line Flutter equivalence statement and every
//! occurrence with its recovered fields and source line. An all-empty
//! catalog yields the title line alone, which is a valid document.

use crate::patterns::catalog::{Pattern, PatternCatalog, PatternKind, PatternOccurrence};

pub const GUIDE_TITLE: &str = "# React -> Flutter migration guide";

/// Render the migration guide for one catalog.
pub fn describe(catalog: &PatternCatalog) -> String {
    let mut out = String::new();
    out.push_str(GUIDE_TITLE);
    out.push('\n');

    for kind in catalog.kinds() {
        out.push('\n');
        out.push_str("## ");
        out.push_str(kind.label());
        out.push('\n');
        out.push_str(equivalence_statement(kind));
        out.push('\n');
        for occ in catalog.occurrences(kind) {
            out.push_str(&occurrence_entry(occ));
            out.push('\n');
        }
    }

    out
}

/// One-line target-idiom equivalence per category.
fn equivalence_statement(kind: PatternKind) -> &'static str {
    match kind {
        PatternKind::WrappedComponent => {
            "Flutter expresses cross-cutting behavior as a mixin or a wrapping widget."
        }
        PatternKind::DeferredRenderCallback => {
            "Flutter passes builder callbacks (WidgetBuilder) where React passes render props."
        }
        PatternKind::MemoizationMarker => {
            "Flutter skips rebuilds through const constructors instead of memo()."
        }
        PatternKind::RefForwarding => {
            "Flutter reaches child state through a GlobalKey instead of a forwarded ref."
        }
        PatternKind::IterationRendering => {
            "Flutter renders collections with ListView.builder's itemCount/itemBuilder pair."
        }
        PatternKind::MultiRootGrouping => {
            "Flutter widgets take children: lists, so fragments disappear in the port."
        }
        PatternKind::ConditionalBranch => {
            "Flutter uses conditional expressions or collection-if inside children lists."
        }
    }
}

fn occurrence_entry(occ: &PatternOccurrence) -> String {
    let line = occ.loc.line;
    match &occ.pattern {
        Pattern::WrappedComponent {
            wrapper_name,
            component_name,
            generated_name,
        } => format!(
            "- line {line}: {wrapper_name}({component_name}) -> mixin {generated_name}"
        ),
        Pattern::MemoizationMarker { component_name } => {
            format!("- line {line}: {component_name} is memoized")
        }
        Pattern::RefForwarding => format!("- line {line}: forwardRef call"),
        Pattern::DeferredRenderCallback {
            host_name,
            callback_prop_name,
        } => format!(
            "- line {line}: <{host_name}> receives a function through `{callback_prop_name}`"
        ),
        Pattern::MultiRootGrouping { child_count } => {
            format!("- line {line}: fragment with {child_count} structural children")
        }
        Pattern::ConditionalBranch { has_alternate } => {
            if *has_alternate {
                format!("- line {line}: conditional render with an alternate branch")
            } else {
                format!("- line {line}: conditional render without an alternate branch")
            }
        }
        Pattern::IterationRendering { collection_name } => {
            format!("- line {line}: {collection_name}.map(...) list rendering")
        }
    }
}

// ============ Tests ============
