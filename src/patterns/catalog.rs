//! Catalog types for detected React idioms.
//!
//! The seven categories form a closed set: `Pattern` is a tagged union with
//! one case per category, and `PatternKind` mirrors it as a payload-free
//! discriminant. Adding a category means adding a variant to both, and every
//! `match` downstream is exhaustive, so the compiler finds all the places
//! that need updating.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tree_sitter::Node;

// ============ Categories ============

/// Discriminant for the seven recognized idiom categories.
///
/// Variants are declared in canonical render order, so the derived `Ord`
/// (and any `BTreeMap` keyed by kind) yields the fixed section order used by
/// synthesis and the migration guide regardless of detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    WrappedComponent,
    DeferredRenderCallback,
    MemoizationMarker,
    RefForwarding,
    IterationRendering,
    MultiRootGrouping,
    ConditionalBranch,
}

impl PatternKind {
    /// All kinds in canonical order.
    pub const ALL: [PatternKind; 7] = [
        PatternKind::WrappedComponent,
        PatternKind::DeferredRenderCallback,
        PatternKind::MemoizationMarker,
        PatternKind::RefForwarding,
        PatternKind::IterationRendering,
        PatternKind::MultiRootGrouping,
        PatternKind::ConditionalBranch,
    ];

    /// Human-readable section label for guide output.
    pub fn label(&self) -> &'static str {
        match self {
            PatternKind::WrappedComponent => "Higher-order components",
            PatternKind::DeferredRenderCallback => "Render props",
            PatternKind::MemoizationMarker => "Memoized components",
            PatternKind::RefForwarding => "Ref forwarding",
            PatternKind::IterationRendering => "List rendering",
            PatternKind::MultiRootGrouping => "Fragments",
            PatternKind::ConditionalBranch => "Conditional rendering",
        }
    }
}

// ============ Patterns ============

/// A single detected idiom with its recovered fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Pattern {
    /// `withAuth(Component)` style behavior-wrapping call.
    WrappedComponent {
        wrapper_name: String,
        component_name: String,
        generated_name: String,
    },
    /// `memo(Component)` / `React.memo(...)` recomputation-skip marker.
    MemoizationMarker { component_name: String },
    /// `forwardRef(...)` call; carries no payload, synthesis emits one
    /// shared snippet however many times it occurs.
    RefForwarding,
    /// Element passing a function as a prop or as children.
    DeferredRenderCallback {
        host_name: String,
        callback_prop_name: String,
    },
    /// Fragment with multiple sibling roots and no wrapper element.
    MultiRootGrouping { child_count: usize },
    /// Ternary embedded in a JSX expression slot.
    ConditionalBranch { has_alternate: bool },
    /// `<expr>.map(...)` collection rendering.
    IterationRendering { collection_name: String },
}

impl Pattern {
    pub fn kind(&self) -> PatternKind {
        match self {
            Pattern::WrappedComponent { .. } => PatternKind::WrappedComponent,
            Pattern::MemoizationMarker { .. } => PatternKind::MemoizationMarker,
            Pattern::RefForwarding => PatternKind::RefForwarding,
            Pattern::DeferredRenderCallback { .. } => PatternKind::DeferredRenderCallback,
            Pattern::MultiRootGrouping { .. } => PatternKind::MultiRootGrouping,
            Pattern::ConditionalBranch { .. } => PatternKind::ConditionalBranch,
            Pattern::IterationRendering { .. } => PatternKind::IterationRendering,
        }
    }
}

// ============ Source Locations ============

/// 1-based line and 0-based column of a matched node, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLoc {
    pub line: usize,
    pub column: usize,
}

impl SourceLoc {
    pub fn of(node: Node) -> Self {
        let point = node.start_position();
        SourceLoc {
            line: point.row + 1,
            column: point.column,
        }
    }
}

/// A pattern paired with where it matched.
///
/// Equality compares the pattern only; the location is an opaque diagnostic
/// reference and two occurrences of the same idiom at different positions
/// compare equal.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct PatternOccurrence {
    pub pattern: Pattern,
    pub loc: SourceLoc,
}

impl PartialEq for PatternOccurrence {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

// ============ Catalog ============

/// Ordered collection of occurrences grouped by category.
///
/// Per-category order is pre-order traversal order of the matched nodes.
/// Categories with zero occurrences have no entry. Created fresh by each
/// `detect` call; nothing is shared or retained between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatternCatalog {
    occurrences: BTreeMap<PatternKind, Vec<PatternOccurrence>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    diagnostics: Vec<String>,
}

impl PatternCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an occurrence in detection order.
    pub fn record(&mut self, pattern: Pattern, loc: SourceLoc) {
        self.occurrences
            .entry(pattern.kind())
            .or_default()
            .push(PatternOccurrence { pattern, loc });
    }

    /// Attach a diagnostic-level note (e.g. a renderer failure).
    pub fn note(&mut self, message: impl Into<String>) {
        self.diagnostics.push(message.into());
    }

    /// Occurrences of one kind, in detection order. Empty slice if none.
    pub fn occurrences(&self, kind: PatternKind) -> &[PatternOccurrence] {
        self.occurrences.get(&kind).map_or(&[], Vec::as_slice)
    }

    pub fn count(&self, kind: PatternKind) -> usize {
        self.occurrences(kind).len()
    }

    /// Kinds with at least one occurrence, in canonical order.
    pub fn kinds(&self) -> impl Iterator<Item = PatternKind> + '_ {
        self.occurrences.keys().copied()
    }

    /// Total occurrence count across all kinds.
    pub fn len(&self) -> usize {
        self.occurrences.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }
}

// ============ Skeleton Set ============

/// Generated Dart skeleton blocks grouped by category.
///
/// A category with zero occurrences has no entry, never an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CodeSkeletonSet {
    blocks: BTreeMap<PatternKind, Vec<String>>,
}

impl CodeSkeletonSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: PatternKind, block: String) {
        self.blocks.entry(kind).or_default().push(block);
    }

    pub fn get(&self, kind: PatternKind) -> Option<&[String]> {
        self.blocks.get(&kind).map(Vec::as_slice)
    }

    /// (kind, blocks) pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (PatternKind, &[String])> {
        self.blocks.iter().map(|(kind, blocks)| (*kind, blocks.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

// ============ Tests ============
