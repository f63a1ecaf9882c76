//! react-port-lite: React idiom detection and Flutter skeleton synthesis.
//!
//! The crate takes JSX/TSX source (parsed with tree-sitter), catalogs the
//! structural idioms a Flutter port has to reinterpret (higher-order
//! components, render props, memo markers, forwardRef, `.map` list
//! rendering, fragments, and JSX conditionals) and emits deterministic
//! Dart skeleton snippets plus a per-idiom migration guide. File discovery,
//! full-file generation, and report writing are left to the caller.

pub mod patterns;

pub use patterns::{
    analyze, analyze_default, describe, detect, synthesize, AnalysisResult, CodeSkeletonSet,
    DetectorConfig, Pattern, PatternCatalog, PatternKind, PatternOccurrence, SourceLang,
    SourceLoc, SourceRenderer, SpanRenderer,
};

#[cfg(test)]
mod patterns_tests;
