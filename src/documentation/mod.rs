//! Documentation comments for generated code
//!
//! - `source`: Where raw documentation text comes from
//! - `resolver`: Tag lookup with per-quantity caching and generic fallback
//! - `expander`: Fixed-point expansion of `#Document:...#` tags into comment lines

pub mod expander;
pub mod resolver;
pub mod source;

pub use expander::{Diagnostic, DiagnosticKind, DocumentationExpander, ExpansionOutcome};
pub use resolver::{CachedSource, DocumentationResolver, ResolvedTag};
pub use source::{DirectorySource, DocumentationSource, MemorySource};
