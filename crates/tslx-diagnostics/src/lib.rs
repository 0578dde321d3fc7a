//! Diagnostic infrastructure for tslx.
//!
//! This crate provides structured reporting for everything the transpiler
//! and the extension rewrites have to say about a program:
//! - Source location tracking (file, line, column)
//! - Diagnostic codes with default severities
//! - Terminal, JSON and plain text output
//! - Replacement suggestions
//!
//! # Example
//!
//! ```
//! use tslx_diagnostics::{
//!     Diagnostic, DiagnosticCode, DiagnosticEmitter, SimpleEmitter, SourceCache, Span,
//! };
//!
//! let mut cache = SourceCache::new();
//! let file_id = cache.add_file("main.ts", "const x = undefined;".to_string());
//!
//! let diag = Diagnostic::new(DiagnosticCode::UseNil, "Use nil instead of undefined.")
//!     .with_span(Span::new(file_id, 10, 19))
//!     .suggest_replace(Span::new(file_id, 10, 19), "nil", "replace with `nil`")
//!     .build();
//!
//! let mut out = Vec::new();
//! SimpleEmitter::new(&mut out).emit(&diag, &cache).unwrap();
//! assert!(String::from_utf8(out).unwrap().starts_with("main.ts:1:11: warning"));
//! ```

pub mod diagnostic;
pub mod emitter;
pub mod source_cache;
pub mod span;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Diagnostics, Severity, Suggestion};
pub use emitter::{DiagnosticEmitter, JsonEmitter, SimpleEmitter, TerminalEmitter};
pub use source_cache::{SourceCache, SourceFile};
pub use span::{FileId, Location, Span};
