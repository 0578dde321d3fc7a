//! Diagnostic emitters for different output formats.

use crate::diagnostic::{Diagnostic, Diagnostics, Severity};
use crate::source_cache::SourceCache;
use std::io::Write;

/// Trait for emitting diagnostics in various formats.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic, cache: &SourceCache) -> std::io::Result<()>;

    /// Emit multiple diagnostics.
    fn emit_all(&mut self, diagnostics: &Diagnostics, cache: &SourceCache) -> std::io::Result<()> {
        for diag in diagnostics.iter() {
            self.emit(diag, cache)?;
        }
        Ok(())
    }

    /// Emit a summary line.
    fn emit_summary(&mut self, diagnostics: &Diagnostics) -> std::io::Result<()>;
}

/// Rich terminal output with colors and code snippets.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colored: bool,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn new(writer: W, colored: bool) -> Self {
        Self { writer, colored }
    }

    fn paint(&self, code: &'static str) -> &'static str {
        if self.colored {
            code
        } else {
            ""
        }
    }

    fn severity_color(&self, severity: Severity) -> &'static str {
        match severity {
            Severity::Error => self.paint("\x1b[31m"),
            Severity::Warning => self.paint("\x1b[33m"),
        }
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic, cache: &SourceCache) -> std::io::Result<()> {
        let color = self.severity_color(diagnostic.severity);
        let reset = self.paint("\x1b[0m");
        let bold = self.paint("\x1b[1m");
        let cyan = self.paint("\x1b[36m");

        // warning[S001]: message
        writeln!(
            self.writer,
            "{}{}{}[{}]{}: {}",
            bold,
            color,
            diagnostic.severity.as_str(),
            diagnostic.code.as_str(),
            reset,
            diagnostic.message
        )?;

        if let Some(loc) = cache.location(diagnostic.span) {
            writeln!(self.writer, "  {}-->{} {}", cyan, reset, loc)?;

            if let Some(file) = cache.get_file(diagnostic.span.file_id) {
                let (line_num, start_col) = file.line_column(diagnostic.span.start);
                if let Some(line_text) = file.line_text(line_num) {
                    let line_str = line_num.to_string();
                    let padding = " ".repeat(line_str.len());

                    writeln!(self.writer, "{} {}|{}", padding, cyan, reset)?;
                    writeln!(self.writer, "{}{} |{} {}", cyan, line_str, reset, line_text)?;

                    let offset = (start_col - 1) as usize;
                    let max_underline = line_text.len().saturating_sub(offset);
                    let underline_len = (diagnostic.span.len() as usize).min(max_underline).max(1);

                    writeln!(
                        self.writer,
                        "{} {}|{} {}{}{}{}",
                        padding,
                        cyan,
                        reset,
                        " ".repeat(offset),
                        color,
                        "^".repeat(underline_len),
                        reset
                    )?;
                }
            }
        }

        if let Some(ref explanation) = diagnostic.explanation {
            writeln!(self.writer, "  {}= help:{} {}", cyan, reset, explanation)?;
        }

        for suggestion in &diagnostic.suggestions {
            writeln!(
                self.writer,
                "  {}= suggestion:{} {}: `{}`",
                cyan, reset, suggestion.message, suggestion.replacement
            )?;
        }

        writeln!(self.writer)?;
        Ok(())
    }

    fn emit_summary(&mut self, diagnostics: &Diagnostics) -> std::io::Result<()> {
        let errors = diagnostics.error_count();
        let warnings = diagnostics.warning_count();
        if errors == 0 && warnings == 0 {
            return Ok(());
        }

        let color = if errors > 0 {
            self.severity_color(Severity::Error)
        } else {
            self.severity_color(Severity::Warning)
        };
        let reset = self.paint("\x1b[0m");

        let mut parts = Vec::new();
        if errors > 0 {
            parts.push(format!("{} error{}", errors, if errors == 1 { "" } else { "s" }));
        }
        if warnings > 0 {
            parts.push(format!("{} warning{}", warnings, if warnings == 1 { "" } else { "s" }));
        }
        writeln!(self.writer, "{}{} emitted{}", color, parts.join(" and "), reset)
    }
}

/// JSON lines output for editor and CI integration.
pub struct JsonEmitter<W: Write> {
    writer: W,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic, cache: &SourceCache) -> std::io::Result<()> {
        let loc = cache.location(diagnostic.span);

        let json = serde_json::json!({
            "code": diagnostic.code.as_str(),
            "severity": diagnostic.severity.as_str(),
            "message": diagnostic.message,
            "location": loc.map(|l| serde_json::json!({
                "file": l.file,
                "line": l.line,
                "column": l.column,
            })),
            "span": if diagnostic.span.is_dummy() {
                serde_json::Value::Null
            } else {
                serde_json::json!({
                    "start": diagnostic.span.start,
                    "end": diagnostic.span.end,
                })
            },
            "help": diagnostic.explanation,
            "suggestions": diagnostic.suggestions.iter().map(|s| {
                serde_json::json!({
                    "message": s.message,
                    "replacement": s.replacement,
                })
            }).collect::<Vec<_>>(),
        });

        serde_json::to_writer(&mut self.writer, &json)?;
        writeln!(self.writer)
    }

    fn emit_summary(&mut self, diagnostics: &Diagnostics) -> std::io::Result<()> {
        let summary = serde_json::json!({
            "type": "summary",
            "errors": diagnostics.error_count(),
            "warnings": diagnostics.warning_count(),
            "total": diagnostics.len(),
        });
        serde_json::to_writer(&mut self.writer, &summary)?;
        writeln!(self.writer)
    }
}

/// One line per diagnostic, `file:line:col: severity: message [code]`.
pub struct SimpleEmitter<W: Write> {
    writer: W,
}

impl<W: Write> SimpleEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> DiagnosticEmitter for SimpleEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic, cache: &SourceCache) -> std::io::Result<()> {
        match cache.location(diagnostic.span) {
            Some(loc) => writeln!(
                self.writer,
                "{}: {}: {} [{}]",
                loc,
                diagnostic.severity.as_str(),
                diagnostic.message,
                diagnostic.code.as_str()
            ),
            None => writeln!(
                self.writer,
                "{}: {} [{}]",
                diagnostic.severity.as_str(),
                diagnostic.message,
                diagnostic.code.as_str()
            ),
        }
    }

    fn emit_summary(&mut self, diagnostics: &Diagnostics) -> std::io::Result<()> {
        writeln!(
            self.writer,
            "{} error(s), {} warning(s)",
            diagnostics.error_count(),
            diagnostics.warning_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiagnosticCode, Span};

    fn sample() -> (SourceCache, Diagnostics) {
        let mut cache = SourceCache::new();
        let id = cache.add_file("src/main.ts", "if (a === b) {}\n".to_string());
        let mut diags = Diagnostics::new();
        diags.push(
            Diagnostic::new(DiagnosticCode::UseEqualsEquals, "Use == instead of ===.")
                .with_span(Span::new(id, 4, 11))
                .build(),
        );
        (cache, diags)
    }

    #[test]
    fn test_terminal_underlines_span() {
        let (cache, diags) = sample();
        let mut out = Vec::new();
        let mut emitter = TerminalEmitter::new(&mut out, false);
        emitter.emit_all(&diags, &cache).unwrap();
        emitter.emit_summary(&diags).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("warning[S002]: Use == instead of ==="));
        assert!(text.contains("--> src/main.ts:1:5"));
        assert!(text.contains("    ^^^^^^^"));
        assert!(text.ends_with("1 warning emitted\n"));
    }

    #[test]
    fn test_json_line() {
        let (cache, diags) = sample();
        let mut out = Vec::new();
        JsonEmitter::new(&mut out).emit_all(&diags, &cache).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["code"], "S002");
        assert_eq!(value["location"]["column"], 5);
    }
}
