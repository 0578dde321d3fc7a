//! Explain command - explain diagnostic codes

use anyhow::{anyhow, Result};
use clap::Args;
use tslx_diagnostics::DiagnosticCode;

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct ExplainArgs {
    /// Diagnostic code to explain (e.g., X001, S002)
    pub code: String,
}

struct Explanation {
    title: &'static str,
    description: &'static str,
    example: Option<&'static str>,
    suggestion: Option<&'static str>,
}

fn explanation(code: DiagnosticCode) -> Explanation {
    match code {
        DiagnosticCode::ParseError => Explanation {
            title: "Parse Error",
            description: "The TypeScript parser encountered invalid syntax. The file produces no Lua.",
            example: Some("let x: number = ;  // Missing value"),
            suggestion: Some("Check for syntax errors like missing brackets or values."),
        },
        DiagnosticCode::UnsupportedExpression => Explanation {
            title: "Unsupported Expression",
            description: "This expression has no Lua lowering. It is replaced by nil.",
            example: Some("const big = 10n;"),
            suggestion: None,
        },
        DiagnosticCode::UnsupportedStatement => Explanation {
            title: "Unsupported Statement",
            description: "This statement or declaration has no Lua lowering and is left out of the output.",
            example: Some("class Point {}"),
            suggestion: None,
        },
        DiagnosticCode::UnsupportedPattern => Explanation {
            title: "Unsupported Pattern",
            description: "Only plain names and flat array or object patterns can be bound.",
            example: Some("const { a: { b } } = value;"),
            suggestion: Some("Destructure one level at a time."),
        },
        DiagnosticCode::SpreadNotSupported => Explanation {
            title: "Spread in newLuaSet",
            description: "newLuaSet builds its table at compile time, so its arguments must be listed. \
                          Spreading a single array literal is the only spread allowed.",
            example: Some("newLuaSet(...values)"),
            suggestion: Some("newLuaSet(a, b, c)  or  newLuaSet(...[a, b, c])"),
        },
        DiagnosticCode::PatternNotStringLiteral => Explanation {
            title: "Pattern Must Be a String Literal",
            description: "getProjectFilesMatchingRegex lists files at compile time, so its pattern \
                          must be written as a string literal. The call is left as written.",
            example: Some("getProjectFilesMatchingRegex(pattern)"),
            suggestion: Some("getProjectFilesMatchingRegex(\"\\\\.test\\\\.ts$\")"),
        },
        DiagnosticCode::InvalidPattern => Explanation {
            title: "Invalid Regular Expression",
            description: "The pattern passed to getProjectFilesMatchingRegex does not compile. \
                          The call is left as written.",
            example: Some("getProjectFilesMatchingRegex(\"(\")"),
            suggestion: None,
        },
        DiagnosticCode::UnenumerableType => Explanation {
            title: "Type Properties Unknown",
            description: "keys and keySet list the properties of their type argument at compile time. \
                          This type argument names something whose properties cannot be determined, \
                          so the emitted table may be incomplete.",
            example: Some("keys<string>()"),
            suggestion: Some("keys<MyInterface>()  or  keys<typeof config>()"),
        },
        DiagnosticCode::UseNil => Explanation {
            title: "Use nil",
            description: "Reported with warnUseNil for every `undefined`. The `nil` constant is shorter and lowers to the same Lua.",
            example: Some("const x = undefined;"),
            suggestion: Some("const x = nil;"),
        },
        DiagnosticCode::UseEqualsEquals => Explanation {
            title: "Use ==",
            description: "Reported with warnUseDoubleEquals. Lua has a single equality operator, so `===` and `==` lower the same way.",
            example: Some("if (a === b) {}"),
            suggestion: Some("if (a == b) {}"),
        },
        DiagnosticCode::UseNotEquals => Explanation {
            title: "Use !=",
            description: "Reported with warnUseDoubleEquals. `!==` and `!=` both lower to `~=`.",
            example: Some("if (a !== b) {}"),
            suggestion: Some("if (a != b) {}"),
        },
    }
}

pub fn run(args: ExplainArgs, format: OutputFormat, use_color: bool) -> Result<()> {
    let code = DiagnosticCode::from_code(&args.code).ok_or_else(|| anyhow!("Unknown diagnostic code: {}", args.code))?;
    let explanation = explanation(code);
    let code_str = code.as_str();

    match format {
        OutputFormat::Text => {
            if use_color {
                println!(
                    "\n{}: {}\n{}",
                    console::style(code_str).bold().cyan(),
                    console::style(explanation.title).bold(),
                    "=".repeat(code_str.len() + explanation.title.len() + 2)
                );
            } else {
                println!(
                    "\n{}: {}\n{}",
                    code_str,
                    explanation.title,
                    "=".repeat(code_str.len() + explanation.title.len() + 2)
                );
            }

            println!("\n{}\n", explanation.description);

            for (label, text) in [("Example", explanation.example), ("Suggestion", explanation.suggestion)] {
                let Some(text) = text else { continue };
                if use_color {
                    println!("{}:", console::style(label).bold());
                } else {
                    println!("{}:", label);
                }
                for line in text.lines() {
                    println!("  {}", line);
                }
                println!();
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "code": code_str,
                "severity": code.default_severity().as_str(),
                "title": explanation.title,
                "description": explanation.description,
                "example": explanation.example,
                "suggestion": explanation.suggestion,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
