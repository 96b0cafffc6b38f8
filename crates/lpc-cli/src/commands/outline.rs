use std::fmt::Write;
use std::path::PathBuf;

use lpc_syntax::{ParsedDocument, declarations};
use serde::Serialize;

use super::source_loader::{load_or_exit, parse_options};

pub struct OutlineArgs {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub fuel: Option<u32>,
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct OutlineEntry {
    pub kind: &'static str,
    pub name: String,
    pub line: u32,
    pub column: u32,
    /// Nesting depth: 0 for file-level declarations.
    pub depth: usize,
}

pub fn run(args: OutlineArgs) {
    let source = load_or_exit(args.source_path.as_deref(), args.source_text.as_deref());
    let doc = ParsedDocument::parse(0, &source.text, parse_options(args.fuel));
    let entries = outline(&doc);

    if args.json {
        match serde_json::to_string_pretty(&entries) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print!("{}", format_outline(&entries));
    }
}

pub fn outline(doc: &ParsedDocument) -> Vec<OutlineEntry> {
    let tree = doc.tree();
    declarations(doc)
        .into_iter()
        .map(|decl| {
            let token = doc.token(decl.name_token);
            // Declarations scoped to the root sit at depth 0, members and
            // parameters one level below their owner, and so on.
            let depth = if decl.scope == tree.root() {
                0
            } else {
                tree.ancestors(decl.scope)
                    .filter(|id| is_outline_owner(tree.rule(*id)))
                    .count()
                    + usize::from(is_outline_owner(tree.rule(decl.scope)))
            };
            OutlineEntry {
                kind: decl.kind.as_str(),
                name: decl.name,
                line: token.line,
                column: token.column,
                depth,
            }
        })
        .collect()
}

fn is_outline_owner(rule: lpc_syntax::RuleKind) -> bool {
    use lpc_syntax::RuleKind::*;
    matches!(rule, FunctionDef | ClassDef | AnonymousFunction)
}

/// `line:column kind name`, indented two spaces per nesting level.
pub fn format_outline(entries: &[OutlineEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{}{} {} {}:{}",
            "  ".repeat(entry.depth),
            entry.kind,
            entry.name,
            entry.line,
            entry.column
        );
    }
    out
}
