use std::path::PathBuf;

use lpc_syntax::ParsedDocument;

use super::source_loader::{load_or_exit, parse_options};

pub struct CheckArgs {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub fuel: Option<u32>,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let source = load_or_exit(args.source_path.as_deref(), args.source_text.as_deref());
    let doc = ParsedDocument::parse(0, &source.text, parse_options(args.fuel));
    let diagnostics = doc.diagnostics();

    if !diagnostics.is_empty() {
        eprint!(
            "{}",
            diagnostics
                .filtered_printer(&source.text)
                .path(&source.name)
                .colored(args.color)
                .render()
        );
    }

    if !passes(&doc, args.strict) {
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}

/// Errors always fail; warnings fail only in strict mode.
pub fn passes(doc: &ParsedDocument, strict: bool) -> bool {
    let diagnostics = doc.diagnostics();
    !diagnostics.has_errors() && !(strict && diagnostics.has_warnings())
}
