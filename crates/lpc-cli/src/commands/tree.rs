use std::path::PathBuf;

use lpc_syntax::ParsedDocument;

use super::source_loader::{load_or_exit, parse_options};

pub struct TreeArgs {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub trivia: bool,
    pub spans: bool,
    pub fuel: Option<u32>,
    pub color: bool,
}

pub fn run(args: TreeArgs) {
    let source = load_or_exit(args.source_path.as_deref(), args.source_text.as_deref());
    let doc = ParsedDocument::parse(0, &source.text, parse_options(args.fuel));

    print!(
        "{}",
        doc.printer()
            .with_trivia(args.trivia)
            .with_spans(args.spans)
            .dump()
    );

    // The tree is printed even when the source has problems.
    if !doc.diagnostics().is_empty() {
        eprint!(
            "{}",
            doc.diagnostics()
                .filtered_printer(&source.text)
                .path(&source.name)
                .colored(args.color)
                .render()
        );
    }
}
