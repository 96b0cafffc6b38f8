use std::fmt::Write;
use std::path::PathBuf;

use lpc_syntax::{Channel, TokenStream};
use serde::Serialize;

use super::source_loader::load_or_exit;

pub struct TokensArgs {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub trivia: bool,
    pub spans: bool,
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct TokenRecord<'a> {
    pub kind: String,
    pub channel: String,
    pub line: u32,
    pub column: u32,
    pub start: u32,
    pub end: u32,
    pub text: &'a str,
}

pub fn run(args: TokensArgs) {
    let source = load_or_exit(args.source_path.as_deref(), args.source_text.as_deref());
    let (stream, diagnostics) = TokenStream::lex(source.text.as_str());

    if args.json {
        match serde_json::to_string_pretty(&token_records(&stream, args.trivia)) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print!("{}", format_tokens(&stream, args.trivia, args.spans));
    }

    if !diagnostics.is_empty() {
        eprint!("{}", diagnostics.printer(&source.text).path(&source.name).render());
    }
}

pub fn token_records(stream: &TokenStream, trivia: bool) -> Vec<TokenRecord<'_>> {
    stream
        .tokens()
        .iter()
        .filter(|t| trivia || t.channel == Channel::Default)
        .map(|t| TokenRecord {
            kind: format!("{:?}", t.kind),
            channel: t.channel.to_string(),
            line: t.line,
            column: t.column,
            start: t.start().into(),
            end: t.end().into(),
            text: stream.text(t),
        })
        .collect()
}

/// One token per line: `line:column Kind "text"`.
pub fn format_tokens(stream: &TokenStream, trivia: bool, spans: bool) -> String {
    let mut out = String::new();
    for record in token_records(stream, trivia) {
        let _ = write!(out, "{}:{} {}", record.line, record.column, record.kind);
        if trivia && record.channel != "default" {
            let _ = write!(out, " ({})", record.channel);
        }
        if spans {
            let _ = write!(out, " [{}..{}]", record.start, record.end);
        }
        let _ = writeln!(out, " {:?}", record.text);
    }
    out
}
