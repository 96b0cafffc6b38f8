//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` structs mirror the command `*Args` but keep the raw
//! [`ColorChoice`]; the `From` impls resolve it against the terminal.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::outline::OutlineArgs;
use crate::commands::tokens::TokensArgs;
use crate::commands::tree::TreeArgs;

pub struct TokensParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub trivia: bool,
    pub spans: bool,
    pub json: bool,
}

impl TokensParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            trivia: m.get_flag("trivia"),
            spans: m.get_flag("spans"),
            json: m.get_flag("json"),
        }
    }
}

impl From<TokensParams> for TokensArgs {
    fn from(p: TokensParams) -> Self {
        Self {
            source_path: p.source_path,
            source_text: p.source_text,
            trivia: p.trivia,
            spans: p.spans,
            json: p.json,
        }
    }
}

pub struct TreeParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub trivia: bool,
    pub spans: bool,
    pub fuel: Option<u32>,
    pub color: ColorChoice,
}

impl TreeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            trivia: m.get_flag("trivia"),
            spans: m.get_flag("spans"),
            fuel: m.get_one::<u32>("fuel").copied(),
            color: parse_color(m),
        }
    }
}

impl From<TreeParams> for TreeArgs {
    fn from(p: TreeParams) -> Self {
        Self {
            source_path: p.source_path,
            source_text: p.source_text,
            trivia: p.trivia,
            spans: p.spans,
            fuel: p.fuel,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub fuel: Option<u32>,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            fuel: m.get_one::<u32>("fuel").copied(),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            source_path: p.source_path,
            source_text: p.source_text,
            fuel: p.fuel,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct OutlineParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub fuel: Option<u32>,
    pub json: bool,
}

impl OutlineParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            fuel: m.get_one::<u32>("fuel").copied(),
            json: m.get_flag("json"),
        }
    }
}

impl From<OutlineParams> for OutlineArgs {
    fn from(p: OutlineParams) -> Self {
        Self {
            source_path: p.source_path,
            source_text: p.source_text,
            fuel: p.fuel,
            json: p.json,
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
