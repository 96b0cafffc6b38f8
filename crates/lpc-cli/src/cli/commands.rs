//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Every command reads one document.
fn with_source_args(cmd: Command) -> Command {
    cmd.arg(source_path_arg()).arg(source_text_arg())
}

pub fn build_cli() -> Command {
    Command::new("lpc")
        .about("Lossless LPC lexer and parser")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(tokens_command())
        .subcommand(tree_command())
        .subcommand(check_command())
        .subcommand(outline_command())
}

pub fn tokens_command() -> Command {
    let cmd = Command::new("tokens")
        .about("Print the token stream")
        .after_help(
            r#"EXAMPLES:
  lpc tokens room.c
  lpc tokens room.c --trivia
  lpc tokens -s 'int x = 1;' --json"#,
        )
        .arg(trivia_arg())
        .arg(spans_arg())
        .arg(json_arg());

    with_source_args(cmd)
}

pub fn tree_command() -> Command {
    let cmd = Command::new("tree")
        .about("Print the syntax tree")
        .after_help(
            r#"EXAMPLES:
  lpc tree room.c
  lpc tree room.c --trivia --spans
  cat room.c | lpc tree -"#,
        )
        .arg(trivia_arg())
        .arg(spans_arg())
        .arg(fuel_arg())
        .arg(color_arg());

    with_source_args(cmd)
}

pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Report diagnostics, exit with status 1 on errors")
        .after_help(
            r#"EXAMPLES:
  lpc check room.c
  lpc check room.c --strict --color never"#,
        )
        .arg(fuel_arg())
        .arg(strict_arg())
        .arg(color_arg());

    with_source_args(cmd)
}

pub fn outline_command() -> Command {
    let cmd = Command::new("outline")
        .about("List declarations")
        .after_help(
            r#"EXAMPLES:
  lpc outline room.c
  lpc outline room.c --json"#,
        )
        .arg(fuel_arg())
        .arg(json_arg());

    with_source_args(cmd)
}
