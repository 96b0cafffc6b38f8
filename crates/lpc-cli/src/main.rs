mod cli;
mod commands;

use tracing_subscriber::EnvFilter;

use cli::{CheckParams, OutlineParams, TokensParams, TreeParams, build_cli};

fn main() {
    // Logs go to stderr so command output stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("LPC_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("tokens", m)) => {
            let params = TokensParams::from_matches(m);
            commands::tokens::run(params.into());
        }
        Some(("tree", m)) => {
            let params = TreeParams::from_matches(m);
            commands::tree::run(params.into());
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("outline", m)) => {
            let params = OutlineParams::from_matches(m);
            commands::outline::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
