use clap::Parser;

use gvs::cli::{App, Cli, normalize_args};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    let _guard = gvs::logging::init();

    let app = App::load()?;

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(gvs::cli::run(&app, cli.command))
}
