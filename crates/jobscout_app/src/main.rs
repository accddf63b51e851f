mod app;
mod cli;
mod effects;
mod render;
mod settings;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    app::run(cli::Cli::parse())
}
