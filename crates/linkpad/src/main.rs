use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = linkpad::cli::Cli::parse();
    linkpad::cli::run(cli)
}
