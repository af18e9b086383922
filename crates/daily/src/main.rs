use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = daily::cli::Cli::parse();
    daily::init(cli.verbose);

    daily::cli::run(cli)
}
