use clap::Parser;
use lasersketch::cli::{run, Cli};
use lasersketch::init_logging;

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    print!("{}", run(&cli)?);

    Ok(())
}
