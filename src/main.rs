use anyhow::{self, Context};
use clap::Parser;
use splitvod::cli::Cli;
use splitvod::presenter::{encode_commands, render_table, Plan};
use splitvod::{prepare, Logger};

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    Logger::init(cli.log_level())
        .map_err(|e| anyhow::anyhow!("Could not set up logging: {e}"))?;

    let colored = !cli.no_color && console::colors_enabled();
    let (first, second) = cli.clips().context("Invalid clip arguments")?;
    let prepared = prepare(first, second, cli.opt(), &mut rand::thread_rng())
        .context("Could not align clips")?;
    let commands = encode_commands(&prepared);

    if cli.json {
        let plan = Plan::new(&prepared, &commands);
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!("{}", render_table(&prepared, colored));
    println!();
    for command in &commands {
        println!("{command}");
    }
    Ok(())
}
