use anyhow::Result;
use chrono::{Datelike, Local};
use clap::Parser;
use dotenvy::dotenv;
use timefill::{
    client::TimeEntryClient, commands::Arguments, config::ConfigStore, prompt,
    rng::ThreadRngSource, run,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Arguments::parse();

    stderrlog::new()
        .quiet(args.quiet)
        .verbosity(args.verbose as usize + 2)
        .init()?;

    let today = Local::now().date_naive();
    let month = args.month.unwrap_or_else(|| today.month());
    let year = args.year.unwrap_or_else(|| today.year());

    let store = ConfigStore::new(args.config.clone());
    let partial = args.merge_over(store.load());

    let stdin = std::io::stdin();
    let collected =
        prompt::complete_configuration(&mut stdin.lock(), &mut std::io::stderr(), partial)?;
    if collected.prompted || args.save {
        if let Err(err) = store.save(&collected.config) {
            log::warn!("Could not save configuration defaults: {err:#}");
        }
    }
    let config = collected.config;

    if args.simulate {
        log::info!("Simulation mode: no entries will be created");
    }
    log::info!(
        "{} entries for {year}-{month:02} with description {:?}",
        if args.simulate { "Simulating" } else { "Creating" },
        config.description
    );

    let client = TimeEntryClient::new(&config)?;
    let mut source = ThreadRngSource;
    // Partial failures are reported by the run itself and do not change the
    // exit status; only configuration problems abort with an error.
    run::run_month(&config, &client, &mut source, year, month, args.simulate).await?;
    Ok(())
}
