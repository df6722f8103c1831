use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use coord_app::platform::logging::{self, LogDestination};
use coord_app::platform::ui::render::render;
use coord_app::platform::{App, AppConfig, History, MemoryHistory};
use coord_logging::coord_warn;
use log::LevelFilter;
use url::Url;

#[derive(Debug, Parser)]
#[command(
    name = "coord-lookup",
    version,
    about = "Resolve free-form locations to coordinates and map links"
)]
struct Cli {
    /// RON config file; defaults apply when it is missing.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Page URL the lookup starts from. A `location` parameter is looked up
    /// immediately.
    #[arg(long, value_name = "URL", default_value = "http://localhost/")]
    url: String,

    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    log: LogDestination,

    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log, cli.log_level);

    let config = AppConfig::load_or_default(cli.config.as_deref());
    let page = Url::parse(&cli.url).with_context(|| format!("invalid page URL {:?}", cli.url))?;
    let settle_wait = Duration::from_millis(
        config.url_debounce_ms + config.conversion_debounce_ms + config.request_timeout_ms + 1_000,
    );

    let mut app = App::mount(&config, MemoryHistory::new(page)).context("failed to start")?;
    settle_and_print(&mut app, settle_wait)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        match line.as_str() {
            ":quit" => break,
            open if open.starts_with(":open ") => {
                let target = open[":open ".len()..].trim();
                let joined = app.url().join(target);
                match joined {
                    Ok(url) => app.open(url),
                    Err(err) => println!("(cannot open {target:?}: {err})"),
                }
            }
            ":back" => {
                if !app.history_mut().back() {
                    println!("(no earlier entry)");
                }
            }
            ":forward" => {
                if !app.history_mut().forward() {
                    println!("(no later entry)");
                }
            }
            text => app.type_input(text),
        }
        settle_and_print(&mut app, settle_wait)?;
    }

    app.unmount();
    Ok(())
}

/// Prints the page only when something on it changed.
fn settle_and_print(app: &mut App<MemoryHistory>, wait: Duration) -> anyhow::Result<()> {
    if !app.pump_until_settled(wait) {
        coord_warn!("Page did not settle within {:?}", wait);
    }
    if !app.consume_dirty() {
        return Ok(());
    }
    let mut out = io::stdout().lock();
    for line in render(&app.view()) {
        writeln!(out, "{line}")?;
    }
    writeln!(out, "URL: {}", app.history().current())?;
    writeln!(out)?;
    Ok(())
}
