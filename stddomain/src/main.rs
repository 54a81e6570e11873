use std::{
    env,
    io::{self, BufRead, Write},
};

use config::{DEFAULT_CONFIG_PATH, load_config};
use report::Report;
use stddomain::DomainParser;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking;
use tracing_subscriber::{Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod report;

fn main() -> anyhow::Result<()> {
    let (nb, _guard) = non_blocking(io::stderr());

    let config_path = env::var("STDDOMAIN_CONFIG").unwrap_or(DEFAULT_CONFIG_PATH.to_string());

    let config = load_config(&config_path)?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(nb)
                .with_target(false)
                .with_filter(LevelFilter::from(config.log.level)),
        )
        .init();

    let suffixes = config.suffix.load()?;
    let parser = DomainParser::new(&suffixes);

    let mut inputs: Vec<String> = env::args().skip(1).collect();
    if inputs.is_empty() {
        inputs = io::stdin().lock().lines().collect::<Result<_, _>>()?;
    }

    let mut out = io::stdout().lock();
    let mut failed = 0usize;

    for input in inputs.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        match parser.parse(input) {
            Ok(domain) => {
                serde_json::to_writer(&mut out, &Report::new(input, &domain))?;
                writeln!(out)?;
            }
            Err(e) => {
                tracing::error!("Failed to parse {}: {}", input, e);
                failed += 1;
            }
        }
    }

    out.flush()?;

    if failed > 0 {
        anyhow::bail!("{} domain(s) could not be parsed", failed);
    }

    Ok(())
}
