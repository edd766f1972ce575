use clap::Parser;
use log::LevelFilter;
use std::io::Write;
use std::path::Path;
use testcommitinfo::settings::{self, Settings, SETTINGS_FILENAME};
use testcommitinfo::{report, Args};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings_file = Path::new(SETTINGS_FILENAME);
    let settings = Settings::load(settings_file)?;
    if args.show_config {
        return settings::show_config(&settings, settings_file);
    }

    let report = testcommitinfo::collect_report(&settings).await?;
    print!("{}", report::render(&report, &settings));
    if let Some(path) = &args.json_output {
        report::export_json(&report, path)?;
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .init();
}
