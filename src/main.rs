use clap::Parser;
use ghsearch::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ghsearch", version, about = "Search GitHub users from the terminal")]
struct Args {
    /// GitHub API base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Users requested per search (1-100)
    #[arg(long)]
    per_page: Option<u32>,

    /// Where the search state snapshot is kept
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// Neither restore nor save the search state
    #[arg(long)]
    no_persist: bool,

    /// Log file (the terminal belongs to the UI)
    #[arg(long, default_value = "ghsearch.log")]
    log_file: PathBuf,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, default_value_t = LevelFilter::Debug)]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    let file_config = config::load_config().map_err(std::io::Error::other)?;
    let cli = CliOverrides {
        api_base_url: args.api_url,
        per_page: args.per_page,
        state_file: args.state_file,
        no_persist: args.no_persist,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "ghsearch starting: api={}, per_page={}, persist={}",
        resolved.api_base_url,
        resolved.per_page,
        resolved.state_file.is_some()
    );

    ghsearch::tui::run(resolved)
}
