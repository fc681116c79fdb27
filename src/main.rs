use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use userdash::ThemeMode;
use userdash::core::config::{self, CliOverrides, UserdashConfig};

#[derive(Parser)]
#[command(name = "userdash", about = "Terminal dashboard for browsing user records")]
struct Args {
    /// Endpoint serving the user list as JSON
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Color theme
    #[arg(short, long, value_enum)]
    theme: Option<ThemeMode>,

    /// Rows per page (10, 25 or 50)
    #[arg(short, long)]
    rows_per_page: Option<usize>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to userdash.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("userdash.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}, falling back to defaults", e);
        UserdashConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            endpoint: args.endpoint,
            theme: args.theme,
            rows_per_page: args.rows_per_page,
        },
    );

    log::info!(
        "userdash starting up against {} ({} theme)",
        resolved.endpoint,
        resolved.theme.label()
    );

    userdash::tui::run(resolved)
}
