mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "sitepass",
    version,
    author,
    about = "Deterministic per-site password generator using HMAC-SHA256"
)]
struct Cli {
    /// Site identifier, e.g. example.com (prompted when omitted)
    #[arg(short, long)]
    site: Option<String>,

    /// Password version for the site; bump it to rotate the password
    #[arg(
        short = 'n',
        long = "site-version",
        default_value_t = 0,
        value_parser = clap::value_parser!(u64).range(0..=99)
    )]
    site_version: u64,

    /// Password length
    #[arg(
        short,
        long,
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(4..=64)
    )]
    length: u64,

    /// Print only the password
    #[arg(short, long)]
    quiet: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let display_options = ui::DisplayOptions {
        unicode_support: ui::detect_unicode_support(),
        color_support: ui::detect_color_support(),
        quiet: cli.quiet,
    };

    let site_key = ui::prompt_site_key(cli.site.as_deref()).context("Invalid input")?;
    let (master_secret, master_byte_length, master_char_count) =
        ui::prompt_master_secret().context("Invalid input")?;

    let length = usize::try_from(cli.length).context("Password length out of range")?;

    let password = sitepass::generate_password(&master_secret, &site_key, cli.site_version, length)
        .context("Password generation failed")?;

    tracing::info!(length, version = cli.site_version, "password generated");

    let input_info = ui::InputInfo {
        master_byte_length,
        master_char_count,
        site_key,
        version: cli.site_version,
    };

    let output_config = ui::OutputConfig {
        password_length: length,
        charset_size: sitepass::charset::POOL.len(),
    };

    ui::display_output(&password, &input_info, &output_config, &display_options);

    Ok(())
}
