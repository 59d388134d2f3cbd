//! csvt CLI - convert and reshape tables
//!
//! ```bash
//! csvt in.csv out.json                    # convert by extension
//! csvt -m transpose in.csv                # transpose to stdout
//! csvt -m map in.csv                      # rows to objects (JSON)
//! csvt -m unmap items.json out.csv        # objects back to rows
//! csvt -m slice -r 1: -c 0,-1 in.csv      # drop header, keep first/last column
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use csvt::config::Config;
use csvt::files::{open_input, with_output};
use csvt::logging::{init_logging, LogConfig};
use csvt::{AppResult, Format, Mode};
use tracing::debug;

#[derive(Parser)]
#[command(name = "csvt", version)]
#[command(about = "Convert, transpose, map, unmap and slice CSV/JSON tables", long_about = None)]
struct Cli {
    /// Input file (default: stdin)
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    output: Option<PathBuf>,

    /// Transform mode [convert|transpose|map|unmap|slice]
    #[arg(short, long, env = "CSVT_MODE")]
    mode: Option<Mode>,

    /// Input type [csv|tsv|json|ndjson|yaml|toml] (default: by extension)
    #[arg(short = 'f', long = "from-type", env = "CSVT_FROM_TYPE")]
    from_type: Option<Format>,

    /// Output type [csv|tsv|json|ndjson|yaml|toml] (default: by extension)
    #[arg(short = 't', long = "to-type", env = "CSVT_TO_TYPE")]
    to_type: Option<Format>,

    /// Input delimiter for csv (default: ",")
    #[arg(short = 'd', long, env = "CSVT_FROM_DELIMITER")]
    from_delimiter: Option<String>,

    /// Output delimiter for csv (default: ",")
    #[arg(short = 'D', long, env = "CSVT_TO_DELIMITER")]
    to_delimiter: Option<String>,

    /// Rows to keep in slice mode, e.g. "1:", "0,2:5", "-3:"
    #[arg(short, long, env = "CSVT_ROWS", allow_hyphen_values = true)]
    rows: Option<String>,

    /// Columns to keep in slice mode
    #[arg(short, long, env = "CSVT_COLS", allow_hyphen_values = true)]
    cols: Option<String>,

    /// Fail on ragged rows (transpose, map)
    #[arg(long, env = "CSVT_LENGTH_CHECKED")]
    length_checked: bool,

    /// Fail on unexpected or missing keys (unmap)
    #[arg(long, env = "CSVT_KEY_CHECKED")]
    key_checked: bool,

    /// Enable both --length-checked and --key-checked
    #[arg(short = 'e', long, env = "CSVT_STRICT")]
    strict: bool,

    /// JSON file with default settings
    #[arg(long, env = "CSVT_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose logging to stderr (repeat for more; RUST_LOG also applies)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Do not colorize log output
    #[arg(long, env = "CSVT_NO_COLOR")]
    no_color: bool,
}

impl Cli {
    fn flag_config(&self) -> Config {
        Config {
            mode: self.mode,
            from_type: self.from_type,
            to_type: self.to_type,
            from_delimiter: self.from_delimiter.clone(),
            to_delimiter: self.to_delimiter.clone(),
            rows: self.rows.clone(),
            cols: self.cols.clone(),
            length_checked: (self.length_checked || self.strict).then_some(true),
            key_checked: (self.key_checked || self.strict).then_some(true),
        }
    }
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let no_color = cli.no_color || std::env::var_os("NO_COLOR").is_some();
    init_logging(&LogConfig::from_verbosity(cli.verbose).with_ansi(!no_color));

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> AppResult<()> {
    let base = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let app = base
        .merge(cli.flag_config())
        .into_application(cli.input.as_deref(), cli.output.as_deref())?;
    debug!(?app, "resolved application");

    let reader = open_input(cli.input.as_deref())?;
    with_output(cli.output.as_deref(), |writer| app.run(reader, writer))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_strict_sets_both_checks() {
        let cli = Cli::try_parse_from(["csvt", "-e", "-m", "unmap", "in.yaml"]).unwrap();
        let config = cli.flag_config();
        assert_eq!(config.mode, Some(Mode::Unmap));
        assert_eq!(config.length_checked, Some(true));
        assert_eq!(config.key_checked, Some(true));
    }

    #[test]
    fn test_check_flags_from_environment() {
        std::env::set_var("CSVT_KEY_CHECKED", "true");
        let cli = Cli::try_parse_from(["csvt", "-t", "toml"]).unwrap();
        std::env::remove_var("CSVT_KEY_CHECKED");
        assert!(cli.key_checked);
        assert_eq!(cli.flag_config().key_checked, Some(true));
        assert_eq!(cli.to_type, Some(Format::Toml));
    }

    #[test]
    fn test_unset_flags_leave_config_open() {
        let cli = Cli::try_parse_from(["csvt", "-r", "-2:", "in.csv", "out.csv"]).unwrap();
        let config = cli.flag_config();
        assert_eq!(config.rows.as_deref(), Some("-2:"));
        assert_eq!(config.length_checked, None);
    }
}
