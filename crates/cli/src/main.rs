// Tripboard CLI - join a boat owner registry with a trip history and browse it

mod clipboard;
mod config;
mod exit_codes;
mod table;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use tripboard_dashboard::{BoardConfig, Dashboard, DashboardError, FilterState, MergedRecord, OwnerFilter};

use exit_codes::{
    EXIT_CLIPBOARD, EXIT_ERROR, EXIT_INPUT, EXIT_NOTHING_TO_EXPORT, EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "tboard")]
#[command(about = "Join boat owners with their trip history, then filter, page and export")]
#[command(long_version = long_version())]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Config file (defaults to ~/.config/tripboard/config.toml when present)
    #[arg(long, global = true, env = "TRIPBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Suppress stderr notes (row counts, clipboard confirmation)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one page of the merged table
    #[command(after_help = "\
Examples:
  tboard view proprietaires.csv historique.csv
  tboard view proprietaires.csv historique.csv --page 2
  tboard view proprietaires.csv historique.csv --owner 'Jean Dupont' --search 123
  tboard view proprietaires.csv historique.csv --from 2024-01-01 --to 31/01/2024 --json")]
    View {
        #[command(flatten)]
        sources: Sources,

        #[command(flatten)]
        filters: FilterArgs,

        /// Page to show (1-indexed, clamped to the last page)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Print the page as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Export the filtered trips as a text block
    #[command(after_help = "\
Exit code 5 means the filters matched nothing, so there was nothing to copy.

Examples:
  tboard export proprietaires.csv historique.csv
  tboard export proprietaires.csv historique.csv --owner 'Jean Dupont' --clipboard
  tboard export proprietaires.csv historique.csv --from 2024-01-01 -o janvier.txt")]
    Export {
        #[command(flatten)]
        sources: Sources,

        #[command(flatten)]
        filters: FilterArgs,

        /// Write to a file instead of stdout
        #[arg(long, short = 'o', conflicts_with = "clipboard")]
        output: Option<PathBuf>,

        /// Copy to the system clipboard instead of stdout
        #[arg(long)]
        clipboard: bool,
    },

    /// List the owner names usable with --owner
    Owners {
        #[command(flatten)]
        sources: Sources,

        /// Print a JSON array
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct Sources {
    /// Owner registry (CSV with header row)
    owners: PathBuf,

    /// Trip history (one `id;dd/mm/yyyy` per line)
    history: PathBuf,
}

#[derive(Args)]
struct FilterArgs {
    /// Exact owner name, or "all"
    #[arg(long, default_value = "all")]
    owner: String,

    /// Case-insensitive search in registration id or boat name
    #[arg(long, short = 's', default_value = "")]
    search: String,

    /// Earliest trip month (YYYY-MM-DD or DD/MM/YYYY)
    #[arg(long, value_parser = parse_date)]
    from: Option<NaiveDate>,

    /// Latest trip month (YYYY-MM-DD or DD/MM/YYYY)
    #[arg(long, value_parser = parse_date)]
    to: Option<NaiveDate>,
}

impl FilterArgs {
    fn into_state(self) -> FilterState {
        FilterState {
            owner: OwnerFilter::parse(&self.owner),
            text: self.search,
            start_date: self.from,
            end_date: self.to,
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .map_err(|_| format!("invalid date '{s}' (expected YYYY-MM-DD or DD/MM/YYYY)"))
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("TRIPBOARD_GIT_HASH"), ")",
        "\nengine:  tripboard-dashboard ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TRIPBOARD_TARGET"),
    )
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        None => {
            // No subcommand = show usage
            eprintln!("Usage: tboard <command> [options]");
            eprintln!("       tboard --help for more information");
            Ok(())
        }
        Some(Commands::View { sources, filters, page, json }) => {
            cmd_view(cli.config.as_deref(), cli.quiet, sources, filters, page, json)
        }
        Some(Commands::Export { sources, filters, output, clipboard }) => {
            cmd_export(cli.config.as_deref(), cli.quiet, sources, filters, output, clipboard)
        }
        Some(Commands::Owners { sources, json }) => {
            cmd_owners(cli.config.as_deref(), cli.quiet, sources, json)
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn input(msg: impl Into<String>) -> Self {
        Self { code: EXIT_INPUT, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<DashboardError> for CliError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::NothingToExport => Self {
                code: EXIT_NOTHING_TO_EXPORT,
                message: "nothing to copy: no trip matches the current filters".into(),
                hint: Some("loosen --owner, --search, --from or --to".into()),
            },
            other => Self {
                code: exit_codes::EXIT_CONFIG,
                message: other.to_string(),
                hint: None,
            },
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Read config and both sources into a ready dashboard.
fn load_dashboard(config_path: Option<&Path>, quiet: bool, sources: &Sources) -> Result<Dashboard, CliError> {
    let config: BoardConfig = config::load(config_path)?;

    let owners = tripboard_io::load_owners(&sources.owners, &config.owners)
        .map_err(|e| CliError::input(e.to_string()))?;
    let trips = tripboard_io::load_trips(&sources.history, &config.history)
        .map_err(|e| CliError::input(e.to_string()))?;

    let skipped = owners.skipped;
    let mut board = Dashboard::new(&config);
    let owner_count = board.load_owners(owners.rows);
    let trip_count = board.load_trips(trips);

    if !quiet {
        eprintln!(
            "loaded {owner_count} owner(s), {trip_count} trip(s): {} merged record(s)",
            board.merged().len()
        );
        if skipped > 0 {
            eprintln!("note: {skipped} unreadable row(s) skipped");
        }
    }

    Ok(board)
}

fn write_stdout(text: &str) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(text.as_bytes())
        .and_then(|_| handle.flush())
        .map_err(|e| CliError::io(e.to_string()))
}

// ============================================================================
// view
// ============================================================================

#[derive(Serialize)]
struct PageJson<'a> {
    page: usize,
    total_pages: usize,
    total_records: usize,
    records: &'a [MergedRecord],
}

fn cmd_view(
    config_path: Option<&Path>,
    quiet: bool,
    sources: Sources,
    filters: FilterArgs,
    page: usize,
    json: bool,
) -> Result<(), CliError> {
    if page == 0 {
        return Err(CliError::args("--page starts at 1").with_hint("use --page 1 for the first page"));
    }

    let mut board = load_dashboard(config_path, quiet, &sources)?;
    board.set_filter(filters.into_state());
    board.set_page(page);

    let filtered = board.filtered();
    let view = board.page_of(&filtered);

    if json {
        let body = PageJson {
            page: view.page,
            total_pages: view.total_pages,
            total_records: view.total_records,
            records: view.records,
        };
        let text = serde_json::to_string_pretty(&body)
            .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;
        return write_stdout(&format!("{text}\n"));
    }

    let mut out = table::render(view.records);
    out.push_str(&format!(
        "\npage {}/{} ({} record(s))\n",
        view.page, view.total_pages, view.total_records
    ));
    write_stdout(&out)
}

// ============================================================================
// export
// ============================================================================

fn cmd_export(
    config_path: Option<&Path>,
    quiet: bool,
    sources: Sources,
    filters: FilterArgs,
    output: Option<PathBuf>,
    to_clipboard: bool,
) -> Result<(), CliError> {
    let mut board = load_dashboard(config_path, quiet, &sources)?;
    board.set_filter(filters.into_state());

    let text = board.export()?;

    if to_clipboard {
        let tool = clipboard::copy(&text).map_err(|e| CliError {
            code: EXIT_CLIPBOARD,
            message: format!("copy to clipboard failed: {e}"),
            hint: Some("use --output FILE or redirect stdout instead".into()),
        })?;
        if !quiet {
            eprintln!("copied {} record(s) to the clipboard ({tool})", board.filtered().len());
        }
        return Ok(());
    }

    if let Some(path) = output {
        std::fs::write(&path, &text)
            .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
        if !quiet {
            eprintln!("wrote {}", path.display());
        }
        return Ok(());
    }

    write_stdout(&text)
}

// ============================================================================
// owners
// ============================================================================

fn cmd_owners(config_path: Option<&Path>, quiet: bool, sources: Sources, json: bool) -> Result<(), CliError> {
    let board = load_dashboard(config_path, quiet, &sources)?;
    let names = board.owner_names();

    if json {
        let text = serde_json::to_string(&names)
            .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;
        return write_stdout(&format!("{text}\n"));
    }

    if names.is_empty() && !quiet {
        eprintln!("hint:  no merged records; check that registration ids match between the files");
    }

    let mut out = String::new();
    for name in names {
        out.push_str(&name);
        out.push('\n');
    }
    write_stdout(&out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(parse_date("2024-01-31").unwrap(), expected);
        assert_eq!(parse_date("31/01/2024").unwrap(), expected);
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("janvier").unwrap_err().contains("janvier"));
    }

    #[test]
    fn filter_args_map_to_state() {
        let args = FilterArgs {
            owner: "all".into(),
            search: "123".into(),
            from: parse_date("2024-01-01").ok(),
            to: None,
        };
        let state = args.into_state();
        assert_eq!(state.owner, OwnerFilter::All);
        assert_eq!(state.text, "123");
        assert!(state.start_date.is_some());
        assert!(state.end_date.is_none());
    }

    #[test]
    fn nothing_to_export_maps_to_its_exit_code() {
        let err: CliError = DashboardError::NothingToExport.into();
        assert_eq!(err.code, EXIT_NOTHING_TO_EXPORT);
        assert!(err.message.contains("nothing to copy"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
