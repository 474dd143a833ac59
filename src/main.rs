//! contract-ask CLI application entry point
//!
//! Ask questions about a contract corpus served by a retrieval backend, keep
//! the answers in a bounded, bookmarkable history and export a selection of
//! them as XLSX, CSV or DOCX.
//!
//! # Usage
//!
//! ```bash
//! # Interactive session (default command)
//! contract-ask
//! contract-ask --lang en --server http://search.internal:8000 shell
//!
//! # Which contracts can be searched?
//! contract-ask contracts
//!
//! # One-shot question restricted to a contract, exported as a document
//! contract-ask ask "What are the termination conditions?" -f lease.pdf --export docx
//!
//! # Make English answers the default
//! contract-ask --lang en config --save
//! ```
//!
//! # Configuration
//!
//! Settings live in `~/.config/contract-ask/config.toml` (Linux) and can be
//! overridden with `CONTRACT_ASK_*` environment variables or global flags.
//! Log output goes to stderr and is controlled by `-v` or `CONTRACT_ASK_LOG`.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use colored::Colorize;
use contract_ask::{
    AskError,
    cli::{Cli, Commands},
    config::AskConfig,
    export::{ExportFormat, suggested_file_name},
    models::{FileFilter, ViewMode},
    output,
    search::{ALL_CONTRACTS, ContractCatalog, HttpSearchClient, SearchBackend, SearchError},
    session::Session,
    shell::{HELP, ShellCommand},
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, AskError>;

/// Environment variable holding a log filter directive
const LOG_ENV: &str = "CONTRACT_ASK_LOG";

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Resolve a contract choice against the catalog
///
/// When the catalog could not be fetched, any non-numeric name is passed
/// through to the backend unchecked.
fn resolve_filter(catalog: &ContractCatalog, choice: &str) -> Result<FileFilter> {
    if let Some(filter) = catalog.filter_for(choice) {
        return Ok(filter);
    }
    if catalog.is_fallback() && choice.parse::<usize>().is_err() {
        tracing::debug!(choice, "contract list unavailable, using name as given");
        return Ok(FileFilter::File(choice.trim().to_string()));
    }
    Err(AskError::InvalidInput(format!(
        "Unknown contract '{choice}'. Use 'contracts' to list them."
    )))
}

fn print_catalog(catalog: &ContractCatalog, quiet: bool) {
    if catalog.is_fallback() && !quiet {
        eprintln!("{}", "Contract list unavailable; only the full corpus can be searched".yellow());
    }
    for (i, entry) in catalog.entries().iter().enumerate() {
        println!("{:>3}. {entry}", i + 1);
    }
}

/// Write export bytes, creating parent directories as needed
fn write_export(bytes: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote export");
    Ok(())
}

fn export_path(config: &AskConfig, format: ExportFormat, explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        config
            .export_dir()
            .join(suggested_file_name(format, chrono::Local::now().date_naive()))
    })
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| AskError::ClipboardError(e.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| AskError::ClipboardError(e.to_string()))
}

/// Submit a question, abandoning it on Ctrl-C
async fn ask(session: &mut Session, question: &str, quiet: bool) -> Result<bool> {
    if !quiet {
        eprintln!("{}", "Searching...".dimmed());
    }
    tokio::select! {
        result = session.submit(question) => {
            result?;
            Ok(true)
        }
        _ = tokio::signal::ctrl_c() => {
            eprintln!("{}", "Search cancelled".yellow());
            Ok(false)
        }
    }
}

fn print_view(session: &Session) {
    let view = session.view();
    if view.is_empty() {
        println!("{}", output::empty_view(session.view_mode()).dimmed());
        return;
    }
    let focused = session.focused().map(|item| item.id);
    for (i, item) in view.iter().enumerate() {
        let selected = session.selection().contains(i);
        println!("{}", output::list_row(i, item, selected, focused == Some(item.id)));
    }
}

/// Per-session settings the shell needs besides the `Session`
struct Shell {
    config: AskConfig,
    backend: Arc<dyn SearchBackend>,
    catalog: ContractCatalog,
}

impl Shell {
    /// Run one shell command; returns `false` when the shell should exit
    async fn handle(&mut self, session: &mut Session, command: ShellCommand) -> Result<bool> {
        let quiet = self.config.quiet;
        match command {
            ShellCommand::Ask(question) => {
                if ask(session, &question, quiet).await?
                    && let Some(item) = session.focused()
                {
                    println!("{}", output::detail(item));
                }
            }
            ShellCommand::List => print_view(session),
            ShellCommand::History => {
                session.set_view_mode(ViewMode::History);
                print_view(session);
            }
            ShellCommand::Bookmarks => {
                session.set_view_mode(ViewMode::Bookmarks);
                print_view(session);
            }
            ShellCommand::Show(index) => {
                let item = session.focus(index)?;
                println!("{}", output::detail(item));
            }
            ShellCommand::Star(index) => {
                let bookmarked = session.toggle_bookmark(index)?;
                if !quiet {
                    println!("{}", if bookmarked { "Bookmarked" } else { "Bookmark removed" });
                }
                print_view(session);
            }
            ShellCommand::Delete(index) => {
                let removed = session.delete(index)?;
                if !quiet {
                    println!("Deleted: {}", output::title(&removed.question));
                }
            }
            ShellCommand::Select(indices) => {
                for index in indices {
                    let ticked = session.toggle_selection(index)?;
                    if !quiet {
                        println!("{} {}", if ticked { "Selected" } else { "Deselected" }, index + 1);
                    }
                }
            }
            ShellCommand::Clear => {
                session.clear_selection();
                if !quiet {
                    println!("Selection cleared");
                }
            }
            ShellCommand::Export(format, path) => {
                let bytes = session.export(format)?;
                let path = export_path(&self.config, format, path);
                write_export(&bytes, &path)?;
                println!("Exported {} item(s) to {}", session.selection().len(), path.display());
            }
            ShellCommand::ShowFilter => {
                println!("Contract: {}", session.filter().target_file().unwrap_or(ALL_CONTRACTS));
            }
            ShellCommand::Filter(choice) => {
                let filter = resolve_filter(&self.catalog, &choice)?;
                if !quiet {
                    println!("Contract: {}", filter.target_file().unwrap_or(ALL_CONTRACTS));
                }
                session.set_filter(filter);
            }
            ShellCommand::Lang(language) => {
                session.set_language(language);
                if !quiet {
                    println!("Answer language: {language}");
                }
            }
            ShellCommand::Contracts => {
                self.catalog = ContractCatalog::load(self.backend.as_ref()).await;
                print_catalog(&self.catalog, quiet);
            }
            ShellCommand::Copy(index) => {
                let item = session.focus(index)?;
                copy_to_clipboard(&item.answer)?;
                if !quiet {
                    println!("Answer copied to clipboard");
                }
            }
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Quit => return Ok(false),
        }
        Ok(true)
    }
}

async fn run_shell(config: AskConfig, backend: Arc<dyn SearchBackend>) -> Result<()> {
    let catalog = ContractCatalog::load(backend.as_ref()).await;
    let mut session = Session::new(Arc::clone(&backend), config.timeout(), config.language);

    if !config.quiet {
        println!("{} ({})", "contract-ask".bold(), config.api_base_url);
        println!("Type a question, or 'help' for commands.");
    }

    let mut shell = Shell {
        config,
        backend,
        catalog,
    };
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{} ", "ask>".cyan().bold());
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{} {message}", "Error:".red().bold());
                continue;
            }
        };

        match shell.handle(&mut session, command).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                tracing::debug!(error = ?e, "shell command failed");
                eprintln!("{} {e}", "Error:".red().bold());
                if matches!(e, AskError::SearchError(SearchError::SearchFailed(_))) {
                    eprintln!("Please try again.");
                }
            }
        }
    }
    Ok(())
}

async fn handle_ask_command(
    config: &AskConfig,
    backend: Arc<dyn SearchBackend>,
    command: &Commands,
) -> Result<()> {
    let Commands::Ask { file, export, output, .. } = command else {
        return Err(AskError::InvalidInput("Expected an ask command".into()));
    };
    let question = command.get_question().unwrap_or_default();

    let mut session = Session::new(Arc::clone(&backend), config.timeout(), config.language);
    if let Some(choice) = file {
        let catalog = ContractCatalog::load(backend.as_ref()).await;
        session.set_filter(resolve_filter(&catalog, choice)?);
    }

    let id = session.submit(&question).await?;
    let index = session
        .store()
        .position(id)
        .ok_or_else(|| AskError::InvalidInput("Answer was not kept in history".into()))?;
    println!("{}", output::detail(session.focus(index)?));

    if let Some(format) = *export {
        session.toggle_selection(index)?;
        let bytes = session.export(format)?;
        let path = export_path(config, format, output.clone());
        write_export(&bytes, &path)?;
        if !config.quiet {
            eprintln!("Exported to {}", path.display());
        }
    }
    Ok(())
}

fn handle_config_command(config: &AskConfig, path: Option<&Path>, save: bool) -> Result<()> {
    print!("{}", config.to_toml()?);
    if save {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => AskConfig::config_path()?,
        };
        config.save_to(&path)?;
        if !config.quiet {
            println!("{} {}", "Saved".green(), path.display());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(&cli);

    let mut config = match &cli.config {
        Some(path) => AskConfig::load_from(path)?,
        None => AskConfig::load()?,
    };
    cli.apply_to(&mut config);
    tracing::debug!(?config, "effective configuration");

    let backend: Arc<dyn SearchBackend> =
        Arc::new(HttpSearchClient::new(config.api_base_url.clone(), config.timeout())?);

    let command = cli.get_command();
    match &command {
        Commands::Shell => run_shell(config, backend).await,
        Commands::Contracts => {
            let catalog = ContractCatalog::load(backend.as_ref()).await;
            print_catalog(&catalog, config.quiet);
            Ok(())
        }
        Commands::Ask { .. } => handle_ask_command(&config, backend, &command).await,
        Commands::Config { save } => handle_config_command(&config, cli.config.as_deref(), *save),
    }
}
