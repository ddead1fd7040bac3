//! Sift entrypoint: a headless harness over the search/replace core.
//!
//! Drives the exact contract a GUI search dialog would drive (caret-origin
//! search with wraparound, first-replace-only-highlights, replace-chain)
//! against a file instead of a window, which makes the engine's behavior
//! observable (and scriptable) without any front end.

use anyhow::Result;
use clap::Parser;
use core_config::load_from;
use core_search::{FeedbackSink, ReplaceOutcome, SearchNotice, SearchQuery, Severity};
use core_session::{Document, EditorSession, HISTORY_MAX};
use core_text::stats::{line_col_at, stats_of};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "sift", version, about = "Search and replace over a text file")]
struct Args {
    /// File to operate on (UTF-8 text).
    pub path: PathBuf,
    /// Term to search for. Without it, only file statistics are printed.
    #[arg(long = "find")]
    pub find: Option<String>,
    /// Replacement text; triggers the replace protocol instead of a listing.
    #[arg(long = "replace-with")]
    pub replace_with: Option<String>,
    /// Sweep the whole document instead of replacing a single occurrence.
    #[arg(long = "all")]
    pub all: bool,
    /// Match case exactly (overrides the configured default).
    #[arg(long = "case-sensitive")]
    pub case_sensitive: bool,
    /// Write the result back to the file instead of printing it.
    #[arg(long = "write")]
    pub write: bool,
    /// Optional configuration file path (overrides discovery of `sift.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

/// Prints engine notifications to stderr the way a status bar would show
/// them.
struct ConsoleFeedback;

impl FeedbackSink for ConsoleFeedback {
    fn notify(&mut self, notice: SearchNotice) {
        let text = match notice {
            SearchNotice::EmptyQuery => "no search term given",
            SearchNotice::WrappedToStart => "reached end of document, continuing from the top",
            SearchNotice::NoMatches => "no matches",
        };
        match notice.severity() {
            Severity::Warning => eprintln!("warning: {text}"),
            Severity::Info => eprintln!("{text}"),
        }
    }
}

fn configure_logging() -> Option<WorkerGuard> {
    let file_appender = tracing_appender::rolling::never(Path::new("."), "sift.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Some(guard),
        Err(_err) => {
            // Global tracing subscriber already installed; drop guard so the
            // writer shuts down.
            None
        }
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let args = Args::parse();
    let mut config = load_from(args.config.clone())?;
    let history_limit = config.apply_history_cap(HISTORY_MAX);

    let mut document = Document::from_file(&args.path)?;
    document.set_history_limit(history_limit);
    let mut session = EditorSession::new(document);
    let mut feedback = ConsoleFeedback;

    let Some(term) = args.find.as_deref() else {
        print_stats(&session);
        return Ok(());
    };
    let case_sensitive = args.case_sensitive || config.file.search.case_sensitive;
    let query = SearchQuery::new(term, case_sensitive);

    match args.replace_with.as_deref() {
        None => list_matches(&mut session, &query, &mut feedback),
        Some(replacement) => {
            let replaced = if args.all {
                replace_all(&mut session, &query, replacement, &mut feedback)
            } else {
                replace_one(&mut session, &query, replacement, &mut feedback)
            };
            println!("{replaced} occurrence(s) replaced");
            if replaced > 0 {
                emit_result(&session, &args)?;
            }
        }
    }
    session.close_search();
    Ok(())
}

fn print_stats(session: &EditorSession) {
    let text = session.document.buffer().text();
    let stats = stats_of(&text);
    println!(
        "{}: {} chars, {} words, {} lines",
        session.document.buffer().name,
        stats.chars,
        stats.words,
        stats.lines
    );
}

/// Walk the document with repeated searches, printing each occurrence, and
/// stop at the first wrapped result (the cycle is complete).
fn list_matches(
    session: &mut EditorSession,
    query: &SearchQuery,
    feedback: &mut dyn FeedbackSink,
) {
    let text = session.document.buffer().text();
    let mut count = 0usize;
    loop {
        let result = session.search(query, feedback);
        let Some(span) = result.span else {
            break;
        };
        if result.wrapped {
            break;
        }
        count += 1;
        let (line, col) = line_col_at(&text, span.start);
        println!("match at offset {} (line {line}, col {col})", span.start);
    }
    println!("{count} occurrence(s)");
}

/// Replace exactly one occurrence by running the dialog protocol: the first
/// call highlights, the second commits.
fn replace_one(
    session: &mut EditorSession,
    query: &SearchQuery,
    replacement: &str,
    feedback: &mut dyn FeedbackSink,
) -> usize {
    let first = session.replace(query, replacement, feedback);
    match first {
        ReplaceOutcome::FirstSearch(r) if r.found() => {
            let outcome = session.replace(query, replacement, feedback);
            usize::from(outcome.replaced())
        }
        _ => 0,
    }
}

/// Replace every occurrence, one chain step at a time. The sweep stops when
/// the chain runs dry or wraps back to the top; the wrap bound keeps a
/// replacement that itself contains the term from looping forever.
fn replace_all(
    session: &mut EditorSession,
    query: &SearchQuery,
    replacement: &str,
    feedback: &mut dyn FeedbackSink,
) -> usize {
    let first = session.replace(query, replacement, feedback);
    match first {
        ReplaceOutcome::FirstSearch(r) if r.found() => {}
        _ => return 0,
    }
    let mut replaced = 0usize;
    loop {
        let outcome = session.replace(query, replacement, feedback);
        if outcome.replaced() {
            replaced += 1;
        }
        match outcome.next_match() {
            Some(next) if next.found() && !next.wrapped => continue,
            _ => break,
        }
    }
    replaced
}

fn emit_result(session: &EditorSession, args: &Args) -> Result<()> {
    let text = session.document.buffer().text();
    if args.write {
        std::fs::write(&args.path, &text)?;
        info!(
            target: "io",
            file = %args.path.display(),
            size_bytes = text.len(),
            "file_write_ok"
        );
    } else {
        print!("{text}");
    }
    Ok(())
}
