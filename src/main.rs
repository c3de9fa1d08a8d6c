//! CLI entry point for delazy

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use delazy::{
    FixOptions, InputSource, OutputConfig, ReportFormatter, RewriteConfig, WriteMode, fix_file,
    print_json,
};
use tracing_subscriber::EnvFilter;

const DEFAULT_PATH: &str = "src/App.tsx";

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "delazy")]
#[command(about = "Replace lazily loaded component imports with plain imports")]
#[command(version)]
struct Args {
    /// File to rewrite
    #[arg(default_value = DEFAULT_PATH)]
    path: PathBuf,

    /// Write the result here instead of overwriting PATH
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    output: Option<PathBuf>,

    /// Read PATH as of a git revision instead of from the working tree
    #[arg(long = "rev", value_name = "REV")]
    rev: Option<String>,

    /// Name of the lazy loading function
    #[arg(long = "loader", value_name = "NAME", default_value = "lazy")]
    loader: String,

    /// Name of the dynamic import function inside the loader
    #[arg(long = "importer", value_name = "NAME", default_value = "import")]
    importer: String,

    /// Keep imports that become duplicates after the rewrite
    #[arg(long = "keep-duplicates")]
    keep_duplicates: bool,

    /// Keep the loader in its import line even when unused
    #[arg(long = "keep-loader-import")]
    keep_loader_import: bool,

    /// Keep `// Lazy ...` comments above converted declarations
    #[arg(long = "keep-comments")]
    keep_comments: bool,

    /// Show what would change without writing anything
    #[arg(short = 'n', long = "dry-run", conflicts_with = "stdout")]
    dry_run: bool,

    /// Print the rewritten file to stdout instead of writing it
    #[arg(long = "stdout", conflicts_with_all = ["output", "json"])]
    stdout: bool,

    /// Write even if lazy loader calls remain after the rewrite
    #[arg(long = "force")]
    force: bool,

    /// Print the report as JSON
    #[arg(long = "json")]
    json: bool,

    /// Only print warnings and errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "json")]
    quiet: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Log each rewrite step to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    fn rewrite_config(&self) -> RewriteConfig {
        RewriteConfig {
            loader: self.loader.clone(),
            importer: self.importer.clone(),
            drop_lazy_comments: !self.keep_comments,
            dedupe: !self.keep_duplicates,
            prune_loader_import: !self.keep_loader_import,
        }
    }

    fn write_mode(&self) -> WriteMode {
        if self.dry_run {
            WriteMode::DryRun
        } else if self.stdout {
            WriteMode::Stdout
        } else {
            WriteMode::Write
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.loader.is_empty() || args.importer.is_empty() {
        eprintln!("delazy: --loader and --importer must not be empty");
        process::exit(1);
    }

    let options = FixOptions {
        path: args.path.clone(),
        input: match &args.rev {
            Some(rev) => InputSource::Revision(rev.clone()),
            None => InputSource::WorkingTree,
        },
        output: args.output.clone(),
        mode: args.write_mode(),
        force: args.force,
        rewrite: args.rewrite_config(),
    };

    let outcome = match fix_file(&options) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("delazy: {}", e);
            process::exit(1);
        }
    };

    let formatter = ReportFormatter::new(OutputConfig {
        use_color: should_use_color(args.color),
        mode: options.mode,
        show_imports: !args.quiet,
    });

    let result = formatter.print_leftovers(&outcome.report).and_then(|()| {
        if options.mode == WriteMode::Stdout {
            let mut stdout = io::stdout().lock();
            stdout.write_all(outcome.text.as_bytes())?;
            stdout.flush()?;
        }
        if args.json {
            print_json(&outcome.report)
        } else if args.quiet {
            Ok(())
        } else {
            formatter.print(&outcome.report)
        }
    });

    if let Err(e) = result {
        eprintln!("delazy: error writing output: {}", e);
        process::exit(1);
    }

    if let Err(e) = outcome.report.ensure_written() {
        eprintln!("delazy: {}", e);
        process::exit(1);
    }
}
