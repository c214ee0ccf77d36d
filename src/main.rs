use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use index_stat::areas::index::WriteMode;
use index_stat::areas::repository::Repository;
use is_terminal::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "git-index-stat",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Rewrite the stat data cached in a git index",
    long_about = "This tool manipulates the stat data git caches for every tracked file, \
    bypassing `git update-index`. It either invalidates the cache so the next status \
    scan rehashes everything, or resynchronises it with the working tree.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(
        long,
        global = true,
        env = "GIT_INDEX_FILE",
        help = "The index file to rewrite"
    )]
    index: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = "GIT_DIR",
        help = "The git directory holding the index, used when no index file is given"
    )]
    git_dir: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        help = "Patch the index through a shared memory map instead of replacing it atomically"
    )]
    in_place: bool,
    #[arg(short, long, global = true, action = ArgAction::Count, help = "Log more (repeatable)")]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "ignore",
        about = "Invalidate the cached stat data of every entry",
        long_about = "This command overwrites the stat data of every entry with fresh lstat \
        results. The trailing checksum is deliberately left as it was."
    )]
    Ignore,
    #[command(
        name = "resync",
        about = "Resynchronise cached stat data with the working tree",
        long_about = "This command refreshes timestamps, device and inode of every entry that \
        is a regular file, keeps mode, ownership and size, and rewrites the trailing checksum."
    )]
    Resync,
    #[command(
        name = "verify",
        about = "Check the index structure and trailing checksum"
    )]
    Verify,
}

impl Cli {
    fn index_path(&self) -> PathBuf {
        match (&self.index, &self.git_dir) {
            (Some(index), _) => index.clone(),
            (None, Some(git_dir)) => git_dir.join("index"),
            (None, None) => PathBuf::from(".git").join("index"),
        }
    }

    fn write_mode(&self) -> WriteMode {
        if self.in_place {
            WriteMode::InPlace
        } else {
            WriteMode::Atomic
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let pwd = std::env::current_dir()?;
    let repository = Repository::new(
        &cli.index_path(),
        &pwd,
        cli.write_mode(),
        Box::new(std::io::stdout()),
    );

    match &cli.command {
        Commands::Ignore => {
            repository.ignore_stat()?;
        }
        Commands::Resync => {
            repository.resync_stat()?;
        }
        Commands::Verify => repository.verify_index()?,
    }

    Ok(())
}
