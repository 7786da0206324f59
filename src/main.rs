//! # Glimpse - A Minimal Code Viewer
//!
//! Opens a folder, shows its tree, opens files into tabs with syntax
//! highlighting and reloads tabs when their files change on disk.
//!
//! The display is a single HTML page that is rewritten on every render;
//! keep it open in a browser with auto-refresh, or just read the terminal
//! summary. Commands are typed on stdin (see [`commands`]).
//!
//! ## Quick Start
//!
//! ```bash
//! # View a project
//! cargo run -- path/to/project
//!
//! # Open a couple of files straight away
//! cargo run -- path/to/project --open src/main.rs --open Cargo.toml
//!
//! # Print the file tree as JSON
//! cargo run -- path/to/project --dump-tree
//! ```

mod commands;
mod sink;

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glimpse_core::{
    Config, Controller, FileDescriptor, FsReader, PollingWatcher, Session, ViewerEvent,
    build_tree, event_channel,
};
use glimpse_syntax::Highlighter;

use crate::commands::{read_commands, resolve};
use crate::sink::HtmlSnapshotSink;

/// Glimpse - a minimal code viewer with live reload
#[derive(Parser, Debug)]
#[command(name = "glimpse")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Folder to open
    #[arg(value_name = "DIR")]
    folder: Option<PathBuf>,

    /// File to open in a tab (repeatable)
    #[arg(short = 'o', long = "open", value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Where to write the rendered page
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Config file to use instead of the default one
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Do not reload tabs when files change on disk
    #[arg(long)]
    no_watch: bool,

    /// Print the folder's file tree as JSON and exit
    #[arg(long, requires = "folder")]
    dump_tree: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting Glimpse v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    if let Some(out) = &args.out {
        config.view.output = out.clone();
    }
    if args.no_watch {
        config.watch.enabled = false;
    }

    let cwd = std::env::current_dir()?;
    let folder = args.folder.as_deref().map(|p| resolve(p, &cwd));

    if args.dump_tree {
        if let Some(folder) = &folder {
            let tree = build_tree(folder, &config.tree.exclude)?;
            println!("{}", serde_json::to_string_pretty(&tree)?);
        }
        return Ok(());
    }

    let files: Vec<PathBuf> = args
        .files
        .iter()
        .map(|f| resolve(f, folder.as_deref().unwrap_or(&cwd)))
        .collect();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run(config, folder, files, cwd));

    // A blocked stdin read would otherwise keep the runtime alive.
    runtime.shutdown_timeout(Duration::from_millis(100));
    result
}

async fn run(
    config: Config,
    folder: Option<PathBuf>,
    files: Vec<PathBuf>,
    cwd: PathBuf,
) -> anyhow::Result<()> {
    let (tx, mut events) = event_channel();

    let watcher = if config.watch.enabled {
        Some(PollingWatcher::new(tx.clone(), config.watch.poll_interval())?)
    } else {
        tracing::info!("Live reload disabled");
        None
    };
    let session = Session::new(watcher, FsReader);
    let sink = HtmlSnapshotSink::new(&config.view.output, &config.view.title);
    println!("Rendering to {}", sink.output().display());

    let mut controller = Controller::new(session, Highlighter::new()?, sink, config.tree.clone());

    if let Some(folder) = folder {
        tx.send(ViewerEvent::FolderOpened(folder)).await;
    }
    for file in files {
        tx.send(ViewerEvent::FileClicked(FileDescriptor::from_path(file)))
            .await;
    }

    tokio::spawn(read_commands(tx.clone(), cwd));

    let quit = tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            quit.send(ViewerEvent::Quit).await;
        }
    });
    drop(tx);

    controller.run(&mut events).await;
    Ok(())
}
