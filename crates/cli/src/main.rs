// ABOUTME: Command-line front end for the uChan board core.
// ABOUTME: Loads boards and threads, posts replies, and manages bookmarks and boards as JSON.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use uchan_board::{
    posts_from_html, threads_from_html, BookmarkStore, Client, NewThread, Post, Settings,
};

const SETTINGS_FILE: &str = "settings.toml";
const BOOKMARKS_FILE: &str = "bookmarks.json";

/// Browse a 4chan-style imageboard and print JSON.
#[derive(Parser, Debug)]
#[command(name = "uchan-cli")]
#[command(about = "Browse an imageboard from the command line and print JSON", long_about = None)]
struct Args {
    /// Directory holding settings.toml and bookmarks.json.
    #[arg(long, global = true, default_value = ".")]
    data_dir: PathBuf,

    /// Output compact JSON instead of pretty.
    #[arg(long, global = true, default_value_t = false)]
    compact: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the threads on a board's index page.
    Threads { board: String },

    /// List every post in a thread.
    Thread { board: String, thread: String },

    /// Extract posts from a saved page. Use "-" to read from stdin.
    Parse {
        file: String,
        /// Treat the page as a thread page instead of a board index.
        #[arg(long)]
        posts: bool,
        /// Board id stamped on every extracted post.
        #[arg(long)]
        board: Option<String>,
    },

    /// Reply to a thread, or post to the board when --thread is omitted.
    Reply {
        board: String,
        #[arg(long)]
        thread: Option<String>,
        #[arg(long)]
        comment: String,
        #[arg(long, default_value = "")]
        name: String,
    },

    /// Start a new thread.
    NewThread {
        board: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        comment: String,
        #[arg(long, default_value = "")]
        name: String,
        /// Captcha response token.
        #[arg(long, default_value = "")]
        captcha: String,
    },

    /// Manage saved threads.
    Bookmarks {
        #[command(subcommand)]
        action: BookmarkAction,
    },

    /// Manage the board list.
    Boards {
        #[command(subcommand)]
        action: BoardAction,
    },
}

#[derive(Subcommand, Debug)]
enum BookmarkAction {
    List,
    /// Bookmark a thread, or remove its bookmark if it already has one.
    Toggle { board: String, thread: String },
    Remove { url: String },
    /// Delete every bookmark.
    Clear,
}

#[derive(Subcommand, Debug)]
enum BoardAction {
    List,
    Add { board: String },
    Remove { board: String },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings_path = args.data_dir.join(SETTINGS_FILE);
    let mut settings = Settings::load(&settings_path)?;
    debug!(path = %settings_path.display(), "settings loaded");

    let output = match args.command {
        Command::Threads { board } => {
            let client = settings.client_builder().build();
            posts_json(&client.load_board(&board).await?)
        }
        Command::Thread { board, thread } => {
            let client = settings.client_builder().build();
            posts_json(&client.load_thread(&board, &thread).await?)
        }
        Command::Parse { file, posts, board } => {
            let html = load_text(&file)?;
            let extracted = if posts {
                posts_from_html(&html)?
            } else {
                threads_from_html(&html)?
            };
            let extracted: Vec<Post> = match board {
                Some(b) => extracted.into_iter().map(|p| p.with_board(&b)).collect(),
                None => extracted,
            };
            posts_json(&extracted)
        }
        Command::Reply {
            board,
            thread,
            comment,
            name,
        } => {
            if comment.trim().is_empty() {
                bail!("--comment must not be empty");
            }
            let client = settings.client_builder().build();
            client
                .submit_reply(&board, thread.as_deref(), &name, &comment)
                .await?;
            json!({ "ok": true, "board": board, "thread": thread })
        }
        Command::NewThread {
            board,
            subject,
            comment,
            name,
            captcha,
        } => {
            let client = settings.client_builder().build();
            let new_thread = NewThread {
                name,
                subject,
                comment,
                captcha_response: captcha,
            };
            client.create_thread(&board, &new_thread).await?;
            json!({ "ok": true, "board": board })
        }
        Command::Bookmarks { action } => {
            let mut store =
                BookmarkStore::open(args.data_dir.join(BOOKMARKS_FILE), &settings.base_url)?;
            run_bookmarks(&settings, &mut store, action).await?
        }
        Command::Boards { action } => run_boards(&mut settings, &settings_path, action)?,
    };

    if args.compact {
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}

async fn run_bookmarks(
    settings: &Settings,
    store: &mut BookmarkStore,
    action: BookmarkAction,
) -> Result<Value> {
    match action {
        BookmarkAction::List => Ok(serde_json::to_value(store.list())?),
        BookmarkAction::Toggle { board, thread } => {
            let client = settings.client_builder().build();
            let threads = client.load_board(&board).await?;
            let post = threads
                .iter()
                .find(|p| p.id == thread)
                .ok_or_else(|| anyhow!("thread {} not found on /{}/", thread, board))?;
            let bookmarked = store.toggle(post, &board)?;
            Ok(json!({
                "url": client.thread_url(&board, &thread),
                "bookmarked": bookmarked
            }))
        }
        BookmarkAction::Remove { url } => {
            let removed = store.remove(&url)?;
            Ok(json!({ "url": url, "removed": removed }))
        }
        BookmarkAction::Clear => {
            let cleared = store.list().len();
            store.clear()?;
            Ok(json!({ "cleared": cleared }))
        }
    }
}

fn run_boards(settings: &mut Settings, path: &Path, action: BoardAction) -> Result<Value> {
    let changed = match action {
        BoardAction::List => None,
        BoardAction::Add { board } => Some(settings.board_list_mut().add(&board)),
        BoardAction::Remove { board } => Some(settings.board_list_mut().remove(&board)),
    };

    if changed == Some(true) {
        settings
            .save(path)
            .with_context(|| format!("saving {}", path.display()))?;
    }

    Ok(json!({
        "boards": settings.board_list().as_slice(),
        "changed": changed.unwrap_or(false)
    }))
}

fn posts_json(posts: &[Post]) -> Value {
    json!({ "count": posts.len(), "posts": posts })
}

fn load_text(target: &str) -> Result<String> {
    if target == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }

    let path = PathBuf::from(target);
    if !path.exists() {
        return Err(anyhow!("file not found: {}", target));
    }
    Ok(fs::read_to_string(path)?)
}
