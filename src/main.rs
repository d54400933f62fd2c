//! Command shell for exploring an AVL tree.
//!
//! Reads one command per line from stdin, e.g. `insert 9`, `remove 15`, `show`.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use avl_explorer::{parse, Session};

const DEFAULT_LIST: &str = "15,10,20,8,12,17,25,6,11,14,19,30,5,13,18,22,35,3,7,16,21,27,40,2,4";

const HELP: &str = "\
commands:
  insert <value>     insert a value and highlight it
  search <value>     highlight a value if present
  remove <value>     remove a value
  populate <list>    rebuild the tree from a comma-separated list
  clear              remove all values
  show               print the tree layout and in-order sequence
  stats              print node count and height
  help               print this message
  quit               leave the shell";

#[derive(Parser, Debug)]
#[command(name = "avl-explorer")]
#[command(about = "Explore a self-balancing binary search tree", long_about = None)]
struct Cli {
    /// Comma-separated values the tree starts with
    #[arg(short, long, default_value = DEFAULT_LIST)]
    list: String,

    /// Start with an empty tree
    #[arg(long, conflicts_with = "list")]
    empty: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

enum Command<'a> {
    Insert(&'a str),
    Search(&'a str),
    Remove(&'a str),
    Populate(&'a str),
    Clear,
    Show,
    Stats,
    Help,
    Quit,
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let line = line.trim();
        let (name, arg) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let arg = arg.trim();
        let command = match name {
            "insert" | "i" => Command::Insert(arg),
            "search" | "s" => Command::Search(arg),
            "remove" | "r" => Command::Remove(arg),
            "populate" | "p" => Command::Populate(arg),
            "clear" => Command::Clear,
            "show" => Command::Show,
            "stats" => Command::Stats,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return None,
        };
        Some(command)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing, RUST_LOG takes precedence
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut session = Session::<i64>::new();
    if !cli.empty {
        session
            .populate_from_text(&cli.list)
            .context("failed to populate the initial tree")?;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_stats(&session, &mut out)?;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }
        if !execute(&mut session, &line, &mut out)? {
            break;
        }
        out.flush()?;
    }

    info!(nodes = session.stats().nodes, "session finished");
    Ok(())
}

/// Runs a single command line. Returns `false` once the shell should stop.
fn execute(session: &mut Session<i64>, line: &str, out: &mut impl Write) -> anyhow::Result<bool> {
    debug!(line, "executing command");
    let command = match Command::parse(line) {
        Some(command) => command,
        None => {
            writeln!(out, "unknown command: {} (try `help`)", line.trim())?;
            return Ok(true);
        }
    };

    let outcome = match command {
        Command::Insert(arg) => parse::parse_value(arg).and_then(|value| {
            session.insert(value)?;
            Ok(format!("value {value} inserted and rebalanced"))
        }),
        Command::Search(arg) => parse::parse_value(arg).and_then(|value| {
            session.search(&value)?;
            Ok(format!("value {value} found"))
        }),
        Command::Remove(arg) => parse::parse_value(arg).and_then(|value| {
            session.remove(&value)?;
            Ok(format!("value {value} removed and rebalanced"))
        }),
        Command::Populate(arg) => session
            .populate_from_text(arg)
            .map(|count| format!("tree created with {count} elements")),
        Command::Clear => {
            session.clear();
            Ok(String::from("tree cleared"))
        }
        Command::Show => {
            print_tree(session, out)?;
            return Ok(true);
        }
        Command::Stats => {
            print_stats(session, out)?;
            return Ok(true);
        }
        Command::Help => {
            writeln!(out, "{HELP}")?;
            return Ok(true);
        }
        Command::Quit => return Ok(false),
    };

    match outcome {
        Ok(message) => writeln!(out, "{message}")?,
        Err(err) => writeln!(out, "error: {err}")?,
    }
    Ok(true)
}

fn print_stats(session: &Session<i64>, out: &mut impl Write) -> io::Result<()> {
    let stats = session.stats();
    writeln!(out, "nodes: {}, height: {}", stats.nodes, stats.height)
}

fn print_tree(session: &Session<i64>, out: &mut impl Write) -> io::Result<()> {
    let layout = session.layout();
    if layout.is_empty() {
        return writeln!(out, "(empty tree)");
    }

    for node in layout.nodes() {
        let marker = if session.is_highlighted(node.value) { " *" } else { "" };
        writeln!(
            out,
            "{:indent$}{}{}  ({:.3}, {:.1})",
            "",
            node.value,
            marker,
            node.position.x,
            node.position.y,
            indent = node.depth * 2,
        )?;
    }

    let values: Vec<String> = session.tree().iter().map(i64::to_string).collect();
    writeln!(out, "in order: {}", values.join(", "))?;
    print_stats(session, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(session: &mut Session<i64>, line: &str) -> String {
        let mut out = Vec::new();
        execute(session, line, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_commands() {
        let mut session = Session::new();
        session.populate_from_text("2,1,3").unwrap();

        assert_eq!(run(&mut session, "insert 4"), "value 4 inserted and rebalanced\n");
        assert_eq!(run(&mut session, "insert 4"), "error: value 4 already exists\n");
        assert_eq!(run(&mut session, "search 9"), "error: value 9 not found\n");
        assert_eq!(run(&mut session, " r 1 "), "value 1 removed and rebalanced\n");
        assert_eq!(
            run(&mut session, "insert four"),
            "error: invalid value \"four\" at entry 1\n"
        );
        assert_eq!(run(&mut session, "stats"), "nodes: 3, height: 2\n");
        assert_eq!(run(&mut session, "populate 5,6"), "tree created with 2 elements\n");
        assert_eq!(run(&mut session, "populate"), "error: list is empty\n");
        assert!(run(&mut session, "frobnicate").starts_with("unknown command"));
    }

    #[test]
    fn test_show() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, "show"), "(empty tree)\n");

        session.populate_from_text("2,1,3").unwrap();
        run(&mut session, "search 3");
        let shown = run(&mut session, "show");
        let lines: Vec<&str> = shown.lines().collect();
        assert_eq!(lines[0], "2  (0.000, 0.0)");
        assert_eq!(lines[1], "  1  (-1.000, -1.0)");
        assert_eq!(lines[2], "  3 *  (1.000, -1.0)");
        assert_eq!(lines[3], "in order: 1, 2, 3");
    }

    #[test]
    fn test_quit() {
        let mut session = Session::new();
        let mut out = Vec::new();
        assert!(!execute(&mut session, "quit", &mut out).unwrap());
        assert!(execute(&mut session, "clear", &mut out).unwrap());
    }
}
