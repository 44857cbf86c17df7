//! Interactive scoreboard terminal app.
//!
//! Reads newline-delimited commands from stdin, prints standings and
//! status lines to stdout; errors go to stderr and the loop keeps running.
//! The grammar lives in `scoreboard_core::command`.

mod render;

use std::env;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use scoreboard_core::{apply, parse, tokenize, Reply, Scoreboard};

fn print_usage() {
    println!("Interactive scoreboard");
    println!();
    println!("Usage:");
    println!("  scoreboard [--limit N] [--show N] [--players N]");
    println!();
    println!("Options:");
    println!("  -p, --players N   start with N generated players");
    println!("  -s, --show N      cap how many players are shown");
    println!("  -m, --limit N     cap how many players can exist");
    println!("  -h, --help        print this help");
    println!();
    println!("Type \"help\" at the SB> prompt for the command summary.");
}

struct StartupOptions {
    init_players: Option<u32>,
    show_max: Option<i64>,
    max_players: Option<i64>,
}

/// Scan startup flags. `Ok(None)` means help was printed and the process
/// should exit cleanly; any bad flag or value is an error.
fn parse_args(args: &[String]) -> Result<Option<StartupOptions>, String> {
    let mut options = StartupOptions {
        init_players: None,
        show_max: None,
        max_players: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-p" | "--players" => {
                options.init_players = Some(number_value::<u32>(args, i, "-p")?);
                i += 1;
            }
            "-s" | "--show" => {
                options.show_max = Some(number_value::<i64>(args, i, "-s")?);
                i += 1;
            }
            "-m" | "--limit" => {
                options.max_players = Some(number_value::<i64>(args, i, "-m")?);
                i += 1;
            }
            "-h" | "--help" => {
                print_usage();
                return Ok(None);
            }
            other => return Err(format!("unknown argument \"{}\"", other)),
        }
        i += 1;
    }

    Ok(Some(options))
}

fn number_value<T: FromStr>(args: &[String], i: usize, flag: &str) -> Result<T, String> {
    let value = args
        .get(i + 1)
        .ok_or_else(|| format!("{} needs a value", flag))?;
    value
        .parse::<T>()
        .map_err(|_| format!("{} argument wrong value \"{}\"", flag, value))
}

fn fatal(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn prompt(stdout: &mut io::Stdout) {
    write!(stdout, "SB> ").ok();
    stdout.flush().ok();
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args[1..]) {
        Ok(Some(options)) => options,
        Ok(None) => return,
        Err(message) => fatal(message),
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut scoreboard = Scoreboard::new();

    // The limit goes first so it constrains how many players -p creates.
    if let Some(limit) = options.max_players {
        match scoreboard.set_max_players(limit) {
            Ok(_) => println!("Player limit set to: {}", limit),
            Err(e) => fatal(format!("-m argument wrong value: {}", e)),
        }
    }
    if let Some(cap) = options.show_max {
        match scoreboard.set_show_max(cap) {
            Ok(()) => println!("Player show limit set to: {}", cap),
            Err(e) => fatal(format!("-s argument wrong value: {}", e)),
        }
    }
    if let Some(count) = options.init_players {
        let (created, truncated) = scoreboard.init_players(count);
        if truncated {
            eprintln!(
                "Warning: only {} players were created, raise the limit with: set plimit N",
                created
            );
        }
        println!("Initialized with {} players.", created);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    prompt(&mut stdout);
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        let tokens = tokenize(&line);
        if tokens.is_empty() {
            continue;
        }

        match parse(&tokens).and_then(|command| apply(command, &mut scoreboard)) {
            Ok(Reply::None) => {}
            Ok(Reply::Message(message)) => println!("{}", message),
            Ok(Reply::Board) => print!("{}", render::render(&scoreboard)),
            Ok(Reply::Exit) => return,
            Err(e) => eprintln!("Error: {}", e),
        }
        prompt(&mut stdout);
    }
}
