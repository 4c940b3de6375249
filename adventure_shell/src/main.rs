//! # Campus Adventure Entry Point
//!
//! Parses arguments, sets up logging, and either runs the interactive console or
//! replays a scripted list of inputs.

use adventure_shell::{Console, ShellResult, WorldOptions};
use adventure_rules::{replay, Session};
use clap::{Parser, Subcommand};
use log::info;
use std::io;
use std::path::PathBuf;

/// Command line arguments for the campus adventure.
#[derive(Parser, Debug)]
#[command(name = "campus-adventure")]
#[command(about = "A text adventure across campus, racing a project deadline")]
#[command(version)]
struct Args {
    /// World file (.toml or .json); defaults to the built-in campus
    #[arg(short, long)]
    world: Option<PathBuf>,

    /// Override the starting location id
    #[arg(long)]
    start: Option<u32>,

    /// Override the move budget
    #[arg(long)]
    moves: Option<i32>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Run a scripted list of inputs and print the visited location ids
    Replay {
        /// Commands, with prompt answers placed right after the command that asks
        inputs: Vec<String>,

        /// Also print every narration line
        #[arg(long)]
        transcript: bool,
    },
}

fn main() -> ShellResult<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let options = WorldOptions {
        path: args.world.clone(),
        start: args.start,
        moves: args.moves,
    };
    let world = options.build()?;

    match args.mode {
        Some(Mode::Replay { inputs, transcript }) => {
            info!("replaying {} inputs", inputs.len());
            let run = replay(world, inputs)?;
            if transcript {
                for line in &run.transcript {
                    println!("{line}");
                }
            }
            let ids: Vec<String> = run.id_log().iter().map(ToString::to_string).collect();
            println!("[{}]", ids.join(", "));
            if let Some(outcome) = run.session.state().outcome() {
                println!("{outcome:?}");
            }
        }
        None => {
            info!("starting interactive session");
            let mut session = Session::new(world)?;
            let stdin = io::stdin();
            let mut console = Console::new(stdin.lock(), io::stdout());
            console.play(&mut session)?;
        }
    }

    Ok(())
}
