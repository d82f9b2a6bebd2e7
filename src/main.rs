use anyhow::{Context, Result};
use clap::Parser;
use cozy_chess::Piece;
use duelboard::config::{parse_promotion, ControllerConfig, DEFAULT_PROMOTION};
use duelboard::{GameController, Gesture};
use log::{info, warn};
use std::io::{self, BufRead, Write};

/// Headless board host: reads widget gestures as JSON lines on stdin and
/// writes the board props after each one as JSON lines on stdout.
#[derive(Parser, Debug)]
#[command(author, version, about = "Human-vs-human board controller", long_about = None)]
struct Args {
    /// Starting FEN position (default: standard initial position)
    #[arg(long)]
    fen: Option<String>,

    /// Piece pawns promote to: q, r, b or n
    #[arg(long, value_parser = parse_promotion, default_value = "q")]
    promotion: Piece,

    /// Pretty-print each props object
    #[arg(long)]
    pretty: bool,
}

fn emit(out: &mut impl Write, controller: &GameController, pretty: bool) -> Result<()> {
    let props = controller.props();
    let json = if pretty { serde_json::to_string_pretty(&props)? } else { serde_json::to_string(&props)? };
    writeln!(out, "{}", json)?;
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = ControllerConfig { promotion: args.promotion, start_fen: args.fen };
    if config.promotion != DEFAULT_PROMOTION {
        info!("promoting to {:?}", config.promotion);
    }
    let mut controller = GameController::new(config).context("invalid start position")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    emit(&mut out, &controller, args.pretty)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(s) => s,
            // Non UTF-8 bytes: the line is consumed, the next read starts after it.
            Err(e) if e.kind() == io::ErrorKind::InvalidData => { warn!("skipping input: {e}"); continue; }
            Err(e) => return Err(e.into()),
        };
        let line = line.trim();
        if line.is_empty() { continue; }
        if line == "quit" { break; }
        let gesture = match Gesture::from_json(line) {
            Ok(g) => g,
            Err(e) => { warn!("skipping input: {e}"); continue; }
        };
        if let Err(e) = controller.dispatch(&gesture) {
            warn!("skipping gesture: {e}");
            continue;
        }
        emit(&mut out, &controller, args.pretty)?;
    }
    Ok(())
}
