use std::io::{self, Write};

use log::info;
use shakmaty::Square;

use super::{ScriptedPointer, TerminalDisplay};
use crate::assets::DirectoryAssets;
use crate::board::BoardState;
use crate::config::BoardConfig;
use crate::interaction::{Point, PointerEvent};
use crate::session::Session;

/// Clears the screen and moves cursor to top-left.
#[inline]
fn clear_screen() {
    print!("\x1B[2J\x1B[H");
}

/// Runs an interactive terminal interface driving the board with pointer events.
///
/// Returns early if the starting board cannot be set up.
pub fn run_interactive_terminal(config: &BoardConfig) {
    let mut assets = DirectoryAssets::new(&config.asset_dir);
    let Ok(board) = BoardState::initialize(&mut assets) else {
        eprintln!("Board setup failed, see log for details");
        return;
    };
    let geometry = config.geometry();
    let mut session = Session::new(board, geometry, TerminalDisplay::new());
    let mut pointer = ScriptedPointer::new(geometry);

    clear_screen();
    print_help();
    session.refresh();

    loop {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            eprintln!("Failed to flush stdout: {}", e);
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Failed to read input: {}", e);
                break;
            }
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "m" => {
                if parts.len() < 3 {
                    println!("Usage: m <from> <to>");
                    continue;
                }
                match (parts[1].parse::<Square>(), parts[2].parse::<Square>()) {
                    (Ok(from), Ok(to)) => {
                        pointer.push_move(from, to);
                        clear_screen();
                        replay(&mut session, &mut pointer);
                    }
                    _ => println!("Invalid square"),
                }
            }
            cmd @ ("p" | "d" | "r") => {
                let Some(point) = parse_point(&parts[1..]) else {
                    println!("Usage: {cmd} <x> <y>");
                    continue;
                };
                let event = match cmd {
                    "p" => PointerEvent::Press(point),
                    "d" => PointerEvent::Drag(point),
                    _ => PointerEvent::Release(point),
                };
                clear_screen();
                let outcome = session.dispatch(event);
                println!("{outcome:?}");
            }
            "s" => {
                match pointer.push_script(script_text(&input)) {
                    Ok(()) => {
                        clear_screen();
                        replay(&mut session, &mut pointer);
                    }
                    Err(e) => println!("❌ {e}"),
                }
            }
            "n" => {
                match BoardState::initialize(&mut assets) {
                    Ok(board) => {
                        clear_screen();
                        session.reset(board);
                        println!("\n🔄 Reset to initial position");
                    }
                    Err(e) => println!("❌ Reset failed: {e}"),
                }
            }
            "h" => print_help(),
            "q" => break,
            _ => println!("Unknown command"),
        }
    }

    info!("terminal session closed");
}

/// Dispatches everything queued on `pointer`, printing each outcome.
fn replay(session: &mut Session<TerminalDisplay>, pointer: &mut ScriptedPointer) {
    pointer.drain(|event| {
        let outcome = session.dispatch(event);
        println!("{event:?} -> {outcome:?}");
    });
}

/// Everything after the leading `s` command letter.
fn script_text(input: &str) -> &str {
    let line = input.trim_start();
    line.strip_prefix('s').unwrap_or(line)
}

fn parse_point(args: &[&str]) -> Option<Point> {
    match args {
        [x, y, ..] => Some(Point::new(x.parse().ok()?, y.parse().ok()?)),
        _ => None,
    }
}

fn print_help() {
    println!("♗  Bishop Board");
    println!();
    println!("Commands: m <from> <to> | p|d|r <x> <y> (press/drag/release)");
    println!("          s <script> | n (new game) | h (help) | q (quit)");
    println!("Script:   vc1 ~b2 ^b2  (v press, ~ drag, ^ release; square or @x,y)");
    println!();
}
