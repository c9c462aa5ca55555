use crossterm::{
    QueueableCommand,
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::{
    io::{self, Write},
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::{Instant, UNIX_EPOCH},
};

use crate::{
    board::{Direction, Tile},
    game::{GameSession, GameStatus},
    input::{Input, NewGameReason},
    sensor::ShakeDetector,
    spawn::RandomSource,
};

/// Reading fed to the shake detector when `s` is pressed.
const SIMULATED_SHAKE: [f64; 3] = [1.6, 1.1, 0.4];

const CELL_WIDTH: usize = 6;

const HELP: &str = "arrows/hjkl move  n new  m menu reset  s shake  q quit";

/// Play in the terminal until `q` or Esc.
///
/// Keys are read on a separate thread and delivered to the session through a
/// channel, one input at a time.
pub fn play<R: RandomSource>(session: &mut GameSession<R>) -> io::Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let (sender, receiver) = mpsc::channel();
    let reader = thread::spawn(move || read_inputs(sender));

    let result = drive(session, receiver, |current| draw(&mut stdout, current));

    let read_result = reader
        .join()
        .unwrap_or_else(|_| Err(io::Error::other("input thread panicked")));

    execute!(stdout, LeaveAlternateScreen, Show)?;
    disable_raw_mode()?;

    result.and(read_result)
}

/// Feed `receiver` into the session, redrawing after every turn. The receiver
/// is dropped on return, so a reader blocked on it sees its next send fail.
fn drive<R: RandomSource>(
    session: &mut GameSession<R>,
    receiver: Receiver<Input>,
    mut redraw: impl FnMut(&GameSession<R>) -> io::Result<()>,
) -> io::Result<()> {
    redraw(session)?;

    for input in receiver {
        session.handle(input);
        redraw(session)?;
    }

    Ok(())
}

fn read_inputs(sender: Sender<Input>) -> io::Result<()> {
    let mut shakes = ShakeDetector::new();

    loop {
        let event = event::read()?;
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            continue;
        };

        let input = match code {
            KeyCode::Esc | KeyCode::Char('q') => return Ok(()),
            KeyCode::Char('s') => shakes.sample(SIMULATED_SHAKE, Instant::now()),
            code => key_input(code),
        };

        if let Some(input) = input {
            if sender.send(input).is_err() {
                return Ok(());
            }
        }
    }
}

fn key_input(code: KeyCode) -> Option<Input> {
    let input = match code {
        KeyCode::Up | KeyCode::Char('k') => Input::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => Input::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') => Input::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => Input::Move(Direction::Right),
        KeyCode::Char('n') => Input::NewGame(NewGameReason::Manual),
        KeyCode::Char('m') => Input::NewGame(NewGameReason::Menu),
        _ => return None,
    };

    Some(input)
}

fn draw<R>(stdout: &mut io::Stdout, session: &GameSession<R>) -> io::Result<()> {
    stdout.queue(Clear(ClearType::All))?;
    stdout.queue(MoveTo(0, 0))?;

    for row in session.board().grid() {
        for cell in row {
            stdout
                .queue(SetForegroundColor(get_color(cell.as_ref())))?
                .queue(Print(cell_label(cell.as_ref())))?
                .queue(ResetColor)?;
        }

        stdout.queue(Print("\r\n"))?;
    }

    stdout.queue(Print("\r\n"))?;
    for line in summary_lines(session) {
        stdout.queue(Print(line))?.queue(Print("\r\n"))?;
    }
    stdout.queue(Print(HELP))?;

    stdout.flush()
}

fn cell_label(tile: Option<&Tile>) -> String {
    match tile {
        Some(tile) => format!("{:>CELL_WIDTH$}", tile.value),
        None => format!("{:>CELL_WIDTH$}", "."),
    }
}

fn get_color(tile: Option<&Tile>) -> Color {
    match tile {
        None => Color::DarkGrey,
        Some(tile) if tile.is_new => Color::Green,
        Some(tile) if tile.just_merged => Color::Cyan,
        Some(tile) if tile.value >= 2048 => Color::Magenta,
        Some(tile) if tile.value >= 128 => Color::Yellow,
        Some(_) => Color::White,
    }
}

fn summary_lines<R>(session: &GameSession<R>) -> Vec<String> {
    let status = match session.status() {
        GameStatus::Playing => "playing",
        GameStatus::Won => "won, keep going",
        GameStatus::GameOver => "game over, press n",
    };

    let mut lines = vec![
        format!(
            "score {}  best {}  max tile {}",
            session.score(),
            session.best_score(),
            session.board().max_value()
        ),
        status.to_owned(),
    ];

    if !session.history().is_empty() {
        lines.push("recent runs:".to_owned());
        lines.extend(session.history().iter().map(|record| {
            let secs = record
                .timestamp
                .duration_since(UNIX_EPOCH)
                .map_or(0, |elapsed| elapsed.as_secs());
            format!("  {:>6} ({}, t={secs})", record.score, record.triggered_by)
        }));
    }

    lines
}

/// Plain rendering of the session, used outside the alternate screen.
pub fn render_text<R>(session: &GameSession<R>) -> String {
    let mut out = String::new();

    for row in session.board().grid() {
        out.extend(row.iter().map(|cell| cell_label(cell.as_ref())));
        out.push('\n');
    }

    for line in summary_lines(session) {
        out.push_str(&line);
        out.push('\n');
    }

    out
}
