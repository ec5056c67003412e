mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use flappy_game::compute::{flap, init_state, restart, tick};
use flappy_game::entities::{BestKind, GameEvent, GameState, GameStatus};
use flappy_game::store::{FileStore, ScoreStore};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    store: &impl ScoreStore,
) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  FLAPPY  TERMINAL  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(5),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    // Stored bests
    let best = store.get(BestKind::Score);
    let best_items = store.get(BestKind::Items);
    if best > 0 || best_items > 0 {
        let hs_str = format!("Best Score: {}   Best Items: {}", best, best_items);
        out.queue(cursor::MoveTo(
            cx.saturating_sub(hs_str.chars().count() as u16 / 2),
            cy.saturating_sub(3),
        ))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(&hs_str))?;
    }

    let rules: &[&str] = &[
        "Tap SPACE to flap. Slip through the gaps,",
        "grab the ◆ items, don't touch anything solid.",
    ];
    out.queue(style::SetForegroundColor(Color::White))?;
    for (i, line) in rules.iter().enumerate() {
        out.queue(cursor::MoveTo(
            cx.saturating_sub(line.chars().count() as u16 / 2),
            cy.saturating_sub(1) + i as u16,
        ))?;
        out.queue(Print(*line))?;
    }

    let hint = "SPACE : Start   Q : Quit";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(hint.chars().count() as u16 / 2),
        cy + 3,
    ))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print(hint))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        if let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() {
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Up => {
                    return Ok(MenuResult::Start);
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the user quits.  A restart after a game over happens
/// in-place once the bird has settled; the bests already live in the
/// store and survive.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    store: &mut impl ScoreStore,
) -> std::io::Result<()> {
    let mut rng = thread_rng();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        })) = rx.try_recv()
        {
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(());
                }
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(());
                }
                // The tap: a flap while running, the restart trigger
                // once the bird has come to rest after a game over.
                KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => {
                    if state.status == GameStatus::Running {
                        *state = flap(state);
                    } else if !state.bird.flapping {
                        *state = restart(state);
                    }
                }
                KeyCode::Char('r') | KeyCode::Char('R')
                    if state.status == GameStatus::GameOver && !state.bird.flapping =>
                {
                    *state = restart(state);
                }
                _ => {}
            }
        }

        // ── Advance the simulation and carry out its side effects ─────────────
        let (next, events) = tick(state, &mut rng);
        *state = next;

        for ev in events {
            match ev {
                GameEvent::ItemCollected => {
                    // Pickup chime: the terminal bell is all we have.
                    out.queue(Print('\u{0007}'))?;
                }
                GameEvent::NewBest(kind, value) => {
                    store.set(kind, value);
                    // Fire-and-forget; a failed write costs at most the
                    // latest best.
                    let _ = store.flush();
                }
            }
        }

        display::render(out, state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let mut store = FileStore::open()?;

    match show_menu(out, rx, &store)? {
        MenuResult::Quit => Ok(()),
        MenuResult::Start => {
            let (width, height) = terminal::size()?;
            let mut state = init_state(
                width,
                height,
                store.get(BestKind::Score),
                store.get(BestKind::Items),
            );
            game_loop(out, &mut state, rx, &mut store)
        }
    }
}
