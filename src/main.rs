use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use raycast_shooter::compute;
use raycast_shooter::display;
use raycast_shooter::entities::GameState;
use raycast_shooter::frame;
use raycast_shooter::input::InputTracker;

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the Quit command clears the run flag. Each iteration, in
/// strict order: measure elapsed time, drain pending input, apply command
/// effects, advance bullets, compose and draw a full frame sized to the
/// current terminal, then sleep off the rest of the frame budget (no sleep
/// and no catch-up when a frame overruns).
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut tracker = InputTracker::new();
    let mut frame_no: u64 = 0;
    let mut last = Instant::now();

    while state.running {
        let frame_start = Instant::now();
        frame_no += 1;

        let dt = frame_start.duration_since(last).as_secs_f32();
        last = frame_start;
        if dt > 0.0 {
            state.fps = (1.0 / dt).round() as u32;
        }

        while let Ok(ev) = rx.try_recv() {
            tracker.note_event(&ev, frame_no);
        }
        let input = tracker.snapshot(frame_no);

        compute::apply_input(state, &input, dt);
        compute::update_bullets(state, dt);

        // The surface may resize between frames; query it every time.
        let (width, height) = terminal::size()?;
        let composed = frame::compose(state, width as usize, height as usize);
        display::draw(out, &composed)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    let setup = out
        .execute(terminal::EnterAlternateScreen)
        .and_then(|out| out.execute(cursor::Hide));
    if let Err(err) = setup {
        // Don't leave the shell in raw mode when we never got a surface.
        let _ = terminal::disable_raw_mode();
        return Err(err);
    }

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

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

    let mut state = GameState::new();
    let result = game_loop(&mut out, &mut state, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
