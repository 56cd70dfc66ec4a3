/// Input adapter — translates raw key events into the abstract command set.
///
/// Held keys are tracked with a `KeyCode → last-seen-frame` map: a key
/// counts as held while its last press/repeat event is within
/// `HOLD_WINDOW` frames. This works on two classes of terminal:
///
/// * **Keyboard-enhancement capable** (kitty protocol): proper
///   `Press`/`Repeat`/`Release` events — keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`). Keys expire after `HOLD_WINDOW` silent frames,
///   which is shorter than the OS repeat interval, so a held key stays
///   live while it keeps generating repeats.
///
/// Fire is edge-triggered: a press only queues a shot when the key was
/// not already held, so one discrete press is one shot no matter how many
/// frames it spans.

use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::FrameInput;

/// A key is considered "held" if its last press/repeat event arrived
/// within this many frames (≈133 ms at 30 FPS).
const HOLD_WINDOW: u64 = 4;

/// Wider window used only for the fire edge: the OS initial auto-repeat
/// delay can reach ~500 ms, longer than `HOLD_WINDOW`, and the first
/// repeat of a held Space must not read as a fresh press.
const FIRE_HOLD_WINDOW: u64 = 16;

pub struct InputTracker {
    /// Maps each held key → the frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    fire_queued: bool,
    quit: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        InputTracker {
            key_frame: HashMap::new(),
            fire_queued: false,
            quit: false,
        }
    }

    /// Record one terminal event against the current frame number.
    pub fn note_event(&mut self, event: &Event, frame: u64) {
        let Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) = event
        else {
            return;
        };

        match kind {
            KeyEventKind::Press => {
                match code {
                    KeyCode::Esc => self.quit = true,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        self.quit = true;
                    }
                    KeyCode::Char(' ') => {
                        // Repeats on classic terminals arrive as fresh
                        // presses; only a genuinely new press fires.
                        if !self.held_within(code, frame, FIRE_HOLD_WINDOW) {
                            self.fire_queued = true;
                        }
                    }
                    _ => {}
                }
                self.key_frame.insert(*code, frame);
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(*code, frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(code);
            }
        }
    }

    /// Snapshot the asserted commands for this frame; drains the queued
    /// shot so fire is reported at most once per press.
    pub fn snapshot(&mut self, frame: u64) -> FrameInput {
        let input = FrameInput {
            forward: self.any_held(&[KeyCode::Char('w'), KeyCode::Char('W'), KeyCode::Up], frame),
            backward: self.any_held(
                &[KeyCode::Char('s'), KeyCode::Char('S'), KeyCode::Down],
                frame,
            ),
            strafe_left: self.any_held(&[KeyCode::Char('a'), KeyCode::Char('A')], frame),
            strafe_right: self.any_held(&[KeyCode::Char('d'), KeyCode::Char('D')], frame),
            turn_left: self.any_held(
                &[KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Left],
                frame,
            ),
            turn_right: self.any_held(
                &[KeyCode::Char('e'), KeyCode::Char('E'), KeyCode::Right],
                frame,
            ),
            fire: self.fire_queued,
            quit: self.quit,
        };
        self.fire_queued = false;
        input
    }

    fn is_held(&self, key: &KeyCode, frame: u64) -> bool {
        self.held_within(key, frame, HOLD_WINDOW)
    }

    fn held_within(&self, key: &KeyCode, frame: u64, window: u64) -> bool {
        self.key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= window)
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|k| self.is_held(k, frame))
    }
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::new()
    }
}
