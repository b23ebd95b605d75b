//! Keyboard input.
//!
//! Snake steering is edge-triggered, so this only keeps the key presses seen
//! since the last frame, in arrival order. Release events are dropped.

use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub struct InputState {
    /// Press/Repeat events from the most recent `drain_events()`, oldest first.
    presses: Vec<KeyEvent>,
}

impl InputState {
    pub fn new() -> Self {
        InputState { presses: Vec::with_capacity(8) }
    }

    /// Drain all pending terminal events without blocking.
    /// Call once per frame, before the tick.
    pub fn drain_events(&mut self) -> std::io::Result<()> {
        self.presses.clear();
        while poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.record(key);
            }
        }
        Ok(())
    }

    /// Input state with `codes` already pressed this frame.
    #[cfg(test)]
    pub fn with_presses(codes: &[KeyCode]) -> Self {
        let mut kb = InputState::new();
        for &code in codes {
            kb.record(KeyEvent::new(code, KeyModifiers::NONE));
        }
        kb
    }

    fn record(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Release {
            self.presses.push(key);
        }
    }

    /// Key codes pressed this frame, oldest first.
    pub fn presses(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.presses.iter().map(|k| k.code)
    }

    pub fn any_pressed(&self, codes: &[KeyCode]) -> bool {
        self.presses().any(|c| codes.contains(&c))
    }

    pub fn ctrl_c_pressed(&self) -> bool {
        self.presses.iter().any(|k| {
            k.modifiers.contains(KeyModifiers::CONTROL)
                && (k.code == KeyCode::Char('c') || k.code == KeyCode::Char('C'))
        })
    }
}
