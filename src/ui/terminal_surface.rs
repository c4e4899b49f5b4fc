//! Terminal implementation of the combat surface.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::backend::Backend;
use ratatui::Terminal;

use super::combat_scene::draw_combat_scene;
use crate::combat::logic::{CombatSurface, CombatView, PlayerInput};
use crate::core::constants::TURN_PAUSE_MS;

/// Draws battles into a ratatui terminal and reads keys with crossterm.
pub struct TerminalSurface<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
}

impl<'a, B: Backend> TerminalSurface<'a, B> {
    pub fn new(terminal: &'a mut Terminal<B>) -> Self {
        Self { terminal }
    }
}

/// Maps a key to a combat input.
pub fn combat_input(code: KeyCode) -> PlayerInput {
    match code {
        KeyCode::Char('a') => PlayerInput::Attack,
        KeyCode::Char(c @ '1'..='9') => match c.to_digit(10) {
            Some(d) => PlayerInput::Skill(d as usize - 1),
            None => PlayerInput::Unrecognized,
        },
        _ => PlayerInput::Unrecognized,
    }
}

fn next_key(deadline: Instant) -> io::Result<Option<KeyCode>> {
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() || !event::poll(remaining)? {
            return Ok(None);
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(key.code));
            }
        }
    }
}

impl<B: Backend> CombatSurface for TerminalSurface<'_, B> {
    fn show(&mut self, view: &CombatView<'_>) {
        let drawn = self.terminal.draw(|frame| {
            let area = frame.size();
            draw_combat_scene(frame, area, view);
        });
        if let Err(err) = drawn {
            tracing::warn!(error = %err, "combat frame not drawn");
        }
    }

    fn read_action(&mut self, window: Duration) -> PlayerInput {
        match next_key(Instant::now() + window) {
            Ok(Some(code)) => combat_input(code),
            Ok(None) => PlayerInput::NoInput,
            Err(err) => {
                tracing::warn!(error = %err, "combat input failed");
                PlayerInput::NoInput
            }
        }
    }

    fn round_pause(&mut self) {
        thread::sleep(Duration::from_millis(TURN_PAUSE_MS));
    }
}
