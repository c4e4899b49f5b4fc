//! ratatui rendering. Everything here reads `App` and never changes game state.

mod combat_scene;
mod menu_scenes;
mod overworld_scene;
pub mod terminal_surface;

use crate::app::{App, KeyInput, Screen};
use crossterm::event::KeyCode;
use ratatui::Frame;

/// Draws whichever screen the app is on.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.size();
    match &app.screen {
        Screen::StartMenu { selected } => {
            menu_scenes::draw_start_menu(frame, area, app, *selected)
        }
        Screen::Overworld => overworld_scene::draw_overworld_scene(frame, area, app),
        Screen::Upgrade { selected } => {
            menu_scenes::draw_upgrade_menu(frame, area, app, *selected)
        }
        Screen::Inventory => menu_scenes::draw_inventory_menu(frame, area, app),
        Screen::SkillList { selected } => menu_scenes::draw_skill_list(frame, area, app, *selected),
        Screen::RenamePick => menu_scenes::draw_rename_pick(frame, area, app),
        Screen::RenameInput { skill, buffer } => {
            menu_scenes::draw_rename_input(frame, area, app, *skill, buffer)
        }
        Screen::ClassOffer { class, .. } => menu_scenes::draw_class_offer(frame, area, app, *class),
        Screen::Help => menu_scenes::draw_help_menu(frame, area),
        Screen::BattleResult { lines } => menu_scenes::draw_battle_result(frame, area, lines),
    }
}

/// Maps a crossterm key to the app's key input.
pub fn key_input(code: KeyCode) -> KeyInput {
    match code {
        KeyCode::Up => KeyInput::Up,
        KeyCode::Down => KeyInput::Down,
        KeyCode::Left => KeyInput::Left,
        KeyCode::Right => KeyInput::Right,
        KeyCode::Enter => KeyInput::Enter,
        KeyCode::Esc => KeyInput::Esc,
        KeyCode::Backspace => KeyInput::Backspace,
        KeyCode::Char(c) => KeyInput::Char(c),
        _ => KeyInput::Other,
    }
}
