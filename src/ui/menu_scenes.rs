//! Full-screen menus reached from the start screen or the overworld.

use crate::app::{App, StartOption};
use crate::character::stats::{ClassPath, StatKind};
use crate::combat::skills::{Skill, SkillId};
use crate::core::constants::MAX_SKILL_NAME_LEN;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn hint_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Title bar, a bordered body and a hint line.
fn draw_menu(frame: &mut Frame, area: Rect, title: &str, body: Vec<Line>, hint: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Min(3),    // Body
            Constraint::Length(1), // Hint
        ])
        .split(area);

    let title = Paragraph::new(format!("== {} ==", title))
        .style(title_style())
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let body = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(body, chunks[1]);

    let hint = Paragraph::new(hint.to_string())
        .style(hint_style())
        .alignment(Alignment::Center);
    frame.render_widget(hint, chunks[2]);
}

fn selectable(label: String, selected: bool) -> Line<'static> {
    if selected {
        Line::from(Span::styled(
            format!("> {}", label),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(format!("  {}", label))
    }
}

fn message_lines(app: &App) -> Vec<Line<'static>> {
    app.messages
        .iter()
        .map(|m| Line::from(Span::styled(m.clone(), Style::default().fg(Color::Yellow))))
        .collect()
}

pub fn draw_start_menu(frame: &mut Frame, area: Rect, app: &App, selected: usize) {
    let mut body = vec![Line::from("Welcome to Bramble."), Line::from("")];
    body.extend(
        StartOption::all()
            .iter()
            .enumerate()
            .map(|(i, option)| selectable(option.label().to_string(), i == selected)),
    );
    if !app.messages.is_empty() {
        body.push(Line::from(""));
        body.extend(message_lines(app));
    }
    draw_menu(
        frame,
        area,
        "Bramble",
        body,
        "Use UP/DOWN arrows and ENTER to select.",
    );
}

pub fn draw_upgrade_menu(frame: &mut Frame, area: Rect, app: &App, selected: usize) {
    let stats = &app.state.stats;
    let mut body = vec![
        Line::from(format!("Skill Points: {}", stats.skill_points)),
        Line::from(""),
    ];
    for (i, kind) in StatKind::all().iter().enumerate() {
        body.push(selectable(
            format!("{}. {:<8}= {}", i + 1, kind.label(), kind.value(stats)),
            i == selected,
        ));
    }
    body.push(Line::from(format!(
        "   Level {} | XP: {}/{}",
        stats.level,
        stats.xp,
        stats.xp_threshold()
    )));
    body.push(Line::from(""));
    body.extend(message_lines(app));
    draw_menu(
        frame,
        area,
        "Upgrade Stats",
        body,
        "Press 1-5 (or ENTER) to upgrade a stat, 'b' to go back.",
    );
}

pub fn draw_inventory_menu(frame: &mut Frame, area: Rect, app: &App) {
    let stats = &app.state.stats;
    let mut body = vec![Line::from(format!("Gold: {}", stats.gold)), Line::from("")];
    if app.state.inventory.is_empty() {
        body.push(Line::from("Your inventory is empty."));
    }
    for (i, item) in app.state.inventory.items.iter().enumerate() {
        let wielded = stats.wielded_item_index == Some(i);
        let line = format!(
            "{}. {}{}  (dmg {}, dex {}, crit {})",
            i + 1,
            item.name,
            if wielded { " (W)" } else { "" },
            item.damage,
            item.dexterity,
            item.crit
        );
        body.push(if wielded {
            Line::from(Span::styled(line, Style::default().fg(Color::Green)))
        } else {
            Line::from(line)
        });
    }
    draw_menu(
        frame,
        area,
        "Inventory",
        body,
        "Press a number to wield/unwield an item, 'b' to go back.",
    );
}

fn skill_details(skill: &Skill) -> Vec<Line<'static>> {
    vec![
        Line::from(format!(
            "Name: {} (Original: {})",
            skill.display_name,
            skill.id.name()
        )),
        Line::from(format!("Rank: {}", skill.rank.label())),
        Line::from(format!("Type: {:?}", skill.skill_type)),
        Line::from(format!("Mana Cost: {}", skill.mana_cost)),
        Line::from(format!("Stamina Cost: {}", skill.stamina_cost)),
        Line::from(format!("Cooldown: {} turns", skill.cooldown)),
        Line::from(format!(
            "Required Class: {}",
            skill.required_class.map(|c| c.name()).unwrap_or("None")
        )),
        Line::from(format!("Level Required: {}", skill.level_required)),
        Line::from(format!("Passive: {}", if skill.passive { "Yes" } else { "No" })),
        Line::from(""),
        Line::from(format!("Description: {}", skill.description)),
    ]
}

pub fn draw_skill_list(frame: &mut Frame, area: Rect, app: &App, selected: usize) {
    let skills = app.state.skills();
    let body = match skills.get(selected) {
        None => vec![Line::from("You have no skills yet.")],
        Some(skill) => {
            let mut lines = skill_details(skill);
            lines.push(Line::from(""));
            lines.push(Line::from(format!("[{}/{}]", selected + 1, skills.len())));
            lines
        }
    };
    draw_menu(
        frame,
        area,
        "Skills",
        body,
        "Use UP/DOWN to scroll, 'b' to go back.",
    );
}

pub fn draw_rename_pick(frame: &mut Frame, area: Rect, app: &App) {
    let body = app
        .state
        .skills()
        .iter()
        .enumerate()
        .map(|(i, skill)| Line::from(format!("{}. {}", i + 1, skill.display_name)))
        .collect();
    draw_menu(
        frame,
        area,
        "Rename Skill",
        body,
        "Press a number to pick a skill, 'b' to go back.",
    );
}

pub fn draw_rename_input(frame: &mut Frame, area: Rect, app: &App, skill: SkillId, buffer: &str) {
    let current = app
        .state
        .skills()
        .into_iter()
        .find(|s| s.id == skill)
        .map(|s| s.display_name)
        .unwrap_or_else(|| skill.name().to_string());
    let body = vec![
        Line::from(format!("New name (currently: {}):", current)),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}_", buffer),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Up to {} characters", MAX_SKILL_NAME_LEN),
            hint_style(),
        )),
    ];
    draw_menu(
        frame,
        area,
        "Rename Skill",
        body,
        "[Enter] Rename    [Esc] Cancel",
    );
}

pub fn draw_class_offer(frame: &mut Frame, area: Rect, app: &App, class: ClassPath) {
    let mut body = message_lines(app);
    body.push(Line::from(""));
    body.push(Line::from(Span::styled(
        format!("Do you want to become a {}? Press 'y' to accept.", class),
        title_style(),
    )));
    body.push(Line::from("Your choice of class is permanent."));
    draw_menu(frame, area, "A Path Opens", body, "[y] Accept    any other key declines");
}

pub fn draw_help_menu(frame: &mut Frame, area: Rect) {
    let body = vec![
        Line::from("Explore, fight what lives in the bushes, and level up."),
        Line::from(""),
        Line::from("'P' is you, 'N' is a villager, 'B' is a bush and '*' marks the start."),
        Line::from("Monsters hide in bushes. Villagers hand out quests and class paths."),
        Line::from(""),
        Line::from("Battles run on their own: each round you have one second to pick"),
        Line::from("an action ('a' to attack, 1-9 for a skill). Otherwise you repeat"),
        Line::from("your last action. Skills fall back to attacks after they are used."),
    ];
    draw_menu(frame, area, "Help", body, "Press any key to go back.");
}

pub fn draw_battle_result(frame: &mut Frame, area: Rect, lines: &[String]) {
    let body = lines.iter().map(|l| Line::from(l.clone())).collect();
    draw_menu(frame, area, "Battle Over", body, "Press any key to continue.");
}
