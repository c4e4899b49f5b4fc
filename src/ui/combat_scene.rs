use crate::combat::logic::{Action, CombatView};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Draws one frame of a battle: both HP bars, the skill bar and the round log.
pub fn draw_combat_scene(frame: &mut Frame, area: Rect, view: &CombatView<'_>) {
    let title = format!("Battle - Turn {}", view.turn + 1);
    let combat_block = Block::default().borders(Borders::ALL).title(title);

    let inner = combat_block.inner(area);
    frame.render_widget(combat_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Monster HP bar
            Constraint::Length(3), // Player HP bar
            Constraint::Length(1), // Mana
            Constraint::Min(4),    // Skills
            Constraint::Length(4), // Round log
            Constraint::Length(1), // Controls
        ])
        .split(inner);

    draw_monster_hp(frame, chunks[0], view);
    draw_player_hp(frame, chunks[1], view);
    draw_mana(frame, chunks[2], view);
    draw_skills(frame, chunks[3], view);
    draw_log(frame, chunks[4], view);

    let controls = Paragraph::new("[a] Attack   [1-9] Skill   (no key repeats your last action)")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(controls, chunks[5]);
}

fn ratio(current: u32, max: u32) -> f64 {
    if max == 0 {
        0.0
    } else {
        (current as f64 / max as f64).clamp(0.0, 1.0)
    }
}

fn draw_monster_hp(frame: &mut Frame, area: Rect, view: &CombatView<'_>) {
    let monster = view.monster;
    let color = if monster.elite {
        Color::Magenta
    } else {
        Color::Red
    };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} (Lv {})", monster.name, monster.level)),
        )
        .gauge_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .label(format!("HP: {}/{}", view.monster_hp, monster.hp))
        .ratio(ratio(view.monster_hp, monster.hp));
    frame.render_widget(gauge, area);
}

fn draw_player_hp(frame: &mut Frame, area: Rect, view: &CombatView<'_>) {
    let hp_ratio = ratio(view.player_hp, view.player_max_hp);
    let hp_color = if hp_ratio > 0.66 {
        Color::Green
    } else if hp_ratio > 0.33 {
        Color::Yellow
    } else {
        Color::Red
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("You"))
        .gauge_style(Style::default().fg(hp_color).add_modifier(Modifier::BOLD))
        .label(format!("HP: {}", view.player_hp))
        .ratio(hp_ratio);
    frame.render_widget(gauge, area);
}

fn draw_mana(frame: &mut Frame, area: Rect, view: &CombatView<'_>) {
    let mut spans = vec![Span::styled(
        format!("Mana: {}/{}", view.current_mana, view.max_mana),
        Style::default().fg(Color::Blue),
    )];
    if view.empowered {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "EMPOWERED",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_skills(frame: &mut Frame, area: Rect, view: &CombatView<'_>) {
    let mut lines = Vec::new();
    let attack_style = if view.last_action == Action::Attack {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    lines.push(Line::from(Span::styled("[a] Attack", attack_style)));

    for (i, skill) in view.skills.iter().enumerate().take(9) {
        let cooldown = view.cooldowns.get(&skill.id).copied().unwrap_or(0);
        let status = if cooldown > 0 {
            format!("cooldown {}", cooldown)
        } else if view.current_mana < skill.mana_cost {
            "no mana".to_string()
        } else {
            "ready".to_string()
        };
        let style = if view.last_action == Action::Skill(skill.id) {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else if status == "ready" {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(Span::styled(
            format!(
                "[{}] {} (MP {}) - {}",
                i + 1,
                skill.display_name,
                skill.mana_cost,
                status
            ),
            style,
        )));
    }

    let skills = Paragraph::new(lines).block(Block::default().borders(Borders::TOP).title("Actions"));
    frame.render_widget(skills, area);
}

fn draw_log(frame: &mut Frame, area: Rect, view: &CombatView<'_>) {
    let lines: Vec<Line> = view
        .log
        .iter()
        .map(|event| Line::from(event.message()))
        .collect();
    let log = Paragraph::new(lines)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    frame.render_widget(log, area);
}
