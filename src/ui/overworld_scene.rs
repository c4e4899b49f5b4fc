use crate::app::App;
use crate::core::constants::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::quests::types::Coord;
use crate::zones::data::{terrain_at, Terrain};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draws the map viewport centred on the player, with the status line,
/// controls and any messages underneath.
pub fn draw_overworld_scene(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(VIEWPORT_HEIGHT as u16 + 2), // Map
            Constraint::Length(1),                          // Status
            Constraint::Length(2),                          // Controls
            Constraint::Min(3),                             // Messages
        ])
        .split(area);

    draw_map(frame, chunks[0], app);

    let stats = &app.state.stats;
    let class = stats
        .class_path
        .map(|c| c.name())
        .unwrap_or("Adventurer");
    let status = Line::from(vec![
        Span::styled(
            format!("Level: {} {}", stats.level, class),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "  XP: {}/{}  Skill Pts: {}  Pos: {}",
            stats.xp,
            stats.xp_threshold(),
            stats.skill_points,
            app.state.position
        )),
    ]);
    frame.render_widget(Paragraph::new(status), chunks[1]);

    let controls = Paragraph::new(
        "Arrows = move | q = quit | u = upgrade | i = inventory | k = skill rename | p = skill window | s = save | l = load | h = help",
    )
    .style(Style::default().fg(Color::Gray))
    .wrap(Wrap { trim: true });
    frame.render_widget(controls, chunks[2]);

    let messages: Vec<Line> = app.messages.iter().map(|m| Line::from(m.as_str())).collect();
    frame.render_widget(
        Paragraph::new(messages).wrap(Wrap { trim: true }),
        chunks[3],
    );
}

fn draw_map(frame: &mut Frame, area: Rect, app: &App) {
    let player = app.state.position;
    let top_left = player.offset(-VIEWPORT_WIDTH / 2, -VIEWPORT_HEIGHT / 2);

    let lines: Vec<Line> = (0..VIEWPORT_HEIGHT)
        .map(|row| {
            let spans: Vec<Span> = (0..VIEWPORT_WIDTH)
                .map(|col| {
                    let at = top_left.offset(col, row);
                    tile_span(app, at, player)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let map = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("World"));
    frame.render_widget(map, area);
}

fn tile_span(app: &App, at: Coord, player: Coord) -> Span<'static> {
    if at == player {
        return Span::styled(
            "P ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        );
    }
    if app.state.npcs.contains(at) {
        return Span::styled("N ", Style::default().fg(Color::Cyan));
    }
    let terrain = terrain_at(&app.zones, at);
    let style = match terrain {
        Terrain::Road => Style::default().fg(Color::Green),
        Terrain::Bush => Style::default().fg(Color::LightGreen),
        Terrain::Origin => Style::default().fg(Color::White),
        Terrain::Grass => Style::default().fg(Color::DarkGray),
    };
    Span::styled(format!("{} ", terrain.glyph()), style)
}
