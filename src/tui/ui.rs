use std::str::FromStr;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph, Tabs},
    Frame,
};

use crate::clock::{format, ModeKind};

use super::app::{App, Focus};

const ACCENT: Color = Color::Magenta;
const FALLBACK_MODE_COLOR: Color = Color::LightRed;
const RUNNING_COLOR: Color = Color::Rgb(0xDC, 0x26, 0x26);

pub struct Regions {
    pub player: Option<Rect>,
    pub timer: Option<Rect>,
    pub footer: Rect,
}

pub fn regions(area: Rect, app: &App) -> Regions {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(2)])
        .split(area);

    let (player, timer) = match (app.shows_player(), app.shows_timer()) {
        (true, true) => {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(rows[0]);
            (Some(cols[0]), Some(cols[1]))
        }
        (true, false) => (Some(rows[0]), None),
        _ => (None, Some(rows[0])),
    };

    Regions {
        player,
        timer,
        footer: rows[1],
    }
}

fn panel(title: &str, focused: bool) -> Block<'static> {
    let border = if focused { ACCENT } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(border).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center)
}

/// Rows inside the player panel: title, artist, gap, seek bar, times, gap,
/// state, gap, volume.
fn player_rows(inner: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner)
}

/// Screen area of the clickable seek bar, when the player is visible.
pub fn seek_bar(area: Rect, app: &App) -> Option<Rect> {
    let player = regions(area, app).player?;
    let inner = panel("", false).inner(player);
    Some(player_rows(inner)[3])
}

pub fn mode_color(app: &App, kind: ModeKind) -> Color {
    app.timer
        .modes()
        .find(|(k, _)| *k == kind)
        .and_then(|(_, mode)| Color::from_str(&mode.color).ok())
        .unwrap_or(FALLBACK_MODE_COLOR)
}

pub fn draw(f: &mut Frame, app: &App) {
    let regions = regions(f.area(), app);

    if let Some(area) = regions.player {
        draw_player(f, app, area);
    }
    if let Some(area) = regions.timer {
        draw_timer(f, app, area);
    }
    draw_footer(f, app, regions.footer);
}

fn draw_player(f: &mut Frame, app: &App, area: Rect) {
    let block = panel("Now Playing", app.focus == Focus::Player);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = player_rows(inner);
    let track = app.player.track();

    f.render_widget(
        Paragraph::new(track.title.as_str())
            .style(Style::default().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        rows[0],
    );
    f.render_widget(
        Paragraph::new(track.artist.as_str())
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        rows[1],
    );

    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(ACCENT).bg(Color::Black))
            .ratio(app.player.progress())
            .label(""),
        rows[3],
    );

    let times = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[4]);
    f.render_widget(
        Paragraph::new(app.player_elapsed()).style(Style::default().fg(Color::DarkGray)),
        times[0],
    );
    f.render_widget(
        Paragraph::new(app.player_total())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Right),
        times[1],
    );

    let (state, color) = if app.player.is_playing() {
        ("▶ Playing", Color::Green)
    } else {
        ("⏸ Paused", Color::Yellow)
    };
    f.render_widget(
        Paragraph::new(state)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        rows[6],
    );

    let volume = app.player.state().volume;
    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Gray).bg(Color::Black))
            .ratio(volume)
            .label(format!("vol {}%", format::percent(volume))),
        rows[8],
    );
}

fn draw_timer(f: &mut Frame, app: &App, area: Rect) {
    let block = panel("🍅 Timer", app.focus == Focus::Timer);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let active = app.timer.active_kind();
    let color = mode_color(app, active);

    let titles: Vec<Line> = ModeKind::ALL
        .iter()
        .map(|kind| Line::from(kind.label()))
        .collect();
    f.render_widget(
        Tabs::new(titles)
            .select(app.timer.active_index())
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .divider("│"),
        rows[0],
    );

    f.render_widget(
        Paragraph::new(app.timer_display())
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        rows[2],
    );

    let status_color = if app.timer.is_running() {
        RUNNING_COLOR
    } else {
        Color::Gray
    };
    f.render_widget(
        Paragraph::new(app.timer_status())
            .style(Style::default().fg(status_color))
            .alignment(Alignment::Center),
        rows[3],
    );

    let progress = app.timer.progress();
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw("Progress "),
            Span::styled(
                format!("{}%", format::percent(progress)),
                Style::default().fg(color),
            ),
        ])),
        rows[5],
    );
    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(color).bg(Color::Black))
            .ratio(progress)
            .label(""),
        rows[6],
    );

    f.render_widget(
        Paragraph::new(format!(
            "Focus sessions completed: {}",
            app.timer.completed_focus_sessions()
        ))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center),
        rows[8],
    );
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let key = |k: &'static str| {
        Span::styled(k, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
    };

    let mut hints = vec![key("Space"), Span::raw(" Play/Pause  ")];
    if app.shows_player() && app.shows_timer() {
        hints.extend([key("Tab"), Span::raw(" Focus  ")]);
    }
    if app.shows_player() {
        hints.extend([
            key("←/→"),
            Span::raw(" Skip  "),
            key("+/-"),
            Span::raw(" Volume  "),
        ]);
    }
    if app.shows_timer() {
        hints.extend([
            key("R"),
            Span::raw(" Reset  "),
            key("1-3"),
            Span::raw(" Mode  "),
            key("M"),
            Span::raw(" Next mode  "),
        ]);
    }
    hints.extend([key("Q"), Span::raw(" Quit")]);

    let message = app.message.clone().unwrap_or_default();
    let lines = vec![
        Line::from(Span::styled(message, Style::default().fg(Color::Green))),
        Line::from(hints),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
