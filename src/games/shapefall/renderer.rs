use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Circle, Rectangle},
        Block, Borders, Clear, Paragraph,
    },
    Frame,
};

use super::game::{GameSession, ShapeKind, CIRCLE_RADIUS, MISS_LINE, RECT_SIZE};

pub const SHAPE_COLOR: Color = Color::Rgb(0xF4, 0xD0, 0x3F);
pub const BACKGROUND: Color = Color::Rgb(0x2C, 0x3E, 0x50);
pub const GAME_OVER_COLOR: Color = Color::Rgb(0xE7, 0x4C, 0x3C);
pub const BUTTON_COLOR: Color = Color::Rgb(0x34, 0x98, 0xDB);

const RESTART_LABEL: &str = " Restart Game ";
const POPUP_WIDTH: u16 = 30;
const POPUP_HEIGHT: u16 = 6;

/// Where things landed on the last frame, used to route clicks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub playfield: Rect,
    pub restart_button: Option<Rect>,
}

impl ScreenLayout {
    /// Maps a terminal cell to playfield percent, measured at the cell center.
    pub fn to_playfield(&self, col: u16, row: u16) -> Option<(f64, f64)> {
        let field = self.playfield;
        if field.is_empty() || !field.contains(Position::new(col, row)) {
            return None;
        }
        let px = (f64::from(col - field.x) + 0.5) * 100.0 / f64::from(field.width);
        let py = (f64::from(row - field.y) + 0.5) * 100.0 / f64::from(field.height);
        Some((px, py))
    }

    /// Half a cell on each axis, in playfield percent
    pub fn cell_slack(&self) -> (f64, f64) {
        if self.playfield.is_empty() {
            return (0.0, 0.0);
        }
        (
            50.0 / f64::from(self.playfield.width),
            50.0 / f64::from(self.playfield.height),
        )
    }

    pub fn hits_restart(&self, col: u16, row: u16) -> bool {
        self.restart_button
            .is_some_and(|button| button.contains(Position::new(col, row)))
    }
}

/// Draws the session and reports the resulting layout.
pub fn draw(frame: &mut Frame, session: &GameSession) -> ScreenLayout {
    let [status_area, field_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(frame.area());

    let status = if session.is_over() {
        Line::from("[R] Restart  [Q] Quit").style(Style::default().fg(Color::Gray))
    } else {
        Line::from(format!("Score: {}", session.score()))
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
    };
    frame.render_widget(Paragraph::new(status).alignment(Alignment::Center), status_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" SHAPEFALL ")
        .style(Style::default().bg(BACKGROUND));
    let playfield = block.inner(field_area);

    // Canvas y grows upwards, session y grows downwards
    let canvas = Canvas::default()
        .block(block)
        .background_color(BACKGROUND)
        .marker(Marker::Braille)
        .x_bounds([0.0, 100.0])
        .y_bounds([0.0, MISS_LINE])
        .paint(|ctx| {
            for object in session.objects() {
                match object.shape {
                    ShapeKind::Circle => ctx.draw(&Circle {
                        x: object.x,
                        y: MISS_LINE - object.y,
                        radius: CIRCLE_RADIUS,
                        color: SHAPE_COLOR,
                    }),
                    ShapeKind::Rect => ctx.draw(&Rectangle {
                        x: object.x,
                        y: MISS_LINE - object.y - RECT_SIZE,
                        width: RECT_SIZE,
                        height: RECT_SIZE,
                        color: SHAPE_COLOR,
                    }),
                }
            }
        });
    frame.render_widget(canvas, field_area);

    let restart_button = session
        .is_over()
        .then(|| draw_game_over(frame, field_area, session.score()));

    ScreenLayout { playfield, restart_button }
}

fn draw_game_over(frame: &mut Frame, area: Rect, score: u32) -> Rect {
    let popup = centered(area, POPUP_WIDTH, POPUP_HEIGHT);
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let [title, final_score, _, button_row] = Layout::vertical([Constraint::Length(1); 4]).areas(inner);
    frame.render_widget(
        Paragraph::new("Game Over!")
            .alignment(Alignment::Center)
            .style(Style::default().fg(GAME_OVER_COLOR).add_modifier(Modifier::BOLD)),
        title,
    );
    frame.render_widget(
        Paragraph::new(format!("Final Score: {score}"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        final_score,
    );

    let button = centered(button_row, RESTART_LABEL.len() as u16, 1);
    frame.render_widget(
        Paragraph::new(RESTART_LABEL).style(Style::default().bg(BUTTON_COLOR).fg(Color::White)),
        button,
    );
    button
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
