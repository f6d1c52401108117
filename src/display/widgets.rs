//! Stage track widget rendering

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::domain::STAGE_COUNT;

use super::track::{PositionStatus, StagePosition, StageTrackView};

/// Rows the track needs: markers, index digits, caption
pub const TRACK_HEIGHT: u16 = 3;

/// Draws a [`StageTrackView`] as a three-row progress track
pub struct StageTrack<'a> {
    view: &'a StageTrackView,
}

impl<'a> StageTrack<'a> {
    pub fn new(view: &'a StageTrackView) -> Self {
        StageTrack { view }
    }
}

impl Widget for StageTrack<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let caption = format!(
            "{}/{} {} ({:.0}%)",
            self.view.current.index() + 1,
            STAGE_COUNT,
            self.view.active_label(),
            self.view.fill_ratio * 100.0
        );

        if (area.width as usize) < STAGE_COUNT {
            buf.set_stringn(area.x, area.y, &caption, area.width as usize, Style::default());
            return;
        }

        let columns = marker_columns(area.width);
        let active_column = columns[self.view.current.index()];

        // Connector
        for offset in 0..area.width {
            let (symbol, style) = if offset <= active_column {
                ("━", Style::default().fg(Color::Green))
            } else {
                ("─", Style::default().fg(Color::DarkGray))
            };
            buf.set_string(area.x + offset, area.y, symbol, style);
        }

        // Markers and index digits
        for (position, &column) in self.view.positions.iter().zip(columns.iter()) {
            let (symbol, style) = marker(position);
            buf.set_string(area.x + column, area.y, symbol, style);

            if area.height > 1 {
                let digit = position.stage.index().to_string();
                let digit_style = if position.affordant {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                buf.set_string(area.x + column, area.y + 1, digit, digit_style);
            }
        }

        if area.height > 2 {
            buf.set_stringn(
                area.x,
                area.y + 2,
                &caption,
                area.width as usize,
                Style::default().add_modifier(Modifier::BOLD),
            );
        }
    }
}

/// Symbol and style for one stage marker
fn marker(position: &StagePosition) -> (&'static str, Style) {
    let (symbol, mut style) = match position.status {
        PositionStatus::Completed => ("●", Style::default().fg(Color::Green)),
        PositionStatus::Active => ("◉", Style::default().fg(Color::Cyan)),
        PositionStatus::Upcoming => ("○", Style::default().fg(Color::White)),
    };
    if position.affordant {
        // pulsing hint on clickable stages
        style = style.fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK);
    }
    if position.flashing {
        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
    }
    (symbol, style)
}

/// Evenly spaced marker columns from the left edge to the right edge
pub fn marker_columns(width: u16) -> Vec<u16> {
    let span = width.saturating_sub(1) as usize;
    (0..STAGE_COUNT)
        .map(|i| ((i * span + (STAGE_COUNT - 1) / 2) / (STAGE_COUNT - 1)) as u16)
        .collect()
}

/// Render the track off-screen and return its rows as plain text
pub fn render_to_lines(view: &StageTrackView, width: u16) -> Vec<String> {
    let area = Rect::new(0, 0, width, TRACK_HEIGHT);
    let mut buf = Buffer::empty(area);
    StageTrack::new(view).render(area, &mut buf);

    (0..area.height)
        .map(|y| {
            let row: String = (0..area.width)
                .filter_map(|x| buf.cell((x, y)).map(|cell| cell.symbol().to_string()))
                .collect();
            row.trim_end().to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::FillFlash;
    use crate::schemas::{Role, Stage};
    use chrono::{Duration, Utc};

    fn view(stage: Stage, role: Role) -> StageTrackView {
        StageTrackView::build(stage, role, None, Utc::now())
    }

    #[test]
    fn test_marker_columns_span_width() {
        let columns = marker_columns(61);
        assert_eq!(columns.len(), STAGE_COUNT);
        assert_eq!(columns[0], 0);
        assert_eq!(columns[3], 30);
        assert_eq!(columns[6], 60);
        assert!(columns.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_render_marks_completed_active_upcoming() {
        let lines = render_to_lines(&view(Stage::WaitingApproval, Role::Client), 61);
        assert_eq!(lines.len(), 3);

        let markers: Vec<char> = lines[0]
            .chars()
            .filter(|c| matches!(c, '●' | '◉' | '○'))
            .collect();
        assert_eq!(markers, vec!['●', '●', '◉', '○', '○', '○', '○']);
        assert!(lines[2].starts_with("3/7 Waiting Approval"));
    }

    #[test]
    fn test_render_filled_connector_stops_at_active() {
        let lines = render_to_lines(&view(Stage::RepairInProgress, Role::Client), 61);
        let row: Vec<char> = lines[0].chars().collect();
        assert_eq!(row[29], '━');
        assert_eq!(row[30], '◉');
        assert_eq!(row[31], '─');
    }

    #[test]
    fn test_render_index_row() {
        let lines = render_to_lines(&view(Stage::CheckedIn, Role::Staff), 61);
        let digits: String = lines[1].chars().filter(|c| !c.is_whitespace()).collect();
        assert_eq!(digits, "0123456");
    }

    #[test]
    fn test_affordant_marker_is_highlighted() {
        let track = view(Stage::Diagnosing, Role::Staff);
        let area = Rect::new(0, 0, 61, TRACK_HEIGHT);
        let mut buf = Buffer::empty(area);
        StageTrack::new(&track).render(area, &mut buf);

        let next = buf.cell((marker_columns(61)[2], 0)).unwrap();
        assert_eq!(next.fg, Color::Yellow);
        assert!(next.modifier.contains(Modifier::SLOW_BLINK));

        let later = buf.cell((marker_columns(61)[3], 0)).unwrap();
        assert!(!later.modifier.contains(Modifier::SLOW_BLINK));
    }

    #[test]
    fn test_flashing_marker_is_reversed() {
        let now = Utc::now();
        let flash = FillFlash::start(Stage::Diagnosing, now, Duration::seconds(1));
        let track = StageTrackView::build(Stage::Diagnosing, Role::Client, Some(&flash), now);
        let area = Rect::new(0, 0, 61, TRACK_HEIGHT);
        let mut buf = Buffer::empty(area);
        StageTrack::new(&track).render(area, &mut buf);

        let active = buf.cell((marker_columns(61)[1], 0)).unwrap();
        assert!(active.modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_narrow_area_shows_caption_only() {
        let lines = render_to_lines(&view(Stage::Completed, Role::Owner), 5);
        assert_eq!(lines[0], "7/7 C");
    }
}
