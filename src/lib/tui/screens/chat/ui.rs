//! Chat UI rendering components

use super::state::ChatState;
use crate::domain::{ClientRecord, ResultSet};
use crate::tui::theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, Wrap};

const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];
const MAX_COLUMN_WIDTH: usize = 24;

/// Main chat UI renderer
pub struct ChatUI;

impl ChatUI {
    /// Render the complete chat interface.
    ///
    /// Returns the largest transcript scroll offset for the current size.
    pub fn render(frame: &mut Frame, state: &ChatState, base_url: &str) -> u16 {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),      // Status bar
                Constraint::Min(5),         // Transcript
                Constraint::Percentage(40), // Result table
                Constraint::Length(3),      // Input area
                Constraint::Length(1),      // Help bar
            ])
            .split(area);

        Self::render_status_bar(frame, chunks[0], state, base_url);
        let max_scroll = Self::render_transcript(frame, chunks[1], state);
        Self::render_table(frame, chunks[2], state);
        Self::render_input(frame, chunks[3], state);
        Self::render_help_bar(frame, chunks[4], state);
        max_scroll
    }

    fn render_status_bar(frame: &mut Frame, area: Rect, state: &ChatState, base_url: &str) {
        let loading_indicator = if state.is_loading() {
            Span::styled(
                format!(" {} {} pending ", SPINNER[state.loading_frame], state.pending),
                theme::loading(),
            )
        } else {
            Span::raw("")
        };

        let status_msg = state
            .status_message
            .as_ref()
            .map(|s| Span::styled(format!(" │ {s} "), theme::subtitle()))
            .unwrap_or_else(|| Span::raw(""));

        let status_line = Line::from(vec![
            Span::styled(" 💬 ", theme::title()),
            Span::styled(format!("{base_url} "), theme::text()),
            Span::styled("│ ", theme::border()),
            Span::styled(format!(" {} ", state.shape.as_str()), theme::mode_badge()),
            loading_indicator,
            status_msg,
        ]);

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(theme::border());

        frame.render_widget(Paragraph::new(status_line).block(block), area);
    }

    fn render_transcript(frame: &mut Frame, area: Rect, state: &ChatState) -> u16 {
        let inner_height = area.height.saturating_sub(2) as usize;
        let mut lines: Vec<Line> = Vec::new();

        for turn in state.conversation.turns() {
            let style = if turn.is_user() {
                theme::user_prefix()
            } else {
                theme::ai_prefix()
            };
            let prefix = format!("{}: ", turn.speaker());
            let indent = " ".repeat(prefix.chars().count());

            let mut content = turn.text().lines();
            let first = content.next().unwrap_or("");
            lines.push(Line::from(vec![
                Span::styled(prefix.clone(), style),
                Span::raw(first.to_string()),
            ]));
            for line in content {
                lines.push(Line::from(format!("{indent}{line}")));
            }
            lines.push(Line::from(""));
        }

        if state.is_loading() {
            lines.push(Line::from(Span::styled(
                format!(
                    "{}: {} Thinking...",
                    state.conversation.assistant_label(),
                    SPINNER[state.loading_frame]
                ),
                theme::loading(),
            )));
        }

        let inner_width = area.width.saturating_sub(2) as usize;
        let rows: usize = lines
            .iter()
            .map(|line| {
                let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
                wrapped_rows(&text, inner_width)
            })
            .sum();
        let max_scroll = rows.saturating_sub(inner_height).min(u16::MAX as usize) as u16;
        let scroll = state.scroll_offset.min(max_scroll);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border())
            .title(" Conversation ");

        let para = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));
        frame.render_widget(para, area);
        max_scroll
    }

    fn render_table(frame: &mut Frame, area: Rect, state: &ChatState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border());

        match state.conversation.result_set() {
            None => {
                let para = Paragraph::new("Ask about a client to fill this table.")
                    .style(theme::subtitle())
                    .alignment(Alignment::Center)
                    .block(block.title(" Clients "));
                frame.render_widget(para, area);
            }
            Some(records) if records.is_empty() => {
                let para = Paragraph::new("No data found.")
                    .style(theme::subtitle())
                    .alignment(Alignment::Center)
                    .block(block.title(" Clients (0) "));
                frame.render_widget(para, area);
            }
            Some(records) => {
                let headers = ClientRecord::headers(state.show_company);
                let widths = column_widths(records, state.show_company);
                let header = Row::new(headers).style(theme::title());
                let rows = records
                    .iter()
                    .map(|record| Row::new(record.cells(state.show_company)).style(theme::text()));

                let table = Table::new(rows, widths)
                    .header(header)
                    .column_spacing(1)
                    .block(block.title(format!(" Clients ({}) ", records.len())));
                frame.render_widget(table, area);
            }
        }
    }

    fn render_input(frame: &mut Frame, area: Rect, state: &ChatState) {
        let display_input = if state.input.is_empty() {
            "Type your message...".to_string()
        } else {
            let mut chars: Vec<char> = state.input.chars().collect();
            if state.cursor_pos >= chars.len() {
                chars.push('_');
            } else {
                chars.insert(state.cursor_pos, '|');
            }
            chars.into_iter().collect()
        };

        let input_style = if state.input.is_empty() {
            theme::subtitle()
        } else {
            theme::text()
        };

        let input_line = Line::from(vec![
            Span::styled("> ", theme::user_prefix()),
            Span::styled(display_input, input_style),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_active())
            .title(if state.is_command() {
                " Command "
            } else {
                " Message "
            });

        frame.render_widget(Paragraph::new(input_line).block(block), area);
    }

    fn render_help_bar(frame: &mut Frame, area: Rect, state: &ChatState) {
        let mut spans = vec![
            Span::styled(" Enter", theme::key_hint()),
            Span::styled(": Send │ ", theme::footer()),
            Span::styled("/help", theme::key_hint()),
            Span::styled(": Commands │ ", theme::footer()),
            Span::styled("PageUp/Down", theme::key_hint()),
            Span::styled(": Scroll │ ", theme::footer()),
            Span::styled("Ctrl+Q", theme::key_destructive()),
            Span::styled(": Exit ", theme::footer()),
        ];
        if state.is_loading() {
            spans.push(Span::styled("│ waiting for replies ", theme::loading()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn column_widths(records: &ResultSet, show_company: bool) -> Vec<Constraint> {
    ClientRecord::headers(show_company)
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let widest = records
                .iter()
                .map(|record| record.cells(show_company)[idx].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
                .min(MAX_COLUMN_WIDTH);
            Constraint::Length(widest as u16)
        })
        .collect()
}

/// Rows a line occupies once word-wrapped to `width` columns
fn wrapped_rows(text: &str, width: usize) -> usize {
    if width == 0 {
        return 1;
    }
    let mut rows = 1;
    let mut current = 0;
    for word in text.split(' ') {
        let len = word.chars().count();
        let needed = if current == 0 { len } else { current + 1 + len };
        if needed <= width {
            current = needed;
        } else if len <= width {
            rows += 1;
            current = len;
        } else {
            // Words wider than the view are broken across rows
            if current > 0 {
                rows += 1;
            }
            rows += (len - 1) / width;
            current = len - (len - 1) / width * width;
        }
    }
    rows
}
