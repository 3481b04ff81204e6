use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{List, ListItem, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::fetch::TabLoadState;
use crate::repo_list::{RepoList, HEADING_HEIGHT};
use crate::theme::Theme;

pub fn render(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    match app.current_state() {
        Some(TabLoadState::Failed(err)) => {
            let lines = vec![
                Line::from(Span::styled(err.headline.clone(), theme.error)),
                Line::from(Span::styled(err.message.clone(), theme.error_help)),
                Line::default(),
                Line::from(Span::styled("Press r to retry", theme.error_help)),
            ];
            frame.render_widget(Paragraph::new(lines), area);
        }
        Some(TabLoadState::Loaded(_)) => match app.current_list() {
            Some(list) => render_list(frame, list, theme, area),
            None => render_loading(frame, theme, area),
        },
        _ => render_loading(frame, theme, area),
    }
}

fn render_loading(frame: &mut Frame, theme: &Theme, area: Rect) {
    let loading = Paragraph::new(Span::styled("Loading...", theme.loading));
    frame.render_widget(loading, area);
}

fn render_list(frame: &mut Frame, list: &RepoList, theme: &Theme, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(HEADING_HEIGHT), Constraint::Min(0)])
        .split(area);

    let heading = Paragraph::new(Span::styled(list.heading(), theme.section_title));
    frame.render_widget(heading, chunks[0]);

    if list.is_empty() {
        let empty = Paragraph::new(Span::styled("No repositories", theme.item_desc));
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let cursor = list.cursor();
    let items: Vec<ListItem> = list
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let (title_style, desc_style) = if cursor == Some(i) {
                (theme.selected_title, theme.selected_desc)
            } else {
                (theme.item_title, theme.item_desc)
            };

            ListItem::new(Text::from(vec![
                Line::from(Span::styled(item.title(), title_style)),
                Line::from(Span::styled(item.description(), desc_style)),
                Line::default(),
            ]))
        })
        .collect();

    let widget = List::new(items).highlight_symbol("│ ");
    let mut state = list.state();
    frame.render_stateful_widget(widget, chunks[1], &mut state);
}
