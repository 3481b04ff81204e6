mod profile;
mod repo_list;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Tabs};
use ratatui::Frame;

use crate::app::App;
use crate::fetch::TabLoadState;
use crate::tabs::TabKind;
use crate::theme::Theme;

pub fn render(frame: &mut Frame, app: &App, theme: &Theme) {
    if !app.ready {
        frame.render_widget(Paragraph::new("\n  Initializing..."), frame.area());
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_tabs(frame, app, theme, chunks[0]);

    match app.tabs.current().kind {
        TabKind::Info => profile::render(frame, app, theme, chunks[2]),
        TabKind::List(_) => repo_list::render(frame, app, theme, chunks[2]),
    }

    render_help(frame, app, theme, chunks[4]);
}

fn render_tabs(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let tabs = Tabs::new(app.tabs.titles().map(str::to_string))
        .select(app.tabs.index())
        .style(theme.inactive_tab)
        .highlight_style(theme.active_tab)
        .divider("  ")
        .padding("", "");

    frame.render_widget(tabs, area);
}

fn help_text(app: &App) -> &'static str {
    match app.current_state() {
        None => "←/→: Switch tabs • ↑/↓: Scroll • q: Quit",
        Some(TabLoadState::Failed(_)) => "r: Retry • ←/→: Switch tabs • q: Quit",
        Some(_) => "↑/↓: Navigate • enter: Open in browser • ←/→: Switch tabs • q: Quit",
    }
}

fn render_help(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let help = Paragraph::new(Line::from(Span::styled(help_text(app), theme.help)));
    frame.render_widget(help, area);
}
