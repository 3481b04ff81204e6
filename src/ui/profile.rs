use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;
use crate::theme::Theme;

pub fn render(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let content = app.profile_view.content(theme);
    let view = Paragraph::new(content).scroll((app.profile_view.scroll(), 0));
    frame.render_widget(view, area);
}
