use ratatui::style::{Color, Modifier, Style};

/// Colors and styles for every view. Built once in `main`, then only borrowed.
#[derive(Debug, Clone)]
pub struct Theme {
    pub section_title: Style,
    pub active_tab: Style,
    pub inactive_tab: Style,
    pub divider: Style,
    pub help: Style,
    pub error: Style,
    pub error_help: Style,
    pub item_title: Style,
    pub item_desc: Style,
    pub selected_title: Style,
    pub selected_desc: Style,
    pub loading: Style,
}

const ACCENT: Color = Color::Indexed(86);
const DIM: Color = Color::Indexed(241);
const SUBTLE: Color = Color::Indexed(243);
const ERROR: Color = Color::Indexed(9);

impl Default for Theme {
    fn default() -> Self {
        Self {
            section_title: Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            active_tab: Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            inactive_tab: Style::default().fg(DIM),
            divider: Style::default().fg(DIM),
            help: Style::default().fg(DIM),
            error: Style::default().fg(ERROR),
            error_help: Style::default().fg(SUBTLE),
            item_title: Style::default(),
            item_desc: Style::default().fg(DIM),
            selected_title: Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            selected_desc: Style::default().fg(SUBTLE),
            loading: Style::default().fg(Color::Yellow),
        }
    }
}
