use std::sync::Arc;

use ratatui::text::{Line, Span, Text};
use tracing::{debug, warn};

use crate::markdown::DocumentRenderer;
use crate::theme::Theme;
use crate::types::Profile;

const DIVIDER_WIDTH: usize = 50;

#[derive(Debug, Clone)]
struct RenderCache {
    width: u16,
    text: Text<'static>,
}

/// Scrollable view of the profile fields, social links and README.
///
/// The README is rendered lazily and cached per width: `prepare` only calls
/// the renderer the first time and after the width changed.
#[derive(Debug)]
pub struct ProfileView {
    profile: Arc<Profile>,
    renderer: Arc<dyn DocumentRenderer>,
    width: u16,
    height: u16,
    cache: Option<RenderCache>,
    scroll: u16,
}

impl ProfileView {
    pub fn new(profile: Arc<Profile>, renderer: Arc<dyn DocumentRenderer>) -> Self {
        Self {
            profile,
            renderer,
            width: 80,
            height: 0,
            cache: None,
            scroll: 0,
        }
    }

    pub fn set_size(&mut self, width: u16, height: u16) {
        if width != self.width {
            self.width = width;
            self.cache = None;
        }
        self.height = height;
        self.clamp_scroll();
    }

    #[cfg(test)]
    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Renders the README for the current width unless a cached copy exists.
    pub fn prepare(&mut self) {
        let Some(readme) = self.profile.readme.as_deref() else {
            return;
        };
        if self.cache.as_ref().is_some_and(|c| c.width == self.width) {
            return;
        }

        debug!(width = self.width, "rendering README");
        let text = match self.renderer.render(readme, self.width) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "README render failed");
                Text::from(format!("Error rendering markdown: {}", e))
            }
        };
        self.cache = Some(RenderCache {
            width: self.width,
            text,
        });
        self.clamp_scroll();
    }

    /// Prepares the README if needed and returns the full view.
    #[cfg(test)]
    pub fn view(&mut self, theme: &Theme) -> Text<'static> {
        self.prepare();
        self.content(theme)
    }

    /// Full view from the current cache; a README that was never prepared is left out.
    pub fn content(&self, theme: &Theme) -> Text<'static> {
        let p = &self.profile;
        let mut lines: Vec<Line<'static>> = Vec::new();

        lines.push(Line::from(Span::styled("Info", theme.section_title)));
        let fields = [
            ("Name", &p.name),
            ("Login", &p.login),
            ("Bio", &p.bio),
            ("Pronouns", &p.pronouns),
            ("Company", &p.company),
            ("Location", &p.location),
            ("Website", &p.website_url),
        ];
        for (label, value) in fields {
            if !value.is_empty() {
                lines.push(Line::from(format!("{}: {}", label, value)));
            }
        }
        lines.push(Line::from(format!(
            "Followers: {} · Following: {}",
            p.followers, p.following
        )));
        lines.push(Line::default());

        if !p.social.is_empty() {
            lines.push(Line::from(Span::styled(
                "Social accounts",
                theme.section_title,
            )));
            for account in &p.social {
                lines.push(Line::from(format!("{}: {}", account.provider, account.url)));
            }
            lines.push(Line::default());
        }

        if p.readme.is_some() {
            lines.push(Line::from(Span::styled(
                "─".repeat(DIVIDER_WIDTH),
                theme.divider,
            )));
            lines.push(Line::default());
            if let Some(cache) = &self.cache {
                lines.extend(cache.text.lines.iter().cloned());
            }
        }

        Text::from(lines)
    }

    pub fn scroll_up(&mut self, n: u16) {
        self.scroll = self.scroll.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: u16) {
        self.scroll = self.scroll.saturating_add(n);
        self.clamp_scroll();
    }

    pub fn scroll_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    pub fn page(&self) -> u16 {
        self.height.max(1)
    }

    fn line_count(&self) -> usize {
        let p = &self.profile;
        let fields = [
            &p.name,
            &p.login,
            &p.bio,
            &p.pronouns,
            &p.company,
            &p.location,
            &p.website_url,
        ];
        // title + non-empty fields + followers + blank
        let mut n = 3 + fields.iter().filter(|f| !f.is_empty()).count();
        if !p.social.is_empty() {
            n += p.social.len() + 2;
        }
        if p.readme.is_some() {
            n += 2 + self.cache.as_ref().map_or(0, |c| c.text.lines.len());
        }
        n
    }

    fn max_scroll(&self) -> u16 {
        let max = self.line_count().saturating_sub(self.height as usize);
        u16::try_from(max).unwrap_or(u16::MAX)
    }

    fn clamp_scroll(&mut self) {
        // Length is unknown until the README is rendered again; `prepare` clamps then.
        if self.profile.readme.is_some() && self.cache.is_none() {
            return;
        }
        self.scroll = self.scroll.min(self.max_scroll());
    }
}
