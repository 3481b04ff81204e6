use ratatui::widgets::ListState;

use crate::types::{ListKind, Repository};

/// One row of a repository list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListItem {
    Repository { repo: Repository, kind: ListKind },
}

impl ListItem {
    /// `name`, or `owner/name` for contributed repositories, plus `(language)`.
    pub fn title(&self) -> String {
        let ListItem::Repository { repo, kind } = self;
        let name = if kind.shows_owner() {
            format!("{}/{}", repo.owner, repo.name)
        } else {
            repo.name.clone()
        };

        match repo.language.as_deref() {
            Some(lang) if !lang.is_empty() => format!("{} ({})", name, lang),
            _ => name,
        }
    }

    pub fn description(&self) -> String {
        let ListItem::Repository { repo, .. } = self;
        let desc = match repo.description.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => "No description",
        };
        format!("{} ({} stars)", desc, repo.stars)
    }

    /// Text matched when the list is filtered.
    #[cfg(test)]
    pub fn filter_value(&self) -> &str {
        let ListItem::Repository { repo, .. } = self;
        &repo.name
    }

    pub fn url(&self) -> &str {
        let ListItem::Repository { repo, .. } = self;
        &repo.url
    }
}

/// Rows above the items: the heading and a gap.
pub const HEADING_HEIGHT: u16 = 2;

/// Rows one item takes: title, description and a blank separator.
const ITEM_HEIGHT: u16 = 3;

/// Selectable list of repositories for one list tab.
#[derive(Debug, Clone)]
pub struct RepoList {
    kind: ListKind,
    items: Vec<ListItem>,
    state: ListState,
    selected: Option<usize>,
    visible: usize,
}

impl RepoList {
    pub fn new(repos: &[Repository], kind: ListKind) -> Self {
        let items: Vec<ListItem> = repos
            .iter()
            .cloned()
            .map(|repo| ListItem::Repository { repo, kind })
            .collect();

        let mut state = ListState::default();
        if !items.is_empty() {
            state.select(Some(0));
        }

        Self {
            kind,
            items,
            state,
            selected: None,
            visible: 1,
        }
    }

    pub fn heading(&self) -> &'static str {
        self.kind.heading()
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.state.selected()
    }

    /// Index of the first visible item.
    #[cfg(test)]
    pub fn offset(&self) -> usize {
        self.state.offset()
    }

    /// Ratatui state for drawing. The offset is kept here, so the view only
    /// scrolls when the cursor leaves it.
    pub fn state(&self) -> ListState {
        self.state.clone()
    }

    /// Item last activated with Enter, if any.
    pub fn selected(&self) -> Option<&ListItem> {
        self.selected.and_then(|i| self.items.get(i))
    }

    /// `height` is the whole content area, heading included.
    pub fn set_height(&mut self, height: u16) {
        self.visible = (height.saturating_sub(HEADING_HEIGHT) / ITEM_HEIGHT).max(1) as usize;
        self.follow_cursor();
    }

    pub fn up(&mut self) {
        self.move_by(-1);
    }

    pub fn down(&mut self) {
        self.move_by(1);
    }

    pub fn page_up(&mut self) {
        self.move_by(-(self.visible as isize));
    }

    pub fn page_down(&mut self) {
        self.move_by(self.visible as isize);
    }

    pub fn top(&mut self) {
        if !self.items.is_empty() {
            self.state.select(Some(0));
            self.follow_cursor();
        }
    }

    pub fn bottom(&mut self) {
        if !self.items.is_empty() {
            self.state.select(Some(self.items.len() - 1));
            self.follow_cursor();
        }
    }

    /// Marks the item under the cursor as selected and returns its URL.
    pub fn activate(&mut self) -> Option<String> {
        let index = self.state.selected().filter(|i| *i < self.items.len())?;
        self.selected = Some(index);
        self.selected().map(|item| item.url().to_string())
    }

    fn move_by(&mut self, delta: isize) {
        if self.items.is_empty() {
            return;
        }
        let last = self.items.len() as isize - 1;
        let current = self.state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, last);
        self.state.select(Some(next as usize));
        self.follow_cursor();
    }

    /// Moves the offset just enough to keep the cursor on screen.
    fn follow_cursor(&mut self) {
        let cursor = self.state.selected().unwrap_or(0);
        let max_offset = self.items.len().saturating_sub(self.visible);
        let offset = self.state.offset();

        let offset = if cursor < offset {
            cursor
        } else if cursor >= offset + self.visible {
            cursor + 1 - self.visible
        } else {
            offset
        };
        *self.state.offset_mut() = offset.min(max_offset);
    }
}
