use std::collections::BTreeMap;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

use crate::action::{Action, Effect};
use crate::event::Event;
use crate::fetch::{FetchOrchestrator, TabLoadState};
use crate::markdown::DocumentRenderer;
use crate::profile_view::ProfileView;
use crate::repo_list::RepoList;
use crate::tabs::{TabKind, Tabs};
use crate::types::{ListKind, Profile};

/// Rows taken by the tab bar, the gap under it and the help line.
pub const CHROME_HEIGHT: u16 = 4;

/// Session state: the tab bar, per-tab data and the views built from it.
pub struct App {
    pub tabs: Tabs,
    pub fetch: FetchOrchestrator,
    pub profile_view: ProfileView,
    lists: BTreeMap<ListKind, RepoList>,
    pub ready: bool,
    pub width: u16,
    pub height: u16,
    pub should_quit: bool,
}

impl App {
    pub fn new(profile: Profile, renderer: Arc<dyn DocumentRenderer>) -> Self {
        let profile = Arc::new(profile);
        Self {
            fetch: FetchOrchestrator::new(profile.login.clone()),
            profile_view: ProfileView::new(profile, renderer),
            tabs: Tabs::profile_tabs(),
            lists: BTreeMap::new(),
            ready: false,
            width: 0,
            height: 0,
            should_quit: false,
        }
    }

    /// Maps the event to an action and applies it.
    pub fn dispatch(&mut self, event: Event) -> Vec<Effect> {
        let action = self.handle_event(&event);
        self.update(action)
    }

    pub fn handle_event(&self, event: &Event) -> Action {
        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Resize(width, height) => Action::Resize {
                width: *width,
                height: *height,
            },
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Action::Quit,
                KeyCode::Char('d') => Action::PageDown,
                KeyCode::Char('u') => Action::PageUp,
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => Action::NextTab,
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => Action::PrevTab,
            KeyCode::Char('r') => Action::Retry,
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::PageDown => Action::PageDown,
            KeyCode::PageUp => Action::PageUp,
            KeyCode::Char('g') | KeyCode::Home => Action::GoToTop,
            KeyCode::Char('G') | KeyCode::End => Action::GoToBottom,
            KeyCode::Enter => Action::Select,
            _ => Action::None,
        }
    }

    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        let mut effects = Vec::new();

        match action {
            Action::Quit => {
                info!("quit requested");
                self.should_quit = true;
            }
            Action::NextTab => {
                self.tabs.next();
                effects.extend(self.enter_tab());
            }
            Action::PrevTab => {
                self.tabs.prev();
                effects.extend(self.enter_tab());
            }
            Action::Retry => {
                if let Some(kind) = self.current_kind() {
                    if let Some(req) = self.fetch.retry(kind) {
                        self.lists.remove(&kind);
                        effects.push(Effect::Fetch(req));
                    }
                }
            }
            Action::Select => {
                if let Some(list) = self.current_list_mut() {
                    if let Some(url) = list.activate() {
                        debug!(%url, "repository selected");
                        effects.push(Effect::OpenUrl(url));
                    }
                }
            }
            Action::Resize { width, height } => {
                self.width = width;
                self.height = height;
                let body = self.body_height();
                self.profile_view.set_size(width, body);
                for list in self.lists.values_mut() {
                    list.set_height(body);
                }
                if !self.ready {
                    debug!(width, height, "first size known, session ready");
                    self.ready = true;
                }
            }
            Action::ReposLoaded {
                kind,
                generation,
                result,
            } => {
                if self.fetch.on_completion(kind, generation, result) {
                    self.rebuild_list(kind);
                }
            }
            Action::ScrollUp
            | Action::ScrollDown
            | Action::PageUp
            | Action::PageDown
            | Action::GoToTop
            | Action::GoToBottom => self.forward_to_view(action),
            Action::None => {}
        }

        if self.ready && self.tabs.current().kind == TabKind::Info {
            self.profile_view.prepare();
        }

        effects
    }

    /// Load state of the visible tab, or `None` on the info tab.
    pub fn current_state(&self) -> Option<&TabLoadState> {
        self.current_kind().map(|kind| self.fetch.state(kind))
    }

    pub fn current_list(&self) -> Option<&RepoList> {
        self.current_kind().and_then(|kind| self.lists.get(&kind))
    }

    #[cfg(test)]
    pub fn list(&self, kind: ListKind) -> Option<&RepoList> {
        self.lists.get(&kind)
    }

    pub fn body_height(&self) -> u16 {
        self.height.saturating_sub(CHROME_HEIGHT)
    }

    fn current_kind(&self) -> Option<ListKind> {
        match self.tabs.current().kind {
            TabKind::Info => None,
            TabKind::List(kind) => Some(kind),
        }
    }

    fn current_list_mut(&mut self) -> Option<&mut RepoList> {
        let kind = self.current_kind()?;
        self.lists.get_mut(&kind)
    }

    fn enter_tab(&mut self) -> Option<Effect> {
        let kind = self.current_kind()?;
        debug!(tab = %self.tabs.current().title, "tab entered");
        if *self.fetch.state(kind) != TabLoadState::NotLoaded {
            return None;
        }
        self.fetch.request_load(kind).map(Effect::Fetch)
    }

    fn rebuild_list(&mut self, kind: ListKind) {
        match self.fetch.state(kind) {
            TabLoadState::Loaded(repos) => {
                let mut list = RepoList::new(repos, kind);
                list.set_height(self.body_height());
                self.lists.insert(kind, list);
            }
            _ => {
                self.lists.remove(&kind);
            }
        }
    }

    fn forward_to_view(&mut self, action: Action) {
        if let Some(list) = self.current_list_mut() {
            match action {
                Action::ScrollUp => list.up(),
                Action::ScrollDown => list.down(),
                Action::PageUp => list.page_up(),
                Action::PageDown => list.page_down(),
                Action::GoToTop => list.top(),
                Action::GoToBottom => list.bottom(),
                _ => {}
            }
            return;
        }

        if self.tabs.current().kind != TabKind::Info {
            return;
        }
        let page = self.profile_view.page();
        let view = &mut self.profile_view;
        match action {
            Action::ScrollUp => view.scroll_up(1),
            Action::ScrollDown => view.scroll_down(1),
            Action::PageUp => view.scroll_up(page),
            Action::PageDown => view.scroll_down(page),
            Action::GoToTop => view.scroll_top(),
            Action::GoToBottom => view.scroll_bottom(),
            _ => {}
        }
    }
}
