use crate::types::ListKind;

/// What a tab shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabKind {
    Info,
    List(ListKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub title: String,
    pub index: usize,
    pub kind: TabKind,
}

/// Ordered, fixed set of tabs with a wrapping cursor.
#[derive(Debug, Clone)]
pub struct Tabs {
    tabs: Vec<Tab>,
    current: usize,
}

impl Tabs {
    /// Builds the tab bar with the first tab selected. Panics on an empty list.
    pub fn new(entries: Vec<(String, TabKind)>) -> Self {
        assert!(!entries.is_empty(), "tab bar needs at least one tab");
        let tabs = entries
            .into_iter()
            .enumerate()
            .map(|(index, (title, kind))| Tab { title, index, kind })
            .collect();
        Self { tabs, current: 0 }
    }

    /// Info, Pinned, Owned, Contributed.
    pub fn profile_tabs() -> Self {
        let mut entries = vec![("Info".to_string(), TabKind::Info)];
        entries.extend(
            ListKind::ALL
                .iter()
                .map(|kind| (kind.to_string(), TabKind::List(*kind))),
        );
        Self::new(entries)
    }

    pub fn current(&self) -> &Tab {
        &self.tabs[self.current]
    }

    pub fn index(&self) -> usize {
        self.current
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.tabs.iter().map(|t| t.title.as_str())
    }

    pub fn next(&mut self) {
        self.current = (self.current + 1) % self.tabs.len();
    }

    pub fn prev(&mut self) {
        self.current = (self.current + self.tabs.len() - 1) % self.tabs.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn three() -> Tabs {
        Tabs::new(vec![
            ("Tab 1".to_string(), TabKind::Info),
            ("Tab 2".to_string(), TabKind::List(ListKind::Pinned)),
            ("Tab 3".to_string(), TabKind::List(ListKind::Owned)),
        ])
    }

    #[test]
    fn first_tab_selected() {
        let tabs = three();
        assert_eq!(tabs.index(), 0);
        assert_eq!(tabs.current().title, "Tab 1");
        assert_eq!(tabs.len(), 3);
    }

    #[test]
    fn next_wraps_after_last() {
        let mut tabs = three();
        tabs.next();
        assert_eq!(tabs.index(), 1);
        tabs.next();
        tabs.next();
        assert_eq!(tabs.index(), 0);
    }

    #[test]
    fn prev_wraps_to_last() {
        let mut tabs = three();
        tabs.prev();
        assert_eq!(tabs.index(), 2);
        assert_eq!(tabs.current().kind, TabKind::List(ListKind::Owned));
        tabs.prev();
        assert_eq!(tabs.index(), 1);
    }

    #[test]
    fn profile_tabs_layout() {
        let tabs = Tabs::profile_tabs();
        let titles: Vec<&str> = tabs.titles().collect();
        assert_eq!(titles, ["Info", "Pinned", "Owned", "Contributed"]);
        assert_eq!(tabs.current().kind, TabKind::Info);
    }

    proptest! {
        #[test]
        fn index_stays_in_range(moves in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut tabs = three();
            let mut expected: i64 = 0;
            for forward in moves {
                if forward {
                    tabs.next();
                    expected += 1;
                } else {
                    tabs.prev();
                    expected -= 1;
                }
                prop_assert!(tabs.index() < tabs.len());
                prop_assert_eq!(tabs.index() as i64, expected.rem_euclid(3));
                prop_assert_eq!(tabs.current().index, tabs.index());
            }
        }
    }
}
