use crate::fetch::FetchRequest;
use crate::types::{ListKind, Repository};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextTab,
    PrevTab,
    Retry,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,
    Select,
    Resize {
        width: u16,
        height: u16,
    },

    /// A repository fetch finished. Errors arrive as their display text.
    ReposLoaded {
        kind: ListKind,
        generation: u64,
        result: Result<Vec<Repository>, String>,
    },

    None,
}

/// Side effect requested by the app; the runtime carries it out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch(FetchRequest),
    OpenUrl(String),
}
