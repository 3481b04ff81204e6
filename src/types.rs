use std::fmt;

/// A user's public profile, fetched once before the session starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub login: String,
    pub name: String,
    pub bio: String,
    pub pronouns: String,
    pub company: String,
    pub location: String,
    pub website_url: String,
    pub followers: u64,
    pub following: u64,
    pub social: Vec<SocialAccount>,
    /// Raw markdown of the `<login>/<login>` README, if there is one
    pub readme: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialAccount {
    pub provider: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub stars: u32,
    pub language: Option<String>,
}

/// Which repository query produced a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListKind {
    Pinned,
    Owned,
    Contributed,
}

impl ListKind {
    pub const ALL: [ListKind; 3] = [ListKind::Pinned, ListKind::Owned, ListKind::Contributed];

    /// Server-side page size for this listing
    pub fn limit(&self) -> u32 {
        match self {
            ListKind::Pinned => 6,
            ListKind::Owned | ListKind::Contributed => 30,
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            ListKind::Pinned => "Pinned repositories",
            ListKind::Owned => "Most starred repositories",
            ListKind::Contributed => "Most starred contributed repositories (in the past year)",
        }
    }

    /// Contributed repositories carry someone else's owner, so it is shown.
    pub fn shows_owner(&self) -> bool {
        matches!(self, ListKind::Contributed)
    }

    /// Client-side ordering applied after a fetch completes.
    pub fn normalize(&self, mut repos: Vec<Repository>) -> Vec<Repository> {
        if *self == ListKind::Contributed {
            repos.sort_by(|a, b| b.stars.cmp(&a.stars));
        }
        repos
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListKind::Pinned => write!(f, "Pinned"),
            ListKind::Owned => write!(f, "Owned"),
            ListKind::Contributed => write!(f, "Contributed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, stars: u32) -> Repository {
        Repository {
            name: name.to_string(),
            stars,
            ..Default::default()
        }
    }

    #[test]
    fn contributed_sorted_by_stars_desc() {
        let repos = vec![repo("a", 1), repo("b", 30), repo("c", 7)];
        let sorted = ListKind::Contributed.normalize(repos);
        let names: Vec<_> = sorted.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["b", "c", "a"]);
    }

    #[test]
    fn contributed_sort_is_stable_on_ties() {
        let repos = vec![repo("x", 5), repo("y", 5), repo("z", 9)];
        let sorted = ListKind::Contributed.normalize(repos);
        let names: Vec<_> = sorted.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["z", "x", "y"]);
    }

    #[test]
    fn owned_keeps_server_order() {
        let repos = vec![repo("a", 1), repo("b", 30)];
        let kept = ListKind::Owned.normalize(repos.clone());
        assert_eq!(kept, repos);
    }

    #[test]
    fn limits() {
        assert_eq!(ListKind::Pinned.limit(), 6);
        assert_eq!(ListKind::Owned.limit(), 30);
        assert_eq!(ListKind::Contributed.limit(), 30);
    }
}
