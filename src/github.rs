use async_trait::async_trait;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{PortraitError, Result};
use crate::source::ProfileSource;
use crate::types::{ListKind, Profile, Repository, SocialAccount};

const REPO_FIELDS: &str = "owner { login } name description url stargazerCount primaryLanguage { name }";

const PROFILE_QUERY: &str = r#"
query FetchUser($login: String!) {
  user(login: $login) {
    login name bio pronouns company location websiteUrl
    following { totalCount }
    followers { totalCount }
    socialAccounts(first: 10) { nodes { provider url } }
    repository(name: $login) {
      object(expression: "HEAD:README.md") { ... on Blob { text } }
    }
  }
}"#;

/// GitHub GraphQL client.
pub struct GitHub {
    client: Octocrab,
}

impl std::fmt::Debug for GitHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHub").finish_non_exhaustive()
    }
}

impl From<octocrab::Error> for PortraitError {
    fn from(err: octocrab::Error) -> Self {
        // The interesting part (dns, connect, timeout) is usually in the sources.
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        PortraitError::Api(message)
    }
}

impl GitHub {
    pub fn new(token: String) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(token)
            .build()
            .map_err(|e| PortraitError::Auth(e.to_string()))?;

        Ok(Self { client })
    }

    async fn query<T: DeserializeOwned>(&self, query: &str, login: &str) -> Result<Response<T>> {
        let payload = serde_json::json!({
            "query": query,
            "variables": { "login": login },
        });
        let response: Response<T> = self.client.graphql(&payload).await?;
        Ok(response)
    }
}

fn repositories_query(kind: ListKind) -> String {
    let connection = match kind {
        ListKind::Pinned => format!("pinnedItems(first: {}, types: REPOSITORY)", kind.limit()),
        ListKind::Owned => format!(
            "repositories(first: {}, ownerAffiliations: OWNER, privacy: PUBLIC, \
             orderBy: {{field: STARGAZERS, direction: DESC}})",
            kind.limit()
        ),
        ListKind::Contributed => format!(
            "repositoriesContributedTo(first: {}, includeUserRepositories: false, \
             contributionTypes: [COMMIT, PULL_REQUEST, REPOSITORY], privacy: PUBLIC, \
             orderBy: {{field: STARGAZERS, direction: DESC}})",
            kind.limit()
        ),
    };

    format!(
        "query Fetch{kind}Repositories($login: String!) {{ user(login: $login) {{ \
         items: {connection} {{ nodes {{ ... on Repository {{ {REPO_FIELDS} }} }} }} }} }}"
    )
}

#[async_trait]
impl ProfileSource for GitHub {
    fn name(&self) -> &str {
        "GitHub"
    }

    async fn fetch_profile(&self, login: &str) -> Result<Profile> {
        debug!(login, "fetching profile");
        let response = self.query::<UserData>(PROFILE_QUERY, login).await?;
        parse_profile(response, login)
    }

    async fn fetch_repositories(&self, login: &str, kind: ListKind) -> Result<Vec<Repository>> {
        debug!(login, %kind, "fetching repositories");
        let response = self
            .query::<ListData>(&repositories_query(kind), login)
            .await?;
        parse_repositories(response)
    }
}

// ===== GraphQL payloads =====

#[derive(Debug, Deserialize)]
struct Response<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

fn join_errors<'a>(errors: impl IntoIterator<Item = &'a GraphQlError>) -> String {
    let messages: Vec<&str> = errors.into_iter().map(|e| e.message.as_str()).collect();
    format!("GraphQL: {}", messages.join(", "))
}

#[derive(Debug, Deserialize)]
struct Nodes<T> {
    #[serde(default = "Vec::new")]
    nodes: Vec<Option<T>>,
}

impl<T> Nodes<T> {
    fn into_vec(self) -> Vec<T> {
        self.nodes.into_iter().flatten().collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Count {
    total_count: u64,
}

#[derive(Debug, Deserialize)]
struct UserData {
    user: Option<UserNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserNode {
    login: String,
    name: Option<String>,
    bio: Option<String>,
    pronouns: Option<String>,
    company: Option<String>,
    location: Option<String>,
    website_url: Option<String>,
    following: Count,
    followers: Count,
    social_accounts: Nodes<SocialNode>,
    repository: Option<ReadmeRepository>,
}

#[derive(Debug, Deserialize)]
struct SocialNode {
    provider: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct ReadmeRepository {
    object: Option<Blob>,
}

#[derive(Debug, Deserialize)]
struct Blob {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListData {
    user: Option<ListUser>,
}

#[derive(Debug, Deserialize)]
struct ListUser {
    items: Nodes<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
struct Owner {
    login: String,
}

#[derive(Debug, Deserialize)]
struct Language {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryNode {
    owner: Owner,
    name: String,
    description: Option<String>,
    url: String,
    stargazer_count: u32,
    primary_language: Option<Language>,
}

impl From<RepositoryNode> for Repository {
    fn from(node: RepositoryNode) -> Self {
        Repository {
            owner: node.owner.login,
            name: node.name,
            description: node.description,
            url: node.url,
            stars: node.stargazer_count,
            language: node.primary_language.map(|l| l.name),
        }
    }
}

fn parse_profile(response: Response<UserData>, login: &str) -> Result<Profile> {
    // A user without a `<login>/<login>` repository just has no README.
    let errors: Vec<&GraphQlError> = response
        .errors
        .iter()
        .filter(|e| !e.message.contains("Could not resolve to a Repository"))
        .collect();

    if errors
        .iter()
        .any(|e| e.message.contains("Could not resolve to a User"))
    {
        return Err(PortraitError::NotFound(login.to_string()));
    }
    if !errors.is_empty() {
        return Err(PortraitError::Api(join_errors(errors)));
    }

    let Some(user) = response.data.and_then(|d| d.user) else {
        return Err(PortraitError::NotFound(login.to_string()));
    };

    let readme = user
        .repository
        .and_then(|r| r.object)
        .and_then(|b| b.text)
        .filter(|text| !text.is_empty());

    Ok(Profile {
        login: user.login,
        name: user.name.unwrap_or_default(),
        bio: user.bio.unwrap_or_default(),
        pronouns: user.pronouns.unwrap_or_default(),
        company: user.company.unwrap_or_default(),
        location: user.location.unwrap_or_default(),
        website_url: user.website_url.unwrap_or_default(),
        followers: user.followers.total_count,
        following: user.following.total_count,
        social: user
            .social_accounts
            .into_vec()
            .into_iter()
            .map(|s| SocialAccount {
                provider: s.provider,
                url: s.url,
            })
            .collect(),
        readme,
    })
}

fn parse_repositories(response: Response<ListData>) -> Result<Vec<Repository>> {
    if !response.errors.is_empty() {
        return Err(PortraitError::Api(join_errors(&response.errors)));
    }

    let Some(user) = response.data.and_then(|d| d.user) else {
        warn!("repository query returned no user");
        return Ok(Vec::new());
    };

    Ok(user.items.into_vec().into_iter().map(Repository::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile_response(value: serde_json::Value) -> Response<UserData> {
        serde_json::from_value(value).unwrap()
    }

    fn list_response(value: serde_json::Value) -> Response<ListData> {
        serde_json::from_value(value).unwrap()
    }

    fn user_json() -> serde_json::Value {
        json!({
            "login": "tnagatomi",
            "name": "Takayuki Nagatomi",
            "bio": "",
            "pronouns": null,
            "company": "Example Inc.",
            "location": null,
            "websiteUrl": "https://example.com",
            "following": { "totalCount": 3 },
            "followers": { "totalCount": 12 },
            "socialAccounts": { "nodes": [
                { "provider": "MASTODON", "url": "https://hachyderm.io/@tnagatomi" }
            ]},
            "repository": { "object": { "text": "# Hi" } }
        })
    }

    #[test]
    fn parses_full_profile() {
        let response = profile_response(json!({ "data": { "user": user_json() } }));
        let profile = parse_profile(response, "tnagatomi").unwrap();

        assert_eq!(profile.login, "tnagatomi");
        assert_eq!(profile.name, "Takayuki Nagatomi");
        assert_eq!(profile.pronouns, "");
        assert_eq!(profile.company, "Example Inc.");
        assert_eq!(profile.followers, 12);
        assert_eq!(profile.following, 3);
        assert_eq!(profile.social.len(), 1);
        assert_eq!(profile.social[0].provider, "MASTODON");
        assert_eq!(profile.readme.as_deref(), Some("# Hi"));
    }

    #[test]
    fn missing_readme_repository_is_not_an_error() {
        let mut user = user_json();
        user["repository"] = serde_json::Value::Null;
        let response = profile_response(json!({
            "data": { "user": user },
            "errors": [{
                "type": "NOT_FOUND",
                "message": "Could not resolve to a Repository with the name 'tnagatomi/tnagatomi'."
            }]
        }));

        let profile = parse_profile(response, "tnagatomi").unwrap();
        assert!(profile.readme.is_none());
    }

    #[test]
    fn empty_readme_is_absent() {
        let mut user = user_json();
        user["repository"] = json!({ "object": { "text": "" } });
        let response = profile_response(json!({ "data": { "user": user } }));
        assert!(parse_profile(response, "tnagatomi").unwrap().readme.is_none());
    }

    #[test]
    fn unknown_user_is_not_found() {
        let response = profile_response(json!({
            "data": { "user": null },
            "errors": [{ "message": "Could not resolve to a User with the login of 'nobody'." }]
        }));
        match parse_profile(response, "nobody") {
            Err(PortraitError::NotFound(login)) => assert_eq!(login, "nobody"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn other_profile_errors_are_api_errors() {
        let response = profile_response(json!({
            "data": null,
            "errors": [{ "message": "Something went wrong" }]
        }));
        match parse_profile(response, "x") {
            Err(PortraitError::Api(msg)) => assert_eq!(msg, "GraphQL: Something went wrong"),
            other => panic!("expected Api, got {:?}", other),
        }
    }

    #[test]
    fn parses_repository_nodes() {
        let response = list_response(json!({
            "data": { "user": { "items": { "nodes": [
                {
                    "owner": { "login": "cli" },
                    "name": "cli",
                    "description": "GitHub's official command line tool",
                    "url": "https://github.com/cli/cli",
                    "stargazerCount": 37000,
                    "primaryLanguage": { "name": "Go" }
                },
                {
                    "owner": { "login": "tnagatomi" },
                    "name": "dotfiles",
                    "description": null,
                    "url": "https://github.com/tnagatomi/dotfiles",
                    "stargazerCount": 0,
                    "primaryLanguage": null
                },
                null
            ]}}}
        }));

        let repos = parse_repositories(response).unwrap();
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].owner, "cli");
        assert_eq!(repos[0].stars, 37000);
        assert_eq!(repos[0].language.as_deref(), Some("Go"));
        assert!(repos[1].description.is_none());
        assert!(repos[1].language.is_none());
    }

    #[test]
    fn repository_errors_keep_message() {
        let response = list_response(json!({
            "data": null,
            "errors": [
                { "message": "Could not resolve to a User with the login of 'x'." },
                { "message": "second" }
            ]
        }));
        let err = parse_repositories(response).unwrap_err();
        assert_eq!(
            err.to_string(),
            "API error: GraphQL: Could not resolve to a User with the login of 'x'., second"
        );
    }

    #[test]
    fn queries_use_kind_limits() {
        let pinned = repositories_query(ListKind::Pinned);
        assert!(pinned.contains("pinnedItems(first: 6, types: REPOSITORY)"));
        assert!(pinned.contains("items:"));

        let owned = repositories_query(ListKind::Owned);
        assert!(owned.contains("repositories(first: 30"));
        assert!(owned.contains("orderBy: {field: STARGAZERS, direction: DESC}"));

        let contributed = repositories_query(ListKind::Contributed);
        assert!(contributed.contains("repositoriesContributedTo(first: 30"));
        assert!(contributed.contains("includeUserRepositories: false"));
    }
}
