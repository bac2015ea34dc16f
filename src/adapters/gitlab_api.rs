//! Live adapter for the [`GitLabHost`] port over the GitLab v4 REST API.
//!
//! Owns every wire-protocol concern the engine must not see: URL and path
//! encoding, pagination, status-code mapping, decoding the dynamic JSON
//! shapes into the fixed entity types, and dating changed paths by their
//! newest touching commit.

use chrono::{DateTime, Utc};
use futures::StreamExt;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;

use crate::compare::types::{BranchRef, Commit};
use crate::error::{Error, Result};
use crate::ports::gitlab::{GitLabHost, HostFuture, RawDiffEntry};

const API_PREFIX: &str = "api/v4";
const PER_PAGE: u32 = 100;

/// Concurrent per-path commit lookups when dating a changed-path report.
const PATH_DATING_CONCURRENCY: usize = 8;

/// REST client bound to one repository and one (optional) token.
///
/// Construct one per request; it holds no state beyond the connection pool.
#[derive(Debug)]
pub struct GitLabApi {
    client: Client,
    /// Project API root, e.g. `https://gitlab.com/api/v4/projects/group%2Fproj`.
    api_base: String,
    token: Option<String>,
}

impl GitLabApi {
    /// Builds a client from a repository URL such as
    /// `https://gitlab.com/group/project.git`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the URL cannot be parsed, uses a
    /// non-HTTP scheme, or lacks a `namespace/project` path.
    pub fn from_repo_url(repo_url: &str, token: Option<String>) -> Result<Self> {
        let url = Url::parse(repo_url.trim())
            .map_err(|e| Error::InvalidInput(format!("cannot parse repository URL: {e}")))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::InvalidInput(format!(
                "unsupported repository URL scheme '{}'",
                url.scheme()
            )));
        }
        let host = url
            .host_str()
            .ok_or_else(|| Error::InvalidInput("repository URL has no host".to_string()))?;

        let path = url.path().trim_matches('/');
        let project = path.strip_suffix(".git").unwrap_or(path);
        if project.is_empty() || !project.contains('/') {
            return Err(Error::InvalidInput(
                "repository URL must include a namespace/project path".to_string(),
            ));
        }

        let mut origin = format!("{}://{host}", url.scheme());
        if let Some(port) = url.port() {
            origin.push_str(&format!(":{port}"));
        }
        let api_base = format!("{origin}/{API_PREFIX}/projects/{}", encode_component(project));

        Ok(Self { client: Client::new(), api_base, token })
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.header("PRIVATE-TOKEN", token);
        }
        request
    }

    async fn send(&self, url: String) -> Result<Response> {
        let response = self
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("request to GitLab failed: {e}")))?;
        check_status(response).await
    }

    /// Fetch every page of a list endpoint, following `x-next-page`.
    async fn get_paged<T: serde::de::DeserializeOwned>(
        &self,
        path_and_query: &str,
    ) -> Result<Vec<T>> {
        let separator = if path_and_query.contains('?') { '&' } else { '?' };
        let mut page = 1u32;
        let mut items = Vec::new();
        loop {
            let url = format!(
                "{}{path_and_query}{separator}per_page={PER_PAGE}&page={page}",
                self.api_base
            );
            let response = self.send(url).await?;
            let next = next_page(&response);
            let batch: Vec<T> = decode_json(response).await?;
            items.extend(batch);
            match next {
                Some(n) => page = n,
                None => break,
            }
        }
        Ok(items)
    }

    /// Tag one compare entry with the newest commit touching its path on
    /// `reference`. A path the API cannot attribute stays undated.
    async fn date_entry(&self, diff: ApiDiff, reference: &str) -> Result<RawDiffEntry> {
        let path = if diff.deleted_file { &diff.old_path } else { &diff.new_path };
        let url = format!(
            "{}/repository/commits?ref_name={}&path={}&per_page=1",
            self.api_base,
            encode_component(reference),
            encode_component(path),
        );
        let response = self.send(url).await?;
        let commits: Vec<ApiCommit> = decode_json(response).await?;
        Ok(RawDiffEntry {
            old_path: diff.old_path,
            new_path: diff.new_path,
            new_file: diff.new_file,
            renamed_file: diff.renamed_file,
            deleted_file: diff.deleted_file,
            touched_at: commits.first().map(|c| c.committed_date),
        })
    }
}

impl GitLabHost for GitLabApi {
    fn list_branches(&self) -> HostFuture<'_, Vec<BranchRef>> {
        Box::pin(async move {
            let branches: Vec<ApiBranch> = self.get_paged("/repository/branches").await?;
            Ok(branches
                .into_iter()
                .map(|b| BranchRef { name: b.name, default: b.default })
                .collect())
        })
    }

    fn list_commits(&self, branch: &str) -> HostFuture<'_, Vec<Commit>> {
        let query = format!("/repository/commits?ref_name={}", encode_component(branch));
        Box::pin(async move {
            let commits: Vec<ApiCommit> = self.get_paged(&query).await?;
            Ok(commits.into_iter().map(Commit::from).collect())
        })
    }

    fn diff_paths(&self, from: &str, to: &str) -> HostFuture<'_, Vec<RawDiffEntry>> {
        let url = format!(
            "{}/repository/compare?from={}&to={}",
            self.api_base,
            encode_component(from),
            encode_component(to),
        );
        let reference = to.to_string();
        Box::pin(async move {
            let response = self.send(url).await?;
            let compare: ApiCompare = decode_json(response).await?;
            let dated: Vec<Result<RawDiffEntry>> = futures::stream::iter(compare.diffs)
                .map(|diff| self.date_entry(diff, &reference))
                .buffered(PATH_DATING_CONCURRENCY)
                .collect()
                .await;
            dated.into_iter().collect()
        })
    }

    fn file_content(&self, reference: &str, path: &str) -> HostFuture<'_, Option<String>> {
        let url = format!(
            "{}/repository/files/{}/raw?ref={}",
            self.api_base,
            encode_component(path),
            encode_component(reference),
        );
        let display_path = path.to_string();
        Box::pin(async move {
            let response = self
                .get(&url)
                .send()
                .await
                .map_err(|e| Error::Upstream(format!("request to GitLab failed: {e}")))?;
            if response.status() == StatusCode::NOT_FOUND {
                return Ok(None);
            }
            let response = check_status(response).await?;
            let bytes = response
                .bytes()
                .await
                .map_err(|e| Error::Upstream(format!("failed to read GitLab response: {e}")))?;
            decode_blob(&bytes, &display_path).map(Some)
        })
    }
}

/// Branch entry from `GET /projects/:id/repository/branches`.
#[derive(Debug, Deserialize)]
struct ApiBranch {
    name: String,
    #[serde(default)]
    default: bool,
}

/// Commit entry from `GET /projects/:id/repository/commits`.
#[derive(Debug, Deserialize)]
struct ApiCommit {
    id: String,
    title: String,
    author_name: String,
    committed_date: DateTime<Utc>,
}

impl From<ApiCommit> for Commit {
    fn from(api: ApiCommit) -> Self {
        Commit { hash: api.id, message: api.title, author: api.author_name, date: api.committed_date }
    }
}

/// Changed-path entry inside a compare response.
#[derive(Debug, Deserialize)]
struct ApiDiff {
    old_path: String,
    new_path: String,
    #[serde(default)]
    new_file: bool,
    #[serde(default)]
    renamed_file: bool,
    #[serde(default)]
    deleted_file: bool,
}

/// Top-level shape of `GET /projects/:id/repository/compare`.
#[derive(Debug, Deserialize)]
struct ApiCompare {
    #[serde(default)]
    diffs: Vec<ApiDiff>,
}

/// Error body returned by the GitLab API.
#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = api_message(response).await;
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(Error::Auth(message)),
        _ => Err(Error::Upstream(format!("GitLab returned {}: {message}", status.as_u16()))),
    }
}

/// Pull the `message` field out of a GitLab error body when decodable,
/// otherwise fall back to the raw body.
async fn api_message(response: Response) -> String {
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str::<ApiError>(&text).map_or(text, |e| e.message)
}

async fn decode_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json()
        .await
        .map_err(|e| Error::Upstream(format!("cannot decode GitLab response: {e}")))
}

fn next_page(response: &Response) -> Option<u32> {
    response.headers().get("x-next-page")?.to_str().ok()?.trim().parse().ok()
}

/// Reject binary blobs; everything else must decode as UTF-8 text.
fn decode_blob(bytes: &[u8], path: &str) -> Result<String> {
    if bytes.contains(&0) {
        return Err(Error::Decode(format!("{path} appears to be binary")));
    }
    String::from_utf8(bytes.to_vec())
        .map_err(|_| Error::Decode(format!("{path} is not valid UTF-8")))
}

/// Percent-encode one URL path component (RFC 3986 unreserved set kept).
fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(char::from(byte));
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
