//! GitLab API client implementation

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use urlencoding::encode;

use crate::domain::ports::{TreeEntry, UpstreamCommit, UpstreamRepository};
use crate::error::GitError;

const PER_PAGE: u32 = 100;
const NEXT_PAGE_HEADER: &str = "x-next-page";

/// Reads one project of a GitLab instance
pub struct GitLabClient {
    http: Client,
    api_url: String,
    web_url: String,
    /// `owner/repository` as used in raw URLs
    project_path: String,
    project_id: String,
    branch: String,
    token: Option<String>,
}

impl GitLabClient {
    pub fn new(
        api_url: String,
        web_url: String,
        owner: &str,
        repository: &str,
        project_id: String,
        branch: String,
        token: Option<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            web_url: web_url.trim_end_matches('/').to_string(),
            project_path: format!("{}/{}", owner, repository),
            project_id,
            branch,
            token,
        }
    }

    fn project_url(&self, path: &str) -> String {
        format!(
            "{}/projects/{}{}",
            self.api_url,
            encode(&self.project_id),
            path
        )
    }

    /// Raw file URL on the configured branch
    pub fn raw_url(&self, path: &str) -> String {
        let path = path
            .trim_start_matches('/')
            .split('/')
            .map(|segment| encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!(
            "{}/{}/-/raw/{}/{}",
            self.web_url,
            self.project_path,
            encode(&self.branch),
            path
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header("PRIVATE-TOKEN", token),
            None => request,
        }
    }

    async fn check_status(response: Response) -> Result<Response, GitError> {
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else if status.as_u16() == 401 {
            Err(GitError::Unauthorized)
        } else if status.as_u16() == 429 {
            Err(GitError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(GitError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        response: Response,
    ) -> Result<T, GitError> {
        Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| GitError::Deserialization(e.to_string()))
    }
}

/// Response types from GitLab API
#[derive(Deserialize)]
struct CommitResponse {
    id: String,
    title: String,
    #[serde(default)]
    committed_date: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<CommitResponse> for UpstreamCommit {
    fn from(r: CommitResponse) -> Self {
        UpstreamCommit {
            id: r.id,
            title: r.title,
            committed_date: r.committed_date,
        }
    }
}

#[derive(Deserialize)]
struct TreeItemResponse {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Next page number announced by the server, `None` on the last page
fn next_page(response: &Response) -> Option<u32> {
    response
        .headers()
        .get(NEXT_PAGE_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

fn blobs(items: Vec<TreeItemResponse>) -> impl Iterator<Item = TreeEntry> {
    items
        .into_iter()
        .filter(|item| item.kind == "blob")
        .map(|item| TreeEntry {
            path: item.path,
            name: item.name,
        })
}

#[async_trait]
impl UpstreamRepository for GitLabClient {
    async fn list_commits(&self) -> Result<Vec<UpstreamCommit>, GitError> {
        let url = self.project_url("/repository/commits");
        let response = self
            .authorized(self.http.get(&url))
            .query(&[("ref_name", self.branch.as_str())])
            .send()
            .await?;

        let commits: Vec<CommitResponse> = Self::handle_response(response).await?;
        Ok(commits.into_iter().map(Into::into).collect())
    }

    async fn list_tree(&self, folder: &str) -> Result<Vec<TreeEntry>, GitError> {
        let url = self.project_url("/repository/tree");
        let mut entries = Vec::new();
        let mut page = 1u32;

        loop {
            let response = self
                .authorized(self.http.get(&url))
                .query(&[
                    ("recursive", "true".to_string()),
                    ("path", folder.to_string()),
                    ("ref", self.branch.clone()),
                    ("per_page", PER_PAGE.to_string()),
                    ("page", page.to_string()),
                ])
                .send()
                .await?;

            let response = Self::check_status(response).await?;
            let next = next_page(&response);
            let items: Vec<TreeItemResponse> = response
                .json()
                .await
                .map_err(|e| GitError::Deserialization(e.to_string()))?;
            tracing::debug!(folder, page, items = items.len(), "Listed tree page");
            entries.extend(blobs(items));

            match next {
                Some(n) if n > page => page = n,
                _ => break,
            }
        }

        Ok(entries)
    }

    async fn fetch_raw(&self, path: &str) -> Result<Vec<u8>, GitError> {
        let url = self.raw_url(path);
        tracing::debug!(%url, "Fetching raw file");
        let response = self.authorized(self.http.get(&url)).send().await?;
        let bytes = Self::check_status(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }
}
