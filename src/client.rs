use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;

use crate::config::Config;
use crate::error::NotionError;
use crate::models::{ApiErrorBody, QueryRequest, QueryResponse, RowLinks};
use crate::row::Row;

pub const NOTION_API_BASE: &str = "https://api.notion.com/v1";
pub const NOTION_VERSION: &str = "2021-05-13";

/// Client for one Notion integration, bound to a target database.
///
/// The secret token and database id are fixed for the client's lifetime.
/// All calls are blocking; each request stands alone with no retry or
/// backoff.
pub struct NotionClient {
    http: HttpClient,
    notion_secret: String,
    target_db: String,
    api_base: String,
}

impl NotionClient {
    pub fn new(notion_secret: &str, target_db: &str) -> Self {
        Self::with_api_base(notion_secret, target_db, NOTION_API_BASE)
    }

    /// Points the client at a different API root, e.g. a local stub server.
    pub fn with_api_base(notion_secret: &str, target_db: &str, api_base: &str) -> Self {
        Self {
            http: HttpClient::new(),
            notion_secret: notion_secret.to_string(),
            target_db: target_db.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Builds a client from `NOTION_SECRET` / `TARGET_DB`.
    pub fn from_env() -> Result<Self, NotionError> {
        let config = Config::from_env()?;
        Ok(Self::new(&config.notion_secret, &config.target_db))
    }

    /// Starts an empty row targeting this client's database.
    pub fn new_row(&self) -> Row {
        Row::new(&self.target_db)
    }

    pub fn target_db(&self) -> &str {
        &self.target_db
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("Notion-Version", HeaderValue::from_static(NOTION_VERSION));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.notion_secret)).unwrap(),
        );
        headers
    }

    fn pages_endpoint(&self) -> String {
        format!("{}/pages/", self.api_base)
    }

    fn query_endpoint(&self, database_id: &str) -> String {
        format!("{}/databases/{}/query", self.api_base, database_id)
    }

    /// Creates one page from the row's staged properties.
    ///
    /// `print_curl` prints the equivalent curl invocation for inspection.
    /// On success with `reset_after`, the row is cleared back to empty while
    /// keeping its parent database reference; on failure the row is left
    /// untouched and may be retried as is.
    pub fn publish_row(
        &self,
        row: &mut Row,
        print_curl: bool,
        reset_after: bool,
    ) -> Result<(), NotionError> {
        let body = serde_json::to_string(row)?;
        let url = self.pages_endpoint();

        log::debug!("Creating page in database {}", row.parent.database_id);
        let resp = self
            .http
            .post(&url)
            .headers(self.headers())
            .body(body.clone())
            .send()?;

        if print_curl {
            println!("{}", self.render_curl("POST", &url, &body));
        }

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().unwrap_or_default();
            log::warn!("Create page failed ({}) for {}", status, url);
            return Err(remote_error(status, &text));
        }

        if reset_after {
            row.reset();
        }
        Ok(())
    }

    /// Reads all rows of a database, following the pagination cursor until
    /// the service reports no further pages.
    ///
    /// `database_id` defaults to the client's target database. Rows come
    /// back in page order, each reduced to its `Playlist` / `Link` URL
    /// columns; a column that cannot be read degrades to an empty string.
    pub fn get_database(
        &self,
        database_id: Option<&str>,
        start_cursor: Option<&str>,
    ) -> Result<Vec<RowLinks>, NotionError> {
        let database_id = database_id.unwrap_or(&self.target_db);
        let url = self.query_endpoint(database_id);

        let mut rows = Vec::new();
        let mut cursor = start_cursor.map(str::to_string);

        loop {
            let mut request = self.http.post(&url).headers(self.headers());
            if let Some(c) = &cursor {
                request = request.json(&QueryRequest {
                    start_cursor: c.clone(),
                });
            }

            let resp = request.send()?;
            let status = resp.status();
            let text = resp.text()?;
            if !status.is_success() {
                log::warn!("Database query failed ({}) for {}", status, url);
                return Err(remote_error(status, &text));
            }

            let page: QueryResponse = serde_json::from_str(&text)?;
            log::debug!(
                "Fetched {} rows from database {} (has_more: {})",
                page.results.len(),
                database_id,
                page.has_more
            );
            rows.extend(page.results.iter().map(extract_row_links));

            match (page.has_more, page.next_cursor) {
                (true, Some(next)) => cursor = Some(next),
                // a truthy has_more without a cursor cannot be followed
                _ => break,
            }
        }

        Ok(rows)
    }

    fn render_curl(&self, method: &str, url: &str, body: &str) -> String {
        let headers: Vec<String> = self
            .headers()
            .iter()
            .map(|(name, value)| {
                format!("\"{}: {}\"", name, value.to_str().unwrap_or_default())
            })
            .collect();
        format!(
            "curl -X {} -H {} -d '{}' '{}'",
            method,
            headers.join(" -H "),
            body,
            url
        )
    }
}

fn remote_error(status: StatusCode, body: &str) -> NotionError {
    let upstream: ApiErrorBody = serde_json::from_str(body).unwrap_or(ApiErrorBody {
        code: status.as_u16().to_string(),
        message: body.to_string(),
    });
    NotionError::Remote {
        code: upstream.code,
        message: upstream.message,
    }
}

// Column names follow the YouTube-watchlist schema this client was built
// for; other schemas come back as empty strings.
fn extract_row_links(result: &Value) -> RowLinks {
    let playlist_url = result
        .get("properties")
        .and_then(|p| p.get("Playlist"))
        .and_then(|p| p.get("rich_text"))
        .and_then(|rt| rt.get(0))
        .and_then(|frag| frag.get("href"))
        .and_then(|href| href.as_str())
        .unwrap_or_default()
        .to_string();

    let video_url = result
        .get("properties")
        .and_then(|p| p.get("Link"))
        .and_then(|l| l.get("url"))
        .and_then(|u| u.as_str())
        .unwrap_or_default()
        .to_string();

    RowLinks {
        playlist_url,
        video_url,
    }
}
