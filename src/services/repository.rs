// src/services/repository.rs

//! Notice repository client.
//!
//! Wraps the backend's `/notices` endpoints. Every call is a single attempt;
//! callers decide what to do with a failure and nothing here touches the
//! client-side collection.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{ApiConfig, Notice, NoticePayload, WireNotice};
use crate::utils::http::{create_async_client, endpoint};

/// Access to the notice backend.
#[async_trait]
pub trait NoticeRepository: Send + Sync {
    /// Fetch every notice, in backend order.
    async fn list_notices(&self) -> Result<Vec<Notice>>;

    /// Create a notice; the backend assigns ID and timestamps.
    async fn create_notice(&self, payload: &NoticePayload) -> Result<Notice>;

    /// Replace the editable fields of an existing notice.
    async fn update_notice(&self, id: &str, payload: &NoticePayload) -> Result<Notice>;

    /// Delete a notice.
    async fn delete_notice(&self, id: &str) -> Result<()>;
}

/// Which kinds of failure an endpoint distinguishes.
#[derive(Debug, Clone, Copy)]
enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    fn verb(self) -> &'static str {
        match self {
            Operation::List => "fetch notices",
            Operation::Create => "create notice",
            Operation::Update => "update notice",
            Operation::Delete => "delete notice",
        }
    }
}

/// Map a non-success status to the error kind callers act on.
fn status_error(op: Operation, status: StatusCode, id: Option<&str>, body: &str) -> AppError {
    let detail = backend_message(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string()
    });

    match (op, status) {
        (Operation::Update | Operation::Delete, StatusCode::NOT_FOUND) => {
            AppError::not_found(id.unwrap_or_default())
        }
        (
            Operation::Create | Operation::Update,
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY,
        ) => AppError::validation(detail),
        _ => AppError::http_status(
            status.as_u16(),
            format!("Failed to {}: {}", op.verb(), detail),
        ),
    }
}

/// Pull a human message out of an error body (`{"message": ...}` or
/// `{"error": ...}`), falling back to short plain text.
fn backend_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        return ["message", "error"]
            .iter()
            .find_map(|k| value.get(*k).and_then(|v| v.as_str()))
            .map(str::to_string);
    }
    (body.len() <= 200).then(|| body.to_string())
}

/// Repository backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpNoticeRepository {
    client: Client,
    base_url: Url,
}

impl HttpNoticeRepository {
    /// Create a repository from API settings.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = create_async_client(config)?;
        Self::with_client(client, &config.base_url)
    }

    /// Create a repository with a preconfigured client.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
        })
    }

    fn collection_url(&self) -> Result<Url> {
        endpoint(&self.base_url, &["notices"])
    }

    fn notice_url(&self, id: &str) -> Result<Url> {
        endpoint(&self.base_url, &["notices", id])
    }

    /// Pass a success response through, convert anything else.
    async fn check(op: Operation, response: Response, id: Option<&str>) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        log::debug!("{} failed with {}: {}", op.verb(), status, body);
        Err(status_error(op, status, id, &body))
    }

    async fn read_notice(response: Response) -> Result<Notice> {
        let wire: WireNotice = response
            .json()
            .await
            .map_err(|e| AppError::network(format!("malformed response: {e}")))?;
        Notice::try_from(wire)
    }
}

#[async_trait]
impl NoticeRepository for HttpNoticeRepository {
    async fn list_notices(&self) -> Result<Vec<Notice>> {
        let url = self.collection_url()?;
        log::debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        let response = Self::check(Operation::List, response, None).await?;
        let wires: Vec<WireNotice> = response
            .json()
            .await
            .map_err(|e| AppError::network(format!("malformed response: {e}")))?;

        let notices = wires
            .into_iter()
            .map(Notice::try_from)
            .collect::<Result<Vec<_>>>()?;
        log::info!("Fetched {} notices", notices.len());
        Ok(notices)
    }

    async fn create_notice(&self, payload: &NoticePayload) -> Result<Notice> {
        let url = self.collection_url()?;
        log::debug!("POST {url}");

        let response = self.client.post(url).json(payload).send().await?;
        let response = Self::check(Operation::Create, response, None).await?;
        let notice = Self::read_notice(response).await?;
        log::info!("Created notice {}", notice.id);
        Ok(notice)
    }

    async fn update_notice(&self, id: &str, payload: &NoticePayload) -> Result<Notice> {
        let url = self.notice_url(id)?;
        log::debug!("PUT {url}");

        let response = self.client.put(url).json(payload).send().await?;
        let response = Self::check(Operation::Update, response, Some(id)).await?;
        let notice = Self::read_notice(response).await?;
        log::info!("Updated notice {}", notice.id);
        Ok(notice)
    }

    async fn delete_notice(&self, id: &str) -> Result<()> {
        let url = self.notice_url(id)?;
        log::debug!("DELETE {url}");

        let response = self.client.delete(url).send().await?;
        Self::check(Operation::Delete, response, Some(id)).await?;
        log::info!("Deleted notice {id}");
        Ok(())
    }
}

/// In-memory repository for tests.
#[cfg(test)]
pub(crate) mod fake {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::models::NoticeStatus;

    /// Failure to inject into the next calls.
    #[derive(Debug, Clone, Copy)]
    pub enum Failure {
        Network,
        Rejected,
    }

    #[derive(Default)]
    pub struct FakeRepository {
        pub notices: Mutex<Vec<Notice>>,
        pub calls: AtomicUsize,
        failure: Mutex<Option<Failure>>,
        next_id: AtomicUsize,
    }

    impl FakeRepository {
        pub fn with_notices(notices: Vec<Notice>) -> Self {
            Self {
                notices: Mutex::new(notices),
                ..Self::default()
            }
        }

        pub fn fail_with(&self, failure: Failure) {
            *self.failure.lock().unwrap() = Some(failure);
        }

        pub fn recover(&self) {
            *self.failure.lock().unwrap() = None;
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn enter(&self) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match *self.failure.lock().unwrap() {
                Some(Failure::Network) => Err(AppError::network("connection refused")),
                Some(Failure::Rejected) => Err(AppError::validation("rejected by backend")),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl NoticeRepository for FakeRepository {
        async fn list_notices(&self) -> Result<Vec<Notice>> {
            self.enter()?;
            Ok(self.notices.lock().unwrap().clone())
        }

        async fn create_notice(&self, payload: &NoticePayload) -> Result<Notice> {
            self.enter()?;
            let n = self.next_id.fetch_add(1, Ordering::SeqCst);
            let created = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
                + Duration::minutes(n as i64);
            let notice = Notice {
                id: format!("created-{n}"),
                title: payload.title.clone(),
                description: payload.description.clone(),
                categories: payload.categories.clone(),
                created_at: created,
                updated_at: created,
                status: NoticeStatus::Active,
            };
            self.notices.lock().unwrap().insert(0, notice.clone());
            Ok(notice)
        }

        async fn update_notice(&self, id: &str, payload: &NoticePayload) -> Result<Notice> {
            self.enter()?;
            let mut notices = self.notices.lock().unwrap();
            let notice = notices
                .iter_mut()
                .find(|n| n.id == id)
                .ok_or_else(|| AppError::not_found(id))?;
            notice.title = payload.title.clone();
            notice.description = payload.description.clone();
            notice.categories = payload.categories.clone();
            notice.updated_at = notice.updated_at + Duration::hours(1);
            Ok(notice.clone())
        }

        async fn delete_notice(&self, id: &str) -> Result<()> {
            self.enter()?;
            let mut notices = self.notices.lock().unwrap();
            let before = notices.len();
            notices.retain(|n| n.id != id);
            if notices.len() == before {
                return Err(AppError::not_found(id));
            }
            Ok(())
        }
    }
}
