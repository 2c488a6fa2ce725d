//! Time-clock REST API client.
//!
//! Thin JSON request/response wrapper around the backend. No client-side
//! retry, cancellation, or timeout beyond the HTTP client defaults; callers
//! serialize mutations and re-fetch the full list after each success.

// The backend seam is consumed generically, never as a trait object.
#![allow(async_fn_in_trait)]

use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Conflict, ConflictItem, ShiftId, TimeClockEntry, UserId, WorklogId};
use crate::session::Session;
use crate::util::compact_text;

const CUT_WORKLOG_PATH: &str = "/time-clock/cut-worklog";
const DELETE_WORKLOG_PATH: &str = "/time-clock/delete-worklog";
const WORKLOGS_PATH: &str = "/time-clock/worklogs";
const CONFLICTS_PATH: &str = "/time-clock/conflicts";

/// Inclusive date range the console is currently looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(Error::InvalidInput(format!(
                "date range end {end} is before start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    fn query(&self) -> [(&'static str, String); 2] {
        [
            ("start_date", self.start.format("%Y-%m-%d").to_string()),
            ("end_date", self.end.format("%Y-%m-%d").to_string()),
        ]
    }
}

/// One row of a batch cut payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CutRecord {
    pub user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worklog_id: Option<WorklogId>,
    pub start_time: String,
    pub end_time: String,
    pub total_time: String,
}

impl From<&crate::models::PreviewRow> for CutRecord {
    fn from(row: &crate::models::PreviewRow) -> Self {
        Self {
            user_id: row.user_id,
            worklog_id: row.worklog_id,
            start_time: row.start.clone(),
            end_time: row.end.clone(),
            total_time: row.total.clone(),
        }
    }
}

/// Seam over the time-clock backend so the service layer can be exercised
/// without a network.
pub trait WorklogBackend {
    /// Replace the affected worklogs with the given rows in one batch.
    async fn cut_worklog(&self, cut_data: &[CutRecord]) -> Result<()>;

    /// Delete a single worklog record.
    async fn delete_worklog(&self, worklog_id: WorklogId) -> Result<()>;

    /// List time-clock entries for a date range.
    async fn fetch_time_clock(&self, range: &DateRange) -> Result<Vec<TimeClockEntry>>;

    /// List conflict groups for a date range.
    async fn fetch_conflicts(&self, range: &DateRange) -> Result<Vec<Conflict>>;
}

/// HTTP implementation of [`WorklogBackend`].
#[derive(Debug, Clone)]
pub struct TimeClockApiClient {
    session: Session,
    client: reqwest::Client,
}

impl TimeClockApiClient {
    pub fn new(session: Session) -> Result<Self> {
        Ok(Self {
            session,
            client: reqwest::Client::builder().build()?,
        })
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        tracing::debug!(path, "time-clock mutation");
        let response = self
            .client
            .post(self.session.endpoint(path))
            .bearer_auth(self.session.access_token())
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await?;
        check_status(response).await.map(|_| ())
    }

    async fn get_list<P: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        range: &DateRange,
    ) -> Result<Vec<P>> {
        tracing::debug!(path, "time-clock fetch");
        let response = self
            .client
            .get(self.session.endpoint(path))
            .bearer_auth(self.session.access_token())
            .header("Accept", "application/json")
            .query(&range.query())
            .send()
            .await?;
        let response = check_status(response).await?;
        let payload = response.json::<ListEnvelope<P>>().await?;
        Ok(payload.data)
    }
}

impl WorklogBackend for TimeClockApiClient {
    async fn cut_worklog(&self, cut_data: &[CutRecord]) -> Result<()> {
        if cut_data.is_empty() {
            return Err(Error::InvalidInput(
                "cut payload must contain at least one row".to_string(),
            ));
        }
        self.post_json(CUT_WORKLOG_PATH, &CutRequest { cut_data })
            .await
    }

    async fn delete_worklog(&self, worklog_id: WorklogId) -> Result<()> {
        self.post_json(DELETE_WORKLOG_PATH, &DeleteRequest { worklog_id })
            .await
    }

    async fn fetch_time_clock(&self, range: &DateRange) -> Result<Vec<TimeClockEntry>> {
        let payloads = self
            .get_list::<TimeClockEntryPayload>(WORKLOGS_PATH, range)
            .await?;
        payloads.into_iter().map(TryInto::try_into).collect()
    }

    async fn fetch_conflicts(&self, range: &DateRange) -> Result<Vec<Conflict>> {
        let payloads = self
            .get_list::<ConflictPayload>(CONFLICTS_PATH, range)
            .await?;
        payloads.into_iter().map(TryInto::try_into).collect()
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(Error::Api(parse_api_error(status, &body)))
}

#[derive(Serialize)]
struct CutRequest<'a> {
    cut_data: &'a [CutRecord],
}

#[derive(Serialize)]
struct DeleteRequest {
    worklog_id: WorklogId,
}

#[derive(Deserialize)]
struct ListEnvelope<P> {
    #[serde(default = "Vec::new")]
    data: Vec<P>,
}

/// Wire shape of one time-clock row; validated before it becomes a model.
#[derive(Debug, Deserialize)]
struct TimeClockEntryPayload {
    worklog_id: Option<i64>,
    user_id: Option<i64>,
    user_name: Option<String>,
    shift_id: Option<i64>,
    shift_name: Option<String>,
    date: Option<String>,
    clock_in: Option<String>,
    clock_out: Option<String>,
    total: Option<String>,
    color: Option<String>,
}

impl TryFrom<TimeClockEntryPayload> for TimeClockEntry {
    type Error = Error;

    fn try_from(value: TimeClockEntryPayload) -> Result<Self> {
        Ok(Self {
            worklog_id: WorklogId::new(require(value.worklog_id, "worklog_id")?),
            user_id: UserId::new(require(value.user_id, "user_id")?),
            user_name: require(value.user_name, "user_name")?,
            shift_id: ShiftId::new(require(value.shift_id, "shift_id")?),
            shift_name: require(value.shift_name, "shift_name")?,
            date: require(value.date, "date")?,
            clock_in: value.clock_in.unwrap_or_default(),
            clock_out: value.clock_out.unwrap_or_default(),
            total: value.total.unwrap_or_default(),
            color: value.color,
        })
    }
}

/// Wire shape of one conflict group.
#[derive(Debug, Deserialize)]
struct ConflictPayload {
    formatted_date: Option<String>,
    #[serde(default = "Vec::new")]
    items: Vec<ConflictItemPayload>,
}

#[derive(Debug, Deserialize)]
struct ConflictItemPayload {
    user_id: Option<i64>,
    worklog_id: Option<i64>,
    shift_id: Option<i64>,
    shift_name: Option<String>,
    start: Option<String>,
    end: Option<String>,
    color: Option<String>,
}

impl TryFrom<ConflictPayload> for Conflict {
    type Error = Error;

    fn try_from(value: ConflictPayload) -> Result<Self> {
        let items = value
            .items
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<ConflictItem>>>()?;
        Ok(Self {
            formatted_date: require(value.formatted_date, "formatted_date")?,
            items,
        })
    }
}

impl TryFrom<ConflictItemPayload> for ConflictItem {
    type Error = Error;

    fn try_from(value: ConflictItemPayload) -> Result<Self> {
        Ok(Self {
            user_id: UserId::new(require(value.user_id, "user_id")?),
            worklog_id: value.worklog_id.map(WorklogId::new),
            shift_id: ShiftId::new(require(value.shift_id, "shift_id")?),
            shift_name: require(value.shift_name, "shift_name")?,
            start: require(value.start, "start")?,
            end: require(value.end, "end")?,
            color: value.color,
        })
    }
}

fn require<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| Error::InvalidPayload(format!("response is missing '{field}'")))
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", compact_text(trimmed), status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn date_range_rejects_inverted_bounds() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 18).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        assert!(DateRange::new(start, end).is_err());
        assert!(DateRange::new(end, start).is_ok());
    }

    #[test]
    fn date_range_query_uses_iso_dates() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 18).unwrap(),
        )
        .unwrap();
        assert_eq!(
            range.query(),
            [
                ("start_date", "2024-03-11".to_string()),
                ("end_date", "2024-03-18".to_string()),
            ]
        );
    }

    #[test]
    fn cut_request_serializes_expected_shape() {
        let record = CutRecord {
            user_id: UserId::new(4),
            worklog_id: Some(WorklogId::new(77)),
            start_time: "12:00".to_string(),
            end_time: "17:00".to_string(),
            total_time: "05:00".to_string(),
        };
        let json = serde_json::to_value(CutRequest {
            cut_data: &[record],
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "cut_data": [{
                    "user_id": 4,
                    "worklog_id": 77,
                    "start_time": "12:00",
                    "end_time": "17:00",
                    "total_time": "05:00"
                }]
            })
        );
    }

    #[test]
    fn entry_payload_requires_identity_fields() {
        let raw = r#"{ "user_id": 4, "shift_id": 9 }"#;
        let payload: TimeClockEntryPayload = serde_json::from_str(raw).unwrap();
        let error = TimeClockEntry::try_from(payload).unwrap_err();
        assert!(error.to_string().contains("worklog_id"));
    }

    #[test]
    fn conflict_payload_converts_nested_items() {
        let raw = r#"{
            "formatted_date": "Mon, Mar 18",
            "items": [
                { "user_id": 4, "worklog_id": 70, "shift_id": 9,
                  "shift_name": "Morning", "start": "09:00", "end": "12:00" },
                { "user_id": 4, "worklog_id": 71, "shift_id": 9,
                  "shift_name": "Full day", "start": "09:00", "end": "17:00" }
            ]
        }"#;
        let payload: ConflictPayload = serde_json::from_str(raw).unwrap();
        let conflict = Conflict::try_from(payload).unwrap();
        assert_eq!(conflict.items.len(), 2);
        assert_eq!(conflict.items[1].shift_name, "Full day");
    }

    #[test]
    fn parse_api_error_prefers_structured_message() {
        let message = parse_api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message":"worklog already deleted"}"#,
        );
        assert_eq!(message, "worklog already deleted (422)");

        let fallback = parse_api_error(StatusCode::BAD_GATEWAY, "");
        assert_eq!(fallback, "HTTP 502");
    }
}
