//! Wire shapes for the notebook API.

use crate::api::{ApiError, ApiResult};
use crate::model::notebook::{Notebook, NotebookId};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Common response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: i64,
    pub data: Option<T>,
}

impl<T> BaseResponse<T> {
    /// Unwraps `data`, turning `success=false` into [`ApiError::Rejected`].
    pub fn into_data(self) -> ApiResult<T> {
        if !self.success {
            return Err(ApiError::Rejected {
                code: self.code,
                message: self.message,
            });
        }
        self.data
            .ok_or_else(|| ApiError::Decode("successful envelope without `data`".to_string()))
    }

    /// Checks `success` for endpoints whose `data` is irrelevant.
    pub fn ensure_success(self) -> ApiResult<()> {
        if self.success {
            return Ok(());
        }
        Err(ApiError::Rejected {
            code: self.code,
            message: self.message,
        })
    }
}

/// One row of `GET /api/notebook/v1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookDto {
    pub id: NotebookId,
    pub name: String,
    pub parent_id: Option<NotebookId>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl NotebookDto {
    /// Converts the wire row into the domain model.
    pub fn into_notebook(self) -> ApiResult<Notebook> {
        let created_at = parse_timestamp_ms(&self.created_at)?;
        let updated_at = match self.updated_at.as_deref() {
            Some(value) => parse_timestamp_ms(value)?,
            None => created_at,
        };
        Ok(Notebook {
            id: self.id,
            name: self.name,
            parent_id: self.parent_id,
            created_at,
            updated_at,
        })
    }
}

/// Body of `POST /api/notebook/v1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNotebookRequest {
    pub name: String,
    pub parent_id: Option<NotebookId>,
}

/// `data` of `POST /api/notebook/v1`. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNotebookResponse {
    pub id: NotebookId,
}

/// Parses RFC 3339, naive date-time (UTC) or plain date into epoch ms.
pub fn parse_timestamp_ms(value: &str) -> ApiResult<i64> {
    let trimmed = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.timestamp_millis());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed.and_utc().timestamp_millis());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().timestamp_millis());
        }
    }
    Err(ApiError::InvalidTimestamp(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::parse_timestamp_ms;

    #[test]
    fn parses_supported_timestamp_shapes() {
        assert_eq!(parse_timestamp_ms("2024-01-01T00:00:00Z").unwrap(), 1_704_067_200_000);
        assert_eq!(
            parse_timestamp_ms("2024-01-01T01:00:00+01:00").unwrap(),
            1_704_067_200_000
        );
        assert_eq!(
            parse_timestamp_ms("2024-01-01T00:00:00.250").unwrap(),
            1_704_067_200_250
        );
        assert_eq!(parse_timestamp_ms("2024-01-01").unwrap(), 1_704_067_200_000);
    }

    #[test]
    fn rejects_garbage_timestamp() {
        assert!(parse_timestamp_ms("yesterday").is_err());
    }
}
