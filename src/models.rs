// src/models.rs
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// 服务端解析时间用的格式: ISO 8601, 无时区
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// 服务端返回的笔记记录, 多余字段直接忽略
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NoteRecord {
    pub id: i64,
    pub content: String,
}

/// The specialised note kinds the server accepts on their own creation endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Memo,
    Task,
    Event,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Memo, ResourceKind::Task, ResourceKind::Event];

    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::Memo => "memo",
            ResourceKind::Task => "task",
            ResourceKind::Event => "event",
        }
    }

    /// Collection path used for creation and typed listing, e.g. `memos`.
    pub fn collection(self) -> String {
        format!("{}s", self.name())
    }

    /// Content written by the update step of a scenario.
    pub fn updated_content(self) -> String {
        format!("{} updated", self.name())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    Todo,
    Doing,
    Done,
}

// 创建请求体, 按资源类型区分字段
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum CreatePayload {
    Memo {
        content: String,
    },
    Task {
        content: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<TaskStatus>,
        #[serde(skip_serializing_if = "Option::is_none", with = "opt_timestamp")]
        due_date: Option<NaiveDateTime>,
    },
    Event {
        content: String,
        #[serde(skip_serializing_if = "Option::is_none", with = "opt_timestamp")]
        start_date: Option<NaiveDateTime>,
        #[serde(skip_serializing_if = "Option::is_none", with = "opt_timestamp")]
        end_date: Option<NaiveDateTime>,
    },
}

impl CreatePayload {
    pub fn memo(content: impl Into<String>) -> Self {
        CreatePayload::Memo { content: content.into() }
    }

    pub fn task(
        content: impl Into<String>,
        status: Option<TaskStatus>,
        due_date: Option<NaiveDateTime>,
    ) -> Self {
        CreatePayload::Task { content: content.into(), status, due_date }
    }

    pub fn event(
        content: impl Into<String>,
        start_date: Option<NaiveDateTime>,
        end_date: Option<NaiveDateTime>,
    ) -> Self {
        CreatePayload::Event { content: content.into(), start_date, end_date }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            CreatePayload::Memo { .. } => ResourceKind::Memo,
            CreatePayload::Task { .. } => ResourceKind::Task,
            CreatePayload::Event { .. } => ResourceKind::Event,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            CreatePayload::Memo { content }
            | CreatePayload::Task { content, .. }
            | CreatePayload::Event { content, .. } => content,
        }
    }
}

// 更新请求体, 目前只改 content
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UpdatePayload {
    pub content: String,
}

/// Parses a timestamp in the server's `YYYY-MM-DDTHH:MM:SS` format.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
}

mod opt_timestamp {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.collect_str(&ts.format(TIMESTAMP_FORMAT)),
            None => serializer.serialize_none(),
        }
    }
}
