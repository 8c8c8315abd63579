use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Task {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>, // free text, e.g. "8:00" or "2025-01-31"
    #[serde(default)]
    pub completed: bool,
    #[serde(default, with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of a create call.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

impl TaskDraft {
    /// Builds a draft from raw prompt input, treating blank optional fields as absent.
    pub fn from_input(name: &str, description: &str, deadline: &str) -> Self {
        let non_blank = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        Self {
            name: name.trim().to_string(),
            description: non_blank(description),
            deadline: non_blank(deadline),
        }
    }

    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Partial update; `None` fields are left out of the request body.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskUpdate {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn apply_to(&self, task: &mut Task) {
        if let Some(name) = &self.name {
            task.name = name.clone();
        }
        if let Some(description) = &self.description {
            task.description = Some(description.clone());
        }
        if let Some(deadline) = &self.deadline {
            task.deadline = Some(deadline.clone());
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

/// Accepts RFC 3339 as well as the zone-less ISO form some servers emit
/// for naive database timestamps (read as UTC).
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(Some(dt.with_timezone(&Utc)));
        }
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| Some(naive.and_utc()))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
impl TaskDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
