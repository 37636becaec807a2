//! Book model

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::ValidationFailure;

/// Book record
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Opaque identifier, assigned at creation
    pub id: String,
    pub name: String,
    pub year: Option<i64>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    /// Total number of pages
    pub page_count: Option<i64>,
    /// Pages read so far
    pub read_page: Option<i64>,
    /// Whether `readPage == pageCount`; computed when the book is added
    pub finished: bool,
    /// Whether the book is currently being read
    pub reading: Option<bool>,
    #[serde(serialize_with = "serialize_iso_millis")]
    #[schema(value_type = String, format = DateTime, example = "2024-03-01T10:00:00.000Z")]
    pub inserted_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_iso_millis")]
    #[schema(value_type = String, format = DateTime, example = "2024-03-01T10:00:00.000Z")]
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Build a new record from a validated payload
    pub fn new(id: String, name: String, payload: BookPayload, now: DateTime<Utc>) -> Self {
        // strict equality: `null` only equals `null`, absent only equals absent
        let finished = payload.page_count == payload.read_page;
        Self {
            id,
            name,
            year: payload.year,
            author: payload.author,
            summary: payload.summary,
            publisher: payload.publisher,
            page_count: payload.page_count.flatten(),
            read_page: payload.read_page.flatten(),
            finished,
            reading: payload.reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Replace every field except `id`, `inserted_at` and `finished`.
    ///
    /// `updated_at` always moves forward, even if the clock did not.
    pub fn apply_update(&mut self, name: String, payload: BookPayload, now: DateTime<Utc>) {
        self.name = name;
        self.year = payload.year;
        self.author = payload.author;
        self.summary = payload.summary;
        self.publisher = payload.publisher;
        self.page_count = payload.page_count.flatten();
        self.read_page = payload.read_page.flatten();
        self.reading = payload.reading;
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + chrono::Duration::milliseconds(1)
        };
    }

    pub fn summary(&self) -> BookSummary {
        BookSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            publisher: self.publisher.clone(),
        }
    }
}

fn serialize_iso_millis<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Keeps an explicit `null` apart from a missing key: missing is `None`, `null` is `Some(None)`
fn deserialize_present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Option<i64>>, D::Error> {
    Option::<i64>::deserialize(deserializer).map(Some)
}

/// Listing projection of a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: Option<String>,
}

/// Create / update book request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    pub year: Option<i64>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    #[schema(value_type = Option<i64>)]
    pub page_count: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    #[schema(value_type = Option<i64>)]
    pub read_page: Option<Option<i64>>,
    pub reading: Option<bool>,
}

/// Numeric value of a page field in a comparison: `null` counts as 0, a missing key has none
fn comparable(value: Option<Option<i64>>) -> Option<i64> {
    value.map(|present| present.unwrap_or(0))
}

impl BookPayload {
    /// Check the payload rules in order and hand back the book name.
    pub fn into_validated(self) -> Result<(String, Self), ValidationFailure> {
        if self.validate().is_err() {
            return Err(ValidationFailure::MissingName);
        }
        if let (Some(read_page), Some(page_count)) = (comparable(self.read_page), comparable(self.page_count)) {
            if read_page > page_count {
                return Err(ValidationFailure::ReadPageExceedsPageCount);
            }
        }

        let mut payload = self;
        let name = payload.name.take().ok_or(ValidationFailure::MissingName)?;
        Ok((name, payload))
    }
}

/// List query string, every value seen per key in order of appearance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookQuery {
    pub name: Vec<String>,
    pub reading: Vec<String>,
    pub finished: Vec<String>,
}

impl FromIterator<(String, String)> for BookQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut query = BookQuery::default();
        for (key, value) in pairs {
            match key.as_str() {
                "name" => query.name.push(value),
                "reading" => query.reading.push(value),
                "finished" => query.finished.push(value),
                _ => {}
            }
        }
        query
    }
}

/// Boolean filter coerced from a query value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagFilter {
    Is(bool),
    /// The value is neither 0 nor 1 numerically; no book matches
    Unmatchable,
}

impl FlagFilter {
    /// Numeric coercion: blank is 0, `0`/`1` select a state, anything else matches nothing.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let number = if trimmed.is_empty() {
            Some(0.0)
        } else {
            trimmed.parse::<f64>().ok()
        };

        match number {
            Some(n) if n == 0.0 => FlagFilter::Is(false),
            Some(n) if n == 1.0 => FlagFilter::Is(true),
            _ => FlagFilter::Unmatchable,
        }
    }

    /// A key given more than once is a list, which never coerces to 0 or 1
    fn from_values(values: &[String]) -> Option<Self> {
        match values {
            [] => None,
            [value] => Some(FlagFilter::parse(value)),
            _ => Some(FlagFilter::Unmatchable),
        }
    }

    fn accepts(self, value: Option<bool>) -> bool {
        matches!((self, value), (FlagFilter::Is(wanted), Some(actual)) if wanted == actual)
    }
}

/// Name filter, lowercased for case-insensitive matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameFilter {
    Contains(String),
    /// `name` was given more than once; no book matches
    Unmatchable,
}

impl NameFilter {
    fn from_values(values: &[String]) -> Option<Self> {
        match values {
            [] => None,
            [value] => Some(NameFilter::Contains(value.to_lowercase())),
            _ => Some(NameFilter::Unmatchable),
        }
    }

    fn accepts(&self, name: &str) -> bool {
        match self {
            NameFilter::Contains(needle) => name.to_lowercase().contains(needle.as_str()),
            NameFilter::Unmatchable => false,
        }
    }
}

/// Parsed list filters; absent filters accept every book
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub name: Option<NameFilter>,
    pub reading: Option<FlagFilter>,
    pub finished: Option<FlagFilter>,
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(name) = &self.name {
            if !name.accepts(&book.name) {
                return false;
            }
        }
        if let Some(reading) = self.reading {
            if !reading.accepts(book.reading) {
                return false;
            }
        }
        if let Some(finished) = self.finished {
            if !finished.accepts(Some(book.finished)) {
                return false;
            }
        }
        true
    }
}

impl From<&BookQuery> for BookFilter {
    fn from(query: &BookQuery) -> Self {
        Self {
            name: NameFilter::from_values(&query.name),
            reading: FlagFilter::from_values(&query.reading),
            finished: FlagFilter::from_values(&query.finished),
        }
    }
}
