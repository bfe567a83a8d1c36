//! DTO for the entry detail endpoint.

use chrono::NaiveDate;
use serde::Serialize;

/// Resolved entry route with its typed arguments.
///
/// # Example
///
/// ```json
/// {
///   "view_name": "entry_detail",
///   "route": "<int:year>/<int:month>/<int:day>/<int:pk>-<slug:slug>/",
///   "year": 2024,
///   "month": 3,
///   "day": 15,
///   "pk": 42,
///   "slug": "hello-world",
///   "date": "2024-03-15",
///   "canonical_url": "/2024/3/15/42-hello-world/"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct EntryDetailResponse {
    pub view_name: String,
    pub route: String,
    pub year: u64,
    pub month: u64,
    pub day: u64,
    pub pk: u64,
    pub slug: String,
    pub date: NaiveDate,
    pub canonical_url: String,
}
