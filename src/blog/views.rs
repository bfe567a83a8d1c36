//! Views of the blog application.

use async_trait::async_trait;
use axum::{
    Json,
    http::Method,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde_json::json;

use crate::api::dto::entry::EntryDetailResponse;
use crate::blog::urls::ENTRY_DETAIL;
use crate::error::AppError;
use crate::routing::{PathKwargs, PathValue};
use crate::state::AppState;
use crate::views::{View, ViewRequest, options_response};

const ALLOWED_METHODS: &[Method] = &[Method::GET, Method::HEAD, Method::OPTIONS];

/// Typed arguments of the `entry_detail` route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDetailPath {
    pub year: u64,
    pub month: u64,
    pub day: u64,
    pub pk: u64,
    pub slug: String,
}

impl EntryDetailPath {
    /// Reads the route arguments captured by the resolver.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if an argument is missing or has the
    /// wrong type, which means the route and this view disagree.
    pub fn from_kwargs(kwargs: &PathKwargs) -> Result<Self, AppError> {
        let int = |name: &str| {
            kwargs.get(name).and_then(PathValue::as_int).ok_or_else(|| {
                tracing::error!(param = name, "Missing integer route argument");
                AppError::internal("Route misconfigured", json!({ "param": name }))
            })
        };

        let slug = kwargs
            .get("slug")
            .and_then(PathValue::as_str)
            .ok_or_else(|| {
                tracing::error!(param = "slug", "Missing slug route argument");
                AppError::internal("Route misconfigured", json!({ "param": "slug" }))
            })?;

        Ok(Self {
            year: int("year")?,
            month: int("month")?,
            day: int("day")?,
            pk: int("pk")?,
            slug: slug.to_string(),
        })
    }

    /// Arguments for reversing `entry_detail`.
    pub fn to_kwargs(&self) -> PathKwargs {
        [
            ("year", PathValue::Int(self.year)),
            ("month", PathValue::Int(self.month)),
            ("day", PathValue::Int(self.day)),
            ("pk", PathValue::Int(self.pk)),
            ("slug", PathValue::Str(self.slug.clone())),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    /// Calendar date of the entry, if the year is in `1..=9999` and the
    /// month and day form a real date.
    pub fn date(&self) -> Option<NaiveDate> {
        let year = i32::try_from(self.year).ok().filter(|y| (1..=9999).contains(y))?;
        let month = u32::try_from(self.month).ok()?;
        let day = u32::try_from(self.day).ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// Detail view of a single entry.
///
/// Answers `GET`/`HEAD` with the typed route arguments and the canonical
/// path of the entry. Impossible dates are `404`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryDetail;

#[async_trait]
impl View for EntryDetail {
    async fn dispatch(&self, state: AppState, request: ViewRequest) -> Result<Response, AppError> {
        match request.method {
            Method::GET | Method::HEAD => {}
            Method::OPTIONS => return Ok(options_response(ALLOWED_METHODS)),
            ref other => {
                return Err(AppError::method_not_allowed(
                    ALLOWED_METHODS,
                    json!({ "method": other.as_str() }),
                ));
            }
        }

        let args = EntryDetailPath::from_kwargs(&request.resolved.kwargs)?;

        let date = args.date().ok_or_else(|| {
            tracing::debug!(path = %request.path, "Entry date is not a calendar date");
            AppError::not_found(
                "No entry found for the given date",
                json!({ "year": args.year, "month": args.month, "day": args.day }),
            )
        })?;

        let view_name = request
            .resolved
            .view_name()
            .unwrap_or_else(|| ENTRY_DETAIL.to_string());
        let canonical_url = state.resolver.reverse(&view_name, &request.resolved.kwargs)?;

        let response = EntryDetailResponse {
            view_name,
            route: request.resolved.route,
            year: args.year,
            month: args.month,
            day: args.day,
            pk: args.pk,
            slug: args.slug,
            date,
            canonical_url,
        };

        Ok(Json(response).into_response())
    }
}
