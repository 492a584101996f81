use serde::{Deserialize, Serialize};
use xdrvault_core::{AppError, AppResult};

/// Contiguous offset range `[start, end)` requested in one page call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    start: u64,
    end: u64,
}

impl PageWindow {
    /// Creates a window, requiring `end > start`.
    pub fn new(start: u64, end: u64) -> AppResult<Self> {
        if end <= start {
            return Err(AppError::Validation(format!(
                "page window end {end} must be greater than start {start}"
            )));
        }

        Ok(Self { start, end })
    }

    /// Creates the window `[start, start + size)`.
    pub fn with_size(start: u64, size: u64) -> AppResult<Self> {
        let end = start.checked_add(size).ok_or_else(|| {
            AppError::Validation(format!(
                "page window overflows at start {start} with size {size}"
            ))
        })?;

        Self::new(start, end)
    }

    /// Returns the inclusive start offset.
    #[must_use]
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Returns the exclusive end offset.
    #[must_use]
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Returns the window size, equal to the configured page size.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.end - self.start
    }
}

/// Server-side filter comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    /// Membership in a value list.
    In,
    /// Equality comparison.
    Eq,
    /// Greater-than-or-equal comparison.
    Gte,
    /// Less-than-or-equal comparison.
    Lte,
}

/// One server-side filter criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertFilter {
    field: String,
    operator: FilterOperator,
    value: Vec<String>,
}

impl AlertFilter {
    /// Creates a filter criterion.
    #[must_use]
    pub fn new(
        field: impl Into<String>,
        operator: FilterOperator,
        value: Vec<String>,
    ) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }

    /// The fixed severity filter present in every query.
    #[must_use]
    pub fn severity_default() -> Self {
        Self::new(
            "severity",
            FilterOperator::In,
            vec!["low".to_owned(), "medium".to_owned(), "high".to_owned()],
        )
    }

    /// Returns the filtered field name.
    #[must_use]
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Returns the comparison operator.
    #[must_use]
    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    /// Returns the filter value list.
    #[must_use]
    pub fn values(&self) -> &[String] {
        self.value.as_slice()
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

/// Sort specification for the alerts endpoint.
///
/// The source API spells the direction key `keyword` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    field: String,
    #[serde(rename = "keyword")]
    direction: SortDirection,
}

impl SortSpec {
    /// The fixed sort used by every page query: newest alerts first.
    #[must_use]
    pub fn creation_time_desc() -> Self {
        Self {
            field: "creation_time".to_owned(),
            direction: SortDirection::Desc,
        }
    }

    /// Returns the sorted field name.
    #[must_use]
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Returns the sort direction.
    #[must_use]
    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

/// Request body for one page of the alerts endpoint.
///
/// Built fresh per page; nothing is shared across iterations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertQuery {
    filters: Vec<AlertFilter>,
    search_from: u64,
    search_to: u64,
    sort: SortSpec,
}

impl AlertQuery {
    /// Builds the query for one page window.
    ///
    /// The fixed severity filter always comes first; caller-supplied extras
    /// are appended in their given order, since the server evaluates filters
    /// in sequence.
    #[must_use]
    pub fn for_window(window: PageWindow, extra_filters: &[AlertFilter]) -> Self {
        let mut filters = vec![AlertFilter::severity_default()];
        filters.extend_from_slice(extra_filters);

        Self {
            filters,
            search_from: window.start(),
            search_to: window.end(),
            sort: SortSpec::creation_time_desc(),
        }
    }

    /// Returns the filters in evaluation order.
    #[must_use]
    pub fn filters(&self) -> &[AlertFilter] {
        self.filters.as_slice()
    }

    /// Returns the inclusive start offset of the requested window.
    #[must_use]
    pub fn search_from(&self) -> u64 {
        self.search_from
    }

    /// Returns the exclusive end offset of the requested window.
    #[must_use]
    pub fn search_to(&self) -> u64 {
        self.search_to
    }

    /// Wraps the query in the wire-level `request_data` envelope.
    #[must_use]
    pub fn to_request(&self) -> AlertRequest {
        AlertRequest {
            request_data: self.clone(),
        }
    }
}

/// Wire-level wrapper expected by the alerts endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRequest {
    request_data: AlertQuery,
}

impl AlertRequest {
    /// Returns the wrapped query.
    #[must_use]
    pub fn request_data(&self) -> &AlertQuery {
        &self.request_data
    }
}
