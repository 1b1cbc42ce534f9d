// ============================================================================
// Listing query builder
// ============================================================================
//
// Turns the raw `page`, `limit`, `search`, `sortField` and `sortDirection`
// parameters of the listing endpoint into a store query (filter, ordering and
// page window), and reports pagination for the returned page.
//
// ============================================================================

use crate::core::{Project, ValidationError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 5;
pub const MAX_PAGE_SIZE: u32 = 100;

// ============================================================================
// SORTING
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Name,
    Eid,
    StartDate,
    EndDate,
    #[default]
    CreatedAt,
}

impl SortField {
    pub const ALL: [SortField; 5] = [
        SortField::Name,
        SortField::Eid,
        SortField::StartDate,
        SortField::EndDate,
        SortField::CreatedAt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Eid => "eid",
            SortField::StartDate => "startDate",
            SortField::EndDate => "endDate",
            SortField::CreatedAt => "createdAt",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == raw)
    }

    fn compare(self, left: &Project, right: &Project) -> Ordering {
        match self {
            SortField::Name => left.name.cmp(&right.name),
            SortField::Eid => left.eid.cmp(&right.eid),
            SortField::StartDate => left.start_date.cmp(&right.start_date),
            SortField::EndDate => left.end_date.cmp(&right.end_date),
            SortField::CreatedAt => left.created_at.cmp(&right.created_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Single-field ordering. Defaults to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Sort state after the user picks `field`: picking the active field flips
    /// the direction, picking another field starts ascending.
    pub fn toggled(self, field: SortField) -> Self {
        if self.field == field {
            Self::new(field, self.direction.flipped())
        } else {
            Self::new(field, SortDirection::Asc)
        }
    }

    /// Orders by the requested field only; equal keys fall back to `id`
    /// ascending so that page boundaries are stable.
    pub fn compare(&self, left: &Project, right: &Project) -> Ordering {
        let ordering = self.field.compare(left, right);
        let ordering = match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        ordering.then_with(|| left.id.cmp(&right.id))
    }
}

// ============================================================================
// FILTER & WINDOW
// ============================================================================

/// Case-insensitive substring match over name, eid and description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    needle: Option<String>,
}

impl ProjectFilter {
    pub fn all() -> Self {
        Self::default()
    }

    /// Blank text matches everything.
    pub fn search(text: &str) -> Self {
        let text = text.trim();
        Self {
            needle: (!text.is_empty()).then(|| text.to_lowercase()),
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        let Some(needle) = self.needle.as_deref() else {
            return true;
        };

        [&project.name, &project.eid, &project.description]
            .into_iter()
            .any(|value| value.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: u64,
    pub take: u64,
}

impl PageWindow {
    pub fn for_page(page: u32, limit: u32) -> Self {
        Self {
            skip: u64::from(page.saturating_sub(1)) * u64::from(limit),
            take: u64::from(limit),
        }
    }
}

/// What a store needs to answer one listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectQuery {
    pub filter: ProjectFilter,
    pub sort: SortSpec,
    pub window: PageWindow,
}

impl ProjectQuery {
    /// Applies the query to an in-memory set of rows.
    pub fn apply<'a>(&self, projects: impl IntoIterator<Item = &'a Project>) -> Vec<Project> {
        let mut matches: Vec<&Project> = projects
            .into_iter()
            .filter(|project| self.filter.matches(project))
            .collect();
        matches.sort_by(|left, right| self.sort.compare(left, right));

        let skip = usize::try_from(self.window.skip).unwrap_or(usize::MAX);
        let take = usize::try_from(self.window.take).unwrap_or(usize::MAX);
        matches.into_iter().skip(skip).take(take).cloned().collect()
    }
}

// ============================================================================
// REQUEST PARAMETERS
// ============================================================================

/// Query string of `GET /projects`, as sent by the client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub sort_field: Option<String>,
    pub sort_direction: Option<String>,
}

/// Validated listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub sort: SortSpec,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_SIZE,
            search: None,
            sort: SortSpec::default(),
        }
    }
}

impl ListQuery {
    /// Missing, non-numeric or zero `page`/`limit` fall back to the defaults.
    /// An oversized limit or an unknown sort field/direction is rejected.
    pub fn from_params(params: &ListParams) -> Result<Self, ValidationError> {
        let page = lenient_number(params.page.as_deref())
            .map_or(DEFAULT_PAGE, |page| u32::try_from(page).unwrap_or(u32::MAX));
        let limit = match lenient_number(params.limit.as_deref()) {
            None => DEFAULT_PAGE_SIZE,
            Some(limit) if limit <= u64::from(MAX_PAGE_SIZE) => limit as u32,
            Some(_) => {
                return Err(ValidationError::InvalidQuery(format!(
                    "limit must be between 1 and {MAX_PAGE_SIZE}"
                )));
            }
        };

        let field = match non_blank(params.sort_field.as_deref()) {
            Some(raw) => SortField::parse(raw).ok_or_else(|| {
                ValidationError::InvalidQuery(format!("unsupported sort field '{raw}'"))
            })?,
            None => SortField::default(),
        };
        let direction = match non_blank(params.sort_direction.as_deref()) {
            Some(raw) => SortDirection::parse(raw).ok_or_else(|| {
                ValidationError::InvalidQuery(format!(
                    "sort direction must be 'asc' or 'desc', got '{raw}'"
                ))
            })?,
            None => SortDirection::default(),
        };

        Ok(Self {
            page,
            limit,
            search: non_blank(params.search.as_deref()).map(str::to_string),
            sort: SortSpec::new(field, direction),
        })
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = non_blank(Some(search.as_str())).map(str::to_string);
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_page(mut self, page: u32, limit: u32) -> Self {
        self.page = page.max(1);
        self.limit = limit.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn filter(&self) -> ProjectFilter {
        self.search
            .as_deref()
            .map(ProjectFilter::search)
            .unwrap_or_default()
    }

    pub fn window(&self) -> PageWindow {
        PageWindow::for_page(self.page, self.limit)
    }

    pub fn build(&self) -> ProjectQuery {
        ProjectQuery {
            filter: self.filter(),
            sort: self.sort,
            window: self.window(),
        }
    }
}

/// A positive count, or `None` when absent, zero or not a number.
/// Digit strings too long for `u64` saturate instead of counting as garbage.
fn lenient_number(raw: Option<&str>) -> Option<u64> {
    let digits = raw?.trim();
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let value = digits.parse::<u64>().unwrap_or(u64::MAX);
    (value > 0).then_some(value)
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

// ============================================================================
// RESPONSE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    /// `ceil(total / per_page)`; zero when nothing matched.
    pub pages: u64,
    pub current_page: u32,
    pub per_page: u32,
    pub has_more: bool,
}

impl Pagination {
    pub fn new(total: u64, query: &ListQuery, returned: usize) -> Self {
        let window = query.window();
        let returned = u64::try_from(returned).unwrap_or(u64::MAX);
        Self {
            total,
            pages: total.div_ceil(u64::from(query.limit.max(1))),
            current_page: query.page,
            per_page: query.limit,
            has_more: window.skip.saturating_add(returned) < total,
        }
    }
}

/// Body of `GET /projects`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPage {
    pub projects: Vec<Project>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ProjectId, ValidatedProject};
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};

    fn project(name: &str, eid: &str, description: &str, created_secs: i64) -> Project {
        let created_at: DateTime<Utc> = Utc.timestamp_opt(created_secs, 0).unwrap();
        Project::new(
            ProjectId::new(),
            ValidatedProject {
                name: name.to_string(),
                eid: eid.to_string(),
                description: description.to_string(),
                start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            },
            created_at,
        )
    }

    fn params(pairs: &[(&str, &str)]) -> ListParams {
        let mut params = ListParams::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "page" => params.page = value,
                "limit" => params.limit = value,
                "search" => params.search = value,
                "sortField" => params.sort_field = value,
                "sortDirection" => params.sort_direction = value,
                other => panic!("unknown param {other}"),
            }
        }
        params
    }

    #[test]
    fn test_defaults() {
        let query = ListQuery::from_params(&ListParams::default()).unwrap();
        assert_eq!(query, ListQuery::default());
        assert_eq!(query.sort.field, SortField::CreatedAt);
        assert_eq!(query.sort.direction, SortDirection::Desc);
        assert_eq!(query.window(), PageWindow { skip: 0, take: 5 });
    }

    #[test]
    fn test_lenient_numbers_fall_back() {
        for raw in ["0", "-3", "abc", ""] {
            let query = ListQuery::from_params(&params(&[("page", raw), ("limit", raw)])).unwrap();
            assert_eq!(query.page, DEFAULT_PAGE);
            assert_eq!(query.limit, DEFAULT_PAGE_SIZE);
        }
    }

    #[test]
    fn test_oversized_page_saturates() {
        let query = ListQuery::from_params(&params(&[("page", "5000000000")])).unwrap();
        assert_eq!(query.page, u32::MAX);
        assert_eq!(query.limit, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_rejects_bad_sort_and_limit() {
        assert!(ListQuery::from_params(&params(&[("sortField", "id")])).is_err());
        assert!(ListQuery::from_params(&params(&[("sortDirection", "up")])).is_err());
        assert!(ListQuery::from_params(&params(&[("limit", "101")])).is_err());
        assert!(ListQuery::from_params(&params(&[("limit", "5000000000")])).is_err());
        assert!(
            ListQuery::from_params(&params(&[("limit", "99999999999999999999999")])).is_err()
        );
        assert!(ListQuery::from_params(&params(&[("limit", "100")])).is_ok());
    }

    #[test]
    fn test_window_for_each_page() {
        for page in 1..=10u32 {
            let window = PageWindow::for_page(page, 7);
            assert_eq!(window.skip, u64::from(page - 1) * 7);
            assert_eq!(window.take, 7);
        }
    }

    #[test]
    fn test_sort_toggle() {
        let sort = SortSpec::default();
        let sort = sort.toggled(SortField::Name);
        assert_eq!(sort, SortSpec::new(SortField::Name, SortDirection::Asc));
        let sort = sort.toggled(SortField::Name);
        assert_eq!(sort, SortSpec::new(SortField::Name, SortDirection::Desc));
        let sort = sort.toggled(SortField::Name);
        assert_eq!(sort.direction, SortDirection::Asc);
        let sort = sort.toggled(SortField::Eid);
        assert_eq!(sort, SortSpec::new(SortField::Eid, SortDirection::Asc));

        let active = SortSpec::default().toggled(SortField::CreatedAt);
        assert_eq!(active.direction, SortDirection::Asc);
    }

    #[test]
    fn test_filter_matches_any_text_field() {
        let row = project("Apollo", "APL-7", "Lunar Module", 1);
        assert!(ProjectFilter::search("apo").matches(&row));
        assert!(ProjectFilter::search("apl-7").matches(&row));
        assert!(ProjectFilter::search("LUNAR").matches(&row));
        assert!(!ProjectFilter::search("gemini").matches(&row));
        assert!(ProjectFilter::search("   ").matches(&row));
        assert!(ProjectFilter::all().matches(&row));
    }

    #[test]
    fn test_apply_sorts_and_windows() {
        let rows = vec![
            project("charlie", "C", "", 3),
            project("alpha", "A", "", 1),
            project("bravo", "B", "", 2),
        ];

        let newest_first = ListQuery::default().build().apply(&rows);
        let names: Vec<_> = newest_first.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["charlie", "bravo", "alpha"]);

        let query = ListQuery::default()
            .with_sort(SortSpec::new(SortField::Name, SortDirection::Asc))
            .with_page(2, 2);
        let page = query.build().apply(&rows);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "charlie");
    }

    #[test]
    fn test_ties_break_on_id() {
        let rows = vec![project("same", "X", "", 5), project("same", "Y", "", 5)];
        let mut expected: Vec<_> = rows.iter().map(|p| p.id).collect();
        expected.sort();

        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let query = ListQuery::default().with_sort(SortSpec::new(SortField::Name, direction));
            let ids: Vec<_> = query.build().apply(&rows).iter().map(|p| p.id).collect();
            assert_eq!(ids, expected);
        }
    }

    #[test]
    fn test_pagination_report() {
        let query = ListQuery::default().with_page(1, 5);
        assert_eq!(
            Pagination::new(7, &query, 5),
            Pagination {
                total: 7,
                pages: 2,
                current_page: 1,
                per_page: 5,
                has_more: true
            }
        );

        let last = ListQuery::default().with_page(2, 5);
        assert!(!Pagination::new(7, &last, 2).has_more);

        let empty = Pagination::new(0, &ListQuery::default(), 0);
        assert_eq!(empty.pages, 0);
        assert!(!empty.has_more);
    }

    #[test]
    fn test_sort_field_names_round_trip_with_wire_names() {
        for field in SortField::ALL {
            assert_eq!(SortField::parse(field.as_str()), Some(field));
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.as_str()));
        }
    }
}
