use serde::{Deserialize, Serialize};

use super::validation::{FieldError, ValidationErrors};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_SORT: &str = "id";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Raw listing parameters as they arrive on the query string.
///
/// Zero and absent values fall back to the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub search: Option<String>,
}

/// A validated listing request. `sort` is always one of the columns the
/// caller declared sortable, so stores may splice it into SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: &'static str,
    pub order: SortOrder,
    pub search: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
            sort: DEFAULT_SORT,
            order: SortOrder::Asc,
            search: None,
        }
    }
}

impl PageRequest {
    pub fn parse(params: PageParams, sortable: &[&'static str]) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let page = errors.check(parse_bounded("page", params.page, DEFAULT_PAGE, None));
        let size = errors.check(parse_bounded(
            "size",
            params.size,
            DEFAULT_PAGE_SIZE,
            Some(MAX_PAGE_SIZE),
        ));

        let sort = match params.sort.as_deref().map(str::trim) {
            None | Some("") => Some(DEFAULT_SORT),
            Some(column) => errors.check(
                sortable
                    .iter()
                    .copied()
                    .find(|allowed| *allowed == column)
                    .ok_or_else(|| {
                        FieldError::new(
                            "sort",
                            format!("Must be one of: {}", sortable.join(" ")),
                        )
                    }),
            ),
        };

        let order = match params.order.as_deref().map(str::trim) {
            None | Some("") | Some("asc") => Some(SortOrder::Asc),
            Some("desc") => Some(SortOrder::Desc),
            Some(_) => errors.check(Err(FieldError::new("order", "Must be one of: asc desc"))),
        };

        let search = params
            .search
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty());

        errors.into_result()?;
        Ok(Self {
            page: page.unwrap_or(DEFAULT_PAGE),
            size: size.unwrap_or(DEFAULT_PAGE_SIZE),
            sort: sort.unwrap_or(DEFAULT_SORT),
            order: order.unwrap_or_default(),
            search,
        })
    }

    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }

    /// `%search%` for `ILIKE ... ESCAPE '\'`, if a search term was given.
    /// Wildcards in the term itself match literally.
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_ref().map(|s| {
            let mut pattern = String::with_capacity(s.len() + 2);
            pattern.push('%');
            for c in s.chars() {
                if matches!(c, '\\' | '%' | '_') {
                    pattern.push('\\');
                }
                pattern.push(c);
            }
            pattern.push('%');
            pattern
        })
    }
}

fn parse_bounded(
    field: &'static str,
    value: Option<i64>,
    default: u32,
    max: Option<u32>,
) -> Result<u32, FieldError> {
    let value = match value {
        None | Some(0) => return Ok(default),
        Some(v) if v < 0 => return Err(FieldError::new(field, "Minimum value is 1")),
        Some(v) => v,
    };
    if let Some(max) = max.filter(|max| value > i64::from(*max)) {
        return Err(FieldError::new(field, format!("Maximum value is {max}")));
    }
    u32::try_from(value).map_err(|_| FieldError::new(field, "Value out of range"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: u32,
    pub size: u32,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageInfo {
    pub fn new(page: u32, size: u32, total: u64) -> Self {
        let total_pages = total.div_ceil(u64::from(size.max(1)));
        Self {
            page,
            size,
            total,
            total_pages,
            has_next: u64::from(page) < total_pages,
            has_prev: page > 1,
        }
    }
}

/// One page of results plus the numbers needed to fetch the next.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub info: PageInfo,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: &PageRequest, total: u64) -> Self {
        Self {
            items,
            info: PageInfo::new(request.page, request.size, total),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            info: self.info,
        }
    }
}
