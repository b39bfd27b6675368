/// Strapi's default page size when the request does not ask for one.
pub const DEFAULT_CMS_PAGE_SIZE: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// Filter, sort and pagination parameters for a collection read, rendered in
/// the bracketed query syntax the CMS understands
/// (`filters[startDate][$lte]=...`, `sort[0]=startDate:desc`, ...).
#[derive(Debug, Clone, Default)]
pub struct ContentQuery {
    filters: Vec<(String, String)>,
    sort: Vec<String>,
    page: Option<u32>,
    page_size: Option<u32>,
    populate_all: bool,
}

impl ContentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(self, field: &str, value: impl Into<String>) -> Self {
        self.filter(field, "$eq", value)
    }

    pub fn ne(self, field: &str, value: impl Into<String>) -> Self {
        self.filter(field, "$ne", value)
    }

    pub fn lte(self, field: &str, value: impl Into<String>) -> Self {
        self.filter(field, "$lte", value)
    }

    /// Matches records where `field` is unset or at least `value`, such as an
    /// end date that is open or still ahead. Uses the query's `$or` group.
    pub fn null_or_gte(self, field: &str, value: impl Into<String>) -> Self {
        self.filter(&format!("$or.0.{}", field), "$null", "true")
            .filter(&format!("$or.1.{}", field), "$gte", value)
    }

    pub fn in_values<I, S>(mut self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let base = filter_key(field, "$in");
        for (i, value) in values.into_iter().enumerate() {
            self.filters.push((format!("{}[{}]", base, i), value.into()));
        }
        self
    }

    pub fn sort(mut self, field: &str, direction: Direction) -> Self {
        self.sort.push(format!("{}:{}", field, direction.as_str()));
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page.max(1));
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size.max(1));
        self
    }

    pub fn populate_all(mut self) -> Self {
        self.populate_all = true;
        self
    }

    pub fn current_page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn current_page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_CMS_PAGE_SIZE)
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.filters.clone();

        for (i, sort) in self.sort.iter().enumerate() {
            pairs.push((format!("sort[{}]", i), sort.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("pagination[page]".to_string(), page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("pagination[pageSize]".to_string(), page_size.to_string()));
        }
        if self.populate_all {
            pairs.push(("populate".to_string(), "*".to_string()));
        }

        pairs
    }

    pub fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(self.to_pairs()).unwrap_or_else(|e| {
            tracing::warn!("Failed to encode CMS query: {}", e);
            String::new()
        })
    }

    fn filter(mut self, field: &str, operator: &str, value: impl Into<String>) -> Self {
        self.filters.push((filter_key(field, operator), value.into()));
        self
    }
}

/// `category.slug` + `$eq` -> `filters[category][slug][$eq]`
fn filter_key(field: &str, operator: &str) -> String {
    let mut key = String::from("filters");
    for segment in field.split('.') {
        key.push('[');
        key.push_str(segment);
        key.push(']');
    }
    key.push('[');
    key.push_str(operator);
    key.push(']');
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn test_filter_operators() {
        let query = ContentQuery::new()
            .eq("type", "event")
            .ne("slug", "current")
            .lte("startDate", "2024-05-01T00:00:00Z")
            .in_values("priority", ["urgent", "high"]);

        assert_eq!(
            query.to_pairs(),
            vec![
                pair("filters[type][$eq]", "event"),
                pair("filters[slug][$ne]", "current"),
                pair("filters[startDate][$lte]", "2024-05-01T00:00:00Z"),
                pair("filters[priority][$in][0]", "urgent"),
                pair("filters[priority][$in][1]", "high"),
            ]
        );
    }

    #[test]
    fn test_null_or_gte_group() {
        let query = ContentQuery::new().null_or_gte("endDate", "2024-05-01T00:00:00Z");
        assert_eq!(
            query.to_pairs(),
            vec![
                pair("filters[$or][0][endDate][$null]", "true"),
                pair("filters[$or][1][endDate][$gte]", "2024-05-01T00:00:00Z"),
            ]
        );
    }

    #[test]
    fn test_nested_field_path() {
        let query = ContentQuery::new().eq("category.slug", "culture");
        assert_eq!(query.to_pairs(), vec![pair("filters[category][slug][$eq]", "culture")]);
    }

    #[test]
    fn test_sort_pagination_populate() {
        let query = ContentQuery::new()
            .sort("priority", Direction::Desc)
            .sort("startDate", Direction::Desc)
            .page(2)
            .page_size(9)
            .populate_all();

        assert_eq!(
            query.to_pairs(),
            vec![
                pair("sort[0]", "priority:desc"),
                pair("sort[1]", "startDate:desc"),
                pair("pagination[page]", "2"),
                pair("pagination[pageSize]", "9"),
                pair("populate", "*"),
            ]
        );
        assert_eq!(query.current_page(), 2);
        assert_eq!(query.current_page_size(), 9);
    }

    #[test]
    fn test_defaults_and_clamping() {
        let query = ContentQuery::new();
        assert_eq!(query.current_page(), 1);
        assert_eq!(query.current_page_size(), DEFAULT_CMS_PAGE_SIZE);
        assert!(query.to_query_string().is_empty());

        let query = ContentQuery::new().page(0);
        assert_eq!(query.current_page(), 1);
    }

    #[test]
    fn test_query_string_is_encoded() {
        let query = ContentQuery::new().eq("title", "Sousse & co").populate_all();
        assert_eq!(
            query.to_query_string(),
            "filters%5Btitle%5D%5B%24eq%5D=Sousse+%26+co&populate=*"
        );
    }
}
