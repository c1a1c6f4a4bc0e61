//! Immutable query builder
//!
//! Every builder method consumes the query and returns the updated one, so a
//! `Query` is a plain value: clone it to branch. Nothing is checked until a
//! terminal method (`get`, `count`, `by_id`, `by_ids`, `random`,
//! `autocomplete`, `paginate`) runs, and all checks happen before any
//! request is sent.

pub mod filter;
pub mod sort;

use std::collections::HashSet;
use std::marker::PhantomData;

use crate::entity::Record;
use crate::error::{Error, Result};
use crate::executor::Executor;
use crate::id::EntityId;
use crate::model::AutocompleteResult;
use crate::paginate::{PageMethod, Paginator};
use crate::request::Request;
use crate::response::{DEFAULT_PER_PAGE, MAX_OFFSET, MAX_PER_PAGE, Page};

pub use filter::{FilterSet, FilterValue, Operator};
pub use sort::{Direction, GroupOrder, SortKey};

/// Largest `sample` size the API accepts
pub const MAX_SAMPLE: u32 = 10_000;

/// Most identifiers one `by_ids` call may batch
pub const MAX_BATCH_IDS: usize = 50;

/// A query against the endpoint of record type `R`
pub struct Query<'a, R> {
    executor: &'a Executor,
    filters: FilterSet,
    search: Option<String>,
    sort: Vec<SortKey>,
    group_by: Option<Vec<String>>,
    group_order: Option<GroupOrder>,
    select: Option<Vec<String>>,
    sample: Option<(u32, Option<u64>)>,
    page: Option<u32>,
    per_page: Option<u32>,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for Query<'_, R> {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor,
            filters: self.filters.clone(),
            search: self.search.clone(),
            sort: self.sort.clone(),
            group_by: self.group_by.clone(),
            group_order: self.group_order,
            select: self.select.clone(),
            sample: self.sample,
            page: self.page,
            per_page: self.per_page,
            _record: PhantomData,
        }
    }
}

impl<'a, R: Record> Query<'a, R> {
    pub(crate) fn new(executor: &'a Executor) -> Self {
        Self {
            executor,
            filters: FilterSet::new(),
            search: None,
            sort: Vec::new(),
            group_by: None,
            group_order: None,
            select: None,
            sample: None,
            page: None,
            per_page: None,
            _record: PhantomData,
        }
    }

    // -- filters --

    /// `key:value`
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filters = self.filters.filter(key, value);
        self
    }

    /// `key:>value`
    pub fn filter_gt(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filters = self.filters.gt(key, value);
        self
    }

    /// `key:<value`
    pub fn filter_lt(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filters = self.filters.lt(key, value);
        self
    }

    /// Inclusive lower bound on an integer or date field
    pub fn filter_gte(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filters = self.filters.gte(key, value);
        self
    }

    /// Inclusive upper bound on an integer or date field
    pub fn filter_lte(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filters = self.filters.lte(key, value);
        self
    }

    /// `key:!value`
    pub fn filter_not(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filters = self.filters.not(key, value);
        self
    }

    /// Match any of `values`
    pub fn filter_or<V: Into<FilterValue>>(
        mut self,
        key: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.filters = self.filters.any_of(key, values);
        self
    }

    /// Match all of `values`
    pub fn filter_all<V: Into<FilterValue>>(
        mut self,
        key: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.filters = self.filters.all_of(key, values);
        self
    }

    /// Filters on a nested object, e.g. `authorships` + `institutions.country_code`
    pub fn filter_nested(mut self, prefix: &str, set: FilterSet) -> Self {
        self.filters = self.filters.nested(prefix, set);
        self
    }

    // -- search --

    /// Full-text search across the entity's default search fields
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Full-text search restricted to one field (`title`, `abstract`, ...)
    pub fn search_filter(mut self, field: impl AsRef<str>, term: impl AsRef<str>) -> Self {
        self.filters = self.filters.search(field, term);
        self
    }

    // -- ordering, grouping, shaping --

    /// Add a sort key; repeated calls sort by each key in turn
    pub fn sort(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.sort.push(SortKey {
            field: field.into(),
            direction,
        });
        self
    }

    /// Aggregate counts by one or two fields instead of returning records
    pub fn group_by<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.group_by = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Bucket ordering for a grouped query
    pub fn sort_groups(mut self, order: GroupOrder) -> Self {
        self.group_order = Some(order);
        self
    }

    /// Return only these top-level fields
    pub fn select<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.select = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Random subset of `n` matches; a seed makes it reproducible
    pub fn sample(mut self, n: u32, seed: Option<u64>) -> Self {
        self.sample = Some((n, seed));
        self
    }

    // -- paging --

    /// 1-based page number
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Results per page, 1 to 200
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    // -- inspection --

    pub fn is_grouped(&self) -> bool {
        self.group_by.is_some()
    }

    pub(crate) fn is_sampled(&self) -> bool {
        self.sample.is_some()
    }

    pub(crate) fn executor(&self) -> &'a Executor {
        self.executor
    }

    pub(crate) fn requested_page(&self) -> Option<u32> {
        self.page
    }

    /// Page size the API will use
    pub fn effective_per_page(&self) -> u32 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE)
    }

    /// Check the query and build the list request it describes.
    pub fn to_request(&self) -> Result<Request> {
        self.validate()?;

        let mut request = Request::list(R::KIND);
        if let Some(filter) = self.filters.render()? {
            request.set("filter", filter);
        }
        if let Some(search) = &self.search {
            request.set("search", search.as_str());
        }

        let mut sort = self.sort.clone();
        if let Some(order) = self.group_order {
            sort.push(order.sort_key());
        }
        if !sort.is_empty() {
            let keys: Vec<String> = sort.iter().map(SortKey::to_string).collect();
            request.set("sort", keys.join(","));
        }

        if let Some(fields) = &self.group_by {
            request.set("group-by", fields.join(","));
        }
        if let Some(fields) = &self.select {
            request.set("select", fields.join(","));
        }
        if let Some((n, seed)) = self.sample {
            request.set("sample", n.to_string());
            if let Some(seed) = seed {
                request.set("seed", seed.to_string());
            }
        }
        if let Some(page) = self.page {
            request.set("page", page.to_string());
        }
        if let Some(per_page) = self.per_page {
            request.set("per-page", per_page.to_string());
        }
        Ok(request)
    }

    fn validate(&self) -> Result<()> {
        if let Some(fields) = &self.group_by {
            if fields.is_empty() || fields.len() > 2 {
                return Err(Error::invalid(format!(
                    "group_by takes one or two fields, got {}",
                    fields.len()
                )));
            }
            if fields.iter().any(|f| f.is_empty()) {
                return Err(Error::invalid("group_by field is empty"));
            }
            if self.select.is_some() {
                return Err(Error::invalid("select cannot be combined with group_by"));
            }
            if let Some(key) = self
                .sort
                .iter()
                .find(|k| k.field != "key" && k.field != "count")
            {
                return Err(Error::invalid(format!(
                    "grouped queries sort by key or count, not {}",
                    key.field
                )));
            }
        } else if self.group_order.is_some() {
            return Err(Error::invalid("sort_groups needs group_by"));
        }

        if let Some(fields) = &self.select {
            if fields.is_empty() || fields.iter().any(|f| f.is_empty()) {
                return Err(Error::invalid("select needs at least one field name"));
            }
        }

        if let Some((n, _)) = self.sample {
            if n == 0 || n > MAX_SAMPLE {
                return Err(Error::invalid(format!(
                    "sample size must be 1..={MAX_SAMPLE}, got {n}"
                )));
            }
        }

        if let Some(per_page) = self.per_page {
            if per_page == 0 || per_page > MAX_PER_PAGE {
                return Err(Error::invalid(format!(
                    "per_page must be 1..={MAX_PER_PAGE}, got {per_page}"
                )));
            }
        }
        if self.page == Some(0) {
            return Err(Error::invalid("page numbers start at 1"));
        }

        if self.search.is_none() && self.sort.iter().any(|k| k.field == "relevance_score") {
            return Err(Error::invalid("sorting by relevance_score needs search"));
        }
        Ok(())
    }

    /// `OffsetExceeded` if the requested page lies past the offset ceiling
    pub(crate) fn check_offset(&self, page: u32) -> Result<()> {
        let per_page = self.effective_per_page();
        if u64::from(page) * u64::from(per_page) > MAX_OFFSET {
            return Err(Error::OffsetExceeded { page, per_page });
        }
        Ok(())
    }

    /// Reject list-only settings on single-record operations
    fn ensure_lookup(&self, op: &str, allow_filters: bool, allow_select: bool) -> Result<()> {
        let offending = [
            (!allow_filters && !self.filters.is_empty(), "filter"),
            (!allow_select && self.select.is_some(), "select"),
            (self.search.is_some(), "search"),
            (!self.sort.is_empty() || self.group_order.is_some(), "sort"),
            (self.group_by.is_some(), "group_by"),
            (self.sample.is_some(), "sample"),
            (self.page.is_some() || self.per_page.is_some(), "paging"),
        ];
        match offending.iter().find(|(set, _)| *set) {
            Some((_, setting)) => Err(Error::invalid(format!("{op} does not take {setting}"))),
            None => Ok(()),
        }
    }

    fn select_param(&self, mut request: Request) -> Result<Request> {
        if let Some(fields) = &self.select {
            if fields.is_empty() || fields.iter().any(|f| f.is_empty()) {
                return Err(Error::invalid("select needs at least one field name"));
            }
            request.set("select", fields.join(","));
        }
        Ok(request)
    }

    // -- terminal operations --

    /// One page of results (or of groups, for a grouped query)
    pub fn get(self) -> Result<Page<R>> {
        let request = self.to_request()?;
        self.check_offset(self.page.unwrap_or(1))?;
        self.executor.page(&request, self.is_grouped())
    }

    /// Total number of matching records
    pub fn count(self) -> Result<u64> {
        let mut request = self.to_request()?;
        for key in ["group-by", "sort", "select", "page"] {
            request.remove(key);
        }
        request.set("per-page", "1");
        let page: Page<R> = self.executor.page(&request, false)?;
        Ok(page.meta.count)
    }

    /// Single record by any accepted identifier spelling.
    ///
    /// Only `select` applies; other settings are rejected.
    pub fn by_id(self, id: &str) -> Result<R> {
        self.ensure_lookup("by_id", false, true)?;
        let parsed = EntityId::parse(id)?;
        parsed.ensure_kind(R::KIND)?;
        let request = self.select_param(Request::entity(R::KIND, &parsed))?;
        self.executor.one(&request, id)
    }

    /// Up to 50 records of one identifier namespace in a single request.
    ///
    /// Unknown identifiers are simply absent from the page.
    pub fn by_ids<S: AsRef<str>>(self, raw_ids: impl IntoIterator<Item = S>) -> Result<Page<R>> {
        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        for raw in raw_ids {
            let id = EntityId::parse(raw.as_ref())?;
            if seen.insert(id.clone()) {
                ids.push(id);
            }
        }
        if ids.is_empty() {
            return Err(Error::invalid("by_ids needs at least one identifier"));
        }
        if ids.len() > MAX_BATCH_IDS {
            return Err(Error::invalid(format!(
                "by_ids takes at most {MAX_BATCH_IDS} identifiers, got {}",
                ids.len()
            )));
        }

        let namespace = ids[0].namespace();
        if let Some(other) = ids.iter().find(|id| id.namespace() != namespace) {
            return Err(Error::invalid(format!(
                "by_ids identifiers must share one namespace: {namespace} and {}",
                other.namespace()
            )));
        }
        let key = namespace.filter_key().ok_or_else(|| {
            Error::invalid(format!("{namespace} identifiers cannot be batched"))
        })?;
        for id in &ids {
            id.ensure_kind(R::KIND)?;
        }
        if self.is_grouped() {
            return Err(Error::invalid("by_ids cannot be combined with group_by"));
        }

        let count = ids.len() as u32;
        let mut query = self.filter_or(key, ids.iter().map(|id| id.value().to_string()));
        query.page = None;
        query.per_page = Some(count);
        query.get()
    }

    /// One random record
    pub fn random(self) -> Result<R> {
        self.ensure_lookup("random", false, true)?;
        let request = self.select_param(Request::random(R::KIND))?;
        self.executor.one(&request, "random")
    }

    /// Typeahead matches for `q`; filters narrow the candidates
    pub fn autocomplete(self, q: &str) -> Result<Vec<AutocompleteResult>> {
        self.ensure_lookup("autocomplete", true, false)?;
        let q = q.trim();
        if q.is_empty() {
            return Err(Error::invalid("autocomplete needs a search prefix"));
        }
        let mut request = Request::autocomplete(R::KIND).with("q", q);
        if let Some(filter) = self.filters.render()? {
            request.set("filter", filter);
        }
        self.executor.autocomplete(&request)
    }

    /// Lazy sequence of pages using cursor paging
    pub fn paginate(self) -> Paginator<'a, R> {
        Paginator::new(self, PageMethod::Cursor)
    }

    /// Lazy sequence of pages using the given continuation method
    pub fn paginate_with(self, method: PageMethod) -> Paginator<'a, R> {
        Paginator::new(self, method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Author, Publisher, Work};
    use crate::testing::{MockTransport, author_page};
    use chrono::NaiveDate;
    use reqwest::Url;
    use std::sync::Arc;

    fn setup() -> (Arc<MockTransport>, Executor) {
        let mock = Arc::new(MockTransport::new());
        let exec = Executor::new(
            mock.clone(),
            Url::parse("https://api.openalex.org").unwrap(),
            None,
            None,
        );
        (mock, exec)
    }

    fn invalid<T: std::fmt::Debug>(result: Result<T>) -> String {
        match result {
            Err(Error::InvalidQuery(msg)) => msg,
            other => panic!("expected InvalidQuery, got {other:?}"),
        }
    }

    #[test]
    fn builder_is_immutable_value() {
        let (_, exec) = setup();
        let base = Query::<Work>::new(&exec).filter("is_oa", true);
        let narrowed = base.clone().filter("publication_year", 2020);
        assert_eq!(base.to_request().unwrap().param("filter"), Some("is_oa:true"));
        assert_eq!(
            narrowed.to_request().unwrap().param("filter"),
            Some("is_oa:true,publication_year:2020")
        );
    }

    #[test]
    fn full_wire_encoding() {
        let (_, exec) = setup();
        let request = Query::<Work>::new(&exec)
            .filter("has_doi", true)
            .filter_gte("publication_date", NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())
            .search("coral reef")
            .sort("cited_by_count", Direction::Desc)
            .sort("publication_year", Direction::Asc)
            .select(["id", "display_name"])
            .page(2)
            .per_page(50)
            .to_request()
            .unwrap();
        assert_eq!(request.path(), "works");
        assert_eq!(
            request.param("filter"),
            Some("has_doi:true,publication_date:>2019-12-31")
        );
        assert_eq!(request.param("search"), Some("coral reef"));
        assert_eq!(request.param("sort"), Some("cited_by_count:desc,publication_year:asc"));
        assert_eq!(request.param("select"), Some("id,display_name"));
        assert_eq!(request.param("page"), Some("2"));
        assert_eq!(request.param("per-page"), Some("50"));
    }

    #[test]
    fn grouping_encoding() {
        let (_, exec) = setup();
        let request = Query::<Work>::new(&exec)
            .group_by(["authorships.institutions.country_code", "is_oa"])
            .sort_groups(GroupOrder::KeyAsc)
            .to_request()
            .unwrap();
        assert_eq!(
            request.param("group-by"),
            Some("authorships.institutions.country_code,is_oa")
        );
        assert_eq!(request.param("sort"), Some("key:asc"));
    }

    #[test]
    fn sample_encoding() {
        let (_, exec) = setup();
        let request = Query::<Author>::new(&exec)
            .sample(100, Some(42))
            .to_request()
            .unwrap();
        assert_eq!(request.param("sample"), Some("100"));
        assert_eq!(request.param("seed"), Some("42"));
    }

    #[test]
    fn three_group_fields_rejected_without_request() {
        let (mock, exec) = setup();
        let result = Query::<Work>::new(&exec).group_by(["a", "b", "c"]).get();
        assert!(invalid(result).contains("one or two"));
        assert!(mock.urls().is_empty());
    }

    #[test]
    fn empty_group_by_rejected() {
        let (_, exec) = setup();
        invalid(Query::<Work>::new(&exec).group_by(Vec::<String>::new()).to_request());
    }

    #[test]
    fn sample_bounds() {
        let (_, exec) = setup();
        invalid(Query::<Work>::new(&exec).sample(0, None).to_request());
        invalid(Query::<Work>::new(&exec).sample(10_001, None).to_request());
        assert!(Query::<Work>::new(&exec).sample(10_000, None).to_request().is_ok());
    }

    #[test]
    fn paging_bounds() {
        let (_, exec) = setup();
        invalid(Query::<Work>::new(&exec).per_page(0).to_request());
        invalid(Query::<Work>::new(&exec).per_page(201).to_request());
        invalid(Query::<Work>::new(&exec).page(0).to_request());
        assert!(Query::<Work>::new(&exec).per_page(200).to_request().is_ok());
    }

    #[test]
    fn select_with_group_by_rejected() {
        let (_, exec) = setup();
        invalid(
            Query::<Work>::new(&exec)
                .group_by(["is_oa"])
                .select(["id"])
                .to_request(),
        );
    }

    #[test]
    fn relevance_sort_needs_search() {
        let (_, exec) = setup();
        invalid(
            Query::<Work>::new(&exec)
                .sort("relevance_score", Direction::Desc)
                .to_request(),
        );
        assert!(Query::<Work>::new(&exec)
            .search("dna")
            .sort("relevance_score", Direction::Desc)
            .to_request()
            .is_ok());
    }

    #[test]
    fn grouped_sort_limited_to_key_and_count() {
        let (_, exec) = setup();
        invalid(
            Query::<Work>::new(&exec)
                .group_by(["is_oa"])
                .sort("cited_by_count", Direction::Desc)
                .to_request(),
        );
        assert!(Query::<Work>::new(&exec)
            .group_by(["is_oa"])
            .sort("count", Direction::Asc)
            .to_request()
            .is_ok());
    }

    #[test]
    fn sort_groups_without_group_by_rejected() {
        let (_, exec) = setup();
        invalid(Query::<Work>::new(&exec).sort_groups(GroupOrder::CountAsc).to_request());
    }

    #[test]
    fn inclusive_bound_on_text_rejected_without_request() {
        let (mock, exec) = setup();
        invalid(Query::<Work>::new(&exec).filter_lte("display_name", "Z").get());
        assert!(mock.urls().is_empty());
    }

    #[test]
    fn offset_ceiling() {
        let (mock, exec) = setup();
        let result = Query::<Work>::new(&exec).page(51).per_page(200).get();
        assert!(matches!(
            result,
            Err(Error::OffsetExceeded {
                page: 51,
                per_page: 200
            })
        ));
        let result = Query::<Work>::new(&exec).page(401).get();
        assert!(matches!(
            result,
            Err(Error::OffsetExceeded {
                page: 401,
                per_page: 25
            })
        ));
        assert!(mock.urls().is_empty());
    }

    #[test]
    fn last_page_under_ceiling_allowed() {
        let (mock, exec) = setup();
        mock.push_ok(author_page(0, 0, None));
        assert!(Query::<Author>::new(&exec).page(50).per_page(200).get().is_ok());
        assert_eq!(mock.urls().len(), 1);
    }

    #[test]
    fn get_returns_page() {
        let (mock, exec) = setup();
        mock.push_ok(author_page(3, 3, None));
        let page = Query::<Author>::new(&exec)
            .filter("has_orcid", true)
            .get()
            .unwrap();
        assert_eq!(page.meta.count, 3);
        assert_eq!(page.len(), 3);
        assert_eq!(mock.param(0, "filter").as_deref(), Some("has_orcid:true"));
        assert_eq!(mock.param(0, "per-page"), None);
    }

    #[test]
    fn grouped_get() {
        let (mock, exec) = setup();
        mock.push_ok(
            r#"{"meta": {"count": 10, "groups_count": 2}, "results": [],
                "group_by": [{"key": "true", "count": 7}, {"key": "false", "count": 3}]}"#,
        );
        let page = Query::<Work>::new(&exec).group_by(["is_oa"]).get().unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.group_by.len(), 2);
        assert_eq!(page.group_by[0].count, 7);
    }

    #[test]
    fn count_requests_single_record() {
        let (mock, exec) = setup();
        mock.push_ok(author_page(1, 12345, None));
        let count = Query::<Author>::new(&exec)
            .filter("has_orcid", true)
            .select(["id"])
            .count()
            .unwrap();
        assert_eq!(count, 12345);
        assert_eq!(mock.param(0, "per-page").as_deref(), Some("1"));
        assert_eq!(mock.param(0, "select"), None);
    }

    #[test]
    fn by_id_paths() {
        let (mock, exec) = setup();
        mock.push_ok(r#"{"id": "https://openalex.org/P4310320990", "display_name": "Elsevier BV"}"#);
        mock.push_ok(r#"{"id": "https://openalex.org/P4310320990", "display_name": "Elsevier BV"}"#);
        let a = Query::<Publisher>::new(&exec).by_id("wikidata:Q746413").unwrap();
        let b = Query::<Publisher>::new(&exec)
            .by_id("https://openalex.org/P4310320990")
            .unwrap();
        assert_eq!(a.id, b.id);
        assert_eq!(
            mock.urls(),
            vec![
                "https://api.openalex.org/publishers/wikidata:Q746413",
                "https://api.openalex.org/publishers/P4310320990",
            ]
        );
    }

    #[test]
    fn by_id_with_select() {
        let (mock, exec) = setup();
        mock.push_ok(r#"{"id": "https://openalex.org/A1"}"#);
        let author = Query::<Author>::new(&exec)
            .select(["id"])
            .by_id("A1")
            .unwrap();
        assert!(author.display_name.is_none());
        assert_eq!(mock.param(0, "select").as_deref(), Some("id"));
    }

    #[test]
    fn by_id_kind_mismatch() {
        let (mock, exec) = setup();
        invalid(Query::<Author>::new(&exec).by_id("W2741809807"));
        assert!(mock.urls().is_empty());
    }

    #[test]
    fn by_id_rejects_list_settings() {
        let (_, exec) = setup();
        let msg = invalid(Query::<Author>::new(&exec).filter("x", 1).by_id("A1"));
        assert!(msg.contains("filter"));
    }

    #[test]
    fn by_id_not_found() {
        let (mock, exec) = setup();
        mock.push_err(alexandria_core::TransportError::Status {
            status: 404,
            body: String::new(),
        });
        let err = Query::<Author>::new(&exec).by_id("A404").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn by_ids_builds_or_filter() {
        let (mock, exec) = setup();
        mock.push_ok(author_page(2, 2, None));
        let page = Query::<Author>::new(&exec)
            .by_ids(["A1", "https://openalex.org/A2", "A3"])
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(mock.param(0, "filter").as_deref(), Some("openalex:A1|A2|A3"));
        assert_eq!(mock.param(0, "per-page").as_deref(), Some("3"));
    }

    #[test]
    fn by_ids_duplicates_collapsed() {
        let (mock, exec) = setup();
        mock.push_ok(author_page(2, 2, None));
        Query::<Author>::new(&exec)
            .by_ids(["A1", "https://openalex.org/A1", "a1", "A2"])
            .unwrap();
        assert_eq!(mock.param(0, "filter").as_deref(), Some("openalex:A1|A2"));
        assert_eq!(mock.param(0, "per-page").as_deref(), Some("2"));
    }

    #[test]
    fn by_ids_dois() {
        let (mock, exec) = setup();
        mock.push_ok(r#"{"meta": {"count": 0}, "results": []}"#);
        Query::<Work>::new(&exec)
            .by_ids(["10.7717/peerj.4375", "https://doi.org/10.1038/nature12373"])
            .unwrap();
        assert_eq!(
            mock.param(0, "filter").as_deref(),
            Some("doi:10.7717/peerj.4375|10.1038/nature12373")
        );
    }

    #[test]
    fn by_ids_limits() {
        let (mock, exec) = setup();
        invalid(Query::<Author>::new(&exec).by_ids(Vec::<String>::new()));
        let many: Vec<String> = (1..=51).map(|i| format!("A{i}")).collect();
        invalid(Query::<Author>::new(&exec).by_ids(&many));
        invalid(Query::<Author>::new(&exec).by_ids(["A1", "orcid:0000-0001-6187-6610"]));
        invalid(Query::<Author>::new(&exec).by_ids(["wikidata:Q1", "wikidata:Q2"]));
        invalid(Query::<Author>::new(&exec).by_ids(["A1", "W2"]));
        assert!(mock.urls().is_empty());
    }

    #[test]
    fn by_ids_fifty_allowed() {
        let (mock, exec) = setup();
        mock.push_ok(author_page(50, 50, None));
        let ids: Vec<String> = (1..=50).map(|i| format!("A{i}")).collect();
        let page = Query::<Author>::new(&exec).by_ids(&ids).unwrap();
        assert_eq!(page.len(), 50);
        assert_eq!(mock.param(0, "per-page").as_deref(), Some("50"));
    }

    #[test]
    fn random_record() {
        let (mock, exec) = setup();
        mock.push_ok(r#"{"id": "https://openalex.org/W7"}"#);
        let work = Query::<Work>::new(&exec).random().unwrap();
        assert_eq!(work.id.as_deref(), Some("https://openalex.org/W7"));
        assert_eq!(mock.urls(), vec!["https://api.openalex.org/works/random"]);
    }

    #[test]
    fn autocomplete_with_filter() {
        let (mock, exec) = setup();
        mock.push_ok(r#"{"results": [{"id": "https://openalex.org/A1", "display_name": "Jason Priem"}]}"#);
        let hits = Query::<Author>::new(&exec)
            .filter("has_orcid", true)
            .autocomplete("jason pr")
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(mock.param(0, "q").as_deref(), Some("jason pr"));
        assert_eq!(mock.param(0, "filter").as_deref(), Some("has_orcid:true"));
    }

    #[test]
    fn autocomplete_empty_prefix_rejected() {
        let (_, exec) = setup();
        invalid(Query::<Author>::new(&exec).autocomplete("  "));
    }
}
