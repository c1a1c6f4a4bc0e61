//! Lazy page-by-page iteration over a query
//!
//! A [`Paginator`] issues one request per `next()` call and stops for good
//! after the last page or the first error. Dropping it mid-way has no side
//! effects.

use std::iter::FusedIterator;

use crate::entity::Record;
use crate::error::{Error, Result};
use crate::query::Query;
use crate::request::Request;
use crate::response::{MAX_OFFSET, Page};

/// How the paginator asks for the next page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageMethod {
    /// `cursor=*`, then each page's `next_cursor`. Not bound by the offset
    /// ceiling.
    #[default]
    Cursor,
    /// Increasing `page` numbers, ending quietly at the offset ceiling
    Page,
}

enum State {
    Start,
    Page(u32),
    Cursor(String),
    Done,
}

/// Iterator over the pages of a query
pub struct Paginator<'a, R> {
    query: Query<'a, R>,
    method: PageMethod,
    n_max: Option<usize>,
    base: Option<Request>,
    state: State,
    pages: usize,
    records: usize,
}

impl<'a, R: Record> Paginator<'a, R> {
    pub(crate) fn new(query: Query<'a, R>, method: PageMethod) -> Self {
        Self {
            query,
            method,
            n_max: None,
            base: None,
            state: State::Start,
            pages: 0,
            records: 0,
        }
    }

    /// Stop after `n` records in total, truncating the last page
    pub fn n_max(mut self, n: usize) -> Self {
        self.n_max = Some(n);
        self
    }

    pub fn method(&self) -> PageMethod {
        self.method
    }

    /// Records yielded so far
    pub fn records_seen(&self) -> usize {
        self.records
    }

    /// Flatten pages into individual records
    pub fn records(self) -> Records<'a, R> {
        Records {
            pages: self,
            current: Vec::new().into_iter(),
        }
    }

    fn remaining(&self) -> Option<usize> {
        self.n_max.map(|n| n.saturating_sub(self.records))
    }

    /// Validate once and work out the first position
    fn start(&mut self) -> Result<State> {
        if self.query.is_grouped() {
            return Err(Error::invalid("group_by queries cannot be paginated"));
        }
        let mut base = self.query.to_request()?;
        base.remove("page");

        let state = match self.method {
            PageMethod::Cursor => {
                if self.query.is_sampled() {
                    return Err(Error::invalid("sample cannot be combined with cursor paging"));
                }
                if self.query.requested_page().is_some() {
                    return Err(Error::invalid("page cannot be combined with cursor paging"));
                }
                State::Cursor("*".to_string())
            }
            PageMethod::Page => {
                let first = self.query.requested_page().unwrap_or(1);
                self.query.check_offset(first)?;
                State::Page(first)
            }
        };
        self.base = Some(base);
        Ok(state)
    }

    fn advance(&self, position: State, page: &Page<R>, full: bool) -> State {
        if !full || self.remaining() == Some(0) {
            return State::Done;
        }
        match position {
            State::Page(n) => {
                let next = n + 1;
                let per_page = u64::from(self.query.effective_per_page());
                if u64::from(next) * per_page > MAX_OFFSET {
                    log::debug!("page paging stopped at the {MAX_OFFSET} result offset limit");
                    State::Done
                } else {
                    State::Page(next)
                }
            }
            State::Cursor(_) => match &page.meta.next_cursor {
                Some(cursor) => State::Cursor(cursor.clone()),
                None => State::Done,
            },
            State::Start | State::Done => State::Done,
        }
    }
}

impl<R: Record> Iterator for Paginator<'_, R> {
    type Item = Result<Page<R>>;

    fn next(&mut self) -> Option<Self::Item> {
        // Any early return below leaves the paginator finished
        let position = match std::mem::replace(&mut self.state, State::Done) {
            State::Done => return None,
            State::Start => match self.start() {
                Ok(state) => state,
                Err(e) => return Some(Err(e)),
            },
            position => position,
        };
        if self.remaining() == Some(0) {
            return None;
        }

        let mut request = self.base.clone()?;
        match &position {
            State::Page(n) => request.set("page", n.to_string()),
            State::Cursor(cursor) => request.set("cursor", cursor.as_str()),
            State::Start | State::Done => return None,
        }

        let mut page = match self.query.executor().page::<R>(&request, false) {
            Ok(page) => page,
            Err(e) => return Some(Err(e)),
        };

        // An empty page after a full one only confirms the end
        if page.is_empty() && self.pages > 0 {
            return None;
        }

        let full = page.len() >= self.query.effective_per_page() as usize;
        if let Some(remaining) = self.remaining() {
            page.truncate(remaining);
        }
        self.pages += 1;
        self.records += page.len();
        self.state = self.advance(position, &page, full);
        Some(Ok(page))
    }
}

impl<R: Record> FusedIterator for Paginator<'_, R> {}

/// Record-by-record view of a [`Paginator`]
pub struct Records<'a, R> {
    pages: Paginator<'a, R>,
    current: std::vec::IntoIter<R>,
}

impl<R: Record> Iterator for Records<'_, R> {
    type Item = Result<R>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.current.next() {
                return Some(Ok(record));
            }
            match self.pages.next()? {
                Ok(page) => self.current = page.results.into_iter(),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

impl<R: Record> FusedIterator for Records<'_, R> {}
