//! Sort keys for result lists and group orderings

use std::fmt;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// One `field:direction` entry of the `sort` parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: Direction,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.direction.as_str())
    }
}

/// Ordering of `group_by` buckets. The API default is [`GroupOrder::CountDesc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupOrder {
    #[default]
    CountDesc,
    CountAsc,
    KeyAsc,
    KeyDesc,
}

impl GroupOrder {
    pub(crate) fn sort_key(&self) -> SortKey {
        let (field, direction) = match self {
            Self::CountDesc => ("count", Direction::Desc),
            Self::CountAsc => ("count", Direction::Asc),
            Self::KeyAsc => ("key", Direction::Asc),
            Self::KeyDesc => ("key", Direction::Desc),
        };
        SortKey {
            field: field.to_string(),
            direction,
        }
    }
}
