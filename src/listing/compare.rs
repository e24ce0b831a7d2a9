//! Comparator chain for list ordering.
//!
//! Each [`CompareKey`] compares two resources on one dimension using natural
//! order (`Less` means the left value is smaller or older). Missing values sort
//! as the smallest value. A [`CompareChain`] evaluates keys in priority order,
//! applies each key's [`Direction`], and stops at the first non-`Equal` result.

use crate::domain::Resource;
use crate::errors::{DevopsError, Result};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A single sort dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareKey {
    CreationTime,
    StartTime,
    RefName,
    RunId,
    Name,
}

impl CompareKey {
    pub const ALL: [CompareKey; 5] = [
        CompareKey::CreationTime,
        CompareKey::StartTime,
        CompareKey::RefName,
        CompareKey::RunId,
        CompareKey::Name,
    ];

    /// Field name accepted in `sortBy`
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareKey::CreationTime => "creationTimestamp",
            CompareKey::StartTime => "startTime",
            CompareKey::RefName => "refName",
            CompareKey::RunId => "runId",
            CompareKey::Name => "name",
        }
    }

    pub fn compare<R: Resource + ?Sized>(&self, left: &R, right: &R) -> Ordering {
        match self {
            CompareKey::CreationTime => compare_creation_time(left, right),
            CompareKey::StartTime => compare_start_time(left, right),
            CompareKey::RefName => compare_ref_name(left, right),
            CompareKey::RunId => compare_run_id(left, right),
            CompareKey::Name => compare_name(left, right),
        }
    }

    /// Like [`compare`](Self::compare), except that two malformed run ids fall
    /// back to byte order, so the result is a total order fit for `sort_by`.
    pub fn total_compare<R: Resource + ?Sized>(&self, left: &R, right: &R) -> Ordering {
        let ordering = self.compare(left, right);
        if *self == CompareKey::RunId
            && ordering == Ordering::Less
            && self.compare(right, left) == Ordering::Less
        {
            return left.run_id().cmp(&right.run_id());
        }
        ordering
    }
}

impl fmt::Display for CompareKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompareKey {
    type Err = DevopsError;

    fn from_str(s: &str) -> Result<Self> {
        CompareKey::ALL.into_iter().find(|key| key.as_str() == s).ok_or_else(|| {
            let known: Vec<&str> = CompareKey::ALL.iter().map(CompareKey::as_str).collect();
            DevopsError::config(format!(
                "unknown sort field '{}', expected one of: {}",
                s,
                known.join(", ")
            ))
        })
    }
}

fn compare_optional_time(left: Option<DateTime<Utc>>, right: Option<DateTime<Utc>>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(l), Some(r)) => l.cmp(&r),
    }
}

pub fn compare_creation_time<R: Resource + ?Sized>(left: &R, right: &R) -> Ordering {
    compare_optional_time(left.creation_timestamp(), right.creation_timestamp())
}

pub fn compare_start_time<R: Resource + ?Sized>(left: &R, right: &R) -> Ordering {
    compare_optional_time(left.start_time(), right.start_time())
}

/// A resource without a source reference sorts first.
pub fn compare_ref_name<R: Resource + ?Sized>(left: &R, right: &R) -> Ordering {
    match (left.scm_ref_name(), right.scm_ref_name()) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(l), Some(r)) => l.cmp(r),
    }
}

/// Compares Jenkins build numbers numerically.
///
/// An empty or missing id sorts first. When the left id does not parse as an
/// integer the result is `Less` even if the right id does not parse either;
/// callers relying on symmetry for two malformed ids will not get it.
pub fn compare_run_id<R: Resource + ?Sized>(left: &R, right: &R) -> Ordering {
    let left_id = left.run_id().unwrap_or_default();
    let right_id = right.run_id().unwrap_or_default();

    match (left_id.is_empty(), right_id.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }
    if left_id == right_id {
        return Ordering::Equal;
    }

    let Ok(left_num) = left_id.parse::<i64>() else {
        return Ordering::Less;
    };
    let Ok(right_num) = right_id.parse::<i64>() else {
        return Ordering::Greater;
    };
    left_num.cmp(&right_num)
}

/// Byte-wise lexicographic order of names
pub fn compare_name<R: Resource + ?Sized>(left: &R, right: &R) -> Ordering {
    left.name().cmp(right.name())
}

/// Whether a key places smaller or larger values first in the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Ascending,
    #[default]
    Descending,
}

impl Direction {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            Direction::Ascending
        } else {
            Direction::Descending
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

/// Ordered list of sort keys evaluated until one is decisive
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompareChain {
    links: Vec<(CompareKey, Direction)>,
}

impl CompareChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, key: CompareKey, direction: Direction) -> Self {
        self.links.push((key, direction));
        self
    }

    /// Newest first, then ascending name.
    pub fn default_list_order() -> Self {
        Self::new()
            .then(CompareKey::CreationTime, Direction::Descending)
            .then(CompareKey::Name, Direction::Ascending)
    }

    /// Default order with the secondary pipeline-run keys enabled between
    /// creation time and the name tie-break.
    pub fn pipeline_run_extended() -> Self {
        Self::new()
            .then(CompareKey::CreationTime, Direction::Descending)
            .then(CompareKey::StartTime, Direction::Descending)
            .then(CompareKey::RefName, Direction::Descending)
            .then(CompareKey::RunId, Direction::Descending)
            .then(CompareKey::Name, Direction::Ascending)
    }

    /// Explicit sort on one key, with the ascending name tie-break appended
    /// unless the key already is the name.
    pub fn sorted_by(key: CompareKey, direction: Direction) -> Self {
        let chain = Self::new().then(key, direction);
        if key == CompareKey::Name {
            chain
        } else {
            chain.then(CompareKey::Name, Direction::Ascending)
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = CompareKey> + '_ {
        self.links.iter().map(|(key, _)| *key)
    }

    /// Position of `left` relative to `right` in the list: `Less` means
    /// `left` is listed first.
    pub fn compare<R: Resource + ?Sized>(&self, left: &R, right: &R) -> Ordering {
        self.links
            .iter()
            .map(|(key, direction)| direction.apply(key.compare(left, right)))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }

    /// Total-order variant of [`compare`](Self::compare) used for sorting.
    pub fn sort_order<R: Resource + ?Sized>(&self, left: &R, right: &R) -> Ordering {
        self.links
            .iter()
            .map(|(key, direction)| direction.apply(key.total_compare(left, right)))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }

    /// True when `left` is listed before `right` or the two tie on every key.
    pub fn precedes<R: Resource + ?Sized>(&self, left: &R, right: &R) -> bool {
        self.compare(left, right) != Ordering::Greater
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PipelineRun;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2024-05-01T10:00:00Z".parse().unwrap()
    }

    fn run(name: &str) -> PipelineRun {
        PipelineRun::new("project-a", name)
    }

    #[test]
    fn test_creation_time_compare() {
        let tomorrow = now() + Duration::hours(24);
        let cases = [
            (run("a"), run("b"), Ordering::Equal),
            (run("a").with_creation_timestamp(now()), run("b").with_creation_timestamp(now()), Ordering::Equal),
            (run("a").with_creation_timestamp(now()), run("b").with_creation_timestamp(tomorrow), Ordering::Less),
            (run("a").with_creation_timestamp(tomorrow), run("b").with_creation_timestamp(now()), Ordering::Greater),
            (run("a"), run("b").with_creation_timestamp(now()), Ordering::Less),
            (run("a").with_creation_timestamp(now()), run("b"), Ordering::Greater),
        ];
        for (i, (left, right, want)) in cases.iter().enumerate() {
            assert_eq!(compare_creation_time(left, right), *want, "case {}", i);
        }
    }

    #[test]
    fn test_start_time_compare() {
        let tomorrow = now() + Duration::hours(24);
        assert_eq!(compare_start_time(&run("a"), &run("b")), Ordering::Equal);
        assert_eq!(
            compare_start_time(&run("a").with_start_time(now()), &run("b").with_start_time(now())),
            Ordering::Equal
        );
        assert_eq!(compare_start_time(&run("a"), &run("b").with_start_time(now())), Ordering::Less);
        assert_eq!(
            compare_start_time(&run("a").with_start_time(now()), &run("b")),
            Ordering::Greater
        );
        assert_eq!(
            compare_start_time(
                &run("a").with_start_time(now()),
                &run("b").with_start_time(tomorrow)
            ),
            Ordering::Less
        );
        assert_eq!(
            compare_start_time(
                &run("a").with_start_time(tomorrow),
                &run("b").with_start_time(now())
            ),
            Ordering::Greater
        );
    }

    #[test]
    fn test_ref_name_compare() {
        assert_eq!(compare_ref_name(&run("a"), &run("b")), Ordering::Equal);
        assert_eq!(compare_ref_name(&run("a"), &run("b").with_scm_ref("b")), Ordering::Less);
        assert_eq!(compare_ref_name(&run("a").with_scm_ref("a"), &run("b")), Ordering::Greater);
        assert_eq!(
            compare_ref_name(&run("a").with_scm_ref("a"), &run("b").with_scm_ref("b")),
            Ordering::Less
        );
        assert_eq!(
            compare_ref_name(&run("b").with_scm_ref("b"), &run("a").with_scm_ref("a")),
            Ordering::Greater
        );
        assert_eq!(
            compare_ref_name(&run("a").with_scm_ref("a"), &run("b").with_scm_ref("a")),
            Ordering::Equal
        );
    }

    #[test]
    fn test_run_id_compare() {
        let id = |name: &str, id: &str| run(name).with_run_id(id);
        assert_eq!(compare_run_id(&run("a"), &run("b")), Ordering::Equal);
        assert_eq!(compare_run_id(&run("a"), &id("b", "1")), Ordering::Less);
        assert_eq!(compare_run_id(&id("a", "1"), &run("b")), Ordering::Greater);
        assert_eq!(compare_run_id(&id("a", "2"), &id("b", "11")), Ordering::Less);
        assert_eq!(compare_run_id(&id("a", "11"), &id("b", "2")), Ordering::Greater);
        assert_eq!(compare_run_id(&id("a", "123"), &id("b", "123")), Ordering::Equal);
        assert_eq!(compare_run_id(&id("a", "invalid_a"), &id("b", "123")), Ordering::Less);
        assert_eq!(compare_run_id(&id("a", "123"), &id("b", "invalid_b")), Ordering::Greater);
    }

    #[test]
    fn test_run_id_both_unparseable_is_less_in_both_directions() {
        let left = run("a").with_run_id("invalid_a");
        let right = run("b").with_run_id("invalid_b");
        assert_eq!(compare_run_id(&left, &right), Ordering::Less);
        assert_eq!(compare_run_id(&right, &left), Ordering::Less);

        assert_eq!(CompareKey::RunId.total_compare(&left, &right), Ordering::Less);
        assert_eq!(CompareKey::RunId.total_compare(&right, &left), Ordering::Greater);
        let chain = CompareChain::sorted_by(CompareKey::RunId, Direction::Descending);
        assert_eq!(chain.sort_order(&left, &right), Ordering::Greater);
        assert_eq!(chain.sort_order(&right, &left), Ordering::Less);
    }

    #[test]
    fn test_name_compare() {
        assert_eq!(compare_name(&run("a"), &run("b")), Ordering::Less);
        assert_eq!(compare_name(&run("b"), &run("a")), Ordering::Greater);
        assert_eq!(compare_name(&run("same"), &run("same")), Ordering::Equal);
        assert_eq!(compare_name(&run("abcdefg"), &run("hijk")), Ordering::Less);
    }

    #[test]
    fn test_compare_key_from_str() {
        assert_eq!("creationTimestamp".parse::<CompareKey>().unwrap(), CompareKey::CreationTime);
        assert_eq!("runId".parse::<CompareKey>().unwrap(), CompareKey::RunId);
        let err = "age".parse::<CompareKey>().unwrap_err();
        assert!(matches!(err, DevopsError::Config { .. }));
        assert!(err.to_string().contains("age"));
    }

    #[test]
    fn test_default_chain_newest_first() {
        let chain = CompareChain::default_list_order();
        let older = run("b").with_creation_timestamp(now());
        let newer = run("a").with_creation_timestamp(now() + Duration::hours(1));

        assert!(chain.precedes(&newer, &older));
        assert!(!chain.precedes(&older, &newer));
    }

    #[test]
    fn test_default_chain_name_tie_break_ascending() {
        let chain = CompareChain::default_list_order();
        let a = run("a").with_creation_timestamp(now());
        let b = run("b").with_creation_timestamp(now());

        assert!(chain.precedes(&a, &b));
        assert!(!chain.precedes(&b, &a));
        assert_eq!(chain.compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_precedes_is_true_on_full_tie() {
        let chain = CompareChain::default_list_order();
        let left = run("same").with_creation_timestamp(now());
        let right = run("same").with_creation_timestamp(now());
        assert!(chain.precedes(&left, &right));
        assert!(chain.precedes(&right, &left));
    }

    #[test]
    fn test_default_chain_ignores_secondary_keys() {
        let chain = CompareChain::default_list_order();
        let left = run("a").with_creation_timestamp(now()).with_start_time(now()).with_run_id("1");
        let right = run("b")
            .with_creation_timestamp(now())
            .with_start_time(now() + Duration::hours(1))
            .with_run_id("2");
        assert!(chain.precedes(&left, &right));
    }

    #[test]
    fn test_extended_chain() {
        let chain = CompareChain::pipeline_run_extended();
        let base = |name: &str| run(name).with_creation_timestamp(now()).with_start_time(now());

        // later start time first
        let left = base("a");
        let right = run("b").with_creation_timestamp(now()).with_start_time(now() + Duration::hours(1));
        assert!(!chain.precedes(&left, &right));

        // greater ref name first
        assert!(chain.precedes(&base("a").with_scm_ref("main"), &base("b").with_scm_ref("dev")));

        // higher run id first
        assert!(chain.precedes(
            &base("a").with_scm_ref("main").with_run_id("2"),
            &base("b").with_scm_ref("main").with_run_id("1")
        ));

        // ascending name last
        assert!(!chain.precedes(
            &base("b").with_scm_ref("main").with_run_id("1"),
            &base("a").with_scm_ref("main").with_run_id("1")
        ));
    }

    #[test]
    fn test_sorted_by_appends_name_tie_break() {
        let chain = CompareChain::sorted_by(CompareKey::RunId, Direction::Ascending);
        assert_eq!(chain.keys().collect::<Vec<_>>(), vec![CompareKey::RunId, CompareKey::Name]);

        let chain = CompareChain::sorted_by(CompareKey::Name, Direction::Descending);
        assert_eq!(chain.keys().collect::<Vec<_>>(), vec![CompareKey::Name]);
        assert!(chain.precedes(&run("b"), &run("a")));
    }
}
