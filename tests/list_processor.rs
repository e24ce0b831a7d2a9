//! Ordering, filtering and pagination properties of the list pipeline.

use chrono::{DateTime, Duration, TimeZone, Utc};
use devops_apiserver::domain::{PipelineRun, Resource};
use devops_apiserver::listing::{
    process, CompareChain, CompareKey, Direction, Filter, PipelineRunListHandler, QueryDescriptor,
};
use proptest::prelude::*;
use std::cmp::Ordering;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
}

fn names(runs: &[PipelineRun]) -> Vec<&str> {
    runs.iter().map(|run| run.name()).collect()
}

/// (name, creation offset in minutes, run id, carries the app=web label)
type RunSeed = (String, Option<i64>, Option<u16>, bool);

fn run_seed() -> impl Strategy<Value = RunSeed> {
    ("[a-e]{1,3}", proptest::option::of(0i64..5), proptest::option::of(0u16..4), any::<bool>())
}

fn build(seed: &RunSeed) -> PipelineRun {
    let (name, minutes, run_id, labelled) = seed;
    let mut run = PipelineRun::new("project-a", name.as_str());
    if let Some(minutes) = minutes {
        run = run.with_creation_timestamp(t0() + Duration::minutes(*minutes));
    }
    if let Some(id) = run_id {
        run = run.with_run_id(id.to_string());
    }
    if *labelled {
        run = run.with_label("app", "web");
    }
    run
}

#[test]
fn same_creation_time_orders_by_ascending_name() {
    let runs = vec![
        PipelineRun::new("ns", "b").with_creation_timestamp(t0()),
        PipelineRun::new("ns", "a").with_creation_timestamp(t0()),
    ];
    let page = process(&runs, &QueryDescriptor::new(), &PipelineRunListHandler::new()).unwrap();
    assert_eq!(names(&page.items), vec!["a", "b"]);
}

#[test]
fn newer_resource_is_listed_first() {
    let t1 = t0() + Duration::hours(1);
    let runs = vec![
        PipelineRun::new("ns", "a").with_creation_timestamp(t0()),
        PipelineRun::new("ns", "b").with_creation_timestamp(t1),
    ];
    let page = process(&runs, &QueryDescriptor::new(), &PipelineRunListHandler::new()).unwrap();
    assert_eq!(names(&page.items), vec!["b", "a"]);
}

#[test]
fn malformed_run_ids_sort_without_panicking() {
    let runs: Vec<PipelineRun> = ["x", "7", "y", "", "12", "z"]
        .iter()
        .enumerate()
        .map(|(i, id)| PipelineRun::new("ns", format!("run-{}", i)).with_run_id(*id))
        .collect();
    let descriptor = QueryDescriptor::new().sort_by("runId", true).unwrap();
    let page = process(&runs, &descriptor, &PipelineRunListHandler::new()).unwrap();

    let ids: Vec<&str> = page.items.iter().map(|run| run.run_id().unwrap_or_default()).collect();
    assert_eq!(ids, vec!["", "x", "y", "z", "7", "12"]);
}

#[test]
fn unknown_sort_field_is_rejected_before_processing() {
    let err = QueryDescriptor::new().sort_by("duration", false).unwrap_err();
    assert!(err.to_string().contains("duration"));
}

#[test]
fn empty_input_yields_empty_page() {
    let page = process::<PipelineRun, _>(&[], &QueryDescriptor::new(), &PipelineRunListHandler::new())
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_items, 0);
}

proptest! {
    #[test]
    fn sort_is_stable_for_full_ties(count in 1usize..20) {
        // Identical on every key except the position tag, which no key reads
        let runs: Vec<PipelineRun> = (0..count)
            .map(|i| PipelineRun::new("ns", "same").with_creation_timestamp(t0()).with_label("pos", i.to_string()))
            .collect();

        let page = process(&runs, &QueryDescriptor::new(), &PipelineRunListHandler::new()).unwrap();
        let positions: Vec<String> =
            page.items.iter().map(|run| run.metadata.labels["pos"].clone()).collect();
        let expected: Vec<String> = (0..count).map(|i| i.to_string()).collect();
        prop_assert_eq!(positions, expected);
    }

    #[test]
    fn distinct_names_never_tie(a in run_seed(), b in run_seed()) {
        prop_assume!(a.0 != b.0);
        let (left, right) = (build(&a), build(&b));
        for chain in [CompareChain::default_list_order(), CompareChain::pipeline_run_extended()] {
            prop_assert_ne!(chain.compare(&left, &right), Ordering::Equal);
        }
    }

    #[test]
    fn missing_timestamp_never_sorts_above_present(seed in run_seed(), minutes in 0i64..5) {
        let mut missing = build(&seed);
        missing.metadata.creation_timestamp = None;
        let present = PipelineRun::new("ns", "other")
            .with_creation_timestamp(t0() + Duration::minutes(minutes));

        let key = CompareKey::CreationTime;
        prop_assert_ne!(key.compare(&missing, &present), Ordering::Greater);
        prop_assert_ne!(key.compare(&present, &missing), Ordering::Less);
    }

    #[test]
    fn filtering_is_idempotent(seeds in proptest::collection::vec(run_seed(), 0..20)) {
        let runs: Vec<PipelineRun> = seeds.iter().map(build).collect();
        let descriptor = QueryDescriptor::new()
            .with_filter(Filter::label("app=web").unwrap())
            .with_filter(Filter::Name("a".to_string()));
        let handler = PipelineRunListHandler::new();

        let once = process(&runs, &descriptor, &handler).unwrap();
        let twice = process(&once.items, &descriptor, &handler).unwrap();
        prop_assert_eq!(&once.items, &twice.items);
        prop_assert_eq!(once.total_items, twice.total_items);
    }

    #[test]
    fn offset_past_end_is_empty(seeds in proptest::collection::vec(run_seed(), 0..20), extra in 0usize..5, limit in proptest::option::of(0usize..5)) {
        let runs: Vec<PipelineRun> = seeds.iter().map(build).collect();
        let descriptor = QueryDescriptor::new().with_pagination(limit, runs.len() + extra);

        let page = process(&runs, &descriptor, &PipelineRunListHandler::new()).unwrap();
        prop_assert!(page.items.is_empty());
        prop_assert_eq!(page.total_items, runs.len());
    }

    #[test]
    fn pages_concatenate_to_full_listing(seeds in proptest::collection::vec(run_seed(), 0..20), size in 1usize..6) {
        let runs: Vec<PipelineRun> = seeds.iter().map(build).collect();
        let handler = PipelineRunListHandler::new();
        let full = process(&runs, &QueryDescriptor::new(), &handler).unwrap();

        let mut paged = Vec::new();
        let mut offset = 0;
        while offset < runs.len() {
            let descriptor = QueryDescriptor::new().with_pagination(Some(size), offset);
            paged.extend(process(&runs, &descriptor, &handler).unwrap().items);
            offset += size;
        }
        prop_assert_eq!(paged, full.items);
    }

    #[test]
    fn explicit_sort_respects_direction(seeds in proptest::collection::vec(run_seed(), 0..20), ascending in any::<bool>()) {
        let runs: Vec<PipelineRun> = seeds.iter().map(build).collect();
        let descriptor = QueryDescriptor::new().sort_by("creationTimestamp", ascending).unwrap();
        let page = process(&runs, &descriptor, &PipelineRunListHandler::new()).unwrap();

        let direction = Direction::from_ascending(ascending);
        for pair in page.items.windows(2) {
            let ordering = CompareKey::CreationTime.compare(&pair[0], &pair[1]);
            match direction {
                Direction::Ascending => {
                    prop_assert_ne!(ordering, Ordering::Greater);
                }
                Direction::Descending => {
                    prop_assert_ne!(ordering, Ordering::Less);
                }
            }
        }
    }
}
