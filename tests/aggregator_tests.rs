use trace_selftime::aggregator::{process_events, reconstruct, CategoryTotals};
use trace_selftime::categorizer::Categorizer;
use trace_selftime::parser::{Phase, RawEvent};

fn event(name: &str, cat: &str, phase: Phase, ts: u64, dur: Option<u64>) -> RawEvent {
    RawEvent {
        name: name.to_string(),
        category: cat.to_string(),
        phase,
        timestamp: ts,
        duration: dur,
        process_id: 1,
        thread_id: 1,
        metadata_name: None,
    }
}

fn begin(name: &str, cat: &str, ts: u64) -> RawEvent {
    event(name, cat, Phase::Begin, ts, None)
}

fn end(name: &str, cat: &str, ts: u64) -> RawEvent {
    event(name, cat, Phase::End, ts, None)
}

fn complete(name: &str, cat: &str, ts: u64, dur: u64) -> RawEvent {
    event(name, cat, Phase::Complete, ts, Some(dur))
}

#[test]
fn test_childless_pair_self_time_is_span() {
    let events = vec![begin("Task", "other", 1200), end("Task", "other", 1750)];
    let result = reconstruct(&events);

    assert_eq!(result.contributions.len(), 1);
    assert_eq!(result.contributions[0].self_time, 550);
}

#[test]
fn test_children_tiling_parent_leave_zero_self_time() {
    let events = vec![
        begin("parent", "other", 0),
        begin("a", "other", 0),
        end("a", "other", 40),
        begin("b", "other", 40),
        end("b", "other", 100),
        end("parent", "other", 100),
    ];
    let result = reconstruct(&events);

    let parent = result.contributions.iter().find(|c| c.name == "parent").unwrap();
    assert_eq!(parent.self_time, 0);
    assert_eq!(result.total_self_time(), 100);
}

#[test]
fn test_nested_v8_inside_other() {
    let events = vec![
        begin("RunTask", "other", 0),
        begin("FunctionCall", "v8", 200),
        end("FunctionCall", "v8", 700),
        end("RunTask", "other", 1000),
    ];
    let totals = process_events(&events, &Categorizer::default(), CategoryTotals::new());

    assert_eq!(totals.get("v8"), 500);
    assert_eq!(totals.get("other"), 500);
    assert_eq!(totals.event_count(), 2);
}

#[test]
fn test_nested_complete_events_absorb_full_span() {
    let events = vec![
        complete("grandchild", "v8", 20, 10),
        complete("child", "v8", 10, 50),
        complete("parent", "toplevel", 0, 100),
    ];
    let result = reconstruct(&events);
    let self_of = |name: &str| {
        result
            .contributions
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.self_time)
            .unwrap()
    };

    assert_eq!(self_of("grandchild"), 10);
    assert_eq!(self_of("child"), 40);
    assert_eq!(self_of("parent"), 50);
}

#[test]
fn test_totals_conserve_frame_self_time() {
    let events = vec![
        begin("RunTask", "toplevel", 0),
        complete("Layout", "blink", 10, 30),
        complete("FunctionCall", "v8", 50, 100),
        complete("Paint", "blink", 60, 20),
        end("RunTask", "toplevel", 400),
        end("stray", "toplevel", 500),
        begin("never-closed", "v8", 600),
    ];

    let result = reconstruct(&events);
    let totals = process_events(&events, &Categorizer::default(), CategoryTotals::new());

    assert_eq!(totals.total_self_time(), result.total_self_time());
    assert_eq!(totals.event_count(), result.contributions.len() as u64);
    assert_eq!(totals.total_self_time(), 400);
}

#[test]
fn test_merge_equals_concatenated_processing() {
    let first = vec![
        begin("RunTask", "toplevel", 0),
        complete("FunctionCall", "v8", 10, 30),
        end("RunTask", "toplevel", 100),
    ];
    let second = vec![
        complete("Layout", "blink", 500, 70),
        complete("EvaluateScript", "v8", 600, 25),
    ];

    let categorizer = Categorizer::default();

    let mut merged = process_events(&first, &categorizer, CategoryTotals::new());
    merged.merge(process_events(&second, &categorizer, CategoryTotals::new()));

    let concatenated: Vec<RawEvent> = first.iter().chain(second.iter()).cloned().collect();
    let combined = process_events(&concatenated, &categorizer, CategoryTotals::new());

    assert_eq!(merged, combined);
}

#[test]
fn test_accumulator_is_threaded_through_files() {
    let categorizer = Categorizer::default();
    let file_a = vec![complete("FunctionCall", "v8", 0, 10)];
    let file_b = vec![complete("FunctionCall", "v8", 0, 15)];

    let totals = process_events(&file_a, &categorizer, CategoryTotals::new());
    let totals = process_events(&file_b, &categorizer, totals);

    assert_eq!(totals.get("v8"), 25);
    assert_eq!(totals.event_count(), 2);
}

#[test]
fn test_unmatched_end_on_empty_stack() {
    let events = vec![end("stray", "v8", 10)];
    let totals = process_events(&events, &Categorizer::default(), CategoryTotals::new());

    assert!(totals.is_empty());
    assert_eq!(totals.event_count(), 0);
}

#[test]
fn test_events_on_separate_processes_are_independent() {
    let mut other_process = begin("b", "v8", 5);
    other_process.process_id = 2;
    let mut other_process_end = end("b", "v8", 25);
    other_process_end.process_id = 2;

    let events = vec![
        begin("a", "v8", 0),
        other_process,
        end("a", "v8", 10),
        other_process_end,
    ];
    let result = reconstruct(&events);

    assert_eq!(result.total_self_time(), 30);
}

#[test]
fn test_same_instant_ties_keep_input_order() {
    let events = vec![
        complete("Parent", "other", 0, 100),
        begin("Child", "other", 0),
        end("Child", "other", 50),
    ];
    let result = reconstruct(&events);
    let self_of = |name: &str| {
        result
            .contributions
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.self_time)
            .unwrap()
    };

    assert_eq!(self_of("Child"), 50);
    assert_eq!(self_of("Parent"), 50);
    assert_eq!(result.total_self_time(), 100);
}

#[test]
fn test_huge_durations_do_not_overflow_totals() {
    let mut second_thread = complete("b", "mystery", 0, 18_446_744_073_709_551_000);
    second_thread.thread_id = 2;
    let events = vec![
        complete("a", "mystery", 0, 18_446_744_073_709_551_000),
        second_thread,
    ];

    let totals = process_events(&events, &Categorizer::default(), CategoryTotals::new());

    assert_eq!(totals.get("unknown"), u64::MAX);
    assert_eq!(totals.total_self_time(), u64::MAX);
    assert_eq!(totals.event_count(), 2);
}
