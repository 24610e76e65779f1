//! Rebuild per-thread call stacks from a flat event stream.
//!
//! Chrome traces describe nesting implicitly: a Begin/End pair or a Complete
//! event that starts inside another span is a child of it. Replaying each
//! thread's events in timestamp order against an explicit stack gives every
//! frame its self time:
//!
//! self = (end - start) - sum of the full spans of its direct children
//!
//! Example: outer [0, 1000] with inner [200, 700] yields inner = 500 and
//! outer = 1000 - 500 = 500.

use crate::parser::{Phase, RawEvent};
use log::debug;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Self time of one resolved frame
///
/// **Public** - consumed by the aggregator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    pub name: String,

    /// Raw category string of the frame's opening event
    pub category: String,

    /// Exclusive time in microseconds
    pub self_time: u64,
}

impl Contribution {
    /// Create a new contribution
    ///
    /// **Public** - constructor
    pub fn new(name: impl Into<String>, category: impl Into<String>, self_time: u64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            self_time,
        }
    }
}

/// Result of replaying every thread of one trace
#[derive(Debug, Clone, Default)]
pub struct Reconstruction {
    /// One entry per resolved frame
    pub contributions: Vec<Contribution>,

    /// End events that found no open Begin frame
    pub unmatched_ends: usize,

    /// Begin frames still open when their thread's events ran out
    pub discarded_begins: usize,
}

impl Reconstruction {
    /// Sum of self time over all resolved frames
    pub fn total_self_time(&self) -> u64 {
        self.contributions
            .iter()
            .map(|c| c.self_time)
            .fold(0, u64::saturating_add)
    }
}

/// An open span on a thread's stack
struct Frame<'a> {
    name: &'a str,
    category: &'a str,
    start: u64,

    /// Known end for Complete events, None for Begin events
    end: Option<u64>,

    /// Sum of the full spans of direct children closed so far
    child_time: u64,
}

/// Replay all events and compute per-frame self time
///
/// **Public** - main entry point for stack reconstruction
///
/// # Algorithm
/// 1. Partition events by (process id, thread id)
/// 2. Sort each partition by timestamp (stable)
/// 3. Begin pushes, End pops the nearest open Begin, Complete pushes a frame
///    that closes itself once the replay reaches its end timestamp
/// 4. A closed frame adds its full span to its parent's child time
///
/// Unmatched End events are ignored. Begin frames never closed are dropped
/// without contributing anything.
pub fn reconstruct(events: &[RawEvent]) -> Reconstruction {
    let mut threads: BTreeMap<(u64, u64), Vec<&RawEvent>> = BTreeMap::new();
    for event in events {
        if matches!(event.phase, Phase::Begin | Phase::End | Phase::Complete) {
            threads.entry(event.thread_key()).or_default().push(event);
        }
    }

    let mut result = Reconstruction::default();

    for ((pid, tid), mut thread_events) in threads {
        debug!("Thread ({}, {}): {} duration events", pid, tid, thread_events.len());

        sort_for_replay(&mut thread_events);

        let mut stack = ThreadStack::default();
        for event in thread_events {
            stack.apply(event, &mut result);
        }
        stack.finish(&mut result);
    }

    debug!(
        "Resolved {} frames ({} unmatched ends, {} unclosed begins)",
        result.contributions.len(),
        result.unmatched_ends,
        result.discarded_begins
    );

    result
}

/// Order a thread's events for replay
///
/// **Private** - stable sort by timestamp, so events at the same instant keep
/// their input order. Within a run of adjacent Complete events sharing a
/// timestamp, longer ones go first so an enclosing span opens before the
/// spans it encloses.
fn sort_for_replay(events: &mut [&RawEvent]) {
    events.sort_by_key(|e| e.timestamp);

    let same_instant_completes = |a: &&RawEvent, b: &&RawEvent| {
        a.timestamp == b.timestamp && a.phase == Phase::Complete && b.phase == Phase::Complete
    };
    for run in events.chunk_by_mut(same_instant_completes) {
        run.sort_by_key(|e| Reverse(e.duration.unwrap_or(0)));
    }
}

/// Call stack of a single thread
#[derive(Default)]
struct ThreadStack<'a> {
    frames: Vec<Frame<'a>>,
}

impl<'a> ThreadStack<'a> {
    fn apply(&mut self, event: &'a RawEvent, out: &mut Reconstruction) {
        let now = event.timestamp;
        self.close_expired(now, out);

        match event.phase {
            Phase::Begin => self.push(event, None),
            Phase::Complete => self.push(event, event.end_timestamp()),
            Phase::End => self.close_begin(now, out),
            Phase::Instant | Phase::Metadata => {}
        }
    }

    fn push(&mut self, event: &'a RawEvent, end: Option<u64>) {
        self.frames.push(Frame {
            name: &event.name,
            category: &event.category,
            start: event.timestamp,
            end,
            child_time: 0,
        });
    }

    /// Resolve Complete frames on top of the stack that ended by `now`
    fn close_expired(&mut self, now: u64, out: &mut Reconstruction) {
        while let Some(end) = self.frames.last().and_then(|f| f.end) {
            if end > now {
                break;
            }
            self.pop_resolved(end, out);
        }
    }

    /// Handle an End event: pop the nearest open Begin frame
    fn close_begin(&mut self, now: u64, out: &mut Reconstruction) {
        let Some(pos) = self.frames.iter().rposition(|f| f.end.is_none()) else {
            debug!("Ignoring End at {} with no open Begin", now);
            out.unmatched_ends += 1;
            return;
        };

        // Complete frames still open above it overlap the End; clamp them
        while self.frames.len() > pos + 1 {
            self.pop_resolved(now, out);
        }
        self.pop_resolved(now, out);
    }

    fn pop_resolved(&mut self, end: u64, out: &mut Reconstruction) {
        let Some(frame) = self.frames.pop() else {
            return;
        };

        let span = end.saturating_sub(frame.start);
        let self_time = span.saturating_sub(frame.child_time);

        if let Some(parent) = self.frames.last_mut() {
            parent.child_time = parent.child_time.saturating_add(span);
        }

        out.contributions
            .push(Contribution::new(frame.name, frame.category, self_time));
    }

    /// End of stream: Complete frames still resolve, open Begins are dropped
    fn finish(mut self, out: &mut Reconstruction) {
        while let Some(end) = self.frames.last().map(|f| f.end) {
            match end {
                Some(end) => self.pop_resolved(end, out),
                None => {
                    self.frames.pop();
                    out.discarded_begins += 1;
                }
            }
        }
    }
}
