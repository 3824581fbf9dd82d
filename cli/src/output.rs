//! Text rendering of traces and run summaries

use iosched_core_rs::policy::QueuedRequest;
use iosched_core_rs::{Event, PolicyKind, SimulationReport, WorkloadConfig};
use std::fmt::Write;

/// Which optional traces to print
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceFlags {
    /// `-v`: add/issue/finish lines
    pub verbose: bool,
    /// `-q`: the queue scanned at each dispatch
    pub queue: bool,
    /// `-f`: both FLOOK queues at each dispatch
    pub flook: bool,
}

impl TraceFlags {
    /// Queue snapshots are only worth recording when a flag prints them
    pub fn needs_queue_views(&self) -> bool {
        self.queue || self.flook
    }
}

/// Render the event log as the trace requested by `flags`
///
/// Returns an empty string when no trace flag is set.
pub fn render_trace(events: &[Event], flags: TraceFlags, policy: PolicyKind) -> String {
    let mut out = String::new();
    if flags.verbose {
        out.push_str("TRACE\n");
    }

    for event in events {
        match event {
            Event::Add {
                tick,
                request_id,
                track,
            } if flags.verbose => {
                let _ = writeln!(out, "{tick}:{request_id:>6} add {track}");
            }
            Event::Issue {
                tick,
                request_id,
                track,
                head_track,
            } if flags.verbose => {
                let _ = writeln!(out, "{tick}:{request_id:>6} issue {track} {head_track}");
            }
            Event::Finish {
                tick,
                request_id,
                turnaround,
            } if flags.verbose => {
                let _ = writeln!(out, "{tick}:{request_id:>6} finish {turnaround}");
            }
            Event::QueueScan {
                head_track,
                direction,
                view,
                selected,
                ..
            } => {
                if flags.flook && policy == PolicyKind::Flook {
                    let _ = write!(
                        out,
                        "\tAQ={} dir={} curtrk={}:",
                        view.active_queue, direction, head_track
                    );
                    for (slot, queue) in view.queues.iter().enumerate() {
                        let _ = write!(out, " Q[{slot}] = {}", flook_queue(queue));
                    }
                    out.push('\n');
                }
                if flags.queue {
                    let scanned: String = view
                        .scanned()
                        .iter()
                        .map(|q| format!("{}:{} ", q.id, q.offset))
                        .collect();
                    let _ = writeln!(out, "\tGet: ({scanned}) --> {selected}");
                }
            }
            _ => {}
        }
    }

    out
}

fn flook_queue(queue: &[QueuedRequest]) -> String {
    let mut out = String::from("( ");
    for q in queue {
        let _ = write!(out, "{}:{}:{} ", q.id, q.track, q.offset);
    }
    out.push(')');
    out
}

/// Per-request lines followed by the `SUM:` line
pub fn render_summary(report: &SimulationReport) -> String {
    let mut out = String::new();
    for r in &report.requests {
        let _ = writeln!(
            out,
            "{:5}: {:5} {:5} {:5}",
            r.id, r.arrival_time, r.start_time, r.end_time
        );
    }

    let s = &report.summary;
    let _ = writeln!(
        out,
        "SUM: {} {} {:.4} {:.2} {:.2} {}",
        s.total_ticks, s.total_movement, s.io_utilization, s.avg_turnaround, s.avg_wait, s.max_wait
    );
    out
}

/// A request file in the input format, headed by the generator settings
pub fn render_workload(workload: &WorkloadConfig, pairs: &[(usize, i64)]) -> String {
    let mut out = String::from("#io generator\n");
    let _ = writeln!(
        out,
        "#numio={} maxtracks={} lambda={:.6}",
        workload.num_requests, workload.track_range.1, workload.rate_per_tick
    );
    for (arrival, track) in pairs {
        let _ = writeln!(out, "{arrival} {track}");
    }
    out
}
