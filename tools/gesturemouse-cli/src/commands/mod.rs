pub mod check;
pub mod config;
pub mod replay;
pub mod run;

use gesturemouse_common::clock::ns_to_secs;
use gesturemouse_session::SessionSummary;

/// Print the end-of-session counters.
pub fn print_summary(summary: &SessionSummary) {
    println!("Session summary:");
    println!("  Frames: {} ({} with a hand)", summary.frames, summary.hand_frames);
    println!("  Commands emitted: {}", summary.commands);
    println!("  Double click pauses: {} frames", summary.suppressed_frames);
    println!("  Safety releases: {}", summary.safety_releases);
    if summary.tracker_errors > 0 {
        println!("  Tracker errors: {}", summary.tracker_errors);
    }
    if summary.output_errors > 0 {
        println!("  Output errors: {}", summary.output_errors);
    }
    println!("  Ended at: {:.2}s", ns_to_secs(summary.ended_at_ns));
}
