//! Purpose: Hold top-level CLI command dispatch for `goat`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Each command emits one JSON document via `emit_json`.

use super::*;

const DEMO_TRIPLE_INPUT: u32 = 4;
const DEMO_HORNS: u32 = 2;

pub(super) fn dispatch_command(command: Command) -> Result<(), Error> {
    match command {
        Command::Demo => {
            let triple = compute_triple(DEMO_TRIPLE_INPUT);
            let counter = counter_with_horns(DEMO_HORNS);
            tracing::debug!(triple, horns = counter.horns(), "demo complete");
            emit_json(&DemoReport {
                triple,
                goat: GoatReport::from(&counter),
            })
        }
        Command::Describe { horns } => {
            let counter = counter_with_horns(horns);
            tracing::debug!(horns = counter.horns(), "described goat");
            emit_json(&GoatReport::from(&counter))
        }
        Command::Triple { value } => {
            tracing::debug!(value, "tripling");
            emit_json(&TripleReport::new(value))
        }
    }
}

// `horns` is bounded by MAX_DESCRIBE_HORNS at parse time.
fn counter_with_horns(horns: u32) -> Counter {
    let mut counter = Counter::new();
    for _ in 0..horns {
        counter.increment();
    }
    counter
}
