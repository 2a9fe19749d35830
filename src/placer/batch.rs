//! Batch placement in input order with per-item error isolation.

use std::path::{Path, PathBuf};
use tracing::{error, warn};

use crate::errors::PublinkError;
use crate::shutdown;

use super::{Placement, Placer, TargetDir};

/// Result of placing one input.
#[derive(Debug)]
pub struct Outcome {
    pub input: PathBuf,
    pub result: Result<Placement, PublinkError>,
}

impl Outcome {
    pub fn url(&self) -> Option<&str> {
        self.result.as_ref().ok().map(|p| p.url.as_str())
    }
}

/// Place every input, in order. A failing item never stops the batch;
/// after a shutdown request the remaining items are reported as interrupted.
pub fn place_all<P: AsRef<Path>>(
    placer: &Placer,
    inputs: &[P],
    target: &TargetDir,
    move_source: bool,
) -> Vec<Outcome> {
    place_all_with(placer, inputs, target, move_source, |_| {})
}

/// Like [`place_all`], calling `on_outcome` as soon as each item finishes.
pub fn place_all_with<P, F>(
    placer: &Placer,
    inputs: &[P],
    target: &TargetDir,
    move_source: bool,
    mut on_outcome: F,
) -> Vec<Outcome>
where
    P: AsRef<Path>,
    F: FnMut(&Outcome),
{
    let mut outcomes = Vec::with_capacity(inputs.len());
    for input in inputs {
        let input = input.as_ref();
        let result = if shutdown::is_requested() {
            Err(PublinkError::Interrupted)
        } else {
            placer.place(input, target, move_source)
        };

        if let Err(e) = &result {
            let code = e.code();
            if e.is_invalid_input() || matches!(e, PublinkError::Interrupted) {
                warn!(code, path = %input.display(), "Skipping input");
            } else {
                error!(code, path = %input.display(), error = %e, "Placement failed");
            }
        }

        let outcome = Outcome {
            input: input.to_path_buf(),
            result,
        };
        on_outcome(&outcome);
        outcomes.push(outcome);
    }
    outcomes
}

/// URLs of the successful outcomes, in input order.
pub fn urls(outcomes: &[Outcome]) -> Vec<String> {
    outcomes
        .iter()
        .filter_map(Outcome::url)
        .map(str::to_owned)
        .collect()
}
