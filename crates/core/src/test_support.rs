// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test-only helpers shared across crates via the `test-support` feature.

use crate::clock::FakeClock;
use crate::task::{Priority, Task, TaskType};
use crate::value::Value;

/// A task builder with sensible defaults for unit tests, thin wrapper over
/// [`Task::builder`] for callers that just want "a task".
pub fn sample_task(priority: Priority) -> Task {
    Task::builder()
        .kind(TaskType::ToolInvocation)
        .priority(priority)
        .title("sample")
        .payload(Value::Null)
        .build()
}

/// A `FakeClock` pinned at a fixed epoch, convenient as a shared starting
/// point across test modules.
pub fn fixed_clock(epoch_ms: u64) -> FakeClock {
    let clock = FakeClock::new();
    clock.set_epoch_ms(epoch_ms);
    clock
}
