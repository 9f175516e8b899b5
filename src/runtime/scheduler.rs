use crate::runtime::event::DockEvent;
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

pub const TICK_KEY: &str = "dock:tick";
pub const REFRESH_KEY: &str = "dock:refresh";
pub const REGENERATE_KEY: &str = "dock:regenerate";

#[derive(Debug, Clone)]
pub enum SchedulerCommand {
    EmitNow(DockEvent),
    EmitAfter {
        key: String,
        delay: Duration,
        event: DockEvent,
    },
    /// Supersedes any pending task under the same key.
    Debounce {
        key: String,
        delay: Duration,
        event: DockEvent,
    },
    Cancel {
        key: String,
    },
}

#[derive(Debug, Clone)]
struct Guard {
    key: String,
    version: u64,
}

#[derive(Debug, Clone)]
struct DelayedTask {
    due_at: Instant,
    guard: Option<Guard>,
    event: DockEvent,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    ready: VecDeque<DockEvent>,
    delayed: Vec<DelayedTask>,
    key_versions: HashMap<String, u64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, command: SchedulerCommand, now: Instant) {
        match command {
            SchedulerCommand::EmitNow(event) => {
                self.ready.push_back(event);
            }
            SchedulerCommand::EmitAfter { key, delay, event } => {
                let version = *self.key_versions.entry(key.clone()).or_insert(0);
                self.delayed.push(DelayedTask {
                    due_at: now + delay,
                    guard: Some(Guard { key, version }),
                    event,
                });
            }
            SchedulerCommand::Debounce { key, delay, event } => {
                let version = self.bump_version(&key);
                self.delayed.push(DelayedTask {
                    due_at: now + delay,
                    guard: Some(Guard { key, version }),
                    event,
                });
            }
            SchedulerCommand::Cancel { key } => {
                self.bump_version(&key);
                self.delayed
                    .retain(|task| task.guard.as_ref().is_none_or(|guard| guard.key != key));
            }
        }
    }

    /// Moves due tasks to the ready queue (in due order) and drains it.
    pub fn drain_ready(&mut self, now: Instant) -> Vec<DockEvent> {
        let mut due = Vec::new();
        let mut idx = 0usize;
        while idx < self.delayed.len() {
            if self.delayed[idx].due_at <= now {
                let task = self.delayed.swap_remove(idx);
                if self.task_is_valid(&task) {
                    due.push(task);
                }
            } else {
                idx += 1;
            }
        }
        due.sort_by_key(|task| task.due_at);
        self.ready.extend(due.into_iter().map(|task| task.event));

        self.ready.drain(..).collect()
    }

    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        let mut next = if self.ready.is_empty() {
            default_timeout
        } else {
            Duration::ZERO
        };

        for task in &self.delayed {
            let due_in = task.due_at.saturating_duration_since(now);
            if due_in < next {
                next = due_in;
            }
        }

        next
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.delayed.iter().any(|task| {
            task.guard
                .as_ref()
                .is_some_and(|guard| guard.key == key && self.task_is_valid(task))
        })
    }

    /// Drops every queued and delayed event.
    pub fn clear(&mut self) {
        self.ready.clear();
        self.delayed.clear();
        self.key_versions.clear();
    }

    fn task_is_valid(&self, task: &DelayedTask) -> bool {
        let Some(guard) = &task.guard else {
            return true;
        };
        let current = *self.key_versions.get(&guard.key).unwrap_or(&0);
        current == guard.version
    }

    fn bump_version(&mut self, key: &str) -> u64 {
        let entry = self.key_versions.entry(key.to_string()).or_insert(0);
        *entry = entry.saturating_add(1);
        *entry
    }
}
