pub mod event;
pub mod scheduler;

pub use event::{DockAction, DockEvent, EditKey};
pub use scheduler::{Scheduler, SchedulerCommand};
