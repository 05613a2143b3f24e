//! Project scheduling domain models.
//!
//! Two layers of task data:
//!
//! | Type | Produced by | Values |
//! |------|-------------|--------|
//! | `TaskRecord` / `TaskTable` | ingestion layer | raw text |
//! | `Task` | validation | typed (days, dates, parsed ids) |
//! | `ScheduledTask` | scheduler | typed + CPM dates |

mod field;
mod record;
mod schedule;
mod task;

pub use field::{Field, SideField};
pub use record::{TaskRecord, TaskTable};
pub use schedule::{CpmTimes, ScheduledTask};
pub use task::Task;
