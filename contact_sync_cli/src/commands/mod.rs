//! Command implementations
//!
//! Each command opens its own [`SyncContext`](crate::context::SyncContext)
//! from the loaded configuration and prints its report through an
//! [`OutputFormatter`](crate::output::OutputFormatter).

mod guest;
mod orders;
mod queue;

pub use guest::run_guest_sync;
pub use orders::{load_batch_file, run_order_batch, run_order_sync};
pub use queue::{QueueCommand, run_queue_command};

fn emit(output: &str) {
    println!("{}", output.trim_end());
}
