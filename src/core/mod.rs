//! Dashboard orchestration

mod update_manager;

pub use update_manager::UpdateManager;
