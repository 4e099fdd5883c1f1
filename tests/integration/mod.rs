//! Integration test modules.

mod backup_test;
mod database_history_test;
mod session_flow_test;
