/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures and fixed constants (data.rs)
/// - Catalog persistence and mutations (store.rs)
/// - The admin session gate (session.rs)

pub mod data;
pub mod session;
pub mod store;
