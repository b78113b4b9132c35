// Application layer - Editor use cases
pub mod dashboard_repository;
pub mod drag_source;
pub mod drop_target;
pub mod editor_service;
pub mod editor_session;
pub mod error;
pub mod layout_store;
pub mod preview;
pub mod template_catalog;
