pub mod ai_service;
pub mod events;
pub mod profile_service;
pub mod quiz_service;
pub mod stats_service;
pub mod theory_service;
