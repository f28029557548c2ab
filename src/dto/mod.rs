pub mod chat_dto;
pub mod profile_dto;
pub mod quiz_dto;
pub mod theory_dto;
