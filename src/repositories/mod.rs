//! Repositorios de acceso a datos
//!
//! Queries SQL contra PostgreSQL. El cache vive por encima de esta capa:
//! los repositorios no saben que existen.

pub mod beat_repository;
pub mod content_repository;
pub mod faq_repository;
