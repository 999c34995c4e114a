//! 비즈니스 로직 서비스 계층
//!
//! `#[service]` 매크로를 통해 싱글톤으로 등록되는 서비스들입니다.

pub mod auth;
pub mod users;
pub mod todos;
