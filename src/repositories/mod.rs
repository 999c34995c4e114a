//! 데이터 액세스 계층
//!
//! 도메인 엔티티의 영속화를 담당하는 리포지토리들입니다.
//! `#[repository]` 매크로를 통해 싱글톤으로 등록되며, MongoDB를
//! 주 저장소로 사용합니다.

pub mod users;
pub mod todos;
