//! # Core Framework Module
//!
//! 싱글톤 기반 의존성 주입 컨테이너를 제공하는 모듈입니다.
//! `#[service]` / `#[repository]` 매크로가 등록한 컴포넌트들을
//! [`registry::ServiceLocator`]가 관리합니다.

pub mod registry;

pub use registry::*;
