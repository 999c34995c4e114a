//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 캐시 지원과 JSON 기반 객체 직렬화를 제공합니다.
//! 사용자 조회 경로의 read-through 캐시로 사용됩니다.
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
