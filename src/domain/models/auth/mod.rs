//! 인증 관련 모델
//!
//! - [`oauth_attributes`]: 프로바이더별 사용자 정보를 하나의 표준 형태로 정규화
//! - [`authenticated_user`]: 인증 필터가 요청에 부착하는 요청 스코프 주체

pub mod authenticated_user;
pub mod oauth_attributes;

pub use authenticated_user::*;
pub use oauth_attributes::*;
