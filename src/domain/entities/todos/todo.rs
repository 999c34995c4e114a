//! Todo Entity Implementation
//!
//! 할 일 엔티티입니다. 모든 항목은 소유자(`user_id`)에 스코프되며,
//! 조회/수정/삭제는 항상 인증된 사용자의 ID를 기준으로 수행됩니다.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// 할 일 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 소유자의 사용자 ID
    pub user_id: ObjectId,
    /// 할 일 제목
    pub title: String,
    /// 완료 여부
    pub done: bool,
}

impl Todo {
    /// 새 할 일 생성
    pub fn new(user_id: ObjectId, title: String) -> Self {
        Self {
            id: None,
            user_id,
            title,
            done: false,
        }
    }
}
