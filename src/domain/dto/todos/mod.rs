//! 할 일 요청/응답 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::todos::todo::Todo;

/// 할 일 생성/수정/삭제 요청 DTO
///
/// 수정과 삭제는 `id`가 필요하고 생성은 무시합니다. 삭제 요청은 `id`만
/// 보내도 됩니다. `user_id`는 클라이언트 입력이 아니라 항상 인증된
/// 주체에서 가져옵니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TodoRequest {
    pub id: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "제목을 입력해주세요"))]
    pub title: String,

    #[serde(default)]
    pub done: bool,
}

/// 할 일 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoResponse {
    pub id: String,
    pub title: String,
    pub done: bool,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: todo.title,
            done: todo.done,
        }
    }
}
