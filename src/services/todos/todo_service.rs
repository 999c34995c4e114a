//! 할 일 서비스 구현
//!
//! 인증 서브시스템이 보호하는 다운스트림 계층입니다. 모든 연산은
//! 인증 필터가 부착한 주체의 사용자 ID로 스코프되며, 변경 연산은
//! 원본 동작대로 변경 후의 전체 목록을 반환합니다.

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use singleton_macro::service;

use crate::{
    domain::dto::todos::{TodoRequest, TodoResponse},
    domain::entities::todos::todo::Todo,
    errors::errors::AppError,
    repositories::todos::todo_repo::TodoRepository,
};

/// 사용자별 할 일 CRUD 서비스
#[service(name = "todo")]
pub struct TodoService {
    todo_repo: Arc<TodoRepository>,
}

impl TodoService {
    /// 새 할 일을 생성하고 사용자의 전체 목록을 반환합니다.
    pub async fn create(
        &self,
        user_id: &str,
        request: TodoRequest,
    ) -> Result<Vec<TodoResponse>, AppError> {
        let owner = parse_user_id(user_id)?;

        let todo = Todo::new(owner, request.title);
        let saved = self.todo_repo.insert(todo).await?;

        log::info!("할 일 저장됨: {:?}", saved.id);

        self.retrieve(user_id).await
    }

    /// 사용자의 할 일 목록을 조회합니다.
    pub async fn retrieve(&self, user_id: &str) -> Result<Vec<TodoResponse>, AppError> {
        let owner = parse_user_id(user_id)?;

        let todos = self.todo_repo.find_by_user_id(&owner).await?;

        Ok(todos.into_iter().map(TodoResponse::from).collect())
    }

    /// 할 일의 제목/완료 여부를 수정하고 전체 목록을 반환합니다.
    ///
    /// 해당 사용자의 항목이 아니면 아무것도 수정하지 않고 목록만
    /// 반환합니다.
    pub async fn update(
        &self,
        user_id: &str,
        request: TodoRequest,
    ) -> Result<Vec<TodoResponse>, AppError> {
        let owner = parse_user_id(user_id)?;
        let todo_id = parse_todo_id(request.id.as_deref())?;

        self.todo_repo
            .update(&todo_id, &owner, &request.title, request.done)
            .await?;

        self.retrieve(user_id).await
    }

    /// 할 일을 삭제하고 전체 목록을 반환합니다.
    pub async fn delete(
        &self,
        user_id: &str,
        request: TodoRequest,
    ) -> Result<Vec<TodoResponse>, AppError> {
        let owner = parse_user_id(user_id)?;
        let todo_id = parse_todo_id(request.id.as_deref())?;

        let deleted = self.todo_repo.delete(&todo_id, &owner).await?;

        if !deleted {
            log::warn!("삭제할 항목 없음: {} (user {})", todo_id, user_id);
        }

        self.retrieve(user_id).await
    }
}

fn parse_user_id(user_id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(user_id)
        .map_err(|_| AppError::ValidationError("유효하지 않은 사용자 ID 형식입니다".to_string()))
}

fn parse_todo_id(id: Option<&str>) -> Result<ObjectId, AppError> {
    let id = id.ok_or_else(|| {
        AppError::ValidationError("대상 항목의 ID가 필요합니다".to_string())
    })?;

    ObjectId::parse_str(id)
        .map_err(|_| AppError::ValidationError("유효하지 않은 항목 ID 형식입니다".to_string()))
}
