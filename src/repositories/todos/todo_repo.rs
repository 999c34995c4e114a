//! # 할 일 리포지토리 구현
//!
//! 할 일 엔티티의 데이터 액세스 계층입니다. 모든 조회/변경은
//! 소유자(`user_id`) 필터를 포함하여, 다른 사용자의 항목에 접근할 수
//! 없게 합니다.

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId};
use singleton_macro::repository;

use crate::{
    core::registry::Repository,
    db::Database,
    domain::entities::todos::todo::Todo,
    errors::errors::AppError,
};

/// 할 일 데이터 액세스 리포지토리
#[repository(name = "todo", collection = "todos")]
pub struct TodoRepository {
    /// MongoDB 데이터베이스 연결 (자동 주입)
    db: Arc<Database>,
}

impl TodoRepository {
    /// 사용자의 모든 할 일 조회
    pub async fn find_by_user_id(&self, user_id: &ObjectId) -> Result<Vec<Todo>, AppError> {
        let mut cursor = self
            .collection::<Todo>()
            .find(doc! { "user_id": *user_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        use futures_util::StreamExt;

        let mut todos = Vec::new();
        while let Some(todo) = cursor.next().await {
            match todo {
                Ok(todo) => todos.push(todo),
                Err(e) => return Err(AppError::DatabaseError(e.to_string())),
            }
        }

        Ok(todos)
    }

    /// 새 할 일 저장
    pub async fn insert(&self, mut todo: Todo) -> Result<Todo, AppError> {
        let result = self
            .collection::<Todo>()
            .insert_one(&todo)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        todo.id = result.inserted_id.as_object_id();

        Ok(todo)
    }

    /// 할 일 수정 (제목, 완료 여부)
    ///
    /// 소유자가 아닌 항목은 필터에 걸리지 않아 수정되지 않습니다.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - 항목이 수정됨
    /// * `Ok(false)` - 해당 사용자의 항목이 아니거나 존재하지 않음
    pub async fn update(
        &self,
        id: &ObjectId,
        user_id: &ObjectId,
        title: &str,
        done: bool,
    ) -> Result<bool, AppError> {
        let result = self
            .collection::<Todo>()
            .update_one(
                doc! { "_id": *id, "user_id": *user_id },
                doc! { "$set": { "title": title, "done": done } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.matched_count > 0)
    }

    /// 할 일 삭제
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - 항목이 삭제됨
    /// * `Ok(false)` - 해당 사용자의 항목이 아니거나 존재하지 않음
    pub async fn delete(&self, id: &ObjectId, user_id: &ObjectId) -> Result<bool, AppError> {
        let result = self
            .collection::<Todo>()
            .delete_one(doc! { "_id": *id, "user_id": *user_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }
}
