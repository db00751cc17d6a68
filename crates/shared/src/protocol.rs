use serde::{Deserialize, Serialize};

use crate::domain::{TodoId, TodoStatus};

pub const LIST_TODOS_PATH: &str = "/todos/all";
pub const CREATE_TODO_PATH: &str = "/todo/create";

pub fn mark_completed_path(id: TodoId) -> String {
    format!("/todo/{id}/mark/completed")
}

pub fn delete_todo_path(id: TodoId) -> String {
    format!("/todo/{id}/delete")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TodoStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// A mutation the client sends to the todo server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ClientRequest {
    CreateTodo(CreateTodoRequest),
    MarkCompleted { id: TodoId },
    DeleteTodo { id: TodoId },
}

impl ClientRequest {
    pub fn method(&self) -> Method {
        match self {
            Self::CreateTodo(_) => Method::Post,
            Self::MarkCompleted { .. } => Method::Put,
            Self::DeleteTodo { .. } => Method::Delete,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::CreateTodo(_) => CREATE_TODO_PATH.to_string(),
            Self::MarkCompleted { id } => mark_completed_path(*id),
            Self::DeleteTodo { id } => delete_todo_path(*id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_decodes_null_description() {
        let todos: Vec<Todo> = serde_json::from_str(
            r#"[{"id":3,"title":"milk","description":null,"status":"New"}]"#,
        )
        .expect("decode");
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id, TodoId(3));
        assert_eq!(todos[0].description, None);
        assert_eq!(todos[0].status, TodoStatus::New);
    }

    #[test]
    fn create_request_body_matches_server_shape() {
        let body = serde_json::to_value(CreateTodoRequest {
            title: "T".into(),
            description: Some("D".into()),
        })
        .expect("encode");
        assert_eq!(body, serde_json::json!({ "title": "T", "description": "D" }));
    }

    #[test]
    fn mutation_routes() {
        assert_eq!(
            ClientRequest::MarkCompleted { id: TodoId(5) }.path(),
            "/todo/5/mark/completed"
        );
        assert_eq!(ClientRequest::DeleteTodo { id: TodoId(7) }.path(), "/todo/7/delete");
        assert_eq!(ClientRequest::DeleteTodo { id: TodoId(7) }.method(), Method::Delete);
        assert_eq!(
            ClientRequest::CreateTodo(CreateTodoRequest {
                title: "T".into(),
                description: None,
            })
            .method(),
            Method::Post
        );
    }
}
