// src/api/mod.rs
use crate::service::attachment_service::AttachmentService;
use crate::service::auth_service::AuthService;
use crate::service::comment_service::CommentService;
use crate::service::project_service::ProjectService;
use crate::service::report_service::ReportService;
use crate::service::task_service::TaskService;
use crate::service::user_service::UserService;
use std::sync::Arc;

pub mod dto;
pub mod handlers;

/// 統一されたアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub project_service: Arc<ProjectService>,
    pub task_service: Arc<TaskService>,
    pub comment_service: Arc<CommentService>,
    pub attachment_service: Arc<AttachmentService>,
    pub report_service: Arc<ReportService>,
}
