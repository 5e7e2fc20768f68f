// src/service/attachment_service.rs
use crate::api::dto::attachment_dto::AttachmentDto;
use crate::error::{AppError, AppResult};
use crate::repository::attachment_repository::AttachmentRepository;
use crate::repository::task_repository::TaskRepository;
use crate::service::storage_service::StorageService;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// 添付ファイルサービス
pub struct AttachmentService {
    repo: Arc<AttachmentRepository>,
    task_repo: Arc<TaskRepository>,
    storage: Arc<dyn StorageService>,
}

impl AttachmentService {
    pub fn new(
        repo: Arc<AttachmentRepository>,
        task_repo: Arc<TaskRepository>,
        storage: Arc<dyn StorageService>,
    ) -> Self {
        Self {
            repo,
            task_repo,
            storage,
        }
    }

    /// ファイルを保存してからレコードを作成
    pub async fn upload_file(
        &self,
        task_id: Uuid,
        filename: String,
        data: Vec<u8>,
    ) -> AppResult<AttachmentDto> {
        if filename.is_empty() {
            return Err(AppError::BadRequest("File name is required".to_string()));
        }

        self.task_repo
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Task with id {} not found", task_id)))?;

        let file_url = self.storage.store(&filename, data).await?;

        let attachment = self.repo.create(filename, file_url, task_id).await?;

        info!(
            attachment_id = %attachment.id,
            task_id = %task_id,
            "Attachment uploaded"
        );

        Ok(attachment.into())
    }

    /// タスクの添付ファイル一覧
    pub async fn list_attachments(&self, task_id: Uuid) -> AppResult<Vec<AttachmentDto>> {
        self.task_repo
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Task with id {} not found", task_id)))?;

        let attachments = self.repo.find_by_task(task_id).await?;
        Ok(attachments.into_iter().map(Into::into).collect())
    }

    /// 添付ファイル削除
    ///
    /// 指定されたタスクに属していない添付は NotFound として扱う。
    pub async fn delete_attachment(&self, task_id: Uuid, attachment_id: Uuid) -> AppResult<()> {
        let attachment = self
            .repo
            .find_by_id(attachment_id)
            .await?
            .filter(|a| a.task_id == task_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("Attachment with id {} not found", attachment_id))
            })?;

        // 先にレコードを消してから実ファイルを削除する。
        // 実ファイルの削除失敗は警告に留める（レコードは既に無い）。
        self.repo.delete(attachment_id).await?;

        if let Err(e) = self.storage.delete(&attachment.file_url).await {
            warn!(
                attachment_id = %attachment_id,
                error = %e,
                "Failed to remove stored file"
            );
        }

        info!(attachment_id = %attachment_id, task_id = %task_id, "Attachment deleted");

        Ok(())
    }
}
