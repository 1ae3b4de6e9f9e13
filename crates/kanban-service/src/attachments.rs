use kanban_core::attachment::FileAttachment;
use kanban_core::id::timestamp_id;
use kanban_core::task::{Task, UpdateTask};
use tracing::info;

use crate::error::{required, ServiceError};
use crate::BoardService;

impl BoardService {
    /// Store `bytes` inline on the task as a base64 `data:` URL.
    pub fn attach_file(
        &self,
        task_id: &str,
        name: &str,
        mime_type: &str,
        bytes: &[u8],
    ) -> Result<FileAttachment, ServiceError> {
        let name = required("file name", name)?;
        let task = self.db().get_task(task_id)?;
        let id = timestamp_id("file", |id| task.attachments.iter().any(|a| a.id == id));
        let attachment = FileAttachment::from_bytes(id, &name, mime_type, bytes);

        let mut attachments = task.attachments;
        attachments.push(attachment.clone());
        self.db().update_task(
            task_id,
            &UpdateTask {
                attachments: Some(attachments),
                ..Default::default()
            },
        )?;
        info!(task = task_id, file = %attachment.id, size = attachment.size, "attached file");
        Ok(attachment)
    }

    pub fn remove_attachment(&self, task_id: &str, attachment_id: &str) -> Result<Task, ServiceError> {
        let task = self.db().get_task(task_id)?;
        if !task.attachments.iter().any(|a| a.id == attachment_id) {
            return Err(ServiceError::NotFound(format!("attachment {attachment_id}")));
        }
        let attachments = task
            .attachments
            .into_iter()
            .filter(|a| a.id != attachment_id)
            .collect();
        Ok(self.db().update_task(
            task_id,
            &UpdateTask {
                attachments: Some(attachments),
                ..Default::default()
            },
        )?)
    }

    pub fn attachment(&self, task_id: &str, attachment_id: &str) -> Result<FileAttachment, ServiceError> {
        self.db()
            .get_task(task_id)?
            .attachments
            .into_iter()
            .find(|a| a.id == attachment_id)
            .ok_or_else(|| ServiceError::NotFound(format!("attachment {attachment_id}")))
    }

    /// Decoded payload, for saving the file back to disk.
    pub fn attachment_bytes(&self, task_id: &str, attachment_id: &str) -> Result<Vec<u8>, ServiceError> {
        Ok(self.attachment(task_id, attachment_id)?.bytes()?)
    }
}
