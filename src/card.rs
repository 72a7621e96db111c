//! The edit-state controller for a single post card.
use tracing::{debug, error};

use crate::error::{CardError, ValidationError};
use crate::post::{FileSelection, Post, photo_field, tweet_field};
use crate::remote::{BlobStore, CurrentUser, RecordStore, RemoteWriteError};
use crate::state::CardDeps;

/// Result of a commit attempt, as seen by the host.
///
/// Remote failures never carry an error out of `commit_edit`; they are
/// logged and folded into `Failed` (see `CommitFailurePolicy` for what
/// happens to the mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Saved,
    Failed,
    NotEditing,
}

/// Result of a delete attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Confirmation missing or the viewer does not own the post. No remote
    /// call was made.
    Refused,
    Failed,
}

/// Token handed out by `choose_file`, consumed by `load_preview`.
///
/// Carries the selection epoch so a preview that resolves after a cancel or
/// a re-selection is discarded instead of applied.
#[derive(Debug, Clone, Copy)]
pub struct PreviewTicket {
    epoch: u64,
}

/// One post with its local editing state.
///
/// Mirrors the two UI states of the card: read mode shows the persisted
/// post, edit mode works on a local draft (text + optional replacement
/// photo). The persisted copy and the draft diverge only while editing;
/// cancel and successful save reconverge them.
pub struct TweetCard<R, B, U>
where
    R: RecordStore,
    B: BlobStore,
    U: CurrentUser,
{
    deps: CardDeps<R, B, U>,
    post: Post,
    editing: bool,
    draft_text: String,
    pending_file: Option<FileSelection>,
    display_photo: Option<String>,
    preview_epoch: u64,
    alerts: Vec<String>,
}

impl<R, B, U> TweetCard<R, B, U>
where
    R: RecordStore,
    B: BlobStore,
    U: CurrentUser,
{
    pub fn new(deps: CardDeps<R, B, U>, post: Post) -> Self {
        let draft_text = post.tweet.clone();
        let display_photo = post.photo.clone();
        Self {
            deps,
            post,
            editing: false,
            draft_text,
            pending_file: None,
            display_photo,
            preview_epoch: 0,
            alerts: Vec::new(),
        }
    }

    pub fn post(&self) -> &Post {
        &self.post
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn draft_text(&self) -> &str {
        &self.draft_text
    }

    pub fn display_photo(&self) -> Option<&str> {
        self.display_photo.as_deref()
    }

    pub fn has_pending_file(&self) -> bool {
        self.pending_file.is_some()
    }

    pub fn config(&self) -> &crate::config::Config {
        &self.deps.config
    }

    /// Whether the current user owns this post. Gates edit and delete.
    pub fn is_owner(&self) -> bool {
        self.deps
            .user
            .current_user_id()
            .is_some_and(|uid| uid == self.post.user_id)
    }

    /// Drain pending user-facing alerts (rejected file selections).
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    /// Switch to edit mode. No-op for non-owners and while already editing.
    /// Makes no remote calls.
    pub fn enter_edit(&mut self) {
        if self.editing || !self.is_owner() {
            return;
        }
        self.editing = true;
        debug!(post_id = %self.post.id, "entered edit mode");
    }

    /// Replace the draft text. The length bound is a view-level input
    /// constraint, so no validation happens here.
    pub fn set_draft_text(&mut self, text: impl Into<String>) {
        self.draft_text = text.into();
    }

    /// Take a file selection from the picker.
    ///
    /// Accepted iff exactly one file was supplied and it fits the upload
    /// cap. On acceptance the caller gets a ticket to drive the async
    /// preview read; on rejection a user-facing warning is queued and any
    /// previously pending file is cleared, the display photo untouched.
    pub fn choose_file(&mut self, files: Vec<FileSelection>) -> Option<PreviewTicket> {
        if !self.editing {
            return None;
        }

        match validate_selection(&files, self.deps.config.max_upload_bytes) {
            Ok(file) => {
                self.pending_file = Some(file);
                self.preview_epoch += 1;
                Some(PreviewTicket {
                    epoch: self.preview_epoch,
                })
            }
            Err(reason) => {
                debug!(post_id = %self.post.id, %reason, "file selection rejected");
                self.alerts.push(format!(
                    "Please upload one picture smaller than {} KB.",
                    self.deps.config.max_upload_bytes / 1024
                ));
                self.pending_file = None;
                None
            }
        }
    }

    /// Read the pending file into a `data:` URL and show it as the photo.
    ///
    /// The result is applied only if edit mode is still active and no
    /// cancel or newer selection happened since the ticket was issued; a
    /// late preview is dropped, not applied.
    pub async fn load_preview(&mut self, ticket: PreviewTicket) {
        let Some(file) = self.pending_file.clone() else {
            return;
        };
        let data_url = read_preview(file).await;
        if self.editing && ticket.epoch == self.preview_epoch {
            self.display_photo = Some(data_url);
        } else {
            debug!(post_id = %self.post.id, "stale preview discarded");
        }
    }

    /// Leave edit mode, abandoning the draft and any pending file. The
    /// display photo reverts to the persisted one.
    pub fn cancel_edit(&mut self) {
        if !self.editing {
            return;
        }
        self.editing = false;
        self.pending_file = None;
        self.preview_epoch += 1;
        self.draft_text = self.post.tweet.clone();
        self.display_photo = self.post.photo.clone();
        debug!(post_id = %self.post.id, "edit cancelled");
    }

    /// Persist the draft: upload a pending photo (if any), then write the
    /// text field unconditionally.
    ///
    /// Remote failures are logged, never surfaced as an alert; whether the
    /// card stays in edit mode afterwards is the configured policy's call.
    pub async fn commit_edit(&mut self) -> CommitOutcome {
        if !self.editing {
            return CommitOutcome::NotEditing;
        }

        match self.persist_draft().await {
            Ok(()) => {
                self.editing = false;
                self.pending_file = None;
                self.preview_epoch += 1;
                debug!(post_id = %self.post.id, "edit committed");
                CommitOutcome::Saved
            }
            Err(e) => {
                error!(post_id = %self.post.id, error = %e, "failed to save edit");
                match self.deps.config.commit_failure_policy {
                    crate::config::CommitFailurePolicy::ReturnToRead => {
                        // Legacy behavior: drop back to read mode with the
                        // draft unsaved. The pending file is kept so a
                        // re-entered edit can retry the upload.
                        self.editing = false;
                    }
                    crate::config::CommitFailurePolicy::StayInEdit => {}
                }
                CommitOutcome::Failed
            }
        }
    }

    async fn persist_draft(&mut self) -> Result<(), CardError> {
        let collection = self.deps.config.collection.clone();

        if let Some(file) = self.pending_file.clone() {
            let path = self.blob_path();
            let handle = self.deps.blobs.upload_blob(&path, &file.bytes).await?;
            let url = self.deps.blobs.resolve_blob_url(&handle).await?;
            self.display_photo = Some(url.clone());
            self.deps
                .records
                .update_record(&collection, &self.post.id, photo_field(&url))
                .await?;
            self.post.photo = Some(url);
        }

        // Written even when unchanged; the store treats it as a no-op merge.
        self.deps
            .records
            .update_record(&collection, &self.post.id, tweet_field(&self.draft_text))
            .await?;
        self.post.tweet = self.draft_text.clone();
        Ok(())
    }

    /// Delete the post record and, when a photo exists, its blob.
    ///
    /// Requires both an explicit confirmation and ownership; otherwise no
    /// remote call is made. Failures are logged only.
    pub async fn delete(&mut self, confirmed: bool) -> DeleteOutcome {
        if !confirmed || !self.is_owner() {
            return DeleteOutcome::Refused;
        }

        match self.perform_delete().await {
            Ok(()) => {
                debug!(post_id = %self.post.id, "post deleted");
                DeleteOutcome::Deleted
            }
            Err(e) => {
                error!(post_id = %self.post.id, error = %e, "failed to delete post");
                DeleteOutcome::Failed
            }
        }
    }

    async fn perform_delete(&self) -> Result<(), CardError> {
        self.deps
            .records
            .delete_record(&self.deps.config.collection, &self.post.id)
            .await?;

        if self.post.photo.is_some() {
            match self.deps.blobs.delete_blob(&self.blob_path()).await {
                // Already gone counts as deleted.
                Ok(()) | Err(RemoteWriteError::NotFound) => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Apply an externally observed change of the persisted photo value.
    ///
    /// While editing the local preview wins; in read mode the display photo
    /// is re-derived from the persisted value.
    pub fn sync_photo(&mut self, persisted: Option<String>) {
        self.post.photo = persisted.clone();
        if !self.editing {
            self.display_photo = persisted;
        }
    }

    fn blob_path(&self) -> String {
        format!(
            "{}/{}/{}",
            self.deps.config.storage_prefix, self.post.user_id, self.post.id
        )
    }
}

fn validate_selection(
    files: &[FileSelection],
    max_bytes: usize,
) -> Result<FileSelection, ValidationError> {
    let [file] = files else {
        return Err(ValidationError::NotExactlyOneFile { count: files.len() });
    };
    if file.size() > max_bytes {
        return Err(ValidationError::FileTooLarge {
            size: file.size(),
            max: max_bytes,
        });
    }
    Ok(file.clone())
}

// The encode itself is cheap; yielding keeps the read honest about being
// asynchronous, so completion can interleave with a cancel.
async fn read_preview(file: FileSelection) -> String {
    tokio::task::yield_now().await;
    file.to_data_url()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_must_be_exactly_one_file() {
        let file = FileSelection {
            name: "a.png".into(),
            content_type: "image/png".into(),
            bytes: vec![0; 10],
        };
        assert!(matches!(
            validate_selection(&[], 100),
            Err(ValidationError::NotExactlyOneFile { count: 0 })
        ));
        assert!(matches!(
            validate_selection(&[file.clone(), file.clone()], 100),
            Err(ValidationError::NotExactlyOneFile { count: 2 })
        ));
        assert!(validate_selection(&[file], 100).is_ok());
    }

    #[test]
    fn selection_at_the_cap_is_accepted() {
        let file = FileSelection {
            name: "a.png".into(),
            content_type: "image/png".into(),
            bytes: vec![0; 1024 * 768],
        };
        assert!(validate_selection(std::slice::from_ref(&file), 1024 * 768).is_ok());
        assert!(matches!(
            validate_selection(&[file], 1024 * 768 - 1),
            Err(ValidationError::FileTooLarge { .. })
        ));
    }
}
