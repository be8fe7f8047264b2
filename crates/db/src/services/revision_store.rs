//! Document creation, editing, history and revert.
//!
//! Every write appends a revision holding the content about to be lost and
//! only then overwrites the document, inside one transaction. The document
//! row is locked first so concurrent edits serialize on it.

use lexicon_core::error::CoreError;
use lexicon_core::revision::{plan_bootstrap, plan_edit, plan_revert, Snapshot};
use lexicon_core::types::DbId;

use crate::error::{StoreError, StoreResult};
use crate::models::document::{CreateDocument, Document, EditDocument};
use crate::models::revision::{DocumentHistory, RevertOutcome, RevisionDetail};
use crate::repositories::{DocumentRepo, RevisionRepo, UserRepo};
use crate::DbPool;

#[derive(Clone)]
pub struct RevisionStore {
    pool: DbPool,
}

impl RevisionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a document and its bootstrap revision.
    ///
    /// Titles are compared and stored exactly as given. Fails with
    /// `DuplicateTitle` when a document already has that title; nothing is
    /// written then.
    pub async fn create_document(
        &self,
        author_id: DbId,
        input: &CreateDocument,
    ) -> StoreResult<Document> {
        let mut tx = self.pool.begin().await?;

        if !UserRepo::exists(&mut *tx, author_id).await? {
            return Err(CoreError::NotFound {
                entity: "user",
                id: author_id,
            }
            .into());
        }
        if DocumentRepo::exists_by_title(&mut *tx, &input.title).await? {
            return Err(CoreError::DuplicateTitle(input.title.clone()).into());
        }

        let document = DocumentRepo::create(&mut *tx, input, author_id)
            .await
            .map_err(|e| StoreError::from(e).with_title(&input.title))?;

        let initial = Snapshot::new(document.summary.as_str(), document.body.as_str());
        let bootstrap = plan_bootstrap(document.id, author_id, &initial);
        let revision = RevisionRepo::create(&mut *tx, &bootstrap).await?;

        tx.commit().await?;

        tracing::info!(
            document_id = document.id,
            revision_id = revision.id,
            author_id,
            title = %document.title,
            "Document created",
        );

        Ok(document)
    }

    /// Snapshot the current content, credited to `editor_id`, then replace it.
    ///
    /// Any existing user may edit any document.
    pub async fn edit_document(
        &self,
        editor_id: DbId,
        document_id: DbId,
        input: &EditDocument,
    ) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        let document = DocumentRepo::find_by_id_for_update(&mut *tx, document_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "document",
                id: document_id,
            })?;

        if !UserRepo::exists(&mut *tx, editor_id).await? {
            return Err(CoreError::NotFound {
                entity: "user",
                id: editor_id,
            }
            .into());
        }

        let plan = plan_edit(
            &document.live(),
            editor_id,
            Snapshot::new(input.summary.as_str(), input.body.as_str()),
        );
        let revision = RevisionRepo::create(&mut *tx, &plan.revision).await?;
        DocumentRepo::apply_write(&mut *tx, document_id, &plan.write).await?;

        tx.commit().await?;

        tracing::info!(
            document_id,
            revision_id = revision.id,
            editor_id,
            "Document edited",
        );

        Ok(())
    }

    /// Header plus every revision of the document, oldest first.
    pub async fn get_history(&self, document_id: DbId) -> StoreResult<DocumentHistory> {
        let header = DocumentRepo::find_header(&self.pool, document_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "document",
                id: document_id,
            })?;
        let revisions = RevisionRepo::list_summaries_by_document(&self.pool, document_id).await?;
        Ok(DocumentHistory::new(header, revisions))
    }

    /// The snapshotted content of one revision with display names.
    pub async fn get_revision_detail(&self, revision_id: DbId) -> StoreResult<RevisionDetail> {
        RevisionRepo::find_detail(&self.pool, revision_id)
            .await?
            .ok_or_else(|| {
                CoreError::NotFound {
                    entity: "revision",
                    id: revision_id,
                }
                .into()
            })
    }

    /// Restore the content stored in `revision_id`.
    ///
    /// Requires an actor but not ownership. The revision appended here holds
    /// the overwritten content and is credited to the document's recent
    /// modifier, not to `actor`.
    pub async fn revert_document(
        &self,
        actor: Option<DbId>,
        revision_id: DbId,
    ) -> StoreResult<RevertOutcome> {
        let actor_id = actor.ok_or(CoreError::Unauthenticated)?;

        let mut tx = self.pool.begin().await?;

        let target = RevisionRepo::find_by_id(&mut *tx, revision_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "revision",
                id: revision_id,
            })?;

        let document = DocumentRepo::find_by_id_for_update(&mut *tx, target.document_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "document",
                id: target.document_id,
            })?;

        let plan = plan_revert(&document.live(), &target.stored())?;
        let recorded = RevisionRepo::create(&mut *tx, &plan.revision).await?;
        DocumentRepo::apply_write(&mut *tx, document.id, &plan.write).await?;

        tx.commit().await?;

        tracing::info!(
            document_id = document.id,
            restored_revision_id = target.id,
            recorded_revision_id = recorded.id,
            actor_id,
            "Document reverted",
        );

        Ok(RevertOutcome {
            document_id: document.id,
            restored_revision_id: target.id,
            recorded_revision_id: recorded.id,
        })
    }
}
