//! Integration tests for the document revision workflow.
//!
//! Exercises `RevisionStore` against a real database:
//! - Creation writes exactly one bootstrap revision mirroring the content
//! - Each edit snapshots the content it overwrites, credited to the editor
//! - Revert restores a snapshot byte-for-byte and records what it replaced
//! - Duplicate titles are rejected without writing anything
//! - Missing ids and missing actors surface as distinct error kinds

use assert_matches::assert_matches;
use lexicon_core::error::CoreError;
use lexicon_core::types::DbId;
use lexicon_db::error::{ErrorKind, StoreError};
use lexicon_db::models::document::{CreateDocument, EditDocument};
use lexicon_db::models::user::CreateUser;
use lexicon_db::repositories::{DocumentRepo, RevisionRepo, UserRepo};
use lexicon_db::services::RevisionStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, name: &str) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            username: name.to_string(),
            nickname: name.to_string(),
            profile_image: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn new_document(title: &str, summary: &str, body: &str) -> CreateDocument {
    CreateDocument {
        title: title.to_string(),
        summary: summary.to_string(),
        body: body.to_string(),
    }
}

fn edit(summary: &str, body: &str) -> EditDocument {
    EditDocument {
        summary: summary.to_string(),
        body: body.to_string(),
    }
}

async fn live_content(pool: &PgPool, document_id: DbId) -> (String, String, DbId) {
    let doc = DocumentRepo::find_by_id(pool, document_id)
        .await
        .unwrap()
        .unwrap();
    (doc.summary, doc.body, doc.recent_modifier_id)
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn create_writes_single_bootstrap_revision(pool: PgPool) {
    let author = new_user(&pool, "alice").await;
    let store = RevisionStore::new(pool.clone());

    let doc = store
        .create_document(author, &new_document("Foo", "s1", "b1"))
        .await
        .unwrap();
    assert_eq!(doc.title, "Foo");
    assert_eq!(doc.first_author_id, author);
    assert_eq!(doc.recent_modifier_id, author);
    assert_eq!(doc.views, 0);

    let history = store.get_history(doc.id).await.unwrap();
    assert_eq!(history.title, "Foo");
    assert_eq!(history.first_author_nickname, "alice");
    assert_eq!(history.revisions.len(), 1);
    assert_eq!(history.revisions[0].revert_from_id, None);
    assert_eq!(history.revisions[0].editor_nickname, "alice");

    let detail = store
        .get_revision_detail(history.revisions[0].revision_id)
        .await
        .unwrap();
    assert_eq!(detail.document_id, doc.id);
    assert_eq!(detail.summary, "s1");
    assert_eq!(detail.body, "b1");
    assert_eq!(detail.revert_from_id, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn titles_are_compared_and_stored_exactly(pool: PgPool) {
    let author = new_user(&pool, "alice").await;
    let store = RevisionStore::new(pool.clone());

    let plain = store
        .create_document(author, &new_document("Foo", "s", "b"))
        .await
        .unwrap();
    let padded = store
        .create_document(author, &new_document("Foo ", "s", "b"))
        .await
        .unwrap();

    assert_ne!(plain.id, padded.id);
    assert_eq!(padded.title, "Foo ");
    assert_eq!(DocumentRepo::count(&pool).await.unwrap(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_title_rejected_without_mutation(pool: PgPool) {
    let author = new_user(&pool, "alice").await;
    let other = new_user(&pool, "bob").await;
    let store = RevisionStore::new(pool.clone());

    let original = store
        .create_document(author, &new_document("Foo", "s1", "b1"))
        .await
        .unwrap();

    let err = store
        .create_document(other, &new_document("Foo", "x", "y"))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::DuplicateTitle(ref t)) if t == "Foo");
    assert_eq!(err.kind(), ErrorKind::DuplicateTitle);

    assert_eq!(DocumentRepo::count(&pool).await.unwrap(), 1);
    let revisions = RevisionRepo::list_by_document(&pool, original.id)
        .await
        .unwrap();
    assert_eq!(revisions.len(), 1);
    assert_eq!(live_content(&pool, original.id).await.0, "s1");
}

#[sqlx::test(migrations = "./migrations")]
async fn titles_are_case_sensitive(pool: PgPool) {
    let author = new_user(&pool, "alice").await;
    let store = RevisionStore::new(pool);

    store
        .create_document(author, &new_document("Foo", "s", "b"))
        .await
        .unwrap();
    store
        .create_document(author, &new_document("foo", "s", "b"))
        .await
        .unwrap();
}

#[sqlx::test(migrations = "./migrations")]
async fn content_is_stored_without_length_rules(pool: PgPool) {
    let author = new_user(&pool, "alice").await;
    let store = RevisionStore::new(pool.clone());

    let long_title = "가".repeat(150);
    let doc = store
        .create_document(author, &new_document(&long_title, "", ""))
        .await
        .unwrap();
    assert_eq!(doc.title, long_title);

    let long_body = "x".repeat(20_001);
    store
        .edit_document(author, doc.id, &edit("s2", &long_body))
        .await
        .unwrap();
    store
        .edit_document(author, doc.id, &edit("s3", ""))
        .await
        .unwrap();

    let (summary, body, _) = live_content(&pool, doc.id).await;
    assert_eq!(summary, "s3");
    assert_eq!(body, "");

    let revisions = RevisionRepo::list_by_document(&pool, doc.id)
        .await
        .unwrap();
    assert_eq!(revisions[2].prev_body, long_body);
}

#[sqlx::test(migrations = "./migrations")]
async fn create_by_unknown_author_is_not_found(pool: PgPool) {
    let store = RevisionStore::new(pool);

    let err = store
        .create_document(999, &new_document("Foo", "s", "b"))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        StoreError::Core(CoreError::NotFound {
            entity: "user",
            id: 999
        })
    );
}

// ---------------------------------------------------------------------------
// Editing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn each_edit_snapshots_prior_content(pool: PgPool) {
    let author = new_user(&pool, "alice").await;
    let editor = new_user(&pool, "bob").await;
    let store = RevisionStore::new(pool.clone());

    let doc = store
        .create_document(author, &new_document("Foo", "s0", "b0"))
        .await
        .unwrap();

    let edits = 4;
    for k in 1..=edits {
        store
            .edit_document(editor, doc.id, &edit(&format!("s{k}"), &format!("b{k}")))
            .await
            .unwrap();
    }

    let revisions = RevisionRepo::list_by_document(&pool, doc.id)
        .await
        .unwrap();
    assert_eq!(revisions.len(), edits + 1);

    // Bootstrap mirrors s0; edit k recorded what was live before it, s{k-1}.
    assert_eq!(revisions[0].prev_summary, "s0");
    assert_eq!(revisions[0].editor_id, author);
    for k in 1..=edits {
        assert_eq!(revisions[k].prev_summary, format!("s{}", k - 1));
        assert_eq!(revisions[k].prev_body, format!("b{}", k - 1));
        assert_eq!(revisions[k].editor_id, editor);
        assert_eq!(revisions[k].revert_from_id, None);
    }

    let (summary, body, modifier) = live_content(&pool, doc.id).await;
    assert_eq!(summary, format!("s{edits}"));
    assert_eq!(body, format!("b{edits}"));
    assert_eq!(modifier, editor);
}

#[sqlx::test(migrations = "./migrations")]
async fn edit_missing_document_is_not_found(pool: PgPool) {
    let editor = new_user(&pool, "bob").await;
    let store = RevisionStore::new(pool);

    let err = store
        .edit_document(editor, 42, &edit("s", "b"))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        StoreError::Core(CoreError::NotFound {
            entity: "document",
            id: 42
        })
    );

    // Empty content does not mask the missing document.
    let err = store
        .edit_document(editor, 9999, &edit("", ""))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[sqlx::test(migrations = "./migrations")]
async fn edit_by_unknown_user_writes_nothing(pool: PgPool) {
    let author = new_user(&pool, "alice").await;
    let store = RevisionStore::new(pool.clone());
    let doc = store
        .create_document(author, &new_document("Foo", "s1", "b1"))
        .await
        .unwrap();

    let err = store
        .edit_document(999, doc.id, &edit("s2", "b2"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let revisions = RevisionRepo::list_by_document(&pool, doc.id)
        .await
        .unwrap();
    assert_eq!(revisions.len(), 1);
    assert_eq!(live_content(&pool, doc.id).await.0, "s1");
}

// ---------------------------------------------------------------------------
// Revert
// ---------------------------------------------------------------------------

/// create s1 -> edit s2 -> edit s3 -> revert to the revision holding s2.
#[sqlx::test(migrations = "./migrations")]
async fn edit_edit_revert_scenario(pool: PgPool) {
    let author = new_user(&pool, "alice").await;
    let editor = new_user(&pool, "bob").await;
    let reverter = new_user(&pool, "carol").await;
    let store = RevisionStore::new(pool.clone());

    let doc = store
        .create_document(author, &new_document("Foo", "s1", "b1"))
        .await
        .unwrap();
    store
        .edit_document(author, doc.id, &edit("s2", "b2"))
        .await
        .unwrap();
    store
        .edit_document(editor, doc.id, &edit("s3", "b3"))
        .await
        .unwrap();

    let history = store.get_history(doc.id).await.unwrap();
    assert_eq!(history.revisions.len(), 3);

    let mut snapshots = Vec::new();
    for entry in &history.revisions[1..] {
        let detail = store.get_revision_detail(entry.revision_id).await.unwrap();
        snapshots.push(format!("{}/{}", detail.summary, detail.body));
    }
    assert_eq!(snapshots, ["s1/b1", "s2/b2"]);

    let (summary, body, _) = live_content(&pool, doc.id).await;
    assert_eq!((summary.as_str(), body.as_str()), ("s3", "b3"));

    // The third entry was recorded by bob's edit and holds s2/b2.
    let target = history.revisions[2].revision_id;
    let outcome = store
        .revert_document(Some(reverter), target)
        .await
        .unwrap();
    assert_eq!(outcome.document_id, doc.id);
    assert_eq!(outcome.restored_revision_id, target);

    let (summary, body, modifier) = live_content(&pool, doc.id).await;
    assert_eq!((summary.as_str(), body.as_str()), ("s2", "b2"));
    // The restored content is credited to whoever recorded the target.
    assert_eq!(modifier, editor);

    let history = store.get_history(doc.id).await.unwrap();
    assert_eq!(history.revisions.len(), 4);
    let fourth = &history.revisions[3];
    assert_eq!(fourth.revision_id, outcome.recorded_revision_id);
    assert_eq!(fourth.revert_from_id, Some(target));
    // s3/b3 was last held by bob, not by carol who reverted.
    assert_eq!(fourth.editor_nickname, "bob");

    let detail = store.get_revision_detail(fourth.revision_id).await.unwrap();
    assert_eq!(detail.summary, "s3");
    assert_eq!(detail.body, "b3");
    assert_eq!(detail.title, "Foo");
    assert_eq!(detail.first_author_nickname, "alice");
}

#[sqlx::test(migrations = "./migrations")]
async fn revert_restores_exact_bytes(pool: PgPool) {
    let author = new_user(&pool, "alice").await;
    let store = RevisionStore::new(pool.clone());

    let summary = "  공백과\t탭  ";
    let body = "line one\r\nline two\n\n  ";
    let doc = store
        .create_document(author, &new_document("Foo", summary, body))
        .await
        .unwrap();
    store
        .edit_document(author, doc.id, &edit("s2", "b2"))
        .await
        .unwrap();

    let bootstrap = store.get_history(doc.id).await.unwrap().revisions[0].revision_id;
    store
        .revert_document(Some(author), bootstrap)
        .await
        .unwrap();

    let (live_summary, live_body, _) = live_content(&pool, doc.id).await;
    assert_eq!(live_summary, summary);
    assert_eq!(live_body, body);
}

#[sqlx::test(migrations = "./migrations")]
async fn revert_of_revert_links_to_recorded_revision(pool: PgPool) {
    let author = new_user(&pool, "alice").await;
    let store = RevisionStore::new(pool.clone());

    let doc = store
        .create_document(author, &new_document("Foo", "s1", "b1"))
        .await
        .unwrap();
    store
        .edit_document(author, doc.id, &edit("s2", "b2"))
        .await
        .unwrap();

    let bootstrap = store.get_history(doc.id).await.unwrap().revisions[0].revision_id;
    let first = store
        .revert_document(Some(author), bootstrap)
        .await
        .unwrap();
    // Undo the revert by restoring the revision it recorded.
    let second = store
        .revert_document(Some(author), first.recorded_revision_id)
        .await
        .unwrap();

    assert_eq!(live_content(&pool, doc.id).await.0, "s2");

    let recorded = RevisionRepo::find_by_id(&pool, second.recorded_revision_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(recorded.revert_from_id, Some(first.recorded_revision_id));
    assert_eq!(recorded.prev_summary, "s1");
    assert!(recorded.id > first.recorded_revision_id);
}

#[sqlx::test(migrations = "./migrations")]
async fn revert_requires_actor(pool: PgPool) {
    let author = new_user(&pool, "alice").await;
    let store = RevisionStore::new(pool.clone());
    let doc = store
        .create_document(author, &new_document("Foo", "s1", "b1"))
        .await
        .unwrap();
    let bootstrap = store.get_history(doc.id).await.unwrap().revisions[0].revision_id;

    let err = store.revert_document(None, bootstrap).await.unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::Unauthenticated));

    let revisions = RevisionRepo::list_by_document(&pool, doc.id)
        .await
        .unwrap();
    assert_eq!(revisions.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn revert_missing_revision_is_not_found(pool: PgPool) {
    let author = new_user(&pool, "alice").await;
    let store = RevisionStore::new(pool);

    let err = store.revert_document(Some(author), 7).await.unwrap_err();
    assert_matches!(
        err,
        StoreError::Core(CoreError::NotFound {
            entity: "revision",
            id: 7
        })
    );
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn history_of_missing_document_is_not_found(pool: PgPool) {
    let store = RevisionStore::new(pool);
    let err = store.get_history(1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[sqlx::test(migrations = "./migrations")]
async fn missing_revision_detail_is_not_found(pool: PgPool) {
    let store = RevisionStore::new(pool);
    let err = store.get_revision_detail(1).await.unwrap_err();
    assert_matches!(
        err,
        StoreError::Core(CoreError::NotFound {
            entity: "revision",
            id: 1
        })
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn history_reports_creation_day(pool: PgPool) {
    let author = new_user(&pool, "alice").await;
    let store = RevisionStore::new(pool);
    let doc = store
        .create_document(author, &new_document("Foo", "s1", "b1"))
        .await
        .unwrap();

    let history = store.get_history(doc.id).await.unwrap();
    let detail = store
        .get_revision_detail(history.revisions[0].revision_id)
        .await
        .unwrap();
    assert_eq!(history.revisions[0].created_on, detail.created_at.date_naive());
}
