//! Interview attachment encoding and the append path.

use proptest::prelude::*;
use std::sync::Arc;

use talent_map::blob::LocalBlobStore;
use talent_map::interviews::{append_entry, decode, encode_all};
use talent_map::records::columns;
use talent_map::{
    ActionReport, AttachmentManager, InterviewAttachment, MemoryRecordStore, PipelineStage,
    RecordCache, TalentBoard,
};

fn attachment_strategy() -> impl Strategy<Value = InterviewAttachment> {
    (
        "https://[a-z]{1,8}\\.example/[a-zA-Z0-9/_-]{0,16}",
        "[a-zA-Z0-9 ._|-]{1,20}",
    )
        .prop_filter("names must carry text", |(_, name)| !name.trim().is_empty())
        .prop_map(|(url, name)| InterviewAttachment::new(url, name.trim()))
}

proptest! {
    #[test]
    fn appended_sequence_decodes_to_itself(entries in prop::collection::vec(attachment_strategy(), 0..8)) {
        let mut cell = String::new();
        for entry in &entries {
            cell = append_entry(&cell, entry).unwrap();
        }
        let decoded: Vec<_> = decode(&cell).collect();
        prop_assert_eq!(&decoded, &entries);
        prop_assert_eq!(encode_all(&entries).unwrap(), cell);
    }

    #[test]
    fn append_adds_exactly_one_entry(existing in prop::collection::vec(attachment_strategy(), 0..5), extra in attachment_strategy()) {
        let cell = encode_all(&existing).unwrap();
        let before = decode(&cell).count();
        let after = decode(&append_entry(&cell, &extra).unwrap()).count();
        prop_assert_eq!(after, before + 1);
    }
}

#[test]
fn malformed_entry_between_valid_ones_is_dropped() {
    let decoded: Vec<_> = decode("https://a|one.pdf;garbage;https://b|two.pdf").collect();
    assert_eq!(
        decoded,
        vec![
            InterviewAttachment::new("https://a", "one.pdf"),
            InterviewAttachment::new("https://b", "two.pdf"),
        ]
    );
}

fn candidate_sheet() -> Arc<MemoryRecordStore> {
    Arc::new(MemoryRecordStore::with_rows(vec![vec![
        (columns::FILE, "cv_1.pdf"),
        (columns::CLASSIFICATION, "🌟 Óptimo"),
        (columns::PROCESS, "Eng"),
        (columns::PIPELINE_STAGE, "📥 Nuevo"),
    ]]))
}

#[tokio::test]
async fn advance_then_attach_respects_gate_only_at_board_level() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = candidate_sheet();
    let cache = Arc::new(RecordCache::default());
    let board = TalentBoard::new(
        store.clone(),
        Arc::new(LocalBlobStore::new(dir.path())),
        cache.clone(),
        None,
    );

    assert!(board.advance("cv_1.pdf").await.is_success());
    let records = board.records().await.unwrap();
    assert_eq!(records[0].stage(), Some(PipelineStage::InReview));

    // The board refuses uploads while the selected stage is InReview.
    let report = board
        .attach_interview("cv_1.pdf", "https://x/y", "interview1.pdf", PipelineStage::InReview)
        .await;
    assert!(matches!(report, ActionReport::Warning(_)));
    assert_eq!(store.cell("cv_1.pdf", columns::INTERVIEWS).as_deref(), Some(""));

    // The manager itself does not gate.
    let count = board
        .attachments()
        .append("cv_1.pdf", "https://x/y", "interview1.pdf")
        .await
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(
        store.cell("cv_1.pdf", columns::INTERVIEWS).as_deref(),
        Some("https://x/y|interview1.pdf")
    );
}

#[tokio::test]
async fn missing_interviews_column_is_created_on_append() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = Arc::new(MemoryRecordStore::new(vec![
        columns::FILE.to_string(),
        columns::PROCESS.to_string(),
        columns::PIPELINE_STAGE.to_string(),
    ]));
    store.push_row(&[(columns::FILE, "cv_7.pdf"), (columns::PROCESS, "Eng")]);

    let manager = AttachmentManager::new(
        store.clone(),
        Arc::new(LocalBlobStore::new(dir.path())),
        Arc::new(RecordCache::default()),
    );
    assert!(manager.list("cv_7.pdf").await.unwrap().is_empty());

    manager.append("cv_7.pdf", "https://d/1", "r1.pdf").await.unwrap();
    manager.append("cv_7.pdf", "https://d/2", "r2.pdf").await.unwrap();

    let listed = manager.list("cv_7.pdf").await.unwrap();
    assert_eq!(
        listed,
        vec![
            InterviewAttachment::new("https://d/1", "r1.pdf"),
            InterviewAttachment::new("https://d/2", "r2.pdf"),
        ]
    );
}

#[tokio::test]
async fn refused_report_name_leaves_no_stored_document() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = candidate_sheet();
    let board = TalentBoard::new(
        store.clone(),
        Arc::new(LocalBlobStore::new(dir.path())),
        Arc::new(RecordCache::default()),
        None,
    );

    let report = board
        .upload_interview("cv_1.pdf", b"%PDF-1.4".to_vec(), "ronda;1.pdf", PipelineStage::Interviewed)
        .await;
    assert!(matches!(report, ActionReport::Failure(_)));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    assert_eq!(store.cell("cv_1.pdf", columns::INTERVIEWS).as_deref(), Some(""));
}

#[tokio::test]
async fn upload_on_interview_board_stores_document_and_link() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = candidate_sheet();
    let board = TalentBoard::new(
        store.clone(),
        Arc::new(LocalBlobStore::new(dir.path())),
        Arc::new(RecordCache::default()),
        None,
    );

    let report = board
        .upload_interview(
            "cv_1.pdf",
            b"%PDF-1.4 report".to_vec(),
            "round1.pdf",
            PipelineStage::ScheduleInterview,
        )
        .await;
    assert!(report.is_success(), "{report}");

    let stored = dir.path().join("Entrevista_cv_1.pdf_round1.pdf");
    assert_eq!(std::fs::read(&stored).unwrap(), b"%PDF-1.4 report");

    let attachments = board.interviews("cv_1.pdf").await.unwrap();
    assert_eq!(attachments.len(), 1);
    assert_eq!(attachments[0].display_name, "round1.pdf");
    assert!(attachments[0].url.starts_with("file://"));
}
