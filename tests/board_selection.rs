//! Board selection over a realistic candidate sheet.

use std::sync::Arc;

use talent_map::blob::LocalBlobStore;
use talent_map::records::columns;
use talent_map::{BoardView, MemoryRecordStore, PipelineStage, RecordCache, TalentBoard};

fn sheet() -> Arc<MemoryRecordStore> {
    let row = |file: &'static str, class: &'static str, date: &'static str, process: &'static str, stage: &'static str| {
        vec![
            (columns::FILE, file),
            (columns::CLASSIFICATION, class),
            (columns::SUBMITTED_AT, date),
            (columns::PROCESS, process),
            (columns::PIPELINE_STAGE, stage),
        ]
    };
    Arc::new(MemoryRecordStore::with_rows(vec![
        row("a_old.pdf", "🌟 Óptimo", "2024-01-10", "Eng", "📥 Nuevo"),
        row("a_new.pdf", "🌟 Óptimo", "2024-03-02 09:30:00", "Eng", ""),
        row("a_nodate.pdf", "🌟 Óptimo", "", "Eng", "📥 Nuevo"),
        row("b_1.pdf", "✅ Adecuado", "15/02/2024", "Eng", "📥 Nuevo"),
        row("other_proc.pdf", "🌟 Óptimo", "2024-04-01", "Sales", "📥 Nuevo"),
        row("discarded.pdf", "🌟 Óptimo", "2024-05-01", "Eng", "Descartado (Reclutador)"),
        row("unclassified.pdf", "", "2024-05-01", "Eng", "📥 Nuevo"),
        row("rej_1.pdf", "", "2024-05-01", "Eng", "❌ Rechazado"),
        row("rej_2.pdf", "✅ Adecuado", "2023-01-01", "Eng", "❌ Rechazado"),
        row("review.pdf", "✅ Adecuado", "2024-02-01", "Eng", "👀 En Revisión"),
    ]))
}

fn board(store: Arc<MemoryRecordStore>, dir: &tempfile::TempDir) -> TalentBoard {
    TalentBoard::new(
        store,
        Arc::new(LocalBlobStore::new(dir.path())),
        Arc::new(RecordCache::default()),
        None,
    )
}

fn ids(records: &[talent_map::CandidateRecord]) -> Vec<&str> {
    records.iter().map(|r| r.file_id.as_str()).collect()
}

#[tokio::test]
async fn new_board_splits_and_orders_by_date() {
    let dir = tempfile::TempDir::new().unwrap();
    let view = board(sheet(), &dir).view("Eng", PipelineStage::New).await.unwrap();

    let BoardView::Split { optimal, adequate } = &view else {
        panic!("expected split view, got {view:?}");
    };
    assert_eq!(ids(optimal), vec!["a_new.pdf", "a_old.pdf", "a_nodate.pdf"]);
    assert_eq!(ids(adequate), vec!["b_1.pdf"]);
    assert_eq!(view.optimal_count(), 3);
    assert_eq!(view.adequate_count(), 1);
}

#[tokio::test]
async fn rejected_board_is_flat_and_in_store_order() {
    let dir = tempfile::TempDir::new().unwrap();
    let view = board(sheet(), &dir)
        .view("Eng", PipelineStage::Rejected)
        .await
        .unwrap();

    let BoardView::Rejected { candidates } = &view else {
        panic!("expected rejected view, got {view:?}");
    };
    assert_eq!(ids(candidates), vec!["rej_1.pdf", "rej_2.pdf"]);
}

#[tokio::test]
async fn other_process_and_stage_are_isolated() {
    let dir = tempfile::TempDir::new().unwrap();
    let board = board(sheet(), &dir);

    let sales = board.view("Sales", PipelineStage::New).await.unwrap();
    assert_eq!(sales.total(), 1);

    let review = board.view("Eng", PipelineStage::InReview).await.unwrap();
    assert_eq!(review.adequate_count(), 1);
    assert_eq!(review.optimal_count(), 0);

    assert_eq!(board.processes().await.unwrap(), vec!["Eng", "Sales"]);
}

#[tokio::test]
async fn views_are_served_from_cache_until_a_write() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = sheet();
    let board = board(store.clone(), &dir);

    board.view("Eng", PipelineStage::New).await.unwrap();
    board.view("Eng", PipelineStage::InReview).await.unwrap();
    board.processes().await.unwrap();
    assert_eq!(store.read_count(), 1);

    assert!(board.advance("b_1.pdf").await.is_success());
    let review = board.view("Eng", PipelineStage::InReview).await.unwrap();
    assert_eq!(store.read_count(), 2);
    assert_eq!(review.adequate_count(), 2);
}
