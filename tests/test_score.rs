use hatchling::config::HIGH_SCORE_CAP;
use hatchling::score::{ScoreBoard, ScoreEntry};

fn full_board() -> ScoreBoard {
    let mut board = ScoreBoard::in_memory();
    // Scores 1000, 950, ..., 550; minimum is 550.
    for i in 0..HIGH_SCORE_CAP as u32 {
        board.insert("AAA", 1000 - i * 50);
    }
    board
}

fn scores(board: &ScoreBoard) -> Vec<u32> {
    board.entries().iter().map(|e| e.score).collect()
}

// ── Qualification ─────────────────────────────────────────────────────────────

#[test]
fn empty_table_qualifies_anything() {
    let board = ScoreBoard::in_memory();
    assert!(board.qualifies(0));
}

#[test]
fn partial_table_qualifies_anything() {
    let mut board = ScoreBoard::in_memory();
    board.insert("AAA", 500);
    assert!(board.qualifies(0));
}

#[test]
fn full_table_requires_beating_the_cutoff() {
    let board = full_board();
    assert!(board.qualifies(551));
    assert!(!board.qualifies(550));
    assert!(!board.qualifies(0));
}

// ── Insertion ─────────────────────────────────────────────────────────────────

#[test]
fn insert_keeps_descending_order() {
    let mut board = ScoreBoard::in_memory();
    board.insert("LOW", 100);
    board.insert("TOP", 900);
    board.insert("MID", 500);
    assert_eq!(scores(&board), vec![900, 500, 100]);
}

#[test]
fn insert_reports_one_based_rank() {
    let mut board = ScoreBoard::in_memory();
    assert_eq!(board.insert("AAA", 100), Some(1));
    assert_eq!(board.insert("BBB", 900), Some(1));
    assert_eq!(board.insert("CCC", 500), Some(2));
}

#[test]
fn tie_ranks_behind_the_older_entry() {
    let mut board = ScoreBoard::in_memory();
    board.insert("OLD", 500);
    assert_eq!(board.insert("NEW", 500), Some(2));
    assert_eq!(board.entries()[0].name, "OLD");
    assert_eq!(board.entries()[1].name, "NEW");
}

#[test]
fn full_table_evicts_the_lowest() {
    let mut board = full_board();
    // 9999 beats the 500-range minimum and takes rank 1.
    assert_eq!(board.insert("ACE", 9999), Some(1));
    assert_eq!(board.entries().len(), HIGH_SCORE_CAP);
    assert_eq!(board.entries()[0], ScoreEntry { name: "ACE".into(), score: 9999 });
    // The old minimum fell off the end.
    assert!(!scores(&board).contains(&550));
    let s = scores(&board);
    assert!(s.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn non_qualifying_insert_leaves_the_table_alone() {
    let mut board = full_board();
    let before = scores(&board);
    assert_eq!(board.insert("LOW", 550), None);
    assert_eq!(scores(&board), before);
}

// ── Persistence ───────────────────────────────────────────────────────────────

#[test]
fn round_trips_through_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("scores.json");

    let mut board = ScoreBoard::load(path.clone());
    board.insert("ACE", 9000);
    board.insert("BOB", 4000);
    board.persist().expect("persist");

    let reloaded = ScoreBoard::load(path);
    assert_eq!(reloaded.entries(), board.entries());
}

#[test]
fn missing_file_loads_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let board = ScoreBoard::load(dir.path().join("nope.json"));
    assert!(board.entries().is_empty());
}

#[test]
fn corrupt_file_loads_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("scores.json");
    std::fs::write(&path, "{ not json ]").expect("write");
    let board = ScoreBoard::load(path);
    assert!(board.entries().is_empty());
}

#[test]
fn oversized_file_is_trimmed_on_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("scores.json");
    let entries: Vec<ScoreEntry> = (0..20)
        .map(|i| ScoreEntry { name: "AAA".into(), score: i * 10 })
        .collect();
    std::fs::write(&path, serde_json::to_string(&entries).unwrap()).expect("write");

    let board = ScoreBoard::load(path);
    assert_eq!(board.entries().len(), HIGH_SCORE_CAP);
    let s = scores(&board);
    assert!(s.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn write_failure_keeps_the_memory_table() {
    let mut board = ScoreBoard::load("/definitely/not/a/real/dir/scores.json".into());
    board.insert("ACE", 1234);
    assert!(board.persist().is_err());
    assert_eq!(board.entries()[0].score, 1234);
}

#[test]
fn in_memory_board_persists_as_a_no_op() {
    let mut board = ScoreBoard::in_memory();
    board.insert("AAA", 10);
    assert!(board.persist().is_ok());
}
