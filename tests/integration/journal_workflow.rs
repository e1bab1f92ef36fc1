/// End-to-end journal workflow tests over real storage
use energy_journal::*;
use tempfile::TempDir;

fn identified_journal(dir: &TempDir) -> EnergyJournal {
    let config = JournalConfig {
        user: Some(UserId(1)),
        database_path: Some(dir.path().join("energy.db")),
        data_dir: None,
    };
    EnergyJournal::open(config).expect("Failed to open journal")
}

fn draft_with_level(level: u8) -> EntryDraft {
    EntryDraft::new().level(EnergyLevel::new(level).unwrap())
}

#[test]
fn save_list_and_remove_round_trip() {
    let dir = TempDir::new().unwrap();
    let mut journal = identified_journal(&dir);

    let mut draft = draft_with_level(2);
    draft.toggle_factor("Poor sleep");
    draft.notes = "slow morning".to_string();
    let id = journal.save_entry(draft).expect("save failed");

    assert_eq!(journal.entries().len(), 1);
    assert_eq!(journal.entries()[0].id, id);
    assert_eq!(journal.entries()[0].notes, "slow morning");

    // Removing a missing ID is a no-op
    journal.remove_entry(&EntryId::new()).unwrap();
    assert_eq!(journal.entries().len(), 1);

    journal.remove_entry(&id).unwrap();
    assert!(journal.entries().is_empty());
}

#[test]
fn entries_survive_reopening_the_session() {
    let dir = TempDir::new().unwrap();
    {
        let mut journal = identified_journal(&dir);
        journal.save_entry(draft_with_level(4)).unwrap();
        journal.record_action("water").unwrap();
    }

    let journal = identified_journal(&dir);
    assert_eq!(journal.entries().len(), 1);
    assert_eq!(journal.entries()[0].level.get(), 4);
    assert_eq!(journal.actions().len(), 1);
    assert_eq!(journal.actions()[0].action_type, "Water");
}

#[test]
fn entry_without_level_is_rejected_before_storage() {
    let dir = TempDir::new().unwrap();
    let mut journal = identified_journal(&dir);

    let result = journal.save_entry(EntryDraft::new());
    assert!(matches!(
        result,
        Err(JournalError::Domain(DomainError::MissingLevel))
    ));
    assert!(journal.entries().is_empty());
}

#[test]
fn anonymous_session_uses_the_fallback_files() {
    let dir = TempDir::new().unwrap();
    let config = JournalConfig {
        user: None,
        database_path: None,
        data_dir: Some(dir.path().to_path_buf()),
    };

    {
        let mut journal = EnergyJournal::open(config).unwrap();
        journal.save_entry(draft_with_level(3)).unwrap();
        journal.record_action("walk").unwrap();
    }

    // Both collections were rewritten to disk and reload on the next session
    let reopened = EnergyJournal::open(JournalConfig {
        user: None,
        database_path: None,
        data_dir: Some(dir.path().to_path_buf()),
    })
    .unwrap();
    assert_eq!(reopened.entries().len(), 1);
    assert_eq!(reopened.actions().len(), 1);
    assert_eq!(reopened.actions()[0].action_type, "walk");
}

#[test]
fn derived_views_follow_the_session_state() {
    let dir = TempDir::new().unwrap();
    let mut journal = identified_journal(&dir);

    let mut low = draft_with_level(1);
    low.tobacco_urge = TobaccoUrge::Strong;
    low.water_ml = 500;
    journal.save_entry(low).unwrap();

    let mut ok = draft_with_level(4);
    ok.water_ml = 750;
    ok.meals = 2;
    journal.save_entry(ok).unwrap();

    let stats = journal.today_stats();
    assert_eq!(stats.entry_count, 2);
    assert_eq!(stats.water_ml_total, 1250);
    assert_eq!(stats.max_meals, 2);

    // One low-energy entry, and it has a strong urge
    assert_eq!(journal.urge_correlation(), 100);

    let series = journal.weekly_series();
    assert_eq!(series.len(), 7);
    assert_eq!(series[6].entry_count, 2);
    assert!(series[6].strong_urge);

    let (filename, csv) = journal.export_csv();
    assert!(filename.starts_with("energy-logs-"));
    assert!(filename.ends_with(".csv"));
    assert_eq!(csv.lines().count(), 3);
}

#[test]
fn board_completions_land_in_the_action_stream() {
    let dir = TempDir::new().unwrap();
    let mut journal = identified_journal(&dir);
    let mut board = ActionBoard::new();

    if let TapOutcome::Recorded(action) = board.tap("water") {
        journal.record_action(action).unwrap();
    }
    board.tap("breathing");
    for key in board.tick(BREATHING_SESSION_SECS) {
        journal.record_action(key).unwrap();
    }

    assert_eq!(journal.actions().len(), 2);
    // Most recent first, restored to display casing by the gateway
    assert_eq!(journal.actions()[0].action_type, "Breathing");
    assert_eq!(journal.actions()[1].action_type, "Water");
}
