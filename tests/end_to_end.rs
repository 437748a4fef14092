use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use hanzi_park::core::action::{Action, update};
use hanzi_park::core::board::{BoardState, MISTAKE_MESSAGE, SUCCESS_MESSAGE};
use hanzi_park::core::config::ResolvedConfig;
use hanzi_park::core::dictionary::{LocalDictionary, UNKNOWN_PINYIN};
use hanzi_park::core::engine::{EngineFactory, stroke_order};
use hanzi_park::core::notice::NoticeKind;
use hanzi_park::core::record::DisplayMode;
use hanzi_park::core::state::App;
use hanzi_park::core::stroke::Stroke;
use hanzi_park::tui::tasks::Scheduler;

// ============================================================================
// Helper Functions
// ============================================================================

struct Harness {
    app: App,
    scheduler: Scheduler,
    rx: Receiver<Action>,
}

impl Harness {
    fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let app = App::new(
            &ResolvedConfig::default(),
            Arc::new(LocalDictionary::new()),
            Arc::new(EngineFactory),
            tx.clone(),
        );
        Self {
            app,
            scheduler: Scheduler::new(tx),
            rx,
        }
    }

    fn dispatch(&mut self, action: Action) {
        let effect = update(&mut self.app, action);
        self.scheduler.run_effect(&self.app, effect);
        self.drain();
    }

    /// Apply everything background tasks and quiz listeners have sent.
    fn drain(&mut self) {
        while let Ok(action) = self.rx.try_recv() {
            let effect = update(&mut self.app, action);
            self.scheduler.run_effect(&self.app, effect);
        }
    }

    async fn wait(&mut self, duration: Duration) {
        tokio::time::sleep(duration).await;
        self.drain();
    }

    fn write(&mut self, digits: &str) {
        for stroke in Stroke::parse_sequence(digits).unwrap() {
            self.dispatch(Action::DrawStroke(stroke));
        }
    }

    fn pinyin(&self) -> Option<&str> {
        self.app.record.as_ref().map(|r| r.pinyin.as_str())
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_watch_practice_complete_revert() {
    let mut h = Harness::new();

    h.dispatch(Action::Search('爱'));
    assert!(h.app.selection.is_loading);
    h.wait(Duration::from_millis(500)).await;
    assert!(!h.app.selection.is_loading);
    assert_eq!(h.pinyin(), Some("ài"));

    h.dispatch(Action::Search('猫'));
    assert_eq!(h.app.selection.selected_character, '猫');
    assert_eq!(h.app.selection.mode, DisplayMode::Watch);
    assert_eq!(h.app.board.state(), BoardState::Watching);
    h.wait(Duration::from_millis(500)).await;
    assert_eq!(h.pinyin(), Some("māo"));

    h.dispatch(Action::SetMode(DisplayMode::Practice));
    assert_eq!(h.app.board.state(), BoardState::Practicing);

    // 猫 starts with a pie stroke, not heng
    h.write("1");
    assert_eq!(h.app.notices.latest().unwrap().message, MISTAKE_MESSAGE);
    assert_eq!(h.app.selection.mode, DisplayMode::Practice);

    h.write("35312225121");
    let notice = h.app.notices.latest().unwrap();
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.message, SUCCESS_MESSAGE);
    assert_eq!(h.app.selection.mode, DisplayMode::Practice);

    h.wait(Duration::from_millis(2400)).await;
    assert_eq!(h.app.selection.mode, DisplayMode::Practice);

    h.wait(Duration::from_millis(200)).await;
    assert_eq!(h.app.selection.mode, DisplayMode::Watch);
    assert_eq!(h.app.board.state(), BoardState::Watching);
}

#[tokio::test(start_paused = true)]
async fn test_quick_searches_keep_the_latest() {
    let mut h = Harness::new();

    h.dispatch(Action::Search('中'));
    h.wait(Duration::from_millis(100)).await;
    h.dispatch(Action::Search('文'));

    // The first search's loading timer would have fired at 300ms
    h.wait(Duration::from_millis(250)).await;
    assert!(h.app.selection.is_loading);
    assert!(h.app.record.is_none());

    h.wait(Duration::from_millis(200)).await;
    assert!(!h.app.selection.is_loading);
    assert_eq!(h.pinyin(), Some("wén"));
}

#[tokio::test(start_paused = true)]
async fn test_search_during_revert_delay_wins() {
    let mut h = Harness::new();
    h.dispatch(Action::Search('人'));
    h.wait(Duration::from_millis(500)).await;
    h.dispatch(Action::SetMode(DisplayMode::Practice));
    h.write("34");

    h.dispatch(Action::Search('大'));
    h.wait(Duration::from_millis(500)).await;
    h.dispatch(Action::SetMode(DisplayMode::Practice));

    h.wait(Duration::from_secs(3)).await;
    assert_eq!(h.app.selection.mode, DisplayMode::Practice);
    assert_eq!(h.app.board.state(), BoardState::Practicing);
}

#[tokio::test(start_paused = true)]
async fn test_character_outside_dictionary_can_still_be_practiced() {
    let mut h = Harness::new();

    h.dispatch(Action::Search('龙'));
    h.wait(Duration::from_millis(500)).await;
    assert_eq!(h.pinyin(), Some(UNKNOWN_PINYIN));

    h.dispatch(Action::SetMode(DisplayMode::Practice));
    let digits: String = stroke_order('龙').unwrap().iter().map(Stroke::digit).collect();
    h.write(&digits);

    let latest = h.app.notices.latest().unwrap();
    assert_eq!(latest.kind, NoticeKind::Success);
    assert_eq!(latest.message, SUCCESS_MESSAGE);

    h.wait(Duration::from_millis(2600)).await;
    assert_eq!(h.app.selection.mode, DisplayMode::Watch);
}
