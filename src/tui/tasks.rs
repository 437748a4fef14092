//! # Background Tasks
//!
//! Effects returned by `update()` that need time to pass: dictionary
//! lookups, the loading-flag timer, and the revert-to-watch timer. Each runs
//! as a tokio task that sends a single `Action` back over the channel.
//!
//! Superseded tasks are aborted. The actions they would have sent carry a
//! search generation or quiz session, so anything that slips through is
//! ignored by `update()` anyway.

use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect};
use crate::core::dictionary::CharacterRepository;
use crate::core::state::App;

/// Send `action` after `delay`.
pub fn spawn_delayed(delay: Duration, action: Action, tx: Sender<Action>) -> AbortHandle {
    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        debug!("Timer fired after {:?}: {:?}", delay, action);
        if tx.send(action).is_err() {
            warn!("Failed to send timer action: receiver dropped");
        }
    });
    handle.abort_handle()
}

/// Look up `character` and send the record back tagged with `generation`.
pub fn spawn_lookup(
    repository: Arc<dyn CharacterRepository>,
    character: char,
    generation: u64,
    tx: Sender<Action>,
) -> AbortHandle {
    let handle = tokio::spawn(async move {
        let record = repository.lookup(character).await;
        debug!("{} resolved {} -> {}", repository.name(), character, record.pinyin);
        if tx.send(Action::RecordLoaded { generation, record }).is_err() {
            warn!("Failed to send record for {}: receiver dropped", character);
        }
    });
    handle.abort_handle()
}

/// Owns the abort handles of in-flight tasks.
pub struct Scheduler {
    tx: Sender<Action>,
    search: Vec<AbortHandle>,
    revert: Option<AbortHandle>,
}

impl Scheduler {
    pub fn new(tx: Sender<Action>) -> Self {
        Self {
            tx,
            search: Vec::new(),
            revert: None,
        }
    }

    /// Carry out an effect. Returns true when the app should quit.
    pub fn run_effect(&mut self, app: &App, effect: Effect) -> bool {
        match effect {
            Effect::None => false,
            Effect::Quit => true,
            Effect::Search { character, generation } => {
                info!("Spawning lookup for {} (search {})", character, generation);
                self.abort_search();
                self.abort_revert();
                self.search = vec![
                    spawn_lookup(app.repository.clone(), character, generation, self.tx.clone()),
                    spawn_delayed(
                        app.loading_delay,
                        Action::LoadingElapsed { generation },
                        self.tx.clone(),
                    ),
                ];
                false
            }
            Effect::ScheduleRevert { session, delay } => {
                self.abort_revert();
                self.revert = Some(spawn_delayed(delay, Action::RevertToWatch { session }, self.tx.clone()));
                false
            }
        }
    }

    fn abort_search(&mut self) {
        for handle in self.search.drain(..) {
            handle.abort();
        }
    }

    fn abort_revert(&mut self) {
        if let Some(handle) = self.revert.take() {
            handle.abort();
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.abort_search();
        self.abort_revert();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dictionary::LocalDictionary;
    use crate::test_support::test_app;
    use std::sync::mpsc;

    fn drain(rx: &mpsc::Receiver<Action>) -> Vec<Action> {
        rx.try_iter().collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_revert_fires_after_delay() {
        let (tx, rx) = mpsc::channel();
        spawn_delayed(Duration::from_millis(2500), Action::RevertToWatch { session: 1 }, tx);

        tokio::time::sleep(Duration::from_millis(2499)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.try_recv().unwrap(), Action::RevertToWatch { session: 1 });
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookup_sends_tagged_record() {
        let (tx, rx) = mpsc::channel();
        let dict = Arc::new(LocalDictionary::new());
        spawn_lookup(dict, '猫', 7, tx);

        tokio::time::sleep(Duration::from_millis(401)).await;
        match rx.try_recv().unwrap() {
            Action::RecordLoaded { generation, record } => {
                assert_eq!(generation, 7);
                assert_eq!(record.pinyin, "māo");
            }
            other => panic!("expected RecordLoaded, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_aborted_timer_never_fires() {
        let (tx, rx) = mpsc::channel();
        let handle = spawn_delayed(Duration::from_millis(300), Action::LoadingElapsed { generation: 1 }, tx);
        handle.abort();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_search_aborts_previous_tasks() {
        let (app, _app_rx, _log) = test_app();
        let (tx, rx) = mpsc::channel();
        let mut scheduler = Scheduler::new(tx);

        scheduler.run_effect(&app, Effect::Search { character: '中', generation: 1 });
        scheduler.run_effect(&app, Effect::Search { character: '文', generation: 2 });

        tokio::time::sleep(Duration::from_millis(500)).await;
        let actions = drain(&rx);
        assert_eq!(actions.len(), 2);
        assert!(actions.iter().all(|a| matches!(
            a,
            Action::LoadingElapsed { generation: 2 } | Action::RecordLoaded { generation: 2, .. }
        )));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rescheduled_revert_replaces_pending_one() {
        let (app, _app_rx, _log) = test_app();
        let (tx, rx) = mpsc::channel();
        let mut scheduler = Scheduler::new(tx);

        let delay = Duration::from_millis(2500);
        scheduler.run_effect(&app, Effect::ScheduleRevert { session: 1, delay });
        scheduler.run_effect(&app, Effect::ScheduleRevert { session: 2, delay });

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(drain(&rx), vec![Action::RevertToWatch { session: 2 }]);
    }

    #[test]
    fn test_quit_effect() {
        let (app, _app_rx, _log) = test_app();
        let (tx, _rx) = mpsc::channel();
        let mut scheduler = Scheduler::new(tx);
        assert!(scheduler.run_effect(&app, Effect::Quit));
        assert!(!scheduler.run_effect(&app, Effect::None));
    }
}
