//! Character list application state and logic

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, widgets::ListState, Frame, Terminal};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::{ApiError, CharacterSource};
use crate::view::events::FetchEvent;
use crate::view::state::ViewState;
use crate::view::ui;

/// How long the loop waits for input before checking on the fetch again
const TICK_RATE: Duration = Duration::from_millis(100);

/// The character list view
pub struct App {
    pub state: ViewState,
    pub list_state: ListState,
    pub should_quit: bool,

    source: Arc<dyn CharacterSource>,
    mounted: bool,
    fetch_task: Option<JoinHandle<()>>,
    fetch_rx: Option<mpsc::UnboundedReceiver<FetchEvent>>,
}

impl App {
    pub fn new(source: Arc<dyn CharacterSource>) -> Self {
        Self {
            state: ViewState::Loading,
            list_state: ListState::default(),
            should_quit: false,
            source,
            mounted: false,
            fetch_task: None,
            fetch_rx: None,
        }
    }

    /// Start the one fetch cycle this view performs. Later calls do nothing.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn mount(&mut self) {
        if self.mounted {
            debug!("View already mounted, not fetching again");
            return;
        }
        self.mounted = true;
        self.state = ViewState::Loading;

        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        let source = Arc::clone(&self.source);
        self.fetch_rx = Some(fetch_rx);
        self.fetch_task = Some(tokio::spawn(async move {
            let event = FetchEvent::from(source.fetch_characters().await);
            // The view may be gone by now; nobody is left to update
            let _ = fetch_tx.send(event);
        }));
        info!("Fetching characters");
    }

    /// Apply the fetch outcome if it has arrived, without waiting
    pub fn poll(&mut self) {
        let Some(rx) = self.fetch_rx.as_mut() else {
            return;
        };
        match rx.try_recv() {
            Ok(event) => self.settle(event),
            Err(mpsc::error::TryRecvError::Empty) => {}
            Err(mpsc::error::TryRecvError::Disconnected) => self.abandon_fetch(),
        }
    }

    /// Wait until the fetch has settled and apply its outcome
    pub async fn wait_for_fetch(&mut self) {
        let Some(rx) = self.fetch_rx.as_mut() else {
            return;
        };
        match rx.recv().await {
            Some(event) => self.settle(event),
            None => self.abandon_fetch(),
        }
    }

    fn settle(&mut self, event: FetchEvent) {
        match &event {
            FetchEvent::CharactersLoaded(characters) => {
                info!("Loaded {} characters", characters.len());
            }
            FetchEvent::CharactersFailed(e) => {
                warn!("Failed to load characters: {}", e);
            }
        }

        self.state = ViewState::settle(event);
        self.fetch_rx = None;
        self.fetch_task = None;

        if self.state.characters().is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(0));
        }
    }

    /// The fetch task ended without reporting, e.g. it panicked
    fn abandon_fetch(&mut self) {
        warn!("Character fetch ended without a result");
        self.state = ViewState::settle(FetchEvent::CharactersFailed(ApiError::Interrupted));
        self.fetch_rx = None;
        self.fetch_task = None;
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.mount();

        loop {
            self.poll();

            terminal.draw(|f| self.draw(f))?;

            if event::poll(TICK_RATE)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        ui::draw(f, &self.state, &mut self.list_state);
    }

    /// Handle keyboard input events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::Home => self.first(),
            KeyCode::End => self.last(),
            _ => {}
        }
    }

    fn next(&mut self) {
        let count = self.state.characters().len();
        if count == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn previous(&mut self) {
        let count = self.state.characters().len();
        if count == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    count - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn first(&mut self) {
        if !self.state.characters().is_empty() {
            self.list_state.select(Some(0));
        }
    }

    fn last(&mut self) {
        let count = self.state.characters().len();
        if count > 0 {
            self.list_state.select(Some(count - 1));
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(task) = self.fetch_task.take() {
            debug!("View dropped before the fetch settled, aborting it");
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Character;
    use crate::view::state::FETCH_ERROR_MESSAGE;
    use async_trait::async_trait;
    use crossterm::event::KeyModifiers;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    enum Outcome {
        Items(Vec<Character>),
        Fails,
    }

    struct FakeSource {
        outcome: Outcome,
        delay: Duration,
        calls: AtomicUsize,
        finished: AtomicBool,
    }

    impl FakeSource {
        fn new(outcome: Outcome) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
                finished: AtomicBool::new(false),
            })
        }

        fn slow(outcome: Outcome, delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                delay,
                calls: AtomicUsize::new(0),
                finished: AtomicBool::new(false),
            })
        }
    }

    #[async_trait]
    impl CharacterSource for FakeSource {
        async fn fetch_characters(&self) -> Result<Vec<Character>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.finished.store(true, Ordering::SeqCst);
            match &self.outcome {
                Outcome::Items(items) => Ok(items.clone()),
                Outcome::Fails => Err(ApiError::Status { status_code: 500 }),
            }
        }
    }

    fn character(id: i64, name: &str) -> Character {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "gender": "MALE",
            "status": "ALIVE",
        }))
        .unwrap()
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_successful_fetch_keeps_api_order() {
        let items = vec![character(2, "Philip Fry"), character(1, "Turanga Leela")];
        let mut app = App::new(FakeSource::new(Outcome::Items(items.clone())));

        assert!(app.state.is_loading());
        app.mount();
        app.wait_for_fetch().await;

        assert!(!app.state.is_loading());
        assert_eq!(app.state.error(), None);
        assert_eq!(app.state.characters(), items.as_slice());
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[tokio::test]
    async fn test_failed_fetch_shows_fixed_message() {
        let mut app = App::new(FakeSource::new(Outcome::Fails));
        app.mount();
        app.wait_for_fetch().await;

        assert!(!app.state.is_loading());
        assert_eq!(app.state.error(), Some(FETCH_ERROR_MESSAGE));
        assert!(app.state.characters().is_empty());
        assert_eq!(app.list_state.selected(), None);
    }

    #[tokio::test]
    async fn test_empty_fetch_is_not_an_error() {
        let mut app = App::new(FakeSource::new(Outcome::Items(Vec::new())));
        app.mount();
        app.wait_for_fetch().await;

        assert_eq!(app.state, ViewState::Loaded(Vec::new()));
        assert_eq!(app.state.error(), None);
    }

    #[tokio::test]
    async fn test_mount_fetches_once() {
        let source = FakeSource::new(Outcome::Items(vec![character(1, "Bender")]));
        let mut app = App::new(source.clone());

        app.mount();
        app.mount();
        app.wait_for_fetch().await;
        app.mount();
        tokio::task::yield_now().await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(app.state.characters().len(), 1);
    }

    #[tokio::test]
    async fn test_poll_before_and_after_settling() {
        let source = FakeSource::slow(
            Outcome::Items(vec![character(1, "Bender")]),
            Duration::from_millis(50),
        );
        let mut app = App::new(source);
        app.poll();
        assert!(app.state.is_loading());

        app.mount();
        app.poll();
        assert!(app.state.is_loading());

        tokio::time::sleep(Duration::from_millis(200)).await;
        app.poll();
        assert_eq!(app.state.characters().len(), 1);
    }

    #[tokio::test]
    async fn test_dropping_view_aborts_fetch() {
        let source = FakeSource::slow(Outcome::Fails, Duration::from_millis(50));
        let mut app = App::new(source.clone());
        app.mount();
        tokio::task::yield_now().await;
        drop(app);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!source.finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_navigation_wraps() {
        let items = vec![character(1, "Fry"), character(2, "Leela"), character(3, "Bender")];
        let mut app = App::new(FakeSource::new(Outcome::Items(items)));
        app.mount();
        app.wait_for_fetch().await;

        app.handle_key_event(press(KeyCode::Up));
        assert_eq!(app.list_state.selected(), Some(2));
        app.handle_key_event(press(KeyCode::Char('j')));
        assert_eq!(app.list_state.selected(), Some(0));
        app.handle_key_event(press(KeyCode::End));
        assert_eq!(app.list_state.selected(), Some(2));
        app.handle_key_event(press(KeyCode::Home));
        assert_eq!(app.list_state.selected(), Some(0));
        assert!(!app.should_quit);

        app.handle_key_event(press(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_navigation_ignored_without_characters() {
        let mut app = App::new(FakeSource::new(Outcome::Fails));
        app.handle_key_event(press(KeyCode::Down));
        app.handle_key_event(press(KeyCode::End));
        assert_eq!(app.list_state.selected(), None);

        app.handle_key_event(press(KeyCode::Esc));
        assert!(app.should_quit);
    }
}
