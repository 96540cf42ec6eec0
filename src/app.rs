use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::action::Action;
use crate::browser::ResultBrowser;
use crate::client::SearchClient;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::event::{Event, Key};
use crate::layout::{LayoutManager, Panel};
use crate::query::QueryBuffer;
use crate::request::{self, SearchRequest};
use crate::types::{ResultItem, ResultSet, SearchKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Help,
    KindPicker,
    QueryEditor,
    ResultsBrowser,
}

/// One-line message in the status bar, cleared by the next key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// Where a search was started from, which decides where a failure lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchOrigin {
    Editor,
    Paging,
}

#[derive(Debug)]
struct PendingSearch {
    request_id: u64,
    request: SearchRequest,
    origin: SearchOrigin,
    cancel: CancellationToken,
}

pub struct App {
    pub mode: Mode,
    pub query: QueryBuffer,
    pub kind: Option<SearchKind>,
    pub browser: Option<ResultBrowser>,
    pub layout: LayoutManager,
    pub status: Option<Status>,
    pub detail_scroll: u16,
    pub spinner: usize,
    pub should_quit: bool,
    pending: Option<PendingSearch>,
    last_request_id: u64,
    settings: SearchConfig,
    client: Arc<dyn SearchClient>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl App {
    pub fn new(
        client: Arc<dyn SearchClient>,
        action_tx: mpsc::UnboundedSender<Action>,
        settings: SearchConfig,
    ) -> Self {
        Self {
            mode: Mode::Idle,
            query: QueryBuffer::new(),
            kind: None,
            browser: None,
            layout: LayoutManager::default(),
            status: None,
            detail_scroll: 0,
            spinner: 0,
            should_quit: false,
            pending: None,
            last_request_id: 0,
            settings,
            client,
            action_tx,
        }
    }

    /// The request currently in flight, if any
    pub fn searching(&self) -> Option<&SearchRequest> {
        self.pending.as_ref().map(|p| &p.request)
    }

    pub fn client_name(&self) -> &str {
        self.client.name()
    }

    /// Maps an event to an action. Any key press dismisses the status line,
    /// whether or not the current mode binds it.
    pub fn handle_event(&mut self, event: Event) -> Action {
        match event {
            Event::Key(key) => {
                self.status = None;
                self.handle_key(key)
            }
            Event::Resize(width, height) => Action::Resize(width, height),
            Event::Tick => Action::Tick,
            Event::Render => Action::None,
        }
    }

    fn handle_key(&self, key: Key) -> Action {
        match self.mode {
            Mode::Idle => match key {
                Key::Char('?') => Action::ShowHelp,
                Key::Char('s') => Action::OpenKindPicker,
                Key::Char('q') => Action::Quit,
                _ => Action::None,
            },
            Mode::Help => Action::CloseHelp,
            Mode::KindPicker => match key {
                Key::Char(c) => SearchKind::from_key(c)
                    .map(Action::PickKind)
                    .unwrap_or(Action::CancelPicker),
                _ => Action::CancelPicker,
            },
            Mode::QueryEditor if self.pending.is_some() => match key {
                Key::Esc => Action::CancelSearch,
                _ => Action::None,
            },
            Mode::QueryEditor => match key {
                Key::Enter => Action::SubmitQuery,
                Key::Backspace => Action::QueryBackspace,
                Key::Esc => Action::CancelQuery,
                Key::Char(c) if !c.is_control() => Action::QueryInput(c),
                _ => Action::None,
            },
            Mode::ResultsBrowser if self.layout.is_open(Panel::Detail) => match key {
                Key::Char('j') | Key::Down => Action::DetailScrollDown,
                Key::Char('k') | Key::Up => Action::DetailScrollUp,
                Key::Char('q') | Key::Esc | Key::Enter => Action::CloseDetail,
                _ => Action::None,
            },
            Mode::ResultsBrowser => match key {
                Key::Char('j') | Key::Down => Action::ScrollDown,
                Key::Char('k') | Key::Up => Action::ScrollUp,
                Key::Char('g') => Action::GoToTop,
                Key::Char('G') => Action::GoToBottom,
                Key::Char('n') => Action::NextPage,
                Key::Char('p') => Action::PrevPage,
                Key::Enter => Action::ShowDetail,
                Key::Char('o') => Action::OpenInBrowser,
                Key::Char('O') => Action::OpenSearchInBrowser,
                Key::Char('y') => Action::YankUrl,
                Key::Esc if self.pending.is_some() => Action::CancelSearch,
                Key::Char('q') | Key::Esc => Action::Back,
                _ => Action::None,
            },
        }
    }

    pub fn update(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Back => {
                self.cancel_pending();
                self.browser = None;
                self.layout.close_all();
                self.mode = Mode::Idle;
            }
            Action::Tick => {
                if self.pending.is_some() {
                    self.spinner = self.spinner.wrapping_add(1);
                }
            }
            Action::Resize(width, height) => {
                self.layout.resize(width, height);
                let rows = self.layout.visible_rows();
                if let Some(browser) = self.browser.as_mut() {
                    browser.fit(rows);
                }
            }

            Action::ShowHelp => {
                self.layout.open(Panel::Help);
                self.mode = Mode::Help;
            }
            Action::CloseHelp => {
                self.layout.close(Panel::Help);
                self.mode = Mode::Idle;
            }

            Action::OpenKindPicker => {
                self.layout.open(Panel::KindPicker);
                self.mode = Mode::KindPicker;
            }
            Action::PickKind(kind) => {
                self.layout.close(Panel::KindPicker);
                self.kind = Some(kind);
                self.query.clear();
                self.layout.open(Panel::QueryEditor);
                self.mode = Mode::QueryEditor;
            }
            Action::CancelPicker => {
                self.layout.close(Panel::KindPicker);
                self.kind = None;
                self.mode = Mode::Idle;
            }

            Action::QueryInput(c) => {
                if self.mode == Mode::QueryEditor {
                    self.query.append(c);
                }
            }
            Action::QueryBackspace => {
                if self.mode == Mode::QueryEditor {
                    self.query.backspace();
                }
            }
            Action::SubmitQuery => self.submit_query(),
            Action::CancelQuery => self.leave_editor(),

            Action::CancelSearch => {
                if let Some(pending) = self.cancel_pending() {
                    tracing::debug!(request_id = pending.request_id, "search cancelled");
                    if pending.origin == SearchOrigin::Editor {
                        self.leave_editor();
                    }
                    self.status = Some(Status::Info("Search cancelled".to_string()));
                }
            }
            Action::SearchFinished {
                request_id,
                outcome,
            } => self.finish_search(request_id, outcome),

            Action::ScrollDown => {
                let rows = self.layout.visible_rows();
                if let Some(browser) = self.browser.as_mut() {
                    browser.move_down(rows);
                }
            }
            Action::ScrollUp => {
                let rows = self.layout.visible_rows();
                if let Some(browser) = self.browser.as_mut() {
                    browser.move_up(rows);
                }
            }
            Action::GoToTop => {
                let rows = self.layout.visible_rows();
                if let Some(browser) = self.browser.as_mut() {
                    browser.go_to_top(rows);
                }
            }
            Action::GoToBottom => {
                let rows = self.layout.visible_rows();
                if let Some(browser) = self.browser.as_mut() {
                    browser.go_to_bottom(rows);
                }
            }
            Action::NextPage => self.turn_page(true),
            Action::PrevPage => self.turn_page(false),

            Action::ShowDetail => {
                if self.selected_item().is_some() {
                    self.detail_scroll = 0;
                    self.layout.open(Panel::Detail);
                }
            }
            Action::CloseDetail => {
                self.layout.close(Panel::Detail);
            }
            Action::DetailScrollDown => {
                let max = self
                    .detail_text()
                    .map(|text| text.lines().count().saturating_sub(1))
                    .unwrap_or(0);
                if usize::from(self.detail_scroll) < max {
                    self.detail_scroll += 1;
                }
            }
            Action::DetailScrollUp => {
                self.detail_scroll = self.detail_scroll.saturating_sub(1);
            }
            Action::OpenInBrowser => {
                if let Some(url) = self.selected_url() {
                    self.open_url(url);
                }
            }
            Action::OpenSearchInBrowser => {
                if let Some(browser) = &self.browser {
                    let url = self.client.web_url(browser.request());
                    self.open_url(url);
                }
            }
            Action::YankUrl => {
                if let Some(url) = self.selected_url() {
                    self.status = Some(match copy_to_clipboard(&url) {
                        Ok(()) => Status::Info(format!("Copied {}", url)),
                        Err(e) => Status::Error(format!("Clipboard: {}", e)),
                    });
                }
            }
            Action::None => {}
        }
    }

    pub fn selected_item(&self) -> Option<&ResultItem> {
        self.browser.as_ref().and_then(ResultBrowser::selected_item)
    }

    /// Pretty-printed raw record of the selection
    pub fn detail_text(&self) -> Option<String> {
        let item = self.selected_item()?;
        serde_json::to_string_pretty(&item.raw).ok()
    }

    fn selected_url(&self) -> Option<String> {
        self.selected_item()
            .and_then(ResultItem::url)
            .map(str::to_string)
    }

    fn open_url(&mut self, url: String) {
        self.status = Some(match open::that_detached(&url) {
            Ok(()) => Status::Info(format!("Opened {}", url)),
            Err(e) => Status::Error(format!("Could not open {}: {}", url, e)),
        });
    }

    fn leave_editor(&mut self) {
        self.query.clear();
        self.kind = None;
        self.layout.close(Panel::QueryEditor);
        self.mode = Mode::Idle;
    }

    fn submit_query(&mut self) {
        if self.mode != Mode::QueryEditor {
            return;
        }
        let Some(kind) = self.kind else {
            self.leave_editor();
            return;
        };
        // An empty submission is a cancel
        if self.query.is_empty() {
            self.leave_editor();
            return;
        }

        match request::build(kind, self.query.text(), self.settings.request_options(kind)) {
            Ok(request) => {
                self.query.clear();
                self.spawn_search(request, SearchOrigin::Editor);
            }
            Err(e) => {
                self.leave_editor();
                self.status = Some(Status::Error(e.to_string()));
            }
        }
    }

    fn turn_page(&mut self, forward: bool) {
        if self.pending.is_some() {
            return;
        }
        let Some(browser) = &self.browser else {
            return;
        };
        let current = browser.request();
        let page = current.page();
        let target = if forward {
            if page >= current.last_page(browser.results().total_count) {
                return;
            }
            page + 1
        } else {
            if page <= 1 {
                return;
            }
            page - 1
        };

        let request = current.with_page(target);
        self.spawn_search(request, SearchOrigin::Paging);
    }

    fn cancel_pending(&mut self) -> Option<PendingSearch> {
        let pending = self.pending.take()?;
        pending.cancel.cancel();
        Some(pending)
    }

    fn finish_search(&mut self, request_id: u64, outcome: Result<ResultSet, SearchError>) {
        let Some(pending) = self.pending.take() else {
            tracing::debug!(request_id, "dropping result with no search in flight");
            return;
        };
        if pending.request_id != request_id {
            tracing::debug!(
                request_id,
                pending = pending.request_id,
                "dropping stale search result"
            );
            self.pending = Some(pending);
            return;
        }

        match outcome {
            Ok(results) => {
                tracing::debug!(
                    request_id,
                    items = results.len(),
                    total = results.total_count,
                    "search finished"
                );
                if results.is_empty() {
                    self.status = Some(Status::Info("No results".to_string()));
                }
                self.browser = Some(ResultBrowser::new(results, pending.request));
                self.layout.close(Panel::QueryEditor);
                self.layout.close(Panel::Detail);
                self.detail_scroll = 0;
                self.kind = None;
                self.mode = Mode::ResultsBrowser;
            }
            Err(e) => {
                tracing::warn!(request_id, error = %e, "search failed");
                if pending.origin == SearchOrigin::Editor {
                    self.leave_editor();
                    self.browser = None;
                    self.layout.close_all();
                }
                self.status = Some(Status::Error(e.to_string()));
            }
        }
    }

    /// Run the search on a task; the outcome comes back as
    /// `Action::SearchFinished`. Any earlier search is cancelled first.
    fn spawn_search(&mut self, request: SearchRequest, origin: SearchOrigin) {
        self.cancel_pending();

        self.last_request_id += 1;
        let request_id = self.last_request_id;
        let cancel = CancellationToken::new();

        let task_cancel = cancel.clone();
        let tx = self.action_tx.clone();
        let client = Arc::clone(&self.client);
        let timeout = self.settings.timeout();
        let task_request = request.clone();

        tracing::debug!(
            request_id,
            kind = %request.kind(),
            page = request.page(),
            "starting search"
        );
        tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = task_cancel.cancelled() => return,
                result = tokio::time::timeout(timeout, client.search(&task_request)) => match result {
                    Ok(outcome) => outcome,
                    Err(_) => Err(SearchError::Client(format!(
                        "timed out after {}s",
                        timeout.as_secs()
                    ))),
                },
            };
            tx.send(Action::SearchFinished {
                request_id,
                outcome,
            })
            .ok();
        });

        self.spinner = 0;
        self.pending = Some(PendingSearch {
            request_id,
            request,
            origin,
            cancel,
        });
    }
}

fn copy_to_clipboard(text: &str) -> Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{item, press, type_str, MockClient, Reply};
    use tokio::time::{timeout, Duration};

    fn new_app(reply: Reply) -> (App, Arc<MockClient>, mpsc::UnboundedReceiver<Action>) {
        new_app_with(reply, SearchConfig::default())
    }

    fn new_app_with(
        reply: Reply,
        settings: SearchConfig,
    ) -> (App, Arc<MockClient>, mpsc::UnboundedReceiver<Action>) {
        let client = Arc::new(MockClient::new(reply));
        let (tx, rx) = mpsc::unbounded_channel();
        let mut app = App::new(client.clone(), tx, settings);
        app.update(Action::Resize(80, 24));
        (app, client, rx)
    }

    async fn settle(app: &mut App, rx: &mut mpsc::UnboundedReceiver<Action>) {
        let action = timeout(Duration::from_millis(500), rx.recv())
            .await
            .expect("search did not finish")
            .expect("action channel closed");
        app.update(action);
    }

    fn two_items() -> Reply {
        Reply::Items(vec![item("alpha/one"), item("beta/two")], 2)
    }

    #[test]
    fn starts_idle() {
        let (app, _, _) = new_app(Reply::Hang);
        assert_eq!(app.mode, Mode::Idle);
        assert!(app.browser.is_none());
        assert!(app.query.is_empty());
    }

    #[test]
    fn help_opens_and_any_key_closes() {
        let (mut app, _, _) = new_app(Reply::Hang);
        press(&mut app, Key::Char('?'));
        assert_eq!(app.mode, Mode::Help);
        assert!(app.layout.is_open(Panel::Help));

        press(&mut app, Key::Char('x'));
        assert_eq!(app.mode, Mode::Idle);
        assert!(!app.layout.is_open(Panel::Help));
    }

    #[test]
    fn q_in_idle_quits() {
        let (mut app, _, _) = new_app(Reply::Hang);
        press(&mut app, Key::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn picker_maps_each_kind_key() {
        for kind in SearchKind::ALL {
            let (mut app, _, _) = new_app(Reply::Hang);
            press(&mut app, Key::Char('s'));
            assert_eq!(app.mode, Mode::KindPicker);
            assert!(app.layout.is_open(Panel::KindPicker));

            press(&mut app, Key::Char(kind.key()));
            assert_eq!(app.mode, Mode::QueryEditor);
            assert_eq!(app.kind, Some(kind));
            assert!(!app.layout.is_open(Panel::KindPicker));
            assert!(app.layout.is_open(Panel::QueryEditor));
        }
    }

    #[test]
    fn unmapped_picker_key_cancels() {
        let (mut app, _, _) = new_app(Reply::Hang);
        press(&mut app, Key::Char('s'));
        press(&mut app, Key::Char('z'));
        assert_eq!(app.mode, Mode::Idle);
        assert_eq!(app.kind, None);
        assert!(app.query.is_empty());
        assert!(app.layout.panels().is_empty());
    }

    #[test]
    fn editor_appends_and_deletes() {
        let (mut app, _, _) = new_app(Reply::Hang);
        press(&mut app, Key::Char('s'));
        press(&mut app, Key::Char('c'));
        type_str(&mut app, "fooo");
        press(&mut app, Key::Backspace);
        assert_eq!(app.query.text(), "foo");

        press(&mut app, Key::Ctrl('a'));
        press(&mut app, Key::Other);
        assert_eq!(app.query.text(), "foo");
    }

    #[test]
    fn editor_keys_are_plain_text() {
        let (mut app, _, _) = new_app(Reply::Hang);
        press(&mut app, Key::Char('s'));
        press(&mut app, Key::Char('i'));
        type_str(&mut app, "q?sjk");
        assert_eq!(app.mode, Mode::QueryEditor);
        assert_eq!(app.query.text(), "q?sjk");
        assert!(!app.should_quit);
    }

    #[test]
    fn empty_submit_cancels_without_search() {
        let (mut app, client, _) = new_app(two_items());
        press(&mut app, Key::Char('s'));
        press(&mut app, Key::Char('r'));
        press(&mut app, Key::Enter);
        assert_eq!(app.mode, Mode::Idle);
        assert!(app.searching().is_none());
        assert!(client.calls().is_empty());
    }

    #[test]
    fn esc_leaves_editor_and_clears_buffer() {
        let (mut app, _, _) = new_app(Reply::Hang);
        press(&mut app, Key::Char('s'));
        press(&mut app, Key::Char('u'));
        type_str(&mut app, "octo");
        press(&mut app, Key::Esc);
        assert_eq!(app.mode, Mode::Idle);
        assert!(app.query.is_empty());
        assert!(!app.layout.is_open(Panel::QueryEditor));
    }

    #[test]
    fn any_key_dismisses_status_but_resize_does_not() {
        let (mut app, _, _) = new_app(Reply::Hang);
        app.status = Some(Status::Error("boom".to_string()));

        let action = app.handle_event(Event::Resize(100, 30));
        app.update(action);
        let action = app.handle_event(Event::Tick);
        app.update(action);
        assert!(app.status.is_some());

        // Unbound in Idle
        let action = app.handle_event(Event::Key(Key::Char('x')));
        assert_eq!(action, Action::None);
        assert!(app.status.is_none());
        assert_eq!(app.mode, Mode::Idle);
    }

    #[test]
    fn resize_in_editor_keeps_text_and_mode() {
        let (mut app, _, _) = new_app(Reply::Hang);
        press(&mut app, Key::Char('s'));
        press(&mut app, Key::Char('r'));
        type_str(&mut app, "foo");

        let action = app.handle_event(Event::Resize(120, 40));
        app.update(action);
        assert_eq!(app.mode, Mode::QueryEditor);
        assert_eq!(app.query.text(), "foo");
        assert!(app.layout.is_open(Panel::QueryEditor));
        assert_eq!(app.layout.visible_rows(), 37);
    }

    #[tokio::test]
    async fn successful_search_enters_browser() {
        let (mut app, client, mut rx) = new_app(two_items());
        press(&mut app, Key::Char('s'));
        press(&mut app, Key::Char('r'));
        type_str(&mut app, "foo");
        press(&mut app, Key::Enter);

        assert_eq!(app.mode, Mode::QueryEditor);
        assert_eq!(app.searching().map(SearchRequest::query), Some("foo"));
        assert!(app.query.is_empty());

        settle(&mut app, &mut rx).await;

        assert_eq!(app.mode, Mode::ResultsBrowser);
        assert!(app.searching().is_none());
        let browser = app.browser.as_ref().unwrap();
        assert_eq!(browser.selected(), 0);
        assert_eq!(browser.viewport_top(), 0);
        assert_eq!(browser.results().len(), 2);
        assert!(app.layout.panels().is_empty());

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].kind(), SearchKind::Repositories);
        assert_eq!(calls[0].query(), "foo");
        assert_eq!(calls[0].page(), 1);
    }

    #[tokio::test]
    async fn failed_search_returns_to_idle_with_status() {
        let (mut app, _, mut rx) = new_app(Reply::Fail("502 Bad Gateway".to_string()));
        press(&mut app, Key::Char('s'));
        press(&mut app, Key::Char('r'));
        type_str(&mut app, "foo");
        press(&mut app, Key::Enter);
        settle(&mut app, &mut rx).await;

        assert_eq!(app.mode, Mode::Idle);
        assert!(app.browser.is_none());
        assert!(app.layout.panels().is_empty());
        match &app.status {
            Some(Status::Error(msg)) => assert!(msg.contains("502 Bad Gateway")),
            other => panic!("expected error status, got {other:?}"),
        }

        // Next key clears it
        press(&mut app, Key::Char('x'));
        assert!(app.status.is_none());
    }

    #[tokio::test]
    async fn slow_search_times_out() {
        let settings = SearchConfig {
            timeout_secs: 1,
            ..SearchConfig::default()
        };
        let (mut app, _, mut rx) = new_app_with(Reply::Hang, settings);
        press(&mut app, Key::Char('s'));
        press(&mut app, Key::Char('c'));
        type_str(&mut app, "fn main");
        press(&mut app, Key::Enter);

        let action = timeout(Duration::from_secs(3), rx.recv())
            .await
            .expect("timeout never fired")
            .expect("action channel closed");
        app.update(action);

        assert_eq!(app.mode, Mode::Idle);
        assert!(matches!(&app.status, Some(Status::Error(msg)) if msg.contains("timed out")));
    }

    #[tokio::test]
    async fn esc_cancels_search_in_flight() {
        let (mut app, _, mut rx) = new_app(Reply::Hang);
        press(&mut app, Key::Char('s'));
        press(&mut app, Key::Char('r'));
        type_str(&mut app, "foo");
        press(&mut app, Key::Enter);
        assert!(app.searching().is_some());

        // Typing is ignored while the search runs
        press(&mut app, Key::Char('x'));
        assert!(app.query.is_empty());

        press(&mut app, Key::Esc);
        assert_eq!(app.mode, Mode::Idle);
        assert!(app.searching().is_none());
        assert_eq!(app.status, Some(Status::Info("Search cancelled".to_string())));

        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn stale_result_is_ignored() {
        let (mut app, _, _rx) = new_app(Reply::Hang);
        press(&mut app, Key::Char('s'));
        press(&mut app, Key::Char('r'));
        type_str(&mut app, "foo");
        press(&mut app, Key::Enter);

        app.update(Action::SearchFinished {
            request_id: 999,
            outcome: Ok(ResultSet {
                items: vec![item("stale")],
                total_count: 1,
                page: 1,
            }),
        });

        assert_eq!(app.mode, Mode::QueryEditor);
        assert!(app.browser.is_none());
        assert!(app.searching().is_some());
    }

    #[tokio::test]
    async fn browser_navigation_clamps() {
        let (mut app, _, mut rx) = new_app(Reply::Items(
            vec![item("a"), item("b"), item("c")],
            3,
        ));
        press(&mut app, Key::Char('s'));
        press(&mut app, Key::Char('u'));
        type_str(&mut app, "x");
        press(&mut app, Key::Enter);
        settle(&mut app, &mut rx).await;

        for _ in 0..2 {
            press(&mut app, Key::Char('j'));
        }
        assert_eq!(app.browser.as_ref().unwrap().selected(), 2);
        press(&mut app, Key::Char('j'));
        assert_eq!(app.browser.as_ref().unwrap().selected(), 2);

        press(&mut app, Key::Char('g'));
        press(&mut app, Key::Char('k'));
        assert_eq!(app.browser.as_ref().unwrap().selected(), 0);

        press(&mut app, Key::Char('G'));
        assert_eq!(app.selected_item().unwrap().display_name, "c");
    }

    #[tokio::test]
    async fn back_discards_results() {
        let (mut app, _, mut rx) = new_app(two_items());
        press(&mut app, Key::Char('s'));
        press(&mut app, Key::Char('r'));
        type_str(&mut app, "foo");
        press(&mut app, Key::Enter);
        settle(&mut app, &mut rx).await;

        press(&mut app, Key::Char('q'));
        assert_eq!(app.mode, Mode::Idle);
        assert!(app.browser.is_none());
        assert!(!app.should_quit);

        press(&mut app, Key::Char('q'));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn empty_results_render_no_selection() {
        let (mut app, _, mut rx) = new_app(Reply::Items(Vec::new(), 0));
        press(&mut app, Key::Char('s'));
        press(&mut app, Key::Char('C'));
        type_str(&mut app, "nothing");
        press(&mut app, Key::Enter);
        settle(&mut app, &mut rx).await;

        assert_eq!(app.mode, Mode::ResultsBrowser);
        press(&mut app, Key::Char('j'));
        press(&mut app, Key::Char('k'));
        assert!(app.selected_item().is_none());

        press(&mut app, Key::Enter);
        assert!(!app.layout.is_open(Panel::Detail));
    }

    #[tokio::test]
    async fn paging_fetches_adjacent_pages() {
        let settings = SearchConfig {
            per_page: 2,
            ..SearchConfig::default()
        };
        let (mut app, client, mut rx) =
            new_app_with(Reply::Items(vec![item("a"), item("b")], 5), settings);
        press(&mut app, Key::Char('s'));
        press(&mut app, Key::Char('r'));
        type_str(&mut app, "foo");
        press(&mut app, Key::Enter);
        settle(&mut app, &mut rx).await;

        // Already on page 1
        press(&mut app, Key::Char('p'));
        assert!(app.searching().is_none());

        press(&mut app, Key::Char('j'));
        press(&mut app, Key::Char('n'));
        assert_eq!(app.mode, Mode::ResultsBrowser);
        settle(&mut app, &mut rx).await;
        let browser = app.browser.as_ref().unwrap();
        assert_eq!(browser.request().page(), 2);
        assert_eq!(browser.results().page, 2);
        assert_eq!(browser.selected(), 0);

        press(&mut app, Key::Char('n'));
        settle(&mut app, &mut rx).await;
        assert_eq!(app.browser.as_ref().unwrap().request().page(), 3);

        // 5 results at 2 per page: page 3 is the last
        press(&mut app, Key::Char('n'));
        assert!(app.searching().is_none());

        let pages: Vec<u32> = client.calls().iter().map(SearchRequest::page).collect();
        assert_eq!(pages, vec![1, 2, 3]);
        assert!(client.calls().iter().all(|r| r.query() == "foo"));
    }

    #[tokio::test]
    async fn failed_page_keeps_current_results() {
        let (mut app, client, mut rx) = new_app(Reply::Items(vec![item("a")], 100));
        press(&mut app, Key::Char('s'));
        press(&mut app, Key::Char('r'));
        type_str(&mut app, "foo");
        press(&mut app, Key::Enter);
        settle(&mut app, &mut rx).await;

        client.set_reply(Reply::Fail("rate limited".to_string()));
        press(&mut app, Key::Char('n'));
        settle(&mut app, &mut rx).await;

        assert_eq!(app.mode, Mode::ResultsBrowser);
        assert_eq!(app.browser.as_ref().unwrap().request().page(), 1);
        assert!(matches!(app.status, Some(Status::Error(_))));
    }

    #[tokio::test]
    async fn detail_panel_shows_raw_record() {
        let (mut app, _, mut rx) = new_app(two_items());
        press(&mut app, Key::Char('s'));
        press(&mut app, Key::Char('r'));
        type_str(&mut app, "foo");
        press(&mut app, Key::Enter);
        settle(&mut app, &mut rx).await;

        press(&mut app, Key::Enter);
        assert!(app.layout.is_open(Panel::Detail));
        let text = app.detail_text().unwrap();
        assert!(text.contains("\"full_name\": \"alpha/one\""));

        // j scrolls the detail, not the list
        press(&mut app, Key::Char('j'));
        assert_eq!(app.detail_scroll, 1);
        assert_eq!(app.browser.as_ref().unwrap().selected(), 0);

        press(&mut app, Key::Esc);
        assert!(!app.layout.is_open(Panel::Detail));
        assert_eq!(app.mode, Mode::ResultsBrowser);
    }

    #[tokio::test]
    async fn tick_advances_spinner_only_while_searching() {
        let (mut app, _, _rx) = new_app(Reply::Hang);
        app.update(Action::Tick);
        assert_eq!(app.spinner, 0);

        press(&mut app, Key::Char('s'));
        press(&mut app, Key::Char('r'));
        type_str(&mut app, "foo");
        press(&mut app, Key::Enter);
        app.update(Action::Tick);
        app.update(Action::Tick);
        assert_eq!(app.spinner, 2);
    }
}
