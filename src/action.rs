use crate::error::SearchError;
use crate::types::{ResultSet, SearchKind};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Back,
    Tick,
    Resize(u16, u16),

    // Help
    ShowHelp,
    CloseHelp,

    // Kind picker
    OpenKindPicker,
    PickKind(SearchKind),
    CancelPicker,

    // Query editor
    QueryInput(char),
    QueryBackspace,
    SubmitQuery,
    CancelQuery,

    // Search lifecycle
    CancelSearch,
    SearchFinished {
        request_id: u64,
        outcome: Result<ResultSet, SearchError>,
    },

    // Result browser
    ScrollUp,
    ScrollDown,
    GoToTop,
    GoToBottom,
    NextPage,
    PrevPage,
    ShowDetail,
    CloseDetail,
    DetailScrollUp,
    DetailScrollDown,
    OpenInBrowser,
    OpenSearchInBrowser,
    YankUrl,

    None,
}

