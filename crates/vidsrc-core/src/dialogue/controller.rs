//! Session registry and turn dispatch
//!
//! The controller owns one [`Session`] per session identity. Turns of the
//! same session run one after another; different sessions run concurrently.
//! The registry lock is only held to look sessions up, never across a search.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use super::render;
use super::session::{DialogueState, Outcome, Reply, Session};
use crate::extractor::Extractor;

/// Stable identity of one conversation (e.g. a chat id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub i64);

impl From<i64> for SessionId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One message delivered by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Entry command: begin a new lookup
    Start,
    /// Cancel command: abandon the current lookup
    Cancel,
    /// Any other text
    Text(String),
}

type SharedSession = Arc<Mutex<Session>>;

/// Drives lookup dialogues for any number of sessions
///
/// # Example
/// ```no_run
/// use vidsrc_core::{DialogueController, Extractor, Input, SessionId};
///
/// # async fn example() -> Result<(), vidsrc_core::LookupError> {
/// let controller = DialogueController::new(Extractor::new()?);
/// let chat = SessionId(42);
///
/// controller.handle(chat, Input::Start).await;
/// let reply = controller.handle(chat, Input::Text("Inception".into())).await;
/// for message in reply.messages {
///     println!("{}", message);
/// }
/// # Ok(())
/// # }
/// ```
pub struct DialogueController {
    extractor: Extractor,
    sessions: Mutex<HashMap<SessionId, SharedSession>>,
}

impl DialogueController {
    pub fn new(extractor: Extractor) -> Self {
        Self {
            extractor,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Handle one input of a session and return the messages to send back.
    pub async fn handle(&self, id: SessionId, input: Input) -> Reply {
        match input {
            Input::Start => self.start(id).await,
            Input::Cancel => self.cancel(id).await,
            Input::Text(text) => self.advance(id, &text).await,
        }
    }

    /// Number of sessions currently in progress
    pub async fn active_sessions(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Expected input of a session, `None` if it has no dialogue in progress
    pub async fn state(&self, id: SessionId) -> Option<DialogueState> {
        let session = self.sessions.lock().await.get(&id).cloned()?;
        let state = session.lock().await.state();
        state
    }

    async fn start(&self, id: SessionId) -> Reply {
        let replaced = self
            .sessions
            .lock()
            .await
            .insert(id, Arc::new(Mutex::new(Session::new())))
            .is_some();
        info!(session = %id, replaced, "lookup started");

        Reply::continuing(DialogueState::Title, vec![render::WELCOME.to_string()])
    }

    async fn cancel(&self, id: SessionId) -> Reply {
        if self.sessions.lock().await.remove(&id).is_none() {
            return Reply::ignored();
        }
        info!(session = %id, "lookup cancelled");

        Reply::finished(Outcome::Cancelled, vec![render::CANCELLED.to_string()])
    }

    async fn advance(&self, id: SessionId, text: &str) -> Reply {
        let Some(session) = self.sessions.lock().await.get(&id).cloned() else {
            return Reply::ignored();
        };

        let reply = session.lock().await.advance(text, &self.extractor).await;

        if reply.is_terminal() {
            self.finish(id, &session).await;
            info!(session = %id, outcome = ?reply.outcome, "lookup finished");
        }
        reply
    }

    /// Drop a finished session unless a newer one already replaced it.
    async fn finish(&self, id: SessionId, session: &SharedSession) {
        let mut sessions = self.sessions.lock().await;
        if sessions
            .get(&id)
            .is_some_and(|current| Arc::ptr_eq(current, session))
        {
            sessions.remove(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientConfig;
    use crate::link::DeepLink;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn item(title: &str, year: &str, label: Option<&str>, id: &str) -> String {
        let label = label
            .map(|l| format!(r#"<span class="ipc-metadata-list-summary-item__li">{}</span>"#, l))
            .unwrap_or_default();
        format!(
            r#"<li class="ipc-metadata-list-summary-item">
                <a class="ipc-metadata-list-summary-item__t" href="/title/{}/?ref_=fn_al_tt_1">{}</a>
                <span class="ipc-metadata-list-summary-item__li">{}</span>{}
            </li>"#,
            id, title, year, label
        )
    }

    fn page(items: &[String]) -> String {
        format!("<html><body><ul>{}</ul></body></html>", items.concat())
    }

    async fn provider(query: &str, body: String) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/find"))
            .and(query_param("q", query))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
        server
    }

    fn controller(server: &MockServer) -> DialogueController {
        let extractor = Extractor::with_config(ClientConfig::with_base_url(server.uri())).unwrap();
        DialogueController::new(extractor)
    }

    fn text(s: &str) -> Input {
        Input::Text(s.to_string())
    }

    #[tokio::test]
    async fn test_movie_lookup() {
        let server = provider(
            "Inception",
            page(&[item("Inception", "2010", None, "tt1375666")]),
        )
        .await;
        let controller = controller(&server);
        let chat = SessionId(1);

        let reply = controller.handle(chat, Input::Start).await;
        assert_eq!(reply.messages, vec![render::WELCOME]);
        assert_eq!(controller.state(chat).await, Some(DialogueState::Title));

        let reply = controller.handle(chat, text("Inception")).await;
        assert!(reply.messages[0].contains("1. Inception (2010) - Movie"));
        assert_eq!(reply.state, Some(DialogueState::Selection));

        let reply = controller.handle(chat, text("1")).await;
        assert!(reply.messages[0].contains("https://vidsrc.me/embed/movie/tt1375666"));
        assert!(reply.is_terminal());
        assert_eq!(controller.active_sessions().await, 0);
    }

    #[tokio::test]
    async fn test_series_lookup() {
        let server = provider(
            "Friends",
            page(&[item("Friends", "1994–2004", Some("TV Series"), "tt0108778")]),
        )
        .await;
        let controller = controller(&server);
        let chat = SessionId(2);

        controller.handle(chat, Input::Start).await;
        controller.handle(chat, text("Friends")).await;

        let reply = controller.handle(chat, text("1")).await;
        assert!(reply.messages[0].ends_with(render::SEASON_PROMPT));

        let reply = controller.handle(chat, text("3")).await;
        assert_eq!(reply.messages, vec![render::EPISODE_PROMPT]);

        let reply = controller.handle(chat, text("5")).await;
        assert_eq!(
            reply.link(),
            Some(&DeepLink::Episode {
                external_id: "tt0108778".to_string(),
                season: 3,
                episode: 5,
            })
        );
        assert_eq!(
            reply.link().map(|l| l.url()),
            Some("https://vidsrc.me/embed/tv/tt0108778/3/5".to_string())
        );
        assert_eq!(controller.state(chat).await, None);
    }

    #[tokio::test]
    async fn test_show_all_results() {
        let items: Vec<String> = (1..=9)
            .map(|i| item(&format!("Alien {}", i), "1979", None, &format!("tt00{}", i)))
            .collect();
        let server = provider("Alien", page(&items)).await;
        let controller = controller(&server);
        let chat = SessionId(3);

        controller.handle(chat, Input::Start).await;
        let reply = controller.handle(chat, text("Alien")).await;
        assert!(reply.messages[0].contains("7. Alien 7 (1979) - Movie\n"));
        assert!(!reply.messages[0].contains("Alien 8"));
        assert!(reply.messages[0].ends_with("8. Show all results"));

        let reply = controller.handle(chat, text("8")).await;
        let lines: Vec<&str> = reply.messages[0].lines().skip(1).collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[8], "9. Alien 9 (1979) - Movie");
        assert_eq!(controller.state(chat).await, Some(DialogueState::Selection));
    }

    #[tokio::test]
    async fn test_no_results_ends_session() {
        let server = provider("zzzz", page(&[])).await;
        let controller = controller(&server);
        let chat = SessionId(4);

        controller.handle(chat, Input::Start).await;
        let reply = controller.handle(chat, text("zzzz")).await;

        assert_eq!(reply.messages, vec![render::NO_RESULTS]);
        assert_eq!(reply.outcome, Some(Outcome::NoResults));
        assert_eq!(controller.active_sessions().await, 0);
    }

    #[tokio::test]
    async fn test_failed_request_reports_no_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        let controller = controller(&server);
        let chat = SessionId(5);

        controller.handle(chat, Input::Start).await;
        let reply = controller.handle(chat, text("Inception")).await;
        assert_eq!(reply.messages, vec![render::NO_RESULTS]);
        assert!(reply.is_terminal());
    }

    #[tokio::test]
    async fn test_invalid_selection_boundaries() {
        let items: Vec<String> = (1..=5)
            .map(|i| item(&format!("Heat {}", i), "1995", None, &format!("tt10{}", i)))
            .collect();
        let server = provider("Heat", page(&items)).await;
        let controller = controller(&server);
        let chat = SessionId(6);

        controller.handle(chat, Input::Start).await;
        controller.handle(chat, text("Heat")).await;

        for choice in ["0", "9", "6", "8", "0"] {
            let reply = controller.handle(chat, text(choice)).await;
            assert_eq!(reply.messages, vec![render::INVALID_NUMBER]);
            assert_eq!(controller.state(chat).await, Some(DialogueState::Selection));
        }
    }

    #[tokio::test]
    async fn test_cancel() {
        let server = MockServer::start().await;
        let controller = controller(&server);
        let chat = SessionId(7);

        assert_eq!(controller.handle(chat, Input::Cancel).await, Reply::ignored());

        controller.handle(chat, Input::Start).await;
        let reply = controller.handle(chat, Input::Cancel).await;
        assert_eq!(reply.messages, vec![render::CANCELLED]);
        assert_eq!(reply.outcome, Some(Outcome::Cancelled));
        assert_eq!(controller.active_sessions().await, 0);
    }

    #[tokio::test]
    async fn test_text_without_session_is_ignored() {
        let server = MockServer::start().await;
        let controller = controller(&server);

        let reply = controller.handle(SessionId(8), text("Inception")).await;
        assert_eq!(reply, Reply::ignored());
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let server = provider(
            "Inception",
            page(&[item("Inception", "2010", None, "tt1375666")]),
        )
        .await;
        let controller = controller(&server);
        let (alice, bob) = (SessionId(10), SessionId(11));

        controller.handle(alice, Input::Start).await;
        controller.handle(bob, Input::Start).await;
        controller.handle(alice, text("Inception")).await;

        assert_eq!(controller.state(alice).await, Some(DialogueState::Selection));
        assert_eq!(controller.state(bob).await, Some(DialogueState::Title));

        controller.handle(bob, Input::Cancel).await;
        assert_eq!(controller.state(alice).await, Some(DialogueState::Selection));
        assert_eq!(controller.active_sessions().await, 1);
    }

    #[tokio::test]
    async fn test_start_restarts_session() {
        let server = provider(
            "Inception",
            page(&[item("Inception", "2010", None, "tt1375666")]),
        )
        .await;
        let controller = controller(&server);
        let chat = SessionId(12);

        controller.handle(chat, Input::Start).await;
        controller.handle(chat, text("Inception")).await;
        controller.handle(chat, Input::Start).await;

        assert_eq!(controller.state(chat).await, Some(DialogueState::Title));
        assert_eq!(controller.active_sessions().await, 1);
    }
}
