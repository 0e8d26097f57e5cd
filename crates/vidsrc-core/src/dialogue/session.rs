//! Per-user dialogue state machine
//!
//! A [`Session`] walks through title → selection → season → episode. Each
//! stage carries only the data valid in that stage, so a session can never
//! hold a season without a selected series, or a selection without results.

use tracing::debug;

use super::render::{self, PREVIEW_LIMIT, SHOW_ALL_CHOICE};
use crate::extractor::Extractor;
use crate::link::DeepLink;
use crate::types::Candidate;

/// Which input the session is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueState {
    /// Free-text title to search for
    Title,
    /// Number of a listed candidate
    Selection,
    /// Season number of the selected series
    Season,
    /// Episode number within the chosen season
    Episode,
}

/// How a dialogue ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A playback link was produced
    Link(DeepLink),
    /// The search returned nothing (or failed)
    NoResults,
    /// The user cancelled
    Cancelled,
}

/// Messages produced by one turn, plus where the dialogue stands afterwards
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    /// Messages to send, in order
    pub messages: Vec<String>,
    /// Next expected input, `None` once the dialogue is over or was never active
    pub state: Option<DialogueState>,
    /// Set when this turn ended the dialogue
    pub outcome: Option<Outcome>,
}

impl Reply {
    /// A turn that produced nothing (no active session, or a stray input).
    pub fn ignored() -> Self {
        Self::default()
    }

    pub(crate) fn continuing(state: DialogueState, messages: Vec<String>) -> Self {
        Self {
            messages,
            state: Some(state),
            outcome: None,
        }
    }

    pub(crate) fn finished(outcome: Outcome, messages: Vec<String>) -> Self {
        Self {
            messages,
            state: None,
            outcome: Some(outcome),
        }
    }

    /// Whether this turn ended the dialogue
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// The produced link, if this turn produced one
    pub fn link(&self) -> Option<&DeepLink> {
        match &self.outcome {
            Some(Outcome::Link(link)) => Some(link),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
enum Stage {
    Title,
    Selection { results: Vec<Candidate> },
    Season { selected: Candidate },
    Episode { selected: Candidate, season: i64 },
    Finished,
}

/// Conversation state of a single user
#[derive(Debug, Clone)]
pub struct Session {
    stage: Stage,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh session waiting for a title.
    pub fn new() -> Self {
        Self {
            stage: Stage::Title,
        }
    }

    /// Current expected input, `None` once finished
    pub fn state(&self) -> Option<DialogueState> {
        match self.stage {
            Stage::Title => Some(DialogueState::Title),
            Stage::Selection { .. } => Some(DialogueState::Selection),
            Stage::Season { .. } => Some(DialogueState::Season),
            Stage::Episode { .. } => Some(DialogueState::Episode),
            Stage::Finished => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.stage, Stage::Finished)
    }

    /// Stored search results while choosing
    pub fn results(&self) -> Option<&[Candidate]> {
        match &self.stage {
            Stage::Selection { results } => Some(results),
            _ => None,
        }
    }

    /// Chosen series while collecting season and episode
    pub fn selected(&self) -> Option<&Candidate> {
        match &self.stage {
            Stage::Season { selected } | Stage::Episode { selected, .. } => Some(selected),
            _ => None,
        }
    }

    pub fn season(&self) -> Option<i64> {
        match self.stage {
            Stage::Episode { season, .. } => Some(season),
            _ => None,
        }
    }

    /// Process one user message.
    ///
    /// In the title stage this performs the search; every other stage is
    /// handled without I/O.
    pub async fn advance(&mut self, text: &str, extractor: &Extractor) -> Reply {
        if matches!(self.stage, Stage::Title) {
            let results = extractor.search(text).await;
            return self.receive_results(results);
        }
        self.respond(text)
    }

    /// Move from the title stage with the search outcome.
    pub fn receive_results(&mut self, results: Vec<Candidate>) -> Reply {
        if !matches!(self.stage, Stage::Title) {
            return Reply::ignored();
        }

        if results.is_empty() {
            self.stage = Stage::Finished;
            return Reply::finished(Outcome::NoResults, vec![render::NO_RESULTS.to_string()]);
        }

        debug!(count = results.len(), "listing search results");
        let messages = vec![
            render::preview_list(&results),
            render::SELECTION_PROMPT.to_string(),
        ];
        self.stage = Stage::Selection { results };
        Reply::continuing(DialogueState::Selection, messages)
    }

    /// Handle a message in the selection, season or episode stage.
    pub fn respond(&mut self, text: &str) -> Reply {
        match self.stage {
            Stage::Selection { .. } => self.on_selection(text),
            Stage::Season { .. } => self.on_season(text),
            Stage::Episode { .. } => self.on_episode(text),
            Stage::Title | Stage::Finished => Reply::ignored(),
        }
    }

    fn on_selection(&mut self, text: &str) -> Reply {
        let Stage::Selection { results } = &self.stage else {
            return Reply::ignored();
        };
        let Some(choice) = parse_number(text) else {
            return Reply::continuing(
                DialogueState::Selection,
                vec![render::NOT_A_NUMBER.to_string()],
            );
        };

        let picked = if (1..=PREVIEW_LIMIT as i64).contains(&choice) {
            results.get((choice - 1) as usize).cloned()
        } else {
            None
        };
        if let Some(candidate) = picked {
            return self.confirm(candidate);
        }

        if choice == SHOW_ALL_CHOICE && results.len() > PREVIEW_LIMIT {
            return Reply::continuing(
                DialogueState::Selection,
                vec![
                    render::full_list(results),
                    render::SELECTION_PROMPT.to_string(),
                ],
            );
        }

        Reply::continuing(
            DialogueState::Selection,
            vec![render::INVALID_NUMBER.to_string()],
        )
    }

    fn confirm(&mut self, candidate: Candidate) -> Reply {
        let mut message = render::selected(&candidate);

        if candidate.kind.is_episodic() {
            message.push_str(render::SEASON_PROMPT);
            self.stage = Stage::Season {
                selected: candidate,
            };
            return Reply::continuing(DialogueState::Season, vec![message]);
        }

        let link = DeepLink::Movie {
            external_id: candidate.external_id,
        };
        message.push_str(&render::movie_link(&link));
        self.stage = Stage::Finished;
        Reply::finished(
            Outcome::Link(link),
            vec![message, render::SEARCH_AGAIN.to_string()],
        )
    }

    fn on_season(&mut self, text: &str) -> Reply {
        let Some(season) = parse_number(text) else {
            return Reply::continuing(
                DialogueState::Season,
                vec![render::NOT_A_SEASON.to_string()],
            );
        };

        let Stage::Season { selected } = std::mem::replace(&mut self.stage, Stage::Finished)
        else {
            return Reply::ignored();
        };
        self.stage = Stage::Episode { selected, season };
        Reply::continuing(
            DialogueState::Episode,
            vec![render::EPISODE_PROMPT.to_string()],
        )
    }

    fn on_episode(&mut self, text: &str) -> Reply {
        let Some(episode) = parse_number(text) else {
            return Reply::continuing(
                DialogueState::Episode,
                vec![render::NOT_AN_EPISODE.to_string()],
            );
        };

        let Stage::Episode { selected, season } =
            std::mem::replace(&mut self.stage, Stage::Finished)
        else {
            return Reply::ignored();
        };
        let link = DeepLink::Episode {
            external_id: selected.external_id,
            season,
            episode,
        };
        Reply::finished(
            Outcome::Link(link.clone()),
            vec![render::series_link(&link), render::SEARCH_AGAIN.to_string()],
        )
    }
}

/// Parse a whole-number reply, ignoring surrounding whitespace.
fn parse_number(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}
