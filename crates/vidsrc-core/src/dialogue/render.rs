//! Reply texts sent by the dialogue

use crate::link::DeepLink;
use crate::types::Candidate;

/// Number of candidates listed before the "show all" option
pub const PREVIEW_LIMIT: usize = 7;

/// Selection number that expands the list to every candidate
pub const SHOW_ALL_CHOICE: i64 = 8;

pub const WELCOME: &str = "Welcome! Please enter a movie or TV show title to search:";
pub const NO_RESULTS: &str = "No results found or an error occurred. Please try again.";
pub const SELECTION_PROMPT: &str =
    "Enter the number of the result you want to see the IMDb ID for:";
pub const SEASON_PROMPT: &str = "Enter the number of the season you want to watch:";
pub const EPISODE_PROMPT: &str = "Enter the number of the episode you want to watch:";
pub const INVALID_NUMBER: &str = "Invalid number. Please try again.";
pub const NOT_A_NUMBER: &str = "Please enter a valid number.";
pub const NOT_A_SEASON: &str = "Please enter a valid number for the season.";
pub const NOT_AN_EPISODE: &str = "Please enter a valid number for the episode.";
pub const CANCELLED: &str = "Operation cancelled.";
pub const SEARCH_AGAIN: &str = "Search again /start";

/// First page of results, with the "show all" option when there are more.
pub fn preview_list(results: &[Candidate]) -> String {
    let mut reply = String::from("Showing up to 8 results:\n");
    push_numbered(&mut reply, &results[..results.len().min(PREVIEW_LIMIT)]);
    if results.len() > PREVIEW_LIMIT {
        reply.push_str(&format!("{}. Show all results", SHOW_ALL_CHOICE));
    }
    reply
}

/// Every result, numbered from 1.
pub fn full_list(results: &[Candidate]) -> String {
    let mut reply = String::from("Showing all results:\n");
    push_numbered(&mut reply, results);
    reply
}

fn push_numbered(reply: &mut String, results: &[Candidate]) {
    for (i, candidate) in results.iter().enumerate() {
        reply.push_str(&format!("{}. {}\n", i + 1, candidate));
    }
}

/// Confirmation of a chosen candidate, without a trailing instruction.
pub fn selected(candidate: &Candidate) -> String {
    format!(
        "Selected: {}\nIMDb ID: {}\n",
        candidate, candidate.external_id
    )
}

pub fn movie_link(link: &DeepLink) -> String {
    format!("Movie link: {}", link)
}

pub fn series_link(link: &DeepLink) -> String {
    format!("TV Series link: {}", link)
}
