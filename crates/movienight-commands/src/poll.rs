//! Poll and list text building from the store snapshot.

use movienight_core::PollContent;
use movienight_store::SuggestionStore;

/// Build the weekly poll from the current suggestions.
///
/// `None` when there are no suggestions — the dispatcher sends a plain
/// "nothing this week" message instead of an empty poll.
pub fn build_poll(store: &SuggestionStore) -> Option<PollContent> {
    let suggestions = store.get_all_suggestions();
    if suggestions.is_empty() {
        return None;
    }

    let mut intro_lines = vec!["Time to vote! Here are this week's movies:".to_string(), String::new()];
    for (index, suggestion) in suggestions.iter().enumerate() {
        let movie = &suggestion.movie;
        intro_lines.push(format!(
            "{}. *{}* ({}) - suggested by {}",
            index + 1,
            movie.title,
            movie.year,
            suggestion.suggested_by
        ));
        if let Some(ref imdb_url) = movie.imdb_url {
            intro_lines.push(format!("   {imdb_url}"));
        }
        intro_lines.push(String::new());
    }

    let options = suggestions
        .iter()
        .map(|s| format!("{} ({})", s.movie.title, s.movie.year))
        .collect();

    Some(PollContent {
        intro: intro_lines.join("\n"),
        question: "Which movie for tonight?".to_string(),
        options,
        selectable_count: 1,
    })
}

/// Numbered list of current suggestions for the `!list` command.
pub fn format_suggestions_list(store: &SuggestionStore) -> String {
    let suggestions = store.get_all_suggestions();
    if suggestions.is_empty() {
        return "No suggestions yet. Use !suggest <movie title> to add one!".to_string();
    }

    let mut lines = vec![format!("Current suggestions ({}):", suggestions.len())];
    for (index, suggestion) in suggestions.iter().enumerate() {
        lines.push(format!(
            "{}. {} ({}) - suggested by {}",
            index + 1,
            suggestion.movie.title,
            suggestion.movie.year,
            suggestion.suggested_by
        ));
    }
    lines.join("\n")
}
