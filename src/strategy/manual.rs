use crate::{
    console::Prompt,
    domain::{
        reference::Reference,
        track::{Track, TrackList},
    },
    strategy::{Strategy, StrategyError},
};

/// Last resort: the operator reads the page and types the songs in.
///
/// An empty line ends input once at least one song was entered. Closing
/// the input (Ctrl-D) ends it unconditionally.
pub struct ManualEntry {
    prompt: Box<dyn Prompt>,
}

impl ManualEntry {
    pub fn new(prompt: Box<dyn Prompt>) -> Self {
        Self { prompt }
    }
}

impl Strategy for ManualEntry {
    fn name(&self) -> &str {
        "Manual Input"
    }

    fn execute(&mut self, _reference: &Reference, url: &str) -> Result<TrackList, StrategyError> {
        let mut tracks = TrackList::new();

        self.prompt
            .tell("Automatic extraction failed. Manual input required.");
        self.prompt.tell("Please open this URL in your browser:");
        self.prompt.tell(url);
        if self
            .prompt
            .ask("Press Enter when ready to input songs...")?
            .is_none()
        {
            return Ok(tracks);
        }

        self.prompt
            .tell("Enter songs in format: 'Artist - Song Title'");
        self.prompt.tell("Press Enter on empty line when done");

        loop {
            let question = format!("Song {}: ", tracks.len() + 1);
            let Some(song) = self.prompt.ask(&question)? else {
                break;
            };

            if song.is_empty() {
                if tracks.is_empty() {
                    log::warn!("No songs entered. Type at least one, or close the input to skip.");
                    continue;
                }
                break;
            }

            if tracks.push(Track::verbatim(song.as_str())) {
                self.prompt.tell(&format!("Added: {song}"));
            }
        }

        Ok(tracks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{console::ScriptedPrompt, domain::reference::ContentType};

    fn run(answers: &[&str]) -> TrackList {
        let mut manual = ManualEntry::new(Box::new(ScriptedPrompt::new(answers.iter().copied())));
        let reference = Reference {
            content_type: ContentType::Playlist,
            id: "p".to_string(),
        };
        manual
            .execute(&reference, "https://open.spotify.com/playlist/p")
            .unwrap()
    }

    #[test]
    fn collects_until_empty_line() {
        let tracks = run(&["", "A - B", "Massive Attack - Angel", "", "ignored - after"]);

        assert_eq!(tracks.as_strings(), vec!["A - B", "Massive Attack - Angel"]);
    }

    #[test]
    fn first_empty_line_does_not_end_input() {
        let tracks = run(&["", "", "", "A - B", ""]);

        assert_eq!(tracks.as_strings(), vec!["A - B"]);
    }

    #[test]
    fn entries_are_taken_verbatim() {
        let tracks = run(&["", "just a title", ""]);

        assert_eq!(tracks.as_strings(), vec!["just a title"]);
    }

    #[test]
    fn closed_input_ends_with_what_was_collected() {
        assert!(run(&[]).is_empty());
        assert!(run(&["", ""]).is_empty());
        assert_eq!(run(&["", "A - B"]).as_strings(), vec!["A - B"]);
    }
}
