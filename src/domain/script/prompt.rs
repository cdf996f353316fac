use crate::domain::audio::ScriptFormat;

/// Average speaking rate used to size scripts
pub const WORDS_PER_MINUTE: f64 = 150.0;

/// A validated script generation request
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptPrompt {
    pub topic: String,
    pub subtopic: Option<String>,
    pub duration_minutes: f64,
    pub speakers: usize,
    pub language: String,
}

impl ScriptPrompt {
    pub fn format(&self) -> ScriptFormat {
        ScriptFormat::for_speakers(self.speakers)
    }

    pub fn target_word_count(&self) -> u32 {
        (self.duration_minutes * WORDS_PER_MINUTE).round() as u32
    }

    /// Key identifying equivalent requests for caching
    pub fn cache_key(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}",
            self.topic.to_lowercase(),
            self.subtopic.as_deref().unwrap_or_default().to_lowercase(),
            self.duration_minutes,
            self.speakers,
            self.language.to_lowercase()
        )
    }

    pub fn system_prompt(&self) -> String {
        format!(
            "You are a professional podcast script writer. Create exactly {}-minute scripts \
             by targeting {} words. Maintain consistent pacing and natural dialogue flow.",
            self.duration_minutes,
            self.target_word_count()
        )
    }

    pub fn user_prompt(&self) -> String {
        let duration = self.duration_minutes;
        let words = self.target_word_count();
        let format = self.format();
        let focus = self
            .subtopic
            .as_ref()
            .map(|s| format!(", focusing on {}", s))
            .unwrap_or_default();
        let edge_minutes = (duration * 0.1).max(0.5);
        let style = match format {
            ScriptFormat::Dialogue => {
                "- Format as natural dialogue with \"Speaker 1:\" or \"Speaker 2:\" prefixes\n\
                 - Aim for roughly equal speaking time between speakers"
            }
            ScriptFormat::Monologue => {
                "- Use conversational monologue style\n\
                 - Include pauses and natural breaks"
            }
        };

        format!(
            "Generate a precisely {duration}-minute {format} script about {topic}{focus}.\n\
             \n\
             Target length: {words} words ({duration} minutes at {wpm} words per minute)\n\
             \n\
             Structure:\n\
             - Brief Introduction ({edge:.1} min)\n\
             - Main Content ({main:.1} min)\n\
             - Conclusion ({edge:.1} min)\n\
             \n\
             Style:\n\
             {style}\n\
             - Keep sentences concise and naturally paced\n\
             - Target exactly {words} words\n\
             \n\
             Language: {language}\n\
             Duration: Exactly {duration} minutes\n\
             Format: {format}",
            topic = self.topic,
            wpm = WORDS_PER_MINUTE,
            edge = edge_minutes,
            main = duration * 0.8,
            language = self.language,
        )
    }
}

pub fn count_words(script: &str) -> usize {
    script.split_whitespace().count()
}

pub fn estimated_minutes(word_count: usize) -> f64 {
    word_count as f64 / WORDS_PER_MINUTE
}
