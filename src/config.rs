//! Application-level configuration loading, including the runtime trivia
//! question pool and the night-modifier phrases.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use rand::seq::{IndexedRandom, SliceRandom};
use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "REEL_SYNC_BACK_CONFIG_PATH";
/// Number of night modifiers sampled per recommendation round.
const MODIFIER_SAMPLE: usize = 3;

/// A multiple-choice trivia question raced on during a trivia round.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TriviaQuestion {
    /// Question text shown to every participant.
    pub prompt: String,
    /// Answer options in display order.
    pub options: Vec<String>,
    /// The correct option. Never serialized toward clients.
    pub answer: String,
}

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    questions: Vec<TriviaQuestion>,
    modifiers: Vec<String>,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to the
    /// baked-in question pool and modifier set.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        questions = app_config.questions.len(),
                        modifiers = app_config.modifiers.len(),
                        "loaded trivia pool and modifiers from config"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Build a configuration from explicit parts. Empty collections fall back
    /// to the built-in defaults so callers always draw from non-empty pools.
    pub fn with_pools(questions: Vec<TriviaQuestion>, modifiers: Vec<String>) -> Self {
        Self {
            questions: if questions.is_empty() {
                default_questions()
            } else {
                questions
            },
            modifiers: if modifiers.is_empty() {
                default_modifiers()
            } else {
                modifiers
            },
        }
    }

    /// Pick a random question for a new trivia round.
    pub fn random_question(&self) -> TriviaQuestion {
        self.questions
            .choose(&mut rand::rng())
            .cloned()
            .unwrap_or_else(fallback_question)
    }

    /// Sample three distinct night modifiers for a recommendation round.
    pub fn random_modifiers(&self) -> Vec<String> {
        let mut pool = self.modifiers.clone();
        pool.shuffle(&mut rand::rng());
        pool.truncate(MODIFIER_SAMPLE);
        pool
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            questions: default_questions(),
            modifiers: default_modifiers(),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    questions: Vec<TriviaQuestion>,
    #[serde(default)]
    modifiers: Vec<String>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self::with_pools(value.questions, value.modifiers)
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Question handed out if a configured pool somehow ends up empty.
fn fallback_question() -> TriviaQuestion {
    TriviaQuestion {
        prompt: "Which movie features the line 'May the Force be with you'?".into(),
        options: vec![
            "Star Trek".into(),
            "Star Wars".into(),
            "Starship Troopers".into(),
        ],
        answer: "Star Wars".into(),
    }
}

/// Built-in trivia pool shipped with the binary.
fn default_questions() -> Vec<TriviaQuestion> {
    fn q(prompt: &str, options: [&str; 4], answer: &str) -> TriviaQuestion {
        TriviaQuestion {
            prompt: prompt.into(),
            options: options.iter().map(|s| (*s).into()).collect(),
            answer: answer.into(),
        }
    }

    vec![
        q(
            "Which movie features the line 'Here's looking at you, kid'?",
            ["Casablanca", "Citizen Kane", "Roman Holiday", "The Third Man"],
            "Casablanca",
        ),
        q(
            "Who directed 'Jaws'?",
            ["George Lucas", "Steven Spielberg", "Ridley Scott", "John Carpenter"],
            "Steven Spielberg",
        ),
        q(
            "In 'The Matrix', which pill does Neo take?",
            ["Red", "Blue", "Green", "Yellow"],
            "Red",
        ),
        q(
            "Which film won the first Academy Award for Best Picture?",
            ["Wings", "Sunrise", "Metropolis", "The Jazz Singer"],
            "Wings",
        ),
        q(
            "What is the name of the hobbit played by Elijah Wood?",
            ["Samwise", "Bilbo", "Frodo", "Pippin"],
            "Frodo",
        ),
        q(
            "Which movie's famous twist is 'He was dead the whole time'?",
            ["Se7en", "The Sixth Sense", "Memento", "Shutter Island"],
            "The Sixth Sense",
        ),
        q(
            "What kind of animal is Remy in 'Ratatouille'?",
            ["Mouse", "Rat", "Rabbit", "Squirrel"],
            "Rat",
        ),
        q(
            "Which actor played the Joker in 'The Dark Knight'?",
            ["Jared Leto", "Jack Nicholson", "Heath Ledger", "Joaquin Phoenix"],
            "Heath Ledger",
        ),
        q(
            "'Parasite' (2019) was originally filmed in which language?",
            ["Japanese", "Mandarin", "Korean", "Thai"],
            "Korean",
        ),
        q(
            "In 'Back to the Future', what speed does the DeLorean need to reach?",
            ["66 mph", "77 mph", "88 mph", "99 mph"],
            "88 mph",
        ),
        q(
            "Which movie features a volleyball named Wilson?",
            ["Cast Away", "The Beach", "Life of Pi", "127 Hours"],
            "Cast Away",
        ),
        q(
            "Who composed the score for 'The Good, the Bad and the Ugly'?",
            ["John Williams", "Ennio Morricone", "Hans Zimmer", "Bernard Herrmann"],
            "Ennio Morricone",
        ),
    ]
}

/// Built-in night-modifier phrases shipped with the binary.
fn default_modifiers() -> Vec<String> {
    [
        "Popcorn Mandatory 🍿",
        "Blanket Fort Mode ⛺",
        "No Phones Allowed 📵",
        "Critique Accents 🗣️",
        "Guess the Twist 😱",
        "Rate Every Outfit 👗",
        "Drink Every Time Someone Says 'No' 🥤",
        "Lights Off 🌑",
        "Surround Sound Max 🔊",
        "Silent Snacks Only 🤫",
        "Subtitles On 📝",
        "Predict the Ending 🔮",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pools_are_non_empty() {
        let config = AppConfig::default();
        assert!(!config.questions.is_empty());
        assert!(!config.modifiers.is_empty());
    }

    #[test]
    fn empty_pools_fall_back_to_defaults() {
        let config = AppConfig::with_pools(Vec::new(), Vec::new());
        assert!(!config.questions.is_empty());
        assert!(!config.modifiers.is_empty());
    }

    #[test]
    fn random_question_comes_from_the_pool() {
        let question = TriviaQuestion {
            prompt: "Only one".into(),
            options: vec!["Yes".into(), "No".into()],
            answer: "Yes".into(),
        };
        let config = AppConfig::with_pools(vec![question.clone()], Vec::new());
        assert_eq!(config.random_question(), question);
    }

    #[test]
    fn modifier_sample_has_three_distinct_entries() {
        let config = AppConfig::default();
        let sample = config.random_modifiers();
        assert_eq!(sample.len(), 3);
        let mut unique = sample.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 3);
    }
}
