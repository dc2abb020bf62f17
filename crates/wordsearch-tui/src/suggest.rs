use rand::seq::SliceRandom;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;
use thiserror::Error;
use wordsearch_core::validate_words;

/// How long the app waits for a word source before giving up on it
pub const SUGGEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A failed word suggestion. All variants are recoverable: the app reports
/// them and keeps the current puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuggestError {
    #[error("no topic named {0:?}")]
    UnknownTopic(String),

    #[error("no usable words for topic {0:?}")]
    NoValidWords(String),

    #[error("word suggestion timed out")]
    TimedOut,

    #[error("word suggestion worker went away")]
    WorkerGone,
}

/// A provider of topic-related word lists.
///
/// Implementations return already-validated words; [`BuiltinTopics`] is the
/// bundled offline provider, and a networked client would slot in behind
/// the same trait.
pub trait WordSource: Send {
    fn fetch(&self, topic: &str, count: usize) -> Result<Vec<String>, SuggestError>;
}

/// Bundled topic word lists
pub struct BuiltinTopics;

const TOPICS: &[(&str, &[&str])] = &[
    (
        "Halloween",
        &[
            "GHOST", "WITCH", "PUMPKIN", "SPOOKY", "ZOMBIE", "BAT", "COSTUME", "TRICKORTREAT",
            "SKELETON", "HAUNTED", "CAULDRON", "VAMPIRE",
        ],
    ),
    (
        "Christmas",
        &[
            "SANTA", "ELF", "REINDEER", "MISTLETOE", "JINGLEBELLS", "EGGNOG", "CANDYCANE",
            "STOCKING", "SLEIGH", "TINSEL", "WREATH", "NUTCRACKER",
        ],
    ),
    (
        "Faith",
        &[
            "PRAYER", "GRACE", "HOPE", "FAITH", "LOVE", "PEACE", "JOY", "BIBLE", "CHARITY",
            "WORSHIP", "BLESSING", "MERCY",
        ],
    ),
    (
        "Motorsports",
        &[
            "FORMULAONE", "NASCAR", "RALLY", "DRIFT", "TURBO", "PITSTOP", "CHECKEREDFLAG",
            "SPEEDWAY", "CHICANE", "PODIUM", "SLIPSTREAM", "PADDOCK",
        ],
    ),
    (
        "Animals",
        &[
            "BADGER", "OTTER", "FALCON", "GECKO", "WALRUS", "HERON", "LYNX", "MARMOT",
            "PANGOLIN", "TOUCAN", "WOMBAT", "IGUANA",
        ],
    ),
    (
        "Ocean",
        &[
            "CORAL", "TIDE", "KELP", "ANEMONE", "TRENCH", "CURRENT", "PLANKTON", "LAGOON",
            "REEF", "ABYSS", "NARWHAL", "SEAGRASS",
        ],
    ),
    (
        "Space",
        &[
            "NEBULA", "QUASAR", "COMET", "ORBIT", "GALAXY", "METEOR", "PULSAR", "AURORA",
            "GRAVITY", "ECLIPSE", "ASTEROID", "COSMOS",
        ],
    ),
];

impl BuiltinTopics {
    /// Topic names for the menu, in bundled order
    pub fn names() -> Vec<&'static str> {
        TOPICS.iter().map(|(name, _)| *name).collect()
    }
}

impl WordSource for BuiltinTopics {
    fn fetch(&self, topic: &str, count: usize) -> Result<Vec<String>, SuggestError> {
        let (_, pool) = TOPICS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(topic))
            .ok_or_else(|| SuggestError::UnknownTopic(topic.to_string()))?;

        let sampled: Vec<&str> = pool
            .choose_multiple(&mut rand::thread_rng(), count)
            .copied()
            .collect();

        let words = validate_words(sampled, count);
        if words.is_empty() {
            return Err(SuggestError::NoValidWords(topic.to_string()));
        }
        Ok(words)
    }
}

/// Run a word source off the interaction thread.
///
/// The result arrives on the returned channel as a single message; the app
/// polls it from its tick and applies [`SUGGEST_TIMEOUT`], after which the
/// worker is abandoned. Pointer handling never blocks on this.
pub fn fetch_words<S: WordSource + 'static>(
    source: S,
    topic: String,
    count: usize,
) -> Receiver<Result<Vec<String>, SuggestError>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = source.fetch(&topic, count);
        // The app may have timed out and dropped the receiver already
        let _ = tx.send(result);
    });
    rx
}
