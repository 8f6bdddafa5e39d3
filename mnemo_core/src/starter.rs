//! Built-in starter content for a first run.
//!
//! A brand-new store is empty, which makes for a bleak first screen. Hosts
//! can seed from here instead. Ids are minted fresh on every call, and all
//! cards start unreviewed (immediately due).

use crate::{CardDraft, Config, DeckDraft, Difficulty, Store};

/// Build a store pre-populated with a few example decks
pub fn starter_store(config: Config) -> Store {
    let mut store = Store::new(config);

    let javascript = store.add_deck(DeckDraft {
        name: "JavaScript Fundamentals".into(),
        description: "Core concepts of JavaScript programming".into(),
        color_tag: "blue".into(),
    });
    let spanish = store.add_deck(DeckDraft {
        name: "Spanish Vocabulary".into(),
        description: "Essential Spanish words and phrases".into(),
        color_tag: "green".into(),
    });
    let patterns = store.add_deck(DeckDraft {
        name: "Design Patterns".into(),
        description: "Common software design patterns".into(),
        color_tag: "orange".into(),
    });

    let cards: [(uuid::Uuid, &str, &str, Difficulty, &[&str]); 6] = [
        (
            javascript,
            "What is a closure?",
            "A function that keeps access to its outer scope even after the \
             outer function has returned.",
            Difficulty::Medium,
            &["functions", "scope"],
        ),
        (
            javascript,
            "Explain hoisting.",
            "Declarations are moved to the top of their scope before code \
             execution.",
            Difficulty::Hard,
            &["scope", "variables"],
        ),
        (
            spanish,
            "\u{00bf}C\u{00f3}mo est\u{00e1}s?",
            "How are you?",
            Difficulty::Easy,
            &["greetings", "basic"],
        ),
        (
            spanish,
            "\u{00bf}D\u{00f3}nde est\u{00e1} la biblioteca?",
            "Where is the library?",
            Difficulty::Easy,
            &["questions", "locations"],
        ),
        (
            patterns,
            "Singleton Pattern",
            "Restricts a class to a single instance coordinating actions \
             across the system.",
            Difficulty::Medium,
            &["creational"],
        ),
        (
            patterns,
            "Observer Pattern",
            "Lets objects subscribe to and receive notifications about \
             events on another object.",
            Difficulty::Medium,
            &["behavioral"],
        ),
    ];

    for (deck_id, front, back, difficulty, tags) in cards {
        let draft = CardDraft {
            front: front.into(),
            back: back.into(),
            difficulty,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        };
        // The decks were just created, so the insert cannot fail
        if let Err(e) = store.add_flashcard(deck_id, draft) {
            tracing::warn!("Skipping starter card {:?}: {}", front, e);
        }
    }

    store
}
