//! Common helpers for end-to-end tests.

use std::collections::BTreeSet;
use std::io;
use std::sync::{Arc, Mutex};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{BTree, Command, CommandOutcome, TreeConfig};

/// Install a test-writer subscriber once per process; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "keytree=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

/// Shared buffer that a test `fmt` subscriber writes formatted events into.
#[derive(Clone, Default)]
pub struct CapturedEvents(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedEvents {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("capture lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CapturedEvents {
    /// Captured output, one trimmed entry per event line.
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().expect("capture lock");
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(|line| line.trim().to_string())
            .collect()
    }
}

/// Run `f` with a debug-level subscriber that records bare event messages.
pub fn capture_debug_events<F: FnOnce()>(f: F) -> Vec<String> {
    let captured = CapturedEvents::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .without_time()
        .with_level(false)
        .with_target(false)
        .finish();

    tracing::subscriber::with_default(subscriber, f);
    captured.lines()
}

/// Build a tree of minimum degree `degree` holding `words`.
pub fn build_tree(degree: usize, words: &[&str]) -> BTree {
    init_tracing();
    BTree::from_keys(degree, words.iter().copied()).expect("valid degree")
}

/// Build a verbose tree of minimum degree `degree` holding `words`.
pub fn build_verbose_tree(degree: usize, words: &[&str]) -> BTree {
    init_tracing();
    let config = TreeConfig::new(degree).with_verbose(true);
    let mut tree = BTree::with_config(config).expect("valid config");
    tree.extend(words.iter().map(|w| (*w).to_string()));
    tree
}

/// Parse and apply `lines` in order, checking invariants after each one.
pub fn replay(tree: &mut BTree, lines: &[&str]) -> Vec<CommandOutcome> {
    lines
        .iter()
        .map(|line| {
            let command: Command = line.parse().expect("well-formed command");
            let outcome = tree.apply(&command);
            assert_valid(tree);
            outcome
        })
        .collect()
}

/// Assert that `tree` satisfies every structural invariant.
pub fn assert_valid(tree: &BTree) {
    let violations = tree.check_invariants();
    assert!(
        violations.is_empty(),
        "invariant violations: {violations:?}\n{tree}"
    );
}

/// `words` sorted and deduplicated.
pub fn sorted(words: &[&str]) -> Vec<String> {
    words
        .iter()
        .map(|w| (*w).to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Apply `lines` to a set, producing the keys a tree must hold afterwards.
pub fn expected_after(words: &[&str], lines: &[&str]) -> Vec<String> {
    let mut model: BTreeSet<String> = words.iter().map(|w| (*w).to_string()).collect();
    for line in lines {
        match line.parse::<Command>().expect("well-formed command") {
            Command::Insert(key) => {
                model.insert(key);
            }
            Command::Delete(key) => {
                model.remove(&key);
            }
        }
    }
    model.into_iter().collect()
}

pub const ANIMALS: [&str; 26] = [
    "ant", "bat", "cat", "dog", "eel", "fox", "goat", "horse", "iguana", "jaguar", "koala",
    "lemur", "monkey", "newt", "owl", "penguin", "quail", "rabbit", "snake", "tiger", "umbrella",
    "vulture", "wolf", "xerus", "yak", "zebra",
];
