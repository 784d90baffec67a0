use itertools::{EitherOrBoth, Itertools};

use crate::error::SessionError;
use crate::key::Key;

/// Progress on a single target word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordProgress {
    target: String,
    typed: String,
}

impl WordProgress {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            typed: String::new(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    /// Suffix of the target not yet covered by typed input
    pub fn remaining_slice(&self) -> &str {
        let covered = self.typed.chars().count();
        match self.target.char_indices().nth(covered) {
            Some((byte_idx, _)) => &self.target[byte_idx..],
            None => "",
        }
    }

    /// One entry per typed character. Characters typed past the end of the
    /// target are always mismatches.
    pub fn per_character_correctness(&self) -> Vec<bool> {
        self.typed
            .chars()
            .zip_longest(self.target.chars())
            .filter_map(|pair| match pair {
                EitherOrBoth::Both(typed, expected) => Some(typed == expected),
                EitherOrBoth::Left(_) => Some(false),
                EitherOrBoth::Right(_) => None,
            })
            .collect()
    }

    pub fn is_correct(&self) -> bool {
        self.typed == self.target
    }
}

/// What a single key event did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Appended(char),
    Removed(char),
    Advanced,
    Retreated,
    Ignored,
}

/// Word list plus cursor, driven one key event at a time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    words: Vec<WordProgress>,
    cursor: usize,
}

impl SessionState {
    pub fn new<I, S>(words: I) -> Result<Self, SessionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<WordProgress> = words.into_iter().map(WordProgress::new).collect();
        if words.is_empty() {
            return Err(SessionError::InvalidInput);
        }

        tracing::debug!(words = words.len(), "session created");
        Ok(Self { words, cursor: 0 })
    }

    pub fn words(&self) -> &[WordProgress] {
        &self.words
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false, construction rejects empty word lists
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// `None` once the cursor has moved past the last word
    pub fn current_word(&self) -> Option<&WordProgress> {
        self.words.get(self.cursor)
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.words.len()
    }

    /// Only words already passed with space can be wrong.
    pub fn is_word_wrong(&self, index: usize) -> bool {
        index < self.cursor
            && self
                .words
                .get(index)
                .is_some_and(|word| !word.is_correct())
    }

    /// Apply one key event in place.
    pub fn step(&mut self, key: Key) -> Transition {
        let transition = match key {
            Key::Backspace => self.backspace(),
            Key::Space => {
                self.cursor += 1;
                Transition::Advanced
            }
            Key::Char(c) => match self.words.get_mut(self.cursor) {
                Some(word) => {
                    word.typed.push(c);
                    Transition::Appended(c)
                }
                None => Transition::Ignored,
            },
            Key::Other => Transition::Ignored,
        };

        tracing::trace!(%key, ?transition, cursor = self.cursor, "key applied");
        transition
    }

    /// Snapshot variant of [`SessionState::step`]; `self` is left untouched.
    pub fn apply(&self, key: Key) -> SessionState {
        let mut next = self.clone();
        next.step(key);
        next
    }

    /// Clear all typed input and return to the first word.
    pub fn restart(&mut self) {
        for word in &mut self.words {
            word.typed.clear();
        }
        self.cursor = 0;
        tracing::debug!("session restarted");
    }

    // Crossing back into the previous word only moves the cursor, the
    // previous word's input is left as typed.
    fn backspace(&mut self) -> Transition {
        let popped = self
            .words
            .get_mut(self.cursor)
            .and_then(|word| word.typed.pop());

        match popped {
            Some(c) => Transition::Removed(c),
            None if self.cursor > 0 => {
                self.cursor -= 1;
                Transition::Retreated
            }
            None => Transition::Ignored,
        }
    }
}
