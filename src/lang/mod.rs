use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::error::LanguageError;

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

/// An embedded practice word list
#[derive(Deserialize, Clone, Debug)]
pub struct Language {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Language {
    pub fn load(name: &str) -> Result<Self, LanguageError> {
        let file_name = format!("{}.json", name);
        let file = LANG_DIR
            .get_file(&file_name)
            .ok_or_else(|| LanguageError::NotFound(name.to_string()))?;

        let contents = file
            .contents_utf8()
            .ok_or_else(|| LanguageError::NotUtf8(name.to_string()))?;

        let lang: Language = serde_json::from_str(contents)?;
        tracing::debug!(name = %lang.name, words = lang.words.len(), "word list loaded");
        Ok(lang)
    }

    /// The first `num` words in list order
    pub fn first(&self, num: usize) -> Vec<String> {
        self.words.iter().take(num).cloned().collect()
    }

    pub fn random(&self, num: usize) -> Vec<String> {
        let mut rng = rand::thread_rng();
        self.words.choose_multiple(&mut rng, num).cloned().collect()
    }
}
