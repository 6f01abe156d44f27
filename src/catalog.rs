use std::collections::HashMap;

use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use serde_json::from_str;

static MOVIES_DIR: Dir = include_dir!("src/movies");

/// Region/language tag a movie list is filed under
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum MovieCategory {
    Bollywood,
    Hollywood,
    Tollywood,
    Kollywood,
    British,
    French,
    Korean,
    Japanese,
}

impl MovieCategory {
    /// Display order used by the setup screen (and its 1..8 hotkeys)
    pub const ALL: [MovieCategory; 8] = [
        MovieCategory::Bollywood,
        MovieCategory::Hollywood,
        MovieCategory::Tollywood,
        MovieCategory::Kollywood,
        MovieCategory::British,
        MovieCategory::French,
        MovieCategory::Korean,
        MovieCategory::Japanese,
    ];

    /// Lowercase tag, also the stem of the bundled data file
    pub fn tag(&self) -> String {
        self.to_string().to_lowercase()
    }

    pub fn label(&self) -> String {
        self.to_string()
    }

    /// 1-based hotkey position on the setup screen
    pub fn from_hotkey(c: char) -> Option<Self> {
        let idx = c.to_digit(10)? as usize;
        idx.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

#[derive(Deserialize, Clone, Debug)]
struct MovieList {
    name: String,
    size: usize,
    titles: Vec<String>,
}

/// Category → ordered titles. Titles are not unique across categories.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    lists: HashMap<MovieCategory, Vec<String>>,
}

impl Catalog {
    /// Movie lists compiled into the binary. A list that fails to parse is
    /// left out, which surfaces later as an empty pool for that category.
    pub fn builtin() -> Self {
        let mut lists = HashMap::new();
        for category in MovieCategory::ALL {
            match read_movie_list(&category.tag()) {
                Ok(list) => {
                    lists.insert(category, list.titles);
                }
                Err(err) => {
                    tracing::warn!(category = %category, error = %err, "skipping movie list");
                }
            }
        }
        Self { lists }
    }

    pub fn from_entries<I, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (MovieCategory, Vec<T>)>,
        T: Into<String>,
    {
        let lists = entries
            .into_iter()
            .map(|(category, titles)| (category, titles.into_iter().map(Into::into).collect()))
            .collect();
        Self { lists }
    }

    pub fn titles(&self, category: MovieCategory) -> &[String] {
        self.lists.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Concatenation of the lists for `categories`, category order first and
    /// in-list order second. Duplicates are kept.
    pub fn titles_for(&self, categories: &[MovieCategory]) -> Vec<String> {
        categories
            .iter()
            .flat_map(|c| self.titles(*c).iter().cloned())
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
enum CatalogError {
    #[error("movie file {0} not found")]
    Missing(String),
    #[error("movie file {0} is not utf-8")]
    NotUtf8(String),
    #[error("unable to deserialize movie json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("movie file declares `{found}`, expected `{expected}`")]
    NameMismatch { expected: String, found: String },
    #[error("movie file {name} declares {declared} titles but lists {listed}")]
    SizeMismatch {
        name: String,
        declared: usize,
        listed: usize,
    },
}

fn read_movie_list(tag: &str) -> Result<MovieList, CatalogError> {
    let file_name = format!("{tag}.json");
    let file = MOVIES_DIR
        .get_file(&file_name)
        .ok_or_else(|| CatalogError::Missing(file_name.clone()))?;
    let contents = file
        .contents_utf8()
        .ok_or_else(|| CatalogError::NotUtf8(file_name.clone()))?;
    parse_movie_list(tag, contents)
}

fn parse_movie_list(tag: &str, contents: &str) -> Result<MovieList, CatalogError> {
    let list: MovieList = from_str(contents)?;
    if list.name != tag {
        return Err(CatalogError::NameMismatch {
            expected: tag.to_string(),
            found: list.name,
        });
    }
    if list.size != list.titles.len() {
        return Err(CatalogError::SizeMismatch {
            name: list.name,
            declared: list.size,
            listed: list.titles.len(),
        });
    }
    Ok(list)
}
