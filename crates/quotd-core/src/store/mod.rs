//! Quote collection store
//!
//! `QuoteStore` owns the canonical in-memory collection and its durability.
//! The collection is persisted wholesale as a JSON snapshot under the
//! `"quotes"` key after every mutation the caller wants to survive a
//! restart; there is no incremental persistence.

use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rand::seq::SliceRandom;

use crate::db::{Database, KvStore, LibSqlKvStore};
use crate::error::Result;
use crate::export::{parse_import, ImportError};
use crate::models::{Quote, ValidationError};

/// Snapshot key for the serialized quote collection
pub const QUOTES_KEY: &str = "quotes";

/// Key for the last-chosen category filter
pub const SELECTED_CATEGORY_KEY: &str = "selectedCategory";

/// Sentinel filter value meaning "no category filter"
pub const ALL_CATEGORIES: &str = "all";

/// Built-in quotes used when no snapshot exists yet.
#[must_use]
pub fn seed_quotes() -> Vec<Quote> {
    vec![
        Quote {
            text: "The best way to predict the future is to invent it.".to_string(),
            category: "Inspiration".to_string(),
        },
        Quote {
            text: "Life is what happens when you’re busy making other plans.".to_string(),
            category: "Life".to_string(),
        },
        Quote {
            text: "Do what you can, with what you have, where you are.".to_string(),
            category: "Motivation".to_string(),
        },
    ]
}

/// Quotes matching the given category filter, in original order.
///
/// `"all"` returns the full collection; any other value matches the
/// `category` field exactly (case-sensitive). An empty result is not an
/// error.
#[must_use]
pub fn filter_by_category(quotes: &[Quote], category: &str) -> Vec<Quote> {
    if category == ALL_CATEGORIES {
        return quotes.to_vec();
    }
    quotes
        .iter()
        .filter(|quote| quote.category == category)
        .cloned()
        .collect()
}

/// Unique category labels in first-seen order.
///
/// The `"all"` sentinel is prepended by callers building a selection list,
/// not by this function.
#[must_use]
pub fn distinct_categories(quotes: &[Quote]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for quote in quotes {
        if !categories.contains(&quote.category) {
            categories.push(quote.category.clone());
        }
    }
    categories
}

/// Uniformly random quote from the slice, `None` when empty.
#[must_use]
pub fn random_quote(quotes: &[Quote]) -> Option<Quote> {
    quotes.choose(&mut rand::thread_rng()).cloned()
}

/// Owns the quote collection and its durability.
pub struct QuoteStore {
    db: Database,
    quotes: RwLock<Vec<Quote>>,
}

impl QuoteStore {
    /// Open the store backed by a database file, loading the persisted
    /// snapshot or falling back to the built-in seed.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Database::open(path).await?;
        let quotes = Self::load(&db).await?;
        Ok(Self {
            db,
            quotes: RwLock::new(quotes),
        })
    }

    /// Open an in-memory store (useful for testing)
    pub async fn open_in_memory() -> Result<Self> {
        let db = Database::open_in_memory().await?;
        let quotes = Self::load(&db).await?;
        Ok(Self {
            db,
            quotes: RwLock::new(quotes),
        })
    }

    /// Read the persisted snapshot; absence is a valid outcome and yields
    /// the seed set, never an error.
    async fn load(db: &Database) -> Result<Vec<Quote>> {
        let kv = LibSqlKvStore::new(db.connection());
        match kv.get(QUOTES_KEY).await? {
            Some(payload) => Ok(serde_json::from_str(&payload)?),
            None => Ok(seed_quotes()),
        }
    }

    /// Consistent copy of the current collection.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Quote> {
        self.read_quotes().clone()
    }

    /// Number of quotes currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read_quotes().len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read_quotes().is_empty()
    }

    /// Serialize the full collection back to the key-value layer,
    /// overwriting any prior snapshot.
    pub async fn save(&self) -> Result<()> {
        let payload = serde_json::to_string(&self.snapshot())?;
        let kv = LibSqlKvStore::new(self.db.connection());
        kv.set(QUOTES_KEY, &payload).await
    }

    /// Append a new quote built from user input.
    ///
    /// Fails when either field is empty after trimming, or when a quote with
    /// the same text already exists. Does not persist; call [`save`] after a
    /// successful add.
    ///
    /// [`save`]: QuoteStore::save
    pub fn add(&self, text: &str, category: &str) -> std::result::Result<Quote, ValidationError> {
        let quote = Quote::new(text, category)?;

        let mut quotes = self.write_quotes();
        if quotes.iter().any(|existing| existing.has_text(&quote.text)) {
            return Err(ValidationError::DuplicateText);
        }
        quotes.push(quote.clone());
        Ok(quote)
    }

    /// Discard the entire collection and substitute the given one, without
    /// de-duplication.
    pub fn replace_all(&self, quotes: Vec<Quote>) {
        *self.write_quotes() = quotes;
    }

    /// Import a JSON payload, appending its entries, and return how many
    /// were appended.
    ///
    /// Permissive mode appends every entry verbatim. Strict mode rejects
    /// entries with empty post-trim fields (nothing is applied) and silently
    /// drops entries whose text duplicates an existing quote or an earlier
    /// entry of the same batch. On any error the collection is untouched.
    pub fn import(&self, payload: &str, strict: bool) -> std::result::Result<usize, ImportError> {
        let imported = parse_import(payload)?;

        if strict {
            self.import_strict(imported)
        } else {
            let count = imported.len();
            self.write_quotes().extend(imported);
            Ok(count)
        }
    }

    fn import_strict(&self, imported: Vec<Quote>) -> std::result::Result<usize, ImportError> {
        let mut validated = Vec::with_capacity(imported.len());
        for (index, entry) in imported.into_iter().enumerate() {
            let quote = Quote::new(&entry.text, &entry.category)
                .map_err(|reason| ImportError::InvalidEntry { index, reason })?;
            validated.push(quote);
        }

        let mut quotes = self.write_quotes();
        let mut appended = 0;
        for quote in validated {
            let duplicate = quotes.iter().any(|existing| existing.has_text(&quote.text));
            if !duplicate {
                quotes.push(quote);
                appended += 1;
            }
        }
        Ok(appended)
    }

    /// Last-chosen category filter, defaulting to `"all"`.
    pub async fn selected_category(&self) -> Result<String> {
        let kv = LibSqlKvStore::new(self.db.connection());
        Ok(kv
            .get(SELECTED_CATEGORY_KEY)
            .await?
            .unwrap_or_else(|| ALL_CATEGORIES.to_string()))
    }

    /// Persist the chosen category filter.
    pub async fn set_selected_category(&self, category: &str) -> Result<()> {
        let kv = LibSqlKvStore::new(self.db.connection());
        kv.set(SELECTED_CATEGORY_KEY, category).await
    }

    fn read_quotes(&self) -> RwLockReadGuard<'_, Vec<Quote>> {
        self.quotes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_quotes(&self) -> RwLockWriteGuard<'_, Vec<Quote>> {
        self.quotes.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn quote(text: &str, category: &str) -> Quote {
        Quote {
            text: text.to_string(),
            category: category.to_string(),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_open_without_snapshot_uses_seed() {
        let store = QuoteStore::open_in_memory().await.unwrap();
        assert_eq!(store.snapshot(), seed_quotes());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_add_appends_one_quote_per_call() {
        let store = QuoteStore::open_in_memory().await.unwrap();
        let before = store.len();

        let added = store.add("Do or do not", "Yoda").unwrap();
        assert_eq!(added.text, "Do or do not");
        assert_eq!(store.len(), before + 1);

        store.add("There is no try", "Yoda").unwrap();
        assert_eq!(store.len(), before + 2);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_add_rejects_empty_fields_and_leaves_collection_unchanged() {
        let store = QuoteStore::open_in_memory().await.unwrap();
        let before = store.snapshot();

        assert_eq!(store.add("   ", "Yoda"), Err(ValidationError::EmptyText));
        assert_eq!(
            store.add("Do or do not", "  "),
            Err(ValidationError::EmptyCategory)
        );
        assert_eq!(store.snapshot(), before);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_add_rejects_duplicate_text() {
        let store = QuoteStore::open_in_memory().await.unwrap();
        store.add("Do or do not", "Yoda").unwrap();

        assert_eq!(
            store.add("Do or do not", "Star Wars"),
            Err(ValidationError::DuplicateText)
        );
        assert_eq!(
            store
                .snapshot()
                .iter()
                .filter(|quote| quote.text == "Do or do not")
                .count(),
            1
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_save_then_load_round_trips_collection() {
        let tmp = tempdir().unwrap();
        let db_path = tmp.path().join("quotd.db");

        let expected = {
            let store = QuoteStore::open(&db_path).await.unwrap();
            store.add("Do or do not", "Yoda").unwrap();
            store.save().await.unwrap();
            store.snapshot()
        };

        let reopened = QuoteStore::open(&db_path).await.unwrap();
        assert_eq!(reopened.snapshot(), expected);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_replace_all_substitutes_collection_verbatim() {
        let store = QuoteStore::open_in_memory().await.unwrap();

        // Duplicates are allowed through replace_all
        let replacement = vec![quote("X", "A"), quote("X", "B")];
        store.replace_all(replacement.clone());

        assert_eq!(store.snapshot(), replacement);
    }

    #[test]
    fn test_filter_all_returns_everything_in_order() {
        let quotes = vec![quote("a", "One"), quote("b", "Two"), quote("c", "One")];
        assert_eq!(filter_by_category(&quotes, ALL_CATEGORIES), quotes);
    }

    #[test]
    fn test_filter_matches_exactly_and_case_sensitively() {
        let quotes = vec![quote("a", "Life"), quote("b", "life"), quote("c", "Life")];

        let filtered = filter_by_category(&quotes, "Life");
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|q| q.category == "Life"));

        assert!(filter_by_category(&quotes, "Nope").is_empty());
    }

    #[test]
    fn test_distinct_categories_first_seen_order() {
        let quotes = vec![
            quote("a", "Life"),
            quote("b", "Motivation"),
            quote("c", "Life"),
            quote("d", "Inspiration"),
        ];
        assert_eq!(
            distinct_categories(&quotes),
            vec!["Life", "Motivation", "Inspiration"]
        );
    }

    #[test]
    fn test_random_quote_on_empty_slice_is_none() {
        assert_eq!(random_quote(&[]), None);
    }

    #[test]
    fn test_random_quote_comes_from_the_slice() {
        let quotes = vec![quote("a", "One"), quote("b", "Two")];
        for _ in 0..16 {
            let picked = random_quote(&quotes).unwrap();
            assert!(quotes.contains(&picked));
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_permissive_import_retains_text_duplicates() {
        let store = QuoteStore::open_in_memory().await.unwrap();
        store.replace_all(vec![quote("X", "Z")]);

        let appended = store
            .import(r#"[{"text":"X","category":"Y"}]"#, false)
            .unwrap();
        assert_eq!(appended, 1);

        let with_x = store
            .snapshot()
            .iter()
            .filter(|q| q.text == "X")
            .count();
        assert_eq!(with_x, 2);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_import_malformed_leaves_collection_untouched() {
        let store = QuoteStore::open_in_memory().await.unwrap();
        let before = store.snapshot();

        let error = store.import("{not json", false).unwrap_err();
        assert!(matches!(error, ImportError::Malformed(_)));
        assert_eq!(store.snapshot(), before);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_strict_import_rejects_invalid_entry_without_applying() {
        let store = QuoteStore::open_in_memory().await.unwrap();
        let before = store.snapshot();

        let payload = r#"[{"text":"ok","category":"A"},{"text":"  ","category":"B"}]"#;
        let error = store.import(payload, true).unwrap_err();
        assert!(matches!(
            error,
            ImportError::InvalidEntry {
                index: 1,
                reason: ValidationError::EmptyText
            }
        ));
        assert_eq!(store.snapshot(), before);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_strict_import_drops_duplicates() {
        let store = QuoteStore::open_in_memory().await.unwrap();
        store.replace_all(vec![quote("X", "Z")]);

        let payload =
            r#"[{"text":"X","category":"Y"},{"text":"new","category":"Y"},{"text":"new","category":"Y"}]"#;
        let appended = store.import(payload, true).unwrap();
        assert_eq!(appended, 1);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_selected_category_defaults_to_all_and_persists() {
        let tmp = tempdir().unwrap();
        let db_path = tmp.path().join("quotd.db");

        {
            let store = QuoteStore::open(&db_path).await.unwrap();
            assert_eq!(store.selected_category().await.unwrap(), ALL_CATEGORIES);
            store.set_selected_category("Life").await.unwrap();
        }

        let reopened = QuoteStore::open(&db_path).await.unwrap();
        assert_eq!(reopened.selected_category().await.unwrap(), "Life");
    }
}
