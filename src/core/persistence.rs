//! Persistence - JSON user data file
//!
//! The whole store is one document:
//! ```json
//! {
//!   "propositions": [{"id": 1, "text": "..."}],
//!   "questions": [{"id": 1, "text": "...", "answer": null}]
//! }
//! ```
//! Loaded once at startup, rewritten in full on exit.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::entity::{EntityKind, Proposition, Question};
use super::store::Store;
use crate::error::ScholasticError;

/// Default data file name, relative to the working directory
pub const DATA_FILE_NAME: &str = "user_data.json";

/// On-disk document, borrowed from a [`Store`] for writing
#[derive(Debug, Serialize)]
struct UserData<'a> {
    propositions: &'a [Proposition],
    questions: &'a [Question],
}

/// Load a store from `path`
///
/// # Errors
/// - [`ScholasticError::Io`] if the file is missing or unreadable
/// - [`ScholasticError::Schema`] if it is not a JSON object with array
///   `propositions` and `questions` keys
/// - [`ScholasticError::MalformedRecord`] if a record lacks `id` or `text`
pub fn load(path: &Path) -> Result<Store, ScholasticError> {
    let content = std::fs::read_to_string(path).map_err(|e| ScholasticError::io(path, e))?;
    let document: Value = serde_json::from_str(&content)
        .map_err(|e| ScholasticError::schema(path, format!("invalid JSON: {}", e)))?;

    let mut store = Store::new();
    for proposition in records::<Proposition>(path, &document, EntityKind::Proposition)? {
        store.restore_proposition(proposition);
    }
    for question in records::<Question>(path, &document, EntityKind::Question)? {
        store.restore_question(question);
    }

    tracing::info!(
        path = %path.display(),
        propositions = store.propositions().len(),
        questions = store.questions().len(),
        "loaded user data"
    );

    Ok(store)
}

/// Write the whole store to `path`, replacing any previous content
///
/// The document is fully rendered before the file is opened.
pub fn save(path: &Path, store: &Store) -> Result<(), ScholasticError> {
    let document = UserData {
        propositions: store.propositions(),
        questions: store.questions(),
    };
    let content = serde_json::to_string_pretty(&document)
        .map_err(|e| ScholasticError::schema(path, e.to_string()))?;

    write(path, &content)?;

    tracing::info!(
        path = %path.display(),
        propositions = document.propositions.len(),
        questions = document.questions.len(),
        "saved user data"
    );

    Ok(())
}

/// Create an empty data file
pub fn init(path: &Path) -> Result<(), ScholasticError> {
    save(path, &Store::new())
}

fn write(path: &Path, content: &str) -> Result<(), ScholasticError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ScholasticError::io(parent, e))?;
        }
    }
    std::fs::write(path, content).map_err(|e| ScholasticError::io(path, e))
}

/// Decode the record array stored under `kind`'s top-level key
fn records<T: DeserializeOwned>(
    path: &Path,
    document: &Value,
    kind: EntityKind,
) -> Result<Vec<T>, ScholasticError> {
    let key = kind.plural();
    let object = document
        .as_object()
        .ok_or_else(|| ScholasticError::schema(path, "top-level value must be an object"))?;
    let items = object
        .get(key)
        .ok_or_else(|| ScholasticError::schema(path, format!("missing key `{}`", key)))?
        .as_array()
        .ok_or_else(|| ScholasticError::schema(path, format!("`{}` must be an array", key)))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            T::deserialize(item).map_err(|e| ScholasticError::MalformedRecord {
                kind,
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::TempDir;

    fn write_fixture(dir: &TempDir, content: &str) -> Result<std::path::PathBuf> {
        let path = dir.path().join(DATA_FILE_NAME);
        std::fs::write(&path, content)?;
        Ok(path)
    }

    #[test]
    fn test_load_empty_document() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_fixture(&dir, r#"{"propositions":[],"questions":[]}"#)?;

        let store = load(&path)?;
        assert!(store.propositions().is_empty());
        assert!(store.questions().is_empty());
        Ok(())
    }

    #[test]
    fn test_load_advances_counters() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_fixture(
            &dir,
            r#"{"propositions":[{"id":5,"text":"x"}],"questions":[{"id":3,"text":"q"}]}"#,
        )?;

        let mut store = load(&path)?;
        assert_eq!(store.create_proposition("y").unwrap().id, 6);
        assert_eq!(store.create_question("r").unwrap().id, 4);
        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ScholasticError::Io { .. }));
    }

    #[test]
    fn test_load_missing_top_level_key() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_fixture(&dir, r#"{"propositions":[]}"#)?;

        let err = load(&path).unwrap_err();
        assert!(matches!(err, ScholasticError::Schema { .. }));
        assert!(err.to_string().contains("missing key `questions`"));
        Ok(())
    }

    #[test]
    fn test_load_invalid_json() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_fixture(&dir, "not json")?;

        assert!(matches!(load(&path), Err(ScholasticError::Schema { .. })));
        Ok(())
    }

    #[test]
    fn test_load_record_without_text() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_fixture(
            &dir,
            r#"{"propositions":[{"id":1,"text":"ok"},{"id":2}],"questions":[]}"#,
        )?;

        match load(&path) {
            Err(ScholasticError::MalformedRecord { kind, index, .. }) => {
                assert_eq!(kind, EntityKind::Proposition);
                assert_eq!(index, 1);
            }
            other => panic!("expected malformed record, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_load_question_without_id() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_fixture(&dir, r#"{"propositions":[],"questions":[{"text":"q"}]}"#)?;

        assert!(matches!(
            load(&path),
            Err(ScholasticError::MalformedRecord {
                kind: EntityKind::Question,
                index: 0,
                ..
            })
        ));
        Ok(())
    }

    #[test]
    fn test_save_then_reload() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join(DATA_FILE_NAME);

        let mut store = Store::new();
        store.create_proposition("The sky is blue").unwrap();
        store.restore_proposition(Proposition::new(9, "Water is wet"));
        store.create_question("What is truth?").unwrap();
        store.restore_question(Question::new(4, "Is it?").with_answer("Yes"));

        save(&path, &store)?;
        let reloaded = load(&path)?;

        assert_eq!(reloaded.propositions(), store.propositions());
        assert_eq!(reloaded.questions(), store.questions());
        Ok(())
    }

    #[test]
    fn test_load_then_save_preserves_content() -> Result<()> {
        let dir = TempDir::new()?;
        let original = serde_json::json!({
            "questions": [{"text": "q", "id": 2, "answer": "a"}, {"id": 1, "text": "r", "answer": null}],
            "propositions": [{"text": "p", "id": 7}]
        });
        let path = write_fixture(&dir, &original.to_string())?;

        save(&path, &load(&path)?)?;

        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(written, original);
        Ok(())
    }

    #[test]
    fn test_init_creates_parent_dirs() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join(DATA_FILE_NAME);

        init(&path)?;

        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(written, serde_json::json!({"propositions": [], "questions": []}));
        Ok(())
    }
}
