use crate::meals::MealBook;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct BookLocation {
    pub path: PathBuf,
}

impl BookLocation {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        BookLocation { path: path.into() }
    }
}

/// Loads the meal book, or an empty one when the file does not exist yet.
pub fn load_book(location: &BookLocation) -> Result<MealBook> {
    if !location.path.exists() {
        tracing::info!(path = %location.path.display(), "no meal plan file yet; starting empty");
        return Ok(MealBook::default());
    }
    let data = fs::read_to_string(&location.path)
        .with_context(|| format!("reading {:?}", location.path))?;
    if data.trim().is_empty() {
        return Ok(MealBook::default());
    }
    let book: MealBook = serde_yaml::from_str(&data).context("parsing meal plan file")?;
    tracing::info!(
        path = %location.path.display(),
        days = book.plans.len(),
        "loaded meal plans"
    );
    Ok(book)
}

pub fn save_book(location: &BookLocation, book: &MealBook) -> Result<()> {
    ensure_parent(&location.path)?;
    let serialized = serde_yaml::to_string(book).context("serializing meal plans")?;
    fs::write(&location.path, serialized)
        .with_context(|| format!("writing {:?}", location.path))?;
    tracing::debug!(path = %location.path.display(), "saved meal plans");
    Ok(())
}

pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meals::MealSlot;
    use chrono::NaiveDate;

    #[test]
    fn missing_file_loads_empty_book() {
        let dir = tempfile::tempdir().expect("tempdir");
        let location = BookLocation::new(dir.path().join("meals.yml"));
        let book = load_book(&location).expect("load");
        assert!(book.plans.is_empty());
        assert!(!location.path.exists());
    }

    #[test]
    fn saved_plans_load_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let location = BookLocation::new(dir.path().join("nested/dir/meals.yml"));
        let day = NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date");
        let mut book = MealBook::default();
        book.assign(day, MealSlot::Dinner, "Mapo Tofu").expect("recipe given");

        save_book(&location, &book).expect("save");
        let text = fs::read_to_string(&location.path).expect("read back");
        assert!(text.contains("2026-10-17"));
        assert!(text.contains("dinner: Mapo Tofu"));
        assert_eq!(load_book(&location).expect("load"), book);
    }

    #[test]
    fn corrupt_file_reports_context() {
        let dir = tempfile::tempdir().expect("tempdir");
        let location = BookLocation::new(dir.path().join("meals.yml"));
        fs::write(&location.path, "plans: [not, a, map]\n").expect("write");
        let err = load_book(&location).expect_err("must fail");
        assert!(format!("{err:#}").contains("parsing meal plan file"));
    }
}
