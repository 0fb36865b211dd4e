use rusqlite::Connection;

use crate::data::{load_collection, save_collection, CATEGORIES_KEY};
use crate::error::{TrackerError, TrackerResult};
use crate::jobs::data::{Job, UNCATEGORIZED};

pub const OTHER: &str = "Other";

/// Categories that always exist and can be neither renamed nor deleted.
pub const BUILT_IN_CATEGORIES: [&str; 2] = [OTHER, UNCATEGORIZED];

pub const DEFAULT_CATEGORIES: [&str; 5] = [
    "Food Photography",
    "Corporate Portraits",
    "Commercial Photography",
    "Weddings",
    "Product Photography",
];

fn is_built_in(name: &str) -> bool {
    BUILT_IN_CATEGORIES.contains(&name)
}

/// Appends the built-in categories to `saved`, dropping duplicates.
pub fn with_built_ins(saved: Vec<String>) -> Vec<String> {
    let mut categories: Vec<String> = vec![];

    for name in saved
        .into_iter()
        .chain(BUILT_IN_CATEGORIES.iter().map(|c| c.to_string()))
    {
        if !categories.contains(&name) {
            categories.push(name);
        }
    }

    categories
}

pub fn get_categories_from_db(db_connection: &Connection) -> TrackerResult<Vec<String>> {
    let saved: Vec<String> = load_collection(CATEGORIES_KEY, db_connection)?
        .unwrap_or_else(|| DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect());

    Ok(with_built_ins(saved))
}

// Built-ins are re-added on load, so they are never persisted.
pub fn save_categories_to_db(categories: &[String], db_connection: &Connection) -> TrackerResult<()> {
    let to_save: Vec<&String> = categories.iter().filter(|c| !is_built_in(c)).collect();

    save_collection(CATEGORIES_KEY, &to_save, db_connection)
}

fn validated_new_name(categories: &[String], name: &str) -> TrackerResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(TrackerError::invalid("Category name cannot be empty"));
    }
    if categories.iter().any(|c| c == name) {
        return Err(TrackerError::invalid(format!(
            "Category {:?} already exists",
            name
        )));
    }

    Ok(name.to_string())
}

fn manageable<'a>(categories: &[String], name: &'a str) -> TrackerResult<&'a str> {
    if is_built_in(name) {
        return Err(TrackerError::invalid(format!(
            "Category {:?} is built in",
            name
        )));
    }
    if !categories.iter().any(|c| c == name) {
        return Err(TrackerError::not_found(format!("category {:?}", name)));
    }

    Ok(name)
}

pub fn add_category(categories: &mut Vec<String>, name: &str) -> TrackerResult<String> {
    let name = validated_new_name(categories, name)?;
    categories.push(name.clone());

    Ok(name)
}

/// Renames the category and rewrites every job filed under the old name.
/// Returns how many jobs were rewritten.
pub fn rename_category(
    categories: &mut [String],
    jobs: &mut [Job],
    old_name: &str,
    new_name: &str,
) -> TrackerResult<usize> {
    let old_name = manageable(categories, old_name)?;
    let new_name = validated_new_name(categories, new_name)?;

    for category in categories.iter_mut().filter(|c| c.as_str() == old_name) {
        *category = new_name.clone();
    }

    Ok(recategorize(jobs, old_name, &new_name))
}

/// Removes the category and moves its jobs to "Uncategorized".
/// Returns how many jobs were moved.
pub fn delete_category(
    categories: &mut Vec<String>,
    jobs: &mut [Job],
    name: &str,
) -> TrackerResult<usize> {
    let name = manageable(categories, name)?;
    categories.retain(|c| c != name);

    Ok(recategorize(jobs, name, UNCATEGORIZED))
}

fn recategorize(jobs: &mut [Job], from: &str, to: &str) -> usize {
    let mut count = 0;

    for job in jobs.iter_mut().filter(|j| j.category == from) {
        job.category = to.to_string();
        count += 1;
    }

    count
}
