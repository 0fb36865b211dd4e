use chrono::{NaiveDate, NaiveTime, Timelike};
use rusqlite::Connection;
use uuid::Uuid;

use std::collections::BTreeMap;

use crate::customers::data::Customer;
use crate::customers::helpers::find_customer;
use crate::data::{load_collection_or_default, save_collection, JOBS_KEY};
use crate::error::{TrackerError, TrackerResult};
use crate::todo::data::{Progress, StatusCycle, TodoItem, TodoStatus};
use crate::todo::util::{new_todo, progress, toggle};

use super::data::*;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";
const MIDNIGHT: &str = "00:00";

pub const ALL_CATEGORIES: &str = "All";

pub fn get_jobs_from_db(db_connection: &Connection) -> TrackerResult<Vec<Job>> {
    load_collection_or_default(JOBS_KEY, db_connection)
}

pub fn save_jobs_to_db(jobs: &[Job], db_connection: &Connection) -> TrackerResult<()> {
    save_collection(JOBS_KEY, jobs, db_connection)
}

fn canonical_date(field: &str, value: Option<String>) -> TrackerResult<Option<String>> {
    value
        .map(|v| match NaiveDate::parse_from_str(&v, DATE_FORMAT) {
            Ok(date) => Ok(date.format(DATE_FORMAT).to_string()),
            Err(_) => Err(TrackerError::invalid(format!(
                "{} must be YYYY-MM-DD, got {:?}",
                field, v
            ))),
        })
        .transpose()
}

fn canonical_time(field: &str, value: Option<String>) -> TrackerResult<Option<String>> {
    value
        .map(|v| match NaiveTime::parse_from_str(&v, TIME_FORMAT) {
            Ok(time) => Ok(time.format(TIME_FORMAT).to_string()),
            Err(_) => Err(TrackerError::invalid(format!(
                "{} must be HH:MM, got {:?}",
                field, v
            ))),
        })
        .transpose()
}

/// Checks the caller-facing fields of a job and fills in the category fallback.
/// Dates and times are stored zero-padded so they sort as strings. An end time
/// before the start time is accepted.
fn normalize_job(mut job: Job, customers: &[Customer]) -> TrackerResult<Job> {
    job.title = job.title.trim().to_string();
    if job.title.is_empty() {
        return Err(TrackerError::invalid("Job title cannot be empty"));
    }

    job.start_date = canonical_date("startDate", job.start_date)?;
    job.deadline_date = canonical_date("deadlineDate", job.deadline_date)?;
    job.start_time = canonical_time("startTime", job.start_time)?;
    job.end_time = canonical_time("endTime", job.end_time)?;

    job.category = job.category.trim().to_string();
    if job.category.is_empty() {
        job.category = default_category();
    }

    if let Some(customer_id) = &job.customer_id {
        if find_customer(customers, customer_id).is_none() {
            return Err(TrackerError::invalid(format!(
                "Unknown customer {}",
                customer_id
            )));
        }
    }

    Ok(job)
}

pub fn find_job_mut<'a>(jobs: &'a mut [Job], job_id: &str) -> TrackerResult<&'a mut Job> {
    jobs.iter_mut()
        .find(|j| j.id == job_id)
        .ok_or_else(|| TrackerError::not_found(format!("job {}", job_id)))
}

pub fn add_job(jobs: &mut Vec<Job>, new_job: NewJob, customers: &[Customer]) -> TrackerResult<Job> {
    let job = normalize_job(
        Job {
            id: Uuid::new_v4().to_string(),
            title: new_job.title,
            description: new_job.description,
            todos: vec![],
            start_date: new_job.start_date,
            deadline_date: new_job.deadline_date,
            start_time: new_job.start_time,
            end_time: new_job.end_time,
            category: new_job.category.unwrap_or_else(default_category),
            customer_id: new_job.customer_id,
            templated_todos_added: false,
            notes: new_job.notes,
        },
        customers,
    )?;

    jobs.push(job.clone());

    Ok(job)
}

/// Replaces the editable fields of a stored job. Todos and the templated flag
/// only change through the todo operations, so the stored ones are kept.
pub fn update_job(jobs: &mut [Job], updated: Job, customers: &[Customer]) -> TrackerResult<Job> {
    let updated = normalize_job(updated, customers)?;
    let job = find_job_mut(jobs, &updated.id)?;

    *job = Job {
        todos: std::mem::take(&mut job.todos),
        templated_todos_added: job.templated_todos_added,
        ..updated
    };

    Ok(job.clone())
}

pub fn delete_job(jobs: &mut Vec<Job>, job_id: &str) -> TrackerResult<()> {
    let before = jobs.len();
    jobs.retain(|j| j.id != job_id);

    if jobs.len() == before {
        return Err(TrackerError::not_found(format!("job {}", job_id)));
    }

    Ok(())
}

/// Replaces the todo with its toggled copy and returns that copy.
pub fn toggle_todo(
    jobs: &mut [Job],
    job_id: &str,
    todo_id: &str,
    cycle: &StatusCycle,
) -> TrackerResult<TodoItem> {
    let job = find_job_mut(jobs, job_id)?;
    let todo = job
        .todos
        .iter_mut()
        .find(|t| t.id == todo_id)
        .ok_or_else(|| TrackerError::not_found(format!("todo {} in job {}", todo_id, job_id)))?;

    *todo = toggle(todo, cycle);

    Ok(todo.clone())
}

pub fn add_custom_todo(jobs: &mut [Job], job_id: &str, title: &str) -> TrackerResult<TodoItem> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TrackerError::invalid("To-do title cannot be empty"));
    }

    let job = find_job_mut(jobs, job_id)?;
    let todo = new_todo(title);
    job.todos.push(todo.clone());

    Ok(todo)
}

pub fn add_templated_todos(
    jobs: &mut [Job],
    job_id: &str,
    templates: &[String],
) -> TrackerResult<Job> {
    let job = find_job_mut(jobs, job_id)?;
    if job.templated_todos_added {
        return Err(TrackerError::invalid(format!(
            "Templated to-dos were already added to job {}",
            job_id
        )));
    }

    job.todos
        .extend(templates.iter().map(|title| new_todo(title)));
    job.templated_todos_added = true;

    Ok(job.clone())
}

pub fn remove_todo(jobs: &mut [Job], job_id: &str, todo_id: &str) -> TrackerResult<()> {
    let job = find_job_mut(jobs, job_id)?;
    let before = job.todos.len();
    job.todos.retain(|t| t.id != todo_id);

    if job.todos.len() == before {
        return Err(TrackerError::not_found(format!(
            "todo {} in job {}",
            todo_id, job_id
        )));
    }

    Ok(())
}

pub fn filter_by_category<'a>(jobs: &'a [Job], category: &str) -> Vec<&'a Job> {
    jobs.iter()
        .filter(|j| category == ALL_CATEGORIES || j.category == category)
        .collect()
}

/// Jobs that still have countable work left.
pub fn active_jobs(jobs: &[Job]) -> Vec<&Job> {
    jobs.iter()
        .filter(|j| progress(&j.todos).percent < 100)
        .collect()
}

pub fn overall_progress(jobs: &[Job]) -> Progress {
    progress(jobs.iter().flat_map(|j| j.todos.iter()))
}

pub fn progress_report(jobs: &[Job]) -> ProgressResponse {
    ProgressResponse {
        overall: overall_progress(jobs),
        jobs: jobs
            .iter()
            .map(|j| JobProgress {
                job_id: j.id.clone(),
                progress: progress(&j.todos),
            })
            .collect(),
    }
}

/// Buckets jobs under every distinct date the selectors pick out, dates ascending.
///
/// Within a bucket jobs are ordered by start time, a missing time counting as
/// midnight; equal times keep their input order.
pub fn group_by_dates(jobs: &[Job], fields: &[DateField]) -> Vec<DateGroup> {
    let mut buckets: BTreeMap<&str, Vec<&Job>> = BTreeMap::new();

    for job in jobs {
        let mut dates: Vec<&str> = vec![];
        for date in fields.iter().filter_map(|f| f.select(job)) {
            if !dates.contains(&date) {
                dates.push(date);
            }
        }

        for date in dates {
            buckets.entry(date).or_default().push(job);
        }
    }

    buckets
        .into_iter()
        .map(|(date, mut jobs)| {
            jobs.sort_by(|a, b| {
                let a = a.start_time.as_deref().unwrap_or(MIDNIGHT);
                let b = b.start_time.as_deref().unwrap_or(MIDNIGHT);
                a.cmp(b)
            });

            DateGroup {
                date: date.to_string(),
                jobs: jobs.into_iter().cloned().collect(),
            }
        })
        .collect()
}

pub fn group_by_date(jobs: &[Job], field: DateField) -> Vec<DateGroup> {
    group_by_dates(jobs, &[field])
}

pub fn completion_activity(jobs: &[Job]) -> CompletionActivity {
    let mut activity = CompletionActivity::default();

    let completed = jobs
        .iter()
        .flat_map(|j| j.todos.iter())
        .filter(|t| t.status == TodoStatus::Checked)
        .filter_map(|t| t.completed_at);

    for completed_at in completed {
        *activity
            .daily
            .entry(completed_at.format(DATE_FORMAT).to_string())
            .or_insert(0) += 1;
        *activity
            .hourly
            .entry(format!("{:02}", completed_at.hour()))
            .or_insert(0) += 1;
    }

    activity
}
