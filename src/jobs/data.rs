use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;

use crate::customers::data::CustomerID;
use crate::todo::data::{Progress, TodoID, TodoItem};

pub type JobID = String;

pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobID,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub todos: Vec<TodoItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerID>,
    #[serde(default)]
    pub templated_todos_added: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

pub fn default_category() -> String {
    UNCATEGORIZED.to_string()
}

/// Which scheduling field a job is filed under.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DateField {
    Start,
    Deadline,
}

impl DateField {
    pub fn select(self, job: &Job) -> Option<&str> {
        match self {
            DateField::Start => job.start_date.as_deref(),
            DateField::Deadline => job.deadline_date.as_deref(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DateGroup {
    pub date: String,
    pub jobs: Vec<Job>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JobProgress {
    pub job_id: JobID,
    pub progress: Progress,
}

#[derive(Serialize, Debug)]
pub struct ProgressResponse {
    pub overall: Progress,
    pub jobs: Vec<JobProgress>,
}

/// Checked todos counted by the day and by the hour they were completed.
#[derive(Serialize, Debug, Default, PartialEq)]
pub struct CompletionActivity {
    pub daily: BTreeMap<String, usize>,
    pub hourly: BTreeMap<String, usize>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date: Option<String>,
    pub deadline_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub category: Option<String>,
    pub customer_id: Option<CustomerID>,
    pub notes: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    pub job_id: JobID,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TodoRequest {
    pub job_id: JobID,
    pub todo_id: TodoID,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddTodoRequest {
    pub job_id: JobID,
    pub title: String,
}
