use log::info;
use rocket::serde::json::Json;
use rocket::{get, post, State};

use crate::config::TrackerConfig;
use crate::customers::helpers::get_customers_from_db;
use crate::data::DBConnection;
use crate::error::{TrackerError, TrackerResult};
use crate::todo::data::{StatusCycle, TodoItem};

use super::data::*;
use super::helpers::*;

#[get("/get_jobs?<category>")]
pub fn get_jobs(
    category: Option<&str>,
    db_connection: &State<DBConnection>,
) -> TrackerResult<Json<Vec<Job>>> {
    let db_connection = db_connection.lock()?;

    let jobs = get_jobs_from_db(&db_connection)?;

    match category {
        Some(category) => Ok(Json(
            filter_by_category(&jobs, category).into_iter().cloned().collect(),
        )),
        None => Ok(Json(jobs)),
    }
}

#[get("/get_job_groups?<field>")]
pub fn get_job_groups(
    field: Option<&str>,
    db_connection: &State<DBConnection>,
) -> TrackerResult<Json<Vec<DateGroup>>> {
    let db_connection = db_connection.lock()?;

    let jobs = get_jobs_from_db(&db_connection)?;

    let groups = match field.unwrap_or("both") {
        "start" => group_by_date(&jobs, DateField::Start),
        "deadline" => group_by_date(&jobs, DateField::Deadline),
        "both" => group_by_dates(&jobs, &[DateField::Start, DateField::Deadline]),
        other => {
            return Err(TrackerError::invalid(format!(
                "Unknown date field {:?}, expected start, deadline or both",
                other
            )))
        }
    };

    Ok(Json(groups))
}

#[get("/get_progress")]
pub fn get_progress(db_connection: &State<DBConnection>) -> TrackerResult<Json<ProgressResponse>> {
    let db_connection = db_connection.lock()?;

    let jobs = get_jobs_from_db(&db_connection)?;

    Ok(Json(progress_report(&jobs)))
}

#[get("/get_active_jobs")]
pub fn get_active_jobs(db_connection: &State<DBConnection>) -> TrackerResult<Json<Vec<Job>>> {
    let db_connection = db_connection.lock()?;

    let jobs = get_jobs_from_db(&db_connection)?;

    Ok(Json(active_jobs(&jobs).into_iter().cloned().collect()))
}

#[get("/get_activity")]
pub fn get_activity(
    db_connection: &State<DBConnection>,
) -> TrackerResult<Json<CompletionActivity>> {
    let db_connection = db_connection.lock()?;

    let jobs = get_jobs_from_db(&db_connection)?;

    Ok(Json(completion_activity(&jobs)))
}

#[post("/add_job", format = "json", data = "<new_job>")]
pub fn add_job_endpoint(
    new_job: Json<NewJob>,
    db_connection: &State<DBConnection>,
) -> TrackerResult<Json<Job>> {
    let db_connection = db_connection.lock()?;

    let mut jobs = get_jobs_from_db(&db_connection)?;
    let customers = get_customers_from_db(&db_connection)?;

    let job = add_job(&mut jobs, new_job.into_inner(), &customers)?;
    save_jobs_to_db(&jobs, &db_connection)?;
    info!("Added job {} ({})", job.id, job.title);

    Ok(Json(job))
}

#[post("/update_job", format = "json", data = "<job>")]
pub fn update_job_endpoint(
    job: Json<Job>,
    db_connection: &State<DBConnection>,
) -> TrackerResult<Json<Job>> {
    let db_connection = db_connection.lock()?;

    let mut jobs = get_jobs_from_db(&db_connection)?;
    let customers = get_customers_from_db(&db_connection)?;

    let job = update_job(&mut jobs, job.into_inner(), &customers)?;
    save_jobs_to_db(&jobs, &db_connection)?;
    info!("Updated job {}", job.id);

    Ok(Json(job))
}

#[post("/delete_job", format = "json", data = "<delete_job_request>")]
pub fn delete_job_endpoint(
    delete_job_request: Json<JobRequest>,
    db_connection: &State<DBConnection>,
) -> TrackerResult<()> {
    let db_connection = db_connection.lock()?;

    let mut jobs = get_jobs_from_db(&db_connection)?;
    delete_job(&mut jobs, &delete_job_request.job_id)?;
    save_jobs_to_db(&jobs, &db_connection)?;
    info!("Deleted job {}", delete_job_request.job_id);

    Ok(())
}

#[post("/toggle_todo", format = "json", data = "<toggle_request>")]
pub fn toggle_todo_endpoint(
    toggle_request: Json<TodoRequest>,
    config: &State<TrackerConfig>,
    db_connection: &State<DBConnection>,
) -> TrackerResult<Json<TodoItem>> {
    let cycle = StatusCycle::from(config.status_cycle);
    let db_connection = db_connection.lock()?;

    let mut jobs = get_jobs_from_db(&db_connection)?;
    let todo = toggle_todo(
        &mut jobs,
        &toggle_request.job_id,
        &toggle_request.todo_id,
        &cycle,
    )?;
    save_jobs_to_db(&jobs, &db_connection)?;

    Ok(Json(todo))
}

#[post("/add_todo", format = "json", data = "<add_todo_request>")]
pub fn add_todo(
    add_todo_request: Json<AddTodoRequest>,
    db_connection: &State<DBConnection>,
) -> TrackerResult<Json<TodoItem>> {
    let db_connection = db_connection.lock()?;

    let mut jobs = get_jobs_from_db(&db_connection)?;
    let todo = add_custom_todo(&mut jobs, &add_todo_request.job_id, &add_todo_request.title)?;
    save_jobs_to_db(&jobs, &db_connection)?;

    Ok(Json(todo))
}

#[post("/add_templated_todos", format = "json", data = "<templated_request>")]
pub fn add_templated_todos_endpoint(
    templated_request: Json<JobRequest>,
    config: &State<TrackerConfig>,
    db_connection: &State<DBConnection>,
) -> TrackerResult<Json<Job>> {
    let db_connection = db_connection.lock()?;

    let mut jobs = get_jobs_from_db(&db_connection)?;
    let job = add_templated_todos(&mut jobs, &templated_request.job_id, &config.todo_templates)?;
    save_jobs_to_db(&jobs, &db_connection)?;
    info!(
        "Added {} templated to-dos to job {}",
        config.todo_templates.len(),
        job.id
    );

    Ok(Json(job))
}

#[post("/remove_todo", format = "json", data = "<remove_request>")]
pub fn remove_todo_endpoint(
    remove_request: Json<TodoRequest>,
    db_connection: &State<DBConnection>,
) -> TrackerResult<()> {
    let db_connection = db_connection.lock()?;

    let mut jobs = get_jobs_from_db(&db_connection)?;
    remove_todo(&mut jobs, &remove_request.job_id, &remove_request.todo_id)?;
    save_jobs_to_db(&jobs, &db_connection)?;

    Ok(())
}
