use log::info;
use rocket::serde::json::Json;
use rocket::{get, post, State};

use crate::data::{in_transaction, DBConnection};
use crate::error::TrackerResult;
use crate::jobs::helpers::{get_jobs_from_db, save_jobs_to_db};

use super::data::*;
use super::helpers::*;

#[get("/get_categories")]
pub fn get_categories(db_connection: &State<DBConnection>) -> TrackerResult<Json<Vec<String>>> {
    let db_connection = db_connection.lock()?;

    Ok(Json(get_categories_from_db(&db_connection)?))
}

#[post("/add_category", format = "json", data = "<category_request>")]
pub fn add_category_endpoint(
    category_request: Json<CategoryRequest>,
    db_connection: &State<DBConnection>,
) -> TrackerResult<Json<Vec<String>>> {
    let db_connection = db_connection.lock()?;

    let mut categories = get_categories_from_db(&db_connection)?;
    let name = add_category(&mut categories, &category_request.name)?;
    save_categories_to_db(&categories, &db_connection)?;
    info!("Added category {:?}", name);

    Ok(Json(categories))
}

#[post("/rename_category", format = "json", data = "<rename_request>")]
pub fn rename_category_endpoint(
    rename_request: Json<RenameCategoryRequest>,
    db_connection: &State<DBConnection>,
) -> TrackerResult<Json<Vec<String>>> {
    let db_connection = db_connection.lock()?;

    let mut categories = get_categories_from_db(&db_connection)?;
    let mut jobs = get_jobs_from_db(&db_connection)?;

    let rewritten = rename_category(
        &mut categories,
        &mut jobs,
        &rename_request.old_name,
        &rename_request.new_name,
    )?;
    in_transaction(&db_connection, |tx| {
        save_categories_to_db(&categories, tx)?;
        save_jobs_to_db(&jobs, tx)
    })?;
    info!(
        "Renamed category {:?} to {:?}, rewrote {} jobs",
        rename_request.old_name, rename_request.new_name, rewritten
    );

    Ok(Json(categories))
}

#[post("/delete_category", format = "json", data = "<category_request>")]
pub fn delete_category_endpoint(
    category_request: Json<CategoryRequest>,
    db_connection: &State<DBConnection>,
) -> TrackerResult<Json<Vec<String>>> {
    let db_connection = db_connection.lock()?;

    let mut categories = get_categories_from_db(&db_connection)?;
    let mut jobs = get_jobs_from_db(&db_connection)?;

    let moved = delete_category(&mut categories, &mut jobs, &category_request.name)?;
    in_transaction(&db_connection, |tx| {
        save_categories_to_db(&categories, tx)?;
        save_jobs_to_db(&jobs, tx)
    })?;
    info!(
        "Deleted category {:?}, moved {} jobs to Uncategorized",
        category_request.name, moved
    );

    Ok(Json(categories))
}
