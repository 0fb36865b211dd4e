use log::info;
use rocket::serde::json::Json;
use rocket::{get, post, State};

use crate::data::{load_collection_or_default, save_collection, DBConnection, USER_KEY};
use crate::error::{TrackerError, TrackerResult};

use super::data::*;

#[get("/get_profile")]
pub fn get_profile(db_connection: &State<DBConnection>) -> TrackerResult<Json<UserProfile>> {
    let db_connection = db_connection.lock()?;

    let profile: UserProfile = load_collection_or_default(USER_KEY, &db_connection)?;

    Ok(Json(profile))
}

#[post("/set_profile", format = "json", data = "<profile>")]
pub fn set_profile(
    profile: Json<UserProfile>,
    db_connection: &State<DBConnection>,
) -> TrackerResult<Json<UserProfile>> {
    let mut profile = profile.into_inner();
    profile.name = profile.name.trim().to_string();
    if profile.name.is_empty() {
        return Err(TrackerError::invalid("Profile name cannot be empty"));
    }

    let db_connection = db_connection.lock()?;
    save_collection(USER_KEY, &profile, &db_connection)?;
    info!("Updated profile for {}", profile.name);

    Ok(Json(profile))
}
