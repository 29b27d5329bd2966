use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    store::NewWaitlistEntry,
    web::{
        data::{DeserRegistration, ValidRegistration},
        Error, WebResult,
    },
    AppState,
};

// ###################################
// ->   STRUCTS
// ###################################
#[derive(Serialize, Debug)]
pub struct RegistrationResponse {
    pub success: bool,
    pub message: String,
    pub data: RegistrationData,
}

#[derive(Serialize, Debug)]
pub struct RegistrationData {
    pub id: Uuid,
    pub name: String,
    pub position: u64,
}

// ###################################
// ->   API
// ###################################
/// The registration workflow, in fixed order:
/// validate -> dedup check -> insert -> count -> respond.
#[tracing::instrument(name = "Registering a new waitlist entry", skip(app_state, registration))]
pub async fn join_waitlist(
    State(app_state): State<AppState>,
    Json(registration): Json<DeserRegistration>,
) -> WebResult<(StatusCode, Json<RegistrationResponse>)> {
    // Spawn a blocking task to validate and normalize the submission.
    let registration: ValidRegistration =
        tokio::task::spawn_blocking(move || registration.try_into()).await??;

    let store = &app_state.store;

    // At most one entry per normalized email. This check and the insert
    // below are two separate round-trips: a concurrent submission of the
    // same email can slip in between unless the store itself carries a
    // uniqueness constraint.
    if store
        .find_by_email(registration.email.as_ref())
        .await?
        .is_some()
    {
        return Err(Error::AlreadyRegistered);
    }

    let entry = store
        .insert(&NewWaitlistEntry {
            name: registration.name.as_ref().to_owned(),
            email: registration.email.as_ref().to_owned(),
            created_at: Utc::now(),
        })
        .await?;
    info!("New waitlist entry saved.");

    // The entry is already persisted, a count failure must not fail the
    // request. Fall back to position 1.
    let position = match store.count_all().await {
        Ok(count) => count.max(1),
        Err(er) => {
            warn!(
                "{:<12} - count failed, defaulting position to 1: {er}",
                "join_waitlist"
            );
            1
        }
    };

    let resp = RegistrationResponse {
        success: true,
        message: "Successfully joined waitlist".to_string(),
        data: RegistrationData {
            id: entry.id,
            name: entry.name,
            position,
        },
    };

    Ok((StatusCode::CREATED, Json(resp)))
}
