//! Handlers for the `/classes` resource: catalog, detail, creation, and
//! photo upload.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thetable_core::classes::{
    seats_remaining, validate_address, validate_category, validate_class_date,
    validate_description, validate_duration, validate_title, DEFAULT_COST_CREDITS,
    DEFAULT_MAX_PARTICIPANTS,
};
use thetable_core::error::CoreError;
use thetable_core::types::{DbId, Timestamp};
use thetable_db::models::booking::Attendee;
use thetable_db::models::class::{Class, ClassWithMeta, CreateClass};
use thetable_db::repositories::{BookingRepo, ClassRepo, ProfileRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireVerifiedHost;
use crate::state::AppState;

/// Accepted class photo extensions.
const SUPPORTED_PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for the catalog listing.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
}

/// One catalog row: class facts plus availability.
#[derive(Debug, Serialize)]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub class: ClassWithMeta,
    pub seats_remaining: i32,
}

impl From<ClassWithMeta> for CatalogEntry {
    fn from(class: ClassWithMeta) -> Self {
        CatalogEntry {
            seats_remaining: seats_remaining(class.max_participants, class.booked_count as i32),
            class,
        }
    }
}

/// Request body for `POST /classes`.
///
/// No cost, capacity, or location fields: cost and capacity are product
/// constants, and the listing location comes from the host's profile.
#[derive(Debug, Deserialize)]
pub struct CreateClassRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub address: String,
    pub class_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_hours: i32,
    pub who_for: Option<String>,
    pub prerequisites: Option<String>,
    pub walk_away_with: Option<String>,
    pub what_to_bring: Option<String>,
}

/// Class detail as served to a specific viewer.
///
/// `address` and `attendees` are only present when the viewer is the host
/// or holds a booking; everyone else gets city/country only.
#[derive(Debug, Serialize)]
pub struct ClassDetailResponse {
    pub id: DbId,
    pub host_id: DbId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub city: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub class_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_hours: i32,
    pub cost_credits: i32,
    pub max_participants: i32,
    pub booked_count: i64,
    pub seats_remaining: i32,
    pub thumbnail_url: Option<String>,
    pub who_for: Option<String>,
    pub prerequisites: Option<String>,
    pub walk_away_with: Option<String>,
    pub what_to_bring: Option<String>,
    pub created_at: Timestamp,
    pub host: HostSummary,
    pub viewer_has_booked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<Attendee>>,
}

/// The hosting profile's public face.
#[derive(Debug, Serialize)]
pub struct HostSummary {
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
}

/// Response for a photo upload.
#[derive(Debug, Serialize)]
pub struct PhotoResponse {
    pub thumbnail_url: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/classes
///
/// Upcoming classes, soonest first, optionally filtered by `?category=`.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<Vec<CatalogEntry>>> {
    let classes = ClassRepo::list_upcoming(&state.pool, query.category.as_deref()).await?;
    let entries = classes.into_iter().map(CatalogEntry::from).collect();
    Ok(Json(entries))
}

/// GET /api/v1/classes/{id}
///
/// Viewable without an account; the viewer only affects what is revealed.
pub async fn get_by_id(
    State(state): State<AppState>,
    viewer: Option<AuthUser>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ClassDetailResponse>> {
    let class = ClassRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Class",
            id,
        }))?;

    let booked_count = BookingRepo::count_for_class(&state.pool, id).await?;

    let viewer_has_booked = match &viewer {
        Some(v) => BookingRepo::exists_for_user_and_class(&state.pool, v.user_id, id).await?,
        None => false,
    };
    let viewer_is_host = viewer.as_ref().is_some_and(|v| v.user_id == class.host_id);
    let entitled = viewer_is_host || viewer_has_booked;

    let attendees = if entitled {
        Some(BookingRepo::list_attendees(&state.pool, id).await?)
    } else {
        None
    };

    let host = ProfileRepo::find_by_user(&state.pool, class.host_id)
        .await?
        .map(|p| HostSummary {
            full_name: p.full_name,
            avatar_url: p.avatar_url,
            bio: p.bio,
        })
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: class.host_id,
        }))?;

    Ok(Json(ClassDetailResponse {
        id: class.id,
        host_id: class.host_id,
        title: class.title,
        description: class.description,
        category: class.category,
        city: class.city,
        country: class.country,
        address: entitled.then_some(class.address),
        class_date: class.class_date,
        start_time: class.start_time,
        duration_hours: class.duration_hours,
        cost_credits: class.cost_credits,
        max_participants: class.max_participants,
        booked_count,
        seats_remaining: seats_remaining(class.max_participants, booked_count as i32),
        thumbnail_url: class.thumbnail_url,
        who_for: class.who_for,
        prerequisites: class.prerequisites,
        walk_away_with: class.walk_away_with,
        what_to_bring: class.what_to_bring,
        created_at: class.created_at,
        host,
        viewer_has_booked,
        attendees,
    }))
}

/// POST /api/v1/classes
///
/// Verified hosts only. Cost and capacity are product constants; the
/// class is listed in the host profile's city/country.
pub async fn create(
    State(state): State<AppState>,
    RequireVerifiedHost(user): RequireVerifiedHost,
    Json(input): Json<CreateClassRequest>,
) -> AppResult<(StatusCode, Json<Class>)> {
    // 1. Domain validation.
    validate_title(&input.title)?;
    validate_description(&input.description)?;
    validate_category(&input.category)?;
    validate_address(&input.address)?;
    validate_duration(input.duration_hours)?;
    validate_class_date(input.class_date, Utc::now().date_naive())?;

    // 2. The listing location comes from the host's profile.
    let profile = ProfileRepo::find_by_user(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: user.user_id,
        }))?;
    let location_missing = || {
        AppError::Core(CoreError::Validation(
            "Add your city and country to your profile before listing a class".into(),
        ))
    };
    let city = profile
        .city
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(location_missing)?;
    let country = profile
        .country
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(location_missing)?;

    // 3. Insert.
    let class = ClassRepo::create(
        &state.pool,
        &CreateClass {
            host_id: user.user_id,
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            category: input.category,
            city,
            country,
            address: input.address.trim().to_string(),
            class_date: input.class_date,
            start_time: input.start_time,
            duration_hours: input.duration_hours,
            cost_credits: DEFAULT_COST_CREDITS,
            max_participants: DEFAULT_MAX_PARTICIPANTS,
            who_for: input.who_for,
            prerequisites: input.prerequisites,
            walk_away_with: input.walk_away_with,
            what_to_bring: input.what_to_bring,
        },
    )
    .await?;

    tracing::info!(host_id = user.user_id, class_id = class.id, "Class listed");

    Ok((StatusCode::CREATED, Json(class)))
}

/// POST /api/v1/classes/{id}/photo
///
/// Multipart upload of the class photo. Only the class's own host may
/// upload; the stored file is served back under `/uploads/`.
pub async fn upload_photo(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<PhotoResponse>)> {
    let class = ClassRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Class",
            id,
        }))?;
    if class.host_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the host can change the class photo".into(),
        )));
    }

    let mut file_data: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "photo" => {
                let filename = field.file_name().unwrap_or("photo.jpg").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file_data = Some((filename, data.to_vec()));
            }
            _ => {} // ignore unknown fields
        }
    }

    let (filename, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'photo' field".into()))?;
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded photo is empty".into()));
    }

    // Validate file extension
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();
    if !SUPPORTED_PHOTO_EXTENSIONS.contains(&ext.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unsupported photo format '.{ext}'. Supported: .jpg, .jpeg, .png, .webp"
        )));
    }

    // Store under UPLOAD_DIR with a name based on class id and timestamp.
    let storage_dir = std::path::PathBuf::from(&state.config.upload_dir).join("classes");
    tokio::fs::create_dir_all(&storage_dir)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let stored_filename = format!("class_{id}_{}.{ext}", Utc::now().timestamp());
    let file_path = storage_dir.join(&stored_filename);
    tokio::fs::write(&file_path, &data)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let thumbnail_url = format!("/uploads/classes/{stored_filename}");
    ClassRepo::set_thumbnail(&state.pool, id, &thumbnail_url)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Class",
            id,
        }))?;

    Ok((StatusCode::CREATED, Json(PhotoResponse { thumbnail_url })))
}
