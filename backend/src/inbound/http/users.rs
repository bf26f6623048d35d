//! Users API handlers.
//!
//! ```text
//! GET    /users[?email=ada@example.com]
//! POST   /users {"email":"ada@example.com","firstname":"Ada","lastname":"Lovelace"}
//! PUT    /users {"email":"ada@example.com","firstname":"Augusta","lastname":"King"}
//! DELETE /users?email=ada@example.com
//! ```
//!
//! Bodies are decoded here rather than through `web::Json` so decode failures
//! surface with the operation's own message. Query strings are read as raw
//! pairs so a malformed or repeated parameter never fails extraction.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{Error, User, messages};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;

/// Body returned by a successful delete.
pub const USER_DELETED: &str = "User deleted successfully";

/// Body returned for methods the resource does not handle.
pub const METHOD_NOT_ALLOWED: &str = "method not allowed";

/// Raw query pairs in the order they appear.
type QueryPairs = web::Query<Vec<(String, String)>>;

/// Query string accepted by get and delete.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EmailQuery {
    email: Option<String>,
}

impl EmailQuery {
    /// Keep the last `email` value when the parameter repeats.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let email = pairs
            .into_iter()
            .rev()
            .find_map(|(name, value)| (name == "email").then_some(value));
        Self { email }
    }
}

/// Decode a user from a JSON object.
///
/// Serde's derived struct decoding also accepts arrays by position, so the
/// body must parse as an object first.
fn decode_user(body: &[u8], message: &'static str) -> Result<User, Error> {
    let invalid = |_: serde_json::Error| Error::invalid_request(message);
    let object: Map<String, Value> = serde_json::from_slice(body).map_err(invalid)?;
    User::deserialize(Value::Object(object)).map_err(invalid)
}

/// Fetch one user by email, or every user when `email` is absent or empty.
#[utoipa::path(
    get,
    path = "/users",
    params(("email" = Option<String>, Query, description = "Email of the user to fetch")),
    responses(
        (status = 200, description = "A single user, or all users when no email is given", body = UserSchema),
        (status = 400, description = "Store or decode failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUsers"
)]
pub async fn get_users(
    state: web::Data<HttpState>,
    query: QueryPairs,
) -> ApiResult<HttpResponse> {
    match EmailQuery::from_pairs(query.into_inner()).email.filter(|email| !email.is_empty()) {
        Some(email) => {
            let user = state.users_query.fetch_user(&email).await?;
            Ok(HttpResponse::Ok().json(user))
        }
        None => {
            let users = state.users_query.list_users().await?;
            Ok(HttpResponse::Ok().json(users))
        }
    }
}

/// Create a user keyed by a previously unused email.
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserSchema,
    responses(
        (status = 201, description = "User created", body = UserSchema),
        (status = 400, description = "Invalid body, invalid email, duplicate, or store failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
pub async fn create_user(state: web::Data<HttpState>, body: web::Bytes) -> ApiResult<HttpResponse> {
    let user = decode_user(&body, messages::INVALID_USER_DATA)?;
    let created = state.users_command.create_user(user).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Replace an existing user.
#[utoipa::path(
    put,
    path = "/users",
    request_body = UserSchema,
    responses(
        (status = 200, description = "User updated", body = UserSchema),
        (status = 400, description = "Invalid body, unknown user, or store failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
pub async fn update_user(state: web::Data<HttpState>, body: web::Bytes) -> ApiResult<HttpResponse> {
    let user = decode_user(&body, messages::INVALID_EMAIL)?;
    let updated = state.users_command.update_user(user).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Delete the user under `email`. Missing users delete successfully.
#[utoipa::path(
    delete,
    path = "/users",
    params(("email" = Option<String>, Query, description = "Email of the user to delete")),
    responses(
        (status = 200, description = "User deleted", body = String, example = json!("User deleted successfully")),
        (status = 400, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
pub async fn delete_user(
    state: web::Data<HttpState>,
    query: QueryPairs,
) -> ApiResult<HttpResponse> {
    let email = EmailQuery::from_pairs(query.into_inner())
        .email
        .unwrap_or_default();
    state.users_command.delete_user(&email).await?;
    Ok(HttpResponse::Ok().json(USER_DELETED))
}

/// Fallback for methods other than GET, POST, PUT and DELETE.
pub async fn unhandled_method() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(METHOD_NOT_ALLOWED)
}

/// Mount the users resource.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::users;
///
/// let app = App::new().configure(users::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/users")
            .route(web::get().to(get_users))
            .route(web::post().to(create_user))
            .route(web::put().to(update_user))
            .route(web::delete().to(delete_user))
            .default_service(web::to(unhandled_method)),
    );
}
