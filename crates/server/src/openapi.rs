use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct RegisterRequest { pub name: String, pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct AuthSessionDoc { pub name: String, pub token: String }

#[derive(ToSchema)]
pub struct AuthenticatedDoc { pub mensagem: String, pub id: String, pub nome: String, pub email: String }

#[derive(ToSchema)]
pub struct ErrorBodyDoc { pub errors: Vec<String> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::me,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            AuthSessionDoc,
            AuthenticatedDoc,
            ErrorBodyDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth")
    )
)]
pub struct ApiDoc;
