use utoipa::OpenApi;

use crate::{
    controllers::auth_controller::{
        AuthResponse, ChangePasswordRequest, LoginRequest, RegisterRequest, RegisterResponse,
        __path_change_password, __path_get_current_user, __path_login, __path_logout,
        __path_register,
    },
    error::ErrorResponse,
    models::user::UserInfo,
};

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

#[derive(OpenApi)]
#[openapi(
    paths(
        login,
        register,
        get_current_user,
        change_password,
        logout
    ),
    components(
        schemas(
            LoginRequest,
            RegisterRequest,
            RegisterResponse,
            AuthResponse,
            UserInfo,
            ChangePasswordRequest,
            ErrorResponse
        )
    ),
    tags(
        (name = "Authentication", description = "User authentication and registration endpoints"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Job Board API",
        version = "1.0.0",
        description = "API for employers posting jobs and candidates applying to them",
    ),
    servers(
        (url = "http://localhost:4000", description = "Local development server"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token in the format: Bearer <token>"))
                        .build(),
                ),
            )
        }
    }
}
