use actix_web::{
    dev::Payload, error::ErrorUnauthorized, web::Data, Error as ActixError, FromRequest,
    HttpRequest,
};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::config::Config;
use crate::database::models::{AuthResponse, CreateUserInput, LoginInput, Role, User};
use crate::database::repositories::user as user_repo;
use crate::database::transaction::DatabaseTransaction;
use crate::error::AppError;
use crate::services::approval::Authority;
use crate::services::permissions::{self, Action};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // user id
    pub email: String,
    pub role: Role,
    pub exp: usize, // expiration time
}

impl Claims {
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Enforce the permission table for an action; the role itself was
    /// established by the auth boundary, not here.
    pub fn require(&self, action: Action) -> Result<(), AppError> {
        if permissions::is_allowed(self.role, action) {
            Ok(())
        } else {
            Err(AppError::PermissionDenied(format!(
                "Role {} may not perform this action",
                self.role
            )))
        }
    }

    /// The approval authority this caller acts as, or a permission error
    /// for roles outside the two committees.
    pub fn authority(&self) -> Result<Authority, AppError> {
        permissions::authority_for(self.role).ok_or_else(|| {
            AppError::PermissionDenied(
                "Only TUSC or DSW may act on approvals".to_string(),
            )
        })
    }
}

impl FromRequest for Claims {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let auth_header = req.headers().get("Authorization");

        if let Some(auth_header) = auth_header {
            if let Ok(auth_str) = auth_header.to_str() {
                if let Some(token) = auth_str.strip_prefix("Bearer ") {
                    // Get the config from app data
                    if let Some(config) = req.app_data::<Data<Config>>() {
                        match decode::<Claims>(
                            token,
                            &DecodingKey::from_secret(config.jwt_secret.as_ref()),
                            &Validation::new(Algorithm::HS256),
                        ) {
                            Ok(token_data) => {
                                return ready(Ok(token_data.claims));
                            }
                            Err(_) => {
                                return ready(Err(ErrorUnauthorized("Invalid token")));
                            }
                        }
                    }
                }
            }
        }

        ready(Err(ErrorUnauthorized(
            "Missing or invalid authorization header",
        )))
    }
}

#[derive(Clone)]
pub struct AuthService {
    config: Config,
}

impl AuthService {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn register(&self, request: CreateUserInput) -> Result<AuthResponse, AppError> {
        if user_repo::email_exists(&request.email).await? {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::internal_server_error_message(e.to_string()))?;
        let role = request.role.unwrap_or_default();

        let email = request.email;
        let name = request.name;
        let user = DatabaseTransaction::run(|tx| {
            Box::pin(async move {
                let user = user_repo::create_user(tx, &email, &password_hash, &name, role).await?;
                Ok(user)
            })
        })
        .await?;

        let token = self.generate_token(&user)?;

        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }

    pub async fn login(&self, request: LoginInput) -> Result<AuthResponse, AppError> {
        let user = user_repo::find_by_email(&request.email)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let password_ok = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::internal_server_error_message(e.to_string()))?;
        if !password_ok {
            return Err(AppError::Unauthorized);
        }

        let token = self.generate_token(&user)?;

        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }

    pub async fn current_user(&self, claims: &Claims) -> Result<User, AppError> {
        user_repo::find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    fn generate_token(&self, user: &User) -> Result<String, AppError> {
        let expiration = Utc::now() + Duration::days(self.config.jwt_expiration_days);
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            exp: expiration.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_ref()),
        )
        .map_err(|e| AppError::internal_server_error_message(e.to_string()))
    }
}
