//! Recommendation Service Client
//!
//! Typed access to the remote service:
//!
//! - `POST /auth/register`, `POST /auth/login`
//! - `GET /profile`, `POST /profile`, `PUT /profile` (bearer-authenticated)
//! - `POST /api/recommend` (bearer-authenticated, multipart)

mod client;
mod dto;
mod error;

pub use client::{ApiClient, REQUEST_ID_HEADER};
pub use dto::{
    AuthResponse, EducationLevel, LoginRequest, Profile, RecommendationResult, RegisterRequest,
};
pub use error::{extract_detail, ApiError, ApiResult, ErrorKind};
