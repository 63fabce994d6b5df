//! JWT 토큰 관리 서비스 구현
//!
//! 액세스 토큰과 리프레시 토큰의 생성과 검증을 담당합니다.
//! 두 토큰은 같은 비밀 키로 서명하고 `token_type` 클레임으로 구분합니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use singleton_macro::service;
use crate::{
    config::{JwtConfig, UserType},
    core::errors::AppError,
    domain::models::auth::AuthenticatedUser,
    domain::models::token::{TokenClaims, TokenKind, TokenPair},
};

/// JWT 토큰 관리 서비스
///
/// HMAC-SHA256 서명을 사용합니다. 만료 시간은 [`JwtConfig`]를 따릅니다.
#[service(name = "token")]
pub struct TokenService {}

impl TokenService {
    fn issue(&self, kind: TokenKind, user_idx: i64, user_type: UserType) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = match kind {
            TokenKind::Access => now + Duration::hours(JwtConfig::expiration_hours()),
            TokenKind::Refresh => now + Duration::days(JwtConfig::refresh_expiration_days()),
        };

        let claims = TokenClaims {
            sub: user_idx.to_string(),
            user_type,
            roles: user_type.roles(),
            token_type: kind,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(JwtConfig::secret().as_ref());

        encode(&Header::default(), &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// 액세스 토큰 발급
    ///
    /// ```rust,ignore
    /// let token_service = TokenService::instance();
    /// let jwt = token_service.generate_access_token(user_idx, UserType::User)?;
    /// ```
    pub fn generate_access_token(&self, user_idx: i64, user_type: UserType) -> Result<String, AppError> {
        self.issue(TokenKind::Access, user_idx, user_type)
    }

    pub fn generate_token_pair(&self, user_idx: i64, user_type: UserType) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.issue(TokenKind::Access, user_idx, user_type)?,
            refresh_token: self.issue(TokenKind::Refresh, user_idx, user_type)?,
            expires_in: JwtConfig::expiration_hours() * 3600,
        })
    }

    /// 서명과 만료 시간을 검증하고 클레임을 반환합니다.
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        let decoding_key = DecodingKey::from_secret(JwtConfig::secret().as_ref());

        decode::<TokenClaims>(token, &decoding_key, &Validation::default())
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
                }
                _ => AppError::AuthenticationError(format!("유효하지 않은 토큰입니다: {}", e)),
            })
    }

    /// 액세스 토큰만 허용합니다.
    pub fn verify_access_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        self.verify_kind(token, TokenKind::Access)
    }

    /// 리프레시 토큰만 허용합니다.
    pub fn verify_refresh_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        self.verify_kind(token, TokenKind::Refresh)
    }

    fn verify_kind(&self, token: &str, expected: TokenKind) -> Result<TokenClaims, AppError> {
        let claims = self.verify_token(token)?;
        if claims.token_type != expected {
            return Err(AppError::AuthenticationError("토큰 종류가 올바르지 않습니다".to_string()));
        }
        Ok(claims)
    }

    /// 클레임을 요청 컨텍스트의 인증 사용자로 변환합니다.
    pub fn to_authenticated_user(&self, claims: TokenClaims) -> Result<AuthenticatedUser, AppError> {
        let user_idx = claims
            .sub
            .parse::<i64>()
            .map_err(|_| AppError::AuthenticationError("토큰의 사용자 ID가 올바르지 않습니다".to_string()))?;

        Ok(AuthenticatedUser {
            user_idx,
            user_type: claims.user_type,
            roles: claims.roles,
        })
    }

    /// `Authorization: Bearer <token>` 헤더에서 토큰을 꺼냅니다.
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string()))
    }
}
