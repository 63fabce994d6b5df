//! # Domain Entities Module
//!
//! SQLite 테이블과 1:1로 대응되는 영속 엔티티를 정의합니다.
//!
//! ```text
//! user ──< store ──< reborn ──< reborn_task >── user
//! ```
//!
//! - [`users`] - 이웃/가게 운영자 계정 (`user`)
//! - [`stores`] - 가게 (`store`)
//! - [`reborns`] - 리본 상품 목록(`reborn`)과 교환 태스크(`reborn_task`)
//!
//! 상태 컬럼은 문자열 플래그 대신 닫힌 열거형으로 표현하고,
//! [`sqlite_text_enum!`] 매크로로 TEXT 컬럼과 매핑합니다.

pub mod users;
pub mod stores;
pub mod reborns;

/// 닫힌 열거형을 SQLite TEXT 컬럼으로 인코딩/디코딩합니다.
///
/// 대상 타입은 `as_str(&self) -> &'static str`과
/// `from_str(&str) -> Result<Self, String>`을 제공해야 합니다.
macro_rules! sqlite_text_enum {
    ($ty:ty) => {
        impl sqlx::Type<sqlx::Sqlite> for $ty {
            fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
                <&str as sqlx::Type<sqlx::Sqlite>>::type_info()
            }

            fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
                <&str as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
            }
        }

        impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for $ty {
            fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
                let s = <&str as sqlx::Decode<'r, sqlx::Sqlite>>::decode(value)?;
                Ok(<$ty>::from_str(s)?)
            }
        }

        impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for $ty {
            fn encode_by_ref(
                &self,
                buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <&str as sqlx::Encode<'q, sqlx::Sqlite>>::encode_by_ref(&self.as_str(), buf)
            }
        }
    };
}

pub(crate) use sqlite_text_enum;
