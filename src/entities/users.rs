use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Stored lowercased; uniqueness is therefore case-insensitive.
    #[sea_orm(unique)]
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    pub first_name: String,

    pub last_name: String,

    /// One of MALE / FEMALE / OTHER (see [`Gender`]).
    pub gender: String,

    pub phone_number: Option<String>,

    pub date_of_birth: Option<String>,

    pub country: Option<String>,

    pub city: Option<String>,

    pub address: Option<String>,

    pub postal_code: Option<String>,

    pub profile_picture: Option<String>,

    pub email_verified: bool,

    pub email_verified_at: Option<String>,

    pub phone_verified: bool,

    /// One of PENDING_VERIFICATION / ACTIVE / SUSPENDED / INACTIVE (see [`UserStatus`]).
    pub status: String,

    pub last_login_at: Option<String>,

    /// Reserved for the recovery flow; no endpoint issues or consumes these yet.
    pub password_reset_token: Option<String>,

    pub password_reset_expires: Option<String>,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::bible_readings::Entity")]
    BibleReadings,
}

impl Related<super::bible_readings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BibleReadings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Gender values accepted at registration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "MALE" => Some(Self::Male),
            "FEMALE" => Some(Self::Female),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
            Self::Other => "OTHER",
        }
    }
}

/// Account lifecycle states. New accounts start at `PendingVerification`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UserStatus {
    PendingVerification,
    Active,
    Suspended,
    Inactive,
}

impl UserStatus {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING_VERIFICATION" => Some(Self::PendingVerification),
            "ACTIVE" => Some(Self::Active),
            "SUSPENDED" => Some(Self::Suspended),
            "INACTIVE" => Some(Self::Inactive),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PendingVerification => "PENDING_VERIFICATION",
            Self::Active => "ACTIVE",
            Self::Suspended => "SUSPENDED",
            Self::Inactive => "INACTIVE",
        }
    }
}
