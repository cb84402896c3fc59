use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::{collections::HashMap, fs, path::Path, sync::Arc};
use thiserror::Error;
use uuid::Uuid;

use crate::{models::User, policy::Role};

/// DirectoryError
///
/// Failures of the identity backend. These are infrastructure faults, never a
/// verdict about the caller; the HTTP layer maps them to a 503.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("user directory query failed: {0}")]
    Database(#[from] sqlx::Error),
    #[error("failed to read user directory file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid user directory file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// IdentityDirectory
///
/// The contract for resolving an authenticated user id into the identity record
/// (and therefore the Role) the access policy evaluates. Implementations are
/// swapped behind `Arc<dyn IdentityDirectory>`: Postgres in production, an
/// in-memory map locally and in tests.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// `Ok(None)` means the id is unknown; the caller treats that as unauthenticated.
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, DirectoryError>;
}

/// IdentityState
///
/// The concrete type used to share the directory across the application state.
pub type IdentityState = Arc<dyn IdentityDirectory>;

// --- Seed Users ---

pub const SEED_ADMIN_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0001);
pub const SEED_OPERATIONS_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0002);
pub const SEED_FINANCE_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0003);
pub const SEED_RIDER_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0004);

/// The four local test accounts, one per defined role.
pub fn seed_users() -> Vec<User> {
    let user = |id, email: &str, name: &str, role| User {
        id,
        email: email.to_string(),
        name: name.to_string(),
        role,
    };

    vec![
        user(SEED_ADMIN_ID, "admin@yellowbox.ae", "Admin User", Role::Admin),
        user(
            SEED_OPERATIONS_ID,
            "operations@yellowbox.ae",
            "Operations Manager",
            Role::Operations,
        ),
        user(SEED_FINANCE_ID, "finance@yellowbox.ae", "Finance Manager", Role::Finance),
        user(SEED_RIDER_ID, "rider@yellowbox.ae", "Test Rider", Role::RiderApplicant),
    ]
}

/// InMemoryDirectory
///
/// A read-only directory held in a `HashMap`, built once at startup from the seed
/// users or a JSON file.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    users: HashMap<Uuid, User>,
}

impl InMemoryDirectory {
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: users.into_iter().map(|user| (user.id, user)).collect(),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_users())
    }

    /// Loads a JSON array of `User` records. Role labels outside the four
    /// defined roles are kept as `Unrecognized` so those users authenticate but
    /// reach nothing.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let raw = fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: display.clone(),
            source,
        })?;
        let users: Vec<User> = serde_json::from_str(&raw).map_err(|source| DirectoryError::Parse {
            path: display,
            source,
        })?;

        Ok(Self::new(users))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl IdentityDirectory for InMemoryDirectory {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, DirectoryError> {
        Ok(self.users.get(&id).cloned())
    }
}

/// PostgresDirectory
///
/// Reads identity records from the `users` table kept in sync by the identity
/// service. The role column is stored as the dashboard's text label.
pub struct PostgresDirectory {
    pool: PgPool,
}

impl PostgresDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: String,
    role: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            name: row.name,
            role: Role::parse(&row.role),
        }
    }
}

#[async_trait]
impl IdentityDirectory for PostgresDirectory {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, DirectoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, name, role FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }
}
