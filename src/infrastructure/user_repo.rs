use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::UserRepository;
use crate::domain::user::{NewUser, User};
use crate::schema::{auth_tokens, users};

use super::models::{NewAuthTokenRow, NewUserRow, UserRow};

pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for DieselUserRepository {
    fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut conn = self.pool.get()?;
        let username = user.username.clone();

        let row: UserRow = diesel::insert_into(users::table)
            .values(&NewUserRow {
                username: user.username,
                email: user.email,
                password_hash: user.password_hash,
            })
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .map_err(|e| match DomainError::from(e) {
                DomainError::Conflict(_) => {
                    DomainError::Conflict(format!("username '{username}' is already taken"))
                }
                other => other,
            })?;

        Ok(row.into())
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(User::from))
    }

    fn get_or_create_token(&self, user_id: i32, candidate: &str) -> Result<String, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let user_exists: bool =
                diesel::select(diesel::dsl::exists(users::table.find(user_id))).get_result(conn)?;
            if !user_exists {
                return Err(DomainError::NotFound("User"));
            }

            // One token per user: a concurrent login may win the insert.
            diesel::insert_into(auth_tokens::table)
                .values(&NewAuthTokenRow {
                    key: candidate,
                    user_id,
                })
                .on_conflict(auth_tokens::user_id)
                .do_nothing()
                .execute(conn)?;

            let key: String = auth_tokens::table
                .filter(auth_tokens::user_id.eq(user_id))
                .select(auth_tokens::key)
                .first(conn)?;
            Ok(key)
        })
    }

    fn find_by_token(&self, key: &str) -> Result<Option<User>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = auth_tokens::table
            .inner_join(users::table)
            .filter(auth_tokens::key.eq(key))
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(User::from))
    }
}
