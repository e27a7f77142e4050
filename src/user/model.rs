use crate::api_error::ApiError;
use crate::db::DbConnection;
use crate::models::{Assignment, Schedule};
use crate::schema::{assignment, assignment_schedule, schedule, user};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Queryable, Selectable)]
#[diesel(table_name = user)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Insertable)]
#[diesel(table_name = user)]
pub struct UserMessage {
    pub name: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub password: String,
}

/// What the identity cookie remembers about a logged in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct AccountSummary {
    pub id: i32,
    pub name: String,
    pub assignments: i64,
    pub schedules: i64,
}

impl From<&User> for AuthUser {
    fn from(user: &User) -> Self {
        AuthUser {
            id: user.id,
            name: user.name.clone(),
        }
    }
}

impl UserMessage {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::bad_request("Name must not be empty"));
        }
        if self.password.is_empty() {
            return Err(ApiError::bad_request("Password must not be empty"));
        }

        Ok(())
    }
}

impl User {
    /// The stored user behind an identity cookie. Both the id and the name
    /// must still match, otherwise the cookie outlived its account.
    pub fn find_logged_in(conn: &mut DbConnection, identity: &AuthUser) -> Result<Self, ApiError> {
        user::table
            .filter(user::id.eq(identity.id))
            .filter(user::name.eq(&identity.name))
            .select(User::as_select())
            .first(conn)
            .optional()?
            .ok_or_else(|| ApiError::not_found("User not found"))
    }

    /// First user with this name whose password matches.
    pub fn find_by_credentials(
        conn: &mut DbConnection,
        credentials: LoginRequest,
    ) -> Result<Self, ApiError> {
        user::table
            .filter(user::name.eq(credentials.name.trim()))
            .filter(user::password.eq(credentials.password))
            .order(user::id.asc())
            .select(User::as_select())
            .first(conn)
            .optional()?
            .ok_or_else(|| ApiError::new(401, "Invalid Credentials".to_string()))
    }

    pub fn create(conn: &mut DbConnection, user: UserMessage) -> Result<Self, ApiError> {
        user.validate()?;

        let user = UserMessage {
            name: user.name.trim().to_string(),
            password: user.password,
        };

        let user = diesel::insert_into(user::table)
            .values(user)
            .returning(User::as_returning())
            .get_result(conn)?;

        Ok(user)
    }

    pub fn summary(
        conn: &mut DbConnection,
        identity: &AuthUser,
    ) -> Result<AccountSummary, ApiError> {
        let user = User::find_logged_in(conn, identity)?;

        Ok(AccountSummary {
            assignments: Assignment::count_for_user(conn, user.id)?,
            schedules: Schedule::count_for_user(conn, user.id)?,
            id: user.id,
            name: user.name,
        })
    }

    /// Deletes the user with every assignment, schedule and link they own.
    pub fn delete(conn: &mut DbConnection, id: i32) -> Result<usize, ApiError> {
        conn.transaction::<_, ApiError, _>(|conn| {
            let assignments = assignment::table
                .filter(assignment::user_id.eq(id))
                .select(assignment::id);
            let schedules = schedule::table
                .filter(schedule::user_id.eq(id))
                .select(schedule::id);

            diesel::delete(
                assignment_schedule::table.filter(
                    assignment_schedule::assignment_id
                        .eq_any(assignments)
                        .or(assignment_schedule::schedule_id.eq_any(schedules)),
                ),
            )
            .execute(conn)?;

            diesel::delete(assignment::table.filter(assignment::user_id.eq(id))).execute(conn)?;
            diesel::delete(schedule::table.filter(schedule::user_id.eq(id))).execute(conn)?;

            let res = diesel::delete(user::table.filter(user::id.eq(id))).execute(conn)?;

            if res == 0 {
                return Err(ApiError::not_found("User not found"));
            }

            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn message(name: &str) -> UserMessage {
        UserMessage {
            name: name.to_string(),
            password: "hunter2".to_string(),
        }
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let pool = db::test_pool();
        let mut conn = pool.get().unwrap();

        let ada = User::create(&mut conn, message("ada")).unwrap();
        User::delete(&mut conn, ada.id).unwrap();
        let grace = User::create(&mut conn, message("grace")).unwrap();

        assert!(grace.id > ada.id);
    }

    #[test]
    fn identity_must_match_the_stored_name() {
        let pool = db::test_pool();
        let mut conn = pool.get().unwrap();

        let grace = User::create(&mut conn, message("grace")).unwrap();
        let stale = AuthUser {
            id: grace.id,
            name: "ada".to_string(),
        };

        let err = User::summary(&mut conn, &stale).unwrap_err();
        assert_eq!(err.status_code, 404);

        let summary = User::summary(&mut conn, &AuthUser::from(&grace)).unwrap();
        assert_eq!(summary.name, "grace");
        assert_eq!(summary.assignments, 0);
    }
}
