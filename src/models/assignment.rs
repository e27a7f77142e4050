use crate::api_error::ApiError;
use crate::calendar::Workload;
use crate::db::DbConnection;
use crate::schema::{assignment, assignment_schedule};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Selectable)]
#[diesel(table_name = assignment)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Assignment {
    pub id: i32,
    pub title: String,
    pub due: NaiveDateTime,
    pub weight: Option<i32>,
    pub description: String,
    pub user_id: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = assignment)]
pub struct AssignmentMessage {
    pub title: String,
    pub due: NaiveDateTime,
    pub weight: Option<i32>,
    pub description: String,
    pub user_id: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssignmentInput {
    pub title: String,
    pub due: NaiveDateTime,
    pub weight: Option<i32>,
    #[serde(default)]
    pub description: String,
}

impl AssignmentInput {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.trim().is_empty() {
            return Err(ApiError::bad_request("Assignment title must not be empty"));
        }

        Ok(())
    }
}

impl Workload for Assignment {
    fn weight(&self) -> i64 {
        self.weight.map(i64::from).unwrap_or(0)
    }

    fn falls_on(&self, date: NaiveDate) -> bool {
        self.due.date() == date
    }
}

impl Assignment {
    pub fn find_for_user(conn: &mut DbConnection, user_id: i32) -> Result<Vec<Self>, ApiError> {
        let assignments = assignment::table
            .filter(assignment::user_id.eq(user_id))
            .order((assignment::due.asc(), assignment::id.asc()))
            .select(Assignment::as_select())
            .load(conn)?;

        Ok(assignments)
    }

    /// Assignments due between `start` and `end`, both inclusive.
    pub fn find_due_between(
        conn: &mut DbConnection,
        user_id: i32,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Self>, ApiError> {
        if start > end {
            return Err(ApiError::bad_request("Range start must not be after its end"));
        }

        let assignments = assignment::table
            .filter(assignment::user_id.eq(user_id))
            .filter(assignment::due.ge(start))
            .filter(assignment::due.le(end))
            .order((assignment::due.asc(), assignment::id.asc()))
            .select(Assignment::as_select())
            .load(conn)?;

        Ok(assignments)
    }

    /// Assignments due on any day from `first` through `last`.
    pub fn find_due_on_days(
        conn: &mut DbConnection,
        user_id: i32,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<Self>, ApiError> {
        let from = first.and_time(NaiveTime::MIN);
        let until = (last + Duration::days(1)).and_time(NaiveTime::MIN);

        let assignments = assignment::table
            .filter(assignment::user_id.eq(user_id))
            .filter(assignment::due.ge(from))
            .filter(assignment::due.lt(until))
            .order((assignment::due.asc(), assignment::id.asc()))
            .select(Assignment::as_select())
            .load(conn)?;

        Ok(assignments)
    }

    pub fn count_for_user(conn: &mut DbConnection, user_id: i32) -> Result<i64, ApiError> {
        let count = assignment::table
            .filter(assignment::user_id.eq(user_id))
            .count()
            .get_result(conn)?;

        Ok(count)
    }

    pub fn create(
        conn: &mut DbConnection,
        assignment: AssignmentInput,
        user_id: i32,
    ) -> Result<Self, ApiError> {
        assignment.validate()?;

        let assignment = AssignmentMessage {
            title: assignment.title.trim().to_string(),
            due: assignment.due,
            weight: assignment.weight,
            description: assignment.description,
            user_id,
        };

        let assignment = diesel::insert_into(assignment::table)
            .values(assignment)
            .returning(Assignment::as_returning())
            .get_result(conn)?;

        Ok(assignment)
    }

    /// Deletes an assignment owned by `user_id` together with its schedule links.
    pub fn delete(conn: &mut DbConnection, id: i32, user_id: i32) -> Result<usize, ApiError> {
        conn.transaction::<_, ApiError, _>(|conn| {
            let owned = assignment::table
                .filter(assignment::id.eq(id))
                .filter(assignment::user_id.eq(user_id))
                .select(assignment::id)
                .first::<i32>(conn)
                .optional()?;

            if owned.is_none() {
                return Err(ApiError::not_found("Assignment not found"));
            }

            diesel::delete(
                assignment_schedule::table.filter(assignment_schedule::assignment_id.eq(id)),
            )
            .execute(conn)?;

            let res =
                diesel::delete(assignment::table.filter(assignment::id.eq(id))).execute(conn)?;

            Ok(res)
        })
    }
}
