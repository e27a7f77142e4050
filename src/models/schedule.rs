use crate::api_error::ApiError;
use crate::calendar::Workload;
use crate::db::DbConnection;
use crate::models::Assignment;
use crate::schema::{assignment, assignment_schedule, schedule};
use chrono::{NaiveDate, NaiveTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Selectable)]
#[diesel(table_name = schedule)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Schedule {
    pub id: i32,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub weight: Option<i32>,
    pub description: String,
    pub user_id: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = schedule)]
pub struct ScheduleMessage {
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub weight: Option<i32>,
    pub description: String,
    pub user_id: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub weight: Option<i32>,
    #[serde(default)]
    pub description: String,
    /// Ids of the user's assignments to link to the new schedule.
    #[serde(default)]
    pub assignments: Vec<i32>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = assignment_schedule)]
struct AssignmentLink {
    assignment_id: i32,
    schedule_id: i32,
}

#[derive(Debug, Serialize)]
pub struct ScheduleWithAssignments {
    #[serde(flatten)]
    pub schedule: Schedule,
    pub assignments: Vec<Assignment>,
}

impl ScheduleInput {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.trim().is_empty() {
            return Err(ApiError::bad_request("Schedule title must not be empty"));
        }
        if self.start_date > self.end_date {
            return Err(ApiError::bad_request("Schedule must not end before it starts"));
        }
        if self.start_time > self.end_time {
            return Err(ApiError::bad_request(
                "Schedule end time must not be before its start time",
            ));
        }

        Ok(())
    }
}

impl Workload for Schedule {
    fn weight(&self) -> i64 {
        self.weight.map(i64::from).unwrap_or(0)
    }

    fn falls_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

impl Schedule {
    pub fn find_for_user(conn: &mut DbConnection, user_id: i32) -> Result<Vec<Self>, ApiError> {
        let schedules = schedule::table
            .filter(schedule::user_id.eq(user_id))
            .order((schedule::start_date.asc(), schedule::id.asc()))
            .select(Schedule::as_select())
            .load(conn)?;

        Ok(schedules)
    }

    /// Schedules active on at least one day from `first` through `last`.
    pub fn find_active_between(
        conn: &mut DbConnection,
        user_id: i32,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<Self>, ApiError> {
        let schedules = schedule::table
            .filter(schedule::user_id.eq(user_id))
            .filter(schedule::start_date.le(last))
            .filter(schedule::end_date.ge(first))
            .order((schedule::start_date.asc(), schedule::id.asc()))
            .select(Schedule::as_select())
            .load(conn)?;

        Ok(schedules)
    }

    pub fn find_with_assignments(
        conn: &mut DbConnection,
        user_id: i32,
    ) -> Result<Vec<ScheduleWithAssignments>, ApiError> {
        let schedules = Schedule::find_for_user(conn, user_id)?;
        let ids: Vec<i32> = schedules.iter().map(|s| s.id).collect();

        let links: Vec<(i32, Assignment)> = assignment_schedule::table
            .inner_join(assignment::table)
            .filter(assignment_schedule::schedule_id.eq_any(&ids))
            .order((assignment::due.asc(), assignment::id.asc()))
            .select((assignment_schedule::schedule_id, Assignment::as_select()))
            .load(conn)?;

        let mut linked: HashMap<i32, Vec<Assignment>> = HashMap::new();
        for (schedule_id, assignment) in links {
            linked.entry(schedule_id).or_default().push(assignment);
        }

        let schedules = schedules
            .into_iter()
            .map(|schedule| ScheduleWithAssignments {
                assignments: linked.remove(&schedule.id).unwrap_or_default(),
                schedule,
            })
            .collect();

        Ok(schedules)
    }

    pub fn count_for_user(conn: &mut DbConnection, user_id: i32) -> Result<i64, ApiError> {
        let count = schedule::table
            .filter(schedule::user_id.eq(user_id))
            .count()
            .get_result(conn)?;

        Ok(count)
    }

    /// Stores the schedule and links the selected assignments in one transaction.
    ///
    /// Every selected id must name an assignment of `user_id`, otherwise
    /// nothing is stored.
    pub fn create(
        conn: &mut DbConnection,
        schedule: ScheduleInput,
        user_id: i32,
    ) -> Result<Self, ApiError> {
        schedule.validate()?;

        let selected: Vec<i32> = schedule
            .assignments
            .iter()
            .copied()
            .collect::<BTreeSet<i32>>()
            .into_iter()
            .collect();

        let message = ScheduleMessage {
            title: schedule.title.trim().to_string(),
            start_date: schedule.start_date,
            end_date: schedule.end_date,
            start_time: schedule.start_time,
            end_time: schedule.end_time,
            weight: schedule.weight,
            description: schedule.description,
            user_id,
        };

        conn.transaction::<_, ApiError, _>(|conn| {
            let schedule = diesel::insert_into(schedule::table)
                .values(message)
                .returning(Schedule::as_returning())
                .get_result(conn)?;

            if selected.is_empty() {
                return Ok(schedule);
            }

            let owned: Vec<i32> = assignment::table
                .filter(assignment::id.eq_any(&selected))
                .filter(assignment::user_id.eq(user_id))
                .select(assignment::id)
                .load(conn)?;

            if owned.len() != selected.len() {
                return Err(ApiError::bad_request("Unknown assignment selected"));
            }

            let links: Vec<AssignmentLink> = owned
                .into_iter()
                .map(|assignment_id| AssignmentLink {
                    assignment_id,
                    schedule_id: schedule.id,
                })
                .collect();

            diesel::insert_into(assignment_schedule::table)
                .values(&links)
                .execute(conn)?;

            debug!("Linked {} assignment(s) to schedule {}", links.len(), schedule.id);

            Ok(schedule)
        })
    }

    /// Deletes a schedule owned by `user_id` together with its assignment links.
    pub fn delete(conn: &mut DbConnection, id: i32, user_id: i32) -> Result<usize, ApiError> {
        conn.transaction::<_, ApiError, _>(|conn| {
            let owned = schedule::table
                .filter(schedule::id.eq(id))
                .filter(schedule::user_id.eq(user_id))
                .select(schedule::id)
                .first::<i32>(conn)
                .optional()?;

            if owned.is_none() {
                return Err(ApiError::not_found("Schedule not found"));
            }

            diesel::delete(
                assignment_schedule::table.filter(assignment_schedule::schedule_id.eq(id)),
            )
            .execute(conn)?;

            let res = diesel::delete(schedule::table.filter(schedule::id.eq(id))).execute(conn)?;

            Ok(res)
        })
    }
}
