diesel::table! {
    assignment (id) {
        id -> Integer,
        title -> Text,
        due -> Timestamp,
        weight -> Nullable<Integer>,
        description -> Text,
        user_id -> Integer,
    }
}

diesel::table! {
    assignment_schedule (assignment_id, schedule_id) {
        assignment_id -> Integer,
        schedule_id -> Integer,
    }
}

diesel::table! {
    schedule (id) {
        id -> Integer,
        title -> Text,
        start_date -> Date,
        end_date -> Date,
        start_time -> Time,
        end_time -> Time,
        weight -> Nullable<Integer>,
        description -> Text,
        user_id -> Integer,
    }
}

diesel::table! {
    user (id) {
        id -> Integer,
        name -> Text,
        password -> Text,
    }
}

diesel::joinable!(assignment -> user (user_id));
diesel::joinable!(assignment_schedule -> assignment (assignment_id));
diesel::joinable!(assignment_schedule -> schedule (schedule_id));
diesel::joinable!(schedule -> user (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    assignment,
    assignment_schedule,
    schedule,
    user,
);
