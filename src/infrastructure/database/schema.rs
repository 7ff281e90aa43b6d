diesel::table! {
    models (model_id) {
        model_id -> Uuid,
        user_id -> Text,
        model_name -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    rate_limit (user_id) {
        user_id -> Text,
        count -> Int4,
        window_started_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(models, rate_limit);
