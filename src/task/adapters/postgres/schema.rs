//! Diesel schema for task persistence.

diesel::table! {
    /// Troop task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Short task title.
        #[max_length = 255]
        title -> Varchar,
        /// Longer description.
        description -> Text,
        /// Free-form notes.
        notes -> Text,
        /// Assigned member.
        assigned_to -> Uuid,
        /// Authoring member.
        created_by -> Uuid,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Priority.
        #[max_length = 20]
        priority -> Varchar,
        /// Category.
        #[max_length = 20]
        category -> Varchar,
        /// Due date.
        due_date -> Date,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Completion timestamp.
        completed_at -> Nullable<Timestamptz>,
        /// Cancellation timestamp.
        cancelled_at -> Nullable<Timestamptz>,
        /// Archival flag.
        is_archived -> Bool,
        /// Archival timestamp.
        archived_at -> Nullable<Timestamptz>,
    }
}
