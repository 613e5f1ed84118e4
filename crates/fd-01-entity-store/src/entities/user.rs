use crate::domain::schema::{EntitySchema, Record};
use shared_types::{TimestampMillis, User};

/// User schema: `user:{id}`, indexed under `users`.
pub const USERS: EntitySchema<User> = EntitySchema {
    entity_name: "user",
    index_name: "users",
    initial_state: User::default,
    seed_data: seed_users,
};

impl Record for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}

pub fn seed_users(_now: TimestampMillis) -> Vec<User> {
    vec![
        User {
            id: "u1".into(),
            name: "User A".into(),
        },
        User {
            id: "u2".into(),
            name: "User B".into(),
        },
    ]
}
