//! Shared test utilities for tm-db unit tests.

pub(crate) mod helpers {
    use tm_core::inputs::NewUser;

    use crate::TmDb;
    use crate::service::TmService;

    /// Create an in-memory `TmService`.
    pub async fn test_service() -> TmService {
        let db = TmDb::open_local(":memory:").await.unwrap();
        TmService::from_db(db)
    }

    /// Sign-up payload with a fixed password of `secret-pw`.
    pub fn new_user(email: &str, role: &str) -> NewUser {
        NewUser {
            email: email.into(),
            password: "secret-pw".into(),
            first_name: "Test".into(),
            last_name: "User".into(),
            role: role.into(),
        }
    }
}
