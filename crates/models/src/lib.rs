pub mod errors;
pub mod db;
pub mod account;

#[cfg(test)]
mod db_tests {
    use chrono::Utc;
    use migration::MigratorTrait;
    use sea_orm::EntityTrait;
    use uuid::Uuid;

    use crate::{account, db, errors::ModelError};

    #[tokio::test]
    async fn account_insert_and_lookup() {
        let db = match db::connect().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {}", e);
                return;
            }
        };
        if let Err(e) = migration::Migrator::up(&db, None).await {
            eprintln!("skip: migrate up failed: {}", e);
            return;
        }

        let email = format!("model_{}@example.com", Uuid::new_v4());
        let row = account::NewAccount {
            id: Uuid::new_v4(),
            name: "Model Test".into(),
            email: email.clone(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
            created_at: Utc::now(),
        };
        let created = account::insert(&db, row.clone()).await.expect("insert account");
        assert_eq!(created.email, email);

        let by_email = account::find_by_email(&db, &email).await.expect("find by email");
        assert_eq!(by_email.map(|a| a.id), Some(created.id));

        let by_id = account::find_by_id(&db, created.id).await.expect("find by id");
        assert!(by_id.is_some());

        let dup = account::insert(&db, account::NewAccount { id: Uuid::new_v4(), ..row }).await;
        assert!(matches!(dup, Err(ModelError::Duplicate)));

        account::Entity::delete_by_id(created.id).exec(&db).await.expect("cleanup");
    }
}
