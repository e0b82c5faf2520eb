use crate::models::{author, book};
use sea_orm::*;

const DEMO_EMAIL: &str = "ada@example.com";

/// Insert one demo author with two books. Does nothing if the demo author exists.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let existing = author::Entity::find()
        .filter(author::Column::Email.eq(DEMO_EMAIL))
        .one(db)
        .await?;
    if existing.is_some() {
        tracing::debug!("Demo data already present, skipping seed");
        return Ok(());
    }

    let txn = db.begin().await?;

    let ada = author::ActiveModel {
        name: Set("Ada Lovelace".to_owned()),
        email: Set(DEMO_EMAIL.to_owned()),
        year_started: Set(1940),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for (title, pages) in [("Notes on the Analytical Engine", 66), ("Sketch of the Engine", 52)] {
        book::ActiveModel {
            title: Set(title.to_owned()),
            pages: Set(pages),
            author_id: Set(ada.id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;
    Ok(())
}
