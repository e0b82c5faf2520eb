use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    init_db_with_pool(database_url, DEFAULT_MAX_CONNECTIONS).await
}

pub async fn init_db_with_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    if database_url.contains(":memory:") {
        // An in-memory database lives and dies with its single connection
        options.max_connections(1).min_connections(1);
    } else {
        options.max_connections(max_connections);
    }
    options.sqlx_logging(false);

    let db = Database::connect(options).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    tracing::debug!("Database ready at {}", database_url);
    Ok(db)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Create authors table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS authors (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            year_started INTEGER NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Create books table; rows go away with their author
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            pages INTEGER NOT NULL,
            author_id INTEGER NOT NULL,
            FOREIGN KEY (author_id) REFERENCES authors(id) ON DELETE CASCADE
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE INDEX IF NOT EXISTS idx_books_author_id ON books(author_id)".to_owned(),
    ))
    .await?;

    Ok(())
}
