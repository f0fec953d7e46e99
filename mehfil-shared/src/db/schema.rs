//! Table bootstrap for each dialect
//!
//! These statements only create missing tables. They never alter or drop
//! anything, so running them against a populated database is a no-op.

/// MySQL / MariaDB
pub const MYSQL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS shayari (
        id           BIGINT       NOT NULL AUTO_INCREMENT PRIMARY KEY,
        title        TEXT         NOT NULL,
        content      TEXT         NOT NULL,
        category     VARCHAR(100) NOT NULL,
        mood         VARCHAR(100) NOT NULL,
        is_published BOOLEAN      NOT NULL DEFAULT FALSE,
        created_at   TIMESTAMP    NOT NULL DEFAULT CURRENT_TIMESTAMP
    ) DEFAULT CHARSET = utf8mb4
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS admins (
        id            BIGINT       NOT NULL AUTO_INCREMENT PRIMARY KEY,
        username      VARCHAR(255) NOT NULL UNIQUE,
        password_hash VARCHAR(255) NOT NULL
    ) DEFAULT CHARSET = utf8mb4
    "#,
];

/// SQLite
pub const SQLITE: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS shayari (
        id           INTEGER   PRIMARY KEY AUTOINCREMENT,
        title        TEXT      NOT NULL,
        content      TEXT      NOT NULL,
        category     TEXT      NOT NULL,
        mood         TEXT      NOT NULL,
        is_published BOOLEAN   NOT NULL DEFAULT 0,
        created_at   TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS admins (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        username      TEXT    NOT NULL UNIQUE,
        password_hash TEXT    NOT NULL
    )
    "#,
];

/// PostgreSQL
pub const POSTGRES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS shayari (
        id           BIGSERIAL    PRIMARY KEY,
        title        TEXT         NOT NULL,
        content      TEXT         NOT NULL,
        category     VARCHAR(100) NOT NULL,
        mood         VARCHAR(100) NOT NULL,
        is_published BOOLEAN      NOT NULL DEFAULT FALSE,
        created_at   TIMESTAMPTZ  NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS admins (
        id            BIGSERIAL    PRIMARY KEY,
        username      VARCHAR(255) NOT NULL UNIQUE,
        password_hash VARCHAR(255) NOT NULL
    )
    "#,
];
