//! V001: model_version table.

pub const UP: &str = r#"
-- One row per evaluated model version. The version label is the public
-- lookup key; IDs are generated client-side but keep a server default so
-- ad-hoc inserts stay valid.
CREATE TABLE IF NOT EXISTS model_version (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    version TEXT NOT NULL,
    provider TEXT NOT NULL,
    vote_count INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT model_version_version_key UNIQUE (version)
);

-- Ordering by popularity.
CREATE INDEX IF NOT EXISTS idx_model_version_vote_count
    ON model_version (vote_count);
"#;

pub const DOWN: &str = r#"
DROP INDEX IF EXISTS idx_model_version_vote_count;
DROP TABLE IF EXISTS model_version;
"#;
