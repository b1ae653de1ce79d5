//! V002: vote table.

pub const UP: &str = r#"
-- One 1-5 star rating per (user, model version) pair. The uniqueness key is
-- what makes seeding re-runnable, and the cascade ties vote lifetime to the
-- rated model version.
CREATE TABLE IF NOT EXISTS vote (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id TEXT NOT NULL,
    model_version_id UUID NOT NULL,
    score INTEGER NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT valid_score_range CHECK (score >= 1 AND score <= 5),
    CONSTRAINT unique_user_model_vote UNIQUE (user_id, model_version_id),
    CONSTRAINT fk_vote_model_version FOREIGN KEY (model_version_id)
        REFERENCES model_version (id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_vote_user_id ON vote (user_id);
CREATE INDEX IF NOT EXISTS idx_vote_model_version_id ON vote (model_version_id);
CREATE INDEX IF NOT EXISTS idx_vote_score ON vote (score);
CREATE INDEX IF NOT EXISTS idx_vote_created_at ON vote (created_at);
"#;

pub const DOWN: &str = r#"
DROP INDEX IF EXISTS idx_vote_created_at;
DROP INDEX IF EXISTS idx_vote_score;
DROP INDEX IF EXISTS idx_vote_model_version_id;
DROP INDEX IF EXISTS idx_vote_user_id;
DROP TABLE IF EXISTS vote;
"#;
