mod pg_pool;
mod repositories;

pub use repositories::{
    MockLexiconRepository, MockTranscriptionRepository, PgLexiconRepository,
    PgTranscriptionRepository, map_sqlx_error,
};

pub use pg_pool::{
    CONNECT_ATTEMPTS, CONNECT_INITIAL_DELAY, connect_policy, create_pool, run_migrations,
};
