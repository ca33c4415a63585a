/// PostgreSQL plumbing
///
/// - `pool`: connection pool creation and health checks
/// - `migrations`: embedded schema migrations
///
/// Entity SQL lives next to the entities in `models`; the transactional
/// store over this pool is `store::postgres`.

pub mod migrations;
pub mod pool;
