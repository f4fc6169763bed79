
use rocket_db_pools::diesel::PgPool;
use rocket_db_pools::Database;

/// Handle to the game catalog database.
#[derive(Database)]
#[database("gameshelf")]
pub struct Db(PgPool);
