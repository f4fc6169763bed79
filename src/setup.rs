
use crate::db::models::NewGame;
use crate::db::schema;
use crate::util::slugify;

use diesel::prelude::*;
use diesel_async::{RunQueryDsl, AsyncConnection, AsyncPgConnection};

use std::env;

/// A handful of games to seed an empty catalog with, so the rating
/// and feedback flows have something to point at.
const STARTER_GAMES: [(&str, &str, i32, f64); 3] = [
  ("Chess", "The classic game of kings.", 5, 0.0),
  ("Minesweeper", "Clear the board without setting off a mine.", 4, 0.0),
  ("Solitaire", "A single-player card game played with a standard deck.", 3, 0.0),
];

pub async fn seed_starter_catalog(force: bool) -> anyhow::Result<()> {
  let mut connection = AsyncPgConnection::establish(&env::var("DATABASE_URL")?).await?;

  println!("Seeding starter game catalog ...");

  let existing_games = schema::games::table
    .count()
    .get_result::<i64>(&mut connection)
    .await?;
  if !force && existing_games > 0 {
    println!("Catalog already contains games, refusing to seed again.");
    println!("You may override this with --force if you know what you're doing.");
    return Ok(());
  }

  for (title, description, rating, price) in STARTER_GAMES {
    let new_game = NewGame {
      title: title.to_string(),
      description: description.to_string(),
      rating,
      price,
      feedback: String::new(),
      slug: slugify(title),
    };
    diesel::insert_into(schema::games::table)
      .values(&new_game)
      .execute(&mut connection)
      .await?;
    println!("  added game: {}", new_game.title);
  }

  println!("Successfully seeded {} games.", STARTER_GAMES.len());
  Ok(())
}
