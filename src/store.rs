use jiff::civil::Date;
use sea_orm::{
    ActiveValue::{NotSet, Set},
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Statement,
};

use crate::{entities::movie, models::Movie};

#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert(&self, name: &str, release_date: Date) -> Result<Movie, DbErr> {
        let model = movie::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            release_date: Set(release_date.to_string()),
        };

        let id = movie::Entity::insert(model).exec(&self.db).await?.last_insert_id;
        Ok(Movie { id, name: name.to_string(), release_date })
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Movie>, DbErr> {
        let row = movie::Entity::find_by_id(id).one(&self.db).await?;
        row.map(to_domain).transpose()
    }

    pub async fn find_all(&self) -> Result<Vec<Movie>, DbErr> {
        let rows = movie::Entity::find().all(&self.db).await?;
        rows.into_iter().map(to_domain).collect()
    }

    // Id-keyed upsert: a record carrying an id absent from the table is
    // inserted under that id, otherwise the existing row is overwritten.
    pub async fn save(&self, movie: &Movie) -> Result<(), DbErr> {
        let model = movie::ActiveModel {
            id: Set(movie.id),
            name: Set(movie.name.clone()),
            release_date: Set(movie.release_date.to_string()),
        };

        movie::Entity::insert(model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(movie::Column::Id)
                    .update_columns([movie::Column::Name, movie::Column::ReleaseDate])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        Ok(())
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<(), DbErr> {
        movie::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Movie>, DbErr> {
        let stmt = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            "SELECT * FROM movie AS m WHERE m.name = ? LIMIT 1",
            [name.into()],
        );

        let row = movie::Entity::find().from_raw_sql(stmt).one(&self.db).await?;
        row.map(to_domain).transpose()
    }

    pub async fn find_by_release_date(&self, release_date: Date) -> Result<Option<Movie>, DbErr> {
        let row = movie::Entity::find()
            .filter(movie::Column::ReleaseDate.eq(release_date.to_string()))
            .one(&self.db)
            .await?;
        row.map(to_domain).transpose()
    }
}

fn to_domain(row: movie::Model) -> Result<Movie, DbErr> {
    let release_date = row.release_date.parse().map_err(|err: jiff::Error| {
        DbErr::Type(format!("bad release_date for movie {}: {err}", row.id))
    })?;
    Ok(Movie { id: row.id, name: row.name, release_date })
}

#[cfg(test)]
mod tests {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    use super::*;

    async fn test_store() -> MovieStore {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1);
        let db = Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        MovieStore::new(db)
    }

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn insert_assigns_id_and_round_trips() {
        let store = test_store().await;

        let saved = store.insert("Dune", date("2021-10-22")).await.unwrap();
        let found = store.find_by_id(saved.id).await.unwrap().unwrap();

        assert_eq!(found, saved);
        assert_eq!(found.name, "Dune");
        assert_eq!(found.release_date, date("2021-10-22"));
    }

    #[tokio::test]
    async fn find_by_name_uses_exact_match() {
        let store = test_store().await;
        store.insert("Alien", date("1979-05-25")).await.unwrap();
        store.insert("Aliens", date("1986-07-18")).await.unwrap();

        let found = store.find_by_name("Alien").await.unwrap().unwrap();
        assert_eq!(found.name, "Alien");

        assert!(store.find_by_name("Alie").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_by_release_date_returns_matching_row() {
        let store = test_store().await;
        store.insert("Heat", date("1995-12-15")).await.unwrap();

        let found = store.find_by_release_date(date("1995-12-15")).await.unwrap().unwrap();
        assert_eq!(found.name, "Heat");

        assert!(store.find_by_release_date(date("1996-01-01")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_overwrites_existing_row() {
        let store = test_store().await;
        let mut movie = store.insert("Draft Title", date("2020-01-01")).await.unwrap();

        movie.name = "Final Title".to_string();
        movie.release_date = date("2020-06-01");
        store.save(&movie).await.unwrap();

        let found = store.find_by_id(movie.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Final Title");
        assert_eq!(found.release_date, date("2020-06-01"));
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn save_inserts_under_unseen_id() {
        let store = test_store().await;

        let movie =
            Movie { id: 42, name: "Orphan".to_string(), release_date: date("2009-07-24") };
        store.save(&movie).await.unwrap();

        let found = store.find_by_id(42).await.unwrap().unwrap();
        assert_eq!(found.name, "Orphan");
    }

    #[tokio::test]
    async fn delete_by_id_is_idempotent() {
        let store = test_store().await;
        let movie = store.insert("Gone", date("2014-10-03")).await.unwrap();

        store.delete_by_id(movie.id).await.unwrap();
        assert!(store.find_by_id(movie.id).await.unwrap().is_none());

        // Deleting an absent id is not an error.
        store.delete_by_id(movie.id).await.unwrap();
    }
}
