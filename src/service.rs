use serde_json::{Map, Value};

use crate::{
    error::{AppError, AppResult},
    models::{Movie, MovieDraft},
    store::MovieStore,
};

#[derive(Clone)]
pub struct MovieService {
    store: MovieStore,
}

impl MovieService {
    pub fn new(store: MovieStore) -> Self {
        Self { store }
    }

    pub async fn create(&self, draft: MovieDraft) -> AppResult<Movie> {
        Ok(self.store.insert(&draft.name, draft.release_date).await?)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Movie> {
        self.store.find_by_id(id).await?.ok_or(AppError::NotFound(id))
    }

    // Asks the store to delete regardless of prior existence.
    pub async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        Ok(self.store.delete_by_id(id).await?)
    }

    pub async fn get_all(&self) -> AppResult<Vec<Movie>> {
        Ok(self.store.find_all().await?)
    }

    pub async fn update_full(&self, id: i64, draft: MovieDraft) -> AppResult<Movie> {
        let mut existing = self.store.find_by_id(id).await?.ok_or(AppError::NotFound(id))?;

        existing.name = draft.name;
        existing.release_date = draft.release_date;

        self.store.save(&existing).await?;
        Ok(existing)
    }

    // Merges only the supplied fields into the stored record. Unknown keys
    // are ignored, and a release date that fails to parse is skipped while
    // the rest of the update still commits.
    pub async fn update_partial(&self, id: i64, updates: Map<String, Value>) -> AppResult<Movie> {
        let mut existing = self.store.find_by_id(id).await?.ok_or(AppError::NotFound(id))?;

        for (key, value) in &updates {
            match key.as_str() {
                // A supplied id overwrites the stored one; save then upserts
                // under the rewritten id.
                "id" => {
                    if let Some(new_id) = value.as_i64() {
                        existing.id = new_id;
                    }
                }
                "name" => {
                    if let Some(name) = value.as_str() {
                        existing.name = name.to_string();
                    }
                }
                "releaseDate" => {
                    let Some(raw) = value.as_str() else { continue };
                    match raw.parse() {
                        Ok(date) => existing.release_date = date,
                        Err(err) => {
                            tracing::debug!(raw, %err, "skipping unparseable release date");
                        }
                    }
                }
                _ => {}
            }
        }

        self.store.save(&existing).await?;
        Ok(existing)
    }
}
