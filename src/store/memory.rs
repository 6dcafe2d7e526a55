//! Insertion-ordered in-memory store, used by the integration tests in
//! place of a live MongoDB.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{MovieStore, StoreError};
use crate::models::{Movie, MovieInput};

#[derive(Default)]
pub struct MemoryMovieStore {
    movies: RwLock<Vec<Movie>>,
}

impl MemoryMovieStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MovieStore for MemoryMovieStore {
    async fn list(&self) -> Result<Vec<Movie>, StoreError> {
        Ok(self.movies.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Movie, StoreError> {
        self.movies
            .read()
            .await
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn insert(&self, input: MovieInput) -> Result<Movie, StoreError> {
        let movie = Movie {
            id: ObjectId::new().to_hex(),
            title: input.title,
            director: input.director,
            release_year: input.release_year,
        };
        self.movies.write().await.push(movie.clone());

        Ok(movie)
    }

    async fn update(&self, id: &str, changes: MovieInput) -> Result<Movie, StoreError> {
        let mut movies = self.movies.write().await;
        let movie = movies
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(StoreError::NotFound)?;

        if changes.title.is_some() {
            movie.title = changes.title;
        }
        if changes.director.is_some() {
            movie.director = changes.director;
        }
        if changes.release_year.is_some() {
            movie.release_year = changes.release_year;
        }

        Ok(movie.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut movies = self.movies.write().await;
        let before = movies.len();
        movies.retain(|m| m.id != id);

        if movies.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, director: &str, year: i32) -> MovieInput {
        MovieInput {
            title: Some(title.into()),
            director: Some(director.into()),
            release_year: Some(year),
        }
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let store = MemoryMovieStore::new();

        let created = store.insert(input("Inception", "Nolan", 2010)).await.unwrap();
        let fetched = store.get(&created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.title.as_deref(), Some("Inception"));
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = MemoryMovieStore::new();
        store.insert(input("First", "A", 2001)).await.unwrap();
        store.insert(input("Second", "B", 2002)).await.unwrap();
        store.insert(input("Third", "C", 2003)).await.unwrap();

        let titles: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .filter_map(|m| m.title)
            .collect();

        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn update_merges_partial_fields() {
        let store = MemoryMovieStore::new();
        let movie = store.insert(input("Inception", "Nolan", 2008)).await.unwrap();

        let patch = MovieInput { release_year: Some(2010), ..Default::default() };
        let updated = store.update(&movie.id, patch).await.unwrap();

        assert_eq!(updated.title.as_deref(), Some("Inception"));
        assert_eq!(updated.director.as_deref(), Some("Nolan"));
        assert_eq!(updated.release_year, Some(2010));
    }

    #[tokio::test]
    async fn update_missing_movie_is_not_found() {
        let store = MemoryMovieStore::new();
        let result = store.update("64b000000000000000000000", MovieInput::default()).await;

        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn delete_missing_is_not_found_every_time() {
        let store = MemoryMovieStore::new();

        for _ in 0..3 {
            let result = store.delete("64b000000000000000000000").await;
            assert!(matches!(result, Err(StoreError::NotFound)));
        }
    }
}
