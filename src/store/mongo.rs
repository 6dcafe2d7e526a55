//! MongoDB-backed movie store.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};

use super::{MovieStore, StoreError};
use crate::config::DatabaseConfig;
use crate::models::{Movie, MovieInput};

const COLLECTION: &str = "movies";

/// Persisted document shape. Absent fields are simply not stored,
/// matching a schema-flexible collection.
#[derive(Debug, Serialize, Deserialize)]
struct MovieDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    director: Option<String>,
    #[serde(rename = "releaseYear", skip_serializing_if = "Option::is_none")]
    release_year: Option<i32>,
}

impl From<MovieDocument> for Movie {
    fn from(doc: MovieDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            title: doc.title,
            director: doc.director,
            release_year: doc.release_year,
        }
    }
}

pub struct MongoMovieStore {
    db: Database,
    movies: Collection<MovieDocument>,
}

impl MongoMovieStore {
    /// Builds the client. The driver connects lazily, so a dead server
    /// surfaces on the first operation (or the startup ping), not here.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(config.connection_string()).await?;
        let db = client.database(&config.database);
        let movies = db.collection(COLLECTION);

        Ok(Self { db, movies })
    }
}

fn parse_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

/// `$set` document holding only the fields the client supplied.
fn set_document(changes: &MovieInput) -> Document {
    let mut set = Document::new();
    if let Some(title) = &changes.title {
        set.insert("title", title.as_str());
    }
    if let Some(director) = &changes.director {
        set.insert("director", director.as_str());
    }
    if let Some(year) = changes.release_year {
        set.insert("releaseYear", year);
    }
    set
}

#[async_trait]
impl MovieStore for MongoMovieStore {
    async fn list(&self) -> Result<Vec<Movie>, StoreError> {
        let cursor = self.movies.find(doc! {}).await?;
        let docs: Vec<MovieDocument> = cursor.try_collect().await?;

        Ok(docs.into_iter().map(Movie::from).collect())
    }

    async fn get(&self, id: &str) -> Result<Movie, StoreError> {
        let oid = parse_id(id)?;

        self.movies
            .find_one(doc! { "_id": oid })
            .await?
            .map(Movie::from)
            .ok_or(StoreError::NotFound)
    }

    async fn insert(&self, input: MovieInput) -> Result<Movie, StoreError> {
        let document = MovieDocument {
            id: ObjectId::new(),
            title: input.title,
            director: input.director,
            release_year: input.release_year,
        };
        self.movies.insert_one(&document).await?;

        Ok(document.into())
    }

    async fn update(&self, id: &str, changes: MovieInput) -> Result<Movie, StoreError> {
        let oid = parse_id(id)?;
        let set = set_document(&changes);

        // The server rejects an empty $set, so a body with no known
        // fields degrades to a plain read of the existing record.
        if set.is_empty() {
            return self.get(id).await;
        }

        self.movies
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?
            .map(Movie::from)
            .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let oid = parse_id(id)?;

        self.movies
            .find_one_and_delete(doc! { "_id": oid })
            .await?
            .ok_or(StoreError::NotFound)?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_document_holds_only_supplied_fields() {
        let changes = MovieInput { release_year: Some(2010), ..Default::default() };
        assert_eq!(set_document(&changes), doc! { "releaseYear": 2010 });

        let empty = MovieInput::default();
        assert!(set_document(&empty).is_empty());
    }

    #[test]
    fn malformed_id_is_reported_as_invalid() {
        assert!(matches!(parse_id("not-an-object-id"), Err(StoreError::InvalidId(_))));
    }
}
