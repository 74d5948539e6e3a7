use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::{Movie, MovieId, MovieInput};

/// Movies live under the `/products` collection.
pub struct ProductsApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> ProductsApi<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<Vec<Movie>, ApiError> {
        self.client.get("/products")
    }

    pub fn get(&self, id: MovieId) -> Result<Movie, ApiError> {
        self.client.get(&format!("/products/{id}"))
    }

    pub fn create(&self, input: &MovieInput) -> Result<Movie, ApiError> {
        self.client.post("/products", input)
    }

    pub fn update(&self, id: MovieId, input: &MovieInput) -> Result<Movie, ApiError> {
        self.client.put(&format!("/products/{id}"), input)
    }

    pub fn delete(&self, id: MovieId) -> Result<(), ApiError> {
        self.client.delete(&format!("/products/{id}"))
    }
}
