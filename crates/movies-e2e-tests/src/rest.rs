use anyhow::Result;
use movies_dal::movie::Movie;
use reqwest::Url;
use serde_json::json;
use tracing::info;

pub async fn create_movie(
    client: &reqwest::Client,
    base_url: &Url,
    name: &str,
    release_year: Option<i64>,
    genre: &str,
) -> Result<Movie> {
    let payload = json!({"name": name, "release_year": release_year, "description": "TESTING", "genre": genre});
    let api_url = base_url.join("movie")?;

    let response = client.post(api_url).json(&payload).send().await?;
    info!("Response: {:#?}", response);
    assert!(response.status().is_success());
    assert!(response.status().as_u16() == 201);

    let new_movie: Movie = response.json().await?;
    Ok(new_movie)
}
