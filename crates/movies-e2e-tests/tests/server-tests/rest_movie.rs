use movies_dal::movie::Movie;
use movies_e2e_tests::{extend_url, prepare_env, rest::create_movie, spawn_server};
use serde_json::json;
use tracing::info;
use tracing_test::traced_test;

#[tokio::test]
#[traced_test]
async fn test_paging() {
    let (args, _config_guard) = prepare_env("test_movie_paging").await.unwrap();

    let base_url = args.base_url.clone();

    let mut count: u64 = 0;
    let conn = movies_dal::new_pool(&args.database_url(), 1).await.unwrap();
    let mut transaction = conn.begin().await.unwrap();

    for i in 0..150 {
        let name = format!("Movie-{:03}", i);
        sqlx::query("INSERT INTO movie (name, release_year, genre) VALUES (?, ?, 'action')")
            .bind(&name)
            .bind(1950 + i)
            .execute(&mut *transaction)
            .await
            .unwrap();

        count += 1;
    }
    transaction.commit().await.unwrap();
    conn.close().await;
    info!("Created {} movies", count);

    spawn_server(args).await.unwrap();
    let client = reqwest::Client::new();
    let api_url = base_url.join("movie").unwrap();

    let response = client.get(api_url.clone()).send().await.unwrap();
    info! {"Response: {:#?}", response};
    assert!(response.status().is_success());
    let page: Vec<Movie> = response.json().await.unwrap();
    assert_eq!(100, page.len());
    assert_eq!("Movie-000", page[0].name);
    assert_eq!("Movie-099", page[99].name);

    let get_page = async |offset: u64, limit: u64| {
        let mut page_url = api_url.clone();
        let query = format!("offset={offset}&limit={limit}");
        page_url.set_query(Some(&query));
        let response = client.get(page_url).send().await.unwrap();
        info! {"Response: {:#?}", response};
        assert!(response.status().is_success());
        let page: Vec<Movie> = response.json().await.unwrap();
        page
    };

    let page = get_page(140, 100).await;
    assert_eq!(10, page.len());
    assert_eq!("Movie-140", page[0].name);

    let page = get_page(50, 20).await;
    assert_eq!(20, page.len());
    assert_eq!("Movie-050", page[0].name);
    assert_eq!(Some(2019), page[19].release_year);

    let mut page_url = api_url.clone();
    page_url.set_query(Some("limit=1000"));
    let response = client.get(page_url).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
#[traced_test]
async fn test_movies() {
    let (args, _config_guard) = prepare_env("test_movies").await.unwrap();

    let base_url = args.base_url.clone();
    spawn_server(args).await.unwrap();
    let client = reqwest::Client::new();
    let api_url = base_url.join("movie").unwrap();

    let movies = [
        ("Alien", Some(1979), "HORROR"),
        ("Airplane!", Some(1980), "comedy"),
        ("Notting Hill", None, "Romance"),
        ("Solaris", Some(1972), "scifi"),
    ];
    let mut created = Vec::new();
    for (name, year, genre) in movies.iter() {
        let movie = create_movie(&client, &base_url, name, *year, genre)
            .await
            .unwrap();
        assert!(movie.id > 0);
        assert!(!created.iter().any(|m: &Movie| m.id == movie.id));
        assert_eq!(movie.name, *name);
        assert_eq!(movie.release_year, *year);
        assert_eq!(movie.genre.as_str(), genre.to_lowercase());
        created.push(movie);
    }

    let bad = json!({"name": "BAD_MOVIE", "release_year": 2024, "description": "A mind-bending thriller", "genre": "BAD_GENRE"});
    let response = client.post(api_url.clone()).json(&bad).send().await.unwrap();
    info!("Response: {:#?}", response);
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid genre provided, valid genres are")
    );

    let response = client.get(api_url.clone()).send().await.unwrap();
    assert!(response.status().is_success());
    let stored: Vec<Movie> = response.json().await.unwrap();
    assert_eq!(stored, created);

    let solaris = &created[3];
    let record_url = extend_url(&api_url, solaris.id);
    let response = client.get(record_url.clone()).send().await.unwrap();
    assert!(response.status().is_success());
    let rec: Movie = response.json().await.unwrap();
    assert_eq!(&rec, solaris);

    let response = client.delete(record_url.clone()).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let deleted: Movie = response.json().await.unwrap();
    assert_eq!(&deleted, solaris);

    let response = client.get(record_url.clone()).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({"message": "Movie not found"}));

    let response = client
        .delete(extend_url(&api_url, 0))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let response = client.get(api_url.clone()).send().await.unwrap();
    let stored: Vec<Movie> = response.json().await.unwrap();
    assert_eq!(created.len() - 1, stored.len());
}
