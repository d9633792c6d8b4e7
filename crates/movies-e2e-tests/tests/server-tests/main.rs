mod rest_movie;
mod server_health;
