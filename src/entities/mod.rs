pub mod cast;
pub mod favorite;
pub mod genre;
pub mod movie;
pub mod movie_cast;
pub mod movie_genre;
pub mod purchase;
pub mod review;
pub mod role;
pub mod trailer;
pub mod user;
pub mod user_role;
