use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

use crate::{
    entities::{genre, movie},
    models::{CatalogCounts, Money, MovieDetails, MovieSummary, Rating},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

pub fn home_page(counts: CatalogCounts) -> String {
    page(
        "Movie Store",
        html! {
            div class="min-h-screen bg-gray-50" {
                (nav())
                div class="max-w-4xl mx-auto px-6 py-12" {
                    h1 class="text-3xl font-bold text-gray-900" { "Movie Store" }
                    p class="mt-2 text-gray-600" { "Browse the catalog or add a new title." }

                    div class="mt-8 grid gap-4 md:grid-cols-3" {
                        (stat("Movies", counts.movies))
                        (stat("Genres", counts.genres))
                        (stat("Cast", counts.cast))
                    }

                    div class="mt-8 flex gap-4" {
                        a class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href="/Movies/Index" { "Browse movies" }
                        a class="rounded-md border border-gray-300 px-4 py-2 font-semibold text-gray-700 hover:bg-gray-100" href="/Movies/Create" { "Add a movie" }
                    }
                }
            }
        },
    )
}

pub fn movies_page(
    summaries: &[MovieSummary],
    genres: &[genre::Model],
    selected: Option<i32>,
    created: Option<&movie::Model>,
) -> String {
    page(
        "Movies",
        html! {
            div class="min-h-screen bg-gray-50" {
                (nav())
                div class="max-w-4xl mx-auto px-6 py-10" {
                    @if let Some(movie) = created {
                        div id="notice" class="mb-6 rounded-md border border-green-300 bg-green-50 px-4 py-3 text-green-800" {
                            "Created \"" (movie.title) "\"."
                        }
                    }

                    div class="flex items-start justify-between gap-6" {
                        h1 class="text-3xl font-bold text-gray-900" { "Movies" }
                        a class="text-sm text-blue-600 hover:text-blue-800" href="/Movies/Create" { "Add a movie" }
                    }

                    @if !genres.is_empty() {
                        div class="mt-6 flex flex-wrap gap-2" {
                            (genre_link("All", "/Movies/Index".to_string(), selected.is_none()))
                            @for genre in genres {
                                (genre_link(&genre.name, format!("/Movies/Index?genre={}", genre.id), selected == Some(genre.id)))
                            }
                        }
                    }

                    @if summaries.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No movies yet." }
                        }
                    } @else {
                        table class="mt-8 w-full bg-white shadow rounded-lg text-left" {
                            thead {
                                tr class="border-b text-sm text-gray-500" {
                                    th class="px-4 py-3" { "Title" }
                                    th class="px-4 py-3" { "Price" }
                                    th class="px-4 py-3" { "Rating" }
                                }
                            }
                            tbody {
                                @for summary in summaries {
                                    tr class="border-b last:border-0" {
                                        td class="px-4 py-3" {
                                            a class="text-blue-600 hover:text-blue-800" href=(format!("/Movies/Details/{}", summary.movie.id)) { (summary.movie.title) }
                                        }
                                        td class="px-4 py-3 text-gray-700" { "$" (Money::from_cents(summary.movie.price)) }
                                        td class="px-4 py-3 text-gray-700" { (rating(summary.rating)) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn create_movie_page(error: Option<&str>, title: &str, budget: &str) -> String {
    page(
        "Add a movie",
        html! {
            div class="min-h-screen bg-gray-50" {
                (nav())
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { "Add a movie" }

                        @if let Some(error) = error {
                            p id="error" class="mt-4 rounded-md bg-red-50 px-4 py-3 text-red-700" { (error) }
                        }

                        form class="mt-8 space-y-6" method="post" action="/Movies/Create" {
                            div {
                                label class="block text-sm font-medium text-gray-700" for="title" { "Title" }
                                input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500" name="title" id="title" value=(title) maxlength="256" required;
                            }

                            div {
                                label class="block text-sm font-medium text-gray-700" for="budget" { "Budget" }
                                input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500" name="budget" id="budget" value=(budget) inputmode="decimal" placeholder="160000000.00";
                                p class="mt-2 text-xs text-gray-500" { "Optional, up to two decimals." }
                            }

                            button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Create" }
                        }
                    }
                }
            }
        },
    )
}

pub fn movie_details_page(details: &MovieDetails) -> String {
    let movie = &details.movie;
    page(
        &movie.title,
        html! {
            div class="min-h-screen bg-gray-50" {
                (nav())
                div class="max-w-4xl mx-auto px-6 py-10 space-y-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" {
                            (movie.title)
                            @if let Some(date) = movie.release_date.and_then(format_date) {
                                span class="ml-2 font-normal text-gray-500" { "(" (date) ")" }
                            }
                        }
                        @if let Some(tagline) = &movie.tagline {
                            p class="mt-2 italic text-gray-600" { (tagline) }
                        }
                        @if let Some(overview) = &movie.overview {
                            p class="mt-4 text-gray-700" { (overview) }
                        }
                        dl class="mt-6 grid grid-cols-2 gap-4 text-sm md:grid-cols-4" {
                            (fact("Price", format!("${}", Money::from_cents(movie.price))))
                            (fact("Rating", rating(details.rating)))
                            @if let Some(budget) = movie.budget {
                                (fact("Budget", format!("${}", Money::from_cents(budget))))
                            }
                            @if let Some(run_time) = movie.run_time {
                                (fact("Run time", format!("{run_time} min")))
                            }
                        }
                        @if !details.genres.is_empty() {
                            div class="mt-6 flex flex-wrap gap-2" {
                                @for genre in &details.genres {
                                    a class="rounded-full bg-gray-100 px-3 py-1 text-sm text-gray-700 hover:bg-gray-200" href=(format!("/Movies/Index?genre={}", genre.id)) { (genre.name) }
                                }
                            }
                        }
                    }

                    @if !details.trailers.is_empty() {
                        (section("Trailers", html! {
                            ul class="space-y-1" {
                                @for trailer in &details.trailers {
                                    li class="text-sm" {
                                        @match trailer.trailer_url.as_deref().and_then(web_url) {
                                            Some(url) => {
                                                a class="text-blue-600 hover:text-blue-800" href=(url) target="_blank" rel="noopener noreferrer" { (trailer.name.as_deref().unwrap_or("Trailer")) }
                                            }
                                            None => {
                                                span class="text-gray-700" { (trailer.name.as_deref().unwrap_or("Trailer")) }
                                            }
                                        }
                                    }
                                }
                            }
                        }))
                    }

                    @if !details.credits.is_empty() {
                        (section("Cast", html! {
                            ul class="grid gap-2 md:grid-cols-2" {
                                @for credit in &details.credits {
                                    li class="text-sm text-gray-700" {
                                        span class="font-medium" { (credit.cast.name.as_deref().unwrap_or("Unknown")) }
                                        span class="text-gray-500" { " as " (credit.character) }
                                    }
                                }
                            }
                        }))
                    }

                    (section("Reviews", html! {
                        @if details.reviews.is_empty() {
                            p class="text-sm text-gray-500" { "No reviews yet." }
                        } @else {
                            ul class="space-y-3" {
                                @for review in &details.reviews {
                                    li class="border-l-4 border-blue-500 pl-4" {
                                        span class="font-semibold text-gray-900" { (Rating::from_hundredths(review.rating)) }
                                        @if let Some(text) = &review.review_text {
                                            p class="text-sm text-gray-700" { (text) }
                                        }
                                    }
                                }
                            }
                        }
                    }))
                }
            }
        },
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { (status.as_u16()) " " (status.canonical_reason().unwrap_or("Error")) }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/Home/Index" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn nav() -> Markup {
    html! {
        nav class="bg-white shadow" {
            div class="max-w-4xl mx-auto flex gap-6 px-6 py-4 text-sm font-medium" {
                a class="text-gray-900" href="/Home/Index" { "Movie Store" }
                a class="text-gray-600 hover:text-gray-900" href="/Movies/Index" { "Movies" }
            }
        }
    }
}

fn stat(label: &str, value: u64) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-6" {
            p class="text-sm text-gray-500" { (label) }
            p class="mt-1 text-3xl font-semibold text-gray-900" { (value) }
        }
    }
}

fn genre_link(label: &str, href: String, active: bool) -> Markup {
    let class = if active {
        "rounded-full bg-blue-600 px-3 py-1 text-sm text-white"
    } else {
        "rounded-full bg-gray-100 px-3 py-1 text-sm text-gray-700 hover:bg-gray-200"
    };
    html! { a class=(class) href=(href) { (label) } }
}

fn fact(label: &str, value: String) -> Markup {
    html! {
        div {
            dt class="text-gray-500" { (label) }
            dd class="font-medium text-gray-900" { (value) }
        }
    }
}

fn section(title: &str, inner: Markup) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-8" {
            h2 class="text-xl font-semibold text-gray-900" { (title) }
            div class="mt-4" { (inner) }
        }
    }
}

fn rating(rating: Option<Rating>) -> String {
    rating.map_or_else(|| "Not rated".to_string(), |r| r.to_string())
}

/// Only absolute http(s) URLs become links.
fn web_url(url: &str) -> Option<&str> {
    let url = url.trim();
    let scheme = url.split_once("://").map(|(scheme, _)| scheme.to_ascii_lowercase());
    matches!(scheme.as_deref(), Some("http" | "https")).then_some(url)
}

fn format_date(seconds: i64) -> Option<String> {
    jiff::Timestamp::from_second(seconds).ok().map(|ts| ts.strftime("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_escaped() {
        let html = create_movie_page(None, "<script>alert(1)</script>", "");
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>alert"));
    }

    #[test]
    fn release_dates_render_as_days() {
        assert_eq!(format_date(1_537_574_400).as_deref(), Some("2018-09-22"));
        assert_eq!(rating(None), "Not rated");
        assert_eq!(rating(Some(Rating::from_hundredths(850))), "8.50");
    }

    #[test]
    fn only_web_trailer_urls_become_links() {
        assert_eq!(web_url("https://youtu.be/zSWdZVtXT7E"), Some("https://youtu.be/zSWdZVtXT7E"));
        assert_eq!(web_url(" HTTP://example.com/t "), Some("HTTP://example.com/t"));
        assert_eq!(web_url("javascript:alert(1)"), None);
        assert_eq!(web_url("javascript://%0Aalert(1)"), None);
        assert_eq!(web_url("/relative/path"), None);
    }

    #[test]
    fn unsafe_trailer_url_renders_as_text() {
        let movie = movie::Model {
            id: 1,
            title: "Heat".to_string(),
            overview: None,
            tagline: None,
            budget: None,
            revenue: None,
            imdb_url: None,
            tmdb_url: None,
            poster_url: None,
            backdrop_url: None,
            original_language: None,
            release_date: None,
            run_time: None,
            price: 990,
            created_date: 0,
            updated_date: None,
        };
        let trailer = crate::entities::trailer::Model {
            id: 1,
            movie_id: 1,
            trailer_url: Some("javascript:alert(1)".to_string()),
            name: Some("Teaser".to_string()),
        };
        let details = MovieDetails {
            movie,
            rating: None,
            trailers: vec![trailer],
            genres: Vec::new(),
            credits: Vec::new(),
            reviews: Vec::new(),
        };
        let html = movie_details_page(&details);
        assert!(html.contains("Teaser"));
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn error_page_names_the_status() {
        let html = error_page(StatusCode::NOT_FOUND, "movie 7 not found");
        assert!(html.contains("404 Not Found"));
        assert!(html.contains("movie 7 not found"));
    }
}
