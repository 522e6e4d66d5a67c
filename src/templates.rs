use axum::http::StatusCode;
use hypertext::prelude::*;

use crate::{
    entities::movie,
    models::{AddForm, Candidate, EditForm, EditFormErrors, MAX_RATING},
    routes::{add_title_path, delete_path, edit_path},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const BUTTON_CLASS: &str =
    "w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";

pub fn list_page(movies: &[movie::Model], notice: Option<&str>) -> String {
    page(
        "My Top Movies",
        maud! {
            div class="max-w-4xl mx-auto px-6 py-12" {
                div class="flex items-start justify-between gap-6" {
                    div {
                        h1 class="text-3xl font-bold text-gray-900" { "My Top Movies" }
                        p class="mt-2 text-gray-600" { "These are my all-time favourite movies." }
                    }
                    a class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href="/add" { "Add Movie" }
                }

                @if let Some(notice) = notice {
                    div class="mt-6 rounded-md bg-green-50 border border-green-200 px-4 py-3 text-green-800" { (notice) }
                }

                @if movies.is_empty() {
                    div class="mt-10 bg-white shadow rounded-lg p-8" {
                        p class="text-gray-600" { "No movies yet. Add one to get started." }
                    }
                } @else {
                    div class="mt-10 space-y-4" {
                        @for movie in movies {
                            (movie_card(movie))
                        }
                    }
                }
            }
        },
    )
}

fn movie_card(movie: &movie::Model) -> impl Renderable + '_ {
    let ranking = movie.ranking.map(|r| format!("#{r}")).unwrap_or_default();
    let heading = format!("{} ({})", movie.title, movie.year);
    let rating = movie.rating.map(|r| format!("{r:.1} / {MAX_RATING}"));

    maud! {
        div class="bg-white shadow rounded-lg p-6 flex gap-6" {
            @if movie.img_url.is_empty() {
                div class="w-24 h-36 shrink-0 rounded bg-gray-200" {}
            } @else {
                img class="w-24 h-36 shrink-0 rounded object-cover" src=(movie.img_url) alt=(movie.title);
            }
            div class="flex-1" {
                div class="flex items-start justify-between gap-4" {
                    h2 class="text-xl font-semibold text-gray-900" {
                        span class="mr-2 text-gray-400" { (ranking) }
                        (heading)
                    }
                    @if let Some(rating) = &rating {
                        span class="text-lg font-semibold text-yellow-600" { (rating) }
                    } @else {
                        span class="text-sm text-gray-400" { "Not rated" }
                    }
                }
                p class="mt-2 text-gray-700" { (movie.description) }
                @if let Some(review) = &movie.review {
                    p class="mt-2 italic text-gray-600" { "\u{201c}" (review) "\u{201d}" }
                }
                div class="mt-4 flex gap-4 text-sm" {
                    a class="text-blue-600 hover:text-blue-800" href=(edit_path(&movie.title)) { "Update" }
                    a class="text-red-600 hover:text-red-800" href=(delete_path(movie.id)) { "Delete" }
                }
            }
        }
    }
}

pub fn edit_page(movie: &movie::Model, form: &EditForm, errors: &EditFormErrors) -> String {
    let action = edit_path(&movie.title);
    let rating_label = format!("Your rating out of {MAX_RATING}, e.g. 7.5");

    page(
        "Edit Movie",
        maud! {
            div class="max-w-2xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-3xl font-bold text-gray-900" { (movie.title) }
                    p class="mt-2 text-gray-600" { "Edit movie rating" }

                    form class="mt-8 space-y-6" method="post" action=(action) {
                        div {
                            label class="block text-sm font-medium text-gray-700" for="rating" { (rating_label) }
                            input class=(INPUT_CLASS) name="rating" id="rating" value=(form.rating) required;
                            @if let Some(error) = &errors.rating {
                                p class="mt-2 text-sm text-red-600" { (error) }
                            }
                        }

                        div {
                            label class="block text-sm font-medium text-gray-700" for="review" { "Your review" }
                            input class=(INPUT_CLASS) name="review" id="review" value=(form.review) required;
                            @if let Some(error) = &errors.review {
                                p class="mt-2 text-sm text-red-600" { (error) }
                            }
                        }

                        button class=(BUTTON_CLASS) type="submit" { "Done" }
                    }
                    a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                }
            }
        },
    )
}

pub fn add_page(form: &AddForm, error: Option<&str>) -> String {
    page(
        "Add Movie",
        maud! {
            div class="max-w-2xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-3xl font-bold text-gray-900" { "Add a Movie" }

                    form class="mt-8 space-y-6" method="post" action="/add" {
                        div {
                            label class="block text-sm font-medium text-gray-700" for="title" { "Movie title" }
                            input class=(INPUT_CLASS) name="title" id="title" value=(form.title) required;
                            @if let Some(error) = error {
                                p class="mt-2 text-sm text-red-600" { (error) }
                            }
                        }

                        button class=(BUTTON_CLASS) type="submit" { "Add Movie" }
                    }
                    a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                }
            }
        },
    )
}

pub fn select_page(name: &str, candidates: &[Candidate]) -> String {
    page(
        "Select Movie",
        maud! {
            div class="max-w-2xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-3xl font-bold text-gray-900" { "Select Movie" }
                    p class="mt-2 text-gray-600" { "Results for \u{201c}" (name) "\u{201d}" }

                    @if candidates.is_empty() {
                        p class="mt-8 text-gray-600" { "No movies matched that title." }
                    } @else {
                        ul class="mt-8 divide-y divide-gray-200" {
                            @for candidate in candidates {
                                li class="py-3" {
                                    a class="text-blue-600 hover:text-blue-800" href=(add_title_path(candidate.id, name)) {
                                        (candidate.display_title())
                                    }
                                    @if !candidate.release_date.is_empty() {
                                        span class="ml-2 text-gray-500" { "- " (candidate.release_date) }
                                    }
                                }
                            }
                        }
                    }
                    a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/add" { "Search again" }
                }
            }
        },
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let heading = status.canonical_reason().unwrap_or("Error");

    page(
        "Error",
        maud! {
            div class="flex items-center justify-center pt-24" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { (heading) }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(page_title: &str, body: impl Renderable) -> String {
    let document = maud! {
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (page_title) }
                script src=(TAILWIND_CDN) {}
            }
            body class="min-h-screen bg-gray-50" { (body) }
        }
    }
    .render();

    format!("<!DOCTYPE html>{}", document.into_inner())
}
