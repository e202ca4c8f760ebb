pub mod app;
pub mod error;
#[cfg(feature = "ssr")]
pub mod config;
pub mod feed;
pub mod models {
    pub mod article;
}
pub mod db {
    pub mod models;
    pub mod repository;
}
pub mod search {
    pub mod client;
}
pub mod components {
    pub mod recent_articles;
}
pub mod api {
    pub mod articles;
    pub mod errors;
}

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(app::App);
}
