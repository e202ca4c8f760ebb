use leptos::prelude::*;

use crate::api::articles::FeedSnapshot;

#[server]
pub async fn get_recent_articles() -> Result<FeedSnapshot, ServerFnError> {
    use crate::app::AppState;
    let state = leptos::prelude::use_context::<AppState>()
        .ok_or_else(|| ServerFnError::new("AppState not found in context"))?;

    Ok(FeedSnapshot::from_feed(&state.feed))
}

#[server]
pub async fn refresh_recent_articles() -> Result<FeedSnapshot, ServerFnError> {
    use crate::app::AppState;
    let state = leptos::prelude::use_context::<AppState>()
        .ok_or_else(|| ServerFnError::new("AppState not found in context"))?;

    state
        .feed
        .refresh()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(FeedSnapshot::from_feed(&state.feed))
}

/// List of the most recently modified articles with a refresh button.
#[component]
pub fn RecentArticles() -> impl IntoView {
    let refresh = ServerAction::<RefreshRecentArticles>::new();
    let snapshot = Resource::new(move || refresh.version().get(), |_| get_recent_articles());

    let is_loading = Memo::new(move |_| {
        refresh.pending().get()
            || snapshot
                .get()
                .and_then(|res| res.ok())
                .map(|s| s.loading)
                .unwrap_or(false)
    });

    view! {
        <section class="recent-articles">
            <header>
                <button
                    on:click=move |_| {
                        refresh.dispatch(RefreshRecentArticles {});
                    }
                    disabled=move || is_loading.get()
                >
                    "Refresh"
                </button>
                <Show when=move || is_loading.get()>
                    <span class="loading">"Loading..."</span>
                </Show>
            </header>
            {move || refresh.value().get().and_then(|res| res.err()).map(|e| view! {
                <p class="error">"Refresh failed: " {e.to_string()}</p>
            })}
            <Suspense fallback=|| view! { <p>"Loading..."</p> }>
                {move || snapshot.get().map(|res| match res {
                    Ok(snapshot) if snapshot.articles.is_empty() => {
                        view! { <p>"No recent articles."</p> }.into_any()
                    }
                    Ok(snapshot) => view! {
                        <ul>
                            {snapshot.articles.into_iter().map(|article| view! {
                                <li>
                                    <a href=article.path>{article.title}</a>
                                    <p>{article.description}</p>
                                </li>
                            }).collect_view()}
                        </ul>
                    }.into_any(),
                    Err(e) => view! { <p class="error">"Error: " {e.to_string()}</p> }.into_any(),
                })}
            </Suspense>
        </section>
    }
}
