//! Page-number strip driven by a `Paginator` signal.

use leptos::prelude::*;

use crate::util::pagination::Paginator;

/// Previous/next arrows around one button per page. Hidden when there is
/// only one page.
#[component]
pub fn PageStrip(pager: RwSignal<Paginator>) -> impl IntoView {
    view! {
        <Show when=move || { pager.get().total() > 1 }>
            <nav class="page-strip">
                <button
                    class="page-strip__arrow"
                    disabled=move || pager.get().is_first()
                    on:click=move |_| pager.update(Paginator::prev)
                >
                    "‹"
                </button>
                {move || {
                    pager
                        .get()
                        .pages()
                        .into_iter()
                        .map(|item| {
                            let class = if item.is_active {
                                "page-strip__page page-strip__page--active"
                            } else {
                                "page-strip__page"
                            };
                            view! {
                                <button class=class on:click=move |_| pager.update(|p| p.go_to(item.number))>
                                    {item.number}
                                </button>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
                <button
                    class="page-strip__arrow"
                    disabled=move || pager.get().is_last()
                    on:click=move |_| pager.update(Paginator::next)
                >
                    "›"
                </button>
            </nav>
        </Show>
    }
}
