//! Dismissible toast for a store's current `Notice`.

use leptos::prelude::*;

use crate::state::notice::{Notice, NoticeKind};

#[component]
pub fn NoticeToast(#[prop(into)] notice: Signal<Notice>, on_dismiss: Callback<()>) -> impl IntoView {
    let class = move || match notice.get().kind {
        NoticeKind::Success => "notice notice--success",
        NoticeKind::Error => "notice notice--error",
    };

    view! {
        <Show when=move || notice.get().visible>
            <div class=class role="status">
                <span class="notice__message">{move || notice.get().message}</span>
                <button class="notice__close" title="Закрыть" on:click=move |_| on_dismiss.run(())>
                    "×"
                </button>
            </div>
        </Show>
    }
}
