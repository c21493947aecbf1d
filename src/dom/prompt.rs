use leptos::prelude::*;

use super::WidgetState;

#[component]
pub(crate) fn UploadPromptView(state: WidgetState) -> impl IntoView {
    let prompt = Memo::new(move |_| state.with(|w| w.collection.prompt()));
    let notice = Memo::new(move |_| state.with(|w| w.notice));

    view! {
        <div class="flex flex-col items-center space-y-2"
            aria-disabled=move || (!prompt.get().can_add()).to_string()
        >
            <div class="text-lg font-medium text-gray-700">{move || prompt.get().title()}</div>
            <div class="text-sm text-gray-500">{move || prompt.get().detail()}</div>
            {move || notice.get().map(|n| view! {
                <div class="text-sm text-amber-700" role="alert">{n.to_string()}</div>
            })}
        </div>
    }
}
