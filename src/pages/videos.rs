use super::{render_state, PageProps, RequestState};
use crate::components::ComboBox;
use crate::config::SELECT_CROP;
use crate::hooks::{use_selector, use_settings, use_shortcuts, use_toast};
use crate::views::render_videos;
use cropwise::api::{self, VideoSearch};
use cropwise::models::VideoSearchRequest;
use cropwise::shortcuts::Shortcut;
use cropwise::view_model::VideoCard;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[function_component(VideosPage)]
pub fn videos_page(props: &PageProps) -> Html {
    let settings = use_settings();
    let toast = use_toast();
    let crop = use_selector(props.options.crops.clone());
    let state = use_state(|| RequestState::<Rc<Vec<VideoCard>>>::Idle);

    let search = {
        let settings = settings.clone();
        let toast = toast.clone();
        let crop = crop.clone();
        let state = state.clone();
        Callback::from(move |_: ()| {
            let name = crop.value().trim().to_string();
            if name.is_empty() {
                toast.error(SELECT_CROP);
                return;
            }
            state.set(RequestState::Loading);

            let settings = settings.clone();
            let toast = toast.clone();
            let state = state.clone();
            spawn_local(async move {
                let request = VideoSearchRequest { crop: name };
                match api::call::<VideoSearch>(&settings.api_base, &request).await {
                    Ok(resp) => {
                        let cards = VideoCard::from_videos(&resp.videos);
                        log::info!("{} videos for {}", cards.len(), request.crop);
                        state.set(RequestState::Ready(Rc::new(cards)));
                    }
                    Err(e) => state.set(RequestState::fail("Video search", &e, &toast)),
                }
            });
        })
    };

    // Choosing a crop searches right away.
    let on_change = search.reform(|_: String| ());

    {
        let search = search.clone();
        use_shortcuts(Callback::from(move |shortcut| {
            let submit = shortcut == Shortcut::Submit;
            if submit {
                search.emit(());
            }
            submit
        }));
    }

    let results = render_state(&state, "Unable to Load Videos", None, |cards| {
        render_videos(cards)
    });

    html! {
        <section class="page videos-page">
            <div class="form-card">
                <h2>{ "🎥 Farming Videos" }</h2>
                <div class="form-row">
                    <ComboBox
                        selector={crop}
                        input_id="video-crop"
                        label="Crop / पीक"
                        placeholder="Type to search crops..."
                        {on_change}
                    />
                </div>
                <div class="form-actions">
                    <button class="btn-primary" onclick={search.reform(|_: MouseEvent| ())}>
                        { "🔍 Find Videos" }
                    </button>
                </div>
            </div>
            <div class="results-area">{ results }</div>
        </section>
    }
}
