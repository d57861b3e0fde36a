use std::rc::Rc;

use player::{Catalog, TrackId};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TrackListProps {
    pub catalog: Rc<Catalog>,
    pub current: TrackId,
    pub onclick: Callback<TrackId>,
}

#[rustfmt::skip::macros(html)]
#[function_component(TrackList)]
pub fn track_list(props: &TrackListProps) -> Html {
    let contents: Html = props
        .catalog
        .iter()
        .map(|t| {
            let onclick = props.onclick.clone();
            let id = t.id;
            let selected = (props.current == id).then_some("selected");
            html! {
                <button key={id.0}
                        onclick={Callback::from(move |_| onclick.emit(id))}
                        class={classes!("track", selected)}>
                    <div class={classes!("track-title")}>{t.title.clone()}</div>
                    <div class={classes!("track-artist")}>{t.artist.clone()}</div>
                    <div class={classes!("track-label", "mono")}>{t.label()}</div>
                </button>
            }
        })
        .collect();

    html! {
        <div class={classes!("panel")}>
            <h3 class={classes!("small", "caps")}>{"Tracks"}</h3>
            <div class={classes!("scroll-area")}>
                <div class={classes!("grid-2", "gap")}>
                    {contents}
                </div>
            </div>
        </div>
    }
}
