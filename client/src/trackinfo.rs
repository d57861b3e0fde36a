use yew::prelude::*;

use crate::slider::Slider;

#[derive(Properties, PartialEq)]
pub struct TrackInfoProps {
    pub title: AttrValue,
    pub artist: AttrValue,
    pub time: AttrValue,
    pub progress: f64,
    pub step: f64,
    pub on_scrub: Callback<f64>,
    pub on_commit: Callback<f64>,
}

#[rustfmt::skip::macros(html)]
#[function_component(TrackInfo)]
pub fn track_info(props: &TrackInfoProps) -> Html {
    let title = if props.title.is_empty() {
        "No track selected".into()
    } else {
        props.title.clone()
    };
    let artist = if props.artist.is_empty() {
        "Unknown artist".into()
    } else {
        props.artist.clone()
    };

    html! {
        <div class={classes!("panel", "light")}>
            <div class={classes!("space-between")}>
                <div class={classes!("truncate")}>
                    <h2 class={classes!("bold")}>{&title}</h2>
                    <p class={classes!("small", "dim")}>{&artist}</p>
                </div>
                <div class={classes!("mono", "small", "display")}>{&props.time}</div>
            </div>
            <div class={classes!("pad")}>
                <Slider value={props.progress}
                        max={100.0}
                        step={props.step}
                        on_change={props.on_scrub.clone()}
                        on_commit={props.on_commit.clone()} />
            </div>
        </div>
    }
}
