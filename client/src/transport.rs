use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TransportProps {
    pub playing: bool,
    pub on_previous: Callback<MouseEvent>,
    pub on_rewind: Callback<MouseEvent>,
    pub on_toggle: Callback<MouseEvent>,
    pub on_forward: Callback<MouseEvent>,
    pub on_next: Callback<MouseEvent>,
}

#[rustfmt::skip::macros(html)]
#[function_component(TransportBar)]
pub fn transport_bar(props: &TransportProps) -> Html {
    let (play_icon, play_face) = if props.playing {
        ("icon-pause", "face-orange")
    } else {
        ("icon-play", "face-green")
    };

    html! {
        <div class={classes!("transport")}>
            <button onclick={props.on_previous.clone()}
                    class={classes!("key")}
                    title={"Previous track"}>
                <span class={classes!("face", "icon", "icon-skip-back")} />
            </button>

            <button onclick={props.on_rewind.clone()}
                    class={classes!("key")}
                    title={"Rewind"}>
                <span class={classes!("face", "icon", "icon-rewind")} />
            </button>

            <button onclick={props.on_toggle.clone()}
                    class={classes!("key")}
                    title={if props.playing {"Pause"} else {"Play"}}>
                <span class={classes!("face", "big", "icon", play_face, play_icon)} />
            </button>

            <button onclick={props.on_forward.clone()}
                    class={classes!("key")}
                    title={"Fast forward"}>
                <span class={classes!("face", "icon", "icon-fast-forward")} />
            </button>

            <button onclick={props.on_next.clone()}
                    class={classes!("key")}
                    title={"Next track"}>
                <span class={classes!("face", "icon", "icon-skip-fwd")} />
            </button>
        </div>
    }
}
