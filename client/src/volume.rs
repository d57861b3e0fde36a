use yew::prelude::*;

use crate::slider::{Orientation, Slider};

#[derive(Properties, PartialEq)]
pub struct VolumeProps {
    pub orientation: Orientation,
    /// What the slider shows, zero while muted.
    pub volume: u8,
    pub muted: bool,
    pub step: u8,
    pub on_change: Callback<u8>,
    pub on_toggle_mute: Callback<MouseEvent>,
}

#[rustfmt::skip::macros(html)]
#[function_component(VolumeControl)]
pub fn volume_control(props: &VolumeProps) -> Html {
    let icon = if props.muted {
        "icon-volume-mute"
    } else {
        "icon-volume-up"
    };

    let on_change = {
        let on_change = props.on_change.clone();
        Callback::from(move |v: f64| on_change.emit(v.round().clamp(0.0, 100.0) as u8))
    };

    let class = match props.orientation {
        Orientation::Horizontal => "volume-narrow",
        Orientation::Vertical => "volume-wide",
    };

    html! {
        <div class={classes!("volume", class)}>
            <button onclick={props.on_toggle_mute.clone()}
                    class={classes!("key", "small-key")}
                    title={if props.muted {"Unmute"} else {"Mute"}}>
                <span class={classes!("face", "face-orange", "icon", icon)} />
            </button>
            <Slider value={f64::from(props.volume)}
                    max={100.0}
                    step={f64::from(props.step)}
                    orientation={props.orientation}
                    on_change={on_change} />
        </div>
    }
}
