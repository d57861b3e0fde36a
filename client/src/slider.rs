use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Properties, PartialEq)]
pub struct SliderProps {
    pub value: f64,
    #[prop_or(100.0)]
    pub max: f64,
    #[prop_or(1.0)]
    pub step: f64,
    #[prop_or_default]
    pub orientation: Orientation,
    /// Emitted continuously while dragging.
    pub on_change: Callback<f64>,
    /// Emitted once the thumb is released.
    #[prop_or_default]
    pub on_commit: Callback<f64>,
}

fn value_of(e: &Event) -> Option<f64> {
    e.target()
        .and_then(|target| target.dyn_into().ok())
        .map(|ele: HtmlInputElement| ele.value_as_number())
        .filter(|v| v.is_finite())
}

#[rustfmt::skip::macros(html)]
#[function_component(Slider)]
pub fn slider(props: &SliderProps) -> Html {
    let oninput = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| match value_of(&e) {
            Some(v) => on_change.emit(v),
            None => log::error!("Could not get value from the slider"),
        })
    };

    let onchange = {
        let on_commit = props.on_commit.clone();
        Callback::from(move |e: Event| match value_of(&e) {
            Some(v) => on_commit.emit(v),
            None => log::error!("Could not get value from the slider"),
        })
    };

    let (orientation, orient) = match props.orientation {
        Orientation::Horizontal => ("horizontal", None),
        Orientation::Vertical => ("vertical", Some("vertical")),
    };

    html! {
        <input type="range"
               class={classes!("slider", orientation)}
               orient={orient}
               min="0"
               max={props.max.to_string()}
               step={props.step.to_string()}
               value={props.value.to_string()}
               oninput={oninput}
               onchange={onchange} />
    }
}
